//! Desktop viewer binary: opens the glTF or GLB file named on the command line.

use anyhow::{Context, Result};

fn main() -> Result<()> {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .context("usage: cairn <model.gltf|model.glb>")?;

    let app = cairn::open(&path).with_context(|| format!("failed to load {}", path))?;
    app.run();

    Ok(())
}
