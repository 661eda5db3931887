//! # Scene Module
//!
//! Everything between a glTF file on disk and buffers the renderer can draw:
//!
//! - **Import** ([`import`]) - parsing and payload decoding via the `gltf` crate
//! - **Flattening** ([`flatten`]) - node-graph traversal that bakes world
//!   transforms into shared vertex/index buffers and per-primitive draws
//! - **Vertex layout** ([`vertex`]) - the interleaved format shared with the
//!   GPU pipeline
//! - **Errors** ([`error`]) - structured failures for malformed assets
//!
//! The usual pipeline is two calls:
//!
//! ```no_run
//! use cairn::scene::{flatten, Model};
//!
//! let model = Model::from_path("model.glb")?;
//! let scene = flatten(&model)?;
//! # Ok::<(), cairn::scene::SceneError>(())
//! ```

pub mod error;
pub mod flatten;
pub mod import;
pub mod vertex;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-export commonly used types
pub use error::SceneError;
pub use flatten::{flatten, DrawDescriptor, FlatScene};
pub use import::Model;
pub use vertex::Vertex;
