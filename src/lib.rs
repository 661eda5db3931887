// src/lib.rs
//! Cairn glTF Viewer
//!
//! A small desktop viewer for glTF 2.0 models built on wgpu and winit.
//! Scenes are flattened into a single vertex/index buffer pair up front,
//! then drawn with Phong lighting, normal mapping and an adjustable
//! morph animation.

pub mod app;
pub mod gfx;
pub mod performance;
pub mod scene;
pub mod ui;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::ViewerApp;
pub use scene::{FlatScene, Model, SceneError};

/// Loads a glTF or GLB file and creates a viewer application for it.
///
/// The file is parsed and flattened before this returns, so malformed
/// assets fail here rather than after the window opens.
pub fn open(path: impl AsRef<std::path::Path>) -> Result<ViewerApp, SceneError> {
    let model = Model::from_path(path)?;
    let scene = scene::flatten(&model)?;
    Ok(ViewerApp::new(scene, model.images))
}
