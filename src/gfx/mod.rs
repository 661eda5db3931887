//! # Graphics Module
//!
//! Everything between the flattened scene and the screen: camera, GPU
//! resource upload, and the render engine.
//!
//! - **Camera System** ([`camera`]) - First-person camera with mouse look
//! - **Model Upload** ([`model`]) - Vertex/index buffers and per-draw textures
//! - **Render Engine** ([`render_engine`]) - Surface, pipeline, and frame loop
//! - **Textures** ([`texture`]) - Mipmapped image upload and the depth buffer

pub mod camera;
pub mod model;
pub mod render_engine;
pub mod texture;

// Re-export commonly used types
pub use camera::fly_camera::FlyCamera;
pub use model::ModelGpu;
pub use render_engine::RenderEngine;
