//! # User Interface Module
//!
//! Dear ImGui-based overlay: the [`UiManager`] wires ImGui into winit and
//! wgpu, and [`panel`] holds the lighting panel the viewer shows.
//!
//! Input capture is routed through the manager so that dragging a slider
//! never doubles as a camera drag.

pub mod manager;
pub mod panel;

// Re-export main types
pub use manager::UiManager;
pub use panel::{lighting_panel, LightingSettings};
