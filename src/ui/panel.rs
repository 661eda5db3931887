// src/ui/panel.rs
//! Lighting control panel.
//!
//! One window with the frame counter and the sliders that feed the global
//! uniform: ambient, diffuse, the two light intensities, the specular pair,
//! and the morph speed.

/// Shading parameters editable at runtime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightingSettings {
    pub ambient_strength: f32,
    pub diffuse_reflection: f32,
    pub light1: f32,
    pub light2: f32,
    pub shininess: f32,
    pub specular_strength: f32,
    pub morph_speed: f32,
}

impl Default for LightingSettings {
    fn default() -> Self {
        Self {
            ambient_strength: 0.5,
            diffuse_reflection: 1.0,
            light1: 0.9,
            light2: 1.0,
            shininess: 30.0,
            specular_strength: 1.0,
            morph_speed: 0.2,
        }
    }
}

/// Draws the lighting panel and edits `settings` in place.
pub fn lighting_panel(ui: &imgui::Ui, settings: &mut LightingSettings, fps: usize) {
    ui.window("Lighting")
        .size([360.0, 0.0], imgui::Condition::FirstUseEver)
        .position([20.0, 20.0], imgui::Condition::FirstUseEver)
        .resizable(true)
        .collapsible(true)
        .build(|| {
            ui.text(format!("FPS: {}", fps));
            ui.separator();

            ui.slider("Ambient", 0.0, 10.0, &mut settings.ambient_strength);
            ui.slider("Diffuse", 0.0, 10.0, &mut settings.diffuse_reflection);
            ui.slider("Light 1", 0.0, 1.0, &mut settings.light1);
            ui.slider("Light 2", 0.0, 1.0, &mut settings.light2);
            ui.slider("Shininess", 0.0, 100.0, &mut settings.shininess);
            ui.slider("Specular", 0.0, 10.0, &mut settings.specular_strength);
            ui.slider("Morph", 0.0, 10.0, &mut settings.morph_speed);
        });
}
