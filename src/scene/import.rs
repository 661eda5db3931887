//! glTF model loading.
//!
//! A [`Model`] bundles the parsed document with its decoded buffer and image
//! tables, which is everything the flattener and the uploader need. Loading
//! goes through the `gltf` crate, so GLB containers, embedded data URIs and
//! (for path-based loads) external buffer or image files all work.

use std::path::Path;

use super::error::SceneError;

/// A parsed glTF asset with all binary payloads decoded.
#[derive(Debug)]
pub struct Model {
    /// The glTF document tree (scenes, nodes, meshes, materials, ...).
    pub document: gltf::Document,
    /// Raw buffer contents, indexed by buffer.
    pub buffers: Vec<gltf::buffer::Data>,
    /// Decoded images, indexed by image.
    pub images: Vec<gltf::image::Data>,
}

impl Model {
    /// Loads a model from a `.glb` or `.gltf` file on disk. External
    /// buffer and image URIs resolve relative to the file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let (document, buffers, images) = gltf::import(path)?;
        let model = Model {
            document,
            buffers,
            images,
        };
        log::info!(
            "loaded {}: {} nodes, {} meshes, {} materials, {} images",
            path.display(),
            model.document.nodes().len(),
            model.document.meshes().len(),
            model.document.materials().len(),
            model.images.len()
        );
        Ok(model)
    }

    /// Loads a model from an in-memory GLB (or glTF JSON with embedded
    /// payloads). External URIs are not resolvable here and fail import.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SceneError> {
        let (document, buffers, images) = gltf::import_slice(bytes)?;
        log::info!(
            "loaded {} byte model: {} nodes, {} meshes, {} images",
            bytes.len(),
            document.nodes().len(),
            document.meshes().len(),
            images.len()
        );
        Ok(Model {
            document,
            buffers,
            images,
        })
    }
}
