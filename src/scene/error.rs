//! Error type for model import and scene flattening.

use thiserror::Error;

/// Everything that can go wrong between opening a glTF file and producing
/// a flattened scene. Structural variants carry the node / primitive /
/// attribute they were detected at so a bad asset can be fixed from the
/// message alone.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("import failed: {0}")]
    Import(#[from] gltf::Error),

    #[error("document contains no scene")]
    NoScene,

    #[error("node {node} appears more than once in the node graph")]
    NodeCycle { node: usize },

    #[error("node {node}: mesh {mesh} has no primitives")]
    NoPrimitives { node: usize, mesh: usize },

    #[error("node {node} primitive {primitive}: mode {mode:?} is not triangle list")]
    Topology {
        node: usize,
        primitive: usize,
        mode: gltf::mesh::Mode,
    },

    #[error("node {node} primitive {primitive}: missing {attribute} attribute")]
    MissingAttribute {
        node: usize,
        primitive: usize,
        attribute: &'static str,
    },

    #[error("node {node} primitive {primitive}: {attribute} accessor is sparse")]
    SparseAccessor {
        node: usize,
        primitive: usize,
        attribute: &'static str,
    },

    #[error("node {node} primitive {primitive}: {attribute} accessor is not {expected}")]
    AttributeFormat {
        node: usize,
        primitive: usize,
        attribute: &'static str,
        expected: &'static str,
    },

    #[error(
        "node {node} primitive {primitive}: {attribute} accessor data is unreadable ({detail})"
    )]
    AccessorData {
        node: usize,
        primitive: usize,
        attribute: &'static str,
        detail: &'static str,
    },

    #[error(
        "node {node} primitive {primitive}: {attribute} has {actual} elements, expected {expected}"
    )]
    AttributeCount {
        node: usize,
        primitive: usize,
        attribute: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("node {node} primitive {primitive}: has no indices")]
    MissingIndices { node: usize, primitive: usize },

    #[error("node {node} primitive {primitive}: index type {data_type:?} is not u16 or u32")]
    IndexType {
        node: usize,
        primitive: usize,
        data_type: gltf::accessor::DataType,
    },

    #[error(
        "node {node} primitive {primitive}: index {index} out of range ({vertex_count} vertices)"
    )]
    IndexOutOfRange {
        node: usize,
        primitive: usize,
        index: u32,
        vertex_count: u32,
    },

    #[error("node {node}: no base color texture declared or inherited")]
    MissingBaseColor { node: usize },

    #[error("node {node}: material has no normal map")]
    MissingNormalMap { node: usize },

    #[error("image {image}: format {format:?} is not 4-channel RGBA")]
    ImageFormat {
        image: usize,
        format: gltf::image::Format,
    },
}
