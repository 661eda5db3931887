//! Scene flattening.
//!
//! Walks a glTF node graph depth first, accumulating each node's world
//! transform, and bakes every visited mesh primitive into one shared vertex
//! buffer and one shared index buffer. Indices are rebased as they are
//! appended, so the output draws directly with per-primitive offsets and no
//! per-node state.
//!
//! Base-color textures inherit down the graph: a primitive without its own
//! uses the nearest ancestor's. Normal maps never inherit; every rendered
//! primitive's material must declare one.
//!
//! Malformed input (sparse or interleaved accessors, non-float attributes,
//! bad indices, non-RGBA images, repeated nodes) fails the whole flatten
//! with a [`SceneError`] naming the offending node.

use cgmath::{Matrix4, Quaternion, SquareMatrix, Vector3, Vector4};
use gltf::accessor::{DataType, Dimensions};

use super::error::SceneError;
use super::import::Model;
use super::vertex::Vertex;

/// A node graph baked down to GPU-ready buffers.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatScene {
    /// All vertices of all visited primitives, world-space positions baked in.
    pub vertices: Vec<Vertex>,
    /// Rebased indices into `vertices`, one contiguous run per draw.
    pub indices: Vec<u32>,
    /// One entry per flattened primitive, in traversal order.
    pub draws: Vec<DrawDescriptor>,
}

impl FlatScene {
    /// True when the scene contained no mesh-bearing nodes.
    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }
}

/// One draw call against the shared buffers, plus the images it samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawDescriptor {
    /// First element of this draw in the shared index buffer.
    pub index_offset: u32,
    /// Number of index elements.
    pub index_count: u32,
    /// Resolved base-color image, an index into the model's image table.
    pub base_color_image: usize,
    /// Normal-map image, an index into the model's image table.
    pub normal_image: usize,
}

impl DrawDescriptor {
    /// The half-open element range this draw covers.
    pub fn index_range(&self) -> std::ops::Range<u32> {
        self.index_offset..self.index_offset + self.index_count
    }
}

/// State handed down one level of the graph. Built fresh for each node's
/// children, never mutated in place.
struct TraversalContext<'a> {
    /// World transform accumulated over the ancestor chain.
    transform: Matrix4<f32>,
    /// Base-color texture of the nearest ancestor that resolved one.
    base_color: Option<gltf::texture::Texture<'a>>,
}

/// Flattens the model's default scene (or its first scene when none is
/// marked) into shared buffers and draw descriptors.
pub fn flatten(model: &Model) -> Result<FlatScene, SceneError> {
    let scene = model
        .document
        .default_scene()
        .or_else(|| model.document.scenes().next())
        .ok_or(SceneError::NoScene)?;

    let mut flattener = Flattener {
        buffers: &model.buffers,
        images: &model.images,
        vertices: Vec::new(),
        indices: Vec::new(),
        draws: Vec::new(),
        visited: vec![false; model.document.nodes().len()],
    };

    let root = TraversalContext {
        transform: Matrix4::identity(),
        base_color: None,
    };
    for node in scene.nodes() {
        flattener.visit_node(node, &root)?;
    }

    log::info!(
        "flattened scene {}: {} vertices, {} indices, {} draws",
        scene.index(),
        flattener.vertices.len(),
        flattener.indices.len(),
        flattener.draws.len()
    );
    Ok(FlatScene {
        vertices: flattener.vertices,
        indices: flattener.indices,
        draws: flattener.draws,
    })
}

struct Flattener<'a> {
    buffers: &'a [gltf::buffer::Data],
    images: &'a [gltf::image::Data],
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    draws: Vec<DrawDescriptor>,
    visited: Vec<bool>,
}

impl<'a> Flattener<'a> {
    fn visit_node(
        &mut self,
        node: gltf::Node<'a>,
        parent: &TraversalContext<'a>,
    ) -> Result<(), SceneError> {
        if std::mem::replace(&mut self.visited[node.index()], true) {
            return Err(SceneError::NodeCycle { node: node.index() });
        }

        let world = parent.transform * local_transform(node.transform());
        let mut base_color = parent.base_color.clone();

        if let Some(mesh) = node.mesh() {
            // Only the first primitive is flattened; meshes here are
            // single-primitive by convention and extras are ignored.
            let primitive = mesh.primitives().next().ok_or(SceneError::NoPrimitives {
                node: node.index(),
                mesh: mesh.index(),
            })?;
            log::debug!(
                "node {} ({}): mesh {} primitive 0",
                node.index(),
                node.name().unwrap_or("unnamed"),
                mesh.index()
            );
            base_color = Some(self.flatten_primitive(&node, &primitive, world, base_color)?);
        }

        let context = TraversalContext {
            transform: world,
            base_color,
        };
        for child in node.children() {
            self.visit_node(child, &context)?;
        }
        Ok(())
    }

    /// Appends one primitive's geometry and draw descriptor. Returns the
    /// resolved base-color texture so children can inherit it.
    fn flatten_primitive(
        &mut self,
        node: &gltf::Node<'a>,
        primitive: &gltf::Primitive<'a>,
        world: Matrix4<f32>,
        inherited: Option<gltf::texture::Texture<'a>>,
    ) -> Result<gltf::texture::Texture<'a>, SceneError> {
        if primitive.mode() != gltf::mesh::Mode::Triangles {
            return Err(SceneError::Topology {
                node: node.index(),
                primitive: primitive.index(),
                mode: primitive.mode(),
            });
        }

        let base_vertex = self.vertices.len() as u32;
        let index_offset = self.indices.len() as u32;
        let vertex_count = self.append_vertices(node, primitive, world)?;
        let index_count = self.append_indices(node, primitive, base_vertex, vertex_count)?;

        let material = primitive.material();
        let own = material
            .pbr_metallic_roughness()
            .base_color_texture()
            .map(|info| info.texture());
        let base_color = own
            .or(inherited)
            .ok_or(SceneError::MissingBaseColor { node: node.index() })?;
        let normal = material
            .normal_texture()
            .ok_or(SceneError::MissingNormalMap { node: node.index() })?
            .texture();

        let base_color_image = self.rgba_image(&base_color)?;
        let normal_image = self.rgba_image(&normal)?;

        self.draws.push(DrawDescriptor {
            index_offset,
            index_count,
            base_color_image,
            normal_image,
        });
        Ok(base_color)
    }

    /// Validates and appends the primitive's vertices, transformed into
    /// world space. Normals stay in object space; the bitangent is
    /// cross(normal, tangent) scaled by the tangent's w component.
    fn append_vertices(
        &mut self,
        node: &gltf::Node,
        primitive: &gltf::Primitive<'a>,
        world: Matrix4<f32>,
    ) -> Result<u32, SceneError> {
        let positions = self.attribute(node, primitive, AttributeKind::Position)?;
        let normals = self.attribute(node, primitive, AttributeKind::Normal)?;
        let tex_coords = self.attribute(node, primitive, AttributeKind::TexCoord)?;
        let tangents = self.attribute(node, primitive, AttributeKind::Tangent)?;

        let count = positions.count;
        for view in [&normals, &tex_coords, &tangents] {
            if view.count != count {
                return Err(SceneError::AttributeCount {
                    node: node.index(),
                    primitive: primitive.index(),
                    attribute: view.name,
                    expected: count,
                    actual: view.count,
                });
            }
        }

        self.vertices.reserve(count);
        for i in 0..count {
            let [px, py, pz] = positions.vec3(i);
            let position = world * Vector4::new(px, py, pz, 1.0);
            let normal = Vector3::from(normals.vec3(i));
            let [tx, ty, tz, tw] = tangents.vec4(i);
            let tangent = Vector3::new(tx, ty, tz);
            let bitangent = normal.cross(tangent) * tw;
            self.vertices.push(Vertex {
                position: position.truncate().into(),
                normal: normal.into(),
                tex_coord: tex_coords.vec2(i),
                tangent: tangent.into(),
                bitangent: bitangent.into(),
            });
        }
        Ok(count as u32)
    }

    /// Validates the primitive's index accessor, widens every index to u32,
    /// rebases it by `base_vertex` and appends it to the shared buffer.
    fn append_indices(
        &mut self,
        node: &gltf::Node,
        primitive: &gltf::Primitive<'a>,
        base_vertex: u32,
        vertex_count: u32,
    ) -> Result<u32, SceneError> {
        let accessor = primitive.indices().ok_or(SceneError::MissingIndices {
            node: node.index(),
            primitive: primitive.index(),
        })?;
        if accessor.dimensions() != Dimensions::Scalar {
            return Err(SceneError::AttributeFormat {
                node: node.index(),
                primitive: primitive.index(),
                attribute: "index",
                expected: "SCALAR",
            });
        }
        let element_size = match accessor.data_type() {
            DataType::U16 => 2,
            DataType::U32 => 4,
            data_type => {
                return Err(SceneError::IndexType {
                    node: node.index(),
                    primitive: primitive.index(),
                    data_type,
                })
            }
        };
        let data = self
            .accessor_bytes(&accessor, element_size)
            .map_err(|detail| SceneError::AccessorData {
                node: node.index(),
                primitive: primitive.index(),
                attribute: "index",
                detail,
            })?;

        let count = accessor.count();
        self.indices.reserve(count);
        for element in 0..count {
            let at = element * element_size;
            let raw = match element_size {
                2 => u16::from_le_bytes([data[at], data[at + 1]]) as u32,
                _ => u32::from_le_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]]),
            };
            if raw >= vertex_count {
                return Err(SceneError::IndexOutOfRange {
                    node: node.index(),
                    primitive: primitive.index(),
                    index: raw,
                    vertex_count,
                });
            }
            self.indices.push(base_vertex + raw);
        }
        Ok(count as u32)
    }

    /// Resolves one named attribute to a validated byte view.
    fn attribute(
        &self,
        node: &gltf::Node,
        primitive: &gltf::Primitive<'a>,
        kind: AttributeKind,
    ) -> Result<AttrView<'a>, SceneError> {
        let accessor =
            primitive
                .get(&kind.semantic())
                .ok_or(SceneError::MissingAttribute {
                    node: node.index(),
                    primitive: primitive.index(),
                    attribute: kind.name(),
                })?;
        if accessor.sparse().is_some() {
            return Err(SceneError::SparseAccessor {
                node: node.index(),
                primitive: primitive.index(),
                attribute: kind.name(),
            });
        }
        if accessor.data_type() != DataType::F32 || accessor.dimensions() != kind.dimensions() {
            return Err(SceneError::AttributeFormat {
                node: node.index(),
                primitive: primitive.index(),
                attribute: kind.name(),
                expected: kind.expected(),
            });
        }
        let data = self
            .accessor_bytes(&accessor, kind.width() * 4)
            .map_err(|detail| SceneError::AccessorData {
                node: node.index(),
                primitive: primitive.index(),
                attribute: kind.name(),
                detail,
            })?;
        Ok(AttrView {
            data,
            count: accessor.count(),
            width: kind.width(),
            name: kind.name(),
        })
    }

    /// The accessor's backing bytes: `count * element_size` bytes starting
    /// at the buffer view's offset plus the accessor's own. Interleaved
    /// views and ranges past the end of the buffer are rejected.
    fn accessor_bytes(
        &self,
        accessor: &gltf::Accessor<'a>,
        element_size: usize,
    ) -> Result<&'a [u8], &'static str> {
        let view = accessor.view().ok_or("no buffer view")?;
        if view.stride().is_some_and(|stride| stride != element_size) {
            return Err("interleaved buffer view");
        }
        let buffer = self
            .buffers
            .get(view.buffer().index())
            .ok_or("buffer data missing")?;
        let start = view.offset() + accessor.offset();
        let length = accessor
            .count()
            .checked_mul(element_size)
            .ok_or("length overflow")?;
        let end = start.checked_add(length).ok_or("length overflow")?;
        buffer.get(start..end).ok_or("range exceeds buffer")
    }

    /// The texture's source image index, after checking the decoded image
    /// really has four channels.
    fn rgba_image(&self, texture: &gltf::texture::Texture) -> Result<usize, SceneError> {
        let image = texture.source().index();
        let format = self.images[image].format;
        if format != gltf::image::Format::R8G8B8A8 {
            return Err(SceneError::ImageFormat { image, format });
        }
        Ok(image)
    }
}

/// A node's local transform as a matrix. Decomposed nodes compose as
/// translation * rotation * scale; glTF quaternions arrive as [x, y, z, w]
/// and are used as-is, without renormalization.
fn local_transform(transform: gltf::scene::Transform) -> Matrix4<f32> {
    match transform {
        gltf::scene::Transform::Matrix { matrix } => Matrix4::from(matrix),
        gltf::scene::Transform::Decomposed {
            translation,
            rotation,
            scale,
        } => {
            let [x, y, z, w] = rotation;
            Matrix4::from_translation(translation.into())
                * Matrix4::from(Quaternion::new(w, x, y, z))
                * Matrix4::from_nonuniform_scale(scale[0], scale[1], scale[2])
        }
    }
}

/// Borrowed, validated attribute data: `count` tightly packed elements of
/// `width` little-endian f32s.
struct AttrView<'a> {
    data: &'a [u8],
    count: usize,
    width: usize,
    name: &'static str,
}

impl AttrView<'_> {
    fn get(&self, element: usize, component: usize) -> f32 {
        let at = (element * self.width + component) * 4;
        f32::from_le_bytes([
            self.data[at],
            self.data[at + 1],
            self.data[at + 2],
            self.data[at + 3],
        ])
    }

    fn vec2(&self, element: usize) -> [f32; 2] {
        [self.get(element, 0), self.get(element, 1)]
    }

    fn vec3(&self, element: usize) -> [f32; 3] {
        [
            self.get(element, 0),
            self.get(element, 1),
            self.get(element, 2),
        ]
    }

    fn vec4(&self, element: usize) -> [f32; 4] {
        [
            self.get(element, 0),
            self.get(element, 1),
            self.get(element, 2),
            self.get(element, 3),
        ]
    }
}

#[derive(Clone, Copy)]
enum AttributeKind {
    Position,
    Normal,
    TexCoord,
    Tangent,
}

impl AttributeKind {
    fn name(self) -> &'static str {
        match self {
            AttributeKind::Position => "POSITION",
            AttributeKind::Normal => "NORMAL",
            AttributeKind::TexCoord => "TEXCOORD_0",
            AttributeKind::Tangent => "TANGENT",
        }
    }

    fn semantic(self) -> gltf::Semantic {
        match self {
            AttributeKind::Position => gltf::Semantic::Positions,
            AttributeKind::Normal => gltf::Semantic::Normals,
            AttributeKind::TexCoord => gltf::Semantic::TexCoords(0),
            AttributeKind::Tangent => gltf::Semantic::Tangents,
        }
    }

    fn dimensions(self) -> Dimensions {
        match self {
            AttributeKind::TexCoord => Dimensions::Vec2,
            AttributeKind::Tangent => Dimensions::Vec4,
            _ => Dimensions::Vec3,
        }
    }

    fn width(self) -> usize {
        match self {
            AttributeKind::TexCoord => 2,
            AttributeKind::Tangent => 4,
            _ => 3,
        }
    }

    fn expected(self) -> &'static str {
        match self {
            AttributeKind::TexCoord => "VEC2 of f32",
            AttributeKind::Tangent => "VEC4 of f32",
            _ => "VEC3 of f32",
        }
    }
}
