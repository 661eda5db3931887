//! In-memory GLB assets for importer and flattener tests.
//!
//! Every asset shares one binary payload (see [`bin`]) and one set of
//! buffer-view / accessor / image / texture tables (see [`TABLES`]). Tests
//! compose the variable parts (scenes, nodes, meshes, materials) as JSON
//! fragments around them, so a malformed case is usually a one-line change
//! of which accessor a primitive points at. Cases the validating importer
//! would refuse outright go through [`model_without_validation`] instead.

use super::import::Model;

/// 1x1 RGBA PNG, pixel (128, 128, 255, 255).
pub const PNG_RGBA_1X1: &[u8] = &[
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1f,
    0x15, 0xc4, 0x89, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x44, 0x41, 0x54, 0x78, 0xda, 0x63, 0x68,
    0x68, 0xf8, 0xff, 0x1f, 0x00, 0x06, 0x82, 0x02, 0xff, 0x6c, 0xe0, 0x43, 0x23, 0x00, 0x00,
    0x00, 0x00, 0x49, 0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
];

/// 1x1 RGB (three channel) PNG, pixel (200, 50, 50).
pub const PNG_RGB_1X1: &[u8] = &[
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x02, 0x00, 0x00, 0x00, 0x90,
    0x77, 0x53, 0xde, 0x00, 0x00, 0x00, 0x0c, 0x49, 0x44, 0x41, 0x54, 0x78, 0xda, 0x63, 0x38,
    0x61, 0x64, 0x04, 0x00, 0x02, 0xf2, 0x01, 0x2d, 0x92, 0x97, 0xf4, 0x47, 0x00, 0x00, 0x00,
    0x00, 0x49, 0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
];

/// The shared tables, matching [`bin`] byte for byte.
///
/// Views:               Accessors:
///  0 positions          0 POSITION        f32 VEC3 x3
///  1 normals            1 NORMAL          f32 VEC3 x3
///  2 texcoords          2 TEXCOORD_0      f32 VEC2 x3
///  3 tangents (w=+1)    3 TANGENT         f32 VEC4 x3
///  4 indices u16        4 indices         u16 x3 [0,1,2]
///  5 RGBA png           5 indices         u32 x3 [0,1,2]
///  6 RGBA png           6 indices         u16 x3 [0,1,7] (out of range)
///  7 RGB png            7 indices         u8  x3 (unsupported type)
///  8 indices u32        8 short texcoords f32 VEC2 x2 (count mismatch)
///  9 indices u16 bad    9 u16 VEC3        (non-float attribute)
/// 10 indices u8        10 overrunning VEC3 (starts at byte 420 of 440)
/// 11 strided positions 11 strided VEC3
/// 12 tangents (w=-1)   12 sparse VEC3
///                      13 TANGENT w=-1   f32 VEC4 x3
///
/// Every accessor a test points POSITION at carries min/max; the importer
/// refuses a primitive whose POSITION accessor lacks them.
///
/// Images 0 and 1 decode as RGBA, image 2 as RGB; texture N sources image N.
pub const TABLES: &str = r#""buffers":[{"byteLength":440}],"bufferViews":[{"buffer":0,"byteOffset":0,"byteLength":36},{"buffer":0,"byteOffset":36,"byteLength":36},{"buffer":0,"byteOffset":72,"byteLength":24},{"buffer":0,"byteOffset":96,"byteLength":48},{"buffer":0,"byteOffset":144,"byteLength":6},{"buffer":0,"byteOffset":152,"byteLength":70},{"buffer":0,"byteOffset":224,"byteLength":70},{"buffer":0,"byteOffset":296,"byteLength":69},{"buffer":0,"byteOffset":368,"byteLength":12},{"buffer":0,"byteOffset":380,"byteLength":6},{"buffer":0,"byteOffset":388,"byteLength":3},{"buffer":0,"byteOffset":0,"byteLength":36,"byteStride":24},{"buffer":0,"byteOffset":392,"byteLength":48}],"accessors":[{"bufferView":0,"componentType":5126,"count":3,"type":"VEC3","min":[0,0,0],"max":[1,1,0]},{"bufferView":1,"componentType":5126,"count":3,"type":"VEC3"},{"bufferView":2,"componentType":5126,"count":3,"type":"VEC2"},{"bufferView":3,"componentType":5126,"count":3,"type":"VEC4"},{"bufferView":4,"componentType":5123,"count":3,"type":"SCALAR"},{"bufferView":8,"componentType":5125,"count":3,"type":"SCALAR"},{"bufferView":9,"componentType":5123,"count":3,"type":"SCALAR"},{"bufferView":10,"componentType":5121,"count":3,"type":"SCALAR"},{"bufferView":2,"componentType":5126,"count":2,"type":"VEC2"},{"bufferView":4,"componentType":5123,"count":1,"type":"VEC3","min":[0,1,2],"max":[0,1,2]},{"bufferView":0,"byteOffset":420,"componentType":5126,"count":3,"type":"VEC3","min":[0,0,0],"max":[1,1,0]},{"bufferView":11,"componentType":5126,"count":2,"type":"VEC3","min":[0,0,0],"max":[0,1,0]},{"bufferView":0,"componentType":5126,"count":3,"type":"VEC3","min":[0,0,0],"max":[1,1,1],"sparse":{"count":1,"indices":{"bufferView":4,"componentType":5123},"values":{"bufferView":1}}},{"bufferView":12,"componentType":5126,"count":3,"type":"VEC4"}],"images":[{"bufferView":5,"mimeType":"image/png"},{"bufferView":6,"mimeType":"image/png"},{"bufferView":7,"mimeType":"image/png"}],"textures":[{"source":0},{"source":1},{"source":2}]"#;

/// Attribute map of the standard triangle: accessors 0-3.
pub const STD_ATTRS: &str = r#""POSITION":0,"NORMAL":1,"TEXCOORD_0":2,"TANGENT":3"#;

/// Base color texture 0 plus normal map texture 1.
pub const STD_MATERIAL: &str =
    r#"{"pbrMetallicRoughness":{"baseColorTexture":{"index":0}},"normalTexture":{"index":1}}"#;

/// The binary payload [`TABLES`] describes: a right triangle in the XY plane
/// (normals +Z, tangents +X), index variants, the three PNGs, and a w=-1
/// tangent set.
pub fn bin() -> Vec<u8> {
    let mut out = Vec::new();
    push_f32s(&mut out, &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
    push_f32s(&mut out, &[0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0]);
    push_f32s(&mut out, &[0.0, 0.0, 1.0, 0.0, 0.0, 1.0]);
    push_f32s(
        &mut out,
        &[
            1.0, 0.0, 0.0, 1.0, //
            1.0, 0.0, 0.0, 1.0, //
            1.0, 0.0, 0.0, 1.0,
        ],
    );
    for i in [0u16, 1, 2] {
        out.extend_from_slice(&i.to_le_bytes());
    }
    pad4(&mut out); // 152
    out.extend_from_slice(PNG_RGBA_1X1);
    pad4(&mut out); // 224
    out.extend_from_slice(PNG_RGBA_1X1);
    pad4(&mut out); // 296
    out.extend_from_slice(PNG_RGB_1X1);
    pad4(&mut out); // 368
    for i in [0u32, 1, 2] {
        out.extend_from_slice(&i.to_le_bytes());
    }
    for i in [0u16, 1, 7] {
        out.extend_from_slice(&i.to_le_bytes());
    }
    pad4(&mut out); // 388
    out.extend_from_slice(&[0u8, 1, 2]);
    pad4(&mut out); // 392
    push_f32s(
        &mut out,
        &[
            1.0, 0.0, 0.0, -1.0, //
            1.0, 0.0, 0.0, -1.0, //
            1.0, 0.0, 0.0, -1.0,
        ],
    );
    assert_eq!(out.len(), 440);
    out
}

/// Wraps a JSON fragment (scenes/nodes/meshes/materials, possibly empty)
/// with the standard tables and packs it into a GLB container.
pub fn scene_glb(body: &str) -> Vec<u8> {
    let json = if body.is_empty() {
        format!(r#"{{"asset":{{"version":"2.0"}},{TABLES}}}"#)
    } else {
        format!(r#"{{"asset":{{"version":"2.0"}},{body},{TABLES}}}"#)
    };
    glb(&json, &bin())
}

/// A mesh with one triangle-list primitive.
pub fn mesh(attrs: &str, indices: usize, material: usize) -> String {
    format!(
        r#"{{"primitives":[{{"attributes":{{{attrs}}},"indices":{indices},"material":{material}}}]}}"#
    )
}

/// The stock two-node asset: a root triangle whose child draws the same
/// mesh translated one unit up. Flattens to 6 vertices, 6 indices, 2 draws.
pub fn two_triangle_glb() -> Vec<u8> {
    scene_glb(&format!(
        r#""scene":0,"scenes":[{{"nodes":[0]}}],"nodes":[{{"mesh":0,"children":[1]}},{{"mesh":0,"translation":[0,1,0]}}],"meshes":[{}],"materials":[{STD_MATERIAL}]"#,
        mesh(STD_ATTRS, 4, 0)
    ))
}

/// Packs a JSON string and a binary payload into a GLB container:
/// 12 byte header, space-padded JSON chunk, zero-padded BIN chunk.
pub fn glb(json: &str, bin: &[u8]) -> Vec<u8> {
    let mut json_chunk = json.as_bytes().to_vec();
    while json_chunk.len() % 4 != 0 {
        json_chunk.push(b' ');
    }
    let mut bin_chunk = bin.to_vec();
    pad4(&mut bin_chunk);

    let total = 12 + 8 + json_chunk.len() + 8 + bin_chunk.len();
    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(&0x4654_6c67u32.to_le_bytes()); // "glTF"
    out.extend_from_slice(&2u32.to_le_bytes());
    out.extend_from_slice(&(total as u32).to_le_bytes());
    out.extend_from_slice(&(json_chunk.len() as u32).to_le_bytes());
    out.extend_from_slice(&0x4e4f_534au32.to_le_bytes()); // "JSON"
    out.extend_from_slice(&json_chunk);
    out.extend_from_slice(&(bin_chunk.len() as u32).to_le_bytes());
    out.extend_from_slice(&0x004e_4942u32.to_le_bytes()); // "BIN\0"
    out.extend_from_slice(&bin_chunk);
    out
}

/// Parses a GLB without the validation [`Model::from_bytes`] applies, for
/// exercising flatten checks on documents the importer would refuse.
pub fn model_without_validation(glb: &[u8]) -> Model {
    let parsed = gltf::Gltf::from_slice_without_validation(glb).unwrap();
    let buffers = gltf::import_buffers(&parsed.document, None, parsed.blob).unwrap();
    let images = gltf::import_images(&parsed.document, None, &buffers).unwrap();
    Model {
        document: parsed.document,
        buffers,
        images,
    }
}

fn push_f32s(out: &mut Vec<u8>, values: &[f32]) {
    for v in values {
        out.extend_from_slice(&v.to_le_bytes());
    }
}

fn pad4(out: &mut Vec<u8>) {
    while out.len() % 4 != 0 {
        out.push(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Import validation sees the whole table, whether or not a mesh points
    // at an accessor. Each entry has to hold up on its own.
    #[test]
    fn tables_pass_import_validation() {
        Model::from_bytes(&scene_glb("")).unwrap();
    }

    #[test]
    fn unvalidated_parse_reads_the_same_payload() {
        let model = model_without_validation(&two_triangle_glb());
        assert_eq!(model.buffers.len(), 1);
        assert_eq!(model.buffers[0].len(), bin().len());
        assert_eq!(model.images.len(), 3);
    }
}
