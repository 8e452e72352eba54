//! glTF 2.0 / GLB writer for a decoded Unity [`SemanticScene`].
//!
//! Walks the Transform hierarchy reconstructed by `unity-asset-binary`,
//! emits one glTF node per Transform (translation/rotation/scale only when
//! they differ from identity), attaches a mesh to any node whose
//! GameObject is referenced by a resolvable `MeshFilter`, and packs every
//! mesh's flat attribute arrays into a single 4-byte-aligned binary chunk.
//!
//! Kept deliberately separate from a read/write glTF crate (see
//! `DESIGN.md`): this exporter only ever produces a document, never parses
//! one, so the small `types` module plus `serde_json` is the whole surface
//! it needs.

pub mod error;
pub mod types;

use std::collections::BTreeMap;

use indexmap::IndexMap;
use tracing::{debug, warn};

use unity_asset_binary::semantic::{MeshFilterRecord, SemanticScene};
use unity_asset_binary::unity_objects::{GameObject, ObjectRef, Transform};

pub use error::{GltfError, Result};
use types::*;

/// Options controlling GLB export. Distinct from `DecodeOptions` (§6):
/// those govern the binary decode, these govern only the glTF rendering
/// step, per the façade's two-stage `decode` / `to_glb` split.
#[derive(Debug, Clone)]
pub struct GlbOptions {
    /// `asset.generator` string written into the JSON chunk.
    pub generator: Option<String>,
}

impl Default for GlbOptions {
    fn default() -> Self {
        Self {
            generator: Some("unity-asset".to_string()),
        }
    }
}

const GLB_MAGIC: u32 = 0x4654_6C67; // "glTF"
const GLB_VERSION: u32 = 2;
const CHUNK_TYPE_JSON: u32 = 0x4E4F_534A; // "JSON"
const CHUNK_TYPE_BIN: u32 = 0x004E_4942; // "BIN\0"

/// Growing binary buffer for the GLB's single BIN chunk. Every `push_*`
/// call returns the `BufferView` it wrote, already positioned at a
/// 4-byte-aligned offset (every pushed slice is itself a multiple of 4
/// bytes wide, so no interior padding is ever needed — only the padding
/// applied once at the very end to round the whole chunk up to 4 bytes).
#[derive(Default)]
struct BinBuilder {
    data: Vec<u8>,
}

impl BinBuilder {
    fn push_f32(&mut self, values: &[f32], target: Option<u32>) -> BufferView {
        let byte_offset = self.data.len() as u32;
        for v in values {
            self.data.extend_from_slice(&v.to_le_bytes());
        }
        BufferView {
            buffer: 0,
            byte_offset,
            byte_length: (values.len() * 4) as u32,
            target,
        }
    }

    fn push_u32(&mut self, values: &[u32], target: Option<u32>) -> BufferView {
        let byte_offset = self.data.len() as u32;
        for v in values {
            self.data.extend_from_slice(&v.to_le_bytes());
        }
        BufferView {
            buffer: 0,
            byte_offset,
            byte_length: (values.len() * 4) as u32,
            target,
        }
    }
}

fn identity_translation(t: &Transform) -> bool {
    t.position.x == 0.0 && t.position.y == 0.0 && t.position.z == 0.0
}

fn identity_rotation(t: &Transform) -> bool {
    t.rotation.x == 0.0 && t.rotation.y == 0.0 && t.rotation.z == 0.0 && t.rotation.w == 1.0
}

fn identity_scale(t: &Transform) -> bool {
    t.scale.x == 1.0 && t.scale.y == 1.0 && t.scale.z == 1.0
}

/// Builds the reverse index GameObject path_id → Mesh path_id from every
/// `MeshFilter` whose own Mesh reference resolved to a decoded mesh. A
/// GameObject with more than one MeshFilter (malformed, but not our place
/// to reject) keeps the first one encountered.
fn game_object_meshes(scene: &SemanticScene) -> IndexMap<i64, i64> {
    let mut map = IndexMap::new();
    for filter in scene.mesh_filters.values() {
        let MeshFilterRecord { game_object, mesh } = filter;
        if scene.meshes.contains_key(&mesh.path_id) {
            map.entry(game_object.path_id).or_insert(mesh.path_id);
        }
    }
    map
}

fn resolved(scene: &SemanticScene, r: &ObjectRef) -> bool {
    r.file_id == 0 && scene.game_objects.contains_key(&r.path_id)
}

/// Renders a decoded Unity scene into a complete GLB byte buffer.
///
/// Returns `Err` only when the JSON document itself fails to serialize;
/// per-mesh and per-node problems are recorded as warnings and otherwise
/// skipped (the export as a whole fails only when it produced zero
/// meshes *and* the caller required at least one — this function itself
/// never enforces that, callers check `warnings`/mesh count if they
/// care).
pub fn export_glb(scene: &SemanticScene, options: &GlbOptions) -> Result<Vec<u8>> {
    let mut warnings: Vec<String> = Vec::new();
    let mut bin = BinBuilder::default();
    let mut accessors: Vec<Accessor> = Vec::new();
    let mut buffer_views: Vec<BufferView> = Vec::new();
    let mut gltf_meshes: Vec<Mesh> = Vec::new();
    let mut materials: Vec<Material> = Vec::new();
    let mut default_material_index: Option<u32> = None;

    let mut built_meshes: IndexMap<i64, u32> = IndexMap::new();

    for (path_id, decoded) in &scene.meshes {
        if decoded.positions.is_empty() || decoded.vertex_count == 0 {
            warnings.push(format!(
                "mesh {path_id} ('{}') has no positions, omitting from GLB",
                decoded.name
            ));
            continue;
        }

        let n = decoded.vertex_count as usize;
        if decoded.positions.len() != n * 3 {
            warnings.push(format!(
                "mesh {path_id} ('{}') position count mismatch, omitting from GLB",
                decoded.name
            ));
            continue;
        }

        let pos_view = bin.push_f32(&decoded.positions, Some(TARGET_ARRAY_BUFFER));
        let pos_view_idx = buffer_views.len() as u32;
        buffer_views.push(pos_view);
        let (min, max) = position_bounds(&decoded.positions);
        let pos_accessor_idx = accessors.len() as u32;
        accessors.push(Accessor {
            buffer_view: Some(pos_view_idx),
            byte_offset: 0,
            component_type: COMPONENT_TYPE_FLOAT,
            count: n as u32,
            type_: "VEC3".to_string(),
            min: Some(min.to_vec()),
            max: Some(max.to_vec()),
        });

        let mut attributes = BTreeMap::new();
        attributes.insert("POSITION".to_string(), pos_accessor_idx);

        if let Some(normals) = &decoded.normals {
            if normals.len() == n * 3 {
                let view = bin.push_f32(normals, Some(TARGET_ARRAY_BUFFER));
                let view_idx = buffer_views.len() as u32;
                buffer_views.push(view);
                let acc_idx = accessors.len() as u32;
                accessors.push(Accessor {
                    buffer_view: Some(view_idx),
                    byte_offset: 0,
                    component_type: COMPONENT_TYPE_FLOAT,
                    count: n as u32,
                    type_: "VEC3".to_string(),
                    min: None,
                    max: None,
                });
                attributes.insert("NORMAL".to_string(), acc_idx);
            } else {
                warnings.push(format!(
                    "mesh {path_id} ('{}') normal count mismatch, dropping NORMAL attribute",
                    decoded.name
                ));
            }
        }

        if let Some(uvs) = &decoded.uvs {
            if uvs.len() == n * 2 {
                let view = bin.push_f32(uvs, Some(TARGET_ARRAY_BUFFER));
                let view_idx = buffer_views.len() as u32;
                buffer_views.push(view);
                let acc_idx = accessors.len() as u32;
                accessors.push(Accessor {
                    buffer_view: Some(view_idx),
                    byte_offset: 0,
                    component_type: COMPONENT_TYPE_FLOAT,
                    count: n as u32,
                    type_: "VEC2".to_string(),
                    min: None,
                    max: None,
                });
                attributes.insert("TEXCOORD_0".to_string(), acc_idx);
            } else {
                warnings.push(format!(
                    "mesh {path_id} ('{}') UV count mismatch, dropping TEXCOORD_0 attribute",
                    decoded.name
                ));
            }
        }

        let mut primitives = Vec::new();
        for sm in &decoded.submeshes {
            if sm.triangles.is_empty() {
                continue;
            }
            let max_index = sm.triangles.iter().flatten().copied().max().unwrap_or(0);
            if max_index >= decoded.vertex_count {
                warnings.push(format!(
                    "mesh {path_id} ('{}') submesh index {max_index} exceeds vertex_count {}, skipping submesh",
                    decoded.name, decoded.vertex_count
                ));
                continue;
            }

            let flat: Vec<u32> = sm.triangles.iter().flatten().copied().collect();
            let idx_view = bin.push_u32(&flat, Some(TARGET_ELEMENT_ARRAY_BUFFER));
            let idx_view_idx = buffer_views.len() as u32;
            buffer_views.push(idx_view);
            let idx_accessor_idx = accessors.len() as u32;
            accessors.push(Accessor {
                buffer_view: Some(idx_view_idx),
                byte_offset: 0,
                component_type: COMPONENT_TYPE_UNSIGNED_INT,
                count: flat.len() as u32,
                type_: "SCALAR".to_string(),
                min: None,
                max: None,
            });

            let material_idx = *default_material_index.get_or_insert_with(|| {
                let idx = materials.len() as u32;
                materials.push(Material {
                    name: "DefaultMaterial".to_string(),
                    pbr_metallic_roughness: PbrMetallicRoughness {
                        base_color_factor: [1.0, 1.0, 1.0, 1.0],
                        metallic_factor: 0.0,
                        roughness_factor: 1.0,
                    },
                    double_sided: true,
                });
                idx
            });

            primitives.push(Primitive {
                attributes: attributes.clone(),
                indices: Some(idx_accessor_idx),
                material: Some(material_idx),
                mode: PRIMITIVE_MODE_TRIANGLES,
            });
        }

        if primitives.is_empty() {
            warnings.push(format!(
                "mesh {path_id} ('{}') has no renderable (triangle-topology) submeshes, omitting from GLB",
                decoded.name
            ));
            continue;
        }

        let mesh_name = if decoded.name.is_empty() {
            None
        } else {
            Some(decoded.name.clone())
        };
        let gltf_index = gltf_meshes.len() as u32;
        gltf_meshes.push(Mesh {
            name: mesh_name,
            primitives,
        });
        built_meshes.insert(*path_id, gltf_index);
    }

    let go_meshes = game_object_meshes(scene);

    // Stable node index assignment, in Transform table order (§5: "GLB node
    // emission follows the Transform list order").
    let mut node_index: IndexMap<i64, u32> = IndexMap::new();
    for (i, path_id) in scene.transforms.keys().enumerate() {
        node_index.insert(*path_id, i as u32);
    }

    let mut nodes: Vec<Node> = Vec::with_capacity(scene.transforms.len());
    for path_id in scene.transforms.keys() {
        let transform = &scene.transforms[path_id];
        let owner = scene.transform_owners.get(path_id);

        let name = owner
            .filter(|o| resolved(scene, o))
            .and_then(|o| scene.game_objects.get(&o.path_id))
            .map(|go: &GameObject| go.name.clone());

        let mesh = owner
            .filter(|o| resolved(scene, o))
            .and_then(|o| go_meshes.get(&o.path_id))
            .and_then(|mesh_path_id| built_meshes.get(mesh_path_id))
            .copied();

        let children: Vec<u32> = transform
            .children
            .iter()
            .filter(|c| c.file_id == 0 && node_index.contains_key(&c.path_id))
            .map(|c| node_index[&c.path_id])
            .collect();

        nodes.push(Node {
            name,
            children: if children.is_empty() { None } else { Some(children) },
            translation: (!identity_translation(transform))
                .then(|| [transform.position.x, transform.position.y, transform.position.z]),
            rotation: (!identity_rotation(transform)).then(|| {
                [
                    transform.rotation.x,
                    transform.rotation.y,
                    transform.rotation.z,
                    transform.rotation.w,
                ]
            }),
            scale: (!identity_scale(transform)).then(|| [transform.scale.x, transform.scale.y, transform.scale.z]),
            mesh,
        });
    }

    // Roots: every transform whose parent is absent or not in this file's
    // transform set (§4.7).
    let roots: Vec<u32> = scene
        .transforms
        .iter()
        .filter(|(_, t)| match &t.parent {
            None => true,
            Some(p) => p.file_id != 0 || !scene.transforms.contains_key(&p.path_id),
        })
        .map(|(path_id, _)| node_index[path_id])
        .collect();

    for w in &warnings {
        warn!("{w}");
    }
    debug!(
        "exporting GLB: {} nodes, {} meshes, {} warnings",
        nodes.len(),
        gltf_meshes.len(),
        warnings.len()
    );

    let has_buffers = !bin.data.is_empty();
    // Pad the binary chunk up to a 4-byte boundary (every push above is
    // already a multiple of 4 bytes, so this only ever adds 0 bytes — kept
    // for robustness against a future attribute width that isn't).
    while bin.data.len() % 4 != 0 {
        bin.data.push(0);
    }

    let root = Root {
        asset: Asset {
            version: "2.0".to_string(),
            generator: options.generator.clone(),
        },
        scene: if roots.is_empty() && nodes.is_empty() { None } else { Some(0) },
        scenes: vec![Scene { nodes: roots }],
        nodes,
        meshes: gltf_meshes,
        materials,
        accessors,
        buffer_views,
        buffers: if has_buffers {
            vec![Buffer {
                byte_length: bin.data.len() as u32,
            }]
        } else {
            Vec::new()
        },
        extras: if warnings.is_empty() {
            None
        } else {
            Some(Extras {
                conversion_warnings: warnings,
            })
        },
    };

    let mut json = serde_json::to_vec(&root)?;
    while json.len() % 4 != 0 {
        json.push(b' ');
    }

    let bin_chunk_len = if has_buffers { bin.data.len() as u32 } else { 0 };
    let total_len = 12
        + 8
        + json.len() as u32
        + if has_buffers { 8 + bin_chunk_len } else { 0 };

    let mut out = Vec::with_capacity(total_len as usize);
    out.extend_from_slice(&GLB_MAGIC.to_le_bytes());
    out.extend_from_slice(&GLB_VERSION.to_le_bytes());
    out.extend_from_slice(&total_len.to_le_bytes());

    out.extend_from_slice(&(json.len() as u32).to_le_bytes());
    out.extend_from_slice(&CHUNK_TYPE_JSON.to_le_bytes());
    out.extend_from_slice(&json);

    if has_buffers {
        out.extend_from_slice(&bin_chunk_len.to_le_bytes());
        out.extend_from_slice(&CHUNK_TYPE_BIN.to_le_bytes());
        out.extend_from_slice(&bin.data);
    }

    Ok(out)
}

fn position_bounds(positions: &[f32]) -> ([f32; 3], [f32; 3]) {
    let mut min = [f32::INFINITY; 3];
    let mut max = [f32::NEG_INFINITY; 3];
    for chunk in positions.chunks_exact(3) {
        for i in 0..3 {
            if chunk[i] < min[i] {
                min[i] = chunk[i];
            }
            if chunk[i] > max[i] {
                max[i] = chunk[i];
            }
        }
    }
    (min, max)
}
