//! Bridges the raw per-object byte ranges recorded in a `SerializedFile`
//! into semantic Unity records, resolving `PPtr` cross-references by
//! `path_id` rather than following raw offsets.
//!
//! Objects are decoded through their embedded TypeTree when one is present
//! on the owning `SerializedType`; otherwise a tolerant-probe raw-byte
//! decoder is tried for the handful of classes this crate understands
//! (GameObject, Transform, Mesh, MeshFilter, MeshRenderer, Material).
//! Anything else, or anything the probe can't make sense of, is recorded as
//! a `Warning` and skipped rather than guessed at.

use indexmap::IndexMap;

use crate::asset::types::class_ids;
use crate::asset::{ObjectInfo as FileObjectInfo, SerializedFile};
use crate::error::{BinaryError, Result};
use crate::mesh::{DecodedMesh, MeshParser, ResolveExternal, decode_mesh_with_options};
use crate::object::{ObjectInfo as BridgedObjectInfo, UnityObject};
use crate::reader::ByteOrder;
use crate::unity_objects::{GameObject, ObjectRef, Transform, read_pptr};
use crate::unity_version::UnityVersion;

/// Knobs `build_scene` honors while walking a `SerializedFile`'s object
/// table; mirrors the subset of the façade's `DecodeOptions` (§6) the
/// semantic layer itself needs. A cancellation probe is checked once per
/// object, per the §5 checkpoint list.
pub struct SceneBuildOptions<'a> {
    pub enable_skinning: bool,
    pub resolve_external: Option<&'a ResolveExternal<'a>>,
    pub cancel: Option<&'a dyn Fn() -> bool>,
    /// Cap applied to the handful of raw-byte string reads the probe
    /// decoders fall back to when no TypeTree is present (e.g. a
    /// Material's name). Defaults to the reader's own 1 MiB default.
    pub max_string_bytes: usize,
    /// When set, every reader built for a TypeTree or probe decode rejects
    /// non-zero alignment padding (§4.1) instead of silently skipping it.
    pub strict_padding: bool,
}

impl Default for SceneBuildOptions<'_> {
    fn default() -> Self {
        Self {
            enable_skinning: true,
            resolve_external: None,
            cancel: None,
            max_string_bytes: crate::reader::BinaryReader::DEFAULT_MAX_STRING_LEN,
            strict_padding: false,
        }
    }
}

/// A non-fatal problem encountered while building a `SemanticScene`: an
/// object that couldn't be classified, a cross-reference that didn't
/// resolve, or a mesh that failed to decode.
#[derive(Debug, Clone)]
pub struct Warning {
    pub path_id: i64,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct MeshFilterRecord {
    pub game_object: ObjectRef,
    pub mesh: ObjectRef,
}

#[derive(Debug, Clone, Default)]
pub struct MeshRendererRecord {
    pub game_object: ObjectRef,
    pub materials: Vec<ObjectRef>,
}

#[derive(Debug, Clone, Default)]
pub struct MaterialRecord {
    pub name: String,
    pub shader: ObjectRef,
    pub main_texture: Option<ObjectRef>,
}

#[derive(Debug, Clone, Default)]
pub struct TextureRecord {
    pub name: String,
    pub width: i32,
    pub height: i32,
}

/// The reconstructed object graph of one `SerializedFile`, keyed by
/// `path_id` throughout so callers resolve cross-references by lookup
/// rather than by walking raw byte offsets.
#[derive(Debug, Default)]
pub struct SemanticScene {
    pub game_objects: IndexMap<i64, GameObject>,
    pub transforms: IndexMap<i64, Transform>,
    pub transform_owners: IndexMap<i64, ObjectRef>,
    pub mesh_filters: IndexMap<i64, MeshFilterRecord>,
    pub mesh_renderers: IndexMap<i64, MeshRendererRecord>,
    pub materials: IndexMap<i64, MaterialRecord>,
    pub textures: IndexMap<i64, TextureRecord>,
    pub meshes: IndexMap<i64, DecodedMesh>,
    pub warnings: Vec<Warning>,
}

/// Converts a file-table `ObjectInfo` into the fully self-describing
/// `object::ObjectInfo` the higher-level decoders expect: slices out the
/// object's bytes, inherits the file's byte order, and attaches the owning
/// type's TypeTree when one was embedded.
pub fn bridge_object(file: &SerializedFile, info: &FileObjectInfo) -> Result<UnityObject> {
    bridge_object_with_options(file, info, false)
}

/// Same as [`bridge_object`] but threads `strict_padding` into the bridged
/// object's TypeTree reader.
fn bridge_object_with_options(
    file: &SerializedFile,
    info: &FileObjectInfo,
    strict_padding: bool,
) -> Result<UnityObject> {
    let start = info.byte_start as usize;
    let end = start + info.byte_size as usize;
    let data = file.data().get(start..end).ok_or_else(|| {
        BinaryError::bounds_violation(format!(
            "object path_id {} byte range {}..{} exceeds file size {}",
            info.path_id,
            start,
            end,
            file.data().len()
        ))
    })?;

    let type_tree = file
        .types
        .get(info.type_id as usize)
        .filter(|t| !t.type_tree.is_empty())
        .map(|t| t.type_tree.clone());

    let mut bridged = BridgedObjectInfo::new(info.path_id, info.byte_start, info.byte_size, info.class_id);
    bridged.type_id = info.type_id;
    bridged.byte_order = file.header.byte_order();
    bridged.data = data.to_vec();
    bridged.type_tree = type_tree;
    bridged.strict_padding = strict_padding;

    UnityObject::new(bridged)
}

/// Walks every object in `file` and reconstructs a `SemanticScene`. Objects
/// of unhandled classes (materials' shaders, textures' pixel data, scripts,
/// ...) are simply not represented; meshes are decoded into flat attribute
/// arrays eagerly since that's the expensive, crash-prone step callers most
/// want isolated with a warning rather than a hard failure.
pub fn build_scene(file: &SerializedFile, version: &UnityVersion) -> SemanticScene {
    build_scene_with_options(file, version, &SceneBuildOptions::default())
}

/// Same as [`build_scene`] but threads `DecodeOptions`-derived knobs through
/// to the mesh decoder: an external-resource resolver for streaming-info
/// meshes, whether bind-pose skinning is applied, and a cancellation probe
/// checked once per object.
pub fn build_scene_with_options(
    file: &SerializedFile,
    version: &UnityVersion,
    opts: &SceneBuildOptions,
) -> SemanticScene {
    let mut scene = SemanticScene::default();
    let big_ids = file.big_id_enabled;
    let big_endian = file.header.byte_order() == ByteOrder::Big;

    for info in &file.objects {
        if opts.cancel.is_some_and(|c| c()) {
            scene.warnings.push(Warning {
                path_id: info.path_id,
                message: "decode cancelled".to_string(),
            });
            return scene;
        }

        let object = match bridge_object_with_options(file, info, opts.strict_padding) {
            Ok(o) => o,
            Err(e) => {
                scene.warnings.push(Warning {
                    path_id: info.path_id,
                    message: format!("failed to bridge object: {e}"),
                });
                continue;
            }
        };

        match info.class_id {
            class_ids::GAME_OBJECT => match decode_game_object(&object, big_ids) {
                Ok(go) => {
                    scene.game_objects.insert(info.path_id, go);
                }
                Err(e) => scene.warnings.push(Warning {
                    path_id: info.path_id,
                    message: format!("GameObject decode failed: {e}"),
                }),
            },
            class_ids::TRANSFORM => match decode_transform(&object, big_ids) {
                Ok((owner, transform)) => {
                    scene.transform_owners.insert(info.path_id, owner);
                    scene.transforms.insert(info.path_id, transform);
                }
                Err(e) => scene.warnings.push(Warning {
                    path_id: info.path_id,
                    message: format!("Transform decode failed: {e}"),
                }),
            },
            class_ids::MESH => {
                let parser = MeshParser::new(version.clone()).with_strict_padding(opts.strict_padding);
                match parser.parse_from_unity_object(&object) {
                    Ok(result) => {
                        for w in result.warnings {
                            scene.warnings.push(Warning {
                                path_id: info.path_id,
                                message: w,
                            });
                        }
                        match decode_mesh_with_options(
                            &result.mesh,
                            version.major,
                            big_endian,
                            opts.resolve_external,
                            opts.enable_skinning,
                        ) {
                            Ok(decoded) => {
                                scene.meshes.insert(info.path_id, decoded);
                            }
                            Err(e) => scene.warnings.push(Warning {
                                path_id: info.path_id,
                                message: format!("mesh geometry decode failed, omitting: {e}"),
                            }),
                        }
                    }
                    Err(e) => scene.warnings.push(Warning {
                        path_id: info.path_id,
                        message: format!("Mesh parse failed: {e}"),
                    }),
                }
            }
            class_ids::MESH_FILTER => match decode_mesh_filter(&object, big_ids, opts.strict_padding) {
                Ok(record) => {
                    scene.mesh_filters.insert(info.path_id, record);
                }
                Err(e) => scene.warnings.push(Warning {
                    path_id: info.path_id,
                    message: format!("MeshFilter decode failed: {e}"),
                }),
            },
            class_ids::MESH_RENDERER => match decode_mesh_renderer(&object, file, big_ids, opts.strict_padding) {
                Ok(record) => {
                    scene.mesh_renderers.insert(info.path_id, record);
                }
                Err(e) => scene.warnings.push(Warning {
                    path_id: info.path_id,
                    message: format!("MeshRenderer decode failed: {e}"),
                }),
            },
            class_ids::MATERIAL => match decode_material(&object, opts.max_string_bytes, opts.strict_padding) {
                Ok(record) => {
                    scene.materials.insert(info.path_id, record);
                }
                Err(e) => scene.warnings.push(Warning {
                    path_id: info.path_id,
                    message: format!("Material decode failed: {e}"),
                }),
            },
            class_ids::TEXTURE_2D => match decode_texture(&object) {
                Ok(record) => {
                    scene.textures.insert(info.path_id, record);
                }
                Err(e) => scene.warnings.push(Warning {
                    path_id: info.path_id,
                    message: format!("Texture2D decode failed: {e}"),
                }),
            },
            _ => {}
        }
    }

    scene
}

fn decode_game_object(object: &UnityObject, big_ids: bool) -> Result<GameObject> {
    if object.info.type_tree.is_some() {
        object.as_gameobject()
    } else {
        GameObject::from_raw_bytes(object.raw_data(), big_ids)
    }
}

fn decode_transform(object: &UnityObject, big_ids: bool) -> Result<(ObjectRef, Transform)> {
    if object.info.type_tree.is_some() {
        let transform = object.as_transform()?;
        let game_object = object
            .get("m_GameObject")
            .and_then(pptr_from_value)
            .unwrap_or_default();
        Ok((game_object, transform))
    } else {
        Transform::from_raw_bytes(object.raw_data(), big_ids)
    }
}

fn pptr_from_value(value: &unity_asset_core::UnityValue) -> Option<ObjectRef> {
    if let unity_asset_core::UnityValue::Object(obj) = value {
        let file_id = match obj.get("fileID") {
            Some(unity_asset_core::UnityValue::Integer(i)) => *i as i32,
            _ => 0,
        };
        let path_id = match obj.get("pathID") {
            Some(unity_asset_core::UnityValue::Integer(i)) => *i,
            _ => 0,
        };
        Some(ObjectRef::new(file_id, path_id))
    } else {
        None
    }
}

fn decode_mesh_filter(object: &UnityObject, big_ids: bool, strict_padding: bool) -> Result<MeshFilterRecord> {
    if object.info.type_tree.is_some() {
        let game_object = object
            .get("m_GameObject")
            .and_then(pptr_from_value)
            .unwrap_or_default();
        let mesh = object.get("m_Mesh").and_then(pptr_from_value).unwrap_or_default();
        Ok(MeshFilterRecord { game_object, mesh })
    } else {
        let mut reader = crate::reader::BinaryReader::new(object.raw_data(), crate::reader::ByteOrder::Little)
            .with_strict_padding(strict_padding);
        let game_object = read_pptr(&mut reader, big_ids)?;
        let mesh = read_pptr(&mut reader, big_ids)?;
        Ok(MeshFilterRecord { game_object, mesh })
    }
}

/// Scans up to 256 bytes forward from `reader`'s current position for a
/// plausible `i32 material_count` (1..64) followed by that many PPtrs. A
/// candidate count is only accepted once every PPtr it yields resolves to a
/// Material object in `file`'s own object table, which rules out material
/// counts that happen to fall out of unrelated padding or version-specific
/// fields this probe doesn't otherwise understand.
fn scan_mesh_renderer_materials(
    data: &[u8],
    start: usize,
    big_ids: bool,
    file: &SerializedFile,
) -> Vec<ObjectRef> {
    let pptr_size = if big_ids { 12 } else { 8 };
    let window_end = (start + 256).min(data.len());

    for count_pos in start..window_end.saturating_sub(4) {
        let count_bytes: [u8; 4] = match data[count_pos..count_pos + 4].try_into() {
            Ok(b) => b,
            Err(_) => continue,
        };
        let count = i32::from_le_bytes(count_bytes);
        if !(1..=64).contains(&count) {
            continue;
        }
        let count = count as usize;
        let list_start = count_pos + 4;
        let list_end = list_start + count * pptr_size;
        if list_end > data.len() {
            continue;
        }

        let mut reader = crate::reader::BinaryReader::new(&data[list_start..list_end], crate::reader::ByteOrder::Little);
        let mut pptrs = Vec::with_capacity(count);
        let mut all_resolve = true;
        for _ in 0..count {
            let pptr = match read_pptr(&mut reader, big_ids) {
                Ok(p) => p,
                Err(_) => {
                    all_resolve = false;
                    break;
                }
            };
            let is_material = pptr.file_id == 0
                && file
                    .objects
                    .iter()
                    .any(|o| o.path_id == pptr.path_id && o.class_id == class_ids::MATERIAL);
            if !is_material {
                all_resolve = false;
                break;
            }
            pptrs.push(pptr);
        }

        if all_resolve && !pptrs.is_empty() {
            return pptrs;
        }
    }

    Vec::new()
}

fn decode_mesh_renderer(
    object: &UnityObject,
    file: &SerializedFile,
    big_ids: bool,
    strict_padding: bool,
) -> Result<MeshRendererRecord> {
    if object.info.type_tree.is_some() {
        let game_object = object
            .get("m_GameObject")
            .and_then(pptr_from_value)
            .unwrap_or_default();
        let materials = match object.get("m_Materials") {
            Some(unity_asset_core::UnityValue::Array(arr)) => {
                arr.iter().filter_map(pptr_from_value).collect()
            }
            _ => Vec::new(),
        };
        Ok(MeshRendererRecord {
            game_object,
            materials,
        })
    } else {
        // Everything past m_GameObject varies by Unity version in ways a
        // byte probe can't resolve reliably from field layout alone, so the
        // material list is recovered with a bounded forward scan (§4.5)
        // instead: find a plausible count followed by that many PPtrs that
        // all resolve to materials in this file.
        let data = object.raw_data();
        let mut reader =
            crate::reader::BinaryReader::new(data, crate::reader::ByteOrder::Little).with_strict_padding(strict_padding);
        let game_object = read_pptr(&mut reader, big_ids)?;
        let scan_start = reader.position() as usize;
        let materials = scan_mesh_renderer_materials(data, scan_start, big_ids, file);
        Ok(MeshRendererRecord {
            game_object,
            materials,
        })
    }
}

fn decode_material(object: &UnityObject, max_string_bytes: usize, strict_padding: bool) -> Result<MaterialRecord> {
    if let Some(name) = object.name() {
        let shader = object.get("m_Shader").and_then(pptr_from_value).unwrap_or_default();
        let main_texture = object
            .get("m_SavedProperties")
            .and_then(|v| match v {
                unity_asset_core::UnityValue::Object(obj) => obj.get("m_TexEnvs"),
                _ => None,
            })
            .and_then(|v| match v {
                unity_asset_core::UnityValue::Array(arr) => arr.first(),
                _ => None,
            })
            .and_then(pptr_from_value);
        Ok(MaterialRecord {
            name,
            shader,
            main_texture,
        })
    } else {
        // m_Name is always the first field of an Object-derived class; a
        // missing TypeTree still lets us read it directly.
        let mut reader = crate::reader::BinaryReader::new(object.raw_data(), crate::reader::ByteOrder::Little)
            .with_strict_padding(strict_padding);
        let name = reader.read_aligned_string_capped(max_string_bytes)?;
        Ok(MaterialRecord {
            name,
            shader: ObjectRef::default(),
            main_texture: None,
        })
    }
}

fn decode_texture(object: &UnityObject) -> Result<TextureRecord> {
    let name = object.name().unwrap_or_default();
    let width = match object.get("m_Width") {
        Some(unity_asset_core::UnityValue::Integer(w)) => *w as i32,
        _ => 0,
    };
    let height = match object.get("m_Height") {
        Some(unity_asset_core::UnityValue::Integer(h)) => *h as i32,
        _ => 0,
    };
    Ok(TextureRecord {
        name,
        width,
        height,
    })
}

/// Builds a `SemanticScene` from the `UnityClass` list a `.unitypackage`'s
/// text-YAML asset payload decodes to (legacy packages store GameObject and
/// Transform documents as plain YAML rather than a binary SerializedFile).
/// Only GameObject/Transform are reconstructed here; meshes, materials and
/// textures in a legacy package live as separate binary blobs (`.fbx`,
/// `.png`, ...) outside this crate's scope and are left for the caller to
/// attach by filename.
pub fn build_scene_from_yaml_classes(classes: &[unity_asset_core::UnityClass]) -> SemanticScene {
    let mut scene = SemanticScene::default();

    for class in classes {
        let path_id: i64 = class.anchor.parse().unwrap_or(0);
        if path_id == 0 {
            continue;
        }

        match class.class_id {
            class_ids::GAME_OBJECT => match GameObject::from_typetree(class.properties()) {
                Ok(go) => {
                    scene.game_objects.insert(path_id, go);
                }
                Err(e) => scene.warnings.push(Warning {
                    path_id,
                    message: format!("GameObject YAML decode failed: {e}"),
                }),
            },
            class_ids::TRANSFORM => match Transform::from_typetree(class.properties()) {
                Ok(transform) => {
                    let owner = class
                        .get("m_GameObject")
                        .and_then(pptr_from_value)
                        .unwrap_or_default();
                    scene.transform_owners.insert(path_id, owner);
                    scene.transforms.insert(path_id, transform);
                }
                Err(e) => scene.warnings.push(Warning {
                    path_id,
                    message: format!("Transform YAML decode failed: {e}"),
                }),
            },
            _ => {}
        }
    }

    scene
}
