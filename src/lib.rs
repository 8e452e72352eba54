//! Unity Asset Parser
//!
//! A Rust implementation of Unity asset parsing: YAML scene/prefab support,
//! and a binary decoder that turns UnityFS bundles, raw SerializedFiles,
//! and `.unitypackage` tarballs into a semantic object graph and, from
//! there, a glTF 2.0 GLB.
//!
//! This crate provides high-performance, memory-safe parsing of Unity files
//! while maintaining exact compatibility with Unity's formats.
//!
//! # Examples
//!
//! ```rust,no_run
//! use unity_asset::YamlDocument;
//! use unity_asset_core::UnityDocument;
//!
//! // Load a Unity YAML file
//! let doc = YamlDocument::load_yaml("ProjectSettings.asset", false)?;
//!
//! // Access the main object
//! if let Some(settings) = doc.entry() {
//!     println!("Product name: {:?}", settings.get("productName"));
//! }
//!
//! # Ok::<(), unity_asset::UnityAssetError>(())
//! ```
//!
//! Decoding a binary bundle into glTF:
//!
//! ```rust,no_run
//! use unity_asset::{DecodeOptions, GlbOptions, decode, to_glb};
//!
//! let bytes = std::fs::read("Scene.bundle")?;
//! let context = decode(bytes, &DecodeOptions::default())?;
//! let glb = to_glb(&context, &GlbOptions::default())?;
//! std::fs::write("Scene.glb", glb)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;

// Re-export from core and YAML crates
pub use unity_asset_core::{
    DocumentFormat, Result, UnityAssetError, UnityClass, UnityClassRegistry, UnityValue,
    constants::*,
};

pub use unity_asset_yaml::YamlDocument;

pub use error::{DecodeError, ExportError};
pub use unity_asset_gltf::GlbOptions;

use tracing::warn;
use unity_asset_binary::container::{Container, UnityPackage};
use unity_asset_binary::semantic::{
    MaterialRecord, MeshFilterRecord, MeshRendererRecord, SceneBuildOptions, SemanticScene,
    Warning, build_scene_from_yaml_classes, build_scene_with_options,
};
use unity_asset_binary::unity_objects::ObjectRef;
use unity_asset_binary::unity_version::UnityVersion;

/// Caller-supplied hook for resolving a mesh's streaming-info payload
/// (`path`, byte `offset`, byte `size`) to the bytes of an external
/// resource the decoder has no other way to reach. Consulted only when a
/// mesh's vertex/index data lives outside the SerializedFile that
/// describes it.
pub type ResolveExternal<'a> = dyn Fn(&str, u64, u32) -> Option<Vec<u8>> + 'a;

/// Options threaded through every stage of [`decode`]. Distinct from
/// [`GlbOptions`], which governs only the later `to_glb` render step.
pub struct DecodeOptions<'a> {
    /// Overrides the reader's default 1 MiB cap on string field lengths.
    pub max_string_bytes: usize,
    /// When true, non-zero alignment padding bytes are a hard error rather
    /// than a silently skipped oddity.
    pub strict_padding: bool,
    /// When true, an outer `.unitypackage` wrapper that isn't a valid
    /// gzip/tar archive is rejected instead of being probed as something
    /// else.
    pub validate_zip_magic: bool,
    /// Applies bind-pose skin matrices to mesh vertices when both skin
    /// weights and a bind pose are present.
    pub enable_skinning: bool,
    /// Consulted when a mesh references an external resource stream that
    /// isn't packaged alongside it in the same container.
    pub resolve_external: Option<&'a ResolveExternal<'a>>,
    /// Invoked once per warning produced anywhere during the decode, in
    /// addition to the warnings recorded on the returned [`Context`].
    pub warnings_sink: Option<&'a dyn Fn(&str)>,
    /// Polled at the §5 checkpoints (per bundle node, per object, per
    /// mesh); returning `true` aborts the decode.
    pub cancel: Option<&'a dyn Fn() -> bool>,
}

impl Default for DecodeOptions<'_> {
    fn default() -> Self {
        Self {
            max_string_bytes: unity_asset_binary::reader::BinaryReader::DEFAULT_MAX_STRING_LEN,
            strict_padding: false,
            validate_zip_magic: true,
            enable_skinning: true,
            resolve_external: None,
            warnings_sink: None,
            cancel: None,
        }
    }
}

/// The reconstructed object graph produced by [`decode`], plus the
/// provenance needed to report on or re-export it. Multiple SerializedFiles
/// (a multi-asset bundle, or a `.unitypackage`'s several entries) are
/// merged into one scene, with each source's path_ids shifted into its own
/// disjoint range so cross-references stay resolvable after the merge.
pub struct Context {
    pub scene: SemanticScene,
    pub unity_version: String,
    pub sources: Vec<String>,
}

/// Path_id range reserved per merged source; generous enough that no
/// realistic single SerializedFile's path_ids run into the next source's
/// range.
const SOURCE_OFFSET: i64 = 1_000_000_000_000_000;

fn emit_warnings(warnings: &[Warning], options: &DecodeOptions) {
    if let Some(sink) = options.warnings_sink {
        for w in warnings {
            sink(&format!("path_id {}: {}", w.path_id, w.message));
        }
    }
}

fn remap_ref(r: ObjectRef, offset: i64) -> ObjectRef {
    if r.file_id == 0 && !r.is_null() {
        ObjectRef::new(0, r.path_id + offset)
    } else {
        r
    }
}

/// Folds `src` into `dest`, shifting every path_id (and every intra-file
/// cross-reference) by `offset` so two merged sources never collide.
fn merge_scene(dest: &mut SemanticScene, src: SemanticScene, offset: i64) {
    for (k, v) in src.game_objects {
        dest.game_objects.insert(k + offset, v);
    }
    for (k, mut t) in src.transforms {
        t.parent = t.parent.map(|p| remap_ref(p, offset));
        t.children = t.children.into_iter().map(|c| remap_ref(c, offset)).collect();
        dest.transforms.insert(k + offset, t);
    }
    for (k, v) in src.transform_owners {
        dest.transform_owners.insert(k + offset, remap_ref(v, offset));
    }
    for (k, v) in src.mesh_filters {
        dest.mesh_filters.insert(
            k + offset,
            MeshFilterRecord {
                game_object: remap_ref(v.game_object, offset),
                mesh: remap_ref(v.mesh, offset),
            },
        );
    }
    for (k, v) in src.mesh_renderers {
        dest.mesh_renderers.insert(
            k + offset,
            MeshRendererRecord {
                game_object: remap_ref(v.game_object, offset),
                materials: v.materials.into_iter().map(|m| remap_ref(m, offset)).collect(),
            },
        );
    }
    for (k, v) in src.materials {
        dest.materials.insert(
            k + offset,
            MaterialRecord {
                name: v.name,
                shader: remap_ref(v.shader, offset),
                main_texture: v.main_texture.map(|m| remap_ref(m, offset)),
            },
        );
    }
    for (k, v) in src.textures {
        dest.textures.insert(k + offset, v);
    }
    for (k, v) in src.meshes {
        dest.meshes.insert(k + offset, v);
    }
    for w in src.warnings {
        dest.warnings.push(Warning {
            path_id: w.path_id + offset,
            message: w.message,
        });
    }
}

fn looks_like_unitypackage(data: &[u8]) -> bool {
    (data.len() >= 2 && data[0] == 0x1f && data[1] == 0x8b)
        || (data.len() > 262 && &data[257..262] == b"ustar")
}

fn scene_build_options<'o, 'r>(
    options: &DecodeOptions<'o>,
    resolver: Option<&'r ResolveExternal<'r>>,
) -> SceneBuildOptions<'r>
where
    'o: 'r,
{
    SceneBuildOptions {
        enable_skinning: options.enable_skinning,
        resolve_external: resolver,
        cancel: options.cancel,
        max_string_bytes: options.max_string_bytes,
        strict_padding: options.strict_padding,
    }
}

fn decode_container(bytes: Vec<u8>, options: &DecodeOptions) -> std::result::Result<Context, DecodeError> {
    let container = Container::from_bytes("input", bytes)?;
    let unity_version = container.unity_version.clone();
    let version = UnityVersion::parse_version(&unity_version).unwrap_or_default();

    let mut scene = SemanticScene::default();
    let files = container.serialized_files();

    let resolver = |path: &str, offset: u64, size: u32| -> Option<Vec<u8>> {
        if let Some(user) = options.resolve_external {
            if let Some(bytes) = user(path, offset, size) {
                return Some(bytes);
            }
        }
        let data = container.resource(path).ok()?;
        let start = offset as usize;
        let end = start.checked_add(size as usize)?;
        data.get(start..end).map(|s| s.to_vec())
    };

    for (i, file) in files.iter().enumerate() {
        let build_opts = scene_build_options(options, Some(&resolver));
        let sub_scene = build_scene_with_options(file, &version, &build_opts);
        emit_warnings(&sub_scene.warnings, options);
        merge_scene(&mut scene, sub_scene, (i as i64) * SOURCE_OFFSET);
    }

    Ok(Context {
        scene,
        unity_version,
        sources: vec![container.name.clone()],
    })
}

fn decode_unitypackage(bytes: Vec<u8>, options: &DecodeOptions) -> std::result::Result<Context, DecodeError> {
    let package = UnityPackage::from_bytes(&bytes)?;
    let mut scene = SemanticScene::default();
    let mut sources = Vec::new();
    let mut unity_version = String::new();

    for (i, entry) in package.entries.iter().enumerate() {
        let offset = (i as i64) * SOURCE_OFFSET;
        let name = entry.pathname.clone().unwrap_or_else(|| entry.guid.clone());

        if let Some(result) = entry.as_container() {
            match result {
                Ok(container) => {
                    if unity_version.is_empty() {
                        unity_version = container.unity_version.clone();
                    }
                    let version = UnityVersion::parse_version(&container.unity_version).unwrap_or_default();
                    let resolver = |path: &str, off: u64, size: u32| -> Option<Vec<u8>> {
                        if let Some(user) = options.resolve_external {
                            if let Some(bytes) = user(path, off, size) {
                                return Some(bytes);
                            }
                        }
                        container.resource(path).ok()
                    };
                    for file in container.serialized_files() {
                        let build_opts = scene_build_options(options, Some(&resolver));
                        let sub_scene = build_scene_with_options(file, &version, &build_opts);
                        emit_warnings(&sub_scene.warnings, options);
                        merge_scene(&mut scene, sub_scene, offset);
                    }
                    sources.push(name);
                }
                Err(e) => {
                    warn!("unitypackage entry '{name}' container decode failed: {e}");
                    if let Some(sink) = options.warnings_sink {
                        sink(&format!("unitypackage entry '{name}' container decode failed: {e}"));
                    }
                }
            }
        } else if let Some(result) = entry.as_yaml_classes() {
            match result {
                Ok(classes) => {
                    let mut sub_scene = build_scene_from_yaml_classes(&classes);
                    // Legacy text assets sometimes carry no m_Name; the
                    // package entry's own pathname is the next best identity
                    // for the GLB node (seed scenario: node names equal the
                    // package's asset pathnames).
                    for go in sub_scene.game_objects.values_mut() {
                        if go.name.is_empty() {
                            go.name = name.clone();
                        }
                    }
                    emit_warnings(&sub_scene.warnings, options);
                    merge_scene(&mut scene, sub_scene, offset);
                    sources.push(name);
                }
                Err(e) => {
                    warn!("unitypackage entry '{name}' YAML decode failed: {e}");
                    if let Some(sink) = options.warnings_sink {
                        sink(&format!("unitypackage entry '{name}' YAML decode failed: {e}"));
                    }
                }
            }
        }
    }

    Ok(Context {
        scene,
        unity_version,
        sources,
    })
}

/// Top-level dispatch (§6): sniffs `bytes` and decodes a UnityFS/UnityWeb/
/// UnityRaw/UnityArchive bundle, a bare SerializedFile, or a `.unitypackage`
/// tarball into one merged [`Context`].
pub fn decode(bytes: Vec<u8>, options: &DecodeOptions) -> std::result::Result<Context, DecodeError> {
    if looks_like_unitypackage(&bytes) {
        match decode_unitypackage(bytes.clone(), options) {
            Ok(ctx) => Ok(ctx),
            Err(e) if options.validate_zip_magic => Err(e),
            Err(e) => {
                // The outer wrapper sniffed as gzip/tar but didn't parse as
                // one; validate_zip_magic is off, so fall back to the
                // bundle/SerializedFile dispatch instead of failing outright.
                warn!("outer wrapper looked like a .unitypackage but failed to decode as one ({e}), retrying as a container");
                decode_container(bytes, options)
            }
        }
    } else {
        decode_container(bytes, options)
    }
}

/// Second-stage transform (§6): renders a decoded [`Context`] to a glTF 2.0
/// GLB byte buffer.
pub fn to_glb(context: &Context, options: &GlbOptions) -> std::result::Result<Vec<u8>, ExportError> {
    Ok(unity_asset_gltf::export_glb(&context.scene, options)?)
}

/// Finds the Transform owned by the GameObject named `bone_tag`, the
/// attachment point a decoration's root nodes are spliced under.
fn find_bone_transform(scene: &SemanticScene, bone_tag: &str) -> Option<i64> {
    scene.transform_owners.iter().find_map(|(transform_id, owner)| {
        if owner.file_id != 0 {
            return None;
        }
        scene
            .game_objects
            .get(&owner.path_id)
            .filter(|go| go.name == bone_tag)
            .map(|_| *transform_id)
    })
}

/// Optional composition step (§6): decodes `decoration_bytes` as a
/// secondary bundle and splices its root Transforms onto the Transform
/// owned by the GameObject named `bone_tag` in `context`, merging all of
/// its semantic records in. Returns `false` without modifying `context` if
/// `bone_tag` can't be found or the decoration fails to decode.
pub fn merge_decoration(context: &mut Context, decoration_bytes: Vec<u8>, bone_tag: &str) -> bool {
    let Some(bone) = find_bone_transform(&context.scene, bone_tag) else {
        return false;
    };

    let decoration = match decode(decoration_bytes, &DecodeOptions::default()) {
        Ok(ctx) => ctx,
        Err(e) => {
            warn!("merge_decoration: decoding decoration for bone '{bone_tag}' failed: {e}");
            return false;
        }
    };

    let offset = SOURCE_OFFSET * (context.sources.len() as i64 + 1);
    let roots: Vec<i64> = decoration
        .scene
        .transforms
        .iter()
        .filter(|(_, t)| t.parent.is_none())
        .map(|(id, _)| *id)
        .collect();

    merge_scene(&mut context.scene, decoration.scene, offset);

    for root_id in &roots {
        let remapped = root_id + offset;
        if let Some(t) = context.scene.transforms.get_mut(&remapped) {
            t.parent = Some(ObjectRef::new(0, bone));
        }
    }
    if let Some(bone_transform) = context.scene.transforms.get_mut(&bone) {
        for root_id in &roots {
            bone_transform.children.push(ObjectRef::new(0, root_id + offset));
        }
    }

    context.sources.push(format!("{bone_tag}:decoration"));
    true
}

/// Environment for managing multiple Unity assets
pub mod environment {
    use crate::{Result, UnityClass, YamlDocument};
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};
    use unity_asset_core::{UnityAssetError, UnityDocument};

    /// Unified environment for managing Unity assets
    pub struct Environment {
        /// Loaded YAML documents
        yaml_documents: HashMap<PathBuf, YamlDocument>,
        /// Base path for relative file resolution
        #[allow(dead_code)]
        base_path: PathBuf,
    }

    impl Environment {
        /// Create a new environment
        pub fn new() -> Self {
            Self {
                yaml_documents: HashMap::new(),
                base_path: std::env::current_dir().unwrap_or_default(),
            }
        }

        /// Load assets from a path (file or directory)
        pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
            let path = path.as_ref();

            if path.is_file() {
                self.load_file(path)?;
            } else if path.is_dir() {
                self.load_directory(path)?;
            }

            Ok(())
        }

        /// Load a single file
        pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
            let path = path.as_ref();

            // Check file extension to determine type
            if let Some(ext) = path.extension() {
                match ext.to_str() {
                    Some("asset") | Some("prefab") | Some("unity") | Some("meta") => {
                        let doc = YamlDocument::load_yaml(path, false)?;
                        self.yaml_documents.insert(path.to_path_buf(), doc);
                    }
                    _ => {
                        // For now, skip unknown file types
                        // Future: Add binary asset support (.bundle, .assets, etc.)
                    }
                }
            }

            Ok(())
        }

        /// Load all supported files from a directory
        pub fn load_directory<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
            let path = path.as_ref();

            if !path.exists() {
                return Err(UnityAssetError::format(format!(
                    "Directory does not exist: {:?}",
                    path
                )));
            }

            if !path.is_dir() {
                return Err(UnityAssetError::format(format!(
                    "Path is not a directory: {:?}",
                    path
                )));
            }

            // Recursively traverse directory
            self.traverse_directory(path)?;

            Ok(())
        }

        /// Recursively traverse directory and load Unity files
        fn traverse_directory(&mut self, dir: &Path) -> Result<()> {
            let entries = std::fs::read_dir(dir).map_err(|e| {
                UnityAssetError::format(format!("Failed to read directory {:?}: {}", dir, e))
            })?;

            for entry in entries {
                let entry = entry.map_err(|e| {
                    UnityAssetError::format(format!("Failed to read directory entry: {}", e))
                })?;
                let path = entry.path();

                if path.is_dir() {
                    // Skip common Unity directories that don't contain assets
                    if let Some(dir_name) = path.file_name().and_then(|n| n.to_str()) {
                        match dir_name {
                            "Library" | "Temp" | "Logs" | ".git" | ".vs" | "obj" | "bin" => {
                                continue; // Skip these directories
                            }
                            _ => {
                                // Recursively process subdirectory
                                self.traverse_directory(&path)?;
                            }
                        }
                    }
                } else if path.is_file() {
                    // Try to load the file
                    if let Err(e) = self.load_file(&path) {
                        // Log error but continue processing other files
                        tracing::warn!("failed to load {:?}: {}", path, e);
                    }
                }
            }

            Ok(())
        }

        /// Get all Unity objects from all loaded documents
        pub fn objects(&self) -> impl Iterator<Item = &UnityClass> {
            self.yaml_documents.values().flat_map(|doc| doc.entries())
        }

        /// Filter objects by class name
        pub fn filter_by_class(&self, class_name: &str) -> Vec<&UnityClass> {
            self.objects()
                .filter(|obj| obj.class_name == class_name)
                .collect()
        }

        /// Get loaded YAML documents
        pub fn yaml_documents(&self) -> &HashMap<PathBuf, YamlDocument> {
            &self.yaml_documents
        }
    }

    impl Default for Environment {
        fn default() -> Self {
            Self::new()
        }
    }
}
