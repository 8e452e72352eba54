//! Unity binary asset decoder
//!
//! This crate parses Unity's binary container and serialization formats and
//! reconstructs the Unity object graph from them:
//!
//! - UnityFS/UnityWeb/UnityRaw/UnityArchive AssetBundles (with LZ4/LZMA/Brotli
//!   block compression)
//! - SerializedFile asset containers (`.assets`, the bundle-internal asset
//!   payload)
//! - `.unitypackage` tarballs
//!
//! On top of the raw container layer it resolves TypeTree-described object
//! records into semantic Unity types (`GameObject`, `Transform`, `Mesh`, ...)
//! and, with the `mesh` feature, decodes mesh geometry including
//! `CompressedMesh`/`PackedBitVector` dequantization.
//!
//! # Example
//!
//! ```rust,no_run
//! use unity_asset_binary::AssetBundle;
//! use std::fs;
//!
//! let data = fs::read("example.bundle")?;
//! let bundle = AssetBundle::from_bytes(data)?;
//!
//! for asset in bundle.assets() {
//!     let objects = asset.get_objects()?;
//!     for object in objects {
//!         println!("{} ({})", object.name().unwrap_or("<unnamed>"), object.class_name());
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod asset;
pub mod bundle;
pub mod compression;
pub mod container;
pub mod error;
pub mod object;
pub mod reader;
pub mod typetree;
pub mod unity_objects;
pub mod unity_version;
pub mod webfile;

#[cfg(feature = "mesh")]
pub mod mesh;

#[cfg(feature = "mesh")]
pub mod semantic;

// Re-export core types
pub use asset::{
    // Core types
    Asset, // Legacy compatibility alias
    AssetFileInfo,
    // Processing
    AssetProcessor,
    FileIdentifier,
    FileStatistics,
    HeaderFormatInfo,
    HeaderValidation,
    ObjectInfo,
    ParsingOptions,
    ParsingStats,
    SerializedFile,
    SerializedFileHeader,
    SerializedFileParser,
    SerializedType,
    TypeRegistry,
    class_ids,
    // Convenience functions
    create_processor as create_asset_processor,
    get_file_info as get_asset_file_info,
    get_parsing_options as get_asset_parsing_options,
    get_supported_versions as get_supported_asset_versions,
    is_version_supported as is_asset_version_supported,
    is_valid_serialized_file,
    parse_serialized_file,
    parse_serialized_file_from_path,
};
pub use bundle::{
    AssetBundle,
    BundleCompression,
    BundleFileInfo,
    BundleFormatInfo,
    BundleHeader,
    BundleInfo,
    BundleLoadOptions,
    BundleLoader,
    BundleParser,
    // Processing
    BundleProcessor,
    BundleResourceManager,
    BundleStatistics,
    // Compression
    CompressionOptions,
    CompressionStats,
    DirectoryNode,
    LoaderStatistics,
    ParsingComplexity,
    // Convenience functions (with bundle prefix to avoid conflicts)
    create_processor as create_bundle_processor,
    extract_file_from_bundle,
    get_bundle_info,
    get_supported_formats as get_supported_bundle_formats,
    is_valid_bundle,
    list_bundle_contents,
    load_bundle,
    load_bundle_from_memory,
    load_bundle_with_options,
};
pub use container::{Container, ContainerEntry, ContainerFormat, UnityPackage, UnityPackageEntry};
pub use error::{BinaryError, Result};
pub use object::{ObjectInfo as UnityObjectInfo, UnityObject};
pub use reader::{BinaryReader, ByteOrder};
pub use typetree::{
    TypeInfo,
    TypeTree,
    TypeTreeBuilder,
    TypeTreeInfo,
    TypeTreeNode,
    TypeTreeParser,
    // Processing
    TypeTreeProcessor,
    TypeRegistry as TypeTreeRegistry,
    TypeTreeSerializer,
    TypeTreeStatistics,
    TypeTreeValidator,
    ValidationReport,
    build_common_typetree,
    // Convenience functions
    create_processor as create_typetree_processor,
    get_parsing_method as get_typetree_parsing_method,
    get_typetree_info,
    is_version_supported as is_typetree_version_supported,
    parse_object_with_typetree,
    parse_typetree,
    serialize_object_with_typetree,
    validate_typetree,
};
pub use unity_objects::{GameObject, ObjectRef, Quaternion, Transform, Vector3};
pub use unity_version::{UnityFeature, UnityVersion, UnityVersionType, VersionCompatibility};
pub use webfile::{WebFile, WebFileCompression};

#[cfg(feature = "mesh")]
pub use mesh::{
    AABB,
    BlendShape,
    BlendShapeChannel,
    BlendShapeData,
    BlendShapeVertex,
    ChannelInfo,
    CompressedMesh,
    DecodedMesh,
    Mesh,
    MeshInfo,
    PackedFloatVector,
    PackedIntVector,
    StreamingInfo as MeshStreamingInfo,
    SubMesh,
    VertexData,
    get_triangle_count,
    get_vertex_count,
    has_blend_shapes,
    is_compressed_mesh,
};

#[cfg(feature = "mesh")]
pub use semantic::{
    MaterialRecord, MeshFilterRecord, MeshRendererRecord, SceneBuildOptions, SemanticScene,
    TextureRecord, Warning, bridge_object, build_scene, build_scene_from_yaml_classes,
    build_scene_with_options,
};
