//! Top-level façade error kinds.
//!
//! Thin wrappers over the crate-specific errors each stage already
//! produces: the binary decoders' [`unity_asset_binary::BinaryError`] and
//! the glTF writer's [`unity_asset_gltf::GltfError`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error(transparent)]
    Binary(#[from] unity_asset_binary::BinaryError),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Gltf(#[from] unity_asset_gltf::GltfError),
}
