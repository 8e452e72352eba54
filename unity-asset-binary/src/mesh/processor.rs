//! Mesh processing implementation
//!
//! This module provides high-level mesh processing functionality including
//! mesh export and optimization.

use super::decode::decode_mesh;
use super::parser::MeshParser;
use super::types::*;
use crate::error::Result;
use crate::object::UnityObject;
use crate::unity_version::UnityVersion;

/// Mesh processor
///
/// This struct provides high-level methods for processing Unity Mesh objects,
/// including parsing, validation, and export functionality.
pub struct MeshProcessor {
    parser: MeshParser,
    config: MeshConfig,
}

impl MeshProcessor {
    /// Create a new Mesh processor
    pub fn new(version: UnityVersion) -> Self {
        Self {
            parser: MeshParser::new(version),
            config: MeshConfig::default(),
        }
    }

    /// Create a Mesh processor with custom configuration
    pub fn with_config(version: UnityVersion, config: MeshConfig) -> Self {
        Self {
            parser: MeshParser::new(version),
            config,
        }
    }

    /// Parse Mesh from Unity object
    pub fn parse_mesh(&self, object: &UnityObject) -> Result<MeshResult> {
        let mut result = self.parser.parse_from_unity_object(object)?;

        // Apply configuration-based processing
        if let Some(max_vertices) = self.config.max_vertex_count {
            if result.mesh.vertex_count() > max_vertices {
                result.add_warning(format!(
                    "Mesh has {} vertices, exceeding limit of {}",
                    result.mesh.vertex_count(),
                    max_vertices
                ));
            }
        }

        // Validate mesh if needed
        if let Err(e) = self.validate_mesh(&result.mesh) {
            result.add_warning(format!("Mesh validation failed: {}", e));
        }

        Ok(result)
    }

    /// Validate mesh data
    pub fn validate_mesh(&self, mesh: &Mesh) -> Result<()> {
        // Check basic validity
        if mesh.name.is_empty() {
            return Err(crate::error::BinaryError::invalid_data("Mesh has no name"));
        }

        if mesh.vertex_data.vertex_count == 0 {
            return Err(crate::error::BinaryError::invalid_data(
                "Mesh has no vertices",
            ));
        }

        // Check submeshes
        for (i, submesh) in mesh.sub_meshes.iter().enumerate() {
            if !submesh.is_valid() {
                return Err(crate::error::BinaryError::invalid_data(format!(
                    "SubMesh {} is invalid",
                    i
                )));
            }
        }

        // Check vertex count limits
        if let Some(max_vertices) = self.config.max_vertex_count {
            if mesh.vertex_count() > max_vertices {
                return Err(crate::error::BinaryError::invalid_data(format!(
                    "Mesh vertex count {} exceeds limit {}",
                    mesh.vertex_count(),
                    max_vertices
                )));
            }
        }

        Ok(())
    }

    /// Export mesh to OBJ format
    pub fn export_to_obj(&self, mesh: &Mesh) -> Result<String> {
        let decoded = decode_mesh(mesh, self.parser.version().major, false, None)?;
        let mut obj_data = String::new();

        obj_data.push_str(&format!("# Mesh: {}\n", mesh.name));
        obj_data.push_str(&format!("# Vertices: {}\n\n", mesh.vertex_count()));

        for v in decoded.positions.chunks_exact(3) {
            obj_data.push_str(&format!("v {} {} {}\n", v[0], v[1], v[2]));
        }
        if let Some(normals) = &decoded.normals {
            obj_data.push('\n');
            for n in normals.chunks_exact(3) {
                obj_data.push_str(&format!("vn {} {} {}\n", n[0], n[1], n[2]));
            }
        }
        if let Some(uvs) = &decoded.uvs {
            obj_data.push('\n');
            for uv in uvs.chunks_exact(2) {
                obj_data.push_str(&format!("vt {} {}\n", uv[0], uv[1]));
            }
        }

        obj_data.push('\n');
        for (i, sub) in decoded.submeshes.iter().enumerate() {
            obj_data.push_str(&format!("# SubMesh {}: {} triangles\n", i, sub.triangles.len()));
            for tri in &sub.triangles {
                let (a, b, c) = (tri[0] + 1, tri[1] + 1, tri[2] + 1);
                obj_data.push_str(&format!("f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}\n"));
            }
        }

        Ok(obj_data)
    }

    /// Get mesh statistics
    pub fn get_mesh_stats(&self, meshes: &[&Mesh]) -> MeshStats {
        let mut stats = MeshStats::default();

        stats.total_meshes = meshes.len();

        for mesh in meshes {
            stats.total_vertices += mesh.vertex_count();
            stats.total_triangles += mesh.triangle_count();
            stats.total_submeshes += mesh.sub_meshes.len() as u32;

            if mesh.has_blend_shapes() {
                stats.meshes_with_blend_shapes += 1;
            }

            if mesh.is_compressed() {
                stats.compressed_meshes += 1;
            }

            if mesh.has_streaming_data() {
                stats.streaming_meshes += 1;
            }

            // Track complexity
            let vertex_count = mesh.vertex_count();
            if vertex_count < 1000 {
                stats.low_poly_meshes += 1;
            } else if vertex_count < 10000 {
                stats.medium_poly_meshes += 1;
            } else {
                stats.high_poly_meshes += 1;
            }
        }

        if !meshes.is_empty() {
            stats.average_vertices = stats.total_vertices as f32 / meshes.len() as f32;
            stats.average_triangles = stats.total_triangles as f32 / meshes.len() as f32;
        }

        stats
    }

    /// Get supported mesh features for this Unity version
    pub fn get_supported_features(&self) -> Vec<&'static str> {
        let version = self.parser.version();
        let mut features = vec!["basic_mesh", "sub_meshes", "vertex_data"];

        if version.major >= 5 {
            features.push("blend_shapes");
            features.push("compressed_mesh");
        }

        if version.major >= 2017 {
            features.push("mesh_optimization");
            features.push("streaming_info");
        }

        if version.major >= 2018 {
            features.push("mesh_usage_flags");
        }

        if version.major >= 2019 {
            features.push("mesh_topology");
            features.push("vertex_attributes");
        }

        features
    }

    /// Check if a feature is supported
    pub fn is_feature_supported(&self, feature: &str) -> bool {
        self.get_supported_features().contains(&feature)
    }

    /// Get the current configuration
    pub fn config(&self) -> &MeshConfig {
        &self.config
    }

    /// Set the configuration
    pub fn set_config(&mut self, config: MeshConfig) {
        self.config = config;
    }

    /// Get the Unity version
    pub fn version(&self) -> &UnityVersion {
        self.parser.version()
    }

    /// Set the Unity version
    pub fn set_version(&mut self, version: UnityVersion) {
        self.parser.set_version(version);
    }

    /// Extract vertex positions (if available)
    pub fn extract_vertex_positions(&self, mesh: &Mesh) -> Result<Vec<[f32; 3]>> {
        let decoded = decode_mesh(mesh, self.parser.version().major, false, None)?;
        Ok(decoded.positions.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect())
    }

    /// Extract vertex normals (if available)
    pub fn extract_vertex_normals(&self, mesh: &Mesh) -> Result<Vec<[f32; 3]>> {
        let decoded = decode_mesh(mesh, self.parser.version().major, false, None)?;
        Ok(decoded
            .normals
            .map(|n| n.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect())
            .unwrap_or_default())
    }

    /// Extract UV coordinates (if available)
    pub fn extract_uv_coordinates(&self, mesh: &Mesh) -> Result<Vec<[f32; 2]>> {
        let decoded = decode_mesh(mesh, self.parser.version().major, false, None)?;
        Ok(decoded
            .uvs
            .map(|uv| uv.chunks_exact(2).map(|c| [c[0], c[1]]).collect())
            .unwrap_or_default())
    }

    /// Extract triangle indices
    pub fn extract_triangle_indices(&self, mesh: &Mesh) -> Result<Vec<u32>> {
        let decoded = decode_mesh(mesh, self.parser.version().major, false, None)?;
        Ok(decoded.submeshes.into_iter().flat_map(|s| s.triangles).flatten().collect())
    }
}

impl Default for MeshProcessor {
    fn default() -> Self {
        Self::new(UnityVersion::default())
    }
}

/// Mesh processing statistics
#[derive(Debug, Clone, Default)]
pub struct MeshStats {
    pub total_meshes: usize,
    pub total_vertices: u32,
    pub total_triangles: u32,
    pub total_submeshes: u32,
    pub average_vertices: f32,
    pub average_triangles: f32,
    pub meshes_with_blend_shapes: usize,
    pub compressed_meshes: usize,
    pub streaming_meshes: usize,
    pub low_poly_meshes: usize,    // < 1K vertices
    pub medium_poly_meshes: usize, // 1K-10K vertices
    pub high_poly_meshes: usize,   // > 10K vertices
}
