//! Unity Core Object Types
//!
//! This module implements specific Unity object types like GameObject, Transform, etc.
//! These are the concrete implementations that parse TypeTree data into structured objects.

use crate::error::{BinaryError, Result};
use crate::reader::BinaryReader;
use indexmap::IndexMap;
use unity_asset_core::UnityValue;

/// Reads a `PPtr<T>` (`{fileID, pathID}`), honouring the file's big-ID flag.
pub fn read_pptr(reader: &mut BinaryReader, big_ids: bool) -> Result<ObjectRef> {
    let file_id = reader.read_i32()?;
    let path_id = if big_ids {
        reader.read_i64()?
    } else {
        reader.read_i32()? as i64
    };
    Ok(ObjectRef::new(file_id, path_id))
}

/// Reference to another Unity object
#[derive(Debug, Clone, Default)]
pub struct ObjectRef {
    pub file_id: i32,
    pub path_id: i64,
}

impl ObjectRef {
    pub fn new(file_id: i32, path_id: i64) -> Self {
        Self { file_id, path_id }
    }

    pub fn is_null(&self) -> bool {
        self.path_id == 0
    }
}

/// 3D Vector
#[derive(Debug, Clone, Default)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Quaternion for rotations
#[derive(Debug, Clone, Default)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quaternion {
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub fn identity() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            w: 1.0,
        }
    }
}

/// Unity GameObject
#[derive(Debug, Clone)]
pub struct GameObject {
    pub name: String,
    pub components: Vec<ObjectRef>,
    pub layer: i32,
    pub tag: String,
    pub active: bool,
}

impl GameObject {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            components: Vec::new(),
            layer: 0,
            tag: "Untagged".to_string(),
            active: true,
        }
    }

    /// Parse GameObject from TypeTree data
    pub fn from_typetree(properties: &IndexMap<String, UnityValue>) -> Result<Self> {
        let mut game_object = Self::new();

        // Extract name
        if let Some(UnityValue::String(name)) = properties.get("m_Name") {
            game_object.name = name.clone();
        }

        // Extract layer
        if let Some(UnityValue::Integer(layer)) = properties.get("m_Layer") {
            game_object.layer = *layer as i32;
        }

        // Extract tag
        if let Some(UnityValue::String(tag)) = properties.get("m_Tag") {
            game_object.tag = tag.clone();
        }

        // Extract active state
        if let Some(UnityValue::Bool(active)) = properties.get("m_IsActive") {
            game_object.active = *active;
        }

        // Extract components array
        if let Some(UnityValue::Array(components_array)) = properties.get("m_Component") {
            for component in components_array {
                if let UnityValue::Object(component_obj) = component {
                    // Each component is typically a structure with file_id and path_id
                    let file_id = component_obj
                        .get("fileID")
                        .and_then(|v| match v {
                            UnityValue::Integer(id) => Some(*id as i32),
                            _ => None,
                        })
                        .unwrap_or(0);

                    let path_id = component_obj
                        .get("pathID")
                        .and_then(|v| match v {
                            UnityValue::Integer(id) => Some(*id),
                            _ => None,
                        })
                        .unwrap_or(0);

                    game_object
                        .components
                        .push(ObjectRef::new(file_id, path_id));
                }
            }
        }

        Ok(game_object)
    }

    /// Tolerant-probe decode when no TypeTree is embedded: `m_Component`
    /// (array of PPtr<Component>), `m_Layer`, `m_Name`, `m_Tag` (a
    /// TagManager index on Unity 5.5+), `m_IsActive`.
    pub fn from_raw_bytes(data: &[u8], big_ids: bool) -> Result<Self> {
        let mut reader = BinaryReader::new(data, crate::reader::ByteOrder::Little);
        let component_count = reader.read_i32()?;
        if !(0..=64).contains(&component_count) {
            return Err(BinaryError::probe_ambiguous(format!(
                "implausible GameObject component count {component_count}"
            )));
        }
        let mut components = Vec::with_capacity(component_count as usize);
        for _ in 0..component_count {
            components.push(read_pptr(&mut reader, big_ids)?);
        }
        let layer = reader.read_i32()?;
        let name = reader.read_aligned_string_capped(4096)?;
        let tag_index = reader.read_i16()?;
        reader.align()?;
        let active = reader.read_bool()?;

        Ok(Self {
            name,
            components,
            layer,
            tag: tag_index.to_string(),
            active,
        })
    }
}

impl Default for GameObject {
    fn default() -> Self {
        Self::new()
    }
}

/// Unity Transform component
#[derive(Debug, Clone)]
pub struct Transform {
    pub position: Vector3,
    pub rotation: Quaternion,
    pub scale: Vector3,
    pub parent: Option<ObjectRef>,
    pub children: Vec<ObjectRef>,
}

impl Transform {
    pub fn new() -> Self {
        Self {
            position: Vector3::default(),
            rotation: Quaternion::identity(),
            scale: Vector3::new(1.0, 1.0, 1.0),
            parent: None,
            children: Vec::new(),
        }
    }

    /// Parse Transform from TypeTree data
    pub fn from_typetree(properties: &IndexMap<String, UnityValue>) -> Result<Self> {
        let mut transform = Self::new();

        // Extract position
        if let Some(position_value) = properties.get("m_LocalPosition") {
            transform.position = Self::parse_vector3(position_value)?;
        }

        // Extract rotation
        if let Some(rotation_value) = properties.get("m_LocalRotation") {
            transform.rotation = Self::parse_quaternion(rotation_value)?;
        }

        // Extract scale
        if let Some(scale_value) = properties.get("m_LocalScale") {
            transform.scale = Self::parse_vector3(scale_value)?;
        }

        // Extract parent
        if let Some(parent_value) = properties.get("m_Father") {
            transform.parent = Self::parse_object_ref(parent_value);
        }

        // Extract children
        if let Some(UnityValue::Array(children_array)) = properties.get("m_Children") {
            for child in children_array {
                if let Some(child_ref) = Self::parse_object_ref(child) {
                    transform.children.push(child_ref);
                }
            }
        }

        Ok(transform)
    }

    fn parse_vector3(value: &UnityValue) -> Result<Vector3> {
        match value {
            UnityValue::Object(obj) => {
                let x = obj
                    .get("x")
                    .and_then(|v| match v {
                        UnityValue::Float(f) => Some(*f as f32),
                        UnityValue::Integer(i) => Some(*i as f32),
                        _ => None,
                    })
                    .unwrap_or(0.0);

                let y = obj
                    .get("y")
                    .and_then(|v| match v {
                        UnityValue::Float(f) => Some(*f as f32),
                        UnityValue::Integer(i) => Some(*i as f32),
                        _ => None,
                    })
                    .unwrap_or(0.0);

                let z = obj
                    .get("z")
                    .and_then(|v| match v {
                        UnityValue::Float(f) => Some(*f as f32),
                        UnityValue::Integer(i) => Some(*i as f32),
                        _ => None,
                    })
                    .unwrap_or(0.0);

                Ok(Vector3::new(x, y, z))
            }
            _ => Ok(Vector3::default()),
        }
    }

    fn parse_quaternion(value: &UnityValue) -> Result<Quaternion> {
        match value {
            UnityValue::Object(obj) => {
                let x = obj
                    .get("x")
                    .and_then(|v| match v {
                        UnityValue::Float(f) => Some(*f as f32),
                        UnityValue::Integer(i) => Some(*i as f32),
                        _ => None,
                    })
                    .unwrap_or(0.0);

                let y = obj
                    .get("y")
                    .and_then(|v| match v {
                        UnityValue::Float(f) => Some(*f as f32),
                        UnityValue::Integer(i) => Some(*i as f32),
                        _ => None,
                    })
                    .unwrap_or(0.0);

                let z = obj
                    .get("z")
                    .and_then(|v| match v {
                        UnityValue::Float(f) => Some(*f as f32),
                        UnityValue::Integer(i) => Some(*i as f32),
                        _ => None,
                    })
                    .unwrap_or(0.0);

                let w = obj
                    .get("w")
                    .and_then(|v| match v {
                        UnityValue::Float(f) => Some(*f as f32),
                        UnityValue::Integer(i) => Some(*i as f32),
                        _ => None,
                    })
                    .unwrap_or(1.0);

                Ok(Quaternion::new(x, y, z, w))
            }
            _ => Ok(Quaternion::identity()),
        }
    }

    fn parse_object_ref(value: &UnityValue) -> Option<ObjectRef> {
        match value {
            UnityValue::Object(obj) => {
                let file_id = obj
                    .get("fileID")
                    .and_then(|v| match v {
                        UnityValue::Integer(id) => Some(*id as i32),
                        _ => None,
                    })
                    .unwrap_or(0);

                let path_id = obj
                    .get("pathID")
                    .and_then(|v| match v {
                        UnityValue::Integer(id) => Some(*id),
                        _ => None,
                    })
                    .unwrap_or(0);

                let obj_ref = ObjectRef::new(file_id, path_id);
                if obj_ref.is_null() {
                    None
                } else {
                    Some(obj_ref)
                }
            }
            _ => None,
        }
    }

    /// Tolerant-probe decode when no TypeTree is embedded: `m_GameObject`
    /// (PPtr), `m_LocalRotation` (quaternion), `m_LocalPosition`/
    /// `m_LocalScale` (Vector3), `m_Children` (array of PPtr), `m_Father`
    /// (PPtr). Returns the owning GameObject's reference alongside the
    /// transform so callers don't need a second pass to link them.
    pub fn from_raw_bytes(data: &[u8], big_ids: bool) -> Result<(ObjectRef, Self)> {
        let mut reader = BinaryReader::new(data, crate::reader::ByteOrder::Little);
        let game_object = read_pptr(&mut reader, big_ids)?;

        let rotation = Quaternion::new(
            reader.read_f32()?,
            reader.read_f32()?,
            reader.read_f32()?,
            reader.read_f32()?,
        );
        let position = Vector3::new(reader.read_f32()?, reader.read_f32()?, reader.read_f32()?);
        let scale = Vector3::new(reader.read_f32()?, reader.read_f32()?, reader.read_f32()?);

        let child_count = reader.read_i32()?;
        if !(0..=100_000).contains(&child_count) {
            return Err(BinaryError::probe_ambiguous(format!(
                "implausible Transform child count {child_count}"
            )));
        }
        let mut children = Vec::with_capacity(child_count as usize);
        for _ in 0..child_count {
            children.push(read_pptr(&mut reader, big_ids)?);
        }
        let father = read_pptr(&mut reader, big_ids)?;

        Ok((
            game_object,
            Self {
                position,
                rotation,
                scale,
                parent: if father.is_null() { None } else { Some(father) },
                children,
            },
        ))
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}
