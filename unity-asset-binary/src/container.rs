//! Uniform front door over Unity's various container formats.
//!
//! A `Container` wraps whatever `from_bytes` found under the leading magic
//! — an AssetBundle, a bare SerializedFile, or a WebFile — and exposes one
//! surface (`serialized_files`, `primary_serialized_file`, `resource`) so
//! callers don't need to match on the underlying kind themselves.
//! `UnityPackage` does the analogous job for the `.unitypackage` tarball,
//! one container per asset entry.

use std::io::Read;

use flate2::read::GzDecoder;

use unity_asset_core::UnityClass;
use unity_asset_yaml::SerdeUnityLoader;

use crate::asset::{SerializedFile, SerializedFileParser, class_ids};
use crate::bundle::{AssetBundle, BundleLoadOptions, BundleParser};
use crate::error::{BinaryError, Result};
use crate::webfile::WebFile;

/// Which container kind `Container::from_bytes` dispatched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerFormat {
    UnityFs,
    UnityWeb,
    UnityRaw,
    UnityArchive,
    SerializedFile,
    UnityPackageTar,
    Unknown,
}

impl ContainerFormat {
    fn sniff(data: &[u8]) -> Self {
        if data.len() >= 8 {
            match &data[..8] {
                b"UnityFS\0" => return ContainerFormat::UnityFs,
                b"UnityWeb" => return ContainerFormat::UnityWeb,
                b"UnityRaw" => return ContainerFormat::UnityRaw,
                b"UnityArc" => return ContainerFormat::UnityArchive,
                _ => {}
            }
        }
        if data.len() >= 15 && (&data[..12] == b"UnityWebData" || &data[..14] == b"TuanjieWebData") {
            return ContainerFormat::UnityWeb;
        }
        if looks_like_tar(data) || (data.len() >= 2 && data[0] == 0x1f && data[1] == 0x8b) {
            return ContainerFormat::UnityPackageTar;
        }
        ContainerFormat::Unknown
    }
}

/// A single node inside a container: a bundle directory entry, WebFile
/// entry, or (for a bare SerializedFile) the file itself.
#[derive(Debug, Clone)]
pub struct ContainerEntry {
    pub path: String,
    pub offset: u64,
    pub size: u64,
    pub flags: u32,
}

enum Payload {
    Bundle(AssetBundle),
    WebFile(WebFile),
    SerializedFile(SerializedFile),
}

/// A parsed Unity container: an AssetBundle, a standalone SerializedFile,
/// or a WebFile, addressed uniformly regardless of which it turned out to
/// be.
pub struct Container {
    pub name: String,
    pub format: ContainerFormat,
    pub size: u64,
    pub version: u32,
    pub unity_version: String,
    pub unity_revision: String,
    pub entries: Vec<ContainerEntry>,
    payload: Payload,
}

impl Container {
    /// Sniffs the leading magic and parses accordingly. `name` is used only
    /// for diagnostics (warnings, error messages).
    pub fn from_bytes(name: impl Into<String>, data: Vec<u8>) -> Result<Self> {
        let name = name.into();
        let size = data.len() as u64;
        let format = ContainerFormat::sniff(&data);

        match format {
            ContainerFormat::UnityFs | ContainerFormat::UnityArchive | ContainerFormat::UnityRaw => {
                let bundle = BundleParser::from_bytes_with_options(data, BundleLoadOptions::complete())?;
                let entries = bundle
                    .files
                    .iter()
                    .map(|f| ContainerEntry {
                        path: f.name.clone(),
                        offset: f.offset,
                        size: f.size,
                        flags: 0,
                    })
                    .collect();
                Ok(Self {
                    version: bundle.header.version,
                    unity_version: bundle.header.unity_version.clone(),
                    unity_revision: bundle.header.unity_revision.clone(),
                    name,
                    format,
                    size,
                    entries,
                    payload: Payload::Bundle(bundle),
                })
            }
            ContainerFormat::UnityWeb => {
                // `UnityWeb` as a bundle header signature and `UnityWebData`
                // as a WebFile signature share a sniff prefix; WebFile's own
                // parser rejects the other, so try it first and fall back.
                if let Ok(webfile) = WebFile::from_bytes(data.clone()) {
                    let entries = webfile
                        .files()
                        .iter()
                        .map(|f| ContainerEntry {
                            path: f.name.clone(),
                            offset: f.offset,
                            size: f.size,
                            flags: 0,
                        })
                        .collect();
                    Ok(Self {
                        name,
                        format,
                        size,
                        version: 0,
                        unity_version: String::new(),
                        unity_revision: String::new(),
                        entries,
                        payload: Payload::WebFile(webfile),
                    })
                } else {
                    let bundle = BundleParser::from_bytes_with_options(data, BundleLoadOptions::complete())?;
                    let entries = bundle
                        .files
                        .iter()
                        .map(|f| ContainerEntry {
                            path: f.name.clone(),
                            offset: f.offset,
                            size: f.size,
                            flags: 0,
                        })
                        .collect();
                    Ok(Self {
                        version: bundle.header.version,
                        unity_version: bundle.header.unity_version.clone(),
                        unity_revision: bundle.header.unity_revision.clone(),
                        name,
                        format,
                        size,
                        entries,
                        payload: Payload::Bundle(bundle),
                    })
                }
            }
            ContainerFormat::SerializedFile | ContainerFormat::Unknown => {
                let file = SerializedFileParser::from_bytes(data)?;
                Ok(Self {
                    name,
                    format: ContainerFormat::SerializedFile,
                    size,
                    version: file.header.version,
                    unity_version: file.unity_version.clone(),
                    unity_revision: String::new(),
                    entries: Vec::new(),
                    payload: Payload::SerializedFile(file),
                })
            }
            ContainerFormat::UnityPackageTar => Err(BinaryError::invalid_magic(
                "tar payload is a .unitypackage, use UnityPackage::from_bytes instead",
            )),
        }
    }

    /// All SerializedFiles this container holds (a bare SerializedFile
    /// container holds exactly one; a bundle/WebFile holds zero or more).
    pub fn serialized_files(&self) -> Vec<&SerializedFile> {
        match &self.payload {
            Payload::Bundle(b) => b.assets.iter().collect(),
            Payload::SerializedFile(f) => vec![f],
            Payload::WebFile(_) => Vec::new(),
        }
    }

    /// Picks the SerializedFile with the most Mesh (class_id 43) objects,
    /// tie-breaking by total object count — the same heuristic a multi-asset
    /// bundle needs when a caller wants "the interesting one" without
    /// enumerating every node by hand.
    pub fn primary_serialized_file(&self) -> Option<&SerializedFile> {
        self.serialized_files()
            .into_iter()
            .max_by_key(|f| (f.objects_of_type(class_ids::MESH).len(), f.objects.len()))
    }

    /// Extracts a named resource's raw bytes, e.g. a `.resS` stream
    /// companion file referenced by a mesh's `StreamingInfo`.
    pub fn resource(&self, name: &str) -> Result<Vec<u8>> {
        match &self.payload {
            Payload::Bundle(b) => b
                .find_file(name)
                .ok_or_else(|| BinaryError::generic(format!("resource '{name}' not found in bundle")))
                .and_then(|f| b.extract_file_data(f)),
            Payload::WebFile(w) => w.extract_file(name),
            Payload::SerializedFile(_) => Err(BinaryError::generic(format!(
                "container is a bare SerializedFile, no resource '{name}' to extract"
            ))),
        }
    }
}

fn looks_like_tar(data: &[u8]) -> bool {
    // USTAR magic "ustar" sits at offset 257 in the first header block.
    data.len() > 262 && &data[257..262] == b"ustar"
}

/// One asset entry inside a `.unitypackage`: the GUID-named directory that
/// holds `asset`, `pathname`, and `asset.meta`.
pub struct UnityPackageEntry {
    pub guid: String,
    pub pathname: Option<String>,
    pub asset_data: Option<Vec<u8>>,
}

impl UnityPackageEntry {
    /// Sniffs `asset_data`'s magic and parses it as a container. Returns
    /// `None` for entries with no asset payload (pure folder markers) or
    /// whose payload is YAML-format (text assets outside this crate's
    /// binary-decoder scope).
    pub fn as_container(&self) -> Option<Result<Container>> {
        let data = self.asset_data.clone()?;
        if data.starts_with(b"%YAML") || data.starts_with(b"--- !u!") {
            return None;
        }
        let name = self.pathname.clone().unwrap_or_else(|| self.guid.clone());
        Some(Container::from_bytes(name, data))
    }

    /// Sniffs `asset_data`'s magic and parses it as text-YAML Unity
    /// objects, the legacy counterpart to [`Self::as_container`]'s binary
    /// path. Returns `None` for entries with no payload or whose payload
    /// isn't YAML.
    pub fn as_yaml_classes(&self) -> Option<Result<Vec<UnityClass>>> {
        let data = self.asset_data.as_ref()?;
        if !(data.starts_with(b"%YAML") || data.starts_with(b"--- !u!")) {
            return None;
        }
        let text = String::from_utf8_lossy(data);
        Some(
            SerdeUnityLoader::new()
                .load_from_str(&text)
                .map_err(|e| BinaryError::generic(format!("YAML asset parse failed: {e}"))),
        )
    }
}

/// A decompressed, walked `.unitypackage` tarball.
pub struct UnityPackage {
    pub entries: Vec<UnityPackageEntry>,
}

impl UnityPackage {
    /// Decompresses the optional gzip wrapper, then walks the USTAR layout
    /// grouping `<guid>/{asset,pathname,asset.meta}` entries by directory.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let tar_bytes = if data.len() >= 2 && data[0] == 0x1f && data[1] == 0x8b {
            let mut decoder = GzDecoder::new(data);
            let mut out = Vec::new();
            decoder
                .read_to_end(&mut out)
                .map_err(|e| BinaryError::generic(format!("gzip decompress failed: {e}")))?;
            out
        } else {
            data.to_vec()
        };

        let mut archive = tar::Archive::new(tar_bytes.as_slice());
        let mut by_guid: std::collections::HashMap<String, UnityPackageEntry> =
            std::collections::HashMap::new();

        let entries = archive
            .entries()
            .map_err(|e| BinaryError::generic(format!("malformed tar archive: {e}")))?;

        for entry in entries {
            let mut entry = entry.map_err(|e| BinaryError::generic(format!("tar entry read failed: {e}")))?;
            let path = entry
                .path()
                .map_err(|e| BinaryError::generic(format!("tar entry path invalid: {e}")))?
                .to_string_lossy()
                .into_owned();

            let mut parts = path.splitn(2, '/');
            let guid = match parts.next() {
                Some(g) if !g.is_empty() => g.to_string(),
                _ => continue,
            };
            let rest = parts.next().unwrap_or("");

            let record = by_guid.entry(guid.clone()).or_insert_with(|| UnityPackageEntry {
                guid: guid.clone(),
                pathname: None,
                asset_data: None,
            });

            match rest {
                "pathname" => {
                    let mut buf = String::new();
                    entry
                        .read_to_string(&mut buf)
                        .map_err(|e| BinaryError::generic(format!("pathname read failed: {e}")))?;
                    record.pathname = Some(buf.trim_end().to_string());
                }
                "asset" => {
                    let mut buf = Vec::new();
                    entry
                        .read_to_end(&mut buf)
                        .map_err(|e| BinaryError::generic(format!("asset read failed: {e}")))?;
                    record.asset_data = Some(buf);
                }
                _ => {}
            }
        }

        Ok(Self {
            entries: by_guid.into_values().collect(),
        })
    }
}
