use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Logical storage partition exposed by the host.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum VolumeId {
    /// Transient cache storage; the fallback volume.
    Cache,
    /// Application data.
    Data,
    /// User-visible documents.
    Documents,
    /// External application storage.
    External,
    /// Shared external storage.
    ExternalStorage,
    /// Library directory.
    Library,
}

impl VolumeId {
    pub const ALL: [VolumeId; 6] = [
        VolumeId::Cache,
        VolumeId::Data,
        VolumeId::Documents,
        VolumeId::External,
        VolumeId::ExternalStorage,
        VolumeId::Library,
    ];

    /// Name used as the first component of a virtual path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cache => "cache",
            Self::Data => "data",
            Self::Documents => "documents",
            Self::External => "external",
            Self::ExternalStorage => "external-storage",
            Self::Library => "library",
        }
    }

    /// Tag the host plugin expects in its `directory` field.
    pub fn host_tag(&self) -> &'static str {
        match self {
            Self::Cache => "CACHE",
            Self::Data => "DATA",
            Self::Documents => "DOCUMENTS",
            Self::External => "EXTERNAL",
            Self::ExternalStorage => "EXTERNAL_STORAGE",
            Self::Library => "LIBRARY",
        }
    }

    /// Parse a path component into a volume. Exact match only.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == name)
    }
}

impl fmt::Display for VolumeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VolumeId {
    type Err = crate::FilaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| crate::FilaError::Config(format!("unknown volume: {s}")))
    }
}

/// `(volume, relative path)` pair addressed to the host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ResolvedAddress {
    /// Volume the path lives in.
    pub volume: VolumeId,
    /// Path inside the volume, without a leading separator. Empty for the
    /// volume root.
    pub relative_path: String,
}

impl ResolvedAddress {
    pub fn new(volume: VolumeId, relative_path: impl Into<String>) -> Self {
        Self {
            volume,
            relative_path: relative_path.into(),
        }
    }
}

impl fmt::Display for ResolvedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.volume.host_tag(), self.relative_path)
    }
}

/// Kind of a filesystem entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    File,
    Directory,
}

/// Metadata for one entry. Times are milliseconds since the Unix epoch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatRecord {
    /// File or directory.
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    /// Size in bytes.
    pub size: u64,
    /// Last modification time.
    pub mtime: u64,
    /// Creation time, when the host tracks it.
    #[serde(default)]
    pub ctime: Option<u64>,
    /// Host-native location of the entry.
    #[serde(default)]
    pub uri: Option<String>,
}

impl StatRecord {
    /// Whether the entry is a directory.
    pub fn is_directory(&self) -> bool {
        self.entry_type == EntryType::Directory
    }
}

/// Text encoding requested from the host. `None` on a request means the
/// binary-safe base64 payload.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    Utf8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_parse_all() {
        for v in VolumeId::ALL {
            assert_eq!(VolumeId::parse(v.as_str()), Some(v));
        }
    }

    #[test]
    fn test_volume_parse_is_exact() {
        assert_eq!(VolumeId::parse("Cache"), None);
        assert_eq!(VolumeId::parse("CACHE"), None);
        assert_eq!(VolumeId::parse(""), None);
        assert_eq!(VolumeId::parse("external_storage"), None);
    }

    #[test]
    fn test_volume_serde_kebab() {
        let json = serde_json::to_string(&VolumeId::ExternalStorage).unwrap();
        assert_eq!(json, "\"external-storage\"");
        let v: VolumeId = serde_json::from_str("\"library\"").unwrap();
        assert_eq!(v, VolumeId::Library);
    }

    #[test]
    fn test_volume_from_str_unknown() {
        assert!("tmp".parse::<VolumeId>().is_err());
        assert_eq!("data".parse::<VolumeId>().unwrap(), VolumeId::Data);
    }

    #[test]
    fn test_stat_record_serde_shape() {
        let rec = StatRecord {
            entry_type: EntryType::Directory,
            size: 0,
            mtime: 10,
            ctime: None,
            uri: None,
        };
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["type"], "directory");
        assert!(rec.is_directory());
    }

    #[test]
    fn test_address_display() {
        let addr = ResolvedAddress::new(VolumeId::Documents, "a/b.txt");
        assert_eq!(addr.to_string(), "DOCUMENTS:a/b.txt");
    }
}
