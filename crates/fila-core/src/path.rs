//! Virtual paths spanning every volume.
//!
//! A [`FilaPath`] is an ordered list of components. Its rendered form joins
//! them with the process separator; the first component selects the volume.

use crate::config::defaults;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FilaPath {
    components: Vec<String>,
}

impl FilaPath {
    /// Build a path from parts. Each part is split on the separator; empty
    /// and `.` segments are dropped and `..` pops the previous segment.
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let sep = defaults().sep;
        let mut components: Vec<String> = Vec::new();
        for part in parts {
            for seg in part.as_ref().split(sep) {
                match seg {
                    "" | "." => {}
                    ".." => {
                        components.pop();
                    }
                    s => components.push(s.to_string()),
                }
            }
        }
        Self { components }
    }

    /// Root of the default working volume.
    pub fn cwd() -> Self {
        Self::new([defaults().cwd.as_str()])
    }

    /// Root of the default temporary volume.
    pub fn temporary() -> Self {
        Self::new([defaults().tmp.as_str()])
    }

    pub fn components(&self) -> &[String] {
        &self.components
    }

    pub fn is_root(&self) -> bool {
        self.components.is_empty()
    }

    /// Rendered path string, components joined by the separator.
    pub fn path(&self) -> String {
        let mut buf = [0u8; 4];
        self.components.join(defaults().sep.encode_utf8(&mut buf))
    }

    /// Last component, or empty at the root.
    pub fn name(&self) -> &str {
        self.components.last().map(String::as_str).unwrap_or("")
    }

    /// Extension of the last component without the dot.
    pub fn extension(&self) -> Option<&str> {
        let name = self.name();
        match name.rfind('.') {
            Some(0) | None => None,
            Some(i) => Some(&name[i + 1..]),
        }
    }

    /// Parent path. The parent of the root is the root.
    pub fn up(&self) -> Self {
        let mut components = self.components.clone();
        components.pop();
        Self { components }
    }

    /// Child path. `name` may itself contain separators.
    pub fn down(&self, name: &str) -> Self {
        Self::new(self.components.iter().map(String::as_str).chain([name]))
    }
}

impl fmt::Display for FilaPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl FromStr for FilaPath {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new([s]))
    }
}

impl From<&str> for FilaPath {
    fn from(s: &str) -> Self {
        Self::new([s])
    }
}

impl From<String> for FilaPath {
    fn from(s: String) -> Self {
        Self::new([s])
    }
}

impl Serialize for FilaPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.path())
    }
}

impl<'de> Deserialize<'de> for FilaPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::new([s]))
    }
}
