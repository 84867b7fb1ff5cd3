//! Flat path to `(volume, relative path)` resolution.
//!
//! Resolution is total and performs no I/O. The segment before the first
//! separator selects the volume; a path with no separator, or whose leading
//! segment names no volume, lives whole in [`DEFAULT_VOLUME`].

use crate::config::defaults;
use crate::types::{ResolvedAddress, VolumeId};

pub const DEFAULT_VOLUME: VolumeId = VolumeId::Cache;

/// Resolve using the process separator.
pub fn resolve(path: &str) -> ResolvedAddress {
    resolve_with(path, defaults().sep)
}

/// Resolve an explicitly supplied target path, independent of any handle.
pub fn resolve_target(target: &str) -> ResolvedAddress {
    resolve(target)
}

pub fn resolve_with(path: &str, sep: char) -> ResolvedAddress {
    match path.split_once(sep) {
        Some((head, rest)) => match VolumeId::parse(head) {
            Some(volume) => ResolvedAddress::new(volume, rest),
            None => ResolvedAddress::new(DEFAULT_VOLUME, path),
        },
        None => ResolvedAddress::new(DEFAULT_VOLUME, path),
    }
}

/// True for the empty path and a bare volume name. Volume roots always exist
/// on the host and are never created.
pub fn is_volume_root(path: &str) -> bool {
    path.is_empty() || VolumeId::parse(path).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_separator_defaults_to_cache() {
        for p in ["a.txt", "", "data", "documents", "x y z"] {
            assert_eq!(resolve(p), ResolvedAddress::new(VolumeId::Cache, p));
        }
    }

    #[test]
    fn test_volume_prefix() {
        for v in VolumeId::ALL {
            let p = format!("{}/dir/file.bin", v.as_str());
            assert_eq!(resolve(&p), ResolvedAddress::new(v, "dir/file.bin"));
        }
    }

    #[test]
    fn test_splits_on_first_separator_only() {
        let a = resolve("documents/a/b/c");
        assert_eq!(a.volume, VolumeId::Documents);
        assert_eq!(a.relative_path, "a/b/c");
    }

    #[test]
    fn test_volume_with_empty_relative() {
        assert_eq!(resolve("data/"), ResolvedAddress::new(VolumeId::Data, ""));
    }

    #[test]
    fn test_unknown_prefix_stays_whole_in_cache() {
        assert_eq!(
            resolve("notes/a.txt"),
            ResolvedAddress::new(VolumeId::Cache, "notes/a.txt")
        );
        assert_eq!(
            resolve("/data/a.txt"),
            ResolvedAddress::new(VolumeId::Cache, "/data/a.txt")
        );
    }

    #[test]
    fn test_no_dot_normalization() {
        assert_eq!(
            resolve("library/../x"),
            ResolvedAddress::new(VolumeId::Library, "../x")
        );
    }

    #[test]
    fn test_custom_separator() {
        assert_eq!(
            resolve_with("external-storage\\a\\b", '\\'),
            ResolvedAddress::new(VolumeId::ExternalStorage, "a\\b")
        );
        assert_eq!(
            resolve_with("data/a", '\\'),
            ResolvedAddress::new(VolumeId::Cache, "data/a")
        );
    }

    #[test]
    fn test_resolve_target_matches_resolve() {
        assert_eq!(resolve_target("cache/t.txt"), resolve("cache/t.txt"));
    }

    #[test]
    fn test_is_volume_root() {
        assert!(is_volume_root(""));
        assert!(is_volume_root("library"));
        assert!(!is_volume_root("library/x"));
        assert!(!is_volume_root("notes"));
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let p = "external/a/b";
        assert_eq!(resolve(p), resolve(p));
    }
}
