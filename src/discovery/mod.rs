//! Test executable discovery
//!
//! Finds `xnnpack_*_test` executables directly inside a build directory.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// File name prefix of a test suite executable
pub const SUITE_PREFIX: &str = "xnnpack_";

/// File name suffix of a test suite executable
pub const SUITE_SUFFIX: &str = "_test";

#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("Failed to read build directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Whether a file name matches `xnnpack_*_test`
pub fn is_suite_name(name: &str) -> bool {
    name.len() >= SUITE_PREFIX.len() + SUITE_SUFFIX.len()
        && name.starts_with(SUITE_PREFIX)
        && name.ends_with(SUITE_SUFFIX)
}

/// List suite executables in `dir`, sorted by path. No recursion.
pub fn discover_suites(dir: &Path) -> Result<Vec<PathBuf>, DiscoveryError> {
    let read_err = |source| DiscoveryError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut suites = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if !is_suite_name(name) {
            continue;
        }

        let path = entry.path();
        // metadata follows symlinks
        if !path.is_file() {
            debug!("Skipping {}: not a regular file", path.display());
            continue;
        }
        suites.push(path);
    }

    suites.sort();
    Ok(suites)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), b"").unwrap();
    }

    #[test]
    fn test_suite_name_matching() {
        assert!(is_suite_name("xnnpack_gemm_test"));
        assert!(is_suite_name("xnnpack__test"));
        assert!(!is_suite_name("xnnpack_test"));
        assert!(!is_suite_name("foo_test"));
        assert!(!is_suite_name("xnnpack_foo"));
        assert!(!is_suite_name("xnnpack_gemm_test.exe"));
        assert!(!is_suite_name("libxnnpack_gemm_test"));
    }

    #[test]
    fn test_discovers_sorted_matches_only() {
        let dir = tempdir().unwrap();
        for name in [
            "xnnpack_b_test",
            "xnnpack_a_test",
            "foo_test",
            "xnnpack_foo",
            "xnnpack_c_test.stamp",
            "args.gn",
        ] {
            touch(dir.path(), name);
        }

        let suites = discover_suites(dir.path()).unwrap();
        assert_eq!(
            suites,
            vec![
                dir.path().join("xnnpack_a_test"),
                dir.path().join("xnnpack_b_test"),
            ]
        );
    }

    #[test]
    fn test_no_recursion_and_no_directories() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("obj");
        std::fs::create_dir(&nested).unwrap();
        touch(&nested, "xnnpack_nested_test");
        std::fs::create_dir(dir.path().join("xnnpack_dir_test")).unwrap();

        let suites = discover_suites(dir.path()).unwrap();
        assert!(suites.is_empty());
    }

    #[test]
    fn test_empty_directory_is_not_an_error() {
        let dir = tempdir().unwrap();
        assert!(discover_suites(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = tempdir().unwrap();
        let result = discover_suites(&dir.path().join("missing"));
        assert!(matches!(result, Err(DiscoveryError::ReadDir { .. })));
    }
}
