//! Fake test executables for unit tests (unix only)

use std::os::unix::fs::{symlink, PermissionsExt};
use std::path::{Path, PathBuf};

fn system_binary(name: &str) -> PathBuf {
    ["/bin", "/usr/bin"]
        .iter()
        .map(|dir| Path::new(dir).join(name))
        .find(|path| path.exists())
        .unwrap_or_else(|| panic!("{name} not found in /bin or /usr/bin"))
}

/// A suite that exits 0 regardless of its arguments
pub fn passing_suite(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    symlink(system_binary("true"), &path).unwrap();
    path
}

/// A suite that exits 1 regardless of its arguments
pub fn failing_suite(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    symlink(system_binary("false"), &path).unwrap();
    path
}

/// A suite backed by a `/bin/sh` script body
pub fn script_suite(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}
