//! Lexical guard for joining untrusted relative paths onto a base directory.

use std::path::{Component, Path, PathBuf};

/// Join `relative` onto `base`, refusing anything that could leave `base`:
/// absolute paths, drive prefixes and `..` segments. `.` segments are dropped.
///
/// The check is lexical; symlinks inside `base` are not resolved.
pub fn guarded_join(base: &Path, relative: &str) -> Option<PathBuf> {
    let mut joined = base.to_path_buf();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(segment) => joined.push(segment),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(joined)
}
