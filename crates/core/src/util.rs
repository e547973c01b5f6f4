use std::path::{Component, Path, PathBuf};

/// Joins `relative` onto `root`, resolving `.` and `..` lexically.
///
/// Returns `None` if `relative` is absolute or if the normalized result
/// would leave `root`.
pub fn join_within(root: &Path, relative: &str) -> Option<PathBuf> {
    let mut path = root.to_path_buf();
    let mut depth = 0usize;

    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => {
                path.push(part);
                depth += 1;
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if depth == 0 {
                    return None;
                }
                path.pop();
                depth -= 1;
            }
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    path.starts_with(root).then_some(path)
}

/// Lowercased extension of a `/`-separated file path, without the dot.
pub fn extension(file_path: &str) -> Option<String> {
    let name = file_path.rsplit('/').next()?;
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
