/// Normalizes a repository-relative component path.
///
/// Leading `./`, trailing and repeated slashes are removed; the repository
/// root is spelled `.`.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let segments: Vec<&str> = path
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect();

    if segments.is_empty() {
        ".".to_string()
    } else {
        segments.join("/")
    }
}

/// Joins a file name onto a normalized component path.
#[must_use]
pub fn join_path(dir: &str, file: &str) -> String {
    let file = file.trim_start_matches("./").trim_start_matches('/');
    if dir == "." || dir.is_empty() {
        file.to_string()
    } else {
        format!("{}/{file}", dir.trim_end_matches('/'))
    }
}
