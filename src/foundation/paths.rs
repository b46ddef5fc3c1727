/// Separator conventions used when normalizing a path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum PathStyle {
    /// `/`-separated paths; backslashes are ordinary characters.
    Posix,
    /// `\`-separated paths with drive letters and UNC shares; `/` is accepted as a separator.
    Windows,
}

impl PathStyle {
    /// Style of the machine this process runs on.
    pub fn host() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Posix
        }
    }

    /// Preferred separator for this style.
    pub fn separator(self) -> char {
        match self {
            Self::Posix => '/',
            Self::Windows => '\\',
        }
    }
}

/// Lexically normalize `path`: collapse redundant separators and resolve `.`/`..` segments.
///
/// The filesystem is never consulted. An empty path normalizes to `.`.
pub fn normalize_path(path: &str, style: PathStyle) -> String {
    match style {
        PathStyle::Posix => normalize_posix(path),
        PathStyle::Windows => normalize_windows(path),
    }
}

/// Replace every backslash with a forward slash.
pub fn to_forward_slashes(path: &str) -> String {
    path.replace('\\', "/")
}

fn normalize_posix(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }
    // Exactly two leading slashes are implementation-defined in POSIX and kept as-is.
    let root = match path.bytes().take_while(|b| *b == b'/').count() {
        0 => "",
        2 => "//",
        _ => "/",
    };
    let parts = resolve_components(path.split('/'), !root.is_empty());
    let out = format!("{root}{}", parts.join("/"));
    if out.is_empty() { ".".to_string() } else { out }
}

fn normalize_windows(path: &str) -> String {
    let path = path.replace('/', "\\");
    let (drive, rest) = split_windows_drive(&path);
    let root = if rest.starts_with('\\') { "\\" } else { "" };
    let parts = resolve_components(rest.split('\\'), !root.is_empty());
    let prefix = format!("{drive}{root}");
    if prefix.is_empty() && parts.is_empty() {
        return ".".to_string();
    }
    format!("{prefix}{}", parts.join("\\"))
}

/// Split a drive letter (`C:`) or UNC share (`\\server\share`) off the front of a
/// backslash-only path.
fn split_windows_drive(path: &str) -> (&str, &str) {
    if let Some(unc) = path.strip_prefix("\\\\")
        && !unc.starts_with('\\')
    {
        let server_end = unc.find('\\').map(|i| i + 2);
        let share_end = server_end.and_then(|s| path[s + 1..].find('\\').map(|i| i + s + 1));
        let end = share_end.unwrap_or(path.len());
        return path.split_at(end);
    }
    let bytes = path.as_bytes();
    if bytes.len() >= 2 && bytes[1] == b':' && bytes[0].is_ascii_alphabetic() {
        return path.split_at(2);
    }
    ("", path)
}

fn resolve_components<'a>(comps: impl Iterator<Item = &'a str>, rooted: bool) -> Vec<&'a str> {
    let mut out: Vec<&str> = Vec::new();
    for comp in comps {
        if comp.is_empty() || comp == "." {
            continue;
        }
        if comp != ".." || (!rooted && out.is_empty()) || out.last() == Some(&"..") {
            out.push(comp);
        } else {
            // `..` above the root is dropped.
            out.pop();
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/paths.rs"]
mod tests;
