//! URL path normalization and prefix composition.

/// Ensures a leading `/` and strips one trailing `/`, leaving the root as `/`.
///
/// ```
/// # use warden::router::normalize;
/// assert_eq!(normalize(""), "/");
/// assert_eq!(normalize("api/"), "/api");
/// assert_eq!(normalize("/"), "/");
/// ```
pub fn normalize(path: &str) -> String {
    let mut normalized = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };

    if normalized.len() > 1 && normalized.ends_with('/') {
        normalized.pop();
    }

    normalized
}

/// Appends `path` to an already-normalized `prefix`.
///
/// An empty or root prefix contributes nothing, so joining under `/` never
/// yields a `//` path.
pub fn join(prefix: &str, path: &str) -> String {
    let path = normalize(path);

    if prefix.is_empty() || prefix == "/" {
        return path;
    }

    normalize(&format!("{prefix}{path}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_edges() {
        assert_eq!(normalize(""), "/");
        assert_eq!(normalize("/a/"), "/a");
        assert_eq!(normalize("/"), "/");
        assert_eq!(normalize("a/b"), "/a/b");
        // only a single trailing slash is stripped
        assert_eq!(normalize("/a//"), "/a/");
    }

    #[test]
    fn join_prefixes() {
        assert_eq!(join("", "/x"), "/x");
        assert_eq!(join("/", "x"), "/x");
        assert_eq!(join("/api", "/x/"), "/api/x");
        assert_eq!(join("/api", "/"), "/api");
        assert_eq!(join("/api", ""), "/api");
    }
}
