//! Static directory mounts.
//!
//! A mount binds a URL prefix to a filesystem root. Resolution maps a
//! request path onto a candidate file and checks that the candidate, once
//! symlinks and `..` segments are resolved, still lives under the root.

use std::path::{Path, PathBuf};

use crate::router::path::normalize;

const INDEX_FILE: &str = "/index.html";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticMount {
    /// Normalized URL prefix
    pub prefix: String,
    /// Directory files are served from
    pub root: PathBuf,
}

/// Outcome of resolving a request path against one mount.
#[derive(Debug, PartialEq, Eq)]
pub enum Resolution {
    /// A regular file under the root.
    File(PathBuf),
    /// The candidate canonicalizes outside the root.
    Traversal(PathBuf),
    /// Nothing servable here; try the next mount.
    Missing(PathBuf),
}

impl StaticMount {
    pub fn new(prefix: &str, root: impl Into<PathBuf>) -> Self {
        Self {
            prefix: normalize(prefix),
            root: root.into(),
        }
    }

    /// The part of `request_path` below this mount's prefix, or `None` if the
    /// mount does not cover the path. The root mount covers every path.
    pub fn sub_path<'a>(&self, request_path: &'a str) -> Option<&'a str> {
        if self.prefix == "/" {
            return Some(request_path);
        }

        let rest = request_path.strip_prefix(self.prefix.as_str())?;
        if rest.is_empty() || rest.starts_with('/') {
            Some(rest)
        } else {
            None
        }
    }

    /// Maps a sub-path (as returned by [`StaticMount::sub_path`]) onto the
    /// filesystem.
    pub fn resolve(&self, sub_path: &str) -> Resolution {
        let sub_path = if sub_path.is_empty() || sub_path == "/" {
            INDEX_FILE
        } else {
            sub_path
        };

        let candidate = self.root.join(sub_path.trim_start_matches('/'));

        // Either side failing to canonicalize (usually: it doesn't exist)
        // skips the containment check and leaves it to the file test below.
        if let (Ok(root), Ok(resolved)) = (self.root.canonicalize(), candidate.canonicalize()) {
            if !resolved.starts_with(&root) {
                return Resolution::Traversal(candidate);
            }
        }

        if is_regular_file(&candidate) {
            Resolution::File(candidate)
        } else {
            Resolution::Missing(candidate)
        }
    }
}

fn is_regular_file(path: &Path) -> bool {
    std::fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}
