//! Access to document sources by path.
//!
//! The LaTeX parser reads its input, and every file reached through an
//! inclusion directive, through a [`SourceResolver`]. [`FsResolver`] reads
//! from disk; [`MemoryResolver`] serves unsaved buffers and tests.

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};

/// Source of file contents for path-based parsing.
pub trait SourceResolver {
    /// Read the full text of `path`.
    fn read(&self, path: &Path) -> io::Result<String>;

    /// Whether `path` names an existing file.
    fn exists(&self, path: &Path) -> bool;
}

impl<R: SourceResolver + ?Sized> SourceResolver for &R {
    fn read(&self, path: &Path) -> io::Result<String> {
        (**self).read(path)
    }

    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }
}

/// Reads sources from the file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsResolver;

impl SourceResolver for FsResolver {
    fn read(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// Serves sources from an in-memory map.
#[derive(Debug, Clone, Default)]
pub struct MemoryResolver {
    files: HashMap<PathBuf, String>,
}

impl MemoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file.
    pub fn insert(&mut self, path: impl Into<PathBuf>, text: impl Into<String>) {
        self.files.insert(path.into(), text.into());
    }

    /// Add a file and return the resolver, for building fixtures inline.
    pub fn with_file(mut self, path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        self.insert(path, text);
        self
    }
}

impl SourceResolver for MemoryResolver {
    fn read(&self, path: &Path) -> io::Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such file: {}", path.display()),
            )
        })
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_resolver() {
        let resolver = MemoryResolver::new().with_file("/doc/main.tex", "\\section{A}");

        assert!(resolver.exists(Path::new("/doc/main.tex")));
        assert!(!resolver.exists(Path::new("/doc/other.tex")));
        assert_eq!(resolver.read(Path::new("/doc/main.tex")).unwrap(), "\\section{A}");

        let err = resolver.read(Path::new("/doc/other.tex")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_resolver_by_reference() {
        fn read_through<R: SourceResolver>(resolver: R) -> String {
            resolver.read(Path::new("a.tex")).unwrap()
        }

        let resolver = MemoryResolver::new().with_file("a.tex", "text");
        assert_eq!(read_through(&resolver), "text");
    }

    #[test]
    fn test_fs_resolver_missing_file() {
        let resolver = FsResolver;
        assert!(!resolver.exists(Path::new("/definitely/not/here.tex")));
        assert!(resolver.read(Path::new("/definitely/not/here.tex")).is_err());
    }
}
