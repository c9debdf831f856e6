//! Non-empty file lists accepted by the analyzer port.

use std::path::{Path, PathBuf};

/// Ordered, non-empty sequence of file paths to analyse.
///
/// The analyzer is never invoked for an empty list, so the port accepts
/// only values of this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileSet(Vec<PathBuf>);

impl FileSet {
    /// Builds a file set, returning `None` when no paths are supplied.
    #[must_use]
    pub fn new<P>(paths: impl IntoIterator<Item = P>) -> Option<Self>
    where
        P: Into<PathBuf>,
    {
        let collected: Vec<PathBuf> = paths.into_iter().map(Into::into).collect();
        if collected.is_empty() {
            None
        } else {
            Some(Self(collected))
        }
    }

    /// Returns the paths in their original order.
    #[must_use]
    pub const fn as_slice(&self) -> &[PathBuf] {
        self.0.as_slice()
    }

    /// Iterates over the paths as borrowed [`Path`] values.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.0.iter().map(PathBuf::as_path)
    }

    /// Returns the number of paths. Always at least one.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[PathBuf]> for FileSet {
    fn as_ref(&self) -> &[PathBuf] {
        self.as_slice()
    }
}
