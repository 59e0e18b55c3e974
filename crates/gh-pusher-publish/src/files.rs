// Copyright 2026 Oxide Computer Company

//! Filesystem reconciliation: moving a build tree's entries into a target
//! directory and removing stale paths.

use crate::FsError;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use std::io;

/// The filesystem capabilities [`FileService`] is built over.
///
/// Mirrors the [`GitRunner`](crate::GitRunner) seam: the service logic only
/// ever touches the filesystem through this trait, so tests can substitute a
/// recording fake and assert on exactly which operations ran.
pub trait Workspace {
    /// Returns the paths matching `pattern`, in enumeration order
    /// (possibly empty).
    fn glob(&self, pattern: &str) -> Result<Vec<Utf8PathBuf>, FsError>;

    /// Moves `source_path` into `dest_dir`, preserving the entry name and
    /// overwriting any same-named entry already present there.
    fn move_entry(
        &self,
        source_path: &Utf8Path,
        dest_dir: &Utf8Path,
    ) -> Result<(), FsError>;

    /// Returns whether `path` exists.
    fn exists(&self, path: &Utf8Path) -> Result<bool, FsError>;

    /// Returns whether `path` is a regular file.
    fn is_file(&self, path: &Utf8Path) -> Result<bool, FsError>;

    /// Removes the single file at `path`.
    fn remove_file(&self, path: &Utf8Path) -> Result<(), FsError>;

    /// Removes the directory tree rooted at `path`.
    fn remove_dir_all(&self, path: &Utf8Path) -> Result<(), FsError>;
}

/// The real-filesystem [`Workspace`].
#[derive(Debug, Clone, Default)]
pub struct DiskWorkspace {}

impl DiskWorkspace {
    /// Creates a workspace over the real filesystem.
    pub fn new() -> Self {
        DiskWorkspace {}
    }
}

impl Workspace for DiskWorkspace {
    fn glob(&self, pattern: &str) -> Result<Vec<Utf8PathBuf>, FsError> {
        let paths = glob::glob(pattern).map_err(|source| FsError::Pattern {
            pattern: pattern.to_owned(),
            source,
        })?;
        let mut matches = Vec::new();
        for entry in paths {
            let path = entry.map_err(|source| FsError::Glob {
                pattern: pattern.to_owned(),
                source,
            })?;
            let path = Utf8PathBuf::from_path_buf(path)
                .map_err(|path| FsError::NonUtf8Path { path })?;
            matches.push(path);
        }
        Ok(matches)
    }

    fn move_entry(
        &self,
        source_path: &Utf8Path,
        dest_dir: &Utf8Path,
    ) -> Result<(), FsError> {
        let name = source_path.file_name().ok_or_else(|| {
            FsError::NoFileName { source_path: source_path.to_owned() }
        })?;
        let dest = dest_dir.join(name);

        // Overwrite semantics: a same-named entry at the destination is
        // replaced. rename() alone fails when the destination is a
        // non-empty directory, so clear it first.
        match fs::metadata(&dest) {
            Ok(meta) => {
                let cleared = if meta.is_dir() {
                    fs::remove_dir_all(&dest)
                } else {
                    fs::remove_file(&dest)
                };
                cleared.map_err(|source| FsError::Move {
                    source_path: source_path.to_owned(),
                    dest_dir: dest_dir.to_owned(),
                    source,
                })?;
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(source) => {
                return Err(FsError::Move {
                    source_path: source_path.to_owned(),
                    dest_dir: dest_dir.to_owned(),
                    source,
                });
            }
        }

        fs::rename(source_path, &dest).map_err(|source| FsError::Move {
            source_path: source_path.to_owned(),
            dest_dir: dest_dir.to_owned(),
            source,
        })
    }

    fn exists(&self, path: &Utf8Path) -> Result<bool, FsError> {
        path.try_exists().map_err(|source| FsError::Inspect {
            path: path.to_owned(),
            source,
        })
    }

    fn is_file(&self, path: &Utf8Path) -> Result<bool, FsError> {
        let meta = fs::metadata(path).map_err(|source| FsError::Inspect {
            path: path.to_owned(),
            source,
        })?;
        Ok(meta.is_file())
    }

    fn remove_file(&self, path: &Utf8Path) -> Result<(), FsError> {
        fs::remove_file(path).map_err(|source| FsError::Remove {
            path: path.to_owned(),
            source,
        })
    }

    fn remove_dir_all(&self, path: &Utf8Path) -> Result<(), FsError> {
        fs::remove_dir_all(path).map_err(|source| FsError::Remove {
            path: path.to_owned(),
            source,
        })
    }
}

/// Reconciles a source directory's immediate children into a target
/// directory, and removes stale paths.
///
/// Stateless: each call stands alone, and every existence or file-kind
/// query is made freshly at call time, never cached.
#[derive(Debug, Clone)]
pub struct FileService<W> {
    pub(crate) workspace: W,
}

impl<W: Workspace> FileService<W> {
    /// Creates a service over the given workspace.
    pub fn new(workspace: W) -> Self {
        FileService { workspace }
    }

    /// Moves every immediate child of `parent_dir` into `target_dir`.
    ///
    /// Enumerates with the non-recursive pattern `{parent_dir}/*` and
    /// transfers each match once, in enumeration order, preserving entry
    /// names and overwriting same-named entries at the destination.
    /// `parent_dir` itself is left in place.
    ///
    /// The transfer is best-effort sequential: a failure partway through
    /// (e.g., permission denied on one entry) stops the sequence and
    /// propagates, without rolling back entries already moved.
    pub fn move_files(
        &self,
        parent_dir: &Utf8Path,
        target_dir: &Utf8Path,
    ) -> Result<(), FsError> {
        let pattern = format!("{parent_dir}/*");
        for entry in self.workspace.glob(&pattern)? {
            self.workspace.move_entry(&entry, target_dir)?;
        }
        Ok(())
    }

    /// Removes `path`, whatever kind of entry it is.
    ///
    /// A nonexistent path is a no-op, not an error: cleanup is idempotent.
    /// Otherwise the path's kind is queried freshly and the removal
    /// dispatches on it, so a regular file is never handed to the
    /// directory remover or vice versa.
    pub fn remove(&self, path: &Utf8Path) -> Result<(), FsError> {
        if !self.workspace.exists(path)? {
            return Ok(());
        }
        if self.workspace.is_file(path)? {
            self.workspace.remove_file(path)
        } else {
            self.workspace.remove_dir_all(path)
        }
    }
}
