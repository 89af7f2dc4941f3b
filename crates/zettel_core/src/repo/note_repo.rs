//! Note repository contract and filesystem implementation.
//!
//! # Responsibility
//! - Load and persist notes as header-plus-body markdown files.
//! - List the note files of one intake directory, non-recursively.
//!
//! # Invariants
//! - `store_new` never overwrites: an existing destination is a collision.
//! - Listing is sorted by filename so batch ordering is deterministic.
//! - Dotfiles and non-`.md` entries are not notes.

use crate::frontmatter::{self, ParseError};
use crate::model::note::{MetadataValidationError, NoteMetadata};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub type RepoResult<T> = Result<T, RepoError>;

/// Per-note storage error.
#[derive(Debug)]
pub enum RepoError {
    /// Filesystem-level failure on one path.
    Io { path: PathBuf, source: io::Error },
    /// Note content exists but its header cannot be understood.
    Parse { path: PathBuf, source: ParseError },
    /// Record refused before any bytes were written.
    Validation(MetadataValidationError),
}

impl RepoError {
    /// Whether this error is a destination collision from `store_new`.
    pub fn is_already_exists(&self) -> bool {
        matches!(
            self,
            Self::Io { source, .. } if source.kind() == io::ErrorKind::AlreadyExists
        )
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error on `{}`: {source}", path.display()),
            Self::Parse { path, source } => {
                write!(f, "malformed note `{}`: {source}", path.display())
            }
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Validation(err) => Some(err),
        }
    }
}

impl From<MetadataValidationError> for RepoError {
    fn from(value: MetadataValidationError) -> Self {
        Self::Validation(value)
    }
}

/// One fully loaded note.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteFile {
    pub path: PathBuf,
    pub metadata: NoteMetadata,
    pub body: String,
}

/// Storage contract consumed by the promotion pipeline.
pub trait NoteRepository {
    /// Lists note files directly under `dir`, sorted by filename.
    fn list_note_paths(&self, dir: &Path) -> RepoResult<Vec<PathBuf>>;
    /// Loads and parses one note.
    fn load(&self, path: &Path) -> RepoResult<NoteFile>;
    /// Writes a note to a path that must not exist yet.
    fn store_new(&self, path: &Path, metadata: &NoteMetadata, body: &str) -> RepoResult<()>;
    /// Removes one note file.
    fn remove(&self, path: &Path) -> RepoResult<()>;
}

/// Plain-filesystem repository used by the CLI and tests alike.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsNoteRepository;

impl FsNoteRepository {
    pub fn new() -> Self {
        Self
    }
}

impl NoteRepository for FsNoteRepository {
    fn list_note_paths(&self, dir: &Path) -> RepoResult<Vec<PathBuf>> {
        let entries = fs::read_dir(dir).map_err(|source| RepoError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| RepoError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if !path.is_file() || !is_note_file_name(&path) {
                continue;
            }
            paths.push(path);
        }

        paths.sort();
        Ok(paths)
    }

    fn load(&self, path: &Path) -> RepoResult<NoteFile> {
        let content = fs::read_to_string(path).map_err(|source| RepoError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let (metadata, body) =
            frontmatter::parse_note(&content).map_err(|source| RepoError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(NoteFile {
            path: path.to_path_buf(),
            metadata,
            body,
        })
    }

    fn store_new(&self, path: &Path, metadata: &NoteMetadata, body: &str) -> RepoResult<()> {
        metadata.validate()?;

        let content = frontmatter::render_note(metadata, body);
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|source| RepoError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        file.write_all(content.as_bytes())
            .map_err(|source| RepoError::Io {
                path: path.to_path_buf(),
                source,
            })
    }

    fn remove(&self, path: &Path) -> RepoResult<()> {
        fs::remove_file(path).map_err(|source| RepoError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn is_note_file_name(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
        return false;
    };
    !name.starts_with('.')
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
}

#[cfg(test)]
mod tests {
    use super::{FsNoteRepository, NoteRepository, RepoError};
    use crate::model::note::{NoteMetadata, NoteStatus};
    use std::fs;

    #[test]
    fn listing_filters_to_visible_markdown_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.md"), "body").unwrap();
        fs::write(dir.path().join("a.md"), "body").unwrap();
        fs::write(dir.path().join(".hidden.md"), "body").unwrap();
        fs::write(dir.path().join("image.png"), [0u8; 4]).unwrap();
        fs::create_dir(dir.path().join("nested.md")).unwrap();

        let repo = FsNoteRepository::new();
        let paths = repo.list_note_paths(dir.path()).unwrap();
        let names: Vec<_> = paths
            .iter()
            .map(|path| path.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.md", "b.md"]);
    }

    #[test]
    fn store_new_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.md");
        fs::write(&path, "already here").unwrap();

        let repo = FsNoteRepository::new();
        let err = repo
            .store_new(&path, &NoteMetadata::default(), "body")
            .unwrap_err();
        assert!(err.is_already_exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), "already here");
    }

    #[test]
    fn load_round_trips_through_store_new() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.md");
        let metadata = NoteMetadata {
            quality_score: Some(0.9),
            extra: vec!["author: someone".to_string()],
            ..NoteMetadata::default()
        };

        let repo = FsNoteRepository::new();
        repo.store_new(&path, &metadata, "The body.").unwrap();
        let loaded = repo.load(&path).unwrap();

        assert_eq!(loaded.metadata.status, NoteStatus::Inbox);
        assert_eq!(loaded.metadata, metadata);
        assert_eq!(loaded.body, "The body.");
    }

    #[test]
    fn listing_missing_directory_is_an_io_error() {
        let repo = FsNoteRepository::new();
        let err = repo
            .list_note_paths(std::path::Path::new("/definitely/not/here"))
            .unwrap_err();
        assert!(matches!(err, RepoError::Io { .. }));
    }
}
