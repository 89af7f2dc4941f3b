//! Vault directory layout.
//!
//! # Responsibility
//! - Map logical note categories onto concrete directories under one vault
//!   root.
//! - Keep folder-name conventions in one replaceable place instead of
//!   scattered through the promotion pipeline.
//!
//! # Invariants
//! - Every category resolves to exactly one directory.
//! - Directory overrides never move a category outside the caller's control.

use crate::model::note::Category;
use std::path::{Path, PathBuf};

/// Conventional intake folder name.
pub const DEFAULT_INBOX_DIR: &str = "Inbox";

/// Directory mapping for one vault.
///
/// The defaults follow the conventional folder names; tests and nonstandard
/// vaults can override each mapping through the builder methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultLayout {
    root: PathBuf,
    inbox: PathBuf,
    fleeting: PathBuf,
    literature: PathBuf,
    permanent: PathBuf,
}

impl VaultLayout {
    /// Creates a layout rooted at `root` with conventional folder names.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            inbox: root.join(DEFAULT_INBOX_DIR),
            fleeting: root.join(Category::Fleeting.label()),
            literature: root.join(Category::Literature.label()),
            permanent: root.join(Category::Permanent.label()),
            root,
        }
    }

    /// Overrides the intake directory (resolved against the vault root when
    /// relative).
    pub fn with_inbox(mut self, dir: impl AsRef<Path>) -> Self {
        self.inbox = self.resolve(dir.as_ref());
        self
    }

    /// Overrides one category directory (resolved against the vault root
    /// when relative).
    pub fn with_category_dir(mut self, category: Category, dir: impl AsRef<Path>) -> Self {
        let resolved = self.resolve(dir.as_ref());
        match category {
            Category::Fleeting => self.fleeting = resolved,
            Category::Literature => self.literature = resolved,
            Category::Permanent => self.permanent = resolved,
        }
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Intake directory scanned by the batch runner.
    pub fn inbox_dir(&self) -> &Path {
        &self.inbox
    }

    /// Destination directory for one promotion category.
    pub fn dir_for(&self, category: Category) -> &Path {
        match category {
            Category::Fleeting => &self.fleeting,
            Category::Literature => &self.literature,
            Category::Permanent => &self.permanent,
        }
    }

    fn resolve(&self, dir: &Path) -> PathBuf {
        if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            self.root.join(dir)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{VaultLayout, DEFAULT_INBOX_DIR};
    use crate::model::note::Category;
    use std::path::Path;

    #[test]
    fn default_layout_uses_conventional_folder_names() {
        let layout = VaultLayout::new("/vault");
        assert_eq!(layout.inbox_dir(), Path::new("/vault").join(DEFAULT_INBOX_DIR));
        assert_eq!(
            layout.dir_for(Category::Fleeting),
            Path::new("/vault/Fleeting Notes")
        );
        assert_eq!(
            layout.dir_for(Category::Literature),
            Path::new("/vault/Literature Notes")
        );
        assert_eq!(
            layout.dir_for(Category::Permanent),
            Path::new("/vault/Permanent Notes")
        );
    }

    #[test]
    fn overrides_resolve_relative_paths_against_root() {
        let layout = VaultLayout::new("/vault")
            .with_inbox("0-intake")
            .with_category_dir(Category::Permanent, "/elsewhere/permanent");
        assert_eq!(layout.inbox_dir(), Path::new("/vault/0-intake"));
        assert_eq!(
            layout.dir_for(Category::Permanent),
            Path::new("/elsewhere/permanent")
        );
    }
}
