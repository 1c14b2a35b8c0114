use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// Directory Entry
// =============================================================================

/// Size reported by `ls -l` for directories.
const DIR_DISPLAY_SIZE: u64 = 4096;

/// Size reported by `ls -l` for files with neither content nor a size hint.
const FILE_FALLBACK_SIZE: u64 = 1024;

/// One name listed inside a scripted directory.
///
/// Entries are immutable. A directory's children are found by looking its
/// absolute path up in the filesystem; there is no parent back-reference.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct DirectoryEntry {
    pub name: String,
    /// Directory marker
    #[serde(default, rename = "dir")]
    pub is_dir: bool,
    /// File content (files only, may be absent)
    #[serde(default)]
    pub content: Option<String>,
    /// Scripted size in bytes, used when there is no content
    #[serde(default)]
    pub size: Option<u64>,
}

impl DirectoryEntry {
    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
            content: None,
            size: None,
        }
    }

    pub fn file(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
            content: Some(content.into()),
            size: None,
        }
    }

    /// A file with no scripted content.
    pub fn empty_file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
            content: None,
            size: None,
        }
    }

    /// Dotfiles are hidden unless `ls -a` is used.
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }

    /// File content, empty for directories and contentless files.
    pub fn text(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }

    /// Size shown in long listings.
    pub fn display_size(&self) -> u64 {
        if self.is_dir {
            return DIR_DISPLAY_SIZE;
        }
        match (&self.content, self.size) {
            (Some(content), _) => content.len() as u64,
            (None, Some(size)) => size,
            (None, None) => FILE_FALLBACK_SIZE,
        }
    }

    /// Name as printed by `ls`: directories carry a trailing slash.
    pub fn display_name(&self) -> String {
        if self.is_dir {
            format!("{}/", self.name)
        } else {
            self.name.clone()
        }
    }

    pub fn permissions(&self) -> DisplayPermissions {
        DisplayPermissions {
            is_dir: self.is_dir,
        }
    }
}

// =============================================================================
// Display Permissions
// =============================================================================

/// Unix-style permission column for `ls -l`.
///
/// The scripted filesystem is read-only for the terminal, but the listing
/// mimics an ordinary home directory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DisplayPermissions {
    pub is_dir: bool,
}

impl fmt::Display for DisplayPermissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dir {
            write!(f, "drwxr-xr-x")
        } else {
            write!(f, "-rw-r--r--")
        }
    }
}

// =============================================================================
// Manifest Types
// =============================================================================

/// Root manifest structure, see `assets/fs.toml`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Manifest {
    /// Home directory (`~`)
    pub home: String,
    /// Directory listings keyed by absolute path
    #[serde(default)]
    pub directories: Vec<DirectoryListing>,
}

/// The scripted contents of one directory.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DirectoryListing {
    /// Absolute path of the directory
    pub path: String,
    /// Children in display order
    #[serde(default)]
    pub entries: Vec<DirectoryEntry>,
}
