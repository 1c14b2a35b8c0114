use std::collections::HashMap;

use crate::core::error::ManifestError;
use crate::models::{DirectoryEntry, Manifest};

/// Root of every absolute path.
const ROOT: &str = "/";

/// Read-only scripted filesystem.
///
/// Maps absolute directory paths to their ordered entries. Only the scripted
/// paths are populated: a directory entry whose own path is not a key simply
/// lists as empty.
///
/// # Path Convention
///
/// - Root: `"/"`
/// - Everything else: absolute, no trailing slash (`"/home/kyle"`)
#[derive(Clone, Debug)]
pub struct VirtualFs {
    dirs: HashMap<String, Vec<DirectoryEntry>>,
    home: String,
    root: DirectoryEntry,
}

impl VirtualFs {
    /// Create filesystem from manifest.
    ///
    /// Every directory key other than `/` must be listed as a directory by
    /// its parent key, and the home directory must be a key.
    pub fn from_manifest(manifest: &Manifest) -> Result<Self, ManifestError> {
        let mut dirs: HashMap<String, Vec<DirectoryEntry>> = HashMap::new();

        for listing in &manifest.directories {
            if !listing.path.starts_with(ROOT) {
                return Err(ManifestError::RelativePath(listing.path.clone()));
            }
            let path = Self::trim_trailing_slash(&listing.path);
            dirs.entry(path).or_default().extend(listing.entries.iter().cloned());
        }

        // Reachability: each key must appear as a directory in its parent
        for path in dirs.keys().filter(|p| p.as_str() != ROOT) {
            let parent = Self::parent_path(path);
            let name = Self::file_name(path);
            let listed = dirs
                .get(&parent)
                .is_some_and(|entries| entries.iter().any(|e| e.is_dir && e.name == name));
            if !listed {
                return Err(ManifestError::Unreachable {
                    path: path.clone(),
                    parent,
                });
            }
        }

        let home = Self::trim_trailing_slash(&manifest.home);
        if !dirs.contains_key(&home) {
            return Err(ManifestError::MissingHome(home));
        }

        Ok(Self {
            dirs,
            home,
            root: DirectoryEntry::dir(ROOT),
        })
    }

    /// Parse a TOML manifest and build the filesystem.
    pub fn from_toml(text: &str) -> Result<Self, ManifestError> {
        let manifest: Manifest = toml::from_str(text)?;
        Self::from_manifest(&manifest)
    }

    /// Home directory (`~`).
    pub fn home(&self) -> &str {
        &self.home
    }

    /// List entries of a directory in scripted order.
    ///
    /// Unknown paths yield an empty slice.
    pub fn list_entries(&self, path: &str) -> &[DirectoryEntry] {
        self.dirs.get(path).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate over every directory key, in no particular order.
    pub fn directories(&self) -> impl Iterator<Item = &str> {
        self.dirs.keys().map(String::as_str)
    }

    /// Check if a path is a populated directory.
    pub fn is_directory(&self, path: &str) -> bool {
        self.dirs.contains_key(path)
    }

    /// Resolve an entry by absolute path.
    ///
    /// The entry is looked up in its parent's listing by final segment.
    pub fn resolve_entry(&self, path: &str) -> Option<&DirectoryEntry> {
        if path == ROOT {
            return Some(&self.root);
        }
        let parent = Self::parent_path(path);
        let name = Self::file_name(path);
        self.list_entries(&parent).iter().find(|e| e.name == name)
    }

    /// Resolve a command argument to an absolute path string.
    ///
    /// - `~` is home, `~/x` is below home
    /// - `.` is `cwd`, `..` is the parent of `cwd`
    /// - A leading `/` is absolute, anything else is joined onto `cwd`
    ///
    /// Embedded `.`/`..` segments are not normalized.
    pub fn resolve_path(&self, cwd: &str, arg: &str) -> String {
        match arg {
            "~" => self.home.clone(),
            "." | "" => cwd.to_string(),
            ".." => Self::parent_path(cwd),
            _ => {
                if let Some(rest) = arg.strip_prefix("~/") {
                    Self::join_path(&self.home, rest)
                } else if arg.starts_with(ROOT) {
                    Self::trim_trailing_slash(arg)
                } else {
                    Self::join_path(cwd, arg)
                }
            }
        }
    }

    /// Join a relative name onto a directory with a single `/`.
    pub fn join_path(base: &str, name: &str) -> String {
        let name = Self::trim_trailing_slash(name);
        if name.is_empty() || name == ROOT {
            return base.to_string();
        }
        if base == ROOT {
            format!("/{}", name)
        } else {
            format!("{}/{}", base, name)
        }
    }

    /// Get the parent directory of a path.
    ///
    /// The parent of `/` is `/`.
    pub fn parent_path(path: &str) -> String {
        match path.rfind('/') {
            Some(0) | None => ROOT.to_string(),
            Some(idx) => path[..idx].to_string(),
        }
    }

    /// Final path segment.
    fn file_name(path: &str) -> &str {
        path.rsplit('/').next().unwrap_or(path)
    }

    fn trim_trailing_slash(path: &str) -> String {
        let trimmed = path.trim_end_matches('/');
        if trimmed.is_empty() && path.starts_with(ROOT) {
            ROOT.to_string()
        } else {
            trimmed.to_string()
        }
    }
}
