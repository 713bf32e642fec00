use std::fs;
use std::path::Path;

/// Declared-dependency file looked up at the root of every checkout
pub const MANIFEST_FILE_NAME: &str = "requirements.txt";

const SYMLINK_REASON: &str = "symbolic link";

/// State of the dependency manifest inside a checkout
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestState {
    /// Present, non-empty and valid UTF-8
    Valid,
    /// Present but empty, whitespace-only, not decodable as text, or not a regular file
    Invalid(String),
    Absent,
}

impl ManifestState {
    /// Inspects the manifest at `path` without modifying it
    ///
    /// Links are never followed: a symbolic link (dangling or not) is
    /// `Invalid`, so the declared manifest can only be a regular file.
    pub fn inspect(path: &Path) -> Self {
        match fs::symlink_metadata(path) {
            Ok(metadata) if metadata.file_type().is_symlink() => {
                return ManifestState::Invalid(SYMLINK_REASON.to_string())
            }
            Ok(metadata) if !metadata.is_file() => {
                return ManifestState::Invalid("not a regular file".to_string())
            }
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return ManifestState::Absent,
            Err(e) => return ManifestState::Invalid(format!("unreadable: {}", e)),
        }

        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return ManifestState::Absent,
            Err(e) => return ManifestState::Invalid(format!("unreadable: {}", e)),
        };

        match String::from_utf8(bytes) {
            Ok(text) if text.trim().is_empty() => ManifestState::Invalid("empty".to_string()),
            Ok(_) => ManifestState::Valid,
            Err(_) => ManifestState::Invalid("not valid UTF-8 text".to_string()),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ManifestState::Valid)
    }

    pub fn is_symlink(&self) -> bool {
        matches!(self, ManifestState::Invalid(reason) if reason == SYMLINK_REASON)
    }
}

impl std::fmt::Display for ManifestState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ManifestState::Valid => write!(f, "present-valid"),
            ManifestState::Invalid(reason) => write!(f, "present-invalid ({})", reason),
            ManifestState::Absent => write!(f, "absent"),
        }
    }
}

/// How the manifest used for SBOM generation came to be
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ManifestResolution {
    /// The repository's own manifest was valid and left untouched
    Declared,
    /// Regenerated by inferring dependencies from source imports
    Inferred,
    /// Captured from the packages installed on the host running the pipeline
    EnvironmentSnapshot,
    /// Every fallback failed; SBOM generation proceeds with whatever is on disk
    Unresolved,
}

impl std::fmt::Display for ManifestResolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ManifestResolution::Declared => "declared",
            ManifestResolution::Inferred => "inferred from sources",
            ManifestResolution::EnvironmentSnapshot => "host environment snapshot",
            ManifestResolution::Unresolved => "unresolved",
        };
        write!(f, "{}", label)
    }
}
