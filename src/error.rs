use std::path::PathBuf;

/// Errors raised while loading a translation folder
#[derive(Debug)]
pub enum LoadError {
    /// The root (or a language folder) could not be listed, or a file could not be read
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A translation file is not valid JSON
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// A translation file parsed, but its top-level value is not an object
    InvalidRoot { path: PathBuf },
    /// The folder passed to the loader is not a directory
    NotADirectory { path: PathBuf },
}

impl LoadError {
    /// Path of the file or directory the error refers to
    pub fn path(&self) -> &std::path::Path {
        match self {
            LoadError::Io { path, .. }
            | LoadError::Json { path, .. }
            | LoadError::InvalidRoot { path }
            | LoadError::NotADirectory { path } => path,
        }
    }
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io { path, source } => {
                write!(f, "Failed to read '{}': {}", path.display(), source)
            }
            LoadError::Json { path, source } => {
                write!(f, "Failed to parse JSON from '{}': {}", path.display(), source)
            }
            LoadError::InvalidRoot { path } => {
                write!(f, "Invalid JSON in '{}': root must be an object", path.display())
            }
            LoadError::NotADirectory { path } => {
                write!(f, "Path is not a directory: {}", path.display())
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            LoadError::Json { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result type for load operations
pub type LoadResult<T> = Result<T, LoadError>;
