use crate::MessageMap;
use crate::error::{LoadError, LoadResult};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const JSON_SUFFIX: &str = ".json";

/// One language folder as read from disk
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageMessages {
    /// Folder name exactly as found on disk
    pub name: String,
    pub messages: MessageMap,
    /// Number of JSON files that contributed to `messages`
    pub file_count: usize,
}

/// Derive the key prefix for a file from its path relative to the language folder
///
/// Intermediate folders and the file name (without `.json`) are joined with `.`:
/// `lang.json` -> `lang`, `ui/menu/file.json` -> `ui.menu.file`
pub fn key_from_path(relative: &Path) -> String {
    let mut parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    let file_name = parts.pop().unwrap_or_default();

    let subfolder = parts.join(".");
    let stem = match file_name.strip_suffix(JSON_SUFFIX) {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => file_name,
    };

    [subfolder, stem]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(".")
}

/// Flatten a JSON value into dotted keys under `prefix`
///
/// Objects extend the key with `.<field>`, arrays with `.<index>`. Every other
/// value is stored as a string.
pub fn flatten_into(value: &Value, target: &mut MessageMap, prefix: &str) {
    let join = |key: &str| {
        if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", prefix, key)
        }
    };

    match value {
        Value::Object(obj) => {
            for (key, value) in obj {
                flatten_into(value, target, &join(key.as_str()));
            }
        }
        Value::Array(items) => {
            for (index, value) in items.iter().enumerate() {
                flatten_into(value, target, &join(index.to_string().as_str()));
            }
        }
        Value::String(s) => {
            target.with_message(prefix, s);
        }
        other => {
            target.with_message(prefix, &other.to_string());
        }
    }
}

/// Load and flatten a single JSON file, prefixing every key with `prefix`
///
/// # Errors
/// - File read errors
/// - Invalid JSON
/// - A root value that is not an object
pub fn load_messages_from_file(path: &Path, prefix: &str) -> LoadResult<MessageMap> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let json: Value = serde_json::from_str(&content).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    if !json.is_object() {
        return Err(LoadError::InvalidRoot {
            path: path.to_path_buf(),
        });
    }

    let mut messages = MessageMap::new();
    flatten_into(&json, &mut messages, prefix);
    Ok(messages)
}

fn read_dir_sorted(dir: &Path) -> LoadResult<Vec<fs::DirEntry>> {
    let io_err = |source: std::io::Error| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut entries = fs::read_dir(dir)
        .map_err(io_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(io_err)?;
    entries.sort_by_key(|entry| entry.file_name());
    Ok(entries)
}

/// Recursively collect every `*.json` file below `dir`, in name order
pub fn collect_json_files(dir: &Path) -> LoadResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in read_dir_sorted(dir)? {
        let path = entry.path();
        let file_type = entry.file_type().map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;

        if file_type.is_dir() {
            files.extend(collect_json_files(&path)?);
        } else if file_type.is_file() && entry.file_name().to_string_lossy().ends_with(JSON_SUFFIX)
        {
            files.push(path);
        }
    }
    Ok(files)
}

/// Load every JSON file below a language folder into one flat map
pub fn load_language_dir(dir: &Path) -> LoadResult<(MessageMap, usize)> {
    let files = collect_json_files(dir)?;
    let mut messages = MessageMap::new();

    for file in &files {
        let relative = file.strip_prefix(dir).unwrap_or(file);
        let prefix = key_from_path(relative);
        let file_messages = load_messages_from_file(file, &prefix)?;
        debug!(
            "Loaded {} messages from '{}' under prefix '{}'",
            file_messages.len(),
            file.display(),
            prefix
        );
        messages.extend(file_messages);
    }

    Ok((messages, files.len()))
}

/// Load all language folders directly below `root`
///
/// Every subdirectory is a language; other entries are skipped. Folders are
/// visited in name order.
///
/// # Errors
/// - `root` missing or not a directory
/// - Any read or parse error below it
pub fn load_all_languages(root: &Path) -> LoadResult<Vec<LanguageMessages>> {
    if !root.is_dir() {
        if !root.exists() {
            return Err(LoadError::Io {
                path: root.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "directory not found",
                ),
            });
        }
        return Err(LoadError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let mut languages = Vec::new();
    for entry in read_dir_sorted(root)? {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        let (messages, file_count) = load_language_dir(&path)?;
        debug!(
            "Language '{}': {} messages from {} files",
            name,
            messages.len(),
            file_count
        );
        languages.push(LanguageMessages {
            name,
            messages,
            file_count,
        });
    }

    Ok(languages)
}
