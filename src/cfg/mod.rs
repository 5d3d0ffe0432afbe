use anyhow::Result;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directive keys whose targets exist on disk and therefore participate in
/// clean mode.
pub const PATH_DIRECTIVES: &[&str] = &["link", "copy", "git_repos", "directories"];

/// Top-level key holding the OS-conditional sub-documents.
pub const SYSTEM_KEY: &str = "system";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("config root must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    #[error("directive '{key}' expects {expected}")]
    BadShape { key: String, expected: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    Macos,
}

impl Platform {
    pub fn detect() -> Self {
        match os_info::get().os_type() {
            os_info::Type::Macos => Platform::Macos,
            _ => Platform::Linux,
        }
    }

    /// Key spellings accepted under `system` for this platform. Configs
    /// written for the original tool use `Linux`/`Darwin`.
    pub fn section_keys(self) -> &'static [&'static str] {
        match self {
            Platform::Linux => &["Linux", "linux"],
            Platform::Macos => &["Darwin", "darwin", "macos"],
        }
    }
}

/// A parsed configuration file. Top-level keys are kept as an explicit
/// ordered list so that directives execute in the order they are written.
#[derive(Debug, Clone)]
pub struct Document {
    entries: Vec<(String, Value)>,
}

impl Document {
    pub fn from_value(root: Value) -> Result<Self, ConfigError> {
        match root {
            Value::Object(map) => Ok(Document {
                entries: map.into_iter().collect(),
            }),
            other => Err(ConfigError::NotAnObject {
                found: json_type_name(&other),
            }),
        }
    }

    /// Top-level keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Top-level keys in reverse declaration order, for clean mode.
    pub fn keys_reversed(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().rev().map(|(key, _)| key.as_str())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, value)| value)
    }

    /// The OS-conditional sub-document for the given platform, if present.
    pub fn system_section(&self, platform: Platform) -> Option<Document> {
        let system = self.get(SYSTEM_KEY)?.as_object()?;

        for key in platform.section_keys() {
            if let Some(sub) = system.get(*key).and_then(Value::as_object) {
                return Some(Document {
                    entries: sub.clone().into_iter().collect(),
                });
            }
        }

        None
    }

    /// A list-valued directive at this document level only (no
    /// OS-conditional merge).
    pub fn local_list(&self, key: &str) -> Result<Vec<String>, ConfigError> {
        let mut items = Vec::new();
        collect_list(self.get(key), key, &mut items)?;
        Ok(items)
    }

    /// A mapping-valued directive at this document level only, flattened to
    /// ordered pairs.
    pub fn local_map(&self, key: &str) -> Result<Vec<(String, String)>, ConfigError> {
        let mut pairs = Vec::new();
        collect_map(self.get(key), key, &mut pairs)?;
        Ok(pairs)
    }

    /// A list-valued directive (`directories`, `commands`, package lists).
    /// OS-conditional entries are appended after the unconditional ones.
    pub fn list_section(&self, key: &str, platform: Platform) -> Result<Vec<String>, ConfigError> {
        let mut items = self.local_list(key)?;

        if let Some(system) = self.system_section(platform) {
            items.extend(system.local_list(key)?);
        }

        Ok(items)
    }

    /// A mapping-valued directive (`link`, `copy`, `git_repos`).
    /// OS-conditional entries override unconditional ones sharing a source;
    /// new sources are appended.
    pub fn map_section(
        &self,
        key: &str,
        platform: Platform,
    ) -> Result<Vec<(String, String)>, ConfigError> {
        let mut pairs = self.local_map(key)?;

        if let Some(system) = self.system_section(platform) {
            for (src, dest) in system.local_map(key)? {
                match pairs.iter_mut().find(|(existing, _)| *existing == src) {
                    Some(slot) => slot.1 = dest,
                    None => pairs.push((src, dest)),
                }
            }
        }

        Ok(pairs)
    }
}

/// Load a config file. Returns the parsed document together with the
/// canonicalized directory it lives in, which relative paths in the config
/// resolve against.
pub fn load(path: &Path) -> Result<(Document, PathBuf)> {
    let path = PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned());

    let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;

    let root: Value = serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.clone(),
        source,
    })?;

    let document = Document::from_value(root)?;

    let base_dir = path
        .canonicalize()
        .map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("/"));

    Ok((document, base_dir))
}

fn collect_list(
    value: Option<&Value>,
    key: &str,
    items: &mut Vec<String>,
) -> Result<(), ConfigError> {
    let Some(value) = value else {
        return Ok(());
    };

    let array = value.as_array().ok_or_else(|| ConfigError::BadShape {
        key: key.to_string(),
        expected: "an array of strings",
    })?;

    for item in array {
        let entry = item.as_str().ok_or_else(|| ConfigError::BadShape {
            key: key.to_string(),
            expected: "an array of strings",
        })?;
        items.push(entry.to_string());
    }

    Ok(())
}

fn collect_map(
    value: Option<&Value>,
    key: &str,
    pairs: &mut Vec<(String, String)>,
) -> Result<(), ConfigError> {
    let Some(value) = value else {
        return Ok(());
    };

    let object = value.as_object().ok_or_else(|| ConfigError::BadShape {
        key: key.to_string(),
        expected: "an object of source to destination strings",
    })?;

    for (src, dest) in object {
        let dest = dest.as_str().ok_or_else(|| ConfigError::BadShape {
            key: key.to_string(),
            expected: "an object of source to destination strings",
        })?;
        pairs.push((src.clone(), dest.to_string()));
    }

    Ok(())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
