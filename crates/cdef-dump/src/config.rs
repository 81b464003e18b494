//! `cdef.toml` loading.

use std::path::{Path, PathBuf};

use cdef_syntax::ParserConfig;
use serde::Deserialize;
use tracing::warn;

/// File looked up in the working directory when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = "cdef.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    parser: ParserSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ParserSection {
    max_depth: Option<usize>,
    max_iterations: Option<usize>,
}

impl From<ParserSection> for ParserConfig {
    fn from(section: ParserSection) -> Self {
        let defaults = ParserConfig::default();
        Self {
            max_depth: section.max_depth.unwrap_or(defaults.max_depth),
            max_iterations: section.max_iterations.unwrap_or(defaults.max_iterations),
        }
    }
}

/// Loads parser limits from `explicit`, or from `cdef.toml` in `root` if present.
pub fn load(explicit: Option<&Path>, root: &Path) -> ParserConfig {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let candidate: PathBuf = root.join(CONFIG_FILE_NAME);
            if !candidate.is_file() {
                return ParserConfig::default();
            }
            candidate
        }
    };
    let Ok(contents) = std::fs::read_to_string(&path) else {
        warn!("Failed to read cdef config at {}", path.display());
        return ParserConfig::default();
    };
    from_contents(Some(&path), &contents)
}

pub fn from_contents(path: Option<&Path>, contents: &str) -> ParserConfig {
    match toml::from_str::<ConfigFile>(contents) {
        Ok(parsed) => parsed.parser.into(),
        Err(err) => {
            if let Some(path) = path {
                warn!("Failed to parse cdef config at {}: {err}", path.display());
            } else {
                warn!("Failed to parse cdef config: {err}");
            }
            ParserConfig::default()
        }
    }
}
