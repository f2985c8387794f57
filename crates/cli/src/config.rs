//! `modlog.toml` configuration for the CLI.
//!
//! Every section and key is optional.
//!
//! ```toml
//! [parse]
//! max_errors = 10
//!
//! [output]
//! extension = "out"
//! ```

use std::path::{Path, PathBuf};

use modlog_core::ParseOptions;
use serde::Deserialize;

pub const DEFAULT_EXTENSION: &str = "out";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub parse: ParseSettings,
    #[serde(default)]
    pub output: OutputSettings,
}

/// `[parse]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParseSettings {
    /// Stop parsing after this many syntax errors.
    pub max_errors: Option<usize>,
}

/// `[output]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSettings {
    /// Extension appended to the source path by `modlog parse`.
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        OutputSettings {
            extension: default_extension(),
        }
    }
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_owned()
}

impl Config {
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            max_errors: self.parse.max_errors,
        }
    }

    /// `<source>.<extension>`, next to the source file.
    pub fn output_path(&self, source: &Path) -> PathBuf {
        let mut s = source.as_os_str().to_owned();
        s.push(".");
        s.push(&self.output.extension);
        PathBuf::from(s)
    }
}

/// Read and parse a config TOML file from `path`.
///
/// Returns a human-readable error string on failure.
pub fn read_config(path: &Path) -> Result<Config, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("could not read '{}': {}", path.display(), e))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| format!("could not parse '{}': {}", path.display(), e))?;

    if config.parse.max_errors == Some(0) {
        return Err(format!(
            "invalid '{}': parse.max_errors must be at least 1",
            path.display()
        ));
    }
    if config.output.extension.is_empty() {
        return Err(format!(
            "invalid '{}': output.extension must not be empty",
            path.display()
        ));
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.output.extension, "out");
        assert_eq!(config.parse_options(), ParseOptions::default());
    }

    #[test]
    fn sections_are_read() {
        let config: Config =
            toml::from_str("[parse]\nmax_errors = 3\n\n[output]\nextension = \"txt\"\n").unwrap();
        assert_eq!(config.parse_options().max_errors, Some(3));
        assert_eq!(
            config.output_path(Path::new("dir/prog.pl")),
            PathBuf::from("dir/prog.pl.txt")
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<Config>("[parse]\nmax_error = 3\n").is_err());
    }

    #[test]
    fn zero_error_limit_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("modlog.toml");
        std::fs::write(&path, "[parse]\nmax_errors = 0\n").unwrap();
        let err = read_config(&path).unwrap_err();
        assert!(err.contains("max_errors"), "{}", err);
    }
}
