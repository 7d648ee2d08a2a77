//! Defaults read from the configuration file.

use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::Context;
use serde::Deserialize;

use autopass::GenerationOptions;

const DEFAULT_LENGTH: usize = 16;

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Settings {
    pub length: usize,
    pub options: GenerationOptions,
    pub history: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            length: DEFAULT_LENGTH,
            options: GenerationOptions::default(),
            history: None,
        }
    }
}

/// Read the settings from `config_path`, or from `~/.autopass/config.yaml`.
///
/// A missing default file just means the defaults; a missing file that was asked for explicitly
/// is an error.
pub(crate) fn load_settings(config_path: Option<PathBuf>) -> anyhow::Result<Settings> {
    let (path, explicit) = match config_path {
        Some(p) => (p, true),
        None => match app_dir() {
            Ok(dir) => (dir.join("config.yaml"), false),
            Err(err) => {
                log::debug!("not reading a configuration file: {:#}", err);
                return Ok(Settings::default());
            }
        },
    };

    let contents = match fs::read_to_string(&path) {
        Ok(s) => s,
        Err(err) if err.kind() == io::ErrorKind::NotFound && !explicit => {
            log::debug!("no configuration at {}; using defaults", path.display());
            return Ok(Settings::default());
        }
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read configuration from {}", path.display()))
        }
    };
    parse_settings(&contents)
        .with_context(|| format!("failed to parse configuration at {}", path.display()))
}

fn parse_settings(contents: &str) -> anyhow::Result<Settings> {
    // An empty YAML document is `null`, not an empty map.
    if contents.trim().is_empty() {
        return Ok(Settings::default());
    }
    Ok(serde_yaml::from_str(contents)?)
}

/// The directory autopass keeps its files in.
pub(crate) fn app_dir() -> anyhow::Result<PathBuf> {
    let home = env::var_os("HOME")
        .ok_or_else(|| anyhow::anyhow!("HOME is not set; cannot find home directory of user"))?;
    let mut p = PathBuf::from(home);
    p.push(".autopass");
    Ok(p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_configuration_keeps_defaults() {
        let settings = parse_settings("length: 24\noptions:\n  symbols: false\n").unwrap();
        assert_eq!(settings.length, 24);
        assert!(settings.options.uppercase);
        assert!(settings.options.numbers);
        assert!(!settings.options.symbols);
        assert_eq!(settings.history, None);
    }

    #[test]
    fn empty_configuration() {
        let settings = parse_settings("").unwrap();
        assert_eq!(settings.length, DEFAULT_LENGTH);
        assert_eq!(settings.options, GenerationOptions::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(parse_settings("lenght: 10\n").is_err());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_settings(Some(dir.path().join("nope.yaml"))).is_err());
    }
}
