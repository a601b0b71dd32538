use anyhow::{bail, Context};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default read size for streaming input
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Settings that may come from a TOML file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub decode: Option<bool>,
    /// Symbols per output line when encoding, 0 for no line breaks
    pub wrap: Option<usize>,
    pub buffer_size: Option<usize>,
    /// e.g., "info", "debug"
    pub log_level: Option<String>,
}

impl FileConfig {
    pub fn read(path: &Path) -> anyhow::Result<Self> {
        let s = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        toml::from_str(&s).with_context(|| format!("parse TOML in {}", path.display()))
    }
}

/// Settings given on the command line. These win over the file.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// `Some(false)` forces encoding over the file's setting
    pub decode: Option<bool>,
    pub wrap: Option<usize>,
    pub buffer_size: Option<usize>,
    pub log_level: Option<String>,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

/// The resolved settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub decode: bool,
    pub wrap: usize,
    pub buffer_size: usize,
    pub log_level: String,

    /// `None` reads stdin
    pub input: Option<PathBuf>,

    /// `None` writes stdout
    pub output: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            decode: false,
            wrap: 0,
            buffer_size: DEFAULT_BUFFER_SIZE,
            log_level: "warn".into(),
            input: None,
            output: None,
        }
    }
}

impl Config {
    /// Defaults, then the file, then the command line
    pub fn merge(file: Option<FileConfig>, cli: CliOverrides) -> anyhow::Result<Self> {
        let mut c = Config::default();
        if let Some(f) = file {
            if let Some(v) = f.decode {
                c.decode = v;
            }
            if let Some(v) = f.wrap {
                c.wrap = v;
            }
            if let Some(v) = f.buffer_size {
                c.buffer_size = v;
            }
            if let Some(v) = f.log_level {
                c.log_level = v;
            }
        }

        if let Some(v) = cli.decode {
            c.decode = v;
        }
        if let Some(v) = cli.wrap {
            c.wrap = v;
        }
        if let Some(v) = cli.buffer_size {
            c.buffer_size = v;
        }
        if let Some(v) = cli.log_level {
            c.log_level = v;
        }
        c.input = cli.input;
        c.output = cli.output;

        if c.buffer_size == 0 {
            bail!("buffer size must be greater than 0");
        }
        Ok(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_without_file() {
        let c = Config::merge(None, CliOverrides::default()).unwrap();
        assert_eq!(c, Config::default());
    }

    #[test]
    fn command_line_wins_over_file() {
        let file = FileConfig {
            decode: Some(true),
            wrap: Some(76),
            buffer_size: Some(1024),
            log_level: Some("debug".into()),
        };
        let cli = CliOverrides {
            wrap: Some(0),
            log_level: Some("trace".into()),
            ..Default::default()
        };
        let c = Config::merge(Some(file), cli).unwrap();
        assert!(c.decode);
        assert_eq!(c.wrap, 0);
        assert_eq!(c.buffer_size, 1024);
        assert_eq!(c.log_level, "trace");
    }

    #[test]
    fn command_line_can_switch_back_to_encoding() {
        let file = FileConfig {
            decode: Some(true),
            ..Default::default()
        };
        let cli = CliOverrides {
            decode: Some(false),
            ..Default::default()
        };
        assert!(!Config::merge(Some(file.clone()), cli).unwrap().decode);

        // Leaving the mode off the command line keeps the file's choice
        assert!(Config::merge(Some(file), CliOverrides::default()).unwrap().decode);
    }

    #[test]
    fn zero_buffer_size_is_rejected() {
        let cli = CliOverrides {
            buffer_size: Some(0),
            ..Default::default()
        };
        assert!(Config::merge(None, cli).is_err());
    }

    #[test]
    fn reads_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "wrap = 64\nlog_level = \"info\"").unwrap();
        let parsed = FileConfig::read(file.path()).unwrap();
        assert_eq!(parsed.wrap, Some(64));
        assert_eq!(parsed.log_level.as_deref(), Some("info"));
        assert_eq!(parsed.decode, None);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "wrapp = 64").unwrap();
        let err = FileConfig::read(file.path()).unwrap_err();
        assert!(err.to_string().starts_with("parse TOML"));
    }
}
