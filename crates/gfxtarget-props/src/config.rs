//! `gfxtarget.toml` configuration files.
//!
//! A project may pin overrides in a config file instead of the environment:
//!
//! ```toml
//! [overrides]
//! device-arch = "gfx906:sramecc+:xnack-"
//! enforce-device = "gfx906"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TargetError};
use crate::overrides::{OverrideKey, OverrideSource};

/// File name searched for by [`find_config`].
pub const CONFIG_FILE_NAME: &str = "gfxtarget.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TargetConfig {
    #[serde(default)]
    pub overrides: OverrideTable,
}

/// The `[overrides]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OverrideTable {
    /// Raw device identifier to use instead of the device's own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_arch: Option<String>,
    /// Architecture name to use verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enforce_device: Option<String>,
}

impl OverrideSource for TargetConfig {
    fn lookup(&self, key: OverrideKey) -> Option<String> {
        match key {
            OverrideKey::DeviceArch => self.overrides.device_arch.clone(),
            OverrideKey::EnforceDevice => self.overrides.enforce_device.clone(),
        }
    }
}

/// Parse a configuration from a TOML string.
pub fn parse_config(toml_str: &str) -> Result<TargetConfig> {
    let config: TargetConfig = toml::from_str(toml_str)?;
    Ok(config)
}

/// Load a configuration file.
pub fn load_config(path: &Path) -> Result<TargetConfig> {
    if !path.exists() {
        return Err(TargetError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Serialize a configuration to pretty TOML.
pub fn config_to_toml(config: &TargetConfig) -> Result<String> {
    let toml_str = toml::to_string_pretty(config)?;
    Ok(toml_str)
}

/// Search upward from `start_dir` for [`CONFIG_FILE_NAME`].
///
/// Returns the parsed configuration and the path it was read from.
pub fn find_config(start_dir: &Path) -> Result<Option<(TargetConfig, PathBuf)>> {
    let mut dir = start_dir.to_path_buf();
    loop {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            let config = load_config(&candidate)?;
            log::debug!("loaded overrides from {}", candidate.display());
            return Ok(Some((config, candidate)));
        }
        if !dir.pop() {
            break;
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overrides::override_value;

    #[test]
    fn parse_full_config() {
        let config = parse_config(
            r#"
[overrides]
device-arch = "gfx906:sramecc-"
enforce-device = "gfx908"
"#,
        )
        .unwrap();
        assert_eq!(config.overrides.device_arch.as_deref(), Some("gfx906:sramecc-"));
        assert_eq!(config.lookup(OverrideKey::EnforceDevice).as_deref(), Some("gfx908"));
    }

    #[test]
    fn parse_empty_config() {
        let config = parse_config("").unwrap();
        assert_eq!(config, TargetConfig::default());
        assert_eq!(config.lookup(OverrideKey::DeviceArch), None);
    }

    #[test]
    fn empty_string_in_file_is_unset() {
        let config = parse_config("[overrides]\nenforce-device = \"\"\n").unwrap();
        assert_eq!(config.lookup(OverrideKey::EnforceDevice).as_deref(), Some(""));
        assert_eq!(override_value(&config, OverrideKey::EnforceDevice), None);
    }

    #[test]
    fn parse_invalid_returns_error() {
        assert!(matches!(
            parse_config("[overrides\n").unwrap_err(),
            TargetError::Toml(_)
        ));
        assert!(parse_config("[overrides]\ndevice-arch = 3\n").is_err());
    }

    #[test]
    fn round_trip() {
        let config = TargetConfig {
            overrides: OverrideTable {
                device_arch: Some("gfx90a:xnack+".into()),
                enforce_device: None,
            },
        };
        let toml_str = config_to_toml(&config).unwrap();
        assert!(!toml_str.contains("enforce-device"));
        assert_eq!(parse_config(&toml_str).unwrap(), config);
    }

    #[test]
    fn load_not_found() {
        let result = load_config(Path::new("/nonexistent/gfxtarget.toml"));
        assert!(matches!(result.unwrap_err(), TargetError::NotFound { .. }));
    }

    #[test]
    fn find_config_searches_parents() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[overrides]\nenforce-device = \"gfx1030\"\n",
        )
        .unwrap();

        let (config, path) = find_config(&nested).unwrap().unwrap();
        assert_eq!(path, dir.path().join(CONFIG_FILE_NAME));
        assert_eq!(config.overrides.enforce_device.as_deref(), Some("gfx1030"));
    }

    #[test]
    fn find_config_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "not toml [[[").unwrap();
        assert!(find_config(dir.path()).is_err());
    }
}
