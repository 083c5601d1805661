use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

use crate::error::ErrorCode;

/// File name looked up by [`load_config`].
pub const CONFIG_FILE: &str = "refcheck.toml";

/// Environment override for [`Tolerance::absolute`].
pub const ABS_TOLERANCE_ENV: &str = "REFCHECK_ABS_TOLERANCE";
/// Environment override for [`Tolerance::relative`].
pub const REL_TOLERANCE_ENV: &str = "REFCHECK_REL_TOLERANCE";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HarnessConfig {
    #[serde(default)]
    pub tolerance: Tolerance,
}

/// Allowed difference for [`within`](crate::check::within) checks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    #[serde(default = "default_absolute")]
    pub absolute: f64,
    #[serde(default)]
    pub relative: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            absolute: default_absolute(),
            relative: 0.0,
        }
    }
}

impl Tolerance {
    /// Validate tolerance bounds before use.
    ///
    /// # Errors
    ///
    /// Returns an error if either bound is negative, NaN or infinite.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [("absolute", self.absolute), ("relative", self.relative)] {
            if !value.is_finite() || value < 0.0 {
                bail!(
                    "{}: {} (tolerance.{field} = {value})",
                    ErrorCode::InvalidTolerance.code(),
                    ErrorCode::InvalidTolerance.message()
                );
            }
        }
        Ok(())
    }
}

impl HarnessConfig {
    /// Parse a config from TOML text. Missing sections fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML for this schema or
    /// the resulting tolerance is invalid.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config = toml::from_str::<Self>(content).with_context(|| {
            format!(
                "{}: {}",
                ErrorCode::ConfigParseError.code(),
                ErrorCode::ConfigParseError.message()
            )
        })?;
        config.tolerance.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(
        &mut self,
        absolute: Option<&str>,
        relative: Option<&str>,
    ) -> Result<()> {
        if let Some(raw) = absolute {
            self.tolerance.absolute = parse_override(ABS_TOLERANCE_ENV, raw)?;
        }
        if let Some(raw) = relative {
            self.tolerance.relative = parse_override(REL_TOLERANCE_ENV, raw)?;
        }
        Ok(())
    }
}

/// Load `refcheck.toml` from `root`, then apply environment overrides.
///
/// A missing file yields the defaults.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, an override is not
/// a number, or the final tolerance is invalid.
pub fn load_config(root: &Path) -> Result<HarnessConfig> {
    let path = root.join(CONFIG_FILE);
    let mut config = if path.exists() {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        HarnessConfig::from_toml_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?
    } else {
        HarnessConfig::default()
    };

    config.apply_env_overrides(
        env::var(ABS_TOLERANCE_ENV).ok().as_deref(),
        env::var(REL_TOLERANCE_ENV).ok().as_deref(),
    )?;
    config.tolerance.validate()?;

    tracing::debug!(
        absolute = config.tolerance.absolute,
        relative = config.tolerance.relative,
        "loaded harness config"
    );
    Ok(config)
}

fn parse_override(var: &str, raw: &str) -> Result<f64> {
    raw.trim().parse::<f64>().with_context(|| {
        format!(
            "{}: {var} must be a number, got {raw:?}",
            ErrorCode::ConfigParseError.code()
        )
    })
}

const fn default_absolute() -> f64 {
    1e-9
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_tight() {
        let config = HarnessConfig::default();
        assert!((config.tolerance.absolute - 1e-9).abs() < f64::EPSILON);
        assert!(config.tolerance.relative.abs() < f64::EPSILON);
    }

    #[test]
    fn empty_toml_uses_defaults() {
        let config = HarnessConfig::from_toml_str("").expect("empty config parses");
        assert_eq!(config, HarnessConfig::default());
    }

    #[test]
    fn partial_tolerance_section_keeps_other_default() {
        let config = HarnessConfig::from_toml_str("[tolerance]\nrelative = 0.01\n")
            .expect("partial config parses");
        assert!((config.tolerance.relative - 0.01).abs() < f64::EPSILON);
        assert!((config.tolerance.absolute - 1e-9).abs() < f64::EPSILON);
    }

    #[test]
    fn malformed_toml_reports_parse_code() {
        let err = HarnessConfig::from_toml_str("[tolerance\nabsolute = ")
            .expect_err("malformed toml");
        assert!(err.to_string().starts_with("E1002"), "{err}");
    }

    #[test]
    fn negative_tolerance_is_rejected() {
        let err = HarnessConfig::from_toml_str("[tolerance]\nabsolute = -1.0\n")
            .expect_err("negative tolerance");
        assert!(err.to_string().contains("E1003"), "{err}");
    }

    #[test]
    fn env_overrides_replace_file_values() {
        let mut config = HarnessConfig::from_toml_str("[tolerance]\nabsolute = 0.5\n")
            .expect("config parses");
        config
            .apply_env_overrides(Some("0.25"), Some(" 0.1 "))
            .expect("overrides parse");
        assert!((config.tolerance.absolute - 0.25).abs() < f64::EPSILON);
        assert!((config.tolerance.relative - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn unparsable_override_is_an_error() {
        let mut config = HarnessConfig::default();
        let err = config
            .apply_env_overrides(Some("tiny"), None)
            .expect_err("not a number");
        assert!(err.to_string().contains(ABS_TOLERANCE_ENV), "{err}");
    }
}
