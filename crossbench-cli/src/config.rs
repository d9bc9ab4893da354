//! Configuration loading from crossbench.toml
//!
//! Harness settings can be specified in a `crossbench.toml` file,
//! discovered by walking up from the current directory. Everything has a
//! sensible default, so the file is optional.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Harness configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HarnessConfig {
    /// Verification settings
    #[serde(default)]
    pub verify: VerifyConfig,
    /// Output and artifact settings
    #[serde(default)]
    pub output: OutputConfig,
    /// Chart dimensions
    #[serde(default)]
    pub visuals: VisualsConfig,
}

/// Verification settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyConfig {
    /// Baseline implementation every candidate is diffed against
    #[serde(default = "default_baseline")]
    pub baseline: String,
    /// Output artifact each implementation writes into its own directory
    #[serde(default = "default_artifact")]
    pub artifact: String,
    /// Header token the only tolerated conflicting lines must start with
    #[serde(default = "default_header_token")]
    pub header_token: String,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            baseline: default_baseline(),
            artifact: default_artifact(),
            header_token: default_header_token(),
        }
    }
}

fn default_baseline() -> String {
    "python".to_string()
}
fn default_artifact() -> String {
    "reference.patch".to_string()
}
fn default_header_token() -> String {
    "# Results".to_string()
}

/// Output and artifact settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory persisted artifacts are written to
    #[serde(default = "default_results_dir")]
    pub directory: String,
    /// External SVG-to-PNG converter program
    #[serde(default = "default_png_converter")]
    pub png_converter: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_results_dir(),
            png_converter: default_png_converter(),
        }
    }
}

fn default_results_dir() -> String {
    "Results".to_string()
}
fn default_png_converter() -> String {
    "rsvg-convert".to_string()
}

/// Chart dimensions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisualsConfig {
    /// Chart width in pixels
    #[serde(default = "default_width")]
    pub width: u32,
    /// Chart height in pixels
    #[serde(default = "default_height")]
    pub height: u32,
}

impl Default for VisualsConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

fn default_width() -> u32 {
    1280
}
fn default_height() -> u32 {
    720
}

impl HarnessConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from the
    /// current directory
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join("crossbench.toml");
            if config_path.exists() {
                return Self::load(&config_path).ok();
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r##"# Crossbench Configuration

[verify]
# Baseline implementation every candidate is diffed against
baseline = "python"
# Output artifact each implementation writes into its own directory
artifact = "reference.patch"
# Only conflicting lines starting with this token are tolerated
header_token = "# Results"

[output]
# Directory persisted artifacts are written to
directory = "Results"
# External SVG-to-PNG converter
png_converter = "rsvg-convert"

[visuals]
# Chart dimensions in pixels
width = 1280
height = 720
"##
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HarnessConfig::default();
        assert_eq!(config.verify.baseline, "python");
        assert_eq!(config.verify.artifact, "reference.patch");
        assert_eq!(config.output.directory, "Results");
        assert_eq!(config.visuals.width, 1280);
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
            [verify]
            baseline = "rust"

            [output]
            directory = "out"
        "#;

        let config: HarnessConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.verify.baseline, "rust");
        assert_eq!(config.output.directory, "out");
        // Defaults should still apply
        assert_eq!(config.verify.header_token, "# Results");
        assert_eq!(config.output.png_converter, "rsvg-convert");
    }

    #[test]
    fn test_default_toml_parses() {
        let default_toml = HarnessConfig::default_toml();
        let config: HarnessConfig = toml::from_str(&default_toml).unwrap();
        assert_eq!(config.verify.baseline, "python");
    }
}
