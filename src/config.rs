//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::serial::SUPPORTED_BAUD_RATES;
use crate::victron::rotation::{SentenceTemplate, SentenceTemplates};

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub depth: DepthConfig,

    #[serde(default)]
    pub charger: ChargerConfig,
}

/// Depth instrument configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DepthConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Device node exposing the instrument's slave bus bytes
    #[serde(default = "default_depth_device")]
    pub device: String,
}

/// Charge controller configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ChargerConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default = "default_charger_port")]
    pub port: String,

    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,

    /// Sleep between serial reads while accumulating a block
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default)]
    pub sentences: SentenceConfig,
}

/// Per-marker custom sentence templates; an absent entry disables the marker
/// for custom output
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SentenceConfig {
    pub battery_voltage: Option<TemplateConfig>,
    pub panel_voltage: Option<TemplateConfig>,
    pub battery_current: Option<TemplateConfig>,
    pub panel_power: Option<TemplateConfig>,
    pub energy_total: Option<TemplateConfig>,
    pub energy_today: Option<TemplateConfig>,
    pub energy_yesterday: Option<TemplateConfig>,
}

/// One custom sentence template
#[derive(Debug, Deserialize, Clone)]
pub struct TemplateConfig {
    /// 6-character sentence type, e.g. "$SSMTW"
    pub template: String,

    /// Single unit character appended after the value
    pub unit: char,
}

// Default value functions
fn default_enabled() -> bool { true }
fn default_depth_device() -> String { "/dev/i2c-slave0".to_string() }
fn default_charger_port() -> String { "/dev/ttyAMA0".to_string() }
fn default_baud_rate() -> u32 { 19200 }
fn default_poll_interval_ms() -> u64 { 40 }

impl Default for DepthConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            device: default_depth_device(),
        }
    }
}

impl Default for ChargerConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            port: default_charger_port(),
            baud_rate: default_baud_rate(),
            poll_interval_ms: default_poll_interval_ms(),
            sentences: SentenceConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    ///
    /// * `Result<Config>` - Loaded and validated configuration
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    fn validate(&self) -> Result<()> {
        if self.depth.enabled && self.depth.device.is_empty() {
            return Err(crate::error::NmeaBridgeError::Config(
                toml::de::Error::custom("depth device cannot be empty when enabled"),
            ));
        }

        if self.charger.enabled && self.charger.port.is_empty() {
            return Err(crate::error::NmeaBridgeError::Config(
                toml::de::Error::custom("charger port cannot be empty when enabled"),
            ));
        }

        if !SUPPORTED_BAUD_RATES.contains(&self.charger.baud_rate) {
            return Err(crate::error::NmeaBridgeError::Config(
                toml::de::Error::custom(
                    "baud_rate must be one of: 4800, 9600, 19200, 38400, 57600, 115200",
                ),
            ));
        }

        if self.charger.poll_interval_ms == 0 || self.charger.poll_interval_ms > 1000 {
            return Err(crate::error::NmeaBridgeError::Config(
                toml::de::Error::custom("poll_interval_ms must be between 1 and 1000"),
            ));
        }

        for (name, entry) in [
            ("battery_voltage", &self.charger.sentences.battery_voltage),
            ("panel_voltage", &self.charger.sentences.panel_voltage),
            ("battery_current", &self.charger.sentences.battery_current),
            ("panel_power", &self.charger.sentences.panel_power),
            ("energy_total", &self.charger.sentences.energy_total),
            ("energy_today", &self.charger.sentences.energy_today),
            ("energy_yesterday", &self.charger.sentences.energy_yesterday),
        ] {
            if let Some(template) = entry {
                if template.template.len() != 6 {
                    return Err(crate::error::NmeaBridgeError::Config(
                        toml::de::Error::custom(format!(
                            "{} template must be exactly 6 characters",
                            name
                        )),
                    ));
                }
            }
        }

        Ok(())
    }
}

impl TemplateConfig {
    fn to_template(&self) -> SentenceTemplate {
        SentenceTemplate {
            template: self.template.clone(),
            unit: self.unit,
        }
    }
}

impl SentenceConfig {
    /// Convert into the runtime template set consumed by the decoder
    pub fn to_templates(&self) -> SentenceTemplates {
        SentenceTemplates {
            battery_voltage: self.battery_voltage.as_ref().map(TemplateConfig::to_template),
            panel_voltage: self.panel_voltage.as_ref().map(TemplateConfig::to_template),
            battery_current: self.battery_current.as_ref().map(TemplateConfig::to_template),
            panel_power: self.panel_power.as_ref().map(TemplateConfig::to_template),
            energy_total: self.energy_total.as_ref().map(TemplateConfig::to_template),
            energy_today: self.energy_today.as_ref().map(TemplateConfig::to_template),
            energy_yesterday: self.energy_yesterday.as_ref().map(TemplateConfig::to_template),
        }
    }
}
