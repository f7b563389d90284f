use crate::error::ConfigError;
use crate::graph::{Point, Size};
use serde::{Deserialize, Serialize};
use std::fs;

/// Zoom limits for the canvas viewport.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ZoomConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub initial: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min: 0.5,
            max: 2.0,
            step: 0.1,
            initial: 1.0,
        }
    }
}

impl ZoomConfig {
    /// Checks that the range is positive and ordered, and that `initial`
    /// lies inside it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [self.min, self.max, self.step, self.initial]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(ConfigError::Invalid(
                "zoom limits must be finite numbers".to_string(),
            ));
        }
        if self.min <= 0.0 || self.min > self.max {
            return Err(ConfigError::Invalid(format!(
                "zoom range {}..{} is invalid",
                self.min, self.max
            )));
        }
        if self.initial < self.min || self.initial > self.max {
            return Err(ConfigError::Invalid(format!(
                "initial zoom {} lies outside {}..{}",
                self.initial, self.min, self.max
            )));
        }
        if self.step <= 0.0 {
            return Err(ConfigError::Invalid("zoom step must be positive".to_string()));
        }
        Ok(())
    }
}

/// Tunables shared by the graph engine components.
///
/// Every field has a default, so a partial JSON document such as
/// `{"collapsedAnchorOffset": 24}` is a valid configuration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Where freshly dropped nodes are placed, in canvas space.
    pub default_position: Point,
    /// Initial size of a prompt node.
    pub prompt_size: Size,
    /// Initial size of a data-source node.
    pub data_source_size: Size,
    /// Vertical anchor offset used for collapsed nodes (the header row).
    pub collapsed_anchor_offset: f64,
    pub zoom: ZoomConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_position: Point::new(100.0, 100.0),
            prompt_size: Size::new(300.0, 200.0),
            data_source_size: Size::new(280.0, 160.0),
            collapsed_anchor_offset: 30.0,
            zoom: ZoomConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parses and validates a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&content)
    }

    /// Checks that sizes are positive and the zoom range is coherent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (label, size) in [
            ("promptSize", self.prompt_size),
            ("dataSourceSize", self.data_source_size),
        ] {
            if size.width <= 0.0 || size.height <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{} must be positive, got {}x{}",
                    label, size.width, size.height
                )));
            }
        }
        if self.collapsed_anchor_offset < 0.0 {
            return Err(ConfigError::Invalid(
                "collapsedAnchorOffset cannot be negative".to_string(),
            ));
        }

        self.zoom.validate()
    }
}
