use anyhow::{Context, Result, ensure};
use serde::Deserialize;
use std::path::Path;

/// Environment variable naming a JSON config file, used when no path is
/// passed on the command line.
pub const CONFIG_ENV: &str = "AVATAR_VIEW_CONFIG";

/// View framing and zoom limits, in logical view units.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewConfig {
    /// Lower edge of the fixed vertical span.
    pub view_logical_left: f32,
    /// Upper edge of the fixed vertical span.
    pub view_logical_right: f32,
    pub view_scale: f32,
    pub view_max_scale: f32,
    pub view_min_scale: f32,
    pub view_logical_max_left: f32,
    pub view_logical_max_right: f32,
    pub view_logical_max_bottom: f32,
    pub view_logical_max_top: f32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            view_logical_left: -1.0,
            view_logical_right: 1.0,
            view_scale: 1.0,
            view_max_scale: 2.0,
            view_min_scale: 0.8,
            view_logical_max_left: -2.0,
            view_logical_max_right: 2.0,
            view_logical_max_bottom: -2.0,
            view_logical_max_top: 2.0,
        }
    }
}

impl ViewConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.view_logical_left.is_finite()
                && self.view_logical_right.is_finite()
                && self.view_logical_right != self.view_logical_left,
            "vertical view span is empty ({} .. {})",
            self.view_logical_left,
            self.view_logical_right
        );
        ensure!(
            self.view_min_scale > 0.0,
            "viewMinScale must be positive, got {}",
            self.view_min_scale
        );
        ensure!(
            self.view_min_scale <= self.view_max_scale,
            "viewMinScale {} exceeds viewMaxScale {}",
            self.view_min_scale,
            self.view_max_scale
        );
        ensure!(
            self.view_scale > 0.0,
            "viewScale must be positive, got {}",
            self.view_scale
        );
        ensure!(
            self.view_logical_max_left < self.view_logical_max_right
                && self.view_logical_max_bottom < self.view_logical_max_top,
            "maximum view rectangle is empty"
        );
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    #[serde(flatten)]
    pub view: ViewConfig,
    /// Clear color, RGBA in 0..1.
    pub background_color: [f64; 4],
    /// Initial gaze target in view space.
    pub eyes_viewpoint: [f32; 2],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            view: ViewConfig::default(),
            background_color: [0.0, 0.0, 0.0, 0.0],
            eyes_viewpoint: [0.0, 0.0],
        }
    }
}

impl AppConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).context("malformed config JSON")?;
        config.view.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Loads from the first command line argument, then from
    /// [`CONFIG_ENV`], falling back to the defaults.
    pub fn from_args_or_env() -> Result<Self> {
        let path = std::env::args()
            .nth(1)
            .or_else(|| std::env::var(CONFIG_ENV).ok());
        match path {
            Some(path) => {
                log::info!("Loading config from {}", path);
                Self::load(path)
            }
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = AppConfig::from_json(r#"{ "viewMaxScale": 3.0, "eyesViewpoint": [0.0, 0.5] }"#)
            .unwrap();

        assert_eq!(config.view.view_max_scale, 3.0);
        assert_eq!(config.view.view_min_scale, 0.8);
        assert_eq!(config.view.view_logical_max_top, 2.0);
        assert_eq!(config.eyes_viewpoint, [0.0, 0.5]);
        assert_eq!(config.background_color, [0.0; 4]);
    }

    #[test]
    fn test_all_recognized_view_fields() {
        let config = AppConfig::from_json(
            r#"{
                "viewLogicalLeft": -2.0,
                "viewLogicalRight": 2.0,
                "viewScale": 1.5,
                "viewMaxScale": 4.0,
                "viewMinScale": 0.5,
                "viewLogicalMaxLeft": -3.0,
                "viewLogicalMaxRight": 3.0,
                "viewLogicalMaxBottom": -4.0,
                "viewLogicalMaxTop": 4.0
            }"#,
        )
        .unwrap();

        assert_eq!(
            config.view,
            ViewConfig {
                view_logical_left: -2.0,
                view_logical_right: 2.0,
                view_scale: 1.5,
                view_max_scale: 4.0,
                view_min_scale: 0.5,
                view_logical_max_left: -3.0,
                view_logical_max_right: 3.0,
                view_logical_max_bottom: -4.0,
                view_logical_max_top: 4.0,
            }
        );
    }

    #[test]
    fn test_rejects_inverted_scale_clamps() {
        let err = AppConfig::from_json(r#"{ "viewMinScale": 3.0, "viewMaxScale": 2.0 }"#)
            .unwrap_err();
        assert!(err.to_string().contains("exceeds"));
    }

    #[test]
    fn test_rejects_zero_min_scale() {
        assert!(AppConfig::from_json(r#"{ "viewMinScale": 0.0 }"#).is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(AppConfig::from_json("{ not json").is_err());
    }
}
