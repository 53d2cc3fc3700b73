use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::HoloResult;

/// Sensor sampling settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Orientation samples per second.
    pub update_hz: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self { update_hz: 60.0 }
    }
}

impl MotionConfig {
    pub const MIN_HZ: f64 = 1.0;
    pub const MAX_HZ: f64 = 240.0;

    /// The sampling rate clamped to [1, 240] Hz. Non-finite falls back to 60.
    pub fn update_hz(&self) -> f64 {
        if self.update_hz.is_finite() {
            self.update_hz.clamp(Self::MIN_HZ, Self::MAX_HZ)
        } else {
            MotionConfig::default().update_hz
        }
    }

    /// Time between two samples.
    pub fn interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / self.update_hz())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Raster pixels per surface point.
    pub scale: f32,
    /// Overrides every variant's default intensity when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intensity: Option<f32>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            intensity: None,
        }
    }
}

impl RenderConfig {
    pub fn scale(&self) -> f32 {
        if self.scale.is_finite() {
            self.scale.clamp(0.25, 4.0)
        } else {
            1.0
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
        }
    }
}

/// Contents of `holokit.toml`. Every section is optional.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct HoloConfig {
    #[serde(default)]
    pub motion: MotionConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl HoloConfig {
    pub const FILE_NAME: &'static str = "holokit.toml";

    pub fn from_toml_str(contents: &str) -> HoloResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load_from_file(path: &Path) -> HoloResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn save_to_file(&self, path: &Path) -> HoloResult<()> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HoloError;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = HoloConfig::from_toml_str("").unwrap();
        assert_eq!(config.motion.update_hz(), 60.0);
        assert_eq!(config.render.scale(), 1.0);
        assert_eq!(config.render.intensity, None);
        assert_eq!(config.output.dir, PathBuf::from("output"));
    }

    #[test]
    fn test_partial_sections() {
        let config = HoloConfig::from_toml_str(
            r#"
            [render]
            scale = 2.0
            intensity = 0.5
            "#,
        )
        .unwrap();
        assert_eq!(config.render.scale(), 2.0);
        assert_eq!(config.render.intensity, Some(0.5));
        assert_eq!(config.motion.update_hz(), 60.0);
    }

    #[test]
    fn test_section_with_one_key_keeps_other_defaults() {
        let config = HoloConfig::from_toml_str("[render]\nintensity = 0.5\n[motion]\n[output]\n").unwrap();
        assert_eq!(config.render.intensity, Some(0.5));
        assert_eq!(config.render.scale(), 1.0);
        assert_eq!(config.motion.update_hz(), 60.0);
        assert_eq!(config.output.dir, PathBuf::from("output"));

        let config = HoloConfig::from_toml_str("[motion]\nupdate_hz = 30.0").unwrap();
        assert_eq!(config.motion.update_hz(), 30.0);
        assert_eq!(config.render.intensity, None);
    }

    #[test]
    fn test_values_are_clamped() {
        let config = HoloConfig::from_toml_str(
            r#"
            [motion]
            update_hz = 1000.0
            [render]
            scale = 0.01
            "#,
        )
        .unwrap();
        assert_eq!(config.motion.update_hz(), 240.0);
        assert_eq!(config.render.scale(), 0.25);
    }

    #[test]
    fn test_interval_at_60hz() {
        let interval = MotionConfig::default().interval();
        assert!((interval.as_secs_f64() - 1.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = HoloConfig::from_toml_str("[motion\nupdate_hz = ").unwrap_err();
        assert!(matches!(err, HoloError::Config(_)));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = std::env::temp_dir().join(format!("holokit-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(HoloConfig::FILE_NAME);

        let mut config = HoloConfig::default();
        config.motion.update_hz = 30.0;
        config.output.dir = PathBuf::from("frames");
        config.save_to_file(&path).unwrap();

        let loaded = HoloConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.motion.update_hz(), 30.0);
        assert_eq!(loaded.output.dir, PathBuf::from("frames"));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
