// Tuning constants and map selection, loaded from a flat properties file

use std::path::Path;

/// Errors raised while reading a config file. There is no recovery path:
/// the bootstrap propagates these straight to process exit.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed line {line_no}: {line:?}")]
    Malformed { line_no: usize, line: String },

    #[error("bad value for {key}: {value:?}")]
    BadValue { key: String, value: String },
}

/// Physical tuning constants and map selection.
///
/// Desktop reads these from a `key = value` properties file; the Android and
/// browser shims use the hardcoded defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct PidginConfig {
    /// Downward gravity magnitude in m/s²
    pub gravity: f32,
    /// Upward impulse applied on jump
    pub jump_velocity: f32,
    /// Target horizontal speed in m/s while auto-running
    pub move_speed: f32,
    /// Collider density (mass follows from the box volume)
    pub density: f32,
    /// Player hitbox width in pixels
    pub pidgin_width: f32,
    /// Player hitbox height in pixels
    pub pidgin_height: f32,
    /// Map base name, resolved under the maps directory
    pub map: String,
}

impl Default for PidginConfig {
    fn default() -> Self {
        Self {
            gravity: 10.0,
            jump_velocity: 1.5,
            move_speed: 2.0,
            density: 0.5,
            pidgin_width: 32.0,
            pidgin_height: 48.0,
            map: "meadow".to_string(),
        }
    }
}

impl PidginConfig {
    /// Load a config from a flat properties file.
    ///
    /// `#` and `!` start comments, blank lines are skipped, unknown keys are
    /// ignored, missing keys keep their defaults. A value that fails to parse
    /// is a hard error.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_str(&text)
    }

    fn from_str(text: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }

            let (key, value) = line.split_once('=').ok_or_else(|| ConfigError::Malformed {
                line_no: idx + 1,
                line: raw.to_string(),
            })?;
            let (key, value) = (key.trim(), value.trim());

            match key {
                "gravity" => config.gravity = parse_float(key, value)?,
                "jumpVelocity" => config.jump_velocity = parse_float(key, value)?,
                "speed" => config.move_speed = parse_float(key, value)?,
                "mass" => config.density = parse_float(key, value)?,
                "pidginWidth" => config.pidgin_width = parse_float(key, value)?,
                "pidginHeight" => config.pidgin_height = parse_float(key, value)?,
                "map" => config.map = value.to_string(),
                _ => log::debug!("ignoring unknown config key {:?}", key),
            }
        }

        Ok(config)
    }
}

fn parse_float(key: &str, value: &str) -> Result<f32, ConfigError> {
    value.parse().map_err(|_| ConfigError::BadValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}
