use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Configuration de la scène de démonstration.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use bp_core::config::SceneConfig;
/// let config = SceneConfig::default();
/// assert_eq!(config.width, 160);
/// assert_eq!(config.target_fps, 30);
/// ```
#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct SceneConfig {
    // === Canvas ===
    /// Canvas width in dots (two dots per terminal column).
    pub width: i32,
    /// Canvas height in dots (four dots per terminal row).
    pub height: i32,

    // === Timing ===
    /// FPS cible.
    pub target_fps: u32,
    /// Frames between two texture changes of the animated sprite.
    pub texture_period: u32,

    // === Scene ===
    /// Side length of the square sprite textures, in dots.
    pub texture_side: i32,
    /// Sine wave amplitude as a fraction of half the canvas height [0.0, 1.0].
    pub wave_scale: f32,
    /// Phase advance of the sine wave per horizontal dot, in degrees.
    pub wave_degrees_per_dot: f32,
    /// Draw the rectangular border around the canvas.
    pub show_border: bool,
    /// Draw the horizontal axis through the middle of the canvas.
    pub show_axis: bool,
    /// Draw the scrolling sine wave.
    pub show_wave: bool,
    /// Draw the line from the canvas centre to the sprite.
    pub show_follower: bool,
    /// Draw the bouncing animated sprite.
    pub show_sprite: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            width: 160,
            height: 120,
            target_fps: 30,
            texture_period: 15,
            texture_side: 5,
            wave_scale: 0.75,
            wave_degrees_per_dot: 2.0,
            show_border: true,
            show_axis: true,
            show_wave: true,
            show_follower: true,
            show_sprite: true,
        }
    }
}

impl SceneConfig {
    /// Clamp all numeric fields to their valid ranges.
    /// Called after TOML deserialization to prevent out-of-range values.
    pub fn clamp_all(&mut self) {
        self.width = self.width.clamp(0, 4096);
        self.height = self.height.clamp(0, 4096);
        self.target_fps = self.target_fps.clamp(1, 120);
        self.texture_period = self.texture_period.max(1);
        self.texture_side = self.texture_side.clamp(1, 64);
        self.wave_scale = self.wave_scale.clamp(0.0, 1.0);
        self.wave_degrees_per_dot = self.wave_degrees_per_dot.clamp(0.0, 90.0);
    }

    /// Check that the scene fits on its canvas.
    ///
    /// The sprite bounces one dot inside the border, so the canvas must leave
    /// at least that much room around a texture.
    ///
    /// # Errors
    /// Returns [`CoreError::Config`] when the sprite cannot fit.
    ///
    /// # Example
    /// ```
    /// use bp_core::config::SceneConfig;
    /// let mut config = SceneConfig::default();
    /// assert!(config.validate().is_ok());
    /// config.width = 4;
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), CoreError> {
        let needed = self.texture_side + 4;
        if self.show_sprite && (self.width < needed || self.height < needed) {
            return Err(CoreError::Config(format!(
                "canvas {}×{} trop petit pour un sprite de {} (minimum {needed}×{needed})",
                self.width, self.height, self.texture_side
            )));
        }
        Ok(())
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    canvas: Option<CanvasSection>,
    scene: Option<SceneSection>,
}

/// Canvas section of the TOML config, all fields optional for partial override.
#[derive(Deserialize)]
struct CanvasSection {
    width: Option<i32>,
    height: Option<i32>,
}

/// Scene section of the TOML config, all fields optional.
#[derive(Deserialize)]
struct SceneSection {
    target_fps: Option<u32>,
    texture_period: Option<u32>,
    texture_side: Option<i32>,
    wave_scale: Option<f32>,
    wave_degrees_per_dot: Option<f32>,
    show_border: Option<bool>,
    show_axis: Option<bool>,
    show_wave: Option<bool>,
    show_follower: Option<bool>,
    show_sprite: Option<bool>,
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use bp_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<SceneConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Erreur de config dans {}", path.display()))
}

/// Parse TOML text into a [`SceneConfig`], starting from the defaults.
///
/// # Errors
/// Returns an error if the text is not valid TOML for this schema.
///
/// # Example
/// ```
/// use bp_core::config::parse_config;
/// let config = parse_config("[canvas]\nwidth = 80\n").unwrap();
/// assert_eq!(config.width, 80);
/// assert_eq!(config.height, 120);
/// ```
pub fn parse_config(content: &str) -> Result<SceneConfig> {
    let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;

    let mut config = SceneConfig::default();

    if let Some(c) = file.canvas {
        if let Some(v) = c.width {
            config.width = v;
        }
        if let Some(v) = c.height {
            config.height = v;
        }
    }

    if let Some(s) = file.scene {
        if let Some(v) = s.target_fps {
            config.target_fps = v;
        }
        if let Some(v) = s.texture_period {
            config.texture_period = v;
        }
        if let Some(v) = s.texture_side {
            config.texture_side = v;
        }
        if let Some(v) = s.wave_scale {
            config.wave_scale = v;
        }
        if let Some(v) = s.wave_degrees_per_dot {
            config.wave_degrees_per_dot = v;
        }
        if let Some(v) = s.show_border {
            config.show_border = v;
        }
        if let Some(v) = s.show_axis {
            config.show_axis = v;
        }
        if let Some(v) = s.show_wave {
            config.show_wave = v;
        }
        if let Some(v) = s.show_follower {
            config.show_follower = v;
        }
        if let Some(v) = s.show_sprite {
            config.show_sprite = v;
        }
    }

    if config.width < 0 || config.height < 0 {
        log::warn!(
            "Dimensions négatives {}×{} ramenées à zéro",
            config.width,
            config.height
        );
    }
    config.clamp_all();
    Ok(config)
}
