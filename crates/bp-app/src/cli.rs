use std::path::PathBuf;

use bp_core::SceneConfig;
use clap::Parser;

/// bpgfx : Braille dot graphics demo.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Fichier de configuration TOML. Défaut : config/default.toml.
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Largeur du canvas en dots (remplace la config).
    #[arg(long, allow_negative_numbers = true)]
    pub width: Option<i32>,

    /// Hauteur du canvas en dots (remplace la config).
    #[arg(long, allow_negative_numbers = true)]
    pub height: Option<i32>,

    /// FPS cible.
    #[arg(long)]
    pub fps: Option<u32>,

    /// Stop after this many frames. 0 runs until interrupted.
    #[arg(long, default_value_t = 0)]
    pub frames: u64,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded config.
    ///
    /// Dimensions are taken as given: a negative size is reported later by
    /// canvas construction rather than silently clamped.
    pub fn apply_overrides(&self, config: &mut SceneConfig) {
        if let Some(w) = self.width {
            config.width = w;
        }
        if let Some(h) = self.height {
            config.height = h;
        }
        if let Some(fps) = self.fps {
            config.target_fps = fps.clamp(1, 120);
        }
    }
}
