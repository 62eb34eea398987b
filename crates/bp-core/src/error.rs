use thiserror::Error;

/// Errors originating from canvas and texture construction or addressing.
///
/// Canvas dot access never produces one of these: off-canvas reads and
/// writes are clipped, not rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Negative width/height requested for a canvas or texture.
    #[error("Dimensions invalides : {width}×{height}")]
    InvalidDimension {
        /// Requested width.
        width: i32,
        /// Requested height.
        height: i32,
    },

    /// Texture coordinate outside the texture's fixed extent.
    #[error("Coordonnée ({x}, {y}) hors de la texture {width}×{height}")]
    IndexOutOfRange {
        /// Offending x.
        x: i32,
        /// Offending y.
        y: i32,
        /// Texture width.
        width: i32,
        /// Texture height.
        height: i32,
    },

    /// Character outside the Unicode Braille Patterns block (U+2800..=U+28FF).
    #[error("Caractère non Braille : {ch:?}")]
    NotBraille {
        /// The rejected character.
        ch: char,
    },

    /// An animated sprite needs at least one texture.
    #[error("Animation sans texture")]
    EmptyAnimation,

    /// Invalid configuration value or structure.
    #[error("Configuration invalide : {0}")]
    Config(String),
}
