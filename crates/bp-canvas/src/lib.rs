//! Braille dot canvas for bpgfx.
//!
//! A [`Canvas`] is a boolean dot grid rendered as Unicode Braille Patterns,
//! one character per 2×4 block. Shapes implement [`Drawable`] and stamp
//! themselves through the canvas dot API, which clips at the edges.

pub mod braille;
pub mod canvas;
pub mod grid;
pub mod line;
pub mod shapes;
pub mod sprite;

pub use canvas::Canvas;
pub use line::{Line, LinePoints};
pub use shapes::{Drawable, Point, Rectangle, Shape};
pub use sprite::{AnimatedSprite, Sprite, Texture};
