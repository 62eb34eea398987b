use std::fmt;

use bp_core::CoreError;

use crate::braille;
use crate::grid::DotGrid;
use crate::shapes::Drawable;

/// Dot-addressable drawing surface rendered as Braille text.
///
/// Coordinates are signed so shapes may extend past any edge: reads outside
/// `[0, width) × [0, height)` return `false` and writes there are dropped.
///
/// # Example
/// ```
/// use bp_canvas::Canvas;
/// let mut canvas = Canvas::new(2, 4).unwrap();
/// canvas.set_dot(0, 0, true);
/// canvas.set_dot(-1, 9, true); // clipped
/// assert_eq!(canvas.render(), "⠁\n");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Canvas {
    width: i32,
    height: i32,
    grid: DotGrid,
}

impl Canvas {
    /// Crée un canvas de `width × height` dots, tous baissés.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimension`] if either side is negative or
    /// the dot buffer cannot be allocated.
    ///
    /// # Example
    /// ```
    /// use bp_canvas::Canvas;
    /// assert!(Canvas::new(-1, 4).is_err());
    /// let canvas = Canvas::new(5, 5).unwrap();
    /// assert_eq!((canvas.width(), canvas.height()), (5, 5));
    /// ```
    pub fn new(width: i32, height: i32) -> Result<Self, CoreError> {
        let (Ok(w), Ok(h)) = (usize::try_from(width), usize::try_from(height)) else {
            return Err(CoreError::InvalidDimension { width, height });
        };
        let Some(grid) = DotGrid::new(w, h) else {
            log::warn!("Allocation impossible pour un canvas {width}×{height}");
            return Err(CoreError::InvalidDimension { width, height });
        };
        log::debug!(
            "Canvas {width}×{height} ({}×{} dots alloués)",
            grid.dots_width(),
            grid.dots_height()
        );
        Ok(Self {
            width,
            height,
            grid,
        })
    }

    /// Requested width in dots, padding excluded.
    #[inline]
    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Requested height in dots, padding excluded.
    #[inline]
    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Braille characters per line and number of lines in the rendering.
    ///
    /// # Example
    /// ```
    /// use bp_canvas::Canvas;
    /// let canvas = Canvas::new(160, 120).unwrap();
    /// assert_eq!(canvas.cell_size(), (80, 30));
    /// ```
    #[must_use]
    pub fn cell_size(&self) -> (usize, usize) {
        self.grid.cells()
    }

    #[inline(always)]
    fn in_bounds(&self, x: i32, y: i32) -> Option<(usize, usize)> {
        if (0..self.width).contains(&x) && (0..self.height).contains(&y) {
            Some((x.unsigned_abs() as usize, y.unsigned_abs() as usize))
        } else {
            None
        }
    }

    /// Read a dot. Off-canvas coordinates always read `false`.
    #[inline]
    #[must_use]
    pub fn get_dot(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y)
            .is_some_and(|(x, y)| self.grid.get(x, y))
    }

    /// Write a dot. Off-canvas coordinates are silently clipped.
    #[inline]
    pub fn set_dot(&mut self, x: i32, y: i32, raised: bool) {
        if let Some((x, y)) = self.in_bounds(x, y) {
            self.grid.set(x, y, raised);
        }
    }

    /// Set every dot, including the padding of partial cells, to `raised`.
    pub fn clear(&mut self, raised: bool) {
        self.grid.fill(raised);
    }

    /// Stamp a shape onto the canvas.
    ///
    /// # Example
    /// ```
    /// use bp_canvas::{Canvas, Line, Point};
    /// let mut canvas = Canvas::new(4, 4).unwrap();
    /// canvas.draw(&Line::new(Point::new(0, 0), Point::new(3, 0)));
    /// assert!(canvas.get_dot(2, 0));
    /// ```
    pub fn draw<D: Drawable + ?Sized>(&mut self, drawable: &D) {
        drawable.draw(self);
    }

    /// Render into a fresh string.
    #[must_use]
    pub fn render(&self) -> String {
        let (columns, rows) = self.cell_size();
        // 3 bytes per Braille char in UTF-8, plus the newline.
        let mut out = String::with_capacity(rows * (columns * 3 + 1));
        self.render_into(&mut out);
        out
    }

    /// Render into `out`, replacing its contents and reusing its allocation.
    pub fn render_into(&self, out: &mut String) {
        out.clear();
        let (columns, rows) = self.cell_size();
        for cy in 0..rows {
            for cx in 0..columns {
                out.push(braille::encode(self.grid.cell_bits(cx, cy)));
            }
            out.push('\n');
        }
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (columns, rows) = self.cell_size();
        for cy in 0..rows {
            for cx in 0..columns {
                fmt::Write::write_char(f, braille::encode(self.grid.cell_bits(cx, cy)))?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Canvas({}x{})\n{self}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_dots(canvas: &Canvas) -> Vec<bool> {
        let mut dots = Vec::new();
        for y in 0..canvas.height() {
            for x in 0..canvas.width() {
                dots.push(canvas.get_dot(x, y));
            }
        }
        dots
    }

    #[test]
    fn reports_requested_size_and_starts_blank() {
        for (w, h) in [(0, 0), (1, 1), (5, 5), (7, 13), (160, 120)] {
            let canvas = Canvas::new(w, h).unwrap();
            assert_eq!((canvas.width(), canvas.height()), (w, h));
            assert!(all_dots(&canvas).iter().all(|&d| !d));
        }
    }

    #[test]
    fn negative_dimensions_are_rejected() {
        assert_eq!(
            Canvas::new(3, -1),
            Err(CoreError::InvalidDimension {
                width: 3,
                height: -1
            })
        );
        assert!(Canvas::new(-4, 4).is_err());
    }

    #[test]
    fn oversized_canvas_is_an_error() {
        assert_eq!(
            Canvas::new(i32::MAX, i32::MAX),
            Err(CoreError::InvalidDimension {
                width: i32::MAX,
                height: i32::MAX
            })
        );
    }

    #[test]
    fn set_then_get_round_trips() {
        let mut canvas = Canvas::new(5, 7).unwrap();
        for y in 0..7 {
            for x in 0..5 {
                canvas.set_dot(x, y, true);
                assert!(canvas.get_dot(x, y));
                canvas.set_dot(x, y, false);
                assert!(!canvas.get_dot(x, y));
            }
        }
    }

    #[test]
    fn off_canvas_access_is_clipped() {
        let mut canvas = Canvas::new(5, 5).unwrap();
        canvas.set_dot(2, 2, true);
        let before = all_dots(&canvas);
        // (5, 0) and (0, 5) live in the padding of the last cells.
        for (x, y) in [(-1, 0), (0, -1), (5, 0), (0, 5), (5, 7), (i32::MAX, i32::MIN)] {
            canvas.set_dot(x, y, true);
            assert!(!canvas.get_dot(x, y));
        }
        assert_eq!(all_dots(&canvas), before);
        assert_eq!(canvas.render(), "\u{2800}\u{2804}\u{2800}\n\u{2800}\u{2800}\u{2800}\n");
    }

    #[test]
    fn clear_covers_padding() {
        let mut canvas = Canvas::new(1, 1).unwrap();
        canvas.clear(true);
        assert!(canvas.get_dot(0, 0));
        assert!(!canvas.get_dot(1, 0));
        assert_eq!(canvas.render(), "⣿\n");
        canvas.clear(false);
        assert_eq!(canvas.render(), "\u{2800}\n");
    }

    #[test]
    fn single_dots_map_to_braille_bits() {
        let mut canvas = Canvas::new(2, 4).unwrap();
        canvas.set_dot(0, 0, true);
        assert_eq!(canvas.render(), "\u{2801}\n");
        canvas.clear(false);
        canvas.set_dot(0, 3, true);
        assert_eq!(canvas.render(), "\u{2840}\n");
        canvas.clear(false);
        canvas.set_dot(1, 3, true);
        assert_eq!(canvas.render(), "\u{2880}\n");
    }

    #[test]
    fn dot_order_accumulates_bits() {
        let mut canvas = Canvas::new(2, 4).unwrap();
        let order = [(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2), (0, 3), (1, 3)];
        let mut expected = 0u32;
        for (i, (x, y)) in order.into_iter().enumerate() {
            canvas.set_dot(x, y, true);
            expected |= 1 << i;
            let ch = char::from_u32(0x2800 | expected).unwrap();
            assert_eq!(canvas.render(), format!("{ch}\n"));
        }
        assert_eq!(canvas.render(), "⣿\n");
    }

    #[test]
    fn diagonal_on_five_by_five() {
        let mut canvas = Canvas::new(5, 5).unwrap();
        for i in 0..5 {
            canvas.set_dot(i, i, true);
        }
        // Row 0: (0,0)=bit0 + (1,1)=bit4, then (2,2)=bit2 + (3,3)=bit7, then blank.
        // Row 1: (4,4)=bit0 in the third cell.
        let first = char::from_u32(0x2800 | 0x01 | 0x10).unwrap();
        let second = char::from_u32(0x2800 | 0x04 | 0x80).unwrap();
        let third = char::from_u32(0x2800 | 0x01).unwrap();
        let expected = format!("{first}{second}\u{2800}\n\u{2800}\u{2800}{third}\n");
        assert_eq!(canvas.render(), expected);
        assert_eq!(expected, "\u{2811}\u{2884}\u{2800}\n\u{2800}\u{2800}\u{2801}\n");
    }

    #[test]
    fn render_shape_follows_cell_count() {
        let canvas = Canvas::new(7, 9).unwrap();
        let text = canvas.render();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| l.chars().count() == 4));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn empty_canvas_renders_nothing() {
        assert_eq!(Canvas::new(0, 0).unwrap().render(), "");
        assert_eq!(Canvas::new(0, 5).unwrap().render(), "\n\n");
    }

    #[test]
    fn display_matches_render_into() {
        let mut canvas = Canvas::new(6, 6).unwrap();
        canvas.set_dot(5, 5, true);
        let mut buf = String::from("stale");
        canvas.render_into(&mut buf);
        assert_eq!(buf, canvas.to_string());
        assert_eq!(buf, canvas.render());
    }
}
