use crate::braille::{CELL_HEIGHT, CELL_WIDTH, dot_bit};

/// Boolean dot matrix padded up to whole Braille cells.
///
/// Stored row-major in a flat buffer, allocated once and never resized.
/// Indices are unsigned and unchecked against the *logical* size: bounds
/// policy belongs to [`Canvas`](crate::Canvas).
///
/// # Example
/// ```
/// use bp_canvas::grid::DotGrid;
/// let grid = DotGrid::new(5, 5).unwrap();
/// assert_eq!(grid.dots_width(), 6);
/// assert_eq!(grid.dots_height(), 8);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DotGrid {
    dots: Vec<bool>,
    dots_width: usize,
    dots_height: usize,
}

impl DotGrid {
    /// Allocate a grid covering at least `width × height` dots, all lowered.
    ///
    /// Returns `None` when the padded buffer cannot be allocated.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Option<Self> {
        let dots_width = width.div_ceil(CELL_WIDTH).checked_mul(CELL_WIDTH)?;
        let dots_height = height.div_ceil(CELL_HEIGHT).checked_mul(CELL_HEIGHT)?;
        Some(Self {
            dots: alloc_dots(dots_width.checked_mul(dots_height)?)?,
            dots_width,
            dots_height,
        })
    }

    /// Padded width in dots (multiple of 2).
    #[inline]
    #[must_use]
    pub fn dots_width(&self) -> usize {
        self.dots_width
    }

    /// Padded height in dots (multiple of 4).
    #[inline]
    #[must_use]
    pub fn dots_height(&self) -> usize {
        self.dots_height
    }

    /// Number of Braille cells across and down.
    #[inline]
    #[must_use]
    pub fn cells(&self) -> (usize, usize) {
        (
            self.dots_width / CELL_WIDTH,
            self.dots_height / CELL_HEIGHT,
        )
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.dots_width && y < self.dots_height, "dot out of bounds");
        y * self.dots_width + x
    }

    /// Read the dot at `(x, y)`; `false` beyond the padded area.
    #[inline(always)]
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.dots_width || y >= self.dots_height {
            return false;
        }
        self.dots[self.index(x, y)]
    }

    /// Write the dot at `(x, y)`; ignored beyond the padded area.
    #[inline(always)]
    pub fn set(&mut self, x: usize, y: usize, raised: bool) {
        if x >= self.dots_width || y >= self.dots_height {
            return;
        }
        let idx = self.index(x, y);
        self.dots[idx] = raised;
    }

    /// Overwrite every dot, padding included.
    pub fn fill(&mut self, raised: bool) {
        self.dots.fill(raised);
    }

    /// Dot mask of the Braille cell at cell coordinates `(cx, cy)`.
    ///
    /// # Example
    /// ```
    /// use bp_canvas::grid::DotGrid;
    /// let mut grid = DotGrid::new(4, 4).unwrap();
    /// grid.set(3, 3, true);
    /// assert_eq!(grid.cell_bits(0, 0), 0);
    /// assert_eq!(grid.cell_bits(1, 0), 0b1000_0000);
    /// ```
    #[must_use]
    pub fn cell_bits(&self, cx: usize, cy: usize) -> u8 {
        let x0 = cx * CELL_WIDTH;
        let y0 = cy * CELL_HEIGHT;
        let mut bits = 0u8;
        for column in 0..CELL_WIDTH {
            for row in 0..CELL_HEIGHT {
                if self.get(x0 + column, y0 + row) {
                    bits |= dot_bit(column, row);
                }
            }
        }
        bits
    }
}

/// Lowered dot buffer of `len` dots, or `None` if the allocator refuses it.
pub(crate) fn alloc_dots(len: usize) -> Option<Vec<bool>> {
    let mut dots = Vec::new();
    dots.try_reserve_exact(len).ok()?;
    dots.resize(len, false);
    Some(dots)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_rounds_up_to_cells() {
        let cases = [(0, 0, 0, 0), (1, 1, 2, 4), (2, 4, 2, 4), (3, 5, 4, 8), (160, 120, 160, 120)];
        for (w, h, dw, dh) in cases {
            let grid = DotGrid::new(w, h).unwrap();
            assert_eq!((grid.dots_width(), grid.dots_height()), (dw, dh), "{w}×{h}");
        }
    }

    #[test]
    fn fill_reaches_padding() {
        let mut grid = DotGrid::new(3, 3).unwrap();
        grid.fill(true);
        assert!(grid.get(3, 7));
        assert_eq!(grid.cell_bits(1, 0), 0xFF);
    }

    #[test]
    fn access_past_padding_is_inert() {
        let mut grid = DotGrid::new(2, 4).unwrap();
        grid.set(2, 0, true);
        grid.set(0, 4, true);
        assert!(!grid.get(2, 0));
        assert_eq!(grid.cell_bits(0, 0), 0);
    }

    #[test]
    fn unallocatable_grid_is_refused() {
        assert!(DotGrid::new(usize::MAX, 4).is_none());
        assert!(DotGrid::new(usize::MAX / 2, usize::MAX / 2).is_none());
        assert!(alloc_dots(isize::MAX.unsigned_abs()).is_none());
    }
}
