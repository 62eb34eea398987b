use bp_core::CoreError;

use crate::braille::{self, CELL_HEIGHT, CELL_WIDTH};
use crate::canvas::Canvas;
use crate::grid::alloc_dots;
use crate::shapes::{Drawable, Point};

/// Small fixed bitmap stamped by a [`Sprite`].
///
/// Unlike a [`Canvas`] a texture has no padding and no clipping: addressing
/// a dot outside its extent is a caller error.
///
/// # Example
/// ```
/// use bp_canvas::Texture;
/// let mut tex = Texture::new(3, 2).unwrap();
/// tex.set_dot(2, 1, true).unwrap();
/// assert_eq!(tex.get_dot(2, 1), Ok(true));
/// assert!(tex.get_dot(3, 0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    width: i32,
    height: i32,
    /// Row-major.
    dots: Vec<bool>,
}

impl Texture {
    /// Crée une texture vide de `width × height` dots.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimension`] if either side is negative or
    /// the dot buffer cannot be allocated.
    pub fn new(width: i32, height: i32) -> Result<Self, CoreError> {
        let dots = usize::try_from(width)
            .ok()
            .zip(usize::try_from(height).ok())
            .and_then(|(w, h)| w.checked_mul(h))
            .and_then(alloc_dots)
            .ok_or(CoreError::InvalidDimension { width, height })?;
        Ok(Self {
            width,
            height,
            dots,
        })
    }

    /// Build a texture by evaluating `f(x, y)` for every dot.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimension`] if either side is negative.
    ///
    /// # Example
    /// ```
    /// use bp_canvas::Texture;
    /// let checker = Texture::from_fn(4, 4, |x, y| x % 2 == y % 2).unwrap();
    /// assert_eq!(checker.get_dot(1, 1), Ok(true));
    /// assert_eq!(checker.get_dot(0, 1), Ok(false));
    /// ```
    pub fn from_fn(
        width: i32,
        height: i32,
        mut f: impl FnMut(i32, i32) -> bool,
    ) -> Result<Self, CoreError> {
        let mut texture = Self::new(width, height)?;
        for y in 0..height {
            for x in 0..width {
                let idx = texture.index(x, y);
                texture.dots[idx] = f(x, y);
            }
        }
        Ok(texture)
    }

    /// Decode Braille text, one 2×4 cell per character.
    ///
    /// The texture is `2 × longest line` dots wide and `4 × lines` dots
    /// high; shorter lines leave their tail unset.
    ///
    /// # Errors
    /// Returns [`CoreError::NotBraille`] for any character outside the
    /// Braille Patterns block.
    ///
    /// # Example
    /// ```
    /// use bp_canvas::Texture;
    /// let tex = Texture::from_braille("⡏⢹\n⣇⣸").unwrap();
    /// assert_eq!((tex.width(), tex.height()), (4, 8));
    /// assert_eq!(tex.get_dot(0, 7), Ok(true));
    /// assert_eq!(tex.get_dot(1, 1), Ok(false));
    /// ```
    pub fn from_braille(text: &str) -> Result<Self, CoreError> {
        let rows: Vec<Vec<u8>> = text
            .lines()
            .map(|line| {
                line.chars()
                    .map(|ch| braille::decode(ch).ok_or(CoreError::NotBraille { ch }))
                    .collect::<Result<Vec<u8>, CoreError>>()
            })
            .collect::<Result<_, _>>()?;

        let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
        let (width, height) = braille_size(columns, rows.len())?;
        let mut texture = Self::new(width, height)?;

        for (cy, row) in rows.iter().enumerate() {
            for (cx, &bits) in row.iter().enumerate() {
                for column in 0..CELL_WIDTH {
                    for r in 0..CELL_HEIGHT {
                        if bits & braille::dot_bit(column, r) != 0 {
                            let x = cx * CELL_WIDTH + column;
                            let y = cy * CELL_HEIGHT + r;
                            texture.dots[y * columns * CELL_WIDTH + x] = true;
                        }
                    }
                }
            }
        }
        log::debug!("Texture {width}×{height} décodée depuis Braille");
        Ok(texture)
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Caller guarantees `(x, y)` is inside the texture.
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> usize {
        debug_assert!(self.contains(x, y), "texel out of bounds");
        (y.unsigned_abs() as usize) * (self.width.unsigned_abs() as usize)
            + x.unsigned_abs() as usize
    }

    #[inline]
    fn contains(&self, x: i32, y: i32) -> bool {
        (0..self.width).contains(&x) && (0..self.height).contains(&y)
    }

    fn check(&self, x: i32, y: i32) -> Result<usize, CoreError> {
        if self.contains(x, y) {
            Ok(self.index(x, y))
        } else {
            Err(CoreError::IndexOutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Read a dot.
    ///
    /// # Errors
    /// Returns [`CoreError::IndexOutOfRange`] outside the texture.
    pub fn get_dot(&self, x: i32, y: i32) -> Result<bool, CoreError> {
        self.check(x, y).map(|idx| self.dots[idx])
    }

    /// Write a dot.
    ///
    /// # Errors
    /// Returns [`CoreError::IndexOutOfRange`] outside the texture.
    pub fn set_dot(&mut self, x: i32, y: i32, value: bool) -> Result<(), CoreError> {
        let idx = self.check(x, y)?;
        self.dots[idx] = value;
        Ok(())
    }

    /// Offsets of every raised dot, row by row.
    pub fn raised(&self) -> impl Iterator<Item = Point> + '_ {
        let width = self.width.max(1);
        self.dots
            .iter()
            .zip(0..)
            .filter(|&(&raised, _)| raised)
            .map(move |(_, i): (&bool, i32)| Point::new(i % width, i / width))
    }
}

/// Dot size of a `columns × rows` block of Braille cells.
fn braille_size(columns: usize, rows: usize) -> Result<(i32, i32), CoreError> {
    let dots = |cells: usize, per_cell: usize| {
        cells
            .checked_mul(per_cell)
            .and_then(|n| i32::try_from(n).ok())
    };
    match (dots(columns, CELL_WIDTH), dots(rows, CELL_HEIGHT)) {
        (Some(width), Some(height)) => Ok((width, height)),
        (width, height) => Err(CoreError::InvalidDimension {
            width: width.unwrap_or(i32::MAX),
            height: height.unwrap_or(i32::MAX),
        }),
    }
}

/// A texture placed at a canvas position.
///
/// Compositing is additive: raised texels raise canvas dots, unset texels
/// leave whatever is already on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite<'a> {
    pub position: Point,
    pub texture: &'a Texture,
}

impl<'a> Sprite<'a> {
    #[inline]
    #[must_use]
    pub const fn new(position: Point, texture: &'a Texture) -> Self {
        Self { position, texture }
    }
}

impl Drawable for Sprite<'_> {
    fn draw(&self, canvas: &mut Canvas) {
        for offset in self.texture.raised() {
            let p = self.position + offset;
            canvas.set_dot(p.x, p.y, true);
        }
    }
}

/// Sprite cycling through a fixed list of textures.
///
/// The driver calls [`advance`](Self::advance) when it wants the next
/// texture; drawing never changes the state.
///
/// # Example
/// ```
/// use bp_canvas::{AnimatedSprite, Canvas, Point, Texture};
/// let on = Texture::from_fn(1, 1, |_, _| true).unwrap();
/// let off = Texture::new(1, 1).unwrap();
/// let mut blink = AnimatedSprite::new(Point::new(0, 0), vec![on, off]).unwrap();
///
/// let mut canvas = Canvas::new(2, 4).unwrap();
/// canvas.draw(&blink);
/// assert!(canvas.get_dot(0, 0));
///
/// blink.advance();
/// canvas.clear(false);
/// canvas.draw(&blink);
/// assert!(!canvas.get_dot(0, 0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedSprite {
    pub position: Point,
    textures: Vec<Texture>,
    index: usize,
}

impl AnimatedSprite {
    /// # Errors
    /// Returns [`CoreError::EmptyAnimation`] if `textures` is empty.
    pub fn new(position: Point, textures: Vec<Texture>) -> Result<Self, CoreError> {
        if textures.is_empty() {
            return Err(CoreError::EmptyAnimation);
        }
        Ok(Self {
            position,
            textures,
            index: 0,
        })
    }

    /// Switch to the next texture, wrapping around.
    pub fn advance(&mut self) {
        self.index = (self.index + 1) % self.textures.len();
    }

    #[inline]
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Texture drawn by the next [`draw`](Drawable::draw).
    #[must_use]
    pub fn current(&self) -> &Texture {
        &self.textures[self.index]
    }

    /// The current frame as a plain sprite.
    #[must_use]
    pub fn sprite(&self) -> Sprite<'_> {
        Sprite::new(self.position, self.current())
    }
}

impl Drawable for AnimatedSprite {
    fn draw(&self, canvas: &mut Canvas) {
        self.sprite().draw(canvas);
    }
}
