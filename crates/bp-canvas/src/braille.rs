//! Unicode Braille Patterns (U+2800..=U+28FF) ⇄ 2×4 dot cells.
//!
//! Dot numbering within a cell and the bit each dot sets:
//! ```text
//!  1 4      bit0 bit3
//!  2 5      bit1 bit4
//!  3 6      bit2 bit5
//!  7 8      bit6 bit7
//! ```
//! The codepoint is `U+2800 | bits`, so the mapping is exact in both
//! directions.

/// Braille base codepoint (U+2800, all dots lowered).
pub const BRAILLE_BASE: u32 = 0x2800;

/// Cell width in dots.
pub const CELL_WIDTH: usize = 2;

/// Cell height in dots.
pub const CELL_HEIGHT: usize = 4;

/// Bit of each dot, indexed `[column][row]`.
const DOT_BITS: [[u8; CELL_HEIGHT]; CELL_WIDTH] = [
    [0b0000_0001, 0b0000_0010, 0b0000_0100, 0b0100_0000],
    [0b0000_1000, 0b0001_0000, 0b0010_0000, 0b1000_0000],
];

/// Bit mask of the dot at `(column, row)` inside a cell.
///
/// # Panics
/// Panics if `column >= 2` or `row >= 4`.
///
/// # Example
/// ```
/// use bp_canvas::braille::dot_bit;
/// assert_eq!(dot_bit(0, 3), 0b0100_0000);
/// assert_eq!(dot_bit(1, 0), 0b0000_1000);
/// ```
#[inline(always)]
#[must_use]
pub const fn dot_bit(column: usize, row: usize) -> u8 {
    DOT_BITS[column][row]
}

/// Map an 8-bit dot mask to its Braille character.
///
/// # Example
/// ```
/// use bp_canvas::braille::encode;
/// assert_eq!(encode(0), '\u{2800}');
/// assert_eq!(encode(0xFF), '⣿');
/// ```
#[inline(always)]
#[must_use]
pub const fn encode(bits: u8) -> char {
    // Every u8 offset from U+2800 stays inside the block.
    match char::from_u32(BRAILLE_BASE | bits as u32) {
        Some(c) => c,
        None => ' ',
    }
}

/// Encode a 2×4 cell, indexed `[column][row]`.
///
/// # Example
/// ```
/// use bp_canvas::braille::encode_cell;
/// assert_eq!(encode_cell([[false; 4]; 2]), '\u{2800}');
/// assert_eq!(encode_cell([[true; 4]; 2]), '\u{28FF}');
/// ```
#[must_use]
pub fn encode_cell(cell: [[bool; CELL_HEIGHT]; CELL_WIDTH]) -> char {
    let mut bits = 0u8;
    for (column, dots) in cell.iter().enumerate() {
        for (row, &raised) in dots.iter().enumerate() {
            if raised {
                bits |= dot_bit(column, row);
            }
        }
    }
    encode(bits)
}

/// Inverse of [`encode`]: the dot mask of a Braille character.
///
/// Returns `None` for characters outside the Braille Patterns block.
///
/// # Example
/// ```
/// use bp_canvas::braille::decode;
/// assert_eq!(decode('⠑'), Some(0x11));
/// assert_eq!(decode('a'), None);
/// ```
#[inline]
#[must_use]
pub fn decode(ch: char) -> Option<u8> {
    u32::from(ch)
        .checked_sub(BRAILLE_BASE)
        .and_then(|offset| u8::try_from(offset).ok())
}

/// Inverse of [`encode_cell`].
///
/// # Example
/// ```
/// use bp_canvas::braille::decode_cell;
/// let cell = decode_cell('⡀').unwrap();
/// assert!(cell[0][3]);
/// assert!(!cell[1][3]);
/// ```
#[must_use]
pub fn decode_cell(ch: char) -> Option<[[bool; CELL_HEIGHT]; CELL_WIDTH]> {
    let bits = decode(ch)?;
    let mut cell = [[false; CELL_HEIGHT]; CELL_WIDTH];
    for (column, dots) in cell.iter_mut().enumerate() {
        for (row, raised) in dots.iter_mut().enumerate() {
            *raised = bits & dot_bit(column, row) != 0;
        }
    }
    Some(cell)
}
