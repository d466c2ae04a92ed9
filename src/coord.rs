//! Board coordinates and their three notations.
//!
//! The service speaks three languages for the same intersection:
//!
//! - *numeric*: zero-based `(x, y)` with row 0 at the top, what the move
//!   history carries, with `(-1, -1)` standing in for a pass;
//! - *api*: two lowercase letters indexed into a plain `a..` alphabet, used
//!   when submitting a move;
//! - *visual*: what players read off a goban diagram, a column letter that
//!   skips I, then a 1-based row number counted from the top edge.
//!
//! The two letter tables must stay separate: they only agree left of the
//! skipped I column.

use crate::error::Error;
use serde::{Deserialize, Serialize};

/// Column letters for the api notation, in index order.
const API_COLUMNS: &str = "abcdefghijklmnopqrstuvwxy";

/// Column letters for the visual notation, in index order. No I.
const VISUAL_COLUMNS: &str = "ABCDEFGHJKLMNOPQRSTUVWXYZ";

/// Largest board edge the textual notations can address.
pub const MAX_TEXT_SIZE: u16 = 25;

/// Wire value marking a pass in a numeric move record.
const PASS_SENTINEL: i32 = -1;

/// One intersection on a board of a known size.
///
/// Equality is pointwise on `(size, x, y)`; coordinates from boards of
/// different sizes never compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    size: u16,
    x: u16,
    y: u16,
}

impl Coord {
    /// Builds a coordinate from zero-based column and row.
    ///
    /// Fails with [`Error::InvalidCoordinate`] when either axis falls
    /// outside `[0, size)` or the size itself cannot be addressed
    /// textually (0, or above [`MAX_TEXT_SIZE`]).
    pub fn from_numeric(size: u16, x: u16, y: u16) -> Result<Self, Error> {
        if size == 0 || size > MAX_TEXT_SIZE || x >= size || y >= size {
            return Err(Error::InvalidCoordinate {
                input: format!("({x}, {y})"),
                size,
            });
        }
        Ok(Self { size, x, y })
    }

    /// Parses the two-letter api notation.
    pub fn from_api(size: u16, code: &str) -> Result<Self, Error> {
        let invalid = || Error::InvalidCoordinate {
            input: code.to_string(),
            size,
        };
        let mut chars = code.chars();
        let (cx, cy) = match (chars.next(), chars.next(), chars.next()) {
            (Some(cx), Some(cy), None) => (cx, cy),
            _ => return Err(invalid()),
        };
        let x = axis_index(API_COLUMNS, size, cx).ok_or_else(invalid)?;
        let y = axis_index(API_COLUMNS, size, cy).ok_or_else(invalid)?;
        Self::from_numeric(size, x, y)
    }

    /// Parses the visual notation: column letter (case-insensitive, I
    /// skipped) followed by a top-down 1-based row number.
    pub fn from_visual(size: u16, text: &str) -> Result<Self, Error> {
        let invalid = || Error::InvalidCoordinate {
            input: text.to_string(),
            size,
        };
        if !(2..=3).contains(&text.chars().count()) {
            return Err(invalid());
        }
        let mut chars = text.chars();
        let column = chars.next().ok_or_else(invalid)?.to_ascii_uppercase();
        let x = axis_index(VISUAL_COLUMNS, size, column).ok_or_else(invalid)?;
        let row: u16 = chars.as_str().parse().map_err(|_| invalid())?;
        if row == 0 || row > size {
            return Err(invalid());
        }
        // Visual rows count down from the top edge.
        Self::from_numeric(size, x, size - row)
    }

    /// The board size this coordinate belongs to.
    pub fn size(&self) -> u16 {
        self.size
    }

    /// Zero-based column.
    pub fn x(&self) -> u16 {
        self.x
    }

    /// Zero-based row, 0 at the top.
    pub fn y(&self) -> u16 {
        self.y
    }

    /// Row-major cell index into a `size * size` grid.
    pub(crate) fn index(&self) -> usize {
        self.y as usize * self.size as usize + self.x as usize
    }

    /// The zero-based `(x, y)` pair.
    pub fn to_numeric(&self) -> (u16, u16) {
        (self.x, self.y)
    }

    /// The two-letter api notation.
    pub fn to_api(&self) -> String {
        let mut code = String::with_capacity(2);
        code.push(axis_letter(API_COLUMNS, self.x));
        code.push(axis_letter(API_COLUMNS, self.y));
        code
    }

    /// The visual notation, e.g. `E5`.
    pub fn to_visual(&self) -> String {
        format!("{}{}", axis_letter(VISUAL_COLUMNS, self.x), self.size - self.y)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_visual())
    }
}

/// Index of `letter` in the first `size` letters of `table`.
fn axis_index(table: &str, size: u16, letter: char) -> Option<u16> {
    table
        .chars()
        .take(size as usize)
        .position(|c| c == letter)
        .map(|i| i as u16)
}

/// Letter at `index` in `table`. Coordinate construction bounds the index.
fn axis_letter(table: &str, index: u16) -> char {
    table
        .chars()
        .nth(index as usize)
        .unwrap_or('?')
}

/// A turn's worth of action: place a stone, or pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    /// Place a stone at the coordinate.
    Play(Coord),
    /// Decline to place a stone. Still consumes the turn.
    Pass,
}

impl Move {
    /// Reads a numeric move record, accepting the `(-1, -1)` pass sentinel.
    pub fn from_numeric(size: u16, x: i32, y: i32) -> Result<Self, Error> {
        if x == PASS_SENTINEL && y == PASS_SENTINEL {
            return Ok(Self::Pass);
        }
        let invalid = || Error::InvalidCoordinate {
            input: format!("({x}, {y})"),
            size,
        };
        let x = u16::try_from(x).map_err(|_| invalid())?;
        let y = u16::try_from(y).map_err(|_| invalid())?;
        Ok(Self::Play(Coord::from_numeric(size, x, y)?))
    }

    /// The numeric pair, `(-1, -1)` for a pass.
    pub fn to_numeric(&self) -> (i32, i32) {
        match self {
            Self::Play(coord) => (coord.x() as i32, coord.y() as i32),
            Self::Pass => (PASS_SENTINEL, PASS_SENTINEL),
        }
    }

    /// The placed coordinate, if any.
    pub fn coord(&self) -> Option<Coord> {
        match self {
            Self::Play(coord) => Some(*coord),
            Self::Pass => None,
        }
    }

    /// Whether this move is a pass.
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Play(coord) => coord.fmt(f),
            Self::Pass => write!(f, "pass"),
        }
    }
}
