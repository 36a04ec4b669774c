//! Rectangular grids of non-negative entry costs.
//!
//! A [`CostGrid`] stores the cost ("heat") incurred by entering each cell.
//! It can be built from rows of integers or parsed from text, one line per
//! row and one decimal digit per cell:
//!
//! ```text
//! 2413
//! 3215
//! 3255
//! ```

use std::fmt;
use std::str::FromStr;

use crate::geom::{Point, Range};

/// A rectangular, row-major grid of cell entry costs.
///
/// The grid always has at least one cell and every row has the same width.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "GridRepr", into = "GridRepr")
)]
pub struct CostGrid {
    cells: Vec<u32>,
    width: i32,
    height: i32,
}

impl CostGrid {
    /// Create a grid from a row-major cell buffer.
    pub fn new(width: i32, height: i32, cells: Vec<u32>) -> Result<Self, GridError> {
        if width <= 0 || height <= 0 {
            return Err(GridError::Empty);
        }
        let expected = width as usize * height as usize;
        if cells.len() != expected {
            return Err(GridError::SizeMismatch {
                expected,
                found: cells.len(),
            });
        }
        Ok(Self {
            cells,
            width,
            height,
        })
    }

    /// Create a `width`×`height` grid where every cell costs `cost`.
    pub fn filled(width: i32, height: i32, cost: u32) -> Result<Self, GridError> {
        let len = width.max(0) as usize * height.max(0) as usize;
        Self::new(width, height, vec![cost; len])
    }

    /// Create a grid from rows of costs. All rows must share one width.
    pub fn from_rows<R, I>(rows: I) -> Result<Self, GridError>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[u32]>,
    {
        let mut cells = Vec::new();
        let mut width: Option<usize> = None;
        let mut height = 0;
        for (y, row) in rows.into_iter().enumerate() {
            let row = row.as_ref();
            match width {
                None => width = Some(row.len()),
                Some(w) if w != row.len() => {
                    return Err(GridError::InconsistentWidth {
                        row: y,
                        expected: w,
                        found: row.len(),
                    });
                }
                Some(_) => {}
            }
            cells.extend_from_slice(row);
            height += 1;
        }
        Self::new(width.unwrap_or(0) as i32, height, cells)
    }

    /// Parse a block of single-digit costs, one line per row.
    ///
    /// Leading and trailing whitespace around the whole block is ignored,
    /// but not inside lines.
    pub fn parse(s: &str) -> Result<Self, GridError> {
        let s = s.trim();
        let mut cells = Vec::with_capacity(s.len());
        let mut width: Option<usize> = None;
        let mut height: i32 = 0;
        for (y, line) in s.lines().enumerate() {
            let mut x = 0;
            for ch in line.chars() {
                let Some(d) = ch.to_digit(10) else {
                    return Err(GridError::InvalidDigit {
                        ch,
                        pos: Point::new(x as i32, y as i32),
                    });
                };
                cells.push(d);
                x += 1;
            }
            match width {
                None => width = Some(x),
                Some(w) if w != x => {
                    return Err(GridError::InconsistentWidth {
                        row: y,
                        expected: w,
                        found: x,
                    });
                }
                Some(_) => {}
            }
            height += 1;
        }
        Self::new(width.unwrap_or(0) as i32, height, cells)
    }

    /// Returns the bounding range `[0, 0)-(width, height)`.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    /// Returns the size as a Point (width = x, height = y).
    #[inline]
    pub fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether `p` is a cell of the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    /// Top-left and bottom-right cells.
    pub fn corners(&self) -> (Point, Point) {
        (Point::ZERO, Point::new(self.width - 1, self.height - 1))
    }

    /// Cost of entering `p`, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, p: Point) -> Option<u32> {
        self.index(p).map(|i| self.cells[i])
    }

    /// Set the cost of `p`. Does nothing if out of bounds.
    pub fn set(&mut self, p: Point, cost: u32) {
        if let Some(i) = self.index(p) {
            self.cells[i] = cost;
        }
    }

    /// Iterate over `(Point, cost)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, u32)> + '_ {
        self.bounds().iter().zip(self.cells.iter().copied())
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some(p.y as usize * self.width as usize + p.x as usize)
    }
}

impl FromStr for CostGrid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CostGrid {
    /// Digit form when every cost fits in one digit, space separated
    /// otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let compact = self.cells.iter().all(|&c| c < 10);
        for (y, row) in self.cells.chunks(self.width as usize).enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for (x, c) in row.iter().enumerate() {
                if !compact && x > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct GridRepr {
    width: i32,
    height: i32,
    cells: Vec<u32>,
}

#[cfg(feature = "serde")]
impl TryFrom<GridRepr> for CostGrid {
    type Error = GridError;

    fn try_from(r: GridRepr) -> Result<Self, Self::Error> {
        Self::new(r.width, r.height, r.cells)
    }
}

#[cfg(feature = "serde")]
impl From<CostGrid> for GridRepr {
    fn from(g: CostGrid) -> Self {
        Self {
            width: g.width,
            height: g.height,
            cells: g.cells,
        }
    }
}

/// Errors that can occur when building or parsing a cost grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The grid has no cells.
    Empty,
    /// A row does not have the width of the first row.
    InconsistentWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A character that is not a decimal digit was found.
    InvalidDigit { ch: char, pos: Point },
    /// The cell buffer does not match `width * height`.
    SizeMismatch { expected: usize, found: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "grid: no cells"),
            Self::InconsistentWidth {
                row,
                expected,
                found,
            } => write!(
                f,
                "grid: row {row} has width {found}, expected {expected}"
            ),
            Self::InvalidDigit { ch, pos } => {
                write!(f, "grid: invalid digit \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::SizeMismatch { expected, found } => {
                write!(f, "grid: expected {expected} cells, got {found}")
            }
        }
    }
}

impl std::error::Error for GridError {}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
2413
3215
3255";

    #[test]
    fn parse_and_size() {
        let g = CostGrid::parse(SAMPLE).unwrap();
        assert_eq!(g.size(), Point::new(4, 3));
        assert_eq!(g.at(Point::new(0, 0)), Some(2));
        assert_eq!(g.at(Point::new(3, 1)), Some(5));
        assert_eq!(g.at(Point::new(4, 0)), None);
        assert_eq!(g.at(Point::new(0, -1)), None);
    }

    #[test]
    fn parse_trims_block_and_crlf() {
        let g: CostGrid = "\n12\r\n34\r\n\n".parse().unwrap();
        assert_eq!(g.size(), Point::new(2, 2));
        assert_eq!(g.at(Point::new(1, 1)), Some(4));
    }

    #[test]
    fn parse_rejects_empty() {
        assert_eq!(CostGrid::parse(""), Err(GridError::Empty));
        assert_eq!(CostGrid::parse(" \n\n "), Err(GridError::Empty));
    }

    #[test]
    fn parse_rejects_ragged_rows() {
        assert_eq!(
            CostGrid::parse("123\n12\n123"),
            Err(GridError::InconsistentWidth {
                row: 1,
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn parse_rejects_non_digits() {
        assert_eq!(
            CostGrid::parse("12\n1x"),
            Err(GridError::InvalidDigit {
                ch: 'x',
                pos: Point::new(1, 1)
            })
        );
    }

    #[test]
    fn from_rows_checks_width() {
        let g = CostGrid::from_rows([[1u32, 2], [3, 4]]).unwrap();
        assert_eq!(g.at(Point::new(0, 1)), Some(3));
        let err = CostGrid::from_rows(vec![vec![1u32, 2], vec![3]]).unwrap_err();
        assert!(matches!(err, GridError::InconsistentWidth { row: 1, .. }));
        assert_eq!(
            CostGrid::from_rows(Vec::<Vec<u32>>::new()),
            Err(GridError::Empty)
        );
    }

    #[test]
    fn new_checks_buffer_length() {
        assert_eq!(
            CostGrid::new(2, 2, vec![1, 2, 3]),
            Err(GridError::SizeMismatch {
                expected: 4,
                found: 3
            })
        );
        assert_eq!(CostGrid::new(0, 3, vec![]), Err(GridError::Empty));
    }

    #[test]
    fn set_and_corners() {
        let mut g = CostGrid::filled(3, 2, 1).unwrap();
        g.set(Point::new(2, 1), 7);
        g.set(Point::new(9, 9), 7);
        assert_eq!(g.at(Point::new(2, 1)), Some(7));
        assert_eq!(g.corners(), (Point::new(0, 0), Point::new(2, 1)));
        assert_eq!(g.iter().map(|(_, c)| c).sum::<u32>(), 12);
    }

    #[test]
    fn display_round_trips_digits() {
        let g = CostGrid::parse(SAMPLE).unwrap();
        assert_eq!(g.to_string(), SAMPLE);
        let wide = CostGrid::from_rows([[10u32, 2], [3, 4]]).unwrap();
        assert_eq!(wide.to_string(), "10 2\n3 4");
    }

    #[test]
    fn error_messages() {
        let err = CostGrid::parse("1a").unwrap_err();
        assert_eq!(err.to_string(), "grid: invalid digit \u{201c}a\u{201d} at (1, 0)");
    }
}
