//! Board geometry and cut specifications.
//!
//! [`Board`] is a plain rectangle value type with the stacking and splitting
//! operations the layout tree is built from. [`CutSpec`] is the immutable
//! problem statement: an ordered list of boards (the index is the board's
//! permanent identity), an optional sheet width cap, and the memoized total
//! board area used for waste reporting.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A rectangle with non-negative integer dimensions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    pub width: u32,
    pub height: u32,
}

impl Board {
    /// Creates a board from its width and height.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Surface area. Widened to `u64` so large sheets cannot overflow.
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// The same board with width and height swapped.
    pub fn rotated(&self) -> Board {
        Board::new(self.height, self.width)
    }

    /// Bounding box of two boards placed side by side.
    ///
    /// Width is the sum of both widths, height the max of both heights.
    /// The sum saturates at `u32::MAX`, so degenerate giant inputs yield a
    /// maximally bad bounding box instead of wrapping.
    /// Associative in area but not in the resulting aspect ratio.
    pub fn hstack(&self, right: Board) -> Board {
        Board::new(
            self.width.saturating_add(right.width),
            self.height.max(right.height),
        )
    }

    /// Bounding box of two boards stacked on top of each other.
    ///
    /// Transpose of [`hstack`](Board::hstack): height is the saturating
    /// sum, width the max.
    pub fn vstack(&self, bottom: Board) -> Board {
        Board::new(
            self.width.max(bottom.width),
            self.height.saturating_add(bottom.height),
        )
    }

    /// Splits the board at height offset `y` into a top and bottom part.
    ///
    /// Fails with [`Error::InvalidSplit`] if `y` exceeds the height.
    pub fn hsplit(&self, y: u32) -> Result<(Board, Board)> {
        if y > self.height {
            return Err(Error::InvalidSplit {
                offset: y,
                limit: self.height,
            });
        }
        Ok((
            Board::new(self.width, y),
            Board::new(self.width, self.height - y),
        ))
    }

    /// Splits the board at width offset `x` into a left and right part.
    ///
    /// Fails with [`Error::InvalidSplit`] if `x` exceeds the width.
    pub fn vsplit(&self, x: u32) -> Result<(Board, Board)> {
        if x > self.width {
            return Err(Error::InvalidSplit {
                offset: x,
                limit: self.width,
            });
        }
        Ok((
            Board::new(x, self.height),
            Board::new(self.width - x, self.height),
        ))
    }
}

/// One line of a cut request: `amount` identical boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardOrder {
    pub width: u32,
    pub height: u32,
    pub amount: u32,
}

/// The problem statement for one optimization run.
///
/// Boards are identified by their index and never reordered. A `max_width`
/// of zero means the sheet width is unconstrained. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutSpec {
    boards: Vec<Board>,
    max_width: u32,
    total_area: u64,
}

impl CutSpec {
    /// Builds a spec directly from a board list.
    pub fn new(boards: Vec<Board>, max_width: u32) -> Self {
        let total_area = boards.iter().map(Board::area).sum();
        Self {
            boards,
            max_width,
            total_area,
        }
    }

    /// Expands board orders into a spec, validating each order.
    ///
    /// An order must have a non-zero amount and its board must fit the
    /// width cap in at least one orientation.
    pub fn from_orders(orders: &[BoardOrder], max_width: u32) -> Result<Self> {
        let mut boards = Vec::new();
        for (index, order) in orders.iter().enumerate() {
            if order.amount < 1 {
                return Err(Error::ZeroAmount { index });
            }
            if !fits(order.width, order.height, max_width) {
                return Err(Error::BoardTooWide {
                    width: order.width,
                    height: order.height,
                    max_width,
                });
            }
            for _ in 0..order.amount {
                boards.push(Board::new(order.width, order.height));
            }
        }
        Ok(Self::new(boards, max_width))
    }

    /// Number of boards.
    pub fn len(&self) -> usize {
        self.boards.len()
    }

    /// True when the spec holds no boards.
    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    /// The board at index `i`.
    ///
    /// # Panics
    /// Panics if `i` is out of range.
    pub fn board(&self, i: usize) -> Board {
        self.boards[i]
    }

    /// All boards, in order-of-identity.
    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    /// The sheet width cap; zero means unconstrained.
    pub fn max_width(&self) -> u32 {
        self.max_width
    }

    /// Sum of all board areas, for waste reporting.
    pub fn total_area(&self) -> u64 {
        self.total_area
    }
}

/// Whether a board fits the width cap in at least one orientation.
fn fits(width: u32, height: u32, max_width: u32) -> bool {
    max_width == 0 || width <= max_width || height <= max_width
}
