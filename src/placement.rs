use clap::ValueEnum;

use crate::{Board, Cell, GridPos, Piece, Rgba, Shape, Size, COLS, ROWS};

/// What a drop is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PlacementRule {
    /// Only the bounding box has to be inside the grid. Dropped pieces always spring back to
    /// the tray.
    #[default]
    BoundsOnly,
    /// Every filled sub-cell also has to land on an empty cell, and a fitting drop is written
    /// into the grid.
    Occupancy,
}

/// Outcome of checking a shape at a grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fit {
    Fits,
    OutOfBounds,
    /// First filled cell the shape would cover.
    Overlaps { at: GridPos },
    /// Nothing to place.
    EmptyShape,
}

impl Fit {
    pub fn fits(self) -> bool {
        self == Fit::Fits
    }
}

pub fn piece_size(piece: &Piece) -> Size {
    piece.shape().size()
}

pub fn does_coord_fit(coord: i32, bound: i32, size: i32) -> bool {
    coord >= 0 && coord <= bound - size
}

/// Whether the piece's bounding box, anchored at `pos`, is inside the grid.
pub fn does_shape_fit(pos: GridPos, piece: &Piece) -> bool {
    bounds_fit(pos, piece_size(piece))
}

fn bounds_fit(pos: GridPos, size: Size) -> bool {
    does_coord_fit(pos.x, COLS as i32, size.width) && does_coord_fit(pos.y, ROWS as i32, size.height)
}

pub fn check(board: &Board, pos: GridPos, shape: &Shape, rule: PlacementRule) -> Fit {
    if shape.is_empty() {
        return Fit::EmptyShape;
    }
    if !bounds_fit(pos, shape.size()) {
        return Fit::OutOfBounds;
    }
    if rule == PlacementRule::Occupancy {
        if let Some(at) = shape
            .filled()
            .map(|offset| pos + offset)
            .find(|at| matches!(board.get(*at), Some(Cell::Filled(_))))
        {
            return Fit::Overlaps { at };
        }
    }
    Fit::Fits
}

#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone, Copy)]
pub enum StampError {
    #[error("would clobber filled cell at row {row}, column {col} (this is the first clobber, there may be more)")]
    WouldClobber { row: i32, col: i32 },
    #[error("sub-cell lands outside the grid at row {row}, column {col}")]
    OutOfGrid { row: i32, col: i32 },
}

impl Board {
    /// A copy of this board with the shape's filled sub-cells written in `color`.
    pub fn stamp(&self, shape: &Shape, pos: GridPos, color: Rgba) -> Result<Board, StampError> {
        let mut result = self.clone();
        for at in shape.filled().map(|offset| pos + offset) {
            let (row, col) = (at.y, at.x);
            match result.get_mut(at) {
                None => return Err(StampError::OutOfGrid { row, col }),
                Some(Cell::Filled(_)) => return Err(StampError::WouldClobber { row, col }),
                Some(cell) => *cell = Cell::Filled(color),
            }
        }
        Ok(result)
    }
}
