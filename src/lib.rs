use std::fmt;

use array_macro::array;
use static_assertions::const_assert;

mod color;
mod config;
mod coords;
mod game;
mod piece;
mod placement;
mod shape;

pub use color::{EmptyPalette, Palette, PaletteColor, Rgba};
pub use config::{Config, ConfigError};
pub use coords::{
    cell_size_for_monitor, CanvasPos, CoordinateMapper, GridPos, Rect, Size, MAX_CELL_SIZE,
};
pub use game::{Canvas, Event, Game, Pointer, PointerState};
pub use piece::{DragState, Piece, Tray};
pub use placement::{
    check, does_coord_fit, does_shape_fit, piece_size, Fit, PlacementRule, StampError,
};
pub use shape::{Shape, ShapeGenerator};

pub const COLS: usize = 9;
pub const ROWS: usize = 9;
/// Side of a piece's pattern, and of the tray slot that holds it.
pub const PIECE_LENGTH: usize = 3;
pub const NUM_PIECES: usize = 3;
pub const PIECES_PER_COLUMN: usize = ROWS / PIECE_LENGTH;
pub const TRAY_COLUMNS: usize = (NUM_PIECES + PIECES_PER_COLUMN - 1) / PIECES_PER_COLUMN;

const_assert!(ROWS % PIECE_LENGTH == 0);
const_assert!(NUM_PIECES > 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
// choice: static array, dimensions are compile time constants and never change
// choice: row-wise, matches how patterns are trimmed (top row first)
// choice: generic CellT, the same type holds coloured board cells and boolean piece patterns
pub struct Grid<const WIDTH: usize, const HEIGHT: usize, CellT> {
    rows: [[CellT; WIDTH]; HEIGHT],
}

/// The play grid.
pub type Board = Grid<COLS, ROWS, Cell>;
/// The raw sub-cells of a piece, before and after trimming.
pub type Pattern = Grid<PIECE_LENGTH, PIECE_LENGTH, bool>;

impl<const WIDTH: usize, const HEIGHT: usize, CellT> Grid<WIDTH, HEIGHT, CellT> {
    pub const fn from_rows(rows: [[CellT; WIDTH]; HEIGHT]) -> Self {
        Self { rows }
    }

    /// `None` outside the grid.
    pub fn get(&self, pos: GridPos) -> Option<&CellT> {
        let (col, row) = (usize::try_from(pos.x).ok()?, usize::try_from(pos.y).ok()?);
        self.rows.get(row)?.get(col)
    }

    pub(crate) fn get_mut(&mut self, pos: GridPos) -> Option<&mut CellT> {
        let (col, row) = (usize::try_from(pos.x).ok()?, usize::try_from(pos.y).ok()?);
        self.rows.get_mut(row)?.get_mut(col)
    }

    /// Every cell with its position, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (GridPos, &CellT)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row_n, row)| {
            row.iter()
                .enumerate()
                .map(move |(col_n, cell)| (GridPos::new(col_n as i32, row_n as i32), cell))
        })
    }
}

impl<const WIDTH: usize, const HEIGHT: usize, CellT> Grid<WIDTH, HEIGHT, CellT>
where
    CellT: Default + Clone,
{
    fn empty_row() -> [CellT; WIDTH] {
        array![CellT::default(); WIDTH]
    }

    /// Drop the top row, shifting the rest up and clearing the bottom row.
    pub fn shift_up(mut self) -> Self {
        if HEIGHT >= 1 {
            self.rows[0] = Self::empty_row();
            self.rows.rotate_left(1);
        }
        self
    }

    /// Drop the left column, shifting the rest left and clearing the right column.
    pub fn shift_left(mut self) -> Self {
        for row in self.rows.iter_mut() {
            if let Some(leftmost_cell) = row.first_mut() {
                *leftmost_cell = Default::default()
            }
            if WIDTH > 1 {
                row.rotate_left(1)
            }
        }
        self
    }
}

impl<const WIDTH: usize, const HEIGHT: usize, CellT> Default for Grid<WIDTH, HEIGHT, CellT>
where
    CellT: Default + Clone,
{
    fn default() -> Self {
        Self {
            rows: array![Self::empty_row(); HEIGHT],
        }
    }
}

fn is_default<T: Default + PartialEq>(t: &T) -> bool {
    t == &T::default()
}

pub fn is_occupied<T: Default + PartialEq>(t: &T) -> bool {
    !is_default(t)
}

impl<const WIDTH: usize, const HEIGHT: usize, CellT> Grid<WIDTH, HEIGHT, CellT>
where
    CellT: Default + PartialEq,
{
    pub fn top_row_empty(&self) -> bool {
        self.rows.first().map_or(true, |row| !row.iter().any(is_occupied))
    }

    pub fn left_column_empty(&self) -> bool {
        !self
            .rows
            .iter()
            .filter_map(|row| row.first())
            .any(is_occupied)
    }

    pub fn is_empty(&self) -> bool {
        !self.rows.iter().flatten().any(is_occupied)
    }
}

impl<const WIDTH: usize, const HEIGHT: usize, CellT> fmt::Display for Grid<WIDTH, HEIGHT, CellT>
where
    CellT: Default + PartialEq,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows.iter() {
            for (col_n, cell) in row.iter().enumerate() {
                if col_n > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", if is_occupied(cell) { '#' } else { '.' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    Filled(Rgba),
    // An empty cell has no colour of its own, the renderer paints it with [`Rgba::BACKGROUND`]
    #[default]
    Empty,
}

impl Cell {
    pub fn color(&self) -> Rgba {
        match self {
            Cell::Filled(color) => *color,
            Cell::Empty => Rgba::BACKGROUND,
        }
    }
}

/// Build a [`Pattern`] from `#` (filled) and `.` (empty) cells.
#[macro_export]
macro_rules! pattern {
    ($([$($cell:tt)* $(,)?]),* $(,)?) => {
        $crate::Grid::from_rows(
            [ // begin grid
                $([ // begin row
                    $(
                        $crate::pattern!(@cell $cell),
                    )*
                ]),* // end row
            ] // end grid
        )
    };
    (@cell #) => {
        true
    };
    (@cell .) => {
        false
    };
}
