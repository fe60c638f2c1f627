use std::ops;

use derive_more::{Add, From, Sub};

use crate::{COLS, PIECE_LENGTH, ROWS, TRAY_COLUMNS};

/// Widest the window gets, in cells.
const WINDOW_CELLS: i32 = (COLS + TRAY_COLUMNS * PIECE_LENGTH) as i32;

/// Largest cell size whose window still fits in `i32` pixels.
pub const MAX_CELL_SIZE: i32 = i32::MAX / WINDOW_CELLS;

/// A position on the screen, in pixels. Arithmetic saturates, pointers can be anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, From)]
pub struct CanvasPos {
    pub x: i32,
    pub y: i32,
}

impl CanvasPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl ops::Add for CanvasPos {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x.saturating_add(rhs.x), self.y.saturating_add(rhs.y))
    }
}

impl ops::Sub for CanvasPos {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x.saturating_sub(rhs.x), self.y.saturating_sub(rhs.y))
    }
}

/// A position in cells. Only `[0, COLS) * [0, ROWS)` is the play grid; tray slots sit at `x >= COLS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Add, Sub, From)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    /// Returned by [`CoordinateMapper::canvas_to_grid`] when there is no cell under a position.
    pub const INVALID: Self = Self::new(-1, -1);

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }

    pub fn in_play_grid(self) -> bool {
        (0..COLS as i32).contains(&self.x) && (0..ROWS as i32).contains(&self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle, ready to hand to a [`crate::Canvas`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Half-open: the left and top edges are inside, the right and bottom edges are not.
    pub fn contains(&self, pos: CanvasPos) -> bool {
        let (x, y) = (pos.x as f32, pos.y as f32);
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Largest cell size that fits the grid plus the tray on a monitor, scaled down by `window_size`.
pub fn cell_size_for_monitor(width: i32, height: i32, window_size: f64) -> i32 {
    let max_tall = height / (ROWS as i32 + 1);
    let max_wide = width / (COLS + TRAY_COLUMNS) as i32;
    (max_tall.min(max_wide) as f64 * window_size) as i32
}

/// Converts between cells and pixels with a single scalar cell size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    cell_size: i32,
    square_amount: f32,
}

impl CoordinateMapper {
    /// `square_amount` is the fraction of a cell a drawn square covers, leaving a gap between neighbours.
    pub fn new(cell_size: i32, square_amount: f32) -> Self {
        Self {
            cell_size,
            square_amount,
        }
    }

    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    pub fn half_cell(&self) -> CanvasPos {
        CanvasPos::new(self.cell_size / 2, self.cell_size / 2)
    }

    pub fn grid_to_canvas(&self, pos: GridPos) -> CanvasPos {
        CanvasPos::new(
            pos.x.saturating_mul(self.cell_size),
            pos.y.saturating_mul(self.cell_size),
        )
    }

    pub fn canvas_to_grid(&self, pos: CanvasPos) -> GridPos {
        if pos.x < 0 || pos.y < 0 {
            return GridPos::INVALID;
        }
        GridPos::new(pos.x / self.cell_size, pos.y / self.cell_size)
    }

    /// The play-grid cell under `pos`, if any.
    pub fn grid_cell(&self, pos: CanvasPos) -> Option<GridPos> {
        Some(self.canvas_to_grid(pos)).filter(|cell| cell.is_valid() && cell.in_play_grid())
    }

    pub fn canvas_to_rectangle(&self, pos: CanvasPos) -> Rect {
        let side = self.cell_size as f32 * self.square_amount;
        Rect::new(pos.x as f32, pos.y as f32, side, side)
    }

    pub fn grid_to_rectangle(&self, pos: GridPos) -> Rect {
        self.canvas_to_rectangle(self.grid_to_canvas(pos))
    }

    /// Size of the window holding the grid and the tray, in pixels.
    pub fn window_size_px(&self) -> (i32, i32) {
        (
            self.cell_size * WINDOW_CELLS,
            self.cell_size * ROWS as i32,
        )
    }
}
