use rand::Rng;
use tap::Pipe;
use tracing::trace;

use crate::{
    is_occupied, Config, ConfigError, GridPos, Palette, Pattern, Piece, Rgba, Size, Tray, PIECE_LENGTH,
};

/// A piece's sub-cells, trimmed so that its top row and left column each hold a filled
/// sub-cell (unless nothing is filled at all).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Shape(Pattern);

impl Shape {
    /// Trim empty rows off the top, then empty columns off the left.
    pub fn from_pattern(mut pattern: Pattern) -> Self {
        // a fully empty pattern would otherwise spin forever
        if pattern.is_empty() {
            return Self(pattern);
        }
        while pattern.top_row_empty() {
            pattern = pattern.shift_up();
        }
        while pattern.left_column_empty() {
            pattern = pattern.shift_left();
        }
        Self(pattern)
    }

    pub fn pattern(&self) -> &Pattern {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Offsets of the filled sub-cells, row by row.
    pub fn filled(&self) -> impl Iterator<Item = GridPos> + '_ {
        self.0
            .cells()
            .filter(|(_, cell)| is_occupied(*cell))
            .map(|(pos, _)| pos)
    }

    /// Bounding box of the filled sub-cells, anchored at the origin. `0 * 0` when empty.
    pub fn size(&self) -> Size {
        self.filled().fold(Size::default(), |size, pos| Size {
            width: size.width.max(pos.x + 1),
            height: size.height.max(pos.y + 1),
        })
    }
}

/// Builds random shapes and pieces.
#[derive(Debug)]
pub struct ShapeGenerator<R> {
    rng: R,
    palette: Palette,
    square_probability: u32,
    reroll_empty: bool,
}

impl<R: Rng> ShapeGenerator<R> {
    /// Refuses configs that [`Config::validate`] refuses, so [`Self::build_shape`] always returns.
    pub fn new(rng: R, palette: Palette, config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            rng,
            palette,
            square_probability: config.square_probability,
            reroll_empty: config.reroll_empty,
        })
    }

    pub fn raw_pattern(&mut self) -> Pattern {
        let mut rows = [[false; PIECE_LENGTH]; PIECE_LENGTH];
        for cell in rows.iter_mut().flatten() {
            *cell = self.rng.gen_range(0..100) < self.square_probability;
        }
        Pattern::from_rows(rows)
    }

    pub fn build_shape(&mut self) -> Shape {
        loop {
            let shape = self.raw_pattern().pipe(Shape::from_pattern);
            if !(shape.is_empty() && self.reroll_empty) {
                return shape;
            }
            trace!("rerolling empty shape");
        }
    }

    pub fn pick_color(&mut self) -> Rgba {
        self.palette.pick(&mut self.rng)
    }

    pub fn build_piece(&mut self) -> Piece {
        let shape = self.build_shape();
        Piece::new(self.pick_color(), shape)
    }

    pub fn build_tray(&mut self) -> Tray {
        Tray::from_slots(std::array::from_fn(|_| Some(self.build_piece())))
    }
}
