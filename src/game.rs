//! Per-frame interaction: pointer edges in, drag state changes out, then a read-only render.

use generic_new::GenericNew;
use rand::Rng;
use tracing::{debug, info, trace, warn};

use crate::{
    cell_size_for_monitor, check, Board, CanvasPos, Config, ConfigError, CoordinateMapper, Fit,
    GridPos, Palette, Piece, PlacementRule, Rect, Rgba, Shape, ShapeGenerator, Tray,
    MAX_CELL_SIZE,
};

/// Where the pointer is, and which button edges happened since the last frame.
pub trait Pointer {
    fn position(&self) -> CanvasPos;
    fn pressed_this_frame(&self) -> bool;
    fn released_this_frame(&self) -> bool;
}

/// A pointer sampled once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, GenericNew)]
pub struct PointerState {
    pub position: CanvasPos,
    pub pressed: bool,
    pub released: bool,
}

impl Pointer for PointerState {
    fn position(&self) -> CanvasPos {
        self.position
    }

    fn pressed_this_frame(&self) -> bool {
        self.pressed
    }

    fn released_this_frame(&self) -> bool {
        self.released
    }
}

pub trait Canvas {
    /// Paint the whole canvas.
    fn clear(&mut self, color: Rgba);
    fn fill_rect(&mut self, rect: Rect, color: Rgba);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    DragStarted { slot: usize },
    /// The piece went back to its slot. `fit` says why it wasn't placed.
    Released { slot: usize, fit: Fit },
    Placed { slot: usize, at: GridPos },
}

#[derive(Debug)]
pub struct Game<R> {
    board: Board,
    tray: Tray,
    mapper: CoordinateMapper,
    generator: ShapeGenerator<R>,
    placement: PlacementRule,
    shadow_alpha: u8,
}

impl<R: Rng> Game<R> {
    pub fn new(
        config: &Config,
        cell_size: i32,
        palette: Palette,
        rng: R,
    ) -> Result<Self, ConfigError> {
        let generator = ShapeGenerator::new(rng, palette, config)?;
        if !(1..=MAX_CELL_SIZE).contains(&cell_size) {
            return Err(ConfigError::CellSize(cell_size));
        }
        let mut game = Self {
            board: Board::default(),
            tray: Tray::default(),
            mapper: CoordinateMapper::new(cell_size, config.square_amount),
            generator,
            placement: config.placement,
            shadow_alpha: config.shadow_alpha,
        };
        game.rebuild_tray();
        Ok(game)
    }

    /// Size cells to fit a monitor of `width * height` pixels.
    pub fn for_monitor(
        config: &Config,
        (width, height): (i32, i32),
        palette: Palette,
        rng: R,
    ) -> Result<Self, ConfigError> {
        let cell_size = cell_size_for_monitor(width, height, config.window_size);
        Self::new(config, cell_size, palette, rng)
    }

    pub fn rebuild_tray(&mut self) {
        self.tray = self.generator.build_tray();
        info!("tray rebuilt");
    }

    /// Pick up on press, drop on release, in that order.
    pub fn update(&mut self, pointer: &impl Pointer) -> Vec<Event> {
        let position = pointer.position();
        trace!(
            ?position,
            pressed = pointer.pressed_this_frame(),
            released = pointer.released_this_frame(),
            "frame"
        );
        let mut events = Vec::new();
        if pointer.pressed_this_frame() {
            events.extend(self.pick_up(position));
        }
        if pointer.released_this_frame() {
            events.extend(self.drop_dragged(position));
        }
        events
    }

    fn pick_up(&mut self, pointer: CanvasPos) -> Option<Event> {
        // one drag at a time
        if self.tray.dragging_slot().is_some() {
            return None;
        }
        let mapper = self.mapper;
        let (slot, piece) = self.tray.pieces_mut().find(|(slot, piece)| {
            !piece.is_dragging() && Piece::home_rect(*slot, &mapper).contains(pointer)
        })?;
        piece.start_drag(pointer, mapper.grid_to_canvas(Piece::home(slot)));
        debug!(slot, "picked up");
        Some(Event::DragStarted { slot })
    }

    fn drop_dragged(&mut self, pointer: CanvasPos) -> Option<Event> {
        let slot = self.tray.dragging_slot()?;
        let piece = self.tray.get_mut(slot)?;
        let target = piece.shadow(pointer, &self.mapper);
        piece.stop_drag();
        let piece = *piece;

        let Some(at) = target else {
            debug!(slot, "dropped off the grid");
            return Some(Event::Released {
                slot,
                fit: Fit::OutOfBounds,
            });
        };
        let fit = check(&self.board, at, piece.shape(), self.placement);
        if self.placement == PlacementRule::BoundsOnly || !fit.fits() {
            debug!(slot, ?at, ?fit, "released");
            return Some(Event::Released { slot, fit });
        }

        match self.board.stamp(piece.shape(), at, piece.color()) {
            Ok(board) => self.board = board,
            Err(err) => {
                warn!(%err, slot, "fitting piece could not be stamped");
                return Some(Event::Released { slot, fit });
            }
        }
        self.tray.take(slot);
        debug!(slot, ?at, "placed");
        if self.tray.is_empty() {
            self.rebuild_tray();
        }
        Some(Event::Placed { slot, at })
    }
}

impl<R> Game<R> {
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn tray(&self) -> &Tray {
        &self.tray
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    pub fn dragging_slot(&self) -> Option<usize> {
        self.tray.dragging_slot()
    }

    /// Grid position the dragged piece would land on, if it may land there.
    pub fn shadow(&self, pointer: CanvasPos) -> Option<GridPos> {
        let piece = self.tray.get(self.tray.dragging_slot()?)?;
        piece
            .shadow(pointer, &self.mapper)
            .filter(|at| check(&self.board, *at, piece.shape(), self.placement).fits())
    }

    /// Clear, then grid cells, then idle pieces, then the dragged piece's shadow and the piece
    /// itself.
    pub fn render(&self, pointer: CanvasPos, canvas: &mut impl Canvas) {
        canvas.clear(Rgba::CLEAR);
        for (pos, cell) in self.board.cells() {
            canvas.fill_rect(self.mapper.grid_to_rectangle(pos), cell.color());
        }
        for slot in self.tray.render_order() {
            let Some(piece) = self.tray.get(slot) else {
                continue;
            };
            if piece.is_dragging() {
                if let Some(at) = self.shadow(pointer) {
                    let shadow = piece.color().with_alpha(self.shadow_alpha);
                    self.draw_shape(canvas, piece.shape(), self.mapper.grid_to_canvas(at), shadow);
                }
            }
            let origin = piece.origin(slot, pointer, &self.mapper);
            self.draw_shape(canvas, piece.shape(), origin, piece.color());
        }
    }

    fn draw_shape(&self, canvas: &mut impl Canvas, shape: &Shape, origin: CanvasPos, color: Rgba) {
        for offset in shape.filled() {
            let corner = origin + self.mapper.grid_to_canvas(offset);
            canvas.fill_rect(self.mapper.canvas_to_rectangle(corner), color);
        }
    }
}
