use tracing::debug;

use crate::{
    CanvasPos, CoordinateMapper, GridPos, Rect, Rgba, Shape, COLS, NUM_PIECES, PIECES_PER_COLUMN,
    PIECE_LENGTH,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    /// Sitting in its tray slot.
    #[default]
    Idle,
    /// Following the pointer. `offset` is the pointer's position relative to the piece's
    /// top-left corner when the drag started.
    Dragging { offset: CanvasPos },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    color: Rgba,
    shape: Shape,
    drag: DragState,
}

impl Piece {
    pub fn new(color: Rgba, shape: Shape) -> Self {
        Self {
            color,
            shape,
            drag: DragState::Idle,
        }
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    pub fn drag_offset(&self) -> Option<CanvasPos> {
        match self.drag {
            DragState::Dragging { offset } => Some(offset),
            DragState::Idle => None,
        }
    }

    /// Tray slot position of the piece in `slot`. Slots stack top to bottom, then spill into
    /// the next tray column.
    pub fn home(slot: usize) -> GridPos {
        let column = slot / PIECES_PER_COLUMN;
        let row = slot % PIECES_PER_COLUMN;
        GridPos::new(
            (COLS + column * PIECE_LENGTH) as i32,
            (row * PIECE_LENGTH) as i32,
        )
    }

    /// The square the pointer has to press inside to pick up the piece in `slot`.
    pub fn home_rect(slot: usize, mapper: &CoordinateMapper) -> Rect {
        let corner = mapper.grid_to_canvas(Self::home(slot));
        let side = (PIECE_LENGTH as i32 * mapper.cell_size()) as f32;
        Rect::new(corner.x as f32, corner.y as f32, side, side)
    }

    /// Does nothing if the piece is already being dragged.
    pub fn start_drag(&mut self, pointer: CanvasPos, home: CanvasPos) {
        if self.is_dragging() {
            return;
        }
        let offset = pointer - home;
        debug!(?offset, "start drag");
        self.drag = DragState::Dragging { offset };
    }

    pub fn stop_drag(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Where the piece's top-left corner is drawn this frame.
    pub fn origin(&self, slot: usize, pointer: CanvasPos, mapper: &CoordinateMapper) -> CanvasPos {
        match self.drag {
            DragState::Idle => mapper.grid_to_canvas(Self::home(slot)),
            DragState::Dragging { offset } => pointer - offset,
        }
    }

    /// Grid position the piece would snap to if dropped now. Aims from the centre of the
    /// piece's top-left cell rather than its corner.
    pub fn shadow(&self, pointer: CanvasPos, mapper: &CoordinateMapper) -> Option<GridPos> {
        let offset = self.drag_offset()?;
        Some(mapper.canvas_to_grid(pointer + mapper.half_cell() - offset))
            .filter(|pos| pos.is_valid())
    }
}

/// The pieces waiting to be placed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tray {
    slots: [Option<Piece>; NUM_PIECES],
}

impl Tray {
    pub fn from_slots(slots: [Option<Piece>; NUM_PIECES]) -> Self {
        Self { slots }
    }

    pub fn get(&self, slot: usize) -> Option<&Piece> {
        self.slots.get(slot)?.as_ref()
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut Piece> {
        self.slots.get_mut(slot)?.as_mut()
    }

    pub fn take(&mut self, slot: usize) -> Option<Piece> {
        self.slots.get_mut(slot)?.take()
    }

    /// Occupied slots, in slot order.
    pub fn pieces(&self) -> impl Iterator<Item = (usize, &Piece)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, piece)| Some((slot, piece.as_ref()?)))
    }

    pub fn pieces_mut(&mut self) -> impl Iterator<Item = (usize, &mut Piece)> + '_ {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(slot, piece)| Some((slot, piece.as_mut()?)))
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn dragging_slot(&self) -> Option<usize> {
        self.pieces()
            .find(|(_, piece)| piece.is_dragging())
            .map(|(slot, _)| slot)
    }

    /// Occupied slots in the order they should be drawn: the dragged piece goes last so it
    /// ends up on top.
    pub fn render_order(&self) -> Vec<usize> {
        let (dragging, idle): (Vec<_>, Vec<_>) = self
            .pieces()
            .partition(|(_, piece)| piece.is_dragging());
        idle.into_iter()
            .chain(dragging)
            .map(|(slot, _)| slot)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{pattern, PaletteColor};

    fn mapper() -> CoordinateMapper {
        CoordinateMapper::new(50, 0.95)
    }

    fn piece() -> Piece {
        Piece::new(
            PaletteColor::Pink.rgba(),
            Shape::from_pattern(pattern![
                [# # .],
                [# . .],
                [. . .],
            ]),
        )
    }

    #[test]
    fn homes_stack_beside_the_grid() {
        assert_eq!(Piece::home(0), GridPos::new(9, 0));
        assert_eq!(Piece::home(1), GridPos::new(9, 3));
        assert_eq!(Piece::home(2), GridPos::new(9, 6));
        assert_eq!(Piece::home(3), GridPos::new(12, 0));
    }

    #[test]
    fn home_rect_covers_the_whole_slot() {
        assert_eq!(
            Piece::home_rect(1, &mapper()),
            Rect::new(450.0, 150.0, 150.0, 150.0)
        );
    }

    #[test]
    fn drag_offset_keeps_piece_under_pointer() {
        let mut p = piece();
        let home = mapper().grid_to_canvas(Piece::home(0));
        let pointer = CanvasPos::new(471, 33);
        p.start_drag(pointer, home);
        assert_eq!(p.drag_offset(), Some(CanvasPos::new(21, 33)));
        assert_eq!(pointer - p.drag_offset().unwrap(), home);
        assert_eq!(p.origin(0, pointer, &mapper()), home);
        assert_eq!(
            p.origin(0, CanvasPos::new(100, 100), &mapper()),
            CanvasPos::new(79, 67)
        );
    }

    #[test]
    fn second_start_keeps_first_offset() {
        let mut p = piece();
        p.start_drag(CanvasPos::new(460, 10), CanvasPos::new(450, 0));
        p.start_drag(CanvasPos::new(500, 100), CanvasPos::new(450, 0));
        assert_eq!(p.drag_offset(), Some(CanvasPos::new(10, 10)));
    }

    #[test]
    fn stop_drag_returns_home() {
        let mut p = piece();
        p.start_drag(CanvasPos::new(460, 10), CanvasPos::new(450, 0));
        p.stop_drag();
        assert_eq!(p.drag_state(), DragState::Idle);
        assert_eq!(
            p.origin(0, CanvasPos::new(5, 5), &mapper()),
            CanvasPos::new(450, 0)
        );
    }

    #[test]
    fn shadow_aims_from_cell_centre() {
        let mut p = piece();
        assert_eq!(p.shadow(CanvasPos::new(0, 0), &mapper()), None);
        p.start_drag(CanvasPos::new(460, 10), CanvasPos::new(450, 0));
        // corner at (90, 140): nudged by half a cell to (115, 165)
        assert_eq!(
            p.shadow(CanvasPos::new(100, 150), &mapper()),
            Some(GridPos::new(2, 3))
        );
        // corner at (-20, 0): the nudge still lands on the grid
        assert_eq!(
            p.shadow(CanvasPos::new(-10, 10), &mapper()),
            Some(GridPos::new(0, 0))
        );
        assert_eq!(p.shadow(CanvasPos::new(-50, 10), &mapper()), None);
    }

    #[test]
    fn render_order_puts_dragged_piece_last() {
        let mut tray = Tray::from_slots([Some(piece()), Some(piece()), Some(piece())]);
        assert_eq!(tray.render_order(), vec![0, 1, 2]);
        tray.get_mut(0)
            .unwrap()
            .start_drag(CanvasPos::new(460, 10), CanvasPos::new(450, 0));
        assert_eq!(tray.render_order(), vec![1, 2, 0]);
        assert_eq!(tray.dragging_slot(), Some(0));
    }

    #[test]
    fn taken_slots_are_skipped() {
        let mut tray = Tray::from_slots([Some(piece()), Some(piece()), None]);
        assert!(tray.take(1).is_some());
        assert_eq!(tray.render_order(), vec![0]);
        assert!(tray.take(0).is_some());
        assert!(tray.is_empty());
        assert_eq!(tray.take(5), None);
    }
}
