use blockgame::{
    does_shape_fit, piece_size, CanvasPos, Config, CoordinateMapper, Game, GridPos, Palette,
    PaletteColor, Pattern, Piece, PointerState, Shape, COLS, NUM_PIECES, ROWS,
};
use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

fn raw_pattern() -> impl Strategy<Value = Pattern> {
    proptest::array::uniform3(proptest::array::uniform3(any::<bool>())).prop_map(Pattern::from_rows)
}

proptest! {
    #[test]
    fn trimmed_shapes_start_at_origin(pattern in raw_pattern()) {
        let shape = Shape::from_pattern(pattern);
        prop_assert_eq!(shape.filled().count(), pattern.cells().filter(|(_, c)| **c).count());
        if !shape.is_empty() {
            prop_assert!(!shape.pattern().top_row_empty());
            prop_assert!(!shape.pattern().left_column_empty());
        }
    }

    #[test]
    fn shape_fits_exactly_inside_the_grid(pattern in raw_pattern(), x in -5i32..15, y in -5i32..15) {
        let piece = Piece::new(PaletteColor::Violet.rgba(), Shape::from_pattern(pattern));
        let size = piece_size(&piece);
        let expected = (0..=COLS as i32 - size.width).contains(&x)
            && (0..=ROWS as i32 - size.height).contains(&y);
        prop_assert_eq!(does_shape_fit(GridPos::new(x, y), &piece), expected);
    }

    #[test]
    fn grid_canvas_round_trip(cell_size in 1i32..200, x in 0i32..COLS as i32, y in 0i32..ROWS as i32) {
        let mapper = CoordinateMapper::new(cell_size, 0.95);
        let pos = GridPos::new(x, y);
        prop_assert_eq!(mapper.canvas_to_grid(mapper.grid_to_canvas(pos)), pos);
    }

    #[test]
    fn negative_canvas_has_no_cell(cell_size in 1i32..200, x in -1000i32..1000, y in -1000i32..0) {
        let mapper = CoordinateMapper::new(cell_size, 0.95);
        prop_assert_eq!(mapper.canvas_to_grid(CanvasPos::new(x, y)), GridPos::INVALID);
        prop_assert_eq!(mapper.canvas_to_grid(CanvasPos::new(y, x)), GridPos::INVALID);
    }

    #[test]
    fn drag_starts_without_jumping(seed in any::<u64>(), slot in 0..NUM_PIECES, dx in 0i32..150, dy in 0i32..150) {
        let mut game = Game::new(&Config::default(), 50, Palette::default(), StdRng::seed_from_u64(seed)).unwrap();
        let home = game.mapper().grid_to_canvas(Piece::home(slot));
        let pointer = home + CanvasPos::new(dx, dy);
        game.update(&PointerState { position: pointer, pressed: true, released: false });
        prop_assert_eq!(game.dragging_slot(), Some(slot));
        let offset = game.tray().get(slot).unwrap().drag_offset().unwrap();
        prop_assert_eq!(pointer - offset, home);
    }
}
