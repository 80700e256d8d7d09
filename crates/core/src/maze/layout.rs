//! Room rectangles, perimeter stamping and L-shaped corridor carving.

use serde::{Deserialize, Serialize};

use crate::rng::ArenaRng;
use crate::types::{Cell, Side};

use super::grid::WallGrid;

/// Rectangle of cells. Rooms may overlap; each stamps its own perimeter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Room {
    pub col: i32,
    pub row: i32,
    pub width: i32,
    pub height: i32,
}

impl Room {
    pub const fn new(col: i32, row: i32, width: i32, height: i32) -> Self {
        Self { col, row, width, height }
    }

    fn right(self) -> i32 {
        self.col + self.width - 1
    }

    fn bottom(self) -> i32 {
        self.row + self.height - 1
    }

    pub fn center(self) -> Cell {
        Cell::new(self.col + self.width / 2, self.row + self.height / 2)
    }

    pub fn contains(self, cell: Cell) -> bool {
        cell.col >= self.col
            && cell.col <= self.right()
            && cell.row >= self.row
            && cell.row <= self.bottom()
    }

    /// Shrink and shift the room so it fits the grid, keeping a one-cell margin when the grid
    /// is wide enough for one.
    pub fn clamped(self, cols: i32, rows: i32) -> Self {
        let (col, width) = clamp_axis(self.col, self.width, cols);
        let (row, height) = clamp_axis(self.row, self.height, rows);
        Self { col, row, width, height }
    }

    pub(super) fn random(
        rng: &mut ArenaRng,
        cols: i32,
        rows: i32,
        min_size: i32,
        max_size: i32,
    ) -> Self {
        let width = rng.range_i32(min_size, max_size).min(axis_capacity(cols));
        let height = rng.range_i32(min_size, max_size).min(axis_capacity(rows));
        let col = rng.range_i32(axis_margin(cols), cols - axis_margin(cols) - width);
        let row = rng.range_i32(axis_margin(rows), rows - axis_margin(rows) - height);
        Self { col, row, width, height }
    }
}

fn axis_margin(limit: i32) -> i32 {
    if limit >= 3 { 1 } else { 0 }
}

fn axis_capacity(limit: i32) -> i32 {
    (limit - 2 * axis_margin(limit)).max(1)
}

fn clamp_axis(origin: i32, extent: i32, limit: i32) -> (i32, i32) {
    let margin = axis_margin(limit);
    let extent = extent.clamp(1, axis_capacity(limit));
    let origin = origin.clamp(margin, (limit - margin - extent).max(margin));
    (origin, extent)
}

/// Set the outward-facing wall flags on every perimeter cell of the room.
pub(super) fn stamp_room(grid: &mut WallGrid, room: Room) {
    for col in room.col..=room.right() {
        for row in room.row..=room.bottom() {
            let cell = Cell::new(col, row);
            if col == room.col {
                grid.set_wall(cell, Side::Left);
            }
            if col == room.right() {
                grid.set_wall(cell, Side::Right);
            }
            if row == room.row {
                grid.set_wall(cell, Side::Top);
            }
            if row == room.bottom() {
                grid.set_wall(cell, Side::Bottom);
            }
        }
    }
}

/// Clear every cell on the horizontal run at `from`'s row, then the vertical run at `to`'s
/// column. Walls of unrelated rooms on the way are cleared too.
pub(super) fn carve_corridor(grid: &mut WallGrid, from: Cell, to: Cell) {
    for col in from.col.min(to.col)..=from.col.max(to.col) {
        grid.clear_cell(Cell::new(col, from.row));
    }
    for row in from.row.min(to.row)..=from.row.max(to.row) {
        grid.clear_cell(Cell::new(to.col, row));
    }
}

/// Connect rooms pairwise in catalogue order.
pub(super) fn carve_room_corridors(grid: &mut WallGrid, rooms: &[Room]) {
    for pair in rooms.windows(2) {
        carve_corridor(grid, pair[0].center(), pair[1].center());
    }
}
