//! Room-based maze construction split into grid, layout, wall-derivation and builder submodules.

mod builder;
mod grid;
mod layout;
mod walls;

use glam::Vec2;

use crate::geometry::Rect;
use crate::types::Cell;

pub use builder::MazeBuilder;
pub use grid::{MoveRule, WallGrid};
pub use layout::Room;
pub use walls::WallSegments;

/// Generated maze. Built once at match start and only read afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Maze {
    grid: WallGrid,
    rooms: Vec<Room>,
    walls: WallSegments,
    cell_size: f32,
}

impl Maze {
    /// Maze without a single wall, for open-field scenarios.
    pub fn open(cols: i32, rows: i32, cell_size: f32) -> Self {
        Self::with_walls(WallGrid::open(cols, rows), WallSegments::default(), cell_size)
    }

    /// Maze whose collision segments are supplied directly instead of derived from the grid.
    pub fn with_walls(grid: WallGrid, walls: WallSegments, cell_size: f32) -> Self {
        Self { grid, rooms: Vec::new(), walls, cell_size }
    }

    pub fn grid(&self) -> &WallGrid {
        &self.grid
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn walls(&self) -> &WallSegments {
        &self.walls
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn world_size(&self) -> Vec2 {
        Vec2::new(self.grid.cols() as f32, self.grid.rows() as f32) * self.cell_size
    }

    pub fn world_bounds(&self) -> Rect {
        let size = self.world_size();
        Rect::new(0.0, 0.0, size.x, size.y)
    }

    /// Cell containing a world point (floor division, may be out of bounds).
    pub fn cell_at(&self, pos: Vec2) -> Cell {
        Cell::new((pos.x / self.cell_size).floor() as i32, (pos.y / self.cell_size).floor() as i32)
    }

    pub fn cell_center(&self, cell: Cell) -> Vec2 {
        (Vec2::new(cell.col as f32, cell.row as f32) + Vec2::splat(0.5)) * self.cell_size
    }
}
