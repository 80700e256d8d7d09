//! Wall segments: thin world rectangles derived once from cell wall flags.
//! They are the only collision and line-of-sight primitive after generation.

use glam::Vec2;

use crate::geometry::Rect;
use crate::types::Side;

use super::grid::WallGrid;

/// Immutable segment list behind a small query surface. Queries scan linearly; a bucketed index
/// keyed by cell can replace the storage without touching callers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WallSegments {
    rects: Vec<Rect>,
}

impl WallSegments {
    pub fn new(rects: Vec<Rect>) -> Self {
        Self { rects }
    }

    pub fn from_grid(grid: &WallGrid, cell_size: f32, thickness: f32) -> Self {
        let mut rects = Vec::new();
        for cell in grid.cells() {
            let origin = Vec2::new(cell.col as f32, cell.row as f32) * cell_size;
            let walls = grid.walls(cell);
            for side in Side::ALL {
                if walls[side.index()] {
                    rects.push(edge_rect(origin, side, cell_size, thickness));
                }
            }
        }
        Self { rects }
    }

    /// First segment, in derivation order, that overlaps `probe`.
    pub fn first_hit(&self, probe: &Rect) -> Option<&Rect> {
        self.rects.iter().find(|wall| wall.intersects(probe))
    }

    pub fn blocks(&self, probe: &Rect) -> bool {
        self.first_hit(probe).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rect> {
        self.rects.iter()
    }

    pub fn as_slice(&self) -> &[Rect] {
        &self.rects
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

fn edge_rect(origin: Vec2, side: Side, cell_size: f32, thickness: f32) -> Rect {
    match side {
        Side::Top => Rect::new(origin.x, origin.y, cell_size, thickness),
        Side::Right => Rect::new(origin.x + cell_size - thickness, origin.y, thickness, cell_size),
        Side::Bottom => Rect::new(origin.x, origin.y + cell_size - thickness, cell_size, thickness),
        Side::Left => Rect::new(origin.x, origin.y, thickness, cell_size),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    #[test]
    fn each_flag_becomes_one_thin_edge_rect() {
        let mut grid = WallGrid::open(3, 3);
        grid.set_wall(Cell::new(1, 1), Side::Top);
        grid.set_wall(Cell::new(1, 1), Side::Right);
        grid.set_wall(Cell::new(2, 0), Side::Bottom);

        let walls = WallSegments::from_grid(&grid, 40.0, 3.0);
        assert_eq!(
            walls.as_slice(),
            &[
                Rect::new(40.0, 40.0, 40.0, 3.0),
                Rect::new(77.0, 40.0, 3.0, 40.0),
                Rect::new(80.0, 37.0, 40.0, 3.0),
            ]
        );
    }

    #[test]
    fn first_hit_returns_earliest_overlapping_segment() {
        let walls = WallSegments::new(vec![
            Rect::new(0.0, 0.0, 3.0, 40.0),
            Rect::new(0.0, 0.0, 40.0, 3.0),
        ]);
        let probe = Rect::new(1.0, 1.0, 4.0, 4.0);
        assert_eq!(walls.first_hit(&probe), Some(&Rect::new(0.0, 0.0, 3.0, 40.0)));
        assert!(!walls.blocks(&Rect::new(10.0, 10.0, 4.0, 4.0)));
    }
}
