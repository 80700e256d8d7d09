//! Cell wall-flag storage and the movement rules shared by the pathfinder and spawner.

use crate::types::{Cell, Side};

/// Which wall flags gate a step between neighbouring cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MoveRule {
    /// Only the departed cell's flag on the shared edge. Used by autonomous agents, which follow
    /// paths without colliding.
    #[default]
    DepartedEdge,
    /// Both cells' flags on the shared edge. Bodies that collide with wall segments need this,
    /// since each flag becomes its own segment.
    BothEdges,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WallGrid {
    cols: i32,
    rows: i32,
    flags: Vec<[bool; 4]>,
}

impl WallGrid {
    /// Grid with every cell fully open.
    pub fn open(cols: i32, rows: i32) -> Self {
        let cols = cols.max(0);
        let rows = rows.max(0);
        Self { cols, rows, flags: vec![[false; 4]; (cols * rows) as usize] }
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.col >= 0 && cell.row >= 0 && cell.col < self.cols && cell.row < self.rows
    }

    /// Wall flags of a cell; out-of-bounds cells read as fully walled.
    pub fn walls(&self, cell: Cell) -> [bool; 4] {
        if !self.in_bounds(cell) {
            return [true; 4];
        }
        self.flags[self.index(cell)]
    }

    pub fn has_wall(&self, cell: Cell, side: Side) -> bool {
        self.walls(cell)[side.index()]
    }

    pub fn set_wall(&mut self, cell: Cell, side: Side) {
        if !self.in_bounds(cell) {
            return;
        }
        let idx = self.index(cell);
        self.flags[idx][side.index()] = true;
    }

    /// Force every flag of the cell open, whatever stamped it.
    pub fn clear_cell(&mut self, cell: Cell) {
        if !self.in_bounds(cell) {
            return;
        }
        let idx = self.index(cell);
        self.flags[idx] = [false; 4];
    }

    /// A step is legal when the neighbour exists and the departed cell's shared edge is open.
    pub fn can_step(&self, cell: Cell, side: Side) -> bool {
        self.can_step_by(cell, side, MoveRule::DepartedEdge)
    }

    pub fn can_step_by(&self, cell: Cell, side: Side, rule: MoveRule) -> bool {
        let next = cell.step(side);
        if !self.in_bounds(next) || self.has_wall(cell, side) {
            return false;
        }
        match rule {
            MoveRule::DepartedEdge => true,
            MoveRule::BothEdges => !self.has_wall(next, side.opposite()),
        }
    }

    pub fn open_neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        self.neighbors_by(cell, MoveRule::DepartedEdge)
    }

    pub fn neighbors_by(&self, cell: Cell, rule: MoveRule) -> impl Iterator<Item = Cell> + '_ {
        Side::ALL
            .into_iter()
            .filter(move |side| self.can_step_by(cell, *side, rule))
            .map(move |side| cell.step(side))
    }

    /// Cells in column-major order, the order wall segments are derived in.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.cols).flat_map(move |col| (0..self.rows).map(move |row| Cell::new(col, row)))
    }

    pub(crate) fn index(&self, cell: Cell) -> usize {
        (cell.row * self.cols + cell.col) as usize
    }

    pub(crate) fn cell_count(&self) -> usize {
        self.flags.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_checks_only_the_departed_cells_flag() {
        let mut grid = WallGrid::open(3, 1);
        grid.set_wall(Cell::new(1, 0), Side::Left);

        assert!(grid.can_step(Cell::new(0, 0), Side::Right), "left cell's right edge is open");
        assert!(!grid.can_step(Cell::new(1, 0), Side::Left));
        assert!(!grid.can_step(Cell::new(2, 0), Side::Right), "no neighbour past the edge");
    }

    #[test]
    fn both_edges_rule_respects_the_neighbours_flag_too() {
        let mut grid = WallGrid::open(3, 1);
        grid.set_wall(Cell::new(1, 0), Side::Left);

        assert!(!grid.can_step_by(Cell::new(0, 0), Side::Right, MoveRule::BothEdges));
        assert!(grid.can_step_by(Cell::new(1, 0), Side::Right, MoveRule::BothEdges));
        let neighbours: Vec<Cell> = grid.neighbors_by(Cell::new(1, 0), MoveRule::BothEdges).collect();
        assert_eq!(neighbours, vec![Cell::new(2, 0)]);
    }

    #[test]
    fn out_of_bounds_reads_as_walled_and_ignores_writes() {
        let mut grid = WallGrid::open(2, 2);
        grid.set_wall(Cell::new(5, 5), Side::Top);
        grid.clear_cell(Cell::new(-1, 0));
        assert_eq!(grid.walls(Cell::new(5, 5)), [true; 4]);
        assert!(grid.cells().all(|cell| grid.walls(cell) == [false; 4]));
    }

    #[test]
    fn cells_iterate_column_major() {
        let grid = WallGrid::open(2, 2);
        let order: Vec<Cell> = grid.cells().collect();
        assert_eq!(
            order,
            vec![Cell::new(0, 0), Cell::new(0, 1), Cell::new(1, 0), Cell::new(1, 1)]
        );
    }
}
