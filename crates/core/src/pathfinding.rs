//! Grid shortest paths over the maze wall topology.
//! Four-directional moves, unit cost, Manhattan heuristic. By default a step is legal when the
//! departed cell's wall flag on that side is clear.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::maze::{MoveRule, WallGrid};
use crate::types::Cell;

/// Open-set entry. Field order is the priority: lowest f, then lowest h, then row and column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct OpenNode {
    f: u32,
    h: u32,
    row: i32,
    col: i32,
}

impl OpenNode {
    fn cell(self) -> Cell {
        Cell::new(self.col, self.row)
    }
}

/// Cells from the step after `start` up to and including `goal`. Empty when the cells are equal,
/// the goal is unreachable, or the expansion budget of `4 * cols * rows` runs out.
pub fn find_path(grid: &WallGrid, start: Cell, goal: Cell) -> Vec<Cell> {
    find_path_by(grid, start, goal, MoveRule::DepartedEdge)
}

pub fn find_path_by(grid: &WallGrid, start: Cell, goal: Cell, rule: MoveRule) -> Vec<Cell> {
    if start == goal || !grid.in_bounds(start) || !grid.in_bounds(goal) {
        return Vec::new();
    }

    let max_expansions = 4 * grid.cell_count();
    let mut open_set = BTreeSet::new();
    let mut g_score = BTreeMap::new();
    let mut came_from = BTreeMap::new();
    let h = manhattan(start, goal);
    open_set.insert(OpenNode { f: h, h, row: start.row, col: start.col });
    g_score.insert(start, 0_u32);

    let mut expansions = 0;
    while expansions < max_expansions
        && let Some(node) = open_set.pop_first()
    {
        expansions += 1;
        let current = node.cell();
        if current == goal {
            return reconstruct_path(&came_from, start, goal);
        }
        let Some(&current_g) = g_score.get(&current) else {
            continue;
        };
        for next in grid.neighbors_by(current, rule) {
            let tentative = current_g + 1;
            if tentative < g_score.get(&next).copied().unwrap_or(u32::MAX) {
                came_from.insert(next, current);
                g_score.insert(next, tentative);
                let h = manhattan(next, goal);
                open_set.insert(OpenNode { f: tentative + h, h, row: next.row, col: next.col });
            }
        }
    }
    Vec::new()
}

fn reconstruct_path(came_from: &BTreeMap<Cell, Cell>, start: Cell, goal: Cell) -> Vec<Cell> {
    let mut path = vec![goal];
    let mut cell = goal;
    while let Some(&previous) = came_from.get(&cell) {
        if previous == start {
            break;
        }
        path.push(previous);
        cell = previous;
    }
    path.reverse();
    path
}

/// Breadth-first step distances to every cell reachable from `start` under the same move rule.
pub fn step_distances(grid: &WallGrid, start: Cell) -> BTreeMap<Cell, u32> {
    let mut distances = BTreeMap::new();
    if !grid.in_bounds(start) {
        return distances;
    }
    let mut queue = VecDeque::new();
    distances.insert(start, 0);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        let next_distance = distances[&current] + 1;
        for next in grid.open_neighbors(current) {
            if !distances.contains_key(&next) {
                distances.insert(next, next_distance);
                queue.push_back(next);
            }
        }
    }
    distances
}

pub fn manhattan(a: Cell, b: Cell) -> u32 {
    a.col.abs_diff(b.col) + a.row.abs_diff(b.row)
}
