//! Maze generation orchestration: room catalogue, stamping, corridors, wall derivation.

use tracing::info;

use crate::config::MazeConfig;
use crate::rng::ArenaRng;

use super::Maze;
use super::grid::WallGrid;
use super::layout::{Room, carve_room_corridors, stamp_room};
use super::walls::WallSegments;

pub struct MazeBuilder<'a> {
    config: &'a MazeConfig,
}

impl<'a> MazeBuilder<'a> {
    pub fn new(config: &'a MazeConfig) -> Self {
        Self { config }
    }

    /// Seed rooms followed by the configured number of random rooms, all clamped to the grid.
    pub fn room_catalogue(&self, rng: &mut ArenaRng) -> Vec<Room> {
        let MazeConfig { cols, rows, room_min_size, room_max_size, .. } = *self.config;
        let mut rooms: Vec<Room> =
            self.config.seed_rooms.iter().map(|room| room.clamped(cols, rows)).collect();
        for _ in 0..self.config.random_rooms {
            rooms.push(Room::random(rng, cols, rows, room_min_size, room_max_size));
        }
        rooms
    }

    pub fn build(&self, rng: &mut ArenaRng) -> Maze {
        let rooms = self.room_catalogue(rng);
        self.build_from_rooms(rooms)
    }

    /// Deterministic part of generation: stamp every room, then connect them in order.
    pub fn build_from_rooms(&self, rooms: Vec<Room>) -> Maze {
        let MazeConfig { cols, rows, cell_size, wall_thickness, .. } = *self.config;
        let rooms: Vec<Room> = rooms.into_iter().map(|room| room.clamped(cols, rows)).collect();

        let mut grid = WallGrid::open(cols, rows);
        for room in &rooms {
            stamp_room(&mut grid, *room);
        }
        carve_room_corridors(&mut grid, &rooms);

        let walls = WallSegments::from_grid(&grid, cell_size, wall_thickness);
        info!(
            cols,
            rows,
            rooms = rooms.len(),
            wall_segments = walls.len(),
            "maze_generated"
        );
        Maze { grid, rooms, walls, cell_size }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pathfinding::find_path;

    fn small_config() -> MazeConfig {
        MazeConfig {
            cols: 20,
            rows: 14,
            seed_rooms: vec![Room::new(1, 1, 5, 4), Room::new(12, 8, 6, 5)],
            random_rooms: 3,
            ..MazeConfig::default()
        }
    }

    #[test]
    fn every_wall_segment_lies_within_world_bounds() {
        let config = MazeConfig::default();
        for seed in 0..8 {
            let maze = MazeBuilder::new(&config).build(&mut ArenaRng::seed_from_u64(seed));
            let bounds = maze.world_bounds();
            assert!(!maze.walls().is_empty());
            for wall in maze.walls().iter() {
                assert!(wall.contained_in(&bounds), "seed {seed}: {wall:?} escapes {bounds:?}");
            }
        }
    }

    #[test]
    fn corridors_connect_successive_room_centres() {
        let config = small_config();
        for seed in 0..16 {
            let maze = MazeBuilder::new(&config).build(&mut ArenaRng::seed_from_u64(seed));
            for pair in maze.rooms().windows(2) {
                let (from, to) = (pair[0].center(), pair[1].center());
                if from == to {
                    continue;
                }
                let path = find_path(maze.grid(), from, to);
                assert_eq!(path.last().copied(), Some(to), "seed {seed}: {from:?} -> {to:?}");
            }
        }
    }

    #[test]
    fn catalogue_keeps_seed_rooms_first_and_adds_random_rooms() {
        let config = small_config();
        let rooms = MazeBuilder::new(&config).room_catalogue(&mut ArenaRng::seed_from_u64(3));
        assert_eq!(rooms.len(), 5);
        assert_eq!(&rooms[..2], &config.seed_rooms[..]);
    }

    #[test]
    fn oversized_rooms_are_clamped_instead_of_panicking() {
        let config = MazeConfig { cols: 6, rows: 5, random_rooms: 0, ..MazeConfig::default() };
        let maze = MazeBuilder::new(&config).build_from_rooms(vec![Room::new(-4, 2, 40, 40)]);
        assert_eq!(maze.rooms(), &[Room::new(1, 1, 4, 3)]);
        let bounds = maze.world_bounds();
        assert!(maze.walls().iter().all(|wall| wall.contained_in(&bounds)));
    }
}
