pub mod agent;
pub mod ai;
pub mod arena;
pub mod autopilot;
pub mod combat;
pub mod config;
pub mod geometry;
pub mod journal;
pub mod journal_file;
pub mod maze;
pub mod pathfinding;
pub mod pickups;
pub mod projectile;
pub mod replay;
pub mod rng;
pub mod sight;
pub mod types;

pub use agent::{Agent, Body, Controller};
pub use arena::{AgentView, Arena, ArenaLayout, ArenaSnapshot, PickupView, ProjectileView};
pub use autopilot::HumanAutopilot;
pub use config::{ArenaConfig, ConfigError};
pub use geometry::Rect;
pub use journal::{IntentJournal, IntentRecord};
pub use journal_file::{JournalLoadError, JournalWriter, LoadedJournal, load_journal_from_file};
pub use maze::{Maze, MazeBuilder, MoveRule, Room, WallGrid, WallSegments};
pub use pathfinding::{find_path, find_path_by};
pub use projectile::{AUTONOMOUS_PROJECTILE_DAMAGE, Projectile};
pub use replay::*;
pub use sight::{has_line_of_sight, ricochet_aim_point};
pub use types::*;
