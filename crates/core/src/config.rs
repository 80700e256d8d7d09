//! Tunable constants for one arena match.
//! Every group deserializes with defaults, so partial config files only override what they name.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::maze::Room;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid must have at least one column and one row, got {cols}x{rows}")]
    EmptyGrid { cols: i32, rows: i32 },
    #[error("`{field}` must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("`{field}` range is inverted: min {min} > max {max}")]
    InvertedRange { field: &'static str, min: f32, max: f32 },
    #[error("`{field}` must lie in [0, 1], got {value}")]
    OutOfUnitRange { field: &'static str, value: f32 },
    #[error("wall thickness {thickness} must be below the cell size {cell_size}")]
    WallTooThick { thickness: f32, cell_size: f32 },
    #[error("max bounce count must be at least 1")]
    ZeroBounces,
    #[error("`{field}` must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("`{field}` of {margin} leaves no room inside a {width}x{height} world")]
    MarginTooWide { field: &'static str, margin: f32, width: f32, height: f32 },
}

/// Inclusive bounds for a uniformly drawn duration, in seconds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SecondsRange {
    pub min: f32,
    pub max: f32,
}

impl SecondsRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Seconds advanced per frame; timers count down by this amount.
    pub frame_dt: f32,
    pub maze: MazeConfig,
    pub human: HumanConfig,
    pub autonomous: AutonomousConfig,
    pub projectile: ProjectileConfig,
    pub ai: AiConfig,
    pub pickups: PickupConfig,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            frame_dt: 1.0 / 60.0,
            maze: MazeConfig::default(),
            human: HumanConfig::default(),
            autonomous: AutonomousConfig::default(),
            projectile: ProjectileConfig::default(),
            ai: AiConfig::default(),
            pickups: PickupConfig::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeConfig {
    pub cols: i32,
    pub rows: i32,
    pub cell_size: f32,
    pub wall_thickness: f32,
    pub seed_rooms: Vec<Room>,
    pub random_rooms: u32,
    pub room_min_size: i32,
    pub room_max_size: i32,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            cols: 50,
            rows: 36,
            cell_size: 40.0,
            wall_thickness: 3.0,
            seed_rooms: vec![
                Room::new(2, 2, 6, 5),
                Room::new(10, 3, 5, 6),
                Room::new(18, 2, 7, 4),
                Room::new(5, 12, 8, 5),
                Room::new(15, 10, 6, 6),
                Room::new(25, 5, 5, 7),
                Room::new(30, 12, 6, 6),
                Room::new(8, 20, 10, 5),
                Room::new(18, 18, 7, 6),
                Room::new(28, 20, 6, 6),
            ],
            random_rooms: 10,
            room_min_size: 4,
            room_max_size: 8,
        }
    }
}

impl MazeConfig {
    pub fn world_width(&self) -> f32 {
        self.cols as f32 * self.cell_size
    }

    pub fn world_height(&self) -> f32 {
        self.rows as f32 * self.cell_size
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HumanConfig {
    pub size: f32,
    pub speed: f32,
    pub max_health: i32,
    pub starting_ammo: u32,
    /// Inset from the world edge the human is clamped to after moving.
    pub bounds_margin: f32,
}

impl Default for HumanConfig {
    fn default() -> Self {
        Self { size: 28.0, speed: 2.6, max_health: 100, starting_ammo: 30, bounds_margin: 10.0 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutonomousConfig {
    pub count: u32,
    pub size: f32,
    pub speed: f32,
    pub max_health: i32,
}

impl Default for AutonomousConfig {
    fn default() -> Self {
        Self { count: 10, size: 26.0, speed: 1.9, max_health: 75 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    /// World units travelled per frame.
    pub speed: f32,
    pub radius: f32,
    pub human_damage: i32,
    pub max_bounces: u32,
    /// Fraction of the reflected velocity component kept after a wall impact.
    pub bounce_retention: f32,
    pub min_speed: f32,
    /// Fraction of the post-bounce velocity used to push the projectile clear of the wall.
    pub bounce_nudge: f32,
    pub out_of_bounds_margin: f32,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            speed: 14.0,
            radius: 4.0,
            human_damage: 32,
            max_bounces: 3,
            bounce_retention: 0.62,
            min_speed: 3.0,
            bounce_nudge: 0.4,
            out_of_bounds_margin: 40.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub fire_range: f32,
    pub ricochet_range: f32,
    /// Largest perpendicular offset of a wall centre from the shot line for ricochet aiming.
    pub ricochet_max_offset: f32,
    pub ricochet_jitter: f32,
    pub aim_jitter: f32,
    pub initial_cooldown: SecondsRange,
    pub direct_cooldown: SecondsRange,
    pub ricochet_cooldown: SecondsRange,
    pub path_refresh: SecondsRange,
    pub arrival_radius: f32,
    /// Per-frame probability of picking a new wander goal.
    pub wander_chance: f32,
    pub wander_radius: f32,
    /// Inset from the world edge that wander goals are clamped to.
    pub wander_margin: f32,
    /// Inset from the world edge that autonomous bodies are held within after moving.
    pub bounds_margin: f32,
    pub sight_spacing: f32,
    pub sight_probe_size: f32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            fire_range: 260.0,
            ricochet_range: 170.0,
            ricochet_max_offset: 90.0,
            ricochet_jitter: 6.0,
            aim_jitter: 10.0,
            initial_cooldown: SecondsRange::new(0.6, 1.6),
            direct_cooldown: SecondsRange::new(0.7, 1.6),
            ricochet_cooldown: SecondsRange::new(0.9, 1.8),
            path_refresh: SecondsRange::new(0.6, 1.5),
            arrival_radius: 4.0,
            wander_chance: 0.01,
            wander_radius: 80.0,
            wander_margin: 10.0,
            bounds_margin: 10.0,
            sight_spacing: 6.0,
            sight_probe_size: 4.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickupConfig {
    pub initial_count: u32,
    pub radius: f32,
    pub medkit_heal: i32,
    pub ammo_amount: u32,
    pub drop_chance: f32,
    pub drop_scatter: i32,
}

impl Default for PickupConfig {
    fn default() -> Self {
        Self {
            initial_count: 12,
            radius: 18.0,
            medkit_heal: 40,
            ammo_amount: 10,
            drop_chance: 0.6,
            drop_scatter: 10,
        }
    }
}

impl ArenaConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let maze = &self.maze;
        if maze.cols <= 0 || maze.rows <= 0 {
            return Err(ConfigError::EmptyGrid { cols: maze.cols, rows: maze.rows });
        }
        positive("frame_dt", self.frame_dt)?;
        positive("maze.cell_size", maze.cell_size)?;
        positive("maze.wall_thickness", maze.wall_thickness)?;
        if maze.wall_thickness >= maze.cell_size {
            return Err(ConfigError::WallTooThick {
                thickness: maze.wall_thickness,
                cell_size: maze.cell_size,
            });
        }
        positive("maze.room_min_size", maze.room_min_size as f32)?;
        ordered("maze.room_size", maze.room_min_size as f32, maze.room_max_size as f32)?;

        positive("human.size", self.human.size)?;
        positive("human.speed", self.human.speed)?;
        positive("human.max_health", self.human.max_health as f32)?;
        positive("autonomous.size", self.autonomous.size)?;
        positive("autonomous.speed", self.autonomous.speed)?;
        positive("autonomous.max_health", self.autonomous.max_health as f32)?;

        let projectile = &self.projectile;
        positive("projectile.speed", projectile.speed)?;
        positive("projectile.radius", projectile.radius)?;
        if projectile.max_bounces == 0 {
            return Err(ConfigError::ZeroBounces);
        }
        unit("projectile.bounce_retention", projectile.bounce_retention)?;
        positive("projectile.bounce_retention", projectile.bounce_retention)?;
        unit("projectile.bounce_nudge", projectile.bounce_nudge)?;

        let ai = &self.ai;
        positive("ai.sight_spacing", ai.sight_spacing)?;
        positive("ai.sight_probe_size", ai.sight_probe_size)?;
        unit("ai.wander_chance", ai.wander_chance)?;
        for (field, range) in [
            ("ai.initial_cooldown", ai.initial_cooldown),
            ("ai.direct_cooldown", ai.direct_cooldown),
            ("ai.ricochet_cooldown", ai.ricochet_cooldown),
            ("ai.path_refresh", ai.path_refresh),
        ] {
            ordered(field, range.min, range.max)?;
        }

        for (field, margin) in [
            ("human.bounds_margin", self.human.bounds_margin),
            ("ai.wander_margin", ai.wander_margin),
            ("ai.bounds_margin", ai.bounds_margin),
        ] {
            inset(field, margin, maze)?;
        }

        unit("pickups.drop_chance", self.pickups.drop_chance)?;
        if self.pickups.drop_scatter < 0 {
            return Err(ConfigError::Negative {
                field: "pickups.drop_scatter",
                value: self.pickups.drop_scatter as f32,
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 { Ok(()) } else { Err(ConfigError::NonPositive { field, value }) }
}

fn unit(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfUnitRange { field, value })
    }
}

/// A margin that still leaves a non-empty area inside the world.
fn inset(field: &'static str, margin: f32, maze: &MazeConfig) -> Result<(), ConfigError> {
    if margin < 0.0 {
        return Err(ConfigError::Negative { field, value: margin });
    }
    let (width, height) = (maze.world_width(), maze.world_height());
    if 2.0 * margin > width.min(height) {
        return Err(ConfigError::MarginTooWide { field, margin, width, height });
    }
    Ok(())
}

fn ordered(field: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    if min <= max { Ok(()) } else { Err(ConfigError::InvertedRange { field, min, max }) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid_and_matches_world_size() {
        let config = ArenaConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.maze.world_width(), 2000.0);
        assert_eq!(config.maze.world_height(), 1440.0);
        assert_eq!(config.maze.seed_rooms.len(), 10);
    }

    #[test]
    fn partial_json_keeps_defaults_for_unnamed_fields() {
        let config: ArenaConfig =
            serde_json::from_str(r#"{ "autonomous": { "count": 3 }, "projectile": { "max_bounces": 5 } }"#)
                .expect("partial config should deserialize");
        assert_eq!(config.autonomous.count, 3);
        assert_eq!(config.autonomous.max_health, 75);
        assert_eq!(config.projectile.max_bounces, 5);
        assert_eq!(config.projectile.bounce_retention, 0.62);
        assert_eq!(config.maze, MazeConfig::default());
    }

    #[test]
    fn validation_rejects_inverted_cooldown_range() {
        let mut config = ArenaConfig::default();
        config.ai.direct_cooldown = SecondsRange::new(2.0, 1.0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvertedRange { field: "ai.direct_cooldown", min: 2.0, max: 1.0 })
        );
    }

    #[test]
    fn validation_rejects_bad_retention_and_empty_grid() {
        let mut config = ArenaConfig::default();
        config.projectile.bounce_retention = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfUnitRange { field: "projectile.bounce_retention", .. })
        ));

        let mut config = ArenaConfig::default();
        config.maze.cols = 0;
        assert_eq!(config.validate(), Err(ConfigError::EmptyGrid { cols: 0, rows: 36 }));
    }

    #[test]
    fn validation_rejects_negative_drop_scatter() {
        let mut config = ArenaConfig::default();
        config.pickups.drop_scatter = i32::MIN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Negative { field: "pickups.drop_scatter", .. })
        ));

        config.pickups.drop_scatter = 0;
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn validation_rejects_margins_that_swallow_the_world() {
        let mut config = ArenaConfig::default();
        config.ai.bounds_margin = -1.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Negative { field: "ai.bounds_margin", .. })
        ));

        let mut config = ArenaConfig::default();
        config.human.bounds_margin = 721.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::MarginTooWide {
                field: "human.bounds_margin",
                margin: 721.0,
                width: 2000.0,
                height: 1440.0,
            })
        );
    }

    #[test]
    fn oversized_rooms_are_not_a_config_error() {
        let mut config = ArenaConfig::default();
        config.maze.seed_rooms = vec![Room::new(0, 0, 500, 500)];
        assert_eq!(config.validate(), Ok(()));
    }
}
