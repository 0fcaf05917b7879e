//! Per-kind enemy configuration.
//!
//! Every enemy shares the same components; a kind only picks numbers from
//! this table.

use bevy::prelude::*;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Cat,
    Car,
    AggressiveDog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatrolStyle {
    /// Walk back and forth within a fixed distance of the spawn point.
    Boundary,
    /// Walk until blocked by a wall or another enemy, then turn.
    Contact,
    /// Drive one way forever, wrapping around the player's view span.
    Lane,
}

#[derive(Debug, Clone, Copy)]
pub struct EnemyProfile {
    pub speed_mult: f32,
    pub damage_mult: i32,
    pub max_health: u32,
    pub style: PatrolStyle,
    pub half_extents: Vec2,
    pub color: Color,
}

const CAT: EnemyProfile = EnemyProfile {
    speed_mult: 1.0,
    damage_mult: 1,
    max_health: 1,
    style: PatrolStyle::Boundary,
    half_extents: Vec2::new(12.0, 10.0),
    color: Color::srgb(0.95, 0.6, 0.2),
};

const CAR: EnemyProfile = EnemyProfile {
    speed_mult: 2.0,
    damage_mult: 1,
    max_health: 3,
    style: PatrolStyle::Lane,
    half_extents: Vec2::new(24.0, 12.0),
    color: Color::srgb(0.8, 0.15, 0.2),
};

const AGGRESSIVE_DOG: EnemyProfile = EnemyProfile {
    speed_mult: 1.0,
    damage_mult: 2,
    max_health: 2,
    style: PatrolStyle::Contact,
    half_extents: Vec2::new(14.0, 11.0),
    color: Color::srgb(0.55, 0.35, 0.25),
};

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Cat, EnemyKind::Car, EnemyKind::AggressiveDog];

    pub const fn profile(self) -> &'static EnemyProfile {
        match self {
            EnemyKind::Cat => &CAT,
            EnemyKind::Car => &CAR,
            EnemyKind::AggressiveDog => &AGGRESSIVE_DOG,
        }
    }
}
