//! World plugin: side-scrolling level geometry.
//!
//! Everything here is static and sits on `Layer::World`. `WorldPiece` tells
//! patrol AI which contacts are obstacles (walls) and which are just floor.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::layers::Layer;
use crate::common::state::GameState;

pub const TILE: f32 = 32.0;
/// Level spans `-HALF_WIDTH..HALF_WIDTH` horizontally.
pub const HALF_WIDTH: f32 = TILE * 48.0;
/// Top surface of the ground strip.
pub const GROUND_TOP: f32 = -200.0;

const GROUND_THICKNESS: f32 = TILE * 2.0;
const WALL_THICKNESS: f32 = TILE;
const WALL_HEIGHT: f32 = TILE * 24.0;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldPiece {
    /// Walkable surface (ground strip and platforms).
    Ground,
    /// Vertical obstacle; patrols turn around on contact.
    Wall,
}

/// A platform: centre x, height of the top surface above the ground, width in tiles.
const PLATFORMS: [(f32, f32, f32); 5] = [
    (-520.0, 96.0, 4.0),
    (-160.0, 160.0, 3.0),
    (240.0, 96.0, 5.0),
    (640.0, 192.0, 3.0),
    (980.0, 96.0, 4.0),
];

/// Obstacles on the ground strip: centre x, height in tiles.
const BLOCKS: [(f32, f32); 2] = [(120.0, 2.0), (1200.0, 3.0)];

pub fn world_layers() -> CollisionLayers {
    CollisionLayers::new(
        Layer::World,
        [
            Layer::Player,
            Layer::Enemy,
            Layer::PlayerProjectile,
            Layer::EnemyProjectile,
        ],
    )
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_level);
}

fn spawn_piece(commands: &mut Commands, name: String, piece: WorldPiece, center: Vec2, size: Vec2) {
    let color = match piece {
        WorldPiece::Ground => Color::srgb(0.30, 0.24, 0.18),
        WorldPiece::Wall => Color::srgb(0.25, 0.27, 0.33),
    };

    commands.spawn((
        Name::new(name),
        piece,
        Sprite {
            color,
            custom_size: Some(size),
            ..default()
        },
        Transform::from_translation(center.extend(0.0)),
        RigidBody::Static,
        Collider::rectangle(size.x, size.y),
        Friction::ZERO.with_combine_rule(CoefficientCombine::Min),
        world_layers(),
        DespawnOnExit(GameState::InGame),
    ));
}

fn spawn_level(mut commands: Commands) {
    spawn_piece(
        &mut commands,
        "Ground".into(),
        WorldPiece::Ground,
        Vec2::new(0.0, GROUND_TOP - GROUND_THICKNESS * 0.5),
        Vec2::new(HALF_WIDTH * 2.0 + WALL_THICKNESS * 2.0, GROUND_THICKNESS),
    );

    for (side, sign) in [("Left", -1.0), ("Right", 1.0)] {
        spawn_piece(
            &mut commands,
            format!("Wall{side}"),
            WorldPiece::Wall,
            Vec2::new(
                sign * (HALF_WIDTH + WALL_THICKNESS * 0.5),
                GROUND_TOP + WALL_HEIGHT * 0.5,
            ),
            Vec2::new(WALL_THICKNESS, WALL_HEIGHT),
        );
    }

    for (i, (x, height, tiles)) in PLATFORMS.into_iter().enumerate() {
        spawn_piece(
            &mut commands,
            format!("Platform{i}"),
            WorldPiece::Ground,
            Vec2::new(x, GROUND_TOP + height - TILE * 0.25),
            Vec2::new(tiles * TILE, TILE * 0.5),
        );
    }

    for (i, (x, tiles)) in BLOCKS.into_iter().enumerate() {
        let h = tiles * TILE;
        spawn_piece(
            &mut commands,
            format!("Block{i}"),
            WorldPiece::Wall,
            Vec2::new(x, GROUND_TOP + h * 0.5),
            Vec2::new(TILE, h),
        );
    }
}
