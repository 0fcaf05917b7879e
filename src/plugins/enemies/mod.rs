//! Enemies plugin: patrolling enemies built from the shared combat and
//! movement components.
//!
//! ```text
//! FixedUpdate     Timers    tick_turn_cooldowns
//!                 Intent    patrol_turns -> patrol_intent -> wrap_lanes
//! FixedPostUpdate Contacts  patrol_contacts, enemy_contact_damage
//! ```
//!
//! Patrol only ever writes `MoveIntent`. Knockback and death suspend it
//! through the movement controller; once those states end the enemy simply
//! walks on in its current heading.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy_firefly::prelude::Occluder2d;

pub mod patrol;
pub mod profile;
pub mod systems;

pub use patrol::{Heading, Patrol};
pub use profile::{EnemyKind, EnemyProfile, PatrolStyle};

use crate::common::category::Category;
use crate::common::layers::Layer;
use crate::common::sets::GameplaySet;
use crate::common::state::GameState;
use crate::common::tunables::{secs, EnemyTunables, Tunables};
use crate::plugins::combat::{ContactDamage, DeathClip, Health, TransientStates};
use crate::plugins::movement::{Facing, GroundProbe, MotionFlags, MoveIntent, Mover, ProbeSpec};
use crate::plugins::world::GROUND_TOP;

#[derive(Component, Debug, Clone, Copy)]
pub struct Enemy;

/// Lane traffic rides a fixed height. It passes through terrain and only
/// reports contacts.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Lane {
    pub y: f32,
}

/// Level placement: kind, spawn x, initial heading.
const PLACEMENTS: [(EnemyKind, f32, Heading); 4] = [
    (EnemyKind::Cat, -420.0, Heading::PatrollingRight),
    (EnemyKind::AggressiveDog, 420.0, Heading::PatrollingLeft),
    (EnemyKind::Cat, 800.0, Heading::PatrollingLeft),
    (EnemyKind::Car, 1100.0, Heading::PatrollingLeft),
];

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_enemies)
        .add_systems(
            FixedUpdate,
            systems::tick_turn_cooldowns.in_set(GameplaySet::Timers),
        )
        .add_systems(
            FixedUpdate,
            (systems::patrol_turns, systems::patrol_intent, systems::wrap_lanes)
                .chain()
                .in_set(GameplaySet::Intent),
        )
        .add_systems(
            FixedPostUpdate,
            (systems::patrol_contacts, systems::enemy_contact_damage)
                .in_set(GameplaySet::Contacts),
        );
}

/// Lane traffic ignores terrain and other enemies so a wrap never lands
/// inside either.
pub fn enemy_layers(style: PatrolStyle) -> CollisionLayers {
    match style {
        PatrolStyle::Lane => {
            CollisionLayers::new(Layer::Enemy, [Layer::Player, Layer::PlayerProjectile])
        }
        PatrolStyle::Boundary | PatrolStyle::Contact => CollisionLayers::new(
            Layer::Enemy,
            [Layer::World, Layer::Player, Layer::PlayerProjectile, Layer::Enemy],
        ),
    }
}

pub fn spawn_enemy(
    commands: &mut Commands,
    kind: EnemyKind,
    position: Vec2,
    heading: Heading,
    tuning: &EnemyTunables,
    probe_cast: (f32, f32),
) -> Entity {
    let profile = kind.profile();
    let size = profile.half_extents * 2.0;
    let facing = match heading {
        Heading::PatrollingRight => Facing::Right,
        Heading::PatrollingLeft => Facing::Left,
    };

    let body = match profile.style {
        PatrolStyle::Lane => RigidBody::Kinematic,
        PatrolStyle::Boundary | PatrolStyle::Contact => RigidBody::Dynamic,
    };

    let mut entity = commands.spawn((
        Name::new(format!("{kind:?}")),
        Enemy,
        kind,
        Category::Enemy,
        (
            Health::new(profile.max_health),
            TransientStates::default(),
            DeathClip::default(),
            ContactDamage(tuning.base_damage * profile.damage_mult),
        ),
        Patrol::new(
            heading,
            position.x,
            tuning.patrol_distance,
            secs(tuning.turn_cooldown_secs),
        ),
        (
            MoveIntent::default(),
            Mover {
                speed: tuning.base_speed * profile.speed_mult,
                jump_impulse: 0.0,
            },
            facing,
            GroundProbe::default(),
            MotionFlags::default(),
            ProbeSpec {
                half_extents: profile.half_extents,
                ground_cast: probe_cast.0,
                wall_cast: probe_cast.1,
            },
        ),
        Sprite {
            color: profile.color,
            custom_size: Some(size),
            ..default()
        },
        Transform::from_translation(position.extend(1.0)),
        (
            body,
            LockedAxes::ROTATION_LOCKED,
            Collider::rectangle(size.x, size.y),
            Friction::ZERO.with_combine_rule(CoefficientCombine::Min),
            enemy_layers(profile.style),
            CollisionEventsEnabled,
            LinearVelocity::ZERO,
        ),
        Occluder2d::circle(profile.half_extents.y),
        DespawnOnExit(GameState::InGame),
    ));

    if profile.style == PatrolStyle::Lane {
        entity.insert((Lane { y: position.y }, Sensor));
    }
    entity.id()
}

fn spawn_enemies(mut commands: Commands, tunables: Res<Tunables>) {
    let probe_cast = (tunables.movement.ground_probe, tunables.movement.wall_probe);
    for (kind, x, heading) in PLACEMENTS {
        let y = GROUND_TOP + kind.profile().half_extents.y;
        spawn_enemy(
            &mut commands,
            kind,
            Vec2::new(x, y),
            heading,
            &tunables.enemies,
            probe_cast,
        );
    }
}
