use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use super::components::Projectile;
use super::messages::SpawnProjectileRequest;
use crate::common::category::Category;
use crate::common::layers::Layer;
use crate::common::state::GameState;
use crate::common::tunables::{ProjectileTunables, Tunables};
use crate::plugins::lifecycle::DespawnAfter;

pub const PROJECTILE_RADIUS: f32 = 4.0;

/// Membership follows the shooter. A projectile sees the world, pickups and
/// the opposing side.
pub fn projectile_layers(owner: Category) -> CollisionLayers {
    match owner {
        Category::Enemy => CollisionLayers::new(
            Layer::EnemyProjectile,
            [Layer::World, Layer::Pickup, Layer::Player],
        ),
        _ => CollisionLayers::new(
            Layer::PlayerProjectile,
            [Layer::World, Layer::Pickup, Layer::Enemy],
        ),
    }
}

pub fn spawn_projectile(
    commands: &mut Commands,
    req: &SpawnProjectileRequest,
    tuning: &ProjectileTunables,
) -> Entity {
    let projectile = Projectile {
        direction: req.facing.direction(),
        speed: tuning.speed,
        damage: tuning.damage,
        owner: req.owner,
    };

    commands
        .spawn((
            Name::new("Projectile"),
            projectile,
            Category::Projectile,
            DespawnAfter::seconds(tuning.lifetime_secs),
            Sprite {
                color: Color::srgb(1.0, 0.85, 0.3),
                custom_size: Some(Vec2::splat(PROJECTILE_RADIUS * 2.0)),
                ..default()
            },
            Transform::from_translation(req.position.extend(2.0)),
            (
                RigidBody::Dynamic,
                GravityScale(0.0),
                Collider::circle(PROJECTILE_RADIUS),
                Sensor,
                CollisionEventsEnabled,
                projectile_layers(req.owner),
                LinearVelocity(projectile.velocity()),
            ),
            DespawnOnExit(GameState::InGame),
        ))
        .id()
}

/// Consumer: the only system that builds projectile entities.
pub fn spawn_requested_projectiles(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut requests: MessageReader<SpawnProjectileRequest>,
) {
    for req in requests.read() {
        let e = spawn_projectile(&mut commands, req, &tunables.projectiles);
        debug!("projectile {e:?} spawned for {:?} at {}", req.owner, req.position);
    }
}
