//! Projectile tests.
//!
//! Contacts are injected as `CollisionStart` messages and the contact system is
//! run once, so nothing here depends on the physics pipeline.

use avian2d::prelude::*;
use bevy::ecs::world::CommandQueue;
use bevy::prelude::*;

use crate::common::category::Category;
use crate::common::layers::Layer;
use crate::common::test_utils::{
    drain_messages, ensure_messages, run_system_once, write_collision,
};
use crate::common::tunables::Tunables;
use crate::plugins::combat::DamageRequest;
use crate::plugins::lifecycle::{DespawnAfter, PendingDespawn};
use crate::plugins::movement::Facing;

use super::components::Projectile;
use super::messages::SpawnProjectileRequest;
use super::{spawn, systems};

fn with_commands<T>(world: &mut World, f: impl FnOnce(&mut Commands) -> T) -> T {
    let mut queue = CommandQueue::default();
    let result = {
        let mut commands = Commands::new(&mut queue, world);
        f(&mut commands)
    };
    queue.apply(world);
    result
}

fn contact_world() -> World {
    let mut world = World::new();
    ensure_messages::<CollisionStart>(&mut world);
    ensure_messages::<DamageRequest>(&mut world);
    world
}

fn player_projectile(world: &mut World) -> Entity {
    world
        .spawn(Projectile {
            direction: Vec2::X,
            speed: 320.0,
            damage: 1,
            owner: Category::Player,
        })
        .id()
}

#[test]
fn spawn_uses_request_and_tuning() {
    let mut world = World::new();
    let tuning = Tunables::default().projectiles;
    let req = SpawnProjectileRequest {
        position: Vec2::new(10.0, 20.0),
        owner: Category::Player,
        facing: Facing::Left,
    };

    let e = with_commands(&mut world, |commands| spawn::spawn_projectile(commands, &req, &tuning));

    let projectile = *world.get::<Projectile>(e).unwrap();
    assert_eq!(projectile.direction, Vec2::NEG_X);
    assert_eq!(projectile.damage, tuning.damage);
    assert_eq!(world.get::<LinearVelocity>(e).unwrap().0, Vec2::NEG_X * tuning.speed);
    assert_eq!(world.get::<Transform>(e).unwrap().translation.truncate(), req.position);

    let after = world.get::<DespawnAfter>(e).unwrap();
    assert_eq!(after.duration().as_secs_f32(), tuning.lifetime_secs);

    assert!(world.get::<Sensor>(e).is_some());
    assert_eq!(world.get::<GravityScale>(e).unwrap().0, 0.0);
}

#[test]
fn layers_follow_the_owner() {
    let player = spawn::projectile_layers(Category::Player);
    assert!(player.memberships.has_all(Layer::PlayerProjectile));
    assert!(player.filters.has_all(Layer::Enemy));
    assert!(!player.filters.has_all(Layer::Player));
    assert!(player.filters.has_all(Layer::Pickup));

    let enemy = spawn::projectile_layers(Category::Enemy);
    assert!(enemy.memberships.has_all(Layer::EnemyProjectile));
    assert!(enemy.filters.has_all(Layer::Player));
    assert!(!enemy.filters.has_all(Layer::Enemy));
    assert!(enemy.filters.has_all(Layer::Pickup));
}

#[test]
fn consumer_spawns_one_projectile_per_request() {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    ensure_messages::<SpawnProjectileRequest>(&mut world);
    for facing in [Facing::Left, Facing::Right] {
        world.write_message(SpawnProjectileRequest {
            position: Vec2::ZERO,
            owner: Category::Player,
            facing,
        });
    }

    run_system_once(&mut world, spawn::spawn_requested_projectiles);

    let count = world.query::<&Projectile>().iter(&world).count();
    assert_eq!(count, 2);
}

#[test]
fn drive_reasserts_constant_velocity() {
    let mut world = World::new();
    let e = world
        .spawn((
            Projectile {
                direction: Vec2::NEG_X,
                speed: 100.0,
                damage: 1,
                owner: Category::Player,
            },
            LinearVelocity(Vec2::new(3.0, -40.0)),
        ))
        .id();

    run_system_once(&mut world, systems::drive_projectiles);

    assert_eq!(world.get::<LinearVelocity>(e).unwrap().0, Vec2::new(-100.0, 0.0));
}

#[test]
fn hitting_an_enemy_requests_damage_and_removes_projectile() {
    let mut world = contact_world();
    let p = player_projectile(&mut world);
    let enemy = world.spawn(Category::Enemy).id();

    write_collision(&mut world, enemy, p);
    run_system_once(&mut world, systems::process_projectile_contacts);

    assert_eq!(
        drain_messages::<DamageRequest>(&mut world),
        vec![DamageRequest { target: enemy, amount: 1, knockback: Vec2::X }]
    );
    assert!(world.get::<PendingDespawn>(p).is_some());
}

#[test]
fn level_geometry_spends_the_projectile_without_damage() {
    let mut world = contact_world();
    let p = player_projectile(&mut world);
    let wall = world.spawn_empty().id();

    write_collision(&mut world, p, wall);
    run_system_once(&mut world, systems::process_projectile_contacts);

    assert!(drain_messages::<DamageRequest>(&mut world).is_empty());
    assert!(world.get::<PendingDespawn>(p).is_some());
}

#[test]
fn pickups_spend_the_projectile_and_survive() {
    let mut world = contact_world();
    let p = player_projectile(&mut world);
    let pickup = world.spawn(Category::Pickup).id();

    write_collision(&mut world, pickup, p);
    run_system_once(&mut world, systems::process_projectile_contacts);

    assert!(drain_messages::<DamageRequest>(&mut world).is_empty());
    assert!(world.get::<PendingDespawn>(p).is_some());
    assert!(world.get::<PendingDespawn>(pickup).is_none());
}

#[test]
fn dead_enemies_and_the_owner_side_are_passed_through() {
    let mut world = contact_world();
    let p = player_projectile(&mut world);
    let corpse = world.spawn(Category::DeadEnemy).id();
    let player = world.spawn(Category::Player).id();

    write_collision(&mut world, p, corpse);
    write_collision(&mut world, p, player);
    run_system_once(&mut world, systems::process_projectile_contacts);

    assert!(drain_messages::<DamageRequest>(&mut world).is_empty());
    assert!(world.get::<PendingDespawn>(p).is_none());
}

#[test]
fn two_targets_in_one_step_only_the_first_is_hit() {
    let mut world = contact_world();
    let p = player_projectile(&mut world);
    let a = world.spawn(Category::Enemy).id();
    let b = world.spawn(Category::Enemy).id();

    write_collision(&mut world, p, a);
    write_collision(&mut world, p, b);
    run_system_once(&mut world, systems::process_projectile_contacts);

    let hits = drain_messages::<DamageRequest>(&mut world);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].target, a);
}

#[test]
fn removed_projectile_ignores_later_contacts() {
    let mut world = contact_world();
    let p = player_projectile(&mut world);
    world.entity_mut(p).insert(PendingDespawn);
    let enemy = world.spawn(Category::Enemy).id();

    write_collision(&mut world, p, enemy);
    run_system_once(&mut world, systems::process_projectile_contacts);

    assert!(drain_messages::<DamageRequest>(&mut world).is_empty());
}

#[test]
fn enemy_projectile_strikes_the_player() {
    let mut world = contact_world();
    let p = world
        .spawn(Projectile {
            direction: Vec2::NEG_X,
            speed: 320.0,
            damage: 2,
            owner: Category::Enemy,
        })
        .id();
    let player = world.spawn(Category::Player).id();
    let other_enemy = world.spawn(Category::Enemy).id();

    write_collision(&mut world, p, other_enemy);
    write_collision(&mut world, p, player);
    run_system_once(&mut world, systems::process_projectile_contacts);

    assert_eq!(
        drain_messages::<DamageRequest>(&mut world),
        vec![DamageRequest { target: player, amount: 2, knockback: Vec2::NEG_X }]
    );
}
