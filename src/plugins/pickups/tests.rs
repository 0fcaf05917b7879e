use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::category::Category;
use crate::common::test_utils::{drain_messages, ensure_messages, run_system_once, write_collision};
use crate::common::tunables::{secs, Tunables};
use crate::plugins::combat::{CombatSignal, Health, TransientState, TransientStates};
use crate::plugins::lifecycle::DespawnAfter;
use crate::plugins::projectiles::Projectile;

use super::*;

fn heal(amount: u32) -> Pickup {
    Pickup::new(PickupKind::Heal { amount })
}

#[test]
fn heal_on_full_health_is_consumed_without_change() {
    let mut pickup = heal(1);
    let mut health = Health::new(5);
    let mut states = TransientStates::default();

    let outcome = collect(&mut pickup, Some(&mut health), Some(&mut states));

    assert_eq!(outcome, CollectOutcome::Healed { restored: 0 });
    assert!(outcome.is_consumed());
    assert!(pickup.being_collected);
    assert_eq!(health.current(), 5);
}

#[test]
fn heal_restores_up_to_max() {
    let mut pickup = heal(3);
    let mut health = Health::with_current(4, 5);

    let outcome = collect(&mut pickup, Some(&mut health), None);

    assert_eq!(outcome, CollectOutcome::Healed { restored: 1 });
    assert_eq!(health.current(), 5);
}

#[test]
fn second_contact_is_ignored() {
    let mut pickup = heal(1);
    let mut health = Health::with_current(2, 5);

    collect(&mut pickup, Some(&mut health), None);
    let again = collect(&mut pickup, Some(&mut health), None);

    assert_eq!(again, CollectOutcome::Ignored);
    assert_eq!(health.current(), 3);
}

#[test]
fn actor_without_health_or_dying_is_ignored() {
    let mut pickup = heal(1);
    assert_eq!(collect(&mut pickup, None, None), CollectOutcome::Ignored);
    assert!(!pickup.being_collected);

    let mut health = Health::with_current(1, 5);
    let mut states = TransientStates::default();
    states.enter(TransientState::Dying, secs(0.5));
    assert_eq!(
        collect(&mut pickup, Some(&mut health), Some(&mut states)),
        CollectOutcome::Ignored
    );
    assert_eq!(health.current(), 1);
}

#[test]
fn grant_attack_enters_powered_up() {
    let mut pickup = Pickup::new(PickupKind::GrantAttack { duration_secs: 10.0 });
    let mut health = Health::new(5);
    let mut states = TransientStates::default();

    let outcome = collect(&mut pickup, Some(&mut health), Some(&mut states));

    assert_eq!(outcome, CollectOutcome::PoweredUp);
    assert!(states.is_active(TransientState::PoweredUp));
    assert_eq!(states.remaining(TransientState::PoweredUp), Some(secs(10.0)));
    assert!(states.attack_available());
}

#[test]
fn bob_stays_within_amplitude_and_phase_is_stable() {
    let bob = Bob::at(Vec2::new(120.0, 40.0));
    assert_eq!(bob.phase, Bob::at(Vec2::new(120.0, 40.0)).phase);
    assert!((0.0..std::f32::consts::TAU).contains(&bob.phase));

    for i in 0..200 {
        let y = bob.height_at(i as f32 * 0.05, 2.0, 16.0);
        assert!((y - 40.0).abs() <= 16.0 + 1e-4);
    }
}

// -----------------------------------------------------------------------------
// Systems
// -----------------------------------------------------------------------------

fn pickup_world() -> World {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    ensure_messages::<CollisionStart>(&mut world);
    ensure_messages::<CombatSignal>(&mut world);
    world
}

#[test]
fn player_contact_collects_and_schedules_removal() {
    let mut world = pickup_world();
    let pickup = world.spawn(Pickup::new(PickupKind::GrantAttack { duration_secs: 10.0 })).id();
    let player = world
        .spawn((Category::Player, Health::new(5), TransientStates::default()))
        .id();

    write_collision(&mut world, player, pickup);
    run_system_once(&mut world, collect_pickups);

    assert!(world.get::<Pickup>(pickup).unwrap().being_collected);
    let after = world.get::<DespawnAfter>(pickup).unwrap();
    assert_eq!(after.duration(), secs(Tunables::default().pickups.collect_secs));
    assert!(world
        .get::<TransientStates>(player)
        .unwrap()
        .is_active(TransientState::PoweredUp));
    assert_eq!(
        drain_messages::<CombatSignal>(&mut world),
        vec![CombatSignal::PoweredUp { entity: player }]
    );
}

#[test]
fn heal_signal_only_when_something_was_restored() {
    let mut world = pickup_world();
    let full = world.spawn((Category::Player, Health::new(5))).id();
    let hurt = world.spawn((Category::Player, Health::with_current(3, 5))).id();
    let a = world.spawn(heal(1)).id();
    let b = world.spawn(heal(1)).id();

    write_collision(&mut world, a, full);
    write_collision(&mut world, b, hurt);
    run_system_once(&mut world, collect_pickups);

    assert_eq!(
        drain_messages::<CombatSignal>(&mut world),
        vec![CombatSignal::Healed { entity: hurt, amount: 1 }]
    );
    assert!(world.get::<DespawnAfter>(a).is_some());
    assert!(world.get::<DespawnAfter>(b).is_some());
}

#[test]
fn enemies_do_not_collect() {
    let mut world = pickup_world();
    let pickup = world.spawn(heal(1)).id();
    let enemy = world.spawn((Category::Enemy, Health::with_current(1, 3))).id();

    write_collision(&mut world, enemy, pickup);
    run_system_once(&mut world, collect_pickups);

    assert!(!world.get::<Pickup>(pickup).unwrap().being_collected);
    assert_eq!(world.get::<Health>(enemy).unwrap().current(), 1);
}

#[test]
fn projectiles_touch_pickups_without_collecting_them() {
    let mut world = pickup_world();
    let pickup = spawn_pickup(&mut world.commands(), Vec2::ZERO, heal(1).kind);
    world.flush();
    let layers = world.get::<CollisionLayers>(pickup).unwrap();
    assert!(layers.filters.has_all([Layer::PlayerProjectile, Layer::EnemyProjectile]));

    let shot = world
        .spawn(Projectile {
            direction: Vec2::X,
            speed: 320.0,
            damage: 1,
            owner: Category::Player,
        })
        .id();

    write_collision(&mut world, shot, pickup);
    run_system_once(&mut world, collect_pickups);

    assert!(!world.get::<Pickup>(pickup).unwrap().being_collected);
    assert!(world.get::<DespawnAfter>(pickup).is_none());
    assert!(drain_messages::<CombatSignal>(&mut world).is_empty());
}

#[test]
fn level_places_both_kinds() {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    run_system_once(&mut world, spawn_level_pickups);

    let kinds: Vec<PickupKind> = world.query::<&Pickup>().iter(&world).map(|p| p.kind).collect();
    assert_eq!(kinds.len(), PLACEMENTS.len());
    assert!(kinds.iter().any(|k| matches!(k, PickupKind::Heal { .. })));
    assert!(kinds.iter().any(|k| matches!(k, PickupKind::GrantAttack { .. })));
}
