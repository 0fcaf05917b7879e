//! Pickups: heal snacks and attack power-ups.
//!
//! ```text
//! Update          bob_pickups              (hover, presentation only)
//! FixedPostUpdate Contacts  collect_pickups -> Health / PoweredUp + DespawnAfter
//! ```
//!
//! A consumed pickup is flagged `being_collected` and removed after the short
//! grow/fade sequence; the flag makes every later contact a no-op.

use std::f32::consts::TAU;

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::category::{contact_rule, Category, ContactRule};
use crate::common::contacts::split_contact;
use crate::common::layers::Layer;
use crate::common::sets::GameplaySet;
use crate::common::state::GameState;
use crate::common::tunables::{secs, PickupTunables, Tunables};
use crate::plugins::combat::{Action, CombatSignal, Health, TransientState, TransientStates};
use crate::plugins::lifecycle::RemovalCommandsExt;
use crate::plugins::world::GROUND_TOP;

pub const PICKUP_RADIUS: f32 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickupKind {
    Heal { amount: u32 },
    GrantAttack { duration_secs: f32 },
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Pickup {
    pub kind: PickupKind,
    pub being_collected: bool,
}

impl Pickup {
    pub fn new(kind: PickupKind) -> Self {
        Self {
            kind,
            being_collected: false,
        }
    }
}

/// Sinusoidal hover around `origin_y`.
#[derive(Component, Debug, Clone, Copy)]
pub struct Bob {
    pub origin_y: f32,
    pub phase: f32,
}

impl Bob {
    /// Phase derived from the spawn position so neighbouring pickups drift
    /// out of sync without a random source.
    pub fn at(position: Vec2) -> Self {
        Self {
            origin_y: position.y,
            phase: (position.x * 0.37 + position.y * 0.11).rem_euclid(TAU),
        }
    }

    #[inline]
    pub fn height_at(&self, t: f32, speed: f32, amplitude: f32) -> f32 {
        self.origin_y + ((t + self.phase) * speed).sin() * amplitude
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectOutcome {
    /// Nothing happened; the pickup stays.
    Ignored,
    /// Consumed; `restored` may be zero when the actor was already full.
    Healed { restored: u32 },
    PoweredUp,
}

impl CollectOutcome {
    #[inline]
    pub fn is_consumed(self) -> bool {
        !matches!(self, CollectOutcome::Ignored)
    }
}

/// Apply a pickup to the actor that touched it.
pub fn collect(
    pickup: &mut Pickup,
    health: Option<&mut Health>,
    states: Option<&mut TransientStates>,
) -> CollectOutcome {
    if pickup.being_collected {
        return CollectOutcome::Ignored;
    }
    let Some(health) = health else {
        return CollectOutcome::Ignored;
    };
    if states
        .as_deref()
        .is_some_and(|s| s.is_blocking(Action::CollisionResponse))
    {
        return CollectOutcome::Ignored;
    }

    let outcome = match pickup.kind {
        PickupKind::Heal { amount } => CollectOutcome::Healed {
            restored: health.heal(amount),
        },
        PickupKind::GrantAttack { duration_secs } => {
            let Some(states) = states else {
                return CollectOutcome::Ignored;
            };
            states.enter(TransientState::PoweredUp, secs(duration_secs));
            CollectOutcome::PoweredUp
        }
    };

    pickup.being_collected = true;
    outcome
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_level_pickups)
        .add_systems(Update, bob_pickups.run_if(in_state(GameState::InGame)))
        .add_systems(
            FixedPostUpdate,
            collect_pickups.in_set(GameplaySet::Contacts),
        );
}

pub fn spawn_pickup(commands: &mut Commands, position: Vec2, kind: PickupKind) -> Entity {
    let color = match kind {
        PickupKind::Heal { .. } => Color::srgb(0.4, 0.9, 0.4),
        PickupKind::GrantAttack { .. } => Color::srgb(0.95, 0.8, 0.2),
    };

    commands
        .spawn((
            Name::new("Pickup"),
            Pickup::new(kind),
            Category::Pickup,
            Bob::at(position),
            Sprite {
                color,
                custom_size: Some(Vec2::splat(PICKUP_RADIUS * 2.0)),
                ..default()
            },
            Transform::from_translation(position.extend(1.0)),
            Collider::circle(PICKUP_RADIUS),
            Sensor,
            CollisionEventsEnabled,
            CollisionLayers::new(
                Layer::Pickup,
                [Layer::Player, Layer::PlayerProjectile, Layer::EnemyProjectile],
            ),
            DespawnOnExit(GameState::InGame),
        ))
        .id()
}

/// Placement: x, height above the ground, heal or power-up.
const PLACEMENTS: [(f32, f32, bool); 4] = [
    (-520.0, 130.0, false),
    (-160.0, 194.0, true),
    (240.0, 40.0, false),
    (640.0, 226.0, false),
];

fn level_kind(power_up: bool, tuning: &PickupTunables) -> PickupKind {
    if power_up {
        PickupKind::GrantAttack {
            duration_secs: tuning.power_up_secs,
        }
    } else {
        PickupKind::Heal {
            amount: tuning.heal_amount,
        }
    }
}

fn spawn_level_pickups(mut commands: Commands, tunables: Res<Tunables>) {
    for (x, height, power_up) in PLACEMENTS {
        spawn_pickup(
            &mut commands,
            Vec2::new(x, GROUND_TOP + height),
            level_kind(power_up, &tunables.pickups),
        );
    }
}

pub fn bob_pickups(time: Res<Time>, tunables: Res<Tunables>, mut q: Query<(&Bob, &mut Transform)>) {
    let t = time.elapsed_secs();
    for (bob, mut tf) in &mut q {
        tf.translation.y = bob.height_at(t, tunables.pickups.bob_speed, tunables.pickups.bob_height);
    }
}

pub fn collect_pickups(
    tunables: Res<Tunables>,
    mut commands: Commands,
    mut started: MessageReader<CollisionStart>,
    mut q_pickups: Query<&mut Pickup>,
    mut q_actors: Query<(&Category, Option<&mut Health>, Option<&mut TransientStates>)>,
    mut signals: MessageWriter<CombatSignal>,
) {
    for ev in started.read() {
        let Some((pickup_side, actor_side)) = split_contact(ev, |e| q_pickups.contains(e)) else {
            continue;
        };
        let pickup_entity = pickup_side.gameplay_owner();
        let actor = actor_side.gameplay_owner();

        let Ok((category, health, states)) = q_actors.get_mut(actor) else {
            continue;
        };
        if contact_rule(Category::Pickup, *category) != ContactRule::Collect {
            continue;
        }
        let Ok(mut pickup) = q_pickups.get_mut(pickup_entity) else {
            continue;
        };

        let outcome = collect(&mut pickup, health.map(Mut::into_inner), states.map(Mut::into_inner));
        match outcome {
            CollectOutcome::Ignored => continue,
            CollectOutcome::Healed { restored } => {
                if restored > 0 {
                    signals.write(CombatSignal::Healed {
                        entity: actor,
                        amount: restored,
                    });
                }
            }
            CollectOutcome::PoweredUp => {
                signals.write(CombatSignal::PoweredUp { entity: actor });
            }
        }

        info!("{actor:?} collected {:?}", pickup.kind);
        commands
            .entity(pickup_entity)
            .remove_after(tunables.pickups.collect_secs);
    }
}

#[cfg(test)]
mod tests;
