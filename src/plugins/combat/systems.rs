use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use super::damage::{resolve_damage, DamageRules};
use super::health::Health;
use super::messages::{CombatSignal, DamageRequest};
use super::state::{TransientState, TransientStates};
use super::DeathClip;
use crate::common::category::Category;
use crate::common::tunables::Tunables;
use crate::plugins::lifecycle::PendingDespawn;
use crate::plugins::player::Player;

/// Advance transient-state timers and run exit actions.
///
/// - `Dying` finishing requests removal.
/// - `PoweredUp` finishing is announced so presentation can drop the glow.
/// - The rest simply stop blocking once their timer is gone.
pub fn tick_transient_states(
    time: Res<Time<Fixed>>,
    mut commands: Commands,
    mut signals: MessageWriter<CombatSignal>,
    mut q: Query<(Entity, &mut TransientStates), Without<PendingDespawn>>,
) {
    for (e, mut states) in &mut q {
        let expired = states.tick(time.delta());
        if expired.is_empty() {
            continue;
        }

        for state in expired.iter() {
            match state {
                TransientState::Dying => {
                    commands.entity(e).insert(PendingDespawn);
                }
                TransientState::PoweredUp => {
                    signals.write(CombatSignal::PowerUpExpired { entity: e });
                }
                TransientState::Invulnerable
                | TransientState::KnockedBack
                | TransientState::AttackCooldown => {}
            }
            debug!("{e:?}: {state:?} expired");
        }
    }
}

/// Resolve queued damage against health and transient states.
///
/// Side effects on top of the pure resolver:
/// - hurt: velocity replaced by the knockback impulse
/// - fatal: body frozen, collision filters cleared, Enemy -> DeadEnemy
pub fn apply_damage_requests(
    tunables: Res<Tunables>,
    mut requests: MessageReader<DamageRequest>,
    mut signals: MessageWriter<CombatSignal>,
    mut q: Query<(
        &mut Health,
        &mut TransientStates,
        Option<&mut LinearVelocity>,
        Option<&mut CollisionLayers>,
        Option<&mut RigidBody>,
        Option<&mut Category>,
        Option<&DeathClip>,
        Has<Player>,
    )>,
) {
    let rules = DamageRules::from(&tunables.combat);

    for req in requests.read() {
        let Ok((mut health, mut states, vel, layers, body, category, clip, is_player)) =
            q.get_mut(req.target)
        else {
            debug!("damage target {:?} has no health; skipped", req.target);
            continue;
        };

        let outcome = match resolve_damage(
            &mut health,
            &mut states,
            req.amount,
            req.knockback,
            &rules,
            clip.and_then(|c| c.0),
        ) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!("rejected damage request for {:?}: {err}", req.target);
                continue;
            }
        };

        if !outcome.applied {
            continue;
        }

        if outcome.died {
            if let Some(mut vel) = vel {
                vel.0 = Vec2::ZERO;
            }
            if let Some(mut layers) = layers {
                layers.filters = LayerMask::NONE;
            }
            if let Some(mut body) = body {
                *body = RigidBody::Kinematic;
            }
            if let Some(mut category) = category {
                if *category == Category::Enemy {
                    *category = Category::DeadEnemy;
                }
            }

            if is_player {
                info!("player died; game over pending");
            } else {
                info!("{:?} died", req.target);
            }
            signals.write(CombatSignal::Died { entity: req.target });
            continue;
        }

        if let (Some(mut vel), Some(dir)) = (vel, outcome.knockback) {
            vel.0 = dir * tunables.combat.knockback_speed;
        }
        signals.write(CombatSignal::Hurt {
            entity: req.target,
            health: outcome.new_health,
        });
    }
}

/// Drain the signal stream into the log so headless runs still show it.
pub fn log_combat_signals(mut signals: MessageReader<CombatSignal>) {
    for signal in signals.read() {
        debug!("combat: {signal:?}");
    }
}
