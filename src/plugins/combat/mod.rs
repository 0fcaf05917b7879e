//! Combat plugin: health, transient states and damage resolution.
//!
//! ```text
//! FixedUpdate     Timers   tick_transient_states   (exit actions, Dying -> PendingDespawn)
//! FixedPostUpdate Contacts (other plugins write DamageRequest)
//!                 Resolve  apply_damage_requests   (Health + TransientStates + physics side effects)
//! PostUpdate               log_combat_signals
//! ```
//!
//! The pure pieces (`Health`, `TransientStates`, `resolve_damage`) carry every
//! rule; systems only move data between them and the physics components.

use bevy::prelude::*;

pub mod damage;
pub mod health;
pub mod messages;
pub mod state;
pub mod systems;

pub use damage::{knockback_from, DamageError, DamageOutcome, DamageRules};
pub use health::Health;
pub use messages::{CombatSignal, DamageRequest};
pub use state::{Action, StateSet, TransientState, TransientStates};

use crate::common::sets::GameplaySet;

/// Damage dealt to whatever this entity touches (subject to the contact rules).
#[derive(Component, Debug, Clone, Copy)]
pub struct ContactDamage(pub i32);

/// Presentation-owned death clip length in seconds, when one is known.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct DeathClip(pub Option<f32>);

pub fn plugin(app: &mut App) {
    app.add_message::<DamageRequest>()
        .add_message::<CombatSignal>()
        .add_systems(
            FixedUpdate,
            systems::tick_transient_states.in_set(GameplaySet::Timers),
        )
        .add_systems(
            FixedPostUpdate,
            systems::apply_damage_requests.in_set(GameplaySet::Resolve),
        )
        .add_systems(PostUpdate, systems::log_combat_signals);
}
