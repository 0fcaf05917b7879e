//! Gameplay system sets.
//!
//! One fixed step runs, in order:
//! ```text
//! FixedUpdate:     Timers -> Intent -> Movement
//! FixedPostUpdate: (avian step + CollisionEventSystems) -> Contacts -> Resolve
//! PostUpdate:      deferred removal
//! ```
//! Contacts of step N are resolved before the movement of step N+1 reads
//! the transient states, so a fresh knockback is never overwritten by intent.

use bevy::prelude::*;

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameplaySet {
    /// Countdown timers (transient states, removal delays, turn cooldowns).
    Timers,
    /// Player input and AI decisions become `MoveIntent`.
    Intent,
    /// Intent becomes velocity; projectiles are spawned and driven.
    Movement,
    /// Contact events become damage requests / pickups / turns.
    Contacts,
    /// Damage requests are resolved against health and transient states.
    Resolve,
}
