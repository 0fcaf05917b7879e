//! Combat messages.
//!
//! Contact systems produce `DamageRequest`s; `apply_damage_requests` is the
//! single consumer. `CombatSignal` is the outbound trigger stream read by
//! presentation (animation triggers, flashes, logs).

use bevy::prelude::*;

#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct DamageRequest {
    pub target: Entity,
    pub amount: i32,
    /// Raw push direction; normalized and lifted by the resolver.
    pub knockback: Vec2,
}

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CombatSignal {
    Hurt { entity: Entity, health: u32 },
    Died { entity: Entity },
    Healed { entity: Entity, amount: u32 },
    Attacked { entity: Entity },
    PoweredUp { entity: Entity },
    PowerUpExpired { entity: Entity },
}
