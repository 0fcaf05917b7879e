//! Projectiles plugin: message-based producer -> consumer spawning.
//!
//! ```text
//! FixedUpdate     Intent    producers write SpawnProjectileRequest (player attack)
//!                 Movement  spawn_requested_projectiles, drive_projectiles
//! FixedPostUpdate Contacts  process_projectile_contacts -> DamageRequest + PendingDespawn
//! ```
//!
//! Producers never touch projectile entities; they only enqueue intent. The
//! lifetime countdown is a plain `DespawnAfter`, so whichever comes first
//! (contact or timeout) removes the projectile.

pub mod components;
pub mod messages;
pub mod spawn;
pub mod systems;

use bevy::prelude::*;

use crate::common::sets::GameplaySet;

pub use components::Projectile;
pub use messages::SpawnProjectileRequest;

pub fn plugin(app: &mut App) {
    app.add_message::<SpawnProjectileRequest>()
        .add_systems(
            FixedUpdate,
            (spawn::spawn_requested_projectiles, systems::drive_projectiles)
                .chain()
                .in_set(GameplaySet::Movement),
        )
        .add_systems(
            FixedPostUpdate,
            systems::process_projectile_contacts.in_set(GameplaySet::Contacts),
        );
}

#[cfg(test)]
mod tests;
