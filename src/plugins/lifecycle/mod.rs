//! Entity removal.
//!
//! Removal is always a request. Gameplay systems either mark an entity with
//! `PendingDespawn` (immediate) or give it a `DespawnAfter` countdown
//! (deferred). The actual despawn happens in `PostUpdate`, after every fixed
//! step of the frame, so no system ever sees half-removed entities inside the
//! physics step.
//!
//! Despawning drops every component, which cancels the entity's transient
//! state timers and countdowns with it.

use bevy::ecs::system::EntityCommands;
use bevy::prelude::*;

use crate::common::sets::GameplaySet;
use crate::common::tunables::secs;

/// Marker: entity should be removed from the world at the end of the frame.
#[derive(Component, Debug, Clone, Copy)]
pub struct PendingDespawn;

/// Countdown to `PendingDespawn`.
#[derive(Component, Debug, Clone, Deref, DerefMut)]
pub struct DespawnAfter(pub Timer);

impl DespawnAfter {
    pub fn seconds(s: f32) -> Self {
        Self(Timer::new(secs(s), TimerMode::Once))
    }
}

pub trait RemovalCommandsExt {
    fn remove_now(&mut self) -> &mut Self;
    fn remove_after(&mut self, seconds: f32) -> &mut Self;
}

impl RemovalCommandsExt for EntityCommands<'_> {
    fn remove_now(&mut self) -> &mut Self {
        self.insert(PendingDespawn)
    }

    fn remove_after(&mut self, seconds: f32) -> &mut Self {
        self.insert(DespawnAfter::seconds(seconds))
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(FixedUpdate, tick_despawn_timers.in_set(GameplaySet::Timers))
        .add_systems(PostUpdate, despawn_pending);
}

pub fn tick_despawn_timers(
    time: Res<Time<Fixed>>,
    mut commands: Commands,
    mut q: Query<(Entity, &mut DespawnAfter), Without<PendingDespawn>>,
) {
    for (e, mut after) in &mut q {
        after.tick(time.delta());
        if after.is_finished() {
            commands.entity(e).insert(PendingDespawn);
        }
    }
}

/// Centralizing despawn in one system keeps structural changes predictable.
pub fn despawn_pending(mut commands: Commands, q: Query<Entity, With<PendingDespawn>>) {
    for e in &q {
        commands.entity(e).despawn();
    }
}
