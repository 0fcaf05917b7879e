//! Feature plugins.

use bevy::prelude::*;

pub mod combat;
pub mod core;
pub mod enemies;
pub mod lifecycle;
pub mod movement;
pub mod physics;
pub mod pickups;
pub mod player;
pub mod projectiles;
pub mod world;

// Render-only
pub mod camera;
pub mod lighting;
pub mod presentation;

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    // Tunables first: physics reads them while building.
    core::plugin(app);
    physics::plugin(app);
    lifecycle::plugin(app);
    combat::plugin(app);
    movement::plugin(app);
    world::plugin(app);
    player::plugin(app);
    enemies::plugin(app);
    pickups::plugin(app);
    projectiles::plugin(app);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    lighting::plugin(app);
    camera::plugin(app);
    presentation::plugin(app);
}
