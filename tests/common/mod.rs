//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime.
//! - we then call `pixel_adventure::game::configure_headless` to install gameplay plugins.

#![allow(dead_code)]

use std::time::Duration;

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

pub fn app_headless() -> App {
    let mut app = App::new();

    // AssetPlugin + ScenePlugin so SceneSpawner exists for avian.
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));

    pixel_adventure::game::configure_headless(&mut app);
    app
}

/// Headless app whose clock advances one fixed step per `update()`.
pub fn app_stepped() -> App {
    let mut app = app_headless();
    let step = Time::<Fixed>::default().timestep();
    app.insert_resource(TimeUpdateStrategy::ManualDuration(step));
    app
}

/// Run updates until `done` holds; returns how many were needed.
pub fn update_until(app: &mut App, max_updates: usize, mut done: impl FnMut(&mut App) -> bool) -> Option<usize> {
    for i in 1..=max_updates {
        app.update();
        if done(app) {
            return Some(i);
        }
    }
    None
}

pub fn fixed_step() -> Duration {
    Time::<Fixed>::default().timestep()
}
