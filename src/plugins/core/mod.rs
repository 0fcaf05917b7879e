//! Core plugin: shared resources, gameplay scheduling and the run loop
//! (game over -> restart).

use avian2d::collision::narrow_phase::CollisionEventSystems;
use bevy::prelude::*;

use crate::common::sets::GameplaySet;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;

pub const RESTART_KEYS: [KeyCode; 3] = [KeyCode::Enter, KeyCode::NumpadEnter, KeyCode::KeyR];

pub fn plugin(app: &mut App) {
    app.insert_resource(Tunables::default());
    app.insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.07)));

    app.configure_sets(
        FixedUpdate,
        (GameplaySet::Timers, GameplaySet::Intent, GameplaySet::Movement)
            .chain()
            .run_if(in_state(GameState::InGame)),
    )
    .configure_sets(
        FixedPostUpdate,
        (GameplaySet::Contacts, GameplaySet::Resolve)
            .chain()
            .after(CollisionEventSystems)
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(OnEnter(GameState::GameOver), announce_game_over)
        .add_systems(Update, restart_on_key.run_if(in_state(GameState::GameOver)));
}

fn announce_game_over() {
    info!("press Enter or R to restart");
}

/// Keyboard may be missing in headless apps; then the run never restarts.
pub fn restart_on_key(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut next: ResMut<NextState<GameState>>,
) {
    let Some(keys) = keys else {
        return;
    };
    if keys.any_just_pressed(RESTART_KEYS) {
        info!("restarting");
        next.set(GameState::InGame);
    }
}
