//! Camera plugin (render-only): side-scrolling follow.
//!
//! Only the horizontal axis tracks the player; vertical follow is softened so
//! jumps do not shake the view. The camera outlives runs (spawned once at
//! startup) so the game-over screen still renders.
//!
//! Queries are kept disjoint with `Without<...>` filters (B0001).

use bevy::prelude::*;
use bevy_firefly::prelude::*;

use crate::common::state::GameState;
use crate::plugins::player::Player;
use crate::plugins::world::{GROUND_TOP, HALF_WIDTH};

#[derive(Component)]
pub struct MainCamera {
    pub responsiveness: f32,
    pub vertical_responsiveness: f32,
}

/// Half of the visible width; keeps the view inside the level walls.
const VIEW_HALF_WIDTH: f32 = 640.0;
/// Screen-space offset that puts the ground in the lower third.
const GROUND_MARGIN: f32 = 160.0;

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_camera).add_systems(
        PostUpdate,
        follow_player
            .before(TransformSystems::Propagate)
            .run_if(in_state(GameState::InGame)),
    );
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("MainCamera"),
        Camera2d,
        MainCamera {
            responsiveness: 6.0,
            vertical_responsiveness: 2.0,
        },
        FireflyConfig::default(),
        Transform::from_xyz(0.0, GROUND_TOP + GROUND_MARGIN * 2.0, 999.0),
    ));
}

/// Camera x that keeps the view inside the level.
pub fn clamp_to_level(x: f32) -> f32 {
    let limit = (HALF_WIDTH - VIEW_HALF_WIDTH).max(0.0);
    x.clamp(-limit, limit)
}

fn follow_player(
    time: Res<Time>,
    q_player: Query<&Transform, (With<Player>, Without<MainCamera>)>,
    mut q_cam: Query<(&mut Transform, &MainCamera), Without<Player>>,
) {
    let Ok(tf_player) = q_player.single() else {
        return;
    };
    let Ok((mut tf_cam, cam)) = q_cam.single_mut() else {
        return;
    };

    let dt = time.delta_secs();
    let alpha_x = 1.0 - (-cam.responsiveness * dt).exp();
    let alpha_y = 1.0 - (-cam.vertical_responsiveness * dt).exp();

    let target_x = clamp_to_level(tf_player.translation.x);
    let target_y = tf_player.translation.y.max(GROUND_TOP + GROUND_MARGIN);

    tf_cam.translation.x += (target_x - tf_cam.translation.x) * alpha_x;
    tf_cam.translation.y += (target_y - tf_cam.translation.y) * alpha_y;
}
