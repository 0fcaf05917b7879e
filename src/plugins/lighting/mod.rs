//! Lighting plugin (Firefly) (render-only).
//!
//! A warm light follows the player and widens while the player is powered
//! up. Every pickup carries a small fixed glow.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy_firefly::prelude::*;

use crate::common::state::GameState;
use crate::plugins::combat::{TransientState, TransientStates};
use crate::plugins::pickups::Pickup;
use crate::plugins::player::Player;

#[derive(Component)]
pub struct PlayerLight;

const PLAYER_LIGHT_RANGE: f32 = 450.0;
const POWERED_LIGHT_RANGE: f32 = 600.0;

pub fn plugin(app: &mut App) {
    if !app.is_plugin_added::<FireflyPlugin>() {
        app.add_plugins(FireflyPlugin);
    }

    app.add_systems(OnEnter(GameState::InGame), setup)
        .add_systems(
            Update,
            (follow_player_light, glow_new_pickups).run_if(in_state(GameState::InGame)),
        );
}

fn setup(mut commands: Commands) {
    commands.spawn((
        Name::new("PlayerLight"),
        PlayerLight,
        PointLight2d {
            color: Color::srgb(1.0, 0.9, 0.75),
            range: PLAYER_LIGHT_RANGE,
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 10.0),
        DespawnOnExit(GameState::InGame),
    ));
}

fn follow_player_light(
    q_player: Query<(&Transform, &TransientStates), (With<Player>, Without<PlayerLight>)>,
    mut q_light: Query<(&mut Transform, &mut PointLight2d), (With<PlayerLight>, Without<Player>)>,
) {
    let Ok((tf_player, states)) = q_player.single() else {
        return;
    };
    let Ok((mut tf_light, mut light)) = q_light.single_mut() else {
        return;
    };

    tf_light.translation.x = tf_player.translation.x;
    tf_light.translation.y = tf_player.translation.y;

    let range = if states.is_active(TransientState::PoweredUp) {
        POWERED_LIGHT_RANGE
    } else {
        PLAYER_LIGHT_RANGE
    };
    if light.range != range {
        light.range = range;
    }
}

fn glow_new_pickups(mut commands: Commands, q: Query<Entity, Added<Pickup>>) {
    for e in &q {
        commands.entity(e).insert(PointLight2d {
            color: Color::srgb(1.0, 0.95, 0.6),
            range: 60.0,
            ..default()
        });
    }
}
