//! Presentation plugin (render-only).
//!
//! Reads gameplay facts and derives sprite state from them; nothing here
//! feeds back into the simulation.
//!
//! - `Facing` -> horizontal flip
//! - Invulnerable -> blinking, Dying -> fade out
//! - resting posture -> squashed sprite
//! - collected pickup -> grow + fade over its removal countdown
//! - game over -> tinted clear colour

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::combat::{TransientState, TransientStates};
use crate::plugins::lifecycle::DespawnAfter;
use crate::plugins::movement::{Facing, MotionFlags};
use crate::plugins::pickups::Pickup;

const RESTING_SQUASH: f32 = 0.6;
const COLLECT_GROWTH: f32 = 0.8;
const GAME_OVER_CLEAR: Color = Color::srgb(0.18, 0.04, 0.05);
const IN_GAME_CLEAR: Color = Color::srgb(0.05, 0.05, 0.07);

pub fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        (flip_sprites, state_alpha, resting_posture, collect_effect)
            .run_if(in_state(GameState::InGame)),
    )
    .add_systems(OnEnter(GameState::GameOver), |mut clear: ResMut<ClearColor>| {
        clear.0 = GAME_OVER_CLEAR;
    })
    .add_systems(OnExit(GameState::GameOver), |mut clear: ResMut<ClearColor>| {
        clear.0 = IN_GAME_CLEAR;
    });
}

/// Blink pattern: `flashes` off/on cycles over the invulnerability window.
pub fn flash_visible(progress: f32, flashes: u32) -> bool {
    let half_cycles = (progress.clamp(0.0, 1.0) * flashes as f32 * 2.0) as u32;
    half_cycles % 2 == 1 || progress >= 1.0
}

/// Sprite alpha derived from the transient states.
pub fn state_alpha_for(states: &TransientStates, flashes: u32) -> f32 {
    if let Some(p) = states.progress(TransientState::Dying) {
        return 1.0 - p;
    }
    match states.progress(TransientState::Invulnerable) {
        Some(p) if !flash_visible(p, flashes) => 0.25,
        _ => 1.0,
    }
}

/// Scale and alpha of a pickup `fraction` of the way through collection.
pub fn collect_scale_alpha(fraction: f32) -> (f32, f32) {
    let f = fraction.clamp(0.0, 1.0);
    (1.0 + f * COLLECT_GROWTH, 1.0 - f)
}

fn flip_sprites(mut q: Query<(&Facing, &mut Sprite), Changed<Facing>>) {
    for (facing, mut sprite) in &mut q {
        sprite.flip_x = *facing == Facing::Left;
    }
}

fn state_alpha(tunables: Res<Tunables>, mut q: Query<(&TransientStates, &mut Sprite)>) {
    let flashes = tunables.combat.invulnerable_flashes;
    for (states, mut sprite) in &mut q {
        let alpha = state_alpha_for(states, flashes);
        if sprite.color.alpha() != alpha {
            sprite.color.set_alpha(alpha);
        }
    }
}

fn resting_posture(mut q: Query<(&MotionFlags, &mut Transform), Changed<MotionFlags>>) {
    for (flags, mut tf) in &mut q {
        tf.scale.y = if flags.resting { RESTING_SQUASH } else { 1.0 };
    }
}

fn collect_effect(mut q: Query<(&Pickup, &DespawnAfter, &mut Transform, &mut Sprite)>) {
    for (pickup, after, mut tf, mut sprite) in &mut q {
        if !pickup.being_collected {
            continue;
        }
        let (scale, alpha) = collect_scale_alpha(after.fraction());
        tf.scale = Vec3::splat(scale);
        sprite.color.set_alpha(alpha);
    }
}
