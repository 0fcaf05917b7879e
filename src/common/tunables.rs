//! Tunable gameplay constants.
//!
//! Distances and speeds are in pixels (`pixels_per_meter` converts the
//! level's unit grid). Durations are in seconds.

use std::time::Duration;

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    pub pixels_per_meter: f32,
    /// Downward acceleration, px/s^2.
    pub gravity: f32,
    pub movement: MovementTunables,
    pub combat: CombatTunables,
    pub enemies: EnemyTunables,
    pub projectiles: ProjectileTunables,
    pub pickups: PickupTunables,
}

#[derive(Debug, Clone)]
pub struct MovementTunables {
    pub player_speed: f32,
    pub jump_impulse: f32,
    /// Extra ray length below the feet for the grounded probe.
    pub ground_probe: f32,
    /// Extra ray length ahead of the body for the wall probe.
    pub wall_probe: f32,
}

#[derive(Debug, Clone)]
pub struct CombatTunables {
    pub player_max_health: u32,
    pub invulnerable_secs: f32,
    /// How many times the sprite blinks during invulnerability.
    pub invulnerable_flashes: u32,
    pub knockback_secs: f32,
    pub knockback_speed: f32,
    /// Minimum upward component of a knockback direction.
    pub knockback_min_lift: f32,
    pub attack_cooldown_secs: f32,
    /// Used when no death clip length is available.
    pub death_fallback_secs: f32,
}

#[derive(Debug, Clone)]
pub struct EnemyTunables {
    pub base_speed: f32,
    pub base_damage: i32,
    /// Half width of a distance-based patrol, measured from the spawn point.
    pub patrol_distance: f32,
    pub turn_cooldown_secs: f32,
    /// Lane enemies wrap once they are this far behind the player.
    pub lane_half_span: f32,
}

#[derive(Debug, Clone)]
pub struct ProjectileTunables {
    pub speed: f32,
    pub lifetime_secs: f32,
    pub damage: i32,
    /// Spawn offset in front of the shooter.
    pub muzzle_offset: f32,
}

#[derive(Debug, Clone)]
pub struct PickupTunables {
    pub heal_amount: u32,
    pub power_up_secs: f32,
    /// Length of the grow/fade removal sequence.
    pub collect_secs: f32,
    pub bob_height: f32,
    pub bob_speed: f32,
}

impl Default for Tunables {
    fn default() -> Self {
        let ppm = 32.0;
        Self {
            pixels_per_meter: ppm,
            gravity: 30.0 * ppm,
            movement: MovementTunables {
                player_speed: 5.0 * ppm,
                jump_impulse: 12.0 * ppm,
                ground_probe: 4.0,
                wall_probe: 6.0,
            },
            combat: CombatTunables {
                player_max_health: 5,
                invulnerable_secs: 1.0,
                invulnerable_flashes: 5,
                knockback_secs: 0.3,
                knockback_speed: 7.0 * ppm,
                knockback_min_lift: 0.35,
                attack_cooldown_secs: 0.35,
                death_fallback_secs: 0.6,
            },
            enemies: EnemyTunables {
                base_speed: 3.0 * ppm,
                base_damage: 1,
                patrol_distance: 4.0 * ppm,
                turn_cooldown_secs: 0.25,
                lane_half_span: 15.0 * ppm,
            },
            projectiles: ProjectileTunables {
                speed: 10.0 * ppm,
                lifetime_secs: 2.0,
                damage: 1,
                muzzle_offset: 18.0,
            },
            pickups: PickupTunables {
                heal_amount: 1,
                power_up_secs: 10.0,
                collect_secs: 0.3,
                bob_height: 0.5 * ppm,
                bob_speed: 2.0,
            },
        }
    }
}

#[inline]
pub fn secs(s: f32) -> Duration {
    Duration::from_secs_f32(s.max(0.0))
}
