//! Damage resolution.
//!
//! `resolve_damage` is the only code path that lowers a `Health`. It decides
//! whether the hit lands, how far the pool drops, and which transient states
//! follow (hurt: Invulnerable + KnockedBack, fatal: Dying).

use std::time::Duration;

use bevy::prelude::*;
use thiserror::Error;

use super::health::{Depletion, Health};
use super::state::{Action, TransientState, TransientStates};
use crate::common::tunables::{secs, CombatTunables};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DamageError {
    #[error("damage amount must not be negative (got {0})")]
    NegativeAmount(i32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageOutcome {
    pub applied: bool,
    pub new_health: u32,
    pub died: bool,
    /// Unit knockback direction when the hit landed and was not fatal.
    pub knockback: Option<Vec2>,
}

impl DamageOutcome {
    fn rejected(health: &Health) -> Self {
        Self {
            applied: false,
            new_health: health.current(),
            died: false,
            knockback: None,
        }
    }
}

/// Durations and shaping applied on a successful hit.
#[derive(Debug, Clone, Copy)]
pub struct DamageRules {
    pub invulnerable: Duration,
    pub knockback: Duration,
    pub min_lift: f32,
    pub death_fallback: Duration,
}

impl From<&CombatTunables> for DamageRules {
    fn from(t: &CombatTunables) -> Self {
        Self {
            invulnerable: secs(t.invulnerable_secs),
            knockback: secs(t.knockback_secs),
            min_lift: t.knockback_min_lift,
            death_fallback: secs(t.death_fallback_secs),
        }
    }
}

/// Resolve one hit against a target.
///
/// `knockback` is the raw push direction (usually `target - source`); it is
/// normalized and lifted here. `death_clip` is the presentation-owned death
/// length in seconds, if known. A zero amount is a no-op.
pub fn resolve_damage(
    health: &mut Health,
    states: &mut TransientStates,
    amount: i32,
    knockback: Vec2,
    rules: &DamageRules,
    death_clip: Option<f32>,
) -> Result<DamageOutcome, DamageError> {
    let amount = u32::try_from(amount).map_err(|_| DamageError::NegativeAmount(amount))?;
    if amount == 0 {
        return Ok(DamageOutcome::rejected(health));
    }

    // Knockback rides on the damage outcome, so Invulnerable drops both.
    if states.is_blocking(Action::TakeDamage) {
        return Ok(DamageOutcome::rejected(health));
    }

    match health.apply_damage(amount) {
        Depletion::AlreadyDepleted => Ok(DamageOutcome::rejected(health)),
        Depletion::JustDepleted => {
            states.enter(
                TransientState::Dying,
                death_duration(death_clip, rules.death_fallback),
            );
            Ok(DamageOutcome {
                applied: true,
                new_health: 0,
                died: true,
                knockback: None,
            })
        }
        Depletion::StillAlive => {
            let dir = lifted_knockback(knockback, rules.min_lift);
            states.enter(TransientState::Invulnerable, rules.invulnerable);
            states.enter(TransientState::KnockedBack, rules.knockback);
            Ok(DamageOutcome {
                applied: true,
                new_health: health.current(),
                died: false,
                knockback: Some(dir),
            })
        }
    }
}

/// Normalize `raw` and floor its vertical component so every knockback lifts.
///
/// A degenerate input pushes straight up.
pub fn lifted_knockback(raw: Vec2, min_lift: f32) -> Vec2 {
    let mut dir = raw.normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec2::Y;
    }
    dir.y = dir.y.max(min_lift);
    dir.normalize_or(Vec2::Y)
}

/// Knockback convention: push the target away from the source.
#[inline]
pub fn knockback_from(source: Vec2, target: Vec2) -> Vec2 {
    target - source
}

/// Death clip length, falling back when it is missing or unusable.
pub fn death_duration(clip_secs: Option<f32>, fallback: Duration) -> Duration {
    match clip_secs {
        Some(s) if s.is_finite() && s > 0.0 => Duration::from_secs_f32(s),
        _ => fallback,
    }
}
