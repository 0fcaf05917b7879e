//! Movement controller shared by the player and enemies.
//!
//! Pipeline (fixed step):
//! - Timers:   `probe_surroundings` writes `GroundProbe` from ray casts
//! - Intent:   player input / patrol AI write `MoveIntent` (other plugins)
//! - Movement: `apply_movement` turns intent into velocity, `update_facing`
//!
//! Who owns the velocity:
//! - normal: horizontal from intent, vertical from gravity (+ jump impulse)
//! - KnockedBack: physics (the knockback impulse keeps playing out)
//! - Dying: nobody moves it; horizontal forced to zero

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::Layer;
use crate::common::sets::GameplaySet;
use crate::plugins::combat::{Action, TransientStates};

/// Per-tick intent from input or AI. `jump` is an edge and is consumed.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveIntent {
    pub axis: f32,
    pub jump: bool,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct Mover {
    pub speed: f32,
    /// Zero disables jumping.
    pub jump_impulse: f32,
}

#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    #[inline]
    pub fn direction(self) -> Vec2 {
        Vec2::new(self.sign(), 0.0)
    }

    /// Flip only when the intent points the other way; zero keeps facing.
    #[inline]
    pub fn from_axis(axis: f32, current: Facing) -> Facing {
        if axis > 0.0 {
            Facing::Right
        } else if axis < 0.0 {
            Facing::Left
        } else {
            current
        }
    }
}

/// Ray probe configuration, relative to the body centre.
#[derive(Component, Debug, Clone, Copy)]
pub struct ProbeSpec {
    pub half_extents: Vec2,
    pub ground_cast: f32,
    pub wall_cast: f32,
}

/// Results of the physics probes ("is grounded", "is wall ahead").
///
/// `jump_armed` is a latch: landing re-arms it, jumping spends it, so a held
/// or repeated jump edge fires at most once per grounded edge.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroundProbe {
    pub grounded: bool,
    pub wall_ahead: bool,
    pub jump_armed: bool,
}

impl Default for GroundProbe {
    fn default() -> Self {
        Self {
            grounded: false,
            wall_ahead: false,
            jump_armed: true,
        }
    }
}

impl GroundProbe {
    pub fn observe(&mut self, grounded: bool, wall_ahead: bool) {
        if grounded && !self.grounded {
            self.jump_armed = true;
        }
        self.grounded = grounded;
        self.wall_ahead = wall_ahead;
    }
}

/// Presentation flags (animation parameters).
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotionFlags {
    pub grounded: bool,
    pub running: bool,
    pub resting: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveCommand {
    Drive { vx: f32, jump: bool },
    /// Leave velocity to physics (knockback in flight).
    PhysicsOwned,
    /// Zero the controlled axis.
    Halt,
}

pub fn plan_movement(
    intent: &MoveIntent,
    mover: &Mover,
    states: &TransientStates,
    probe: Option<&GroundProbe>,
) -> MoveCommand {
    if states.is_dying() {
        return MoveCommand::Halt;
    }
    if states.is_blocking(Action::Move) {
        return MoveCommand::PhysicsOwned;
    }

    let jump = intent.jump
        && mover.jump_impulse > 0.0
        && !states.is_blocking(Action::Jump)
        && probe.is_some_and(|p| p.grounded && p.jump_armed);

    MoveCommand::Drive {
        vx: intent.axis.clamp(-1.0, 1.0) * mover.speed,
        jump,
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(
        FixedUpdate,
        probe_surroundings.in_set(GameplaySet::Timers),
    )
    .add_systems(
        FixedUpdate,
        (apply_movement, update_facing)
            .chain()
            .in_set(GameplaySet::Movement),
    );
}

pub fn probe_surroundings(
    spatial: SpatialQuery,
    mut q: Query<(Entity, &Transform, &Facing, &ProbeSpec, &mut GroundProbe)>,
) {
    for (e, tf, facing, spec, mut probe) in &mut q {
        let origin = tf.translation.truncate();
        let filter = SpatialQueryFilter::from_mask(Layer::World).with_excluded_entities([e]);

        let grounded = spatial
            .cast_ray(
                origin,
                Dir2::NEG_Y,
                spec.half_extents.y + spec.ground_cast,
                true,
                &filter,
            )
            .is_some();

        let ahead = match facing {
            Facing::Right => Dir2::X,
            Facing::Left => Dir2::NEG_X,
        };
        let wall_ahead = spatial
            .cast_ray(origin, ahead, spec.half_extents.x + spec.wall_cast, true, &filter)
            .is_some();

        probe.observe(grounded, wall_ahead);
    }
}

pub fn apply_movement(
    mut q: Query<(
        &mut MoveIntent,
        &Mover,
        &TransientStates,
        &mut LinearVelocity,
        Option<&mut GroundProbe>,
        Option<&mut MotionFlags>,
    )>,
) {
    for (mut intent, mover, states, mut vel, mut probe, flags) in &mut q {
        let cmd = plan_movement(&intent, mover, states, probe.as_deref());

        // Jump is an edge: it either fired this tick or it is gone.
        intent.jump = false;

        let running = match cmd {
            MoveCommand::Drive { vx, jump } => {
                vel.x = vx;
                if jump {
                    vel.y = mover.jump_impulse;
                    if let Some(probe) = probe.as_mut() {
                        probe.jump_armed = false;
                    }
                }
                vx != 0.0
            }
            MoveCommand::PhysicsOwned => false,
            MoveCommand::Halt => {
                vel.x = 0.0;
                false
            }
        };

        if let Some(mut flags) = flags {
            flags.grounded = probe.as_deref().is_some_and(|p| p.grounded);
            flags.running = running;
            flags.resting = states.is_resting();
        }
    }
}

pub fn update_facing(mut q: Query<(&MoveIntent, &TransientStates, &mut Facing)>) {
    for (intent, states, mut facing) in &mut q {
        if states.is_blocking(Action::Move) {
            continue;
        }
        let next = Facing::from_axis(intent.axis, *facing);
        if next != *facing {
            *facing = next;
        }
    }
}

#[cfg(test)]
mod tests;
