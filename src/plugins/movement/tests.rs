use std::time::Duration;

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::test_utils::run_system_once;
use crate::plugins::combat::{TransientState, TransientStates};

use super::*;

fn mover() -> Mover {
    Mover {
        speed: 100.0,
        jump_impulse: 300.0,
    }
}

fn grounded() -> GroundProbe {
    GroundProbe {
        grounded: true,
        wall_ahead: false,
        jump_armed: true,
    }
}

#[test]
fn drive_scales_intent_by_speed() {
    let intent = MoveIntent { axis: -0.5, jump: false };
    let cmd = plan_movement(&intent, &mover(), &TransientStates::default(), None);
    assert_eq!(cmd, MoveCommand::Drive { vx: -50.0, jump: false });
}

#[test]
fn intent_is_clamped() {
    let intent = MoveIntent { axis: 4.0, jump: false };
    let cmd = plan_movement(&intent, &mover(), &TransientStates::default(), None);
    assert_eq!(cmd, MoveCommand::Drive { vx: 100.0, jump: false });
}

#[test]
fn jump_needs_ground_latch_and_no_rest() {
    let intent = MoveIntent { axis: 0.0, jump: true };
    let states = TransientStates::default();

    let airborne = GroundProbe::default();
    assert_eq!(
        plan_movement(&intent, &mover(), &states, Some(&airborne)),
        MoveCommand::Drive { vx: 0.0, jump: false }
    );

    assert_eq!(
        plan_movement(&intent, &mover(), &states, Some(&grounded())),
        MoveCommand::Drive { vx: 0.0, jump: true }
    );

    let spent = GroundProbe { jump_armed: false, ..grounded() };
    assert_eq!(
        plan_movement(&intent, &mover(), &states, Some(&spent)),
        MoveCommand::Drive { vx: 0.0, jump: false }
    );

    let mut resting = TransientStates::default();
    resting.set_resting(true);
    assert_eq!(
        plan_movement(&intent, &mover(), &resting, Some(&grounded())),
        MoveCommand::Drive { vx: 0.0, jump: false }
    );
}

#[test]
fn landing_rearms_the_jump_latch() {
    let mut probe = GroundProbe { jump_armed: false, ..grounded() };

    // Still on the ground: no new edge.
    probe.observe(true, false);
    assert!(!probe.jump_armed);

    probe.observe(false, false);
    probe.observe(true, false);
    assert!(probe.jump_armed);
}

#[test]
fn knockback_suppresses_intent_for_its_full_duration() {
    let mut states = TransientStates::default();
    states.enter(TransientState::KnockedBack, Duration::from_millis(500));
    let intent = MoveIntent { axis: 1.0, jump: true };

    // 4 ticks of 100 ms: knockback still running.
    for _ in 0..4 {
        states.tick(Duration::from_millis(100));
        assert_eq!(
            plan_movement(&intent, &mover(), &states, Some(&grounded())),
            MoveCommand::PhysicsOwned
        );
    }

    // Expires on the 5th tick; intent drives again right after.
    states.tick(Duration::from_millis(100));
    assert_eq!(
        plan_movement(&intent, &mover(), &states, None),
        MoveCommand::Drive { vx: 100.0, jump: false }
    );
}

#[test]
fn dying_halts() {
    let mut states = TransientStates::default();
    states.enter(TransientState::Dying, Duration::from_millis(500));
    let intent = MoveIntent { axis: 1.0, jump: true };
    assert_eq!(
        plan_movement(&intent, &mover(), &states, Some(&grounded())),
        MoveCommand::Halt
    );
}

#[test]
fn facing_flips_only_on_opposite_intent() {
    assert_eq!(Facing::from_axis(1.0, Facing::Left), Facing::Right);
    assert_eq!(Facing::from_axis(-0.2, Facing::Right), Facing::Left);
    assert_eq!(Facing::from_axis(0.0, Facing::Left), Facing::Left);
    assert_eq!(Facing::Left.direction(), Vec2::NEG_X);
}

// -----------------------------------------------------------------------------
// Systems
// -----------------------------------------------------------------------------

#[test]
fn apply_movement_writes_velocity_and_consumes_jump() {
    let mut world = World::new();
    let e = world
        .spawn((
            MoveIntent { axis: 1.0, jump: true },
            mover(),
            TransientStates::default(),
            LinearVelocity(Vec2::new(0.0, -20.0)),
            grounded(),
            MotionFlags::default(),
        ))
        .id();

    run_system_once(&mut world, apply_movement);

    assert_eq!(world.get::<LinearVelocity>(e).unwrap().0, Vec2::new(100.0, 300.0));
    assert!(!world.get::<MoveIntent>(e).unwrap().jump);
    assert!(!world.get::<GroundProbe>(e).unwrap().jump_armed);
    assert_eq!(
        *world.get::<MotionFlags>(e).unwrap(),
        MotionFlags { grounded: true, running: true, resting: false }
    );
}

#[test]
fn apply_movement_leaves_knockback_velocity_alone() {
    let mut world = World::new();
    let mut states = TransientStates::default();
    states.enter(TransientState::KnockedBack, Duration::from_millis(300));
    let e = world
        .spawn((
            MoveIntent { axis: 1.0, jump: false },
            mover(),
            states,
            LinearVelocity(Vec2::new(-200.0, 80.0)),
        ))
        .id();

    run_system_once(&mut world, apply_movement);

    assert_eq!(world.get::<LinearVelocity>(e).unwrap().0, Vec2::new(-200.0, 80.0));
}

#[test]
fn apply_movement_zeroes_horizontal_while_dying() {
    let mut world = World::new();
    let mut states = TransientStates::default();
    states.enter(TransientState::Dying, Duration::from_millis(300));
    let e = world
        .spawn((
            MoveIntent { axis: 1.0, jump: false },
            mover(),
            states,
            LinearVelocity(Vec2::new(-200.0, 80.0)),
        ))
        .id();

    run_system_once(&mut world, apply_movement);

    assert_eq!(world.get::<LinearVelocity>(e).unwrap().0, Vec2::new(0.0, 80.0));
}

#[test]
fn update_facing_is_frozen_while_knocked_back() {
    let mut world = World::new();
    let mut states = TransientStates::default();
    states.enter(TransientState::KnockedBack, Duration::from_millis(300));
    let stunned = world
        .spawn((MoveIntent { axis: -1.0, jump: false }, states, Facing::Right))
        .id();
    let free = world
        .spawn((
            MoveIntent { axis: -1.0, jump: false },
            TransientStates::default(),
            Facing::Right,
        ))
        .id();

    run_system_once(&mut world, update_facing);

    assert_eq!(*world.get::<Facing>(stunned).unwrap(), Facing::Right);
    assert_eq!(*world.get::<Facing>(free).unwrap(), Facing::Left);
}
