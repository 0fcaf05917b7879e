//! Player plugin.
//!
//! Pipeline:
//! - Update: sample keyboard, latch edges into the `PlayerInput` resource
//! - FixedUpdate (Intent): copy input into `MoveIntent`, set the resting
//!   posture, fire an attack if powered up
//! - PostUpdate: player removal ends the run (`GameState::GameOver`)
//!
//! Edges (jump, attack) are latched in `Update` and consumed in the fixed
//! step, so a press is never lost when a frame runs zero fixed steps.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::category::Category;
use crate::common::layers::Layer;
use crate::common::sets::GameplaySet;
use crate::common::state::GameState;
use crate::common::tunables::{secs, Tunables};
use crate::plugins::combat::{CombatSignal, DeathClip, Health, TransientStates};
use crate::plugins::lifecycle::{self, PendingDespawn};
use crate::plugins::movement::{Facing, GroundProbe, MotionFlags, MoveIntent, Mover, ProbeSpec};
use crate::plugins::projectiles::messages::SpawnProjectileRequest;

pub const PLAYER_HALF_EXTENTS: Vec2 = Vec2::new(12.0, 14.0);

#[derive(Component)]
pub struct Player;

#[derive(Resource, Default, Debug)]
pub struct PlayerInput {
    pub axis: f32,
    pub jump: bool,
    pub attack: bool,
    pub lie_down: bool,
}

pub fn plugin(app: &mut App) {
    app.insert_resource(PlayerInput::default())
        .add_systems(OnEnter(GameState::InGame), (reset_input, spawn))
        .add_systems(Update, gather_input.run_if(in_state(GameState::InGame)))
        .add_systems(
            FixedUpdate,
            (write_player_intent, player_attack)
                .chain()
                .in_set(GameplaySet::Intent),
        )
        .add_systems(
            PostUpdate,
            enter_game_over
                .before(lifecycle::despawn_pending)
                .run_if(in_state(GameState::InGame)),
        );
}

fn spawn(mut commands: Commands, tunables: Res<Tunables>) {
    let layers = CollisionLayers::new(
        Layer::Player,
        [Layer::World, Layer::Enemy, Layer::EnemyProjectile, Layer::Pickup],
    );

    commands.spawn((
        Name::new("Player"),
        Player,
        Category::Player,
        Health::new(tunables.combat.player_max_health),
        TransientStates::default(),
        DeathClip::default(),
        (
            MoveIntent::default(),
            Mover {
                speed: tunables.movement.player_speed,
                jump_impulse: tunables.movement.jump_impulse,
            },
            Facing::Right,
            GroundProbe::default(),
            MotionFlags::default(),
            ProbeSpec {
                half_extents: PLAYER_HALF_EXTENTS,
                ground_cast: tunables.movement.ground_probe,
                wall_cast: tunables.movement.wall_probe,
            },
        ),
        Sprite {
            color: Color::srgb(0.2, 0.75, 0.9),
            custom_size: Some(PLAYER_HALF_EXTENTS * 2.0),
            ..default()
        },
        Transform::from_xyz(-300.0, -150.0, 1.0),
        (
            RigidBody::Dynamic,
            LockedAxes::ROTATION_LOCKED,
            Collider::rectangle(PLAYER_HALF_EXTENTS.x * 2.0, PLAYER_HALF_EXTENTS.y * 2.0),
            Friction::ZERO.with_combine_rule(CoefficientCombine::Min),
            layers,
            CollisionEventsEnabled,
            LinearVelocity::ZERO,
            TranslationExtrapolation,
        ),
        DespawnOnExit(GameState::InGame),
    ));
}

/// Edges latched during the previous run must not fire in the new one.
pub fn reset_input(mut input: ResMut<PlayerInput>) {
    *input = PlayerInput::default();
}

/// Keyboard may be missing in headless apps; then input stays neutral.
fn gather_input(keys: Option<Res<ButtonInput<KeyCode>>>, mut input: ResMut<PlayerInput>) {
    let Some(keys) = keys else {
        return;
    };

    let mut axis = 0.0;
    if keys.any_pressed([KeyCode::ArrowLeft, KeyCode::KeyA]) {
        axis -= 1.0;
    }
    if keys.any_pressed([KeyCode::ArrowRight, KeyCode::KeyD]) {
        axis += 1.0;
    }
    input.axis = axis;
    input.lie_down = keys.any_pressed([KeyCode::ArrowDown, KeyCode::KeyS]);

    // Latched until the fixed step consumes them.
    input.jump |= keys.just_pressed(KeyCode::Space);
    input.attack |= keys.any_just_pressed([KeyCode::ControlLeft, KeyCode::KeyJ]);
}

pub fn write_player_intent(
    mut input: ResMut<PlayerInput>,
    mut q: Query<(&mut MoveIntent, &mut TransientStates), With<Player>>,
) {
    let Ok((mut intent, mut states)) = q.single_mut() else {
        return;
    };

    intent.axis = input.axis;
    intent.jump = std::mem::take(&mut input.jump);
    states.set_resting(input.lie_down);
}

/// Attack edge while powered up: cooldown + projectile spawn request.
pub fn player_attack(
    tunables: Res<Tunables>,
    mut input: ResMut<PlayerInput>,
    mut q: Query<(Entity, &Transform, &Facing, &mut TransientStates), With<Player>>,
    mut requests: MessageWriter<SpawnProjectileRequest>,
    mut signals: MessageWriter<CombatSignal>,
) {
    if !std::mem::take(&mut input.attack) {
        return;
    }

    let Ok((e, tf, facing, mut states)) = q.single_mut() else {
        return;
    };

    if !states.try_begin_attack(secs(tunables.combat.attack_cooldown_secs)) {
        debug!("attack ignored: not available");
        return;
    }

    let position =
        tf.translation.truncate() + facing.direction() * tunables.projectiles.muzzle_offset;
    requests.write(SpawnProjectileRequest {
        position,
        owner: Category::Player,
        facing: *facing,
    });
    signals.write(CombatSignal::Attacked { entity: e });
}

pub fn enter_game_over(
    q: Query<(), (With<Player>, With<PendingDespawn>)>,
    mut next: ResMut<NextState<GameState>>,
) {
    if !q.is_empty() {
        info!("game over");
        next.set(GameState::GameOver);
    }
}
