use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use super::patrol::{lane_wrap, Patrol};
use super::profile::{EnemyKind, PatrolStyle};
use super::{Enemy, Lane};
use crate::common::category::{contact_rule, Category, ContactRule};
use crate::common::contacts::{split_contact, targets};
use crate::common::tunables::Tunables;
use crate::plugins::combat::{
    knockback_from, Action, ContactDamage, DamageRequest, TransientStates,
};
use crate::plugins::movement::{GroundProbe, MoveIntent};
use crate::plugins::player::Player;
use crate::plugins::world::WorldPiece;

pub fn tick_turn_cooldowns(time: Res<Time<Fixed>>, mut q: Query<&mut Patrol>) {
    for mut patrol in &mut q {
        patrol.tick(time.delta());
    }
}

/// Distance boundaries and the wall probe.
pub fn patrol_turns(
    mut q: Query<(&EnemyKind, &Transform, &TransientStates, &mut Patrol, Option<&GroundProbe>)>,
) {
    for (kind, tf, states, mut patrol, probe) in &mut q {
        if states.is_dying() {
            continue;
        }

        let turned = match kind.profile().style {
            PatrolStyle::Lane => false,
            PatrolStyle::Boundary => match patrol.boundary_heading(tf.translation.x) {
                Some(heading) => patrol.face(heading),
                None => probe.is_some_and(|p| p.wall_ahead) && patrol.request_turn(),
            },
            PatrolStyle::Contact => probe.is_some_and(|p| p.wall_ahead) && patrol.request_turn(),
        };

        if turned {
            debug!("{kind:?} turned {:?}", patrol.heading());
        }
    }
}

/// Collision-turning patrols flip on walls and on other enemies.
pub fn patrol_contacts(
    mut started: MessageReader<CollisionStart>,
    mut q_patrol: Query<(&EnemyKind, &TransientStates, &mut Patrol)>,
    q_walls: Query<&WorldPiece>,
    q_enemies: Query<(), With<Enemy>>,
) {
    for ev in started.read() {
        let (t1, t2) = targets(ev);
        for (me, other) in [(t1, t2), (t2, t1)] {
            let Ok((kind, states, mut patrol)) = q_patrol.get_mut(me.gameplay_owner()) else {
                continue;
            };
            if kind.profile().style != PatrolStyle::Contact
                || states.is_blocking(Action::CollisionResponse)
            {
                continue;
            }

            let other = other.gameplay_owner();
            let blocking = q_walls.get(other).is_ok_and(|p| *p == WorldPiece::Wall)
                || q_enemies.contains(other);
            if blocking && patrol.request_turn() {
                debug!("{kind:?} turned {:?} on contact", patrol.heading());
            }
        }
    }
}

pub fn patrol_intent(mut q: Query<(&Patrol, &mut MoveIntent), With<Enemy>>) {
    for (patrol, mut intent) in &mut q {
        intent.axis = patrol.heading().sign();
    }
}

/// Lane enemies re-enter on the near side once they leave the player's span.
pub fn wrap_lanes(
    tunables: Res<Tunables>,
    q_player: Query<&Transform, (With<Player>, Without<Enemy>)>,
    mut q: Query<
        (&Lane, &Patrol, &TransientStates, &mut Transform, &mut LinearVelocity),
        With<Enemy>,
    >,
) {
    let Ok(player_tf) = q_player.single() else {
        return;
    };
    let anchor_x = player_tf.translation.x;

    for (lane, patrol, states, mut tf, mut vel) in &mut q {
        // Kinematic bodies keep any knockback lift forever.
        tf.translation.y = lane.y;
        vel.y = 0.0;
        if states.is_dying() {
            continue;
        }
        if let Some(x) = lane_wrap(
            tf.translation.x,
            patrol.heading(),
            anchor_x,
            tunables.enemies.lane_half_span,
        ) {
            tf.translation.x = x;
        }
    }
}

/// Enemy touches player: contact damage with knockback away from the enemy.
pub fn enemy_contact_damage(
    mut started: MessageReader<CollisionStart>,
    q_enemies: Query<(&Category, &ContactDamage, &Transform), With<Enemy>>,
    q_targets: Query<(&Category, &Transform)>,
    mut damage: MessageWriter<DamageRequest>,
) {
    for ev in started.read() {
        let Some((enemy_side, other_side)) = split_contact(ev, |e| q_enemies.contains(e)) else {
            continue;
        };
        let Ok((enemy_category, contact, enemy_tf)) = q_enemies.get(enemy_side.gameplay_owner())
        else {
            continue;
        };
        let target = other_side.gameplay_owner();
        let Ok((target_category, target_tf)) = q_targets.get(target) else {
            continue;
        };

        if contact_rule(*enemy_category, *target_category) != ContactRule::Damage {
            continue;
        }

        damage.write(DamageRequest {
            target,
            amount: contact.0,
            knockback: knockback_from(
                enemy_tf.translation.truncate(),
                target_tf.translation.truncate(),
            ),
        });
    }
}
