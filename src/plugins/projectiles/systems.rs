use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::platform::collections::HashSet;
use bevy::prelude::*;

use super::components::Projectile;
use crate::common::category::{projectile_contact, Category, ProjectileContact};
use crate::common::contacts::split_contact;
use crate::plugins::combat::DamageRequest;
use crate::plugins::lifecycle::PendingDespawn;

/// Constant-velocity flight.
pub fn drive_projectiles(mut q: Query<(&Projectile, &mut LinearVelocity), Without<PendingDespawn>>) {
    for (projectile, mut vel) in &mut q {
        vel.0 = projectile.velocity();
    }
}

/// Projectile contacts become damage requests and removals.
///
/// A projectile is consumed by its first damaging or blocking contact; later
/// contacts in the same step (and in later steps, until removal) are ignored.
pub fn process_projectile_contacts(
    mut started: MessageReader<CollisionStart>,
    mut commands: Commands,
    q_live: Query<(), (With<Projectile>, Without<PendingDespawn>)>,
    q_projectiles: Query<&Projectile>,
    q_category: Query<&Category>,
    mut damage: MessageWriter<DamageRequest>,
    mut seen: Local<HashSet<Entity>>,
) {
    seen.clear();

    for ev in started.read() {
        let Some((projectile_side, other_side)) = split_contact(ev, |e| q_live.contains(e)) else {
            continue;
        };
        let projectile_entity = projectile_side.gameplay_owner();
        if seen.contains(&projectile_entity) {
            continue;
        }

        let Ok(projectile) = q_projectiles.get(projectile_entity) else {
            continue;
        };

        let target = other_side.gameplay_owner();
        let other = q_category.get(target).ok().copied();

        match projectile_contact(projectile.owner, other) {
            ProjectileContact::PassThrough => continue,
            ProjectileContact::Strike => {
                damage.write(DamageRequest {
                    target,
                    amount: projectile.damage,
                    knockback: projectile.direction,
                });
                debug!("projectile {projectile_entity:?} struck {target:?}");
            }
            ProjectileContact::Spent => {}
        }

        seen.insert(projectile_entity);
        commands.entity(projectile_entity).insert(PendingDespawn);
    }
}
