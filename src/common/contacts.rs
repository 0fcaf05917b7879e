//! Contact event helpers.
//!
//! Avian reports colliders; gameplay components live on the rigid body when
//! the collider is a child. `gameplay_owner` resolves to the body if present.

use avian2d::prelude::*;
use bevy::prelude::*;

#[derive(Clone, Copy, Debug)]
pub struct CollisionTarget {
    pub collider: Entity,
    pub body: Option<Entity>,
}

impl CollisionTarget {
    #[inline]
    pub fn gameplay_owner(self) -> Entity {
        self.body.unwrap_or(self.collider)
    }
}

#[inline]
pub fn targets(ev: &CollisionStart) -> (CollisionTarget, CollisionTarget) {
    (
        CollisionTarget {
            collider: ev.collider1,
            body: ev.body1,
        },
        CollisionTarget {
            collider: ev.collider2,
            body: ev.body2,
        },
    )
}

/// Order a contact so the side matching `is_subject` comes first.
///
/// Returns `None` unless exactly one side matches.
#[inline]
pub fn split_contact(
    ev: &CollisionStart,
    mut is_subject: impl FnMut(Entity) -> bool,
) -> Option<(CollisionTarget, CollisionTarget)> {
    let (t1, t2) = targets(ev);
    let s1 = is_subject(t1.gameplay_owner());
    let s2 = is_subject(t2.gameplay_owner());
    match (s1, s2) {
        (true, false) => Some((t1, t2)),
        (false, true) => Some((t2, t1)),
        _ => None,
    }
}
