use bevy::prelude::*;

use crate::common::category::Category;

/// A short-lived damaging entity.
///
/// `direction` is fixed at spawn; velocity is re-asserted every fixed step so
/// nothing (gravity, contacts) can bend the flight path.
#[derive(Component, Debug, Clone, Copy)]
pub struct Projectile {
    pub direction: Vec2,
    pub speed: f32,
    pub damage: i32,
    /// Category of the shooter; never damaged by this projectile.
    pub owner: Category,
}

impl Projectile {
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.direction * self.speed
    }
}
