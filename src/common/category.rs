//! Entity categories and the interaction-rule table.
//!
//! Every "who hurts whom / who collects what" decision goes through the two
//! functions below so the ruleset stays exhaustively testable.

use bevy::prelude::*;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Player,
    Enemy,
    Projectile,
    Pickup,
    DeadEnemy,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Player,
        Category::Enemy,
        Category::Projectile,
        Category::Pickup,
        Category::DeadEnemy,
    ];

    /// Has a health pool and can be hit.
    #[inline]
    pub fn is_damageable(self) -> bool {
        matches!(self, Category::Player | Category::Enemy)
    }

    /// Player and Enemy oppose each other; nothing else is hostile.
    #[inline]
    pub fn opposes(self, other: Category) -> bool {
        matches!(
            (self, other),
            (Category::Player, Category::Enemy) | (Category::Enemy, Category::Player)
        )
    }
}

/// What happens when `source` touches `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactRule {
    Ignore,
    /// `source` deals its contact damage to `target`.
    Damage,
    /// `source` (a pickup) is collected by `target`.
    Collect,
}

pub fn contact_rule(source: Category, target: Category) -> ContactRule {
    match (source, target) {
        (Category::Enemy, Category::Player) => ContactRule::Damage,
        (Category::Pickup, Category::Player) => ContactRule::Collect,
        _ => ContactRule::Ignore,
    }
}

/// What a projectile does when it touches something.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileContact {
    /// Damage the other entity, then despawn.
    Strike,
    /// Despawn without dealing damage.
    Spent,
    /// Keep flying.
    PassThrough,
}

/// `other` is `None` for level geometry, which carries no category.
pub fn projectile_contact(owner: Category, other: Option<Category>) -> ProjectileContact {
    match other {
        None => ProjectileContact::Spent,
        Some(Category::DeadEnemy) => ProjectileContact::PassThrough,
        Some(c) if c == owner => ProjectileContact::PassThrough,
        Some(c) if c.is_damageable() && owner.opposes(c) => ProjectileContact::Strike,
        Some(_) => ProjectileContact::Spent,
    }
}
