//! Buffered spawn requests.
//!
//! Producers (player attack, future enemy shooters) only write intent; the
//! spawn consumer is the single place that builds projectile entities.

use bevy::prelude::*;

use crate::common::category::Category;
use crate::plugins::movement::Facing;

#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct SpawnProjectileRequest {
    pub position: Vec2,
    pub owner: Category,
    pub facing: Facing,
}
