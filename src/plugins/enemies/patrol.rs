//! Patrol heading with a turn cooldown.

use std::time::Duration;

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Heading {
    #[default]
    PatrollingRight,
    PatrollingLeft,
}

impl Heading {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Heading::PatrollingRight => 1.0,
            Heading::PatrollingLeft => -1.0,
        }
    }

    #[inline]
    pub fn flipped(self) -> Heading {
        match self {
            Heading::PatrollingRight => Heading::PatrollingLeft,
            Heading::PatrollingLeft => Heading::PatrollingRight,
        }
    }
}

/// Patrol state of one enemy.
///
/// Every turn goes through `request_turn`, which refuses while the cooldown
/// runs. However many turn triggers land in a tick (boundary, wall probe,
/// several contacts), the heading changes at most once per cooldown.
#[derive(Component, Debug, Clone)]
pub struct Patrol {
    heading: Heading,
    /// Spawn x; centre of a boundary patrol.
    pub origin_x: f32,
    pub half_span: f32,
    turn_cooldown: Timer,
}

impl Patrol {
    pub fn new(heading: Heading, origin_x: f32, half_span: f32, cooldown: Duration) -> Self {
        let mut turn_cooldown = Timer::new(cooldown, TimerMode::Once);
        // Start ready: the first trigger may turn immediately.
        turn_cooldown.tick(cooldown);
        Self {
            heading,
            origin_x,
            half_span,
            turn_cooldown,
        }
    }

    #[inline]
    pub fn heading(&self) -> Heading {
        self.heading
    }

    #[inline]
    pub fn can_turn(&self) -> bool {
        self.turn_cooldown.is_finished()
    }

    pub fn tick(&mut self, dt: Duration) {
        self.turn_cooldown.tick(dt);
    }

    /// Flip the heading unless the cooldown is still running.
    pub fn request_turn(&mut self) -> bool {
        if !self.can_turn() {
            return false;
        }
        self.heading = self.heading.flipped();
        self.turn_cooldown.reset();
        true
    }

    /// Turn only if not already heading that way.
    pub fn face(&mut self, heading: Heading) -> bool {
        heading != self.heading && self.request_turn()
    }

    /// Heading a boundary patrol should have at `x`, if it is outside its span.
    pub fn boundary_heading(&self, x: f32) -> Option<Heading> {
        if x >= self.origin_x + self.half_span {
            Some(Heading::PatrollingLeft)
        } else if x <= self.origin_x - self.half_span {
            Some(Heading::PatrollingRight)
        } else {
            None
        }
    }
}

/// New x for a lane enemy that drove out of the span around `anchor_x`.
///
/// Leaving on the far side re-enters on the near side, so the lane keeps
/// feeding traffic toward the player.
pub fn lane_wrap(x: f32, heading: Heading, anchor_x: f32, half_span: f32) -> Option<f32> {
    match heading {
        Heading::PatrollingRight if x > anchor_x + half_span => Some(anchor_x - half_span),
        Heading::PatrollingLeft if x < anchor_x - half_span => Some(anchor_x + half_span),
        _ => None,
    }
}
