//! Health pool.

use bevy::prelude::*;

/// `0 <= current <= max`, mutated only through `apply_damage` / `heal`.
///
/// Reaching zero depletes the pool exactly once; a depleted pool is frozen.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    current: u32,
    max: u32,
    depleted: bool,
}

/// Result of a damage application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Depletion {
    StillAlive,
    /// This call brought the pool to zero.
    JustDepleted,
    /// The pool was already depleted; nothing changed.
    AlreadyDepleted,
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self {
            current: max,
            max,
            depleted: max == 0,
        }
    }

    /// A pool that starts below its maximum.
    pub fn with_current(current: u32, max: u32) -> Self {
        let current = current.min(max);
        Self {
            current,
            max,
            depleted: current == 0,
        }
    }

    #[inline]
    pub fn current(&self) -> u32 {
        self.current
    }

    #[inline]
    pub fn max(&self) -> u32 {
        self.max
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }

    #[inline]
    pub fn is_depleted(&self) -> bool {
        self.depleted
    }

    pub fn apply_damage(&mut self, amount: u32) -> Depletion {
        if self.depleted {
            return Depletion::AlreadyDepleted;
        }

        self.current = self.current.saturating_sub(amount);
        if self.current == 0 {
            self.depleted = true;
            Depletion::JustDepleted
        } else {
            Depletion::StillAlive
        }
    }

    /// Returns how much was actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        if self.depleted {
            return 0;
        }

        let before = self.current;
        self.current = self.current.saturating_add(amount).min(self.max);
        self.current - before
    }
}
