//! Per-entity transient states.
//!
//! `TransientStates` is the single authority for which timed states are active
//! on an entity. It is plain data: systems feed it `tick(dt)` once per fixed
//! step and apply the side effects of whatever it reports.
//!
//! Rules:
//! - `Dying` is terminal. Entering it clears every other state; afterwards
//!   `enter` is a no-op and the set never changes again.
//! - One instance per state. Re-entering restarts the timer, never stacks.
//! - `Invulnerable` and `KnockedBack` may be active together.

use std::time::Duration;

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransientState {
    Invulnerable,
    KnockedBack,
    AttackCooldown,
    PoweredUp,
    Dying,
}

impl TransientState {
    pub const COUNT: usize = 5;

    pub const ALL: [TransientState; Self::COUNT] = [
        TransientState::Invulnerable,
        TransientState::KnockedBack,
        TransientState::AttackCooldown,
        TransientState::PoweredUp,
        TransientState::Dying,
    ];

    #[inline]
    const fn index(self) -> usize {
        match self {
            TransientState::Invulnerable => 0,
            TransientState::KnockedBack => 1,
            TransientState::AttackCooldown => 2,
            TransientState::PoweredUp => 3,
            TransientState::Dying => 4,
        }
    }

    #[inline]
    const fn bit(self) -> u8 {
        1 << self.index()
    }
}

/// Small copyable set of transient states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StateSet(u8);

impl StateSet {
    pub const EMPTY: StateSet = StateSet(0);

    #[inline]
    pub fn contains(self, state: TransientState) -> bool {
        self.0 & state.bit() != 0
    }

    #[inline]
    pub fn insert(&mut self, state: TransientState) {
        self.0 |= state.bit();
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = TransientState> {
        TransientState::ALL.into_iter().filter(move |s| self.contains(*s))
    }
}

impl FromIterator<TransientState> for StateSet {
    fn from_iter<I: IntoIterator<Item = TransientState>>(iter: I) -> Self {
        let mut set = StateSet::EMPTY;
        for s in iter {
            set.insert(s);
        }
        set
    }
}

/// Actions a transient state can block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Move,
    Jump,
    Attack,
    TakeDamage,
    CollisionResponse,
}

#[derive(Component, Debug, Clone, Default)]
pub struct TransientStates {
    timers: [Option<Timer>; TransientState::COUNT],
    /// Lie-down posture reported by presentation; not timed.
    resting: bool,
}

impl TransientStates {
    /// Activate `state` for `duration`, restarting it if already active.
    ///
    /// Returns `false` (and changes nothing) once `Dying` is active.
    /// Entering `Dying` drops every other state and the resting posture.
    pub fn enter(&mut self, state: TransientState, duration: Duration) -> bool {
        if self.is_dying() {
            return false;
        }

        if state == TransientState::Dying {
            self.timers = Default::default();
            self.resting = false;
        }

        self.timers[state.index()] = Some(Timer::new(duration, TimerMode::Once));
        true
    }

    /// Advance every active timer by `dt`.
    ///
    /// Returns the states whose timer ran out during this call. Expired states
    /// are deactivated, except `Dying`, which stays active and is reported once.
    pub fn tick(&mut self, dt: Duration) -> StateSet {
        let mut expired = StateSet::EMPTY;

        for state in TransientState::ALL {
            let slot = &mut self.timers[state.index()];
            let Some(timer) = slot.as_mut() else {
                continue;
            };

            timer.tick(dt);

            if state == TransientState::Dying {
                if timer.just_finished() {
                    expired.insert(state);
                }
            } else if timer.is_finished() {
                *slot = None;
                expired.insert(state);
            }
        }

        expired
    }

    #[inline]
    pub fn is_active(&self, state: TransientState) -> bool {
        self.timers[state.index()].is_some()
    }

    pub fn active(&self) -> StateSet {
        TransientState::ALL
            .into_iter()
            .filter(|s| self.is_active(*s))
            .collect()
    }

    #[inline]
    pub fn is_dying(&self) -> bool {
        self.is_active(TransientState::Dying)
    }

    pub fn remaining(&self, state: TransientState) -> Option<Duration> {
        self.timers[state.index()].as_ref().map(Timer::remaining)
    }

    /// Elapsed fraction `[0..1]` of an active state.
    pub fn progress(&self, state: TransientState) -> Option<f32> {
        self.timers[state.index()].as_ref().map(Timer::fraction)
    }

    pub fn is_blocking(&self, action: Action) -> bool {
        use TransientState::*;

        let dying = self.is_dying();
        match action {
            Action::Move => dying || self.is_active(KnockedBack),
            Action::Jump => dying || self.is_active(KnockedBack) || self.resting,
            Action::Attack => dying || self.is_active(AttackCooldown) || self.resting,
            Action::TakeDamage => dying || self.is_active(Invulnerable),
            Action::CollisionResponse => dying,
        }
    }

    /// Attacks need an active power-up on top of not being blocked.
    #[inline]
    pub fn attack_available(&self) -> bool {
        self.is_active(TransientState::PoweredUp) && !self.is_blocking(Action::Attack)
    }

    /// Start an attack if available, putting it on cooldown.
    pub fn try_begin_attack(&mut self, cooldown: Duration) -> bool {
        if !self.attack_available() {
            return false;
        }
        self.enter(TransientState::AttackCooldown, cooldown)
    }

    pub fn set_resting(&mut self, resting: bool) {
        if self.is_dying() {
            return;
        }
        self.resting = resting;
    }

    #[inline]
    pub fn is_resting(&self) -> bool {
        self.resting
    }
}
