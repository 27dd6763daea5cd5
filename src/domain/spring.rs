//! Damped spring used to animate the drag offset back to rest.

use std::time::Duration;

use serde::{Deserialize, Serialize};

const MAX_STEP_SECS: f32 = 1.0 / 240.0;
const REST_EPSILON: f32 = 0.01;

/// Shortest response the fixed integration step stays stable for.
pub const MIN_RESPONSE: f32 = 0.05;

/// Spring parameters expressed the way designers tune them: the time one
/// undamped oscillation takes, and the fraction of critical damping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spring {
    /// Period of the undamped oscillation, in seconds.
    pub response: f32,
    /// Fraction of critical damping; 1.0 never overshoots.
    pub damping_ratio: f32,
}

impl Spring {
    /// Creates a spring.
    #[must_use]
    pub const fn new(response: f32, damping_ratio: f32) -> Self {
        Self {
            response,
            damping_ratio,
        }
    }

    /// Returns true if the parameters describe a spring that settles.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.response.is_finite()
            && self.response >= MIN_RESPONSE
            && self.damping_ratio.is_finite()
            && self.damping_ratio > 0.0
    }

    /// Stiffness for a unit mass.
    #[must_use]
    pub fn stiffness(self) -> f32 {
        let omega = std::f32::consts::TAU / self.response.max(MIN_RESPONSE);
        omega * omega
    }

    /// Damping coefficient for a unit mass.
    #[must_use]
    pub fn damping(self) -> f32 {
        4.0 * std::f32::consts::PI * self.damping_ratio / self.response.max(MIN_RESPONSE)
    }
}

impl Default for Spring {
    fn default() -> Self {
        Self::new(0.6, 0.8)
    }
}

/// A running spring animation toward a fixed target.
#[derive(Debug, Clone, PartialEq)]
pub struct SpringAnimation {
    spring: Spring,
    value: f32,
    velocity: f32,
    target: f32,
    settled: bool,
}

impl SpringAnimation {
    /// Starts an animation at rest at `from`, heading for `target`.
    #[must_use]
    pub fn new(spring: Spring, from: f32, target: f32) -> Self {
        let settled = (from - target).abs() < REST_EPSILON;
        Self {
            spring,
            value: if settled { target } else { from },
            velocity: 0.0,
            target,
            settled,
        }
    }

    /// Current value.
    #[must_use]
    pub const fn value(&self) -> f32 {
        self.value
    }

    /// Returns true once the value has snapped onto the target.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        self.settled
    }

    /// Advances the simulation and returns the new value.
    pub fn step(&mut self, dt: Duration) -> f32 {
        if self.settled {
            return self.value;
        }

        let k = self.spring.stiffness();
        let c = self.spring.damping();
        let mut remaining = dt.as_secs_f32();

        while remaining > 0.0 {
            let h = remaining.min(MAX_STEP_SECS);
            let accel = -k * (self.value - self.target) - c * self.velocity;
            self.velocity += accel * h;
            self.value += self.velocity * h;
            remaining -= h;
        }

        if (self.value - self.target).abs() < REST_EPSILON && self.velocity.abs() < REST_EPSILON {
            self.value = self.target;
            self.velocity = 0.0;
            self.settled = true;
        }

        self.value
    }
}
