use bevy::prelude::*;

use crate::plugins::weapons::ImpactKind;

/// Marker for entities owned by the tracer pool.
#[derive(Component)]
pub struct PooledBullet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightStatus {
    /// Not launched (pooled, or already arrived).
    Idle,
    InFlight,
    /// Reached the destination on this call. Reported exactly once per launch.
    Arrived,
}

/// Visual tracer flight.
///
/// `position` is the simulation truth; the owning system mirrors it into
/// `Transform`. Reset on both acquire and release so nothing from one flight
/// leaks into the next.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Bullet {
    pub position: Vec2,
    pub destination: Vec2,
    pub speed: f32,
    pub impact: ImpactKind,
    arrival_tolerance: f32,
    in_flight: bool,
}

impl Default for Bullet {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            destination: Vec2::ZERO,
            speed: 0.0,
            impact: ImpactKind::None,
            arrival_tolerance: 0.0,
            in_flight: false,
        }
    }
}

impl Bullet {
    /// Start a new flight. An origin already at the destination arrives immediately.
    pub fn launch(
        &mut self,
        origin: Vec2,
        destination: Vec2,
        speed: f32,
        impact: ImpactKind,
        arrival_tolerance: f32,
    ) -> FlightStatus {
        *self = Self {
            position: origin,
            destination,
            speed,
            impact,
            arrival_tolerance: arrival_tolerance.max(0.0),
            in_flight: true,
        };
        self.settle()
    }

    /// Move toward the destination by `speed * dt`, never past it.
    pub fn advance(&mut self, dt: f32) -> FlightStatus {
        if !self.in_flight {
            return FlightStatus::Idle;
        }

        let to_go = self.destination - self.position;
        let step = self.speed * dt.max(0.0);
        if to_go.length() <= step {
            self.position = self.destination;
        } else {
            self.position += to_go.normalize() * step;
        }

        self.settle()
    }

    #[inline]
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn settle(&mut self) -> FlightStatus {
        if self.position.distance(self.destination) <= self.arrival_tolerance {
            self.position = self.destination;
            self.in_flight = false;
            FlightStatus::Arrived
        } else {
            FlightStatus::InFlight
        }
    }
}
