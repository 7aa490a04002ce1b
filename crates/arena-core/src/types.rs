//! Fundamental geometric and simulation types.

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// 3D vector in arena space (world units).
/// x = East, y = Up, z = South. The floor is the y = 0 plane, so
/// "forward" for a freshly spawned player is -z.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

/// A static axis-aligned box the player and enemies cannot walk through.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Center of the box.
    pub position: Vector3,
    /// Full edge lengths along each axis.
    pub size: Vector3,
}

impl Vector3 {
    pub const ZERO: Vector3 = Vector3::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn scale(&self, factor: f64) -> Vector3 {
        Vector3::new(self.x * factor, self.y * factor, self.z * factor)
    }

    /// Magnitude (distance from the origin).
    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    pub fn length_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Vector3) -> f64 {
        (*self - *other).length()
    }

    /// Unit vector in the same direction, or `None` for a zero-length vector.
    pub fn try_normalize(&self) -> Option<Vector3> {
        let len = self.length();
        if len > f64::EPSILON && len.is_finite() {
            Some(self.scale(1.0 / len))
        } else {
            None
        }
    }

    /// Unit vector in the same direction; zero stays zero.
    pub fn normalize(&self) -> Vector3 {
        self.try_normalize().unwrap_or(Vector3::ZERO)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    fn add(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vector3 {
    fn add_assign(&mut self, rhs: Vector3) {
        *self = *self + rhs;
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Vector3;

    fn mul(self, rhs: f64) -> Vector3 {
        self.scale(rhs)
    }
}

impl Neg for Vector3 {
    type Output = Vector3;

    fn neg(self) -> Vector3 {
        self.scale(-1.0)
    }
}

impl Obstacle {
    pub fn new(position: Vector3, size: Vector3) -> Self {
        Self { position, size }
    }

    /// Half the edge length along each axis.
    pub fn half_extents(&self) -> Vector3 {
        self.size.scale(0.5)
    }
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }

    /// Simulation clock in whole milliseconds, derived from the tick count.
    pub fn now_millis(&self) -> u64 {
        self.tick * 1000 / crate::constants::TICK_RATE as u64
    }
}
