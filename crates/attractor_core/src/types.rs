//! Value types shared by the integrator and the statistics functions.

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Index, Sub};

/// A point (or increment) in the three-dimensional state space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const ORIGIN: Point3 = Point3::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Default seed for every integration: small but away from the origin, where
/// several laws sit on a fixed point.
impl Default for Point3 {
    fn default() -> Self {
        Self::new(1e-4, 1e-4, 1e-4)
    }
}

impl From<(f64, f64, f64)> for Point3 {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::new(x, y, z)
    }
}

impl From<[f64; 3]> for Point3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl Add for Point3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Div<f64> for Point3 {
    type Output = Self;
    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Index<Axis> for Point3 {
    type Output = f64;
    fn index(&self, axis: Axis) -> &f64 {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }
}

/// Coordinate axis of the state space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        };
        f.write_str(label)
    }
}

/// Ordered sequence of points produced by one integration run.
///
/// Index 0 is the initial point and each following entry is one Euler step
/// from its predecessor. A trajectory is read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    points: Vec<Point3>,
}

impl Trajectory {
    pub fn new(points: Vec<Point3>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    pub fn first(&self) -> Option<Point3> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<Point3> {
        self.points.last().copied()
    }

    /// Time series of a single coordinate.
    pub fn axis(&self, axis: Axis) -> Vec<f64> {
        self.points.iter().map(|p| p[axis]).collect()
    }

    /// Row-major `N * 3` buffer, the layout handed to plotting front ends.
    pub fn to_flat(&self) -> Vec<f64> {
        let mut flat = Vec::with_capacity(self.points.len() * 3);
        for point in &self.points {
            flat.extend_from_slice(&point.to_array());
        }
        flat
    }

    /// `N x 3` matrix with one row per point.
    pub fn to_matrix(&self) -> DMatrix<f64> {
        DMatrix::from_row_iterator(
            self.points.len(),
            3,
            self.points.iter().flat_map(|p| p.to_array()),
        )
    }

    pub fn is_finite(&self) -> bool {
        self.points.iter().all(Point3::is_finite)
    }

    pub fn into_points(self) -> Vec<Point3> {
        self.points
    }
}

impl From<Vec<Point3>> for Trajectory {
    fn from(points: Vec<Point3>) -> Self {
        Self::new(points)
    }
}
