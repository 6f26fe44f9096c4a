use std::fmt::{Display, Formatter};

use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};

/// Width and height of a rectangle, in inches.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dims {
    pub width: f64,
    pub height: f64,
}

impl Dims {
    pub fn new(width: f64, height: f64) -> Self {
        Dims { width, height }
    }

    pub fn try_new(width: f64, height: f64) -> Result<Self> {
        ensure!(
            width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0,
            "invalid dimensions, width: {width}, height: {height}"
        );
        Ok(Dims { width, height })
    }

    /// The same rectangle turned by 90°.
    pub fn rotated(self) -> Self {
        Dims {
            width: self.height,
            height: self.width,
        }
    }

    pub fn oriented(self, orientation: Orientation) -> Self {
        match orientation {
            Orientation::Natural => self,
            Orientation::Rotated => self.rotated(),
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    pub fn min_side(&self) -> f64 {
        f64::min(self.width, self.height)
    }

    /// True if `self` fits inside `other` without turning it.
    pub fn fits_within(&self, other: Dims) -> bool {
        self.width <= other.width && self.height <= other.height
    }

    /// True if `self` fits inside `other` in at least one of both orientations.
    pub fn fits_within_any_orientation(&self, other: Dims) -> bool {
        self.fits_within(other) || self.rotated().fits_within(other)
    }

    /// Orientations in which `self` is worth trying, a square looks the same either way.
    pub fn orientations(&self) -> &'static [Orientation] {
        match self.is_square() {
            true => &[Orientation::Natural],
            false => &[Orientation::Natural, Orientation::Rotated],
        }
    }
}

impl Display for Dims {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\"x{}\"", self.width, self.height)
    }
}

/// Orientation of a rectangle relative to the way it was specified.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// As specified: (width, height)
    Natural,
    /// Turned by 90°: (height, width)
    Rotated,
}

impl Orientation {
    pub fn is_rotated(self) -> bool {
        self == Orientation::Rotated
    }
}
