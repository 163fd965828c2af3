// optflow_core/src/types.rs

use crate::error::OptflowError;
use nalgebra::Vector2;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// One of the two horizontal axes tracked by the optical-flow block.
///
/// `Roll` is index 0 and `Pitch` is index 1, matching the layout every
/// consumer of the block expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Roll,
    Pitch,
}

impl Axis {
    /// Both axes in index order.
    pub const ALL: [Axis; 2] = [Axis::Roll, Axis::Pitch];

    /// The array index this axis occupies.
    pub const fn index(self) -> usize {
        match self {
            Axis::Roll => 0,
            Axis::Pitch => 1,
        }
    }
}

impl TryFrom<usize> for Axis {
    type Error = OptflowError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(Axis::Roll),
            1 => Ok(Axis::Pitch),
            other => Err(OptflowError::InvalidAxis(other)),
        }
    }
}

impl TryFrom<u8> for Axis {
    type Error = OptflowError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Axis::try_from(index as usize)
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Roll => write!(f, "roll"),
            Axis::Pitch => write!(f, "pitch"),
        }
    }
}

/// A fixed pair of values, one per horizontal axis.
///
/// This replaces the two-element arrays of the firmware: there is no length
/// to get wrong and indexing goes through [`Axis`], so it cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AxisPair<T> {
    pub roll: T,
    pub pitch: T,
}

impl<T> AxisPair<T> {
    pub const fn new(roll: T, pitch: T) -> Self {
        Self { roll, pitch }
    }

    pub fn get(&self, axis: Axis) -> &T {
        match axis {
            Axis::Roll => &self.roll,
            Axis::Pitch => &self.pitch,
        }
    }

    pub fn get_mut(&mut self, axis: Axis) -> &mut T {
        match axis {
            Axis::Roll => &mut self.roll,
            Axis::Pitch => &mut self.pitch,
        }
    }

    /// Replaces the value on `axis`, returning the previous one.
    pub fn set(&mut self, axis: Axis, value: T) -> T {
        std::mem::replace(self.get_mut(axis), value)
    }

    pub fn map<U, F: FnMut(T) -> U>(self, mut f: F) -> AxisPair<U> {
        AxisPair {
            roll: f(self.roll),
            pitch: f(self.pitch),
        }
    }

    /// Iterates `(axis, value)` in index order.
    pub fn iter(&self) -> impl Iterator<Item = (Axis, &T)> + '_ {
        Axis::ALL.into_iter().map(move |axis| (axis, self.get(axis)))
    }
}

impl<T: Copy> AxisPair<T> {
    pub const fn splat(value: T) -> Self {
        Self {
            roll: value,
            pitch: value,
        }
    }
}

impl<T: Zero + Copy> AxisPair<T> {
    pub fn zero() -> Self {
        Self::splat(T::zero())
    }

    pub fn is_zero(&self) -> bool {
        self.roll.is_zero() && self.pitch.is_zero()
    }
}

impl<T: Copy + Into<f64>> AxisPair<T> {
    /// Converts to an nalgebra vector, `x` = roll axis, `y` = pitch axis.
    pub fn to_vector2(&self) -> Vector2<f64> {
        Vector2::new(self.roll.into(), self.pitch.into())
    }
}

impl<T> Index<Axis> for AxisPair<T> {
    type Output = T;

    fn index(&self, axis: Axis) -> &T {
        self.get(axis)
    }
}

impl<T> IndexMut<Axis> for AxisPair<T> {
    fn index_mut(&mut self, axis: Axis) -> &mut T {
        self.get_mut(axis)
    }
}

impl<T> From<[T; 2]> for AxisPair<T> {
    fn from([roll, pitch]: [T; 2]) -> Self {
        Self { roll, pitch }
    }
}

impl<T> From<AxisPair<T>> for [T; 2] {
    fn from(pair: AxisPair<T>) -> Self {
        [pair.roll, pair.pitch]
    }
}
