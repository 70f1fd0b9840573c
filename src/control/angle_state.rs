// This file is part of run_arm_controller.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use strum::IntoEnumIterator;

use crate::constants::{INITIAL_ANGLES, NUM_AXIS};
use crate::enums::Axis;

/// Angles of the four axes in degree.
#[derive(Debug, PartialEq, Clone, Copy, Eq, Hash)]
pub struct AngleVector {
    pub base: i32,
    // Keeper (gripper)
    pub keeper: i32,
    pub tilt: i32,
    pub pan: i32,
}

impl AngleVector {
    /// Create a new angle vector.
    ///
    /// # Arguments
    /// * `base` - Base angle.
    /// * `keeper` - Keeper (gripper) angle.
    /// * `tilt` - Tilt angle.
    /// * `pan` - Pan angle.
    ///
    /// # Returns
    /// A new angle vector.
    pub fn new(base: i32, keeper: i32, tilt: i32, pan: i32) -> Self {
        Self {
            base,
            keeper,
            tilt,
            pan,
        }
    }

    /// Get the angle of an axis.
    pub fn get(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Base => self.base,
            Axis::Keeper => self.keeper,
            Axis::Tilt => self.tilt,
            Axis::Pan => self.pan,
        }
    }

    /// Set the angle of an axis.
    pub fn set(&mut self, axis: Axis, value: i32) {
        match axis {
            Axis::Base => self.base = value,
            Axis::Keeper => self.keeper = value,
            Axis::Tilt => self.tilt = value,
            Axis::Pan => self.pan = value,
        }
    }

    /// Clamp each angle into the physical range of its axis.
    ///
    /// # Returns
    /// Clamped angle vector.
    pub fn clamp(&self) -> Self {
        let mut angles = *self;
        Axis::iter().for_each(|axis| {
            let (lower, upper) = axis.range();
            angles.set(axis, self.get(axis).clamp(lower, upper));
        });

        angles
    }

    /// Encode the angles to the serial frame.
    ///
    /// # Notes
    /// The angles are clamped first, so each one fits in a byte.
    ///
    /// # Returns
    /// One byte per axis in the order of [base, keeper, tilt, pan].
    pub fn to_frame(&self) -> [u8; NUM_AXIS] {
        let angles = self.clamp();

        let mut frame = [0; NUM_AXIS];
        Axis::iter().for_each(|axis| frame[axis as usize] = angles.get(axis) as u8);

        frame
    }
}

impl Default for AngleVector {
    fn default() -> Self {
        Self::new(
            INITIAL_ANGLES[0],
            INITIAL_ANGLES[1],
            INITIAL_ANGLES[2],
            INITIAL_ANGLES[3],
        )
    }
}

/// Last angles commanded to the arm. Only the actuator channel updates it.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct AngleState {
    _angles: AngleVector,
}

impl AngleState {
    /// Create a new angle state at the initial angles.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current angles.
    pub fn angles(&self) -> AngleVector {
        self._angles
    }

    /// Record the angles that were commanded.
    ///
    /// # Arguments
    /// * `angles` - Clamped angles.
    pub(crate) fn update(&mut self, angles: AngleVector) {
        self._angles = angles;
    }
}
