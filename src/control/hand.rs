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

use std::ops::Index;

use crate::constants::NUM_LANDMARK;
use crate::enums::{HandLabel, Joint};
use crate::error::{ArmError, Result};

/// Normalized position of a landmark. Both coordinates are relative to the
/// image frame and the y-axis points down.
#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
}

impl Landmark {
    /// Create a new landmark.
    ///
    /// # Arguments
    /// * `x` - Normalized x position.
    /// * `y` - Normalized y position.
    ///
    /// # Returns
    /// A new landmark.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One hand of a detection frame.
#[derive(Debug, PartialEq, Clone)]
pub struct HandObservation {
    pub label: HandLabel,
    _landmarks: [Landmark; NUM_LANDMARK],
}

impl HandObservation {
    /// Create a new hand observation.
    ///
    /// # Arguments
    /// * `label` - Hand label.
    /// * `landmarks` - Landmarks in the order of the joints.
    ///
    /// # Returns
    /// A new hand observation.
    pub fn new(label: HandLabel, landmarks: [Landmark; NUM_LANDMARK]) -> Self {
        Self {
            label,
            _landmarks: landmarks,
        }
    }

    /// Create a hand observation from the raw points of the detector.
    ///
    /// # Arguments
    /// * `label` - Hand label.
    /// * `points` - Points of [x, y] or [x, y, z]. The depth is ignored.
    ///
    /// # Returns
    /// A new hand observation.
    ///
    /// # Errors
    /// MalformedObservation if the number of points is not 21, or a point has
    /// less than two coordinates or a non-finite coordinate.
    pub fn from_points(label: HandLabel, points: &[Vec<f64>]) -> Result<Self> {
        if points.len() != NUM_LANDMARK {
            return Err(ArmError::MalformedObservation(format!(
                "{} hand has {} landmarks instead of {NUM_LANDMARK}",
                label.as_ref(),
                points.len()
            )));
        }

        let mut landmarks = [Landmark::default(); NUM_LANDMARK];
        for (idx, (landmark, point)) in landmarks.iter_mut().zip(points.iter()).enumerate() {
            match point.as_slice() {
                [x, y, ..] if x.is_finite() && y.is_finite() => *landmark = Landmark::new(*x, *y),
                _ => {
                    return Err(ArmError::MalformedObservation(format!(
                        "landmark {idx} of the {} hand is {:?}",
                        label.as_ref(),
                        point
                    )));
                }
            }
        }

        Ok(Self::new(label, landmarks))
    }

    /// Get the wrist.
    pub fn wrist(&self) -> Landmark {
        self[Joint::Wrist]
    }
}

impl Index<Joint> for HandObservation {
    type Output = Landmark;

    fn index(&self, joint: Joint) -> &Self::Output {
        &self._landmarks[joint as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_points(num: usize) -> Vec<Vec<f64>> {
        (0..num)
            .map(|idx| vec![0.01 * (idx as f64), 0.02 * (idx as f64), -0.1])
            .collect()
    }

    #[test]
    fn test_from_points() {
        let hand = HandObservation::from_points(HandLabel::Right, &create_points(NUM_LANDMARK))
            .unwrap();

        assert_eq!(hand.label, HandLabel::Right);
        assert_eq!(hand.wrist(), Landmark::new(0.0, 0.0));
        assert_eq!(hand[Joint::ThumbTip], Landmark::new(0.04, 0.08));
        assert_eq!(hand[Joint::LittleTip], Landmark::new(0.2, 0.4));
    }

    #[test]
    fn test_from_points_wrong_count() {
        for num in [0, NUM_LANDMARK - 1, NUM_LANDMARK + 1] {
            let result = HandObservation::from_points(HandLabel::Left, &create_points(num));
            assert!(matches!(result, Err(ArmError::MalformedObservation(_))));
        }
    }

    #[test]
    fn test_from_points_bad_point() {
        let mut points = create_points(NUM_LANDMARK);
        points[8] = vec![0.5];
        assert!(HandObservation::from_points(HandLabel::Left, &points).is_err());

        let mut points = create_points(NUM_LANDMARK);
        points[0] = vec![f64::NAN, 0.5];
        assert!(HandObservation::from_points(HandLabel::Left, &points).is_err());
    }
}
