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

use crate::constants::NUM_FINGER;
use crate::control::hand::{HandObservation, Landmark};
use crate::enums::{Finger, HandLabel};

/// Gesture of one hand in a detection frame.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct HandClassification {
    pub label: HandLabel,
    // Number of the extended fingers in [0, 5].
    pub finger_count: u8,
    // Extended or not, indexed by the finger.
    pub extended: [bool; NUM_FINGER],
    pub wrist: Landmark,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct GestureClassifier;

impl GestureClassifier {
    /// Create a new gesture classifier.
    pub fn new() -> Self {
        Self
    }

    /// Classify the hand by counting the extended fingers.
    ///
    /// # Notes
    /// The thumb is compared along the x-axis in the direction given by the
    /// hand label. The other fingers are extended when the tip is higher in
    /// the image than the proximal interphalangeal joint.
    ///
    /// # Arguments
    /// * `hand` - Hand observation.
    ///
    /// # Returns
    /// Classification of the hand.
    pub fn classify(&self, hand: &HandObservation) -> HandClassification {
        let mut extended = [false; NUM_FINGER];
        Finger::iter().for_each(|finger| {
            extended[finger as usize] = Self::is_finger_extended(hand, finger);
        });

        HandClassification {
            label: hand.label,
            finger_count: extended.iter().filter(|is_extended| **is_extended).count() as u8,
            extended,
            wrist: hand.wrist(),
        }
    }

    /// The finger is extended or not.
    ///
    /// # Arguments
    /// * `hand` - Hand observation.
    /// * `finger` - Finger to check.
    ///
    /// # Returns
    /// True if the finger is extended. Otherwise, False.
    fn is_finger_extended(hand: &HandObservation, finger: Finger) -> bool {
        let (tip, reference) = finger.joints();
        let (tip, reference) = (hand[tip], hand[reference]);

        match finger {
            Finger::Thumb => (tip.x - reference.x) * hand.label.thumb_direction() > 0.0,
            _ => tip.y < reference.y,
        }
    }
}
