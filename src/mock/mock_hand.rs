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

use serde_json::{json, Value};
use strum::IntoEnumIterator;

use crate::constants::{NUM_FINGER, NUM_LANDMARK};
use crate::control::hand::{HandObservation, Landmark};
use crate::enums::{Finger, HandLabel, Joint};

/// Create a hand with the given extended fingers at the wrist position.
///
/// # Arguments
/// * `label` - Hand label.
/// * `extended` - Extended or not, in the order of thumb, index, middle, ring
/// and little fingers.
/// * `wrist_x` - Normalized x position of the wrist.
/// * `wrist_y` - Normalized y position of the wrist.
///
/// # Returns
/// Hand observation.
pub fn create_hand(
    label: HandLabel,
    extended: [bool; NUM_FINGER],
    wrist_x: f64,
    wrist_y: f64,
) -> HandObservation {
    let mut landmarks = [Landmark::new(0.5, 0.5); NUM_LANDMARK];
    landmarks[Joint::Wrist as usize] = Landmark::new(wrist_x, wrist_y);

    for finger in Finger::iter() {
        let (tip, _) = finger.joints();
        let is_extended = extended[finger as usize];

        landmarks[tip as usize] = match finger {
            Finger::Thumb => {
                let sign = if is_extended { 1.0 } else { -1.0 };
                Landmark::new(0.5 + 0.125 * sign * label.thumb_direction(), 0.5)
            }
            _ => Landmark::new(0.5, if is_extended { 0.25 } else { 0.75 }),
        };
    }

    HandObservation::new(label, landmarks)
}

/// Create a hand with the given number of extended fingers. The thumb is
/// extended last.
///
/// # Arguments
/// * `label` - Hand label.
/// * `finger_count` - Number of the extended fingers in [0, 5].
/// * `wrist_x` - Normalized x position of the wrist.
/// * `wrist_y` - Normalized y position of the wrist.
///
/// # Returns
/// Hand observation.
pub fn create_hand_with_count(
    label: HandLabel,
    finger_count: usize,
    wrist_x: f64,
    wrist_y: f64,
) -> HandObservation {
    let mut extended = [false; NUM_FINGER];
    for idx in 0..finger_count.min(NUM_FINGER) {
        extended[(idx + 1) % NUM_FINGER] = true;
    }

    create_hand(label, extended, wrist_x, wrist_y)
}

/// Convert the hand to the detector's JSON representation.
///
/// # Arguments
/// * `hand` - Hand observation.
/// * `score` - Confidence of the detection.
///
/// # Returns
/// JSON value of the hand.
pub fn to_json(hand: &HandObservation, score: f64) -> Value {
    let landmarks: Vec<Vec<f64>> = Joint::iter()
        .map(|joint| vec![hand[joint].x, hand[joint].y, 0.0])
        .collect();

    json!({
        "label": hand.label.as_ref(),
        "score": score,
        "landmarks": landmarks,
    })
}
