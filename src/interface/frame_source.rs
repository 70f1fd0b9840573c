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

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::io::BufRead;
use std::str::FromStr;

use crate::constants::DEFAULT_CONFIDENCE;
use crate::control::hand::HandObservation;
use crate::enums::HandLabel;
use crate::error::{ArmError, Result};

/// Hand reported by the landmark detector.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct DetectedHand {
    // "Left" or "Right".
    pub label: String,
    // Confidence of the detection.
    #[serde(default = "default_confidence")]
    pub score: f64,
    // Normalized landmarks of [x, y] or [x, y, z].
    pub landmarks: Vec<Vec<f64>>,
}

fn default_confidence() -> f64 {
    DEFAULT_CONFIDENCE
}

/// Hands detected in one video frame.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug, Default)]
pub struct DetectionFrame {
    #[serde(default)]
    pub hands: Vec<DetectedHand>,
}

/// Hands of a detection frame that drive the arm.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct SelectedHands {
    pub left: Option<HandObservation>,
    pub right: Option<HandObservation>,
    // Number of the hands ignored as malformed, duplicated or below the
    // confidence.
    pub skipped: usize,
}

impl SelectedHands {
    /// Any hand is selected or not.
    pub fn has_hand(&self) -> bool {
        self.left.is_some() || self.right.is_some()
    }
}

impl DetectionFrame {
    /// Select at most one hand per label.
    ///
    /// # Notes
    /// The first hand of a label wins. Malformed hands are skipped as if they
    /// were absent.
    ///
    /// # Arguments
    /// * `min_confidence` - Minimum confidence of a hand to use.
    ///
    /// # Returns
    /// Selected hands.
    pub fn select_hands(&self, min_confidence: f64) -> SelectedHands {
        let mut selected = SelectedHands::default();

        for hand in self.hands.iter() {
            if hand.score < min_confidence {
                debug!(
                    "Ignore the {} hand with the confidence {}.",
                    hand.label, hand.score
                );
                selected.skipped += 1;
                continue;
            }

            let observation = match Self::to_observation(hand) {
                Ok(observation) => observation,
                Err(error) => {
                    warn!("Skip the hand: {error}");
                    selected.skipped += 1;
                    continue;
                }
            };

            let slot = match observation.label {
                HandLabel::Left => &mut selected.left,
                HandLabel::Right => &mut selected.right,
            };

            if slot.is_some() {
                warn!(
                    "Ignore the duplicated {} hand in the frame.",
                    observation.label.as_ref()
                );
                selected.skipped += 1;
            } else {
                *slot = Some(observation);
            }
        }

        selected
    }

    /// Convert the detected hand to the hand observation.
    ///
    /// # Arguments
    /// * `hand` - Detected hand.
    ///
    /// # Returns
    /// Hand observation.
    ///
    /// # Errors
    /// MalformedObservation if the label is unknown or the landmarks are
    /// invalid.
    fn to_observation(hand: &DetectedHand) -> Result<HandObservation> {
        let label = HandLabel::from_str(&hand.label).map_err(|_| {
            ArmError::MalformedObservation(format!("unknown hand label {:?}", hand.label))
        })?;

        HandObservation::from_points(label, &hand.landmarks)
    }
}

pub trait FrameSource {
    /// Wait for the next detection frame.
    ///
    /// # Returns
    /// The next frame. None if there is no frame anymore.
    ///
    /// # Errors
    /// FrameSource if the source can not be read.
    fn next_frame(&mut self) -> Result<Option<DetectionFrame>>;
}

/// Detection frames written by the detector as one JSON object per line.
pub struct JsonLinesSource<R: BufRead> {
    _reader: R,
    // Number of the lines read so far.
    _line_number: usize,
}

impl<R: BufRead> JsonLinesSource<R> {
    /// Create a new JSON lines source.
    ///
    /// # Arguments
    /// * `reader` - Reader of the detector's output.
    ///
    /// # Returns
    /// A new JSON lines source.
    pub fn new(reader: R) -> Self {
        Self {
            _reader: reader,
            _line_number: 0,
        }
    }
}

impl<R: BufRead> FrameSource for JsonLinesSource<R> {
    fn next_frame(&mut self) -> Result<Option<DetectionFrame>> {
        let mut line = String::new();
        loop {
            line.clear();
            let num_bytes = self
                ._reader
                .read_line(&mut line)
                .map_err(ArmError::FrameSource)?;

            if num_bytes == 0 {
                return Ok(None);
            }

            self._line_number += 1;

            let content = line.trim();
            if content.is_empty() {
                continue;
            }

            return match serde_json::from_str::<DetectionFrame>(content) {
                Ok(frame) => Ok(Some(frame)),
                Err(error) => {
                    warn!(
                        "Line {} is not a detection frame: {error}. Treat it as no hand.",
                        self._line_number
                    );
                    Ok(Some(DetectionFrame::default()))
                }
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;
    use std::io::Cursor;

    use crate::mock::mock_hand::{create_hand_with_count, to_json};

    fn create_frame(hands: Vec<serde_json::Value>) -> DetectionFrame {
        serde_json::from_value(json!({ "hands": hands })).unwrap()
    }

    #[test]
    fn test_select_hands() {
        let left = create_hand_with_count(HandLabel::Left, 4, 0.25, 0.5);
        let right = create_hand_with_count(HandLabel::Right, 1, 0.5, 0.4);

        let frame = create_frame(vec![to_json(&right, 0.9), to_json(&left, 0.95)]);
        let selected = frame.select_hands(0.8);

        assert!(selected.has_hand());
        assert_eq!(selected.left, Some(left));
        assert_eq!(selected.right, Some(right));
        assert_eq!(selected.skipped, 0);
    }

    #[test]
    fn test_select_hands_empty() {
        let selected = DetectionFrame::default().select_hands(0.8);

        assert!(!selected.has_hand());
        assert_eq!(selected, SelectedHands::default());
    }

    #[test]
    fn test_select_hands_first_wins() {
        let first = create_hand_with_count(HandLabel::Left, 5, 0.1, 0.5);
        let second = create_hand_with_count(HandLabel::Left, 3, 0.9, 0.5);

        let frame = create_frame(vec![to_json(&first, 0.9), to_json(&second, 0.9)]);
        let selected = frame.select_hands(0.8);

        assert_eq!(selected.left, Some(first));
        assert_eq!(selected.right, None);
        assert_eq!(selected.skipped, 1);
    }

    #[test]
    fn test_select_hands_confidence() {
        let left = create_hand_with_count(HandLabel::Left, 5, 0.1, 0.5);

        let frame = create_frame(vec![to_json(&left, 0.5)]);

        assert_eq!(frame.select_hands(0.8).left, None);
        assert_eq!(frame.select_hands(0.8).skipped, 1);
        assert_eq!(frame.select_hands(0.5).left, Some(left));
    }

    #[test]
    fn test_select_hands_malformed() {
        let right = create_hand_with_count(HandLabel::Right, 2, 0.5, 0.5);

        let mut short = to_json(&right, 0.9);
        short["landmarks"].as_array_mut().unwrap().pop();

        let mut unknown = to_json(&right, 0.9);
        unknown["label"] = json!("Middle");

        let frame = create_frame(vec![short, unknown, to_json(&right, 0.9)]);
        let selected = frame.select_hands(0.8);

        assert_eq!(selected.left, None);
        assert_eq!(selected.right, Some(right));
        assert_eq!(selected.skipped, 2);
    }

    #[test]
    fn test_detected_hand_default_score() {
        let frame: DetectionFrame =
            serde_json::from_str(r#"{"hands": [{"label": "Left", "landmarks": []}]}"#).unwrap();

        assert_eq!(frame.hands[0].score, DEFAULT_CONFIDENCE);
    }

    #[test]
    fn test_next_frame() {
        let hand = create_hand_with_count(HandLabel::Right, 0, 0.5, 0.5);
        let text = format!(
            "{}\n\n{{\"hands\": []}}\nnot json\n{{}}\n",
            json!({ "hands": [to_json(&hand, 1.0)] })
        );
        let mut source = JsonLinesSource::new(Cursor::new(text));

        let frame = source.next_frame().unwrap().unwrap();
        assert_eq!(frame.hands.len(), 1);
        assert_eq!(frame.select_hands(0.8).right, Some(hand));

        // The empty line is skipped
        assert_eq!(source.next_frame().unwrap(), Some(DetectionFrame::default()));
        assert_eq!(source._line_number, 3);

        // Invalid JSON is a frame without hands
        assert_eq!(source.next_frame().unwrap(), Some(DetectionFrame::default()));

        // Missing hands
        assert_eq!(source.next_frame().unwrap(), Some(DetectionFrame::default()));

        // End of the stream
        assert_eq!(source.next_frame().unwrap(), None);
        assert_eq!(source.next_frame().unwrap(), None);
    }
}
