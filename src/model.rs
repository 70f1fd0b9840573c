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

use log::{debug, info};
use std::io::Write;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use crate::control::{
    angle_state::AngleVector, classifier::GestureClassifier, planner::CommandPlanner,
};
use crate::error::Result;
use crate::interface::{
    actuator_channel::ActuatorChannel,
    frame_source::{DetectionFrame, FrameSource},
};
use crate::telemetry::{guide_lines, hand_status, Telemetry};

pub struct Model<W: Write> {
    _classifier: GestureClassifier,
    _planner: CommandPlanner,
    // Channel to the arm. It owns the current angles.
    pub channel: ActuatorChannel<W>,
    // Hands reported with a lower confidence are ignored.
    _min_confidence: f64,
    pub telemetry: Telemetry,
    // An Arc instance that holds the AtomicBool instance to stop the loop.
    pub stop: Arc<AtomicBool>,
}

impl<W: Write> Model<W> {
    /// Create a new model.
    ///
    /// # Arguments
    /// * `channel` - Opened actuator channel.
    /// * `min_confidence` - Minimum confidence of a hand to use.
    ///
    /// # Returns
    /// A new model.
    pub fn new(channel: ActuatorChannel<W>, min_confidence: f64) -> Self {
        Self {
            _classifier: GestureClassifier::new(),
            _planner: CommandPlanner::new(),
            channel,
            _min_confidence: min_confidence,
            telemetry: Telemetry::default(),
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Process one detection frame.
    ///
    /// # Arguments
    /// * `frame` - Detection frame.
    ///
    /// # Returns
    /// The angles sent to the arm. None if the frame has no usable hand.
    ///
    /// # Errors
    /// TransportWrite if the command can not be sent.
    pub fn step(&mut self, frame: &DetectionFrame) -> Result<Option<AngleVector>> {
        self.telemetry.frames += 1;

        let hands = frame.select_hands(self._min_confidence);
        self.telemetry.hands_skipped += hands.skipped as u64;

        if !hands.has_hand() {
            return Ok(None);
        }

        let left = hands.left.as_ref().map(|hand| self._classifier.classify(hand));
        let right = hands
            .right
            .as_ref()
            .map(|hand| self._classifier.classify(hand));

        [&left, &right]
            .into_iter()
            .flatten()
            .for_each(|hand| debug!("{}", hand_status(hand)));

        let target = self
            ._planner
            .plan(left.as_ref(), right.as_ref(), self.channel.state());
        let angles = self.channel.send(&target)?;

        self.telemetry.frames_sent += 1;
        guide_lines(&angles)
            .iter()
            .for_each(|line| debug!("{line}"));

        Ok(Some(angles))
    }

    /// Run the control loop until the stop flag is set or the source has no
    /// frame anymore.
    ///
    /// # Arguments
    /// * `source` - Source of the detection frames.
    ///
    /// # Errors
    /// FrameSource or TransportWrite. The loop stops at the first error.
    pub fn run<S: FrameSource>(&mut self, source: &mut S) -> Result<()> {
        while !self.stop.load(Ordering::Relaxed) {
            match source.next_frame()? {
                Some(frame) => {
                    self.step(&frame)?;
                }
                None => {
                    info!("No more detection frames.");
                    break;
                }
            }
        }

        Ok(())
    }

    /// Stop the model and release the transport.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        self.channel.close();

        info!("{}", self.telemetry.summary());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;
    use std::io::Cursor;
    use std::time::Duration;

    use crate::enums::HandLabel;
    use crate::interface::frame_source::JsonLinesSource;
    use crate::mock::mock_hand::{create_hand_with_count, to_json};
    use crate::mock::mock_transport::MockTransport;

    fn create_model() -> Model<MockTransport> {
        Model::new(
            ActuatorChannel::new(MockTransport::new(), Duration::ZERO),
            0.8,
        )
    }

    fn create_frame(hands: &[(HandLabel, usize, f64, f64)]) -> DetectionFrame {
        let hands: Vec<serde_json::Value> = hands
            .iter()
            .map(|(label, finger_count, x, y)| {
                to_json(&create_hand_with_count(*label, *finger_count, *x, *y), 0.9)
            })
            .collect();

        serde_json::from_value(json!({ "hands": hands })).unwrap()
    }

    fn frames_sent(model: &Model<MockTransport>) -> Vec<[u8; 4]> {
        model.channel.transport().unwrap().frames.clone()
    }

    #[test]
    fn test_step_both_hands() {
        let mut model = create_model();

        let frame = create_frame(&[
            (HandLabel::Left, 4, 0.25, 0.7),
            (HandLabel::Right, 1, 0.6, 0.4),
        ]);
        let angles = model.step(&frame).unwrap();

        assert_eq!(angles, Some(AngleVector::new(135, 0, 86, 45)));
        assert_eq!(
            model.channel.state().angles(),
            AngleVector::new(135, 0, 86, 45)
        );
        assert_eq!(frames_sent(&model), vec![[135, 0, 86, 45]]);
    }

    #[test]
    fn test_step_no_hand() {
        let mut model = create_model();

        assert_eq!(model.step(&DetectionFrame::default()).unwrap(), None);

        assert!(frames_sent(&model).is_empty());
        assert_eq!(model.telemetry.frames, 1);
        assert_eq!(model.telemetry.frames_sent, 0);
    }

    #[test]
    fn test_step_hold() {
        let mut model = create_model();

        model
            .step(&create_frame(&[(HandLabel::Left, 5, 0.25, 0.5)]))
            .unwrap();
        let angles = model
            .step(&create_frame(&[(HandLabel::Right, 5, 0.5, 0.0)]))
            .unwrap();

        assert_eq!(angles, Some(AngleVector::new(135, 8, 120, 45)));
        assert_eq!(
            frames_sent(&model),
            vec![[135, 0, 90, 45], [135, 8, 120, 45]]
        );
    }

    #[test]
    fn test_step_clamp() {
        let mut model = create_model();

        let angles = model
            .step(&create_frame(&[(HandLabel::Right, 0, 0.5, 1.2)]))
            .unwrap();

        assert_eq!(angles, Some(AngleVector::new(90, 0, 35, 45)));
        assert_eq!(model.channel.state().angles().tilt, 35);
    }

    #[test]
    fn test_run() {
        let mut model = create_model();

        let text = [
            create_frame(&[(HandLabel::Left, 3, 0.5, 0.5)]),
            DetectionFrame::default(),
            create_frame(&[(HandLabel::Right, 2, 0.5, 0.0)]),
        ]
        .iter()
        .map(|frame| serde_json::to_string(frame).unwrap())
        .collect::<Vec<String>>()
        .join("\n");

        let mut source = JsonLinesSource::new(Cursor::new(text));
        model.run(&mut source).unwrap();

        assert_eq!(model.telemetry.frames, 3);
        assert_eq!(model.telemetry.frames_sent, 2);
        assert_eq!(frames_sent(&model), vec![[90, 0, 90, 30], [90, 8, 120, 30]]);
    }

    #[test]
    fn test_run_stopped() {
        let mut model = create_model();
        model.stop.store(true, Ordering::Relaxed);

        let text = serde_json::to_string(&create_frame(&[(HandLabel::Left, 5, 0.0, 0.5)])).unwrap();
        let mut source = JsonLinesSource::new(Cursor::new(text));
        model.run(&mut source).unwrap();

        assert_eq!(model.telemetry.frames, 0);
    }

    #[test]
    fn test_stop() {
        let mut model = create_model();

        model.stop();

        assert!(model.stop.load(Ordering::Relaxed));
        assert!(!model.channel.is_open());
        assert!(model
            .step(&create_frame(&[(HandLabel::Left, 5, 0.0, 0.5)]))
            .is_err());
    }
}
