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

use crate::constants::KEEPER_CLOSED;
use crate::control::angle_state::AngleVector;
use crate::control::classifier::HandClassification;

/// Counters of the control loop.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Telemetry {
    // Detection frames processed.
    pub frames: u64,
    // Frames that commanded the arm.
    pub frames_sent: u64,
    // Hands ignored as malformed, duplicated or below the confidence.
    pub hands_skipped: u64,
}

impl Telemetry {
    /// Summary of the counters.
    pub fn summary(&self) -> String {
        format!(
            "Processed {} frames, sent {} commands and skipped {} hands.",
            self.frames, self.frames_sent, self.hands_skipped
        )
    }
}

/// Finger count of the hand, e.g. "Left: 3".
pub fn hand_status(hand: &HandClassification) -> String {
    format!("{}: {}", hand.label.as_ref(), hand.finger_count)
}

/// Guide of the current angles and the gestures that drive them.
///
/// # Arguments
/// * `angles` - Current angles.
///
/// # Returns
/// One line per axis.
pub fn guide_lines(angles: &AngleVector) -> Vec<String> {
    let keeper = if angles.keeper == KEEPER_CLOSED {
        "close"
    } else {
        "open"
    };

    vec![
        format!("Base: {} (4+ fingers left - X axis)", angles.base),
        format!("Gripper: {keeper} (<=1 finger right)"),
        format!("Tilt: {} (right hand - Y axis)", angles.tilt),
        format!("Pan: {} (3 fingers left - Y axis)", angles.pan),
    ]
}
