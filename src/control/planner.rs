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

use crate::constants::{
    FINGERS_BASE_CONTROL, FINGERS_KEEPER_CLOSED, FINGERS_PAN_CONTROL, KEEPER_CLOSED, KEEPER_OPEN,
    OFFSET_TILT, SCALE_BASE, SCALE_PAN, SCALE_TILT,
};
use crate::control::angle_state::{AngleState, AngleVector};
use crate::control::classifier::HandClassification;
use crate::enums::{Axis, HandLabel};
use crate::utility::round_to_angle;

#[derive(Debug, Default, Clone, Copy)]
pub struct CommandPlanner;

impl CommandPlanner {
    /// Create a new command planner.
    pub fn new() -> Self {
        Self
    }

    /// Plan the target angles of the arm.
    ///
    /// # Notes
    /// The axes that no hand drives keep the current angles. The result is
    /// not clamped.
    ///
    /// # Arguments
    /// * `left` - Classification of the left hand.
    /// * `right` - Classification of the right hand.
    /// * `state` - Current angles of the arm.
    ///
    /// # Returns
    /// Target angles.
    pub fn plan(
        &self,
        left: Option<&HandClassification>,
        right: Option<&HandClassification>,
        state: &AngleState,
    ) -> AngleVector {
        let mut angles = state.angles();

        [(HandLabel::Left, left), (HandLabel::Right, right)]
            .into_iter()
            .filter_map(|(label, hand)| hand.map(|hand| (label, hand)))
            .for_each(|(label, hand)| Self::apply_hand_rule(label, hand, &mut angles));

        angles
    }

    /// Drive the axes owned by one hand.
    ///
    /// # Notes
    /// The left hand owns the base and pan. The right hand owns the keeper
    /// and tilt. The tilt follows the right wrist regardless of the finger
    /// count.
    ///
    /// # Arguments
    /// * `label` - Hand the rule belongs to.
    /// * `hand` - Classification of the hand.
    /// * `angles` - Angles to update.
    fn apply_hand_rule(label: HandLabel, hand: &HandClassification, angles: &mut AngleVector) {
        let fingers = hand.finger_count;
        let wrist = hand.wrist;

        match label {
            HandLabel::Left => {
                if fingers >= FINGERS_BASE_CONTROL {
                    angles.set(Axis::Base, round_to_angle((1.0 - wrist.x) * SCALE_BASE));
                } else if fingers == FINGERS_PAN_CONTROL {
                    angles.set(Axis::Pan, round_to_angle(wrist.y * SCALE_PAN));
                }
            }
            HandLabel::Right => {
                let keeper = if fingers <= FINGERS_KEEPER_CLOSED {
                    KEEPER_CLOSED
                } else {
                    KEEPER_OPEN
                };
                angles.set(Axis::Keeper, keeper);

                angles.set(
                    Axis::Tilt,
                    round_to_angle(OFFSET_TILT - wrist.y * SCALE_TILT),
                );
            }
        }
    }
}
