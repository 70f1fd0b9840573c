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

use strum_macros::{AsRefStr, EnumIter, EnumString, FromRepr};

use crate::constants::{RANGE_BASE, RANGE_KEEPER, RANGE_PAN, RANGE_TILT};

/// Label of the hand reported by the detector.
///
/// # Notes
/// The camera image is mirrored before the detection, so the label matches
/// the side of the screen the hand appears on.
#[derive(EnumString, EnumIter, AsRefStr, Debug, PartialEq, Clone, Copy, Hash, Eq)]
pub enum HandLabel {
    Left,
    Right,
}

impl HandLabel {
    /// Direction of the thumb's outward movement along the x-axis of the
    /// image.
    ///
    /// # Returns
    /// 1.0 if the thumb extends toward the larger x. Otherwise, -1.0.
    pub fn thumb_direction(&self) -> f64 {
        match self {
            HandLabel::Left => 1.0,
            HandLabel::Right => -1.0,
        }
    }
}

/// Anatomical points of the hand in the order of the detector's landmarks.
#[derive(FromRepr, EnumIter, Debug, PartialEq, Clone, Copy, Eq)]
#[repr(usize)]
pub enum Joint {
    Wrist = 0,
    ThumbCmc = 1,
    ThumbMcp = 2,
    ThumbIp = 3,
    ThumbTip = 4,
    IndexMcp = 5,
    IndexPip = 6,
    IndexDip = 7,
    IndexTip = 8,
    MiddleMcp = 9,
    MiddlePip = 10,
    MiddleDip = 11,
    MiddleTip = 12,
    RingMcp = 13,
    RingPip = 14,
    RingDip = 15,
    RingTip = 16,
    LittleMcp = 17,
    LittlePip = 18,
    LittleDip = 19,
    LittleTip = 20,
}

/// Fingers of the hand.
#[derive(EnumIter, Debug, PartialEq, Clone, Copy, Eq)]
#[repr(usize)]
pub enum Finger {
    Thumb = 0,
    Index = 1,
    Middle = 2,
    Ring = 3,
    Little = 4,
}

impl Finger {
    /// Joints compared to decide the finger is extended or not.
    ///
    /// # Returns
    /// Tip and the reference joint. The reference is the interphalangeal
    /// joint for the thumb and the proximal interphalangeal joint for the
    /// others.
    pub fn joints(&self) -> (Joint, Joint) {
        match self {
            Finger::Thumb => (Joint::ThumbTip, Joint::ThumbIp),
            Finger::Index => (Joint::IndexTip, Joint::IndexPip),
            Finger::Middle => (Joint::MiddleTip, Joint::MiddlePip),
            Finger::Ring => (Joint::RingTip, Joint::RingPip),
            Finger::Little => (Joint::LittleTip, Joint::LittlePip),
        }
    }
}

/// Axes of the arm in the order of the serial frame.
#[derive(EnumIter, Debug, PartialEq, Clone, Copy, Hash, Eq)]
#[repr(usize)]
pub enum Axis {
    Base = 0,
    Keeper = 1,
    Tilt = 2,
    Pan = 3,
}

impl Axis {
    /// Physical range of the axis.
    ///
    /// # Returns
    /// Lower and upper bounds in degree (inclusive).
    pub fn range(&self) -> (i32, i32) {
        match self {
            Axis::Base => RANGE_BASE,
            Axis::Keeper => RANGE_KEEPER,
            Axis::Tilt => RANGE_TILT,
            Axis::Pan => RANGE_PAN,
        }
    }
}
