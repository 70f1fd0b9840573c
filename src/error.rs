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

use std::io;
use thiserror::Error;

/// Errors of the arm controller.
#[derive(Debug, Error)]
pub enum ArmError {
    #[error("Failed to open the serial port {port}: {source}")]
    TransportOpen {
        port: String,
        #[source]
        source: serialport::Error,
    },

    #[error("Failed to write the command to the serial port: {0}")]
    TransportWrite(#[source] io::Error),

    #[error("Malformed hand observation: {0}")]
    MalformedObservation(String),

    #[error("Failed to read the detection frame: {0}")]
    FrameSource(#[source] io::Error),
}

pub type Result<T> = std::result::Result<T, ArmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let error = ArmError::MalformedObservation(String::from("20 landmarks"));
        assert_eq!(error.to_string(), "Malformed hand observation: 20 landmarks");

        let error = ArmError::TransportWrite(io::Error::new(io::ErrorKind::TimedOut, "timeout"));
        assert_eq!(
            error.to_string(),
            "Failed to write the command to the serial port: timeout"
        );
    }
}
