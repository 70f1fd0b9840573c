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

use log::info;
use std::io::{Result, Write};

use crate::constants::NUM_AXIS;

/// Serial transport of the simulation mode. It records the frames instead
/// of sending them to the arm.
#[derive(Debug, Default)]
pub struct MockTransport {
    // Complete frames received so far.
    pub frames: Vec<[u8; NUM_AXIS]>,
    // Bytes of the incomplete frame.
    _buffer: Vec<u8>,
}

impl MockTransport {
    /// Create a new mock transport.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Write for MockTransport {
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        self._buffer.extend_from_slice(buf);

        while self._buffer.len() >= NUM_AXIS {
            let mut frame = [0; NUM_AXIS];
            frame.copy_from_slice(&self._buffer[..NUM_AXIS]);
            self._buffer.drain(..NUM_AXIS);

            info!(
                "Arm command: base {}, keeper {}, tilt {}, pan {}.",
                frame[0], frame[1], frame[2], frame[3]
            );
            self.frames.push(frame);
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write() {
        let mut transport = MockTransport::new();

        transport.write_all(&[135, 0, 86, 45]).unwrap();
        assert_eq!(transport.frames, vec![[135, 0, 86, 45]]);

        // Split frame
        transport.write_all(&[1, 2]).unwrap();
        assert_eq!(transport.frames.len(), 1);

        transport.write_all(&[3, 4, 5]).unwrap();
        assert_eq!(transport.frames.len(), 2);
        assert_eq!(transport.frames.last().copied(), Some([1, 2, 3, 4]));
        assert_eq!(transport._buffer, vec![5]);
    }
}
