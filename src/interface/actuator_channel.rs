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

use log::{debug, info, warn};
use serialport::SerialPort;
use std::io::{Error, ErrorKind, Write};
use std::thread::sleep;
use std::time::Duration;

use crate::config::Config;
use crate::control::angle_state::{AngleState, AngleVector};
use crate::error::{ArmError, Result};

/// Channel to send the angles to the arm's microcontroller.
///
/// # Notes
/// The channel owns the angle state, which always holds the last clamped
/// angles that were sent. The transport is released by close() or when the
/// channel is dropped.
pub struct ActuatorChannel<W: Write> {
    _transport: Option<W>,
    _state: AngleState,
}

impl ActuatorChannel<Box<dyn SerialPort>> {
    /// Open the serial port and wait for the microcontroller to settle.
    ///
    /// # Arguments
    /// * `config` - Configuration.
    ///
    /// # Returns
    /// A new actuator channel.
    ///
    /// # Errors
    /// TransportOpen if the serial port can not be opened.
    pub fn open(config: &Config) -> Result<Self> {
        let port = serialport::new(config.port.as_str(), config.baud_rate)
            .timeout(config.timeout)
            .open()
            .map_err(|error| ArmError::TransportOpen {
                port: config.port.clone(),
                source: error,
            })?;

        info!(
            "Opened the serial port {} at {} baud.",
            config.port, config.baud_rate
        );

        Ok(Self::new(port, config.settle_time))
    }
}

impl<W: Write> ActuatorChannel<W> {
    /// Create a new actuator channel.
    ///
    /// # Arguments
    /// * `transport` - Opened transport.
    /// * `settle_time` - Time to wait before the first command.
    ///
    /// # Returns
    /// A new actuator channel.
    pub fn new(transport: W, settle_time: Duration) -> Self {
        if !settle_time.is_zero() {
            info!(
                "Wait {} ms for the microcontroller to settle.",
                settle_time.as_millis()
            );
            sleep(settle_time);
        }

        Self {
            _transport: Some(transport),
            _state: AngleState::new(),
        }
    }

    /// Get the angle state.
    pub fn state(&self) -> &AngleState {
        &self._state
    }

    /// Get the transport. None if the channel is closed.
    pub fn transport(&self) -> Option<&W> {
        self._transport.as_ref()
    }

    /// The transport is open or not.
    pub fn is_open(&self) -> bool {
        self._transport.is_some()
    }

    /// Clamp the angles, record them in the state and send them as one
    /// frame.
    ///
    /// # Notes
    /// The state is updated before the write, so it holds the clamped angles
    /// even if the write fails.
    ///
    /// # Arguments
    /// * `target` - Target angles.
    ///
    /// # Returns
    /// The clamped angles.
    ///
    /// # Errors
    /// TransportWrite if the channel is closed or the write fails.
    pub fn send(&mut self, target: &AngleVector) -> Result<AngleVector> {
        let angles = target.clamp();
        if angles != *target {
            debug!("Clamp the target {:?} to {:?}.", target, angles);
        }

        self._state.update(angles);

        let transport = self._transport.as_mut().ok_or_else(|| {
            ArmError::TransportWrite(Error::new(
                ErrorKind::NotConnected,
                "the transport is closed",
            ))
        })?;

        transport
            .write_all(&angles.to_frame())
            .and_then(|_| transport.flush())
            .map_err(ArmError::TransportWrite)?;

        Ok(angles)
    }

    /// Close the channel and release the transport. Calling it again has no
    /// effect.
    pub fn close(&mut self) {
        if let Some(mut transport) = self._transport.take() {
            if let Err(error) = transport.flush() {
                warn!("Failed to flush the transport at close: {error}.");
            }
            info!("Closed the actuator channel.");
        }
    }
}

impl<W: Write> Drop for ActuatorChannel<W> {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io;

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(Error::new(ErrorKind::TimedOut, "write timeout"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct UnflushableWriter;

    impl Write for UnflushableWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(Error::new(ErrorKind::BrokenPipe, "device removed"))
        }
    }

    fn create_channel() -> ActuatorChannel<Vec<u8>> {
        ActuatorChannel::new(Vec::new(), Duration::ZERO)
    }

    #[test]
    fn test_new() {
        let channel = create_channel();

        assert!(channel.is_open());
        assert_eq!(channel.state().angles(), AngleVector::new(90, 0, 90, 45));
        assert!(channel.transport().unwrap().is_empty());
    }

    #[test]
    fn test_send() {
        let mut channel = create_channel();

        let angles = channel.send(&AngleVector::new(135, 0, 86, 45)).unwrap();

        assert_eq!(angles, AngleVector::new(135, 0, 86, 45));
        assert_eq!(channel.state().angles(), angles);
        assert_eq!(channel.transport().unwrap(), &vec![135, 0, 86, 45]);
    }

    #[test]
    fn test_send_clamp() {
        let mut channel = create_channel();

        let angles = channel.send(&AngleVector::new(200, 3, 10, -7)).unwrap();

        assert_eq!(angles, AngleVector::new(180, 3, 35, 0));
        assert_eq!(channel.state().angles(), angles);
        assert_eq!(channel.transport().unwrap(), &vec![180, 3, 35, 0]);
    }

    #[test]
    fn test_send_frames_in_order() {
        let mut channel = create_channel();

        channel.send(&AngleVector::new(1, 2, 40, 4)).unwrap();
        channel.send(&AngleVector::new(5, 6, 50, 8)).unwrap();

        assert_eq!(
            channel.transport().unwrap(),
            &vec![1, 2, 40, 4, 5, 6, 50, 8]
        );
    }

    #[test]
    fn test_send_write_error() {
        let mut channel = ActuatorChannel::new(FailingWriter, Duration::ZERO);

        let result = channel.send(&AngleVector::new(0, 8, 120, 60));

        assert!(matches!(result, Err(ArmError::TransportWrite(_))));

        // The state holds the clamped angles anyway
        assert_eq!(channel.state().angles(), AngleVector::new(0, 8, 120, 60));
    }

    #[test]
    fn test_close() {
        let mut channel = create_channel();

        channel.close();
        assert!(!channel.is_open());
        assert!(channel.transport().is_none());

        // Idempotent
        channel.close();
        assert!(!channel.is_open());

        let result = channel.send(&AngleVector::default());
        assert!(matches!(result, Err(ArmError::TransportWrite(_))));
    }

    #[test]
    fn test_close_flush_error() {
        let mut channel = ActuatorChannel::new(UnflushableWriter, Duration::ZERO);

        channel.close();

        // The transport is released even if the last flush fails
        assert!(!channel.is_open());
        assert!(channel.transport().is_none());
    }

    #[test]
    fn test_new_settle_time() {
        let settle_time = Duration::from_millis(20);

        let start = std::time::Instant::now();
        let _channel = ActuatorChannel::new(Vec::new(), settle_time);

        assert!(start.elapsed() >= settle_time);
    }
}
