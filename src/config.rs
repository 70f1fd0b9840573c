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

use std::path::Path;
use std::time::Duration;

use crate::utility::get_parameter;

#[derive(Clone, PartialEq, Debug)]
pub struct Config {
    // Serial device of the arm's microcontroller.
    pub port: String,
    // Baud rate of the serial link.
    pub baud_rate: u32,
    // Read/write timeout of the serial link.
    pub timeout: Duration,
    // Time to wait after opening the serial link before the first command.
    pub settle_time: Duration,
    // Hands reported with a lower confidence are ignored.
    pub min_confidence: f64,
}

impl Config {
    /// Create a new config object.
    ///
    /// # Arguments
    /// * `filepath` - The path to the application parameters file.
    ///
    /// # Returns
    /// A new config object.
    pub fn new(filepath: &Path) -> Self {
        Self {
            port: get_parameter(filepath, "port"),
            baud_rate: get_parameter(filepath, "baud_rate"),
            timeout: Duration::from_millis(get_parameter(filepath, "timeout")),
            settle_time: Duration::from_millis(get_parameter(filepath, "settle_time")),
            min_confidence: get_parameter(filepath, "min_confidence"),
        }
    }

    /// Override the serial settings from the command line.
    ///
    /// # Arguments
    /// * `port` - Serial device. None means no override.
    /// * `baud_rate` - Baud rate. None or 0 means no override.
    ///
    /// # Returns
    /// The config object with the overrides applied.
    pub fn with_overrides(mut self, port: Option<String>, baud_rate: Option<u32>) -> Self {
        if let Some(port) = port.filter(|port| !port.is_empty()) {
            self.port = port;
        }

        if let Some(baud_rate) = baud_rate.filter(|baud_rate| *baud_rate != 0) {
            self.baud_rate = baud_rate;
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::constants::CONFIG_FILE;

    fn create_config() -> Config {
        Config::new(Path::new(CONFIG_FILE))
    }

    #[test]
    fn test_new() {
        let config = create_config();

        assert_eq!(config.port, "/dev/ttyUSB0");
        assert_eq!(config.baud_rate, 115200);
        assert_eq!(config.timeout, Duration::from_millis(1000));
        assert_eq!(config.settle_time, Duration::from_millis(2000));
        assert_eq!(config.min_confidence, 0.8);
    }

    #[test]
    fn test_with_overrides() {
        let config = create_config().with_overrides(None, None);
        assert_eq!(config, create_config());

        let config = create_config().with_overrides(Some(String::new()), Some(0));
        assert_eq!(config, create_config());

        let config = create_config().with_overrides(Some(String::from("COM4")), Some(9600));
        assert_eq!(config.port, "COM4");
        assert_eq!(config.baud_rate, 9600);
    }
}
