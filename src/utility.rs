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

use config::Config;
use std::path::Path;

pub trait ConfigValue {
    /// Parse the configuration value.
    ///
    /// # Parameters
    /// * `s` - String to parse.
    ///
    /// # Returns
    /// The parsed configuration value.
    fn parse_value(s: &str) -> Self;
}

impl ConfigValue for String {
    fn parse_value(s: &str) -> Self {
        s.to_string()
    }
}

impl ConfigValue for f64 {
    fn parse_value(s: &str) -> Self {
        s.parse::<f64>().expect(&format!("{s} should parse as f64"))
    }
}

impl ConfigValue for u32 {
    fn parse_value(s: &str) -> Self {
        s.parse::<u32>().expect(&format!("{s} should parse as u32"))
    }
}

impl ConfigValue for u64 {
    fn parse_value(s: &str) -> Self {
        s.parse::<u64>().expect(&format!("{s} should parse as u64"))
    }
}

/// Get the configuation from the file.
///
/// # Parameters
/// * `filepath` - Path to the config file.
///
/// # Returns
/// The configuration.
pub fn get_config(filepath: &Path) -> Config {
    let name = filepath
        .to_str()
        .expect(&format!("Should have the file name in the {:?}", filepath));

    Config::builder()
        .add_source(config::File::with_name(name))
        .build()
        .expect(&format!("Should be able to read the {name}"))
}

/// Get the parameter from the file.
///
/// # Parameters
/// * `filepath` - Path to the config file.
/// * `key` - Key to find the parameter in the config file.
///
/// # Returns
/// The parameter.
///
/// # Panics
/// If the key is not in the file or the value can not be parsed.
pub fn get_parameter<T: ConfigValue>(filepath: &Path, key: &str) -> T {
    let config = get_config(filepath);

    config
        .get_string(key)
        .map(|v| T::parse_value(&v))
        .expect(&format!("Should find the {key} in the {:?}", filepath))
}

/// Round the computed angle to the nearest integer degree.
///
/// # Notes
/// Half is rounded away from zero. The value saturates at the bounds of i32
/// and NaN becomes 0, so the result can always be clamped afterwards.
///
/// # Parameters
/// * `value` - Angle in degree.
///
/// # Returns
/// Rounded angle in degree.
pub fn round_to_angle(value: f64) -> i32 {
    value.round() as i32
}
