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

use log::{error, info};
use signal_hook::{
    consts::{SIGINT, SIGTERM},
    flag::{register, register_conditional_shutdown},
};
use std::fs::File;
use std::io::{stdin, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::{atomic::AtomicBool, Arc};
use std::time::Duration;

use crate::config::Config;
use crate::constants::CONFIG_FILE;
use crate::error::{ArmError, Result};
use crate::interface::{
    actuator_channel::ActuatorChannel,
    frame_source::{FrameSource, JsonLinesSource},
};
use crate::mock::mock_transport::MockTransport;
use crate::model::Model;

/// Run the application.
///
/// # Arguments
/// * `port` - Serial device to override the configuration file.
/// * `baud_rate` - Baud rate to override the configuration file.
/// * `input` - File of the detection frames. None means the standard input.
/// * `is_simulation_mode` - Is the simulation mode or not.
///
/// # Errors
/// The error that stopped the application.
pub fn run(
    port: Option<String>,
    baud_rate: Option<u32>,
    input: Option<PathBuf>,
    is_simulation_mode: bool,
) -> Result<()> {
    // Log the running mode
    let mode = if is_simulation_mode {
        "simulation mode"
    } else {
        "hardware mode"
    };
    info!("Run the arm controller in {mode}.");

    let config = Config::new(Path::new(CONFIG_FILE)).with_overrides(port, baud_rate);

    let mut source = JsonLinesSource::new(open_input(input.as_deref())?);

    if is_simulation_mode {
        let channel = ActuatorChannel::new(MockTransport::new(), Duration::ZERO);
        run_model(&mut Model::new(channel, config.min_confidence), &mut source)
    } else {
        let channel = ActuatorChannel::open(&config)?;
        run_model(&mut Model::new(channel, config.min_confidence), &mut source)
    }
}

/// Open the input of the detection frames.
///
/// # Arguments
/// * `input` - File of the detection frames. None or "-" means the standard
/// input.
///
/// # Returns
/// Reader of the detection frames.
///
/// # Errors
/// FrameSource if the file can not be opened.
fn open_input(input: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match input.filter(|path| *path != Path::new("-")) {
        Some(path) => {
            info!("Read the detection frames from {:?}.", path);
            let file = File::open(path).map_err(ArmError::FrameSource)?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => {
            info!("Read the detection frames from the standard input.");
            Ok(Box::new(stdin().lock()))
        }
    }
}

/// Register the signals that stop the application.
///
/// # Notes
/// The first signal sets the stop flag. A second one terminates the process
/// immediately, which is needed when the loop is blocked on the input.
///
/// # Arguments
/// * `stop` - Stop flag of the model.
fn register_signals(stop: &Arc<AtomicBool>) {
    for signal in [SIGTERM, SIGINT].iter() {
        // Registered before the flag so only a second signal sees it set
        if let Err(error) = register_conditional_shutdown(*signal, 1, Arc::clone(stop)) {
            error!("Failed to register the shutdown of signal {signal}: {error}.");
        }

        if let Err(error) = register(*signal, Arc::clone(stop)) {
            error!("Failed to register the signal {signal}: {error}.");
        }
    }
}

/// Run the model until it stops and release the transport.
///
/// # Arguments
/// * `model` - Model with an opened actuator channel.
/// * `source` - Source of the detection frames.
///
/// # Errors
/// The error that stopped the control loop.
fn run_model<W: Write, S: FrameSource>(model: &mut Model<W>, source: &mut S) -> Result<()> {
    register_signals(&model.stop);

    let result = model.run(source);
    if let Err(error) = &result {
        error!("Stop the control loop: {error}");
    }

    info!("Stopping the arm controller...");
    model.stop();

    result
}
