pub const NUM_LANDMARK: usize = 21;
pub const NUM_FINGER: usize = 5;
pub const NUM_AXIS: usize = 4;

// Physical range of each axis in degree: (lower, upper).
pub const RANGE_BASE: (i32, i32) = (0, 180);
pub const RANGE_KEEPER: (i32, i32) = (0, 8);
pub const RANGE_TILT: (i32, i32) = (35, 120);
pub const RANGE_PAN: (i32, i32) = (0, 60);

// Angles of the arm at startup: base, keeper, tilt, pan.
pub const INITIAL_ANGLES: [i32; NUM_AXIS] = [90, 0, 90, 45];

// The keeper (gripper) only uses the two ends of its range.
pub const KEEPER_CLOSED: i32 = 0;
pub const KEEPER_OPEN: i32 = 8;

// Finger-count thresholds of the gesture mapping.
pub const FINGERS_BASE_CONTROL: u8 = 4;
pub const FINGERS_PAN_CONTROL: u8 = 3;
pub const FINGERS_KEEPER_CLOSED: u8 = 1;

// Scales from the normalized wrist position to the angles.
pub const SCALE_BASE: f64 = 180.0;
pub const SCALE_PAN: f64 = 60.0;
pub const OFFSET_TILT: f64 = 120.0;
pub const SCALE_TILT: f64 = 85.0;

pub const DEFAULT_CONFIDENCE: f64 = 1.0;

pub const CONFIG_FILE: &str = "config/parameters_app.yaml";
pub const LOG_FILE: &str = "arm_controller.log";
