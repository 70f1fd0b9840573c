pub mod actuator_channel;
pub mod frame_source;
