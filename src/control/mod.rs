pub mod angle_state;
pub mod classifier;
pub mod hand;
pub mod planner;
