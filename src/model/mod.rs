pub mod attendance;
pub mod calendar;
pub mod stats;
