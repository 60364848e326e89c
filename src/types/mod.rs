//! Type definitions

pub mod schedule;
pub mod time_point;
pub mod travel_time;

pub use schedule::*;
pub use time_point::*;
pub use travel_time::*;
