//! Recommendation rules: pure functions over a `SoilSample`.
//!
//! - `amendments.rs` - threshold-based soil treatments
//! - `schedule.rs` - planting calendars by crop

pub mod amendments;
pub mod schedule;

pub use amendments::{amendments, Amendment, AmendmentKind};
pub use schedule::{planting_schedule, PlantingSchedule, GENERAL_CROPS};
