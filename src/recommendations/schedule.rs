//! Planting calendars
//!
//! Four-phase schedules keyed by exact crop name. Crops without an entry get
//! the general-purpose schedule.

use serde::Serialize;

/// Placeholder crop name used when nothing was recommended.
pub const GENERAL_CROPS: &str = "General Crops";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlantingSchedule {
    /// Crop the schedule was requested for
    pub crop: String,
    /// True when no crop-specific calendar exists
    pub is_default: bool,
    pub prep: &'static str,
    pub plant: &'static str,
    pub maintain: &'static str,
    pub harvest: &'static str,
}

impl PlantingSchedule {
    /// Phases in calendar order as (title, description).
    pub fn phases(&self) -> [(&'static str, &'static str); 4] {
        [
            ("Prep", self.prep),
            ("Plant", self.plant),
            ("Maintain", self.maintain),
            ("Harvest", self.harvest),
        ]
    }
}

struct Calendar {
    crop: &'static str,
    prep: &'static str,
    plant: &'static str,
    maintain: &'static str,
    harvest: &'static str,
}

static CALENDARS: &[Calendar] = &[
    Calendar {
        crop: "Rice",
        prep: "March - April: Prepare field, ensure water availability",
        plant: "May - June: Transplant seedlings in flooded field",
        maintain: "June - September: Maintain water levels, apply fertilizer",
        harvest: "October - November: Drain field and harvest when golden",
    },
    Calendar {
        crop: "Wheat",
        prep: "September: Prepare field with deep plowing",
        plant: "October - November: Direct seed at 100-120 lbs/acre",
        maintain: "December - March: Monitor for pests, apply nitrogen in spring",
        harvest: "April - May: Harvest when moisture content is 12-14%",
    },
    Calendar {
        crop: "Corn",
        prep: "March - April: Prepare seedbed, apply pre-plant fertilizer",
        plant: "April - May: Plant seeds 1.5-2 inches deep",
        maintain: "May - August: Side-dress nitrogen, control weeds",
        harvest: "September - October: Harvest when kernels are hard",
    },
    Calendar {
        crop: "Tomatoes",
        prep: "March: Start seeds indoors, prepare soil with compost",
        plant: "April - May: Transplant after last frost",
        maintain: "May - August: Stake plants, water regularly, prune suckers",
        harvest: "July - September: Harvest when fully colored",
    },
    Calendar {
        crop: "Potatoes",
        prep: "February - March: Prepare soil, ensure good drainage",
        plant: "March - April: Plant seed potatoes 4 inches deep",
        maintain: "April - July: Hill soil around plants, water consistently",
        harvest: "July - August: Harvest 2-3 weeks after foliage dies",
    },
];

static DEFAULT_CALENDAR: Calendar = Calendar {
    crop: "default",
    prep: "Early Spring: Prepare soil, test nutrients",
    plant: "Spring: Plant after last frost date",
    maintain: "Growing Season: Water, fertilize, and monitor regularly",
    harvest: "Late Summer/Fall: Harvest when mature",
};

/// Crops with a dedicated calendar.
pub fn scheduled_crops() -> Vec<&'static str> {
    CALENDARS.iter().map(|c| c.crop).collect()
}

/// Schedule for a crop by exact name; unknown names get the default.
pub fn planting_schedule(crop: &str) -> PlantingSchedule {
    let found = CALENDARS.iter().find(|c| c.crop == crop);
    let calendar = found.unwrap_or(&DEFAULT_CALENDAR);

    PlantingSchedule {
        crop: crop.to_string(),
        is_default: found.is_none(),
        prep: calendar.prep,
        plant: calendar.plant,
        maintain: calendar.maintain,
        harvest: calendar.harvest,
    }
}
