pub mod calendar;

pub use calendar::{is_slot_aligned, normalize_to_midnight, CalendarService};
