// =====================================================================================
// CALENDAR CELL - APPOINTMENT QUERIES, DELETION AND ADMISSION
// =====================================================================================

pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{
    AddAppointmentRequest, AddAppointmentResponse, AppointmentListResponse,
    CalendarError, DeleteAppointmentRequest, GetAppointmentsRequest,
    MAX_APPOINTMENTS_PER_SLOT, SLOT_INTERVAL_MINUTES,
};

pub use services::{is_slot_aligned, normalize_to_midnight, CalendarService};

pub use router::calendar_routes;
