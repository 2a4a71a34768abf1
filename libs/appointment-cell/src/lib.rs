pub mod models;
pub mod services;

pub use models::*;
pub use services::booking::AppointmentBookingService;
pub use services::gateway::AppointmentsApi;
pub use services::lifecycle::AppointmentLifecycleService;
pub use services::validation::{
    validate_booking, validate_reschedule, BookingForm, BookingValidationError,
    RescheduleValidationError,
};
