// libs/appointment-cell/src/services/booking.rs
use chrono::Local;
use tracing::info;

use crate::models::{
    Appointment, AppointmentError, AppointmentStatus, BookAppointmentRequest,
};
use crate::services::gateway::AppointmentsApi;
use crate::services::validation::{validate_booking, BookingForm, BookingValidationError};

pub struct AppointmentBookingService {
    api: AppointmentsApi,
}

impl AppointmentBookingService {
    pub fn new(api: AppointmentsApi) -> Self {
        Self { api }
    }

    /// Book an appointment for the given patient. Validation failures stop
    /// the submission before any gateway call; AGENDADA is the only
    /// creation status.
    pub async fn book(
        &self,
        form: &BookingForm,
        patient_id: i64,
    ) -> Result<Appointment, AppointmentError> {
        validate_booking(form, Local::now().date_naive())?;

        let request = build_request(form, patient_id)?;

        let appointment = self.api.save(&request).await?;
        info!(
            "Appointment {} booked for patient {} at {}",
            appointment.id, patient_id, appointment.scheduled_at
        );
        Ok(appointment)
    }
}

fn build_request(
    form: &BookingForm,
    patient_id: i64,
) -> Result<BookAppointmentRequest, BookingValidationError> {
    // validate_booking already proved these are present; the error arm only
    // protects against callers skipping validation.
    match (
        form.date,
        form.time,
        form.specialty_id,
        form.facility_id,
        form.doctor_id,
        form.attendance_type,
    ) {
        (Some(date), Some(time), Some(specialty_id), Some(facility_id), Some(doctor_id), Some(attendance_type)) => {
            Ok(BookAppointmentRequest {
                scheduled_at: date.and_time(time),
                status: AppointmentStatus::Scheduled,
                attendance_type,
                patient_id,
                doctor_id,
                facility_id,
                specialty_id,
            })
        }
        _ => Err(BookingValidationError::MissingFields),
    }
}
