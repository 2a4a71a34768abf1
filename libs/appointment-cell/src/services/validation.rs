// libs/appointment-cell/src/services/validation.rs
//
// Two deliberately distinct clinic-hour policies live here: initial booking
// accepts [07:00, 18:00) at any minute, rescheduling accepts [08:00, 18:00]
// on 30-minute steps. They came from different screens of the product and
// must not be unified.
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::models::AttendanceType;

pub const BOOKING_OPENING_HOUR: u32 = 7;
pub const BOOKING_CLOSING_HOUR: u32 = 18;

pub const RESCHEDULE_OPENING_HOUR: u32 = 8;
pub const RESCHEDULE_CLOSING_HOUR: u32 = 18;
pub const RESCHEDULE_STEP_MINUTES: u32 = 30;

/// Raw booking form state. `None` means the field was left unfilled.
#[derive(Debug, Clone, Default)]
pub struct BookingForm {
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub specialty_id: Option<i64>,
    pub facility_id: Option<i64>,
    pub doctor_id: Option<i64>,
    pub attendance_type: Option<AttendanceType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BookingValidationError {
    #[error("missing required fields")]
    MissingFields,

    #[error("date is in the past")]
    DateInPast,

    #[error("time is outside clinic hours")]
    OutsideClinicHours,
}

impl BookingValidationError {
    /// Locale text shown to the patient, exhaustive by construction.
    pub fn user_message(&self) -> &'static str {
        match self {
            BookingValidationError::MissingFields => "Por favor, preencha todos os campos.",
            BookingValidationError::DateInPast => {
                "A data selecionada já passou. Por favor, escolha uma data futura."
            }
            BookingValidationError::OutsideClinicHours => {
                "O horário deve ser entre 07:00 e 18:00."
            }
        }
    }
}

/// Validates an initial booking submission. Pure, fail-fast: the first rule
/// broken wins, nothing is accumulated and no side effects happen.
///
/// `today` is the local calendar date; the past-date rule compares whole
/// days (a booking for later today is fine).
pub fn validate_booking(
    form: &BookingForm,
    today: NaiveDate,
) -> Result<(), BookingValidationError> {
    let (date, time) = match (
        form.date,
        form.time,
        form.specialty_id,
        form.facility_id,
        form.doctor_id,
        form.attendance_type,
    ) {
        (Some(date), Some(time), Some(_), Some(_), Some(_), Some(_)) => (date, time),
        _ => return Err(BookingValidationError::MissingFields),
    };

    if date < today {
        return Err(BookingValidationError::DateInPast);
    }

    let hour = time.hour();
    if hour < BOOKING_OPENING_HOUR || hour >= BOOKING_CLOSING_HOUR {
        return Err(BookingValidationError::OutsideClinicHours);
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RescheduleValidationError {
    #[error("missing date or time")]
    MissingFields,

    #[error("new date and time must be in the future")]
    NotInFuture,

    #[error("time is outside clinic hours")]
    OutsideClinicHours,

    #[error("time must fall on a 30-minute step")]
    InvalidTimeStep,
}

impl RescheduleValidationError {
    pub fn user_message(&self) -> &'static str {
        match self {
            RescheduleValidationError::MissingFields => "Por favor, preencha data e horário",
            RescheduleValidationError::NotInFuture => "A data e hora devem ser futuras",
            RescheduleValidationError::OutsideClinicHours => {
                "Horário deve estar entre 8h e 18h"
            }
            RescheduleValidationError::InvalidTimeStep => {
                "Horário deve ser em intervalos de 30 minutos"
            }
        }
    }
}

/// Validates a reschedule target. Stricter than booking: instant-level
/// future check, inclusive 18:00 upper bound, 30-minute granularity.
pub fn validate_reschedule(
    new_datetime: Option<NaiveDateTime>,
    now: NaiveDateTime,
) -> Result<(), RescheduleValidationError> {
    let new_datetime = new_datetime.ok_or(RescheduleValidationError::MissingFields)?;

    if new_datetime <= now {
        return Err(RescheduleValidationError::NotInFuture);
    }

    let hour = new_datetime.hour();
    let minute = new_datetime.minute();
    let outside = hour < RESCHEDULE_OPENING_HOUR
        || hour > RESCHEDULE_CLOSING_HOUR
        || (hour == RESCHEDULE_CLOSING_HOUR && minute > 0);
    if outside {
        return Err(RescheduleValidationError::OutsideClinicHours);
    }

    if minute % RESCHEDULE_STEP_MINUTES != 0 {
        return Err(RescheduleValidationError::InvalidTimeStep);
    }

    Ok(())
}
