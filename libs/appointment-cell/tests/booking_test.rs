// libs/appointment-cell/tests/booking_test.rs
use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::{Duration, Local, NaiveTime};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use appointment_cell::{
    AppointmentBookingService, AppointmentError, AppointmentStatus, AppointmentsApi,
    AttendanceType, BookingForm, BookingValidationError,
};
use shared_gateway::ApiClient;

fn service_for(server: &MockServer) -> AppointmentBookingService {
    let client = Arc::new(ApiClient::with_base_url(server.uri()));
    AppointmentBookingService::new(AppointmentsApi::new(client))
}

fn future_form() -> BookingForm {
    BookingForm {
        date: Some(Local::now().date_naive() + Duration::days(3)),
        time: Some(NaiveTime::from_hms_opt(10, 0, 0).unwrap()),
        specialty_id: Some(5),
        facility_id: Some(1),
        doctor_id: Some(3),
        attendance_type: Some(AttendanceType::Teleconsultation),
    }
}

#[tokio::test]
async fn booking_in_the_past_never_reaches_the_gateway() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/consultas"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let service = service_for(&server);
    let form = BookingForm {
        date: Some(Local::now().date_naive() - Duration::days(1)),
        ..future_form()
    };

    let result = service.book(&form, 7).await;
    assert_matches!(
        result,
        Err(AppointmentError::Validation(
            BookingValidationError::DateInPast
        ))
    );
}

#[tokio::test]
async fn booking_posts_a_scheduled_creation_payload() {
    let server = MockServer::start().await;
    let form = future_form();
    let scheduled_at = form.date.unwrap().and_time(form.time.unwrap());
    let scheduled_wire = scheduled_at.format("%Y-%m-%dT%H:%M:%S").to_string();

    Mock::given(method("POST"))
        .and(path("/consultas"))
        .and(body_partial_json(json!({
            "status": "AGENDADA",
            "tipoAtendimento": "TELECONSULTA",
            "idPaciente": 7,
            "idMedico": 3,
            "idUnidade": 1,
            "idEspecialidade": 5,
            "dataConsulta": scheduled_wire,
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "idConsulta": 99,
            "protocolo": "HC-2025-0099",
            "dataConsulta": scheduled_wire,
            "status": "AGENDADA",
            "tipoAtendimento": "TELECONSULTA",
            "idPaciente": 7,
            "idMedico": 3,
            "idUnidade": 1,
            "idEspecialidade": 5
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server);
    let appointment = service.book(&form, 7).await.unwrap();

    assert_eq!(appointment.id, 99);
    assert_eq!(appointment.protocol, "HC-2025-0099");
    assert_eq!(appointment.status, AppointmentStatus::Scheduled);
    assert_eq!(appointment.scheduled_at, scheduled_at);
}
