// libs/auth-cell/tests/auth_test.rs
use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use auth_cell::{AuthError, AuthService, PatientRegistration, PatientsApi, SessionService};
use shared_gateway::ApiClient;
use shared_storage::MemoryStore;

// ==============================================================================
// TEST FIXTURES AND UTILITIES
// ==============================================================================

fn roster() -> serde_json::Value {
    json!([
        {
            "idPaciente": 1,
            "cpf": "123.456.789-01",
            "nome": "Ana Souza",
            "telefone": "(11) 99999-0001",
            "email": "ana@example.com",
            "dataNascimento": "1990-05-15",
            "cep": "01310-100"
        },
        {
            "idPaciente": 2,
            "cpf": "98765432100",
            "nome": "Bruno Lima",
            "telefone": null,
            "email": null,
            "dataNascimento": "1985-12-03",
            "cep": null
        }
    ])
}

async fn service_for(server: &MockServer) -> (AuthService, SessionService) {
    let client = Arc::new(ApiClient::with_base_url(server.uri()));
    let session = SessionService::new(Arc::new(MemoryStore::new()));
    let service = AuthService::new(PatientsApi::new(client), session.clone());
    (service, session)
}

async fn mount_roster(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/pacientes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(roster()))
        .mount(server)
        .await;
}

// ==============================================================================
// LOGIN
// ==============================================================================

#[tokio::test]
async fn login_by_email_starts_a_session() {
    let server = MockServer::start().await;
    mount_roster(&server).await;
    let (service, session) = service_for(&server).await;

    // CEP 01310-100 + day 15 of birth.
    let patient = service.login("ANA@example.com", "0131010015").await.unwrap();

    assert_eq!(patient.id, 1);
    assert_eq!(
        session.current_patient().await.unwrap().map(|p| p.id),
        Some(1)
    );
}

#[tokio::test]
async fn login_by_formatted_cpf_matches_stripped_digits() {
    let server = MockServer::start().await;
    mount_roster(&server).await;
    let (service, _) = service_for(&server).await;

    let patient = service.login("12345678901", "0131010015").await.unwrap();
    assert_eq!(patient.id, 1);
}

#[tokio::test]
async fn login_rejects_wrong_password_without_starting_a_session() {
    let server = MockServer::start().await;
    mount_roster(&server).await;
    let (service, session) = service_for(&server).await;

    let result = service.login("ana@example.com", "0131010016").await;

    assert_matches!(result, Err(AuthError::WrongPassword));
    assert!(!session.is_logged_in().await.unwrap());
}

#[tokio::test]
async fn login_reports_unknown_identifiers_and_empty_fields() {
    let server = MockServer::start().await;
    mount_roster(&server).await;
    let (service, _) = service_for(&server).await;

    assert_matches!(
        service.login("", "whatever").await,
        Err(AuthError::MissingCredentials)
    );
    assert_matches!(
        service.login("nobody@example.com", "x").await,
        Err(AuthError::EmailNotRegistered)
    );
    assert_matches!(
        service.login("00000000000", "x").await,
        Err(AuthError::CpfNotRegistered)
    );
}

#[tokio::test]
async fn login_requires_a_cep_on_file() {
    let server = MockServer::start().await;
    mount_roster(&server).await;
    let (service, _) = service_for(&server).await;

    // Bruno has no CEP, so no password can be derived for him.
    let result = service.login("98765432100", "anything").await;
    assert_matches!(result, Err(AuthError::IncompleteRegistration));
}

#[tokio::test]
async fn patients_can_be_fetched_individually() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pacientes/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(roster()[0].clone()))
        .mount(&server)
        .await;

    let client = Arc::new(ApiClient::with_base_url(server.uri()));
    let patient = PatientsApi::new(client).find_by_id(1).await.unwrap();

    assert_eq!(patient.name, "Ana Souza");
    assert_eq!(patient.cep.as_deref(), Some("01310-100"));
}

// ==============================================================================
// REGISTRATION
// ==============================================================================

fn valid_registration() -> PatientRegistration {
    PatientRegistration {
        name: "Carla Dias".to_string(),
        cpf: "111.222.333-44".to_string(),
        phone: "(11) 98888-0000".to_string(),
        email: Some("carla@example.com".to_string()),
        birth_date: NaiveDate::from_ymd_opt(1992, 7, 9),
        cep: "04538-132".to_string(),
    }
}

#[tokio::test]
async fn register_creates_the_patient_and_reports_the_derived_password() {
    let server = MockServer::start().await;
    mount_roster(&server).await;

    Mock::given(method("POST"))
        .and(path("/pacientes"))
        .and(body_partial_json(json!({
            "cpf": "11122233344",
            "nome": "Carla Dias",
            "cep": "04538132"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "idPaciente": 3,
            "cpf": "11122233344",
            "nome": "Carla Dias",
            "telefone": "(11) 98888-0000",
            "email": "carla@example.com",
            "dataNascimento": "1992-07-09",
            "cep": "04538132"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (service, _) = service_for(&server).await;
    let (patient, password) = service.register(valid_registration()).await.unwrap();

    assert_eq!(patient.id, 3);
    assert_eq!(password, "0453813209");
}

#[tokio::test]
async fn register_rejects_duplicates_and_bad_fields_before_any_create() {
    let server = MockServer::start().await;
    mount_roster(&server).await;

    Mock::given(method("POST"))
        .and(path("/pacientes"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let (service, _) = service_for(&server).await;

    let duplicate = PatientRegistration {
        cpf: "123.456.789-01".to_string(),
        ..valid_registration()
    };
    assert_matches!(
        service.register(duplicate).await,
        Err(AuthError::CpfAlreadyRegistered)
    );

    let bad_cpf = PatientRegistration {
        cpf: "123".to_string(),
        ..valid_registration()
    };
    assert_matches!(service.register(bad_cpf).await, Err(AuthError::InvalidCpf));

    let bad_email = PatientRegistration {
        email: Some("nope".to_string()),
        ..valid_registration()
    };
    assert_matches!(service.register(bad_email).await, Err(AuthError::InvalidEmail));

    let missing = PatientRegistration {
        name: String::new(),
        ..valid_registration()
    };
    assert_matches!(
        service.register(missing).await,
        Err(AuthError::MissingRegistrationFields)
    );
}

// ==============================================================================
// PASSWORD RECOVERY
// ==============================================================================

#[tokio::test]
async fn recovery_matches_cpf_and_phone_and_rederives_the_password() {
    let server = MockServer::start().await;
    mount_roster(&server).await;
    let (service, _) = service_for(&server).await;

    let recovered = service
        .recover_password("123.456.789-01", "11999990001")
        .await
        .unwrap();

    assert_eq!(recovered.patient.id, 1);
    assert_eq!(recovered.password, "0131010015");
    assert_eq!(recovered.sms_code.len(), 6);
    assert!(recovered.sms_code.chars().all(|c| c.is_ascii_digit()));
    assert!(service.verify_sms_code(&recovered.sms_code, &recovered.sms_code));
    assert!(!service.verify_sms_code("not-a-code", &recovered.sms_code));
    // The login screen hint describes the same derivation.
    assert!(service.password_hint().contains("CEP"));
}

#[tokio::test]
async fn recovery_rejects_mismatched_phone() {
    let server = MockServer::start().await;
    mount_roster(&server).await;
    let (service, _) = service_for(&server).await;

    let result = service.recover_password("123.456.789-01", "11000000000").await;
    assert_matches!(result, Err(AuthError::RecoveryMismatch));
}

// ==============================================================================
// SESSION LIFECYCLE
// ==============================================================================

#[tokio::test]
async fn logout_clears_the_stored_session() {
    let server = MockServer::start().await;
    mount_roster(&server).await;
    let (service, session) = service_for(&server).await;

    service.login("ana@example.com", "0131010015").await.unwrap();
    assert!(session.is_logged_in().await.unwrap());

    service.logout().await.unwrap();
    assert!(!session.is_logged_in().await.unwrap());
    assert_eq!(session.current_patient().await.unwrap(), None);
}
