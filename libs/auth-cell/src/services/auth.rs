// libs/auth-cell/src/services/auth.rs
use chrono::Local;
use rand::Rng;
use tracing::{debug, info};

use crate::models::{
    AuthError, Patient, PatientCreate, PatientRegistration, RecoveredCredentials,
};
use crate::services::gateway::PatientsApi;
use crate::services::password::{
    derive_password, normalize_cpf, validate_birth_date, validate_cep, validate_cpf,
    validate_email,
};
use crate::services::session::SessionService;

/// Login, registration and password recovery against the patients resource.
///
/// The backend has no credential endpoint: the client fetches the patient
/// roster and compares the locally derived password. This reproduces the
/// existing product behavior and is not an authentication design.
pub struct AuthService {
    patients: PatientsApi,
    session: SessionService,
}

impl AuthService {
    pub fn new(patients: PatientsApi, session: SessionService) -> Self {
        Self { patients, session }
    }

    /// Log in with an e-mail address or CPF plus the derived password. On
    /// success the patient is persisted as the active session.
    pub async fn login(&self, identifier: &str, password: &str) -> Result<Patient, AuthError> {
        if identifier.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let patients = self.patients.find_all().await?;

        let patient = if identifier.contains('@') {
            patients
                .into_iter()
                .find(|p| {
                    p.email
                        .as_deref()
                        .is_some_and(|e| e.eq_ignore_ascii_case(identifier))
                })
                .ok_or(AuthError::EmailNotRegistered)?
        } else {
            let cpf = normalize_cpf(identifier);
            patients
                .into_iter()
                .find(|p| normalize_cpf(&p.cpf) == cpf)
                .ok_or(AuthError::CpfNotRegistered)?
        };

        let cep = patient.cep.as_deref().ok_or(AuthError::IncompleteRegistration)?;

        let expected = derive_password(cep, patient.birth_date);
        if password != expected {
            return Err(AuthError::WrongPassword);
        }

        self.session.login(&patient).await?;
        info!("Login succeeded for patient {}", patient.id);
        Ok(patient)
    }

    /// Register a new patient. Returns the created record together with the
    /// derived password the patient will log in with.
    pub async fn register(
        &self,
        registration: PatientRegistration,
    ) -> Result<(Patient, String), AuthError> {
        let birth_date = match registration.birth_date {
            Some(birth_date) => birth_date,
            None => return Err(AuthError::MissingRegistrationFields),
        };
        if registration.name.is_empty()
            || registration.cpf.is_empty()
            || registration.phone.is_empty()
            || registration.cep.is_empty()
        {
            return Err(AuthError::MissingRegistrationFields);
        }

        if !validate_cpf(&registration.cpf) {
            return Err(AuthError::InvalidCpf);
        }
        if let Some(email) = registration.email.as_deref() {
            if !validate_email(email) {
                return Err(AuthError::InvalidEmail);
            }
        }
        if !validate_cep(&registration.cep) {
            return Err(AuthError::InvalidCep);
        }
        if !validate_birth_date(birth_date, Local::now().date_naive()) {
            return Err(AuthError::InvalidBirthDate);
        }

        let cpf = normalize_cpf(&registration.cpf);
        let patients = self.patients.find_all().await?;
        if patients.iter().any(|p| normalize_cpf(&p.cpf) == cpf) {
            return Err(AuthError::CpfAlreadyRegistered);
        }

        let payload = PatientCreate {
            cpf,
            name: registration.name,
            phone: registration.phone,
            email: registration.email,
            birth_date,
            cep: registration
                .cep
                .chars()
                .filter(|c| c.is_ascii_digit())
                .collect(),
        };

        let created = self.patients.save(&payload).await?;
        let cep = created
            .cep
            .as_deref()
            .ok_or(AuthError::IncompleteServerResponse)?;
        let password = derive_password(cep, created.birth_date);

        info!("Patient {} registered", created.id);
        Ok((created, password))
    }

    /// Simulated password recovery: looks the patient up by CPF + phone,
    /// re-derives the password and issues a random six-digit SMS code the
    /// caller must confirm with `verify_sms_code`.
    pub async fn recover_password(
        &self,
        cpf: &str,
        phone: &str,
    ) -> Result<RecoveredCredentials, AuthError> {
        if cpf.is_empty() || phone.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        if !validate_cpf(cpf) {
            return Err(AuthError::InvalidCpf);
        }

        let wanted_cpf = normalize_cpf(cpf);
        let wanted_phone: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

        let patients = self.patients.find_all().await?;
        let patient = patients
            .into_iter()
            .find(|p| {
                normalize_cpf(&p.cpf) == wanted_cpf
                    && p.phone
                        .as_deref()
                        .is_some_and(|t| {
                            t.chars().filter(|c| c.is_ascii_digit()).collect::<String>()
                                == wanted_phone
                        })
            })
            .ok_or(AuthError::RecoveryMismatch)?;

        let cep = patient.cep.as_deref().ok_or(AuthError::IncompleteRegistration)?;
        let password = derive_password(cep, patient.birth_date);
        let sms_code = rand::thread_rng().gen_range(100_000..1_000_000).to_string();

        debug!("Recovery code issued for patient {}", patient.id);
        Ok(RecoveredCredentials {
            patient,
            password,
            sms_code,
        })
    }

    pub fn verify_sms_code(&self, entered: &str, expected: &str) -> bool {
        entered == expected
    }

    /// Reminder text shown on the login screen.
    pub fn password_hint(&self) -> &'static str {
        "Sua senha é formada por: CEP (8 dígitos) + dia do nascimento (2 dígitos). \
         Exemplo: CEP 01310-100 e nascimento 15/05/1990 -> senha 0131010015"
    }

    pub async fn logout(&self) -> Result<(), AuthError> {
        self.session.logout().await?;
        Ok(())
    }

    pub async fn current_patient(&self) -> Result<Option<Patient>, AuthError> {
        Ok(self.session.current_patient().await?)
    }

    pub async fn is_logged_in(&self) -> Result<bool, AuthError> {
        Ok(self.session.is_logged_in().await?)
    }
}
