// libs/auth-cell/src/models.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use shared_gateway::GatewayError;
use shared_storage::StorageError;

/// A registered patient as the backend serves it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Patient {
    #[serde(rename = "idPaciente")]
    pub id: i64,
    pub cpf: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "telefone")]
    pub phone: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "dataNascimento")]
    pub birth_date: NaiveDate,
    pub cep: Option<String>,
}

/// Creation payload; the backend assigns `idPaciente`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientCreate {
    pub cpf: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "telefone")]
    pub phone: String,
    pub email: Option<String>,
    #[serde(rename = "dataNascimento")]
    pub birth_date: NaiveDate,
    pub cep: String,
}

/// Raw registration form input, before validation and normalization.
#[derive(Debug, Clone, Default)]
pub struct PatientRegistration {
    pub name: String,
    pub cpf: String,
    pub phone: String,
    pub email: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub cep: String,
}

/// Outcome of the simulated password recovery flow: the derived password
/// plus the SMS confirmation code the patient must echo back.
#[derive(Debug, Clone)]
pub struct RecoveredCredentials {
    pub patient: Patient,
    pub password: String,
    pub sms_code: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Preencha todos os campos")]
    MissingCredentials,

    #[error("E-mail não cadastrado")]
    EmailNotRegistered,

    #[error("CPF não cadastrado")]
    CpfNotRegistered,

    #[error("CPF ou telefone incorretos")]
    RecoveryMismatch,

    #[error("Cadastro incompleto. Entre em contato com o suporte.")]
    IncompleteRegistration,

    #[error("Senha incorreta")]
    WrongPassword,

    #[error("Preencha todos os campos obrigatórios")]
    MissingRegistrationFields,

    #[error("CPF inválido")]
    InvalidCpf,

    #[error("E-mail inválido")]
    InvalidEmail,

    #[error("CEP inválido")]
    InvalidCep,

    #[error("Data de nascimento inválida")]
    InvalidBirthDate,

    #[error("CPF já cadastrado")]
    CpfAlreadyRegistered,

    #[error("Falha no cadastro: o servidor não retornou os dados completos do novo paciente.")]
    IncompleteServerResponse,

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
