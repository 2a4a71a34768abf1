pub mod models;
pub mod services;

pub use models::*;
pub use services::auth::AuthService;
pub use services::gateway::PatientsApi;
pub use services::password::{
    derive_password, normalize_cpf, validate_birth_date, validate_cep, validate_cpf,
    validate_email,
};
pub use services::session::SessionService;
