// libs/directory-cell/src/models.rs
use serde::{Deserialize, Serialize};

/// A hospital unit the patient can be seen at.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Facility {
    #[serde(rename = "idUnidade")]
    pub id: i64,
    #[serde(rename = "cdUnidade")]
    pub code: String,
    #[serde(rename = "endereco")]
    pub address: String,
    #[serde(rename = "telefone")]
    pub phone: Option<String>,
    #[serde(rename = "horario")]
    pub opening_hours: Option<String>,
    pub cep: Option<String>,
    #[serde(rename = "urlImagemUnidades")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Specialty {
    #[serde(rename = "idEspecialidade")]
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
    #[serde(rename = "urlImagem", skip_serializing_if = "Option::is_none", default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Doctor {
    #[serde(rename = "idMedico")]
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    pub crm: Option<String>,
    #[serde(rename = "idEspecialidade")]
    pub specialty_id: i64,
}

/// A service offered by a unit (exams, vaccination, ...), distinct from a
/// medical specialty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CareService {
    #[serde(rename = "idServico")]
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
}
