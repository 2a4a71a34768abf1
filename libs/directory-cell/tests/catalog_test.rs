// libs/directory-cell/tests/catalog_test.rs
use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use directory_cell::DirectoryService;
use shared_gateway::ApiClient;

async fn service_for(server: &MockServer) -> DirectoryService {
    DirectoryService::new(Arc::new(ApiClient::with_base_url(server.uri())))
}

#[tokio::test]
async fn specialties_deserialize_from_the_backend_wire_shape() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/especialidades"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "idEspecialidade": 5,
                "nome": "Cardiologia",
                "descricao": "Coração e sistema circulatório",
                "urlImagem": "https://img.example/cardio.png"
            },
            {
                "idEspecialidade": 6,
                "nome": "Pediatria",
                "descricao": null
            }
        ])))
        .mount(&server)
        .await;

    let service = service_for(&server).await;
    let specialties = service.specialties().await.unwrap();

    assert_eq!(specialties.len(), 2);
    assert_eq!(specialties[0].name, "Cardiologia");
    assert_eq!(specialties[1].description, None);
    assert_eq!(specialties[1].image_url, None);
}

#[tokio::test]
async fn facilities_and_doctors_read_their_resources() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/unidades/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "idUnidade": 1,
            "cdUnidade": "HC-CENTRAL",
            "endereco": "Av. Dr. Enéas Carvalho de Aguiar, 255",
            "telefone": "(11) 2661-0000",
            "horario": "07:00-19:00",
            "cep": "05403-000",
            "urlImagemUnidades": null
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/medicos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "idMedico": 3, "nome": "Paula Chaves", "crm": "CRM/SP 123456", "idEspecialidade": 5 }
        ])))
        .mount(&server)
        .await;

    let service = service_for(&server).await;

    let facility = service.facility(1).await.unwrap();
    assert_eq!(facility.code, "HC-CENTRAL");
    assert_eq!(facility.opening_hours.as_deref(), Some("07:00-19:00"));

    let doctors = service.doctors().await.unwrap();
    assert_eq!(doctors.len(), 1);
    assert_eq!(doctors[0].specialty_id, 5);
}

#[tokio::test]
async fn single_specialty_and_care_services_read_their_resources() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/especialidades/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "idEspecialidade": 5,
            "nome": "Cardiologia",
            "descricao": null
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/servicos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "idServico": 2, "nome": "Vacinação", "descricao": "Campanhas sazonais" }
        ])))
        .mount(&server)
        .await;

    let service = service_for(&server).await;

    let specialty = service.specialty(5).await.unwrap();
    assert_eq!(specialty.name, "Cardiologia");

    let services = service.care_services().await.unwrap();
    assert_eq!(services[0].name, "Vacinação");
}
