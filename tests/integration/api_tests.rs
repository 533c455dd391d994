//! API integration tests
//!
//! Run against a live server started with `INSPECTA_OPERATOR` set.

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Create a company with a unique name and return its JSON
async fn create_company(client: &Client, prefix: &str) -> Value {
    let name = format!("{} {}", prefix, uuid::Uuid::new_v4());
    let response = client
        .post(format!("{}/companies", BASE_URL))
        .json(&json!({ "name": name, "address": "Rua A, 10" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.expect("Failed to parse response")
}

/// Build company / unit / sector / equipment and return the equipment JSON
async fn create_equipment(client: &Client) -> Value {
    let company = create_company(client, "Acme").await;

    let unit: Value = client
        .post(format!("{}/units", BASE_URL))
        .json(&json!({ "companyId": company["id"], "name": "Plant One" }))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    let sector: Value = client
        .post(format!("{}/sectors", BASE_URL))
        .json(&json!({ "unitId": unit["id"], "name": "Hall" }))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    // Unique model so the final code is unique too
    let model = format!("M{}", &uuid::Uuid::new_v4().simple().to_string()[..8]);
    let response = client
        .post(format!("{}/equipments", BASE_URL))
        .json(&json!({
            "sectorId": sector["id"],
            "typeCode": "SF",
            "model": model,
            "loop": "L2",
            "central": "C1"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.expect("Failed to parse response")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_create_company_derives_code() {
    let client = Client::new();
    let company = create_company(&client, "Acme").await;

    assert_eq!(company["code"], "ACM");
    assert!(company["id"].is_string());
    assert!(company["date"].is_string());
}

#[tokio::test]
#[ignore]
async fn test_duplicate_company_is_rejected() {
    let client = Client::new();
    let company = create_company(&client, "Dup").await;

    let response = client
        .post(format!("{}/companies", BASE_URL))
        .json(&json!({ "name": company["name"] }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Duplicate");
}

#[tokio::test]
#[ignore]
async fn test_equipment_final_code_and_lookup() {
    let client = Client::new();
    let equipment = create_equipment(&client).await;

    let final_code = equipment["finalCode"].as_str().expect("No final code");
    assert_eq!(
        final_code,
        format!("ACM_PLA_HAL_SF_{}_L2", equipment["model"].as_str().unwrap_or_default())
    );

    let response = client
        .get(format!("{}/equipments/by-code", BASE_URL))
        .query(&[("code", final_code)])
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let found: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(found["id"], equipment["id"]);
}

#[tokio::test]
#[ignore]
async fn test_inspection_requires_malfunction_description() {
    let client = Client::new();
    let equipment = create_equipment(&client).await;

    let response = client
        .post(format!("{}/inspections", BASE_URL))
        .json(&json!({
            "equipmentId": equipment["id"],
            "description": "Annual check",
            "functioning": false,
            "nextDate": "2999-01-01T00:00:00Z"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn test_upcoming_inspections_carry_status() {
    let client = Client::new();
    let equipment = create_equipment(&client).await;

    let response = client
        .post(format!("{}/inspections", BASE_URL))
        .json(&json!({
            "equipmentId": equipment["id"],
            "description": "Annual check",
            "functioning": true,
            "nextDate": "2999-01-01T00:00:00Z"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = client
        .get(format!("{}/inspections/upcoming", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    let row = body
        .as_array()
        .expect("Expected an array")
        .iter()
        .find(|row| row["equipmentId"] == equipment["id"])
        .expect("Inspection missing from the schedule");
    assert_eq!(row["status"]["kind"], "scheduled");
}

#[tokio::test]
#[ignore]
async fn test_equipment_csv_export() {
    let client = Client::new();
    let equipment = create_equipment(&client).await;
    let final_code = equipment["finalCode"].as_str().expect("No final code");

    let response = client
        .get(format!("{}/equipments/export", BASE_URL))
        .query(&[("term", final_code)])
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let disposition = response
        .headers()
        .get("content-disposition")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(disposition.contains("equipamentos_export.csv"));

    let body = response.text().await.expect("Failed to read body");
    let mut lines = body.lines();
    assert_eq!(
        lines.next(),
        Some("Empresa,Unidade,Setor,Equipamento,COD,Modelo,Laco,Central,CodigoFinal")
    );
    assert!(lines.next().is_some_and(|line| line.contains(final_code)));
}

#[tokio::test]
#[ignore]
async fn test_unknown_company_is_not_found() {
    let client = Client::new();

    let response = client
        .get(format!("{}/companies/{}", BASE_URL, uuid::Uuid::new_v4()))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
