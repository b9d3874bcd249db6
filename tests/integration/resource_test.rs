//! Integration tests for the resource services' derived fields and
//! domain behaviors.

mod helpers;

use http::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn test_inventory_low_stock_boundary() {
    let app = helpers::TestApp::new().await;
    let token = app.register_and_token("Ana", "stock@x.com", "secret1").await;
    let medication_id = app.create_medication(&token, "Omeprazol 20mg").await;

    // Equal to the threshold counts as low.
    let at_threshold = app
        .request(
            "POST",
            "/inventory",
            Some(serde_json::json!({
                "medicationId": medication_id,
                "currentQuantity": 5,
                "alertQuantity": 5,
            })),
            Some(&token),
        )
        .await;
    assert_eq!(at_threshold.status, StatusCode::CREATED);
    assert_eq!(at_threshold.body["lowStock"].as_bool().unwrap(), true);

    let low_stock = app
        .request("GET", "/inventory/low-stock", None, Some(&token))
        .await;
    assert_eq!(low_stock.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_inventory_create_merges_into_existing_row() {
    let app = helpers::TestApp::new().await;
    let token = app.register_and_token("Ana", "merge@x.com", "secret1").await;
    let medication_id = app.create_medication(&token, "Dipirona 500mg").await;

    let first = app
        .request(
            "POST",
            "/inventory",
            Some(serde_json::json!({
                "medicationId": medication_id,
                "currentQuantity": 10,
                "alertQuantity": 5,
            })),
            Some(&token),
        )
        .await;
    assert_eq!(first.status, StatusCode::CREATED);

    // A second create for the same medication adds quantities.
    let second = app
        .request(
            "POST",
            "/inventory",
            Some(serde_json::json!({
                "medicationId": medication_id,
                "currentQuantity": 7,
                "alertQuantity": 3,
            })),
            Some(&token),
        )
        .await;
    assert_eq!(second.body["currentQuantity"].as_i64().unwrap(), 17);
    assert_eq!(second.body["alertQuantity"].as_i64().unwrap(), 3);
    assert_eq!(second.body["id"], first.body["id"]);
}

#[tokio::test]
async fn test_prescription_validity_and_item_replacement() {
    let app = helpers::TestApp::new().await;
    let token = app.register_and_token("Ana", "rx@x.com", "secret1").await;

    let create = app
        .request(
            "POST",
            "/prescriptions",
            Some(serde_json::json!({
                "doctorName": "Dr. Souza",
                "issuedOn": "2024-01-10",
                "items": [
                    { "description": "Amoxicilina 500mg", "instructions": "1 capsule every 8h", "quantity": 21 },
                    { "description": "Ibuprofeno 400mg", "instructions": "1 tablet when in pain" }
                ],
            })),
            Some(&token),
        )
        .await;

    assert_eq!(create.status, StatusCode::CREATED);
    // No expiry date: always current.
    assert_eq!(create.body["valid"].as_bool().unwrap(), true);
    assert_eq!(create.body["items"].as_array().unwrap().len(), 2);
    let id = create.body["id"].as_str().unwrap().to_string();

    // Update replaces the item set wholesale.
    let update = app
        .request(
            "PUT",
            &format!("/prescriptions/{id}"),
            Some(serde_json::json!({
                "doctorName": "Dr. Souza",
                "issuedOn": "2024-01-10",
                "items": [
                    { "description": "Azitromicina 500mg", "instructions": "1 tablet a day", "quantity": 5 }
                ],
            })),
            Some(&token),
        )
        .await;

    assert_eq!(update.status, StatusCode::OK);
    let items = update.body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(
        items[0]["description"].as_str().unwrap(),
        "Azitromicina 500mg"
    );

    // Deleting the prescription removes its items too.
    let delete = app
        .request("DELETE", &format!("/prescriptions/{id}"), None, Some(&token))
        .await;
    assert_eq!(delete.status, StatusCode::NO_CONTENT);

    let orphans: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM prescription_items")
        .fetch_one(&app.db_pool)
        .await
        .unwrap();
    assert_eq!(orphans, 0);
}

#[tokio::test]
async fn test_reminder_without_weekdays_is_due_today() {
    let app = helpers::TestApp::new().await;
    let token = app.register_and_token("Ana", "rem@x.com", "secret1").await;
    let medication_id = app.create_medication(&token, "Levotiroxina 50mcg").await;

    let create = app
        .request(
            "POST",
            "/reminders",
            Some(serde_json::json!({
                "medicationId": medication_id,
                "times": ["08:00:00", "20:00:00"],
            })),
            Some(&token),
        )
        .await;
    assert_eq!(create.status, StatusCode::CREATED);
    assert_eq!(create.body["dueToday"].as_bool().unwrap(), true);

    let today = app.request("GET", "/reminders/today", None, Some(&token)).await;
    assert_eq!(today.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_health_record_variant_fields_are_nulled() {
    let app = helpers::TestApp::new().await;
    let token = app.register_and_token("Ana", "hr@x.com", "secret1").await;

    let pressure = app
        .request(
            "POST",
            "/health-records",
            Some(serde_json::json!({
                "kind": "blood_pressure",
                "systolic": 120,
                "diastolic": 80,
                "pulse": 72,
                "glucoseLevel": 95.0,
            })),
            Some(&token),
        )
        .await;

    assert_eq!(pressure.status, StatusCode::CREATED);
    assert_eq!(pressure.body["systolic"].as_i64().unwrap(), 120);
    // The glucose value submitted alongside a pressure record is dropped.
    assert_eq!(pressure.body["glucoseLevel"], Value::Null);

    // A glucose record without a level is rejected.
    let incomplete = app
        .request(
            "POST",
            "/health-records",
            Some(serde_json::json!({ "kind": "glucose" })),
            Some(&token),
        )
        .await;
    assert_eq!(incomplete.status, StatusCode::BAD_REQUEST);

    let glucose = app
        .request(
            "POST",
            "/health-records",
            Some(serde_json::json!({
                "kind": "glucose",
                "glucoseLevel": 98.5,
                "fasting": true,
            })),
            Some(&token),
        )
        .await;
    assert_eq!(glucose.status, StatusCode::CREATED);
    assert_eq!(glucose.body["systolic"], Value::Null);

    // Filtering by kind sees exactly one of each.
    let by_kind = app
        .request("GET", "/health-records/kind/glucose", None, Some(&token))
        .await;
    assert_eq!(by_kind.body["totalItems"].as_u64().unwrap(), 1);
}

#[tokio::test]
async fn test_medication_search_matches_both_names() {
    let app = helpers::TestApp::new().await;
    let token = app.register_and_token("Ana", "search@x.com", "secret1").await;

    app.request(
        "POST",
        "/medications",
        Some(serde_json::json!({
            "fullName": "Cloridrato de Metformina",
            "shortName": "Metformina",
        })),
        Some(&token),
    )
    .await;
    app.create_medication(&token, "Losartana Potássica").await;

    let response = app
        .request(
            "GET",
            "/medications/search?name=metformina",
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["totalItems"].as_u64().unwrap(), 1);
}
