//! Integration tests for owner-scoped resource access.

mod helpers;

use http::StatusCode;

#[tokio::test]
async fn test_foreign_medication_reads_as_not_found() {
    let app = helpers::TestApp::new().await;
    let owner = app.register_and_token("Ana", "owner@x.com", "secret1").await;
    let other = app.register_and_token("Bia", "other@x.com", "secret1").await;

    let medication_id = app.create_medication(&owner, "Losartana 50mg").await;

    // The owner sees the record.
    let mine = app
        .request(
            "GET",
            &format!("/medications/{medication_id}"),
            None,
            Some(&owner),
        )
        .await;
    assert_eq!(mine.status, StatusCode::OK);

    // Another user gets 404, not 403: existence is not revealed.
    let theirs = app
        .request(
            "GET",
            &format!("/medications/{medication_id}"),
            None,
            Some(&other),
        )
        .await;
    assert_eq!(theirs.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_foreign_medication_cannot_be_updated_or_deleted() {
    let app = helpers::TestApp::new().await;
    let owner = app.register_and_token("Ana", "owner2@x.com", "secret1").await;
    let other = app.register_and_token("Bia", "other2@x.com", "secret1").await;

    let medication_id = app.create_medication(&owner, "Metformina 850mg").await;

    let update = app
        .request(
            "PUT",
            &format!("/medications/{medication_id}"),
            Some(serde_json::json!({ "fullName": "Hijacked" })),
            Some(&other),
        )
        .await;
    assert_eq!(update.status, StatusCode::NOT_FOUND);

    let delete = app
        .request(
            "DELETE",
            &format!("/medications/{medication_id}"),
            None,
            Some(&other),
        )
        .await;
    assert_eq!(delete.status, StatusCode::NOT_FOUND);

    // Still intact for the owner.
    let mine = app
        .request(
            "GET",
            &format!("/medications/{medication_id}"),
            None,
            Some(&owner),
        )
        .await;
    assert_eq!(mine.status, StatusCode::OK);
    assert_eq!(mine.body["fullName"].as_str().unwrap(), "Metformina 850mg");
}

#[tokio::test]
async fn test_inventory_cannot_reference_a_foreign_medication() {
    let app = helpers::TestApp::new().await;
    let owner = app.register_and_token("Ana", "owner3@x.com", "secret1").await;
    let other = app.register_and_token("Bia", "other3@x.com", "secret1").await;

    let medication_id = app.create_medication(&owner, "Enalapril 10mg").await;

    // Referencing someone else's medication reads as a missing reference.
    let response = app
        .request(
            "POST",
            "/inventory",
            Some(serde_json::json!({
                "medicationId": medication_id,
                "currentQuantity": 10,
                "alertQuantity": 5,
            })),
            Some(&other),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_user_update_is_self_only() {
    let app = helpers::TestApp::new().await;
    let body = app.register("Ana", "self@x.com", "secret1").await;
    let ana_id = body["userId"].as_str().unwrap().to_string();
    let other = app.register_and_token("Bia", "intruder@x.com", "secret1").await;

    let response = app
        .request(
            "PUT",
            &format!("/users/{ana_id}"),
            Some(serde_json::json!({
                "name": "Hijacked Name",
                "email": "self@x.com",
            })),
            Some(&other),
        )
        .await;

    // Users are addressable by ID, so a mismatch is a plain 403.
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let delete = app
        .request("DELETE", &format!("/users/{ana_id}"), None, Some(&other))
        .await;
    assert_eq!(delete.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_lists_only_contain_the_callers_rows() {
    let app = helpers::TestApp::new().await;
    let owner = app.register_and_token("Ana", "lists@x.com", "secret1").await;
    let other = app.register_and_token("Bia", "empty@x.com", "secret1").await;

    app.create_medication(&owner, "Sinvastatina 20mg").await;

    let mine = app.request("GET", "/medications", None, Some(&owner)).await;
    assert_eq!(mine.body["totalItems"].as_u64().unwrap(), 1);

    let theirs = app.request("GET", "/medications", None, Some(&other)).await;
    assert_eq!(theirs.body["totalItems"].as_u64().unwrap(), 0);
}
