//! Tests for the HTTP endpoints.

use salvo::http::StatusCode;

use super::helpers::*;

#[test_log::test(tokio::test)]
async fn healthcheck_is_public() {
    let app = TestApp::new(AuthMethod::Proxy);
    let resp = app
        .get("/api/app/healthcheck", None)
        .await
        .assert_status(StatusCode::OK);
    assert_eq!(resp.body_string(), "OK");
}

#[test_log::test(tokio::test)]
async fn upload_imports_and_reports() {
    let app = TestApp::single_user();

    let resp = app
        .upload("contacts.vcf", fixtures::THREE_CONTACTS)
        .await
        .assert_status(StatusCode::CREATED);

    let body = resp.json();
    assert_eq!(body["imported_count"], 3);
    assert_eq!(body["failed_count"], 0);
    assert_eq!(body["total_processed"], 3);
    assert_eq!(body["message"], "Imported 3 of 3 contacts");
    assert_eq!(app.stored("local").len(), 3);
}

#[test_log::test(tokio::test)]
async fn second_upload_imports_nothing() {
    let app = TestApp::single_user();
    app.upload("contacts.vcf", fixtures::THREE_CONTACTS).await;

    let body = app
        .upload("contacts.vcf", fixtures::THREE_CONTACTS)
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    assert_eq!(body["imported_count"], 0);
    assert_eq!(body["failed_count"], 3);
    assert_eq!(app.stored("local").len(), 3);
}

#[test_log::test(tokio::test)]
async fn list_returns_owner_contacts() {
    let app = TestApp::single_user();
    app.upload("contacts.vcard", fixtures::THREE_CONTACTS).await;

    let body = app
        .get("/api/contacts", None)
        .await
        .assert_status(StatusCode::OK)
        .json();
    let contacts = body.as_array().unwrap();
    assert_eq!(contacts.len(), 3);
    assert_eq!(contacts[0]["full_name"], "John Doe");
    assert_eq!(contacts[0]["import_source"], "vcard");
    assert!(contacts[0]["id"].is_string());
}

#[test_log::test(tokio::test)]
async fn invalid_uploads_are_rejected() {
    let app = TestApp::single_user();

    app.upload("contacts.txt", fixtures::THREE_CONTACTS)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    app.upload("contacts.vcf", "hello")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    app.upload("contacts.vcf", "")
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    assert!(app.stored("local").is_empty());
}

#[test_log::test(tokio::test)]
async fn proxy_owner_isolation() {
    let app = TestApp::new(AuthMethod::Proxy);

    app.upload_as("contacts.vcf", fixtures::THREE_CONTACTS, None)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    app.upload_as("contacts.vcf", fixtures::THREE_CONTACTS, Some("alice"))
        .await
        .assert_status(StatusCode::CREATED);

    let bob = app
        .get("/api/contacts", Some("bob"))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(bob.as_array().map(Vec::len), Some(0));
    assert_eq!(app.stored("alice").len(), 3);
}
