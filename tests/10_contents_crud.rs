mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::TestServer;

#[tokio::test]
async fn create_backfills_missing_locales() -> Result<()> {
    let server = TestServer::spawn().await?;

    let created = server
        .create(json!({ "title": { "en": "Water tariffs" }, "body": { "en": "Domestic 1000/unit" } }))
        .await?;

    assert_eq!(created["type"], "Post", "default type not applied: {}", created);
    assert_eq!(created["title"]["sw"], "Water tariffs");
    assert_eq!(created["body"]["en"], "Domestic 1000/unit");
    assert_eq!(created["body"]["sw"], "Water tariffs", "body.sw should fall back to title.sw: {}", created);
    assert!(created["id"].is_string());
    assert!(created["createdAt"].is_string());
    assert!(created.get("deletedAt").is_none());

    Ok(())
}

#[tokio::test]
async fn explicit_body_locale_is_kept() -> Result<()> {
    let server = TestServer::spawn().await?;

    let created = server
        .create(json!({
            "title": { "en": "Fees", "sw": "Ada" },
            "body": { "en": "Pay monthly", "sw": "Lipa kila mwezi" },
        }))
        .await?;

    assert_eq!(created["body"]["sw"], "Lipa kila mwezi");
    Ok(())
}

#[tokio::test]
async fn create_requires_default_locale_title() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server
        .client
        .post(server.url("/contents"))
        .json(&json!({ "body": { "en": "orphan body" } }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let payload = res.json::<Value>().await?;
    assert_eq!(payload["error"], true);
    assert_eq!(payload["status"], 400);
    assert_eq!(payload["code"], "VALIDATION_ERROR");
    assert!(payload["field_errors"].get("title.en").is_some(), "missing field error: {}", payload);
    Ok(())
}

#[tokio::test]
async fn create_rejects_unknown_type_and_bad_json() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server
        .client
        .post(server.url("/contents"))
        .json(&json!({ "type": "Advert", "title": { "en": "Buy" }, "body": { "en": "now" } }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = server
        .client
        .post(server.url("/contents"))
        .header("content-type", "application/json")
        .body("{ not json")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["code"], "VALIDATION_ERROR");
    Ok(())
}

#[tokio::test]
async fn jurisdiction_is_checked_and_populated() -> Result<()> {
    let server = TestServer::spawn().await?;
    let dsm = server.jurisdiction("DSM", "Dar es Salaam").await;

    let mut body = common::content("How do I pay?");
    body["jurisdiction"] = json!(dsm.id);
    let created = server.create(body.clone()).await?;
    assert_eq!(created["jurisdiction"]["code"], "DSM");
    assert_eq!(created["jurisdiction"]["name"], "Dar es Salaam");

    // A populated record can be sent back unchanged
    let res = server
        .client
        .put(server.url(&format!("/contents/{}", created["id"].as_str().unwrap_or_default())))
        .json(&created)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    body["jurisdiction"] = json!(uuid::Uuid::new_v4());
    body["title"] = json!({ "en": "Another question" });
    let res = server.client.post(server.url("/contents")).json(&body).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn duplicate_natural_key_conflicts() -> Result<()> {
    let server = TestServer::spawn().await?;
    server.create(common::content("Fees")).await?;

    let res = server
        .client
        .post(server.url("/contents"))
        .json(&common::content("Fees"))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert_eq!(res.json::<Value>().await?["code"], "CONFLICT");
    Ok(())
}

#[tokio::test]
async fn get_patch_put_delete_lifecycle() -> Result<()> {
    let server = TestServer::spawn().await?;
    let created = server.create(common::content("Fees")).await?;
    let id = created["id"].as_str().unwrap_or_default().to_string();
    let record_url = server.url(&format!("/contents/{}", id));

    let fetched = server.client.get(&record_url).send().await?.json::<Value>().await?;
    assert_eq!(fetched["id"], created["id"]);

    let patched = server
        .client
        .patch(&record_url)
        .json(&json!({ "title": { "sw": "Ada" } }))
        .send()
        .await?;
    assert_eq!(patched.status(), StatusCode::OK);
    let patched = patched.json::<Value>().await?;
    assert_eq!(patched["title"]["en"], "Fees");
    assert_eq!(patched["title"]["sw"], "Ada");

    let replaced = server
        .client
        .put(&record_url)
        .json(&json!({ "type": "Tariff", "title": { "en": "Tariffs" }, "body": { "en": "Flat rate" } }))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(replaced["id"], created["id"]);
    assert_eq!(replaced["createdAt"], created["createdAt"]);
    assert_eq!(replaced["type"], "Tariff");
    assert_eq!(replaced["title"]["sw"], "Tariffs");

    let deleted = server.client.delete(&record_url).send().await?;
    assert_eq!(deleted.status(), StatusCode::OK);
    assert!(deleted.json::<Value>().await?["deletedAt"].is_string());

    let again = server.client.delete(&record_url).send().await?;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
    let payload = again.json::<Value>().await?;
    assert_eq!(payload["code"], "NOT_FOUND");
    assert_eq!(payload["message"], "Not Found");

    let gone = server.client.get(&record_url).send().await?;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn malformed_and_unknown_ids() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server.client.get(server.url("/contents/not-a-uuid")).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = server
        .client
        .get(server.url(&format!("/contents/{}", uuid::Uuid::new_v4())))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}
