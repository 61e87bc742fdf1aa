mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn me_returns_profile_without_hash() -> Result<()> {
    let app = common::spawn_app().await?;
    let token = app.signup("a@x.com", "pw").await?;

    let res = app.get("/users/me", &token).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let me = common::body(res).await?;

    assert_eq!(me["email"], "a@x.com");
    assert!(me.get("hash").is_none());
    assert!(me["createdAt"].is_string());
    Ok(())
}

#[tokio::test]
async fn edit_updates_only_given_fields() -> Result<()> {
    let app = common::spawn_app().await?;
    let token = app.signup("a@x.com", "pw").await?;

    let res = app
        .patch("/users", &token)
        .json(&json!({ "firstName": "Ada" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let user = common::body(res).await?;
    assert_eq!(user["firstName"], "Ada");
    assert_eq!(user["email"], "a@x.com");

    let res = app
        .patch("/users", &token)
        .json(&json!({ "email": "ada@x.com" }))
        .send()
        .await?;
    let user = common::body(res).await?;
    assert_eq!(user["email"], "ada@x.com");
    assert_eq!(user["firstName"], "Ada");
    Ok(())
}

#[tokio::test]
async fn edit_rejects_taken_or_malformed_email() -> Result<()> {
    let app = common::spawn_app().await?;
    app.signup("a@x.com", "pw").await?;
    let token = app.signup("b@x.com", "pw").await?;

    let res = app
        .patch("/users", &token)
        .json(&json!({ "email": "a@x.com" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "Credentials taken");

    let res = app
        .patch("/users", &token)
        .json(&json!({ "email": "broken" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}
