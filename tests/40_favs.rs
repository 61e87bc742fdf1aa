mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::id_of;

#[tokio::test]
async fn owner_manages_favs_in_own_list() -> Result<()> {
    let app = common::spawn_app().await?;
    let token = app.signup("a@x.com", "pw").await?;
    let list_id = id_of(&app.create_list(&token, "Trip").await?);

    let fav = app.create_fav(&token, list_id, "u1").await?;
    assert_eq!(fav["listId"], list_id);
    let path = format!("/favs/{}/{}", list_id, id_of(&fav));

    let fetched = common::body(app.get(&path, &token).send().await?).await?;
    assert_eq!(fetched, fav);

    let res = app.patch(&path, &token).json(&json!({ "url": "u2" })).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(common::body(res).await?["url"], "u2");

    let res = app.delete(&path, &token).send().await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let favs = common::body(app.get(&format!("/favs/{}", list_id), &token).send().await?).await?;
    assert_eq!(favs, json!([]));
    Ok(())
}

#[tokio::test]
async fn cannot_add_fav_to_foreign_list() -> Result<()> {
    let app = common::spawn_app().await?;
    let alice = app.signup("a@x.com", "pw").await?;
    let bob = app.signup("b@x.com", "pw").await?;
    let list_id = id_of(&app.create_list(&alice, "Trip").await?);

    let res = app
        .post(&format!("/favs/{}", list_id), &bob)
        .json(&json!({ "url": "spam" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = app
        .post("/favs/999", &alice)
        .json(&json!({ "url": "u1" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let favs = common::body(app.get(&format!("/favs/{}", list_id), &alice).send().await?).await?;
    assert_eq!(favs, json!([]));
    Ok(())
}

#[tokio::test]
async fn matching_ids_do_not_grant_access_to_foreign_favs() -> Result<()> {
    let app = common::spawn_app().await?;
    let alice = app.signup("a@x.com", "pw").await?;
    let bob = app.signup("b@x.com", "pw").await?;
    let list_id = id_of(&app.create_list(&alice, "Trip").await?);
    let fav = app.create_fav(&alice, list_id, "u1").await?;
    let path = format!("/favs/{}/{}", list_id, id_of(&fav));

    // Bob knows a valid listId/favId pair but does not own the list
    let res = app.patch(&path, &bob).json(&json!({ "url": "hijack" })).send().await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = app.delete(&path, &bob).send().await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = app.get(&path, &bob).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(common::body(res).await?, Value::Null);

    let favs = common::body(app.get(&format!("/favs/{}", list_id), &bob).send().await?).await?;
    assert_eq!(favs, json!([]));

    let fetched = common::body(app.get(&path, &alice).send().await?).await?;
    assert_eq!(fetched["url"], "u1");
    Ok(())
}

#[tokio::test]
async fn fav_path_must_name_its_parent_list() -> Result<()> {
    let app = common::spawn_app().await?;
    let token = app.signup("a@x.com", "pw").await?;
    let trip = id_of(&app.create_list(&token, "Trip").await?);
    let books = id_of(&app.create_list(&token, "Books").await?);
    let fav = app.create_fav(&token, trip, "u1").await?;

    let wrong = format!("/favs/{}/{}", books, id_of(&fav));
    let res = app.patch(&wrong, &token).json(&json!({ "url": "u2" })).send().await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = app.get(&wrong, &token).send().await?;
    assert_eq!(common::body(res).await?, Value::Null);

    let res = app.delete(&format!("/favs/{}/999", trip), &token).send().await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn fav_inputs_are_validated() -> Result<()> {
    let app = common::spawn_app().await?;
    let token = app.signup("a@x.com", "pw").await?;
    let list_id = id_of(&app.create_list(&token, "Trip").await?);

    let res = app.post(&format!("/favs/{}", list_id), &token).json(&json!({})).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert!(body["field_errors"]["url"].is_string());

    let res = app.get("/favs/x/1", &token).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert!(body["field_errors"]["listId"].is_string());
    Ok(())
}
