#![allow(dead_code)]

use anyhow::{Context, Result};
use reqwest::{Response, StatusCode};
use serde_json::{json, Value};

use favlist_api::{app, config::AppConfig, AppState};

pub struct TestApp {
    pub base_url: String,
    pub client: reqwest::Client,
}

/// Serve a fresh in-memory instance on an ephemeral port.
///
/// Every test gets its own store, so ids and emails never collide across tests.
pub async fn spawn_app() -> Result<TestApp> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .context("failed to bind test listener")?;
    let addr = listener.local_addr()?;

    let state = AppState::in_memory(AppConfig::development());
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app(state)).await {
            eprintln!("test server exited: {}", e);
        }
    });

    Ok(TestApp {
        base_url: format!("http://{}", addr),
        client: reqwest::Client::new(),
    })
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn get(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.client.get(self.url(path)).bearer_auth(token)
    }

    pub fn post(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.client.post(self.url(path)).bearer_auth(token)
    }

    pub fn patch(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.client.patch(self.url(path)).bearer_auth(token)
    }

    pub fn delete(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.client.delete(self.url(path)).bearer_auth(token)
    }

    /// Register a user and return the bearer token.
    pub async fn signup(&self, email: &str, password: &str) -> Result<String> {
        let res = self
            .client
            .post(self.url("/auth/signup"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "signup failed: {}", res.status());
        token_from(res).await
    }

    pub async fn create_list(&self, token: &str, name: &str) -> Result<Value> {
        let res = self.post("/list", token).json(&json!({ "name": name })).send().await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "create list failed: {}", res.status());
        body(res).await
    }

    pub async fn create_fav(&self, token: &str, list_id: i64, url: &str) -> Result<Value> {
        let res = self
            .post(&format!("/favs/{}", list_id), token)
            .json(&json!({ "url": url }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "create fav failed: {}", res.status());
        body(res).await
    }
}

/// JSON body of a successful response; the resource itself, an array or `null`.
pub async fn body(res: Response) -> Result<Value> {
    anyhow::ensure!(res.status().is_success(), "unexpected status: {}", res.status());
    Ok(res.json::<Value>().await?)
}

pub async fn token_from(res: Response) -> Result<String> {
    let body = body(res).await?;
    body["access_token"]
        .as_str()
        .map(str::to_string)
        .context("response carried no access_token")
}

pub fn id_of(record: &Value) -> i64 {
    record["id"].as_i64().expect("record without numeric id")
}
