#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use contact_keeper::app::{app, AppState};
use contact_keeper::auth::JwtAuth;
use contact_keeper::config::AppConfig;
use contact_keeper::database::MemoryContactStore;
use serde_json::Value;
use tokio::net::TcpListener;
use uuid::Uuid;

/// Router served in-process on an ephemeral port, backed by a fresh memory store
pub struct TestServer {
    pub base_url: String,
    pub store: Arc<MemoryContactStore>,
    auth: JwtAuth,
    client: reqwest::Client,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn token_for(&self, user_id: Uuid) -> String {
        self.auth.generate_jwt(user_id).expect("sign test token")
    }

    /// Client preset with `x-auth-token` for a user
    pub fn as_user(&self, user_id: Uuid) -> UserClient {
        UserClient {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            token: self.token_for(user_id),
        }
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }
}

pub async fn spawn_server() -> Result<TestServer> {
    let config = AppConfig::development();
    let store = Arc::new(MemoryContactStore::new());
    let auth = JwtAuth::from_config(&config.security)?;
    let state = AppState::new(store.clone(), auth.clone());

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .context("failed to bind test listener")?;
    let addr = listener.local_addr()?;
    let router = app(state, &config);

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("test server");
    });

    Ok(TestServer {
        base_url: format!("http://{}", addr),
        store,
        auth,
        client: reqwest::Client::new(),
    })
}

pub struct UserClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl UserClient {
    pub async fn list(&self) -> Result<(reqwest::StatusCode, Value)> {
        let res = self
            .client
            .get(format!("{}/api/contacts", self.base_url))
            .header("x-auth-token", &self.token)
            .send()
            .await?;
        Ok((res.status(), res.json().await?))
    }

    pub async fn create(&self, body: Value) -> Result<(reqwest::StatusCode, Value)> {
        let res = self
            .client
            .post(format!("{}/api/contacts", self.base_url))
            .header("x-auth-token", &self.token)
            .json(&body)
            .send()
            .await?;
        Ok((res.status(), res.json().await?))
    }

    pub async fn update(&self, id: &str, body: Value) -> Result<(reqwest::StatusCode, Value)> {
        let res = self
            .client
            .put(format!("{}/api/contacts/{}", self.base_url, id))
            .header("x-auth-token", &self.token)
            .json(&body)
            .send()
            .await?;
        Ok((res.status(), res.json().await?))
    }

    pub async fn delete(&self, id: &str) -> Result<(reqwest::StatusCode, Value)> {
        let res = self
            .client
            .delete(format!("{}/api/contacts/{}", self.base_url, id))
            .header("x-auth-token", &self.token)
            .send()
            .await?;
        Ok((res.status(), res.json().await?))
    }
}
