#![allow(dead_code)]

use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use indicator_updates::{
    config::AppConfig,
    middleware::BasicCredentials,
    services::registry::today,
    services::store::{IndicatorStore, PgIndicatorStore, StoreError},
};
use sqlx::PgPool;
use time::Date;
use tokio::net::TcpListener;

pub const TEST_USERNAME: &str = "test-editor";
pub const TEST_PASSWORD: &str = "test-password";
pub const INDICATORS_PATH: &str = "/tracking-progress/v1/indicators";

pub fn init_tracing_once() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("indicator_updates=debug")
            .with_test_writer()
            .try_init();
    });
}

/// An in-memory store holding `(indicator, updated)` rows, used to drive the
/// HTTP surface without a database.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<(String, Date)>>,
    failing: Mutex<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a row with an explicit date, bypassing the API
    pub fn seed(&self, indicator: &str, updated: Date) {
        self.rows
            .lock()
            .unwrap()
            .push((indicator.to_string(), updated));
    }

    /// Number of rows carrying `indicator`, regardless of date
    pub fn count(&self, indicator: &str) -> usize {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|(n, _)| n == indicator)
            .count()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    /// Makes every subsequent call fail as if the database were unreachable
    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }

    fn check(&self) -> Result<(), StoreError> {
        if *self.failing.lock().unwrap() {
            Err(StoreError::Backend("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl IndicatorStore for MemoryStore {
    async fn updated_since(&self, cutoff: Date) -> Result<Vec<String>, StoreError> {
        self.check()?;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, updated)| *updated >= cutoff)
            .map(|(n, _)| n.clone())
            .collect())
    }

    async fn insert(&self, indicator: &str) -> Result<u64, StoreError> {
        self.check()?;
        self.seed(indicator, today());
        Ok(1)
    }

    async fn delete(&self, indicator: &str) -> Result<u64, StoreError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|(n, _)| n != indicator);
        Ok((before - rows.len()) as u64)
    }
}

pub fn test_config() -> AppConfig {
    AppConfig::new(
        "postgres://unused".to_string(),
        BasicCredentials::new(TEST_USERNAME.to_string(), TEST_PASSWORD.to_string()),
    )
}

/// Spawns the application over `store` and returns its address.
///
/// Returned address format: `http://127.0.0.1:8492`
pub async fn spawn_app_with_store(store: Arc<dyn IndicatorStore>) -> String {
    init_tracing_once();

    // Randomly choose an available port
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port at localhost");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        let app = indicator_updates::app(test_config(), store);
        axum::serve(listener, app).await.unwrap();
    });

    let address = format!("http://127.0.0.1:{port}");

    // Wait for server to be ready
    let client = reqwest::Client::new();
    for _ in 0..10 {
        if client
            .get(format!("{address}/health-check"))
            .send()
            .await
            .is_ok()
        {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    }

    address
}

/// Spawns the application over a fresh in-memory store.
pub async fn spawn_memory_app() -> (String, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let address = spawn_app_with_store(Arc::clone(&store) as Arc<dyn IndicatorStore>).await;
    (address, store)
}

/// Spawns the application over the Postgres test database.
pub async fn spawn_app(test_db_pool: PgPool) -> String {
    spawn_app_with_store(Arc::new(PgIndicatorStore::new(test_db_pool))).await
}

/// `Authorization` header value for the given credentials
pub fn basic_auth_header(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}

/// `Authorization` header value for the credentials the test app expects
pub fn valid_auth_header() -> String {
    basic_auth_header(TEST_USERNAME, TEST_PASSWORD)
}

pub async fn get_indicators(client: &reqwest::Client, address: &str) -> Vec<String> {
    let response = client
        .get(format!("{address}{INDICATORS_PATH}"))
        .send()
        .await
        .expect("Failed to list indicators");
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    response.json().await.expect("Failed to parse response")
}

pub async fn post_indicator(
    client: &reqwest::Client,
    address: &str,
    name: &str,
) -> reqwest::Response {
    client
        .post(format!("{address}{INDICATORS_PATH}"))
        .header("Authorization", valid_auth_header())
        .json(&serde_json::json!({ "name": name }))
        .send()
        .await
        .expect("Failed to add indicator")
}

pub async fn delete_indicator(
    client: &reqwest::Client,
    address: &str,
    name: &str,
) -> reqwest::Response {
    client
        .delete(format!("{address}{INDICATORS_PATH}"))
        .header("Authorization", valid_auth_header())
        .json(&serde_json::json!({ "name": name }))
        .send()
        .await
        .expect("Failed to delete indicator")
}

/// Sorted copy, since the listing order carries no meaning
pub fn sorted(mut names: Vec<String>) -> Vec<String> {
    names.sort();
    names
}
