#![expect(clippy::expect_used, reason = "test setup failures are fatal")]
//! Test helpers for integration tests.
//!
//! Builds the full router the binary serves, backed by a fresh in-memory
//! store per test, and wraps `TestClient` for the requests the tests make.

use std::sync::Arc;

use salvo::http::StatusCode;
use salvo::prelude::*;
use salvo::test::{ResponseExt, TestClient};

use rehber_test::component::config::*;
use rehber_test::component::store::{ContactStoreHandler, InMemoryContactStore};

pub use rehber_test::component::config::AuthMethod;
pub use rehber_test::component::store::ContactStore;
pub use rehber_test::component::types::OwnerRef;
pub use rehber_test::fixtures;

const BASE_URL: &str = "http://127.0.0.1:5800";
const BOUNDARY: &str = "rehber-integration-boundary";

/// Test configuration - static struct instead of loading from file.
#[must_use]
pub fn test_config(method: AuthMethod) -> Settings {
    Settings {
        auth: AuthConfig {
            method,
            proxy: Some(ProxyAuthConfig {
                header: "X-Remote-User".to_string(),
            }),
            single_user: Some(SingleUserAuthConfig {
                owner: "local".to_string(),
            }),
        },
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 5800,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
        },
        import: ImportConfig::default(),
    }
}

/// A service plus the store behind it.
pub struct TestApp {
    pub service: Service,
    pub store: Arc<InMemoryContactStore>,
}

impl TestApp {
    /// Creates the full API router (matching main.rs setup).
    #[must_use]
    pub fn new(method: AuthMethod) -> Self {
        let store = Arc::new(InMemoryContactStore::new(2));
        let router = Router::new()
            .hoop(ConfigHandler {
                settings: test_config(method),
            })
            .hoop(ContactStoreHandler {
                store: Arc::clone(&store) as Arc<dyn ContactStore>,
            })
            .push(rehber_test::app::api::routes().expect("API routes should be valid"));

        Self {
            service: Service::new(router),
            store,
        }
    }

    #[must_use]
    pub fn single_user() -> Self {
        Self::new(AuthMethod::SingleUser)
    }

    /// Posts `content` as the multipart `file` field named `filename`.
    pub async fn upload(&self, filename: &str, content: &str) -> TestResponse {
        self.upload_as(filename, content, None).await
    }

    /// Like [`Self::upload`], with an optional proxy user header.
    pub async fn upload_as(
        &self,
        filename: &str,
        content: &str,
        remote_user: Option<&str>,
    ) -> TestResponse {
        let body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
             Content-Type: text/vcard\r\n\
             \r\n\
             {content}\r\n\
             --{BOUNDARY}--\r\n"
        );

        let mut client = TestClient::post(format!("{BASE_URL}/api/contacts/import"))
            .add_header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
                true,
            )
            .body(body);
        if let Some(user) = remote_user {
            client = client.add_header("x-remote-user", user, true);
        }

        TestResponse::read(client.send(&self.service).await).await
    }

    /// Sends a GET to `path` under the base URL.
    pub async fn get(&self, path: &str, remote_user: Option<&str>) -> TestResponse {
        let mut client = TestClient::get(format!("{BASE_URL}{path}"));
        if let Some(user) = remote_user {
            client = client.add_header("x-remote-user", user, true);
        }
        TestResponse::read(client.send(&self.service).await).await
    }

    /// Stored contacts of `owner`.
    #[must_use]
    pub fn stored(&self, owner: &str) -> Vec<rehber_test::component::store::StoredContact> {
        let owner = OwnerRef::new(owner).expect("owner should be valid");
        self.store.list(&owner).expect("store should be readable")
    }
}

/// Represents an HTTP test response for assertions.
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl TestResponse {
    async fn read(mut response: salvo::Response) -> Self {
        let status = response
            .status_code
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = response.take_bytes(None).await.unwrap_or_default().to_vec();
        Self { status, body }
    }

    /// Asserts that the response status matches the expected code.
    #[must_use]
    pub fn assert_status(self, expected: StatusCode) -> Self {
        assert_eq!(
            self.status,
            expected,
            "Expected status {expected} but got {}: {}",
            self.status,
            self.body_string()
        );
        self
    }

    /// Gets the response body as a string.
    #[must_use]
    pub fn body_string(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Parses the body as JSON.
    #[must_use]
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("body should be JSON")
    }
}
