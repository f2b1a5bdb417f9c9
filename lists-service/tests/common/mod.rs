use std::sync::Arc;

use auth::Authenticator;
use auth::JwtHandler;
use auth::ManualClock;
use auth::PasswordHasher;
use chrono::Utc;
use lists_service::domain::auth::service::AuthService;
use lists_service::domain::list::service::ListsService;
use lists_service::domain::repository::DocumentStore;
use lists_service::domain::user::service::UsersService;
use lists_service::inbound::http::router::create_router;
use lists_service::store::MemoryDocumentStore;
use serde_json::json;
use serde_json::Value;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const ADMIN_USER_NAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin-password";

/// Test application that spawns a real server on an in-memory store
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
    pub clock: Arc<ManualClock>,
}

/// Access and refresh token returned by the login endpoint
pub struct Tokens {
    pub token: String,
    pub refresh_token: String,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let authenticator = Authenticator::new(JWT_SECRET).with_clock(clock.clone());

        let users = UsersService::new(Arc::clone(&store), PasswordHasher::new(1));
        let lists = ListsService::new(Arc::clone(&store));
        let auth = AuthService::new(Arc::new(authenticator), users.clone());

        users
            .ensure_admin(ADMIN_USER_NAME, ADMIN_PASSWORD)
            .await
            .expect("Failed to create admin user");

        let router = create_router(users, lists, auth);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(JWT_SECRET),
            clock,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Log in and return the token pair, panicking on failure
    pub async fn login(&self, user_name: &str, password: &str) -> Tokens {
        let response = self
            .post("/auth/token")
            .json(&json!({ "userName": user_name, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: Value = response.json().await.expect("Failed to parse response");
        Tokens {
            token: body["token"].as_str().unwrap().to_string(),
            refresh_token: body["refreshToken"].as_str().unwrap().to_string(),
        }
    }

    pub async fn login_admin(&self) -> Tokens {
        self.login(ADMIN_USER_NAME, ADMIN_PASSWORD).await
    }

    /// Register a user through the admin endpoint and return its id
    pub async fn create_user(&self, user_name: &str, password: &str, is_admin: bool) -> String {
        let admin = self.login_admin().await;
        let response = self
            .post_authenticated("/users", &admin.token)
            .json(&json!({
                "userName": user_name,
                "newPassword": password,
                "confirmNewPassword": password,
                "isAdmin": is_admin
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        response.json().await.expect("Failed to parse response")
    }
}
