#![allow(dead_code)]

use async_trait::async_trait;
use axum::http::HeaderValue;
use axum_test::{TestResponse, TestServer};
use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use shortlink::application::services::{AuthService, LinkService, SessionAuthenticator};
use shortlink::domain::clock::FixedClock;
use shortlink::domain::entities::{Account, Link, NewAccount, NewLink, NewSession, Session};
use shortlink::domain::repositories::{AccountRepository, LinkRepository, SessionRepository};
use shortlink::error::AppError;
use shortlink::state::{AppState, HttpSettings};
use shortlink::utils::password::{HashParams, PasswordHasher};

pub const BASE_URL: &str = "https://sho.rt";

/// In-memory stand-in for the three PostgreSQL repositories.
///
/// Each operation holds one lock for its whole duration, which gives
/// registration the same all-or-nothing behaviour as the transaction.
#[derive(Default)]
pub struct MemoryStore {
    accounts: Mutex<Vec<Account>>,
    sessions: Mutex<HashMap<String, Session>>,
    links: Mutex<HashMap<String, Link>>,
}

impl MemoryStore {
    pub fn session_count(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    pub fn stored_session_ids(&self) -> Vec<String> {
        self.sessions.lock().unwrap().keys().cloned().collect()
    }

    pub fn insert_link(&self, code: &str, long_url: &str, expires_at: Option<DateTime<Utc>>) {
        self.links.lock().unwrap().insert(
            code.to_string(),
            Link::new(
                code.to_string(),
                long_url.to_string(),
                None,
                expires_at,
                Utc::now(),
            ),
        );
    }
}

#[async_trait]
impl AccountRepository for MemoryStore {
    async fn create_with_session(
        &self,
        account: NewAccount,
        session: NewSession,
    ) -> Result<Account, AppError> {
        let mut accounts = self.accounts.lock().unwrap();

        if accounts
            .iter()
            .any(|a| a.username.to_lowercase() == account.username.to_lowercase())
        {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "users_username_lower_key" }),
            ));
        }

        let created = Account::new(
            accounts.len() as i64 + 1,
            account.name,
            account.username,
            account.password_hash,
            Utc::now(),
        );
        accounts.push(created.clone());

        self.sessions.lock().unwrap().insert(
            session.token_hash.clone(),
            Session {
                token_hash: session.token_hash,
                user_id: created.id,
                expires_at: session.expires_at,
            },
        );

        Ok(created)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AppError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.username.to_lowercase() == username.to_lowercase())
            .cloned())
    }

    async fn update_password_hash(&self, id: i64, password_hash: &str) -> Result<(), AppError> {
        let mut accounts = self.accounts.lock().unwrap();
        match accounts.iter_mut().find(|a| a.id == id) {
            Some(account) => {
                account.password_hash = password_hash.to_string();
                Ok(())
            }
            None => Err(AppError::not_found("Account not found", json!({}))),
        }
    }

    async fn list(&self) -> Result<Vec<Account>, AppError> {
        Ok(self.accounts.lock().unwrap().clone())
    }

    async fn check_connection(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[async_trait]
impl SessionRepository for MemoryStore {
    async fn create(&self, user_id: i64, session: NewSession) -> Result<Session, AppError> {
        let mut sessions = self.sessions.lock().unwrap();
        if sessions.contains_key(&session.token_hash) {
            return Err(AppError::conflict("Unique constraint violation", json!({})));
        }

        let stored = Session {
            token_hash: session.token_hash,
            user_id,
            expires_at: session.expires_at,
        };
        sessions.insert(stored.token_hash.clone(), stored.clone());

        Ok(stored)
    }

    async fn find_active(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Session>, AppError> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .get(token_hash)
            .filter(|s| s.expires_at > now)
            .cloned())
    }

    async fn delete(&self, token_hash: &str) -> Result<bool, AppError> {
        Ok(self.sessions.lock().unwrap().remove(token_hash).is_some())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|_, s| s.expires_at > now);
        Ok((before - sessions.len()) as u64)
    }

    async fn delete_for_user(&self, user_id: i64) -> Result<u64, AppError> {
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|_, s| s.user_id != user_id);
        Ok((before - sessions.len()) as u64)
    }
}

#[async_trait]
impl LinkRepository for MemoryStore {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut links = self.links.lock().unwrap();
        if links.contains_key(&new_link.code) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "urls_pkey" }),
            ));
        }

        let link = Link::new(
            new_link.code,
            new_link.long_url,
            new_link.user_id,
            new_link.expires_at,
            Utc::now(),
        );
        links.insert(link.code.clone(), link.clone());

        Ok(link)
    }

    async fn find_active_by_code(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Link>, AppError> {
        Ok(self
            .links
            .lock()
            .unwrap()
            .get(code)
            .filter(|l| !l.is_expired_at(now))
            .cloned())
    }
}

/// Router plus handles to its store and clock.
pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<MemoryStore>,
    pub clock: Arc<FixedClock>,
}

/// Argon2id with tiny costs so tests stay fast.
pub fn fast_hasher() -> PasswordHasher {
    PasswordHasher::new(HashParams {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
        salt_length: 16,
        key_length: 32,
    })
}

pub fn create_test_state(store: Arc<MemoryStore>, clock: Arc<FixedClock>) -> AppState {
    let settings = HttpSettings::default();

    let auth_service = AuthService::new(
        store.clone(),
        store.clone(),
        fast_hasher(),
        clock.clone(),
        settings.session_ttl,
    );
    let authenticator = SessionAuthenticator::new(store.clone(), clock.clone());
    let link_service = LinkService::new(store, clock, BASE_URL);

    AppState::new(
        Arc::new(auth_service),
        Arc::new(link_service),
        Arc::new(authenticator),
        settings,
    )
}

pub fn create_test_app() -> TestApp {
    let store = Arc::new(MemoryStore::default());
    let clock = Arc::new(FixedClock::new(Utc::now()));
    let state = create_test_state(store.clone(), clock.clone());

    let server = TestServer::new(shortlink::routes::router(state)).unwrap();

    TestApp {
        server,
        store,
        clock,
    }
}

impl TestApp {
    /// Registers an account and returns its session token.
    pub async fn register(&self, username: &str, password: &str) -> String {
        let response = self
            .server
            .post("/api/auth/register")
            .json(&json!({
                "name": "Test User",
                "username": username,
                "password": password,
            }))
            .await;

        response.assert_status(axum::http::StatusCode::CREATED);
        session_token(&response)
    }

    pub fn advance(&self, by: Duration) {
        self.clock.advance(by);
    }
}

/// Extracts the session token from a response's `Set-Cookie` header.
pub fn session_token(response: &TestResponse) -> String {
    let header = response.header("set-cookie");
    let cookie = header.to_str().unwrap();

    cookie
        .split(';')
        .next()
        .and_then(|pair| pair.strip_prefix("session_id="))
        .unwrap()
        .to_string()
}

pub fn cookie(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("session_id={token}")).unwrap()
}
