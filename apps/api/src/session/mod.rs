//! Transient per-browser sessions holding the most recently uploaded resume.
//!
//! A random id travels in a cookie; the profile itself stays server-side in a
//! pluggable `SessionStore` (process memory by default, Redis when configured).

use std::fmt;

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, HeaderValue},
};
use thiserror::Error;
use uuid::Uuid;

use crate::models::resume::ResumeProfile;

pub mod memory;
pub mod redis_store;

pub use memory::MemorySessionStore;
pub use redis_store::RedisSessionStore;

pub const SESSION_COOKIE: &str = "jobtrack_session";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("redis: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("corrupt session payload: {0}")]
    Payload(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn generate() -> Self {
        SessionId(Uuid::new_v4())
    }

    /// Reads the session id from the request's `Cookie` headers, if present and well-formed.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == SESSION_COOKIE)
            .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
            .map(SessionId)
    }

    /// `Set-Cookie` value binding this id to the browser.
    pub fn set_cookie_header(&self, max_age_secs: u64) -> HeaderValue {
        let cookie = format!(
            "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}",
            self.0
        );
        // Built only from a UUID and ASCII literals.
        HeaderValue::from_str(&cookie).unwrap_or_else(|_| HeaderValue::from_static(""))
    }

    /// `Set-Cookie` value that removes the cookie.
    pub fn expired_cookie_header() -> HeaderValue {
        HeaderValue::from_static("jobtrack_session=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The caller's session as seen by a handler.
///
/// `is_new` is set when the request carried no usable cookie, in which case
/// nothing is stored under `id` yet.
#[derive(Debug, Clone, Copy)]
pub struct Session {
    pub id: SessionId,
    pub is_new: bool,
}

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(match SessionId::from_headers(&parts.headers) {
            Some(id) => Session { id, is_new: false },
            None => Session {
                id: SessionId::generate(),
                is_new: true,
            },
        })
    }
}

/// Session backend trait. Implement this to move session data elsewhere
/// without touching the handlers.
///
/// Carried in `AppState` as `Arc<dyn SessionStore>`.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load_resume(&self, id: SessionId) -> Result<Option<ResumeProfile>, SessionError>;

    /// Overwrites any resume already held for `id` and restarts its expiry.
    async fn store_resume(&self, id: SessionId, profile: &ResumeProfile)
        -> Result<(), SessionError>;

    async fn clear(&self, id: SessionId) -> Result<(), SessionError>;

    /// Backend label for startup logs.
    fn backend(&self) -> &'static str;
}
