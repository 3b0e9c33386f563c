use async_trait::async_trait;
use redis::Client as RedisClient;
use tracing::debug;

use crate::models::resume::ResumeProfile;
use crate::session::{SessionError, SessionId, SessionStore};

const KEY_PREFIX: &str = "jobtrack:session:";

/// Session store backed by Redis, so sessions survive restarts and are shared
/// between instances. Each session is one JSON string with a Redis TTL.
pub struct RedisSessionStore {
    client: RedisClient,
    ttl_secs: u64,
}

impl RedisSessionStore {
    pub fn new(client: RedisClient, ttl_secs: u64) -> Self {
        Self {
            client,
            ttl_secs: ttl_secs.max(1),
        }
    }
}

fn session_key(id: SessionId) -> String {
    format!("{KEY_PREFIX}{id}")
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn load_resume(&self, id: SessionId) -> Result<Option<ResumeProfile>, SessionError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let payload: Option<String> = redis::cmd("GET")
            .arg(session_key(id))
            .query_async(&mut conn)
            .await?;

        match payload {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn store_resume(
        &self,
        id: SessionId,
        profile: &ResumeProfile,
    ) -> Result<(), SessionError> {
        let payload = serde_json::to_string(profile)?;
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        redis::cmd("SET")
            .arg(session_key(id))
            .arg(payload)
            .arg("EX")
            .arg(self.ttl_secs)
            .query_async::<_, ()>(&mut conn)
            .await?;
        debug!("Stored resume for session {id} (ttl {}s)", self.ttl_secs);
        Ok(())
    }

    async fn clear(&self, id: SessionId) -> Result<(), SessionError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        redis::cmd("DEL")
            .arg(session_key(id))
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_key_is_namespaced() {
        let id = SessionId::generate();
        let key = session_key(id);
        assert!(key.starts_with(KEY_PREFIX));
        assert!(key.ends_with(&id.to_string()));
    }

    #[test]
    fn test_ttl_never_zero() {
        let client = RedisClient::open("redis://127.0.0.1/").unwrap();
        let store = RedisSessionStore::new(client, 0);
        assert_eq!(store.ttl_secs, 1);
        assert_eq!(store.backend(), "redis");
    }
}
