use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use crate::models::resume::ResumeProfile;
use crate::session::{SessionError, SessionId, SessionStore};

/// Upper bound on session lifetime (ten years) so expiry arithmetic cannot overflow.
const MAX_TTL_SECS: u64 = 10 * 365 * 24 * 60 * 60;

struct Entry {
    resume: ResumeProfile,
    expires_at: DateTime<Utc>,
}

/// Process-local session store. Entries expire `ttl` after their last write.
pub struct MemorySessionStore {
    entries: RwLock<HashMap<SessionId, Entry>>,
    ttl: Duration,
}

impl MemorySessionStore {
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl: Duration::seconds(ttl_secs.min(MAX_TTL_SECS) as i64),
        }
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load_resume(&self, id: SessionId) -> Result<Option<ResumeProfile>, SessionError> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(&id)
            .filter(|entry| entry.expires_at > Utc::now())
            .map(|entry| entry.resume.clone()))
    }

    async fn store_resume(
        &self,
        id: SessionId,
        profile: &ResumeProfile,
    ) -> Result<(), SessionError> {
        let now = Utc::now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            id,
            Entry {
                resume: profile.clone(),
                expires_at: now + self.ttl,
            },
        );
        Ok(())
    }

    async fn clear(&self, id: SessionId) -> Result<(), SessionError> {
        self.entries.write().await.remove(&id);
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
