//! UI sessions: the extracted texts and the latest generated questions for
//! one browser interaction, held in process memory only.
//!
//! Idle sessions are purged lazily on every store access.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;
use uuid::Uuid;

use crate::generation::download::download_filename;
use crate::generation::generator::GeneratedQuestions;

pub mod handlers;

#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub candidate_name: String,
    pub job_description: String,
    pub resume_text: String,
    pub questions: Option<GeneratedQuestions>,
    pub created_at: DateTime<Utc>,
    pub generated_at: Option<DateTime<Utc>>,
    last_seen: Instant,
}

/// JSON view of a session returned by the API.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub candidate_name: String,
    pub job_description_text: String,
    pub resume_text: String,
    pub questions: Option<GeneratedQuestions>,
    pub questions_text: Option<String>,
    pub download_filename: String,
    pub created_at: DateTime<Utc>,
    pub generated_at: Option<DateTime<Utc>>,
}

impl From<&Session> for SessionView {
    fn from(session: &Session) -> Self {
        SessionView {
            session_id: session.id,
            candidate_name: session.candidate_name.clone(),
            job_description_text: session.job_description.clone(),
            resume_text: session.resume_text.clone(),
            questions: session.questions.clone(),
            questions_text: session.questions.as_ref().map(GeneratedQuestions::render),
            download_filename: download_filename(&session.candidate_name),
            created_at: session.created_at,
            generated_at: session.generated_at,
        }
    }
}

#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub async fn create(
        &self,
        candidate_name: String,
        job_description: String,
        resume_text: String,
    ) -> Session {
        let session = Session {
            id: Uuid::new_v4(),
            candidate_name,
            job_description,
            resume_text,
            questions: None,
            created_at: Utc::now(),
            generated_at: None,
            last_seen: Instant::now(),
        };

        let mut sessions = self.sessions.write().await;
        self.purge_expired(&mut sessions);
        sessions.insert(session.id, session.clone());
        session
    }

    /// Returns a snapshot of the session and marks it as recently used.
    pub async fn get(&self, id: Uuid) -> Option<Session> {
        let mut sessions = self.sessions.write().await;
        self.purge_expired(&mut sessions);
        sessions.get_mut(&id).map(|session| {
            session.last_seen = Instant::now();
            session.clone()
        })
    }

    /// Replaces the session's questions. Returns `None` if the session is gone.
    pub async fn store_questions(&self, id: Uuid, questions: GeneratedQuestions) -> Option<Session> {
        let mut sessions = self.sessions.write().await;
        self.purge_expired(&mut sessions);
        sessions.get_mut(&id).map(|session| {
            session.questions = Some(questions);
            session.generated_at = Some(Utc::now());
            session.last_seen = Instant::now();
            session.clone()
        })
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        let mut sessions = self.sessions.write().await;
        self.purge_expired(&mut sessions);
        sessions.remove(&id).is_some()
    }

    pub async fn active_count(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        self.purge_expired(&mut sessions);
        sessions.len()
    }

    fn purge_expired(&self, sessions: &mut HashMap<Uuid, Session>) {
        let before = sessions.len();
        sessions.retain(|_, s| s.last_seen.elapsed() < self.ttl);
        let purged = before - sessions.len();
        if purged > 0 {
            debug!("Purged {purged} idle session(s)");
        }
    }
}
