//! Session state kept across reconnects

use crate::protocol::{ReadyPayload, ResumePayload};

/// What the client remembers about its gateway session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    session_id: Option<String>,
    resume_url: Option<String>,
    sequence: Option<u64>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the identifiers from READY
    pub fn ready(&mut self, ready: ReadyPayload) {
        self.session_id = Some(ready.session_id);
        self.resume_url = ready.resume_gateway_url;
    }

    /// Track the latest dispatch sequence number
    pub fn observe_sequence(&mut self, sequence: Option<u64>) {
        if let Some(s) = sequence {
            self.sequence = Some(self.sequence.map_or(s, |current| current.max(s)));
        }
    }

    pub fn sequence(&self) -> Option<u64> {
        self.sequence
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// Forget the session so the next connection identifies afresh
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Resume payload, if there is a session to resume
    pub fn resume_payload(&self, token: &str) -> Option<ResumePayload> {
        let session_id = self.session_id.clone()?;
        Some(ResumePayload {
            token: token.to_string(),
            session_id,
            seq: self.sequence.unwrap_or(0),
        })
    }

    /// URL for the next connection: the resume URL while a session is held
    ///
    /// The query string of `default_url` (version and encoding) is carried over.
    pub fn connect_url(&self, default_url: &str) -> String {
        match (&self.session_id, &self.resume_url) {
            (Some(_), Some(resume)) => {
                let query = default_url.split_once('?').map(|(_, q)| q);
                let base = resume.trim_end_matches('/');
                match query {
                    Some(q) => format!("{base}/?{q}"),
                    None => base.to_string(),
                }
            }
            _ => default_url.to_string(),
        }
    }
}
