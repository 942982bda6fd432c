//! In-memory transport for development and testing

use super::{SendResult, Transport};
use crate::error::TransportError;
use crate::models::ComposedEmail;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Transport that keeps delivered emails in a shared outbox.
///
/// Clones share the same outbox, so a clone handed to a driver can be
/// inspected from the test that created it.
#[derive(Clone)]
pub struct MemoryTransport {
    outbox: Arc<Mutex<Vec<ComposedEmail>>>,
    failure_message: Option<String>,
}

impl MemoryTransport {
    /// Create a new in-memory transport
    pub fn new() -> Self {
        Self {
            outbox: Arc::new(Mutex::new(Vec::new())),
            failure_message: None,
        }
    }

    /// Create a transport that rejects every delivery
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outbox: Arc::new(Mutex::new(Vec::new())),
            failure_message: Some(message.into()),
        }
    }

    /// Get all delivered emails
    pub async fn sent_emails(&self) -> Vec<ComposedEmail> {
        self.outbox.lock().await.clone()
    }

    /// Get the count of delivered emails
    pub async fn sent_count(&self) -> usize {
        self.outbox.lock().await.len()
    }

    /// Clear the outbox
    pub async fn clear(&self) {
        self.outbox.lock().await.clear();
    }

    /// Check if an email was delivered to a specific address
    pub async fn was_sent_to(&self, email: &str) -> bool {
        self.outbox.lock().await.iter().any(|e| e.to == email)
    }
}

impl Default for MemoryTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn deliver(&self, email: &ComposedEmail) -> Result<SendResult, TransportError> {
        if let Some(message) = &self.failure_message {
            return Err(TransportError::Unavailable(message.clone()));
        }

        self.outbox.lock().await.push(email.clone());

        Ok(SendResult {
            message_id: format!("memory-{}", Uuid::new_v4()),
        })
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
