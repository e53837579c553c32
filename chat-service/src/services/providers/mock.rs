//! Mock provider for local development and tests.

use super::{ProviderError, TextGenerator};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

enum Behaviour {
    Echo,
    Reply(String),
    Fail(String),
    Disabled,
}

pub struct MockGenerator {
    behaviour: Behaviour,
    calls: AtomicUsize,
}

impl MockGenerator {
    /// Echoing mock; a disabled mock fails every call as not configured.
    pub fn new(enabled: bool) -> Self {
        let behaviour = if enabled {
            Behaviour::Echo
        } else {
            Behaviour::Disabled
        };

        Self::with(behaviour)
    }

    /// Always answers with `reply`.
    pub fn replying(reply: impl Into<String>) -> Self {
        Self::with(Behaviour::Reply(reply.into()))
    }

    /// Always fails with `ProviderError::ApiError(message)`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with(Behaviour::Fail(message.into()))
    }

    fn with(behaviour: Behaviour) -> Self {
        Self {
            behaviour,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `generate` calls seen so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match &self.behaviour {
            Behaviour::Echo => Ok(format!("Mock response for: {}", prompt)),
            Behaviour::Reply(reply) => Ok(reply.clone()),
            Behaviour::Fail(message) => Err(ProviderError::ApiError(message.clone())),
            Behaviour::Disabled => Err(ProviderError::NotConfigured(
                "Mock text generator not enabled".to_string(),
            )),
        }
    }
}
