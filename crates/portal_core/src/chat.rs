//! Conversation state for the assistant chat widget.

use std::sync::Arc;

use gateway::RegistryApi;
use shared::protocol::ChatRequest;
use tracing::warn;

const CHAT_ERROR_REPLY: &str = "Sorry, I encountered an error. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

pub struct ChatThread {
    api: Arc<dyn RegistryApi>,
    messages: Vec<ChatMessage>,
    sending: bool,
}

impl ChatThread {
    pub fn new(api: Arc<dyn RegistryApi>) -> Self {
        Self {
            api,
            messages: Vec::new(),
            sending: false,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    /// Appends the user's message and the assistant's reply. A failed call
    /// becomes an apologetic assistant turn rather than an error; the thread
    /// stays usable.
    pub async fn send(&mut self, input: &str) {
        let text = input.trim();
        if text.is_empty() || self.sending {
            return;
        }

        self.messages.push(ChatMessage {
            role: ChatRole::User,
            content: text.to_string(),
        });
        self.sending = true;

        let reply = match self
            .api
            .send_chat(ChatRequest {
                message: text.to_string(),
            })
            .await
        {
            Ok(response) => response.response,
            Err(err) => {
                warn!(error = %err, "chat request failed");
                CHAT_ERROR_REPLY.to_string()
            }
        };

        self.messages.push(ChatMessage {
            role: ChatRole::Assistant,
            content: reply,
        });
        self.sending = false;
    }
}

#[cfg(test)]
#[path = "tests/chat_tests.rs"]
mod tests;
