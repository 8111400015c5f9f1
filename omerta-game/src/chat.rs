//! Bounded public chat channel.
use crate::error::{GameError, GameResult};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRules {
    pub capacity: usize,
    pub max_len: usize,
}

impl Default for ChatRules {
    fn default() -> Self {
        Self {
            capacity: 100,
            max_len: 280,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: u64,
    pub author: String,
    pub body: String,
    pub sent_at: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatLog {
    messages: VecDeque<ChatMessage>,
    rules: ChatRules,
    next_id: u64,
}

impl ChatLog {
    #[must_use]
    pub fn new(rules: ChatRules) -> Self {
        Self {
            messages: VecDeque::with_capacity(rules.capacity),
            rules,
            next_id: 0,
        }
    }

    /// Append a message, evicting the oldest one at capacity.
    ///
    /// # Errors
    ///
    /// Rejects bodies that are blank or longer than the configured limit.
    pub fn post(&mut self, author: &str, body: &str, now_ms: u64) -> GameResult<&ChatMessage> {
        let body = body.trim();
        if body.is_empty() {
            return Err(GameError::EmptyField { field: "message" });
        }
        if body.chars().count() > self.rules.max_len {
            return Err(GameError::TooLong {
                field: "message",
                max: self.rules.max_len,
            });
        }
        while self.messages.len() >= self.rules.capacity.max(1) {
            self.messages.pop_front();
        }
        self.next_id += 1;
        self.messages.push_back(ChatMessage {
            id: self.next_id,
            author: author.to_string(),
            body: body.to_string(),
            sent_at: now_ms,
        });
        Ok(&self.messages[self.messages.len() - 1])
    }

    /// Up to `n` latest messages, oldest first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter().skip(self.messages.len().saturating_sub(n))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for ChatLog {
    fn default() -> Self {
        Self::new(ChatRules::default())
    }
}
