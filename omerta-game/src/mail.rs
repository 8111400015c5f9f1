//! Private messages between players.
use crate::error::{GameError, GameResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailRules {
    pub max_subject_len: usize,
    pub max_body_len: usize,
}

impl Default for MailRules {
    fn default() -> Self {
        Self {
            max_subject_len: 80,
            max_body_len: 2_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailMessage {
    pub id: u64,
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
    pub sent_at: u64,
    #[serde(default)]
    pub read: bool,
}

/// Message being composed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MailDraft {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mailbox {
    messages: Vec<MailMessage>,
    next_id: u64,
}

fn check_field(field: &'static str, value: &str, max: usize) -> GameResult<()> {
    if value.trim().is_empty() {
        return Err(GameError::EmptyField { field });
    }
    if value.chars().count() > max {
        return Err(GameError::TooLong { field, max });
    }
    Ok(())
}

impl Mailbox {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver a draft from `from`. `directory` lists every valid recipient.
    ///
    /// # Errors
    ///
    /// Rejects unknown recipients and empty or over-long subjects and bodies.
    pub fn send(
        &mut self,
        from: &str,
        draft: MailDraft,
        now_ms: u64,
        rules: &MailRules,
        directory: &[&str],
    ) -> GameResult<&MailMessage> {
        let typed = draft.to.trim();
        let to = directory
            .iter()
            .find(|name| name.eq_ignore_ascii_case(typed))
            .ok_or_else(|| GameError::UnknownUser(typed.to_string()))?;
        check_field("subject", &draft.subject, rules.max_subject_len)?;
        check_field("body", &draft.body, rules.max_body_len)?;

        self.next_id += 1;
        let message = MailMessage {
            id: self.next_id,
            from: from.to_string(),
            to: to.to_string(),
            subject: draft.subject.trim().to_string(),
            body: draft.body,
            sent_at: now_ms,
            read: false,
        };
        log::debug!("mail #{} {} -> {}", message.id, message.from, message.to);
        self.messages.push(message);
        Ok(&self.messages[self.messages.len() - 1])
    }

    /// Messages addressed to `user`, newest first.
    #[must_use]
    pub fn inbox(&self, user: &str) -> Vec<&MailMessage> {
        let mut inbox: Vec<&MailMessage> = self
            .messages
            .iter()
            .filter(|m| m.to.eq_ignore_ascii_case(user))
            .collect();
        inbox.sort_by(|a, b| b.sent_at.cmp(&a.sent_at).then(b.id.cmp(&a.id)));
        inbox
    }

    #[must_use]
    pub fn unread_count(&self, user: &str) -> usize {
        self.messages
            .iter()
            .filter(|m| !m.read && m.to.eq_ignore_ascii_case(user))
            .count()
    }

    fn owned_mut(&mut self, id: u64, user: &str) -> GameResult<&mut MailMessage> {
        self.messages
            .iter_mut()
            .find(|m| m.id == id && m.to.eq_ignore_ascii_case(user))
            .ok_or(GameError::UnknownMessage(id))
    }

    /// # Errors
    ///
    /// Returns [`GameError::UnknownMessage`] unless `user` received message `id`.
    pub fn mark_read(&mut self, id: u64, user: &str) -> GameResult<()> {
        self.owned_mut(id, user)?.read = true;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`GameError::UnknownMessage`] unless `user` received message `id`.
    pub fn delete(&mut self, id: u64, user: &str) -> GameResult<MailMessage> {
        let idx = self
            .messages
            .iter()
            .position(|m| m.id == id && m.to.eq_ignore_ascii_case(user))
            .ok_or(GameError::UnknownMessage(id))?;
        Ok(self.messages.remove(idx))
    }
}
