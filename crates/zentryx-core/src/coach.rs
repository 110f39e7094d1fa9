//! Scripted "friend & coach" replies.
//!
//! Replies come from a fixed keyword table: case-insensitive substring
//! checks, first match wins, with a generic fallback. The reply is handed
//! back as a [`PendingReply`] so the host can pace its delivery.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default delay before the coach's reply is shown.
pub const DEFAULT_REPLY_DELAY_MS: u64 = 300;

const RULES: &[(&[&str], &str)] = &[
    (
        &["tired", "exhausted"],
        "You sound tired. Let’s schedule a short 5–10 minute break, drink some water, then do just one small chunk of work.",
    ),
    (
        &["exam", "test"],
        "For exams, split revision into small topics and use 25-minute focus blocks. Start with the hardest or most important topics first.",
    ),
    (
        &["job", "office", "work"],
        "For work tasks, list 3 key items. Start with the one that moves things forward the most, even if it’s a bit uncomfortable.",
    ),
    (
        &["sad", "anxious"],
        "I can’t replace real people, but I’m here to listen. Try to write exactly what’s bothering you in one line, then we’ll break it into smaller steps.",
    ),
];

const FALLBACK: &str = "Got it. Tell me what you want to focus on in the next 30 minutes—study, chores, work, or rest—and I’ll suggest a tiny plan.";

/// Pick the canned reply for `message`.
pub fn coach_reply(message: &str) -> &'static str {
    let lower = message.to_lowercase();
    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map_or(FALLBACK, |&(_, reply)| reply)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    You,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub from: Speaker,
    pub text: String,
}

/// Reply waiting to be delivered after `delay`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReply {
    pub text: &'static str,
    pub delay: Duration,
}

/// Chat transcript plus reply pacing.
#[derive(Debug, Clone)]
pub struct Coach {
    transcript: Vec<ChatMessage>,
    reply_delay: Duration,
}

impl Default for Coach {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_REPLY_DELAY_MS))
    }
}

impl Coach {
    pub fn new(reply_delay: Duration) -> Self {
        Self {
            transcript: Vec::new(),
            reply_delay,
        }
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn reply_delay(&self) -> Duration {
        self.reply_delay
    }

    /// Record the user's message and compute the reply. Blank messages are
    /// ignored.
    pub fn send(&mut self, text: &str) -> Option<PendingReply> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.transcript.push(ChatMessage {
            from: Speaker::You,
            text: text.to_string(),
        });
        Some(PendingReply {
            text: coach_reply(text),
            delay: self.reply_delay,
        })
    }

    /// Append a reply to the transcript once its delay has passed.
    pub fn deliver(&mut self, reply: PendingReply) -> &ChatMessage {
        self.transcript.push(ChatMessage {
            from: Speaker::Bot,
            text: reply.text.to_string(),
        });
        &self.transcript[self.transcript.len() - 1]
    }
}
