//! Shared vocabulary for the verification and recovery flows.

use api::IdentifierKind;

/// The two channels an account can be verified or recovered through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    Email,
    Phone,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Email => "email",
            Channel::Phone => "phone",
        }
    }
}

impl From<Channel> for IdentifierKind {
    fn from(channel: Channel) -> Self {
        match channel {
            Channel::Email => IdentifierKind::Email,
            Channel::Phone => IdentifierKind::Phone,
        }
    }
}

/// Token handed out when a flow accepts a gateway call and required to feed
/// the result back. A flow refuses to hand out a second token while one is
/// outstanding, and ignores completions carrying a token it no longer
/// recognizes — that is the whole stale-response story.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Attempt {
    pub(crate) epoch: u64,
}

/// Severity of a user-facing notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// What the user is told after a flow step completes. Every gateway failure
/// becomes one of these; nothing is swallowed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub body: String,
}

impl Notice {
    pub fn info(title: &str, body: &str) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.to_string(),
            body: body.to_string(),
        }
    }

    pub fn success(title: &str, body: &str) -> Self {
        Self {
            level: NoticeLevel::Success,
            title: title.to_string(),
            body: body.to_string(),
        }
    }

    pub fn error(title: &str, body: &str) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.to_string(),
            body: body.to_string(),
        }
    }
}
