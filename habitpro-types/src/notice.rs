use serde::Serialize;

/// Severity of a user-visible notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Error,
    Info,
}

impl NoticeLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

/// A transient notification shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success<S: Into<String>>(msg: S) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: msg.into(),
        }
    }

    pub fn error<S: Into<String>>(msg: S) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: msg.into(),
        }
    }

    pub fn info<S: Into<String>>(msg: S) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: msg.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}
