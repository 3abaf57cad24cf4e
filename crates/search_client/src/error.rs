use std::fmt;

/// Which request of the lookup protocol failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Initial GET that harvests the form state.
    SearchPage,
    /// POST of the filled-in search form.
    SearchSubmit,
    /// GET of one entity's detail page.
    Detail,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SearchPage => write!(f, "search page fetch"),
            Self::SearchSubmit => write!(f, "search submit"),
            Self::Detail => write!(f, "detail page fetch"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    Client(String),

    /// Connection failure, timeout, or unreadable body.
    #[error("network error during {stage}: {message}")]
    Network { stage: Stage, message: String },

    #[error("HTTP {status} during {stage}")]
    Http { stage: Stage, status: u16 },
}

impl LookupError {
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::Network { stage, .. } | Self::Http { stage, .. } => Some(*stage),
            Self::InvalidUrl { .. } | Self::Client(_) => None,
        }
    }
}
