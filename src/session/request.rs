use crate::error::FailureInfo;

/// Lifecycle of one provider's request. Reusable: every dispatch moves it
/// back to `Pending`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestState {
    #[default]
    Idle,
    Pending,
    Succeeded(String),
    Failed(FailureInfo),
}

impl RequestState {
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    #[must_use]
    pub fn result_text(&self) -> Option<&str> {
        match self {
            Self::Succeeded(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn failure(&self) -> Option<&FailureInfo> {
        match self {
            Self::Failed(info) => Some(info),
            _ => None,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Succeeded(_) => "succeeded",
            Self::Failed(_) => "failed",
        }
    }
}
