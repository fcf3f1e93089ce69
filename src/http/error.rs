use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnavailableCause {
    MissingCredential,
    Network,
    Authentication,
    Status(u16),
    MalformedResponse,
    EmptyResponse,
    Interrupted,
}

impl fmt::Display for UnavailableCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnavailableCause::MissingCredential => write!(f, "no API key configured"),
            UnavailableCause::Network => write!(f, "network error"),
            UnavailableCause::Authentication => write!(f, "authentication failed"),
            UnavailableCause::Status(code) => write!(f, "unexpected status {}", code),
            UnavailableCause::MalformedResponse => write!(f, "malformed response"),
            UnavailableCause::EmptyResponse => write!(f, "empty response"),
            UnavailableCause::Interrupted => write!(f, "request interrupted"),
        }
    }
}

/// The only failure the advice client reports, whatever went wrong underneath.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Advice unavailable ({cause}): {detail}")]
pub struct AdviceUnavailable {
    pub cause: UnavailableCause,
    pub detail: String,
}

impl AdviceUnavailable {
    pub fn new(cause: UnavailableCause, detail: impl Into<String>) -> Self {
        Self {
            cause,
            detail: detail.into(),
        }
    }
}

impl From<reqwest::Error> for AdviceUnavailable {
    fn from(err: reqwest::Error) -> Self {
        let cause = if err.is_decode() {
            UnavailableCause::MalformedResponse
        } else if let Some(status) = err.status() {
            UnavailableCause::from_status(status.as_u16())
        } else {
            UnavailableCause::Network
        };
        Self::new(cause, err.to_string())
    }
}

impl UnavailableCause {
    pub fn from_status(code: u16) -> Self {
        match code {
            401 | 403 => UnavailableCause::Authentication,
            code => UnavailableCause::Status(code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_statuses_are_classified() {
        assert_eq!(
            UnavailableCause::from_status(401),
            UnavailableCause::Authentication
        );
        assert_eq!(
            UnavailableCause::from_status(403),
            UnavailableCause::Authentication
        );
        assert_eq!(
            UnavailableCause::from_status(500),
            UnavailableCause::Status(500)
        );
    }

    #[test]
    fn display_mentions_cause_and_detail() {
        let err = AdviceUnavailable::new(UnavailableCause::Status(429), "quota exceeded");
        assert_eq!(
            err.to_string(),
            "Advice unavailable (unexpected status 429): quota exceeded"
        );
    }
}
