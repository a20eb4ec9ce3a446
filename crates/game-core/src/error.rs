use thiserror::Error;

/// Runtime validation failures. All of these are returned to the caller for
/// user-facing display; none triggers an automatic retry.
#[derive(Error, Debug)]
pub enum GameError {
    #[error("Invalid option '{option_id}' for decision '{decision_id}'")]
    InvalidOption {
        decision_id: String,
        option_id: String,
    },

    #[error("Invalid XP amount: {0}")]
    InvalidAmount(i64),

    #[error("Invalid metric value: {0}")]
    InvalidMetricValue(String),

    #[error("Unknown reward: {0}")]
    UnknownReward(String),

    #[error("Reward already acquired: {0}")]
    AlreadyAcquired(String),

    #[error("Insufficient tickets: need {needed}, have {available}")]
    InsufficientTickets { needed: u64, available: u64 },

    #[error("A session is already in progress")]
    SessionInProgress,

    #[error("Session not complete: {remaining} item(s) remaining")]
    SessionNotComplete { remaining: usize },

    #[error("Response does not match the current content item: expected {expected}")]
    UnexpectedResponse { expected: &'static str },

    #[error("Market data error: {0}")]
    MarketData(String),
}

/// Fatal catalog problems detected at load time. No session may start once
/// one of these is raised; there is no runtime recovery for broken content.
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Malformed level ladder: {0}")]
    MalformedLadder(String),

    #[error("Decision '{0}' has no options")]
    EmptyDecision(String),

    #[error("Duplicate id in catalog: {0}")]
    DuplicateId(String),

    #[error("Content parse error: {0}")]
    Parse(String),
}
