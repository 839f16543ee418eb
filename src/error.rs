//! Error and refusal types
//!
//! Nothing in the engine is fatal: misconfiguration degrades to "pattern does
//! not fire" and the reason is reported through these types.

/// Misconfiguration or invalid request
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("no shape pattern assigned")]
    MissingShapePattern,
    #[error("no bullet pattern assigned")]
    MissingBulletPattern,
    #[error("shape pattern has not been built")]
    NotBuilt,
    #[error("unknown geometry `{0}`")]
    UnknownGeometry(String),
    #[error("unknown firing sequence `{0}`")]
    UnknownSequence(String),
    #[error("unknown trajectory `{0}`")]
    UnknownTrajectory(String),
}

/// Why a fire request was not started
///
/// `Firing` and `CoolingDown` are ordinary "not ready" answers; only
/// `Unavailable` points at a configuration problem.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FireRefusal {
    #[error("pattern is already firing")]
    Firing,
    #[error("pattern is cooling down")]
    CoolingDown,
    #[error("pattern cannot fire: {0}")]
    Unavailable(#[from] PatternError),
}
