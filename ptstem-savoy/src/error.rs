use crate::rules::Step;

/// Failure to build a usable rule set. Raised only at construction time;
/// stemming itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum RuleSetError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid step: every step needs a name")]
    UnnamedStep,

    #[error("unknown step {0:?}")]
    UnknownStep(String),

    #[error("invalid rule in {step}: missing `{attribute}`")]
    MissingAttribute { step: Step, attribute: &'static str },

    #[error("invalid {field} in {step}: expected a non-negative integer, got {value}")]
    InvalidNumber {
        step: Step,
        field: &'static str,
        value: String,
    },

    #[error("invalid rule in {step}: suffix cannot be empty")]
    EmptySuffix { step: Step },

    #[error("step {0} has no rules")]
    EmptyStep(Step),

    #[error("missing step {0}")]
    MissingStep(Step),
}
