use crate::foundation::error::{VredError, VredResult};

/// What to do with a soft warning.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum WarningPolicy {
    /// Log it and carry on.
    #[default]
    Log,
    /// Log it, then fail the task.
    Fail,
}

impl WarningPolicy {
    /// Policy selected by a "fail on warnings" flag.
    pub fn from_fail_flag(fail_on_warnings: bool) -> Self {
        if fail_on_warnings { Self::Fail } else { Self::Log }
    }
}

/// Result of one configuration step.
#[derive(Debug)]
pub enum Outcome {
    /// Step applied cleanly.
    Ok,
    /// Step applied, with a non-fatal problem worth reporting.
    Warning(String),
    /// Step failed.
    Fatal(VredError),
}

impl Outcome {
    /// Build a warning outcome.
    pub fn warning(msg: impl Into<String>) -> Self {
        Self::Warning(msg.into())
    }

    /// True for [`Outcome::Ok`].
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    /// Resolve into a plain result under `policy`.
    ///
    /// Warnings are always logged; under [`WarningPolicy::Fail`] they become
    /// [`VredError::Warning`].
    pub fn escalate(self, policy: WarningPolicy) -> VredResult<()> {
        match self {
            Self::Ok => Ok(()),
            Self::Warning(msg) => {
                tracing::warn!("{msg}");
                match policy {
                    WarningPolicy::Log => Ok(()),
                    WarningPolicy::Fail => Err(VredError::warning(msg)),
                }
            }
            Self::Fatal(err) => Err(err),
        }
    }
}

impl From<VredResult<Outcome>> for Outcome {
    fn from(r: VredResult<Outcome>) -> Self {
        r.unwrap_or_else(Self::Fatal)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/outcome.rs"]
mod tests;
