//! The gate deciding, for every render pass, whether the wrapped view
//! may be shown.
//!
//! The only state kept here is whether the needs callback has already
//! been invoked for the current run of unmet passes.  That flag is set
//! on the first unmet pass, and cleared the moment a pass sees the
//! condition met, so that a later unmet pass will call it again.

use crate::requirements::{NeedsFn, Requirements};

/// What the gate decided to render for a given pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The condition is met, show the wrapped view.
    Wrapped,
    /// The condition is unmet and the needs are being worked on.
    Progress,
    /// The condition is unmet and nothing is in flight.
    Blocked,
}

#[derive(Clone, Debug, Default)]
pub struct NeedsGate {
    needs_called: bool,
}

impl NeedsGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate the condition for this pass, invoking `needs` if this is
    /// the first unmet pass since the condition was last met.
    ///
    /// Returns whether the condition is met.
    pub fn check(&mut self, condition: bool, needs: &NeedsFn) -> bool {
        if condition {
            if self.needs_called {
                tracing::trace!("condition met, needs flag reset");
            }
            self.needs_called = false;
            return true;
        }

        if !self.needs_called {
            // flag first; the callback may synchronously cause another pass
            self.needs_called = true;
            tracing::debug!("condition unmet, calling needs");
            needs.call();
        } else {
            tracing::trace!("condition unmet, needs already called");
        }
        false
    }

    pub fn prepare<P>(&mut self, requirements: &Requirements<P>) -> Outcome {
        if self.check(requirements.condition, &requirements.needs) {
            Outcome::Wrapped
        } else if requirements.needs_in_progress {
            Outcome::Progress
        } else {
            Outcome::Blocked
        }
    }

    pub(crate) fn needs_called(&self) -> bool {
        self.needs_called
    }
}
