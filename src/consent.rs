//! Cookie/consent dialog dismissal
//!
//! Dismissal is a presence probe: a dialog that does not show up within the
//! probe wait is not an error, and the probe is repeated on the next page.

use crate::document::DocumentPage;
use crate::selectors;
use crate::types::ConsentOutcome;
use std::time::Duration;

/// Whether the consent dialog has been dismissed in the current session
///
/// Owned by the session and lent mutably to each dismissal attempt, which is
/// the only writer. Once set it stays set for the session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConsentState {
    bypassed: bool,
}

impl ConsentState {
    /// Initial state; `bypassed` skips probing from the start
    pub fn new(bypassed: bool) -> Self {
        Self { bypassed }
    }

    /// Returns true once the dialog has been dismissed
    pub fn is_bypassed(&self) -> bool {
        self.bypassed
    }
}

/// Dismiss the consent dialog if it shows up within `wait`
///
/// Never fails. A click that errors is logged and reported as
/// [`ConsentOutcome::NotPresent`], leaving the state unset so the next page
/// tries again.
pub async fn dismiss_if_present<P: DocumentPage>(
    page: &P,
    state: &mut ConsentState,
    wait: Duration,
) -> ConsentOutcome {
    if state.bypassed {
        return ConsentOutcome::AlreadyBypassed;
    }

    let button = match page.wait_for_element(selectors::CONSENT_ACCEPT, wait).await {
        Ok(button) => button,
        Err(e) => {
            tracing::debug!(error = %e, "consent accept button is not present");
            return ConsentOutcome::NotPresent;
        }
    };

    tracing::debug!("consent accept button found");
    match page.click(&button).await {
        Ok(()) => {
            state.bypassed = true;
            ConsentOutcome::Dismissed
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to click consent accept button");
            ConsentOutcome::NotPresent
        }
    }
}
