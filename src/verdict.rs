// Verdict engine for wordfuzz
// Decides whether a response is suppressed, a redirect, or a match

use crate::engine::ExecutionOutcome;
use crate::models::FilterSet;

/// Shown when a redirect carries no Location header.
pub const UNKNOWN_REDIRECT_TARGET: &str = "Unknown redirect target";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Suppressed,
    Redirect { location: String, status: u16 },
    Match { status: u16, size: usize },
    TransportError,
}

pub fn is_redirect(status: u16) -> bool {
    matches!(status, 301 | 302 | 303 | 307 | 308)
}

/// Classify one request outcome against the run's filters.
///
/// First rule that applies wins:
/// 1. transport failure
/// 2. redirect status, reported even if its code is filtered
/// 3. status code filter
/// 4. size filter, only for non-empty bodies
/// 5. 404 is always "not found"
/// 6. everything else is a match
pub fn decide_verdict(outcome: &ExecutionOutcome, filters: &FilterSet) -> Verdict {
    let response = match outcome {
        Ok(response) => response,
        Err(_) => return Verdict::TransportError,
    };

    if is_redirect(response.status) {
        return Verdict::Redirect {
            location: response
                .location
                .clone()
                .unwrap_or_else(|| UNKNOWN_REDIRECT_TARGET.to_string()),
            status: response.status,
        };
    }

    if filters.excludes_status(response.status) {
        return Verdict::Suppressed;
    }

    if response.body_len > 0 && filters.excludes_size(response.body_len) {
        return Verdict::Suppressed;
    }

    if response.status == 404 {
        return Verdict::Suppressed;
    }

    Verdict::Match {
        status: response.status,
        size: response.body_len,
    }
}
