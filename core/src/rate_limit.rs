//! Rate-limit metadata advertised by the API.
//!
//! A snapshot is only produced when all three headers are present and
//! parse; anything less is ignored and the previously captured snapshot
//! stays in place.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::http::HttpResponse;

pub const LIMIT_HEADER: &str = "X-Rate-Limit-Limit";
pub const REMAINING_HEADER: &str = "X-Rate-Limit-Remaining";
pub const RESET_HEADER: &str = "X-Rate-Limit-Reset";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitSnapshot {
    pub limit: u32,
    pub remaining: u32,
    pub reset_at: DateTime<Utc>,
}

impl RateLimitSnapshot {
    /// Extract a snapshot from `response`, or `None` if any header is
    /// missing or malformed.
    pub fn from_response(response: &HttpResponse) -> Option<Self> {
        let (limit, remaining, reset) = match (
            response.header(LIMIT_HEADER),
            response.header(REMAINING_HEADER),
            response.header(RESET_HEADER),
        ) {
            (Some(limit), Some(remaining), Some(reset)) => (limit, remaining, reset),
            (None, None, None) => return None,
            _ => {
                debug!("ignoring partial rate limit headers");
                return None;
            }
        };

        let parsed = limit
            .trim()
            .parse::<u32>()
            .ok()
            .zip(remaining.trim().parse::<u32>().ok())
            .zip(
                reset
                    .trim()
                    .parse::<i64>()
                    .ok()
                    .and_then(|secs| DateTime::from_timestamp(secs, 0)),
            );
        match parsed {
            Some(((limit, remaining), reset_at)) => Some(Self {
                limit,
                remaining,
                reset_at,
            }),
            None => {
                debug!(limit, remaining, reset, "ignoring malformed rate limit headers");
                None
            }
        }
    }
}
