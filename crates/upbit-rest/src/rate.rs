//! Rate-limit header tracking
//!
//! Every Upbit response carries a `Remaining-Req` header of the form
//! `group=candles; min=60; sec=9` describing the caller's remaining quota in
//! the endpoint's throttle group. The client records the latest value per
//! group and exposes it read-only; it never throttles on its own — pollers
//! that need resilience inspect the tracker and sleep between calls.

use parking_lot::Mutex;
use reqwest::header::HeaderMap;
use std::collections::HashMap;
use tracing::trace;

/// Header carrying per-group quota information
const REMAINING_REQ: &str = "Remaining-Req";

/// Parsed `Remaining-Req` header value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemainingReq {
    /// Throttle group (e.g. "candles", "ticker", "order")
    pub group: String,
    /// Requests remaining in the current minute window
    pub min: u32,
    /// Requests remaining in the current second window
    pub sec: u32,
}

impl RemainingReq {
    /// Parse a header value like `group=candles; min=60; sec=9`
    ///
    /// Returns `None` for malformed values; an unreadable header is not an
    /// error for the request it arrived on.
    fn parse(value: &str) -> Option<Self> {
        let mut group = None;
        let mut min = None;
        let mut sec = None;

        for field in value.split(';') {
            let (key, val) = field.trim().split_once('=')?;
            match key {
                "group" => group = Some(val.to_string()),
                "min" => min = val.parse().ok(),
                "sec" => sec = val.parse().ok(),
                _ => {}
            }
        }

        Some(Self {
            group: group?,
            min: min?,
            sec: sec?,
        })
    }

    /// True when the current second window is exhausted
    pub fn is_exhausted(&self) -> bool {
        self.sec == 0
    }
}

/// Latest `Remaining-Req` value per throttle group
#[derive(Debug, Default)]
pub(crate) struct RateLimitTracker {
    groups: Mutex<HashMap<String, RemainingReq>>,
}

impl RateLimitTracker {
    /// Record the header from one response, if present and well formed
    pub(crate) fn record(&self, headers: &HeaderMap) {
        let parsed = headers
            .get(REMAINING_REQ)
            .and_then(|v| v.to_str().ok())
            .and_then(RemainingReq::parse);

        if let Some(remaining) = parsed {
            trace!(
                group = %remaining.group,
                min = remaining.min,
                sec = remaining.sec,
                "rate limit update"
            );
            self.groups
                .lock()
                .insert(remaining.group.clone(), remaining);
        }
    }

    /// Latest recorded value for a group
    pub(crate) fn get(&self, group: &str) -> Option<RemainingReq> {
        self.groups.lock().get(group).cloned()
    }
}
