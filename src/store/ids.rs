//! Time-based id source
//!
//! Ids are unix-millisecond timestamps, nudged forward when two ids are
//! requested within the same millisecond so they stay strictly
//! increasing within a process. Cross-process uniqueness is only as good
//! as the clock, which matches the storage model's guarantees.

use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};

static LAST_ID: AtomicI64 = AtomicI64::new(0);

/// Current time in unix milliseconds.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Next id: the current unix-ms time, or one past the previous id if the
/// clock has not advanced.
pub fn next_id() -> i64 {
    let now = now_ms();
    match LAST_ID.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
        Some(last.max(now - 1) + 1)
    }) {
        Ok(last) | Err(last) => last.max(now - 1) + 1,
    }
}
