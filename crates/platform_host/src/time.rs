//! Clock helpers for record timestamps and generated ids.

use std::cell::Cell;
#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

thread_local! {
    static LAST_ISSUED_MS: Cell<u64> = const { Cell::new(0) };
}

/// Returns the current unix time in milliseconds.
pub fn unix_time_ms_now() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now().max(0.0) as u64
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

/// Returns a unix millisecond timestamp strictly greater than every earlier call.
///
/// Record services stamp `created`/`modified` times with this so ordering by time is total
/// even when several writes land within the same millisecond.
pub fn next_monotonic_timestamp_ms() -> u64 {
    let now = unix_time_ms_now();
    LAST_ISSUED_MS.with(|last| {
        let next = now.max(last.get().saturating_add(1));
        last.set(next);
        next
    })
}

/// Returns a process-unique token such as `tab-1718000000123`.
pub fn unique_token(prefix: &str) -> String {
    format!("{prefix}-{}", next_monotonic_timestamp_ms())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monotonic_timestamps_strictly_increase() {
        let mut previous = next_monotonic_timestamp_ms();
        for _ in 0..1_000 {
            let next = next_monotonic_timestamp_ms();
            assert!(next > previous);
            previous = next;
        }
    }

    #[test]
    fn tokens_are_prefixed_and_distinct() {
        let a = unique_token("tab");
        let b = unique_token("tab");
        assert!(a.starts_with("tab-"));
        assert_ne!(a, b);
    }
}
