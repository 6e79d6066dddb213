use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Mutex, OnceLock, PoisonError};
use std::time::{Duration, Instant};

#[derive(Debug)]
struct Window {
    opened_at: Instant,
    suppressed: u64,
}

static WINDOWS: OnceLock<Mutex<HashMap<&'static str, Window>>> = OnceLock::new();

/// Rate-limits a recurring log line to one per `interval`.
///
/// Returns `Some(suppressed)` when the line for `key` should be written, with
/// the number of occurrences swallowed since the last one; `None` otherwise.
pub fn should_emit(key: &'static str, interval: Duration) -> Option<u64> {
    let mut windows = WINDOWS
        .get_or_init(Default::default)
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    let now = Instant::now();

    match windows.entry(key) {
        Entry::Vacant(entry) => {
            entry.insert(Window {
                opened_at: now,
                suppressed: 0,
            });
            Some(0)
        }
        Entry::Occupied(mut entry) => {
            let window = entry.get_mut();
            if now.duration_since(window.opened_at) >= interval {
                window.opened_at = now;
                Some(std::mem::take(&mut window.suppressed))
            } else {
                window.suppressed += 1;
                None
            }
        }
    }
}
