//! Process-wide buffer that collects everything `ahoy` prints.

use lazy_static::lazy_static;
use std::sync::{Mutex, MutexGuard};

lazy_static! {
    static ref SINK: Mutex<String> = Mutex::new(String::new());
}

fn sink() -> MutexGuard<'static, String> {
    SINK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub fn write(text: &str) {
    sink().push_str(text);
}

pub fn read_all() -> String {
    sink().clone()
}

pub fn clear() {
    sink().clear();
}

/// Returns the buffered text and empties the buffer in one step.
pub fn take() -> String {
    std::mem::take(&mut *sink())
}

/// Serializes tests that go through the shared sink.
#[cfg(test)]
pub(crate) fn test_lock() -> MutexGuard<'static, ()> {
    lazy_static! {
        static ref LOCK: Mutex<()> = Mutex::new(());
    }
    LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_write_read_clear() {
        let _guard = test_lock();
        clear();

        write("ahoy\n");
        write("matey\n");
        assert_eq!(read_all(), "ahoy\nmatey\n");
        assert_eq!(read_all(), "ahoy\nmatey\n");

        clear();
        assert_eq!(read_all(), "");

        write("once\n");
        assert_eq!(take(), "once\n");
        assert_eq!(read_all(), "");
    }
}
