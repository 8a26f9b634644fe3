use std::sync::{Condvar, Mutex};
use std::time::{Duration, Instant};

/// ## Single slot, latest value wins
///
/// Receiver threads `put`; the virtual machine side reads the newest value
/// or waits for one with a deadline.
#[derive(Debug, Default)]
pub struct Mailbox<T> {
    slot: Mutex<Option<T>>,
    ready: Condvar,
}

impl<T: Clone> Mailbox<T> {
    pub fn new() -> Mailbox<T> {
        Mailbox {
            slot: Mutex::new(None),
            ready: Condvar::new(),
        }
    }

    pub fn put(&self, value: T) {
        let mut slot = match self.slot.lock() {
            Ok(slot) => slot,
            Err(poisoned) => poisoned.into_inner(),
        };
        *slot = Some(value);
        self.ready.notify_all();
    }

    pub fn clear(&self) {
        self.take();
    }

    pub fn take(&self) -> Option<T> {
        match self.slot.lock() {
            Ok(mut slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        }
    }

    pub fn latest(&self) -> Option<T> {
        match self.slot.lock() {
            Ok(slot) => slot.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Take the value, waiting up to `timeout` for one to arrive.
    pub fn wait_take(&self, timeout: Duration) -> Option<T> {
        let deadline = Instant::now() + timeout;
        let mut slot = match self.slot.lock() {
            Ok(slot) => slot,
            Err(poisoned) => poisoned.into_inner(),
        };
        loop {
            if let Some(value) = slot.take() {
                return Some(value);
            }
            let now = Instant::now();
            if now >= deadline {
                return None;
            }
            slot = match self.ready.wait_timeout(slot, deadline - now) {
                Ok((slot, _)) => slot,
                Err(poisoned) => poisoned.into_inner().0,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_latest_value_wins() {
        let m = Mailbox::new();
        m.put(1);
        m.put(2);
        assert_eq!(m.latest(), Some(2));
        assert_eq!(m.take(), Some(2));
        assert_eq!(m.take(), None);
    }

    #[test]
    fn test_wait_take_times_out() {
        let m: Mailbox<String> = Mailbox::new();
        let start = Instant::now();
        assert_eq!(m.wait_take(Duration::from_millis(20)), None);
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_wait_take_from_thread() {
        let m = Arc::new(Mailbox::new());
        let sender = m.clone();
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(10));
            sender.put("ok".to_string());
        });
        assert_eq!(m.wait_take(Duration::from_secs(5)), Some("ok".to_string()));
        handle.join().unwrap();
    }
}
