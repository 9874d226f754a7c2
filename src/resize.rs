//! # Resize Debouncing
//!
//! Coalesces bursts of raw window resize notifications into a single settled event.
//! The host event loop owns the clock: it reports raw notifications through
//! [`ResizeDebouncer::notify`] and calls [`ResizeDebouncer::poll`] when its timer for
//! [`ResizeDebouncer::pending_deadline`] elapses.
use crate::options::Options;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Event delivered to subscribers once resizing has settled.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ResizeSettled {
    /// Instant the event fired
    pub at: Instant,
    /// Raw notifications coalesced into this event
    pub coalesced: usize,
}

/// Handle returned by [`ResizeDebouncer::watch`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&ResizeSettled)>;

/// Debouncer owning one pending deadline shared by all of its subscribers.
pub struct ResizeDebouncer {
    quiet_period: Duration,
    deadline: Option<Instant>,
    coalesced: usize,
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Callback)>,
}

impl ResizeDebouncer {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            deadline: None,
            coalesced: 0,
            next_id: 0,
            subscribers: Vec::new(),
        }
    }

    pub fn from_options(options: &Options) -> Self {
        Self::new(options.quiet_period())
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Registers a callback for settled events.
    pub fn watch<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&ResizeSettled) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Removes a callback. Returns false if it was not registered.
    pub fn unwatch(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(subscriber, _)| *subscriber != id);
        self.subscribers.len() != before
    }

    /// Records a raw resize notification, superseding any pending one.
    pub fn notify(&mut self, now: Instant) {
        if self.deadline.is_some() {
            trace!("superseding pending resize notification");
        }
        self.deadline = Some(now + self.quiet_period);
        self.coalesced += 1;
    }

    /// Deadline at which [`ResizeDebouncer::poll`] will fire, if any.
    pub fn pending_deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Drops any pending notification without firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
        self.coalesced = 0;
    }

    /// Fires the settled event if the quiet period has elapsed. Returns whether it fired.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                let event = ResizeSettled {
                    at: now,
                    coalesced: self.coalesced,
                };
                self.deadline = None;
                self.coalesced = 0;
                debug!(coalesced = event.coalesced, subscribers = self.subscribers.len(), "resize settled");
                for (_, callback) in self.subscribers.iter_mut() {
                    callback(&event);
                }
                true
            }
            _ => false,
        }
    }
}

impl Default for ResizeDebouncer {
    fn default() -> Self {
        Self::from_options(&Options::default())
    }
}

impl std::fmt::Debug for ResizeDebouncer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResizeDebouncer")
            .field("quiet_period", &self.quiet_period)
            .field("deadline", &self.deadline)
            .field("coalesced", &self.coalesced)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder(debouncer: &mut ResizeDebouncer) -> Rc<RefCell<Vec<ResizeSettled>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        debouncer.watch(move |event| sink.borrow_mut().push(*event));
        events
    }

    #[test]
    fn burst_fires_once_after_last_notification() {
        let start = Instant::now();
        let mut debouncer = ResizeDebouncer::default();
        let events = recorder(&mut debouncer);

        for offset in [0, 5, 10, 20] {
            debouncer.notify(start + Duration::from_millis(offset));
        }

        // 25ms after the first but only 5ms after the last
        assert!(!debouncer.poll(start + Duration::from_millis(25)));
        assert_eq!(debouncer.pending_deadline(), Some(start + Duration::from_millis(45)));

        assert!(debouncer.poll(start + Duration::from_millis(45)));
        assert!(!debouncer.poll(start + Duration::from_millis(100)));

        let events = events.borrow();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].coalesced, 4);
        assert_eq!(events[0].at, start + Duration::from_millis(45));
    }

    #[test]
    fn every_subscriber_receives_the_event() {
        let start = Instant::now();
        let mut debouncer = ResizeDebouncer::new(Duration::from_millis(10));
        let first = recorder(&mut debouncer);
        let second = recorder(&mut debouncer);

        debouncer.notify(start);
        debouncer.poll(start + Duration::from_millis(10));

        assert_eq!(first.borrow().len(), 1);
        assert_eq!(second.borrow().len(), 1);
    }

    #[test]
    fn separate_bursts_fire_separately() {
        let start = Instant::now();
        let mut debouncer = ResizeDebouncer::default();
        let events = recorder(&mut debouncer);

        debouncer.notify(start);
        assert!(debouncer.poll(start + Duration::from_millis(30)));
        debouncer.notify(start + Duration::from_millis(40));
        assert!(debouncer.poll(start + Duration::from_millis(70)));

        assert_eq!(events.borrow().iter().map(|e| e.coalesced).collect::<Vec<_>>(), vec![1, 1]);
    }

    #[test]
    fn unwatch_and_cancel() {
        let start = Instant::now();
        let mut debouncer = ResizeDebouncer::default();
        let events = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&events);
        let id = debouncer.watch(move |_| *sink.borrow_mut() += 1);

        debouncer.notify(start);
        debouncer.cancel();
        assert!(!debouncer.poll(start + Duration::from_secs(1)));

        assert!(debouncer.unwatch(id));
        assert!(!debouncer.unwatch(id));
        debouncer.notify(start);
        assert!(debouncer.poll(start + Duration::from_secs(1)));
        assert_eq!(*events.borrow(), 0);
    }
}
