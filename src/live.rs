//! Shared, lazily refreshed query results.
//!
//! A [`LiveQuery`] is not started until someone subscribes. While it has
//! subscribers (and for a linger period after the last one detaches) every
//! read re-runs the loader only when the source reports a new [`Revision`].
//! Once the linger period has passed with nobody attached the cached value is
//! dropped and reads fall back to the initial value.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Revision {
    /// Bumped by every write made through this process.
    pub local: u64,
    /// SQLite `data_version`, bumped by commits from other connections.
    pub external: i64,
}

pub trait Observable {
    type Error;

    fn revision(&self) -> Result<Revision, Self::Error>;
}

type Loader<S, T, E> = Box<dyn Fn(&S) -> Result<T, E>>;

pub struct LiveQuery<S: Observable, T> {
    name: &'static str,
    initial: T,
    linger: Duration,
    loader: Loader<S, T, S::Error>,
    presence: Rc<Presence>,
    cache: RefCell<Option<Cached<T>>>,
}

struct Cached<T> {
    revision: Revision,
    value: T,
}

#[derive(Default)]
struct Presence {
    subscribers: Cell<usize>,
    idle_since: Cell<Option<Instant>>,
}

impl Presence {
    fn detach(&self, now: Instant) {
        let remaining = self.subscribers.get().saturating_sub(1);
        self.subscribers.set(remaining);
        if remaining == 0 {
            self.idle_since.set(Some(now));
        }
    }
}

/// Keeps a [`LiveQuery`] hot until dropped or detached.
pub struct Subscription {
    presence: Option<Rc<Presence>>,
}

impl Subscription {
    #[cfg(test)]
    pub fn detach_at(mut self, now: Instant) {
        if let Some(presence) = self.presence.take() {
            presence.detach(now);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(presence) = self.presence.take() {
            presence.detach(Instant::now());
        }
    }
}

impl<S: Observable, T: Clone> LiveQuery<S, T> {
    pub fn new<F>(name: &'static str, initial: T, linger: Duration, loader: F) -> Self
    where
        F: Fn(&S) -> Result<T, S::Error> + 'static,
    {
        Self {
            name,
            initial,
            linger,
            loader: Box::new(loader),
            presence: Rc::new(Presence::default()),
            cache: RefCell::new(None),
        }
    }

    pub fn subscribe(&self) -> Subscription {
        self.presence
            .subscribers
            .set(self.presence.subscribers.get() + 1);
        self.presence.idle_since.set(None);
        Subscription {
            presence: Some(Rc::clone(&self.presence)),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.presence.subscribers.get()
    }

    pub fn is_hot(&self) -> bool {
        self.cache.borrow().is_some()
    }

    pub fn read(&self, source: &S) -> Result<T, S::Error> {
        self.read_at(source, Instant::now())
    }

    pub fn read_at(&self, source: &S, now: Instant) -> Result<T, S::Error> {
        self.expire_if_idle(now);

        let attached = self.subscriber_count() > 0;
        if !attached && !self.is_hot() {
            return Ok(self.initial.clone());
        }

        let revision = source.revision()?;
        if let Some(cached) = self.cache.borrow().as_ref() {
            if cached.revision == revision {
                return Ok(cached.value.clone());
            }
        }

        debug!(query = self.name, ?revision, "refreshing live query");
        let value = (self.loader)(source)?;
        *self.cache.borrow_mut() = Some(Cached {
            revision,
            value: value.clone(),
        });
        Ok(value)
    }

    fn expire_if_idle(&self, now: Instant) {
        if self.presence.subscribers.get() > 0 {
            return;
        }
        let Some(idle_since) = self.presence.idle_since.get() else {
            return;
        };
        if now.saturating_duration_since(idle_since) >= self.linger {
            debug!(query = self.name, "tearing down idle live query");
            self.presence.idle_since.set(None);
            self.cache.borrow_mut().take();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{LiveQuery, Observable, Revision};
    use std::cell::Cell;
    use std::time::{Duration, Instant};

    #[derive(Default)]
    struct Counter {
        value: Cell<i64>,
        revision: Cell<u64>,
        loads: Cell<usize>,
    }

    impl Counter {
        fn set(&self, value: i64) {
            self.value.set(value);
            self.revision.set(self.revision.get() + 1);
        }
    }

    impl Observable for Counter {
        type Error = String;

        fn revision(&self) -> Result<Revision, String> {
            Ok(Revision {
                local: self.revision.get(),
                external: 0,
            })
        }
    }

    fn query() -> LiveQuery<Counter, i64> {
        LiveQuery::new("counter", -1, Duration::from_secs(5), |source: &Counter| {
            source.loads.set(source.loads.get() + 1);
            Ok(source.value.get())
        })
    }

    #[test]
    fn yields_initial_value_until_subscribed() {
        let source = Counter::default();
        source.set(3);
        let live = query();
        assert_eq!(live.read(&source).unwrap(), -1);
        assert_eq!(source.loads.get(), 0);

        let _sub = live.subscribe();
        assert_eq!(live.read(&source).unwrap(), 3);
    }

    #[test]
    fn reloads_only_when_revision_changes() {
        let source = Counter::default();
        let live = query();
        let _sub = live.subscribe();

        assert_eq!(live.read(&source).unwrap(), 0);
        assert_eq!(live.read(&source).unwrap(), 0);
        assert_eq!(source.loads.get(), 1);

        source.set(9);
        assert_eq!(live.read(&source).unwrap(), 9);
        assert_eq!(source.loads.get(), 2);
    }

    #[test]
    fn stays_hot_for_linger_period_after_last_subscriber() {
        let source = Counter::default();
        source.set(4);
        let live = query();
        let start = Instant::now();

        let first = live.subscribe();
        let second = live.subscribe();
        assert_eq!(live.subscriber_count(), 2);
        assert_eq!(live.read_at(&source, start).unwrap(), 4);

        first.detach_at(start);
        second.detach_at(start);
        assert_eq!(live.subscriber_count(), 0);

        let within = start + Duration::from_millis(4_999);
        assert_eq!(live.read_at(&source, within).unwrap(), 4);
        assert!(live.is_hot());

        let after = start + Duration::from_secs(5);
        assert_eq!(live.read_at(&source, after).unwrap(), -1);
        assert!(!live.is_hot());
    }

    #[test]
    fn resubscribing_within_linger_keeps_cache() {
        let source = Counter::default();
        source.set(2);
        let live = query();
        let start = Instant::now();

        live.subscribe().detach_at(start);
        let sub = live.subscribe();
        assert_eq!(live.read_at(&source, start).unwrap(), 2);
        sub.detach_at(start + Duration::from_secs(1));
        assert_eq!(
            live.read_at(&source, start + Duration::from_secs(10)).unwrap(),
            -1
        );
        assert_eq!(source.loads.get(), 1);
    }
}
