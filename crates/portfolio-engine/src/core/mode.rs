use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::api::types::ObserverId;

type ObserverFn = Rc<dyn Fn(bool)>;

struct Observer {
    id: ObserverId,
    callback: ObserverFn,
}

struct ModeInner {
    active: Cell<bool>,
    observers: RefCell<Vec<Observer>>,
    next_id: Cell<u64>,
}

impl ModeInner {
    fn is_subscribed(&self, id: ObserverId) -> bool {
        self.observers.borrow().iter().any(|o| o.id == id)
    }

    fn remove(&self, id: ObserverId) -> bool {
        let mut observers = self.observers.borrow_mut();
        let before = observers.len();
        observers.retain(|o| o.id != id);
        observers.len() != before
    }
}

/// Session-wide mode flag with synchronous change notification.
///
/// Cloning yields another handle to the same flag. Starts `false`.
/// Single-threaded: handles are `!Send`, observers run on the caller's
/// stack before `set_active` returns, in subscription order.
#[derive(Clone)]
pub struct ModeStore {
    inner: Rc<ModeInner>,
}

impl ModeStore {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(ModeInner {
                active: Cell::new(false),
                observers: RefCell::new(Vec::new()),
                next_id: Cell::new(1),
            }),
        }
    }

    pub fn get_active(&self) -> bool {
        self.inner.active.get()
    }

    /// Replace the flag. Observers are notified only when the value changes.
    ///
    /// An observer removed while this call is notifying (by itself or by an
    /// observer that ran before it) is skipped. Observers added during the
    /// pass are not notified for this change. If an observer sets the flag
    /// again, the nested pass supersedes this one: observers after it never
    /// see the stale value.
    pub fn set_active(&self, value: bool) {
        if self.inner.active.replace(value) == value {
            return;
        }
        log::debug!("mode: active = {}", value);

        // Snapshot so callbacks can subscribe/unsubscribe without a live borrow.
        let snapshot: Vec<(ObserverId, ObserverFn)> = self
            .inner
            .observers
            .borrow()
            .iter()
            .map(|o| (o.id, Rc::clone(&o.callback)))
            .collect();

        for (id, callback) in snapshot {
            if self.inner.active.get() != value {
                break;
            }
            if self.inner.is_subscribed(id) {
                callback(value);
            }
        }
    }

    pub fn toggle(&self) {
        self.set_active(!self.get_active());
    }

    /// Register an observer. It stays registered until the returned
    /// `Subscription` is unsubscribed or dropped.
    pub fn subscribe(&self, observer: impl Fn(bool) + 'static) -> Subscription {
        let id = ObserverId(self.inner.next_id.get());
        self.inner.next_id.set(id.0 + 1);
        self.inner.observers.borrow_mut().push(Observer {
            id,
            callback: Rc::new(observer),
        });
        log::debug!("mode: observer {} subscribed", id.0);
        Subscription {
            id,
            store: Rc::downgrade(&self.inner),
        }
    }

    pub fn observer_count(&self) -> usize {
        self.inner.observers.borrow().len()
    }

    /// True when both handles refer to the same flag.
    pub fn same_store(&self, other: &ModeStore) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for ModeStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Capability to deregister one observer. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes the observer immediately"]
pub struct Subscription {
    id: ObserverId,
    store: Weak<ModeInner>,
}

impl Subscription {
    pub fn id(&self) -> ObserverId {
        self.id
    }

    /// Deregister now. Same as dropping.
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(store) = self.store.upgrade() {
            if store.remove(self.id) {
                log::debug!("mode: observer {} unsubscribed", self.id.0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Rc<RefCell<Vec<(&'static str, bool)>>>, impl Fn(&'static str) -> Box<dyn Fn(bool)>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let make = move |name: &'static str| -> Box<dyn Fn(bool)> {
            let sink = Rc::clone(&sink);
            Box::new(move |v| sink.borrow_mut().push((name, v)))
        };
        (log, make)
    }

    #[test]
    fn starts_inactive() {
        let store = ModeStore::new();
        assert!(!store.get_active());
        assert_eq!(store.observer_count(), 0);
    }

    #[test]
    fn get_reflects_latest_call() {
        let store = ModeStore::new();
        store.set_active(true);
        assert!(store.get_active());
        store.toggle();
        assert!(!store.get_active());
        store.toggle();
        assert!(store.get_active());
        store.set_active(false);
        assert!(!store.get_active());
    }

    #[test]
    fn notifies_in_subscription_order() {
        let store = ModeStore::new();
        let (log, make) = recorder();
        let _a = store.subscribe(make("a"));
        let _b = store.subscribe(make("b"));
        let _c = store.subscribe(make("c"));

        store.set_active(true);
        assert_eq!(*log.borrow(), vec![("a", true), ("b", true), ("c", true)]);
    }

    #[test]
    fn unchanged_value_does_not_notify() {
        let store = ModeStore::new();
        let (log, make) = recorder();
        let _a = store.subscribe(make("a"));

        store.set_active(false);
        assert!(log.borrow().is_empty());

        store.set_active(true);
        store.set_active(true);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn toggle_notifies_each_time() {
        let store = ModeStore::new();
        let (log, make) = recorder();
        let _a = store.subscribe(make("a"));
        store.toggle();
        store.toggle();
        assert_eq!(*log.borrow(), vec![("a", true), ("a", false)]);
    }

    #[test]
    fn dropped_subscription_stops_notifications() {
        let store = ModeStore::new();
        let (log, make) = recorder();
        let a = store.subscribe(make("a"));
        let _b = store.subscribe(make("b"));

        a.unsubscribe();
        assert_eq!(store.observer_count(), 1);
        store.set_active(true);
        assert_eq!(*log.borrow(), vec![("b", true)]);
    }

    #[test]
    fn unsubscribe_from_inside_earlier_observer() {
        let store = ModeStore::new();
        let (log, make) = recorder();
        let victim: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let slot = Rc::clone(&victim);
        let sink = Rc::clone(&log);
        let _killer = store.subscribe(move |v| {
            sink.borrow_mut().push(("killer", v));
            slot.borrow_mut().take();
        });
        *victim.borrow_mut() = Some(store.subscribe(make("victim")));

        store.set_active(true);
        store.set_active(false);
        assert_eq!(*log.borrow(), vec![("killer", true), ("killer", false)]);
    }

    #[test]
    fn nested_set_supersedes_outer_pass() {
        let store = ModeStore::new();
        let (log, make) = recorder();
        let handle = store.clone();
        let _revert = store.subscribe(move |v| {
            if v {
                handle.set_active(false);
            }
        });
        let _b = store.subscribe(make("b"));

        store.set_active(true);
        assert!(!store.get_active());
        assert_eq!(*log.borrow(), vec![("b", false)]);
    }

    #[test]
    fn every_observer_ends_on_the_current_value() {
        let store = ModeStore::new();
        let (log, make) = recorder();
        let _a = store.subscribe(make("a"));
        let handle = store.clone();
        let _flip = store.subscribe(move |v| {
            if v {
                handle.toggle();
            }
        });
        let _c = store.subscribe(make("c"));

        store.set_active(true);
        let last = |name: &str| log.borrow().iter().rev().find(|(n, _)| *n == name).map(|(_, v)| *v);
        assert_eq!(last("a"), Some(false));
        assert_eq!(last("c"), Some(false));
        assert!(!log.borrow().contains(&("c", true)));
    }

    #[test]
    fn observer_can_unsubscribe_itself() {
        let store = ModeStore::new();
        let calls = Rc::new(Cell::new(0));
        let own: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let counter = Rc::clone(&calls);
        let slot = Rc::clone(&own);
        *own.borrow_mut() = Some(store.subscribe(move |_| {
            counter.set(counter.get() + 1);
            slot.borrow_mut().take();
        }));

        store.toggle();
        store.toggle();
        assert_eq!(calls.get(), 1);
        assert_eq!(store.observer_count(), 0);
    }

    #[test]
    fn observer_added_during_notification_waits_for_next_change() {
        let store = ModeStore::new();
        let (log, make) = recorder();
        let late: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let handle = store.clone();
        let slot = Rc::clone(&late);
        let make = Rc::new(make);
        let factory = Rc::clone(&make);
        let _first = store.subscribe(move |_| {
            if slot.borrow().is_none() {
                *slot.borrow_mut() = Some(handle.subscribe(factory("late")));
            }
        });

        store.set_active(true);
        assert!(log.borrow().is_empty());
        store.set_active(false);
        assert_eq!(*log.borrow(), vec![("late", false)]);
    }

    #[test]
    fn observer_reads_new_value() {
        let store = ModeStore::new();
        let seen = Rc::new(Cell::new(false));
        let handle = store.clone();
        let flag = Rc::clone(&seen);
        let _sub = store.subscribe(move |_| flag.set(handle.get_active()));
        store.set_active(true);
        assert!(seen.get());
    }

    #[test]
    fn subscription_outliving_store_is_harmless() {
        let store = ModeStore::new();
        let sub = store.subscribe(|_| {});
        drop(store);
        drop(sub);
    }

    #[test]
    fn clones_share_state() {
        let a = ModeStore::new();
        let b = a.clone();
        b.set_active(true);
        assert!(a.get_active());
        assert!(a.same_store(&b));
        assert!(!a.same_store(&ModeStore::new()));
    }
}
