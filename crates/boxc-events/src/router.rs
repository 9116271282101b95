use std::sync::RwLock;

use boxc_types::ObjectId;
use tokio::sync::broadcast;
use tracing::debug;

use crate::event::{ChangeKind, ObjectChanged};

/// Selects the change events a subscriber receives.
#[derive(Clone, Debug, Default)]
pub struct EventFilter {
    /// If set, only events for these objects are delivered.
    pub ids: Option<Vec<ObjectId>>,
    /// If set, only events of these kinds are delivered.
    pub kinds: Option<Vec<ChangeKind>>,
}

impl EventFilter {
    pub fn kinds(kinds: impl IntoIterator<Item = ChangeKind>) -> Self {
        Self {
            kinds: Some(kinds.into_iter().collect()),
            ..Default::default()
        }
    }

    pub fn matches(&self, event: &ObjectChanged) -> bool {
        if let Some(ref ids) = self.ids {
            if !ids.contains(&event.id) {
                return false;
            }
        }
        if let Some(ref kinds) = self.kinds {
            if !kinds.contains(&event.kind) {
                return false;
            }
        }
        true
    }
}

/// Receiving half of a subscription.
pub type EventStream = broadcast::Receiver<ObjectChanged>;

struct Subscriber {
    filter: EventFilter,
    sender: broadcast::Sender<ObjectChanged>,
}

/// Fan-out router delivering change events to matching subscribers.
pub struct EventRouter {
    subscribers: RwLock<Vec<Subscriber>>,
    capacity: usize,
}

impl EventRouter {
    /// `capacity` bounds each subscriber's backlog; a subscriber that falls
    /// further behind observes a lag and loses the oldest events.
    pub fn new(capacity: usize) -> Self {
        Self {
            subscribers: RwLock::new(Vec::new()),
            capacity: capacity.max(1),
        }
    }

    pub fn subscribe(&self, filter: EventFilter) -> EventStream {
        let (tx, rx) = broadcast::channel(self.capacity);
        self.subscribers
            .write()
            .expect("router lock poisoned")
            .push(Subscriber { filter, sender: tx });
        rx
    }

    /// Deliver an event, returning how many subscribers received it.
    ///
    /// Subscribers whose receivers were dropped are pruned.
    pub fn publish(&self, event: &ObjectChanged) -> usize {
        let mut delivered = 0;
        let mut subs = self.subscribers.write().expect("router lock poisoned");
        subs.retain(|sub| {
            if sub.filter.matches(event) {
                let ok = sub.sender.send(event.clone()).is_ok();
                if ok {
                    delivered += 1;
                }
                ok
            } else {
                sub.sender.receiver_count() > 0
            }
        });
        debug!(id = %event.id, kind = %event.kind, delivered, "event published");
        delivered
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().expect("router lock poisoned").len()
    }
}

impl Default for EventRouter {
    fn default() -> Self {
        Self::new(1024)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ObjectId {
        ObjectId::new(s).unwrap()
    }

    #[test]
    fn subscriber_receives_matching_events() {
        let router = EventRouter::default();
        let mut stream = router.subscribe(EventFilter::kinds([ChangeKind::AccessChanged]));
        assert_eq!(router.subscriber_count(), 1);

        assert_eq!(router.publish(&ObjectChanged::access_changed(id("coll"))), 1);
        assert_eq!(router.publish(&ObjectChanged::updated(id("coll"))), 0);

        let received = stream.try_recv().unwrap();
        assert_eq!(received.kind, ChangeKind::AccessChanged);
        assert!(stream.try_recv().is_err());
    }

    #[test]
    fn id_filter() {
        let router = EventRouter::default();
        let mut stream = router.subscribe(EventFilter {
            ids: Some(vec![id("a")]),
            ..Default::default()
        });
        router.publish(&ObjectChanged::updated(id("a")));
        router.publish(&ObjectChanged::updated(id("b")));
        assert_eq!(stream.try_recv().unwrap().id, id("a"));
        assert!(stream.try_recv().is_err());
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let router = EventRouter::default();
        let keep = router.subscribe(EventFilter::default());
        drop(router.subscribe(EventFilter::default()));
        drop(router.subscribe(EventFilter::kinds([ChangeKind::Deleted])));
        assert_eq!(router.subscriber_count(), 3);

        router.publish(&ObjectChanged::updated(id("x")));
        assert_eq!(router.subscriber_count(), 1);
        drop(keep);
    }

    #[test]
    fn empty_filter_matches_everything() {
        let event = ObjectChanged::moved(id("work"));
        assert!(EventFilter::default().matches(&event));
        assert!(!EventFilter::kinds([ChangeKind::Updated]).matches(&event));
    }
}
