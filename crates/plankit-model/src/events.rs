//! Synchronous change notification.
//!
//! The model never owns a thread or a queue. Listeners run inline on the
//! mutating call, in subscription order.

use std::fmt;

use crate::home::LevelId;
use crate::selectable::Selectable;

/// Opaque handle identifying one subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle(pub u64);

/// Handle-based listener registry for one event type.
pub struct EventDispatcher<E> {
    listeners: Vec<(ListenerHandle, Box<dyn Fn(&E)>)>,
    next_handle: u64,
}

impl<E> EventDispatcher<E> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
            next_handle: 0,
        }
    }

    /// Registers a listener and returns the handle to unsubscribe it later.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerHandle
    where
        F: Fn(&E) + 'static,
    {
        let handle = ListenerHandle(self.next_handle);
        self.next_handle += 1;
        self.listeners.push((handle, Box::new(listener)));
        handle
    }

    /// Removes a listener. Returns false if the handle was already gone.
    pub fn unsubscribe(&mut self, handle: ListenerHandle) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(h, _)| *h != handle);
        self.listeners.len() != before
    }

    /// Calls every listener with `event`, in subscription order.
    pub fn fire(&self, event: &E) {
        for (_, listener) in &self.listeners {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl<E> Default for EventDispatcher<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for EventDispatcher<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Change notifications fired by the Home aggregate.
#[derive(Debug, Clone, PartialEq)]
pub enum HomeEvent {
    /// Items were added to the home.
    ItemsAdded(Vec<Selectable>),
    /// Items were removed from the home.
    ItemsDeleted(Vec<Selectable>),
    /// One item's geometry or properties changed.
    ItemChanged(Selectable),
    /// The selected item list was replaced.
    SelectionChanged,
    /// Another level became the selected one.
    SelectedLevelChanged,
    /// A level was added to the home.
    LevelAdded(LevelId),
    /// The base plan lock flag flipped.
    BasePlanLockChanged,
}

impl fmt::Display for HomeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HomeEvent::ItemsAdded(items) => write!(f, "ItemsAdded({})", items.len()),
            HomeEvent::ItemsDeleted(items) => write!(f, "ItemsDeleted({})", items.len()),
            HomeEvent::ItemChanged(item) => write!(f, "ItemChanged({:?})", item),
            HomeEvent::SelectionChanged => write!(f, "SelectionChanged"),
            HomeEvent::SelectedLevelChanged => write!(f, "SelectedLevelChanged"),
            HomeEvent::LevelAdded(level) => write!(f, "LevelAdded({:?})", level),
            HomeEvent::BasePlanLockChanged => write!(f, "BasePlanLockChanged"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_subscribe_fire_unsubscribe() {
        let mut dispatcher: EventDispatcher<HomeEvent> = EventDispatcher::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = seen.clone();
        let handle = dispatcher.subscribe(move |event: &HomeEvent| {
            seen_clone.borrow_mut().push(event.clone());
        });
        dispatcher.fire(&HomeEvent::SelectionChanged);
        assert_eq!(seen.borrow().len(), 1);
        assert!(dispatcher.unsubscribe(handle));
        dispatcher.fire(&HomeEvent::SelectionChanged);
        assert_eq!(seen.borrow().len(), 1);
        assert!(!dispatcher.unsubscribe(handle));
    }

    #[test]
    fn test_listeners_run_in_subscription_order() {
        let mut dispatcher: EventDispatcher<u32> = EventDispatcher::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        for tag in 0..3 {
            let order_clone = order.clone();
            dispatcher.subscribe(move |_| order_clone.borrow_mut().push(tag));
        }
        dispatcher.fire(&0);
        assert_eq!(*order.borrow(), vec![0, 1, 2]);
    }
}
