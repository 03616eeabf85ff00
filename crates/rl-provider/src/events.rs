use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::WalletProvider;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderEventKind {
    AccountsChanged,
    ChainChanged,
}

impl ProviderEventKind {
    /// Event name on the injected provider's emitter.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AccountsChanged => "accountsChanged",
            Self::ChainChanged => "chainChanged",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderEvent {
    AccountsChanged(Vec<String>),
    /// Hex-encoded chain id as emitted by the wallet.
    ChainChanged(String),
}

impl ProviderEvent {
    pub fn kind(&self) -> ProviderEventKind {
        match self {
            Self::AccountsChanged(_) => ProviderEventKind::AccountsChanged,
            Self::ChainChanged(_) => ProviderEventKind::ChainChanged,
        }
    }
}

pub type Listener = Rc<dyn Fn(&ProviderEvent)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Listener bookkeeping for provider implementations.
#[derive(Default)]
pub struct ListenerSet {
    next_id: Cell<u64>,
    entries: RefCell<Vec<(ListenerId, ProviderEventKind, Listener)>>,
}

impl ListenerSet {
    pub fn add(&self, kind: ProviderEventKind, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.entries.borrow_mut().push((id, kind, listener));
        id
    }

    pub fn remove(&self, id: ListenerId) -> bool {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|(entry_id, _, _)| *entry_id != id);
        entries.len() != before
    }

    pub fn count(&self, kind: ProviderEventKind) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|(_, entry_kind, _)| *entry_kind == kind)
            .count()
    }

    /// Calls every listener registered for the event's kind.
    ///
    /// Listeners are collected before dispatch so they may add or remove
    /// listeners while running.
    pub fn emit(&self, event: &ProviderEvent) -> usize {
        let kind = event.kind();
        let targets: Vec<Listener> = self
            .entries
            .borrow()
            .iter()
            .filter(|(_, entry_kind, _)| *entry_kind == kind)
            .map(|(_, _, listener)| Rc::clone(listener))
            .collect();
        for listener in &targets {
            listener(event);
        }
        targets.len()
    }
}

/// A registered listener, removed from the provider when dropped.
pub struct Subscription {
    provider: Rc<dyn WalletProvider>,
    kind: ProviderEventKind,
    id: Option<ListenerId>,
}

impl Subscription {
    pub fn new(provider: Rc<dyn WalletProvider>, kind: ProviderEventKind, listener: Listener) -> Self {
        let id = provider.add_listener(kind, listener);
        Self {
            provider,
            kind,
            id: Some(id),
        }
    }

    pub fn kind(&self) -> ProviderEventKind {
        self.kind
    }

    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(id) = self.id.take() {
            self.provider.remove_listener(self.kind, id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emit_reaches_only_matching_kind() {
        let set = ListenerSet::default();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        set.add(
            ProviderEventKind::ChainChanged,
            Rc::new(move |_| counter.set(counter.get() + 1)),
        );
        set.add(ProviderEventKind::AccountsChanged, Rc::new(|_| {}));

        assert_eq!(set.emit(&ProviderEvent::ChainChanged("0x1".to_owned())), 1);
        assert_eq!(hits.get(), 1);
        assert_eq!(set.count(ProviderEventKind::AccountsChanged), 1);
    }

    #[test]
    fn remove_drops_listener() {
        let set = ListenerSet::default();
        let id = set.add(ProviderEventKind::AccountsChanged, Rc::new(|_| {}));
        assert!(set.remove(id));
        assert!(!set.remove(id));
        assert_eq!(set.emit(&ProviderEvent::AccountsChanged(Vec::new())), 0);
    }

    #[test]
    fn listener_may_mutate_set_during_emit() {
        let set = Rc::new(ListenerSet::default());
        let inner = Rc::clone(&set);
        set.add(
            ProviderEventKind::ChainChanged,
            Rc::new(move |_| {
                inner.add(ProviderEventKind::ChainChanged, Rc::new(|_| {}));
            }),
        );
        assert_eq!(set.emit(&ProviderEvent::ChainChanged("0x1".to_owned())), 1);
        assert_eq!(set.count(ProviderEventKind::ChainChanged), 2);
    }
}
