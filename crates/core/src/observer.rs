use uuid::Uuid;

use crate::models::time_range::TimeRange;

/// What changed in the chart state. Sent to every subscriber after the
/// mutation has been applied.
#[derive(Debug, Clone, PartialEq)]
pub enum StateChange {
    /// Event list replaced; carries the new count
    EventsLoaded(usize),
    /// Price series regenerated; carries the new point count
    PricesRegenerated(usize),
    RangeSelected(TimeRange),
    /// Selection replaced (`None` when cleared)
    EventSelected(Option<Uuid>),
    SimulationToggled(bool),
}

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&StateChange)>;

/// Registry of state listeners, notified synchronously in subscription order.
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    entries: Vec<(SubscriptionId, Listener)>,
}

impl Listeners {
    pub(crate) fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    /// Returns false if the id was unknown (already removed).
    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub(crate) fn notify(&mut self, change: &StateChange) {
        for (_, listener) in &mut self.entries {
            listener(change);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
