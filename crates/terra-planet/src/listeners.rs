//! Height-change observers.

/// Callback invoked after the height buffer changed.
pub type HeightsChangedFn = Box<dyn FnMut()>;

/// Handle returned on registration, used to unregister.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Ordered list of height-change callbacks.
#[derive(Default)]
pub struct HeightListeners {
    next_id: u64,
    entries: Vec<(ListenerId, HeightsChangedFn)>,
}

impl HeightListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback. Callbacks run in registration order.
    pub fn add(&mut self, callback: HeightsChangedFn) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, callback));
        id
    }

    /// Unregister a callback. Returns `false` if the id was unknown.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    /// Invoke every registered callback once.
    pub fn notify(&mut self) {
        for (_, callback) in &mut self.entries {
            callback();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for HeightListeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeightListeners")
            .field("count", &self.entries.len())
            .finish()
    }
}
