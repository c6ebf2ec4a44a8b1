//! Typed publish/subscribe between the studio and sibling UI regions.

use crate::effects::{EffectId, ParamValue};

#[derive(Clone, Debug, PartialEq)]
pub enum EffectEvent {
    ParameterChanged {
        effect: EffectId,
        parameter: String,
        value: ParamValue,
    },
    EffectSelected(Option<EffectId>),
    PresetStarted {
        preset_id: String,
    },
    PresetRejected {
        preset_id: String,
    },
    PresetOverlaid {
        preset_id: String,
    },
    PresetSettled {
        preset_id: String,
    },
    ViewReset,
    TextureChanged {
        has_texture: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn FnMut(&EffectEvent)>;

/// Single-threaded event emitter. Handlers run synchronously, in subscription
/// order, inside [`EffectBus::emit`].
#[derive(Default)]
pub struct EffectBus {
    handlers: Vec<(SubscriptionId, Handler)>,
    next_id: u64,
}

impl EffectBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, handler: impl FnMut(&EffectEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Returns whether a handler was removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(sid, _)| *sid != id);
        self.handlers.len() != before
    }

    pub fn emit(&mut self, event: &EffectEvent) {
        for (_, handler) in self.handlers.iter_mut() {
            handler(event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.len()
    }
}

impl std::fmt::Debug for EffectBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectBus")
            .field("subscribers", &self.handlers.len())
            .finish()
    }
}
