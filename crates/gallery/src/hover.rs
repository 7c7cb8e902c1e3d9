//! Hover tracking from successive pick results

use crate::registry::PickHandle;

/// A change of hovered entity. `left` fires before `entered`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverChange {
    pub left: Option<PickHandle>,
    pub entered: Option<PickHandle>,
}

/// Single hover event, in emission order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverEvent {
    Leave(PickHandle),
    Enter(PickHandle),
}

impl HoverChange {
    /// Leave (if any) followed by enter (if any)
    pub fn events(&self) -> impl Iterator<Item = HoverEvent> {
        self.left
            .map(HoverEvent::Leave)
            .into_iter()
            .chain(self.entered.map(HoverEvent::Enter))
    }
}

#[derive(Debug, Clone, Default)]
pub struct HoverTracker {
    last_hovered: Option<PickHandle>,
}

impl HoverTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<PickHandle> {
        self.last_hovered
    }

    /// Feed the latest pick result. Repeating the same result yields nothing.
    pub fn update(&mut self, picked: Option<PickHandle>) -> Option<HoverChange> {
        if picked == self.last_hovered {
            return None;
        }
        let change = HoverChange {
            left: self.last_hovered,
            entered: picked,
        };
        self.last_hovered = picked;
        Some(change)
    }

    /// Pointer left the viewport
    pub fn clear(&mut self) -> Option<HoverChange> {
        self.update(None)
    }
}
