/// Input events the simulation understands.
///
/// Pointer coordinates are in table space (the host converts from client
/// coordinates). Power events carry the normalized vertical position inside
/// the power control: 0.0 at the top, 1.0 at the bottom.
#[derive(Debug, Clone, Copy)]
pub enum InputEvent {
    /// The cursor/touch moved over the table.
    PointerMove { x: f32, y: f32 },
    /// A discrete click/tap on the table (toggles the aim lock).
    TableTap { x: f32, y: f32 },
    /// A press began inside the power control.
    PowerStart { t: f32 },
    /// The press moved within the power control.
    PowerDrag { t: f32 },
    /// The press was released (fires the shot if enough power was drawn).
    PowerEnd,
    /// The press left the control's input region; the gesture is discarded.
    PowerCancel,
    /// A custom event from the UI layer (reset button, etc.).
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// A queue of input events.
/// The host writes events into the queue; the game reads and the runner
/// drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from the host between ticks).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerMove { x: 10.0, y: 20.0 });
        q.push(InputEvent::PowerEnd);
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn iter_does_not_consume() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PowerStart { t: 0.5 });
        assert_eq!(q.iter().count(), 1);
        assert_eq!(q.len(), 1);
    }
}
