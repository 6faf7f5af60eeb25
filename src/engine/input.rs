//! Input latch: the held state of the two movement intents.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Intent {
    MoveLeft,
    MoveRight,
    Fire,
    Confirm,
}

/// A discrete key or touch transition delivered by the front end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Down(Intent),
    Up(Intent),
}

/// Only movement is latched. Fire and confirm are edge-triggered and never
/// stored here.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputLatch {
    left: bool,
    right: bool,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, intent: Intent) {
        self.set(intent, true);
    }

    pub fn release(&mut self, intent: Intent) {
        self.set(intent, false);
    }

    fn set(&mut self, intent: Intent, held: bool) {
        match intent {
            Intent::MoveLeft => self.left = held,
            Intent::MoveRight => self.right = held,
            Intent::Fire | Intent::Confirm => {}
        }
    }

    pub fn left(&self) -> bool {
        self.left
    }

    pub fn right(&self) -> bool {
        self.right
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
