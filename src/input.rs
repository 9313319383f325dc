//! Discrete input events
//!
//! Whatever owns the keyboard and mouse pushes [`InputEvent`]s through an
//! [`InputSender`]; the frame driver drains the [`InputQueue`] once per frame,
//! before simulating, and applies events in arrival order.

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use serde::{Deserialize, Serialize};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Move the paddle left (A)
    Left,
    /// Move the paddle right (D)
    Right,
    /// Start the match (Enter)
    Confirm,
    /// Request shutdown (Escape)
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    KeyPressed(Key),
    KeyReleased(Key),
    /// Pointer click in playfield coordinates; logged only
    Click { x: f32, y: f32 },
}

/// Receiving end, owned by the frame driver
#[derive(Debug)]
pub struct InputQueue {
    sender: Sender<InputEvent>,
    receiver: Receiver<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        let (sender, receiver) = crossbeam_channel::unbounded();
        Self { sender, receiver }
    }

    /// Hand out a producer handle. Drop every handle to stop delivering input.
    pub fn sender(&self) -> InputSender {
        InputSender {
            inner: self.sender.clone(),
        }
    }

    /// Everything queued since the last drain, oldest first
    pub fn drain(&self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        events
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloneable producer handle; may be moved to another thread
#[derive(Debug, Clone)]
pub struct InputSender {
    inner: Sender<InputEvent>,
}

impl InputSender {
    pub fn send(&self, event: InputEvent) {
        // The queue keeps its own sender, so this only fails after it is dropped
        if self.inner.send(event).is_err() {
            log::trace!("input queue gone, dropped {event:?}");
        }
    }

    pub fn press(&self, key: Key) {
        self.send(InputEvent::KeyPressed(key));
    }

    pub fn release(&self, key: Key) {
        self.send(InputEvent::KeyReleased(key));
    }
}
