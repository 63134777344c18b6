//! LIFO containers used by the engine.

use ippcode_common::Value;

use crate::frame::Frame;

/// A last-in, first-out stack. Popping an empty stack yields `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Stack<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    pub fn top(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut T> {
        self.items.last_mut()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Activation records. The top is the current local frame.
pub type FrameStack = Stack<Frame>;

/// Return positions saved by CALL.
pub type CallStack = Stack<usize>;

/// Value snapshots pushed by PUSHS.
pub type DataStack = Stack<Value>;
