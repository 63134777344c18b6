//! Frames: name-keyed collections of variable slots.

use std::collections::HashMap;

use ippcode_common::Value;

/// A variable slot. `None` means declared but not yet assigned.
pub type Slot = Option<Value>;

/// A named scope mapping variable names to slots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    vars: HashMap<String, Slot>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `name` as an unassigned variable.
    ///
    /// Returns false, leaving the frame untouched, if `name` already exists.
    pub fn declare(&mut self, name: &str) -> bool {
        if self.vars.contains_key(name) {
            return false;
        }
        self.vars.insert(name.to_string(), None);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// The slot of a declared variable.
    pub fn slot(&self, name: &str) -> Option<&Slot> {
        self.vars.get(name)
    }

    pub fn slot_mut(&mut self, name: &str) -> Option<&mut Slot> {
        self.vars.get_mut(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Iterate variables in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Slot)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_variable_is_unassigned() {
        let mut frame = Frame::new();
        assert!(frame.declare("x"));
        assert_eq!(frame.slot("x"), Some(&None));
    }

    #[test]
    fn redeclaration_is_rejected() {
        let mut frame = Frame::new();
        assert!(frame.declare("x"));
        *frame.slot_mut("x").unwrap() = Some(Value::Int(1));
        assert!(!frame.declare("x"));
        // The existing value survives the rejected declaration.
        assert_eq!(frame.slot("x"), Some(&Some(Value::Int(1))));
    }

    #[test]
    fn undeclared_lookup() {
        let mut frame = Frame::new();
        assert_eq!(frame.slot("y"), None);
        assert!(frame.slot_mut("y").is_none());
        assert!(!frame.contains("y"));
    }

    #[test]
    fn len_and_iter() {
        let mut frame = Frame::new();
        assert!(frame.is_empty());
        frame.declare("a");
        frame.declare("b");
        assert_eq!(frame.len(), 2);
        let mut names: Vec<_> = frame.iter().map(|(name, _)| name).collect();
        names.sort_unstable();
        assert_eq!(names, ["a", "b"]);
    }
}
