//! Variable environment: a chain of frames.

use crate::value::Value;
use std::collections::BTreeMap;

/// One frame of bindings. `parent` indexes the frame that lookups fall back to.
#[derive(Debug, Clone)]
struct Frame {
    bindings: BTreeMap<String, Value>,
    parent: Option<usize>,
}

impl Frame {
    fn new(parent: Option<usize>) -> Self {
        Self {
            bindings: BTreeMap::new(),
            parent,
        }
    }
}

/// Frame-chain environment.
///
/// Frame 0 is the global frame and is never popped. A function call pushes a
/// frame whose parent is the global frame (functions live in one global
/// table), and pops it on return.
///
/// `define` always writes the current frame.
/// `assign` updates the nearest frame on the chain that holds the name,
/// falling back to defining it in the current frame.
#[derive(Debug, Clone)]
pub struct Environment {
    frames: Vec<Frame>,
}

impl Environment {
    /// Create an environment with only the global frame.
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::new(None)],
        }
    }

    /// Push a call frame linked to the global frame.
    pub fn push_frame(&mut self) {
        self.frames.push(Frame::new(Some(0)));
    }

    /// Pop the current frame. The global frame stays.
    pub fn pop_frame(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Number of live frames, the global one included.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    fn current(&self) -> usize {
        self.frames.len() - 1
    }

    /// Index of the nearest frame on the chain holding `name`.
    fn lookup(&self, name: &str) -> Option<usize> {
        let mut index = Some(self.current());
        while let Some(i) = index {
            let frame = &self.frames[i];
            if frame.bindings.contains_key(name) {
                return Some(i);
            }
            index = frame.parent;
        }
        None
    }

    /// Bind `name` in the current frame, shadowing any outer binding.
    pub fn define(&mut self, name: &str, value: Value) {
        let current = self.current();
        self.frames[current].bindings.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        let index = self.lookup(name)?;
        self.frames[index].bindings.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        let index = self.lookup(name)?;
        self.frames[index].bindings.get_mut(name)
    }

    /// Update the nearest existing binding, or define in the current frame.
    pub fn assign(&mut self, name: &str, value: Value) {
        match self.get_mut(name) {
            Some(slot) => *slot = value,
            None => self.define(name, value),
        }
    }

    /// Bindings of the global frame.
    pub fn globals(&self) -> &BTreeMap<String, Value> {
        &self.frames[0].bindings
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_and_get() {
        let mut env = Environment::new();
        env.define("x", Value::Number(1.0));
        assert_eq!(env.get("x"), Some(&Value::Number(1.0)));
        assert_eq!(env.get("y"), None);
    }

    #[test]
    fn test_call_frame_falls_back_to_globals() {
        let mut env = Environment::new();
        env.define("g", Value::Number(1.0));
        env.push_frame();
        assert_eq!(env.get("g"), Some(&Value::Number(1.0)));
        env.define("local", Value::Bool(true));
        env.pop_frame();
        assert_eq!(env.get("local"), None);
    }

    #[test]
    fn test_define_shadows_and_assign_updates_nearest() {
        let mut env = Environment::new();
        env.define("x", Value::Number(1.0));
        env.push_frame();
        env.define("x", Value::Number(2.0));
        env.assign("x", Value::Number(3.0));
        assert_eq!(env.get("x"), Some(&Value::Number(3.0)));
        env.pop_frame();
        assert_eq!(env.get("x"), Some(&Value::Number(1.0)));
    }

    #[test]
    fn test_assign_reaches_global() {
        let mut env = Environment::new();
        env.define("count", Value::Number(0.0));
        env.push_frame();
        env.assign("count", Value::Number(5.0));
        env.assign("fresh", Value::Null);
        env.pop_frame();
        assert_eq!(env.get("count"), Some(&Value::Number(5.0)));
        assert_eq!(env.get("fresh"), None);
    }

    #[test]
    fn test_nested_calls_do_not_see_caller_locals() {
        let mut env = Environment::new();
        env.push_frame();
        env.define("a", Value::Number(1.0));
        env.push_frame();
        assert_eq!(env.get("a"), None);
        assert_eq!(env.depth(), 3);
    }

    #[test]
    fn test_global_frame_is_never_popped() {
        let mut env = Environment::new();
        env.define("x", Value::Null);
        env.pop_frame();
        assert_eq!(env.depth(), 1);
        assert!(env.globals().contains_key("x"));
    }
}
