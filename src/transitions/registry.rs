use std::collections::HashMap;

use crate::error::{Result, TransitionError};
use crate::transitions::{Crossfade, SlideUp, Spin, Transition, ZoomIn};

/// Registry for managing available transitions
///
/// Transitions are registered by name and instantiated on lookup.
pub struct TransitionRegistry {
    transitions: HashMap<String, Box<dyn Fn() -> Box<dyn Transition>>>,
}

impl TransitionRegistry {
    /// Create a new registry with all built-in transitions
    pub fn new() -> Self {
        let mut registry = Self {
            transitions: HashMap::new(),
        };

        registry.register_builtin_transitions();
        registry
    }

    fn register_builtin_transitions(&mut self) {
        self.register("crossfade".to_string(), || Box::new(Crossfade::new()));
        self.register("slide".to_string(), || Box::new(SlideUp::new()));
        self.register("zoom".to_string(), || Box::new(ZoomIn::new()));
        self.register("spin".to_string(), || Box::new(Spin::new()));
    }

    /// Register a custom transition, replacing any previous one with that name
    pub fn register<F>(&mut self, name: String, factory: F)
    where
        F: Fn() -> Box<dyn Transition> + 'static,
    {
        self.transitions.insert(name, Box::new(factory));
    }

    /// Get a new instance of a transition by name
    pub fn get_transition(&self, name: &str) -> Option<Box<dyn Transition>> {
        self.transitions.get(name).map(|factory| factory())
    }

    /// Like [`get_transition`](Self::get_transition), but unknown names are an error
    pub fn require(&self, name: &str) -> Result<Box<dyn Transition>> {
        self.get_transition(name).ok_or_else(|| {
            TransitionError::NotFound {
                name: name.to_string(),
            }
            .into()
        })
    }

    /// All registered names, sorted
    pub fn available_transitions(&self) -> Vec<String> {
        let mut names: Vec<String> = self.transitions.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn has_transition(&self, name: &str) -> bool {
        self.transitions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

impl Default for TransitionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
