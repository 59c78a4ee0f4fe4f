use mvcs_model::Model;
use std::collections::HashMap;
use std::ops::Index;

/// Name-to-model mapping in discovery order.
///
/// Built once by the loader and read-only afterwards; mutation is
/// crate-private.
#[derive(Debug, Clone)]
pub struct Registry<M> {
    models: Vec<M>,
    index: HashMap<String, usize>,
}

/// Outcome of registering a model during discovery.
pub(crate) enum Registered {
    New(usize),
    Replaced(usize),
}

impl<M: Model> Registry<M> {
    pub(crate) fn new() -> Self {
        Self {
            models: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Registers `model` under its name. A model registered under the same
    /// name earlier is replaced in place, keeping its discovery position.
    pub(crate) fn insert(&mut self, model: M) -> Registered {
        let existing = self.index.get(model.name()).copied();
        match existing {
            Some(pos) => {
                self.models[pos] = model;
                Registered::Replaced(pos)
            }
            None => {
                let pos = self.models.len();
                self.index.insert(model.name().to_string(), pos);
                self.models.push(model);
                Registered::New(pos)
            }
        }
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut M> {
        let pos = *self.index.get(name)?;
        self.models.get_mut(pos)
    }

    pub fn get(&self, name: &str) -> Option<&M> {
        self.index.get(name).map(|&pos| &self.models[pos])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Model names in discovery order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.models.iter().map(Model::name)
    }

    /// Models in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &M> {
        self.models.iter()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl<M: Model> Index<&str> for Registry<M> {
    type Output = M;

    /// # Panics
    ///
    /// Panics if no model is registered under `name`.
    fn index(&self, name: &str) -> &M {
        match self.get(name) {
            Some(model) => model,
            None => panic!("no model registered under `{name}`"),
        }
    }
}
