use std::fmt;

use crate::recorder::Recorder;

/// Strategy that declares a model's associations on a [`Recorder`].
pub type AssociateFn = Box<dyn Fn(&mut Recorder<'_>) + Send + Sync>;

/// A loaded model plus its optional `associate` strategy.
pub struct ModelDescriptor<M> {
    pub model: M,
    pub associate: Option<AssociateFn>,
}

impl<M> ModelDescriptor<M> {
    /// A model that declares no associations.
    pub fn new(model: M) -> Self {
        Self {
            model,
            associate: None,
        }
    }

    pub fn with_associate<F>(mut self, associate: F) -> Self
    where
        F: Fn(&mut Recorder<'_>) + Send + Sync + 'static,
    {
        self.associate = Some(Box::new(associate));
        self
    }

    pub fn has_associate(&self) -> bool {
        self.associate.is_some()
    }
}

impl<M: fmt::Debug> fmt::Debug for ModelDescriptor<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelDescriptor")
            .field("model", &self.model)
            .field("associate", &self.associate.is_some())
            .finish()
    }
}
