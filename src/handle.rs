use std::{
    fmt,
    sync::{Arc, PoisonError, RwLock},
};

/// A handle to the instance of the wrapped view, if it is currently
/// being rendered.
///
/// Much like a [`NodeRef`](leptos::prelude::NodeRef), the parent creates
/// one of these and passes it to
/// [`NeedsComponent::render_ref`](crate::NeedsComponent::render_ref).
/// The wrapped view records itself through [`set`](Self::set) when it is
/// rendered, and the gate clears it again on every pass that renders a
/// placeholder instead, as well as when the component is unmounted.
pub struct ComponentRef<I> {
    inner: Arc<RwLock<Option<I>>>,
}

impl<I> ComponentRef<I> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(None)),
        }
    }

    pub fn set(&self, instance: I) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = Some(instance);
    }

    pub fn is_set(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub(crate) fn clear(&self) {
        if self
            .inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .is_some()
        {
            tracing::trace!("wrapped instance released");
        }
    }
}

impl<I: Clone> ComponentRef<I> {
    pub fn get(&self) -> Option<I> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl<I> Clone for ComponentRef<I> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<I> Default for ComponentRef<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I> fmt::Debug for ComponentRef<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRef")
            .field("set", &self.is_set())
            .finish()
    }
}
