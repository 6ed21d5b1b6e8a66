use std::{fmt, sync::Arc};

use crate::placeholder::Placeholder;

/// The callback invoked by the gate to try and satisfy an unmet
/// condition, e.g. by kicking off a fetch.
///
/// The gate never waits on whatever this starts; completion must be
/// fed back in through the props (or signals read by the mapping) so
/// that the condition or the in-progress flag changes.
#[derive(Clone)]
pub struct NeedsFn(Arc<dyn Fn() + Send + Sync>);

impl NeedsFn {
    /// A callback that does nothing, which is also the default.
    pub fn noop() -> Self {
        Self(Arc::new(|| ()))
    }

    pub fn call(&self) {
        (self.0)()
    }
}

impl Default for NeedsFn {
    fn default() -> Self {
        Self::noop()
    }
}

impl<F> From<F> for NeedsFn
where
    F: Fn() + Send + Sync + 'static,
{
    fn from(f: F) -> Self {
        Self(Arc::new(f))
    }
}

impl fmt::Debug for NeedsFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NeedsFn")
    }
}

/// The control props for the gate, produced from the incoming props of
/// a composed component on every pass.
///
/// Only the condition is required; everything else falls back to a
/// no-op callback and placeholders that render nothing.
pub struct Requirements<P> {
    pub(crate) condition: bool,
    pub(crate) needs: NeedsFn,
    pub(crate) needs_in_progress: bool,
    pub(crate) progress: Placeholder<P>,
    pub(crate) blocked: Placeholder<P>,
    pub(crate) props: Option<P>,
}

impl<P> Requirements<P> {
    pub fn new(condition: bool) -> Self {
        Self {
            condition,
            needs: NeedsFn::noop(),
            needs_in_progress: false,
            progress: Placeholder::Nothing,
            blocked: Placeholder::Nothing,
            props: None,
        }
    }

    /// Set the callback to invoke while the condition is unmet.
    pub fn needs(mut self, needs: impl Into<NeedsFn>) -> Self {
        self.needs = needs.into();
        self
    }

    /// Mark whatever `needs` started as still being in flight, which
    /// selects the progress placeholder over the blocked one.
    pub fn in_progress(mut self, in_progress: bool) -> Self {
        self.needs_in_progress = in_progress;
        self
    }

    pub fn progress(mut self, placeholder: impl Into<Placeholder<P>>) -> Self {
        self.progress = placeholder.into();
        self
    }

    pub fn blocked(mut self, placeholder: impl Into<Placeholder<P>>) -> Self {
        self.blocked = placeholder.into();
        self
    }

    /// Replace the props passed through to the wrapped view and the
    /// placeholders.  Derived props always win over the incoming ones.
    pub fn with_props(mut self, props: P) -> Self {
        self.props = Some(props);
        self
    }

    pub fn condition(&self) -> bool {
        self.condition
    }

    pub fn needs_in_progress(&self) -> bool {
        self.needs_in_progress
    }

    pub(crate) fn placeholder(&self) -> &Placeholder<P> {
        if self.needs_in_progress {
            &self.progress
        } else {
            &self.blocked
        }
    }
}

impl<P: Clone> Clone for Requirements<P> {
    fn clone(&self) -> Self {
        Self {
            condition: self.condition,
            needs: self.needs.clone(),
            needs_in_progress: self.needs_in_progress,
            progress: self.progress.clone(),
            blocked: self.blocked.clone(),
            props: self.props.clone(),
        }
    }
}

impl<P> fmt::Debug for Requirements<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Requirements")
            .field("condition", &self.condition)
            .field("needs_in_progress", &self.needs_in_progress)
            .field("progress", &self.progress)
            .field("blocked", &self.blocked)
            .field("props_overridden", &self.props.is_some())
            .finish()
    }
}

/// How the requirements are obtained from the incoming props.
pub enum MapProps<P> {
    /// The same requirements regardless of the props.
    Fixed(Requirements<P>),
    /// Requirements computed from the props on every pass.
    Derived(Arc<dyn Fn(&P) -> Requirements<P> + Send + Sync>),
}

impl<P: Clone> MapProps<P> {
    pub fn fixed(requirements: Requirements<P>) -> Self {
        Self::Fixed(requirements)
    }

    pub fn derive<F>(f: F) -> Self
    where
        F: Fn(&P) -> Requirements<P> + Send + Sync + 'static,
    {
        Self::Derived(Arc::new(f))
    }

    pub fn resolve(&self, props: &P) -> Requirements<P> {
        match self {
            Self::Fixed(requirements) => requirements.clone(),
            Self::Derived(f) => f(props),
        }
    }
}

impl<P> From<Requirements<P>> for MapProps<P> {
    fn from(requirements: Requirements<P>) -> Self {
        Self::Fixed(requirements)
    }
}

impl<P> fmt::Debug for MapProps<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(requirements) => f.debug_tuple("Fixed").field(requirements).finish(),
            Self::Derived(_) => f.write_str("Derived"),
        }
    }
}
