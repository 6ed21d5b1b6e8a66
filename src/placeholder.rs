use std::{fmt, sync::Arc};

use leptos::prelude::*;

/// What to show in place of the wrapped view while the gate is closed.
pub enum Placeholder<P> {
    /// Render nothing at all.
    Nothing,
    /// A view that does not care about the props.
    View(Arc<dyn Fn() -> AnyView + Send + Sync>),
    /// A view built from the same props the wrapped view would get.
    Component(Arc<dyn Fn(P) -> AnyView + Send + Sync>),
}

impl<P> Placeholder<P> {
    pub fn nothing() -> Self {
        Self::Nothing
    }

    pub fn view<F, V>(f: F) -> Self
    where
        F: Fn() -> V + Send + Sync + 'static,
        V: IntoView + 'static,
    {
        Self::View(Arc::new(move || f().into_any()))
    }

    pub fn component<F, V>(f: F) -> Self
    where
        F: Fn(P) -> V + Send + Sync + 'static,
        V: IntoView + 'static,
    {
        Self::Component(Arc::new(move |props| f(props).into_any()))
    }

    pub fn is_nothing(&self) -> bool {
        matches!(self, Self::Nothing)
    }

    pub fn render(&self, props: P) -> AnyView {
        match self {
            Self::Nothing => ().into_any(),
            Self::View(f) => f(),
            Self::Component(f) => f(props),
        }
    }
}

impl<P> Default for Placeholder<P> {
    fn default() -> Self {
        Self::Nothing
    }
}

impl<P> Clone for Placeholder<P> {
    fn clone(&self) -> Self {
        match self {
            Self::Nothing => Self::Nothing,
            Self::View(f) => Self::View(f.clone()),
            Self::Component(f) => Self::Component(f.clone()),
        }
    }
}

impl<P> From<ViewFn> for Placeholder<P> {
    fn from(view: ViewFn) -> Self {
        Self::View(Arc::new(move || view.run()))
    }
}

impl<P> fmt::Debug for Placeholder<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Nothing => "Nothing",
            Self::View(_) => "View",
            Self::Component(_) => "Component",
        })
    }
}
