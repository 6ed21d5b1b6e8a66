//! Composing a view with its needs.
//!
//! The [`needs`] function (or [`Needs::fixed`] for requirements that do
//! not depend on the props) provides a factory which then
//! [`wrap`](Needs::wrap)s a view into a [`NeedsComponent`].  Rendering
//! that component with some props will, on every change of those props,
//! map the props into [`Requirements`], then let the gate decide
//! whether the wrapped view or one of the placeholders gets rendered.
//!
//! Every change of the props is an update pass, with the caller
//! supplied [`Lifecycles`] hooks run at the appropriate points.  The
//! mapping function is always evaluated as a tracked computation, so
//! any signal read by the mapping will also trigger an update pass when
//! it changes.  The hooks, the needs callback and the views themselves
//! are run untracked.

use std::{
    fmt,
    sync::{Arc, PoisonError, RwLock},
};

use leptos::prelude::*;

use crate::{
    error::NeedsError,
    gate::{NeedsGate, Outcome},
    handle::ComponentRef,
    lifecycle::Lifecycles,
    meta::{component_name, gate_name, wrapper_name, Metadata},
    requirements::{MapProps, Requirements},
};

/// Wrap a view such that it will only be rendered once the requirements
/// derived from its props by `map` are met.
///
/// ```
/// use leptos::prelude::*;
/// use leptos_needs::{needs, Placeholder, Requirements, Wrapped};
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Listing {
///     items: Vec<String>,
/// }
///
/// fn item_count(listing: Listing) -> impl IntoView {
///     view! { <p>{listing.items.len()}" items"</p> }
/// }
///
/// let composed = needs(|listing: &Listing| {
///     Requirements::new(!listing.items.is_empty())
///         .blocked(Placeholder::view(|| view! { <p>"Nothing yet."</p> }))
/// })
/// .wrap(Wrapped::new(item_count));
///
/// assert_eq!(composed.display_name(), "Needs(NeedyComponent(item_count))");
/// ```
pub fn needs<P, F>(map: F) -> Needs<P>
where
    P: Clone + Send + Sync + 'static,
    F: Fn(&P) -> Requirements<P> + Send + Sync + 'static,
{
    Needs::new(MapProps::derive(map))
}

/// The factory producing a [`NeedsComponent`] out of a [`Wrapped`] view.
pub struct Needs<P> {
    map: MapProps<P>,
    lifecycles: Lifecycles<P>,
}

impl<P> Needs<P>
where
    P: Clone + Send + Sync + 'static,
{
    pub fn new(map: impl Into<MapProps<P>>) -> Self {
        Self {
            map: map.into(),
            lifecycles: Lifecycles::new(),
        }
    }

    /// The same requirements for every pass, whatever the props are.
    pub fn fixed(requirements: Requirements<P>) -> Self {
        Self::new(MapProps::fixed(requirements))
    }

    pub fn lifecycles(mut self, lifecycles: Lifecycles<P>) -> Self {
        self.lifecycles = lifecycles;
        self
    }

    /// Compose the gate around `wrapped`.
    ///
    /// The metadata of the wrapped view is carried over, and the display
    /// name of the result will be `Needs(NeedyComponent(<name>))`.
    pub fn wrap<I: 'static>(self, wrapped: Wrapped<P, I>) -> NeedsComponent<P, I> {
        let gate_name = gate_name(&wrapped.name());
        let display_name = wrapper_name(&gate_name);
        let mut metadata = Metadata::new();
        metadata.hoist_from(&wrapped.metadata);
        tracing::debug!(
            component = display_name.as_str(),
            lifecycles = ?self.lifecycles,
            metadata = metadata.len(),
            "composed needy component",
        );
        NeedsComponent {
            inner: Arc::new(NeedsComponentInner {
                map: self.map,
                lifecycles: self.lifecycles,
                wrapped,
                gate_name,
                display_name,
                metadata,
            }),
        }
    }
}

impl<P> fmt::Debug for Needs<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Needs")
            .field("map", &self.map)
            .field("lifecycles", &self.lifecycles)
            .finish()
    }
}

/// The view being gated.
///
/// `I` is the type of the instance the view may expose through a
/// [`ComponentRef`]; views constructed through [`Wrapped::new`] expose
/// `()`, which simply indicates that they are being rendered.
pub struct Wrapped<P, I = ()> {
    render: Arc<dyn Fn(P, ComponentRef<I>) -> AnyView + Send + Sync>,
    display_name: Option<String>,
    type_name: &'static str,
    metadata: Metadata,
}

impl<P: 'static> Wrapped<P, ()> {
    pub fn new<F, V>(f: F) -> Self
    where
        F: Fn(P) -> V + Send + Sync + 'static,
        V: IntoView + 'static,
    {
        Self {
            render: Arc::new(move |props, instance: ComponentRef<()>| {
                instance.set(());
                f(props).into_any()
            }),
            display_name: None,
            type_name: std::any::type_name::<F>(),
            metadata: Metadata::new(),
        }
    }
}

impl<P: 'static, I: 'static> Wrapped<P, I> {
    /// Wrap a view that records its own instance onto the provided
    /// [`ComponentRef`].
    pub fn with_ref<F, V>(f: F) -> Self
    where
        F: Fn(P, ComponentRef<I>) -> V + Send + Sync + 'static,
        V: IntoView + 'static,
    {
        Self {
            render: Arc::new(move |props, instance| f(props, instance).into_any()),
            display_name: None,
            type_name: std::any::type_name::<F>(),
            metadata: Metadata::new(),
        }
    }

    /// Name this view.  Without one, the name of the function is used,
    /// and closures will be `Unknown`.
    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn meta(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Result<Self, NeedsError> {
        self.metadata.insert(key, value)?;
        Ok(self)
    }

    pub fn name(&self) -> String {
        component_name(self.display_name.as_deref(), self.type_name)
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }
}

impl<P, I> fmt::Debug for Wrapped<P, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wrapped")
            .field("display_name", &self.display_name)
            .field("type_name", &self.type_name)
            .field("metadata", &self.metadata)
            .finish()
    }
}

/// A view composed with the gate, produced by [`Needs::wrap`].
///
/// This is cheap to clone, and may be rendered any number of times,
/// with every rendering having its own gate.
pub struct NeedsComponent<P, I = ()> {
    inner: Arc<NeedsComponentInner<P, I>>,
}

struct NeedsComponentInner<P, I> {
    map: MapProps<P>,
    lifecycles: Lifecycles<P>,
    wrapped: Wrapped<P, I>,
    gate_name: String,
    display_name: String,
    metadata: Metadata,
}

/// The state committed by the latest allowed pass.
#[derive(Clone)]
pub(crate) struct Frame<P> {
    pub(crate) gate: NeedsGate,
    /// The incoming props as last received, vetoed or not.
    pub(crate) own: P,
    /// The incoming props of the pass before this one, if any.
    pub(crate) previous: Option<P>,
    /// What gets passed through to the views.
    pub(crate) props: P,
    pub(crate) requirements: Requirements<P>,
    pub(crate) outcome: Outcome,
    pub(crate) revision: u64,
}

impl<P, I> NeedsComponent<P, I> {
    /// `Needs(NeedyComponent(<name>))`
    pub fn display_name(&self) -> &str {
        &self.inner.display_name
    }

    /// `NeedyComponent(<name>)`
    pub fn gate_display_name(&self) -> &str {
        &self.inner.gate_name
    }

    /// The metadata carried over from the wrapped view.
    pub fn metadata(&self) -> &Metadata {
        &self.inner.metadata
    }
}

impl<P, I> NeedsComponent<P, I>
where
    P: Clone + Send + Sync + 'static,
    I: Send + Sync + 'static,
{
    pub fn render(&self, props: impl Into<Signal<P>>) -> impl IntoView {
        self.render_ref(props, ComponentRef::new())
    }

    /// Render with a handle that the parent may hold on to, in order to
    /// reach the wrapped instance while it is rendered.
    pub fn render_ref(
        &self,
        props: impl Into<Signal<P>>,
        instance: ComponentRef<I>,
    ) -> impl IntoView {
        let mounted = Arc::new(RwLock::new(None::<P>));
        let frames = self.frames(props.into(), mounted.clone());

        on_cleanup({
            let this = self.clone();
            let instance = instance.clone();
            move || {
                instance.clear();
                let own = mounted
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .take();
                if let Some(own) = own {
                    tracing::debug!(component = this.display_name(), "unmounting");
                    this.inner.lifecycles.run_will_unmount(&own);
                }
            }
        });

        let this = self.clone();
        move || {
            let frame = frames.get();
            untrack(|| this.render_frame(&frame, &instance))
        }
    }

    /// The reactive sequence of committed passes for the given props.
    pub(crate) fn frames(
        &self,
        props: Signal<P>,
        mounted: Arc<RwLock<Option<P>>>,
    ) -> ArcMemo<Frame<P>> {
        let this = self.clone();
        ArcMemo::new_owning(move |current: Option<Frame<P>>| {
            let next = props.get();
            let requirements = this.inner.map.resolve(&next);
            let (frame, changed) = untrack(|| match current {
                None => (this.mount(next, requirements), true),
                Some(current) => this.update(current, next, requirements),
            });
            *mounted.write().unwrap_or_else(PoisonError::into_inner) = Some(frame.own.clone());
            (frame, changed)
        })
    }

    pub(crate) fn mount(&self, own: P, requirements: Requirements<P>) -> Frame<P> {
        self.inner.lifecycles.run_will_mount(&own);
        self.commit(NeedsGate::new(), own, None, requirements, 0)
    }

    /// Returns the frame to keep and whether it is to be rendered.
    pub(crate) fn update(
        &self,
        mut current: Frame<P>,
        next: P,
        requirements: Requirements<P>,
    ) -> (Frame<P>, bool) {
        let lifecycles = &self.inner.lifecycles;
        lifecycles.run_will_receive_props(&current.own, &next);
        if !lifecycles.allows_update(&current.own, &next) {
            tracing::debug!(component = self.display_name(), "update vetoed");
            current.own = next;
            return (current, false);
        }
        lifecycles.run_will_update(&current.own, &next);
        let Frame {
            gate, own, revision, ..
        } = current;
        (
            self.commit(gate, next, Some(own), requirements, revision + 1),
            true,
        )
    }

    fn commit(
        &self,
        mut gate: NeedsGate,
        own: P,
        previous: Option<P>,
        mut requirements: Requirements<P>,
        revision: u64,
    ) -> Frame<P> {
        let called = gate.needs_called();
        let mut outcome = gate.prepare(&requirements);
        if !called && gate.needs_called() {
            // the callback may have written to what the mapping reads, and
            // that write lands while this pass is still being computed
            requirements = self.inner.map.resolve(&own);
            outcome = gate.prepare(&requirements);
            tracing::trace!(?outcome, "requirements resolved again after needs");
        }
        let props = requirements.props.clone().unwrap_or_else(|| own.clone());
        tracing::debug!(
            component = self.display_name(),
            ?outcome,
            revision,
            "gate prepared",
        );
        Frame {
            gate,
            own,
            previous,
            props,
            requirements,
            outcome,
            revision,
        }
    }

    pub(crate) fn render_frame(&self, frame: &Frame<P>, instance: &ComponentRef<I>) -> AnyView {
        instance.clear();
        let view = match frame.outcome {
            Outcome::Wrapped => (self.inner.wrapped.render)(frame.props.clone(), instance.clone()),
            Outcome::Progress | Outcome::Blocked => frame
                .requirements
                .placeholder()
                .render(frame.props.clone()),
        };
        match &frame.previous {
            None => self.inner.lifecycles.run_did_mount(&frame.own),
            Some(previous) => self.inner.lifecycles.run_did_update(previous, &frame.own),
        }
        view
    }
}

impl<P, I> Clone for NeedsComponent<P, I> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<P, I> fmt::Debug for NeedsComponent<P, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NeedsComponent")
            .field("display_name", &self.inner.display_name)
            .field("map", &self.inner.map)
            .field("lifecycles", &self.inner.lifecycles)
            .field("wrapped", &self.inner.wrapped)
            .field("metadata", &self.inner.metadata)
            .finish()
    }
}
