use std::{fmt, sync::Arc};

type PropsHook<P> = Arc<dyn Fn(&P) + Send + Sync>;
type TransitionHook<P> = Arc<dyn Fn(&P, &P) + Send + Sync>;
type VetoHook<P> = Arc<dyn Fn(&P, &P) -> bool + Send + Sync>;

/// The points in the life of a composed component where caller supplied
/// hooks may be run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    WillMount,
    DidMount,
    WillReceiveProps,
    ShouldUpdate,
    WillUpdate,
    DidUpdate,
    WillUnmount,
}

impl LifecycleEvent {
    pub const ALL: [LifecycleEvent; 7] = [
        Self::WillMount,
        Self::DidMount,
        Self::WillReceiveProps,
        Self::ShouldUpdate,
        Self::WillUpdate,
        Self::DidUpdate,
        Self::WillUnmount,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::WillMount => "will_mount",
            Self::DidMount => "did_mount",
            Self::WillReceiveProps => "will_receive_props",
            Self::ShouldUpdate => "should_update",
            Self::WillUpdate => "will_update",
            Self::DidUpdate => "did_update",
            Self::WillUnmount => "will_unmount",
        }
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Hooks run alongside the composed component's own lifecycle.
///
/// Every hook is optional.  The hooks receive the incoming props of
/// the composed component, i.e. before the requirements are mapped
/// from them.
///
/// Of note is [`should_update`](Self::should_update), which can only
/// veto an update: returning `false` suppresses it, while returning
/// `true` (or not setting the hook at all) lets it proceed.
pub struct Lifecycles<P> {
    will_mount: Option<PropsHook<P>>,
    did_mount: Option<PropsHook<P>>,
    will_receive_props: Option<TransitionHook<P>>,
    should_update: Option<VetoHook<P>>,
    will_update: Option<TransitionHook<P>>,
    did_update: Option<TransitionHook<P>>,
    will_unmount: Option<PropsHook<P>>,
}

impl<P> Lifecycles<P> {
    pub fn new() -> Self {
        Self {
            will_mount: None,
            did_mount: None,
            will_receive_props: None,
            should_update: None,
            will_update: None,
            did_update: None,
            will_unmount: None,
        }
    }

    /// Before the first render, with the initial props.
    pub fn will_mount(mut self, f: impl Fn(&P) + Send + Sync + 'static) -> Self {
        self.will_mount = Some(Arc::new(f));
        self
    }

    /// After the first render.
    pub fn did_mount(mut self, f: impl Fn(&P) + Send + Sync + 'static) -> Self {
        self.did_mount = Some(Arc::new(f));
        self
    }

    /// Whenever new props arrive, with the current then the next props,
    /// whether or not the update goes ahead.
    pub fn will_receive_props(mut self, f: impl Fn(&P, &P) + Send + Sync + 'static) -> Self {
        self.will_receive_props = Some(Arc::new(f));
        self
    }

    pub fn should_update(mut self, f: impl Fn(&P, &P) -> bool + Send + Sync + 'static) -> Self {
        self.should_update = Some(Arc::new(f));
        self
    }

    /// Before an allowed update is rendered, with the current then the
    /// next props.
    pub fn will_update(mut self, f: impl Fn(&P, &P) + Send + Sync + 'static) -> Self {
        self.will_update = Some(Arc::new(f));
        self
    }

    /// After an update is rendered, with the previous then the current
    /// props.
    pub fn did_update(mut self, f: impl Fn(&P, &P) + Send + Sync + 'static) -> Self {
        self.did_update = Some(Arc::new(f));
        self
    }

    pub fn will_unmount(mut self, f: impl Fn(&P) + Send + Sync + 'static) -> Self {
        self.will_unmount = Some(Arc::new(f));
        self
    }

    pub fn handles(&self, event: LifecycleEvent) -> bool {
        match event {
            LifecycleEvent::WillMount => self.will_mount.is_some(),
            LifecycleEvent::DidMount => self.did_mount.is_some(),
            LifecycleEvent::WillReceiveProps => self.will_receive_props.is_some(),
            LifecycleEvent::ShouldUpdate => self.should_update.is_some(),
            LifecycleEvent::WillUpdate => self.will_update.is_some(),
            LifecycleEvent::DidUpdate => self.did_update.is_some(),
            LifecycleEvent::WillUnmount => self.will_unmount.is_some(),
        }
    }

    pub(crate) fn run_will_mount(&self, props: &P) {
        run(&self.will_mount, LifecycleEvent::WillMount, |f| f(props));
    }

    pub(crate) fn run_did_mount(&self, props: &P) {
        run(&self.did_mount, LifecycleEvent::DidMount, |f| f(props));
    }

    pub(crate) fn run_will_receive_props(&self, current: &P, next: &P) {
        run(
            &self.will_receive_props,
            LifecycleEvent::WillReceiveProps,
            |f| f(current, next),
        );
    }

    pub(crate) fn allows_update(&self, current: &P, next: &P) -> bool {
        match &self.should_update {
            Some(f) => {
                let allowed = f(current, next);
                tracing::trace!(event = %LifecycleEvent::ShouldUpdate, allowed);
                allowed
            }
            None => true,
        }
    }

    pub(crate) fn run_will_update(&self, current: &P, next: &P) {
        run(&self.will_update, LifecycleEvent::WillUpdate, |f| {
            f(current, next)
        });
    }

    pub(crate) fn run_did_update(&self, previous: &P, current: &P) {
        run(&self.did_update, LifecycleEvent::DidUpdate, |f| {
            f(previous, current)
        });
    }

    pub(crate) fn run_will_unmount(&self, props: &P) {
        run(&self.will_unmount, LifecycleEvent::WillUnmount, |f| f(props));
    }
}

fn run<H: ?Sized>(hook: &Option<Arc<H>>, event: LifecycleEvent, call: impl FnOnce(&H)) {
    if let Some(hook) = hook {
        tracing::trace!(%event, "running lifecycle hook");
        call(hook);
    }
}

impl<P> Default for Lifecycles<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Clone for Lifecycles<P> {
    fn clone(&self) -> Self {
        Self {
            will_mount: self.will_mount.clone(),
            did_mount: self.did_mount.clone(),
            will_receive_props: self.will_receive_props.clone(),
            should_update: self.should_update.clone(),
            will_update: self.will_update.clone(),
            did_update: self.did_update.clone(),
            will_unmount: self.will_unmount.clone(),
        }
    }
}

impl<P> fmt::Debug for Lifecycles<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                LifecycleEvent::ALL
                    .iter()
                    .filter(|event| self.handles(**event))
                    .map(LifecycleEvent::name),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn defaults_allow_and_do_nothing() {
        let lifecycles = Lifecycles::<u8>::default();
        assert!(LifecycleEvent::ALL.iter().all(|e| !lifecycles.handles(*e)));
        assert!(lifecycles.allows_update(&1, &2));
        lifecycles.run_will_mount(&1);
        lifecycles.run_will_unmount(&1);
    }

    #[test]
    fn veto_only() {
        let lifecycles = Lifecycles::<u8>::new().should_update(|_, next| *next != 0);
        assert!(lifecycles.handles(LifecycleEvent::ShouldUpdate));
        assert!(lifecycles.allows_update(&1, &2));
        assert!(!lifecycles.allows_update(&1, &0));
    }

    #[test]
    fn hooks_receive_props() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let lifecycles = Lifecycles::<u8>::new()
            .will_mount({
                let seen = seen.clone();
                move |p| seen.lock().unwrap().push(("will_mount", *p, *p))
            })
            .did_update({
                let seen = seen.clone();
                move |prev, cur| seen.lock().unwrap().push(("did_update", *prev, *cur))
            });
        lifecycles.run_will_mount(&1);
        lifecycles.run_did_mount(&1);
        lifecycles.run_did_update(&1, &2);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![("will_mount", 1, 1), ("did_update", 1, 2)],
        );
        assert_eq!(format!("{lifecycles:?}"), r#"["will_mount", "did_update"]"#);
    }
}
