use leptos::prelude::*;

use crate::{
    handle::ComponentRef,
    placeholder::Placeholder,
    requirements::{MapProps, NeedsFn, Requirements},
    wrapper::{Needs, Wrapped},
};

/// Gate the children on a condition, directly inside a `view!`.
///
/// This is the same gate as the one composed by [`needs`](crate::needs),
/// except the requirements are given as props.  While `condition` is
/// `false`, `needs` is called once (and only once until `condition`
/// becomes `true` again), and either `progress` or `blocked` is shown
/// depending on `needs_in_progress`.
///
/// ```
/// use leptos::prelude::*;
/// use leptos_needs::component::NeedyComponent;
///
/// #[component]
/// fn Profile() -> impl IntoView {
///     let (loaded, set_loaded) = signal(false);
///     let (loading, set_loading) = signal(false);
///     view! {
///         <NeedyComponent
///             condition=loaded
///             needs=move || {
///                 set_loading.set(true);
///                 // start fetching, then set_loaded once done
///                 let _ = set_loaded;
///             }
///             needs_in_progress=loading
///             progress=|| view! { <p>"Loading..."</p> }
///         >
///             <p>"Profile"</p>
///         </NeedyComponent>
///     }
/// }
/// ```
#[component]
pub fn NeedyComponent(
    /// The children are rendered only while this holds.
    #[prop(into)]
    condition: Signal<bool>,
    /// Invoked to try and satisfy the condition.
    #[prop(optional, into)]
    needs: NeedsFn,
    /// Whether what `needs` started is still under way.
    #[prop(into, default = Signal::stored(false))]
    needs_in_progress: Signal<bool>,
    /// Shown while the condition is unmet and the needs are in progress.
    #[prop(optional, into)]
    progress: ViewFn,
    /// Shown while the condition is unmet and nothing is in progress.
    #[prop(optional, into)]
    blocked: ViewFn,
    /// Set while the children are rendered.
    #[prop(optional)]
    wrapped_ref: Option<ComponentRef<()>>,
    children: ChildrenFn,
) -> impl IntoView {
    let progress = Placeholder::<()>::from(progress);
    let blocked = Placeholder::<()>::from(blocked);
    let map = MapProps::derive(move |_: &()| {
        Requirements::new(condition.get())
            .needs(needs.clone())
            .in_progress(needs_in_progress.get())
            .progress(progress.clone())
            .blocked(blocked.clone())
    });

    Needs::new(map)
        .wrap(Wrapped::new(move |_: ()| children()).display_name("Children"))
        .render_ref((), wrapped_ref.unwrap_or_default())
}
