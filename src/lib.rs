//! This crate provides a helper to defer rendering of a view within the
//! Leptos framework until whatever it needs is available.  A view is
//! wrapped together with a function that maps its props into a set of
//! [`Requirements`], chiefly a boolean condition.  Until the condition
//! holds, the wrapped view is not rendered; instead a "needs" callback
//! is invoked to try and satisfy the condition, and a placeholder is
//! shown in the meantime.
//!
//! ## Use case
//!
//! A view that lists some items may only make sense once the items have
//! been loaded.  Rather than having every such view check for the data
//! and kick off the fetch itself, the view can be wrapped such that it
//! is only ever rendered with the data present, with the fetch started
//! by the needs callback and a progress indicator shown while that is
//! under way.
//!
//! The gate does not track the work the callback started in any way.
//! The callback is invoked once for every contiguous run of passes
//! where the condition is unmet, and it is expected that the completion
//! of that work will be reflected back into the props (or the signals
//! read while mapping the props), which flips either the condition or
//! the in-progress flag.  Once the condition has been met again, a
//! subsequent unmet pass will invoke the callback once more.
//!
//! # Example
//!
//! ```
//! use leptos::prelude::*;
//! use leptos_needs::{needs, Lifecycles, Placeholder, Requirements, Wrapped};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Items {
//!     items: Vec<String>,
//!     loading: bool,
//! }
//!
//! fn item_list(props: Items) -> impl IntoView {
//!     view! {
//!         <ul>
//!             {props.items.into_iter().map(|item| view! { <li>{item}</li> }).collect_view()}
//!         </ul>
//!     }
//! }
//!
//! let composed = needs(|props: &Items| {
//!     Requirements::new(!props.items.is_empty())
//!         .needs(|| {
//!             // kick off the fetch here
//!         })
//!         .in_progress(props.loading)
//!         .progress(Placeholder::view(|| view! { <p>"Loading..."</p> }))
//!         .blocked(Placeholder::component(|props: Items| {
//!             view! { <p>{props.items.len()}" items so far"</p> }
//!         }))
//! })
//! .lifecycles(Lifecycles::new().should_update(|current: &Items, next: &Items| current != next))
//! .wrap(Wrapped::new(item_list));
//!
//! assert_eq!(composed.display_name(), "Needs(NeedyComponent(item_list))");
//!
//! #[component]
//! fn App() -> impl IntoView {
//!     let (items, _set_items) = signal(Items { items: vec![], loading: false });
//!     let composed = needs(|props: &Items| Requirements::new(!props.items.is_empty()))
//!         .wrap(Wrapped::new(item_list));
//!     composed.render(items)
//! }
//! ```
//!
//! For use directly within a `view!`, the [`NeedyComponent`](
//! component::NeedyComponent) component provides the same gate with the
//! requirements given as props, and the wrapped view as its children.
//!
//! # Feature Flags
#![cfg_attr(
    feature = "document-features",
    cfg_attr(doc, doc = ::document_features::document_features!())
)]

pub mod component;
mod error;
mod gate;
mod handle;
mod lifecycle;
pub mod meta;
mod placeholder;
mod requirements;
mod wrapper;

#[cfg(test)]
mod tests;

pub use error::NeedsError;
pub use gate::{NeedsGate, Outcome};
pub use handle::ComponentRef;
pub use lifecycle::{LifecycleEvent, Lifecycles};
pub use meta::Metadata;
pub use placeholder::Placeholder;
pub use requirements::{MapProps, NeedsFn, Requirements};
pub use wrapper::{needs, Needs, NeedsComponent, Wrapped};
