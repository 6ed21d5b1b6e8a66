#[cfg(feature = "ssr")]
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use leptos::prelude::*;
#[cfg(feature = "ssr")]
use leptos_needs::{component::NeedyComponent, ComponentRef};
use leptos_needs::{needs, Lifecycles, NeedsComponent, Placeholder, Requirements, Wrapped};

#[cfg(feature = "ssr")]
mod ssr {
    use leptos::prelude::Owner;
    pub use futures::StreamExt;

    pub fn init_renderer() -> Owner {
        let _ = any_spawner::Executor::init_tokio();
        let owner = Owner::new();
        owner.set();
        owner
    }
}
#[cfg(feature = "ssr")]
use ssr::*;

#[derive(Clone, Debug, PartialEq)]
struct Items {
    items: Vec<String>,
    loading: bool,
}

impl Items {
    fn new(items: &[&str], loading: bool) -> Self {
        Self {
            items: items.iter().map(|s| s.to_string()).collect(),
            loading,
        }
    }
}

fn item_list(props: Items) -> impl IntoView {
    view! {
        <ul>
            {props.items.into_iter().map(|item| view! { <li>{item}</li> }).collect_view()}
        </ul>
    }
}

fn composed(lifecycles: Lifecycles<Items>) -> NeedsComponent<Items> {
    needs(|props: &Items| {
        Requirements::new(!props.items.is_empty())
            .in_progress(props.loading)
            .progress(Placeholder::view(|| view! { <p>"Loading items"</p> }))
            .blocked(Placeholder::component(|props: Items| {
                view! { <p>"No items; "{props.items.len()}" found"</p> }
            }))
    })
    .lifecycles(lifecycles)
    .wrap(Wrapped::new(item_list))
}

#[test]
fn display_name() {
    assert_eq!(
        composed(Lifecycles::new()).display_name(),
        "Needs(NeedyComponent(item_list))",
    );
}

#[cfg(feature = "ssr")]
#[tokio::test]
async fn blocked_without_items() {
    let _owner = init_renderer();
    let app = composed(Lifecycles::new()).render(Items::new(&[], false));
    let html = app.to_html_stream_in_order().collect::<String>().await;
    assert!(html.contains("No items; "));
    assert!(!html.contains("Loading items"));
    assert!(!html.contains("<ul>"));
}

#[cfg(feature = "ssr")]
#[tokio::test]
async fn progress_while_loading() {
    let _owner = init_renderer();
    let app = composed(Lifecycles::new()).render(Items::new(&[], true));
    let html = app.to_html_stream_in_order().collect::<String>().await;
    assert!(html.contains("Loading items"));
    assert!(!html.contains("No items"));
}

#[cfg(feature = "ssr")]
#[tokio::test]
async fn wrapped_with_items() {
    let _owner = init_renderer();
    let app = composed(Lifecycles::new()).render(Items::new(&["apple", "pear"], true));
    let html = app.to_html_stream_in_order().collect::<String>().await;
    assert!(html.contains("<ul>"));
    assert!(html.contains("apple"));
    assert!(html.contains("pear"));
    assert!(!html.contains("Loading items"));
}

#[cfg(feature = "ssr")]
#[tokio::test]
async fn mount_and_unmount() -> anyhow::Result<()> {
    let owner = init_renderer();
    let log = Arc::new(Mutex::new(Vec::new()));
    let lifecycles = Lifecycles::new()
        .will_mount({
            let log = log.clone();
            move |_: &Items| log.lock().unwrap().push("will_mount")
        })
        .did_mount({
            let log = log.clone();
            move |_: &Items| log.lock().unwrap().push("did_mount")
        })
        .will_unmount({
            let log = log.clone();
            move |_: &Items| log.lock().unwrap().push("will_unmount")
        });
    let instance = ComponentRef::new();
    let app = composed(lifecycles).render_ref(Items::new(&["apple"], false), instance.clone());
    let html = app.to_html_stream_in_order().collect::<String>().await;
    assert!(html.contains("apple"));
    assert!(instance.is_set());

    owner.cleanup();
    assert!(!instance.is_set());
    assert_eq!(
        *log.lock().unwrap(),
        vec!["will_mount", "did_mount", "will_unmount"],
    );
    Ok(())
}

#[cfg(feature = "ssr")]
#[tokio::test]
async fn needy_component_progress() {
    let _owner = init_renderer();
    let calls = Arc::new(AtomicUsize::new(0));
    let needs = {
        let calls = calls.clone();
        move || {
            calls.fetch_add(1, Ordering::SeqCst);
        }
    };
    let app = view! {
        <NeedyComponent
            condition=false
            needs=needs
            needs_in_progress=true
            progress=|| "Loading"
            blocked=|| "Blocked"
        >
            <p>"Content"</p>
        </NeedyComponent>
    };
    let html = app.to_html_stream_in_order().collect::<String>().await;
    assert!(html.contains("Loading"));
    assert!(!html.contains("Blocked"));
    assert!(!html.contains("Content"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[cfg(feature = "ssr")]
#[tokio::test]
async fn needy_component_blocked_by_default() {
    let _owner = init_renderer();
    let app = view! {
        <NeedyComponent condition=false blocked=|| "Blocked">
            <p>"Content"</p>
        </NeedyComponent>
    };
    let html = app.to_html_stream_in_order().collect::<String>().await;
    assert!(html.contains("Blocked"));
    assert!(!html.contains("Content"));
}

#[cfg(feature = "ssr")]
#[tokio::test]
async fn needy_component_open() {
    let _owner = init_renderer();
    let wrapped_ref = ComponentRef::new();
    let app = view! {
        <NeedyComponent condition=true wrapped_ref=wrapped_ref.clone()>
            <p>"Content"</p>
        </NeedyComponent>
    };
    let html = app.to_html_stream_in_order().collect::<String>().await;
    assert!(html.contains("Content"));
    assert!(wrapped_ref.is_set());
}
