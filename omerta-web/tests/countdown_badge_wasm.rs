//! Browser tests for the live countdown badge. Run with
//! `wasm-pack test --headless --firefox omerta-web`.
#![cfg(target_arch = "wasm32")]

use gloo::timers::callback::Timeout;
use gloo::timers::future::TimeoutFuture;
use omerta_web::clock::now_ms;
use omerta_web::components::CountdownBadge;
use omerta_web::components::countdown_badge::Props;
use omerta_web::game::CountdownKind;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen_test::*;
use yew::prelude::*;

wasm_bindgen_test_configure!(run_in_browser);

fn mount_point(id: &str) -> web_sys::Element {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .expect("document");
    let root = document.create_element("div").expect("create div");
    root.set_id(id);
    document
        .body()
        .expect("body")
        .append_child(&root)
        .expect("append root");
    root
}

fn counter() -> (Rc<Cell<u32>>, Callback<()>) {
    let fired = Rc::new(Cell::new(0));
    let callback = {
        let fired = fired.clone();
        Callback::from(move |()| fired.set(fired.get() + 1))
    };
    (fired, callback)
}

#[wasm_bindgen_test]
async fn badge_expires_once_and_stops_ticking() {
    let root = mount_point("badge-expiry");
    let (fired, on_expired) = counter();
    let start = now_ms();
    yew::Renderer::<CountdownBadge>::with_root_and_props(
        root.clone(),
        Props {
            end_ms: start + 1_200,
            kind: CountdownKind::Attack,
            now_ms: start,
            label: None,
            on_expired,
        },
    )
    .render();

    TimeoutFuture::new(3_500).await;
    assert_eq!(fired.get(), 1);
    let settled = root.text_content().unwrap_or_default();
    assert!(settled.contains("Done"), "{settled}");

    TimeoutFuture::new(2_200).await;
    assert_eq!(fired.get(), 1);
    assert_eq!(root.text_content().unwrap_or_default(), settled);
}

#[wasm_bindgen_test]
async fn unmounted_badge_never_fires() {
    let root = mount_point("badge-unmount");
    let (fired, on_expired) = counter();
    let start = now_ms();
    let handle = yew::Renderer::<CountdownBadge>::with_root_and_props(
        root,
        Props {
            end_ms: start + 1_500,
            kind: CountdownKind::Cooldown,
            now_ms: start,
            label: None,
            on_expired,
        },
    )
    .render();

    TimeoutFuture::new(200).await;
    handle.destroy();
    TimeoutFuture::new(3_000).await;
    assert_eq!(fired.get(), 0);
}

#[derive(Properties, PartialEq)]
struct ExtendingProps {
    start: u64,
    on_expired: Callback<()>,
}

/// Pushes the badge's end time out shortly after mounting.
#[function_component(ExtendingHost)]
fn extending_host(p: &ExtendingProps) -> Html {
    let end = use_state(|| p.start + 1_000);
    {
        let end = end.clone();
        let later = p.start + 60_000;
        use_effect_with((), move |()| {
            let timeout = Timeout::new(200, move || end.set(later));
            move || drop(timeout)
        });
    }
    html! {
        <CountdownBadge
            end_ms={*end}
            kind={CountdownKind::Travel}
            now_ms={p.start}
            on_expired={p.on_expired.clone()}
        />
    }
}

#[wasm_bindgen_test]
async fn new_end_time_replaces_the_running_timer() {
    let root = mount_point("badge-extend");
    let (fired, on_expired) = counter();
    yew::Renderer::<ExtendingHost>::with_root_and_props(
        root.clone(),
        ExtendingProps {
            start: now_ms(),
            on_expired,
        },
    )
    .render();

    TimeoutFuture::new(2_500).await;
    assert_eq!(fired.get(), 0);
    let text = root.text_content().unwrap_or_default();
    assert!(!text.contains("Arrived"), "{text}");
    assert!(text.contains('s'), "{text}");
}
