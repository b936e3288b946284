use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use icondata as i;
use leptos::{portal::Portal, prelude::*};
use leptos_icons::Icon;

use crate::global_state::{
    dialog_settings::{use_dialog_settings, CloseStyle, RenderTarget},
    overlay::{use_overlay_manager, OverlayLease, OverlayManager},
};

static NEXT_HEADING_ID: AtomicUsize = AtomicUsize::new(0);

fn next_heading_id() -> String {
    format!(
        "dialog-title-{}",
        NEXT_HEADING_ID.fetch_add(1, Ordering::Relaxed)
    )
}

/// Takes a lease on the way to open and drops it on the way to closed; a no-op otherwise, so
/// repeated runs with the same state never stack registrations.
fn sync_lease(
    open: bool,
    lease: &mut Option<OverlayLease>,
    manager: &OverlayManager,
    on_close: Callback<()>,
) {
    match (open, lease.is_some()) {
        (true, false) => *lease = Some(manager.acquire(Arc::new(move || on_close.run(())))),
        (false, true) => *lease = None,
        _ => {}
    }
}

#[component]
fn CloseButton(appearance: CloseStyle, label: String, on_close: Callback<()>) -> impl IntoView {
    let mark = match appearance {
        CloseStyle::Icon => view! { <Icon icon=i::CgClose width="1.25em" height="1.25em" /> }.into_any(),
        CloseStyle::Glyph => view! { <span class="text-2xl leading-none" aria-hidden="true">"×"</span> }.into_any(),
    };
    view! {
        <button
            type="button"
            class="absolute top-6 right-6 w-9 h-9 p-2 rounded-full flex items-center justify-center
            text-gray-800 hover:text-gray-900 cursor-pointer
            transition-all duration-200 hover:scale-110 active:scale-95
            focus:outline-none focus:ring-2 focus:ring-offset-2 focus:ring-indigo-500"
            aria-label=label
            on:click=move |_| on_close.run(())
        >
            {mark}
        </button>
    }
}

/// A modal panel over a dimmed backdrop.
///
/// The caller owns visibility: `on_close` fires on Escape, on a backdrop click and on the close
/// control, and it is up to the caller to set `is_open` back to false. While open the dialog holds
/// an [`OverlayLease`], which keeps the page from scrolling and routes Escape to the top-most dialog.
#[component]
pub fn Dialog(
    /// Whether the dialog is shown.
    #[prop(into)]
    is_open: Signal<bool>,
    /// Asked to close the dialog.
    #[prop(into)]
    on_close: Callback<()>,
    children: ChildrenFn,
    /// Heading text. Absent or empty means no heading.
    #[prop(optional, into)]
    title: Option<Signal<String>>,
    /// Falls back to [`DialogSettings`](crate::DialogSettings), then to an overlay.
    #[prop(optional)]
    render_target: Option<RenderTarget>,
    #[prop(optional)] close_style: Option<CloseStyle>,
    /// Element id of the heading, referenced by `aria-labelledby`. The generated default comes
    /// from a per-process counter, so set this for dialogs that are server rendered while open;
    /// otherwise the hydrating client picks a different id than the server HTML carries.
    #[prop(optional, into)]
    heading_id: Option<String>,
    #[prop(optional, into)] close_label: Option<String>,
) -> impl IntoView {
    let settings = use_dialog_settings();
    let manager = use_overlay_manager();
    let manager_for_cleanup = manager.clone();
    let lease = StoredValue::new(None::<OverlayLease>);

    Effect::new(move |_| {
        let open = is_open.get();
        lease.update_value(|lease| sync_lease(open, lease, &manager, on_close));
    });
    on_cleanup(move || {
        lease.try_update_value(|lease| sync_lease(false, lease, &manager_for_cleanup, on_close));
    });

    let heading_id = StoredValue::new(heading_id.unwrap_or_else(next_heading_id));
    let close_label =
        StoredValue::new(close_label.unwrap_or_else(|| "Close dialog".to_string()));
    let heading = move || title.map(|title| title.get()).filter(|text| !text.is_empty());

    let panel = move || {
        let close_style = close_style
            .or_else(|| settings.map(|s| s.close_style.get_untracked()))
            .unwrap_or_default();
        view! {
            <div
                class="fixed inset-0 z-50 flex items-center justify-center p-4"
                role="dialog"
                aria-modal="true"
                aria-labelledby=move || heading().map(|_| heading_id.get_value())
                on:click=move |_| on_close.run(())
            >
                <div
                    class="absolute inset-0 bg-gray-900/80 backdrop-blur-sm transition-opacity duration-300"
                    aria-hidden="true"
                ></div>
                <div
                    class="relative bg-white rounded-2xl shadow-2xl max-w-lg w-full p-12"
                    on:click=move |e| {
                        e.stop_propagation();
                    }
                >
                    <CloseButton appearance=close_style label=close_label.get_value() on_close />
                    <div class="text-center">
                        {move || {
                            heading()
                                .map(|text| {
                                    view! {
                                        <h2
                                            id=heading_id.get_value()
                                            class="text-3xl font-bold text-gray-900 mb-6 tracking-tight"
                                        >
                                            {text}
                                        </h2>
                                    }
                                })
                        }}
                        <div class="mt-2">{children()}</div>
                    </div>
                </div>
            </div>
        }
    };

    let contents = move || {
        let target = render_target
            .or_else(|| settings.map(|s| s.render_target.get_untracked()))
            .unwrap_or_default();
        match target {
            RenderTarget::Inline => panel().into_any(),
            RenderTarget::Overlay => {
                let panel = panel.clone();
                view! { <Portal>{panel()}</Portal> }.into_any()
            }
        }
    };

    view! { <Show when=move || is_open.get()>{contents()}</Show> }
}

#[cfg(test)]
mod lease_tests {
    use super::*;
    use crate::global_state::{overlay::ESCAPE, page_host::DetachedHost};
    use leptos::reactive::owner::Owner;

    fn counting_callback() -> (Arc<AtomicUsize>, Callback<()>) {
        let count = Arc::new(AtomicUsize::new(0));
        let callback = Callback::new({
            let count = count.clone();
            move |_: ()| {
                count.fetch_add(1, Ordering::SeqCst);
            }
        });
        (count, callback)
    }

    #[test]
    fn opening_takes_a_single_lease() {
        let owner = Owner::new();
        owner.with(|| {
            let manager = OverlayManager::new(DetachedHost);
            let (_, on_close) = counting_callback();
            let mut lease = None;

            sync_lease(true, &mut lease, &manager, on_close);
            sync_lease(true, &mut lease, &manager, on_close);
            assert_eq!(manager.open_count(), 1);
            assert!(manager.is_scroll_locked());
            assert!(manager.listener_installed());
        });
    }

    #[test]
    fn closing_releases_the_lease() {
        let owner = Owner::new();
        owner.with(|| {
            let manager = OverlayManager::new(DetachedHost);
            let (closes, on_close) = counting_callback();
            let mut lease = None;

            sync_lease(true, &mut lease, &manager, on_close);
            sync_lease(false, &mut lease, &manager, on_close);
            assert!(lease.is_none());
            assert_eq!(manager.open_count(), 0);
            assert!(!manager.is_scroll_locked());
            assert!(!manager.listener_installed());

            assert!(!manager.handle_key(ESCAPE));
            assert_eq!(closes.load(Ordering::SeqCst), 0);
        });
    }

    #[test]
    fn reopening_leaves_one_registration() {
        let owner = Owner::new();
        owner.with(|| {
            let manager = OverlayManager::new(DetachedHost);
            let (closes, on_close) = counting_callback();
            let mut lease = None;

            sync_lease(true, &mut lease, &manager, on_close);
            sync_lease(false, &mut lease, &manager, on_close);
            sync_lease(true, &mut lease, &manager, on_close);
            assert_eq!(manager.open_count(), 1);
            assert!(manager.listener_installed());

            assert!(manager.handle_key(ESCAPE));
            assert_eq!(closes.load(Ordering::SeqCst), 1);

            // cleanup path on unmount
            sync_lease(false, &mut lease, &manager, on_close);
            assert_eq!(manager.open_count(), 0);
            assert!(!manager.listener_installed());
        });
    }

    #[test]
    fn cleanup_after_close_is_a_no_op() {
        let owner = Owner::new();
        owner.with(|| {
            let manager = OverlayManager::new(DetachedHost);
            let (_, on_close) = counting_callback();
            let mut lease = None;

            sync_lease(false, &mut lease, &manager, on_close);
            assert!(lease.is_none());
            assert_eq!(manager.open_count(), 0);
        });
    }
}

#[cfg(all(test, target_arch = "wasm32", feature = "csr"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    /// Mounts an open inline dialog and clicks the element matched by `selector`.
    fn clicks_for(selector: &str) -> usize {
        let closes = Arc::new(AtomicUsize::new(0));
        let document = document();
        let root = document
            .create_element("div")
            .unwrap()
            .dyn_into::<web_sys::HtmlElement>()
            .unwrap();
        document.body().unwrap().append_child(&root).unwrap();

        let handle = leptos::mount::mount_to(root.clone(), {
            let closes = closes.clone();
            move || {
                let closes = closes.clone();
                view! {
                    <Dialog
                        is_open=true
                        on_close=move |_: ()| {
                            closes.fetch_add(1, Ordering::SeqCst);
                        }
                        title="Confirm"
                        render_target=RenderTarget::Inline
                    >
                        <p class="dialog-body">"Are you sure?"</p>
                    </Dialog>
                }
            }
        });

        root.query_selector(selector)
            .unwrap()
            .expect("selector matches")
            .dyn_into::<web_sys::HtmlElement>()
            .unwrap()
            .click();
        let count = closes.load(Ordering::SeqCst);

        drop(handle);
        root.remove();
        count
    }

    #[wasm_bindgen_test]
    fn backdrop_click_requests_close() {
        assert_eq!(clicks_for("[role=dialog] > div[aria-hidden=true]"), 1);
    }

    #[wasm_bindgen_test]
    fn panel_click_is_contained() {
        assert_eq!(clicks_for("[role=dialog] .dialog-body"), 0);
        assert_eq!(clicks_for("[role=dialog] h2"), 0);
    }

    #[wasm_bindgen_test]
    fn close_control_requests_close() {
        assert_eq!(clicks_for("button[aria-label=\"Close dialog\"]"), 1);
    }
}
