use dialog_app::{
    provide_dialog_settings, provide_overlay_manager, CloseStyle, Dialog, RenderTarget,
};
use leptos::prelude::*;
use leptos_meta::{provide_meta_context, Title};

const BUTTON: &str = "px-4 py-2 rounded-lg bg-indigo-600 text-white hover:bg-indigo-500 transition-colors";

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_overlay_manager();
    let settings = provide_dialog_settings();

    let (confirm_open, set_confirm_open) = signal(false);
    let (inline_open, set_inline_open) = signal(false);
    let (glyph_open, set_glyph_open) = signal(false);
    let (outer_open, set_outer_open) = signal(false);
    let (inner_open, set_inner_open) = signal(false);
    let (answer, set_answer) = signal(None::<bool>);

    view! {
        <Title text="Dialog showcase" />
        <main class="min-h-screen bg-gray-100 p-8 space-y-6">
            <h1 class="text-3xl font-bold text-gray-900">"Dialog showcase"</h1>

            <label class="flex items-center gap-2 text-gray-700">
                "Default render target"
                <select
                    class="rounded border px-2 py-1"
                    on:change=move |ev| {
                        let target = event_target_value(&ev).parse().unwrap_or_default();
                        log::debug!("default render target is now {target:?}");
                        settings.set_render_target(target);
                    }
                >
                    <option value=RenderTarget::Overlay.as_str()>"overlay"</option>
                    <option value=RenderTarget::Inline.as_str()>"inline"</option>
                </select>
            </label>

            <div class="flex flex-wrap gap-3">
                <button class=BUTTON on:click=move |_| set_confirm_open.set(true)>
                    "Confirm"
                </button>
                <button class=BUTTON on:click=move |_| set_inline_open.set(true)>
                    "Untitled, inline"
                </button>
                <button class=BUTTON on:click=move |_| set_glyph_open.set(true)>
                    "Glyph close"
                </button>
                <button class=BUTTON on:click=move |_| set_outer_open.set(true)>
                    "Nested"
                </button>
            </div>

            <p class="text-gray-700">
                {move || match answer.get() {
                    Some(true) => "You confirmed.",
                    Some(false) => "You declined.",
                    None => "No answer yet.",
                }}
            </p>

            <Dialog
                is_open=confirm_open
                on_close=move |_: ()| set_confirm_open.set(false)
                title="Confirm"
            >
                <p class="text-gray-700">"Are you sure?"</p>
                <div class="flex justify-center gap-2 pt-6">
                    <button
                        class=BUTTON
                        on:click=move |_| {
                            set_answer.set(Some(false));
                            set_confirm_open.set(false);
                        }
                    >
                        "No"
                    </button>
                    <button
                        class=BUTTON
                        on:click=move |_| {
                            set_answer.set(Some(true));
                            set_confirm_open.set(false);
                        }
                    >
                        "Yes"
                    </button>
                </div>
            </Dialog>

            <div class="relative overflow-hidden rounded-xl border bg-white p-4">
                <p class="text-gray-500">
                    "The inline dialog below lives inside this clipped card."
                </p>
                <Dialog
                    is_open=inline_open
                    on_close=move |_: ()| set_inline_open.set(false)
                    render_target=RenderTarget::Inline
                >
                    <p class="text-gray-700">"No heading here, only content."</p>
                </Dialog>
            </div>

            <Dialog
                is_open=glyph_open
                on_close=move |_: ()| set_glyph_open.set(false)
                title="Plain close"
                close_style=CloseStyle::Glyph
                close_label="Dismiss"
            >
                <p class="text-gray-700">"This one closes with a text glyph."</p>
            </Dialog>

            <Dialog
                is_open=outer_open
                on_close=move |_: ()| set_outer_open.set(false)
                title="Outer"
            >
                <p class="text-gray-700">"Escape closes the top-most dialog first."</p>
                <button class=BUTTON on:click=move |_| set_inner_open.set(true)>
                    "Open another"
                </button>
            </Dialog>
            <Dialog
                is_open=inner_open
                on_close=move |_: ()| set_inner_open.set(false)
                title="Inner"
            >
                <p class="text-gray-700">"Page scroll stays locked until both are closed."</p>
            </Dialog>
        </main>
    }
}
