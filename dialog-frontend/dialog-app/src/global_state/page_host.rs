use std::sync::Arc;

use cfg_if::cfg_if;

use crate::error::OverlayResult;

/// Receives the `key` value of every keydown the page host sees.
pub type KeyDispatch = Arc<dyn Fn(&str) + Send + Sync>;

/// The page-wide side effects an open dialog needs.
///
/// The overlay manager calls `lock_scroll`/`install_key_listener` when the first dialog opens and
/// the matching release calls when the last one closes, so implementations never see nesting.
pub trait PageHost: Send + Sync + 'static {
    fn lock_scroll(&self) -> OverlayResult<()>;
    fn unlock_scroll(&self) -> OverlayResult<()>;
    fn install_key_listener(&self, dispatch: KeyDispatch) -> OverlayResult<()>;
    fn remove_key_listener(&self) -> OverlayResult<()>;
}

/// Host for places without a page, such as server rendering.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedHost;

impl PageHost for DetachedHost {
    fn lock_scroll(&self) -> OverlayResult<()> {
        Ok(())
    }

    fn unlock_scroll(&self) -> OverlayResult<()> {
        Ok(())
    }

    fn install_key_listener(&self, _dispatch: KeyDispatch) -> OverlayResult<()> {
        Ok(())
    }

    fn remove_key_listener(&self) -> OverlayResult<()> {
        Ok(())
    }
}

cfg_if! {
    if #[cfg(any(feature = "hydrate", feature = "csr"))] {
        pub use browser::BrowserHost;
        pub type DefaultHost = BrowserHost;
    } else {
        pub type DefaultHost = DetachedHost;
    }
}

#[cfg(any(feature = "hydrate", feature = "csr"))]
mod browser {
    use std::sync::{Mutex, MutexGuard, PoisonError};

    use gloo::events::EventListener;
    use log::debug;
    use send_wrapper::SendWrapper;
    use wasm_bindgen::JsCast;

    use super::{KeyDispatch, PageHost};
    use crate::error::{OverlayError, OverlayResult};

    /// Drives `document.body.style.overflow` and a `keydown` listener on `document`.
    #[derive(Default)]
    pub struct BrowserHost {
        saved_overflow: Mutex<Option<String>>,
        listener: Mutex<Option<SendWrapper<EventListener>>>,
    }

    fn document() -> OverlayResult<web_sys::Document> {
        web_sys::window()
            .ok_or(OverlayError::NoWindow)?
            .document()
            .ok_or(OverlayError::NoDocument)
    }

    fn body() -> OverlayResult<web_sys::HtmlElement> {
        document()?.body().ok_or(OverlayError::NoBody)
    }

    fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
        mutex.lock().unwrap_or_else(PoisonError::into_inner)
    }

    impl PageHost for BrowserHost {
        fn lock_scroll(&self) -> OverlayResult<()> {
            let style = body()?.style();
            let prior = style.get_property_value("overflow")?;
            style.set_property("overflow", "hidden")?;
            debug!("scroll locked, prior overflow {prior:?}");
            *lock(&self.saved_overflow) = Some(prior);
            Ok(())
        }

        fn unlock_scroll(&self) -> OverlayResult<()> {
            let prior = lock(&self.saved_overflow).take().unwrap_or_default();
            let style = body()?.style();
            if prior.is_empty() {
                style.remove_property("overflow")?;
            } else {
                style.set_property("overflow", &prior)?;
            }
            Ok(())
        }

        fn install_key_listener(&self, dispatch: KeyDispatch) -> OverlayResult<()> {
            let document = document()?;
            let listener = EventListener::new(&document, "keydown", move |event| {
                let Some(event) = event.dyn_ref::<web_sys::KeyboardEvent>() else {
                    return;
                };
                // a held key repeats keydown; one physical press closes one dialog
                if event.repeat() {
                    return;
                }
                dispatch(&event.key());
            });
            *lock(&self.listener) = Some(SendWrapper::new(listener));
            Ok(())
        }

        fn remove_key_listener(&self) -> OverlayResult<()> {
            // dropping the EventListener unregisters it
            lock(&self.listener).take();
            Ok(())
        }
    }
}
