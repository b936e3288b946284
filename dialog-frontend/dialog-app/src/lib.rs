//! A modal dialog for Leptos apps.
//!
//! [`Dialog`] renders nothing while closed. While open it dims the page, reports close requests to
//! its owner and takes a share of the page-wide overlay (scroll lock and Escape handling) from the
//! [`OverlayManager`].

pub mod components;
pub mod error;
pub mod global_state;

pub use components::dialog::Dialog;
pub use error::{OverlayError, OverlayResult};
pub use global_state::dialog_settings::{
    provide_dialog_settings, use_dialog_settings, CloseStyle, DialogSettings, RenderTarget,
};
pub use global_state::overlay::{
    provide_overlay_manager, use_overlay_manager, CloseHandler, OverlayLease, OverlayManager,
    ESCAPE,
};
pub use global_state::page_host::{DefaultHost, DetachedHost, KeyDispatch, PageHost};
