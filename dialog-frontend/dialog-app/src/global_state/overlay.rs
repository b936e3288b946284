use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError, Weak};

use leptos::prelude::*;
use log::{debug, warn};

use super::page_host::{DefaultHost, KeyDispatch, PageHost};

pub const ESCAPE: &str = "Escape";

/// Called when the user asks the top-most dialog to close.
pub type CloseHandler = Arc<dyn Fn() + Send + Sync>;

struct Entry {
    id: u64,
    on_close: CloseHandler,
}

#[derive(Default)]
struct OverlayState {
    next_id: u64,
    stack: Vec<Entry>,
    scroll_locked: bool,
    listener_installed: bool,
}

struct Inner {
    host: Box<dyn PageHost>,
    state: Mutex<OverlayState>,
}

/// Reference counts the page scroll lock and the global Escape listener across every open
/// dialog. Dialogs are kept as a stack, Escape only ever closes the top one.
#[derive(Clone)]
pub struct OverlayManager(Arc<Inner>);

impl OverlayManager {
    pub fn new(host: impl PageHost) -> Self {
        Self(Arc::new(Inner {
            host: Box::new(host),
            state: Mutex::new(OverlayState::default()),
        }))
    }

    /// The instance shared by the whole page.
    pub fn global() -> &'static OverlayManager {
        static GLOBAL: OnceLock<OverlayManager> = OnceLock::new();
        GLOBAL.get_or_init(|| OverlayManager::new(DefaultHost::default()))
    }

    fn state(&self) -> MutexGuard<'_, OverlayState> {
        self.0.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers an open dialog. The dialog stays registered until the lease is dropped.
    pub fn acquire(&self, on_close: CloseHandler) -> OverlayLease {
        let mut state = self.state();
        let id = state.next_id;
        state.next_id += 1;
        state.stack.push(Entry { id, on_close });
        if state.stack.len() == 1 {
            self.engage(&mut state);
        }
        debug!("overlay {id} acquired, {} open", state.stack.len());
        OverlayLease {
            manager: self.clone(),
            id,
        }
    }

    fn release(&self, id: u64) {
        let mut state = self.state();
        let Some(index) = state.stack.iter().position(|entry| entry.id == id) else {
            return;
        };
        let entry = state.stack.remove(index);
        debug!("overlay {id} released, {} open", state.stack.len());
        if state.stack.is_empty() {
            self.disengage(&mut state);
        }
        // the handler may own other leases, drop it once the state is unlocked
        drop(state);
        drop(entry);
    }

    fn engage(&self, state: &mut OverlayState) {
        let host = &self.0.host;
        match host.lock_scroll() {
            Ok(()) => state.scroll_locked = true,
            Err(e) => warn!("unable to lock page scroll: {e}"),
        }
        let weak: Weak<Inner> = Arc::downgrade(&self.0);
        let dispatch: KeyDispatch = Arc::new(move |key: &str| {
            if let Some(inner) = weak.upgrade() {
                OverlayManager(inner).handle_key(key);
            }
        });
        match host.install_key_listener(dispatch) {
            Ok(()) => state.listener_installed = true,
            Err(e) => warn!("unable to listen for Escape: {e}"),
        }
    }

    fn disengage(&self, state: &mut OverlayState) {
        let host = &self.0.host;
        if std::mem::take(&mut state.listener_installed) {
            if let Err(e) = host.remove_key_listener() {
                warn!("unable to remove Escape listener: {e}");
            }
        }
        if std::mem::take(&mut state.scroll_locked) {
            if let Err(e) = host.unlock_scroll() {
                warn!("unable to restore page scroll: {e}");
            }
        }
    }

    /// Routes a keydown. Returns true when a close was requested.
    pub fn handle_key(&self, key: &str) -> bool {
        if key != ESCAPE {
            return false;
        }
        // the handler runs unlocked, it usually ends up dropping a lease
        let top = self.state().stack.last().map(|entry| (entry.id, entry.on_close.clone()));
        match top {
            Some((id, on_close)) => {
                debug!("escape pressed, asking overlay {id} to close");
                on_close();
                true
            }
            None => false,
        }
    }

    pub fn open_count(&self) -> usize {
        self.state().stack.len()
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.state().scroll_locked
    }

    pub fn listener_installed(&self) -> bool {
        self.state().listener_installed
    }
}

/// Held by an open dialog. Dropping it is the only way a dialog leaves the overlay stack.
pub struct OverlayLease {
    manager: OverlayManager,
    id: u64,
}

impl Drop for OverlayLease {
    fn drop(&mut self) {
        self.manager.release(self.id);
    }
}

/// Provide the page's overlay manager into context if not already present and return it.
pub fn provide_overlay_manager() -> OverlayManager {
    if let Some(existing) = use_context::<OverlayManager>() {
        return existing;
    }
    let manager = OverlayManager::global().clone();
    provide_context(manager.clone());
    manager
}

/// Overlay manager from context, falling back to the page-wide instance.
pub fn use_overlay_manager() -> OverlayManager {
    use_context::<OverlayManager>().unwrap_or_else(|| OverlayManager::global().clone())
}
