use std::sync::{Arc, Once};

use parking_lot::{const_mutex, Mutex};

type Cleanup = Box<dyn FnOnce() + Send + 'static>;
type CleanupSlot = Arc<Mutex<Option<Cleanup>>>;

/// Slot the process-wide panic hook releases; the most recent guard wins.
static PANIC_SLOT: Mutex<Option<CleanupSlot>> = const_mutex(None);
static PANIC_HOOK: Once = Once::new();

/// Releases the terminal exactly once: on drop, on an explicit
/// [`TerminalGuard::release`], or from the panic hook, whichever comes first.
pub struct TerminalGuard {
    cleanup: CleanupSlot,
}

impl TerminalGuard {
    pub fn new<F: FnOnce() + Send + 'static>(cleanup: F) -> Self {
        Self {
            cleanup: Arc::new(Mutex::new(Some(Box::new(cleanup)))),
        }
    }

    /// Run the cleanup before unwinding prints the panic message.
    ///
    /// The hook itself is installed once per process and chains to the hook
    /// that was active before it.
    pub fn install_panic_hook(&self) {
        *PANIC_SLOT.lock() = Some(Arc::clone(&self.cleanup));
        PANIC_HOOK.call_once(|| {
            let default_hook = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                let slot = PANIC_SLOT.lock().take();
                if let Some(cleanup) = slot.and_then(|slot| slot.lock().take()) {
                    cleanup();
                }
                default_hook(info);
            }));
        });
    }

    /// Run the cleanup now if it has not run yet.
    pub fn release(&self) {
        {
            let mut panic_slot = PANIC_SLOT.lock();
            if panic_slot
                .as_ref()
                .is_some_and(|slot| Arc::ptr_eq(slot, &self.cleanup))
            {
                *panic_slot = None;
            }
        }
        let cleanup = self.cleanup.lock().take();
        if let Some(cleanup) = cleanup {
            cleanup();
        }
    }

    pub fn is_released(&self) -> bool {
        self.cleanup.lock().is_none()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        self.release();
    }
}
