//! Turning panics in test bodies and hooks into failures.
//!
//! While a [`SilentPanicHookGuard`] is alive, panics raised on the thread
//! that installed it are not printed by the panic hook; the engine reports
//! them itself. Panics on other threads still reach the previous hook.
//!
//! Guards share one process-wide hook. The first guard installs it and the
//! last guard to drop restores the previous hook, so runs overlapping on
//! different threads keep each other silenced.

use std::{
    any::Any,
    cell::Cell,
    marker::PhantomData,
    panic::{self, AssertUnwindSafe, PanicHookInfo, catch_unwind},
    sync::{Arc, Mutex, PoisonError},
    thread,
};

type PanicHook = Box<dyn Fn(&PanicHookInfo<'_>) + Sync + Send + 'static>;

thread_local! {
    static SILENCED: Cell<usize> = const { Cell::new(0) };
}

struct Installed {
    guards: usize,
    previous: Arc<PanicHook>,
}

static INSTALLED: Mutex<Option<Installed>> = Mutex::new(None);

/// Silences panics of the current thread until dropped.
///
/// The guard is tied to the thread that created it.
pub struct SilentPanicHookGuard(PhantomData<*const ()>);

impl SilentPanicHookGuard {
    pub fn install() -> Self {
        let mut installed = INSTALLED.lock().unwrap_or_else(PoisonError::into_inner);
        match installed.as_mut() {
            Some(installed) => installed.guards += 1,
            None => {
                let previous: Arc<PanicHook> = Arc::new(panic::take_hook());
                let fallback = Arc::clone(&previous);
                panic::set_hook(Box::new(move |info| {
                    if SILENCED.get() == 0 {
                        fallback(info);
                    }
                }));
                *installed = Some(Installed {
                    guards: 1,
                    previous,
                });
            }
        }
        SILENCED.set(SILENCED.get() + 1);

        Self(PhantomData)
    }
}

impl Drop for SilentPanicHookGuard {
    fn drop(&mut self) {
        SILENCED.set(SILENCED.get().saturating_sub(1));

        let mut installed = INSTALLED.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(state) = installed.as_mut() else {
            return;
        };
        state.guards = state.guards.saturating_sub(1);
        if state.guards > 0 {
            return;
        }

        // the hook cannot be replaced while unwinding
        if thread::panicking() {
            return;
        }
        if let Some(Installed { previous, .. }) = installed.take() {
            panic::set_hook(Box::new(move |info| previous(info)));
        }
    }
}

/// Convert a panic payload into a string.
///
/// This matches the common payload types produced by `panic!` (`&'static str` and `String`).
/// Other payload types are formatted as a generic placeholder.
pub fn payload_as_string(err: Box<dyn Any + Send + 'static>) -> String {
    err.downcast::<&'static str>()
        .map(|s| s.to_string())
        .or_else(|err| err.downcast::<String>().map(|s| *s))
        .unwrap_or_else(|_| String::from("Box<dyn Any>"))
}

/// Run `f`, returning the panic message if it panicked.
pub(crate) fn catch_panic<T>(f: impl FnOnce() -> T) -> Result<T, String> {
    catch_unwind(AssertUnwindSafe(f)).map_err(payload_as_string)
}
