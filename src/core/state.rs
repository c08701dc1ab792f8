//! Process-wide run state.
//!
//! - `SHUTDOWN`: Has shutdown been requested? (Ctrl+C received)
//! - `RUNNING`: Is a generate run in progress? (cooperative cancellation)

use std::sync::atomic::{AtomicBool, Ordering};

/// Shutdown has been requested (Ctrl+C received)
static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// A generate run is in progress and polls `is_shutdown()` between targets
static RUNNING: AtomicBool = AtomicBool::new(false);

// =============================================================================
// SHUTDOWN state
// =============================================================================

/// Setup the global Ctrl+C handler. Call once at program start
///
/// - Outside a run: exit immediately, nothing is half-written.
/// - During a run: set the SHUTDOWN flag so the current target finishes and
///   the rest are skipped. A second Ctrl+C exits at once.
pub fn setup_shutdown_handler() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        let already = SHUTDOWN.swap(true, Ordering::SeqCst);
        if !RUNNING.load(Ordering::SeqCst) || already {
            std::process::exit(130);
        }
        crate::log!("generate"; "stopping after the current target...");
    })
    .map_err(|e| anyhow::anyhow!("failed to set Ctrl+C handler: {}", e))
}

/// Check if shutdown has been requested
///
/// Uses Relaxed ordering - worst case one more target is rendered.
pub fn is_shutdown() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}

// =============================================================================
// RUNNING state
// =============================================================================

/// Marks a generate run as in progress until dropped.
pub struct RunGuard(());

impl RunGuard {
    pub fn begin() -> Self {
        RUNNING.store(true, Ordering::SeqCst);
        Self(())
    }
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        RUNNING.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_guard() {
        {
            let _guard = RunGuard::begin();
            assert!(RUNNING.load(Ordering::SeqCst));
        }
        assert!(!RUNNING.load(Ordering::SeqCst));
    }
}
