//! Background sweep task

use std::sync::Weak;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::debug;

use shelf_cache_core::CacheKind;

/// Something that can drop its expired entries
pub(crate) trait Sweep: Send + Sync + 'static {
    fn sweep(&self) -> usize;
}

/// Handle to a running sweep task
///
/// The task stops when the handle is dropped, when [`SweeperHandle::abort`]
/// is called, or once the cache it sweeps has been dropped.
#[derive(Debug)]
pub struct SweeperHandle {
    kind: CacheKind,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Which cache this task sweeps
    pub fn kind(&self) -> CacheKind {
        self.kind
    }

    /// Stop the task
    pub fn abort(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for SweeperHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Run `target.sweep()` every `period`, first one period after start
///
/// Must be called from within a tokio runtime.
pub(crate) fn spawn<T: Sweep>(kind: CacheKind, target: Weak<T>, period: Duration) -> SweeperHandle {
    let period = period.max(Duration::from_millis(1));

    let task = tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let Some(target) = target.upgrade() else {
                debug!(cache = kind.as_str(), "Cache dropped, stopping sweeper");
                break;
            };
            target.sweep();
        }
    });

    debug!(cache = kind.as_str(), period_ms = period.as_millis() as u64, "Sweeper started");
    SweeperHandle { kind, task }
}
