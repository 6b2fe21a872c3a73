//! Exclusive task slot with generation-token guards.
//!
//! The controller owns two things: which [`TaskKind`] is active, and the
//! join handles of every loop spawned for it. A task switch is an atomic
//! cancel-then-start transition performed under one lock: abort all
//! handles of the outgoing task, bump the generation counter, set the new
//! kind.
//!
//! Aborting a handle does not suppress a cycle that has already fired and
//! is between suspension points, so cancellation is two mechanisms, not
//! one: every behavior loop captures the [`TaskToken`] it was started
//! with and compares it against the live generation at each cycle
//! boundary, no-opping when superseded. Either mechanism alone has a
//! window; together they guarantee at most one live loop.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use golem_types::TaskKind;

// ---------------------------------------------------------------------------
// TaskToken
// ---------------------------------------------------------------------------

/// Identifies one task activation.
///
/// A fresh token is minted by every [`TaskController::begin`]; a loop
/// holding a stale token knows it has been superseded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskToken(u64);

// ---------------------------------------------------------------------------
// TaskController
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct ActiveTask {
    kind: TaskKind,
    handles: Vec<JoinHandle<()>>,
}

/// Owner of the single active task slot.
#[derive(Debug)]
pub struct TaskController {
    /// Bumped on every transition; loops compare their token against it.
    generation: AtomicU64,
    active: Mutex<ActiveTask>,
}

impl TaskController {
    /// Create a controller with no active task.
    pub fn new() -> Self {
        Self {
            generation: AtomicU64::new(0),
            active: Mutex::new(ActiveTask {
                kind: TaskKind::Idle,
                handles: Vec::new(),
            }),
        }
    }

    /// The currently active task kind.
    pub async fn current(&self) -> TaskKind {
        self.active.lock().await.kind
    }

    /// Whether `token` still identifies the live activation.
    ///
    /// Loops call this at every cycle boundary and after long suspensions;
    /// a `false` answer means silently stop.
    pub fn is_current(&self, token: TaskToken) -> bool {
        self.generation.load(Ordering::SeqCst) == token.0
    }

    /// Cancel the active task: abort every attached handle, clear the
    /// handle set, and go idle. Idempotent and safe when already idle.
    pub async fn cancel_all(&self) {
        let mut active = self.active.lock().await;
        for handle in active.handles.drain(..) {
            handle.abort();
        }
        self.generation.fetch_add(1, Ordering::SeqCst);
        active.kind = TaskKind::Idle;
        tracing::debug!("active task cancelled");
    }

    /// Atomic cancel-then-start transition to `kind`.
    ///
    /// Returns the token the new task's loops must capture. The outgoing
    /// task's handles are aborted and its token invalidated before the
    /// new kind is recorded; callers spawn the behavior loop afterwards
    /// and hand its handle to [`attach`](Self::attach).
    pub async fn begin(&self, kind: TaskKind) -> TaskToken {
        let mut active = self.active.lock().await;
        for handle in active.handles.drain(..) {
            handle.abort();
        }
        let token = self
            .generation
            .fetch_add(1, Ordering::SeqCst)
            .wrapping_add(1);
        active.kind = kind;
        tracing::info!(task = %kind, "task started");
        TaskToken(token)
    }

    /// Attach a spawned loop handle to the activation named by `token`.
    ///
    /// If the activation was superseded between spawn and attach, the
    /// handle is aborted on the spot instead of being tracked.
    pub async fn attach(&self, token: TaskToken, handle: JoinHandle<()>) {
        let mut active = self.active.lock().await;
        if self.is_current(token) {
            active.handles.push(handle);
        } else {
            handle.abort();
        }
    }

    /// Number of tracked (not yet drained) loop handles. Zero immediately
    /// after any cancellation.
    pub async fn pending_work(&self) -> usize {
        self.active.lock().await.handles.len()
    }
}

impl Default for TaskController {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn starts_idle_with_no_work() {
        let controller = TaskController::new();
        assert_eq!(controller.current().await, TaskKind::Idle);
        assert_eq!(controller.pending_work().await, 0);
    }

    #[tokio::test]
    async fn begin_sets_kind_and_mints_a_live_token() {
        let controller = TaskController::new();
        let token = controller.begin(TaskKind::Farming).await;
        assert_eq!(controller.current().await, TaskKind::Farming);
        assert!(controller.is_current(token));
    }

    #[tokio::test]
    async fn begin_invalidates_the_previous_token() {
        let controller = TaskController::new();
        let first = controller.begin(TaskKind::Farming).await;
        let second = controller.begin(TaskKind::BranchMining).await;
        assert!(!controller.is_current(first));
        assert!(controller.is_current(second));
        assert_eq!(controller.current().await, TaskKind::BranchMining);
    }

    #[tokio::test]
    async fn cancel_all_goes_idle_and_drains_handles() {
        let controller = TaskController::new();
        let token = controller.begin(TaskKind::Following).await;
        let handle = tokio::spawn(async {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        });
        controller.attach(token, handle).await;
        assert_eq!(controller.pending_work().await, 1);

        controller.cancel_all().await;
        assert_eq!(controller.current().await, TaskKind::Idle);
        assert_eq!(controller.pending_work().await, 0);
        assert!(!controller.is_current(token));
    }

    #[tokio::test]
    async fn cancel_all_is_idempotent() {
        let controller = TaskController::new();
        controller.cancel_all().await;
        controller.cancel_all().await;
        assert_eq!(controller.current().await, TaskKind::Idle);
        assert_eq!(controller.pending_work().await, 0);
    }

    #[tokio::test]
    async fn begin_aborts_the_previous_tasks_handles() {
        let controller = TaskController::new();
        let first = controller.begin(TaskKind::Farming).await;
        let handle = tokio::spawn(async {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        });
        controller.attach(first, handle).await;

        let _second = controller.begin(TaskKind::Following).await;
        // The old handle set was drained during the transition.
        assert_eq!(controller.pending_work().await, 0);
    }

    #[tokio::test]
    async fn attach_with_a_stale_token_aborts_the_handle() {
        let controller = TaskController::new();
        let stale = controller.begin(TaskKind::Farming).await;
        let _live = controller.begin(TaskKind::Following).await;

        let handle = tokio::spawn(async {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        });
        controller.attach(stale, handle).await;
        // The stale handle was not tracked against the live task.
        assert_eq!(controller.pending_work().await, 0);
    }

    #[tokio::test]
    async fn aborted_loops_observe_stale_tokens() {
        let controller = std::sync::Arc::new(TaskController::new());
        let token = controller.begin(TaskKind::Farming).await;

        // A loop that fired before cancellation still sees itself as
        // superseded on its next guard check.
        controller.cancel_all().await;
        assert!(!controller.is_current(token));
    }
}
