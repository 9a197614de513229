//! Cancellable user actions
//!
//! Each async action is keyed by what it does and which record it is about.
//! Starting a load for a key that is still in flight aborts the older task,
//! so a late response can never overwrite a newer one. Writes are never
//! aborted by a newer action: every write reaches the server and its caller
//! gets the server's answer.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::AbortHandle;
use tracing::{debug, info};

/// What a user-triggered action does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    LoadAnimal,
    LoadMedicalRecord,
    SaveMedicalRecord,
    LoadVaccinations,
    LoadAllVaccinations,
    RegisterVaccination,
    MarkVaccinationComplete,
    DeleteVaccination,
    LoadOverview,
}

impl ActionKind {
    /// Whether a newer action for the same key replaces this one
    pub fn is_supersedable(&self) -> bool {
        match self {
            ActionKind::LoadAnimal
            | ActionKind::LoadMedicalRecord
            | ActionKind::LoadVaccinations
            | ActionKind::LoadAllVaccinations
            | ActionKind::LoadOverview => true,
            ActionKind::SaveMedicalRecord
            | ActionKind::RegisterVaccination
            | ActionKind::MarkVaccinationComplete
            | ActionKind::DeleteVaccination => false,
        }
    }
}

/// Result of a registered action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome<T> {
    Completed(T),
    /// A newer load for the same key replaced this one, or it was cancelled
    Superseded,
}

impl<T> ActionOutcome<T> {
    pub fn completed(self) -> Option<T> {
        match self {
            ActionOutcome::Completed(value) => Some(value),
            ActionOutcome::Superseded => None,
        }
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self, ActionOutcome::Superseded)
    }
}

impl<T, E> ActionOutcome<Result<T, E>> {
    /// Lift a fallible action's error out of the outcome
    pub fn transpose(self) -> Result<ActionOutcome<T>, E> {
        match self {
            ActionOutcome::Completed(result) => result.map(ActionOutcome::Completed),
            ActionOutcome::Superseded => Ok(ActionOutcome::Superseded),
        }
    }
}

type ActionKey = (ActionKind, u64);

/// In-flight action entry
#[derive(Debug)]
struct ActionEntry {
    generation: u64,
    abort: AbortHandle,
}

#[derive(Debug, Default)]
struct Registry {
    next_generation: u64,
    /// Loads hold at most one entry per key, writes may stack
    entries: HashMap<ActionKey, Vec<ActionEntry>>,
}

impl Registry {
    fn register(&mut self, key: ActionKey, abort: AbortHandle) -> u64 {
        self.next_generation += 1;
        let generation = self.next_generation;

        let entries = self.entries.entry(key).or_default();
        if key.0.is_supersedable() {
            for previous in entries.drain(..) {
                previous.abort.abort();
                info!("{:?} for {} superseded by a newer request", key.0, key.1);
            }
        }
        entries.push(ActionEntry { generation, abort });
        generation
    }

    /// Drop the entry for `generation`; false if it was already replaced or cancelled
    fn finish(&mut self, key: ActionKey, generation: u64) -> bool {
        let Some(entries) = self.entries.get_mut(&key) else {
            return false;
        };
        let before = entries.len();
        entries.retain(|entry| entry.generation != generation);
        let found = entries.len() != before;
        if entries.is_empty() {
            self.entries.remove(&key);
        }
        found
    }
}

/// Releases an action's entry if its caller stops waiting
struct PendingAction<'a> {
    registry: &'a ActionRegistry,
    key: ActionKey,
    generation: u64,
    abort: AbortHandle,
    settled: bool,
}

impl Drop for PendingAction<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        // Abandoned writes still run to completion.
        if self.key.0.is_supersedable() {
            self.abort.abort();
        }
        if self.registry.lock().finish(self.key, self.generation) {
            debug!("{:?} for {} abandoned by its caller", self.key.0, self.key.1);
        }
    }
}

/// Registry of in-flight actions; clones share state
#[derive(Debug, Clone, Default)]
pub struct ActionRegistry {
    inner: Arc<Mutex<Registry>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `future` as the current action for `(kind, subject_id)`.
    ///
    /// For loads, any older action for the same key is aborted and its caller
    /// gets [`ActionOutcome::Superseded`]. Writes on the same key run side by
    /// side. Dropping the returned future releases the key.
    pub async fn run<F, T>(&self, kind: ActionKind, subject_id: u64, future: F) -> ActionOutcome<T>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let key = (kind, subject_id);
        let handle = tokio::spawn(future);
        let generation = self.lock().register(key, handle.abort_handle());

        let mut pending = PendingAction {
            registry: self,
            key,
            generation,
            abort: handle.abort_handle(),
            settled: false,
        };
        let result = handle.await;
        pending.settled = true;

        let is_current = self.lock().finish(key, generation);

        match result {
            Ok(value) if is_current || !kind.is_supersedable() => ActionOutcome::Completed(value),
            Ok(_) => {
                debug!("Discarding stale result of {:?} for {}", kind, subject_id);
                ActionOutcome::Superseded
            }
            Err(e) if e.is_cancelled() => ActionOutcome::Superseded,
            Err(e) => std::panic::resume_unwind(e.into_panic()),
        }
    }

    /// Abort every in-flight action for a key, if any
    pub fn cancel(&self, kind: ActionKind, subject_id: u64) -> bool {
        match self.lock().entries.remove(&(kind, subject_id)) {
            Some(entries) => {
                for entry in entries {
                    entry.abort.abort();
                }
                info!("{:?} for {} cancelled", kind, subject_id);
                true
            }
            None => false,
        }
    }

    /// Number of actions in flight
    pub fn pending(&self) -> usize {
        self.lock().entries.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::{sleep, timeout};

    async fn wait_for_pending(registry: &ActionRegistry, count: usize) {
        while registry.pending() != count {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_single_action_completes() {
        let registry = ActionRegistry::new();
        let outcome = registry
            .run(ActionKind::LoadAnimal, 1, async { "rex" })
            .await;
        assert_eq!(outcome, ActionOutcome::Completed("rex"));
        assert_eq!(registry.pending(), 0);
    }

    #[tokio::test]
    async fn test_newer_action_supersedes_older() {
        let registry = ActionRegistry::new();

        let slow = tokio::spawn({
            let registry = registry.clone();
            async move {
                registry
                    .run(ActionKind::LoadVaccinations, 7, async {
                        sleep(Duration::from_secs(60)).await;
                        "stale"
                    })
                    .await
            }
        });
        wait_for_pending(&registry, 1).await;

        let fresh = registry
            .run(ActionKind::LoadVaccinations, 7, async { "fresh" })
            .await;
        assert_eq!(fresh, ActionOutcome::Completed("fresh"));

        let stale = slow.await.expect("join");
        assert!(stale.is_superseded());
        assert_eq!(registry.pending(), 0);
    }

    #[tokio::test]
    async fn test_writes_on_same_key_both_complete() {
        let registry = ActionRegistry::new();

        let first = tokio::spawn({
            let registry = registry.clone();
            async move {
                registry
                    .run(ActionKind::RegisterVaccination, 3, async {
                        sleep(Duration::from_millis(50)).await;
                        "rabies"
                    })
                    .await
            }
        });
        wait_for_pending(&registry, 1).await;

        let second = registry
            .run(ActionKind::RegisterVaccination, 3, async { "v10" })
            .await;
        assert_eq!(second, ActionOutcome::Completed("v10"));
        assert_eq!(registry.pending(), 1);

        assert_eq!(first.await.expect("join"), ActionOutcome::Completed("rabies"));
        assert_eq!(registry.pending(), 0);
    }

    #[tokio::test]
    async fn test_different_keys_are_independent() {
        let registry = ActionRegistry::new();

        let (a, b, c) = tokio::join!(
            registry.run(ActionKind::LoadVaccinations, 1, async {
                sleep(Duration::from_millis(20)).await;
                1
            }),
            registry.run(ActionKind::LoadVaccinations, 2, async { 2 }),
            registry.run(ActionKind::LoadMedicalRecord, 1, async { 3 }),
        );
        assert_eq!(a.completed(), Some(1));
        assert_eq!(b.completed(), Some(2));
        assert_eq!(c.completed(), Some(3));
    }

    #[tokio::test]
    async fn test_cancel_aborts_in_flight_action() {
        let registry = ActionRegistry::new();

        let pending = tokio::spawn({
            let registry = registry.clone();
            async move {
                registry
                    .run(ActionKind::LoadAnimal, 3, async {
                        sleep(Duration::from_secs(60)).await;
                    })
                    .await
            }
        });
        wait_for_pending(&registry, 1).await;

        assert!(registry.cancel(ActionKind::LoadAnimal, 3));
        assert!(!registry.cancel(ActionKind::LoadAnimal, 3));
        assert!(pending.await.expect("join").is_superseded());
    }

    #[tokio::test]
    async fn test_dropped_callers_release_their_keys() {
        let registry = ActionRegistry::new();

        for animal_id in 0..50 {
            let waited = timeout(
                Duration::from_millis(1),
                registry.run(ActionKind::LoadAnimal, animal_id, async {
                    sleep(Duration::from_secs(3600)).await;
                }),
            )
            .await;
            assert!(waited.is_err());
        }
        assert_eq!(registry.pending(), 0);
    }

    #[tokio::test]
    async fn test_abandoned_write_still_runs() {
        let registry = ActionRegistry::new();
        let (tx, rx) = tokio::sync::oneshot::channel();

        let waited = timeout(
            Duration::from_millis(1),
            registry.run(ActionKind::DeleteVaccination, 9, async move {
                sleep(Duration::from_millis(20)).await;
                let _ = tx.send("deleted");
            }),
        )
        .await;
        assert!(waited.is_err());
        assert_eq!(registry.pending(), 0);
        assert_eq!(rx.await, Ok("deleted"));
    }
}
