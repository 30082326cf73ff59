use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::component_state::ComponentState;
use crate::error::StateError;

/// Name-indexed registry of `ComponentState`, one entry per declared
/// component. Created once at startup and seeded from the remote's
/// component listing; never repopulated afterward.
///
/// Each entry is independently locked so that two different components
/// never block each other, while operations against the *same* component
/// are fully serialized. The outer `RwLock` only guards the entry map
/// itself (insertion during `seed`), never the entries' contents — that
/// keeps steady-state `use_component` calls from contending with each
/// other over anything but their own component's lock.
#[derive(Debug, Default)]
pub struct State {
    entries: RwLock<HashMap<String, Arc<Mutex<ComponentState>>>>,
}

impl State {
    pub fn new() -> Self {
        State {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Inserts entries for names not yet known, and updates the remote ID
    /// in place for names that already exist. Idempotent and safe to call
    /// repeatedly or concurrently; whichever caller's insert lands first
    /// wins the map slot, and later seeders just patch its ID.
    pub async fn seed(&self, name_to_id: &HashMap<String, String>) {
        for (name, id) in name_to_id {
            let existing = {
                let entries = self.entries.read().await;
                entries.get(name).cloned()
            };
            match existing {
                Some(state) => {
                    let mut guard = state.lock().await;
                    guard.set_id(id.clone());
                }
                None => {
                    let mut entries = self.entries.write().await;
                    entries
                        .entry(name.clone())
                        .or_insert_with(|| Arc::new(Mutex::new(ComponentState::new(id.clone()))))
                        .lock()
                        .await
                        .set_id(id.clone());
                }
            }
        }
    }

    /// Looks up `name`, acquires its per-component lock, and awaits `hook`
    /// with it held for the hook's entire duration — including any remote
    /// call the hook makes — then releases it and returns the hook's
    /// result. Fails with `UnknownComponent` if `name` was never seeded.
    ///
    /// `hook` must not retain the `&mut ComponentState` it is given past
    /// its own return.
    pub async fn use_component<F, Fut, T>(&self, name: &str, hook: F) -> Result<T, StateError>
    where
        F: FnOnce(&mut ComponentState) -> Fut,
        Fut: Future<Output = T>,
    {
        let entry = {
            let entries = self.entries.read().await;
            entries
                .get(name)
                .cloned()
                .ok_or_else(|| StateError::UnknownComponent(name.to_string()))?
        };
        let mut guard = entry.lock().await;
        Ok(hook(&mut guard).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use revere_domain::Status;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn seed_map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(n, i)| (n.to_string(), i.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn seed_is_idempotent_and_creates_fresh_entries() {
        let state = State::new();
        state.seed(&seed_map(&[("api", "id-1")])).await;
        state.seed(&seed_map(&[("api", "id-1")])).await;

        let id = state
            .use_component("api", |cs| async { cs.id().to_string() })
            .await
            .unwrap();
        assert_eq!(id, "id-1");
    }

    #[tokio::test]
    async fn reseeding_an_existing_name_updates_only_its_id() {
        let state = State::new();
        state.seed(&seed_map(&[("api", "id-1")])).await;
        state
            .use_component("api", |cs| async {
                cs.log_incident("i1", Status::MajorOutage);
            })
            .await
            .unwrap();

        state.seed(&seed_map(&[("api", "id-2")])).await;

        let (id, status) = state
            .use_component("api", |cs| async {
                (cs.id().to_string(), cs.desired_status())
            })
            .await
            .unwrap();
        assert_eq!(id, "id-2");
        assert_eq!(status, Status::MajorOutage);
    }

    #[tokio::test]
    async fn unknown_component_fails() {
        let state = State::new();
        let result = state.use_component("missing", |_| async {}).await;
        assert!(matches!(result, Err(StateError::UnknownComponent(name)) if name == "missing"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn same_name_calls_are_fully_serialized() {
        let state = Arc::new(State::new());
        state.seed(&seed_map(&[("api", "id-1")])).await;

        let concurrent = Arc::new(AtomicUsize::new(0));
        let max_concurrent = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..20 {
            let state = state.clone();
            let concurrent = concurrent.clone();
            let max_concurrent = max_concurrent.clone();
            handles.push(tokio::spawn(async move {
                state
                    .use_component("api", |_cs| {
                        let concurrent = concurrent.clone();
                        let max_concurrent = max_concurrent.clone();
                        async move {
                            let now = concurrent.fetch_add(1, Ordering::SeqCst) + 1;
                            max_concurrent.fetch_max(now, Ordering::SeqCst);
                            tokio::time::sleep(Duration::from_millis(5)).await;
                            concurrent.fetch_sub(1, Ordering::SeqCst);
                        }
                    })
                    .await
                    .unwrap();
            }));
        }
        for h in handles {
            h.await.unwrap();
        }
        assert_eq!(max_concurrent.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn distinct_names_make_progress_independently() {
        let state = Arc::new(State::new());
        state
            .seed(&seed_map(&[("api", "id-1"), ("worker", "id-2")]))
            .await;

        let api_state = state.clone();
        let api_task = tokio::spawn(async move {
            api_state
                .use_component("api", |cs| async {
                    cs.log_incident("i1", Status::MajorOutage);
                    tokio::time::sleep(Duration::from_millis(20)).await;
                })
                .await
        });

        let worker_state = state.clone();
        let worker_task = tokio::spawn(async move {
            let start = std::time::Instant::now();
            worker_state
                .use_component("worker", |cs| async move {
                    cs.log_incident("i2", Status::PartialOutage);
                    start.elapsed()
                })
                .await
        });

        api_task.await.unwrap().unwrap();
        let worker_elapsed = worker_task.await.unwrap().unwrap();
        // worker's hook does no sleeping of its own; if it were serialized
        // behind api's 20ms hold it would take close to that long instead.
        assert!(worker_elapsed < Duration::from_millis(15));

        let api_status = state
            .use_component("api", |cs| async move { cs.desired_status() })
            .await
            .unwrap();
        let worker_status = state
            .use_component("worker", |cs| async move { cs.desired_status() })
            .await
            .unwrap();
        assert_eq!(api_status, Status::MajorOutage);
        assert_eq!(worker_status, Status::PartialOutage);
    }
}
