use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::ServiceError;
use super::domain::{Poll, PollCreate, PollUpdate};

/// Persistence abstraction for polls. `owner: None` means "all owners".
#[async_trait]
pub trait PollRepository: Send + Sync {
    async fn count(&self, owner: Option<Uuid>) -> Result<u64, ServiceError>;
    async fn list(&self, owner: Option<Uuid>, skip: u64, limit: u64) -> Result<Vec<Poll>, ServiceError>;
    async fn get(&self, id: i32) -> Result<Option<Poll>, ServiceError>;
    async fn insert(&self, owner_id: Uuid, input: &PollCreate) -> Result<Poll, ServiceError>;
    /// Apply only the fields present in `patch` to `existing` and persist.
    async fn update(&self, existing: Poll, patch: &PollUpdate) -> Result<Poll, ServiceError>;
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    struct Rows {
        last_id: i32,
        polls: BTreeMap<i32, Poll>, // key: id, iteration follows insertion order
    }

    #[derive(Default)]
    pub struct MockPollRepository {
        rows: Mutex<Rows>,
        unavailable: AtomicBool,
    }

    impl MockPollRepository {
        /// Make every call fail as if the database were down.
        pub fn set_unavailable(&self, down: bool) {
            self.unavailable.store(down, Ordering::SeqCst);
        }

        fn rows(&self) -> Result<MutexGuard<'_, Rows>, ServiceError> {
            if self.unavailable.load(Ordering::SeqCst) {
                return Err(ServiceError::Db("connection refused".into()));
            }
            Ok(self.rows.lock().unwrap_or_else(|e| e.into_inner()))
        }
    }

    fn visible(p: &Poll, owner: Option<Uuid>) -> bool {
        owner.map_or(true, |o| p.owner_id == o)
    }

    #[async_trait]
    impl PollRepository for MockPollRepository {
        async fn count(&self, owner: Option<Uuid>) -> Result<u64, ServiceError> {
            let rows = self.rows()?;
            Ok(rows.polls.values().filter(|p| visible(p, owner)).count() as u64)
        }

        async fn list(&self, owner: Option<Uuid>, skip: u64, limit: u64) -> Result<Vec<Poll>, ServiceError> {
            let rows = self.rows()?;
            Ok(rows
                .polls
                .values()
                .filter(|p| visible(p, owner))
                .skip(skip as usize)
                .take(limit as usize)
                .cloned()
                .collect())
        }

        async fn get(&self, id: i32) -> Result<Option<Poll>, ServiceError> {
            Ok(self.rows()?.polls.get(&id).cloned())
        }

        async fn insert(&self, owner_id: Uuid, input: &PollCreate) -> Result<Poll, ServiceError> {
            let mut rows = self.rows()?;
            rows.last_id += 1;
            let poll = Poll {
                id: rows.last_id,
                title: input.title.clone(),
                description: input.description.clone(),
                owner_id,
            };
            rows.polls.insert(poll.id, poll.clone());
            Ok(poll)
        }

        async fn update(&self, mut existing: Poll, patch: &PollUpdate) -> Result<Poll, ServiceError> {
            let mut rows = self.rows()?;
            if !rows.polls.contains_key(&existing.id) {
                return Err(ServiceError::not_found("Poll"));
            }
            if let Some(title) = &patch.title {
                existing.title = title.clone();
            }
            if let Some(description) = &patch.description {
                existing.description = description.clone();
            }
            rows.polls.insert(existing.id, existing.clone());
            Ok(existing)
        }

        async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
            Ok(self.rows()?.polls.remove(&id).is_some())
        }
    }
}
