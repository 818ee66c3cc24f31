use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::errors::ServiceError;
use crate::pagination::{Paged, Pagination};
use super::domain::{Caller, Poll, PollCreate, PollUpdate};
use super::repository::PollRepository;

/// Application service encapsulating poll ownership rules.
/// Every operation is scoped to the caller unless the caller is a superuser.
pub struct PollService {
    repo: Arc<dyn PollRepository>,
}

impl PollService {
    pub fn new(repo: Arc<dyn PollRepository>) -> Self { Self { repo } }

    /// List polls visible to the caller. `count` ignores the page window.
    #[instrument(skip(self), fields(caller = %caller.id, superuser = caller.is_superuser))]
    pub async fn list(&self, caller: &Caller, page: Pagination) -> Result<Paged<Poll>, ServiceError> {
        let owner = caller.owner_scope();
        let (skip, limit) = page.normalize();
        let count = self.repo.count(owner).await?;
        let data = self.repo.list(owner, skip, limit).await?;
        debug!(count, returned = data.len(), "polls listed");
        Ok(Paged { data, count })
    }

    /// Fetch one poll, enforcing ownership.
    #[instrument(skip(self), fields(caller = %caller.id))]
    pub async fn get(&self, caller: &Caller, id: i32) -> Result<Poll, ServiceError> {
        self.load_owned(caller, id).await
    }

    /// Create a poll owned by the caller.
    ///
    /// # Examples
    /// ```
    /// use service::polls::{PollService, domain::{Caller, PollCreate}, repository::mock::MockPollRepository};
    /// use std::sync::Arc;
    /// let svc = PollService::new(Arc::new(MockPollRepository::default()));
    /// let caller = Caller { id: uuid::Uuid::new_v4(), is_superuser: false };
    /// let input = PollCreate { title: "Foo".into(), description: Some("Fighters".into()) };
    /// let poll = tokio_test::block_on(svc.create(&caller, input)).unwrap();
    /// assert_eq!(poll.owner_id, caller.id);
    /// ```
    #[instrument(skip(self, input), fields(caller = %caller.id))]
    pub async fn create(&self, caller: &Caller, input: PollCreate) -> Result<Poll, ServiceError> {
        models::poll::validate_title(&input.title)?;
        models::poll::validate_description(input.description.as_deref())?;
        let poll = self.repo.insert(caller.id, &input).await?;
        info!(poll_id = poll.id, owner_id = %poll.owner_id, "poll_created");
        Ok(poll)
    }

    /// Apply the supplied fields only. The owner is never changed.
    #[instrument(skip(self, patch), fields(caller = %caller.id))]
    pub async fn update(&self, caller: &Caller, id: i32, patch: PollUpdate) -> Result<Poll, ServiceError> {
        // 先校验请求体，再查归属：非法输入一律 422
        if let Some(title) = &patch.title {
            models::poll::validate_title(title)?;
        }
        if let Some(description) = &patch.description {
            models::poll::validate_description(description.as_deref())?;
        }
        let existing = self.load_owned(caller, id).await?;
        let poll = self.repo.update(existing, &patch).await?;
        info!(poll_id = poll.id, "poll_updated");
        Ok(poll)
    }

    #[instrument(skip(self), fields(caller = %caller.id))]
    pub async fn delete(&self, caller: &Caller, id: i32) -> Result<(), ServiceError> {
        let existing = self.load_owned(caller, id).await?;
        if !self.repo.delete(existing.id).await? {
            // 并发删除：读到之后记录已不存在
            return Err(ServiceError::not_found("Poll"));
        }
        info!(poll_id = id, "poll_deleted");
        Ok(())
    }

    async fn load_owned(&self, caller: &Caller, id: i32) -> Result<Poll, ServiceError> {
        let poll = self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("Poll"))?;
        if !caller.can_access(&poll) {
            warn!(poll_id = id, owner_id = %poll.owner_id, "poll access denied");
            return Err(ServiceError::forbidden());
        }
        Ok(poll)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polls::repository::mock::MockPollRepository;
    use uuid::Uuid;

    fn user() -> Caller { Caller { id: Uuid::new_v4(), is_superuser: false } }
    fn admin() -> Caller { Caller { id: Uuid::new_v4(), is_superuser: true } }

    fn input(title: &str) -> PollCreate {
        PollCreate { title: title.into(), description: Some(format!("{title} description")) }
    }

    fn setup() -> (Arc<MockPollRepository>, PollService) {
        let repo = Arc::new(MockPollRepository::default());
        let svc = PollService::new(repo.clone());
        (repo, svc)
    }

    #[tokio::test]
    async fn create_forces_owner_to_caller() {
        let (_, svc) = setup();
        let alice = user();
        let p = svc.create(&alice, input("Foo")).await.unwrap();
        assert_eq!(p.owner_id, alice.id);
        assert_eq!(p.title, "Foo");
        assert!(p.id > 0);
    }

    #[tokio::test]
    async fn create_rejects_blank_title() {
        let (_, svc) = setup();
        let err = svc.create(&user(), input("  ")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Model(_)));
    }

    #[tokio::test]
    async fn list_scopes_to_owner_and_counts_outside_window() {
        let (_, svc) = setup();
        let (alice, bob) = (user(), user());
        for i in 0..5 {
            svc.create(&alice, input(&format!("a{i}"))).await.unwrap();
        }
        svc.create(&bob, input("b0")).await.unwrap();

        let page = svc.list(&alice, Pagination::new(1, 2)).await.unwrap();
        assert_eq!(page.count, 5);
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.data[0].title, "a1");
        assert!(page.data.iter().all(|p| p.owner_id == alice.id));

        let all = svc.list(&admin(), Pagination::default()).await.unwrap();
        assert_eq!(all.count, 6);
        assert_eq!(all.data.len(), 6);
    }

    #[tokio::test]
    async fn list_past_the_end_is_empty_with_full_count() {
        let (_, svc) = setup();
        let alice = user();
        svc.create(&alice, input("only")).await.unwrap();
        let page = svc.list(&alice, Pagination::new(10, 100)).await.unwrap();
        assert!(page.data.is_empty());
        assert_eq!(page.count, 1);
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let (_, svc) = setup();
        let err = svc.get(&admin(), 999).await.unwrap_err();
        assert_eq!(err.to_string(), "Poll not found");
    }

    #[tokio::test]
    async fn foreign_poll_is_forbidden_for_regular_user() {
        let (_, svc) = setup();
        let (alice, bob) = (user(), user());
        let p = svc.create(&alice, input("mine")).await.unwrap();

        assert!(matches!(svc.get(&bob, p.id).await, Err(ServiceError::Forbidden(_))));
        let patch = PollUpdate { title: Some("hijack".into()), description: None };
        assert!(matches!(svc.update(&bob, p.id, patch).await, Err(ServiceError::Forbidden(_))));
        assert!(matches!(svc.delete(&bob, p.id).await, Err(ServiceError::Forbidden(_))));

        // unchanged after the rejected attempts
        let still = svc.get(&alice, p.id).await.unwrap();
        assert_eq!(still.title, "mine");
    }

    #[tokio::test]
    async fn superuser_can_manage_any_poll() {
        let (_, svc) = setup();
        let (alice, root) = (user(), admin());
        let p = svc.create(&alice, input("mine")).await.unwrap();

        assert_eq!(svc.get(&root, p.id).await.unwrap().id, p.id);
        let patch = PollUpdate { title: Some("moderated".into()), description: None };
        let updated = svc.update(&root, p.id, patch).await.unwrap();
        assert_eq!(updated.owner_id, alice.id);
        svc.delete(&root, p.id).await.unwrap();
        assert!(matches!(svc.get(&root, p.id).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn update_applies_only_supplied_fields() {
        let (_, svc) = setup();
        let alice = user();
        let p = svc.create(&alice, input("Foo")).await.unwrap();

        let patch = PollUpdate { title: Some("Bar".into()), description: None };
        let updated = svc.update(&alice, p.id, patch).await.unwrap();
        assert_eq!(updated.title, "Bar");
        assert_eq!(updated.description, p.description);
        assert_eq!(updated.owner_id, alice.id);

        let cleared = svc.update(&alice, p.id, PollUpdate { title: None, description: Some(None) }).await.unwrap();
        assert_eq!(cleared.title, "Bar");
        assert_eq!(cleared.description, None);
    }

    #[tokio::test]
    async fn update_validates_supplied_title() {
        let (_, svc) = setup();
        let alice = user();
        let p = svc.create(&alice, input("Foo")).await.unwrap();
        let patch = PollUpdate { title: Some(String::new()), description: None };
        assert!(matches!(svc.update(&alice, p.id, patch).await, Err(ServiceError::Model(_))));
    }

    #[tokio::test]
    async fn update_validation_precedes_ownership_and_existence() {
        let (_, svc) = setup();
        let (alice, bob) = (user(), user());
        let p = svc.create(&alice, input("Foo")).await.unwrap();
        let long = || PollUpdate { title: Some("x".repeat(300)), description: None };
        assert!(matches!(svc.update(&bob, p.id, long()).await, Err(ServiceError::Model(_))));
        assert!(matches!(svc.update(&bob, 999, long()).await, Err(ServiceError::Model(_))));
        assert_eq!(svc.get(&alice, p.id).await.unwrap().title, "Foo");
    }

    #[tokio::test]
    async fn storage_failure_surfaces_as_db_error() {
        let (repo, svc) = setup();
        repo.set_unavailable(true);
        assert!(matches!(svc.list(&user(), Pagination::default()).await, Err(ServiceError::Db(_))));
    }
}
