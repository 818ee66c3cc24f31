use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use models::poll::Model as Poll;

/// The authenticated user a poll operation runs on behalf of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub id: Uuid,
    pub is_superuser: bool,
}

impl Caller {
    /// Superusers may touch any poll, everyone else only their own.
    pub fn can_access(&self, poll: &Poll) -> bool {
        self.is_superuser || poll.owner_id == self.id
    }

    /// Owner filter to apply on list/count; `None` means unrestricted.
    pub fn owner_scope(&self) -> Option<Uuid> {
        if self.is_superuser { None } else { Some(self.id) }
    }
}

/// Creation input; the owner is never taken from the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollCreate {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Partial update input. Absent fields stay untouched; `description: null`
/// clears the description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PollUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "explicit_null", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
}

// 区分“字段缺失”（外层 None）与“显式 null”（Some(None)）
fn explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
