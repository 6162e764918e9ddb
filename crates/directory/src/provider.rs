use async_trait::async_trait;
use context::{Group, SessionUser};
use futures::stream::BoxStream;

/// A user's group memberships as a lazy sequence.
///
/// The stream is finite and not restartable. Each page boundary may fail;
/// an `Err` item is final and ends the stream.
pub type GroupStream = BoxStream<'static, crate::Result<Group>>;

/// Client seam to the identity provider's group membership API.
#[async_trait]
pub trait GroupsProvider: Send + Sync {
    /// Begin enumerating the groups `user` belongs to.
    async fn groups(&self, user: &SessionUser) -> crate::Result<GroupStream>;
}
