use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use context::{Group, SessionUser};

use crate::{DirectoryError, GroupPage, GroupStream, GroupsProvider, PageSource, stream_pages};

const DEFAULT_PAGE_SIZE: usize = 25;

/// Directory backend serving group memberships from process memory.
///
/// Useful for tests and self-contained deployments. Memberships are served
/// through the pagination adapter, so consumers exercise the same paging
/// path a remote directory would.
#[derive(Debug, Clone)]
pub struct InMemoryDirectory {
    members: BTreeMap<String, Vec<Group>>,
    page_size: usize,
}

impl Default for InMemoryDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self {
            members: BTreeMap::new(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Number of groups served per page. Smaller sizes force more fetches.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_user<I>(mut self, id: impl Into<String>, groups: I) -> Self
    where
        I: IntoIterator<Item = Group>,
    {
        self.members.insert(id.into(), groups.into_iter().collect());
        self
    }
}

#[async_trait]
impl PageSource for InMemoryDirectory {
    async fn fetch(&self, user_id: &str, cursor: Option<&str>) -> crate::Result<GroupPage> {
        let groups = self
            .members
            .get(user_id)
            .ok_or_else(|| DirectoryError::UnknownUser(user_id.to_owned()))?;

        let offset = match cursor {
            Some(cursor) => cursor
                .parse::<usize>()
                .map_err(|_| DirectoryError::Transport(format!("invalid page cursor '{cursor}'")))?,
            None => 0,
        };

        let page: Vec<Group> = groups.iter().skip(offset).take(self.page_size).cloned().collect();
        let end = offset + page.len();
        let next_cursor = (end < groups.len()).then(|| end.to_string());

        Ok(GroupPage {
            groups: page,
            next_cursor,
        })
    }
}

#[async_trait]
impl GroupsProvider for InMemoryDirectory {
    async fn groups(&self, user: &SessionUser) -> crate::Result<GroupStream> {
        if !self.members.contains_key(&user.id) {
            return Err(DirectoryError::UnknownUser(user.id.clone()));
        }

        Ok(stream_pages(Arc::new(self.clone()), user.id.clone()))
    }
}
