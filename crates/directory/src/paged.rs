use std::sync::Arc;

use async_trait::async_trait;
use context::Group;
use futures::{StreamExt, TryStreamExt, stream};

use crate::GroupStream;

/// One page of group memberships from a cursor-paged directory API.
#[derive(Debug, Clone)]
pub struct GroupPage {
    pub groups: Vec<Group>,
    /// Cursor for the next page, `None` on the last page.
    pub next_cursor: Option<String>,
}

/// A cursor-paged source of group memberships.
#[async_trait]
pub trait PageSource: Send + Sync + 'static {
    /// Fetch one page. `cursor` is `None` for the first page, otherwise a
    /// value returned by a previous page's `next_cursor`.
    async fn fetch(&self, user_id: &str, cursor: Option<&str>) -> crate::Result<GroupPage>;
}

enum State {
    Page(Option<String>),
    Done,
}

/// Flattens a cursor-paged source into a lazy [`GroupStream`].
///
/// Pages are fetched on demand as the stream is polled, so a consumer that
/// stops early never pays for the remaining pages. A failed page fetch
/// surfaces once and ends the stream.
pub fn stream_pages(source: Arc<dyn PageSource>, user_id: String) -> GroupStream {
    let pages = stream::try_unfold(State::Page(None), move |state| {
        let source = source.clone();
        let user_id = user_id.clone();

        async move {
            let cursor = match state {
                State::Page(cursor) => cursor,
                State::Done => return Ok(None),
            };

            let page = source.fetch(&user_id, cursor.as_deref()).await?;

            let state = match page.next_cursor {
                Some(cursor) => State::Page(Some(cursor)),
                None => State::Done,
            };

            Ok(Some((page.groups, state)))
        }
    });

    pages
        .map_ok(|groups| stream::iter(groups).map(Ok))
        .try_flatten()
        .boxed()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::DirectoryError;

    struct FakePages {
        pages: Vec<crate::Result<GroupPage>>,
        fetched: AtomicUsize,
    }

    impl FakePages {
        fn new(pages: Vec<crate::Result<GroupPage>>) -> Arc<Self> {
            Arc::new(Self {
                pages,
                fetched: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl PageSource for FakePages {
        async fn fetch(&self, _user_id: &str, cursor: Option<&str>) -> crate::Result<GroupPage> {
            let index = cursor.map(|c| c.parse::<usize>().unwrap() + 1).unwrap_or(0);
            self.fetched.fetch_add(1, Ordering::SeqCst);

            match &self.pages[index] {
                Ok(page) => Ok(GroupPage {
                    groups: page.groups.clone(),
                    next_cursor: (index + 1 < self.pages.len()).then(|| index.to_string()),
                }),
                Err(DirectoryError::Transport(message)) => Err(DirectoryError::Transport(message.clone())),
                Err(DirectoryError::UnknownUser(user)) => Err(DirectoryError::UnknownUser(user.clone())),
            }
        }
    }

    fn page(names: &[&str]) -> crate::Result<GroupPage> {
        Ok(GroupPage {
            groups: names.iter().copied().map(Group::new).collect(),
            next_cursor: None,
        })
    }

    #[tokio::test]
    async fn preserves_order_across_pages() {
        let source = FakePages::new(vec![page(&["a", "b"]), page(&["c"]), page(&["d", "e"])]);
        let stream = stream_pages(source.clone(), "user".to_owned());

        let names: Vec<_> = stream
            .try_collect::<Vec<_>>()
            .await
            .unwrap()
            .into_iter()
            .map(|group| group.name)
            .collect();

        assert_eq!(names, ["a", "b", "c", "d", "e"]);
        assert_eq!(source.fetched.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn page_failure_surfaces_once_and_ends_stream() {
        let source = FakePages::new(vec![
            page(&["a"]),
            Err(DirectoryError::Transport("boom".to_owned())),
            page(&["never"]),
        ]);

        let mut stream = stream_pages(source.clone(), "user".to_owned());

        let first = stream.next().await.unwrap().unwrap();
        assert_eq!(first.name, "a");

        let error = stream.next().await.unwrap().unwrap_err();
        assert!(matches!(error, DirectoryError::Transport(_)));

        assert!(stream.next().await.is_none());
        assert_eq!(source.fetched.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn pages_are_fetched_lazily() {
        let source = FakePages::new(vec![page(&["a"]), page(&["b"])]);
        let mut stream = stream_pages(source.clone(), "user".to_owned());

        let first = stream.next().await.unwrap().unwrap();
        assert_eq!(first.name, "a");

        // The second page must not have been requested yet.
        assert_eq!(source.fetched.load(Ordering::SeqCst), 1);
    }
}
