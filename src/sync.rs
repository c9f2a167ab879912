//! Paginated list synchronizer
//!
//! One `ListSync` per list view: it fetches a page of a remote collection,
//! renders it into the view's container and renders the pagination control
//! whose links lead back to [`ListSync::navigate`]. What differs between views
//! (endpoint, template, empty state) lives in a [`ListSpec`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::de::DeserializeOwned;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;

use crate::client::ApiClient;
use crate::container::{Container, Ticket};
use crate::error::ApiError;
use crate::events::StateChange;
use crate::model::{Page, PageRequest};
use crate::render::{render_list, render_pagination};

/// Everything that distinguishes one list view from another
pub struct ListSpec<T> {
    /// Short name used in routes and logs (e.g. `clientes`)
    pub name: &'static str,

    /// Collection endpoint, relative to the API base URL
    pub resource_path: &'static str,

    /// Front-end route that pagination links point at
    pub route: &'static str,

    pub page_size: u32,

    /// Unpaginated views leave the pagination markup empty
    pub paginated: bool,

    /// Markup placed before the items, e.g. a placeholder `<option>`
    pub leading: &'static str,

    /// Markup of a single item
    pub template: fn(&T) -> String,

    /// Markup shown when the page has no items
    pub empty: &'static str,

    /// Markup shown when the page could not be loaded
    pub failure: fn(&str) -> String,
}

/// Where a view's items come from: an endpoint plus extra query parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub resource_path: String,
    pub query: Vec<(String, String)>,
}

impl Source {
    pub fn new(resource_path: impl Into<String>) -> Self {
        Source {
            resource_path: resource_path.into(),
            query: Vec::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

#[derive(Debug)]
struct Cursor {
    page: u32,
    source: Source,
}

pub struct ListSync<T> {
    client: ApiClient,
    spec: ListSpec<T>,
    container: Container,
    cursor: Mutex<Cursor>,
}

impl<T> ListSync<T>
where
    T: DeserializeOwned + Send + 'static,
{
    pub fn new(client: ApiClient, spec: ListSpec<T>) -> Self {
        let cursor = Cursor {
            page: 0,
            source: Source::new(spec.resource_path),
        };

        ListSync {
            client,
            container: Container::new(spec.name),
            spec,
            cursor: Mutex::new(cursor),
        }
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    /// The view's own endpoint without filters
    pub fn default_source(&self) -> Source {
        Source::new(self.spec.resource_path)
    }

    /// Page and source of the most recent load
    pub fn current(&self) -> (u32, Source) {
        let cursor = self.lock_cursor();
        (cursor.page, cursor.source.clone())
    }

    /// Fetches `page` from `source` and renders it into the container
    ///
    /// On failure the container shows the view's failure markup and the
    /// error is returned. If another load was started meanwhile, this one's
    /// markup is discarded, but its result is still returned to the caller;
    /// use [`ListSync::load_latest`] to drop it as well.
    pub async fn load(&self, page: u32, source: Source) -> Result<Page<T>, ApiError> {
        self.run(page, source).await.1
    }

    /// Like [`ListSync::load`], but `None` when a newer load superseded this one
    ///
    /// Callers that react to the result (notifications) must ignore a
    /// superseded one.
    pub async fn load_latest(
        &self,
        page: u32,
        source: Source,
    ) -> Option<Result<Page<T>, ApiError>> {
        let (ticket, result) = self.run(page, source).await;
        if self.container.is_current(ticket) {
            Some(result)
        } else {
            None
        }
    }

    async fn run(&self, page: u32, source: Source) -> (Ticket, Result<Page<T>, ApiError>) {
        let ticket = {
            let mut cursor = self.lock_cursor();
            cursor.page = page;
            cursor.source = source.clone();
            self.container.issue()
        };

        let request = PageRequest::new(page, self.spec.page_size);
        let result = self
            .client
            .load_page::<T>(&source.resource_path, request, &source.query)
            .await;

        match &result {
            Ok(loaded) => {
                let mut list = self.spec.leading.to_string();
                list.push_str(&render_list(&loaded.content, self.spec.template, self.spec.empty));

                let pagination = if self.spec.paginated {
                    render_pagination(loaded, |index| self.href(index))
                } else {
                    String::new()
                };

                self.container.commit(ticket, list, Some(pagination));
            }
            Err(err) => {
                tracing::warn!("{}: failed to load page {}: {}", self.spec.name, page, err);
                self.container
                    .commit(ticket, (self.spec.failure)(&err.to_string()), None);
            }
        }

        (ticket, result)
    }

    /// Loads `page` from the source currently shown
    ///
    /// This is what pagination links trigger, so paging through a filtered
    /// list stays inside the filter.
    pub async fn navigate(&self, page: u32) -> Result<Page<T>, ApiError> {
        let (_, source) = self.current();
        self.load(page, source).await
    }

    /// Reloads the page currently shown
    ///
    /// When that page no longer exists (its last item was deleted), the last
    /// remaining page is loaded instead.
    pub async fn refresh(&self) -> Result<Page<T>, ApiError> {
        let (page, source) = self.current();
        let loaded = self.load(page, source.clone()).await?;

        if loaded.is_empty() && loaded.total_pages > 0 && page >= loaded.total_pages {
            tracing::debug!(
                "{}: page {} is gone, showing page {}",
                self.spec.name,
                page,
                loaded.total_pages - 1
            );
            return self.load(loaded.total_pages - 1, source).await;
        }

        Ok(loaded)
    }

    /// First page of the unfiltered collection
    pub async fn reset(&self) -> Result<Page<T>, ApiError> {
        self.load(0, self.default_source()).await
    }

    /// Link target of the pagination entry for `page`
    pub fn href(&self, page: u32) -> String {
        format!("{}?page={}", self.spec.route, page)
    }

    /// Refreshes the view whenever one of `interest` is published
    ///
    /// Runs until the event bus is dropped.
    pub fn watch(
        self: Arc<Self>,
        mut events: broadcast::Receiver<StateChange>,
        interest: &'static [StateChange],
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                let refresh = match events.recv().await {
                    Ok(change) => interest.contains(&change),
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::debug!("{}: skipped {} events", self.spec.name, skipped);
                        true
                    }
                    Err(RecvError::Closed) => break,
                };

                if refresh {
                    // Failures already landed in the container.
                    let _ = self.refresh().await;
                }
            }
        })
    }

    fn lock_cursor(&self) -> MutexGuard<'_, Cursor> {
        self.cursor.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
