//! Application state and its initialization
//!
//! Everything the handlers share: the backend client, the list views with
//! their containers, the notification slot, the event bus and the action
//! dispatcher.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::client::ApiClient;
use crate::config::Config;
use crate::debounce::Debouncer;
use crate::dispatch::Dispatcher;
use crate::error::ApiError;
use crate::events::EventBus;
use crate::notify::Notifier;
use crate::views::Views;

/// Application state shared across all request handlers
///
/// Cloning is cheap; every clone points at the same views and slots.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub client: ApiClient,
    pub notifier: Notifier,
    pub events: EventBus,
    pub views: Arc<Views>,
    pub dispatcher: Arc<Dispatcher>,
    /// Pending search-as-you-type request
    pub search: Debouncer,
}

impl AppState {
    /// Subscribes the list views to state changes
    ///
    /// Must be called from within a tokio runtime. The returned tasks live
    /// as long as the state's event bus.
    pub fn watch(&self) -> Vec<JoinHandle<()>> {
        self.views.watch(&self.events)
    }
}

/// Builds the application state for `config`
///
/// # Errors
///
/// Returns [`ApiError::Transport`] when the HTTP client cannot be created.
pub fn init_state(config: Config) -> Result<AppState, ApiError> {
    let client = ApiClient::new(&config.api_base_url, config.request_timeout)?;
    let notifier = Notifier::new(config.notification_ttl);
    let events = EventBus::new();

    let views = Views::new(client.clone(), &config);
    let dispatcher = Dispatcher::new(client.clone(), notifier.clone(), events.clone());

    Ok(AppState {
        search: Debouncer::new(config.search_debounce),
        config: Arc::new(config),
        client,
        notifier,
        events,
        views: Arc::new(views),
        dispatcher: Arc::new(dispatcher),
    })
}
