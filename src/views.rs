//! The concrete list views of the front-end
//!
//! - `clientes` - customer table, also the target of the name search
//! - `opcoes` - customer selector of the rental form (one big page)
//! - `fliperamas` - every rental as a card
//! - `alugados` - rentals currently rented
//! - `cancelados` - cancelled rentals

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::client::{self, ApiClient};
use crate::config::Config;
use crate::container::Container;
use crate::error::ApiError;
use crate::events::{EventBus, StateChange};
use crate::model::{Customer, RentalRecord};
use crate::notify::Notifier;
use crate::render;
use crate::sync::{ListSpec, ListSync, Source};

const CUSTOMER_EVENTS: &[StateChange] = &[StateChange::CustomersChanged];
const RENTAL_EVENTS: &[StateChange] = &[StateChange::RentalsChanged];

pub const MSG_API_OFFLINE: &str = "API não está respondendo. Verifique se o servidor está rodando.";

pub struct Views {
    client: ApiClient,
    pub customers: Arc<ListSync<Customer>>,
    pub customer_options: Arc<ListSync<Customer>>,
    pub rentals: Arc<ListSync<RentalRecord>>,
    pub rented: Arc<ListSync<RentalRecord>>,
    pub cancelled: Arc<ListSync<RentalRecord>>,
}

impl Views {
    pub fn new(client: ApiClient, config: &Config) -> Self {
        let customers = ListSpec {
            name: "clientes",
            resource_path: client::CUSTOMERS,
            route: "/views/clientes",
            page_size: config.customer_page_size,
            paginated: true,
            leading: "",
            template: render::customer_row,
            empty: render::CUSTOMERS_EMPTY,
            failure: render::customers_failure,
        };

        let customer_options = ListSpec {
            name: "opcoes",
            resource_path: client::CUSTOMERS,
            route: "/views/clientes/opcoes",
            page_size: config.customer_select_size,
            paginated: false,
            leading: render::CUSTOMER_OPTIONS_EMPTY,
            template: render::customer_option,
            empty: "",
            failure: render::customer_options_failure,
        };

        let rentals = ListSpec {
            name: "fliperamas",
            resource_path: client::RENTALS,
            route: "/views/fliperamas",
            page_size: config.rental_page_size,
            paginated: true,
            leading: "",
            template: render::rental_card,
            empty: render::RENTALS_EMPTY,
            failure: render::rentals_failure,
        };

        let rented = ListSpec {
            name: "alugados",
            resource_path: client::RENTED,
            route: "/views/alugados",
            page_size: config.rental_page_size,
            paginated: true,
            leading: "",
            template: render::rented_row,
            empty: render::RENTED_EMPTY,
            failure: render::rented_failure,
        };

        let cancelled = ListSpec {
            name: "cancelados",
            resource_path: client::CANCELLED,
            route: "/views/cancelados",
            page_size: config.rental_page_size,
            paginated: true,
            leading: "",
            template: render::cancelled_row,
            empty: render::CANCELLED_EMPTY,
            failure: render::cancelled_failure,
        };

        Views {
            customers: Arc::new(ListSync::new(client.clone(), customers)),
            customer_options: Arc::new(ListSync::new(client.clone(), customer_options)),
            rentals: Arc::new(ListSync::new(client.clone(), rentals)),
            rented: Arc::new(ListSync::new(client.clone(), rented)),
            cancelled: Arc::new(ListSync::new(client.clone(), cancelled)),
            client,
        }
    }

    /// Subscribes every view to the state changes it displays
    pub fn watch(&self, events: &EventBus) -> Vec<JoinHandle<()>> {
        vec![
            Arc::clone(&self.customers).watch(events.subscribe(), CUSTOMER_EVENTS),
            Arc::clone(&self.customer_options).watch(events.subscribe(), CUSTOMER_EVENTS),
            Arc::clone(&self.rentals).watch(events.subscribe(), RENTAL_EVENTS),
            Arc::clone(&self.rented).watch(events.subscribe(), RENTAL_EVENTS),
            Arc::clone(&self.cancelled).watch(events.subscribe(), RENTAL_EVENTS),
        ]
    }

    /// Container of the view called `name`
    pub fn container(&self, name: &str) -> Option<&Container> {
        match name {
            "clientes" => Some(self.customers.container()),
            "opcoes" => Some(self.customer_options.container()),
            "fliperamas" => Some(self.rentals.container()),
            "alugados" => Some(self.rented.container()),
            "cancelados" => Some(self.cancelled.container()),
            _ => None,
        }
    }

    /// Shows customers whose name contains `term`
    ///
    /// A blank term goes back to the full list. Before searching, the backend
    /// is probed so an offline API gets a clear message instead of a generic
    /// failure. An empty result is reported as an info notification.
    pub async fn search_customers(&self, term: &str, notifier: &Notifier) -> Result<(), ApiError> {
        let term = term.trim();
        if term.is_empty() {
            return self.customers.reset().await.map(|_| ());
        }

        if !self.client.ping().await {
            notifier.error(MSG_API_OFFLINE);
            return Err(ApiError::Transport(MSG_API_OFFLINE.to_string()));
        }

        let source = Source::new(client::CUSTOMER_SEARCH).with_param("nome", term);
        // A newer search owns the container and the notification slot.
        let Some(result) = self.customers.load_latest(0, source).await else {
            tracing::debug!("search for {:?} superseded", term);
            return Ok(());
        };

        match result {
            Ok(page) => {
                if page.is_empty() {
                    notifier.info(format!("Nenhum cliente encontrado para \"{}\"", term));
                }
                Ok(())
            }
            Err(err) => {
                notifier.error(format!("Erro ao buscar clientes: {}", err));
                Err(err)
            }
        }
    }

    /// Reloads the rental form's customer selector
    pub async fn load_customer_options(&self, notifier: &Notifier) -> Result<(), ApiError> {
        match self.customer_options.reset().await {
            Ok(page) => {
                tracing::debug!("{} customers loaded into the selector", page.content.len());
                Ok(())
            }
            Err(err) => {
                notifier.error("Erro ao carregar lista de clientes");
                Err(err)
            }
        }
    }
}
