//! Route definitions of the front-end
//!
//! Three groups: list views under `/views`, the customer form under
//! `/formulario`, and the resource actions under `/clientes` and `/fliperamas`.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handler::{
    cancel_edit, cancel_rental, create_rental, customer_form, customer_options, delete_customer,
    dismiss_notification, edit_customer, health, list_cancelled, list_customers, list_rentals,
    list_rented, notification, rent, search_customers, submit_customer, view_snapshot,
};
use crate::state::AppState;

/// Creates the application router
///
/// # Route Definitions
///
/// - `GET /health` - Probes the backend
/// - `GET /notificacao` - Visible notification; `DELETE` dismisses it
/// - `GET /views/clientes` - Customer table (`page`, `nome`)
/// - `POST /views/clientes/busca` - Debounced name search
/// - `GET /views/clientes/opcoes` - Customer selector of the rental form
/// - `GET /views/fliperamas` - Rental cards (`page`)
/// - `GET /views/alugados` - Rented table (`page`)
/// - `GET /views/cancelados` - Cancelled table (`page`)
/// - `GET /views/atual/{view}` - Current content of a view, no fetch
/// - `GET /formulario/cliente` - Customer form in its current mode
/// - `POST /formulario/cliente/cancelar` - Leaves edit mode
/// - `POST /clientes` - Creates or updates a customer
/// - `GET /clientes/{id}/editar` - Loads a customer into the form
/// - `DELETE /clientes/{id}` - Deletes a customer
/// - `POST /fliperamas` - Registers a rental
/// - `POST /fliperamas/{id}/locar` - Rents a record
/// - `POST /fliperamas/{id}/cancelar` - Cancels a record
///
/// # Example Usage
///
/// ```no_run
/// # use locadora::config::Config;
/// # use locadora::route::create_app;
/// # use locadora::state::init_state;
/// let state = init_state(Config::default()).unwrap();
/// let app = create_app(state);
/// // axum::serve(listener, app).await.unwrap();
/// ```
pub fn create_app(state: AppState) -> Router {
    let views = Router::new()
        .route("/clientes", get(list_customers))
        .route("/clientes/busca", post(search_customers))
        .route("/clientes/opcoes", get(customer_options))
        .route("/fliperamas", get(list_rentals))
        .route("/alugados", get(list_rented))
        .route("/cancelados", get(list_cancelled))
        .route("/atual/{view}", get(view_snapshot));

    let form = Router::new()
        .route("/cliente", get(customer_form))
        .route("/cliente/cancelar", post(cancel_edit));

    Router::new()
        .route("/health", get(health))
        .route(
            "/notificacao",
            get(notification).delete(dismiss_notification),
        )
        .nest("/views", views)
        .nest("/formulario", form)
        .route("/clientes", post(submit_customer))
        .route("/clientes/{id}", delete(delete_customer))
        .route("/clientes/{id}/editar", get(edit_customer))
        .route("/fliperamas", post(create_rental))
        .route("/fliperamas/{id}/locar", post(rent))
        .route("/fliperamas/{id}/cancelar", post(cancel_rental))
        .with_state(state)
}
