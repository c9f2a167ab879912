//! HTTP request handlers of the front-end
//!
//! View handlers run a list view's fetch/render cycle and answer with the
//! container content. Action handlers run a dispatcher and answer with its
//! outcome. Both include the current notification markup, so the page can
//! swap every fragment in one go.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::container::Rendered;
use crate::dispatch::Outcome;
use crate::error::ApiError;
use crate::form::{CustomerDraft, FormMode, RentalForm};
use crate::model::RecordId;
use crate::state::AppState;
use crate::sync::ListSync;
use crate::views::MSG_API_OFFLINE;

/// Query parameters of the list views
///
/// Without `page` the view reloads the page it currently shows.
#[derive(Deserialize, Debug, Default)]
pub struct PageParams {
    pub page: Option<u32>,
}

/// Query parameters of the customer view
///
/// `nome` switches to the name search; a blank `nome` goes back to the full
/// list.
#[derive(Deserialize, Debug, Default)]
pub struct CustomerListParams {
    pub page: Option<u32>,
    pub nome: Option<String>,
}

/// Body of the search-as-you-type endpoint
#[derive(Deserialize, Debug, Default)]
pub struct SearchForm {
    #[serde(default)]
    pub nome: String,
}

/// Probes the backend
///
/// - **200 OK** - the backend answers
/// - **503 Service Unavailable** - it does not
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    if state.client.ping().await {
        (StatusCode::OK, Json(json!({ "api": "online" }))).into_response()
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "api": "offline", "message": MSG_API_OFFLINE })),
        )
            .into_response()
    }
}

pub async fn notification(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "current": state.notifier.current(),
        "notification": state.notifier.render(),
    }))
}

/// Closes the visible notification before its timer does
pub async fn dismiss_notification(State(state): State<AppState>) -> impl IntoResponse {
    state.notifier.dismiss();
    StatusCode::NO_CONTENT
}

/// Customer table, or the name search when `nome` is given
///
/// # Example Request
///
/// `GET /views/clientes?nome=ana`
pub async fn list_customers(
    State(state): State<AppState>,
    Query(params): Query<CustomerListParams>,
) -> impl IntoResponse {
    let views = &state.views;
    let result = match params.nome {
        Some(nome) => views.search_customers(&nome, &state.notifier).await,
        None => show(&views.customers, params.page).await,
    };

    view_response(&state, "clientes", views.customers.container().snapshot(), result)
}

/// Schedules a search-as-you-type request
///
/// Every call restarts the debounce delay; only the last term is searched.
/// The result lands in the `clientes` container.
pub async fn search_customers(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> impl IntoResponse {
    let views = state.views.clone();
    let notifier = state.notifier.clone();
    let term = form.nome.clone();

    state.search.call(async move {
        // The outcome is already in the container and the notification slot.
        let _ = views.search_customers(&term, &notifier).await;
    });

    (
        StatusCode::ACCEPTED,
        Json(json!({
            "scheduled": form.nome.trim(),
            "delay_ms": state.search.delay().as_millis() as u64,
        })),
    )
}

/// Customer selector of the rental form
pub async fn customer_options(State(state): State<AppState>) -> impl IntoResponse {
    let views = &state.views;
    let result = views.load_customer_options(&state.notifier).await;

    view_response(&state, "opcoes", views.customer_options.container().snapshot(), result)
}

pub async fn list_rentals(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> impl IntoResponse {
    let sync = &state.views.rentals;
    let result = show(sync, params.page).await;

    view_response(&state, "fliperamas", sync.container().snapshot(), result)
}

pub async fn list_rented(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> impl IntoResponse {
    let sync = &state.views.rented;
    let result = show(sync, params.page).await;

    view_response(&state, "alugados", sync.container().snapshot(), result)
}

pub async fn list_cancelled(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> impl IntoResponse {
    let sync = &state.views.cancelled;
    let result = show(sync, params.page).await;

    view_response(&state, "cancelados", sync.container().snapshot(), result)
}

/// Current content of a view without fetching anything
///
/// - **200 OK** - content of the view
/// - **404 Not Found** - no view with that name
pub async fn view_snapshot(
    State(state): State<AppState>,
    Path(view): Path<String>,
) -> impl IntoResponse {
    match state.views.container(&view) {
        Some(container) => view_response(&state, container.name(), container.snapshot(), Ok(())),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "View not found",
                "code": "not_found"
            })),
        )
            .into_response(),
    }
}

/// Customer form in its current mode
pub async fn customer_form(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "mode": mode_name(&state),
        "form": state.dispatcher.editor().render(),
    }))
}

/// Submits the customer form (create or update, by form mode)
pub async fn submit_customer(
    State(state): State<AppState>,
    Form(draft): Form<CustomerDraft>,
) -> impl IntoResponse {
    let outcome = state.dispatcher.submit_customer(draft).await;
    action_response(&state, outcome)
}

pub async fn edit_customer(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> impl IntoResponse {
    let outcome = state.dispatcher.begin_edit(id).await;
    action_response(&state, outcome)
}

pub async fn cancel_edit(State(state): State<AppState>) -> impl IntoResponse {
    state.dispatcher.cancel_edit();
    action_response(&state, Outcome::Success("Edição cancelada".to_string()))
}

pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> impl IntoResponse {
    let outcome = state.dispatcher.delete_customer(id).await;
    action_response(&state, outcome)
}

pub async fn create_rental(
    State(state): State<AppState>,
    Form(form): Form<RentalForm>,
) -> impl IntoResponse {
    let outcome = state.dispatcher.create_rental(form).await;
    action_response(&state, outcome)
}

pub async fn rent(State(state): State<AppState>, Path(id): Path<RecordId>) -> impl IntoResponse {
    let outcome = state.dispatcher.rent(id).await;
    action_response(&state, outcome)
}

pub async fn cancel_rental(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> impl IntoResponse {
    let outcome = state.dispatcher.cancel_rental(id).await;
    action_response(&state, outcome)
}

async fn show<T>(sync: &ListSync<T>, page: Option<u32>) -> Result<(), ApiError>
where
    T: serde::de::DeserializeOwned + Send + 'static,
{
    let result = match page {
        Some(page) => sync.navigate(page).await,
        None => sync.refresh().await,
    };
    result.map(|_| ())
}

/// - **200 OK** - the view was loaded
/// - **502 Bad Gateway** - the backend call failed; the failure markup is in `list`
fn view_response(
    state: &AppState,
    view: &str,
    rendered: Rendered,
    result: Result<(), ApiError>,
) -> Response {
    let (status, error) = match result {
        Ok(()) => (StatusCode::OK, None),
        Err(err) => (StatusCode::BAD_GATEWAY, Some(err.to_string())),
    };

    (
        status,
        Json(json!({
            "view": view,
            "list": rendered.list,
            "pagination": rendered.pagination,
            "sequence": rendered.sequence,
            "error": error,
            "notification": state.notifier.render(),
        })),
    )
        .into_response()
}

/// - **200 OK** - the action succeeded
/// - **422 Unprocessable Entity** - validation or backend failure, see `message`
fn action_response(state: &AppState, outcome: Outcome) -> Response {
    let status = if outcome.is_success() {
        StatusCode::OK
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };

    (
        status,
        Json(json!({
            "outcome": outcome,
            "message": outcome.message(),
            "mode": mode_name(state),
            "form": state.dispatcher.editor().render(),
            "notification": state.notifier.render(),
        })),
    )
        .into_response()
}

fn mode_name(state: &AppState) -> String {
    match state.dispatcher.editor().mode() {
        FormMode::Create => "create".to_string(),
        FormMode::Edit(id) => format!("edit:{}", id),
    }
}
