//! Shared test helpers
//!
//! `spawn_backend` starts an in-memory stand-in for the rental REST API on a
//! random local port, answering with the same page envelope and error bodies
//! as the real one.

#![allow(dead_code)]

use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use chrono::NaiveDate;
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower::ServiceExt;

use locadora::config::Config;
use locadora::model::{Customer, CustomerPayload, Page, RecordId, RentalRecord, RentalStatus};
use locadora::route::create_app;
use locadora::state::{init_state, AppState};

/// Nothing listens here; requests fail at the transport level
pub const DEAD_BACKEND: &str = "http://127.0.0.1:1";

/// Search term the fake backend answers slowly
pub const SLOW_TERM: &str = "lento";
pub const SLOW_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug, Default)]
pub struct Store {
    pub customers: Vec<Customer>,
    pub rentals: Vec<RentalRecord>,
    next_id: RecordId,
}

impl Store {
    fn seeded() -> Self {
        let ana = customer(1, "Ana Souza", "11987654321", "ana@example.com");
        let bruno = customer(2, "Bruno Lima", "1133334444", "bruno@example.com");
        let carla = customer(3, "Carla Dias", "21999998888", "carla@example.com");

        let rentals = vec![
            rental(1, &ana, "Street Fighter II", RentalStatus::Available),
            rental(2, &bruno, "Pac-Man", RentalStatus::Rented),
            rental(3, &ana, "Metal Slug", RentalStatus::Cancelled),
        ];

        Store {
            customers: vec![ana, bruno, carla],
            rentals,
            next_id: 100,
        }
    }

    fn next_id(&mut self) -> RecordId {
        self.next_id += 1;
        self.next_id
    }

    pub fn add_customer(&mut self, name: &str) -> Customer {
        let id = self.next_id();
        let created = customer(id, name, "", "");
        self.customers.push(created.clone());
        created
    }

    pub fn rental(&self, id: RecordId) -> Option<&RentalRecord> {
        self.rentals.iter().find(|rental| rental.id == id)
    }
}

pub fn customer(id: RecordId, name: &str, phone: &str, email: &str) -> Customer {
    Customer {
        id,
        name: name.to_string(),
        phone: phone.to_string(),
        email: email.to_string(),
    }
}

pub fn rental(id: RecordId, owner: &Customer, title: &str, status: RentalStatus) -> RentalRecord {
    RentalRecord {
        id,
        customer: Some(owner.clone()),
        title: title.to_string(),
        players: 2,
        image_url: None,
        rental_date: NaiveDate::from_ymd_opt(2024, 3, 15),
        return_date: None,
        price: Some(Decimal::new(4990, 2)),
        status,
    }
}

type Shared = Arc<Mutex<Store>>;

pub struct Backend {
    pub url: String,
    pub store: Shared,
}

impl Backend {
    pub fn store(&self) -> std::sync::MutexGuard<'_, Store> {
        self.store.lock().unwrap()
    }
}

/// Starts the fake backend, seeded with three customers and three rentals
///
/// - customers 1 Ana Souza, 2 Bruno Lima, 3 Carla Dias
/// - rental 1 available, 2 rented, 3 cancelled
pub async fn spawn_backend() -> Backend {
    let store: Shared = Arc::new(Mutex::new(Store::seeded()));

    let app = Router::new()
        .route("/clientes", get(list_customers).post(create_customer))
        .route("/clientes/buscarNome", get(search_customers))
        .route(
            "/clientes/{id}",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
        .route("/fliperamas", get(list_rentals))
        .route("/fliperamas/alugados", get(list_rented))
        .route("/fliperamas/cancelados", get(list_cancelled))
        .route("/fliperamas/{customer_id}", post(create_rental))
        .route("/fliperamas/locar/{id}", put(rent))
        .route("/fliperamas/cancelar/{id}", put(cancel))
        .with_state(store.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Backend {
        url: format!("http://{}", addr),
        store,
    }
}

/// Builds the front-end against `api_base_url`, with views watching events
pub fn setup_test_app(api_base_url: &str) -> (Router, AppState) {
    let state = init_state(Config::with_api_base_url(api_base_url))
        .expect("Failed to build test state");
    state.watch();

    (create_app(state.clone()), state)
}

/// Helper function to parse response body as JSON
pub async fn response_json(body: Body) -> Value {
    let bytes = body
        .collect()
        .await
        .expect("Failed to read response body")
        .to_bytes();

    serde_json::from_slice(&bytes).expect("Failed to parse JSON")
}

pub async fn send(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    (status, response_json(response.into_body()).await)
}

pub async fn send_form(app: &Router, uri: &str, form: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/x-www-form-urlencoded")
                .body(Body::from(form.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    (status, response_json(response.into_body()).await)
}

/// Polls `check` for up to two seconds
pub async fn eventually<F, Fut>(mut check: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    for _ in 0..100 {
        if check().await {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    false
}

// Fake backend handlers

#[derive(Deserialize, Debug, Default)]
struct PageQuery {
    page: Option<u32>,
    size: Option<u32>,
    nome: Option<String>,
}

fn page_of<T: Clone>(items: &[T], query: &PageQuery) -> Page<T> {
    let page = query.page.unwrap_or(0);
    let size = query.size.unwrap_or(10).max(1);
    let total = items.len() as u32;

    Page {
        content: items
            .iter()
            .skip((page * size) as usize)
            .take(size as usize)
            .cloned()
            .collect(),
        current_page: page,
        total_pages: total.div_ceil(size),
        total_elements: total as u64,
    }
}

fn bad_request(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "message": message }))).into_response()
}

async fn list_customers(State(store): State<Shared>, Query(query): Query<PageQuery>) -> Response {
    let store = store.lock().unwrap();
    Json(page_of(&store.customers, &query)).into_response()
}

async fn search_customers(State(store): State<Shared>, Query(query): Query<PageQuery>) -> Response {
    let term = query.nome.clone().unwrap_or_default().to_lowercase();
    if term == SLOW_TERM {
        tokio::time::sleep(SLOW_DELAY).await;
    }

    let store = store.lock().unwrap();
    let found: Vec<Customer> = store
        .customers
        .iter()
        .filter(|customer| customer.name.to_lowercase().contains(&term))
        .cloned()
        .collect();

    Json(page_of(&found, &query)).into_response()
}

async fn get_customer(State(store): State<Shared>, Path(id): Path<RecordId>) -> Response {
    let store = store.lock().unwrap();
    match store.customers.iter().find(|customer| customer.id == id) {
        Some(customer) => Json(customer.clone()).into_response(),
        // Empty body on purpose: the client synthesizes the message
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn create_customer(
    State(store): State<Shared>,
    Json(payload): Json<CustomerPayload>,
) -> Response {
    let mut store = store.lock().unwrap();
    let id = store.next_id();
    let created = customer(id, &payload.name, &payload.phone, &payload.email);
    store.customers.push(created.clone());

    (StatusCode::CREATED, Json(created)).into_response()
}

async fn update_customer(
    State(store): State<Shared>,
    Path(id): Path<RecordId>,
    Json(payload): Json<CustomerPayload>,
) -> Response {
    let mut store = store.lock().unwrap();
    match store.customers.iter_mut().find(|customer| customer.id == id) {
        Some(existing) => {
            existing.name = payload.name;
            existing.phone = payload.phone;
            existing.email = payload.email;
            Json(existing.clone()).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Cliente não existe" })),
        )
            .into_response(),
    }
}

async fn delete_customer(State(store): State<Shared>, Path(id): Path<RecordId>) -> Response {
    let mut store = store.lock().unwrap();
    let before = store.customers.len();
    store.customers.retain(|customer| customer.id != id);

    if store.customers.len() == before {
        StatusCode::NOT_FOUND.into_response()
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}

fn rentals_with(store: &Shared, query: &PageQuery, status: Option<RentalStatus>) -> Response {
    let store = store.lock().unwrap();
    let matching: Vec<RentalRecord> = store
        .rentals
        .iter()
        .filter(|rental| status.map_or(true, |status| rental.status == status))
        .cloned()
        .collect();

    Json(page_of(&matching, query)).into_response()
}

async fn list_rentals(State(store): State<Shared>, Query(query): Query<PageQuery>) -> Response {
    rentals_with(&store, &query, None)
}

async fn list_rented(State(store): State<Shared>, Query(query): Query<PageQuery>) -> Response {
    rentals_with(&store, &query, Some(RentalStatus::Rented))
}

async fn list_cancelled(State(store): State<Shared>, Query(query): Query<PageQuery>) -> Response {
    rentals_with(&store, &query, Some(RentalStatus::Cancelled))
}

#[derive(Deserialize, Debug)]
struct NewRental {
    titulo: String,
    jogadores: u32,
    #[serde(rename = "urlImagem", default)]
    url_imagem: String,
    #[serde(rename = "dataLocacao")]
    data_locacao: NaiveDate,
    #[serde(rename = "dataEntrega", default)]
    data_entrega: Option<NaiveDate>,
    #[serde(rename = "valorAluguel", default)]
    valor_aluguel: Option<f64>,
}

async fn create_rental(
    State(store): State<Shared>,
    Path(customer_id): Path<RecordId>,
    Json(payload): Json<NewRental>,
) -> Response {
    let mut store = store.lock().unwrap();
    let owner = match store.customers.iter().find(|customer| customer.id == customer_id) {
        Some(owner) => owner.clone(),
        None => return StatusCode::NOT_FOUND.into_response(),
    };

    let id = store.next_id();
    let created = RentalRecord {
        id,
        customer: Some(owner),
        title: payload.titulo,
        players: payload.jogadores,
        image_url: Some(payload.url_imagem).filter(|url| !url.is_empty()),
        rental_date: Some(payload.data_locacao),
        return_date: payload.data_entrega,
        price: payload.valor_aluguel.and_then(|value| Decimal::try_from(value).ok()),
        status: RentalStatus::Available,
    };
    store.rentals.push(created.clone());

    (StatusCode::CREATED, Json(created)).into_response()
}

async fn rent(State(store): State<Shared>, Path(id): Path<RecordId>) -> Response {
    let mut store = store.lock().unwrap();
    let Some(record) = store.rentals.iter_mut().find(|rental| rental.id == id) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match record.status {
        RentalStatus::Available => {
            record.status = RentalStatus::Rented;
            Json(record.clone()).into_response()
        }
        RentalStatus::Rented => bad_request("Fliperama Já está alugado"),
        _ => bad_request("Fliperama indisponível para locação"),
    }
}

async fn cancel(State(store): State<Shared>, Path(id): Path<RecordId>) -> Response {
    let mut store = store.lock().unwrap();
    let Some(record) = store.rentals.iter_mut().find(|rental| rental.id == id) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match record.status {
        RentalStatus::Rented => {
            record.status = RentalStatus::Cancelled;
            Json(record.clone()).into_response()
        }
        RentalStatus::Cancelled => bad_request("Fliperama já cancelado"),
        _ => bad_request("Fliperama não pode ser cancelado"),
    }
}
