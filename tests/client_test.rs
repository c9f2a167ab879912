//! Tests for the backend client and its error mapping

mod common;

use std::time::Duration;

use reqwest::StatusCode;

use locadora::client::{self, ApiClient};
use locadora::error::ApiError;
use locadora::model::{PageRequest, RentalStatus};

use common::{spawn_backend, DEAD_BACKEND};

fn client_for(url: &str) -> ApiClient {
    ApiClient::new(url, Duration::from_secs(2)).expect("Failed to build client")
}

#[test]
fn test_error_message_taken_from_body() {
    let err = ApiError::from_response(
        StatusCode::BAD_REQUEST,
        r#"{"message":"Fliperama Já está alugado","status":400}"#.as_bytes(),
    );

    assert_eq!(
        err,
        ApiError::Server {
            status: 400,
            message: "Fliperama Já está alugado".to_string()
        }
    );
    assert_eq!(err.to_string(), "Fliperama Já está alugado");
}

#[test]
fn test_error_message_synthesized_without_body_message() {
    let err = ApiError::from_response(StatusCode::INTERNAL_SERVER_ERROR, b"<html>oops</html>");
    assert_eq!(err.to_string(), "Erro 500: Internal Server Error");

    let blank = ApiError::from_response(StatusCode::NOT_FOUND, br#"{"message":"  "}"#);
    assert_eq!(blank.to_string(), "Erro 404: Not Found");
}

#[test]
fn test_user_message_by_status() {
    let invalid = ApiError::Server {
        status: 400,
        message: "telefone inválido".to_string(),
    };
    assert_eq!(invalid.user_message("x"), "Dados inválidos: telefone inválido");

    let missing = ApiError::Server {
        status: 404,
        message: "Erro 404: Not Found".to_string(),
    };
    assert_eq!(missing.user_message("Cliente não encontrado"), "Cliente não encontrado");

    let other = ApiError::Server {
        status: 500,
        message: "falhou".to_string(),
    };
    assert_eq!(other.user_message("x"), "falhou");
}

#[test]
fn test_mentions_ignores_case_and_transport() {
    let err = ApiError::Server {
        status: 400,
        message: "Fliperama JÁ ESTÁ ALUGADO".to_string(),
    };
    assert!(err.mentions(&["já está alugado"]));
    assert!(!err.mentions(&["cancelado"]));

    let transport = ApiError::Transport("já está alugado".to_string());
    assert!(!transport.mentions(&["já está alugado"]));
}

#[tokio::test]
async fn test_load_page_reads_spring_envelope() {
    let backend = spawn_backend().await;
    let client = client_for(&backend.url);

    let page = client
        .load_page::<locadora::model::Customer>(client::CUSTOMERS, PageRequest::new(1, 2), &[])
        .await
        .unwrap();

    assert_eq!(page.current_page, 1);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.total_elements, 3);
    assert_eq!(page.content.len(), 1);
    assert_eq!(page.content[0].name, "Carla Dias");
    assert!(page.has_previous());
    assert!(!page.has_next());
}

#[tokio::test]
async fn test_search_customers_filters_by_name() {
    let backend = spawn_backend().await;
    let client = client_for(&backend.url);

    let page = client
        .search_customers("bru", PageRequest::new(0, 10))
        .await
        .unwrap();

    assert_eq!(page.content.len(), 1);
    assert_eq!(page.content[0].id, 2);
}

#[tokio::test]
async fn test_rentals_decode_status_and_price() {
    let backend = spawn_backend().await;
    let client = client_for(&backend.url);

    let page = client
        .load_page::<locadora::model::RentalRecord>(client::RENTED, PageRequest::new(0, 12), &[])
        .await
        .unwrap();

    assert_eq!(page.content.len(), 1);
    let record = &page.content[0];
    assert_eq!(record.status, RentalStatus::Rented);
    assert_eq!(record.price, Some(rust_decimal::Decimal::new(4990, 2)));
    assert_eq!(record.customer.as_ref().unwrap().name, "Bruno Lima");
}

#[tokio::test]
async fn test_missing_customer_is_server_error() {
    let backend = spawn_backend().await;
    let client = client_for(&backend.url);

    let err = client.get_customer(999).await.unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "Erro 404: Not Found");
    assert!(!err.is_transport());
}

#[tokio::test]
async fn test_rent_twice_reports_backend_message() {
    let backend = spawn_backend().await;
    let client = client_for(&backend.url);

    client.rent(1).await.unwrap();
    assert_eq!(backend.store().rental(1).unwrap().status, RentalStatus::Rented);

    let err = client.rent(1).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.to_string(), "Fliperama Já está alugado");
}

#[tokio::test]
async fn test_cancel_moves_rented_record() {
    let backend = spawn_backend().await;
    let client = client_for(&backend.url);

    client.cancel(2).await.unwrap();

    assert_eq!(backend.store().rental(2).unwrap().status, RentalStatus::Cancelled);
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let client = client_for(DEAD_BACKEND);

    let err = client.get_customer(1).await.unwrap_err();
    assert!(err.is_transport());
    assert_eq!(err.status(), None);

    assert!(!client.ping().await);
}

#[tokio::test]
async fn test_ping_live_backend() {
    let backend = spawn_backend().await;
    let client = client_for(&format!("{}/", backend.url));

    assert_eq!(client.base_url(), backend.url);
    assert!(client.ping().await);
}
