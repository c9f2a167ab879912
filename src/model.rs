//! Data models for the rental front-end
//!
//! This module defines the wire representations exchanged with the rental
//! backend: customers, rental records, their status and the page envelope
//! every list endpoint returns. Field names on the wire are Portuguese and
//! mapped with `serde(rename)`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Server-assigned identifier of a customer or rental record
pub type RecordId = u64;

/// A customer as returned by `/clientes`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Customer {
    /// Identifier assigned by the backend
    pub id: RecordId,

    /// Display name, never empty
    #[serde(rename = "nome")]
    pub name: String,

    /// Phone number as stored by the backend (digits, possibly punctuated)
    #[serde(rename = "telefone", default)]
    pub phone: String,

    #[serde(default)]
    pub email: String,
}

/// Body of `POST /clientes` and `PUT /clientes/{id}`
///
/// # Example
/// ```json
/// { "nome": "Ana", "telefone": "11987654321", "email": "ana@example.com" }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CustomerPayload {
    #[serde(rename = "nome")]
    pub name: String,

    #[serde(rename = "telefone")]
    pub phone: String,

    pub email: String,
}

/// Lifecycle state of a rental record
///
/// Transitions are decided by the backend:
/// `Available -> Rented` (rent) and `Rented -> Cancelled` (cancel).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RentalStatus {
    #[serde(rename = "DISPONIVEL")]
    Available,

    #[serde(rename = "LOCADO")]
    Rented,

    #[serde(rename = "CANCELADO")]
    Cancelled,

    /// Any status this client does not know about
    #[serde(other)]
    Unknown,
}

impl RentalStatus {
    /// Whether the rent action applies to a record in this state
    pub fn can_rent(self) -> bool {
        self == RentalStatus::Available
    }

    /// Whether the cancel action applies to a record in this state
    pub fn can_cancel(self) -> bool {
        self == RentalStatus::Rented
    }

    /// Value sent to the backend for this status
    pub fn wire_name(self) -> &'static str {
        match self {
            RentalStatus::Available => "DISPONIVEL",
            RentalStatus::Rented => "LOCADO",
            RentalStatus::Cancelled => "CANCELADO",
            RentalStatus::Unknown => "DESCONHECIDO",
        }
    }
}

/// An arcade cabinet rental as returned by `/fliperamas`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RentalRecord {
    pub id: RecordId,

    /// Owning customer, nested by the backend; absent on orphaned records
    #[serde(rename = "cliente", default)]
    pub customer: Option<Customer>,

    #[serde(rename = "titulo")]
    pub title: String,

    /// Number of players the cabinet supports, at least 1
    #[serde(rename = "jogadores")]
    pub players: u32,

    #[serde(rename = "urlImagem", default)]
    pub image_url: Option<String>,

    #[serde(rename = "dataLocacao", default)]
    pub rental_date: Option<NaiveDate>,

    #[serde(rename = "dataEntrega", default)]
    pub return_date: Option<NaiveDate>,

    #[serde(
        rename = "valorAluguel",
        default,
        with = "rust_decimal::serde::float_option"
    )]
    pub price: Option<Decimal>,

    pub status: RentalStatus,
}

/// Body of `POST /fliperamas/{customerId}`
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RentalPayload {
    #[serde(rename = "titulo")]
    pub title: String,

    #[serde(rename = "jogadores")]
    pub players: u32,

    #[serde(rename = "urlImagem")]
    pub image_url: String,

    #[serde(rename = "dataLocacao")]
    pub rental_date: NaiveDate,

    /// Only sent when the form actually collected a return date
    #[serde(rename = "dataEntrega", skip_serializing_if = "Option::is_none")]
    pub return_date: Option<NaiveDate>,

    #[serde(rename = "valorAluguel", with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
}

/// Body of the status transition endpoints (`locar` / `cancelar`)
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct StatusChange {
    pub id: RecordId,
    pub status: &'static str,
}

/// One server-paginated slice of a collection
///
/// The backend uses the Spring Data page layout:
///
/// ```json
/// { "content": [...], "number": 0, "totalPages": 3, "totalElements": 25 }
/// ```
///
/// An empty collection may come back with `totalPages` 0.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,

    /// Index of this page, starting at 0
    #[serde(rename = "number", default)]
    pub current_page: u32,

    #[serde(rename = "totalPages", default)]
    pub total_pages: u32,

    #[serde(rename = "totalElements", default)]
    pub total_elements: u64,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 0
    }

    pub fn has_next(&self) -> bool {
        self.current_page.saturating_add(1) < self.total_pages
    }
}

/// Page index and size sent as `page` / `size` query parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        PageRequest { page, size }
    }
}
