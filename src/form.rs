//! Form decoding, validation and the customer editor state
//!
//! Forms arrive as url-encoded strings, exactly as the browser typed them.
//! Validation only covers field presence and the handful of rules the page
//! checked before submitting; the backend stays authoritative.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};
use validator_derive::Validate;

use crate::model::{Customer, CustomerPayload, RecordId, RentalPayload};
use crate::render;

pub const MSG_SELECT_CUSTOMER: &str = "Por favor, selecione um cliente.";
pub const MSG_REQUIRED_FIELDS: &str = "Por favor, preencha todos os campos obrigatórios.";
pub const MSG_MIN_PLAYERS: &str = "O número de jogadores deve ser pelo menos 1.";
pub const MSG_RETURN_DATE: &str = "A data de entrega deve ser posterior à data de locação.";
pub const MSG_PRICE: &str = "O valor do aluguel deve ser um número não negativo.";

/// A form that failed validation; the message is shown as-is
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct FormError(pub String);

/// Customer form fields as submitted
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct CustomerDraft {
    #[serde(rename = "nome", default)]
    pub name: String,

    #[serde(rename = "telefone", default)]
    pub phone: String,

    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Validate)]
struct CustomerInput {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    name: String,

    #[validate(email(message = "Informe um e-mail válido."))]
    email: Option<String>,
}

impl CustomerDraft {
    /// Trims every field and checks the name and e-mail
    pub fn validate(&self) -> Result<CustomerPayload, FormError> {
        let email = self.email.trim();
        let input = CustomerInput {
            name: self.name.trim().to_string(),
            email: Some(email.to_string()).filter(|email| !email.is_empty()),
        };

        input
            .validate()
            .map_err(|errors| first_message(&errors, &["name", "email"]))?;

        Ok(CustomerPayload {
            name: input.name,
            phone: self.phone.trim().to_string(),
            email: email.to_string(),
        })
    }
}

impl From<&Customer> for CustomerDraft {
    fn from(customer: &Customer) -> Self {
        CustomerDraft {
            name: customer.name.clone(),
            phone: customer.phone.clone(),
            email: customer.email.clone(),
        }
    }
}

/// Rental form fields as submitted
///
/// `dataEntrega` is optional: the page does not always collect it.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RentalForm {
    #[serde(rename = "clienteId", default)]
    pub customer_id: String,

    #[serde(rename = "titulo", default)]
    pub title: String,

    #[serde(rename = "jogadores", default)]
    pub players: String,

    #[serde(rename = "urlImagem", default)]
    pub image_url: String,

    #[serde(rename = "dataLocacao", default)]
    pub rental_date: String,

    #[serde(rename = "dataEntrega", default)]
    pub return_date: String,

    #[serde(rename = "valorAluguel", default)]
    pub price: String,
}

#[derive(Debug, Validate)]
struct PlayersInput {
    #[validate(range(min = 1, message = "O número de jogadores deve ser pelo menos 1."))]
    players: i32,
}

impl RentalForm {
    /// Checks the form and builds the request for `POST /fliperamas/{customerId}`
    ///
    /// Checks run in the order the page used, and the first failing one wins.
    /// The return date is only compared with the rental date when present.
    pub fn validate(&self) -> Result<(RecordId, RentalPayload), FormError> {
        let customer_id = self
            .customer_id
            .trim()
            .parse::<RecordId>()
            .map_err(|_| FormError(MSG_SELECT_CUSTOMER.to_string()))?;

        let title = self.title.trim();
        let players = self.players.trim().parse::<i32>().ok();
        let rental_date = parse_date(&self.rental_date);

        let (players, rental_date) = match (players, rental_date) {
            (Some(players), Some(rental_date)) if !title.is_empty() => (players, rental_date),
            _ => return Err(FormError(MSG_REQUIRED_FIELDS.to_string())),
        };

        PlayersInput { players }
            .validate()
            .map_err(|errors| first_message(&errors, &["players"]))?;

        let return_date = match self.return_date.trim() {
            "" => None,
            raw => Some(parse_date(raw).ok_or_else(|| FormError(MSG_RETURN_DATE.to_string()))?),
        };
        if let Some(return_date) = return_date {
            if return_date <= rental_date {
                return Err(FormError(MSG_RETURN_DATE.to_string()));
            }
        }

        let price = parse_price(&self.price)?;

        Ok((
            customer_id,
            RentalPayload {
                title: title.to_string(),
                players: players as u32,
                image_url: self.image_url.trim().to_string(),
                rental_date,
                return_date,
                price,
            },
        ))
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Accepts `12.5` as well as the Brazilian `12,50`
fn parse_price(raw: &str) -> Result<Option<Decimal>, FormError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    match raw.replace(',', ".").parse::<Decimal>() {
        Ok(price) if !price.is_sign_negative() => Ok(Some(price)),
        _ => Err(FormError(MSG_PRICE.to_string())),
    }
}

fn first_message(errors: &ValidationErrors, order: &[&'static str]) -> FormError {
    let fields = errors.field_errors();

    let message = order
        .iter()
        .filter_map(|field| fields.get(field))
        .flat_map(|errors| errors.iter())
        .find_map(|error| error.message.as_ref().map(|message| message.to_string()))
        .unwrap_or_else(|| MSG_REQUIRED_FIELDS.to_string());

    FormError(message)
}

/// Which action the customer form submits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Create,
    Edit(RecordId),
}

#[derive(Debug, Default)]
struct EditorState {
    mode: FormMode,
    draft: CustomerDraft,
}

/// State of the customer form: its mode and the values it currently shows
///
/// A single submit handler reads the mode and branches on it.
#[derive(Debug, Default)]
pub struct CustomerEditor {
    state: Mutex<EditorState>,
}

impl CustomerEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> FormMode {
        self.lock().mode
    }

    /// Switches to edit mode for `customer` and fills the form with it
    pub fn begin_edit(&self, customer: &Customer) {
        let mut state = self.lock();
        state.mode = FormMode::Edit(customer.id);
        state.draft = CustomerDraft::from(customer);
    }

    /// Keeps what the user typed so a failed submit can be corrected
    pub fn keep_draft(&self, draft: CustomerDraft) {
        self.lock().draft = draft;
    }

    /// Back to an empty form in create mode
    pub fn reset(&self) {
        *self.lock() = EditorState::default();
    }

    pub fn render(&self) -> String {
        let state = self.lock();
        render::customer_form(state.mode, &state.draft)
    }

    fn lock(&self) -> MutexGuard<'_, EditorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
