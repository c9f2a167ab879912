//! Resource action dispatchers
//!
//! Each mutating action validates its form, calls the backend, and then
//! either publishes the state change (success) or shows why it failed. No
//! failure escapes an action and nothing is retried.

use serde::Serialize;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::events::{EventBus, StateChange};
use crate::form::{CustomerDraft, CustomerEditor, FormMode, RentalForm};
use crate::model::RecordId;
use crate::notify::Notifier;

pub const MSG_CUSTOMER_NOT_FOUND: &str = "Cliente não encontrado";
pub const MSG_RENTAL_NOT_FOUND: &str = "Fliperama não encontrado";
pub const MSG_SERVER_UNREACHABLE: &str = "Não foi possível conectar com o servidor.";
pub const MSG_ALREADY_RENTED: &str =
    "Este fliperama já está alugado e não pode ser alugado novamente.";
pub const MSG_ALREADY_CANCELLED: &str =
    "Esta locação já está cancelada ou não pode ser cancelada.";

const ALREADY_RENTED_MARKERS: &[&str] = &["já está alugado", "indisponível"];
const ALREADY_CANCELLED_MARKERS: &[&str] = &["já cancelado", "não pode ser cancelado"];

/// Result of an action, already shown to the user as a notification
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "outcome", content = "message", rename_all = "lowercase")]
pub enum Outcome {
    Success(String),
    Failure(String),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Outcome::Success(message) | Outcome::Failure(message) => message,
        }
    }
}

pub struct Dispatcher {
    client: ApiClient,
    notifier: Notifier,
    events: EventBus,
    editor: CustomerEditor,
}

impl Dispatcher {
    pub fn new(client: ApiClient, notifier: Notifier, events: EventBus) -> Self {
        Dispatcher {
            client,
            notifier,
            events,
            editor: CustomerEditor::new(),
        }
    }

    pub fn editor(&self) -> &CustomerEditor {
        &self.editor
    }

    /// Submits the customer form: creates or updates depending on the mode
    pub async fn submit_customer(&self, draft: CustomerDraft) -> Outcome {
        let mode = self.editor.mode();
        let failure_prefix = match mode {
            FormMode::Create => "Erro ao cadastrar cliente: ",
            FormMode::Edit(_) => "Erro ao atualizar cliente: ",
        };

        let payload = match draft.validate() {
            Ok(payload) => payload,
            Err(err) => {
                self.editor.keep_draft(draft);
                return self.fail(err.to_string());
            }
        };

        let result = match mode {
            FormMode::Create => self.client.create_customer(&payload).await,
            FormMode::Edit(id) => self.client.update_customer(id, &payload).await,
        };

        match result {
            Ok(customer) => {
                tracing::debug!("customer {} saved", customer.id);
                self.editor.reset();
                self.events.publish(StateChange::CustomersChanged);
                let message = match mode {
                    FormMode::Create => "Cliente cadastrado com sucesso!",
                    FormMode::Edit(_) => "Cliente atualizado com sucesso!",
                };
                self.succeed(message)
            }
            Err(err) => {
                self.editor.keep_draft(draft);
                self.fail(format!(
                    "{}{}",
                    failure_prefix,
                    err.user_message(MSG_CUSTOMER_NOT_FOUND)
                ))
            }
        }
    }

    /// Loads a customer into the form and switches it to edit mode
    pub async fn begin_edit(&self, id: RecordId) -> Outcome {
        match self.client.get_customer(id).await {
            Ok(customer) => {
                self.editor.begin_edit(&customer);
                Outcome::Success(format!("Editando cliente {}", customer.name))
            }
            Err(err) => self.fail(format!(
                "Erro ao carregar dados do cliente: {}",
                err.user_message(MSG_CUSTOMER_NOT_FOUND)
            )),
        }
    }

    /// Leaves edit mode without saving
    pub fn cancel_edit(&self) {
        self.editor.reset();
    }

    pub async fn delete_customer(&self, id: RecordId) -> Outcome {
        match self.client.delete_customer(id).await {
            Ok(()) => {
                if self.editor.mode() == FormMode::Edit(id) {
                    self.editor.reset();
                }
                self.events.publish(StateChange::CustomersChanged);
                self.succeed("Cliente excluído com sucesso!")
            }
            Err(err) => self.fail(format!(
                "Erro ao excluir cliente: {}",
                err.user_message(MSG_CUSTOMER_NOT_FOUND)
            )),
        }
    }

    /// Registers a new rental; it starts out available
    pub async fn create_rental(&self, form: RentalForm) -> Outcome {
        let (customer_id, payload) = match form.validate() {
            Ok(valid) => valid,
            Err(err) => return self.fail(err.to_string()),
        };

        match self.client.create_rental(customer_id, &payload).await {
            Ok(rental) => {
                tracing::debug!("rental {} created for customer {}", rental.id, customer_id);
                self.events.publish(StateChange::RentalsChanged);
                self.succeed("Fliperama cadastrado com sucesso! Status: DISPONÍVEL")
            }
            Err(err) => self.fail(rental_failure(
                "Erro ao cadastrar fliperama: ",
                &err,
                MSG_CUSTOMER_NOT_FOUND,
            )),
        }
    }

    pub async fn rent(&self, id: RecordId) -> Outcome {
        match self.client.rent(id).await {
            Ok(()) => {
                self.events.publish(StateChange::RentalsChanged);
                self.succeed("Fliperama alugado com sucesso!")
            }
            Err(err) if err.mentions(ALREADY_RENTED_MARKERS) => self.fail(MSG_ALREADY_RENTED),
            Err(err) => self.fail(rental_failure(
                "Erro ao alugar fliperama: ",
                &err,
                MSG_RENTAL_NOT_FOUND,
            )),
        }
    }

    pub async fn cancel_rental(&self, id: RecordId) -> Outcome {
        match self.client.cancel(id).await {
            Ok(()) => {
                self.events.publish(StateChange::RentalsChanged);
                self.succeed("Locação cancelada com sucesso!")
            }
            Err(err) if err.mentions(ALREADY_CANCELLED_MARKERS) => {
                self.fail(MSG_ALREADY_CANCELLED)
            }
            Err(err) => self.fail(rental_failure(
                "Erro ao cancelar locação: ",
                &err,
                MSG_RENTAL_NOT_FOUND,
            )),
        }
    }

    fn succeed(&self, message: impl Into<String>) -> Outcome {
        let message = message.into();
        self.notifier.success(message.clone());
        Outcome::Success(message)
    }

    fn fail(&self, message: impl Into<String>) -> Outcome {
        let message = message.into();
        self.notifier.error(message.clone());
        Outcome::Failure(message)
    }
}

fn rental_failure(prefix: &str, err: &ApiError, not_found: &str) -> String {
    if err.is_transport() {
        return MSG_SERVER_UNREACHABLE.to_string();
    }
    format!("{}{}", prefix, err.user_message(not_found))
}
