//! Tests for form validation and the customer editor

use chrono::NaiveDate;
use rust_decimal::Decimal;

use locadora::form::{
    CustomerDraft, CustomerEditor, FormMode, RentalForm, MSG_MIN_PLAYERS, MSG_PRICE,
    MSG_REQUIRED_FIELDS, MSG_RETURN_DATE, MSG_SELECT_CUSTOMER,
};
use locadora::model::Customer;

fn draft(name: &str, email: &str) -> CustomerDraft {
    CustomerDraft {
        name: name.to_string(),
        phone: " 11987654321 ".to_string(),
        email: email.to_string(),
    }
}

fn rental_form() -> RentalForm {
    RentalForm {
        customer_id: "1".to_string(),
        title: " Pac-Man ".to_string(),
        players: "2".to_string(),
        image_url: String::new(),
        rental_date: "2024-03-15".to_string(),
        return_date: String::new(),
        price: "49,90".to_string(),
    }
}

#[test]
fn test_customer_draft_trims_fields() {
    let payload = draft("  Ana Souza ", "ana@example.com").validate().unwrap();

    assert_eq!(payload.name, "Ana Souza");
    assert_eq!(payload.phone, "11987654321");
    assert_eq!(payload.email, "ana@example.com");
}

#[test]
fn test_customer_draft_requires_name() {
    let err = draft("   ", "").validate().unwrap_err();
    assert_eq!(err.to_string(), "O nome é obrigatório.");
}

#[test]
fn test_customer_draft_checks_email_only_when_given() {
    assert!(draft("Ana", "").validate().is_ok());

    let err = draft("Ana", "não-é-email").validate().unwrap_err();
    assert_eq!(err.to_string(), "Informe um e-mail válido.");
}

#[test]
fn test_rental_form_valid() {
    let (customer_id, payload) = rental_form().validate().unwrap();

    assert_eq!(customer_id, 1);
    assert_eq!(payload.title, "Pac-Man");
    assert_eq!(payload.players, 2);
    assert_eq!(payload.rental_date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    assert_eq!(payload.return_date, None);
    assert_eq!(payload.price, Some(Decimal::new(4990, 2)));

    let body = serde_json::to_value(&payload).unwrap();
    assert_eq!(body["titulo"], "Pac-Man");
    assert_eq!(body["dataLocacao"], "2024-03-15");
    assert_eq!(body["valorAluguel"], 49.9);
    assert!(body.get("dataEntrega").is_none());
}

#[test]
fn test_rental_form_requires_customer_first() {
    let mut form = rental_form();
    form.customer_id = String::new();
    form.title = String::new();

    assert_eq!(form.validate().unwrap_err().to_string(), MSG_SELECT_CUSTOMER);
}

#[test]
fn test_rental_form_required_fields() {
    let mut no_title = rental_form();
    no_title.title = "  ".to_string();
    assert_eq!(no_title.validate().unwrap_err().to_string(), MSG_REQUIRED_FIELDS);

    let mut no_date = rental_form();
    no_date.rental_date = String::new();
    assert_eq!(no_date.validate().unwrap_err().to_string(), MSG_REQUIRED_FIELDS);

    let mut no_players = rental_form();
    no_players.players = "dois".to_string();
    assert_eq!(no_players.validate().unwrap_err().to_string(), MSG_REQUIRED_FIELDS);
}

#[test]
fn test_rental_form_min_players() {
    let mut form = rental_form();
    form.players = "0".to_string();

    assert_eq!(form.validate().unwrap_err().to_string(), MSG_MIN_PLAYERS);
}

#[test]
fn test_rental_form_return_date_after_rental_date() {
    let mut same_day = rental_form();
    same_day.return_date = "2024-03-15".to_string();
    assert_eq!(same_day.validate().unwrap_err().to_string(), MSG_RETURN_DATE);

    let mut later = rental_form();
    later.return_date = "2024-03-20".to_string();
    let (_, payload) = later.validate().unwrap();
    assert_eq!(payload.return_date, NaiveDate::from_ymd_opt(2024, 3, 20));
}

#[test]
fn test_rental_form_price() {
    let mut negative = rental_form();
    negative.price = "-1".to_string();
    assert_eq!(negative.validate().unwrap_err().to_string(), MSG_PRICE);

    let mut garbage = rental_form();
    garbage.price = "barato".to_string();
    assert_eq!(garbage.validate().unwrap_err().to_string(), MSG_PRICE);

    let mut blank = rental_form();
    blank.price = String::new();
    assert_eq!(blank.validate().unwrap().1.price, None);
}

#[test]
fn test_editor_modes() {
    let editor = CustomerEditor::new();
    assert_eq!(editor.mode(), FormMode::Create);

    let customer = Customer {
        id: 5,
        name: "Bruno".to_string(),
        phone: "1133334444".to_string(),
        email: "bruno@example.com".to_string(),
    };
    editor.begin_edit(&customer);
    assert_eq!(editor.mode(), FormMode::Edit(5));
    assert!(editor.render().contains(r#"value="bruno@example.com""#));

    editor.keep_draft(draft("Bruno Lima", ""));
    assert_eq!(editor.mode(), FormMode::Edit(5));
    assert!(editor.render().contains(r#"value="Bruno Lima""#));

    editor.reset();
    assert_eq!(editor.mode(), FormMode::Create);
    assert!(editor.render().contains("Cadastrar Cliente"));
}
