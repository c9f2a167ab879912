//! Markup builders for the list views, pagination and forms
//!
//! Everything here is a pure function from data to an HTML fragment. Writing
//! the fragments into a [`Container`](crate::container::Container) is the
//! synchronizer's job.

use crate::form::{CustomerDraft, FormMode};
use crate::format::{
    escape_html, format_date, format_phone, format_price, status_class, status_label,
};
use crate::model::{Customer, Page, RentalRecord};

pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300x200/0d0221/00ccff?text=FLIPERAMA";

/// Renders every item with `template`, in order, or `empty` when there are none
///
/// The result replaces the whole container content.
pub fn render_list<T, F>(items: &[T], template: F, empty: &str) -> String
where
    F: Fn(&T) -> String,
{
    if items.is_empty() {
        return empty.to_string();
    }

    items.iter().map(template).collect()
}

/// Renders the pagination control for `page`
///
/// `navigate` maps a target page index to the link that reloads that page.
/// "Anterior" is disabled on the first page, "Próxima" on the last one (and
/// on an empty collection, where `total_pages` is 0). The current page is
/// rendered active and without a link.
pub fn render_pagination<T, F>(page: &Page<T>, navigate: F) -> String
where
    F: Fn(u32) -> String,
{
    let current = page.current_page;
    let mut html = String::new();

    if page.has_previous() {
        html.push_str(&page_link(&navigate(current - 1), current - 1, "Anterior"));
    } else {
        html.push_str(&disabled_item("Anterior"));
    }

    for index in 0..page.total_pages {
        let label = (index + 1).to_string();
        if index == current {
            html.push_str(&format!(
                r#"<li class="page-item active" aria-current="page"><span class="page-link">{}</span></li>"#,
                label
            ));
        } else {
            html.push_str(&page_link(&navigate(index), index, &label));
        }
    }

    if page.has_next() {
        let next = current.saturating_add(1);
        html.push_str(&page_link(&navigate(next), next, "Próxima"));
    } else {
        html.push_str(&disabled_item("Próxima"));
    }

    html
}

fn page_link(href: &str, index: u32, label: &str) -> String {
    format!(
        r#"<li class="page-item"><a class="page-link" href="{}" data-page="{}">{}</a></li>"#,
        escape_html(href),
        index,
        label
    )
}

fn disabled_item(label: &str) -> String {
    format!(
        r#"<li class="page-item disabled"><span class="page-link">{}</span></li>"#,
        label
    )
}

// Customers table

pub const CUSTOMERS_EMPTY: &str =
    r#"<tr><td colspan="5" class="text-center">Nenhum cliente cadastrado</td></tr>"#;

pub fn customer_row(customer: &Customer) -> String {
    format!(
        concat!(
            "<tr>",
            "<td>{id}</td>",
            "<td>{name}</td>",
            "<td>{phone}</td>",
            "<td>{email}</td>",
            "<td>",
            r#"<button class="btn btn-warning btn-sm me-1" data-action="/clientes/{id}/editar" data-method="GET">Editar</button>"#,
            r#"<button class="btn btn-danger btn-sm" data-action="/clientes/{id}" data-method="DELETE">Excluir</button>"#,
            "</td>",
            "</tr>"
        ),
        id = customer.id,
        name = escape_html(&customer.name),
        phone = escape_html(&format_phone(&customer.phone)),
        email = escape_html(&customer.email),
    )
}

pub fn customers_failure(message: &str) -> String {
    format!(
        r#"<tr><td colspan="5" class="text-center text-danger">Erro ao carregar clientes: {}</td></tr>"#,
        escape_html(message)
    )
}

// Customer selector of the rental form

pub const CUSTOMER_OPTIONS_EMPTY: &str = r#"<option value="">Selecione um cliente</option>"#;

/// One `<option>` per customer; the view puts the placeholder option first
pub fn customer_option(customer: &Customer) -> String {
    format!(
        r#"<option value="{}">{} - {}</option>"#,
        customer.id,
        escape_html(&customer.name),
        escape_html(&customer.phone)
    )
}

pub fn customer_options_failure(_message: &str) -> String {
    format!(
        r#"{}<option value="" disabled>Erro ao carregar lista de clientes</option>"#,
        CUSTOMER_OPTIONS_EMPTY
    )
}

// Rental cards

pub const RENTALS_EMPTY: &str = concat!(
    r#"<div class="col-12 text-center">"#,
    "<p>Nenhum fliperama cadastrado</p>",
    r##"<a class="btn btn-primary" href="#fliperamas">Cadastrar Primeiro Fliperama</a>"##,
    "</div>"
);

pub fn rental_card(rental: &RentalRecord) -> String {
    let image = rental
        .image_url
        .as_deref()
        .filter(|url| !url.trim().is_empty())
        .unwrap_or(PLACEHOLDER_IMAGE);
    let title = escape_html(&rental.title);

    let price = match rental.price {
        Some(price) if !price.is_zero() => format!(
            r#"<div class="mt-2"><small class="text-muted">Valor:</small><p class="mb-0 fw-bold text-success">R$ {}</p></div>"#,
            format_price(Some(price))
        ),
        _ => String::new(),
    };

    let mut actions = String::new();
    if rental.status.can_rent() {
        actions.push_str(&format!(
            r#"<button class="btn btn-success btn-sm" data-action="/fliperamas/{}/locar" data-method="POST">Alugar</button>"#,
            rental.id
        ));
    }
    if rental.status.can_cancel() {
        actions.push_str(&format!(
            r#"<button class="btn btn-warning btn-sm" data-action="/fliperamas/{}/cancelar" data-method="POST">Cancelar</button>"#,
            rental.id
        ));
    }

    format!(
        concat!(
            r#"<div class="col-md-6 col-lg-4 mb-4" data-id="{id}">"#,
            r#"<div class="card fliperama-card h-100">"#,
            r#"<div class="position-relative">"#,
            r#"<img src="{image}" class="fliperama-image card-img-top" alt="{title}">"#,
            r#"<span class="status-badge position-absolute top-0 end-0 m-2 {status_class}">{status}</span>"#,
            "</div>",
            r#"<div class="card-body">"#,
            r#"<h5 class="card-title text-truncate" title="{title}">{title}</h5>"#,
            r#"<div class="mb-2"><small class="text-muted">Cliente:</small><p class="mb-1 fw-bold">{customer}</p></div>"#,
            r#"<div class="row small text-muted">"#,
            r#"<div class="col-6">{players} jogador(es)</div>"#,
            r#"<div class="col-6 text-end">{date}</div>"#,
            "</div>",
            "{price}",
            "</div>",
            r#"<div class="card-footer bg-transparent"><div class="btn-group w-100">{actions}</div></div>"#,
            "</div>",
            "</div>"
        ),
        id = rental.id,
        image = escape_html(image),
        title = title,
        status_class = status_class(rental.status),
        status = status_label(rental.status),
        customer = customer_name(rental),
        players = rental.players,
        date = format_date(rental.rental_date),
        price = price,
        actions = actions,
    )
}

pub fn rentals_failure(message: &str) -> String {
    format!(
        r#"<div class="col-12 text-center"><p class="text-danger">Erro ao carregar fliperamas: {}</p></div>"#,
        escape_html(message)
    )
}

// Rented table

pub const RENTED_EMPTY: &str =
    r#"<tr><td colspan="6" class="text-center">Nenhum fliperama alugado no momento</td></tr>"#;

pub fn rented_row(rental: &RentalRecord) -> String {
    format!(
        concat!(
            "<tr>",
            "<td>{id}</td>",
            "<td>{title}</td>",
            "<td>{customer}</td>",
            "<td>{date}</td>",
            "<td>R$ {price}</td>",
            "<td>",
            r#"<button class="btn btn-warning btn-sm" data-action="/fliperamas/{id}/cancelar" data-method="POST">Cancelar</button>"#,
            "</td>",
            "</tr>"
        ),
        id = rental.id,
        title = escape_html(&rental.title),
        customer = customer_name(rental),
        date = format_date(rental.rental_date),
        price = format_price(rental.price),
    )
}

pub fn rented_failure(message: &str) -> String {
    format!(
        r#"<tr><td colspan="6" class="text-center text-danger">Erro ao carregar fliperamas alugados: {}</td></tr>"#,
        escape_html(message)
    )
}

// Cancelled table

pub const CANCELLED_EMPTY: &str =
    r#"<tr><td colspan="5" class="text-center">Nenhuma locação cancelada</td></tr>"#;

pub fn cancelled_row(rental: &RentalRecord) -> String {
    let customer = match &rental.customer {
        Some(customer) => format!(
            r#"<strong>{}</strong><br><small class="text-muted">{}</small>"#,
            escape_html(&customer.name),
            escape_html(&customer.phone)
        ),
        None => "N/A".to_string(),
    };

    format!(
        concat!(
            "<tr>",
            "<td>{id}</td>",
            r#"<td><strong>{title}</strong><br><small class="text-muted">{players} jogador(es)</small></td>"#,
            "<td>{customer}</td>",
            r#"<td><small class="text-muted">Locação:</small><br>{date}</td>"#,
            r#"<td><span class="badge bg-secondary">R$ {price}</span></td>"#,
            "</tr>"
        ),
        id = rental.id,
        title = escape_html(&rental.title),
        players = rental.players,
        customer = customer,
        date = format_date(rental.rental_date),
        price = format_price(rental.price),
    )
}

pub fn cancelled_failure(message: &str) -> String {
    format!(
        r#"<tr><td colspan="5" class="text-center text-danger">Erro ao carregar locações canceladas: {}</td></tr>"#,
        escape_html(message)
    )
}

fn customer_name(rental: &RentalRecord) -> String {
    rental
        .customer
        .as_ref()
        .map(|customer| escape_html(&customer.name))
        .unwrap_or_else(|| "N/A".to_string())
}

// Customer form

/// The customer form for the editor's current mode
///
/// Create mode posts a new customer ("Cadastrar Cliente"); edit mode carries
/// the target id and posts an update ("Atualizar Cliente").
pub fn customer_form(mode: FormMode, draft: &CustomerDraft) -> String {
    let (label, button_class, target) = match mode {
        FormMode::Create => ("Cadastrar Cliente", "btn-success", String::new()),
        FormMode::Edit(id) => (
            "Atualizar Cliente",
            "btn-warning",
            format!(r#"<input type="hidden" name="id" value="{}">"#, id),
        ),
    };

    let cancel = match mode {
        FormMode::Create => String::new(),
        FormMode::Edit(_) => r#"<button type="button" class="btn btn-secondary ms-2" data-action="/formulario/cliente/cancelar" data-method="POST">Cancelar edição</button>"#.to_string(),
    };

    format!(
        concat!(
            r#"<form id="clienteForm" method="POST" action="/clientes">"#,
            "{target}",
            r#"<input class="form-control" id="nome" name="nome" value="{name}" required>"#,
            r#"<input class="form-control" id="telefone" name="telefone" value="{phone}">"#,
            r#"<input class="form-control" id="email" name="email" type="email" value="{email}">"#,
            r#"<button type="submit" class="btn {button_class}">{label}</button>"#,
            "{cancel}",
            "</form>"
        ),
        target = target,
        name = escape_html(&draft.name),
        phone = escape_html(&draft.phone),
        email = escape_html(&draft.email),
        button_class = button_class,
        label = label,
        cancel = cancel,
    )
}
