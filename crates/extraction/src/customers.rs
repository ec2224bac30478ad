use models::{CustomerRecord, Settings};
use sheet_source::{cell_at, Cell};

use crate::columns::{header_strings, resolve_column};
use crate::document::normalize_document;
use crate::fields::{format_date, parse_number};

const DOCUMENT: &[&str] = &["cpf", "documento"];
const NAME: &[&str] = &["nome", "cliente"];
const EMAIL: &[&str] = &["email", "e-mail"];
const PHONE: &[&str] = &["telefone", "tel", "celular"];
const POINTS_BALANCE: &[&str] = &["saldo pts", "pontos"];
const CURRENCY_BALANCE: &[&str] = &["saldo r$", "saldo", "valor"];
const FIRST_EXPIRATION: &[&str] = &["vencimento", "validade", "expira"];
const EXPIRED_AMOUNT: &[&str] = &["vencimento r$", "expirado", "saldo expirado"];

struct CustomerColumns {
    document: usize,
    name: usize,
    email: usize,
    phone: usize,
    points: usize,
    balance: usize,
    expiration: usize,
    expired_amount: usize,
}

impl CustomerColumns {
    // Resolved fresh on every extraction; header layout can change between
    // uploads of the workbook.
    fn resolve(headers: &[String]) -> Self {
        Self {
            document: resolve_column(headers, DOCUMENT),
            name: resolve_column(headers, NAME),
            email: resolve_column(headers, EMAIL),
            phone: resolve_column(headers, PHONE),
            points: resolve_column(headers, POINTS_BALANCE),
            balance: resolve_column(headers, CURRENCY_BALANCE),
            expiration: resolve_column(headers, FIRST_EXPIRATION),
            expired_amount: resolve_column(headers, EXPIRED_AMOUNT),
        }
    }
}

/// Extracts one record per accepted row of the active-balance sheet, in row
/// order. Rows whose identifier carries fewer than
/// `settings.min_document_digits` digits are dropped; everything else passes
/// through, including repeated documents (each row is its own record).
pub fn extract_customers(rows: &[Vec<Cell>], settings: &Settings) -> Vec<CustomerRecord> {
    let Some(header_row) = rows.first() else {
        return Vec::new();
    };
    let headers = header_strings(header_row);
    let cols = CustomerColumns::resolve(&headers);

    let mut records = Vec::new();
    for row in &rows[1..] {
        let raw = cell_at(row, cols.document).display();
        let Some(document) = normalize_document(&raw, settings.min_document_digits) else {
            continue;
        };

        // Email and points columns are always resolved, emitted only when
        // the extended variant is configured.
        let email = settings
            .include_extended_fields
            .then(|| cell_at(row, cols.email).display());
        let points_balance = settings
            .include_extended_fields
            .then(|| parse_number(cell_at(row, cols.points)));

        records.push(CustomerRecord {
            document,
            name: cell_at(row, cols.name).display(),
            email,
            phone: cell_at(row, cols.phone).display(),
            points_balance,
            balance: parse_number(cell_at(row, cols.balance)),
            expired_balance: parse_number(cell_at(row, cols.expired_amount)),
            first_expiration: format_date(cell_at(row, cols.expiration)),
        });
    }
    records
}
