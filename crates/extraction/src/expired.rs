use std::collections::HashSet;

use chrono::NaiveDate;
use models::{ExpiredBalances, ExpiredItem, KnownCustomer};
use sheet_source::{cell_at, Cell};

use crate::columns::{header_strings, resolve_column};
use crate::document::{normalize_document, MIN_DOCUMENT_DIGITS};
use crate::fields::{format_date, parse_date, parse_number};

const DOCUMENT: &[&str] = &["cpf", "documento"];
const NAME: &[&str] = &["nome", "cliente"];
const TICKET: &[&str] = &["ticket", "cupom", "nota"];
const EXPIRATION: &[&str] = &["data", "vencimento", "expira"];
const AMOUNT: &[&str] = &["valor", "saldo", "r$", "pontos"];

/// Walks the expired-balance sheet, grouping already-expired positive items
/// per document and collecting a first-seen name index on the side.
///
/// An item is kept only when its date is strictly before `today` and its
/// amount strictly positive. A (document, ticket) pair contributes at most
/// one item, so rows re-exported into the sheet do not double-count.
pub fn extract_expired(rows: &[Vec<Cell>], today: NaiveDate) -> ExpiredBalances {
    let mut result = ExpiredBalances::default();
    let Some(header_row) = rows.first() else {
        return result;
    };
    let headers = header_strings(header_row);
    let document_col = resolve_column(&headers, DOCUMENT);
    let name_col = resolve_column(&headers, NAME);
    let ticket_col = resolve_column(&headers, TICKET);
    let expiration_col = resolve_column(&headers, EXPIRATION);
    let amount_col = resolve_column(&headers, AMOUNT);

    let mut named: HashSet<String> = HashSet::new();
    let mut seen_tickets: HashSet<(String, String)> = HashSet::new();

    for row in &rows[1..] {
        let raw = cell_at(row, document_col).display();
        let Some(document) = normalize_document(&raw, MIN_DOCUMENT_DIGITS) else {
            continue;
        };

        // The name index is independent of the expiry filter below: a row
        // can name a customer even when its item is dropped.
        let name = cell_at(row, name_col).display();
        if !name.is_empty() && named.insert(document.clone()) {
            result.known_customers.push(KnownCustomer {
                document: document.clone(),
                name,
            });
        }

        let expiration_cell = cell_at(row, expiration_col);
        let amount = parse_number(cell_at(row, amount_col));
        let expired = parse_date(expiration_cell).is_some_and(|d| d < today);
        if !expired || amount <= 0.0 {
            continue;
        }

        let ticket = cell_at(row, ticket_col).display();
        if !seen_tickets.insert((document.clone(), ticket)) {
            continue;
        }

        result
            .by_document
            .entry(document)
            .or_default()
            .push(ExpiredItem {
                date: format_date(expiration_cell),
                amount,
            });
    }

    result
}
