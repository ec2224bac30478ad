use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// Settings models

fn default_min_document_digits() -> usize {
    8
}

/// Service configuration loaded from settings.json.
///
/// `min_document_digits` and `include_extended_fields` exist because deployed
/// variants of the legacy sheet disagreed on both: some rejected identifiers
/// under 10 digits, some emitted the email and points columns. Defaults match
/// the current production sheet.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub settings_version: u32,
    pub workbook_path: String,
    pub api_token: String,
    /// Empty means "use the first sheet of the workbook".
    #[serde(default)]
    pub primary_sheet_name: String,
    pub expired_sheet_name: String,
    #[serde(default = "default_min_document_digits")]
    pub min_document_digits: usize,
    #[serde(default)]
    pub include_extended_fields: bool,
}

// Query output models

/// One row of the active-balance sheet, normalized.
///
/// Wire names keep the legacy JSON contract (`cpf`, `nome`, `saldo`, ...).
/// `email` and `points_balance` only appear when extended fields are enabled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerRecord {
    #[serde(rename = "cpf")]
    pub document: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "email", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "telefone")]
    pub phone: String,
    #[serde(rename = "saldoPts", skip_serializing_if = "Option::is_none")]
    pub points_balance: Option<f64>,
    #[serde(rename = "saldo")]
    pub balance: f64,
    #[serde(rename = "saldoExpirado")]
    pub expired_balance: f64,
    #[serde(rename = "vencimento")]
    pub first_expiration: String,
}

/// One expired balance entry. `amount` is always strictly positive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpiredItem {
    #[serde(rename = "data")]
    pub date: String,
    #[serde(rename = "valor")]
    pub amount: f64,
}

/// Document/name pair collected while walking the expired sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KnownCustomer {
    #[serde(rename = "cpf")]
    pub document: String,
    #[serde(rename = "nome")]
    pub name: String,
}

/// Expired items grouped per normalized document, in source-row order.
pub type ExpiredByDocument = IndexMap<String, Vec<ExpiredItem>>;

/// Full output of the expired-balance extractor. `known_customers` holds one
/// entry per distinct document that appeared with a non-empty name, in
/// first-seen order.
#[derive(Debug, Clone, Default)]
pub struct ExpiredBalances {
    pub by_document: ExpiredByDocument,
    pub known_customers: Vec<KnownCustomer>,
}
