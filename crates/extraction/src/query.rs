use std::sync::Arc;

use chrono::{Local, Utc};
use models::{CustomerRecord, ExpiredBalances, ExpiredByDocument, KnownCustomer, Settings};
use serde::Serialize;
use sheet_source::{Cell, SheetSource};

use crate::customers::extract_customers;
use crate::error::{QueryError, Result};
use crate::expired::extract_expired;

pub const ACTION_CUSTOMERS: &str = "customers";
pub const ACTION_EXPIRED: &str = "expired";
pub const ACTION_ALL: &str = "all";

const INVALID_TOKEN: &str = "Token inválido";
const INVALID_ACTION: &str = "Ação inválida";

/// JSON envelope returned for every query. Failures ride the same HTTP 200
/// as successes; `success` is the only discriminator callers get.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum QueryOutcome {
    Failure {
        success: bool,
        error: String,
    },
    Customers {
        success: bool,
        data: Vec<CustomerRecord>,
        timestamp: String,
    },
    Expired {
        success: bool,
        data: ExpiredByDocument,
        timestamp: String,
    },
    All {
        success: bool,
        customers: Vec<CustomerRecord>,
        expired: ExpiredByDocument,
        #[serde(rename = "expiredCustomers")]
        expired_customers: Vec<KnownCustomer>,
        timestamp: String,
    },
}

impl QueryOutcome {
    fn failure(message: impl Into<String>) -> Self {
        QueryOutcome::Failure {
            success: false,
            error: message.into(),
        }
    }
}

/// Dispatches one query end to end: token gate, action select, extraction,
/// envelope. Stateless between calls; each action re-reads its sheets.
pub struct QueryService {
    source: Arc<dyn SheetSource>,
    settings: Settings,
}

impl QueryService {
    pub fn new(source: Arc<dyn SheetSource>, settings: Settings) -> Self {
        Self { source, settings }
    }

    /// Runs one query. Never returns an error: a token or action problem
    /// short-circuits before any sheet access, and every fault from the data
    /// layer is folded into a failure envelope here.
    pub async fn handle(&self, token: Option<&str>, action: Option<&str>) -> QueryOutcome {
        if token != Some(self.settings.api_token.as_str()) {
            return QueryOutcome::failure(INVALID_TOKEN);
        }

        let outcome = match action.unwrap_or(ACTION_CUSTOMERS) {
            ACTION_CUSTOMERS => self.customers().await.map(|data| QueryOutcome::Customers {
                success: true,
                data,
                timestamp: timestamp(),
            }),
            ACTION_EXPIRED => self.expired().await.map(|result| QueryOutcome::Expired {
                success: true,
                data: result.by_document,
                timestamp: timestamp(),
            }),
            ACTION_ALL => self.all().await,
            _ => return QueryOutcome::failure(INVALID_ACTION),
        };

        outcome.unwrap_or_else(|err| QueryOutcome::failure(err.to_string()))
    }

    async fn all(&self) -> Result<QueryOutcome> {
        let customers = self.customers().await?;
        let expired = self.expired().await?;
        Ok(QueryOutcome::All {
            success: true,
            customers,
            expired: expired.by_document,
            expired_customers: expired.known_customers,
            timestamp: timestamp(),
        })
    }

    async fn customers(&self) -> Result<Vec<CustomerRecord>> {
        let rows = self.primary_rows().await?;
        Ok(extract_customers(&rows, &self.settings))
    }

    /// An absent expired sheet is a normal empty result, not a fault.
    async fn expired(&self) -> Result<ExpiredBalances> {
        let rows = self
            .source
            .worksheet_rows(&self.settings.expired_sheet_name)
            .await?;
        Ok(match rows {
            Some(rows) => extract_expired(&rows, Local::now().date_naive()),
            None => ExpiredBalances::default(),
        })
    }

    /// The active sheet by configured name, or the first sheet of the
    /// workbook when no name is configured.
    async fn primary_rows(&self) -> Result<Vec<Vec<Cell>>> {
        let name = if self.settings.primary_sheet_name.is_empty() {
            self.source
                .sheet_names()
                .await?
                .into_iter()
                .next()
                .ok_or(QueryError::MissingPrimarySheet)?
        } else {
            self.settings.primary_sheet_name.clone()
        };

        self.source
            .worksheet_rows(&name)
            .await?
            .ok_or(QueryError::MissingPrimarySheet)
    }
}

fn timestamp() -> String {
    Utc::now().to_rfc3339()
}
