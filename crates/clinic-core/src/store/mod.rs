//! Remote store boundary.
//!
//! The hosted relational database is an external collaborator. Everything
//! the dashboard needs from it is one of three calls: select rows, insert a
//! row, or ask whether a session is active.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::StoreError;

mod memory;
mod rest;

pub use memory::MemoryStore;
pub use rest::RestStore;

/// Table names used across the dashboard
pub mod tables {
    pub const PATIENTS: &str = "patients";
    pub const APPOINTMENTS: &str = "appointments";
    pub const MEDICAL_RECORDS: &str = "medical_records";
    pub const REPORTS: &str = "reports";
    pub const PATIENT_ADDRESSES: &str = "patient_addresses";
    pub const EMERGENCY_CONTACTS: &str = "emergency_contacts";
    pub const PATIENT_LIFESTYLE: &str = "patient_lifestyle";

    pub const ALL: &[&str] = &[
        PATIENTS,
        APPOINTMENTS,
        MEDICAL_RECORDS,
        REPORTS,
        PATIENT_ADDRESSES,
        EMERGENCY_CONTACTS,
        PATIENT_LIFESTYLE,
    ];
}

/// Comparison applied by a [`Filter`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    /// Case-insensitive pattern; `*` is the wildcard
    ILike,
}

impl FilterOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOp::Eq => "eq",
            FilterOp::Neq => "neq",
            FilterOp::Gt => "gt",
            FilterOp::Gte => "gte",
            FilterOp::Lt => "lt",
            FilterOp::Lte => "lte",
            FilterOp::ILike => "ilike",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Filter {
    pub column: String,
    pub op: FilterOp,
    pub value: Value,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
}

/// A related row joined in at query time, nested under `alias`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Embed {
    pub alias: String,
    pub table: String,
    /// Foreign-key column on the parent row pointing at `table.id`
    pub via: String,
    pub columns: Vec<String>,
}

/// Read query: projection, embeds, filters and ordering for one table
#[derive(Clone, Debug, PartialEq)]
pub struct Query {
    pub table: String,
    /// Empty means every column
    pub columns: Vec<String>,
    pub embeds: Vec<Embed>,
    pub filters: Vec<Filter>,
    pub order: Vec<Order>,
}

impl Query {
    pub fn from(table: &str) -> Self {
        Self {
            table: table.to_string(),
            columns: Vec::new(),
            embeds: Vec::new(),
            filters: Vec::new(),
            order: Vec::new(),
        }
    }

    pub fn columns(mut self, columns: &[&str]) -> Self {
        self.columns = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn embed(mut self, alias: &str, table: &str, via: &str, columns: &[&str]) -> Self {
        self.embeds.push(Embed {
            alias: alias.to_string(),
            table: table.to_string(),
            via: via.to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
        });
        self
    }

    pub fn filter(mut self, column: &str, op: FilterOp, value: impl Into<Value>) -> Self {
        self.filters.push(Filter {
            column: column.to_string(),
            op,
            value: value.into(),
        });
        self
    }

    pub fn eq(self, column: &str, value: impl Into<Value>) -> Self {
        self.filter(column, FilterOp::Eq, value)
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        self.order.push(Order {
            column: column.to_string(),
            ascending,
        });
        self
    }

    /// PostgREST `select` clause, e.g. `*,patient:patients(patient_id,first_name)`
    pub fn select_clause(&self) -> String {
        let mut parts: Vec<String> = if self.columns.is_empty() {
            vec!["*".to_string()]
        } else {
            self.columns.clone()
        };
        for embed in &self.embeds {
            let columns = if embed.columns.is_empty() {
                "*".to_string()
            } else {
                embed.columns.join(",")
            };
            parts.push(format!("{}:{}({})", embed.alias, embed.table, columns));
        }
        parts.join(",")
    }

    /// PostgREST `order` clause, e.g. `appointment_date.asc,appointment_time.asc`
    pub fn order_clause(&self) -> Option<String> {
        if self.order.is_empty() {
            return None;
        }
        let parts: Vec<String> = self
            .order
            .iter()
            .map(|o| format!("{}.{}", o.column, if o.ascending { "asc" } else { "desc" }))
            .collect();
        Some(parts.join(","))
    }
}

/// The signed-in user, as reported by the store's auth endpoint
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Table-level access to the hosted relational store.
///
/// Futures are not `Send`: the dashboard runs on a single-threaded event loop
/// and browser fetch futures cannot cross threads.
#[async_trait(?Send)]
pub trait RemoteStore {
    /// Run a read query and return raw rows
    async fn select(&self, query: &Query) -> Result<Vec<Value>, StoreError>;

    /// Insert one row and return it as stored (with generated columns)
    async fn insert(&self, table: &str, row: Value) -> Result<Value, StoreError>;

    /// The active session, or `None` when nobody is signed in
    async fn current_session(&self) -> Result<Option<Session>, StoreError>;
}

/// Run `query` and decode every row into `T`
pub async fn select_as<T: DeserializeOwned>(
    store: &dyn RemoteStore,
    query: &Query,
) -> Result<Vec<T>, StoreError> {
    debug!(table = %query.table, select = %query.select_clause(), "select");
    let rows = store.select(query).await?;
    rows.into_iter()
        .map(|row| {
            serde_json::from_value(row).map_err(|e| StoreError::Decode {
                table: query.table.clone(),
                message: e.to_string(),
            })
        })
        .collect()
}

/// Encode `row` and insert it into `table`, returning the stored row
pub async fn insert_as<T: Serialize>(
    store: &dyn RemoteStore,
    table: &str,
    row: &T,
) -> Result<Value, StoreError> {
    let payload = serde_json::to_value(row).map_err(|e| StoreError::Rejected {
        table: table.to_string(),
        reason: e.to_string(),
    })?;
    let stored = store.insert(table, payload).await?;
    info!(table, id = %row_id(&stored).unwrap_or_default(), "inserted row");
    Ok(stored)
}

/// The `id` column of a stored row
pub fn row_id(row: &Value) -> Option<String> {
    row.get("id").and_then(Value::as_str).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_clause_with_embed() {
        let query = Query::from(tables::APPOINTMENTS)
            .embed(
                "patient",
                tables::PATIENTS,
                "patient_id",
                &["patient_id", "first_name", "last_name", "primary_phone"],
            )
            .order("appointment_date", true)
            .order("appointment_time", true);
        assert_eq!(
            query.select_clause(),
            "*,patient:patients(patient_id,first_name,last_name,primary_phone)"
        );
        assert_eq!(
            query.order_clause().as_deref(),
            Some("appointment_date.asc,appointment_time.asc")
        );
    }

    #[test]
    fn test_projection_and_no_order() {
        let query = Query::from(tables::PATIENTS).columns(&["id", "first_name"]);
        assert_eq!(query.select_clause(), "id,first_name");
        assert_eq!(query.order_clause(), None);
    }
}
