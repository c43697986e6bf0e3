use std::cell::{Cell, RefCell};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use tracing::{debug, warn};
use uuid::Uuid;

use super::{tables, Embed, Filter, FilterOp, Query, RemoteStore, Session};
use crate::error::StoreError;

/// In-process store with the same query semantics as the REST surface.
///
/// Rows are kept as JSON objects per table. Inserts fill in `id` and
/// `created_at` when absent, the way the hosted schema's defaults do.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RefCell<BTreeMap<String, Vec<Value>>>,
    session: RefCell<Option<Session>>,
    failures: RefCell<HashMap<String, String>>,
    selects: Cell<usize>,
    inserts: Cell<usize>,
}

impl MemoryStore {
    /// Empty store with every dashboard table created
    pub fn new() -> Self {
        let store = Self::default();
        {
            let mut map = store.tables.borrow_mut();
            for table in tables::ALL {
                map.insert(table.to_string(), Vec::new());
            }
        }
        store
    }

    /// Empty store that already reports a signed-in user
    pub fn signed_in(user_id: &str) -> Self {
        let store = Self::new();
        store.set_session(Some(Session {
            user_id: user_id.to_string(),
            email: None,
        }));
        store
    }

    pub fn set_session(&self, session: Option<Session>) {
        *self.session.borrow_mut() = session;
    }

    /// Make every select and insert against `table` fail with a 500
    pub fn fail_table(&self, table: &str, reason: &str) {
        self.failures
            .borrow_mut()
            .insert(table.to_string(), reason.to_string());
    }

    pub fn heal_table(&self, table: &str) {
        self.failures.borrow_mut().remove(table);
    }

    /// Append rows verbatim, without filling defaults
    pub fn seed(&self, table: &str, rows: Vec<Value>) {
        self.tables
            .borrow_mut()
            .entry(table.to_string())
            .or_default()
            .extend(rows);
    }

    /// Stored rows of `table`, in insertion order
    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.tables
            .borrow()
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    pub fn select_count(&self) -> usize {
        self.selects.get()
    }

    pub fn insert_count(&self) -> usize {
        self.inserts.get()
    }

    fn check_failure(&self, table: &str) -> Result<(), StoreError> {
        match self.failures.borrow().get(table) {
            Some(reason) => Err(StoreError::Status {
                code: 500,
                message: reason.clone(),
            }),
            None => Ok(()),
        }
    }

    fn embed_row(&self, parent: &Value, embed: &Embed) -> Value {
        let key = match parent.get(&embed.via) {
            Some(Value::String(key)) => key,
            _ => return Value::Null,
        };
        let map = self.tables.borrow();
        map.get(&embed.table)
            .and_then(|rows| {
                rows.iter()
                    .find(|row| row.get("id").and_then(Value::as_str) == Some(key.as_str()))
            })
            .map(|row| project(row, &embed.columns))
            .unwrap_or(Value::Null)
    }
}

#[async_trait(?Send)]
impl RemoteStore for MemoryStore {
    async fn select(&self, query: &Query) -> Result<Vec<Value>, StoreError> {
        self.selects.set(self.selects.get() + 1);
        self.check_failure(&query.table)?;

        let mut rows: Vec<Value> = {
            let map = self.tables.borrow();
            let rows = map
                .get(&query.table)
                .ok_or_else(|| StoreError::UnknownTable(query.table.clone()))?;
            rows.iter()
                .filter(|row| query.filters.iter().all(|f| matches_filter(row, f)))
                .cloned()
                .collect()
        };

        // Stable sort keeps insertion order among equal keys
        rows.sort_by(|a, b| {
            for order in &query.order {
                let ordering = compare_values(
                    a.get(&order.column).unwrap_or(&Value::Null),
                    b.get(&order.column).unwrap_or(&Value::Null),
                );
                let ordering = if order.ascending {
                    ordering
                } else {
                    ordering.reverse()
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            Ordering::Equal
        });

        let result: Vec<Value> = rows
            .iter()
            .map(|row| {
                let mut out = project(row, &query.columns);
                if let Value::Object(fields) = &mut out {
                    for embed in &query.embeds {
                        fields.insert(embed.alias.clone(), self.embed_row(row, embed));
                    }
                }
                out
            })
            .collect();

        debug!(table = %query.table, rows = result.len(), "memory select");
        Ok(result)
    }

    async fn insert(&self, table: &str, row: Value) -> Result<Value, StoreError> {
        self.inserts.set(self.inserts.get() + 1);
        self.check_failure(table)?;

        let mut fields = match row {
            Value::Object(fields) => fields,
            other => {
                warn!(table, "rejecting non-object row");
                return Err(StoreError::Rejected {
                    table: table.to_string(),
                    reason: format!("expected an object, got {}", other),
                });
            }
        };

        let mut map = self.tables.borrow_mut();
        let rows = map
            .get_mut(table)
            .ok_or_else(|| StoreError::UnknownTable(table.to_string()))?;

        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, false);
        fields
            .entry("id")
            .or_insert_with(|| Value::String(Uuid::new_v4().to_string()));
        fields
            .entry("created_at")
            .or_insert_with(|| Value::String(now.clone()));
        fields
            .entry("updated_at")
            .or_insert_with(|| Value::String(now));

        let stored = Value::Object(fields);
        rows.push(stored.clone());
        Ok(stored)
    }

    async fn current_session(&self) -> Result<Option<Session>, StoreError> {
        Ok(self.session.borrow().clone())
    }
}

fn project(row: &Value, columns: &[String]) -> Value {
    if columns.is_empty() || columns.iter().any(|c| c == "*") {
        return row.clone();
    }
    let mut out = Map::new();
    for column in columns {
        out.insert(
            column.clone(),
            row.get(column).cloned().unwrap_or(Value::Null),
        );
    }
    Value::Object(out)
}

fn matches_filter(row: &Value, filter: &Filter) -> bool {
    let value = row.get(&filter.column).unwrap_or(&Value::Null);
    match filter.op {
        FilterOp::Eq => value == &filter.value,
        FilterOp::Neq => value != &filter.value,
        FilterOp::Gt => ordered(value, &filter.value) == Some(Ordering::Greater),
        FilterOp::Gte => matches!(
            ordered(value, &filter.value),
            Some(Ordering::Greater | Ordering::Equal)
        ),
        FilterOp::Lt => ordered(value, &filter.value) == Some(Ordering::Less),
        FilterOp::Lte => matches!(
            ordered(value, &filter.value),
            Some(Ordering::Less | Ordering::Equal)
        ),
        FilterOp::ILike => match (value.as_str(), filter.value.as_str()) {
            (Some(text), Some(pattern)) => ilike(text, pattern),
            _ => false,
        },
    }
}

/// Comparison between two non-null values of the same kind
fn ordered(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// Sort comparison; nulls sort after everything when ascending
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => ordered(a, b).unwrap_or(Ordering::Equal),
    }
}

/// Case-insensitive match where `*` stands for any run of characters
fn ilike(text: &str, pattern: &str) -> bool {
    let text = text.to_lowercase();
    let pattern = pattern.to_lowercase();
    let parts: Vec<&str> = pattern.split('*').collect();
    if parts.len() == 1 {
        return text == pattern;
    }

    let first = parts[0];
    let last = parts[parts.len() - 1];
    if !text.starts_with(first) {
        return false;
    }
    let mut rest = &text[first.len()..];
    for part in &parts[1..parts.len() - 1] {
        match rest.find(part) {
            Some(index) => rest = &rest[index + part.len()..],
            None => return false,
        }
    }
    rest.ends_with(last) && rest.len() >= last.len()
}
