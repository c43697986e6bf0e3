use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error};

use super::{Filter, Query, RemoteStore, Session};
use crate::config::StoreConfig;
use crate::error::{ConfigError, StoreError};

/// PostgREST client for the hosted store
#[derive(Clone, Debug)]
pub struct RestStore {
    config: StoreConfig,
    client: Client,
}

/// Body of `GET /auth/v1/user`
#[derive(Deserialize)]
struct AuthUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

/// PostgREST error body
#[derive(Deserialize)]
struct ApiError {
    message: String,
}

impl RestStore {
    pub fn new(config: StoreConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            client: Client::new(),
        })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Query-string pairs for a read: `select`, one pair per filter, `order`
    pub fn query_params(query: &Query) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), query.select_clause())];
        params.extend(query.filters.iter().map(filter_param));
        if let Some(order) = query.order_clause() {
            params.push(("order".to_string(), order));
        }
        params
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let token = self
            .config
            .access_token
            .as_deref()
            .unwrap_or(&self.config.anon_key);
        request
            .header("apikey", &self.config.anon_key)
            .bearer_auth(token)
    }
}

fn filter_param(filter: &Filter) -> (String, String) {
    let value = match &filter.value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    (
        filter.column.clone(),
        format!("{}.{}", filter.op.as_str(), value),
    )
}

async fn check_status(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiError>(&body)
        .map(|e| e.message)
        .unwrap_or(body);
    error!(code = status.as_u16(), %message, "remote store error");
    Err(StoreError::Status {
        code: status.as_u16(),
        message,
    })
}

#[async_trait(?Send)]
impl RemoteStore for RestStore {
    async fn select(&self, query: &Query) -> Result<Vec<Value>, StoreError> {
        let params = Self::query_params(query);
        debug!(table = %query.table, ?params, "GET");
        let request = self
            .client
            .get(self.config.rest_url(&query.table))
            .query(&params);
        let response = check_status(self.authorize(request).send().await?).await?;
        response
            .json::<Vec<Value>>()
            .await
            .map_err(|e| StoreError::Decode {
                table: query.table.clone(),
                message: e.to_string(),
            })
    }

    async fn insert(&self, table: &str, row: Value) -> Result<Value, StoreError> {
        debug!(table, "POST");
        let request = self
            .client
            .post(self.config.rest_url(table))
            .header("Prefer", "return=representation")
            .json(&row);
        let response = check_status(self.authorize(request).send().await?).await?;
        let mut rows = response
            .json::<Vec<Value>>()
            .await
            .map_err(|e| StoreError::Decode {
                table: table.to_string(),
                message: e.to_string(),
            })?;
        if rows.is_empty() {
            return Err(StoreError::Rejected {
                table: table.to_string(),
                reason: "no row returned".to_string(),
            });
        }
        Ok(rows.swap_remove(0))
    }

    async fn current_session(&self) -> Result<Option<Session>, StoreError> {
        if self.config.access_token.is_none() {
            return Ok(None);
        }
        let request = self.client.get(self.config.auth_url("user"));
        let response = self.authorize(request).send().await?;
        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            return Ok(None);
        }
        let user = check_status(response)
            .await?
            .json::<AuthUser>()
            .await
            .map_err(|e| StoreError::Decode {
                table: "auth.users".to_string(),
                message: e.to_string(),
            })?;
        Ok(Some(Session {
            user_id: user.id,
            email: user.email,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{tables, FilterOp};

    #[test]
    fn test_query_params() {
        let query = Query::from(tables::APPOINTMENTS)
            .embed("patient", tables::PATIENTS, "patient_id", &["patient_id", "first_name", "last_name"])
            .eq("status", "Scheduled")
            .filter("appointment_date", FilterOp::Gte, "2024-07-01")
            .order("appointment_date", true)
            .order("appointment_time", true);
        let params = RestStore::query_params(&query);
        assert_eq!(
            params,
            vec![
                (
                    "select".to_string(),
                    "*,patient:patients(patient_id,first_name,last_name)".to_string()
                ),
                ("status".to_string(), "eq.Scheduled".to_string()),
                ("appointment_date".to_string(), "gte.2024-07-01".to_string()),
                (
                    "order".to_string(),
                    "appointment_date.asc,appointment_time.asc".to_string()
                ),
            ]
        );
    }

    #[test]
    fn test_non_string_filter_value() {
        let query = Query::from(tables::REPORTS).filter("id", FilterOp::Lt, 10);
        let params = RestStore::query_params(&query);
        assert_eq!(params[1], ("id".to_string(), "lt.10".to_string()));
    }

    #[test]
    fn test_rejects_invalid_config() {
        assert!(RestStore::new(StoreConfig::new("", "anon")).is_err());
        assert!(RestStore::new(StoreConfig::new("https://clinic.supabase.co", "anon")).is_ok());
    }
}
