//! Transactions store behind a hosted backend-as-a-service REST API.
//!
//! Speaks the PostgREST dialect: one table under `/rest/v1/{table}`, filters
//! as `column=eq.value` query parameters, and `Prefer: return=representation`
//! so writes answer with the stored rows.

use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::debug;

use stockscan_domain::{
    ActionType, LookupKey, ScanEvent, ScanEventRepository, ScanStamp, StoreConfig,
};

/// Error reported by the hosted store. Displays the store's own message.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct StoreError {
    pub status: u16,
    pub message: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl StoreError {
    fn from_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|parsed| parsed.message)
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    format!("store responded {}", status)
                } else {
                    body.trim().to_string()
                }
            });
        Self { status, message }
    }
}

pub struct RestScanRepository {
    client: Client,
    base_url: String,
    table: String,
    api_key: Option<String>,
}

impl RestScanRepository {
    pub fn new(config: &StoreConfig) -> Result<Self> {
        let base_url = config
            .store_url
            .clone()
            .ok_or_else(|| anyhow!("store_url is not configured"))?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds.max(3)))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            table: config.store_table.clone(),
            api_key: config.store_api_key.clone(),
        })
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    fn request(&self, method: Method) -> RequestBuilder {
        let mut builder = self
            .client
            .request(method, self.table_url())
            .header("Accept", "application/json");
        if let Some(api_key) = &self.api_key {
            builder = builder
                .header("apikey", api_key)
                .header("Authorization", format!("Bearer {}", api_key));
        }
        builder
    }

    async fn first_row(response: Response, what: &str) -> Result<ScanEvent> {
        read_rows(response)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("store returned no row for {}", what))
    }
}

async fn read_rows(response: Response) -> Result<Vec<ScanEvent>> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(StoreError::from_body(status.as_u16(), &body).into());
    }
    Ok(serde_json::from_str(&body)?)
}

#[async_trait]
impl ScanEventRepository for RestScanRepository {
    async fn find_open_inbound(&self, key: &LookupKey) -> Result<Option<ScanEvent>> {
        debug!("looking up open inbound scan {}", key);
        let response = self
            .request(Method::GET)
            .query(&[
                ("select", "*".to_string()),
                (key.field.column(), format!("eq.{}", key.value)),
                ("action_type", format!("eq.{}", ActionType::In.as_str())),
                ("limit", "1".to_string()),
            ])
            .send()
            .await?;
        Ok(read_rows(response).await?.into_iter().next())
    }

    async fn update_scan_timestamp(&self, id: i64, stamp: &ScanStamp) -> Result<ScanEvent> {
        let response = self
            .request(Method::PATCH)
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=representation")
            .json(&json!({
                "scan_date": stamp.scan_date,
                "scan_time": stamp.scan_time,
            }))
            .send()
            .await?;
        Self::first_row(response, &format!("id {}", id)).await
    }

    async fn insert_inbound(&self, event: &ScanEvent) -> Result<ScanEvent> {
        let response = self
            .request(Method::POST)
            .header("Prefer", "return=representation")
            .json(event)
            .send()
            .await?;
        Self::first_row(response, &event.raw_data).await
    }

    async fn list_recent(&self, date: Option<&str>, limit: usize) -> Result<Vec<ScanEvent>> {
        let mut params = vec![
            ("select", "*".to_string()),
            ("order", "scan_time.desc".to_string()),
            ("limit", limit.to_string()),
        ];
        if let Some(date) = date {
            params.push(("scan_date", format!("eq.{}", date)));
        }
        let response = self.request(Method::GET).query(&params).send().await?;
        read_rows(response).await
    }

    async fn ping(&self) -> Result<()> {
        let response = self
            .request(Method::GET)
            .query(&[("select", "id"), ("limit", "1")])
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::from_body(status.as_u16(), &body).into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn repo_for(server: &MockServer) -> RestScanRepository {
        RestScanRepository::new(&StoreConfig {
            store_url: Some(format!("{}/", server.uri())),
            store_api_key: Some("anon-key".to_string()),
            store_table: "transactions".to_string(),
            request_timeout_seconds: 5,
        })
        .expect("repository")
    }

    fn stored_row() -> Value {
        serde_json::json!({
            "id": 17,
            "part_number": "49560",
            "category": "L3010",
            "quantity": 1,
            "tag_number": "20261016093000000",
            "raw_data": "49560-L3010",
            "action_type": "IN",
            "scan_date": "2026-10-16",
            "scan_time": "2026-10-16T09:30:00.000+09:00",
            "created_at": "2026-10-16T00:30:00+00:00"
        })
    }

    #[tokio::test]
    async fn lookup_filters_on_key_and_inbound_action() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/transactions"))
            .and(query_param("raw_data", "eq.49560-L3010"))
            .and(query_param("action_type", "eq.IN"))
            .and(query_param("limit", "1"))
            .and(header("apikey", "anon-key"))
            .and(header("Authorization", "Bearer anon-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(vec![stored_row()]))
            .mount(&server)
            .await;

        let found = repo_for(&server)
            .find_open_inbound(&LookupKey::raw_data("49560-L3010"))
            .await
            .expect("lookup")
            .expect("row");
        assert_eq!(found.id, Some(17));
        assert_eq!(found.category.as_deref(), Some("L3010"));
    }

    #[tokio::test]
    async fn empty_lookup_means_first_scan() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/transactions"))
            .and(query_param("tag_number", "eq.XYZ"))
            .respond_with(ResponseTemplate::new(200).set_body_json(Vec::<Value>::new()))
            .mount(&server)
            .await;

        let found = repo_for(&server)
            .find_open_inbound(&LookupKey::tag_number("XYZ"))
            .await
            .expect("lookup");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn timestamp_update_patches_only_scan_columns() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/rest/v1/transactions"))
            .and(query_param("id", "eq.17"))
            .and(header("Prefer", "return=representation"))
            .and(body_json(serde_json::json!({
                "scan_date": "2026-10-16",
                "scan_time": "2026-10-16T09:30:00.000+09:00"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(vec![stored_row()]))
            .expect(1)
            .mount(&server)
            .await;

        let stamp = ScanStamp {
            scan_date: "2026-10-16".to_string(),
            scan_time: "2026-10-16T09:30:00.000+09:00".to_string(),
        };
        let updated = repo_for(&server)
            .update_scan_timestamp(17, &stamp)
            .await
            .expect("update");
        assert_eq!(updated.scan_time, stamp.scan_time);
    }

    #[tokio::test]
    async fn insert_returns_stored_representation() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/transactions"))
            .and(header("Prefer", "return=representation"))
            .respond_with(ResponseTemplate::new(201).set_body_json(vec![stored_row()]))
            .mount(&server)
            .await;

        let row: ScanEvent = serde_json::from_value(stored_row()).expect("row");
        let new_row = ScanEvent { id: None, ..row };
        let inserted = repo_for(&server)
            .insert_inbound(&new_row)
            .await
            .expect("insert");
        assert_eq!(inserted.id, Some(17));

        let requests = server.received_requests().await.expect("recorded requests");
        let sent: Value = serde_json::from_slice(&requests[0].body).expect("json body");
        assert!(sent.get("id").is_none());
        assert_eq!(sent["action_type"], "IN");
    }

    #[tokio::test]
    async fn store_message_is_passed_through() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/transactions"))
            .respond_with(ResponseTemplate::new(409).set_body_json(serde_json::json!({
                "code": "23505",
                "message": "duplicate key value violates unique constraint \"transactions_tag_key\"",
                "details": null,
                "hint": null
            })))
            .mount(&server)
            .await;

        let row: ScanEvent = serde_json::from_value(stored_row()).expect("row");
        let err = repo_for(&server)
            .insert_inbound(&row)
            .await
            .expect_err("conflict");
        assert_eq!(
            err.to_string(),
            "duplicate key value violates unique constraint \"transactions_tag_key\""
        );
        let store_err = err.downcast_ref::<StoreError>().expect("store error");
        assert_eq!(store_err.status, 409);
    }

    #[tokio::test]
    async fn plain_text_errors_keep_their_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/transactions"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
            .mount(&server)
            .await;

        let err = repo_for(&server).ping().await.expect_err("unavailable");
        assert_eq!(err.to_string(), "upstream unavailable");
    }

    #[tokio::test]
    async fn recent_scans_are_ordered_by_scan_time() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/transactions"))
            .and(query_param("order", "scan_time.desc"))
            .and(query_param("limit", "20"))
            .and(query_param("scan_date", "eq.2026-10-16"))
            .respond_with(ResponseTemplate::new(200).set_body_json(vec![stored_row()]))
            .mount(&server)
            .await;

        let rows = repo_for(&server)
            .list_recent(Some("2026-10-16"), 20)
            .await
            .expect("list");
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn missing_url_is_a_configuration_error() {
        let result = RestScanRepository::new(&StoreConfig {
            store_url: None,
            store_api_key: None,
            store_table: "transactions".to_string(),
            request_timeout_seconds: 5,
        });
        assert!(result.is_err());
    }
}
