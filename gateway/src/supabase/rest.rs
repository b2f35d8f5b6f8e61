use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, CONTENT_RANGE};
use reqwest::StatusCode;
use serde_json::Value;

use crate::error::{GatewayError, GatewayResult};
use crate::store::{Filter, RemoteStore, SelectQuery, Selection};
use crate::supabase::{check_status, SupabaseClient};

/// PostgREST tables under `/rest/v1`
#[derive(Clone)]
pub struct SupabaseRest {
    client: SupabaseClient,
}

impl SupabaseRest {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    fn table_url(&self, table: &str) -> String {
        self.client.endpoint(&format!("rest/v1/{}", table))
    }
}

fn filter_param(filter: &Filter) -> (String, String) {
    match filter {
        Filter::Eq(column, value) => (column.clone(), format!("eq.{}", value)),
        Filter::ILike(column, pattern) => (column.clone(), format!("ilike.{}", pattern)),
    }
}

/// Total from a `Content-Range` header such as `0-4/12` or `*/0`
pub fn parse_content_range(headers: &HeaderMap) -> Option<u64> {
    let value = headers.get(CONTENT_RANGE)?.to_str().ok()?;
    let (_, total) = value.rsplit_once('/')?;
    total.trim().parse().ok()
}

#[async_trait]
impl RemoteStore for SupabaseRest {
    async fn select(&self, table: &str, query: &SelectQuery) -> GatewayResult<Selection> {
        let mut params = vec![("select".to_string(), "*".to_string())];
        params.extend(query.filters.iter().map(filter_param));

        let mut request = self
            .client
            .http()
            .get(self.table_url(table))
            .headers(self.client.headers(None).await?)
            .query(&params);

        if let Some((from, to)) = query.range {
            request = request
                .header("Range-Unit", "items")
                .header("Range", format!("{}-{}", from, to));
        }
        if query.exact_count {
            request = request.header("Prefer", "count=exact");
        }

        debug!("GET {} {:?} range {:?}", table, params, query.range);
        let response = request.send().await?;

        if response.status() == StatusCode::RANGE_NOT_SATISFIABLE {
            let count = parse_content_range(response.headers());
            debug!("Range past the end of {}, total {:?}", table, count);
            return Ok(Selection {
                rows: Vec::new(),
                count: if query.exact_count { count } else { None },
            });
        }

        let response = check_status(response).await?;
        let count = if query.exact_count {
            parse_content_range(response.headers())
        } else {
            None
        };
        let rows: Vec<Value> = response.json().await?;
        Ok(Selection { rows, count })
    }

    async fn insert(&self, table: &str, row: Value) -> GatewayResult<Value> {
        debug!("POST {}", table);
        let response = self
            .client
            .http()
            .post(self.table_url(table))
            .headers(self.client.headers(None).await?)
            .header("Prefer", "return=representation")
            .json(&row)
            .send()
            .await?;

        let rows: Vec<Value> = check_status(response).await?.json().await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| GatewayError::NotFound(format!("insert into {} returned no row", table)))
    }

    async fn update(&self, table: &str, id: &str, patch: Value) -> GatewayResult<Vec<Value>> {
        debug!("PATCH {} id={}", table, id);
        let response = self
            .client
            .http()
            .patch(self.table_url(table))
            .headers(self.client.headers(None).await?)
            .header("Prefer", "return=representation")
            .query(&[("id", format!("eq.{}", id))])
            .json(&patch)
            .send()
            .await?;

        Ok(check_status(response).await?.json().await?)
    }

    async fn delete(&self, table: &str, id: &str) -> GatewayResult<()> {
        debug!("DELETE {} id={}", table, id);
        let response = self
            .client
            .http()
            .delete(self.table_url(table))
            .headers(self.client.headers(None).await?)
            .query(&[("id", format!("eq.{}", id))])
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use reqwest::header::HeaderValue;
    use rstest::rstest;

    #[rstest]
    #[case("0-4/12", Some(12))]
    #[case("*/0", Some(0))]
    #[case("0-1/*", None)]
    #[case("garbage", None)]
    fn test_parse_content_range(#[case] raw: &str, #[case] expected: Option<u64>) {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_RANGE, HeaderValue::from_str(raw).unwrap());
        assert_eq!(parse_content_range(&headers), expected);
    }

    #[test]
    fn test_filter_params() {
        assert_eq!(
            filter_param(&Filter::ILike("name".into(), "%an%".into())),
            ("name".to_string(), "ilike.%an%".to_string())
        );
        assert_eq!(
            filter_param(&Filter::Eq("playerId".into(), "p1".into())),
            ("playerId".to_string(), "eq.p1".to_string())
        );
    }
}
