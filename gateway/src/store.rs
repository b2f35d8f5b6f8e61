//! The three black boxes the gateway talks to: table storage, object
//! storage and authentication.

use async_trait::async_trait;
use serde_json::Value;

use shared::{AuthSession, AuthUser};

use crate::error::GatewayResult;

/// A row predicate
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// `column = value`
    Eq(String, String),
    /// Case-insensitive `LIKE` with `%` and `_` wildcards
    ILike(String, String),
}

/// What to read from a table. Ranges are inclusive on both ends, like the
/// `Range` header they end up in.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectQuery {
    pub filters: Vec<Filter>,
    pub range: Option<(u64, u64)>,
    pub exact_count: bool,
}

impl SelectQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, column: &str, value: &str) -> Self {
        self.filters.push(Filter::Eq(column.to_string(), value.to_string()));
        self
    }

    /// Substring match, any case
    pub fn ilike_contains(mut self, column: &str, text: &str) -> Self {
        self.filters
            .push(Filter::ILike(column.to_string(), format!("%{}%", text)));
        self
    }

    pub fn range(mut self, from: u64, to: u64) -> Self {
        self.range = Some((from, to));
        self
    }

    pub fn exact_count(mut self) -> Self {
        self.exact_count = true;
        self
    }
}

/// Rows of a select; `count` is the number of matching rows ignoring the
/// range, present when an exact count was asked for.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Selection {
    pub rows: Vec<Value>,
    pub count: Option<u64>,
}

#[async_trait]
pub trait RemoteStore: Send + Sync {
    async fn select(&self, table: &str, query: &SelectQuery) -> GatewayResult<Selection>;

    /// Insert one row and return it as stored, id included
    async fn insert(&self, table: &str, row: Value) -> GatewayResult<Value>;

    /// Patch the row with `id`; returns the updated rows, empty when none matched
    async fn update(&self, table: &str, id: &str, patch: Value) -> GatewayResult<Vec<Value>>;

    async fn delete(&self, table: &str, id: &str) -> GatewayResult<()>;
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn upload(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> GatewayResult<()>;

    async fn remove(&self, key: &str) -> GatewayResult<()>;

    fn public_url(&self, key: &str) -> String;
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> GatewayResult<AuthSession>;

    /// The user owning `token`; fails when the session is gone
    async fn user(&self, token: &str) -> GatewayResult<AuthUser>;

    async fn sign_out(&self, token: &str) -> GatewayResult<()>;
}
