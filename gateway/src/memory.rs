//! In-process stand-ins for the Supabase services, used by tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use shared::{AuthSession, AuthUser};

use crate::error::{GatewayError, GatewayResult};
use crate::store::{AuthProvider, Filter, ObjectStore, RemoteStore, SelectQuery, Selection};

/// Take one pending injected failure, if any
fn take_failure(counter: &AtomicUsize) -> bool {
    counter
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok()
}

fn cell_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// SQL `ILIKE`: `%` matches any run, `_` one character, case ignored.
pub fn ilike(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.to_lowercase().chars().collect();
    let text: Vec<char> = text.to_lowercase().chars().collect();

    let (mut p, mut t) = (0, 0);
    let mut backtrack: Option<(usize, usize)> = None;
    while t < text.len() {
        if p < pattern.len() && (pattern[p] == '_' || pattern[p] == text[t]) {
            p += 1;
            t += 1;
        } else if p < pattern.len() && pattern[p] == '%' {
            backtrack = Some((p, t));
            p += 1;
        } else if let Some((star, matched)) = backtrack {
            p = star + 1;
            t = matched + 1;
            backtrack = Some((star, matched + 1));
        } else {
            return false;
        }
    }
    pattern[p..].iter().all(|c| *c == '%')
}

fn matches(row: &Value, filter: &Filter) -> bool {
    match filter {
        Filter::Eq(column, value) => cell_text(row.get(column)).as_deref() == Some(value.as_str()),
        Filter::ILike(column, pattern) => cell_text(row.get(column))
            .map(|text| ilike(pattern, &text))
            .unwrap_or(false),
    }
}

/// Tables of JSON rows kept in insertion order
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<HashMap<String, Vec<Value>>>>,
    failures: Arc<AtomicUsize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `count` calls fail
    pub fn fail_next_requests(&self, count: usize) {
        self.failures.store(count, Ordering::SeqCst);
    }

    /// Insert rows as they are, ids included
    pub async fn seed(&self, table: &str, rows: Vec<Value>) {
        let mut tables = self.tables.write().await;
        tables.entry(table.to_string()).or_default().extend(rows);
    }

    pub async fn rows(&self, table: &str) -> Vec<Value> {
        self.tables.read().await.get(table).cloned().unwrap_or_default()
    }

    fn check_failure(&self, operation: &str, table: &str) -> GatewayResult<()> {
        if take_failure(&self.failures) {
            return Err(GatewayError::Injected(format!("{} on {}", operation, table)));
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn select(&self, table: &str, query: &SelectQuery) -> GatewayResult<Selection> {
        self.check_failure("select", table)?;
        let tables = self.tables.read().await;
        let matching: Vec<&Value> = tables
            .get(table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| query.filters.iter().all(|f| matches(row, f)))
                    .collect()
            })
            .unwrap_or_default();

        let count = query.exact_count.then_some(matching.len() as u64);
        let rows: Vec<Value> = match query.range {
            Some((from, to)) => matching
                .into_iter()
                .skip(from as usize)
                .take((to.saturating_sub(from) + 1) as usize)
                .cloned()
                .collect(),
            None => matching.into_iter().cloned().collect(),
        };

        debug!("Memory select on {}: {} rows, count {:?}", table, rows.len(), count);
        Ok(Selection { rows, count })
    }

    async fn insert(&self, table: &str, mut row: Value) -> GatewayResult<Value> {
        self.check_failure("insert", table)?;
        let object = row
            .as_object_mut()
            .ok_or_else(|| GatewayError::Remote {
                status: 400,
                message: "row must be a JSON object".into(),
            })?;
        object
            .entry("id")
            .or_insert_with(|| Value::String(Uuid::new_v4().to_string()));

        let mut tables = self.tables.write().await;
        tables.entry(table.to_string()).or_default().push(row.clone());
        Ok(row)
    }

    async fn update(&self, table: &str, id: &str, patch: Value) -> GatewayResult<Vec<Value>> {
        self.check_failure("update", table)?;
        let patch = match patch {
            Value::Object(map) => map,
            _ => {
                return Err(GatewayError::Remote {
                    status: 400,
                    message: "patch must be a JSON object".into(),
                })
            }
        };

        let mut tables = self.tables.write().await;
        let mut updated = Vec::new();
        if let Some(rows) = tables.get_mut(table) {
            for row in rows.iter_mut() {
                if cell_text(row.get("id")).as_deref() != Some(id) {
                    continue;
                }
                if let Some(object) = row.as_object_mut() {
                    for (key, value) in patch.iter().filter(|(key, _)| key.as_str() != "id") {
                        object.insert(key.clone(), value.clone());
                    }
                }
                updated.push(row.clone());
            }
        }
        Ok(updated)
    }

    async fn delete(&self, table: &str, id: &str) -> GatewayResult<()> {
        self.check_failure("delete", table)?;
        let mut tables = self.tables.write().await;
        if let Some(rows) = tables.get_mut(table) {
            rows.retain(|row| cell_text(row.get("id")).as_deref() != Some(id));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct StoredObject {
    bytes: Vec<u8>,
    content_type: String,
}

/// Bucket of uploaded files keyed by object name
#[derive(Clone)]
pub struct MemoryObjectStore {
    base_url: String,
    objects: Arc<RwLock<HashMap<String, StoredObject>>>,
    upload_failures: Arc<AtomicUsize>,
    removal_failures: Arc<AtomicUsize>,
}

impl Default for MemoryObjectStore {
    fn default() -> Self {
        Self::new("memory://images")
    }
}

impl MemoryObjectStore {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            objects: Arc::default(),
            upload_failures: Arc::default(),
            removal_failures: Arc::default(),
        }
    }

    pub fn fail_next_uploads(&self, count: usize) {
        self.upload_failures.store(count, Ordering::SeqCst);
    }

    pub fn fail_next_removals(&self, count: usize) {
        self.removal_failures.store(count, Ordering::SeqCst);
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.objects.read().await.contains_key(key)
    }

    pub async fn content_type(&self, key: &str) -> Option<String> {
        self.objects.read().await.get(key).map(|o| o.content_type.clone())
    }

    pub async fn size(&self, key: &str) -> Option<usize> {
        self.objects.read().await.get(key).map(|o| o.bytes.len())
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn upload(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> GatewayResult<()> {
        if take_failure(&self.upload_failures) {
            return Err(GatewayError::Injected(format!("upload of {}", key)));
        }
        self.objects.write().await.insert(
            key.to_string(),
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn remove(&self, key: &str) -> GatewayResult<()> {
        if take_failure(&self.removal_failures) {
            return Err(GatewayError::Injected(format!("removal of {}", key)));
        }
        self.objects.write().await.remove(key);
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url, key)
    }
}

/// Password accounts with opaque session tokens
#[derive(Clone, Default)]
pub struct MemoryAuth {
    accounts: Arc<RwLock<HashMap<String, (String, AuthUser)>>>,
    sessions: Arc<RwLock<HashMap<String, AuthUser>>>,
}

impl MemoryAuth {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_account(&self, email: &str, password: &str) -> AuthUser {
        let user = AuthUser {
            id: Uuid::new_v4().to_string(),
            email: Some(email.to_string()),
        };
        self.accounts
            .write()
            .await
            .insert(email.to_lowercase(), (password.to_string(), user.clone()));
        user
    }
}

#[async_trait]
impl AuthProvider for MemoryAuth {
    async fn sign_in(&self, email: &str, password: &str) -> GatewayResult<AuthSession> {
        let accounts = self.accounts.read().await;
        let user = match accounts.get(&email.to_lowercase()) {
            Some((stored, user)) if stored == password => user.clone(),
            _ => return Err(GatewayError::Unauthorized("Invalid login credentials".into())),
        };

        let token = Uuid::new_v4().to_string();
        self.sessions.write().await.insert(token.clone(), user.clone());
        Ok(AuthSession {
            access_token: token,
            refresh_token: None,
            expires_in: Some(3600),
            user: Some(user),
        })
    }

    async fn user(&self, token: &str) -> GatewayResult<AuthUser> {
        self.sessions
            .read()
            .await
            .get(token)
            .cloned()
            .ok_or_else(|| GatewayError::Unauthorized("session not found".into()))
    }

    async fn sign_out(&self, token: &str) -> GatewayResult<()> {
        self.sessions.write().await.remove(token);
        Ok(())
    }
}
