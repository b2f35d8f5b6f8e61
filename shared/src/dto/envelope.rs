use serde::{Deserialize, Serialize};

/// The uniform result of every gateway call.
///
/// Failures carry no detail: callers only learn that the call did not
/// succeed and pick the message key to show. `total_records` is only set by
/// counted list queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub has_success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_records: Option<u64>,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            has_success: true,
            data: Some(data),
            total_records: None,
        }
    }

    pub fn success_with_total(data: T, total_records: u64) -> Self {
        Self {
            has_success: true,
            data: Some(data),
            total_records: Some(total_records),
        }
    }

    pub fn failure() -> Self {
        Self {
            has_success: false,
            data: None,
            total_records: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.has_success
    }

    /// Data of a successful envelope, `None` otherwise
    pub fn into_data(self) -> Option<T> {
        if self.has_success {
            self.data
        } else {
            None
        }
    }

    pub fn total(&self) -> u64 {
        self.total_records.unwrap_or(0)
    }

    pub fn map<U, F>(self, f: F) -> Envelope<U>
    where
        F: FnOnce(T) -> U,
    {
        Envelope {
            has_success: self.has_success,
            data: self.data.map(f),
            total_records: self.total_records,
        }
    }
}

impl<T> From<Option<T>> for Envelope<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(data) => Self::success(data),
            None => Self::failure(),
        }
    }
}
