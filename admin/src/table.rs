//! Paginated, filtered admin tables whose state mirrors the URL query.

use log::{debug, warn};

use gateway::{Entity, Gateway, TableApi};
use shared::format::format_date_for_datepicker;
use shared::Player;

use crate::app::AppContext;
use crate::entity::AdminEntity;

pub const PAGE_SIZE: i64 = 5;

const DEFAULT_FROM: i64 = 0;
const DEFAULT_TO: i64 = PAGE_SIZE - 1;
const DEFAULT_TOTAL: i64 = 0;
const DEFAULT_PAGE: i64 = 1;

/// Leading integer of `raw` (after whitespace, with an optional sign), or
/// `default` when there is none or it is zero.
pub fn parse_int_or(raw: Option<&str>, default: i64) -> i64 {
    let Some(raw) = raw else {
        return default;
    };
    let raw = raw.trim_start();
    let (sign, digits) = match raw.as_bytes().first() {
        Some(b'-') => (-1, &raw[1..]),
        Some(b'+') => (1, &raw[1..]),
        _ => (1, raw),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    match digits[..end].parse::<i64>() {
        Ok(0) | Err(_) => default,
        Ok(value) => sign * value,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    pub from: i64,
    pub to: i64,
    pub total: i64,
    pub page: i64,
    pub filter: String,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            from: DEFAULT_FROM,
            to: DEFAULT_TO,
            total: DEFAULT_TOTAL,
            page: DEFAULT_PAGE,
            filter: String::new(),
        }
    }
}

impl TableState {
    /// Read `from`, `to`, `total`, `page` and the filter text stored under
    /// `filter_key`; anything missing or unparseable takes its default.
    pub fn from_query(query: &str, filter_key: &str) -> Self {
        let pairs: Vec<(String, String)> =
            serde_urlencoded::from_str(query.trim_start_matches('?')).unwrap_or_else(|e| {
                warn!("Ignoring malformed query '{}': {}", query, e);
                Vec::new()
            });
        let get = |key: &str| {
            pairs
                .iter()
                .rev()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };

        Self {
            from: parse_int_or(get("from"), DEFAULT_FROM),
            to: parse_int_or(get("to"), DEFAULT_TO),
            total: parse_int_or(get("total"), DEFAULT_TOTAL),
            page: parse_int_or(get("page"), DEFAULT_PAGE),
            filter: get(filter_key).unwrap_or_default().to_string(),
        }
    }

    /// The query written back to the URL. `total` is not part of it.
    pub fn to_query(&self, filter_key: &str) -> String {
        let pairs = [
            (filter_key, self.filter.clone()),
            ("from", self.from.to_string()),
            ("to", self.to.to_string()),
            ("page", self.page.to_string()),
        ];
        serde_urlencoded::to_string(pairs).unwrap_or_default()
    }

    pub fn set_filter(&mut self, text: &str) {
        self.filter = text.to_string();
        self.from = DEFAULT_FROM;
        self.to = DEFAULT_TO;
        self.page = DEFAULT_PAGE;
    }

    pub fn next(&mut self) {
        self.from += PAGE_SIZE;
        self.to += PAGE_SIZE;
        self.page += 1;
    }

    pub fn previous(&mut self) {
        self.from -= PAGE_SIZE;
        self.to -= PAGE_SIZE;
        self.page -= 1;
    }

    pub fn has_previous(&self) -> bool {
        self.from > 0
    }

    pub fn has_next(&self) -> bool {
        self.to + 1 < self.total
    }

    pub fn page_count(&self) -> i64 {
        ((self.total + PAGE_SIZE - 1) / PAGE_SIZE).max(1)
    }
}

/// Query key holding the filter text for an entity's table
pub fn filter_key<E: Entity>() -> &'static str {
    E::FILTER_COLUMN
}

/// One admin table: its state, the rows of the current page, and the URL
/// query reflecting the state.
pub struct ListController<E: AdminEntity> {
    api: TableApi<E>,
    ctx: AppContext,
    state: TableState,
    rows: Vec<E>,
    url_query: String,
}

impl<E: AdminEntity> ListController<E> {
    pub fn new(gateway: &Gateway, ctx: AppContext, query: &str) -> Self {
        let state = TableState::from_query(query, filter_key::<E>());
        let url_query = state.to_query(filter_key::<E>());
        Self {
            api: E::api(gateway).clone(),
            ctx,
            state,
            rows: Vec::new(),
            url_query,
        }
    }

    pub fn state(&self) -> &TableState {
        &self.state
    }

    pub fn rows(&self) -> &[E] {
        &self.rows
    }

    /// Query string last written for the current state
    pub fn url_query(&self) -> &str {
        &self.url_query
    }

    pub fn has_next(&self) -> bool {
        self.state.has_next()
    }

    pub fn has_previous(&self) -> bool {
        self.state.has_previous()
    }

    fn sync_url(&mut self) {
        self.url_query = self.state.to_query(filter_key::<E>());
        debug!("{} url query: {}", E::SECTION, self.url_query);
    }

    /// Load the current page. On failure the popup is raised and rows and
    /// state are left as they were.
    pub async fn fetch(&mut self) -> bool {
        let _loading = self.ctx.loader.start();
        let envelope = self
            .api
            .get_all_with_filters(self.state.from, self.state.to, &self.state.filter)
            .await;

        match (envelope.has_success, envelope.data) {
            (true, Some(rows)) => {
                self.state.total = envelope.total_records.unwrap_or(0) as i64;
                self.rows = rows;
                true
            }
            _ => {
                self.ctx.notifier.error(E::MESSAGES.load_list_failed);
                false
            }
        }
    }

    /// New filter text. The page resets; the fetch is left to the search
    /// input's debounce.
    pub fn set_filter(&mut self, text: &str) {
        self.state.set_filter(text);
        self.sync_url();
    }

    pub async fn next(&mut self) -> bool {
        self.state.next();
        self.sync_url();
        self.fetch().await
    }

    pub async fn previous(&mut self) -> bool {
        self.state.previous();
        self.sync_url();
        self.fetch().await
    }
}

impl ListController<Player> {
    /// Birth dates of the current page as the date picker wants them
    pub fn birth_dates(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|p| format_date_for_datepicker(p.birth_date))
            .collect()
    }
}
