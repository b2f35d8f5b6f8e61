pub mod app;
pub mod auth;
pub mod autocomplete;
pub mod confirm;
pub mod debounce;
pub mod entity;
pub mod loader;
pub mod pages;
pub mod routes;
pub mod storage;
pub mod table;
pub mod toast;

pub use app::AppContext;
pub use auth::{AuthAction, AuthState};
pub use confirm::DeleteFlow;
pub use debounce::{Debouncer, SearchInput, SEARCH_DEBOUNCE};
pub use entity::AdminEntity;
pub use pages::admin_list::ListPage;
pub use pages::EditorMode;
pub use routes::{Route, Section};
pub use storage::{ClientStorage, FileStorage, MemoryStorage, StorageError};
pub use table::{ListController, TableState, PAGE_SIZE};
pub use toast::{Notifier, Toast, ToastType};
