use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::Mutex;

use gateway::Gateway;

use crate::app::AppContext;
use crate::confirm::DeleteFlow;
use crate::debounce::{SearchCallback, SearchInput};
use crate::entity::AdminEntity;
use crate::routes::Route;
use crate::table::ListController;

/// An admin list screen: the table, its debounced filter box and the
/// delete confirmation.
pub struct ListPage<E: AdminEntity> {
    controller: Arc<Mutex<ListController<E>>>,
    search: SearchInput,
    delete: DeleteFlow<E>,
}

impl<E: AdminEntity> ListPage<E> {
    pub fn new(gateway: &Gateway, ctx: AppContext, query: &str) -> Self {
        let controller = ListController::new(gateway, ctx.clone(), query);
        let initial_filter = controller.state().filter.clone();
        let controller = Arc::new(Mutex::new(controller));

        let on_search: SearchCallback = {
            let controller = Arc::clone(&controller);
            Arc::new(move || {
                let controller = Arc::clone(&controller);
                async move {
                    controller.lock().await.fetch().await;
                }
                .boxed()
            })
        };

        Self {
            controller,
            search: SearchInput::new(initial_filter).with_search(on_search),
            delete: DeleteFlow::new(gateway.clone(), ctx),
        }
    }

    pub fn controller(&self) -> &Arc<Mutex<ListController<E>>> {
        &self.controller
    }

    pub fn search(&self) -> &SearchInput {
        &self.search
    }

    /// First load of the page
    pub async fn load(&self) -> bool {
        self.controller.lock().await.fetch().await
    }

    pub async fn filter_input(&self, text: &str) {
        self.controller.lock().await.set_filter(text);
        self.search.input(text);
    }

    pub async fn next(&self) -> bool {
        self.controller.lock().await.next().await
    }

    pub async fn previous(&self) -> bool {
        self.controller.lock().await.previous().await
    }

    /// Route plus query the browser should show now
    pub async fn location(&self) -> String {
        let query = self.controller.lock().await.url_query().to_string();
        format!("{}?{}", Route::AdminList(E::SECTION).path(), query)
    }

    pub fn edit_route(&self, row: &E) -> Route {
        Route::AdminEdit(E::SECTION, row.id().to_string())
    }

    pub fn new_route(&self) -> Route {
        Route::AdminNew(E::SECTION)
    }

    pub fn request_delete(&mut self, row: E) {
        self.delete.open(row);
    }

    pub fn cancel_delete(&mut self) {
        self.delete.cancel();
    }

    pub fn pending_delete(&self) -> Option<&E> {
        self.delete.selected()
    }

    /// Run the delete and reload the page when the row went away
    pub async fn confirm_delete(&mut self) -> bool {
        let refresh = self.delete.confirm().await;
        if refresh {
            self.controller.lock().await.fetch().await;
        }
        refresh
    }
}
