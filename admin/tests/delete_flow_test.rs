use std::sync::Arc;

use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};
use serde_json::json;

use admin::{AppContext, ListPage, MemoryStorage};
use gateway::{CompensationPolicy, Gateway, MemoryAuth, MemoryObjectStore, MemoryStore, ObjectStore};
use shared::{Deck, Player};

struct Site {
    store: MemoryStore,
    objects: MemoryObjectStore,
    gateway: Gateway,
    ctx: AppContext,
}

#[fixture]
fn site() -> Site {
    let store = MemoryStore::new();
    let objects = MemoryObjectStore::default();
    let gateway = Gateway::in_memory(&store, &objects, &MemoryAuth::new(), CompensationPolicy::default());
    Site {
        store,
        objects,
        gateway,
        ctx: AppContext::new(Arc::new(MemoryStorage::new())),
    }
}

async fn seed_anna(site: &Site) -> Player {
    site.store
        .seed(
            "players",
            vec![
                json!({"id": "p1", "name": "Anna", "surname": "Rossi"}),
                json!({"id": "p2", "name": "Mark", "surname": "Verdi"}),
            ],
        )
        .await;
    site.objects.upload("p1", vec![1, 2, 3], "image/png").await.unwrap();
    site.gateway.players.get("p1").await.into_data().unwrap()
}

#[rstest]
#[tokio::test]
async fn test_cancel_leaves_row_alone(site: Site) {
    let anna = seed_anna(&site).await;
    let mut page = ListPage::<Player>::new(&site.gateway, site.ctx.clone(), "");

    page.request_delete(anna);
    assert_eq!(page.pending_delete().map(|p| p.name.as_str()), Some("Anna"));
    page.cancel_delete();

    assert!(page.pending_delete().is_none());
    assert!(!page.confirm_delete().await);
    assert_eq!(site.store.rows("players").await.len(), 2);
}

#[rstest]
#[tokio::test]
async fn test_delete_removes_row_and_picture(site: Site) {
    let anna = seed_anna(&site).await;
    let mut page = ListPage::<Player>::new(&site.gateway, site.ctx.clone(), "");
    page.load().await;

    page.request_delete(anna);
    assert!(page.confirm_delete().await);

    assert!(!site.objects.contains("p1").await);
    assert_eq!(site.ctx.notifier.messages(), vec!["playerDeleted".to_string()]);
    let controller = page.controller().lock().await;
    assert_eq!(controller.rows().len(), 1);
    assert_eq!(controller.rows()[0].name, "Mark");
}

#[rstest]
#[tokio::test]
async fn test_failed_picture_removal_still_refreshes(site: Site) {
    let anna = seed_anna(&site).await;
    site.objects.fail_next_removals(3);
    let mut page = ListPage::<Player>::new(&site.gateway, site.ctx.clone(), "");

    page.request_delete(anna);
    assert!(page.confirm_delete().await);

    assert_eq!(
        site.ctx.notifier.messages(),
        vec!["playerDeleted".to_string(), "unableRemoveImage".to_string()]
    );
    assert!(site.objects.contains("p1").await);
    let players = site.gateway.players.get_all().await.into_data().unwrap();
    assert!(players.iter().all(|p| p.id != "p1"));
    assert_eq!(page.controller().lock().await.rows().len(), 1);
}

#[rstest]
#[tokio::test]
async fn test_failed_row_delete_keeps_list(site: Site) {
    let anna = seed_anna(&site).await;
    let mut page = ListPage::<Player>::new(&site.gateway, site.ctx.clone(), "");
    site.store.fail_next_requests(1);

    page.request_delete(anna);
    assert!(!page.confirm_delete().await);

    assert_eq!(site.ctx.notifier.messages(), vec!["unableDeletePlayer".to_string()]);
    assert_eq!(site.store.rows("players").await.len(), 2);
    assert!(site.objects.contains("p1").await);
}

#[rstest]
#[tokio::test]
async fn test_deck_delete_skips_storage(site: Site) {
    site.store
        .seed("decks", vec![json!({"id": "d1", "label": "Kashtira"})])
        .await;
    site.objects.fail_next_removals(5);
    let deck = site.gateway.decks.get("d1").await.into_data().unwrap();
    let mut page = ListPage::<Deck>::new(&site.gateway, site.ctx.clone(), "");

    page.request_delete(deck);
    assert!(page.confirm_delete().await);

    assert_eq!(site.ctx.notifier.messages(), vec!["deckDeleted".to_string()]);
    assert!(site.store.rows("decks").await.is_empty());
}
