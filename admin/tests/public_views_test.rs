use std::sync::Arc;

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};
use serde_json::{json, Value};
use test_log::test;

use admin::pages::equipments::load_equipments;
use admin::pages::home::HomeView;
use admin::pages::login::{LoginPage, LOGIN_ERROR};
use admin::pages::player::PlayerView;
use admin::pages::players::PlayersView;
use admin::storage::TOKEN_KEY;
use admin::{AppContext, ClientStorage, MemoryStorage, Route};
use gateway::{CompensationPolicy, Gateway, MemoryAuth, MemoryObjectStore, MemoryStore};
use shared::stats::Placement;

struct Site {
    store: MemoryStore,
    auth: MemoryAuth,
    storage: MemoryStorage,
    gateway: Gateway,
    ctx: AppContext,
}

#[fixture]
fn site() -> Site {
    let store = MemoryStore::new();
    let auth = MemoryAuth::new();
    let storage = MemoryStorage::new();
    let gateway = Gateway::in_memory(
        &store,
        &MemoryObjectStore::new("https://cdn.majin.it/images"),
        &auth,
        CompensationPolicy::default(),
    );
    Site {
        store,
        auth,
        ctx: AppContext::new(Arc::new(storage.clone())),
        storage,
        gateway,
    }
}

fn top(id: &str, date: &str, rating: &str, deck: &str, player: &str) -> Value {
    json!({
        "id": id,
        "date": date,
        "rating": rating,
        "deck": {"id": deck.to_lowercase(), "label": deck},
        "tournament": {"id": "t1", "label": "Regional"},
        "location": "Milano",
        "playerId": player
    })
}

async fn seed(site: &Site) {
    site.store
        .seed(
            "players",
            vec![
                json!({"id": "p1", "name": "Anna", "surname": "Rossi"}),
                json!({"id": "p2", "name": "Mark", "surname": "Verdi"}),
            ],
        )
        .await;
    site.store
        .seed(
            "tops",
            vec![
                top("t1", "2024-03-02", "Top 8", "Kashtira", "p1"),
                top("t2", "2024-03-20", "1", "Kashtira", "p1"),
                top("t3", "2024-06-01", "2", "Tenpai", "p2"),
                top("t4", "2023-11-11", "Top 16", "Labrynth", "p1"),
            ],
        )
        .await;
    site.store
        .seed("equipments", vec![json!({"id": "e1", "label": "Playmat"})])
        .await;
}

#[rstest]
#[test(tokio::test)]
async fn test_home_figures(site: Site) {
    seed(&site).await;

    let view = HomeView::load(&site.gateway, &site.ctx, NaiveDate::from_ymd_opt(2024, 9, 1).unwrap())
        .await
        .unwrap();

    assert_eq!(view.total_tops, 4);
    let decks: Vec<(&str, usize)> = view.top_decks.iter().map(|d| (d.deck.label.as_str(), d.count)).collect();
    assert_eq!(decks, vec![("Kashtira", 2), ("Tenpai", 1)]);
    assert_eq!(view.months_current[2], 2);
    assert_eq!(view.months_current[5], 1);
    assert_eq!(view.months_previous[10], 1);
}

#[rstest]
#[test(tokio::test)]
async fn test_players_filter_and_top_counts(site: Site) {
    seed(&site).await;
    let mut view = PlayersView::load(&site.gateway, &site.ctx).await;

    assert_eq!(view.cards(&site.gateway).len(), 2);

    view.set_filter("  ANN ");
    let cards = view.cards(&site.gateway);
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].player.id, "p1");
    assert_eq!(cards[0].tops, 3);
    assert_eq!(cards[0].image_url, "https://cdn.majin.it/images/p1");

    // surnames are not searched
    view.set_filter("Rossi");
    assert!(view.cards(&site.gateway).is_empty());
}

#[rstest]
#[test(tokio::test)]
async fn test_player_profile_groups_tops_by_year(site: Site) {
    seed(&site).await;

    let view = PlayerView::load(&site.gateway, &site.ctx, "p1").await.unwrap();

    let years: Vec<i32> = view.years.iter().map(|y| y.year).collect();
    assert_eq!(years, vec![2024, 2023]);
    assert_eq!(view.total_tops(), 3);
    let shown: Vec<String> = view.placements().iter().map(|(_, p, _)| p.to_string()).collect();
    assert_eq!(shown, vec!["1°", "Top 8", "Top 16"]);
    assert_eq!(view.placements()[0].1, Placement::Position("1".into()));
}

#[rstest]
#[test(tokio::test)]
async fn test_missing_player_profile(site: Site) {
    seed(&site).await;

    assert!(PlayerView::load(&site.gateway, &site.ctx, "nobody").await.is_none());
    assert_eq!(site.ctx.notifier.messages(), vec!["unableLoadPlayer".to_string()]);
}

#[rstest]
#[test(tokio::test)]
async fn test_equipment_cards(site: Site) {
    seed(&site).await;

    let cards = load_equipments(&site.gateway, &site.ctx).await;

    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].image_url, "https://cdn.majin.it/images/e1");
}

#[rstest]
#[test(tokio::test)]
async fn test_login_stores_token(site: Site) {
    site.auth.add_account("admin@majin.it", "secret").await;
    let mut page = LoginPage {
        email: "admin@majin.it".into(),
        password: "secret".into(),
    };

    assert_eq!(page.submit(&site.gateway, &site.ctx).await, Some(Route::Admin));

    assert!(site.ctx.is_authenticated());
    let stored = site.storage.get(TOKEN_KEY).unwrap();
    assert_eq!(stored, site.ctx.token());
    assert!(site.ctx.check_session(&site.gateway).await);
}

#[rstest]
#[test(tokio::test)]
async fn test_login_rejections(site: Site) {
    site.auth.add_account("admin@majin.it", "secret").await;

    let mut page = LoginPage {
        email: "admin-at-majin".into(),
        password: "secret".into(),
    };
    assert_eq!(page.submit(&site.gateway, &site.ctx).await, None);

    page.email = "admin@majin.it".into();
    page.password = "wrong".into();
    assert_eq!(page.submit(&site.gateway, &site.ctx).await, None);

    assert_eq!(
        site.ctx.notifier.messages(),
        vec!["invalidEmail".to_string(), LOGIN_ERROR.to_string()]
    );
    assert_eq!(site.ctx.auth().error, Some(LOGIN_ERROR));
    assert_eq!(site.storage.get(TOKEN_KEY).unwrap(), None);
}
