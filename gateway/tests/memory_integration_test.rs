use gateway::{CompensationPolicy, Gateway, MemoryAuth, MemoryObjectStore, MemoryStore, MutationOutcome};
use pretty_assertions::assert_eq;
use serde_json::json;
use shared::{Deck, LabelDraft};
use test_log::test;

fn gateway(store: &MemoryStore, objects: &MemoryObjectStore) -> Gateway {
    Gateway::in_memory(store, objects, &MemoryAuth::new(), CompensationPolicy::default())
}

async fn seed_players(store: &MemoryStore) {
    store
        .seed(
            "players",
            vec![
                json!({"id": "p1", "name": "Anna", "surname": "Rossi"}),
                json!({"id": "p2", "name": "Mark", "surname": "Bianchi"}),
                json!({"id": "p3", "name": "Anton", "surname": "Verdi"}),
            ],
        )
        .await;
}

#[test(tokio::test)]
async fn test_filtered_page_matches_substring_any_case() {
    let store = MemoryStore::new();
    seed_players(&store).await;
    let gateway = gateway(&store, &MemoryObjectStore::default());

    let envelope = gateway.players.get_all_with_filters(0, 4, "an").await;

    assert!(envelope.is_success());
    assert_eq!(envelope.total_records, Some(2));
    let names: Vec<String> = envelope.data.unwrap().into_iter().map(|p| p.name).collect();
    assert_eq!(names, vec!["Anna", "Anton"]);
}

#[test(tokio::test)]
async fn test_page_past_the_end_is_empty_with_total() {
    let store = MemoryStore::new();
    seed_players(&store).await;
    let gateway = gateway(&store, &MemoryObjectStore::default());

    let envelope = gateway.players.get_all_with_filters(5, 9, "").await;

    assert!(envelope.is_success());
    assert_eq!(envelope.data, Some(vec![]));
    assert_eq!(envelope.total_records, Some(3));
}

#[test(tokio::test)]
async fn test_created_deck_can_be_read_back() {
    let store = MemoryStore::new();
    let gateway = gateway(&store, &MemoryObjectStore::default());

    let id = gateway
        .decks
        .create(&LabelDraft::new("Kashtira"))
        .await
        .into_data()
        .expect("create should return the new id");

    let deck = gateway.decks.get(&id).await.into_data().unwrap();
    assert_eq!(deck, Deck { id, label: "Kashtira".into() });
}

#[test(tokio::test)]
async fn test_player_deleted_even_when_image_removal_fails() {
    let store = MemoryStore::new();
    let objects = MemoryObjectStore::default();
    seed_players(&store).await;
    let gateway = gateway(&store, &objects);
    objects.fail_next_removals(100);

    let outcome = gateway.mutations.delete_with_image(&gateway.players, "p1").await;
    assert_eq!(outcome, MutationOutcome::OrphanedImage { id: "p1".into() });

    let remaining = gateway.players.get_all().await.into_data().unwrap();
    assert!(remaining.iter().all(|p| p.id != "p1"));
    assert_eq!(remaining.len(), 2);
}

#[test(tokio::test)]
async fn test_deleting_missing_row_succeeds() {
    let store = MemoryStore::new();
    let gateway = gateway(&store, &MemoryObjectStore::default());

    assert!(gateway.decks.delete("never-existed").await.is_success());
}

#[test(tokio::test)]
async fn test_login_round_trip() {
    let auth = MemoryAuth::new();
    auth.add_account("admin@majin.it", "hunter2").await;
    let gateway = Gateway::in_memory(
        &MemoryStore::new(),
        &MemoryObjectStore::default(),
        &auth,
        CompensationPolicy::default(),
    );

    assert!(!gateway.auth.login("admin@majin.it", "wrong").await.is_success());

    let token = gateway.auth.login("admin@majin.it", "hunter2").await.into_data().unwrap();
    let user = gateway.auth.check_session(&token).await.into_data().unwrap();
    assert_eq!(user.email.as_deref(), Some("admin@majin.it"));

    assert!(gateway.auth.logout(&token).await.is_success());
    assert!(!gateway.auth.check_session(&token).await.is_success());
}

#[test(tokio::test)]
async fn test_rows_with_picker_dates_are_readable() {
    let store = MemoryStore::new();
    store
        .seed(
            "players",
            vec![json!({
                "id": "p1",
                "name": "Anna",
                "surname": "Rossi",
                "birthDate": {"calendar": {"identifier": "gregory"}, "era": "AD", "year": 1999, "month": 4, "day": 12}
            })],
        )
        .await;
    store
        .seed(
            "tops",
            vec![
                json!({
                    "id": "t1",
                    "date": {"calendar": {"identifier": "gregory"}, "era": "AD", "year": 2024, "month": 3, "day": 2},
                    "rating": "Top 8",
                    "deck": {"id": "d1", "label": "Kashtira"},
                    "tournament": {"id": "r1", "label": "Regional"},
                    "location": "Milano",
                    "playerId": "p1"
                }),
                json!({
                    "id": "t2",
                    "date": "2023-11-11",
                    "rating": "1",
                    "deck": {"id": "d1", "label": "Kashtira"},
                    "tournament": {"id": "r1", "label": "Regional"},
                    "location": "Torino",
                    "playerId": "p1"
                }),
            ],
        )
        .await;
    let gateway = gateway(&store, &MemoryObjectStore::default());

    let players = gateway.players.get_all().await.into_data().unwrap();
    assert_eq!(players[0].birth_date, chrono::NaiveDate::from_ymd_opt(1999, 4, 12));

    let years: Vec<i32> = gateway
        .tops
        .get_all_by_player("p1")
        .await
        .into_data()
        .unwrap()
        .iter()
        .map(|t| t.year())
        .collect();
    assert_eq!(years, vec![2024, 2023]);
}
