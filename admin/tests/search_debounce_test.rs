use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures::FutureExt;
use pretty_assertions::assert_eq;
use tokio::time::{sleep, Duration};

use admin::debounce::SearchCallback;
use admin::SearchInput;

fn counter() -> (Arc<AtomicUsize>, SearchCallback) {
    let calls = Arc::new(AtomicUsize::new(0));
    let callback: SearchCallback = {
        let calls = Arc::clone(&calls);
        Arc::new(move || {
            let calls = Arc::clone(&calls);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
            }
            .boxed()
        })
    };
    (calls, callback)
}

#[tokio::test(start_paused = true)]
async fn test_burst_of_keystrokes_runs_one_search() {
    let (calls, callback) = counter();
    let input = SearchInput::new("").with_search(callback);

    input.input("k");
    sleep(Duration::from_millis(200)).await;
    input.input("ka");
    sleep(Duration::from_millis(200)).await;
    input.input("kas");

    sleep(Duration::from_millis(999)).await;
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(input.value(), "kas");

    sleep(Duration::from_millis(1)).await;
    sleep(Duration::from_millis(5000)).await;
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(!input.is_loading());
}

#[tokio::test(start_paused = true)]
async fn test_spaced_keystrokes_each_search() {
    let (calls, callback) = counter();
    let input = SearchInput::new("").with_search(callback);

    input.input("a");
    sleep(Duration::from_millis(1500)).await;
    input.input("ab");
    sleep(Duration::from_millis(1500)).await;

    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn test_dropped_input_never_searches() {
    let (calls, callback) = counter();
    let input = SearchInput::new("").with_search(callback);

    input.input("a");
    drop(input);
    sleep(Duration::from_millis(3000)).await;

    assert_eq!(calls.load(Ordering::SeqCst), 0);
}
