use crate::network_result::NetworkResult;
use crate::{use_network_client, NetworkOptions, NetworkQuery, NetworkValue, RefetchFn};
use leptos::*;

/// Issues a request, tracks its status and caches successful responses by query key.
///
/// Details:
/// - The request is sent on first use and again whenever `query_key` changes.
/// - Other option changes are picked up by the next request.
/// - A key that already succeeded in this instance is served from its cache without a request.
/// - `refetch` does nothing while a call is in flight.
/// - Failures never panic or propagate; they are reported through `status` and `error`.
///
/// Requires a client from [`provide_network_client`](crate::provide_network_client()).
///
/// Example
/// ```
/// use leptos::*;
/// use leptos_network::*;
/// use serde::*;
///
/// // Data type.
/// #[derive(Debug, Clone, Deserialize)]
/// struct UserData {
///     name: String,
/// }
///
/// // Request for a User.
/// fn use_user(id: impl Fn() -> u32 + 'static) -> NetworkResult<UserData, impl RefetchFn> {
///     use_network(move || {
///         let id = id();
///         NetworkOptions::new(format!("users/{id}"), format!("user-{id}"))
///             .add_header("accept", "application/json")
///     })
/// }
///
/// ```
///
pub fn use_network<V>(
    options: impl Fn() -> NetworkOptions + 'static,
) -> NetworkResult<V, impl RefetchFn>
where
    V: NetworkValue + 'static,
{
    let executor = use_network_client().executor();
    let query = NetworkQuery::<V>::new(untrack(&options), executor);

    // Fetch on mount and whenever the query key changes.
    create_isomorphic_effect({
        let query = query.clone();
        move |mounted: Option<()>| {
            let key_changed = query.set_options(options());
            if mounted.is_none() || key_changed {
                // The previous key's call no longer matters.
                query.cancel();
                query.execute();
            }
        }
    });

    on_cleanup({
        let query = query.clone();
        move || {
            query.cancel();
        }
    });

    let state = query.state();
    NetworkResult::from_state(state, move || query.refetch())
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc, time::Duration};

    use serde::Deserialize;

    use super::*;
    use crate::{
        provide_network_client_with_transport, transport::mock::MockTransport, NetworkConfig,
        NetworkError, NetworkStatus,
    };

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    struct Todo {
        id: u32,
        title: String,
    }

    fn provide(mock: &Rc<MockTransport>) {
        provide_network_client_with_transport(
            NetworkConfig::new("https://api.example.com"),
            mock.clone(),
        );
    }

    async fn settle(status: Signal<NetworkStatus>) {
        for _ in 0..100 {
            let current = status.get_untracked();
            if current != NetworkStatus::Idle && current != NetworkStatus::Loading {
                return;
            }
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    }

    #[tokio::test]
    async fn fetches_on_mount() {
        let _ = create_runtime();
        let mock = Rc::new(MockTransport::new());
        mock.respond(200, r#"{"id":1,"title":"delectus aut autem"}"#);
        provide(&mock);

        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let result = use_network::<Todo>(|| NetworkOptions::new("todos/1", "test"));
                settle(result.status).await;

                assert_eq!(result.status.get_untracked(), NetworkStatus::Success);
                assert_eq!(
                    result.data.get_untracked(),
                    Some(Todo {
                        id: 1,
                        title: "delectus aut autem".to_string()
                    })
                );
                assert_eq!(result.error.get_untracked(), None);
                assert!(!result.is_loading.get_untracked());
                assert!(!result.is_fetching.get_untracked());
            })
            .await;

        assert_eq!(mock.calls(), 1);
        assert_eq!(mock.requests()[0].url, "https://api.example.com/todos/1");
    }

    #[tokio::test]
    async fn reports_failures_through_state() {
        let _ = create_runtime();
        let mock = Rc::new(MockTransport::new());
        mock.respond(500, "");
        provide(&mock);

        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let result = use_network::<Todo>(|| NetworkOptions::new("todos/1", "test"));
                settle(result.status).await;

                assert_eq!(result.status.get_untracked(), NetworkStatus::Error);
                assert_eq!(result.error.get_untracked(), Some(NetworkError::Generic));
                assert_eq!(result.data.get_untracked(), None);
            })
            .await;
    }

    #[tokio::test]
    async fn key_change_fetches_and_returning_key_hits_cache() {
        let _ = create_runtime();
        let mock = Rc::new(MockTransport::new());
        mock.respond(200, r#"{"id":1,"title":"one"}"#)
            .respond(200, r#"{"id":2,"title":"two"}"#);
        provide(&mock);

        let id = RwSignal::new(1_u32);

        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let result = use_network::<Todo>(move || {
                    let id = id.get();
                    NetworkOptions::new(format!("todos/{id}"), format!("todo-{id}"))
                });
                settle(result.status).await;
                assert_eq!(result.data.get_untracked().map(|t| t.id), Some(1));

                id.set(2);
                assert_eq!(result.status.get_untracked(), NetworkStatus::Success);
                for _ in 0..100 {
                    if result.data.get_untracked().map(|t| t.id) == Some(2) {
                        break;
                    }
                    tokio::time::sleep(Duration::from_millis(1)).await;
                }
                assert_eq!(result.data.get_untracked().map(|t| t.id), Some(2));

                id.set(1);
                for _ in 0..100 {
                    if result.data.get_untracked().map(|t| t.id) == Some(1) {
                        break;
                    }
                    tokio::time::sleep(Duration::from_millis(1)).await;
                }
                assert_eq!(result.data.get_untracked().map(|t| t.id), Some(1));
                assert_eq!(result.status.get_untracked(), NetworkStatus::Success);
            })
            .await;

        assert_eq!(mock.calls(), 2);
    }

    #[tokio::test]
    async fn superseded_key_never_reaches_state_or_cache() {
        let _ = create_runtime();
        let mock = Rc::new(MockTransport::new());
        mock.respond_after(Duration::from_millis(10), 200, r#"{"id":1,"title":"one"}"#)
            .respond_after(Duration::from_millis(20), 200, r#"{"id":2,"title":"two"}"#)
            .respond(200, r#"{"id":1,"title":"one again"}"#);
        provide(&mock);

        let id = RwSignal::new(1_u32);

        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let result = use_network::<Todo>(move || {
                    let id = id.get();
                    NetworkOptions::new(format!("todos/{id}"), format!("todo-{id}"))
                });

                let seen = Rc::new(RefCell::new(Vec::new()));
                create_isomorphic_effect({
                    let seen = seen.clone();
                    move |_| seen.borrow_mut().push(result.data.get().map(|t| t.id))
                });

                for _ in 0..100 {
                    if result.is_fetching.get_untracked() {
                        break;
                    }
                    tokio::task::yield_now().await;
                }
                assert!(result.is_fetching.get_untracked());

                // Let the first response become ready before switching keys.
                std::thread::sleep(Duration::from_millis(30));
                id.set(2);

                for _ in 0..100 {
                    if result.data.get_untracked().is_some() {
                        break;
                    }
                    tokio::time::sleep(Duration::from_millis(1)).await;
                }
                assert_eq!(result.data.get_untracked().map(|t| t.id), Some(2));
                assert!(!seen.borrow().contains(&Some(1)));

                // The first key was never cached, so it is requested again.
                id.set(1);
                for _ in 0..100 {
                    if result.data.get_untracked().map(|t| t.id) == Some(1) {
                        break;
                    }
                    tokio::time::sleep(Duration::from_millis(1)).await;
                }
                assert_eq!(
                    result.data.get_untracked().map(|t| t.title),
                    Some("one again".to_string())
                );
            })
            .await;

        assert_eq!(mock.calls(), 3);
    }

    #[tokio::test]
    async fn refetch_while_loading_sends_once() {
        let _ = create_runtime();
        let mock = Rc::new(MockTransport::new());
        mock.respond_after(Duration::from_millis(20), 200, r#"{"id":1,"title":"x"}"#);
        provide(&mock);

        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let result = use_network::<Todo>(|| NetworkOptions::new("todos/1", "test"));
                for _ in 0..100 {
                    if result.is_fetching.get_untracked() {
                        break;
                    }
                    tokio::task::yield_now().await;
                }
                assert!(result.is_fetching.get_untracked());

                (result.refetch)();
                (result.refetch)();
                settle(result.status).await;

                assert_eq!(result.status.get_untracked(), NetworkStatus::Success);
            })
            .await;

        assert_eq!(mock.calls(), 1);
    }
}
