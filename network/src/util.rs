use std::{future::Future, time::Duration};

use futures::future::Either;
use futures_channel::oneshot;
use leptos::logging;

pub(crate) async fn sleep(duration: Duration) {
    use cfg_if::cfg_if;
    cfg_if! {
        if #[cfg(any(feature = "hydrate", feature = "csr"))] {
            gloo_timers::future::sleep(duration).await;
        } else if #[cfg(any(feature = "ssr", test))] {
            tokio::time::sleep(duration).await;
        } else {
            let _ = duration;
            logging::debug_warn!("You are missing a Cargo feature for leptos_network. Please enable one of 'ssr', 'hydrate', or 'csr'.");
            futures::future::pending::<()>().await;
        }
    }
}

pub(crate) fn spawn(fut: impl Future<Output = ()> + 'static) {
    use cfg_if::cfg_if;
    cfg_if! {
        if #[cfg(any(feature = "hydrate", feature = "csr"))] {
            leptos::spawn_local(fut);
        } else if #[cfg(any(feature = "ssr", test))] {
            tokio::task::spawn_local(fut);
        } else {
            leptos::spawn_local(fut);
        }
    }
}

/// The call was aborted through its pending call handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Aborted;

pub(crate) async fn execute_with_cancellation<V, Fu>(
    fut: Fu,
    cancellation: oneshot::Receiver<()>,
) -> Result<V, Aborted>
where
    Fu: Future<Output = V> + Unpin,
{
    match futures::future::select(fut, cancellation).await {
        Either::Left((result, _)) => Ok(result),
        Either::Right((cancelled, _)) => {
            if cancelled.is_err() {
                logging::debug_warn!("Request cancellation was incorrectly dropped.");
            }
            Err(Aborted)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn completes_when_not_cancelled() {
        let (_sender, receiver) = oneshot::channel::<()>();
        let result = execute_with_cancellation(Box::pin(async { 5 }), receiver).await;

        assert_eq!(result, Ok(5));
    }

    #[tokio::test]
    async fn aborts_on_signal() {
        let (sender, receiver) = oneshot::channel::<()>();
        let slow = Box::pin(async {
            sleep(Duration::from_secs(60)).await;
            5
        });
        let _ = sender.send(());

        assert_eq!(execute_with_cancellation(slow, receiver).await, Err(Aborted));
    }

    #[tokio::test]
    async fn aborts_when_handle_dropped() {
        let (sender, receiver) = oneshot::channel::<()>();
        let slow = Box::pin(async {
            sleep(Duration::from_secs(60)).await;
            5
        });
        drop(sender);

        assert_eq!(execute_with_cancellation(slow, receiver).await, Err(Aborted));
    }
}
