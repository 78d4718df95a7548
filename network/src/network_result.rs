use crate::{NetworkError, NetworkStatus, RequestState};
use leptos::*;

/// Reactive request result.
#[derive(Clone)]
pub struct NetworkResult<V, R>
where
    V: 'static,
    R: RefetchFn,
{
    /// Data of the last success. None until a request succeeds.
    pub data: Signal<Option<V>>,
    /// Failure of the last cycle, if it failed.
    pub error: Signal<Option<NetworkError>>,
    /// Current status.
    pub status: Signal<NetworkStatus>,
    /// True while a call is in flight.
    pub is_loading: Signal<bool>,
    /// True while a call is in flight.
    pub is_fetching: Signal<bool>,
    /// The full state.
    pub state: Signal<RequestState<V>>,

    /// Run the request again. Does nothing while a call is in flight.
    pub refetch: R,
}

impl<V, R> NetworkResult<V, R>
where
    V: Clone + 'static,
    R: RefetchFn,
{
    pub(crate) fn from_state(state: Signal<RequestState<V>>, refetch: R) -> Self {
        NetworkResult {
            data: Signal::derive(move || state.with(|state| state.data.clone())),
            error: Signal::derive(move || state.with(|state| state.error)),
            status: Signal::derive(move || state.with(|state| state.status)),
            is_loading: Signal::derive(move || state.with(|state| state.is_loading)),
            is_fetching: Signal::derive(move || state.with(|state| state.is_fetching)),
            state,
            refetch,
        }
    }
}

/// Convenience Trait alias for a Network Result's refetch function.
pub trait RefetchFn: Fn() + Clone {}
impl<R: Fn() + Clone> RefetchFn for R {}
