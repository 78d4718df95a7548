use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use futures_channel::oneshot;
use leptos::*;
use slotmap::{new_key_type, SlotMap};

use crate::{
    util::{execute_with_cancellation, spawn},
    NetworkAction, NetworkExecutor, NetworkOptions, NetworkValue, RequestState, ResponseCache,
};

new_key_type! {
    /// Handle for a state listener registered with [`NetworkQuery::subscribe`].
    pub struct ListenerKey;
}

type Listeners<V> = Rc<RefCell<SlotMap<ListenerKey, Box<dyn Fn(&RequestState<V>)>>>>;

// The in-flight call. Dropping `abort` also aborts the call.
struct PendingCall {
    id: u64,
    abort: oneshot::Sender<()>,
}

/// One request instance: its options, state, cache and in-flight call.
///
/// This is what [`use_network`](crate::use_network()) drives. It can also be driven directly,
/// by awaiting [`fetch`](Self::fetch).
pub struct NetworkQuery<V: 'static> {
    options: RwSignal<NetworkOptions>,
    state: RwSignal<RequestState<V>>,
    cache: ResponseCache<V>,
    executor: NetworkExecutor,

    // Cancellation
    current_request: Rc<RefCell<Option<PendingCall>>>,
    executions: Rc<Cell<u64>>,

    // Synchronization
    listeners: Listeners<V>,
}

impl<V: 'static> Clone for NetworkQuery<V> {
    fn clone(&self) -> Self {
        Self {
            options: self.options,
            state: self.state,
            cache: self.cache.clone(),
            executor: self.executor.clone(),
            current_request: self.current_request.clone(),
            executions: self.executions.clone(),
            listeners: self.listeners.clone(),
        }
    }
}

impl<V: 'static> std::fmt::Debug for NetworkQuery<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetworkQuery")
            .field("query_key", &self.options.with_untracked(|o| o.query_key.clone()))
            .field("status", &self.state.with_untracked(|s| s.status))
            .field("pending", &self.current_request.borrow().is_some())
            .finish()
    }
}

impl<V> NetworkQuery<V>
where
    V: NetworkValue + 'static,
{
    /// Creates an idle query with an empty cache.
    pub fn new(options: NetworkOptions, executor: NetworkExecutor) -> Self {
        Self::with_cache(options, executor, ResponseCache::new())
    }

    /// Creates an idle query that reads and fills `cache`.
    pub fn with_cache(
        options: NetworkOptions,
        executor: NetworkExecutor,
        cache: ResponseCache<V>,
    ) -> Self {
        Self {
            options: RwSignal::new(options),
            state: RwSignal::new(RequestState::default()),
            cache,
            executor,
            current_request: Rc::new(RefCell::new(None)),
            executions: Rc::new(Cell::new(0)),
            listeners: Rc::new(RefCell::new(SlotMap::with_key())),
        }
    }

    /// Reactive state.
    pub fn state(&self) -> Signal<RequestState<V>> {
        self.state.into()
    }

    /// Current state, without tracking.
    pub fn get_state(&self) -> RequestState<V> {
        self.state.get_untracked()
    }

    /// Current options, without tracking.
    pub fn get_options(&self) -> NetworkOptions {
        self.options.get_untracked()
    }

    /// The response cache of this query.
    pub fn cache(&self) -> &ResponseCache<V> {
        &self.cache
    }

    /// Replaces the options. Returns true if the query key changed.
    ///
    /// Nothing is fetched here; the caller decides whether a new key warrants a request.
    pub fn set_options(&self, options: NetworkOptions) -> bool {
        let key_changed = self
            .options
            .with_untracked(|current| current.query_key != options.query_key);
        self.options.set(options);
        key_changed
    }

    /// Registers a listener called with every new state.
    pub fn subscribe(&self, listener: impl Fn(&RequestState<V>) + 'static) -> ListenerKey {
        self.listeners
            .try_borrow_mut()
            .expect("subscribe borrow_mut")
            .insert(Box::new(listener))
    }

    /// Removes a listener. Returns false if it was not registered.
    pub fn unsubscribe(&self, key: ListenerKey) -> bool {
        self.listeners
            .try_borrow_mut()
            .expect("unsubscribe borrow_mut")
            .remove(key)
            .is_some()
    }

    /// Applies a transition and notifies listeners.
    pub(crate) fn dispatch(&self, action: NetworkAction<V>) {
        self.state
            .update(|state| *state = std::mem::take(state).reduce(action));

        let listeners = self.listeners.try_borrow().expect("dispatch borrow");
        self.state.with_untracked(|state| {
            for listener in listeners.values() {
                listener(state);
            }
        });
    }

    /// Runs one request cycle.
    ///
    /// Does nothing while a call is pending. A cached payload for the current key settles
    /// immediately as a success without a call. Otherwise the state moves to loading and
    /// settles with the outcome of the call.
    pub async fn fetch(&self) {
        if self.is_pending() {
            return;
        }

        let options = self.get_options();

        if let Some(data) = self.cache.get(&options.query_key) {
            self.dispatch(NetworkAction::Success(data));
            return;
        }

        let Some((id, cancellation)) = self.new_execution() else {
            return;
        };

        self.dispatch(NetworkAction::Loading);

        let result = {
            let call = std::pin::pin!(self.executor.execute::<V>(&options));
            execute_with_cancellation(call, cancellation).await
        };

        // A call that settled after being aborted no longer owns the state.
        let outcome = match result {
            Ok(outcome) if self.finalize_execution(id) => outcome,
            _ => {
                logging::debug_warn!("Request {:?} was aborted.", &options.query_key);
                return;
            }
        };

        match outcome {
            Ok(data) => {
                self.cache.set(options.query_key, data.clone());
                self.dispatch(NetworkAction::Success(data));
            }
            Err(error) => {
                self.dispatch(NetworkAction::Error(error));
            }
        }
    }

    /// Spawns a request cycle unless a call is already in flight.
    pub fn refetch(&self) {
        if self.state.with_untracked(|state| state.is_fetching) {
            return;
        }
        self.execute();
    }

    pub(crate) fn execute(&self) {
        let query = self.clone();
        spawn(async move { query.fetch().await });
    }

    /// True while a call is in flight.
    pub fn is_pending(&self) -> bool {
        self.current_request.borrow().is_some()
    }

    // Only one call may be in flight at a time.
    fn new_execution(&self) -> Option<(u64, oneshot::Receiver<()>)> {
        let mut current_request = self.current_request.borrow_mut();
        if current_request.is_some() {
            return None;
        }
        let id = self.executions.get() + 1;
        self.executions.set(id);
        let (abort, receiver) = oneshot::channel();
        *current_request = Some(PendingCall { id, abort });
        Some((id, receiver))
    }

    // Releases the pending slot. Returns false if `id` no longer owns it.
    fn finalize_execution(&self, id: u64) -> bool {
        let mut current_request = self.current_request.borrow_mut();
        if current_request.as_ref().is_some_and(|pending| pending.id == id) {
            *current_request = None;
            true
        } else {
            false
        }
    }

    /// Aborts the in-flight call without a state transition.
    pub(crate) fn cancel(&self) -> bool {
        let pending = self.current_request.borrow_mut().take();
        match pending {
            Some(pending) => {
                let cancellation = pending.abort.send(());
                if cancellation.is_err() {
                    logging::error!("Failed to cancel request {}", pending.id);
                }
                cancellation.is_ok()
            }
            None => false,
        }
    }
}
