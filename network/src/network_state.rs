use crate::NetworkError;

/// The lifecycle status of a request.
///
/// A request starts [`Idle`](NetworkStatus::Idle), moves to [`Loading`](NetworkStatus::Loading)
/// when a call is issued, and settles in either [`Success`](NetworkStatus::Success) or
/// [`Error`](NetworkStatus::Error). A settled request only leaves its state through a new cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NetworkStatus {
    /// Nothing has been requested yet.
    #[default]
    Idle,
    /// A call is in flight.
    Loading,
    /// The last cycle produced data.
    Success,
    /// The last cycle failed.
    Error,
}

impl NetworkStatus {
    /// Lowercase name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkStatus::Idle => "idle",
            NetworkStatus::Loading => "loading",
            NetworkStatus::Success => "success",
            NetworkStatus::Error => "error",
        }
    }
}

impl std::fmt::Display for NetworkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transition for [`RequestState::reduce`].
#[derive(Clone, PartialEq, Eq)]
pub enum NetworkAction<V> {
    /// Reset the status to idle.
    Idle,
    /// A call was issued.
    Loading,
    /// A call (or the cache) produced data.
    Success(V),
    /// A call failed.
    Error(NetworkError),
}

impl<V> std::fmt::Debug for NetworkAction<V>
where
    V: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Loading => write!(f, "Loading"),
            Self::Success(arg0) => f.debug_tuple("Success").field(arg0).finish(),
            Self::Error(arg0) => f.debug_tuple("Error").field(arg0).finish(),
        }
    }
}

/// Observable state of a request.
///
/// `is_loading` and `is_fetching` are both true exactly while the status is
/// [`Loading`](NetworkStatus::Loading). A failure keeps the data of an earlier success.
#[derive(Clone, PartialEq, Eq)]
pub struct RequestState<V> {
    /// Current status.
    pub status: NetworkStatus,
    /// Data of the last success, if any.
    pub data: Option<V>,
    /// Failure of the last cycle, if it failed.
    pub error: Option<NetworkError>,
    /// True while the status is loading.
    pub is_loading: bool,
    /// True while the status is loading.
    pub is_fetching: bool,
}

impl<V> Default for RequestState<V> {
    fn default() -> Self {
        Self {
            status: NetworkStatus::Idle,
            data: None,
            error: None,
            is_loading: false,
            is_fetching: false,
        }
    }
}

impl<V> RequestState<V> {
    /// Applies a transition and returns the next state.
    pub fn reduce(self, action: NetworkAction<V>) -> Self {
        match action {
            NetworkAction::Idle => RequestState {
                status: NetworkStatus::Idle,
                ..self
            },
            NetworkAction::Loading => RequestState {
                status: NetworkStatus::Loading,
                error: None,
                is_loading: true,
                is_fetching: true,
                ..self
            },
            NetworkAction::Success(data) => RequestState {
                status: NetworkStatus::Success,
                data: Some(data),
                error: None,
                is_loading: false,
                is_fetching: false,
            },
            NetworkAction::Error(error) => RequestState {
                status: NetworkStatus::Error,
                error: Some(error),
                is_loading: false,
                is_fetching: false,
                ..self
            },
        }
    }

    /// Returns the data of the last success, if present.
    pub fn data(&self) -> Option<&V> {
        self.data.as_ref()
    }

    /// Returns the failure of the last cycle, if present.
    pub fn error(&self) -> Option<NetworkError> {
        self.error
    }

    /// True if nothing has been requested yet.
    pub fn is_idle(&self) -> bool {
        self.status == NetworkStatus::Idle
    }

    /// True if the last cycle produced data.
    pub fn is_success(&self) -> bool {
        self.status == NetworkStatus::Success
    }

    /// True if the last cycle failed.
    pub fn is_error(&self) -> bool {
        self.status == NetworkStatus::Error
    }
}

impl<V> std::fmt::Debug for RequestState<V>
where
    V: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestState")
            .field("status", &self.status)
            .field("data", &self.data)
            .field("error", &self.error)
            .field("is_loading", &self.is_loading)
            .field("is_fetching", &self.is_fetching)
            .finish()
    }
}
