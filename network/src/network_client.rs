use std::rc::Rc;

use leptos::*;

use crate::{
    transport::{ReqwestTransport, Transport},
    NetworkConfig, NetworkError, NetworkExecutor, NetworkOptions, NetworkValue,
};

/// Provides a Network Client to the current scope, sending requests with [`reqwest`].
pub fn provide_network_client(config: NetworkConfig) {
    provide_network_client_with_transport(config, ReqwestTransport::new());
}

/// Provides a Network Client to the current scope with a custom transport.
pub fn provide_network_client_with_transport(
    config: NetworkConfig,
    transport: impl Transport + 'static,
) {
    provide_context(NetworkClient::new(config, Rc::new(transport)));
}

/// Retrieves the Network Client from the current scope.
pub fn use_network_client() -> NetworkClient {
    use_context::<NetworkClient>().expect("Network Client Missing.")
}

/// Holds the configuration every request in the app is resolved against.
///
/// Provide it once at the root with [`provide_network_client`].
#[derive(Clone, Debug)]
pub struct NetworkClient {
    executor: NetworkExecutor,
}

impl NetworkClient {
    /// Creates a new Network Client.
    pub fn new(config: NetworkConfig, transport: Rc<dyn Transport>) -> Self {
        Self {
            executor: NetworkExecutor::new(config, transport),
        }
    }

    /// The executor shared by every query under this client.
    pub fn executor(&self) -> NetworkExecutor {
        self.executor.clone()
    }

    /// The client configuration.
    pub fn config(&self) -> &NetworkConfig {
        self.executor.config()
    }

    /// Sends a single request outside of any query.
    /// Nothing is cached and no state is tracked.
    pub async fn fetch<V>(&self, options: &NetworkOptions) -> Result<V, NetworkError>
    where
        V: NetworkValue,
    {
        self.executor.execute(options).await
    }
}
