use std::{pin::pin, rc::Rc};

use futures::future::Either;
use leptos::logging;

use crate::{
    transport::{NetworkRequest, Transport},
    util::sleep,
    NetworkConfig, NetworkError, NetworkOptions, NetworkValue,
};

/// Issues requests against the configured base URL, each bounded by a timeout.
#[derive(Clone)]
pub struct NetworkExecutor {
    config: Rc<NetworkConfig>,
    transport: Rc<dyn Transport>,
}

impl std::fmt::Debug for NetworkExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetworkExecutor")
            .field("config", &self.config)
            .field("transport", &"...")
            .finish()
    }
}

impl NetworkExecutor {
    /// Creates an executor over a shared transport.
    pub fn new(config: NetworkConfig, transport: Rc<dyn Transport>) -> Self {
        Self {
            config: Rc::new(config),
            transport,
        }
    }

    /// Creates an executor that owns its transport.
    pub fn with_transport(config: NetworkConfig, transport: impl Transport + 'static) -> Self {
        Self::new(config, Rc::new(transport))
    }

    /// The configuration requests are resolved against.
    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Resolves the options into a request.
    pub fn build_request(&self, options: &NetworkOptions) -> NetworkRequest {
        NetworkRequest {
            url: self.config.url_for(&options.path),
            method: options.method,
            headers: options.headers.clone(),
            body: options.body.clone(),
        }
    }

    /// Sends one request and decodes the JSON response.
    ///
    /// The call is abandoned with [`NetworkError::Timeout`] if the timeout elapses first.
    /// Non-ok responses, undecodable bodies and transport failures are [`NetworkError::Generic`].
    pub async fn execute<V>(&self, options: &NetworkOptions) -> Result<V, NetworkError>
    where
        V: NetworkValue,
    {
        let request = self.build_request(options);
        let url = request.url.clone();
        let timeout = options.timeout.unwrap_or(self.config.default_timeout);

        let response = {
            let call = pin!(self.transport.send(request));
            let timer = pin!(sleep(timeout));

            // Whichever loses is dropped here, so a settled call never leaves a timer behind.
            match futures::future::select(call, timer).await {
                Either::Left((response, _)) => response,
                Either::Right(_) => {
                    logging::warn!(
                        "Request to {} timed out after {}ms",
                        url,
                        timeout.as_millis()
                    );
                    return Err(NetworkError::Timeout);
                }
            }
        };

        let response = response.map_err(|error| {
            logging::error!("Request to {} failed: {}", url, error);
            NetworkError::Generic
        })?;

        if !response.is_ok() {
            logging::error!("Request to {} returned status {}", url, response.status);
            return Err(NetworkError::Generic);
        }

        serde_json::from_str::<V>(&response.body).map_err(|error| {
            logging::error!("Failed to decode response from {}: {}", url, error);
            NetworkError::Generic
        })
    }
}
