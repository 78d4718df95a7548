use async_trait::async_trait;

use crate::{NetworkMethod, TransportError};

/// A fully resolved request, ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkRequest {
    /// Absolute URL.
    pub url: String,
    /// Request method.
    pub method: NetworkMethod,
    /// Request headers, in order.
    pub headers: Vec<(String, String)>,
    /// Request body.
    pub body: Option<String>,
}

/// A received response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: String,
}

impl NetworkResponse {
    /// True for 2xx statuses.
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a single request and resolves with its response.
///
/// Dropping the returned future must abort the request.
#[async_trait(?Send)]
pub trait Transport {
    /// Sends `request`.
    async fn send(&self, request: NetworkRequest) -> Result<NetworkResponse, TransportError>;
}

#[async_trait(?Send)]
impl<T> Transport for std::rc::Rc<T>
where
    T: Transport + ?Sized,
{
    async fn send(&self, request: NetworkRequest) -> Result<NetworkResponse, TransportError> {
        (**self).send(request).await
    }
}

/// [`Transport`] backed by [`reqwest`].
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Transport with a default client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Transport over an existing client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait(?Send)]
impl Transport for ReqwestTransport {
    async fn send(&self, request: NetworkRequest) -> Result<NetworkResponse, TransportError> {
        let method = reqwest::Method::from_bytes(request.method.as_str().as_bytes())
            .map_err(|_| TransportError::InvalidMethod(request.method.to_string()))?;

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(NetworkResponse { status, body })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_statuses() {
        let response = |status| NetworkResponse {
            status,
            body: String::new(),
        };

        assert!(response(200).is_ok());
        assert!(response(204).is_ok());
        assert!(response(299).is_ok());
        assert!(!response(199).is_ok());
        assert!(!response(304).is_ok());
        assert!(!response(404).is_ok());
        assert!(!response(500).is_ok());
    }

    #[test]
    fn custom_methods_are_valid_tokens() {
        for method in [NetworkMethod::Update, NetworkMethod::Push, NetworkMethod::Patch] {
            assert!(reqwest::Method::from_bytes(method.as_str().as_bytes()).is_ok());
        }
    }
}
