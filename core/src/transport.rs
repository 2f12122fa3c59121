//! Executing `HttpRequest` values.
//!
//! The core never needs a transport to build or parse requests. This trait
//! exists for hosts that want the blocking conveniences (`CatalogClient::fetch_all`,
//! `ProductsScreen::refresh`, ...). A mobile host crossing the FFI boundary
//! runs requests itself and never touches this module.

use crate::error::NetworkError;
use crate::http::{HttpRequest, HttpResponse};

pub trait Transport {
    /// Run one request to completion. Non-2xx statuses come back as data;
    /// only failures to get any response at all are errors.
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, NetworkError>;
}

#[cfg(feature = "ureq")]
pub use self::blocking::UreqTransport;

#[cfg(feature = "ureq")]
mod blocking {
    use tracing::debug;

    use super::Transport;
    use crate::error::NetworkError;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    /// Blocking transport over `ureq`, with no timeout beyond ureq's own
    /// defaults and no retries.
    #[derive(Clone)]
    pub struct UreqTransport {
        agent: ureq::Agent,
    }

    impl Default for UreqTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    impl UreqTransport {
        pub fn new() -> Self {
            // Status interpretation belongs to `CatalogClient`, so 4xx/5xx
            // must come back as responses.
            let agent = ureq::Agent::config_builder()
                .http_status_as_error(false)
                .build()
                .new_agent();
            Self { agent }
        }
    }

    impl Transport for UreqTransport {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, NetworkError> {
            debug!(method = request.method.as_str(), url = %request.url, "sending request");
            let result = match request.method {
                HttpMethod::Get => {
                    let mut builder = self.agent.get(&request.url);
                    for (name, value) in &request.headers {
                        builder = builder.header(name.as_str(), value.as_str());
                    }
                    builder.call()
                }
                HttpMethod::Post => {
                    let mut builder = self.agent.post(&request.url);
                    for (name, value) in &request.headers {
                        builder = builder.header(name.as_str(), value.as_str());
                    }
                    match &request.body {
                        Some(body) => builder.send(body.as_bytes()),
                        None => builder.send_empty(),
                    }
                }
            };
            let mut response = result.map_err(NetworkError::transport)?;

            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value.to_str().ok().map(|v| (name.as_str().to_string(), v.to_string()))
                })
                .collect();
            let body = response
                .body_mut()
                .read_to_string()
                .map_err(NetworkError::transport)?;

            Ok(HttpResponse {
                status,
                headers,
                body,
            })
        }
    }
}
