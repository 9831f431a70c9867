use std::sync::{
    Arc,
    LazyLock,
};

use async_trait::async_trait;
use http::header::USER_AGENT;
use http::{
    HeaderMap,
    HeaderValue,
};
use parking_lot::RwLock;
use reqwest::{
    Client,
    Request,
    Response,
};
use tracing::warn;

use crate::user_agent::user_agent;

/// The capability that performs the actual send of an HTTP request. A
/// pristine [`reqwest::Client`] is the base implementation; decorators
/// wrap one and delegate to it.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn round_trip(&self, request: Request) -> Result<Response, reqwest::Error>;
}

#[async_trait]
impl Transport for Client {
    async fn round_trip(&self, request: Request) -> Result<Response, reqwest::Error> {
        self.execute(request).await
    }
}

/// Transport decorator that stamps its header set onto every outgoing
/// request, overwriting whatever was there, then delegates.
///
/// Delegation always goes to the client captured at construction, never
/// through the ambient default slot, so installing this transport as the
/// ambient default cannot recurse into itself.
pub struct UserAgentTransport {
    headers: Arc<RwLock<HeaderMap>>,
    original: Client,
}

#[async_trait]
impl Transport for UserAgentTransport {
    async fn round_trip(&self, mut request: Request) -> Result<Response, reqwest::Error> {
        {
            let headers = self.headers.read();
            for (name, value) in headers.iter() {
                request.headers_mut().insert(name.clone(), value.clone());
            }
        }
        self.original.round_trip(request).await
    }
}

static ORIGINAL_CLIENT: LazyLock<Client> = LazyLock::new(Client::new);

static DEFAULT_HEADERS: LazyLock<Arc<RwLock<HeaderMap>>> = LazyLock::new(|| {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&user_agent()) {
        headers.insert(USER_AGENT, value);
    }
    Arc::new(RwLock::new(headers))
});

static DECORATED_TRANSPORT: LazyLock<Arc<UserAgentTransport>> = LazyLock::new(|| {
    Arc::new(UserAgentTransport {
        headers: DEFAULT_HEADERS.clone(),
        original: ORIGINAL_CLIENT.clone(),
    })
});

static DEFAULT_TRANSPORT: LazyLock<RwLock<Arc<dyn Transport>>> =
    LazyLock::new(|| RwLock::new(Arc::new(ORIGINAL_CLIENT.clone()) as Arc<dyn Transport>));

/// The pre-replacement client, for callers that want to bypass
/// decoration. Cloning it shares the underlying connection pool.
pub fn original_client() -> &'static Client {
    &ORIGINAL_CLIENT
}

/// The process-wide decorated transport instance.
pub fn decorated_transport() -> Arc<UserAgentTransport> {
    DECORATED_TRANSPORT.clone()
}

/// The ambient default transport: the pristine client until
/// [`replace_defaults`] swaps in the decorated one.
pub fn default_transport() -> Arc<dyn Transport> {
    DEFAULT_TRANSPORT.read().clone()
}

/// Installs the decorated transport and client as the ambient defaults,
/// refreshing the shared `User-Agent` entry first. Idempotent; meant to
/// run during quiescent startup, normally via
/// [`init_service_name`](crate::init_service_name).
pub fn replace_defaults() {
    match HeaderValue::from_str(&user_agent()) {
        Ok(value) => {
            DEFAULT_HEADERS.write().insert(USER_AGENT, value);
        },
        Err(err) => warn!(%err, "user agent is not a valid header value"),
    }
    let transport: Arc<dyn Transport> = decorated_transport();
    *DEFAULT_TRANSPORT.write() = transport;
    crate::client::install_decorated_default();
}
