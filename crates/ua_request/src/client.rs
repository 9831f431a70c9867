use std::sync::{
    Arc,
    LazyLock,
};

use parking_lot::RwLock;
use reqwest::{
    Body,
    Method,
    Request,
    Response,
    Url,
};

use crate::error::Error;
use crate::transport::{
    Transport,
    decorated_transport,
    original_client,
};
use crate::user_agent::set_user_agent;

/// Thin client over a [`Transport`]. The ambient default is one of
/// these; components that can take injection should hold their own.
#[derive(Clone)]
pub struct HttpClient {
    transport: Arc<dyn Transport>,
}

impl HttpClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Executes a prebuilt request through this client's transport. The
    /// response and error are whatever the transport returns.
    pub async fn execute(&self, request: Request) -> Result<Response, reqwest::Error> {
        self.transport.round_trip(request).await
    }

    pub async fn get(&self, url: &str) -> Result<Response, Error> {
        let request = new_request(Method::GET, url, None)?;
        Ok(self.execute(request).await?)
    }
}

static DECORATED_CLIENT: LazyLock<Arc<HttpClient>> = LazyLock::new(|| Arc::new(HttpClient::new(decorated_transport())));

static DEFAULT_CLIENT: LazyLock<RwLock<Arc<HttpClient>>> = LazyLock::new(|| {
    let transport: Arc<dyn Transport> = Arc::new(original_client().clone());
    RwLock::new(Arc::new(HttpClient::new(transport)))
});

/// The process-wide decorated client instance.
pub fn decorated_client() -> Arc<HttpClient> {
    DECORATED_CLIENT.clone()
}

/// The ambient default client, used by [`get`] and by any code that does
/// not choose a client explicitly.
pub fn default_client() -> Arc<HttpClient> {
    DEFAULT_CLIENT.read().clone()
}

pub(crate) fn install_decorated_default() {
    *DEFAULT_CLIENT.write() = DECORATED_CLIENT.clone();
}

/// Builds a request with the `User-Agent` header already set. Works
/// whether or not [`replace_defaults`](crate::replace_defaults) was ever
/// called; URL parse errors are returned as-is.
pub fn new_request(method: Method, url: &str, body: Option<Body>) -> Result<Request, Error> {
    let url = Url::parse(url)?;
    let mut request = Request::new(method, url);
    if let Some(body) = body {
        *request.body_mut() = Some(body);
    }
    set_user_agent(&mut request);
    Ok(request)
}

/// A replacement for a bare GET with the decorated user agent, executed
/// through the ambient default client. Use this when another crate may
/// have replaced the ambient default with an undecorated one.
pub async fn get(url: &str) -> Result<Response, Error> {
    let request = new_request(Method::GET, url, None)?;
    Ok(default_client().execute(request).await?)
}
