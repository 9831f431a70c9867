//! Decorates outgoing HTTP requests with a user agent computed from a
//! service name plus build metadata (revision, build datetime, rustc
//! version), and can install itself as the process-wide default transport
//! and client so requests issued by third-party code carry it too.
//!
//! Call [`init_service_name`] once during startup; issue requests through
//! [`get`]/[`new_request`], the [`default_client`], or an explicitly held
//! [`HttpClient`] — all paths read the same user agent string.

mod client;
mod error;
mod transport;
mod user_agent;

pub use client::{
    HttpClient,
    decorated_client,
    default_client,
    get,
    new_request,
};
pub use error::Error;
pub use reqwest;
pub use reqwest::{
    Body,
    Method,
    Request,
    Response,
};
pub use transport::{
    Transport,
    UserAgentTransport,
    decorated_transport,
    default_transport,
    original_client,
    replace_defaults,
};
pub use user_agent::{
    build,
    init_service_name,
    service_name,
    set_user_agent,
    user_agent,
};
