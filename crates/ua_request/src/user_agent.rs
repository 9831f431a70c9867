use std::sync::LazyLock;

use http::HeaderValue;
use http::header::USER_AGENT;
use parking_lot::RwLock;
use reqwest::Request;
use tracing::{
    debug,
    warn,
};

use crate::transport::replace_defaults;

const DEFAULT_SERVICE_NAME: &str = "ua_request";
const FALLBACK_VERSION: &str = "0.0-dev";

/// Build time env vars, provided by CI. Local builds leave them unset and
/// the version suffix falls back to `0.0-dev`.
pub mod build {
    /// A git full sha hash of the current build
    pub const REVISION: Option<&str> = option_env!("UA_REQUEST_BUILD_REVISION");

    /// The datetime in rfc3339 format of the current build
    pub const DATETIME: Option<&str> = option_env!("UA_REQUEST_BUILD_DATETIME");

    /// The `rustc --version` string the current build was compiled with
    pub const RUSTC_VERSION: Option<&str> = option_env!("UA_REQUEST_BUILD_RUSTC_VERSION");
}

static SERVICE_NAME: LazyLock<RwLock<String>> =
    LazyLock::new(|| RwLock::new(DEFAULT_SERVICE_NAME.to_owned()));

static USER_AGENT_STRING: LazyLock<RwLock<String>> =
    LazyLock::new(|| RwLock::new(format!("{DEFAULT_SERVICE_NAME}/0.0")));

/// The current user agent string, read at call time.
pub fn user_agent() -> String {
    USER_AGENT_STRING.read().clone()
}

pub fn service_name() -> String {
    SERVICE_NAME.read().clone()
}

/// Must be called once, at process or test-suite initialization, before
/// concurrent traffic begins:
///
/// ```
/// ua_request::init_service_name("orders-svc");
/// ```
///
/// Overwrites the service name, recomputes the user agent from build
/// metadata, and installs the decorated transport and client as the
/// ambient defaults. Calling it again while requests are in flight leaves
/// those requests with whichever value they observed.
pub fn init_service_name(name: &str) {
    *SERVICE_NAME.write() = name.to_owned();
    let user_agent = format!(
        "{name}/{}",
        version_suffix(build::DATETIME, build::REVISION, build::RUSTC_VERSION)
    );
    debug!(%user_agent, "computed user agent");
    *USER_AGENT_STRING.write() = user_agent;
    replace_defaults();
}

/// Sets the `User-Agent` header on an arbitrary request, overwriting any
/// existing value. Used when a request is built outside
/// [`new_request`](crate::new_request).
pub fn set_user_agent(request: &mut Request) {
    match HeaderValue::from_str(&user_agent()) {
        Ok(value) => {
            request.headers_mut().insert(USER_AGENT, value);
        },
        Err(err) => warn!(%err, "user agent is not a valid header value"),
    }
}

fn version_suffix(datetime: Option<&str>, revision: Option<&str>, toolchain: Option<&str>) -> String {
    let datetime = datetime.map(|datetime| datetime.replace([':', '-'], ""));
    let suffix = [datetime.as_deref(), revision, toolchain]
        .into_iter()
        .flatten()
        .filter(|component| !component.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    if suffix.is_empty() {
        FALLBACK_VERSION.to_owned()
    } else {
        suffix
    }
}
