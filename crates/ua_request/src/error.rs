use thiserror::Error;

/// Everything that can go wrong here comes from request construction or
/// from the wrapped transport; this crate never produces errors of its own.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    UrlParse(#[from] url::ParseError),
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
}
