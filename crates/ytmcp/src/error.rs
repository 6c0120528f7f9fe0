/// Failure modes surfaced by the YouTube data layer.
///
/// `InvalidInput` and `NotFound` are caller faults; `Upstream` covers
/// transport errors and non-success responses from the YouTube API.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Upstream(String),
}
