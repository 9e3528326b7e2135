use thiserror::Error;

/// Failure taxonomy for one generation attempt. Partial-data problems
/// (unknown component types, missing props, under-count) are never errors:
/// the repair pipeline fixes them in place and reports warnings instead.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("transport error: {0}")] Transport(String),
    #[error("malformed response: {0}")] MalformedResponse(String),
    #[error("configuration error: {0}")] Config(String),
}
