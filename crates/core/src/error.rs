#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Client-fixable input problem. The message is shown to the visitor
    /// verbatim, so it carries no prefix.
    #[error("{0}")]
    Validation(String),
}
