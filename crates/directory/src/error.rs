#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// The directory could not be reached, or answered abnormally.
    #[error("directory request failed: {0}")]
    Transport(String),
    /// The directory does not know the user the session refers to.
    #[error("unknown user '{0}'")]
    UnknownUser(String),
}
