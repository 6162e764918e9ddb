/// The authenticated identity attached to a request by the session layer.
///
/// Gates only read this from request extensions; resolving credentials into
/// a `SessionUser` is the session layer's job. Once present on a request,
/// the identity is trusted for the rest of that request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    /// Stable identifier the directory knows the user by.
    pub id: String,
    /// Primary email address, when the session layer resolved one.
    pub email: Option<String>,
}

impl SessionUser {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}
