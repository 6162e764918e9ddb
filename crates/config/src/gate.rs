use serde::Deserialize;

/// Redirect targets shared by every gate.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GateConfig {
    /// Where unauthenticated requests are sent. The original request
    /// path and query are appended as a `next` query parameter.
    pub login_url: String,
    /// Where authenticated but unauthorized requests are sent.
    pub logout_url: String,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            login_url: "/login".to_owned(),
            logout_url: "/logout".to_owned(),
        }
    }
}
