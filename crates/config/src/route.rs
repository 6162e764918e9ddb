use std::collections::BTreeSet;

use serde::Deserialize;

/// Group requirements protecting a single route path.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteConfig {
    /// Names of the required groups. Duplicate entries collapse into one.
    pub groups: BTreeSet<String>,
    /// The membership rule applied over `groups`.
    #[serde(default)]
    pub quantifier: Quantifier,
}

/// The membership rule applied over a set of required group names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quantifier {
    /// The user must be a member of every listed group.
    #[default]
    All,
    /// Membership in at least one listed group suffices.
    Any,
}
