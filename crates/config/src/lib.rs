mod error;
mod gate;
mod loader;
mod route;

use std::{collections::BTreeMap, path::Path};

use serde::Deserialize;

pub use error::Error;
pub use gate::GateConfig;
pub use route::{Quantifier, RouteConfig};

pub(crate) type Result<T> = std::result::Result<T, error::Error>;

/// Declarative route protection configuration.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Redirect targets shared by every gate.
    pub gate: GateConfig,
    /// Route paths mapped to the group requirements protecting them.
    pub routes: BTreeMap<String, RouteConfig>,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Config> {
        loader::load(path)
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use crate::Config;

    #[test]
    fn all_values() {
        let config = indoc! {r#"
            [gate]
            login_url = "/account/login"
            logout_url = "/account/logout"

            [routes."/admin"]
            groups = ["admins", "staff"]

            [routes."/reports"]
            groups = ["auditors", "staff"]
            quantifier = "any"
        "#};

        let config: Config = toml::from_str(config).unwrap();

        insta::assert_debug_snapshot!(&config, @r#"
        Config {
            gate: GateConfig {
                login_url: "/account/login",
                logout_url: "/account/logout",
            },
            routes: {
                "/admin": RouteConfig {
                    groups: {
                        "admins",
                        "staff",
                    },
                    quantifier: All,
                },
                "/reports": RouteConfig {
                    groups: {
                        "auditors",
                        "staff",
                    },
                    quantifier: Any,
                },
            },
        }
        "#);
    }

    #[test]
    fn defaults() {
        let config: Config = toml::from_str("").unwrap();

        insta::assert_debug_snapshot!(&config, @r#"
        Config {
            gate: GateConfig {
                login_url: "/login",
                logout_url: "/logout",
            },
            routes: {},
        }
        "#);
    }

    #[test]
    fn duplicate_group_names_collapse() {
        let config = indoc! {r#"
            [routes."/admin"]
            groups = ["admins", "admins", "staff"]
        "#};

        let config: Config = toml::from_str(config).unwrap();
        let route = &config.routes["/admin"];

        assert_eq!(route.groups.len(), 2);
    }
}
