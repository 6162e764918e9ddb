use std::path::Path;

use anyhow::bail;
use indoc::formatdoc;

use crate::Config;

pub(crate) fn load<P: AsRef<Path>>(path: P) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let config: Config = toml::from_str(&content)?;

    validate_gate(&config)?;
    validate_routes(&config)?;

    Ok(config)
}

pub(crate) fn validate_gate(config: &Config) -> anyhow::Result<()> {
    if config.gate.login_url.is_empty() {
        bail!("gate.login_url must not be empty");
    }

    if config.gate.logout_url.is_empty() {
        bail!("gate.logout_url must not be empty");
    }

    Ok(())
}

pub(crate) fn validate_routes(config: &Config) -> anyhow::Result<()> {
    for (path, route) in &config.routes {
        if !path.starts_with('/') {
            bail!("Route '{path}' must be an absolute path starting with '/'");
        }

        // A declared route with no groups would gate nothing.
        if route.groups.is_empty() {
            bail!(formatdoc! {r#"
                Route '{path}' declares no required groups. List at least one group name:

                  [routes."/admin"]
                  groups = ["admins"]
            "#});
        }
    }

    Ok(())
}
