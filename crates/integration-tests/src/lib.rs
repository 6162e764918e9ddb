//! Test harness for driving gated routers end to end.

use std::{
    str::FromStr,
    sync::{Arc, Once},
};

use axum::{Router, body::Body, routing::get};
use config::Config;
use context::{Group, SessionUser};
use directory::{GroupsProvider, InMemoryDirectory};
use guard::{GroupRequirement, GroupsRequiredLayer, LoginRequiredLayer};
use http::{Request, Response, header::LOCATION};
use logforth::{append::Stderr, filter::EnvFilter};
use tower::ServiceExt;

static INIT: Once = Once::new();

#[ctor::ctor]
fn init_test_logger() {
    INIT.call_once(|| {
        logforth::builder()
            .dispatch(|d| {
                let filter = EnvFilter::from_str("debug").expect("default filter should be valid");
                d.filter(filter).append(Stderr::default())
            })
            .apply();
    });
}

/// The `Location` header of a redirect response.
pub fn location(response: &Response<Body>) -> &str {
    response.headers().get(LOCATION).unwrap().to_str().unwrap()
}

/// A gated router driven directly through tower, without a socket.
pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub fn builder() -> TestAppBuilder {
        TestAppBuilder {
            config: Config::default(),
            directory: InMemoryDirectory::new().with_page_size(2),
        }
    }

    /// Dispatch a GET request, optionally as an authenticated user.
    ///
    /// The user is attached as a request extension, the same way a session
    /// layer in front of the gates would.
    pub async fn get(&self, path: &str, user: Option<SessionUser>) -> Response<Body> {
        let mut request = Request::builder().uri(path).body(Body::empty()).unwrap();

        if let Some(user) = user {
            request.extensions_mut().insert(user);
        }

        self.router.clone().oneshot(request).await.unwrap()
    }
}

pub struct TestAppBuilder {
    config: Config,
    directory: InMemoryDirectory,
}

impl TestAppBuilder {
    /// Parse a TOML fragment as the protection configuration.
    pub fn config(mut self, toml: &str) -> Self {
        self.config = toml::from_str(toml).unwrap();
        self
    }

    /// Register a directory user and the groups they belong to.
    pub fn user(mut self, id: &str, groups: &[&str]) -> Self {
        self.directory = self
            .directory
            .with_user(id, groups.iter().copied().map(Group::new));

        self
    }

    /// Build a router with `/` public, `/dashboard` behind the login gate
    /// and one group-gated route per `[routes]` entry.
    pub fn build(self) -> TestApp {
        let gate = self.config.gate.clone();
        let directory: Arc<dyn GroupsProvider> = Arc::new(self.directory);

        let mut router = Router::new().route("/", get(|| async { "public" })).route(
            "/dashboard",
            get(|| async { "dashboard" }).layer(LoginRequiredLayer::new(gate.clone())),
        );

        for (path, route) in &self.config.routes {
            let layer =
                GroupsRequiredLayer::new(gate.clone(), GroupRequirement::from(route), directory.clone());

            router = router.route(path.as_str(), get(|| async { "granted" }).layer(layer));
        }

        TestApp { router }
    }
}
