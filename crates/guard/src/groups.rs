use std::{
    fmt::Display,
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use axum::body::Body;
use config::GateConfig;
use context::SessionUser;
use directory::GroupsProvider;
use http::{Request, Response};
use tower::Layer;

use crate::{GroupRequirement, Verdict, redirect};

/// Gate that requires an authenticated user to hold group memberships,
/// enumerated on demand from the directory.
///
/// Anonymous requests are sent to login; an authenticated user who fails
/// the requirement, or whose memberships cannot be fetched, is sent to
/// logout (fail-closed).
#[derive(Clone)]
pub struct GroupsRequiredLayer(Arc<GroupsRequiredInner>);

struct GroupsRequiredInner {
    gate: GateConfig,
    requirement: GroupRequirement,
    directory: Arc<dyn GroupsProvider>,
}

impl GroupsRequiredLayer {
    pub fn new(gate: GateConfig, requirement: GroupRequirement, directory: Arc<dyn GroupsProvider>) -> Self {
        Self(Arc::new(GroupsRequiredInner {
            gate,
            requirement,
            directory,
        }))
    }
}

impl<Service> Layer<Service> for GroupsRequiredLayer
where
    Service: Send + Clone,
{
    type Service = GroupsRequiredService<Service>;

    fn layer(&self, next: Service) -> Self::Service {
        GroupsRequiredService {
            next,
            inner: self.0.clone(),
        }
    }
}

#[derive(Clone)]
pub struct GroupsRequiredService<Service> {
    next: Service,
    inner: Arc<GroupsRequiredInner>,
}

impl<Service, ReqBody> tower::Service<Request<ReqBody>> for GroupsRequiredService<Service>
where
    Service: tower::Service<Request<ReqBody>, Response = Response<Body>> + Send + Clone + 'static,
    Service::Future: Send,
    Service::Error: Display + 'static,
    ReqBody: http_body::Body + Send + 'static,
{
    type Response = Response<Body>;
    type Error = Service::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Response<Body>, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.next.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        let mut next = self.next.clone();
        let inner = self.inner.clone();

        Box::pin(async move {
            let Some(user) = req.extensions().get::<SessionUser>().cloned() else {
                let original_url = redirect::original_url(&req);
                log::debug!("Redirecting anonymous request for {original_url} to login");

                return Ok(redirect::to_login(&inner.gate.login_url, &original_url));
            };

            let memberships = match inner.directory.groups(&user).await {
                Ok(memberships) => memberships,
                Err(err) => {
                    log::warn!("Group lookup for user '{}' failed: {err}", user.id);
                    return Ok(redirect::to_logout(&inner.gate.logout_url));
                }
            };

            match inner.requirement.evaluate(memberships).await {
                Ok(Verdict::Satisfied) => next.call(req).await,
                Ok(Verdict::Denied) => {
                    log::debug!("User '{}' does not meet the group requirement", user.id);
                    Ok(redirect::to_logout(&inner.gate.logout_url))
                }
                Err(err) => {
                    log::warn!("Group enumeration for user '{}' failed: {err}", user.id);
                    Ok(redirect::to_logout(&inner.gate.logout_url))
                }
            }
        })
    }
}
