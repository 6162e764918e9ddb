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
use http::{Request, Response};
use tower::Layer;

use crate::redirect;

/// Gate that lets authenticated requests through and sends anonymous ones
/// to the login endpoint with a `next` return parameter.
#[derive(Clone)]
pub struct LoginRequiredLayer(Arc<GateConfig>);

impl LoginRequiredLayer {
    pub fn new(gate: GateConfig) -> Self {
        Self(Arc::new(gate))
    }
}

impl<Service> Layer<Service> for LoginRequiredLayer
where
    Service: Send + Clone,
{
    type Service = LoginRequiredService<Service>;

    fn layer(&self, next: Service) -> Self::Service {
        LoginRequiredService {
            next,
            gate: self.0.clone(),
        }
    }
}

#[derive(Clone)]
pub struct LoginRequiredService<Service> {
    next: Service,
    gate: Arc<GateConfig>,
}

impl<Service, ReqBody> tower::Service<Request<ReqBody>> for LoginRequiredService<Service>
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
        let gate = self.gate.clone();

        Box::pin(async move {
            if req.extensions().get::<SessionUser>().is_some() {
                return next.call(req).await;
            }

            let original_url = redirect::original_url(&req);
            log::debug!("Redirecting anonymous request for {original_url} to login");

            Ok(redirect::to_login(&gate.login_url, &original_url))
        })
    }
}
