use axum::{body::Body, extract::OriginalUri};
use http::{HeaderValue, Request, Response, StatusCode, header::LOCATION};
use url::form_urlencoded;

/// Path and query of the request as the client sent it.
///
/// Nested routers rewrite `uri()`; the `OriginalUri` extension, when
/// present, preserves the original form.
pub(crate) fn original_url<B>(req: &Request<B>) -> String {
    let uri = match req.extensions().get::<OriginalUri>() {
        Some(OriginalUri(uri)) => uri,
        None => req.uri(),
    };

    uri.path_and_query()
        .map(|path_and_query| path_and_query.as_str().to_owned())
        .unwrap_or_else(|| uri.path().to_owned())
}

/// `302 Found` to the login endpoint, carrying the original URL as a
/// `next` parameter so the login flow can send the user back.
pub(crate) fn to_login(login_url: &str, original_url: &str) -> Response<Body> {
    let next: String = form_urlencoded::Serializer::new(String::new())
        .append_pair("next", original_url)
        .finish();

    found(&format!("{login_url}?{next}"))
}

/// `302 Found` to the logout endpoint. Used for every authorization
/// failure; the response never reveals why access was denied.
pub(crate) fn to_logout(logout_url: &str) -> Response<Body> {
    found(logout_url)
}

fn found(location: &str) -> Response<Body> {
    // HeaderValue validation keeps a bad configured URL from injecting headers
    let location = match HeaderValue::from_str(location) {
        Ok(value) => value,
        Err(_) => HeaderValue::from_static("/"),
    };

    Response::builder()
        .status(StatusCode::FOUND)
        .header(LOCATION, location)
        .body(Body::empty())
        .unwrap()
}
