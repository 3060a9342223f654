//! Target URL construction.

use url::form_urlencoded;
use url::Url;

use crate::action::ActionDescriptor;
use crate::config::Endpoint;
use crate::error::ApiError;
use crate::http::HttpMethod;

/// Builds the URL for `descriptor` on `endpoint`.
///
/// GET actions that declare parameters get `params` appended as a
/// form-encoded query, in the order given. POST parameters never appear in
/// the URL; see [`encode_form`].
pub fn build_uri(
    endpoint: &Endpoint,
    descriptor: &ActionDescriptor,
    params: &[(&str, &str)],
) -> Result<Url, ApiError> {
    let mut url = Url::parse(&format!("{}://{}", endpoint.scheme.as_str(), endpoint.host))?;
    url.set_port(Some(endpoint.port))
        .map_err(|()| ApiError::InvalidConfig(format!("host `{}` cannot carry a port", endpoint.host)))?;
    url.set_path(descriptor.path);

    if descriptor.method == HttpMethod::Get && descriptor.accepts_params() && !params.is_empty() {
        url.query_pairs_mut().extend_pairs(params);
    }

    Ok(url)
}

/// `application/x-www-form-urlencoded` encoding of `params`, order preserved.
pub fn encode_form(params: &[(&str, &str)]) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish()
}
