//! Request construction, dispatch, and transport error mapping for provider calls.

pub use oauth2;

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use oauth2::{
	AsyncHttpClient, HttpClientError, HttpRequest,
	http::{
		Method,
		header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
	},
};
use url::form_urlencoded;
// self
use crate::{
	_prelude::*,
	error::{ConfigError, ResponseError, TransportError},
	http::{ProviderHttpClient, ProviderResponse},
	provider::{ClientAuthMethod, ProviderConfig, ProviderStrategy},
};

/// Provider endpoint targeted by a call, used to label transport failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
	/// Token endpoint (code exchange and refresh).
	Token,
	/// User-info endpoint (resource owner details).
	UserInfo,
}
impl Endpoint {
	/// Returns a stable label for error messages.
	pub const fn as_str(self) -> &'static str {
		match self {
			Endpoint::Token => "token",
			Endpoint::UserInfo => "user-info",
		}
	}
}
impl Display for Endpoint {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Maps HTTP transport failures into crate [`Error`] values.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts an [`HttpClientError`] emitted by the transport into a crate error.
	fn map_transport_error(&self, endpoint: Endpoint, error: HttpClientError<E>) -> Error;
}

/// Default mapper for reqwest-backed transports.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(&self, endpoint: Endpoint, err: HttpClientError<ReqwestError>) -> Error {
		match err {
			HttpClientError::Reqwest(inner) =>
				if inner.is_builder() {
					ConfigError::from(*inner).into()
				} else {
					TransportError::network(endpoint.as_str(), *inner).into()
				},
			HttpClientError::Http(inner) => ConfigError::from(inner).into(),
			HttpClientError::Io(inner) => TransportError::Io(inner).into(),
			HttpClientError::Other(message) =>
				TransportError::Other { endpoint: endpoint.as_str(), message }.into(),
			_ => TransportError::Other {
				endpoint: endpoint.as_str(),
				message: "unrecognized transport failure".into(),
			}
			.into(),
		}
	}
}

/// Builds the form-encoded token request for `grant_type` plus grant parameters.
pub(crate) fn token_request(
	url: &Url,
	config: &ProviderConfig,
	grant_type: &str,
	params: &BTreeMap<String, String>,
) -> Result<HttpRequest> {
	let mut form = form_urlencoded::Serializer::new(String::new());
	let mut builder = oauth2::http::Request::builder()
		.method(Method::POST)
		.uri(url.as_str())
		.header(CONTENT_TYPE, "application/x-www-form-urlencoded")
		.header(ACCEPT, "application/json");

	form.append_pair("grant_type", grant_type);

	match config.client_auth_method {
		ClientAuthMethod::ClientSecretPost => {
			form.append_pair("client_id", &config.client_id);

			if let Some(secret) = config.client_secret.as_deref() {
				form.append_pair("client_secret", secret);
			}
		},
		ClientAuthMethod::ClientSecretBasic => {
			builder = builder.header(
				AUTHORIZATION,
				basic_credentials(&config.client_id, config.client_secret.as_deref()),
			);
		},
	}

	for (key, value) in params {
		form.append_pair(key, value);
	}

	builder.body(form.finish().into_bytes()).map_err(|e| ConfigError::from(e).into())
}

/// Builds the bearer-authorized user-info request.
pub(crate) fn user_info_request(url: &Url, access_token: &str) -> Result<HttpRequest> {
	oauth2::http::Request::builder()
		.method(Method::GET)
		.uri(url.as_str())
		.header(ACCEPT, "application/json")
		.header(AUTHORIZATION, format!("Bearer {access_token}"))
		.body(Vec::new())
		.map_err(|e| ConfigError::from(e).into())
}

/// Dispatches `request`, lets the strategy classify the response, and returns the JSON body.
///
/// Classification runs before the payload is interpreted; a body that is not a JSON object
/// is classified against an empty map and only rejected afterwards.
pub(crate) async fn dispatch<S, C, M>(
	strategy: &S,
	http_client: &C,
	mapper: &M,
	endpoint: Endpoint,
	request: HttpRequest,
) -> Result<(ProviderResponse, Map<String, Value>)>
where
	S: ?Sized + ProviderStrategy,
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	let handle = http_client.handle();
	let raw = handle
		.call(request)
		.await
		.map_err(|err| mapper.map_transport_error(endpoint, err))?;
	let response = ProviderResponse::from(&raw);
	let data = response.json_object();

	strategy.check_response(&response, data.as_ref().unwrap_or(&Map::new()))?;

	match data {
		Some(data) => Ok((response, data)),
		None => Err(ResponseError::NotJsonObject { status: response.status, body: response.body }
			.into()),
	}
}

fn basic_credentials(client_id: &str, client_secret: Option<&str>) -> String {
	let id = form_urlencoded::byte_serialize(client_id.as_bytes()).collect::<String>();
	let secret = form_urlencoded::byte_serialize(client_secret.unwrap_or_default().as_bytes())
		.collect::<String>();

	format!("Basic {}", STANDARD.encode(format!("{id}:{secret}")))
}
