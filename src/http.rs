//! Transport primitives for provider calls.
//!
//! The module exposes [`ProviderHttpClient`] so downstream crates can plug in their own HTTP
//! stack, plus [`ProviderResponse`], the status/reason/body view that provider strategies
//! classify before the client looks at the payload.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
use oauth2::{AsyncHttpClient, HttpClientError, HttpResponse};
#[cfg(feature = "reqwest")] use oauth2::HttpRequest;
// self
use crate::_prelude::*;

/// Abstraction over HTTP transports capable of calling the provider's token and user-info
/// endpoints.
///
/// The trait acts as the crate's only dependency on an HTTP stack. Implementations must be
/// `Send + Sync + 'static` so they can be shared across clients, and the handles they return
/// must own whatever state is required so their request futures remain `Send` for the
/// lifetime of the in-flight call.
pub trait ProviderHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// [`AsyncHttpClient`] handle used for a single provider call.
	type Handle: for<'c> AsyncHttpClient<
			'c,
			Error = HttpClientError<Self::TransportError>,
			Future: 'c + Send,
		>
		+ 'static
		+ Send
		+ Sync;

	/// Builds a handle for the next provider call.
	fn handle(&self) -> Self::Handle;
}

/// Status, reason phrase, and body of a provider response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderResponse {
	/// HTTP status code.
	pub status: u16,
	/// Canonical reason phrase for the status (empty when the code has none).
	pub reason: String,
	/// Response body decoded as UTF-8 (lossy).
	pub body: String,
}
impl ProviderResponse {
	/// Parses the body as a JSON object, returning `None` for any other payload.
	pub fn json_object(&self) -> Option<Map<String, Value>> {
		match serde_json::from_str::<Value>(&self.body) {
			Ok(Value::Object(map)) => Some(map),
			_ => None,
		}
	}
}
impl From<&HttpResponse> for ProviderResponse {
	fn from(response: &HttpResponse) -> Self {
		let status = response.status();

		Self {
			status: status.as_u16(),
			reason: status.canonical_reason().unwrap_or_default().to_owned(),
			body: String::from_utf8_lossy(response.body()).into_owned(),
		}
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Provider endpoints answer directly instead of delegating to another URI, so the default
/// client does not follow redirects. Configure any custom [`ReqwestClient`] the same way.
#[cfg(feature = "reqwest")]
#[derive(Clone)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a client that refuses to follow redirects.
	pub fn try_new() -> Result<Self> {
		let client = ReqwestClient::builder()
			.redirect(reqwest::redirect::Policy::none())
			.build()
			.map_err(crate::error::ConfigError::from)?;

		Ok(Self(client))
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ProviderHttpClient for ReqwestHttpClient {
	type Handle = ReqwestHandle;
	type TransportError = ReqwestError;

	fn handle(&self) -> Self::Handle {
		ReqwestHandle(self.0.clone())
	}
}

/// Handle returned by [`ReqwestHttpClient`] that satisfies [`ProviderHttpClient`].
#[cfg(feature = "reqwest")]
#[derive(Clone)]
pub struct ReqwestHandle(ReqwestClient);
#[cfg(feature = "reqwest")]
impl<'c> AsyncHttpClient<'c> for ReqwestHandle {
	type Error = HttpClientError<ReqwestError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send + Sync>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		let client = self.0.clone();

		Box::pin(async move {
			let response =
				client.execute(request.try_into().map_err(Box::new)?).await.map_err(Box::new)?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut response_new =
				HttpResponse::new(response.bytes().await.map_err(Box::new)?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use oauth2::http::StatusCode;
	// self
	use super::*;

	fn http_response(status: StatusCode, body: &str) -> HttpResponse {
		let mut response = HttpResponse::new(body.as_bytes().to_vec());

		*response.status_mut() = status;

		response
	}

	#[test]
	fn provider_response_carries_reason_phrase() {
		let response = ProviderResponse::from(&http_response(StatusCode::BAD_REQUEST, "{}"));

		assert_eq!(response.status, 400);
		assert_eq!(response.reason, "Bad Request");
		assert_eq!(response.body, "{}");
	}

	#[test]
	fn unknown_status_has_empty_reason() {
		let status = StatusCode::from_u16(599).expect("599 should be a valid status code.");
		let response = ProviderResponse::from(&http_response(status, ""));

		assert_eq!(response.status, 599);
		assert!(response.reason.is_empty());
	}

	#[test]
	fn json_object_rejects_other_payloads() {
		let object = ProviderResponse::from(&http_response(StatusCode::OK, r#"{"a":1}"#));

		assert_eq!(object.json_object().map(|map| map.len()), Some(1));

		for body in ["[1,2]", "\"text\"", "<html></html>", ""] {
			let response = ProviderResponse::from(&http_response(StatusCode::OK, body));

			assert!(response.json_object().is_none(), "Body {body:?} must not parse as an object.");
		}
	}

	#[cfg(feature = "reqwest")]
	#[test]
	fn reqwest_client_builds_fallibly() {
		let client = ReqwestHttpClient::try_new().expect("Reqwest client should build.");
		let _handle = client.handle();
	}
}
