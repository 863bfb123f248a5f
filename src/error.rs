//! Crate-level error types shared across flows, providers, and resource owners.

// self
use crate::{_prelude::*, http::ProviderResponse};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Provider reported a failure (HTTP status or in-band `error` field).
	#[error(transparent)]
	Provider(#[from] ProviderError),
	/// A resource owner field could not be read.
	#[error(transparent)]
	ResourceOwner(#[from] ResourceOwnerError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Provider answered successfully but the payload could not be interpreted.
	#[error(transparent)]
	Response(#[from] ResponseError),

	/// Callback `state` does not match the one issued with the authorization URL.
	#[error("Authorization state mismatch.")]
	StateMismatch,
}

/// Failure kinds reported by [`ProviderError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderErrorKind {
	/// HTTP status code was 400 or above.
	Client,
	/// HTTP status signaled success but the body carried an `error` field.
	OAuth,
}

/// Failure reported by the provider for a token or user-info call.
///
/// Carries the status and raw body so callers can reconstruct why the exchange failed.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("{message}")]
pub struct ProviderError {
	/// Which rule flagged the response.
	pub kind: ProviderErrorKind,
	/// HTTP status code of the response.
	pub status: u16,
	/// Raw response body.
	pub body: String,
	/// `error_description` from the body, or the HTTP reason phrase.
	pub message: String,
}
impl ProviderError {
	/// Builds a [`ProviderErrorKind::Client`] error from a response with status 400 or above.
	pub fn client(response: &ProviderResponse, data: &Map<String, Value>) -> Self {
		Self::from_response(ProviderErrorKind::Client, response, data)
	}

	/// Builds a [`ProviderErrorKind::OAuth`] error from a response carrying an in-band `error`.
	pub fn oauth(response: &ProviderResponse, data: &Map<String, Value>) -> Self {
		Self::from_response(ProviderErrorKind::OAuth, response, data)
	}

	fn from_response(
		kind: ProviderErrorKind,
		response: &ProviderResponse,
		data: &Map<String, Value>,
	) -> Self {
		let message = match data.get("error_description") {
			Some(Value::String(description)) => description.clone(),
			Some(Value::Null) | None => response.reason.clone(),
			Some(other) => other.to_string(),
		};

		Self { kind, status: response.status, body: response.body.clone(), message }
	}
}

/// Field-level failures raised while reading a resource owner profile.
///
/// These never invalidate the rest of the profile; other accessors stay usable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum ResourceOwnerError {
	/// Profile carries no usable unique key.
	#[error("Resource owner unique key is missing.")]
	MissingIdentifier,
	/// Gender code has no label mapping.
	#[error("Unexpected gender label. Allowed values are: m/f/c/o/u.")]
	InvalidGenderCode {
		/// Code found in the profile.
		code: String,
	},
}

/// Configuration and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// Client identifier is empty.
	#[error("Client identifier cannot be empty.")]
	MissingClientId,
	/// Base URL cannot be parsed.
	#[error("Base URL is invalid.")]
	InvalidBaseUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Base URL is not usable as a prefix for endpoint paths.
	#[error("Base URL must be a hierarchical URL without query or fragment: {url}.")]
	UnsupportedBaseUrl {
		/// Offending base URL.
		url: String,
	},
	/// The strategy was derived from a different base URL than the client config.
	#[error("Strategy base URL {strategy} does not match the configured base URL {config}.")]
	StrategyMismatch {
		/// Base URL held by the config.
		config: String,
		/// Base URL the strategy was derived from.
		strategy: String,
	},
	/// An endpoint derived from the base URL cannot be parsed.
	#[error("The {endpoint} endpoint derived from the base URL is invalid.")]
	InvalidEndpoint {
		/// Which endpoint failed.
		endpoint: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Payload failures on responses that passed provider classification.
#[derive(Debug, ThisError)]
pub enum ResponseError {
	/// Body is not a JSON object.
	#[error("Provider returned a body that is not a JSON object (HTTP {status}).")]
	NotJsonObject {
		/// HTTP status code of the response.
		status: u16,
		/// Raw response body.
		body: String,
	},
	/// Token endpoint JSON does not match the expected shape.
	#[error("Token endpoint returned malformed JSON.")]
	TokenParse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response.
		status: u16,
	},
	/// Token endpoint returned an `expires_in` that is not a positive number of seconds.
	#[error("The expires_in value must be a positive number of seconds.")]
	InvalidExpiresIn,
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the {endpoint} endpoint.")]
	Network {
		/// Endpoint label (`token` or `user-info`).
		endpoint: &'static str,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the provider.")]
	Io(#[from] std::io::Error),
	/// Transport failed with a message-only error.
	#[error("HTTP client error occurred while calling the {endpoint} endpoint: {message}.")]
	Other {
		/// Endpoint label (`token` or `user-info`).
		endpoint: &'static str,
		/// Transport-supplied message.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(
		endpoint: &'static str,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::Network { endpoint, source: Box::new(src) }
	}
}
