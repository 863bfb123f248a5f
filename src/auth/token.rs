//! Access tokens returned by the provider's token endpoint, with lifecycle helpers and a
//! builder.

pub mod secret;

// self
use crate::{_prelude::*, auth::token::secret::TokenSecret, error::ResponseError};

/// Current lifecycle status for an access token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenStatus {
	/// Token is not yet valid because the issued-at instant is in the future.
	Pending,
	/// Token is currently valid.
	Active,
	/// Token exceeded its expiry instant.
	Expired,
}

/// Errors produced by [`AccessTokenBuilder`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum AccessTokenBuilderError {
	/// Issued when no access token value was provided.
	#[error("Access token is required.")]
	MissingAccessToken,
	/// Issued when the expiry instant falls outside the representable range.
	#[error("Access token expiry is out of range.")]
	ExpiryOutOfRange,
}

/// Access token issued by the provider.
#[derive(Clone, Serialize, Deserialize)]
pub struct AccessToken {
	/// Access token secret; callers must avoid logging it.
	pub access_token: TokenSecret,
	/// Token type reported by the provider (usually `bearer`).
	pub token_type: Option<String>,
	/// Refresh token secret, if the provider issued one.
	pub refresh_token: Option<TokenSecret>,
	/// Instant the token response was received.
	pub issued_at: OffsetDateTime,
	/// Expiry instant derived from `expires_in`; `None` when the provider sent no lifetime.
	pub expires_at: Option<OffsetDateTime>,
	/// Resource owner id echoed by the token endpoint, if any.
	pub resource_owner_id: Option<String>,
	/// Remaining token response fields not modeled above.
	pub values: Map<String, Value>,
}
impl AccessToken {
	/// Returns a builder for the provided access token value.
	pub fn builder(access_token: impl Into<String>) -> AccessTokenBuilder {
		AccessTokenBuilder::new().access_token(access_token)
	}

	/// Computes the lifecycle status at a given instant.
	pub fn status_at(&self, instant: OffsetDateTime) -> TokenStatus {
		if instant < self.issued_at {
			return TokenStatus::Pending;
		}

		match self.expires_at {
			Some(expires_at) if instant >= expires_at => TokenStatus::Expired,
			_ => TokenStatus::Active,
		}
	}

	/// Convenience helper that checks the status using the current UTC instant.
	pub fn status(&self) -> TokenStatus {
		self.status_at(OffsetDateTime::now_utc())
	}

	/// Returns `true` if the token has expired at the provided instant.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		matches!(self.status_at(instant), TokenStatus::Expired)
	}

	/// Returns `true` if the token is expired relative to the current clock.
	pub fn is_expired(&self) -> bool {
		matches!(self.status(), TokenStatus::Expired)
	}

	/// Builds a token from a parsed token endpoint body received at `issued_at`.
	pub(crate) fn from_response(
		status: u16,
		data: Map<String, Value>,
		issued_at: OffsetDateTime,
	) -> Result<Self> {
		let response: TokenResponse =
			serde_path_to_error::deserialize(Value::Object(data))
				.map_err(|source| ResponseError::TokenParse { source, status })?;
		let expires_at = match response.expires_in {
			Some(expires_in) => Some(
				issued_at
					.checked_add(Duration::seconds(expires_in.seconds()?))
					.ok_or(ResponseError::InvalidExpiresIn)?,
			),
			None => None,
		};

		Ok(Self {
			access_token: TokenSecret::new(response.access_token),
			token_type: response.token_type,
			refresh_token: response.refresh_token.map(TokenSecret::new),
			issued_at,
			expires_at,
			resource_owner_id: response.resource_owner_id.map(String::from),
			values: response.values,
		})
	}
}
impl Debug for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AccessToken")
			.field("access_token", &"<redacted>")
			.field("token_type", &self.token_type)
			.field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
			.field("issued_at", &self.issued_at)
			.field("expires_at", &self.expires_at)
			.field("resource_owner_id", &self.resource_owner_id)
			.finish()
	}
}

/// Builder for [`AccessToken`].
#[derive(Clone, Debug, Default)]
pub struct AccessTokenBuilder {
	access_token: Option<TokenSecret>,
	token_type: Option<String>,
	refresh_token: Option<TokenSecret>,
	issued_at: Option<OffsetDateTime>,
	expires_in: Option<Duration>,
	resource_owner_id: Option<String>,
	values: Map<String, Value>,
}
impl AccessTokenBuilder {
	/// Creates an empty builder.
	pub fn new() -> Self {
		Self::default()
	}

	/// Provides the access token value.
	pub fn access_token(mut self, token: impl Into<String>) -> Self {
		self.access_token = Some(TokenSecret::new(token));

		self
	}

	/// Sets the token type.
	pub fn token_type(mut self, token_type: impl Into<String>) -> Self {
		self.token_type = Some(token_type.into());

		self
	}

	/// Provides the refresh token value.
	pub fn refresh_token(mut self, token: impl Into<String>) -> Self {
		self.refresh_token = Some(TokenSecret::new(token));

		self
	}

	/// Sets the issued-at instant (defaults to now).
	pub fn issued_at(mut self, instant: OffsetDateTime) -> Self {
		self.issued_at = Some(instant);

		self
	}

	/// Sets a relative lifetime from the issued instant.
	pub fn expires_in(mut self, duration: Duration) -> Self {
		self.expires_in = Some(duration);

		self
	}

	/// Sets the resource owner id echoed by the token endpoint.
	pub fn resource_owner_id(mut self, id: impl Into<String>) -> Self {
		self.resource_owner_id = Some(id.into());

		self
	}

	/// Replaces the extra response values.
	pub fn values(mut self, values: Map<String, Value>) -> Self {
		self.values = values;

		self
	}

	/// Consumes the builder and produces an [`AccessToken`].
	pub fn build(self) -> Result<AccessToken, AccessTokenBuilderError> {
		let access_token = self.access_token.ok_or(AccessTokenBuilderError::MissingAccessToken)?;
		let issued_at = self.issued_at.unwrap_or_else(OffsetDateTime::now_utc);
		let expires_at = match self.expires_in {
			Some(delta) => Some(
				issued_at.checked_add(delta).ok_or(AccessTokenBuilderError::ExpiryOutOfRange)?,
			),
			None => None,
		};

		Ok(AccessToken {
			access_token,
			token_type: self.token_type,
			refresh_token: self.refresh_token,
			issued_at,
			expires_at,
			resource_owner_id: self.resource_owner_id,
			values: self.values,
		})
	}
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
	access_token: String,
	#[serde(default)]
	token_type: Option<String>,
	#[serde(default)]
	refresh_token: Option<String>,
	#[serde(default)]
	expires_in: Option<ExpiresIn>,
	#[serde(default)]
	resource_owner_id: Option<OwnerId>,
	#[serde(flatten)]
	values: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ExpiresIn {
	Seconds(i64),
	Text(String),
}
impl ExpiresIn {
	fn seconds(&self) -> Result<i64, ResponseError> {
		let seconds = match self {
			ExpiresIn::Seconds(seconds) => Some(*seconds),
			ExpiresIn::Text(text) => text.trim().parse::<i64>().ok(),
		};

		seconds.filter(|seconds| *seconds > 0).ok_or(ResponseError::InvalidExpiresIn)
	}
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OwnerId {
	Text(String),
	Number(i64),
}
impl From<OwnerId> for String {
	fn from(value: OwnerId) -> Self {
		match value {
			OwnerId::Text(text) => text,
			OwnerId::Number(number) => number.to_string(),
		}
	}
}
