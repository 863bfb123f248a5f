//! Provider strategy hooks consumed by the generic client.
//!
//! A strategy supplies everything provider-specific: endpoint URLs, authorization parameter
//! filtering, response classification, and resource owner construction. The client composes
//! a strategy instead of being subclassed per provider.

// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	error::{ProviderError, ResourceOwnerError},
	http::ProviderResponse,
};

/// Untyped profile mapping exactly as returned by a user-info endpoint.
pub type RawProfile = Map<String, Value>;

/// Capability set a provider plugs into the generic client.
///
/// Implementors are required to be `Send + Sync`; every hook is synchronous and free of I/O
/// so a single strategy can serve concurrent flows without locking.
pub trait ProviderStrategy: Send + Sync {
	/// Typed view produced from a fetched profile.
	type ResourceOwner: ResourceOwner;

	/// Base URL every endpoint of this strategy was derived from.
	fn base_url(&self) -> &str;

	/// URL the user is redirected to (query parameters are appended by the client).
	fn base_authorization_url(&self) -> &Url;

	/// Token endpoint URL for a grant carrying `params`.
	fn base_access_token_url(&self, params: &BTreeMap<String, String>) -> &Url;

	/// User-info endpoint URL for `token`.
	fn resource_owner_details_url(&self, token: &AccessToken) -> &Url;

	/// Scopes requested when the caller supplies none.
	fn default_scopes(&self) -> Vec<String> {
		Vec::new()
	}

	/// Separator used to join scopes into the `scope` parameter.
	fn scope_separator(&self) -> &str {
		","
	}

	/// Rewrites the generic authorization parameters into the set the provider accepts.
	///
	/// The default implementation returns `params` untouched.
	fn authorization_parameters(
		&self,
		params: BTreeMap<String, String>,
	) -> BTreeMap<String, String> {
		params
	}

	/// Inspects a token or user-info response before the client uses its payload.
	///
	/// `data` is the parsed JSON body, or an empty map when the body is not a JSON object.
	fn check_response(
		&self,
		response: &ProviderResponse,
		data: &RawProfile,
	) -> Result<(), ProviderError>;

	/// Wraps a fetched profile in the provider's typed view.
	fn create_resource_owner(&self, profile: RawProfile, token: &AccessToken) -> Self::ResourceOwner;
}

/// Minimal contract every typed profile view fulfills.
pub trait ResourceOwner: Send + Sync {
	/// Stable identifier of the authenticated user.
	fn id(&self) -> Result<String, ResourceOwnerError>;

	/// Underlying profile mapping, unmodified.
	fn to_map(&self) -> &RawProfile;
}
