// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	flows::Client,
	http::ProviderHttpClient,
	oauth::{self, Endpoint, TransportErrorMapper},
	obs::{self, FlowKind, FlowSpan},
	provider::ProviderStrategy,
};

impl<S, C, M> Client<S, C, M>
where
	S: ?Sized + ProviderStrategy,
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Fetches the user-info profile for `token` and wraps it in the strategy's owner type.
	pub async fn fetch_resource_owner(&self, token: &AccessToken) -> Result<S::ResourceOwner> {
		let span = FlowSpan::new(FlowKind::ResourceOwner, "fetch_resource_owner");

		obs::observe(span, async move {
			let url = self.strategy.resource_owner_details_url(token);
			let request = oauth::user_info_request(url, token.access_token.expose())?;
			let (_, profile) = oauth::dispatch(
				self.strategy.as_ref(),
				self.http_client.as_ref(),
				self.transport_mapper.as_ref(),
				Endpoint::UserInfo,
				request,
			)
			.await?;

			Ok(self.strategy.create_resource_owner(profile, token))
		})
		.await
	}
}
