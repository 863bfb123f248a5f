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
	/// Exchanges an authorization `code` for an access token.
	///
	/// The configured redirect URI is echoed back to the token endpoint when present.
	pub async fn exchange_code(&self, code: &str) -> Result<AccessToken> {
		let mut params = BTreeMap::from([("code".to_owned(), code.to_owned())]);

		if let Some(redirect_uri) = self.config.redirect_uri.as_ref() {
			params.insert("redirect_uri".to_owned(), redirect_uri.to_string());
		}

		self.request_token(FlowKind::ExchangeCode, "authorization_code", params).await
	}

	/// Trades a refresh token for a new access token.
	pub async fn refresh_token(&self, refresh_token: &str) -> Result<AccessToken> {
		let params = BTreeMap::from([("refresh_token".to_owned(), refresh_token.to_owned())]);

		self.request_token(FlowKind::Refresh, "refresh_token", params).await
	}

	async fn request_token(
		&self,
		kind: FlowKind,
		grant_type: &'static str,
		params: BTreeMap<String, String>,
	) -> Result<AccessToken> {
		obs::observe(FlowSpan::new(kind, grant_type), async move {
			let url = self.strategy.base_access_token_url(&params);
			let request = oauth::token_request(url, &self.config, grant_type, &params)?;
			let (response, data) = oauth::dispatch(
				self.strategy.as_ref(),
				self.http_client.as_ref(),
				self.transport_mapper.as_ref(),
				Endpoint::Token,
				request,
			)
			.await?;

			AccessToken::from_response(response.status, data, OffsetDateTime::now_utc())
		})
		.await
	}
}
