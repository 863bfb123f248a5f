//! Walks through a DocCheck login.
//!
//! Run once without `DOCCHECK_CODE` to print the authorization URL, then again with the `code`
//! query value from the callback to exchange it and print the profile.
//!
//! ```sh
//! DOCCHECK_CLIENT_ID=... DOCCHECK_CLIENT_SECRET=... \
//! DOCCHECK_REDIRECT_URI=https://app.example.com/callback \
//! cargo run --example doccheck_login
//! ```

// std
use std::env;
// crates.io
use color_eyre::{Result, eyre::WrapErr};
use oauth2_doccheck::{
	flows::AuthorizationOptions,
	provider::{DocCheck, DocCheckClient, Language, ProviderConfig, Template},
	url::Url,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let client_id = env::var("DOCCHECK_CLIENT_ID").wrap_err("DOCCHECK_CLIENT_ID is not set.")?;
	let mut builder = ProviderConfig::builder(client_id);

	if let Ok(secret) = env::var("DOCCHECK_CLIENT_SECRET") {
		builder = builder.client_secret(secret);
	}
	if let Ok(redirect_uri) = env::var("DOCCHECK_REDIRECT_URI") {
		builder = builder.redirect_uri(Url::parse(&redirect_uri)?);
	}
	if let Ok(base_url) = env::var("DOCCHECK_BASE_URL") {
		builder = builder.base_url(base_url);
	}

	let config = builder.build()?;
	let strategy = DocCheck::new(&config)?;
	let client = DocCheckClient::new(config, strategy)?;
	let Ok(code) = env::var("DOCCHECK_CODE") else {
		let request = client.authorization_url(
			AuthorizationOptions::new()
				.param(Language::PARAM, Language::De.as_str())
				.param(Template::PARAM, Template::LoginM.as_str()),
		);

		println!("Open: {}", request.url);
		println!("State: {}", request.state);

		return Ok(());
	};

	let token = client.exchange_code(&code).await?;
	let owner = client.fetch_resource_owner(&token).await?;

	println!("Token: {token:?}");
	println!("Id: {}", owner.id()?);
	println!(
		"Name: {} {}",
		owner.first_name().unwrap_or_default(),
		owner.last_name().unwrap_or_default()
	);
	println!("Gender: {}", owner.gender(true)?);
	println!("Profession: {:?}", owner.occupation_profession_id());

	Ok(())
}
