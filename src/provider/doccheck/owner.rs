//! Typed, lazily validated view over a DocCheck user-info profile.
//!
//! Nothing is checked at construction. Each accessor reads its own key and applies its own
//! defaulting rule, so a failing field never hides the others.

// self
use crate::{
	_prelude::*,
	error::ResourceOwnerError,
	provider::strategy::{RawProfile, ResourceOwner},
};

/// Gender codes reported in `address_gender`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
	/// `m`
	#[serde(rename = "m")]
	Male,
	/// `f`
	#[serde(rename = "f")]
	Female,
	/// `c`
	#[serde(rename = "c")]
	Company,
	/// `o`
	#[serde(rename = "o")]
	Other,
	/// `u`
	#[default]
	#[serde(rename = "u")]
	Unknown,
}
impl Gender {
	/// Every known code.
	pub const ALL: [Self; 5] = [Self::Male, Self::Female, Self::Company, Self::Other, Self::Unknown];

	/// Single-letter wire code.
	pub const fn code(self) -> &'static str {
		match self {
			Self::Male => "m",
			Self::Female => "f",
			Self::Company => "c",
			Self::Other => "o",
			Self::Unknown => "u",
		}
	}

	/// Human-readable label.
	pub const fn label(self) -> &'static str {
		match self {
			Self::Male => "male",
			Self::Female => "female",
			Self::Company => "company",
			Self::Other => "other",
			Self::Unknown => "unknown",
		}
	}
}
impl Display for Gender {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.code())
	}
}
impl FromStr for Gender {
	type Err = ResourceOwnerError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|gender| gender.code() == s)
			.ok_or_else(|| ResourceOwnerError::InvalidGenderCode { code: s.to_owned() })
	}
}

/// Authenticated DocCheck user as returned by the v2 user-info endpoint.
///
/// Free-text name and address fields are HTML-entity decoded on read; codes, ids, and the
/// email are returned verbatim.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DocCheckResourceOwner {
	profile: RawProfile,
	base_url: String,
}
impl DocCheckResourceOwner {
	/// Wraps `profile`; `base_url` is the login host the profile was fetched from.
	pub fn new(profile: RawProfile, base_url: impl Into<String>) -> Self {
		Self { profile, base_url: base_url.into() }
	}

	/// Base URL of the login host that produced this profile.
	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	/// `uniquekey`, the stable DocCheck user id.
	pub fn id(&self) -> Result<String, ResourceOwnerError> {
		match self.profile.get("uniquekey") {
			None | Some(Value::Null) | Some(Value::Bool(false)) => None,
			Some(Value::String(id)) if id.is_empty() => None,
			Some(Value::String(id)) => Some(id.clone()),
			Some(Value::Number(id)) => Some(id.to_string()),
			Some(other) => Some(other.to_string()),
		}
		.ok_or(ResourceOwnerError::MissingIdentifier)
	}

	/// `email`
	pub fn email(&self) -> Option<String> {
		self.raw_text("email")
	}

	/// `address_name_first`, decoded.
	pub fn first_name(&self) -> Option<String> {
		self.decoded_text("address_name_first")
	}

	/// `address_name_last`, decoded.
	pub fn last_name(&self) -> Option<String> {
		self.decoded_text("address_name_last")
	}

	/// `address_name_title`, decoded.
	pub fn title(&self) -> Option<String> {
		self.decoded_text("address_name_title")
	}

	/// `address_city`, decoded.
	pub fn city(&self) -> Option<String> {
		self.decoded_text("address_city")
	}

	/// `address_street`, decoded.
	pub fn street(&self) -> Option<String> {
		self.decoded_text("address_street")
	}

	/// `address_postal_code`
	pub fn postal_code(&self) -> Option<String> {
		self.raw_text("address_postal_code")
	}

	/// `address_country_id`
	pub fn country_id(&self) -> Option<i64> {
		self.integer("address_country_id")
	}

	/// `address_country_iso`
	pub fn country_iso(&self) -> Option<String> {
		self.raw_text("address_country_iso")
	}

	/// `address_gender`, defaulting to `u`.
	///
	/// With `return_label` the code is mapped to its label and an unknown code fails with
	/// [`ResourceOwnerError::InvalidGenderCode`]. Without it the raw code is returned unchecked.
	pub fn gender(&self, return_label: bool) -> Result<String, ResourceOwnerError> {
		let code = self.gender_raw();

		if return_label {
			Ok(code.parse::<Gender>()?.label().to_owned())
		} else {
			Ok(code)
		}
	}

	/// `address_gender` as a typed code, or `None` when the code is not recognized.
	pub fn gender_code(&self) -> Option<Gender> {
		self.gender_raw().parse().ok()
	}

	/// `occupation_discipline_id`
	pub fn occupation_discipline_id(&self) -> Option<i64> {
		self.integer("occupation_discipline_id")
	}

	/// `occupation_profession_id`
	pub fn occupation_profession_id(&self) -> Option<i64> {
		self.integer("occupation_profession_id")
	}

	/// `occupation_profession_parent_id`
	pub fn occupation_profession_parent_id(&self) -> Option<i64> {
		self.integer("occupation_profession_parent_id")
	}

	/// Profile exactly as received.
	pub fn to_map(&self) -> &RawProfile {
		&self.profile
	}

	/// Consumes the owner and returns the profile.
	pub fn into_map(self) -> RawProfile {
		self.profile
	}

	fn gender_raw(&self) -> String {
		self.raw_text("address_gender")
			.filter(|code| !code.is_empty())
			.unwrap_or_else(|| Gender::default().code().to_owned())
	}

	fn raw_text(&self, key: &str) -> Option<String> {
		match self.profile.get(key)? {
			Value::String(text) => Some(text.clone()),
			Value::Number(number) => Some(number.to_string()),
			_ => None,
		}
	}

	fn decoded_text(&self, key: &str) -> Option<String> {
		self.raw_text(key).map(|text| {
			if text.is_empty() { text } else { html_escape::decode_html_entities(&text).into_owned() }
		})
	}

	fn integer(&self, key: &str) -> Option<i64> {
		match self.profile.get(key)? {
			Value::Number(number) =>
				number.as_i64().or_else(|| number.as_f64().map(|float| float.trunc() as i64)),
			Value::String(text) => Some(leading_integer(text)),
			Value::Bool(flag) => Some(i64::from(*flag)),
			_ => None,
		}
	}
}
impl ResourceOwner for DocCheckResourceOwner {
	fn id(&self) -> Result<String, ResourceOwnerError> {
		DocCheckResourceOwner::id(self)
	}

	fn to_map(&self) -> &RawProfile {
		DocCheckResourceOwner::to_map(self)
	}
}

// Longest leading numeric prefix, including a fraction and an exponent. Anything unparseable
// reads as zero and out-of-range values saturate.
fn leading_integer(text: &str) -> i64 {
	let text = text.trim();
	let bytes = text.as_bytes();
	let sign = usize::from(matches!(bytes.first(), Some(b'-' | b'+')));
	let int_digits = count_digits(&bytes[sign..]);
	let mut end = sign + int_digits;
	let mut float = false;

	if bytes.get(end) == Some(&b'.') {
		let frac_digits = count_digits(&bytes[end + 1..]);

		if int_digits + frac_digits > 0 {
			end += 1 + frac_digits;
			float = true;
		}
	}
	if end == sign {
		return 0;
	}
	if matches!(bytes.get(end), Some(b'e' | b'E')) {
		let exp_sign = usize::from(matches!(bytes.get(end + 1), Some(b'-' | b'+')));
		let exp_digits = count_digits(&bytes[end + 1 + exp_sign..]);

		if exp_digits > 0 {
			end += 1 + exp_sign + exp_digits;
			float = true;
		}
	}
	if float {
		return text[..end].parse::<f64>().map_or(0, |value| value.trunc() as i64);
	}

	let negative = bytes[0] == b'-';

	text[sign..end].bytes().fold(0_i64, |acc, digit| {
		let digit = i64::from(digit - b'0');

		if negative {
			acc.saturating_mul(10).saturating_sub(digit)
		} else {
			acc.saturating_mul(10).saturating_add(digit)
		}
	})
}

fn count_digits(bytes: &[u8]) -> usize {
	bytes.iter().take_while(|byte| byte.is_ascii_digit()).count()
}
