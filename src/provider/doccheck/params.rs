//! DocCheck authorization parameters: language and template whitelists plus the filter that
//! turns generic OAuth parameters into the set the login page accepts.

// self
use crate::_prelude::*;

/// Query parameter selecting the login page language.
pub const LANGUAGE_PARAM: &str = "dc_language";
/// Query parameter selecting the login page template.
pub const TEMPLATE_PARAM: &str = "dc_template";
/// Generic parameters the DocCheck authorization endpoint does not accept.
///
/// Scope is governed by the consent form configured with DocCheck support, not by the request.
pub const UNSUPPORTED_PARAMS: [&str; 3] = ["scope", "response_type", "approval_prompt"];

/// Error returned when parsing an unknown language or template code.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Unknown DocCheck {kind} `{value}`.")]
pub struct UnknownCodeError {
	/// `language` or `template`.
	pub kind: &'static str,
	/// Rejected value.
	pub value: String,
}

macro_rules! def_code {
	($(#[$meta:meta])* $name:ident, $kind:literal, fallback = $fallback:ident, { $($variant:ident => $code:literal),+ $(,)? }) => {
		$(#[$meta])*
		#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
		pub enum $name {
			$(
				#[doc = concat!("`", $code, "`")]
				#[serde(rename = $code)]
				$variant,
			)+
		}
		impl $name {
			/// Every accepted value, in DocCheck's documented order.
			pub const ALL: &'static [Self] = &[$(Self::$variant),+];
			/// Value substituted for unsupported input.
			pub const FALLBACK: Self = Self::$fallback;

			/// Returns the wire code.
			pub const fn as_str(self) -> &'static str {
				match self {
					$(Self::$variant => $code,)+
				}
			}

			/// Returns `true` when `value` is an accepted wire code (exact, case-sensitive).
			pub fn is_allowed(value: &str) -> bool {
				value.parse::<Self>().is_ok()
			}
		}
		impl Default for $name {
			fn default() -> Self {
				Self::FALLBACK
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(self.as_str())
			}
		}
		impl FromStr for $name {
			type Err = UnknownCodeError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				match s {
					$($code => Ok(Self::$variant),)+
					_ => Err(UnknownCodeError { kind: $kind, value: s.to_owned() }),
				}
			}
		}
	};
}

def_code! {
	/// Language versions of the DocCheck login page.
	Language, "language", fallback = Com, {
		De => "de",
		Com => "com",
		Fr => "fr",
		Nl => "nl",
		It => "it",
		Es => "es",
	}
}

def_code! {
	/// Templates of the DocCheck login page.
	Template, "template", fallback = SMobile, {
		LoginS => "login_s",
		LoginM => "login_m",
		LoginL => "login_l",
		LoginXl => "login_xl",
		FullscreenDc => "fullscreen_dc",
		SMobile => "s_mobile",
	}
}

impl Language {
	/// Query parameter carrying the language.
	pub const PARAM: &'static str = LANGUAGE_PARAM;
}

impl Template {
	/// Query parameter carrying the template.
	pub const PARAM: &'static str = TEMPLATE_PARAM;
}

/// Rewrites generic authorization parameters into the set DocCheck accepts.
///
/// Drops [`UNSUPPORTED_PARAMS`] and replaces an unsupported `dc_language`/`dc_template` with
/// its fallback. Absent keys stay absent; everything else passes through.
pub fn filter_authorization_parameters(
	mut params: BTreeMap<String, String>,
) -> BTreeMap<String, String> {
	for key in UNSUPPORTED_PARAMS {
		params.remove(key);
	}

	if let Some(language) = params.get_mut(LANGUAGE_PARAM)
		&& !Language::is_allowed(language)
	{
		*language = Language::FALLBACK.as_str().to_owned();
	}
	if let Some(template) = params.get_mut(TEMPLATE_PARAM)
		&& !Template::is_allowed(template)
	{
		*template = Template::FALLBACK.as_str().to_owned();
	}

	params
}
