//! Error classification for token and user-info responses.

// self
use crate::{_prelude::*, error::ProviderError, http::ProviderResponse};

/// Classifies a token or user-info response.
///
/// Status 400 and above is a [`ProviderErrorKind::Client`](crate::error::ProviderErrorKind)
/// failure regardless of body. Below 400, a truthy `error` field is an in-band
/// [`ProviderErrorKind::OAuth`](crate::error::ProviderErrorKind) failure.
pub fn classify_response(
	response: &ProviderResponse,
	data: &Map<String, Value>,
) -> Result<(), ProviderError> {
	if response.status >= 400 {
		return Err(ProviderError::client(response, data));
	}
	if data.get("error").is_some_and(is_truthy) {
		return Err(ProviderError::oauth(response, data));
	}

	Ok(())
}

// `null`, `false`, `""`, `"0"`, numeric zero, and empty containers do not count as an error.
fn is_truthy(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::Bool(flag) => *flag,
		Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.),
		Value::String(text) => !text.is_empty() && text != "0",
		Value::Array(items) => !items.is_empty(),
		Value::Object(fields) => !fields.is_empty(),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::error::ProviderErrorKind;

	fn classify(status: u16, reason: &str, body: &str) -> Result<(), ProviderError> {
		let response = ProviderResponse { status, reason: reason.into(), body: body.into() };
		let data = response.json_object().unwrap_or_default();

		classify_response(&response, &data)
	}

	#[test]
	fn success_without_error_passes() {
		assert!(classify(200, "OK", r#"{"access_token":"t"}"#).is_ok());
		assert!(classify(302, "Found", "").is_ok());
	}

	#[test]
	fn in_band_error_on_success_status() {
		let body =
			r#"{"error":"bad_request","error_description":"Authorization code not found or not valid."}"#;
		let err = classify(200, "OK", body).expect_err("In-band error must be reported.");

		assert_eq!(err.kind, ProviderErrorKind::OAuth);
		assert_eq!(err.status, 200);
		assert_eq!(err.message, "Authorization code not found or not valid.");
		assert_eq!(err.body, body);
	}

	#[test]
	fn falsy_error_values_are_ignored() {
		for error in [r#"null"#, "false", r#""""#, r#""0""#, "0", "0.0", "[]", "{}"] {
			let body = format!(r#"{{"error":{error},"access_token":"t"}}"#);

			assert!(classify(200, "OK", &body).is_ok(), "Error value {error} must be falsy.");
		}
	}

	#[test]
	fn truthy_error_values_are_reported() {
		for error in [r#""x""#, "true", "1", "-2", r#"["x"]"#, r#"{"a":1}"#] {
			let body = format!(r#"{{"error":{error}}}"#);
			let err = classify(200, "OK", &body).expect_err("Truthy error must be reported.");

			assert_eq!(err.kind, ProviderErrorKind::OAuth);
			assert_eq!(err.message, "OK");
		}
	}

	#[test]
	fn client_status_wins_over_body() {
		let err = classify(400, "Bad Request", r#"{"error_description":"Missing code."}"#)
			.expect_err("Status 400 must be reported.");

		assert_eq!(err.kind, ProviderErrorKind::Client);
		assert_eq!(err.message, "Missing code.");

		let err = classify(500, "Internal Server Error", "<html>oops</html>")
			.expect_err("Status 500 must be reported.");

		assert_eq!(err.kind, ProviderErrorKind::Client);
		assert_eq!(err.message, "Internal Server Error");
		assert_eq!(err.body, "<html>oops</html>");
	}
}
