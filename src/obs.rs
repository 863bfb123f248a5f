//! Optional observability helpers for client flows.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `oauth2_doccheck.flow` with the `flow` and
//!   `stage` (call site) fields.
//! - Enable `metrics` to increment the `oauth2_doccheck_flow_total` counter for every
//!   attempt/success/failure, labeled by `flow` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Flows observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowKind {
	/// Authorization URL construction.
	AuthorizationUrl,
	/// Authorization code exchange.
	ExchangeCode,
	/// Refresh token grant.
	Refresh,
	/// User-info fetch.
	ResourceOwner,
}
impl FlowKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowKind::AuthorizationUrl => "authorization_url",
			FlowKind::ExchangeCode => "exchange_code",
			FlowKind::Refresh => "refresh_token",
			FlowKind::ResourceOwner => "fetch_resource_owner",
		}
	}
}
impl Display for FlowKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowOutcome {
	/// Entry to a client flow.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl FlowOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowOutcome::Attempt => "attempt",
			FlowOutcome::Success => "success",
			FlowOutcome::Failure => "failure",
		}
	}

	/// Maps a flow result onto its terminal outcome.
	pub fn of<T, E>(result: &Result<T, E>) -> Self {
		match result {
			Ok(_) => FlowOutcome::Success,
			Err(_) => FlowOutcome::Failure,
		}
	}
}
impl Display for FlowOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Runs `flow` inside `span`, recording the attempt and its terminal outcome.
pub(crate) async fn observe<T, F>(span: FlowSpan, flow: F) -> Result<T>
where
	F: Future<Output = Result<T>>,
{
	record_flow_outcome(span.kind(), FlowOutcome::Attempt);

	let result = span.instrument(flow).await;

	span.record_outcome(&result);
	record_flow_outcome(span.kind(), FlowOutcome::of(&result));

	result
}
