// self
use crate::{_prelude::*, obs::FlowKind};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedFlow<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedFlow<F> = F;

/// Span wrapping a single client flow.
///
/// With `tracing` enabled this is an `oauth2_doccheck.flow` span carrying `flow` and `stage`;
/// otherwise only the labels are kept.
#[derive(Clone, Debug)]
pub struct FlowSpan {
	kind: FlowKind,
	stage: &'static str,
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl FlowSpan {
	/// Creates a new span tagged with the provided flow kind + stage.
	pub fn new(kind: FlowKind, stage: &'static str) -> Self {
		Self {
			kind,
			stage,
			#[cfg(feature = "tracing")]
			span: tracing::info_span!("oauth2_doccheck.flow", flow = kind.as_str(), stage),
		}
	}

	/// Flow this span belongs to.
	pub fn kind(&self) -> FlowKind {
		self.kind
	}

	/// Call site label.
	pub fn stage(&self) -> &'static str {
		self.stage
	}

	/// Enters the span for synchronous sections.
	pub fn entered(self) -> FlowSpanGuard {
		#[cfg(feature = "tracing")]
		{
			FlowSpanGuard { guard: self.span.entered() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = self;

			FlowSpanGuard {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedFlow<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}

	/// Emits the terminal outcome as an event inside the span.
	///
	/// Failures are logged with the error's display text, which never carries token values.
	pub fn record_outcome<T>(&self, result: &Result<T>) {
		#[cfg(feature = "tracing")]
		{
			use crate::obs::FlowOutcome;

			let _entered = self.span.enter();

			match result {
				Ok(_) => tracing::debug!(outcome = FlowOutcome::Success.as_str(), "Flow completed."),
				Err(e) => tracing::warn!(
					outcome = FlowOutcome::Failure.as_str(),
					error = %e,
					"Flow failed."
				),
			}
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = result;
		}
	}
}

/// RAII guard returned by [`FlowSpan::entered`].
pub struct FlowSpanGuard {
	#[cfg(feature = "tracing")]
	#[allow(dead_code)]
	guard: tracing::span::EnteredSpan,
}
impl Debug for FlowSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("FlowSpanGuard(..)")
	}
}
