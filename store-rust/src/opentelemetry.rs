use crate::StoreError;
use opentelemetry::trace::Status;
use std::future::Future;
use tracing::{info_span, Span};
use tracing_futures::Instrument;
use tracing_opentelemetry::OpenTelemetrySpanExt;

/// Span covering one asynchronous store operation, from dispatch to
/// settlement.
pub struct OperationSpan {
    span: Span,
}

impl OperationSpan {
    pub fn new(slice: &'static str, operation: &'static str) -> Self {
        let span = info_span!("scrummate.operation");
        span.set_attribute("scrummate.slice", slice);
        span.set_attribute("scrummate.operation", operation);
        Self { span }
    }

    pub async fn instrument_future<F>(&self, future: F) -> F::Output
    where
        F: Future,
    {
        future.instrument(self.span.clone()).await
    }

    pub fn on_fulfilled(&self) {
        self.span.set_attribute("scrummate.settlement", "fulfilled");
    }

    pub fn on_rejected(&self, error: &StoreError) {
        self.span.set_attribute("scrummate.settlement", "rejected");
        self.span.set_attribute("error.message", error.to_string());
        self.span.set_status(Status::error(error.to_string()));
    }
}
