use crate::{ApiError, ApiRequest, ApiResponse};
use opentelemetry::trace::Status;
use std::time::Instant;
use tracing::{info_span, Span};
use tracing_futures::Instrument;
use tracing_opentelemetry::OpenTelemetrySpanExt;

pub struct RequestSpan {
    span: Span,
    start_time: Instant,
}

impl RequestSpan {
    pub fn new(request: &ApiRequest) -> Self {
        let span = info_span!("scrummate.http");
        span.set_attribute("http.request.method", request.method.to_string());
        span.set_attribute("url.path", request.full_path());
        span.set_attribute("scrummate.authenticated", request.bearer.is_some());

        Self {
            span,
            start_time: Instant::now(),
        }
    }

    pub async fn instrument_future<F>(&self, future: F) -> F::Output
    where
        F: std::future::Future,
    {
        future.instrument(self.span.clone()).await
    }

    pub fn on_response(&self, response: &ApiResponse) {
        self.span.set_attribute(
            "http.response.status_code",
            i64::from(response.status.as_u16()),
        );
        self.finish();
    }

    pub fn on_error(&self, error: &ApiError) {
        if let Some(status) = error.status() {
            self.span
                .set_attribute("http.response.status_code", i64::from(status.as_u16()));
        }
        self.span.set_attribute("error.message", error.to_string());
        self.span.set_status(Status::error(error.to_string()));
        self.finish();
    }

    fn finish(&self) {
        let elapsed = self.start_time.elapsed();
        #[allow(clippy::cast_possible_truncation)]
        self.span
            .set_attribute("scrummate.duration_ms", elapsed.as_millis() as i64);
    }
}
