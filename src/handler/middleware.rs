//! Error middleware chain.
//!
//! Three ordered stages run for every request that was not answered by the
//! router or the static asset server: an error logger, a not-found responder,
//! and an internal-error responder. Stages execute in registration order and
//! each one either passes the response slot through or fills it.
//!
//! Per-request lifecycle: unhandled -> logged -> one of {not found, internal
//! error, already responded}.

use crate::error::HandlerError;
use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Minimal request information visible to chain stages.
pub struct StageContext<'a> {
    pub method: &'a str,
    pub path: &'a str,
}

/// One stage of the chain. `response` is the response produced by an earlier
/// stage, if any; a stage that does not respond must return it unchanged.
pub trait ErrorStage: Send + Sync {
    fn handle(
        &self,
        error: Option<&HandlerError>,
        ctx: &StageContext<'_>,
        response: Option<Response<Full<Bytes>>>,
    ) -> Option<Response<Full<Bytes>>>;
}

/// Stage 1: record the error for diagnostics. Never responds.
pub struct LogErrors;

impl ErrorStage for LogErrors {
    fn handle(
        &self,
        error: Option<&HandlerError>,
        ctx: &StageContext<'_>,
        response: Option<Response<Full<Bytes>>>,
    ) -> Option<Response<Full<Bytes>>> {
        if let Some(err) = error {
            logger::log_error(&format!("{} {}: {err}", ctx.method, ctx.path));
        }
        response
    }
}

/// Stage 2: answer 404 when nothing matched and no error is pending.
pub struct RespondNotFound;

impl ErrorStage for RespondNotFound {
    fn handle(
        &self,
        error: Option<&HandlerError>,
        _ctx: &StageContext<'_>,
        response: Option<Response<Full<Bytes>>>,
    ) -> Option<Response<Full<Bytes>>> {
        if response.is_none() && error.is_none() {
            return Some(http::build_404_response());
        }
        response
    }
}

/// Stage 3 (terminal): answer 500 for any error that reached this far.
pub struct RespondInternalError;

impl ErrorStage for RespondInternalError {
    fn handle(
        &self,
        error: Option<&HandlerError>,
        _ctx: &StageContext<'_>,
        response: Option<Response<Full<Bytes>>>,
    ) -> Option<Response<Full<Bytes>>> {
        if response.is_none() && error.is_some() {
            return Some(http::build_500_response());
        }
        response
    }
}

/// Ordered stage list, built once at startup and shared through `AppState`.
pub struct ErrorChain {
    stages: Vec<Box<dyn ErrorStage>>,
}

impl ErrorChain {
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    pub fn register<S: ErrorStage + 'static>(&mut self, stage: S) {
        self.stages.push(Box::new(stage));
    }

    /// The standard chain: logger, not-found, internal-error.
    pub fn default_stages() -> Self {
        let mut chain = Self::new();
        chain.register(LogErrors);
        chain.register(RespondNotFound);
        chain.register(RespondInternalError);
        chain
    }

    /// Run every stage in registration order and return the response.
    ///
    /// With the standard stages the slot is always filled at the end; a
    /// misconfigured chain degrades to a plain 404.
    pub fn run(
        &self,
        error: Option<&HandlerError>,
        ctx: &StageContext<'_>,
    ) -> Response<Full<Bytes>> {
        let mut response = None;
        for stage in &self.stages {
            response = stage.handle(error, ctx, response);
        }
        response.unwrap_or_else(|| {
            logger::log_warning("Error chain produced no response, defaulting to 404");
            http::build_404_response()
        })
    }
}

impl Default for ErrorChain {
    fn default() -> Self {
        Self::default_stages()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    fn ctx() -> StageContext<'static> {
        StageContext {
            method: "GET",
            path: "/test",
        }
    }

    fn io_error() -> HandlerError {
        HandlerError::Io(io::Error::new(io::ErrorKind::Other, "boom"))
    }

    /// Test stage that records its label and whether a response existed when
    /// it ran.
    struct Recorder {
        label: &'static str,
        seen: Arc<Mutex<Vec<(&'static str, bool)>>>,
    }

    impl ErrorStage for Recorder {
        fn handle(
            &self,
            _error: Option<&HandlerError>,
            _ctx: &StageContext<'_>,
            response: Option<Response<Full<Bytes>>>,
        ) -> Option<Response<Full<Bytes>>> {
            self.seen
                .lock()
                .unwrap()
                .push((self.label, response.is_some()));
            response
        }
    }

    #[test]
    fn test_fallthrough_yields_404() {
        let chain = ErrorChain::default_stages();
        let resp = chain.run(None, &ctx());
        assert_eq!(resp.status(), 404);
    }

    #[test]
    fn test_error_yields_500() {
        let chain = ErrorChain::default_stages();
        let err = io_error();
        let resp = chain.run(Some(&err), &ctx());
        assert_eq!(resp.status(), 500);
    }

    #[test]
    fn test_logger_passes_response_through() {
        let stage = LogErrors;
        let err = io_error();
        assert!(stage.handle(Some(&err), &ctx(), None).is_none());
    }

    #[test]
    fn test_stages_run_in_registration_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut chain = ErrorChain::new();
        chain.register(Recorder {
            label: "first",
            seen: Arc::clone(&seen),
        });
        chain.register(RespondNotFound);
        chain.register(Recorder {
            label: "after_responder",
            seen: Arc::clone(&seen),
        });

        let resp = chain.run(None, &ctx());
        assert_eq!(resp.status(), 404);

        let seen = seen.lock().unwrap();
        // First stage ran before the responder filled the slot, the last one
        // after.
        assert_eq!(seen.as_slice(), &[("first", false), ("after_responder", true)]);
    }

    #[test]
    fn test_logger_runs_before_500_is_emitted() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut chain = ErrorChain::new();
        chain.register(LogErrors);
        chain.register(Recorder {
            label: "between",
            seen: Arc::clone(&seen),
        });
        chain.register(RespondInternalError);

        let err = io_error();
        let resp = chain.run(Some(&err), &ctx());
        assert_eq!(resp.status(), 500);
        // No response existed yet right after the logger stage.
        assert_eq!(seen.lock().unwrap().as_slice(), &[("between", false)]);
    }

    #[test]
    fn test_responders_pass_through_existing_response() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut chain = ErrorChain::new();
        chain.register(RespondNotFound);
        chain.register(RespondInternalError);
        chain.register(Recorder {
            label: "last",
            seen: Arc::clone(&seen),
        });

        // Fallthrough fills the slot at stage one; the terminal responder
        // must not replace it even though no error is present.
        let resp = chain.run(None, &ctx());
        assert_eq!(resp.status(), 404);
        assert_eq!(seen.lock().unwrap().as_slice(), &[("last", true)]);
    }

    #[test]
    fn test_empty_chain_defaults_to_404() {
        let chain = ErrorChain::new();
        let resp = chain.run(None, &ctx());
        assert_eq!(resp.status(), 404);
    }
}
