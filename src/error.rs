use thiserror::Error;

use crate::server::HttpMethod;

/// Rejected route registrations. These surface while the router is being
/// built, before any traffic is served.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum RouteError {
    #[error("template {template:?} has no segments")]
    EmptyTemplate { template: String },

    #[error("template {template:?} contains a capture without a name")]
    UnnamedCapture { template: String },

    #[error("template {template:?} captures {name:?} more than once")]
    DuplicateCapture { template: String, name: String },

    #[error("template {template:?} has {found} segments but was registered for {expected}")]
    ArityMismatch {
        template: String,
        expected: usize,
        found: usize,
    },

    #[error("template {template:?} has the same arity ({arity}) as {existing:?}")]
    AmbiguousArity {
        template: String,
        existing: String,
        arity: usize,
    },

    #[error("template {template:?} conflicts with {existing:?}")]
    Conflict { template: String, existing: String },
}

/// Failures the dispatcher cannot recover from locally.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum DispatchError {
    /// The request's method has no handler configured. `None` stands for a
    /// method outside of [`HttpMethod`], i.e. the invalid-method handler.
    #[error("no handler configured for method {}", display_method(.method))]
    NoHandlerConfigured { method: Option<HttpMethod> },
}

fn display_method(method: &Option<HttpMethod>) -> String {
    match method {
        Some(method) => method.to_string(),
        None => "<invalid>".to_owned(),
    }
}
