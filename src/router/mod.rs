pub use matcher::Match;
pub use params::Params;
pub use path::tokenize;
pub use table::{RouteEntry, RouteTable};
pub use template::{MatchMode, RouteTemplate, Segment};

use tracing::{debug, error, info, warn};

use crate::{
    error::{DispatchError, RouteError},
    request::Request,
    response_writer::ResponseWriter,
    server::{Handler, HttpMethod},
    status_code_registry::Status,
};

mod matcher;
mod params;
mod path;
mod table;
mod template;

/// Handler for a matched GET route.
pub trait RouteHandler {
    fn handle(&self, w: &mut ResponseWriter, r: &Request, params: &Params);
}

impl<T> RouteHandler for T
where
    T: Fn(&mut ResponseWriter, &Request, &Params),
{
    fn handle(&self, w: &mut ResponseWriter, r: &Request, params: &Params) {
        self(w, r, params)
    }
}

type BoxedHandler = Box<dyn Handler + Send + Sync>;

/// Which handler a request was dispatched to.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Dispatch<'a> {
    /// A GET route matched.
    Matched { pattern: &'a str },
    /// No GET route matched and the no-route handler ran.
    NoRoute,
    /// No GET route matched and there is no no-route handler.
    Dropped,
    Post,
    InvalidMethod,
}

/// Dispatches requests by method, and GET requests by path.
///
/// The route table is fixed once built, so a `Router` can be shared between
/// threads and dispatched to concurrently.
pub struct Router {
    routes: RouteTable,
    post: Option<BoxedHandler>,
    invalid: Option<BoxedHandler>,
    no_route: Option<BoxedHandler>,
}

impl Router {
    pub fn builder(mode: MatchMode) -> RouterBuilder {
        RouterBuilder::new(mode)
    }

    pub fn mode(&self) -> MatchMode {
        self.routes.mode()
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Resolves a GET path without invoking anything.
    pub fn pattern_match(&self, request_target: &str) -> Option<Match> {
        matcher::pattern_match(&self.routes, strip_query(request_target))
    }

    pub fn dispatch(
        &self,
        w: &mut ResponseWriter,
        r: &Request,
    ) -> Result<Dispatch, DispatchError> {
        let Ok(http_method) = r.get_http_method().parse::<HttpMethod>() else {
            let handler = required(&self.invalid, None)?;
            handler.handle(w, r);
            return Ok(Dispatch::InvalidMethod);
        };

        match http_method {
            HttpMethod::Get => Ok(self.dispatch_get(w, r)),
            HttpMethod::Post => {
                let handler = required(&self.post, Some(HttpMethod::Post))?;
                handler.handle(w, r);
                Ok(Dispatch::Post)
            }
        }
    }

    fn dispatch_get(&self, w: &mut ResponseWriter, r: &Request) -> Dispatch {
        if let Some(m) = self.pattern_match(r.get_request_target()) {
            info!("match: {}", m.pattern);
            m.handler.handle(w, r, &m.params);
            return Dispatch::Matched { pattern: m.pattern };
        }

        match &self.no_route {
            Some(handler) => {
                handler.handle(w, r);
                Dispatch::NoRoute
            }
            None => {
                warn!("no route and no fallback, request dropped");
                Dispatch::Dropped
            }
        }
    }
}

impl Handler for Router {
    fn handle(&self, w: &mut ResponseWriter, r: &Request) {
        match self.dispatch(w, r) {
            Ok(dispatch) => debug!(?dispatch),
            Err(err) => {
                error!(%err);
                w.set_status(Status::InternalServerError);
            }
        }
    }
}

fn required(
    handler: &Option<BoxedHandler>,
    method: Option<HttpMethod>,
) -> Result<&(dyn Handler + Send + Sync), DispatchError> {
    handler
        .as_deref()
        .ok_or(DispatchError::NoHandlerConfigured { method })
}

fn strip_query(request_target: &str) -> &str {
    request_target
        .split_once('?')
        .map_or(request_target, |(path, _)| path)
}

pub struct RouterBuilder {
    routes: RouteTable,
    post: Option<BoxedHandler>,
    invalid: Option<BoxedHandler>,
    no_route: Option<BoxedHandler>,
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self::new(MatchMode::default())
    }
}

impl RouterBuilder {
    pub fn new(mode: MatchMode) -> Self {
        Self {
            routes: RouteTable::new(mode),
            post: None,
            invalid: None,
            no_route: None,
        }
    }

    pub fn get(
        mut self,
        template: impl Into<String>,
        handler: impl RouteHandler + Send + Sync + 'static,
    ) -> Result<Self, RouteError> {
        let template = RouteTemplate::parse(template, self.routes.mode())?;
        self.routes.register(template, handler)?;
        Ok(self)
    }

    /// Like [`RouterBuilder::get`], for configurations that key GET routes
    /// by their segment count.
    pub fn get_at(
        mut self,
        arity: usize,
        template: impl Into<String>,
        handler: impl RouteHandler + Send + Sync + 'static,
    ) -> Result<Self, RouteError> {
        let template = RouteTemplate::parse(template, self.routes.mode())?;
        if template.arity() != arity {
            return Err(RouteError::ArityMismatch {
                template: template.pattern().to_owned(),
                expected: arity,
                found: template.arity(),
            });
        }
        self.routes.register(template, handler)?;
        Ok(self)
    }

    pub fn post(mut self, handler: impl Handler + Send + Sync + 'static) -> Self {
        self.post = Some(Box::new(handler));
        self
    }

    pub fn invalid(mut self, handler: impl Handler + Send + Sync + 'static) -> Self {
        self.invalid = Some(Box::new(handler));
        self
    }

    pub fn no_route(mut self, handler: impl Handler + Send + Sync + 'static) -> Self {
        self.no_route = Some(Box::new(handler));
        self
    }

    pub fn build(self) -> Router {
        if self.post.is_none() {
            warn!("no POST handler configured");
        }
        if self.invalid.is_none() {
            warn!("no invalid method handler configured");
        }
        if self.no_route.is_none() {
            warn!("no fallback handler configured, unmatched GET requests will be dropped");
        }
        info!(mode = %self.routes.mode(), routes = self.routes.len(), "router built");

        Router {
            routes: self.routes,
            post: self.post,
            invalid: self.invalid,
            no_route: self.no_route,
        }
    }
}

#[cfg(test)]
pub fn noop_route_handler() -> impl RouteHandler + Send + Sync {
    |_: &mut ResponseWriter, _: &Request, _: &Params| {}
}
