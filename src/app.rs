use tracing::info;

use crate::{
    error::RouteError,
    request::Request,
    response_writer::ResponseWriter,
    router::{MatchMode, Params, Router},
    server::HttpMethod,
    status_code_registry::Status,
};

fn get_resource(w: &mut ResponseWriter, _: &Request, params: &Params) {
    let resource = params.get("resource").unwrap_or_default();
    w.set_status(Status::OK);
    w.set_body_str(&format!("resource={}", resource));
}

fn get_item(w: &mut ResponseWriter, _: &Request, params: &Params) {
    let resource = params.get("resource").unwrap_or_default();
    let id = params.get("id").unwrap_or_default();
    w.set_status(Status::OK);
    w.set_body_str(&format!("resource={} id={}", resource, id));
}

fn create(w: &mut ResponseWriter, r: &Request) {
    let len = r.get_body().map_or(0, <[u8]>::len);
    info!(len, "create");
    w.set_status(Status::Created);
}

fn invalid(w: &mut ResponseWriter, _: &Request) {
    w.set_status(Status::MethodNotAllowed);
    w.add_allow_header(&[HttpMethod::Get, HttpMethod::Post]);
}

fn no_route(w: &mut ResponseWriter, _: &Request) {
    w.set_status(Status::NotFound);
    w.set_body_str("no route");
}

/// `/:resource` and `/:resource/:id` over GET, one POST endpoint, and
/// fallbacks for everything else.
pub fn player_api(mode: MatchMode) -> Result<Router, RouteError> {
    let router = Router::builder(mode)
        .get_at(1, "/:resource", get_resource)?
        .get_at(2, "/:resource/:id", get_item)?
        .post(create)
        .invalid(invalid)
        .no_route(no_route)
        .build();
    Ok(router)
}
