pub use config::Config;
pub use error::{DispatchError, RouteError};
pub use request::Request;
pub use response_writer::ResponseWriter;
pub use router::{
    tokenize, Dispatch, Match, MatchMode, Params, RouteEntry, RouteHandler, RouteTable,
    RouteTemplate, Router, RouterBuilder, Segment,
};
pub use server::{Handler, HttpMethod, Server};
pub use status_code_registry::Status;

use tracing::info;

pub mod app;
mod config;
mod error;
mod request;
mod response_writer;
mod router;
mod server;
mod status_code_registry;
#[cfg(test)]
mod test_utils;

pub fn run(config: &Config) -> anyhow::Result<()> {
    let router = app::player_api(config.mode)?;

    let server = Server::new(config.addr.as_str())?.with_read_timeout(config.read_timeout());
    info!(addr = %server.local_addr()?, mode = %config.mode, "listening");
    server.run(router);
    Ok(())
}
