mod admin;
mod chat;
mod get;
mod ws;

pub use admin::*;
pub use chat::*;
pub use get::*;
pub use ws::*;

use crate::helpers::JsonResponse;
use crate::livestream::{Apply, LiveCommand, LiveStreamServer};
use crate::models::LiveSnapshot;
use actix::Addr;

pub(crate) async fn apply(
    server: &Addr<LiveStreamServer>,
    command: LiveCommand,
) -> Result<LiveSnapshot, actix_web::Error> {
    server.send(Apply(command)).await.map_err(|err| {
        tracing::error!("Livestream server unavailable: {:?}", err);
        JsonResponse::<LiveSnapshot>::build().internal_server_error("Livestream is unavailable")
    })
}
