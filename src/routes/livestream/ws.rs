use crate::livestream::{LiveStreamServer, LiveStreamSocket};
use actix::Addr;
use actix_web::{get, web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;

/// GET /livestream/ws
/// Upgrades to a websocket that streams every livestream event.
#[tracing::instrument(name = "Livestream websocket connection", skip(req, stream, server))]
#[get("/ws")]
pub async fn ws_handler(
    req: HttpRequest,
    stream: web::Payload,
    server: web::Data<Addr<LiveStreamServer>>,
) -> Result<HttpResponse, Error> {
    ws::start(LiveStreamSocket::new(server.get_ref().clone()), &req, stream)
}
