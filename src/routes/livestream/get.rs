use crate::helpers::JsonResponse;
use crate::livestream::{LiveStreamServer, Snapshot};
use crate::models::LiveSnapshot;
use actix::Addr;
use actix_web::{get, web, Responder, Result};

/// GET /livestream
/// Current stream state and the retained chat.
#[tracing::instrument(name = "Get livestream state.", skip(server))]
#[get("")]
pub async fn state_handler(server: web::Data<Addr<LiveStreamServer>>) -> Result<impl Responder> {
    server
        .send(Snapshot)
        .await
        .map(|state| JsonResponse::build().set_item(state).ok("OK"))
        .map_err(|err| {
            tracing::error!("Livestream server unavailable: {:?}", err);
            JsonResponse::<LiveSnapshot>::build().internal_server_error("Livestream is unavailable")
        })
}
