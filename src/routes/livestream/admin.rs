use crate::helpers::JsonResponse;
use crate::livestream::{LiveCommand, LiveStreamServer};
use crate::middleware::AdminAccess;
use crate::models::{LiveSnapshot, StreamPatch};
use actix::Addr;
use actix_web::{delete, post, put, web, Responder, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CountForm {
    pub value: i64,
}

/// An empty body is an empty patch. Anything else has to be a valid
/// `StreamPatch` document.
fn parse_start_body(body: &[u8]) -> Result<StreamPatch, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(StreamPatch::default());
    }
    serde_json::from_slice(body)
}

/// POST /admin/livestream/start
/// Merges the given metadata into the current stream and goes live.
#[tracing::instrument(name = "Admin start livestream.", skip(body, server))]
#[post("/start")]
pub async fn start_handler(
    _admin: AdminAccess,
    body: web::Bytes,
    server: web::Data<Addr<LiveStreamServer>>,
) -> Result<impl Responder> {
    let patch = parse_start_body(&body).map_err(|err| {
        JsonResponse::<LiveSnapshot>::build().form_error(format!("Invalid stream metadata: {err}"))
    })?;

    super::apply(server.get_ref(), LiveCommand::Start(patch))
        .await
        .map(|state| JsonResponse::build().set_item(state).ok("Stream started"))
}

#[tracing::instrument(name = "Admin stop livestream.", skip(server))]
#[post("/stop")]
pub async fn stop_handler(
    _admin: AdminAccess,
    server: web::Data<Addr<LiveStreamServer>>,
) -> Result<impl Responder> {
    super::apply(server.get_ref(), LiveCommand::Stop)
        .await
        .map(|state| JsonResponse::build().set_item(state).ok("Stream stopped"))
}

#[tracing::instrument(name = "Admin set livestream viewers.", skip(server))]
#[put("/viewers")]
pub async fn viewers_handler(
    _admin: AdminAccess,
    form: web::Json<CountForm>,
    server: web::Data<Addr<LiveStreamServer>>,
) -> Result<impl Responder> {
    let form = form.into_inner();
    super::apply(
        server.get_ref(),
        LiveCommand::SetViewerCount { count: form.value },
    )
    .await
    .map(|state| JsonResponse::build().set_item(state).ok("OK"))
}

#[tracing::instrument(name = "Admin set livestream likes.", skip(server))]
#[put("/likes")]
pub async fn likes_handler(
    _admin: AdminAccess,
    form: web::Json<CountForm>,
    server: web::Data<Addr<LiveStreamServer>>,
) -> Result<impl Responder> {
    let form = form.into_inner();
    super::apply(server.get_ref(), LiveCommand::SetLikes { likes: form.value })
        .await
        .map(|state| JsonResponse::build().set_item(state).ok("OK"))
}

#[tracing::instrument(name = "Admin clear livestream chat.", skip(server))]
#[delete("/chat")]
pub async fn clear_chat_handler(
    _admin: AdminAccess,
    server: web::Data<Addr<LiveStreamServer>>,
) -> Result<impl Responder> {
    super::apply(server.get_ref(), LiveCommand::ClearChatMessages)
        .await
        .map(|state| JsonResponse::build().set_item(state).ok("Chat cleared"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_start_body_is_empty_patch() {
        assert_eq!(parse_start_body(b"").unwrap(), StreamPatch::default());
        assert_eq!(parse_start_body(b" \n").unwrap(), StreamPatch::default());
    }

    #[test]
    fn test_start_body_must_be_a_stream_patch() {
        let patch = parse_start_body(br#"{"title": "Glow"}"#).unwrap();
        assert_eq!(patch.title.as_deref(), Some("Glow"));

        assert!(parse_start_body(br#"{"title": 42}"#).is_err());
        assert!(parse_start_body(b"title=Glow").is_err());
    }
}
