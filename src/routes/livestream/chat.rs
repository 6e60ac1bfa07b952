use crate::helpers::JsonResponse;
use crate::livestream::{validate_chat, LiveCommand, LiveStreamServer};
use crate::models::LiveSnapshot;
use actix::Addr;
use actix_web::{post, web, Responder, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChatForm {
    pub author: String,
    pub text: String,
}

/// POST /livestream/chat
#[tracing::instrument(name = "Add livestream chat message.", skip(server))]
#[post("/chat")]
pub async fn chat_handler(
    form: web::Json<ChatForm>,
    server: web::Data<Addr<LiveStreamServer>>,
) -> Result<impl Responder> {
    let form = form.into_inner();
    let (author, text) = validate_chat(&form.author, &form.text)
        .map_err(|err| JsonResponse::<LiveSnapshot>::build().form_error(err))?;

    super::apply(server.get_ref(), LiveCommand::AddChatMessage { author, text })
        .await
        .map(|state| JsonResponse::build().set_item(state).ok("OK"))
}
