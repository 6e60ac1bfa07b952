use super::get_header;
use crate::configuration::Settings;
use crate::helpers::JsonResponse;
use actix_web::{dev::Payload, web, Error, FromRequest, HttpRequest};
use std::future::{ready, Ready};

/// Proof that the request carried the admin bearer token. Taking it as a
/// handler argument is what guards a route.
#[derive(Debug, Clone, Copy)]
pub struct AdminAccess;

fn bearer_token(authorization: &str) -> Option<&str> {
    let (scheme, token) = authorization.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

// Compares every byte so the time taken does not depend on the match length.
fn tokens_match(expected: &str, provided: &str) -> bool {
    let expected = expected.as_bytes();
    let provided = provided.as_bytes();
    if expected.len() != provided.len() {
        return false;
    }
    expected
        .iter()
        .zip(provided)
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

#[tracing::instrument(name = "try authorize admin.", skip(req))]
fn try_authorize(req: &HttpRequest) -> Result<AdminAccess, Error> {
    let expected = req
        .app_data::<web::Data<Settings>>()
        .and_then(|settings| settings.admin_token.clone());
    let expected = match expected {
        Some(token) => token,
        None => {
            tracing::warn!("ADMIN_TOKEN is not configured, admin routes are closed");
            return Err(JsonResponse::<String>::build().forbidden("Admin access is disabled"));
        }
    };

    let authorization = get_header::<String>(req, "authorization")
        .map_err(|err| JsonResponse::<String>::build().unauthorized(err))?
        .ok_or_else(|| JsonResponse::<String>::build().unauthorized("Authorization header is not set"))?;

    let token = bearer_token(&authorization).ok_or_else(|| {
        JsonResponse::<String>::build().unauthorized("Authorization header must be a bearer token")
    })?;

    if !tokens_match(&expected, token) {
        tracing::warn!("Rejected admin request with a wrong token");
        return Err(JsonResponse::<String>::build().forbidden("Wrong admin token"));
    }

    Ok(AdminAccess)
}

impl FromRequest for AdminAccess {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(try_authorize(req))
    }
}
