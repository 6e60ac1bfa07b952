use crate::configuration::Settings;
use crate::livestream::LiveStreamServer;
use crate::routes;
use actix::Actor;
use actix_cors::Cors;
use actix_web::{dev::Server, error, http, middleware, web, App, HttpServer};
use sqlx::{Pool, Postgres};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub async fn run(
    listener: TcpListener,
    pg_pool: Pool<Postgres>,
    settings: Settings,
) -> Result<Server, std::io::Error> {
    // one session per process, reset on restart
    let livestream = LiveStreamServer::new(settings.livestream.chat_capacity).start();
    let livestream = web::Data::new(livestream);

    let settings = web::Data::new(settings);
    let pg_pool = web::Data::new(pg_pool);

    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let msg: String = match err {
            error::JsonPayloadError::Deserialize(err) => format!(
                "{{\"kind\":\"deserialize\",\"line\":{}, \"column\":{}, \"msg\":{}}}",
                err.line(),
                err.column(),
                serde_json::Value::String(err.to_string())
            ),
            _ => format!(
                "{{\"kind\":\"other\",\"msg\":{}}}",
                serde_json::Value::String(err.to_string())
            ),
        };
        error::InternalError::new(msg, http::StatusCode::BAD_REQUEST).into()
    });

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(middleware::Compress::default())
            .wrap(Cors::permissive())
            .service(web::scope("/health_check").service(routes::health_check))
            .service(
                web::scope("/faqs")
                    .service(routes::faq::list_handler)
                    .service(routes::faq::item_handler),
            )
            .service(
                web::scope("/livestream")
                    .service(routes::livestream::state_handler)
                    .service(routes::livestream::ws_handler)
                    .service(routes::livestream::chat_handler),
            )
            .service(
                web::scope("/users")
                    .service(routes::user::list_handler)
                    .service(routes::user::item_handler)
                    .service(routes::user::update_handler),
            )
            .service(
                web::scope("/admin")
                    .service(
                        web::scope("/faqs")
                            .service(routes::faq::admin_list_handler)
                            .service(routes::faq::add_handler)
                            .service(routes::faq::update_handler)
                            .service(routes::faq::delete_handler),
                    )
                    .service(
                        web::scope("/livestream")
                            .service(routes::livestream::start_handler)
                            .service(routes::livestream::stop_handler)
                            .service(routes::livestream::viewers_handler)
                            .service(routes::livestream::likes_handler)
                            .service(routes::livestream::clear_chat_handler),
                    ),
            )
            .app_data(json_config.clone())
            .app_data(pg_pool.clone())
            .app_data(livestream.clone())
            .app_data(settings.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
