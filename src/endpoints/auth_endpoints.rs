use actix_web::web;

use super::handlers::rest::auth::{user_login, user_sign_up};

pub fn auth_config(config: &mut web::ServiceConfig) {
    config
        .service(web::resource("/auth/signup").route(web::post().to(user_sign_up)))
        .service(web::resource("/auth/login").route(web::post().to(user_login)));
}
