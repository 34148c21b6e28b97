use actix_web::{web, HttpResponse};

use crate::{
    models::auth::{LoginInfo, SignUpInfo},
    repos::auth::{create_user_with_access_token, get_user_access_token},
};

/// POST /auth/signup
///
/// Registers the account and hands the access token straight back, the
/// client keeps it for every later call.
pub async fn user_sign_up(user_data: web::Json<SignUpInfo>) -> HttpResponse {
    let data = user_data.into_inner();

    match create_user_with_access_token(
        data.email,
        data.pass_code,
        data.display_name,
        data.photo,
    ) {
        Ok(token_info) => HttpResponse::Ok().json(token_info),
        Err(err) => HttpResponse::BadRequest().json(err),
    }
}

/// POST /auth/login
pub async fn user_login(user_data: web::Json<LoginInfo>) -> HttpResponse {
    let data = user_data.into_inner();

    match get_user_access_token(data.email, data.pass_code) {
        Ok(token_info) => HttpResponse::Ok().json(token_info),
        Err(err) => HttpResponse::BadRequest().json(err),
    }
}
