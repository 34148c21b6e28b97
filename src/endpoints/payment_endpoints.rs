use actix_web::web;

use super::handlers::rest::checkout::{checkout, create_payment_intent};

pub fn payment_config(config: &mut web::ServiceConfig) {
    config
        .service(
            web::resource("/payments/create-payment-intent")
                .route(web::post().to(create_payment_intent)),
        )
        .service(web::resource("/payments/checkout").route(web::post().to(checkout)));
}
