use actix_web::{web, HttpResponse};
use r2d2::Pool;
use redis::Client;
use serde::Deserialize;
use serde_json::json;

use crate::{
    config::Env,
    models::ErrorMessage,
    repos::{
        auth::get_profile,
        checkout::{
            form::ApplicationForm,
            gateway::{CardDetails, PaymentGateway, StripeGateway},
            store::RedisApplicationStore,
            ApplicantProfile, CheckoutError, CheckoutOrchestrator, ScholarshipOffer,
        },
        graphql::scholarship::ScholarshipRepo,
    },
};

#[derive(Deserialize)]
pub struct CreateIntentRequest {
    pub amount: f64,
}

/// POST /payments/create-payment-intent
///
/// Thin wrapper for clients that drive the card widget themselves, hands the
/// intent's client secret back as the gateway issued it.
pub async fn create_payment_intent(body: web::Json<CreateIntentRequest>) -> HttpResponse {
    let data = body.into_inner();
    if data.amount <= 0.0 {
        return HttpResponse::BadRequest().json(ErrorMessage {
            message: "Amount must be greater than zero".to_string(),
        });
    }

    // the gateway client blocks, keep it off the async workers
    let created = web::block(move || {
        let config = Env::env_init();
        StripeGateway::from_env(&config).create_intent(data.amount)
    })
    .await;

    match created {
        Ok(Ok(intent)) => HttpResponse::Ok().json(json!({ "clientSecret": intent.client_secret })),
        Ok(Err(err)) => HttpResponse::ServiceUnavailable().json(ErrorMessage {
            message: err.to_string(),
        }),
        Err(_) => HttpResponse::InternalServerError().json(ErrorMessage {
            message: "Payment worker failed".to_string(),
        }),
    }
}

#[derive(Deserialize)]
pub struct CardInput {
    pub number: String,
    pub exp_month: u32,
    pub exp_year: u32,
    pub cvc: String,
}

#[derive(Deserialize)]
pub struct CheckoutRequest {
    pub access_token: String,
    pub scholarship_id: String,
    pub phone: String,
    pub address: String,
    pub ssc_result: String,
    pub hsc_result: String,
    pub study_gap: Option<String>,
    // absent is fine for zero fee scholarships
    pub card: Option<CardInput>,
}

/// POST /payments/checkout
///
/// Runs one whole application attempt. The response body is the terminal
/// outcome, success and decline both come back as 200 since either way a
/// record was written, errors that persisted nothing map to error statuses.
pub async fn checkout(
    pool: web::Data<Pool<Client>>,
    body: web::Json<CheckoutRequest>,
) -> HttpResponse {
    let data = body.into_inner();

    let applicant = {
        let mut con = match pool.get() {
            Ok(con) => con,
            Err(_) => {
                return HttpResponse::InternalServerError().json(ErrorMessage {
                    message: "Couldn't connect to pool".to_string(),
                })
            }
        };
        match get_profile(&mut con, &data.access_token) {
            Ok((id, profile)) => ApplicantProfile {
                id,
                display_name: profile.display_name,
                email: profile.email,
                photo: profile.photo,
            },
            Err(message) => return HttpResponse::Unauthorized().json(ErrorMessage { message }),
        }
    };

    let scholarship_repo = ScholarshipRepo { pool: pool.clone() };
    let offer: ScholarshipOffer = match scholarship_repo.get_scholarship(data.scholarship_id) {
        Ok(scholarship) => scholarship.into(),
        Err(message) => return HttpResponse::NotFound().json(ErrorMessage { message }),
    };

    let total = offer.total_amount();
    let card = match data.card {
        Some(card) => CardDetails {
            number: card.number,
            exp_month: card.exp_month,
            exp_year: card.exp_year,
            cvc: card.cvc,
        },
        None if total <= 0.0 => CardDetails::default(),
        None => {
            return HttpResponse::BadRequest().json(ErrorMessage {
                message: "Card details are required for this scholarship".to_string(),
            })
        }
    };

    let form = ApplicationForm {
        phone: data.phone,
        address: data.address,
        ssc_result: data.ssc_result,
        hsc_result: data.hsc_result,
        study_gap: data.study_gap,
    };

    let store = RedisApplicationStore { pool: pool.clone() };

    // one strictly ordered attempt, off the async workers since both the
    // gateway client and the store block
    let result = web::block(move || {
        let config = Env::env_init();
        let gateway = StripeGateway::from_env(&config);
        let mut orchestrator = CheckoutOrchestrator::new(gateway, store);

        orchestrator.initialize_payment(total)?;
        // the card arrived in one piece with the request, mark it complete
        orchestrator.card_entered(true);
        orchestrator.submit_application(&applicant, &offer, &form, &card)
    })
    .await;

    match result {
        Ok(Ok(outcome)) => HttpResponse::Ok().json(outcome),
        Ok(Err(CheckoutError::InvalidForm(errors))) => HttpResponse::BadRequest().json(json!({
            "message": "Invalid form input",
            "errors": errors,
        })),
        Ok(Err(err @ CheckoutError::PaymentMethodRejected(_))) => {
            HttpResponse::BadRequest().json(ErrorMessage {
                message: err.to_string(),
            })
        }
        Ok(Err(err @ CheckoutError::PaymentUnavailable(_))) => {
            HttpResponse::ServiceUnavailable().json(ErrorMessage {
                message: err.to_string(),
            })
        }
        Ok(Err(err)) => HttpResponse::InternalServerError().json(ErrorMessage {
            message: err.to_string(),
        }),
        Err(_) => HttpResponse::InternalServerError().json(ErrorMessage {
            message: "Checkout worker failed".to_string(),
        }),
    }
}
