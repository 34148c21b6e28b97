use std::fmt;

use serde::Deserialize;

use crate::config::Env;

/// Gateway issued authorization for a fixed amount. Confirmed at most once,
/// a retry after a failed confirmation needs a fresh one.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CardDetails {
    pub number: String,
    pub exp_month: u32,
    pub exp_year: u32,
    pub cvc: String,
}

/// How a confirmation attempt resolved. A decline is a normal resolution
/// here, not an error, the two lead to different persistence paths.
#[derive(Debug, Clone, PartialEq)]
pub enum Confirmation {
    Succeeded { transaction_id: String },
    Declined { reason: String },
}

#[derive(Debug)]
pub enum GatewayError {
    /// transport or gateway side failure, nothing was charged
    Unavailable(String),
    /// the gateway refused the request itself, bad card data and the like
    Rejected(String),
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::Unavailable(msg) => write!(f, "payment gateway unavailable: {}", msg),
            GatewayError::Rejected(msg) => write!(f, "{}", msg),
        }
    }
}

pub trait PaymentGateway {
    /// One intent per checkout session, for the full fee amount.
    fn create_intent(&self, amount: f64) -> Result<PaymentIntent, GatewayError>;

    /// Tokenizes raw card input together with the billing identity.
    fn create_payment_method(
        &self,
        card: &CardDetails,
        billing_name: &str,
        billing_email: &str,
    ) -> Result<String, GatewayError>;

    /// Confirms the intent with a payment method token.
    fn confirm_intent(
        &self,
        intent: &PaymentIntent,
        payment_method_id: &str,
    ) -> Result<Confirmation, GatewayError>;
}

// Wire shapes for the gateway's REST responses. Only the fields this flow
// reads, everything else in the payloads is ignored.

#[derive(Deserialize, Debug)]
#[serde(rename_all = "snake_case")]
enum WireIntentStatus {
    RequiresPaymentMethod,
    RequiresConfirmation,
    RequiresAction,
    Processing,
    RequiresCapture,
    Canceled,
    Succeeded,
}

#[derive(Deserialize, Debug)]
struct WirePaymentIntent {
    id: String,
    client_secret: Option<String>,
    status: WireIntentStatus,
}

#[derive(Deserialize, Debug)]
struct WirePaymentMethod {
    id: String,
}

#[derive(Deserialize, Debug)]
struct WireErrorEnvelope {
    error: WireError,
}

#[derive(Deserialize, Debug)]
struct WireError {
    #[serde(rename = "type")]
    kind: String,
    code: Option<String>,
    decline_code: Option<String>,
    message: Option<String>,
}

impl WireError {
    /// Declines carry the most specific reason the gateway gives us.
    fn reason(&self) -> String {
        self.decline_code
            .clone()
            .or_else(|| self.code.clone())
            .or_else(|| self.message.clone())
            .unwrap_or_else(|| "card_declined".to_string())
    }

    fn is_card_error(&self) -> bool {
        self.kind == "card_error"
    }
}

/// Stripe over its plain REST surface, form encoded requests with the secret
/// key as basic auth user.
pub struct StripeGateway {
    api_url: String,
    secret_key: String,
    client: reqwest::blocking::Client,
}

impl StripeGateway {
    pub fn new(api_url: String, secret_key: String) -> StripeGateway {
        StripeGateway {
            api_url,
            secret_key,
            client: reqwest::blocking::Client::new(),
        }
    }

    pub fn from_env(config: &Env) -> StripeGateway {
        StripeGateway::new(
            config.stripe_api_url.clone(),
            config.stripe_secret_key.clone(),
        )
    }

    fn post(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<reqwest::blocking::Response, GatewayError> {
        self.client
            .post(format!("{}{}", self.api_url, path))
            .basic_auth(&self.secret_key, None::<&str>)
            .form(params)
            .send()
            .map_err(|e| GatewayError::Unavailable(e.to_string()))
    }

    fn read_error(response: reqwest::blocking::Response) -> WireError {
        response
            .json::<WireErrorEnvelope>()
            .map(|envelope| envelope.error)
            .unwrap_or(WireError {
                kind: "api_error".to_string(),
                code: None,
                decline_code: None,
                message: Some("unreadable gateway error".to_string()),
            })
    }
}

impl PaymentGateway for StripeGateway {
    fn create_intent(&self, amount: f64) -> Result<PaymentIntent, GatewayError> {
        // the gateway counts in cents
        let cents = (amount * 100.0).round() as i64;
        let params = [
            ("amount", cents.to_string()),
            ("currency", "usd".to_string()),
            ("payment_method_types[]", "card".to_string()),
        ];

        let response = self.post("/v1/payment_intents", &params)?;
        if !response.status().is_success() {
            let err = Self::read_error(response);
            return Err(GatewayError::Unavailable(err.reason()));
        }

        let wire: WirePaymentIntent = response
            .json()
            .map_err(|e| GatewayError::Unavailable(e.to_string()))?;
        let client_secret = wire.client_secret.ok_or_else(|| {
            GatewayError::Unavailable("intent came back without a client secret".to_string())
        })?;

        Ok(PaymentIntent {
            id: wire.id,
            client_secret,
        })
    }

    fn create_payment_method(
        &self,
        card: &CardDetails,
        billing_name: &str,
        billing_email: &str,
    ) -> Result<String, GatewayError> {
        let params = [
            ("type", "card".to_string()),
            ("card[number]", card.number.clone()),
            ("card[exp_month]", card.exp_month.to_string()),
            ("card[exp_year]", card.exp_year.to_string()),
            ("card[cvc]", card.cvc.clone()),
            ("billing_details[name]", billing_name.to_string()),
            ("billing_details[email]", billing_email.to_string()),
        ];

        let response = self.post("/v1/payment_methods", &params)?;
        if !response.status().is_success() {
            let err = Self::read_error(response);
            if err.is_card_error() {
                return Err(GatewayError::Rejected(err.reason()));
            }
            return Err(GatewayError::Unavailable(err.reason()));
        }

        let wire: WirePaymentMethod = response
            .json()
            .map_err(|e| GatewayError::Unavailable(e.to_string()))?;
        Ok(wire.id)
    }

    fn confirm_intent(
        &self,
        intent: &PaymentIntent,
        payment_method_id: &str,
    ) -> Result<Confirmation, GatewayError> {
        let params = [("payment_method", payment_method_id.to_string())];
        let path = format!("/v1/payment_intents/{}/confirm", intent.id);

        let response = self.post(&path, &params)?;
        if !response.status().is_success() {
            let err = Self::read_error(response);
            if err.is_card_error() {
                // charge refused, the flow goes on and records the attempt
                return Ok(Confirmation::Declined {
                    reason: err.reason(),
                });
            }
            return Err(GatewayError::Unavailable(err.reason()));
        }

        let wire: WirePaymentIntent = response
            .json()
            .map_err(|e| GatewayError::Unavailable(e.to_string()))?;

        match wire.status {
            WireIntentStatus::Succeeded => Ok(Confirmation::Succeeded {
                transaction_id: wire.id,
            }),
            other => Ok(Confirmation::Declined {
                reason: format!("confirmation left the intent in {:?}", other),
            }),
        }
    }
}
