use std::fmt;

use serde::Serialize;

use crate::models::{
    graphql::{ApplicationStatus, PaymentStatus, Scholarship},
    redis::{Application, PaymentRecord},
};

pub mod form;
pub mod gateway;
pub mod store;

use form::{validate_application_form, ApplicationForm, FormErrors, ValidForm};
use gateway::{CardDetails, Confirmation, PaymentGateway, PaymentIntent};
use store::ApplicationStore;

/// Readiness gate for one checkout session. Advisory for the caller's submit
/// button, but `submit_application` also refuses to run outside `Ready`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckoutState {
    Uninitialized,
    IntentPending,
    IntentReady,
    CardIncomplete,
    Ready,
    Submitting,
    Succeeded,
    Failed,
}

/// Identity handed in by whoever authenticated the caller. The orchestrator
/// never looks a user up on its own.
#[derive(Debug, Clone)]
pub struct ApplicantProfile {
    pub id: String,
    pub display_name: String,
    pub email: String,
    pub photo: String,
}

/// Read-only snapshot of the scholarship being applied to, fixed for the
/// whole session.
#[derive(Debug, Clone)]
pub struct ScholarshipOffer {
    pub id: String,
    pub scholarship_name: String,
    pub university_name: String,
    pub university_country: String,
    pub university_city: String,
    pub scholarship_category: String,
    pub subject_category: String,
    pub degree: String,
    pub application_fees: f64,
    pub service_charge: f64,
}

impl ScholarshipOffer {
    pub fn total_amount(&self) -> f64 {
        self.application_fees + self.service_charge
    }
}

impl From<Scholarship> for ScholarshipOffer {
    fn from(scholarship: Scholarship) -> ScholarshipOffer {
        ScholarshipOffer {
            id: scholarship.id,
            scholarship_name: scholarship.scholarship_name,
            university_name: scholarship.university_name,
            university_country: scholarship.university_country,
            university_city: scholarship.university_city,
            scholarship_category: scholarship.scholarship_category,
            subject_category: scholarship.subject_category,
            degree: scholarship.degree,
            application_fees: scholarship.application_fees,
            service_charge: scholarship.service_charge,
        }
    }
}

/// Terminal result of one attempt, shaped for display. A `Failed` outcome
/// still means an unpaid application record was persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckoutOutcome {
    Succeeded {
        scholarship_name: String,
        university_name: String,
        amount: f64,
        transaction_id: Option<String>,
        application_id: String,
    },
    Failed {
        scholarship_name: String,
        error: String,
    },
}

#[derive(Debug)]
pub enum CheckoutError {
    /// intent creation failed, nothing to do but initialize again
    PaymentUnavailable(String),
    /// submit was asked to run outside the ready state
    NotReady(CheckoutState),
    /// the gateway refused to tokenize the card, nothing was persisted and
    /// the caller may fix the input and submit again
    PaymentMethodRejected(String),
    /// required form fields missing or malformed, nothing was persisted
    InvalidForm(FormErrors),
    /// record persistence failed
    StoreWrite(String),
}

impl fmt::Display for CheckoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckoutError::PaymentUnavailable(msg) => {
                write!(f, "Failed to initialize payment: {}", msg)
            }
            CheckoutError::NotReady(state) => {
                write!(f, "Checkout is not ready to submit (state {:?})", state)
            }
            CheckoutError::PaymentMethodRejected(msg) => write!(f, "{}", msg),
            CheckoutError::InvalidForm(errors) => {
                write!(f, "Invalid form input: {} field(s)", errors.len())
            }
            CheckoutError::StoreWrite(msg) => write!(f, "Couldn't save the application: {}", msg),
        }
    }
}

/// Drives one scholarship application attempt from intent creation through
/// record persistence. Strictly ordered, nothing here runs concurrently:
/// intent, then payment method, then confirmation, then the writes.
pub struct CheckoutOrchestrator<G: PaymentGateway, S: ApplicationStore> {
    gateway: G,
    store: S,
    state: CheckoutState,
    intent: Option<PaymentIntent>,
}

impl<G: PaymentGateway, S: ApplicationStore> CheckoutOrchestrator<G, S> {
    pub fn new(gateway: G, store: S) -> CheckoutOrchestrator<G, S> {
        CheckoutOrchestrator {
            gateway,
            store,
            state: CheckoutState::Uninitialized,
            intent: None,
        }
    }

    pub fn state(&self) -> CheckoutState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == CheckoutState::Ready
    }

    /// Requests one intent for the session's full amount. A zero total skips
    /// the gateway entirely and the session is immediately submittable.
    /// Calling this again after a failure starts a fresh attempt, the old
    /// intent is dropped either way.
    pub fn initialize_payment(&mut self, total_amount: f64) -> Result<(), CheckoutError> {
        if self.state == CheckoutState::Submitting {
            return Err(CheckoutError::NotReady(self.state));
        }

        self.intent = None;

        if total_amount <= 0.0 {
            self.state = CheckoutState::Ready;
            return Ok(());
        }

        self.state = CheckoutState::IntentPending;
        match self.gateway.create_intent(total_amount) {
            Ok(intent) => {
                self.intent = Some(intent);
                self.state = CheckoutState::IntentReady;
                Ok(())
            }
            Err(err) => {
                self.state = CheckoutState::Uninitialized;
                Err(CheckoutError::PaymentUnavailable(err.to_string()))
            }
        }
    }

    /// Mirrors the payment widget's own completeness signal. The widget
    /// validates the card, this only tracks whether it said "complete".
    pub fn card_entered(&mut self, complete: bool) {
        match self.state {
            CheckoutState::IntentReady | CheckoutState::CardIncomplete | CheckoutState::Ready => {
                self.state = if complete {
                    CheckoutState::Ready
                } else {
                    CheckoutState::CardIncomplete
                };
            }
            _ => {}
        }
    }

    /// One full submission attempt. Exactly one application record is
    /// persisted whenever the charge resolves, paid or declined. Nothing is
    /// persisted when tokenization fails or validation rejects the form.
    pub fn submit_application(
        &mut self,
        applicant: &ApplicantProfile,
        offer: &ScholarshipOffer,
        form: &ApplicationForm,
        card: &CardDetails,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        if self.state != CheckoutState::Ready {
            return Err(CheckoutError::NotReady(self.state));
        }

        let valid = validate_application_form(form).map_err(CheckoutError::InvalidForm)?;
        let total = offer.total_amount();

        if total <= 0.0 {
            // no charge to attempt, the application is settled on arrival
            self.state = CheckoutState::Submitting;
            return self.finish_paid(applicant, offer, &valid, total, None);
        }

        let intent = match self.intent.clone() {
            Some(intent) => intent,
            None => return Err(CheckoutError::NotReady(self.state)),
        };

        self.state = CheckoutState::Submitting;

        let payment_method = match self.gateway.create_payment_method(
            card,
            &applicant.display_name,
            &applicant.email,
        ) {
            Ok(id) => id,
            Err(err) => {
                // nothing persisted for this failure class, input can be fixed
                self.state = CheckoutState::Ready;
                return Err(CheckoutError::PaymentMethodRejected(err.to_string()));
            }
        };

        match self.gateway.confirm_intent(&intent, &payment_method) {
            Ok(Confirmation::Succeeded { transaction_id }) => {
                self.finish_paid(applicant, offer, &valid, total, Some(transaction_id))
            }
            Ok(Confirmation::Declined { reason }) => {
                self.finish_declined(applicant, offer, &valid, reason)
            }
            // a transport failure mid confirmation takes the decline path,
            // the applicant's data still must not be lost
            Err(err) => self.finish_declined(applicant, offer, &valid, err.to_string()),
        }
    }

    fn finish_paid(
        &mut self,
        applicant: &ApplicantProfile,
        offer: &ScholarshipOffer,
        valid: &ValidForm,
        total: f64,
        transaction_id: Option<String>,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        let record = build_application_record(
            applicant,
            offer,
            valid,
            PaymentStatus::Paid,
            transaction_id.clone(),
        );

        let application_id = match self.store.insert_application(&record) {
            Ok(id) => id,
            Err(err) => {
                self.state = CheckoutState::Failed;
                return Err(CheckoutError::StoreWrite(err));
            }
        };

        if let Some(transaction_id) = &transaction_id {
            let receipt = PaymentRecord {
                email: applicant.email.clone(),
                transaction_id: transaction_id.clone(),
                amount: total,
                application_id: application_id.clone(),
                scholarship_id: offer.id.clone(),
                scholarship_name: offer.scholarship_name.clone(),
                university_name: offer.university_name.clone(),
                date: chrono::Utc::now().to_rfc3339(),
            };
            if let Err(err) = self.store.insert_receipt(&receipt) {
                // the charge went through and the application is saved, so the
                // caller still sees success and the paid record stands alone
                log::error!(
                    "receipt write failed after successful charge {}: {}",
                    transaction_id,
                    err
                );
            }
        }

        self.state = CheckoutState::Succeeded;
        Ok(CheckoutOutcome::Succeeded {
            scholarship_name: offer.scholarship_name.clone(),
            university_name: offer.university_name.clone(),
            amount: total,
            transaction_id,
            application_id,
        })
    }

    fn finish_declined(
        &mut self,
        applicant: &ApplicantProfile,
        offer: &ScholarshipOffer,
        valid: &ValidForm,
        reason: String,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        let record =
            build_application_record(applicant, offer, valid, PaymentStatus::Unpaid, None);

        if let Err(err) = self.store.insert_application(&record) {
            self.state = CheckoutState::Failed;
            return Err(CheckoutError::StoreWrite(err));
        }

        self.state = CheckoutState::Failed;
        Ok(CheckoutOutcome::Failed {
            scholarship_name: offer.scholarship_name.clone(),
            error: reason,
        })
    }
}

fn build_application_record(
    applicant: &ApplicantProfile,
    offer: &ScholarshipOffer,
    valid: &ValidForm,
    payment_status: PaymentStatus,
    transaction_id: Option<String>,
) -> Application {
    Application {
        scholarship_id: offer.id.clone(),
        user_id: applicant.id.clone(),
        user_name: applicant.display_name.clone(),
        user_email: applicant.email.clone(),
        user_image: applicant.photo.clone(),
        university_name: offer.university_name.clone(),
        university_country: offer.university_country.clone(),
        university_city: offer.university_city.clone(),
        scholarship_name: offer.scholarship_name.clone(),
        scholarship_category: offer.scholarship_category.clone(),
        subject_category: offer.subject_category.clone(),
        degree: offer.degree.clone(),
        application_fees: offer.application_fees,
        service_charge: offer.service_charge,
        application_status: ApplicationStatus::Pending.as_str().to_string(),
        payment_status: payment_status.as_str().to_string(),
        transaction_id,
        application_date: chrono::Utc::now().to_rfc3339(),
        phone: valid.phone.clone(),
        address: valid.address.clone(),
        ssc_result: valid.ssc_result.clone(),
        hsc_result: valid.hsc_result.clone(),
        study_gap: valid.study_gap.clone(),
        feedback: None,
    }
}
