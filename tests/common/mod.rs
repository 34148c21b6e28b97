use std::cell::RefCell;
use std::rc::Rc;

use scholar_api::models::redis::{Application, PaymentRecord};
use scholar_api::repos::checkout::form::ApplicationForm;
use scholar_api::repos::checkout::gateway::{
    CardDetails, Confirmation, GatewayError, PaymentGateway, PaymentIntent,
};
use scholar_api::repos::checkout::store::ApplicationStore;
use scholar_api::repos::checkout::{ApplicantProfile, ScholarshipOffer};

/// Counts every gateway call so tests can assert "no network side effect".
#[derive(Default)]
pub struct GatewayCalls {
    pub intents_created: u32,
    pub methods_created: u32,
    pub confirms: u32,
}

enum GatewayBehavior {
    Succeed { transaction_id: String },
    Decline { reason: String },
    IntentUnavailable,
    RejectMethod { message: String },
    ConfirmTransportError,
}

/// Scripted stand-in for the payment gateway, one behavior per scenario.
pub struct FakeGateway {
    behavior: GatewayBehavior,
    pub calls: Rc<RefCell<GatewayCalls>>,
}

impl FakeGateway {
    fn with_behavior(behavior: GatewayBehavior) -> FakeGateway {
        FakeGateway {
            behavior,
            calls: Rc::new(RefCell::new(GatewayCalls::default())),
        }
    }

    pub fn succeeding(transaction_id: &str) -> FakeGateway {
        Self::with_behavior(GatewayBehavior::Succeed {
            transaction_id: transaction_id.to_string(),
        })
    }

    pub fn declining(reason: &str) -> FakeGateway {
        Self::with_behavior(GatewayBehavior::Decline {
            reason: reason.to_string(),
        })
    }

    pub fn intent_unavailable() -> FakeGateway {
        Self::with_behavior(GatewayBehavior::IntentUnavailable)
    }

    pub fn rejecting_method(message: &str) -> FakeGateway {
        Self::with_behavior(GatewayBehavior::RejectMethod {
            message: message.to_string(),
        })
    }

    pub fn confirm_transport_error() -> FakeGateway {
        Self::with_behavior(GatewayBehavior::ConfirmTransportError)
    }
}

impl PaymentGateway for FakeGateway {
    fn create_intent(&self, _amount: f64) -> Result<PaymentIntent, GatewayError> {
        self.calls.borrow_mut().intents_created += 1;

        if let GatewayBehavior::IntentUnavailable = self.behavior {
            return Err(GatewayError::Unavailable("gateway is down".to_string()));
        }
        Ok(PaymentIntent {
            id: "pi_test".to_string(),
            client_secret: "pi_test_secret_abc".to_string(),
        })
    }

    fn create_payment_method(
        &self,
        _card: &CardDetails,
        _billing_name: &str,
        _billing_email: &str,
    ) -> Result<String, GatewayError> {
        self.calls.borrow_mut().methods_created += 1;

        if let GatewayBehavior::RejectMethod { message } = &self.behavior {
            return Err(GatewayError::Rejected(message.clone()));
        }
        Ok("pm_test".to_string())
    }

    fn confirm_intent(
        &self,
        _intent: &PaymentIntent,
        _payment_method_id: &str,
    ) -> Result<Confirmation, GatewayError> {
        self.calls.borrow_mut().confirms += 1;

        match &self.behavior {
            GatewayBehavior::Succeed { transaction_id } => Ok(Confirmation::Succeeded {
                transaction_id: transaction_id.clone(),
            }),
            GatewayBehavior::Decline { reason } => Ok(Confirmation::Declined {
                reason: reason.clone(),
            }),
            GatewayBehavior::ConfirmTransportError => {
                Err(GatewayError::Unavailable("connection reset".to_string()))
            }
            _ => Ok(Confirmation::Succeeded {
                transaction_id: "tx_fallback".to_string(),
            }),
        }
    }
}

#[derive(Default)]
pub struct StoredRecords {
    pub applications: Vec<(String, Application)>,
    pub receipts: Vec<PaymentRecord>,
}

/// In memory stand-in for the application store, with switches to force the
/// two write failures the flow has to survive.
pub struct MemoryStore {
    pub records: Rc<RefCell<StoredRecords>>,
    fail_application: bool,
    fail_receipt: bool,
    next_id: RefCell<u32>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore {
            records: Rc::new(RefCell::new(StoredRecords::default())),
            fail_application: false,
            fail_receipt: false,
            next_id: RefCell::new(0),
        }
    }

    pub fn failing_application_writes() -> MemoryStore {
        MemoryStore {
            fail_application: true,
            ..MemoryStore::new()
        }
    }

    pub fn failing_receipt_writes() -> MemoryStore {
        MemoryStore {
            fail_receipt: true,
            ..MemoryStore::new()
        }
    }
}

impl ApplicationStore for MemoryStore {
    fn insert_application(&self, record: &Application) -> Result<String, String> {
        if self.fail_application {
            return Err("application store rejected the write".to_string());
        }

        let mut next_id = self.next_id.borrow_mut();
        *next_id += 1;
        let id = format!("app_{}", next_id);

        self.records
            .borrow_mut()
            .applications
            .push((id.clone(), record.clone()));
        Ok(id)
    }

    fn insert_receipt(&self, receipt: &PaymentRecord) -> Result<(), String> {
        if self.fail_receipt {
            return Err("receipt store rejected the write".to_string());
        }

        self.records.borrow_mut().receipts.push(receipt.clone());
        Ok(())
    }
}

pub fn sample_offer(application_fees: f64, service_charge: f64) -> ScholarshipOffer {
    ScholarshipOffer {
        id: "sch_harvard_cs".to_string(),
        scholarship_name: "Presidential STEM Grant".to_string(),
        university_name: "Harvard University".to_string(),
        university_country: "USA".to_string(),
        university_city: "Cambridge".to_string(),
        scholarship_category: "Full fund".to_string(),
        subject_category: "Engineering".to_string(),
        degree: "Bachelor".to_string(),
        application_fees,
        service_charge,
    }
}

pub fn sample_applicant() -> ApplicantProfile {
    ApplicantProfile {
        id: "user_0A1B".to_string(),
        display_name: "Nadia Rahman".to_string(),
        email: "nadia@student.edu".to_string(),
        photo: "https://img.example/nadia.png".to_string(),
    }
}

pub fn valid_form() -> ApplicationForm {
    ApplicationForm {
        phone: "+1 (555) 123-4567".to_string(),
        address: "221B Baker Street, London".to_string(),
        ssc_result: "5.00".to_string(),
        hsc_result: "4.80".to_string(),
        study_gap: None,
    }
}

pub fn test_card() -> CardDetails {
    CardDetails {
        number: "4242424242424242".to_string(),
        exp_month: 12,
        exp_year: 2030,
        cvc: "123".to_string(),
    }
}
