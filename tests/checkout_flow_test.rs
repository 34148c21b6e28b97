// End to end runs of the checkout orchestrator against scripted gateway and
// store fakes, one test per outcome branch.

mod common;

use common::{sample_applicant, sample_offer, test_card, valid_form, FakeGateway, MemoryStore};
use scholar_api::repos::checkout::{CheckoutError, CheckoutOrchestrator, CheckoutOutcome, CheckoutState};

#[test]
fn declined_card_saves_exactly_one_unpaid_application_and_no_receipt() {
    let gateway = FakeGateway::declining("insufficient_funds");
    let store = MemoryStore::new();
    let records = store.records.clone();

    let offer = sample_offer(60.0, 15.0);
    let mut orchestrator = CheckoutOrchestrator::new(gateway, store);
    orchestrator.initialize_payment(offer.total_amount()).unwrap();
    orchestrator.card_entered(true);

    let outcome = orchestrator
        .submit_application(&sample_applicant(), &offer, &valid_form(), &test_card())
        .expect("a decline is a resolved outcome, not an error");

    match outcome {
        CheckoutOutcome::Failed {
            scholarship_name,
            error,
        } => {
            assert_eq!(scholarship_name, "Presidential STEM Grant");
            assert_eq!(error, "insufficient_funds");
        }
        other => panic!("expected a failed outcome, got {:?}", other),
    }

    let records = records.borrow();
    assert_eq!(records.applications.len(), 1);
    assert!(records.receipts.is_empty());

    let (_, application) = &records.applications[0];
    assert_eq!(application.payment_status, "unpaid");
    assert_eq!(application.application_status, "pending");
    assert_eq!(application.application_fees + application.service_charge, 75.0);
    assert_eq!(application.transaction_id, None);
    assert_eq!(orchestrator.state(), CheckoutState::Failed);
}

#[test]
fn successful_charge_saves_paid_application_plus_linked_receipt() {
    let gateway = FakeGateway::succeeding("tx_abc123");
    let store = MemoryStore::new();
    let records = store.records.clone();

    let offer = sample_offer(100.0, 20.0);
    let mut orchestrator = CheckoutOrchestrator::new(gateway, store);
    orchestrator.initialize_payment(offer.total_amount()).unwrap();
    orchestrator.card_entered(true);

    let outcome = orchestrator
        .submit_application(&sample_applicant(), &offer, &valid_form(), &test_card())
        .unwrap();

    let application_id = match outcome {
        CheckoutOutcome::Succeeded {
            amount,
            transaction_id,
            application_id,
            university_name,
            ..
        } => {
            assert_eq!(amount, 120.0);
            assert_eq!(transaction_id.as_deref(), Some("tx_abc123"));
            assert_eq!(university_name, "Harvard University");
            application_id
        }
        other => panic!("expected a succeeded outcome, got {:?}", other),
    };

    let records = records.borrow();
    assert_eq!(records.applications.len(), 1);
    assert_eq!(records.receipts.len(), 1);

    let (stored_id, application) = &records.applications[0];
    assert_eq!(application.payment_status, "paid");
    assert_eq!(application.application_status, "pending");
    assert_eq!(application.transaction_id.as_deref(), Some("tx_abc123"));

    // the receipt must point at the id the application write returned
    let receipt = &records.receipts[0];
    assert_eq!(&receipt.application_id, stored_id);
    assert_eq!(receipt.application_id, application_id);
    assert_eq!(receipt.amount, 120.0);
    assert_eq!(receipt.transaction_id, "tx_abc123");
    assert_eq!(receipt.scholarship_id, "sch_harvard_cs");
    assert_eq!(orchestrator.state(), CheckoutState::Succeeded);
}

#[test]
fn zero_fee_submission_never_touches_the_gateway() {
    let gateway = FakeGateway::succeeding("tx_should_not_appear");
    let calls = gateway.calls.clone();
    let store = MemoryStore::new();
    let records = store.records.clone();

    let offer = sample_offer(0.0, 0.0);
    let mut orchestrator = CheckoutOrchestrator::new(gateway, store);
    orchestrator.initialize_payment(offer.total_amount()).unwrap();

    let outcome = orchestrator
        .submit_application(&sample_applicant(), &offer, &valid_form(), &test_card())
        .unwrap();

    match outcome {
        CheckoutOutcome::Succeeded {
            amount,
            transaction_id,
            ..
        } => {
            assert_eq!(amount, 0.0);
            assert_eq!(transaction_id, None);
        }
        other => panic!("expected a succeeded outcome, got {:?}", other),
    }

    let calls = calls.borrow();
    assert_eq!(calls.intents_created, 0);
    assert_eq!(calls.methods_created, 0);
    assert_eq!(calls.confirms, 0);

    // nothing owed means the record is settled on arrival, with no receipt
    let records = records.borrow();
    assert_eq!(records.applications.len(), 1);
    assert_eq!(records.applications[0].1.payment_status, "paid");
    assert_eq!(records.applications[0].1.transaction_id, None);
    assert!(records.receipts.is_empty());
}

#[test]
fn failed_intent_creation_is_terminal_and_writes_nothing() {
    let gateway = FakeGateway::intent_unavailable();
    let calls = gateway.calls.clone();
    let store = MemoryStore::new();
    let records = store.records.clone();

    let offer = sample_offer(50.0, 25.0);
    let mut orchestrator = CheckoutOrchestrator::new(gateway, store);

    let err = orchestrator
        .initialize_payment(offer.total_amount())
        .unwrap_err();
    assert!(matches!(err, CheckoutError::PaymentUnavailable(_)));
    assert_eq!(orchestrator.state(), CheckoutState::Uninitialized);

    // submit must be rejected without reaching the gateway again
    let err = orchestrator
        .submit_application(&sample_applicant(), &offer, &valid_form(), &test_card())
        .unwrap_err();
    assert!(matches!(err, CheckoutError::NotReady(_)));

    let calls = calls.borrow();
    assert_eq!(calls.intents_created, 1);
    assert_eq!(calls.methods_created, 0);
    assert_eq!(calls.confirms, 0);
    assert!(records.borrow().applications.is_empty());
    assert!(records.borrow().receipts.is_empty());
}

#[test]
fn resubmitting_after_a_decline_accumulates_independent_unpaid_records() {
    let gateway = FakeGateway::declining("card_declined");
    let calls = gateway.calls.clone();
    let store = MemoryStore::new();
    let records = store.records.clone();

    let offer = sample_offer(40.0, 10.0);
    let applicant = sample_applicant();
    let mut orchestrator = CheckoutOrchestrator::new(gateway, store);

    orchestrator.initialize_payment(offer.total_amount()).unwrap();
    orchestrator.card_entered(true);
    orchestrator
        .submit_application(&applicant, &offer, &valid_form(), &test_card())
        .unwrap();

    // retrying means a fresh intent first, then the same submission again
    orchestrator.initialize_payment(offer.total_amount()).unwrap();
    orchestrator.card_entered(true);
    orchestrator
        .submit_application(&applicant, &offer, &valid_form(), &test_card())
        .unwrap();

    assert_eq!(calls.borrow().intents_created, 2);

    // no dedup on purpose: two attempts, two independent unpaid records
    let records = records.borrow();
    assert_eq!(records.applications.len(), 2);
    assert_ne!(records.applications[0].0, records.applications[1].0);
    for (_, application) in records.applications.iter() {
        assert_eq!(application.payment_status, "unpaid");
    }
    assert!(records.receipts.is_empty());
}

#[test]
fn rejected_payment_method_persists_nothing_and_stays_retryable() {
    let gateway = FakeGateway::rejecting_method("Your card number is invalid.");
    let calls = gateway.calls.clone();
    let store = MemoryStore::new();
    let records = store.records.clone();

    let offer = sample_offer(75.0, 0.0);
    let mut orchestrator = CheckoutOrchestrator::new(gateway, store);
    orchestrator.initialize_payment(offer.total_amount()).unwrap();
    orchestrator.card_entered(true);

    let err = orchestrator
        .submit_application(&sample_applicant(), &offer, &valid_form(), &test_card())
        .unwrap_err();

    match err {
        CheckoutError::PaymentMethodRejected(message) => {
            assert_eq!(message, "Your card number is invalid.")
        }
        other => panic!("expected a payment method rejection, got {:?}", other),
    }

    // recoverable in place: still ready, confirmation never attempted
    assert!(orchestrator.is_ready());
    assert_eq!(calls.borrow().confirms, 0);
    assert!(records.borrow().applications.is_empty());
}

#[test]
fn transport_failure_during_confirmation_takes_the_decline_path() {
    let gateway = FakeGateway::confirm_transport_error();
    let store = MemoryStore::new();
    let records = store.records.clone();

    let offer = sample_offer(30.0, 5.0);
    let mut orchestrator = CheckoutOrchestrator::new(gateway, store);
    orchestrator.initialize_payment(offer.total_amount()).unwrap();
    orchestrator.card_entered(true);

    let outcome = orchestrator
        .submit_application(&sample_applicant(), &offer, &valid_form(), &test_card())
        .expect("applicant data must be kept even when the gateway drops out");

    assert!(matches!(outcome, CheckoutOutcome::Failed { .. }));

    let records = records.borrow();
    assert_eq!(records.applications.len(), 1);
    assert_eq!(records.applications[0].1.payment_status, "unpaid");
    assert!(records.receipts.is_empty());
}

#[test]
fn receipt_write_failure_still_reports_success_with_the_paid_record() {
    let gateway = FakeGateway::succeeding("tx_orphan");
    let store = MemoryStore::failing_receipt_writes();
    let records = store.records.clone();

    let offer = sample_offer(90.0, 10.0);
    let mut orchestrator = CheckoutOrchestrator::new(gateway, store);
    orchestrator.initialize_payment(offer.total_amount()).unwrap();
    orchestrator.card_entered(true);

    let outcome = orchestrator
        .submit_application(&sample_applicant(), &offer, &valid_form(), &test_card())
        .unwrap();

    // the acknowledged gap: charge confirmed, application saved, receipt
    // lost, caller still sees success
    assert!(matches!(outcome, CheckoutOutcome::Succeeded { .. }));

    let records = records.borrow();
    assert_eq!(records.applications.len(), 1);
    assert_eq!(records.applications[0].1.payment_status, "paid");
    assert!(records.receipts.is_empty());
}

#[test]
fn application_write_failure_after_a_charge_surfaces_a_store_error() {
    let gateway = FakeGateway::succeeding("tx_lost");
    let store = MemoryStore::failing_application_writes();

    let offer = sample_offer(20.0, 5.0);
    let mut orchestrator = CheckoutOrchestrator::new(gateway, store);
    orchestrator.initialize_payment(offer.total_amount()).unwrap();
    orchestrator.card_entered(true);

    let err = orchestrator
        .submit_application(&sample_applicant(), &offer, &valid_form(), &test_card())
        .unwrap_err();

    assert!(matches!(err, CheckoutError::StoreWrite(_)));
    assert_eq!(orchestrator.state(), CheckoutState::Failed);
}

#[test]
fn invalid_form_is_rejected_before_any_gateway_call() {
    let gateway = FakeGateway::succeeding("tx_never");
    let calls = gateway.calls.clone();
    let store = MemoryStore::new();
    let records = store.records.clone();

    let offer = sample_offer(10.0, 0.0);
    let mut orchestrator = CheckoutOrchestrator::new(gateway, store);
    orchestrator.initialize_payment(offer.total_amount()).unwrap();
    orchestrator.card_entered(true);

    let mut form = valid_form();
    form.phone = String::new();
    form.address = "   ".to_string();

    let err = orchestrator
        .submit_application(&sample_applicant(), &offer, &form, &test_card())
        .unwrap_err();

    match err {
        CheckoutError::InvalidForm(errors) => {
            assert!(errors.contains_key("phone"));
            assert!(errors.contains_key("address"));
        }
        other => panic!("expected a validation failure, got {:?}", other),
    }

    assert_eq!(calls.borrow().methods_created, 0);
    assert!(records.borrow().applications.is_empty());
}
