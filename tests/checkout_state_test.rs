// The readiness gate: named states instead of the overlapping booleans the
// old client juggled, and the submit guard hanging off them.

mod common;

use common::{sample_applicant, sample_offer, test_card, valid_form, FakeGateway, MemoryStore};
use scholar_api::repos::checkout::{CheckoutError, CheckoutOrchestrator, CheckoutState};

#[test]
fn a_new_session_starts_uninitialized() {
    let orchestrator = CheckoutOrchestrator::new(FakeGateway::succeeding("tx"), MemoryStore::new());
    assert_eq!(orchestrator.state(), CheckoutState::Uninitialized);
    assert!(!orchestrator.is_ready());
}

#[test]
fn initialization_with_a_positive_total_lands_on_intent_ready() {
    let mut orchestrator =
        CheckoutOrchestrator::new(FakeGateway::succeeding("tx"), MemoryStore::new());
    orchestrator.initialize_payment(75.0).unwrap();
    assert_eq!(orchestrator.state(), CheckoutState::IntentReady);
    assert!(!orchestrator.is_ready());
}

#[test]
fn zero_fee_initialization_is_immediately_ready() {
    let mut orchestrator =
        CheckoutOrchestrator::new(FakeGateway::succeeding("tx"), MemoryStore::new());
    orchestrator.initialize_payment(0.0).unwrap();
    assert!(orchestrator.is_ready());
}

#[test]
fn card_completeness_toggles_between_incomplete_and_ready() {
    let mut orchestrator =
        CheckoutOrchestrator::new(FakeGateway::succeeding("tx"), MemoryStore::new());
    orchestrator.initialize_payment(75.0).unwrap();

    orchestrator.card_entered(false);
    assert_eq!(orchestrator.state(), CheckoutState::CardIncomplete);

    orchestrator.card_entered(true);
    assert_eq!(orchestrator.state(), CheckoutState::Ready);

    // the widget can invalidate the card again before submit
    orchestrator.card_entered(false);
    assert_eq!(orchestrator.state(), CheckoutState::CardIncomplete);
}

#[test]
fn card_signal_before_initialization_changes_nothing() {
    let mut orchestrator =
        CheckoutOrchestrator::new(FakeGateway::succeeding("tx"), MemoryStore::new());
    orchestrator.card_entered(true);
    assert_eq!(orchestrator.state(), CheckoutState::Uninitialized);
}

#[test]
fn submit_without_initialization_is_rejected_with_no_network_side_effect() {
    let gateway = FakeGateway::succeeding("tx");
    let calls = gateway.calls.clone();
    let store = MemoryStore::new();
    let records = store.records.clone();

    let offer = sample_offer(75.0, 0.0);
    let mut orchestrator = CheckoutOrchestrator::new(gateway, store);

    let err = orchestrator
        .submit_application(&sample_applicant(), &offer, &valid_form(), &test_card())
        .unwrap_err();

    assert!(matches!(err, CheckoutError::NotReady(CheckoutState::Uninitialized)));
    let calls = calls.borrow();
    assert_eq!(calls.intents_created, 0);
    assert_eq!(calls.methods_created, 0);
    assert_eq!(calls.confirms, 0);
    assert!(records.borrow().applications.is_empty());
}

#[test]
fn submit_with_an_incomplete_card_is_rejected() {
    let gateway = FakeGateway::succeeding("tx");
    let calls = gateway.calls.clone();

    let offer = sample_offer(75.0, 0.0);
    let mut orchestrator = CheckoutOrchestrator::new(gateway, MemoryStore::new());
    orchestrator.initialize_payment(offer.total_amount()).unwrap();
    orchestrator.card_entered(false);

    let err = orchestrator
        .submit_application(&sample_applicant(), &offer, &valid_form(), &test_card())
        .unwrap_err();

    assert!(matches!(err, CheckoutError::NotReady(CheckoutState::CardIncomplete)));
    assert_eq!(calls.borrow().methods_created, 0);
}

#[test]
fn a_failed_attempt_needs_a_fresh_initialization_before_the_next_one() {
    let gateway = FakeGateway::declining("card_declined");
    let calls = gateway.calls.clone();

    let offer = sample_offer(75.0, 0.0);
    let applicant = sample_applicant();
    let mut orchestrator = CheckoutOrchestrator::new(gateway, MemoryStore::new());

    orchestrator.initialize_payment(offer.total_amount()).unwrap();
    orchestrator.card_entered(true);
    orchestrator
        .submit_application(&applicant, &offer, &valid_form(), &test_card())
        .unwrap();
    assert_eq!(orchestrator.state(), CheckoutState::Failed);

    // the spent intent cannot be reused, the card signal alone does not help
    orchestrator.card_entered(true);
    let err = orchestrator
        .submit_application(&applicant, &offer, &valid_form(), &test_card())
        .unwrap_err();
    assert!(matches!(err, CheckoutError::NotReady(CheckoutState::Failed)));

    // a fresh initialization issues a new intent and reopens the gate
    orchestrator.initialize_payment(offer.total_amount()).unwrap();
    assert_eq!(orchestrator.state(), CheckoutState::IntentReady);
    assert_eq!(calls.borrow().intents_created, 2);
}

#[test]
fn a_succeeded_session_does_not_accept_another_submit() {
    let offer = sample_offer(75.0, 0.0);
    let applicant = sample_applicant();
    let mut orchestrator =
        CheckoutOrchestrator::new(FakeGateway::succeeding("tx_done"), MemoryStore::new());

    orchestrator.initialize_payment(offer.total_amount()).unwrap();
    orchestrator.card_entered(true);
    orchestrator
        .submit_application(&applicant, &offer, &valid_form(), &test_card())
        .unwrap();
    assert_eq!(orchestrator.state(), CheckoutState::Succeeded);

    let err = orchestrator
        .submit_application(&applicant, &offer, &valid_form(), &test_card())
        .unwrap_err();
    assert!(matches!(err, CheckoutError::NotReady(CheckoutState::Succeeded)));
}
