use std::sync::Arc;

use super::common::*;
use crate::advisor::{AdvisorError, PurchaseAdvisor, PurchaseRequest, DEFAULT_GOAL};
use crate::decision::{DebtFlag, DecisionConfig, Recommendation};
use crate::profile::{FinancialProfile, ProfileStoreError, UserId};

#[test]
fn recognized_image_fills_blank_fields() {
    let (advisor, _, recognizer) = build_advisor(FixedRecognizer::answering("Coffee maker", 60.0));

    let advice = advisor.advise(PurchaseRequest {
        image_base64: Some("data:image/png;base64,QUJD".to_string()),
        ..PurchaseRequest::default()
    });

    assert_eq!(recognizer.seen(), vec!["QUJD".to_string()]);
    assert!(advice.recognized_image);
    assert_eq!(advice.item_name, "Coffee maker");
    assert_eq!(advice.item_cost, 60.0);
    assert_eq!(advice.input.leftover_income, 1000.0);
    assert!(advice
        .decision
        .explanation
        .starts_with("AI recognized this as a Coffee maker. "));
}

#[test]
fn user_answers_win_over_recognition() {
    let (advisor, _, _) = build_advisor(FixedRecognizer::answering("Coffee maker", 60.0));

    let advice = advisor.advise(PurchaseRequest {
        image_base64: Some("QUJD".to_string()),
        ..PurchaseRequest::for_item("Kettle", 45.0)
    });

    assert!(advice.recognized_image);
    assert_eq!(advice.item_name, "Kettle");
    assert_eq!(advice.item_cost, 45.0);
    assert!(advice
        .decision
        .explanation
        .starts_with("AI recognized this as a Kettle. "));
}

#[test]
fn zero_cost_is_replaced_by_the_estimate() {
    let (advisor, _, _) = build_advisor(FixedRecognizer::answering("Coffee maker", 60.0));

    let advice = advisor.advise(PurchaseRequest {
        image_base64: Some("QUJD".to_string()),
        ..PurchaseRequest::for_item("Espresso machine", 0.0)
    });

    assert_eq!(advice.item_name, "Espresso machine");
    assert_eq!(advice.item_cost, 60.0);
}

#[test]
fn recognizer_failure_falls_back_to_form_values() {
    let (advisor, _, _) = build_advisor(FailingRecognizer);

    let advice = advisor.advise(PurchaseRequest {
        image_base64: Some("QUJD".to_string()),
        ..PurchaseRequest::for_item("Book", 100.0)
    });

    assert!(!advice.recognized_image);
    assert_eq!(advice.item_name, "Book");
    assert!(!advice.decision.explanation.starts_with("AI recognized"));
}

#[test]
fn unknown_items_are_not_reported_as_recognized() {
    let (advisor, _, _) = build_advisor(FixedRecognizer::answering("Unknown", 0.0));

    let advice = advisor.advise(PurchaseRequest {
        image_base64: Some("QUJD".to_string()),
        ..PurchaseRequest::default()
    });

    assert!(!advice.recognized_image);
    assert_eq!(advice.item_name, "Unnamed Item");
    assert_eq!(advice.item_cost, 0.0);
}

#[test]
fn requests_without_images_skip_the_recognizer() {
    let (advisor, _, recognizer) = build_advisor(FixedRecognizer::answering("Coffee maker", 60.0));

    advisor.advise(PurchaseRequest {
        image_base64: Some("data:image/png;base64,".to_string()),
        ..PurchaseRequest::for_item("Book", 100.0)
    });
    advisor.advise(PurchaseRequest::for_item("Book", 100.0));

    assert!(recognizer.seen().is_empty());
}

#[test]
fn stored_profile_feeds_the_decision() {
    let (advisor, _, _) = build_advisor(FailingRecognizer);
    advisor
        .save_profile(UserId::new("u-1"), indebted_profile())
        .expect("profile saved");

    let advice = advisor.advise(PurchaseRequest {
        user_id: Some("u-1".to_string()),
        ..PurchaseRequest::for_item("Book", 100.0)
    });

    assert_eq!(advice.input.leftover_income, 2000.0);
    assert_eq!(advice.input.has_high_interest_debt, DebtFlag::Yes);
    assert_eq!(advice.input.main_financial_goal, "pay-off-debt");
    assert_eq!(advice.input.high_interest_debt, 1500.0);
    // D=2, O=-2 (debt), G=-1, L=1, B=0
    assert_eq!(advice.decision.score, 0.0);
    assert_eq!(
        advice.decision.recommendation,
        Recommendation::ConsiderCarefully
    );
}

#[test]
fn offline_profile_store_does_not_block_advice() {
    let advisor = PurchaseAdvisor::new(
        Arc::new(OfflineProfiles),
        Arc::new(FailingRecognizer),
        DecisionConfig::default(),
    );

    let advice = advisor.advise(PurchaseRequest {
        user_id: Some("u-1".to_string()),
        ..PurchaseRequest::for_item("Book", 100.0)
    });

    assert_eq!(advice.input.main_financial_goal, DEFAULT_GOAL);
    assert_eq!(advice.input.has_high_interest_debt, DebtFlag::No);
}

#[test]
fn missing_profiles_are_reported() {
    let (advisor, _, _) = build_advisor(FailingRecognizer);

    let error = advisor
        .profile(&UserId::new("ghost"))
        .expect_err("no profile stored");
    assert!(matches!(
        error,
        AdvisorError::Profile(ProfileStoreError::NotFound)
    ));
}

#[test]
fn saving_requires_a_user_id() {
    let (advisor, profiles, _) = build_advisor(FailingRecognizer);

    let error = advisor
        .save_profile(UserId::new("  "), FinancialProfile::default())
        .expect_err("blank id rejected");
    assert!(matches!(error, AdvisorError::MissingUserId));

    let view = advisor
        .save_profile(UserId::new("u-2"), indebted_profile())
        .expect("profile saved");
    assert_eq!(view.metrics.disposable_income, Some(2000.0));
    assert!(crate::profile::ProfileStore::fetch(profiles.as_ref(), &UserId::new("u-2"))
        .expect("store reachable")
        .is_some());
}

#[test]
fn requested_alternative_reports_savings() {
    let (advisor, _, _) = build_advisor(FixedRecognizer::default());
    let finder = Arc::new(CatalogFinder::offering(
        "Refurbished kettle",
        Some(30.0),
        "www.amazon.com/dp/B01KETTLE?tag=promo-20",
    ));
    let advisor = advisor.with_alternative_finder(finder.clone());

    let advice = advisor.advise(PurchaseRequest {
        find_alternatives: true,
        ..PurchaseRequest::for_item("Kettle", 40.0)
    });

    assert_eq!(finder.lookups(), vec![("Kettle".to_string(), 40.0)]);
    let alternative = advice.alternative.expect("alternative attached");
    assert_eq!(alternative.url, "https://www.amazon.com/dp/B01KETTLE");
    assert_eq!(alternative.retailer, "Amazon");
    assert_eq!(alternative.savings.amount, 10.0);
    assert_eq!(alternative.savings.percent, 25.0);
}

#[test]
fn alternatives_are_only_looked_up_on_request() {
    let (advisor, _, _) = build_advisor(FixedRecognizer::default());
    let finder = Arc::new(CatalogFinder::offering(
        "Refurbished kettle",
        Some(30.0),
        "https://www.amazon.com/dp/B01KETTLE",
    ));
    let advisor = advisor.with_alternative_finder(finder.clone());

    let advice = advisor.advise(PurchaseRequest::for_item("Kettle", 40.0));

    assert!(finder.lookups().is_empty());
    assert!(advice.alternative.is_none());
}

#[test]
fn pricier_or_failed_lookups_leave_the_decision_alone() {
    let (advisor, _, _) = build_advisor(FixedRecognizer::default());
    let baseline = advisor
        .advise(PurchaseRequest::for_item("Kettle", 40.0))
        .decision;

    let pricier = advisor.with_alternative_finder(Arc::new(CatalogFinder::offering(
        "Copper kettle",
        Some(90.0),
        "https://www.wayfair.com/kitchen/pdp/copper-kettle.html",
    )));
    let advice = pricier.advise(PurchaseRequest {
        find_alternatives: true,
        ..PurchaseRequest::for_item("Kettle", 40.0)
    });
    assert!(advice.alternative.is_none());
    assert_eq!(advice.decision, baseline);

    let (advisor, _, _) = build_advisor(FixedRecognizer::default());
    let offline = advisor.with_alternative_finder(Arc::new(OfflineFinder));
    let advice = offline.advise(PurchaseRequest {
        find_alternatives: true,
        ..PurchaseRequest::for_item("Kettle", 40.0)
    });
    assert!(advice.alternative.is_none());
    assert_eq!(advice.decision, baseline);
}
