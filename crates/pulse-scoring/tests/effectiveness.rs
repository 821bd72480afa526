//! End-to-end effectiveness scoring against stubbed sources and a fixed clock.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;

use pulse_core::clock::{Clock, FixedClock};
use pulse_core::entities::{Interaction, Lead};
use pulse_core::enums::{
    ErrorSeverity, FollowUpOutcome, FollowUpPriority, InteractionKind, LeadStatus,
};
use pulse_core::telemetry::MemoryReporter;
use pulse_scoring::effectiveness::{ENGAGEMENT_QUALITY, LEAD_INTEREST_LEVEL, TIMING_ALIGNMENT};
use pulse_scoring::{
    EffectivenessService, FixedPriority, RecommendationEngine, RecommendationSource,
    RecommendationStore, ScoringError,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap()
}

fn lead(status: LeadStatus) -> Lead {
    Lead {
        id: "123e4567-e89b-12d3-a456-426614174000".into(),
        name: "Test User".into(),
        email: Some("test@example.com".into()),
        phone_number: None,
        company: None,
        call_status: Some("completed".into()),
        call_length: Some(95.0),
        status,
        call_analyses: vec![],
        interactions: vec![],
        last_contact_date: None,
        created_at: now() - Duration::days(10),
    }
}

fn interactions(count: usize) -> Vec<Interaction> {
    (0..count)
        .map(|i| Interaction {
            id: format!("int-{i}"),
            kind: InteractionKind::Call,
            date: now() - Duration::days(1),
        })
        .collect()
}

fn service<S: RecommendationSource>(source: S) -> EffectivenessService<S> {
    EffectivenessService::new(source).with_clock(Arc::new(FixedClock(now())))
}

struct FailingSource;

#[async_trait]
impl RecommendationSource for FailingSource {
    async fn priority_for(&self, _lead: &Lead) -> Result<FollowUpPriority, ScoringError> {
        Err(ScoringError::Source("recommendations table unavailable".into()))
    }
}

#[rstest]
#[case(now())]
#[case(now() - Duration::hours(30))]
#[case(now() + Duration::days(400))]
#[tokio::test]
async fn missing_lead_is_rejected_for_any_date(#[case] at: DateTime<Utc>) {
    let reporter = Arc::new(MemoryReporter::new());
    let svc = service(FixedPriority(FollowUpPriority::High)).with_reporter(reporter.clone());

    let result = svc.calculate_effectiveness(None, at).await;

    assert!(matches!(result, Err(ScoringError::InvalidInput(_))));
    assert!(
        reporter.reports().is_empty(),
        "invalid input is not telemetry"
    );
}

#[tokio::test]
async fn converted_lead_is_successful_regardless_of_history() {
    let svc = service(FixedPriority(FollowUpPriority::High));
    for count in [0, 1, 7] {
        let mut l = lead(LeadStatus::Converted);
        l.interactions = interactions(count);
        l.last_contact_date = Some(now());

        let report = svc
            .calculate_effectiveness(Some(&l), now() - Duration::hours(1))
            .await
            .unwrap();

        assert_eq!(report.outcome, FollowUpOutcome::Successful);
        assert_eq!(report.original_priority, FollowUpPriority::High);
        assert!((0.0..=1.0).contains(&report.effectiveness_score));
    }
}

#[tokio::test]
async fn untouched_lead_scores_interest_zero_and_engagement_half() {
    let l = lead(LeadStatus::New);
    let report = service(FixedPriority(FollowUpPriority::Critical))
        .calculate_effectiveness(Some(&l), now())
        .await
        .unwrap();

    let names: Vec<&str> = report.factors.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(
        names,
        vec![TIMING_ALIGNMENT, LEAD_INTEREST_LEVEL, ENGAGEMENT_QUALITY]
    );

    assert!((report.factors[0].impact - 1.0).abs() < f64::EPSILON);
    assert!(report.factors[1].impact.abs() < f64::EPSILON);
    assert!((report.factors[2].impact - 0.5).abs() < f64::EPSILON);
    assert!((report.effectiveness_score - 0.5).abs() < 1e-9);

    assert_eq!(report.outcome, FollowUpOutcome::NoResponse);
    assert_eq!(
        report.next_steps,
        vec![
            "Initial contact needed - prioritize this lead".to_string(),
            "No recent engagement - immediate follow-up required".to_string(),
        ]
    );
}

#[tokio::test]
async fn score_is_mean_of_three_factors() {
    let mut l = lead(LeadStatus::InProgress);
    l.interactions = interactions(2);
    l.last_contact_date = Some(now() - Duration::days(2));

    let report = service(FixedPriority(FollowUpPriority::Medium))
        .calculate_effectiveness(Some(&l), now() + Duration::hours(1))
        .await
        .unwrap();

    // timing 1 - 1/4, interest 2/5, engagement recent
    let expected = (0.75 + 0.4 + 1.0) / 3.0;
    assert!((report.effectiveness_score - expected).abs() < 1e-9);
    assert_eq!(report.outcome, FollowUpOutcome::InProgress);
    assert!((report.response_time_hours - 1.0).abs() < 1e-9);
    assert_eq!(
        report.next_steps,
        vec!["More follow-up needed to gauge interest level".to_string()]
    );
}

#[tokio::test]
async fn stale_contact_halves_engagement() {
    let mut l = lead(LeadStatus::Lost);
    l.interactions = interactions(5);
    l.last_contact_date = Some(now() - Duration::days(8));

    let report = service(FixedPriority(FollowUpPriority::Low))
        .calculate_effectiveness(Some(&l), now())
        .await
        .unwrap();

    assert_eq!(report.outcome, FollowUpOutcome::NotInterested);
    assert!((report.factors[1].impact - 1.0).abs() < f64::EPSILON);
    assert!((report.factors[2].impact - 0.5).abs() < f64::EPSILON);
    assert_eq!(
        report.factors[2].suggestion,
        "Re-engagement needed - consider a new approach"
    );
}

#[tokio::test]
async fn source_failure_is_reported_at_high_severity_and_returned() {
    let reporter = Arc::new(MemoryReporter::new());
    let l = lead(LeadStatus::New);

    let result = service(FailingSource)
        .with_reporter(reporter.clone())
        .calculate_effectiveness(Some(&l), now())
        .await;

    assert!(matches!(result, Err(ScoringError::Source(_))));
    let reports = reporter.reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].severity, ErrorSeverity::High);
    assert_eq!(
        reports[0].metadata.get("lead_id").map(String::as_str),
        Some(l.id.as_str())
    );
}

#[tokio::test]
async fn store_backed_priority_matches_generated_recommendation() {
    let mut l = lead(LeadStatus::New);
    l.call_analyses.push(pulse_core::entities::CallAnalysis {
        id: "an-1".into(),
        lead_id: l.id.clone(),
        sentiment_score: 0.1,
        key_points: vec![],
        customer_satisfaction: pulse_core::enums::CustomerSatisfaction::Neutral,
        appointment_details: None,
        risk_level: None,
        summary: None,
        topics_discussed: vec![],
        action_items: vec![],
        created_at: now(),
    });

    let store = Arc::new(RecommendationStore::new());
    let rec = RecommendationEngine::default()
        .with_clock(Arc::new(FixedClock(now())))
        .recommend_for_lead(&l)
        .unwrap();
    store.save(rec).await.unwrap();

    let report = service(store)
        .calculate_effectiveness(Some(&l), now())
        .await
        .unwrap();
    assert_eq!(report.original_priority, FollowUpPriority::High);
}

#[tokio::test]
async fn candidates_are_ranked_best_first() {
    let l = lead(LeadStatus::New);
    let candidates = [
        now() + Duration::hours(3),
        now() + Duration::minutes(30),
        now() + Duration::hours(1),
    ];

    let ranked = service(FixedPriority(FollowUpPriority::Low))
        .rank_candidates(Some(&l), &candidates)
        .await
        .unwrap();

    let order: Vec<DateTime<Utc>> = ranked.iter().map(|r| r.scheduled_time).collect();
    assert_eq!(order, vec![candidates[1], candidates[2], candidates[0]]);
}

/// Advances one minute on every read.
struct TickingClock(AtomicI64);

impl Clock for TickingClock {
    fn now(&self) -> DateTime<Utc> {
        now() + Duration::minutes(self.0.fetch_add(1, Ordering::SeqCst))
    }
}

#[tokio::test]
async fn ranking_scores_every_candidate_against_one_instant() {
    let l = lead(LeadStatus::New);
    let candidates = [now(), now() + Duration::hours(2), now() + Duration::hours(1)];
    let clock = Arc::new(TickingClock(AtomicI64::new(0)));

    let ranked = EffectivenessService::new(FixedPriority(FollowUpPriority::Low))
        .with_clock(clock.clone())
        .rank_candidates(Some(&l), &candidates)
        .await
        .unwrap();

    assert_eq!(ranked.len(), 3);
    assert!(ranked.iter().all(|r| r.actual_follow_up_time == now()));
    assert_eq!(clock.0.load(Ordering::SeqCst), 1);
}
