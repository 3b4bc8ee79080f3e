use super::*;
use crate::claims::{Claim, EntityBundle};
use crate::nli::NliResult;

fn claim() -> Claim {
    Claim::new("The bridge carries 40,000 cars daily.", 2.0, EntityBundle::default())
}

fn scored(entail: f32, contra: f32, reputable: bool) -> ScoredEvidence {
    ScoredEvidence {
        result: NliResult::new(entail, contra, (1.0 - entail - contra).max(0.0)),
        reputable,
    }
}

fn verdict_with(label: VerdictLabel, confidence: f32) -> ClaimVerdict {
    ClaimVerdict {
        claim: claim(),
        entail_avg: 0.0,
        contra_avg: 0.0,
        verdict: label,
        relevant_sources: vec![],
        confidence,
        evidence_count: 3,
    }
}

#[test]
fn test_strongly_supported_over_reputable_sources() {
    let engine = ConsensusEngine::default();
    let scores = vec![scored(0.40, 0.05, true); 3];
    let v = engine.verdict(claim(), &scores, vec![]);

    assert_eq!(v.verdict, VerdictLabel::StronglySupported);
    assert!((v.entail_avg - 0.40).abs() < 1e-6);
    assert!((v.contra_avg - 0.05).abs() < 1e-6);
    assert_eq!(v.evidence_count, 3);
}

#[test]
fn test_single_score_is_insufficient() {
    let engine = ConsensusEngine::default();
    for (e, c) in [(0.7, 0.0), (0.0, 0.7), (0.3, 0.3)] {
        let v = engine.verdict(claim(), &[scored(e, c, true)], vec![]);
        assert_eq!(v.verdict, VerdictLabel::InsufficientEvidence);
        assert_eq!(v.confidence, INSUFFICIENT_CONFIDENCE);
    }
}

#[test]
fn test_invalid_scores_are_ignored() {
    let engine = ConsensusEngine::default();
    let scores = vec![
        scored(0.5, 0.0, false),
        ScoredEvidence {
            result: NliResult::new(f32::NAN, 0.2, 0.2),
            reputable: false,
        },
    ];
    let agg = engine.aggregate(&scores);
    assert_eq!(agg.valid, 1);
    assert_eq!(engine.label(&agg), VerdictLabel::InsufficientEvidence);
}

#[test]
fn test_reputable_sources_weigh_more() {
    let engine = ConsensusEngine::default();
    let agg = engine.aggregate(&[scored(0.6, 0.0, true), scored(0.0, 0.0, false)]);
    // (1.5 * 0.6) / 2.5
    assert!((agg.entail_avg - 0.36).abs() < 1e-6);
}

#[test]
fn test_threshold_order() {
    assert_eq!(classify(0.35, 0.15), VerdictLabel::StronglySupported);
    assert_eq!(classify(0.25, 0.20), VerdictLabel::Supported);
    assert_eq!(classify(0.10, 0.35), VerdictLabel::Refuted);
    assert_eq!(classify(0.20, 0.25), VerdictLabel::LikelyFalse);
    // ratio rule
    assert_eq!(classify(0.24, 0.15), VerdictLabel::Supported);
    assert_eq!(classify(0.22, 0.34), VerdictLabel::LikelyFalse);
    // close scores
    assert_eq!(classify(0.05, 0.0), VerdictLabel::Contested);
    assert_eq!(classify(0.22, 0.24), VerdictLabel::Contested);
    // weak majorities
    assert_eq!(classify(0.45, 0.32), VerdictLabel::WeaklySupported);
    assert_eq!(classify(0.32, 0.45), VerdictLabel::WeaklyRefuted);
}

#[test]
fn test_earlier_rule_wins_on_overlap() {
    // Matches both the strong rule and the ratio rule.
    assert_eq!(classify(0.5, 0.0), VerdictLabel::StronglySupported);
    // Matches both the refuted rule and the likely-false rule.
    assert_eq!(classify(0.0, 0.5), VerdictLabel::Refuted);
}

#[test]
fn test_classification_is_deterministic() {
    let engine = ConsensusEngine::default();
    let scores = vec![scored(0.3, 0.1, false), scored(0.2, 0.15, true)];
    let a = engine.verdict(claim(), &scores, vec![]);
    let b = engine.verdict(claim(), &scores, vec![]);
    assert_eq!(a, b);
}

#[test]
fn test_confidence_grows_with_evidence_and_margin() {
    let engine = ConsensusEngine::default();
    let few = engine.confidence(&Aggregate {
        entail_avg: 0.3,
        contra_avg: 0.1,
        valid: 2,
    });
    let many = engine.confidence(&Aggregate {
        entail_avg: 0.3,
        contra_avg: 0.1,
        valid: 8,
    });
    let wide = engine.confidence(&Aggregate {
        entail_avg: 0.6,
        contra_avg: 0.0,
        valid: 8,
    });
    assert!(few < many);
    assert!(many < wide);
    assert!((wide - 1.0).abs() < 1e-6);
}

#[test]
fn test_credibility_equal_weights() {
    let engine = ConsensusEngine::default();
    let verdicts = vec![
        verdict_with(VerdictLabel::StronglySupported, 0.8),
        verdict_with(VerdictLabel::Refuted, 0.8),
    ];
    assert!((engine.credibility(&verdicts) - 0.55).abs() < 1e-6);
}

#[test]
fn test_credibility_is_confidence_weighted() {
    let engine = ConsensusEngine::default();
    let verdicts = vec![
        verdict_with(VerdictLabel::StronglySupported, 0.9),
        verdict_with(VerdictLabel::Refuted, 0.3),
    ];
    // (0.9 * 1.0 + 0.3 * 0.1) / 1.2
    assert!((engine.credibility(&verdicts) - 0.775).abs() < 1e-5);
}

#[test]
fn test_credibility_without_claims() {
    assert_eq!(ConsensusEngine::default().credibility(&[]), 0.5);
}

#[test]
fn test_summary() {
    let engine = ConsensusEngine::default();
    let verdicts = vec![
        verdict_with(VerdictLabel::Supported, 0.7),
        verdict_with(VerdictLabel::StronglySupported, 0.7),
        verdict_with(VerdictLabel::LikelyFalse, 0.7),
    ];
    let summary = engine.summarize(&verdicts, false);

    assert_eq!(summary.total_claims, 3);
    assert_eq!(summary.count(VerdictLabel::Supported), 1);
    assert_eq!(summary.count(VerdictLabel::Refuted), 0);
    assert_eq!(summary.counts.len(), 8);
    assert_eq!(summary.message, "2 of 3 claims supported by evidence, 1 refuted");
    assert!(!summary.used_fallback_sources);
}

#[test]
fn test_summary_discloses_fallback() {
    let engine = ConsensusEngine::default();
    let summary = engine.summarize(&[verdict_with(VerdictLabel::Contested, 0.5)], true);
    assert!(summary.used_fallback_sources);
    assert!(summary.message.contains("placeholder"));
}

#[test]
fn test_summary_without_claims() {
    let summary = ConsensusEngine::default().summarize(&[], false);
    assert_eq!(summary.total_claims, 0);
    assert_eq!(summary.message, "No verifiable claims found");
}

#[test]
fn test_label_helpers() {
    for label in VerdictLabel::ALL {
        assert!(!(label.is_supportive() && label.is_refuting()));
        assert!((0.0..=1.0).contains(&label.score()));
        let json = serde_json::to_value(label).unwrap();
        assert_eq!(json, label.as_str());
    }
    assert_eq!(VerdictLabel::InsufficientEvidence.to_string(), "insufficient_evidence");
    assert_eq!(VerdictLabel::LikelyFalse.display_name(), "Likely false");
    assert_eq!(VerdictLabel::Contested.score(), 0.5);
}
