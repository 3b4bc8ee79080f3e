use std::sync::Arc;
use std::time::Duration;

use super::*;

const EVIDENCE: &str = "The Federal Reserve raised interest rates by 0.25 percent in March.";
const CLAIM: &str = "The Federal Reserve raised rates by 0.25 percent.";

fn scorer_with(backends: Vec<Arc<dyn NliBackend>>) -> NliScorer {
    NliScorer::new(backends, new_nli_cache(), NliConfig::default())
}

#[tokio::test]
async fn test_model_result_is_used_and_cached() {
    let mock = Arc::new(MockNliBackend::fixed(NliResult::new(0.8, 0.1, 0.1)));
    let scorer = scorer_with(vec![mock.clone() as Arc<dyn NliBackend>]);

    let first = scorer.score(EVIDENCE, CLAIM).await;
    assert_eq!(first.strategy, NliStrategy::Model);
    assert_eq!(first.result, NliResult::new(0.8, 0.1, 0.1));

    let second = scorer.score(EVIDENCE, CLAIM).await;
    assert_eq!(second.strategy, NliStrategy::Cached);
    assert_eq!(second.result, first.result);
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn test_no_backend_uses_heuristic() {
    let scorer = NliScorer::heuristic_only(new_nli_cache());
    assert!(!scorer.has_model());

    let outcome = scorer.score(EVIDENCE, CLAIM).await;
    assert_eq!(outcome.strategy, NliStrategy::Heuristic);
    assert_eq!(outcome.result, heuristic_score(EVIDENCE, CLAIM));
}

#[tokio::test]
async fn test_heuristic_results_are_not_cached() {
    let scorer = NliScorer::heuristic_only(new_nli_cache());
    scorer.score(EVIDENCE, CLAIM).await;
    scorer.cache().run_pending_tasks();
    assert!(scorer.cache().is_empty());

    let again = scorer.score(EVIDENCE, CLAIM).await;
    assert_eq!(again.strategy, NliStrategy::Heuristic);
}

#[tokio::test]
async fn test_backend_error_falls_back() {
    let failing: Arc<dyn NliBackend> = Arc::new(MockNliBackend::failing());
    let scorer = scorer_with(vec![failing]);
    let outcome = scorer.score(EVIDENCE, CLAIM).await;
    assert_eq!(outcome.strategy, NliStrategy::Heuristic);
}

#[tokio::test]
async fn test_implausible_scores_fall_back() {
    let cases = [
        NliResult::new(0.1, 0.1, 0.1),
        NliResult::new(0.9, 0.9, 0.9),
        NliResult::new(f32::NAN, 0.1, 0.1),
        NliResult::new(1.2, 0.0, 0.0),
        NliResult::new(-0.1, 0.6, 0.5),
    ];
    for bad in cases {
        let backend: Arc<dyn NliBackend> = Arc::new(MockNliBackend::fixed(bad));
        let scorer = scorer_with(vec![backend]);
        let outcome = scorer.score(EVIDENCE, CLAIM).await;
        assert_eq!(outcome.strategy, NliStrategy::Heuristic, "case {bad:?}");
        assert!(outcome.result.in_unit_range());
        scorer.cache().run_pending_tasks();
        assert!(scorer.cache().is_empty());
    }
}

#[tokio::test(start_paused = true)]
async fn test_slow_backend_times_out() {
    let slow = MockNliBackend::new(MockNliBehavior::Slow(
        Duration::from_secs(10),
        NliResult::new(0.8, 0.1, 0.1),
    ));
    let scorer = NliScorer::new(
        vec![Arc::new(slow) as Arc<dyn NliBackend>],
        new_nli_cache(),
        NliConfig::default().with_timeout(Duration::from_millis(100)),
    );

    let outcome = scorer.score(EVIDENCE, CLAIM).await;
    assert_eq!(outcome.strategy, NliStrategy::Heuristic);
}

#[tokio::test]
async fn test_strategies_tried_in_order() {
    let failing = Arc::new(MockNliBackend::failing());
    let good = Arc::new(MockNliBackend::fixed(NliResult::new(0.1, 0.7, 0.2)));
    let scorer = scorer_with(vec![
        failing.clone() as Arc<dyn NliBackend>,
        good.clone() as Arc<dyn NliBackend>,
    ]);

    let outcome = scorer.score(EVIDENCE, CLAIM).await;
    assert_eq!(outcome.strategy, NliStrategy::Model);
    assert_eq!(outcome.result.contra, 0.7);
    assert_eq!(failing.call_count(), 1);
    assert_eq!(good.call_count(), 1);
}

#[tokio::test]
async fn test_cache_key_uses_truncated_text() {
    let mock = Arc::new(MockNliBackend::fixed(NliResult::new(0.6, 0.2, 0.2)));
    let scorer = scorer_with(vec![mock.clone() as Arc<dyn NliBackend>]);

    let base = "x".repeat(1_000);
    let a = format!("{base}AAAA");
    let b = format!("{base}BBBB");

    scorer.score(&a, CLAIM).await;
    let second = scorer.score(&b, CLAIM).await;
    assert_eq!(second.strategy, NliStrategy::Cached);
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn test_outputs_always_in_range() {
    let scorer = NliScorer::heuristic_only(new_nli_cache());
    let pairs = [
        ("", ""),
        ("false false false debunked hoax", "false claim"),
        (EVIDENCE, CLAIM),
        ("12% 14% 2024 $5", "12% of 2024"),
    ];
    for (e, c) in pairs {
        let r = scorer.score(e, c).await.result;
        assert!(r.in_unit_range(), "{e:?} / {c:?} -> {r:?}");
    }
}

#[test]
fn test_validity_band() {
    assert!(NliResult::new(0.5, 0.2, 0.3).is_valid());
    assert!(NliResult::new(0.3, 0.2, 0.1).is_valid());
    assert!(!NliResult::new(0.1, 0.1, 0.1).is_valid());
    assert!(!NliResult::new(0.6, 0.6, 0.6).is_valid());
}
