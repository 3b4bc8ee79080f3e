use super::*;

const ARTICLE: &str = "Subscribe to our newsletter for the latest updates every single morning. \
    The unemployment rate fell to 3.5% in March 2024, according to the Bureau of Labor Statistics. \
    I believe this might be the best economy we could ever hope to see in our lifetimes. \
    Officials said the Federal Reserve raised interest rates by 0.25 percent on Wednesday. \
    Short line. \
    The company reported revenue of $4.5 billion in 2023, up from $3.9 billion a year earlier.";

#[test]
fn test_extract_keeps_factual_sentences() {
    let claims = ClaimExtractor::default().extract(ARTICLE);

    assert_eq!(claims.len(), 3);
    assert!(claims.iter().all(|c| c.factual_score >= 0.4));
    assert!(claims.iter().any(|c| c.text.contains("3.5%")));
    assert!(claims.iter().any(|c| c.text.contains("Federal Reserve")));
    assert!(claims.iter().any(|c| c.text.contains("$4.5 billion")));
}

#[test]
fn test_extract_sorted_descending() {
    let claims = ClaimExtractor::default().extract(ARTICLE);
    for pair in claims.windows(2) {
        assert!(pair[0].factual_score >= pair[1].factual_score);
    }
}

#[test]
fn test_extract_respects_max_claims() {
    let extractor = ClaimExtractor::new(ExtractorConfig::default().with_max_claims(1));
    let claims = extractor.extract(ARTICLE);
    assert_eq!(claims.len(), 1);

    let all = ClaimExtractor::default().extract(ARTICLE);
    assert_eq!(claims[0], all[0]);
}

#[test]
fn test_max_claims_is_clamped() {
    let config = ExtractorConfig::default().with_max_claims(100);
    assert_eq!(config.max_claims, 15);

    let extractor = ClaimExtractor::new(ExtractorConfig {
        max_claims: 0,
        ..Default::default()
    });
    assert_eq!(extractor.config().max_claims, 1);
}

#[test]
fn test_duplicates_are_dropped() {
    let sentence = "The unemployment rate fell to 3.5% in March 2024, according to officials.";
    let text = format!("{sentence} {sentence}");
    let claims = ClaimExtractor::default().extract(&text);
    assert_eq!(claims.len(), 1);
}

#[test]
fn test_evaluate_reject_reasons() {
    let extractor = ClaimExtractor::default();

    assert_eq!(
        extractor.evaluate("Too short.").unwrap_err(),
        RejectReason::TooShort
    );

    let long = format!("The budget grew by 5% in 2023 {}.", "and more ".repeat(50));
    assert_eq!(extractor.evaluate(&long).unwrap_err(), RejectReason::TooLong);

    assert_eq!(
        extractor
            .evaluate("Subscribe to our newsletter to get the best stories delivered daily.")
            .unwrap_err(),
        RejectReason::Boilerplate
    );

    assert_eq!(
        extractor
            .evaluate("I believe the new policy might seriously damage the local economy.")
            .unwrap_err(),
        RejectReason::Opinion
    );

    assert_eq!(
        extractor
            .evaluate("The weather was pleasant and everyone enjoyed the afternoon outside.")
            .unwrap_err(),
        RejectReason::LowScore
    );
}

#[test]
fn test_chrome_lookalikes_are_not_boilerplate() {
    let extractor = ClaimExtractor::default();
    for s in [
        "The finance minister will resign in March 2025, according to Reuters.",
        "Health officials said the virus could spread more quickly after 2023, according to the WHO.",
        "The museum added 500 works to its catalog in 2023, according to the curator.",
    ] {
        assert_ne!(
            extractor.evaluate(s).err(),
            Some(RejectReason::Boilerplate),
            "{s}"
        );
    }
}

#[test]
fn test_cleaning_can_make_sentence_too_short() {
    let extractor = ClaimExtractor::default();
    let s = "Prices rose 5% (according to a very long parenthetical remark here).";
    assert_eq!(extractor.evaluate(s).unwrap_err(), RejectReason::TooShort);
}

#[test]
fn test_claim_text_is_cleaned() {
    let extractor = ClaimExtractor::default();
    let claim = extractor
        .evaluate("The bridge (built in 1932) carries 40,000 cars daily, officials said [3].")
        .unwrap();
    assert_eq!(
        claim.text,
        "The bridge carries 40,000 cars daily, officials said."
    );
    assert!(claim.entities.numeric_values.contains(&"40,000".to_string()));
}

#[test]
fn test_empty_text_yields_no_claims() {
    assert!(ClaimExtractor::default().extract("").is_empty());
    assert!(
        ClaimExtractor::default()
            .extract("Click here. Read more. Share this.")
            .is_empty()
    );
}

#[test]
fn test_reject_reason_display() {
    assert_eq!(RejectReason::LowScore.to_string(), "low_score");
    assert_eq!(RejectReason::Duplicate.as_str(), "duplicate");
}

#[test]
fn test_claim_serializes_camel_case() {
    let claim = Claim::new("x", 1.5, EntityBundle::default());
    let json = serde_json::to_value(&claim).unwrap();
    assert!(json.get("factualScore").is_some());
    assert!(json["entities"].get("numericValues").is_some());
}
