// Ensemble predictor tests.

use super::*;
use crate::error_handling::ModelError;
use futures::future::BoxFuture;

struct StubModel {
    source: ModelSource,
    probability: Option<f64>,
    available: bool,
}

impl StubModel {
    fn answering(source: ModelSource, probability: f64) -> Arc<dyn PhishingModel> {
        Arc::new(Self {
            source,
            probability: Some(probability),
            available: true,
        })
    }

    fn failing(source: ModelSource) -> Arc<dyn PhishingModel> {
        Arc::new(Self {
            source,
            probability: None,
            available: true,
        })
    }

    fn offline(source: ModelSource) -> Arc<dyn PhishingModel> {
        Arc::new(Self {
            source,
            probability: Some(0.5),
            available: false,
        })
    }
}

impl PhishingModel for StubModel {
    fn source(&self) -> ModelSource {
        self.source
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn phishing_probability<'a>(&'a self, _url: &'a str) -> BoxFuture<'a, Result<f64, ModelError>> {
        Box::pin(async move {
            self.probability
                .ok_or_else(|| ModelError::InvalidResponse("stub failure".to_string()))
        })
    }
}

fn predictor(config: PredictorConfig) -> EnsemblePredictor {
    EnsemblePredictor::new(config, ReferenceData::default()).unwrap()
}

fn with_all_models(config: PredictorConfig, probability: f64) -> EnsemblePredictor {
    predictor(config)
        .with_model(StubModel::answering(ModelSource::Electra, probability))
        .with_model(StubModel::answering(ModelSource::Biformer, probability))
        .with_model(StubModel::answering(ModelSource::Lgbm, probability))
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[tokio::test]
async fn test_zero_models_falls_back_to_inverse_trust() {
    let predictor = predictor(PredictorConfig::default());
    let prediction = predictor.predict("http://example.com").await;

    assert!(approx(prediction.domain_trust_score, 0.35));
    assert!(approx(
        prediction.phishing_probability,
        1.0 - prediction.domain_trust_score
    ));
    assert!(prediction.model_predictions.is_empty());
    assert_eq!(prediction.electra_probability, 0.0);
    assert!(prediction.rule_flags.is_empty());
    assert!(prediction.is_phishing);
    assert_eq!(prediction.risk_level, RiskLevel::High);
    assert_eq!(prediction.status, PredictionStatus::Phishing);
    // Trust confidence is reused when no model answered
    assert_eq!(prediction.confidence, 0.5);
}

#[tokio::test]
async fn test_government_domain_is_forced_safe() {
    let config = PredictorConfig {
        enable_trust_adjustment: false,
        ..Default::default()
    };
    let predictor = with_all_models(config, 0.99);
    let prediction = predictor.predict("https://www.irs.gov").await;

    assert!(!prediction.is_phishing);
    assert_eq!(prediction.rule_override, Some(RuleOverride::Safe));
    assert!(prediction.rule_flags.contains(&RuleFlag::GovernmentDomain));
    assert!(approx(prediction.phishing_probability, 0.0863 - 0.01));
}

#[tokio::test]
async fn test_brand_impersonation_clears_government_override() {
    let config = PredictorConfig {
        enable_trust_adjustment: false,
        ..Default::default()
    };
    let predictor = with_all_models(config, 0.99);
    let prediction = predictor.predict("http://paypal.example.gov").await;

    assert_eq!(
        prediction.rule_flags,
        vec![RuleFlag::GovernmentDomain, RuleFlag::PotentialBrandImpersonation]
    );
    assert_eq!(prediction.rule_override, None);
    // Falls back to the plain threshold comparison
    assert!(prediction.is_phishing);
}

#[tokio::test]
async fn test_ip_url_is_forced_phishing() {
    let predictor = with_all_models(PredictorConfig::default(), 0.01);
    let prediction = predictor.predict("http://192.168.1.1/login").await;

    assert_eq!(prediction.rule_flags, vec![RuleFlag::IpAddressUrl]);
    assert_eq!(prediction.rule_override, Some(RuleOverride::Phishing));
    assert!(prediction.is_phishing);
    assert!(approx(prediction.phishing_probability, 0.0863 + 0.01));
}

#[tokio::test]
async fn test_multiple_risk_indicators_survive_impersonation() {
    let predictor = with_all_models(PredictorConfig::default(), 0.0);
    let prediction = predictor
        .predict("http://paypal.secure-login-verify.tk/")
        .await;

    assert!(prediction
        .rule_flags
        .contains(&RuleFlag::MultipleRiskIndicators));
    assert!(prediction
        .rule_flags
        .contains(&RuleFlag::PotentialBrandImpersonation));
    assert_eq!(prediction.rule_override, Some(RuleOverride::Phishing));
    assert!(prediction.is_phishing);
    // Capped pattern boost lifts a zero score to 0.3
    assert!(approx(prediction.phishing_probability, 0.3));
}

#[tokio::test]
async fn test_free_hosting_brand_subdomain_is_not_forced_safe() {
    let predictor = with_all_models(PredictorConfig::default(), 0.99);

    for url in ["https://paypal.netlify.app/login", "https://paypal.github.io/login"] {
        let prediction = predictor.predict(url).await;
        assert!(!prediction.is_whitelisted, "{url}");
        assert!(!prediction.rule_flags.contains(&RuleFlag::HighTrustDomain), "{url}");
        assert!(prediction
            .rule_flags
            .contains(&RuleFlag::PotentialBrandImpersonation));
        assert_ne!(prediction.rule_override, Some(RuleOverride::Safe));
        assert!(prediction.is_phishing, "{url}");
    }
}

#[tokio::test]
async fn test_decimal_host_is_not_ip_address_url() {
    let predictor = with_all_models(PredictorConfig::default(), 0.01);
    let prediction = predictor.predict("http://3232235777/login").await;

    assert!(!prediction.rule_flags.contains(&RuleFlag::IpAddressUrl));
    assert_ne!(prediction.rule_override, Some(RuleOverride::Phishing));
}

#[tokio::test]
async fn test_whitelisted_domain_is_dampened() {
    let predictor = with_all_models(PredictorConfig::default(), 0.9);
    let prediction = predictor.predict("https://www.google.com").await;

    assert!(prediction.is_whitelisted);
    assert!(prediction.whitelist_reason.is_some());
    assert!(!prediction.is_phishing);
    assert_eq!(prediction.risk_level, RiskLevel::VeryLow);
    assert!(prediction.rule_flags.contains(&RuleFlag::HighTrustDomain));
}

#[tokio::test]
async fn test_failed_model_is_omitted() {
    let predictor = predictor(PredictorConfig::default())
        .with_model(StubModel::answering(ModelSource::Electra, 0.8))
        .with_model(StubModel::failing(ModelSource::Biformer))
        .with_model(StubModel::answering(ModelSource::Lgbm, 0.2));
    let prediction = predictor.predict("http://example.com").await;

    let sources: Vec<ModelSource> = prediction
        .model_predictions
        .iter()
        .map(|m| m.source)
        .collect();
    assert_eq!(sources, vec![ModelSource::Electra, ModelSource::Lgbm]);
    assert_eq!(prediction.electra_probability, 0.8);
    assert_eq!(prediction.biformer_probability, 0.0);
    assert_eq!(prediction.lgbm_probability, 0.2);

    let electra = &prediction.model_predictions[0];
    assert!(approx(electra.weight, 0.40));
    assert!(approx(electra.weighted_contribution, 0.32));
}

#[tokio::test]
async fn test_fusion_with_trust_adjustment() {
    let predictor = with_all_models(PredictorConfig::default(), 0.5);
    let prediction = predictor.predict("http://example.com").await;

    // 0.5 * (1 - 0.35 * 0.3)
    assert!(approx(prediction.phishing_probability, 0.4475));
    assert_eq!(prediction.risk_level, RiskLevel::Medium);
    // certainty 0.105, full agreement, trust confidence 0.5
    assert!(approx(prediction.confidence, 0.0525 + 0.3 + 0.15));
}

#[tokio::test]
async fn test_zero_weight_slot_uses_fallback() {
    let config = PredictorConfig {
        lgbm_weight: 0.0,
        ..Default::default()
    };
    let predictor =
        predictor(config).with_model(StubModel::answering(ModelSource::Lgbm, 0.99));
    let prediction = predictor.predict("http://example.com").await;

    assert!(approx(prediction.phishing_probability, 0.65));
    // The answering model still counts toward confidence
    assert!(approx(prediction.confidence, 0.54));
}

#[tokio::test]
async fn test_rules_disabled() {
    let config = PredictorConfig {
        enable_trust_adjustment: false,
        enable_rule_overrides: false,
        ..Default::default()
    };
    let predictor = with_all_models(config, 0.99);
    let prediction = predictor.predict("https://www.google.com").await;

    assert!(prediction.rule_flags.is_empty());
    assert_eq!(prediction.rule_override, None);
    assert!(prediction.is_phishing);
    assert_eq!(prediction.risk_level, RiskLevel::Critical);
}

#[tokio::test]
async fn test_suspicious_status_between_half_threshold_and_threshold() {
    let config = PredictorConfig {
        threshold: 0.5,
        enable_trust_adjustment: false,
        ..Default::default()
    };
    let predictor = with_all_models(config, 0.3);
    let prediction = predictor.predict("http://example.com").await;

    assert!(!prediction.is_phishing);
    assert_eq!(prediction.status, PredictionStatus::Suspicious);
}

#[tokio::test]
async fn test_batch_matches_single_predictions() {
    let predictor = with_all_models(PredictorConfig::default(), 0.3);
    let urls = [
        "http://example.com",
        "https://www.irs.gov",
        "http://192.168.1.1/login",
    ];
    let batch = predictor.predict_batch(&urls).await;

    assert_eq!(batch.len(), 3);
    for (url, prediction) in urls.iter().zip(&batch) {
        assert_eq!(prediction.url, *url);
        assert_eq!(prediction, &predictor.predict(url).await);
    }
}

#[tokio::test]
async fn test_prediction_is_idempotent() {
    let predictor = with_all_models(PredictorConfig::default(), 0.42);
    let first = predictor.predict("http://paypal.account-verify.xyz").await;
    let second = predictor.predict("http://paypal.account-verify.xyz").await;
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[tokio::test]
async fn test_quick_predict() {
    let predictor = predictor(PredictorConfig::default());
    let (is_phishing, probability) = predictor.quick_predict("http://192.168.1.1").await;
    assert!(is_phishing);
    assert!(probability > 0.0863);
}

#[test]
fn test_invalid_configuration_rejected() {
    let bad_threshold = PredictorConfig {
        threshold: 0.0,
        ..Default::default()
    };
    assert!(matches!(
        EnsemblePredictor::new(bad_threshold, ReferenceData::default()),
        Err(ConfigError::InvalidThreshold(_))
    ));

    let no_weight = PredictorConfig {
        electra_weight: 0.0,
        biformer_weight: 0.0,
        lgbm_weight: 0.0,
        ..Default::default()
    };
    assert!(matches!(
        EnsemblePredictor::new(no_weight, ReferenceData::default()),
        Err(ConfigError::NoModelWeight)
    ));
}

#[test]
fn test_model_status_reports_every_slot() {
    let predictor = predictor(PredictorConfig::default())
        .with_model(StubModel::answering(ModelSource::Electra, 0.1))
        .with_model(StubModel::offline(ModelSource::Lgbm));

    let status = predictor.model_status();
    assert_eq!(status.len(), 3);
    assert_eq!(
        status[0],
        ModelStatus {
            source: ModelSource::Electra,
            configured: true,
            available: true,
        }
    );
    assert!(!status[1].configured);
    assert!(status[2].configured && !status[2].available);
    assert!(predictor.has_available_model());
}

#[test]
fn test_risk_level_mapping() {
    assert_eq!(RiskLevel::from_probability(0.0), RiskLevel::VeryLow);
    assert_eq!(RiskLevel::from_probability(0.1), RiskLevel::Low);
    assert_eq!(RiskLevel::from_probability(0.3), RiskLevel::Medium);
    assert_eq!(RiskLevel::from_probability(0.6), RiskLevel::High);
    assert_eq!(RiskLevel::from_probability(0.85), RiskLevel::Critical);
    assert_eq!(RiskLevel::VeryLow.to_string(), "very_low");
    assert!(RiskLevel::Low < RiskLevel::Critical);
}
