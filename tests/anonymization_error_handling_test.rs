//! Error handling tests for configuration resolution and fail-soft processing

use anonymize::anonymization::{
    condition::AlwaysEligible, resolve, AnonymizeConfig, Algorithm, CollectingSink,
    FieldAnonymizer,
};
use anonymize::domain::{AnonymizeError, Event, TransformationError};
use serde_json::json;
use std::sync::Arc;
use test_case::test_case;

#[test_case("CRC32" ; "unknown")]
#[test_case("sha1" ; "lowercase")]
#[test_case("" ; "empty")]
#[test_case("SHA-256" ; "dashed")]
fn test_unknown_algorithm_is_configuration_error(name: &str) {
    let err = resolve(name, "topsecret").unwrap_err();
    assert!(matches!(err, AnonymizeError::Configuration(_)));
    assert!(err.to_string().contains("Unknown algorithm"));
}

#[test_case("33" ; "too long")]
#[test_case("abc" ; "not a number")]
#[test_case("-8" ; "negative")]
fn test_bad_prefix_is_configuration_error(key: &str) {
    assert!(matches!(
        resolve("IPV4_NETWORK", key),
        Err(AnonymizeError::Configuration(_))
    ));
}

#[test]
fn test_empty_key_is_configuration_error() {
    for algorithm in Algorithm::ALL {
        assert!(
            matches!(
                resolve(algorithm.name(), ""),
                Err(AnonymizeError::Configuration(_))
            ),
            "{algorithm}"
        );
    }
}

#[test]
fn test_from_config_rejects_unknown_algorithm() {
    let mut config = AnonymizeConfig::new(["ip"], "k", Algorithm::Sha1);
    config.algorithm = "WHIRLPOOL".to_string();
    assert!(FieldAnonymizer::from_config(&config).is_err());
}

#[test]
fn test_failed_field_keeps_original_and_reports() {
    let sink = Arc::new(CollectingSink::new());
    let anonymizer = FieldAnonymizer::from_config(&AnonymizeConfig::new(
        ["clientip", "server"],
        "24",
        Algorithm::Ipv4Network,
    ))
    .unwrap()
    .with_sink(sink.clone());

    let mut event =
        Event::from_value(json!({"clientip": "not-an-ip", "server": "10.0.0.7"})).unwrap();
    let outcome = anonymizer.process(&mut event, &AlwaysEligible);

    assert_eq!(
        event.into_value(),
        json!({"clientip": "not-an-ip", "server": "10.0.0.0"})
    );
    assert_eq!(outcome.failed.len(), 1);
    assert_eq!(
        outcome.failed[0].error,
        TransformationError::InvalidAddress("not-an-ip".to_string())
    );

    let messages = sink.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("clientip"));
    assert!(messages[0].contains("IPV4_NETWORK"));
}

#[test]
fn test_unsupported_shapes_are_reported_not_fatal() {
    let sink = Arc::new(CollectingSink::new());
    let anonymizer = FieldAnonymizer::from_config(&AnonymizeConfig::new(
        ["float", "object", "flag", "null", "ok"],
        "k",
        Algorithm::Sha1,
    ))
    .unwrap()
    .with_sink(sink.clone());

    let mut event = Event::from_value(json!({
        "float": 1.5,
        "object": {"a": 1},
        "flag": true,
        "null": null,
        "ok": "value"
    }))
    .unwrap();

    let outcome = anonymizer.process(&mut event, &AlwaysEligible);

    assert_eq!(outcome.anonymized, vec!["ok".to_string()]);
    assert_eq!(outcome.failed.len(), 4);
    assert_eq!(sink.len(), 4);
    assert_eq!(event.get("float"), Some(&json!(1.5)));
    assert_eq!(event.get("flag"), Some(&json!(true)));
}

#[test]
fn test_key_never_appears_in_errors_or_debug() {
    let bound = resolve("SHA256", "super-secret-key").unwrap();
    assert!(!format!("{bound:?}").contains("super-secret-key"));

    let config = AnonymizeConfig::new(["ip"], "super-secret-key", Algorithm::Sha256);
    assert!(!format!("{config:?}").contains("super-secret-key"));
}
