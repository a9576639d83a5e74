//! Event eligibility
//!
//! Before touching any field the anonymizer asks a predicate whether the
//! event should be processed at all. Hosts can pass a closure, the
//! [`AlwaysEligible`] predicate, or a configured [`Condition`].

use crate::domain::Event;
use serde::{Deserialize, Serialize};

/// Decides whether a record is processed
pub trait EventPredicate<R: ?Sized> {
    /// True when the record should be anonymized
    fn is_eligible(&self, record: &R) -> bool;
}

impl<R: ?Sized, F> EventPredicate<R> for F
where
    F: Fn(&R) -> bool,
{
    fn is_eligible(&self, record: &R) -> bool {
        self(record)
    }
}

/// Predicate that accepts every record
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysEligible;

impl<R: ?Sized> EventPredicate<R> for AlwaysEligible {
    fn is_eligible(&self, _record: &R) -> bool {
        true
    }
}

/// Type and tag gating for [`Event`]s
///
/// An event is eligible when:
/// - `type` is unset or equals the event's `type` field
/// - every entry of `tags` is present in the event's `tags`
/// - no entry of `exclude_tags` is present in the event's `tags`
///
/// # Examples
///
/// ```
/// use anonymize::anonymization::condition::{Condition, EventPredicate};
/// use anonymize::domain::Event;
///
/// let condition = Condition {
///     event_type: Some("apache".to_string()),
///     tags: vec!["web".to_string()],
///     exclude_tags: vec![],
/// };
///
/// let event = Event::from_json_str(r#"{"type": "apache", "tags": ["web"]}"#).unwrap();
/// assert!(condition.is_eligible(&event));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    /// Required event type
    #[serde(default, rename = "type")]
    pub event_type: Option<String>,

    /// Tags that must all be present
    #[serde(default)]
    pub tags: Vec<String>,

    /// Tags that must all be absent
    #[serde(default)]
    pub exclude_tags: Vec<String>,
}

impl Condition {
    /// True when the condition accepts every event
    pub fn is_empty(&self) -> bool {
        self.event_type.is_none() && self.tags.is_empty() && self.exclude_tags.is_empty()
    }

    /// Evaluate the condition against an event
    pub fn matches(&self, event: &Event) -> bool {
        if let Some(ref wanted) = self.event_type {
            if event.event_type() != Some(wanted.as_str()) {
                return false;
            }
        }

        let tags = event.tags();
        self.tags.iter().all(|t| tags.contains(&t.as_str()))
            && !self.exclude_tags.iter().any(|t| tags.contains(&t.as_str()))
    }
}

impl EventPredicate<Event> for Condition {
    fn is_eligible(&self, record: &Event) -> bool {
        self.matches(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(value: serde_json::Value) -> Event {
        Event::from_value(value).unwrap()
    }

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_condition_accepts_everything() {
        let condition = Condition::default();
        assert!(condition.is_empty());
        assert!(condition.matches(&event(json!({}))));
        assert!(condition.matches(&event(json!({"type": "x", "tags": ["y"]}))));
    }

    #[test]
    fn test_type_must_match() {
        let condition = Condition {
            event_type: Some("apache".to_string()),
            ..Default::default()
        };
        assert!(condition.matches(&event(json!({"type": "apache"}))));
        assert!(!condition.matches(&event(json!({"type": "nginx"}))));
        assert!(!condition.matches(&event(json!({}))));
    }

    #[test]
    fn test_all_tags_required() {
        let condition = Condition {
            tags: tags(&["web", "prod"]),
            ..Default::default()
        };
        assert!(condition.matches(&event(json!({"tags": ["prod", "web", "eu"]}))));
        assert!(!condition.matches(&event(json!({"tags": ["web"]}))));
        assert!(!condition.matches(&event(json!({}))));
    }

    #[test]
    fn test_exclude_tags() {
        let condition = Condition {
            exclude_tags: tags(&["_grokparsefailure"]),
            ..Default::default()
        };
        assert!(condition.matches(&event(json!({"tags": ["web"]}))));
        assert!(!condition.matches(&event(json!({"tags": ["web", "_grokparsefailure"]}))));
    }

    #[test]
    fn test_closure_and_always_predicates() {
        let e = event(json!({"keep": true}));
        let closure = |record: &Event| record.get("keep").is_some();
        assert!(closure.is_eligible(&e));
        assert!(AlwaysEligible.is_eligible(&e));

        let never = |_: &Event| false;
        assert!(!never.is_eligible(&e));
    }

    #[test]
    fn test_deserialize_from_toml() {
        let condition: Condition = toml::from_str(
            r#"
type = "syslog"
exclude_tags = ["internal"]
"#,
        )
        .unwrap();
        assert_eq!(condition.event_type.as_deref(), Some("syslog"));
        assert!(condition.tags.is_empty());
        assert_eq!(condition.exclude_tags, tags(&["internal"]));
    }
}
