//! Serde roundtrip and JsonSchema validation tests for entity types.
//!
//! Entities travel to and from the remote service as JSON records, so the
//! serialized shape is the wire contract.

use chrono::{NaiveDate, TimeZone, Utc};
use pretty_assertions::assert_eq;
use schemars::schema_for;
use tempo_core::entities::*;
use tempo_core::identity::UserIdentity;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

roundtrip_and_validate!(
    task_roundtrip,
    Task,
    Task {
        id: "tsk-a3f8b2c1".into(),
        owner_id: "usr-1".into(),
        name: "Writing".into(),
        description: Some("Chapter drafts".into()),
        created_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    task_without_description_roundtrip,
    Task,
    Task {
        id: "tsk-a3f8b2c2".into(),
        owner_id: "usr-1".into(),
        name: "Reading".into(),
        description: None,
        created_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    time_log_roundtrip,
    TimeLog,
    TimeLog {
        id: "log-00c0ffee".into(),
        task_id: "tsk-a3f8b2c1".into(),
        owner_id: "usr-1".into(),
        hours: 1,
        minutes: 30,
        date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        created_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    identity_roundtrip,
    UserIdentity,
    UserIdentity {
        user_id: "usr-1".into(),
        email: Some("me@example.com".into()),
    }
);

#[test]
fn time_log_date_is_a_plain_calendar_date() {
    let log = TimeLog {
        id: "log-1".into(),
        task_id: "tsk-1".into(),
        owner_id: "usr-1".into(),
        hours: 2,
        minutes: 0,
        date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        created_at: Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap(),
    };
    let json = serde_json::to_value(&log).unwrap();
    assert_eq!(json["date"], "2024-01-02");
    assert_eq!(log.total_minutes(), 120);
}

#[test]
fn task_accepts_missing_description_key() {
    let json = serde_json::json!({
        "id": "tsk-1",
        "owner_id": "usr-1",
        "name": "Writing",
        "created_at": "2024-01-01T00:00:00Z",
    });
    let task: Task = serde_json::from_value(json).unwrap();
    assert_eq!(task.description, None);
}

#[test]
fn entity_trait_binds_collection_and_order() {
    use tempo_core::enums::Collection;

    assert_eq!(Task::COLLECTION, Collection::Tasks);
    assert_eq!(Task::ORDER_BY.column, "created_at");
    assert!(Task::ORDER_BY.descending);
    assert_eq!(TimeLog::COLLECTION, Collection::TimeLogs);
    assert_eq!(TimeLog::ORDER_BY.column, "date");
    assert!(TimeLog::ORDER_BY.descending);
}
