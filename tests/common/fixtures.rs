//! Test data fixtures for consistent testing
use atlasmeasure::datamodel::AtlasDateTime;
use serde_json::{Value, json};

/// Raw samples with one malformed entry in the middle
pub fn raw_samples_with_bad_entry() -> Vec<Value> {
    vec![
        json!({"timestamp": "2024-01-01T00:00:00Z", "value": "10"}),
        json!({"timestamp": "bad", "value": null}),
        json!({"timestamp": "2024-01-02T00:00:00Z", "value": "20"}),
    ]
}

/// Process measurements document, two pages worth of the same host
pub fn process_measurements_page_one() -> &'static str {
    r#"{
  "groupId": "5e2211c17a3e5a48f5497de3",
  "hostId": "cluster0-shard-00-00.mongodb.net:27017",
  "processId": "cluster0-shard-00-00.mongodb.net:27017",
  "granularity": "PT1H",
  "start": "2024-01-01T00:00:00Z",
  "end": "2024-01-01T02:00:00Z",
  "measurements": [
    {
      "name": "NETWORK_BYTES_OUT",
      "units": "BYTES_PER_SECOND",
      "dataPoints": [
        {"timestamp": "2024-01-01T00:00:00Z", "value": 1024.0},
        {"timestamp": "2024-01-01T01:00:00Z", "value": 3072.0},
        {"timestamp": "2024-01-01T02:00:00Z", "value": null}
      ]
    },
    {
      "name": "OPCOUNTER_QUERY",
      "units": "SCALAR_PER_SECOND",
      "dataPoints": [
        {"timestamp": "2024-01-01T00:00:00Z", "value": 1200},
        {"timestamp": "2024-01-01T01:00:00Z", "value": 1800},
        {"timestamp": "not a date", "value": 2400}
      ]
    }
  ]
}"#
}

pub fn process_measurements_page_two() -> &'static str {
    r#"{
  "granularity": "PT1H",
  "measurements": [
    {
      "name": "OPCOUNTER_QUERY",
      "units": "SCALAR_PER_SECOND",
      "dataPoints": [{"timestamp": "2024-01-01T03:00:00Z", "value": 1}]
    },
    {
      "name": "SYSTEM_NORMALIZED_CPU_USER",
      "units": "PERCENT",
      "dataPoints": []
    }
  ]
}"#
}

pub fn day(day: u8) -> AtlasDateTime {
    AtlasDateTime::from_gregorian_utc_hms(2024, 1, day, 0, 0, 0)
}
