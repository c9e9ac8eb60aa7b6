//! Console walkthrough of the page's collaborators.
//!
//! Exercises DOM lookup, collection helpers, preference storage and date
//! handling, logging each result and returning them for inspection.

use std::fmt::Display;

use chrono::{DateTime, Duration, TimeZone};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::info;

use crate::dom::{Dom, Selector};
use crate::storage::{PreferenceStore, StorageMedium};

/// Preference key written by the walkthrough.
pub const PREFERENCES_KEY: &str = "user-preferences";

/// A sample user record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DemoUser {
    /// Name.
    pub name: String,
    /// Age in years.
    pub age: u32,
}

/// Everything the walkthrough computed.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DemoReport {
    /// Number of `.step-card` elements found.
    pub step_cards: usize,
    /// `[1, 2, 3, 4, 5]` doubled.
    pub doubled: Vec<i64>,
    /// `name` and `role` picked from the sample user.
    pub picked: Map<String, Value>,
    /// Sample users sorted by age.
    pub sorted_by_age: Vec<DemoUser>,
    /// Whether the sample preferences were written.
    pub preferences_saved: bool,
    /// The sample preferences read back.
    pub preferences: Option<Value>,
    /// Keys under the store's namespace, sorted.
    pub keys: Vec<String>,
    /// `now` in long form.
    pub now: String,
    /// `now` in RFC 3339.
    pub iso: String,
    /// One week after `now`.
    pub next_week: String,
    /// One day before `now`, relative to `now`.
    pub yesterday: String,
    /// Whether next week sorts after `now`.
    pub next_week_is_future: bool,
}

/// Copy the listed fields of `object` into a new map.
#[must_use]
pub fn pick(object: &Map<String, Value>, fields: &[&str]) -> Map<String, Value> {
    fields
        .iter()
        .filter_map(|field| {
            object
                .get(*field)
                .map(|value| ((*field).to_string(), value.clone()))
        })
        .collect()
}

/// Describe `then` relative to `now`, e.g. `"a day ago"` or `"in 3 hours"`.
#[must_use]
pub fn relative_time<Tz: TimeZone>(then: &DateTime<Tz>, now: &DateTime<Tz>) -> String {
    let delta = then.clone().signed_duration_since(now.clone());
    let future = delta > Duration::zero();
    let seconds = delta.num_seconds().unsigned_abs();
    let minutes = seconds.div_ceil(60).max(1);
    let hours = (seconds + 1800) / 3600;
    let days = (seconds + 43_200) / 86_400;

    let phrase = match seconds {
        0..45 => "a few seconds".to_string(),
        45..90 => "a minute".to_string(),
        90..2_700 => format!("{minutes} minutes"),
        2_700..5_400 => "an hour".to_string(),
        5_400..79_200 => format!("{hours} hours"),
        79_200..129_600 => "a day".to_string(),
        129_600..2_246_400 => format!("{days} days"),
        2_246_400..3_888_000 => "a month".to_string(),
        3_888_000..27_648_000 => format!("{} months", (days + 15) / 30),
        27_648_000..47_347_200 => "a year".to_string(),
        _ => format!("{} years", (days + 182) / 365),
    };

    if future {
        format!("in {phrase}")
    } else {
        format!("{phrase} ago")
    }
}

/// Run the walkthrough against the page under `root`.
pub fn run_examples<D, S, Tz>(
    dom: &D,
    store: &PreferenceStore<S>,
    root: &D::Node,
    now: &DateTime<Tz>,
) -> DemoReport
where
    D: Dom,
    S: StorageMedium,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    info!("Running setup examples");

    let step_cards = dom.query_all(root, &Selector::class("step-card")).len();
    info!(count = step_cards, "DOM: found step cards");

    let doubled: Vec<i64> = [1, 2, 3, 4, 5].iter().map(|n| n * 2).collect();
    info!(?doubled, "Utils: doubled numbers");

    let user = json!({"name": "Alice", "age": 30, "role": "developer"});
    let picked = user
        .as_object()
        .map(|object| pick(object, &["name", "role"]))
        .unwrap_or_default();
    let picked_json = Value::Object(picked.clone());
    info!(picked = %picked_json, "Utils: picked properties");

    let mut sorted_by_age = vec![
        DemoUser {
            name: "Rita".into(),
            age: 19,
        },
        DemoUser {
            name: "Sue".into(),
            age: 20,
        },
        DemoUser {
            name: "Bob".into(),
            age: 38,
        },
    ];
    sorted_by_age.sort_by_key(|user| user.age);
    info!(?sorted_by_age, "Utils: sorted by age");

    let preferences_saved = store.set(
        PREFERENCES_KEY,
        &json!({"theme": "light", "notifications": true, "language": "en"}),
    );
    let preferences = store.get_value(PREFERENCES_KEY);
    info!(?preferences, "Storage: user preferences");
    if store.has(PREFERENCES_KEY) {
        info!("Storage: preferences are saved");
    }
    let mut keys = store.keys();
    keys.sort();
    info!(?keys, namespace = store.namespace(), "Storage: all keys");

    let formatted = now.format("%B %-d, %Y at %-I:%M %p").to_string();
    let iso = now.to_rfc3339();
    info!(now = %formatted, iso = %iso, "Dates: current time");

    let later = now.clone() + Duration::days(7);
    let next_week = later.format("%b %-d, %Y").to_string();
    info!(next_week = %next_week, "Dates: one week from now");

    let earlier = now.clone() - Duration::days(1);
    let yesterday = relative_time(&earlier, now);
    info!(yesterday = %yesterday, "Dates: yesterday was");

    let next_week_is_future = later > *now;
    info!(next_week_is_future, "Dates: next week is in the future");

    info!("Setup examples complete");
    DemoReport {
        step_cards,
        doubled,
        picked,
        sorted_by_age,
        preferences_saved,
        preferences,
        keys,
        now: formatted,
        iso,
        next_week,
        yesterday,
        next_week_is_future,
    }
}
