//! Task model for the ranking engine.
//!
//! Records arrive from loosely-typed callers (JSON bodies, CSV exports), so
//! deserialization here is forgiving: a field that cannot be read as the
//! expected type becomes `None` and the scorer applies its default instead.

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Importance used when a task has none (or an unusable one).
pub const DEFAULT_IMPORTANCE: i64 = 5;

/// Estimated hours used when a task has none (or an unusable one).
pub const DEFAULT_ESTIMATED_HOURS: i64 = 1;

/// Task identifier. JSON `7` and `"7"` are different identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskId {
    Int(i64),
    Text(String),
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskId::Int(n) => write!(f, "{n}"),
            TaskId::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        TaskId::Text(s.to_string())
    }
}

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        TaskId::Text(s)
    }
}

impl From<i64> for TaskId {
    fn from(n: i64) -> Self {
        TaskId::Int(n)
    }
}

/// A task as handed to the analyzer.
///
/// Everything is optional: ids are assigned per batch, and the scorer fills
/// in defaults for importance and effort.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Task {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_id"
    )]
    pub id: Option<TaskId>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,

    /// Raw due date (`YYYY-MM-DD` or an ISO-8601 date-time); parsed at scoring time.
    #[serde(default, deserialize_with = "lenient_string")]
    pub due_date: Option<String>,

    /// 1-10, higher means more important.
    #[serde(default, deserialize_with = "lenient_int")]
    pub importance: Option<i64>,

    /// Hours.
    #[serde(default, deserialize_with = "lenient_int")]
    pub estimated_hours: Option<i64>,

    /// Tasks that must complete before this one.
    #[serde(default, deserialize_with = "lenient_ids")]
    pub dependencies: Vec<TaskId>,
}

impl Task {
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    pub fn with_importance(mut self, importance: i64) -> Self {
        self.importance = Some(importance);
        self
    }

    pub fn with_hours(mut self, hours: i64) -> Self {
        self.estimated_hours = Some(hours);
        self
    }

    pub fn with_dependencies<I, T>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TaskId>,
    {
        self.dependencies = deps.into_iter().map(Into::into).collect();
        self
    }

    /// Importance after defaulting.
    pub fn effective_importance(&self) -> i64 {
        effective_importance(self.importance)
    }

    /// Estimated hours after normalization.
    pub fn effective_hours(&self) -> i64 {
        effective_hours(self.estimated_hours)
    }
}

/// Zero counts as missing, like an empty form field.
pub fn effective_importance(raw: Option<i64>) -> i64 {
    match raw {
        Some(v) if v != 0 => v,
        _ => DEFAULT_IMPORTANCE,
    }
}

/// Negative hours are taken as absolute; zero and missing fall back to the default.
pub fn effective_hours(raw: Option<i64>) -> i64 {
    match raw.map(i64::saturating_abs) {
        Some(h) if h > 0 => h,
        _ => DEFAULT_ESTIMATED_HOURS,
    }
}

/// Parse an integer cell the same way JSON fields are coerced: surrounding
/// whitespace is ignored, anything that is not a whole number is `None`.
pub fn parse_lenient_int(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientInt)
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientString)
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<TaskId>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientId)
}

fn lenient_ids<'de, D>(deserializer: D) -> Result<Vec<TaskId>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientIds)
}

fn drain_seq<'de, A: SeqAccess<'de>>(mut seq: A) -> Result<(), A::Error> {
    while seq.next_element::<IgnoredAny>()?.is_some() {}
    Ok(())
}

fn drain_map<'de, A: MapAccess<'de>>(mut map: A) -> Result<(), A::Error> {
    while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
    Ok(())
}

struct LenientInt;

impl<'de> Visitor<'de> for LenientInt {
    type Value = Option<i64>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer, a numeric string, or anything else (ignored)")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Some(i64::try_from(v).unwrap_or(i64::MAX)))
    }

    // `as` saturates, so huge values clamp to the i64 range.
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        if v.is_finite() {
            Ok(Some(v.trunc() as i64))
        } else {
            Ok(None)
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(parse_lenient_int(v))
    }

    fn visit_bool<E: de::Error>(self, _v: bool) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
        d.deserialize_any(LenientInt)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<Self::Value, A::Error> {
        drain_seq(seq)?;
        Ok(None)
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        drain_map(map)?;
        Ok(None)
    }
}

/// One id: an integer or a string. Anything else reads as `None`.
struct LenientId;

impl<'de> Visitor<'de> for LenientId {
    type Value = Option<TaskId>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer or string id, or anything else (ignored)")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(TaskId::Int(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(i64::try_from(v).ok().map(TaskId::Int))
    }

    fn visit_f64<E: de::Error>(self, _v: f64) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(Some(TaskId::Text(v.to_string())))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(Some(TaskId::Text(v)))
    }

    fn visit_bool<E: de::Error>(self, _v: bool) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
        d.deserialize_any(LenientId)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<Self::Value, A::Error> {
        drain_seq(seq)?;
        Ok(None)
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        drain_map(map)?;
        Ok(None)
    }
}

/// Sequence element wrapper so `next_element` can reuse [`LenientId`].
struct MaybeId(Option<TaskId>);

impl<'de> Deserialize<'de> for MaybeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(LenientId).map(MaybeId)
    }
}

/// A dependency list. Unusable elements are dropped; a non-list is empty.
struct LenientIds;

impl<'de> Visitor<'de> for LenientIds {
    type Value = Vec<TaskId>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a list of ids, or anything else (ignored)")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut ids = Vec::new();
        while let Some(MaybeId(id)) = seq.next_element()? {
            ids.extend(id);
        }
        Ok(ids)
    }

    fn visit_i64<E: de::Error>(self, _v: i64) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_u64<E: de::Error>(self, _v: u64) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_f64<E: de::Error>(self, _v: f64) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_str<E: de::Error>(self, _v: &str) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_bool<E: de::Error>(self, _v: bool) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
        d.deserialize_any(LenientIds)
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        drain_map(map)?;
        Ok(Vec::new())
    }
}

struct LenientString;

impl<'de> Visitor<'de> for LenientString {
    type Value = Option<String>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, or anything else (ignored)")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(Some(v))
    }

    fn visit_i64<E: de::Error>(self, _v: i64) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_u64<E: de::Error>(self, _v: u64) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_f64<E: de::Error>(self, _v: f64) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_bool<E: de::Error>(self, _v: bool) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
        d.deserialize_any(LenientString)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<Self::Value, A::Error> {
        drain_seq(seq)?;
        Ok(None)
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        drain_map(map)?;
        Ok(None)
    }
}
