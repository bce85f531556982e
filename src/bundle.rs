//! Small key-value bundle that carries session counters across a
//! teardown-and-recreate of the app.

use serde_json::{Map, Value};
use tracing::warn;

use crate::session::SessionSnapshot;

pub const KEY_REVENUE: &str = "revenue";
pub const KEY_UNITS_SOLD: &str = "units_sold";
pub const KEY_ELAPSED_SECONDS: &str = "elapsed_seconds";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bundle {
    entries: Map<String, Value>,
}

impl Bundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_u64(&mut self, key: &str, value: u64) {
        self.entries.insert(key.to_string(), Value::from(value));
    }

    /// Reads a non-negative integer. Missing or malformed entries yield `default`.
    pub fn get_u64(&self, key: &str, default: u64) -> u64 {
        match self.entries.get(key) {
            None => default,
            Some(value) => value.as_u64().unwrap_or_else(|| {
                warn!(key, %value, "ignoring malformed bundle entry");
                default
            }),
        }
    }

    pub fn to_json(&self) -> String {
        Value::Object(self.entries.clone()).to_string()
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let entries: Map<String, Value> = serde_json::from_str(raw)?;
        Ok(Self { entries })
    }

    pub fn write_snapshot(&mut self, snapshot: &SessionSnapshot) {
        self.put_u64(KEY_REVENUE, snapshot.revenue);
        self.put_u64(KEY_UNITS_SOLD, snapshot.units_sold);
        self.put_u64(KEY_ELAPSED_SECONDS, snapshot.elapsed_seconds);
    }

    pub fn read_snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            revenue: self.get_u64(KEY_REVENUE, 0),
            units_sold: self.get_u64(KEY_UNITS_SOLD, 0),
            elapsed_seconds: self.get_u64(KEY_ELAPSED_SECONDS, 0),
        }
    }
}
