use std::fmt;
use std::marker::PhantomData;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use serde::Serialize;

/// A JSON object decoded into its entries, keeping the backend's key order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OrderedMap<V>(pub Vec<(String, V)>);

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        OrderedMap(Vec::new())
    }
}

impl<V> OrderedMap<V> {
    pub fn get(&self, key: &str) -> Option<&V> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.0.iter().map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

struct OrderedMapVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
    type Value = OrderedMap<V>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a JSON object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, V>()? {
            entries.push((key, value));
        }
        Ok(OrderedMap(entries))
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

/// label → count, as served by the seniority and contract endpoints.
pub type Breakdown = OrderedMap<u64>;

/// seniority level → (technology → count).
pub type TechBySeniority = OrderedMap<Breakdown>;

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct TechnologyCounts {
    pub labels: Vec<String>,
    pub data: Vec<u64>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Timeline {
    pub dates: Vec<String>,
    pub counts: Vec<u64>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RemoteSplit {
    pub remote: u64,
    pub onsite: u64,
    pub unknown: u64,
}

impl RemoteSplit {
    pub fn total(&self) -> u64 {
        self.remote
            .saturating_add(self.onsite)
            .saturating_add(self.unknown)
    }

    /// Share of remote postings, rounded to the nearest percent.
    pub fn remote_percent(&self) -> u64 {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        ((self.remote as f64 / total as f64) * 100.0).round() as u64
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct TopCompanies {
    pub companies: Vec<String>,
    pub counts: Vec<u64>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct TechPair {
    pub tech1: String,
    pub tech2: String,
    pub count: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct TechCorrelation {
    pub pairs: Vec<TechPair>,
}
