//! JSON payload types returned by the single-address endpoints.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::coord::Coordinates;

/// Geography layers attached to a match, keyed by layer name.
///
/// Each layer is a list of loosely-typed attribute maps. The service adds
/// layers and attributes over time, so no schema is imposed here.
pub type Geographies = BTreeMap<String, Vec<Map<String, Value>>>;

/// A named snapshot of the address-range reference data.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Benchmark {
    pub id: String,

    #[serde(rename = "benchmarkName")]
    pub name: String,

    #[serde(rename = "benchmarkDescription", default)]
    pub description: String,

    #[serde(rename = "isDefault", default)]
    pub is_default: bool,
}

/// A named snapshot of geography boundaries, paired with a benchmark.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vintage {
    pub id: String,

    #[serde(rename = "vintageName")]
    pub name: String,

    #[serde(rename = "vintageDescription", default)]
    pub description: String,

    #[serde(rename = "isDefault", default)]
    pub is_default: bool,
}

/// Street segment identifier and the side of it the address falls on.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TigerLine {
    #[serde(rename = "tigerLineId")]
    pub id: String,

    pub side: String,
}

impl TigerLine {
    pub fn new(id: impl Into<String>, side: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            side: side.into(),
        }
    }
}

/// Parsed pieces of a matched address.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddressComponents {
    pub zip: String,
    pub street_name: String,
    pub pre_type: String,
    pub city: String,
    pub pre_direction: String,
    pub suffix_direction: String,
    pub from_address: String,
    pub state: String,
    pub suffix_type: String,
    pub to_address: String,
    pub suffix_qualifier: String,
    pub pre_qualifier: String,
}

/// One candidate match for a single-address lookup.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressMatch {
    #[serde(default)]
    pub tiger_line: TigerLine,

    pub coordinates: Coordinates,

    #[serde(default)]
    pub address_components: AddressComponents,

    #[serde(default)]
    pub matched_address: String,

    /// Only present on `geographies` lookups.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub geographies: Geographies,
}

impl AddressMatch {
    /// Returns the attribute maps for one geography layer, if present.
    pub fn layer(&self, name: &str) -> Option<&[Map<String, Value>]> {
        self.geographies.get(name).map(Vec::as_slice)
    }
}
