use std::fmt::Formatter;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Numeric form fields keyed by input name, in form order.
///
/// Serialized as a JSON object. A repeated name keeps its first position and
/// its last value.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PredictionRequest(Vec<(String, f64)>);

impl PredictionRequest {
    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        let name = name.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, existing)) => *existing = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| *value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(name, value)| (name.as_str(), *value))
    }

    /// Returns the first field, in form order, that is not a finite number.
    pub fn first_invalid_field(&self) -> Option<&str> {
        self.iter()
            .find(|(_, value)| !value.is_finite())
            .map(|(name, _)| name)
    }
}

impl<N: Into<String>> FromIterator<(N, f64)> for PredictionRequest {
    fn from_iter<T: IntoIterator<Item = (N, f64)>>(iter: T) -> Self {
        let mut request = Self::default();
        for (name, value) in iter {
            request.insert(name, value);
        }
        request
    }
}

impl Serialize for PredictionRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PredictionRequest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RequestVisitor;

        impl<'de> Visitor<'de> for RequestVisitor {
            type Value = PredictionRequest;

            fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
                formatter.write_str("an object of numeric fields")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut request = PredictionRequest::default();
                while let Some((name, value)) = access.next_entry::<String, f64>()? {
                    request.insert(name, value);
                }
                Ok(request)
            }
        }

        deserializer.deserialize_map(RequestVisitor)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PredictionResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_number: Option<i64>,

    pub cluster_name: String,

    pub segment_info: SegmentInfo,
}

/// Aggregate statistics of the predicted segment.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SegmentInfo {
    pub size: u64,
    pub percentage: f64,
    pub avg_age: f64,
    pub avg_income: f64,
    pub avg_spending: f64,
}

/// Error body returned by the prediction endpoint with a non-2xx status.
#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
}
