// Reshaped telemetry returned by the accessors.

use serde::Serialize;
use serde_json::{Map, Value};

/// One flat JSON mapping.
pub type Record = Map<String, Value>;

/// Output of one accessor: a single mapping or an ordered list of them.
///
/// Serializes untagged, so it prints as a JSON object or array.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Telemetry {
    Record(Record),
    Records(Vec<Record>),
}

impl Telemetry {
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(r) => Some(r),
            Self::Records(_) => None,
        }
    }

    pub fn as_records(&self) -> Option<&[Record]> {
        match self {
            Self::Records(r) => Some(r),
            Self::Record(_) => None,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::Records(_))
    }

    /// Every record, whether single or list.
    pub fn records_mut(&mut self) -> impl Iterator<Item = &mut Record> {
        match self {
            Self::Record(r) => std::slice::from_mut(r).iter_mut(),
            Self::Records(rs) => rs.iter_mut(),
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            Self::Record(r) => Value::Object(r),
            Self::Records(rs) => Value::Array(rs.into_iter().map(Value::Object).collect()),
        }
    }
}

/// Switch identity, used to tag telemetry for downstream storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub hostname: String,
    pub serial_number: String,
}
