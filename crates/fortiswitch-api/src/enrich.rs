// Identity enrichment
//
// Post-processing step that tags telemetry with the switch's hostname and
// serial number before it is handed to a metrics pipeline. Accessors never
// apply it themselves.

use serde_json::Value;

use crate::telemetry::{Identity, Telemetry};

/// Key under which the serial number is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SerialKey {
    /// `serial`
    #[default]
    Serial,
    /// `serial_number` (InfluxDB tag naming used by the Telegraf output)
    SerialNumber,
}

impl SerialKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Serial => "serial",
            Self::SerialNumber => "serial_number",
        }
    }
}

/// Adds `hostname` and the serial number to every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct Enrichment {
    pub serial_key: SerialKey,
}

impl Enrichment {
    pub fn new(serial_key: SerialKey) -> Self {
        Self { serial_key }
    }

    /// Tag the record, or every record of a list. Existing keys are
    /// overwritten.
    pub fn apply(&self, telemetry: &mut Telemetry, identity: &Identity) {
        for record in telemetry.records_mut() {
            record.insert(
                self.serial_key.as_str().into(),
                Value::String(identity.serial_number.clone()),
            );
            record.insert("hostname".into(), Value::String(identity.hostname.clone()));
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::telemetry::Record;

    fn identity() -> Identity {
        Identity {
            hostname: "sw-core-01".into(),
            serial_number: "S448EP0000000001".into(),
        }
    }

    fn record(v: Value) -> Record {
        match v {
            Value::Object(m) => m,
            _ => Record::new(),
        }
    }

    #[test]
    fn enriches_every_list_record() {
        let mut telemetry = Telemetry::Records(vec![
            record(json!({"interface": "port1"})),
            record(json!({"interface": "port2"})),
        ]);
        Enrichment::new(SerialKey::SerialNumber).apply(&mut telemetry, &identity());
        assert_eq!(
            telemetry.into_value(),
            json!([
                {"interface": "port1", "serial_number": "S448EP0000000001", "hostname": "sw-core-01"},
                {"interface": "port2", "serial_number": "S448EP0000000001", "hostname": "sw-core-01"}
            ])
        );
    }

    #[test]
    fn enriches_single_record_with_serial_key() {
        let mut telemetry = Telemetry::Record(record(json!({"cpu_usage": 3})));
        Enrichment::default().apply(&mut telemetry, &identity());
        assert_eq!(
            telemetry.into_value(),
            json!({"cpu_usage": 3, "serial": "S448EP0000000001", "hostname": "sw-core-01"})
        );
    }
}
