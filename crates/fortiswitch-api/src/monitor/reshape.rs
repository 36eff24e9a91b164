// Response reshaping
//
// Pure functions turning FortiSwitchOS monitor documents into flat records.
// Every function takes the owned payload and names the offending key in
// `Error::ResponseShape` when the document doesn't look as expected.

use serde_json::{Map, Value};

use crate::error::Error;
use crate::telemetry::{Record, Telemetry};

/// Key injected into every per-interface record.
pub const INTERFACE_KEY: &str = "interface";

/// Take the `results` field out of a monitor document.
pub fn results(endpoint: &str, mut document: Value) -> Result<Value, Error> {
    document
        .get_mut("results")
        .map(Value::take)
        .ok_or_else(|| Error::shape(endpoint, "results"))
}

fn into_object(endpoint: &str, key: &str, value: Value) -> Result<Record, Error> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(Error::shape(endpoint, key)),
    }
}

/// Object results become one record, arrays of objects become a list.
pub fn passthrough(endpoint: &str, results: Value) -> Result<Telemetry, Error> {
    match results {
        Value::Object(map) => Ok(Telemetry::Record(map)),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| into_object(endpoint, &format!("results[{i}]"), item))
            .collect::<Result<Vec<_>, _>>()
            .map(Telemetry::Records),
        _ => Err(Error::shape(endpoint, "results")),
    }
}

/// `system/status`: the `results` mapping, plus top-level `version` and
/// `build` when the document carries them and `results` doesn't.
pub fn system_status(endpoint: &str, mut document: Value) -> Result<Record, Error> {
    let version = document.get_mut("version").map(Value::take);
    let build = document.get_mut("build").map(Value::take);
    let mut record = into_object(endpoint, "results", results(endpoint, document)?)?;

    if let Some(version) = version {
        record.entry("version").or_insert(version);
    }
    if let Some(build) = build {
        record.entry("build").or_insert(build);
    }
    Ok(record)
}

/// `switch/port`: map keyed by interface to a list, `name` renamed to
/// `interface`.
pub fn port_state(endpoint: &str, results: Value) -> Result<Vec<Record>, Error> {
    let ports = into_object(endpoint, "results", results)?;
    ports
        .into_iter()
        .map(|(key, port)| -> Result<Record, Error> {
            let mut record = into_object(endpoint, &key, port)?;
            let name = record
                .shift_remove("name")
                .ok_or_else(|| Error::shape(endpoint, format!("{key}.name")))?;
            record.insert(INTERFACE_KEY.into(), name);
            Ok(record)
        })
        .collect()
}

/// `switch/port-statistics`: map keyed by interface to a list, the outer
/// key becomes `interface`. A duplicated inner `name` is dropped.
pub fn port_statistics(endpoint: &str, results: Value) -> Result<Vec<Record>, Error> {
    let ports = into_object(endpoint, "results", results)?;
    ports
        .into_iter()
        .map(|(key, stats)| -> Result<Record, Error> {
            let mut record = into_object(endpoint, &key, stats)?;
            if record.get("name").and_then(Value::as_str) == Some(key.as_str()) {
                record.shift_remove("name");
            }
            record.insert(INTERFACE_KEY.into(), Value::String(key));
            Ok(record)
        })
        .collect()
}

fn lowercase_keys(record: Record) -> Record {
    record
        .into_iter()
        .map(|(k, v)| (k.to_lowercase(), v))
        .collect()
}

fn into_array(endpoint: &str, results: Value) -> Result<Vec<Value>, Error> {
    match results {
        Value::Array(items) => Ok(items),
        _ => Err(Error::shape(endpoint, "results")),
    }
}

/// `switch/poe-status` summary: the first entry, keys lowercased.
pub fn poe_summary(endpoint: &str, results: Value) -> Result<Record, Error> {
    let first = into_array(endpoint, results)?
        .into_iter()
        .next()
        .ok_or_else(|| Error::shape(endpoint, "results[0]"))?;
    into_object(endpoint, "results[0]", first).map(lowercase_keys)
}

/// `switch/poe-status` per-interface entries: every entry carrying
/// `Interface`, keys lowercased.
pub fn poe_interfaces(endpoint: &str, results: Value) -> Result<Vec<Record>, Error> {
    Ok(into_array(endpoint, results)?
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(map) if map.contains_key("Interface") => Some(lowercase_keys(map)),
            _ => None,
        })
        .collect())
}

/// Lift `status.value` / `status.unit` to the top level and drop `status`.
pub fn flatten_module(endpoint: &str, mut module: Record) -> Result<Record, Error> {
    let status = module
        .shift_remove("status")
        .ok_or_else(|| Error::shape(endpoint, "status"))?;
    let mut status = into_object(endpoint, "status", status)?;
    let value = status
        .remove("value")
        .ok_or_else(|| Error::shape(endpoint, "status.value"))?;
    let unit = status
        .remove("unit")
        .ok_or_else(|| Error::shape(endpoint, "status.unit"))?;
    module.insert("value".into(), value);
    module.insert("unit".into(), unit);
    Ok(module)
}

/// `system/pcb-temp`: flatten every module.
///
/// Accepts a list of modules, a single module, or a map keyed by module
/// name (the key is kept as `module`).
pub fn pcb_temp(endpoint: &str, results: Value) -> Result<Telemetry, Error> {
    match results {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                let module = into_object(endpoint, &format!("results[{i}]"), item)?;
                flatten_module(endpoint, module)
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Telemetry::Records),
        Value::Object(map) if map.contains_key("status") => {
            flatten_module(endpoint, map).map(Telemetry::Record)
        }
        Value::Object(map) => map
            .into_iter()
            .map(|(name, item)| -> Result<Record, Error> {
                let mut module = flatten_module(endpoint, into_object(endpoint, &name, item)?)?;
                module.entry("module").or_insert(Value::String(name));
                Ok(module)
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Telemetry::Records),
        _ => Err(Error::shape(endpoint, "results")),
    }
}

/// `system/resource`: first `cpu` element as `cpu_usage`, `mem` passed
/// through unchanged as `mem_usage`.
pub fn system_resource(endpoint: &str, results: Value) -> Result<Record, Error> {
    let mut resource = match results {
        Value::Array(items) => items
            .into_iter()
            .next()
            .ok_or_else(|| Error::shape(endpoint, "results[0]"))
            .and_then(|first| into_object(endpoint, "results[0]", first))?,
        other => into_object(endpoint, "results", other)?,
    };

    let cpu_usage = match resource.remove("cpu") {
        Some(Value::Array(cpu)) => cpu
            .into_iter()
            .next()
            .ok_or_else(|| Error::shape(endpoint, "cpu[0]"))?,
        _ => return Err(Error::shape(endpoint, "cpu")),
    };
    let mem_usage = resource
        .remove("mem")
        .or_else(|| resource.remove("memory"))
        .ok_or_else(|| Error::shape(endpoint, "mem"))?;

    let mut record = Map::new();
    record.insert("cpu_usage".into(), cpu_usage);
    record.insert("mem_usage".into(), mem_usage);
    Ok(record)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    const EP: &str = "test";

    fn values(records: Vec<Record>) -> Value {
        Value::Array(records.into_iter().map(Value::Object).collect())
    }

    #[test]
    fn results_requires_the_field() {
        assert_eq!(results(EP, json!({"results": [1]})).unwrap(), json!([1]));
        let err = results(EP, json!({"status": "success"})).unwrap_err();
        assert!(matches!(err, Error::ResponseShape { ref key, .. } if key == "results"));
    }

    #[test]
    fn port_state_renames_name_to_interface() {
        let out = port_state(EP, json!({"port1": {"name": "port1", "speed": 1000}})).unwrap();
        assert_eq!(values(out), json!([{"speed": 1000, "interface": "port1"}]));
    }

    #[test]
    fn port_state_keeps_vendor_order() {
        let out = port_state(
            EP,
            json!({
                "port2": {"name": "port2", "status": "up"},
                "port10": {"name": "port10", "status": "down"},
                "port1": {"name": "port1", "status": "up"}
            }),
        )
        .unwrap();
        let names: Vec<_> = out.iter().map(|r| r[INTERFACE_KEY].clone()).collect();
        assert_eq!(names, vec![json!("port2"), json!("port10"), json!("port1")]);
    }

    #[test]
    fn port_state_without_name_is_a_shape_error() {
        let err = port_state(EP, json!({"port1": {"speed": 10}})).unwrap_err();
        assert!(matches!(err, Error::ResponseShape { ref key, .. } if key == "port1.name"));
    }

    #[test]
    fn port_statistics_uses_outer_key() {
        let out = port_statistics(
            EP,
            json!({
                "port1": {"name": "port1", "rx-bytes": 10, "tx-bytes": 20},
                "port2": {"rx-bytes": 0, "tx-bytes": 0}
            }),
        )
        .unwrap();
        assert_eq!(
            values(out),
            json!([
                {"rx-bytes": 10, "tx-bytes": 20, "interface": "port1"},
                {"rx-bytes": 0, "tx-bytes": 0, "interface": "port2"}
            ])
        );
    }

    #[test]
    fn poe_summary_lowercases_first_entry() {
        let out = poe_summary(
            EP,
            json!([{"PoESummary": "...", "Power-Budget": 370}, {"Interface": "port1", "Status": "on"}]),
        )
        .unwrap();
        assert_eq!(Value::Object(out), json!({"poesummary": "...", "power-budget": 370}));
    }

    #[test]
    fn poe_summary_of_empty_list_is_a_shape_error() {
        let err = poe_summary(EP, json!([])).unwrap_err();
        assert!(matches!(err, Error::ResponseShape { ref key, .. } if key == "results[0]"));
    }

    #[test]
    fn poe_interfaces_keeps_only_interface_entries() {
        let out = poe_interfaces(
            EP,
            json!([
                {"PoESummary": "..."},
                {"Interface": "port1", "Status": "on"},
                {"Interface": "port2", "Status": "off", "Power-Consumption": 0}
            ]),
        )
        .unwrap();
        assert_eq!(
            values(out),
            json!([
                {"interface": "port1", "status": "on"},
                {"interface": "port2", "status": "off", "power-consumption": 0}
            ])
        );
    }

    #[test]
    fn pcb_temp_flattens_single_module() {
        let out = pcb_temp(EP, json!({"status": {"value": 42, "unit": "C"}})).unwrap();
        assert_eq!(out.into_value(), json!({"value": 42, "unit": "C"}));
    }

    #[test]
    fn pcb_temp_flattens_module_lists_and_maps() {
        let list = pcb_temp(
            EP,
            json!([{"name": "CPU", "status": {"value": 55, "unit": "C"}}]),
        )
        .unwrap();
        assert_eq!(list.into_value(), json!([{"name": "CPU", "value": 55, "unit": "C"}]));

        let map = pcb_temp(
            EP,
            json!({"sensor1": {"status": {"value": 30, "unit": "C"}}}),
        )
        .unwrap();
        assert_eq!(map.into_value(), json!([{"value": 30, "unit": "C", "module": "sensor1"}]));
    }

    #[test]
    fn pcb_temp_requires_status_value() {
        let err = pcb_temp(EP, json!([{"status": {"unit": "C"}}])).unwrap_err();
        assert!(matches!(err, Error::ResponseShape { ref key, .. } if key == "status.value"));
    }

    #[test]
    fn system_resource_takes_first_cpu_sample() {
        let out = system_resource(
            EP,
            json!({"cpu": [{"current": 7}, {"current": 9}], "mem": [{"current": 41}]}),
        )
        .unwrap();
        assert_eq!(
            Value::Object(out),
            json!({"cpu_usage": {"current": 7}, "mem_usage": [{"current": 41}]})
        );
    }

    #[test]
    fn system_resource_without_cpu_is_a_shape_error() {
        let err = system_resource(EP, json!({"mem": []})).unwrap_err();
        assert!(matches!(err, Error::ResponseShape { ref key, .. } if key == "cpu"));
    }

    #[test]
    fn system_status_merges_version_and_build() {
        let out = system_status(
            EP,
            json!({
                "results": {"hostname": "sw1", "serial_number": "S248EP0000000001"},
                "version": "v7.2.5",
                "build": 453
            }),
        )
        .unwrap();
        assert_eq!(
            Value::Object(out),
            json!({
                "hostname": "sw1",
                "serial_number": "S248EP0000000001",
                "version": "v7.2.5",
                "build": 453
            })
        );
    }

    #[test]
    fn passthrough_accepts_objects_and_object_lists() {
        assert!(!passthrough(EP, json!({"fan": "ok"})).unwrap().is_list());
        assert!(passthrough(EP, json!([{"psu": 1}])).unwrap().is_list());
        let err = passthrough(EP, json!([1, 2])).unwrap_err();
        assert!(matches!(err, Error::ResponseShape { ref key, .. } if key == "results[0]"));
    }
}
