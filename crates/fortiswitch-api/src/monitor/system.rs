// System-level monitor endpoints: identity, resources, PSU, fans,
// board temperatures, firmware upgrade state.

use serde_json::Value;

use crate::client::FortiSwitch;
use crate::error::Error;
use crate::monitor::MonitorEndpoint;
use crate::monitor::reshape;
use crate::telemetry::{Identity, Record, Telemetry};

impl FortiSwitch {
    /// Hostname, serial number, part number and firmware version.
    ///
    /// `GET api/v2/monitor/system/status`
    ///
    /// Always fetched fresh; see [`FortiSwitch::identity`] for the cached
    /// hostname/serial pair.
    pub async fn system_status(&self) -> Result<Record, Error> {
        let ep = MonitorEndpoint::SystemStatus;
        let document = self.fetch_raw(ep).await?;
        reshape::system_status(ep.name(), document)
    }

    /// CPU and memory usage.
    ///
    /// `GET api/v2/monitor/system/resource`
    pub async fn system_resource(&self) -> Result<Record, Error> {
        let ep = MonitorEndpoint::SystemResource;
        let document = self.fetch_raw(ep).await?;
        reshape::system_resource(ep.name(), reshape::results(ep.name(), document)?)
    }

    /// Power supply state.
    ///
    /// `GET api/v2/monitor/system/psu-status`
    pub async fn psu_status(&self) -> Result<Telemetry, Error> {
        self.passthrough(MonitorEndpoint::SystemPsuStatus).await
    }

    /// Fan state.
    ///
    /// `GET api/v2/monitor/system/fan-status`
    pub async fn fan_status(&self) -> Result<Telemetry, Error> {
        self.passthrough(MonitorEndpoint::SystemFanStatus).await
    }

    /// Board temperature sensors, `status.value`/`status.unit` flattened.
    ///
    /// `GET api/v2/monitor/system/pcb-temp`
    pub async fn pcb_temp(&self) -> Result<Telemetry, Error> {
        let ep = MonitorEndpoint::SystemPcbTemp;
        let document = self.fetch_raw(ep).await?;
        reshape::pcb_temp(ep.name(), reshape::results(ep.name(), document)?)
    }

    /// Firmware upgrade progress.
    ///
    /// `GET api/v2/monitor/system/upgrade-status`
    pub async fn upgrade_status(&self) -> Result<Telemetry, Error> {
        self.passthrough(MonitorEndpoint::SystemUpgradeStatus).await
    }

    pub(crate) async fn passthrough(&self, ep: MonitorEndpoint) -> Result<Telemetry, Error> {
        let document = self.fetch_raw(ep).await?;
        reshape::passthrough(ep.name(), reshape::results(ep.name(), document)?)
    }
}

/// Pull `hostname` and `serial_number` out of a `system/status` record.
pub(crate) fn identity_from_status(status: &Record) -> Result<Identity, Error> {
    let field = |key: &str| {
        status
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| Error::shape(MonitorEndpoint::SystemStatus.name(), key))
    };
    Ok(Identity {
        hostname: field("hostname")?,
        serial_number: field("serial_number")?,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn identity_requires_hostname_and_serial() {
        let Value::Object(status) = json!({"hostname": "sw1", "serial_number": "S1"}) else {
            unreachable!()
        };
        let identity = identity_from_status(&status).unwrap();
        assert_eq!(identity.hostname, "sw1");
        assert_eq!(identity.serial_number, "S1");

        let Value::Object(partial) = json!({"hostname": "sw1"}) else {
            unreachable!()
        };
        let err = identity_from_status(&partial).unwrap_err();
        assert!(matches!(err, Error::ResponseShape { ref key, .. } if key == "serial_number"));
    }
}
