// Switch-level monitor endpoints: ports, port counters, PoE.

use crate::client::FortiSwitch;
use crate::error::Error;
use crate::monitor::MonitorEndpoint;
use crate::monitor::reshape;
use crate::telemetry::{Record, Telemetry};

impl FortiSwitch {
    /// Switch feature flags.
    ///
    /// `GET api/v2/monitor/switch/capabilities`
    pub async fn switch_capabilities(&self) -> Result<Telemetry, Error> {
        let ep = MonitorEndpoint::SwitchCapabilities;
        let document = self.fetch_raw(ep).await?;
        reshape::passthrough(ep.name(), reshape::results(ep.name(), document)?)
    }

    /// Per-interface link state, one record per port.
    ///
    /// `GET api/v2/monitor/switch/port`
    pub async fn port_state(&self) -> Result<Vec<Record>, Error> {
        let ep = MonitorEndpoint::SwitchPort;
        let document = self.fetch_raw(ep).await?;
        reshape::port_state(ep.name(), reshape::results(ep.name(), document)?)
    }

    /// Per-interface traffic counters, one record per port.
    ///
    /// `GET api/v2/monitor/switch/port-statistics`
    pub async fn port_statistics(&self) -> Result<Vec<Record>, Error> {
        let ep = MonitorEndpoint::SwitchPortStatistics;
        let document = self.fetch_raw(ep).await?;
        reshape::port_statistics(ep.name(), reshape::results(ep.name(), document)?)
    }

    /// Per-interface PoE state (entries carrying `Interface`).
    ///
    /// `GET api/v2/monitor/switch/poe-status`
    pub async fn poe_status(&self) -> Result<Vec<Record>, Error> {
        let ep = MonitorEndpoint::SwitchPoeStatus;
        let document = self.fetch_raw(ep).await?;
        reshape::poe_interfaces(ep.name(), reshape::results(ep.name(), document)?)
    }

    /// Switch-wide PoE budget summary (first entry of the PoE document).
    ///
    /// `GET api/v2/monitor/switch/poe-status`
    pub async fn poe_summary(&self) -> Result<Record, Error> {
        let ep = MonitorEndpoint::SwitchPoeStatus;
        let document = self.fetch_raw(ep).await?;
        reshape::poe_summary(ep.name(), reshape::results(ep.name(), document)?)
    }
}
