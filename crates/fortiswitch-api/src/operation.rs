// Caller-facing operation table
//
// A closed enumeration of every accessor, so front ends can dispatch by
// name without reflecting over the client.

use std::str::FromStr;

use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::client::FortiSwitch;
use crate::error::Error;
use crate::monitor::MonitorEndpoint;
use crate::telemetry::Telemetry;

/// One named telemetry operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Operation {
    SystemStatus,
    SwitchCapabilities,
    PortState,
    PortStatistics,
    PoeStatus,
    PoeSummary,
    SystemResource,
    PsuStatus,
    FanStatus,
    PcbTemp,
    UpgradeStatus,
    HardwareCpu,
    HardwareMemory,
}

impl Operation {
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Look up an operation by name; `-` is accepted in place of `_`.
    pub fn parse(name: &str) -> Option<Self> {
        Self::from_str(&name.trim().replace('-', "_")).ok()
    }

    /// Every supported operation name, in declaration order.
    pub fn names() -> Vec<&'static str> {
        Self::iter().map(Self::name).collect()
    }

    /// The monitor endpoint this operation reads.
    pub fn endpoint(self) -> MonitorEndpoint {
        match self {
            Self::SystemStatus => MonitorEndpoint::SystemStatus,
            Self::SwitchCapabilities => MonitorEndpoint::SwitchCapabilities,
            Self::PortState => MonitorEndpoint::SwitchPort,
            Self::PortStatistics => MonitorEndpoint::SwitchPortStatistics,
            Self::PoeStatus | Self::PoeSummary => MonitorEndpoint::SwitchPoeStatus,
            Self::SystemResource => MonitorEndpoint::SystemResource,
            Self::PsuStatus => MonitorEndpoint::SystemPsuStatus,
            Self::FanStatus => MonitorEndpoint::SystemFanStatus,
            Self::PcbTemp => MonitorEndpoint::SystemPcbTemp,
            Self::UpgradeStatus => MonitorEndpoint::SystemUpgradeStatus,
            Self::HardwareCpu => MonitorEndpoint::HardwareCpu,
            Self::HardwareMemory => MonitorEndpoint::HardwareMemory,
        }
    }

    /// Run the accessor behind this operation.
    pub async fn run(self, switch: &FortiSwitch) -> Result<Telemetry, Error> {
        match self {
            Self::SystemStatus => switch.system_status().await.map(Telemetry::Record),
            Self::SwitchCapabilities => switch.switch_capabilities().await,
            Self::PortState => switch.port_state().await.map(Telemetry::Records),
            Self::PortStatistics => switch.port_statistics().await.map(Telemetry::Records),
            Self::PoeStatus => switch.poe_status().await.map(Telemetry::Records),
            Self::PoeSummary => switch.poe_summary().await.map(Telemetry::Record),
            Self::SystemResource => switch.system_resource().await.map(Telemetry::Record),
            Self::PsuStatus => switch.psu_status().await,
            Self::FanStatus => switch.fan_status().await,
            Self::PcbTemp => switch.pcb_temp().await,
            Self::UpgradeStatus => switch.upgrade_status().await,
            Self::HardwareCpu => switch.hardware_cpu().await,
            Self::HardwareMemory => switch.hardware_memory().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_snake_and_kebab_case() {
        assert_eq!(Operation::parse("port_state"), Some(Operation::PortState));
        assert_eq!(Operation::parse("poe-summary"), Some(Operation::PoeSummary));
        assert_eq!(Operation::parse("PCB_TEMP"), Some(Operation::PcbTemp));
        assert_eq!(Operation::parse("reboot"), None);
    }

    #[test]
    fn names_round_trip_through_parse() {
        for name in Operation::names() {
            assert_eq!(Operation::parse(name).map(Operation::name), Some(name));
        }
        assert_eq!(Operation::names().len(), 13);
    }

    #[test]
    fn poe_operations_share_one_endpoint() {
        assert_eq!(Operation::PoeStatus.endpoint(), Operation::PoeSummary.endpoint());
        assert_eq!(Operation::PortState.endpoint().name(), "switch/port");
    }
}
