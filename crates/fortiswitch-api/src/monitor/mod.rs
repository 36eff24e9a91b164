// Monitor API endpoints
//
// The read-only `api/v2/monitor/` surface: path table plus one accessor
// per telemetry category, implemented as inherent methods on `FortiSwitch`.

pub mod hardware;
pub mod reshape;
pub mod switch;
pub mod system;

use strum::{EnumIter, IntoStaticStr};

/// Prefix shared by every monitor path.
pub const MONITOR_BASE: &str = "api/v2/monitor";

/// A monitor endpoint, named by its path below [`MONITOR_BASE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
pub enum MonitorEndpoint {
    #[strum(serialize = "system/status")]
    SystemStatus,
    #[strum(serialize = "switch/capabilities")]
    SwitchCapabilities,
    #[strum(serialize = "switch/port")]
    SwitchPort,
    #[strum(serialize = "switch/port-statistics")]
    SwitchPortStatistics,
    #[strum(serialize = "switch/poe-status")]
    SwitchPoeStatus,
    #[strum(serialize = "system/resource")]
    SystemResource,
    #[strum(serialize = "system/psu-status")]
    SystemPsuStatus,
    #[strum(serialize = "system/fan-status")]
    SystemFanStatus,
    #[strum(serialize = "system/pcb-temp")]
    SystemPcbTemp,
    #[strum(serialize = "system/upgrade-status")]
    SystemUpgradeStatus,
    #[strum(serialize = "hardware/cpu")]
    HardwareCpu,
    #[strum(serialize = "hardware/memory")]
    HardwareMemory,
}

impl MonitorEndpoint {
    /// Path relative to [`MONITOR_BASE`], e.g. `switch/port`.
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Full path below the device root, e.g. `api/v2/monitor/switch/port`.
    pub fn path(self) -> String {
        format!("{MONITOR_BASE}/{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn paths_live_under_monitor_base() {
        assert_eq!(MonitorEndpoint::SwitchPort.path(), "api/v2/monitor/switch/port");
        assert_eq!(
            MonitorEndpoint::HardwareMemory.path(),
            "api/v2/monitor/hardware/memory"
        );
        assert_eq!(MonitorEndpoint::iter().count(), 12);
    }
}
