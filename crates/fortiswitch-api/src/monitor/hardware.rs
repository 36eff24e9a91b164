// Hardware monitor endpoints.

use crate::client::FortiSwitch;
use crate::error::Error;
use crate::monitor::MonitorEndpoint;
use crate::telemetry::Telemetry;

impl FortiSwitch {
    /// CPU hardware details.
    ///
    /// `GET api/v2/monitor/hardware/cpu`
    pub async fn hardware_cpu(&self) -> Result<Telemetry, Error> {
        self.passthrough(MonitorEndpoint::HardwareCpu).await
    }

    /// Memory hardware details.
    ///
    /// `GET api/v2/monitor/hardware/memory`
    pub async fn hardware_memory(&self) -> Result<Telemetry, Error> {
        self.passthrough(MonitorEndpoint::HardwareMemory).await
    }
}
