//! Per-frame report: detection matrix plus the readout of each device.

use padscan_detect::{DetectionResult, Detector, ScanBus};
use padscan_protocol::{ControllerType, Port, Readout, SixDPadState, Socket, StdPadState};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameReport {
    pub frame: u16,
    pub ports: Vec<PortReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortReport {
    pub port: Port,
    pub sockets: Vec<SocketReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SocketReport {
    pub socket: Socket,
    pub controller: ControllerType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readout: Option<ReadoutPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReadoutPayload {
    StdPad(StdPadState),
    SixAxis(SixDPadState),
}

impl FrameReport {
    /// Matrix of the latest cycle with each device's readout sampled now.
    ///
    /// `frame` is the counter value the cycle ran under, read before
    /// `run_cycle` advanced it. Six-axis readouts re-walk their bank chain
    /// on the bus.
    pub fn capture<B: ScanBus>(frame: u16, detector: &mut Detector<B>) -> Self {
        let result = *detector.result();
        Self::build(frame, &result, |port, socket, readout| {
            match readout {
                Readout::Blank => None,
                Readout::StdPadButtons => Some(ReadoutPayload::StdPad(
                    detector.sample_std_pad(port, socket),
                )),
                Readout::SixAxisPanel => Some(ReadoutPayload::SixAxis(
                    detector.sample_six_dpad(port, socket),
                )),
            }
        })
    }

    /// Matrix only, no bus traffic.
    pub fn matrix(frame: u16, result: &DetectionResult) -> Self {
        Self::build(frame, result, |_, _, _| None)
    }

    fn build(
        frame: u16,
        result: &DetectionResult,
        mut sample: impl FnMut(Port, Socket, Readout) -> Option<ReadoutPayload>,
    ) -> Self {
        let ports = Port::ALL
            .into_iter()
            .map(|port| PortReport {
                port,
                sockets: Socket::ALL
                    .into_iter()
                    .map(|socket| {
                        let controller = result.get(port, socket);
                        SocketReport {
                            socket,
                            controller,
                            readout: sample(port, socket, controller.readout()),
                        }
                    })
                    .collect(),
            })
            .collect();
        Self { frame, ports }
    }
}
