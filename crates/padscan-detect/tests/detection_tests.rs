//! End-to-end detection cycles against the simulated scan bus.

#![allow(clippy::indexing_slicing)]

use insta::assert_snapshot;
use padscan_detect::bus::mock::{
    MockScanBus, banked_pages, lane, rotary_page, std_pad_page, stuck_banked_page,
};
use padscan_detect::{DetectionResult, Detector};
use padscan_protocol::{ControllerType, Port, REQUEST_FLAG, Socket};

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        // already installed by an earlier test
        .unwrap_or_default();
}

fn render(result: &DetectionResult) -> String {
    Port::ALL
        .iter()
        .map(|&port| {
            let names: Vec<&str> = result.port(port).iter().map(|t| t.name()).collect();
            format!("{port}: {}", names.join(" "))
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

#[test]
fn analog_pad_on_port0_socket1() {
    init_tracing();
    let mut pages = banked_pages(Port::P0, 0xF, 2);
    // page 1 is bank 1: J8..J11 released except J9
    pages[1][0] |= 0x0D00_0000;
    let bus = MockScanBus::new().with_pages(Socket::S1, pages);
    let mut detector = Detector::new(bus);

    let result = *detector.run_cycle();

    assert_eq!(result.get(Port::P0, Socket::S1), ControllerType::Analog);
    assert_snapshot!(
        render(&result),
        @"P0: STDPAD ANALOG NONE NONE | P1: STDPAD NONE NONE NONE"
    );

    let state = detector.sample_analog_buttons(Port::P0, Socket::S1);
    let pressed: String = state
        .buttons
        .iter()
        .filter(|b| b.pressed)
        .map(|b| b.label)
        .collect();
    assert_eq!(pressed, "v");
}

#[test]
fn repeated_cycles_give_the_same_matrix() {
    init_tracing();
    let bus = MockScanBus::new()
        .with_static(Socket::S0, std_pad_page(Port::P0))
        .with_pages(Socket::S1, banked_pages(Port::P0, 0xF, 2))
        .with_pages(Socket::S2, banked_pages(Port::P0, 0xE, 3))
        .with_static(Socket::S3, rotary_page(Port::P0));
    let mut detector = Detector::new(bus);

    let first = *detector.run_cycle();
    for _ in 0..5 {
        assert_eq!(*detector.run_cycle(), first);
    }
    assert_eq!(
        first.port(Port::P0),
        [
            ControllerType::StdPad,
            ControllerType::Analog,
            ControllerType::SixDPad,
            ControllerType::Rotary
        ]
    );
}

#[test]
fn stuck_chain_reports_no_bank_and_bounds_scans() {
    init_tracing();
    let bus = MockScanBus::new()
        .with_static(Socket::S2, stuck_banked_page(Port::P0))
        .with_static(Socket::S3, [0; 4]);
    let mut detector = Detector::new(bus);

    let result = *detector.run_cycle();

    assert_snapshot!(
        render(&result),
        @"P0: STDPAD STDPAD ERR_NO_BANK ERR_INVALID | P1: STDPAD STDPAD ERR_INVALID ERR_INVALID"
    );
    // one bank-0 scan plus eleven sync attempts
    assert_eq!(detector.bus().scan_count(Socket::S2), 12);
}

#[test]
fn ports_share_a_socket_without_interfering() {
    init_tracing();
    let std0 = std_pad_page(Port::P0);
    let rot1 = rotary_page(Port::P1);
    let shared = [
        std0[0] | rot1[0],
        std0[1] | rot1[1],
        std0[2] | rot1[2],
        std0[3] | rot1[3],
    ];
    let bus = MockScanBus::new()
        .with_static(Socket::S1, shared)
        .with_static(Socket::S3, [0; 4]);
    let mut detector = Detector::new(bus);

    let result = *detector.run_cycle();

    assert_eq!(result.get(Port::P0, Socket::S1), ControllerType::StdPad);
    assert_eq!(result.get(Port::P1, Socket::S1), ControllerType::Rotary);
}

#[test]
fn mode_bit_is_per_port() {
    init_tracing();
    // port 1 single-device, port 0 fanned out
    let mode_page = [0, lane(Port::P1, true, false, 0), 0, 0];
    let bus = MockScanBus::new()
        .with_static(Socket::S2, rotary_page(Port::P0))
        .with_static(Socket::S3, mode_page);
    let mut detector = Detector::new(bus);

    let result = *detector.run_cycle();

    assert_eq!(result.get(Port::P0, Socket::S2), ControllerType::Rotary);
    assert_eq!(result.get(Port::P0, Socket::S3), ControllerType::ErrInvalid);
    assert_eq!(
        result.port(Port::P1),
        [
            ControllerType::StdPad,
            ControllerType::Empty,
            ControllerType::Empty,
            ControllerType::Empty
        ]
    );
}

#[test]
fn every_write_carries_the_request_flag() {
    let bus = MockScanBus::new()
        .with_pages(Socket::S0, banked_pages(Port::P1, 0x7, 4))
        .with_static(Socket::S3, [0; 4]);
    let mut detector = Detector::new(bus);
    let result = *detector.run_cycle();

    assert_eq!(result.get(Port::P1, Socket::S0), ControllerType::Head);
    let writes = detector.bus().get_write_history();
    assert!(writes.len() > 16);
    assert_eq!(writes.len() % 4, 0);
    assert!(writes.iter().all(|w| w & REQUEST_FLAG != 0));
}
