//! Property-based tests for detection cycles.
//!
//! Uses proptest with 500 cases over arbitrary static buses and generated
//! banked devices.

#![allow(clippy::indexing_slicing)]

use padscan_detect::bus::mock::{MockScanBus, banked_pages};
use padscan_detect::{Detector, classify_basic, scan_all_bank0};
use padscan_protocol::{
    Bank, ControllerType, Port, Row, RowStore, Socket, c_bit_mask, decode_signature,
};
use proptest::prelude::*;

fn port_strategy() -> impl Strategy<Value = Port> {
    prop_oneof![Just(Port::P0), Just(Port::P1)]
}

fn socket_strategy() -> impl Strategy<Value = Socket> {
    prop_oneof![
        Just(Socket::S0),
        Just(Socket::S1),
        Just(Socket::S2),
        Just(Socket::S3)
    ]
}

fn static_bus(pages: [[u32; 4]; 4]) -> MockScanBus {
    Socket::ALL
        .into_iter()
        .zip(pages)
        .fold(MockScanBus::new(), |bus, (socket, page)| {
            bus.with_static(socket, page)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// A static bus yields the same matrix on every cycle.
    #[test]
    fn prop_static_bus_detection_is_repeatable(pages in any::<[[u32; 4]; 4]>()) {
        let mut detector = Detector::new(static_bus(pages));
        let first = *detector.run_cycle();
        let second = *detector.run_cycle();
        prop_assert_eq!(first, second);
    }

    /// No cell of a finished cycle is left at the intermediate BANKED state.
    #[test]
    fn prop_result_cells_are_final(pages in any::<[[u32; 4]; 4]>()) {
        let mut detector = Detector::new(static_bus(pages));
        let result = *detector.run_cycle();
        for (_, _, ty) in result.iter() {
            prop_assert!(ty.is_final());
        }
    }

    /// With the mode bit high, sockets 0, 2 and 3 are fixed.
    #[test]
    fn prop_single_device_mode_layout(
        pages in any::<[[u32; 4]; 4]>(),
        port in port_strategy(),
    ) {
        let mut pages = pages;
        pages[3][1] |= c_bit_mask(port);
        let mut detector = Detector::new(static_bus(pages));
        let result = *detector.run_cycle();

        prop_assert_eq!(result.get(port, Socket::S0), ControllerType::StdPad);
        prop_assert_eq!(result.get(port, Socket::S2), ControllerType::Empty);
        prop_assert_eq!(result.get(port, Socket::S3), ControllerType::Empty);
        let s1 = result.get(port, Socket::S1);
        prop_assert!(s1 != ControllerType::StdPad && s1 != ControllerType::Rotary);
    }

    /// A generated banked device decodes to its signature on any socket.
    #[test]
    fn prop_banked_device_decodes_signature(
        port in port_strategy(),
        socket in socket_strategy(),
        signature in 0u8..16,
        len in 1usize..=4,
    ) {
        // socket 3 row 1 low keeps the port fanned out
        let mut bus = MockScanBus::new().with_static(Socket::S3, [0; 4]);
        bus.set_pages(socket, banked_pages(port, signature, len));
        let mut detector = Detector::new(bus);
        let result = *detector.run_cycle();

        prop_assert_eq!(result.get(port, socket), decode_signature(signature));
    }

    /// Basic classification reads only the port's own c-bit lanes.
    #[test]
    fn prop_basic_ignores_other_port(
        page in any::<[u32; 4]>(),
        noise in any::<[u32; 4]>(),
        port in port_strategy(),
    ) {
        let other = match port {
            Port::P0 => Port::P1,
            Port::P1 => Port::P0,
        };
        let other_mask = c_bit_mask(other);
        let mixed: [u32; 4] =
            std::array::from_fn(|i| (page[i] & !other_mask) | (noise[i] & other_mask));

        let mut clean = RowStore::new();
        scan_all_bank0(&mut MockScanBus::new().with_static(Socket::S0, page), &mut clean);
        let mut noisy = RowStore::new();
        scan_all_bank0(&mut MockScanBus::new().with_static(Socket::S0, mixed), &mut noisy);

        prop_assert_eq!(
            classify_basic(&clean, port, Socket::S0),
            classify_basic(&noisy, port, Socket::S0)
        );
        prop_assert_eq!(
            clean.c_bit(port, Bank::B0, Socket::S0, Row::R2),
            noisy.c_bit(port, Bank::B0, Socket::S0, Row::R2)
        );
    }
}
