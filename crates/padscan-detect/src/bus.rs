//! Scan bus seam: the write-only select register and its paired data register.

use padscan_protocol::{Row, Socket};

/// Hardware primitive behind the row scanner.
///
/// Every `write_select` must be followed by exactly one `read_row` before the
/// next write; the scanner never pipelines requests.
pub trait ScanBus {
    /// Write a control word (`REQUEST_FLAG | row code`) to the select register.
    fn write_select(&mut self, word: u16);

    /// Read the 32-bit row word answered for the last select.
    fn read_row(&mut self) -> u32;
}

impl<B: ScanBus + ?Sized> ScanBus for &mut B {
    fn write_select(&mut self, word: u16) {
        (**self).write_select(word);
    }

    fn read_row(&mut self) -> u32 {
        (**self).read_row()
    }
}

impl<B: ScanBus + ?Sized> ScanBus for Box<B> {
    fn write_select(&mut self, word: u16) {
        (**self).write_select(word);
    }

    fn read_row(&mut self) -> u32 {
        (**self).read_row()
    }
}

/// One full scan of a socket: the four row words in row order.
pub type Page = [u32; 4];

/// Where a select word points, if anywhere.
pub(crate) fn decode_select(word: u16) -> Option<(Socket, Row)> {
    padscan_protocol::reverse_lookup(word)
}

pub mod mock {
    //! Simulated scan bus for tests and the command-line driver.
    //!
    //! Each socket holds a cyclic sequence of pages. A device advances to its
    //! next page every time row 0 of its socket is selected again, which is
    //! how a banked device steps through its banks.

    use super::*;
    use padscan_protocol::{MAX_SOCKET, Port, axis_shift, b_bit_mask, c_bit_mask};

    /// Word read from a socket with nothing attached (all lines pulled high).
    pub const IDLE_ROW: u32 = u32::MAX;

    /// Device state behind one socket.
    #[derive(Debug, Clone, Default)]
    struct SocketFeed {
        pages: Vec<Page>,
        cursor: usize,
        started: bool,
        scans: usize,
    }

    impl SocketFeed {
        fn new(pages: Vec<Page>) -> Self {
            Self {
                pages,
                ..Self::default()
            }
        }

        /// A repeat row-0 select moves the device to its next page.
        fn on_row0(&mut self) {
            if self.started {
                self.cursor = self.cursor.wrapping_add(1);
            }
            self.started = true;
            self.scans += 1;
        }

        fn current_page(&self) -> Option<&Page> {
            if self.pages.is_empty() {
                return None;
            }
            self.pages.get(self.cursor % self.pages.len())
        }
    }

    #[derive(Debug, Clone, Default)]
    pub struct MockScanBus {
        feeds: [SocketFeed; MAX_SOCKET],
        selected: Option<(Socket, Row)>,
        write_history: Vec<u16>,
    }

    impl MockScanBus {
        pub fn new() -> Self {
            Self::default()
        }

        /// Attach a device answering with `pages` in turn.
        pub fn with_pages(mut self, socket: Socket, pages: Vec<Page>) -> Self {
            self.set_pages(socket, pages);
            self
        }

        /// Attach a device whose answer never changes.
        pub fn with_static(self, socket: Socket, page: Page) -> Self {
            self.with_pages(socket, vec![page])
        }

        /// Replace the device on a socket and restart its page sequence.
        pub fn set_pages(&mut self, socket: Socket, pages: Vec<Page>) {
            if let Some(feed) = self.feeds.get_mut(socket.index()) {
                *feed = SocketFeed::new(pages);
            }
        }

        /// Number of scans (row-0 selects) seen by a socket.
        pub fn scan_count(&self, socket: Socket) -> usize {
            self.feeds.get(socket.index()).map_or(0, |feed| feed.scans)
        }

        pub fn get_write_history(&self) -> &[u16] {
            &self.write_history
        }

        pub fn clear_history(&mut self) {
            self.write_history.clear();
            for feed in &mut self.feeds {
                feed.scans = 0;
            }
        }
    }

    impl ScanBus for MockScanBus {
        fn write_select(&mut self, word: u16) {
            self.write_history.push(word);
            self.selected = decode_select(word);

            if let Some((socket, Row::R0)) = self.selected
                && let Some(feed) = self.feeds.get_mut(socket.index())
            {
                feed.on_row0();
            }
        }

        fn read_row(&mut self) -> u32 {
            self.selected
                .and_then(|(socket, row)| {
                    let page = self.feeds.get(socket.index())?.current_page()?;
                    page.get(row.index()).copied()
                })
                .unwrap_or(IDLE_ROW)
        }
    }

    /// Compose a port's private lanes into a row word.
    ///
    /// `nibble` lands on the port's J/axis lane; every other bit is 0.
    pub fn lane(port: Port, c: bool, b: bool, nibble: u8) -> u32 {
        let mut word = u32::from(nibble & 0x0F) << axis_shift(port);
        if c {
            word |= c_bit_mask(port);
        }
        if b {
            word |= b_bit_mask(port);
        }
        word
    }

    /// A standard pad at rest: buttons released, row-1 c-bit low.
    pub fn std_pad_page(port: Port) -> Page {
        [
            lane(port, true, true, 0xF),
            lane(port, false, true, 0xF),
            lane(port, true, true, 0xF),
            lane(port, true, true, 0xF),
        ]
    }

    /// A rotary controller: row-2 c-bit high, row-3 c-bit low.
    pub fn rotary_page(port: Port) -> Page {
        [
            lane(port, true, true, 0xF),
            lane(port, false, true, 0xF),
            lane(port, true, true, 0xF),
            lane(port, false, true, 0xF),
        ]
    }

    /// A banked device cycling through `len` pages.
    ///
    /// Page 0 has its continuation bit low, every later page has it high.
    /// The last page carries `signature` on its b-bits (row 3 = MSB); all
    /// other b-bits read released.
    pub fn banked_pages(port: Port, signature: u8, len: usize) -> Vec<Page> {
        let last = len.saturating_sub(1);
        (0..len)
            .map(|k| {
                let b = |row: usize| {
                    if k == last {
                        signature & (1 << row) != 0
                    } else {
                        true
                    }
                };
                [
                    lane(port, k != 0, b(0), 0),
                    lane(port, false, b(1), 0),
                    lane(port, false, b(2), 0),
                    lane(port, true, b(3), 0),
                ]
            })
            .collect()
    }

    /// A banked device whose continuation bit never drops.
    pub fn stuck_banked_page(port: Port) -> Page {
        [
            lane(port, true, true, 0),
            lane(port, false, true, 0),
            lane(port, false, true, 0),
            lane(port, true, true, 0),
        ]
    }
}
