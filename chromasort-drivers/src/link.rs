//! Serial command link and diagnostic console
//!
//! [`SerialLineSource`] turns the Bluetooth UART's byte stream into lines
//! for the controller. [`UartDiagnostics`] writes each diagnostic as one
//! CRLF-terminated text line to the debug UART.

use core::fmt::Write;

use heapless::String;

use chromasort_core::report::Diagnostic;
use chromasort_core::traits::{DiagnosticSink, LineSource, TransportError};
use chromasort_hal::{UartError, UartRx, UartTx};
use chromasort_protocol::{LineAssembler, RawLine};

/// Longest diagnostic line, excluding the CRLF
pub const MAX_DIAGNOSTIC_LEN: usize = 96;

const LINE_CAPACITY: usize = MAX_DIAGNOSTIC_LEN + 2;

/// Bytes drained per read while discarding
const DRAIN_CHUNK: usize = 16;

fn transport_error(e: UartError) -> TransportError {
    match e {
        UartError::Overrun => TransportError::Overrun,
        UartError::Framing => TransportError::Framing,
        UartError::Parity => TransportError::Parity,
        UartError::Break => TransportError::Break,
    }
}

/// Line source over a UART receiver
///
/// Availability checks only consume bytes the receiver already holds, so
/// polling never waits on a sender that has not finished its line.
pub struct SerialLineSource<R> {
    rx: R,
    assembler: LineAssembler,
    ready: Option<RawLine>,
}

impl<R> SerialLineSource<R>
where
    R: UartRx<Error = UartError>,
{
    pub fn new(rx: R) -> Self {
        Self {
            rx,
            assembler: LineAssembler::new(),
            ready: None,
        }
    }

    /// Give back the receiver
    pub fn release(self) -> R {
        self.rx
    }
}

impl<R> LineSource for SerialLineSource<R>
where
    R: UartRx<Error = UartError>,
{
    fn line_available(&mut self) -> Result<bool, TransportError> {
        while self.ready.is_none() && self.rx.bytes_available().map_err(transport_error)? {
            let byte = self.rx.read_byte().map_err(transport_error)?;
            self.ready = self.assembler.feed(byte);
        }
        Ok(self.ready.is_some())
    }

    fn read_line(&mut self) -> Result<RawLine, TransportError> {
        if let Some(line) = self.ready.take() {
            return Ok(line);
        }
        loop {
            let byte = self.rx.read_byte().map_err(transport_error)?;
            if let Some(line) = self.assembler.feed(byte) {
                return Ok(line);
            }
        }
    }

    fn discard_pending(&mut self) -> Result<(), TransportError> {
        self.ready = None;
        self.assembler.reset();
        let mut scratch = [0u8; DRAIN_CHUNK];
        while self.rx.bytes_available().map_err(transport_error)? {
            self.rx
                .read_blocking(&mut scratch)
                .map_err(transport_error)?;
        }
        Ok(())
    }
}

/// Diagnostic sink writing text lines to a UART
pub struct UartDiagnostics<T> {
    tx: T,
    dropped: u32,
}

impl<T: UartTx> UartDiagnostics<T> {
    pub fn new(tx: T) -> Self {
        Self { tx, dropped: 0 }
    }

    /// Lines that could not be written
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Give back the transmitter
    pub fn release(self) -> T {
        self.tx
    }
}

impl<T: UartTx> DiagnosticSink for UartDiagnostics<T> {
    fn report(&mut self, diagnostic: &Diagnostic<'_>) {
        let mut line: String<LINE_CAPACITY> = String::new();
        // Overlong lines are cut; the CRLF always fits
        let _ = write!(line, "{}", diagnostic);
        line.truncate(MAX_DIAGNOSTIC_LEN);
        let _ = line.push_str("\r\n");

        let sent = self
            .tx
            .write_blocking(line.as_bytes())
            .and_then(|()| self.tx.flush());
        if sent.is_err() {
            self.dropped = self.dropped.saturating_add(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chromasort_protocol::{Command, DecodeError};
    use heapless::Vec;

    struct MockRx {
        data: Vec<u8, 128>,
        pos: usize,
        error_at: Option<usize>,
    }

    impl MockRx {
        fn new(data: &[u8]) -> Self {
            Self {
                data: Vec::from_slice(data).unwrap(),
                pos: 0,
                error_at: None,
            }
        }
    }

    impl UartRx for MockRx {
        type Error = UartError;

        fn bytes_available(&mut self) -> Result<bool, UartError> {
            Ok(self.pos < self.data.len())
        }

        fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, UartError> {
            if self.error_at == Some(self.pos) {
                self.error_at = None;
                return Err(UartError::Framing);
            }
            // Running dry would block forever on hardware
            assert!(self.pos < self.data.len(), "read past end of input");
            let n = buf.len().min(self.data.len() - self.pos);
            buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    struct MockTx {
        out: Vec<u8, 512>,
        fail: bool,
    }

    impl UartTx for MockTx {
        type Error = ();

        fn write_blocking(&mut self, data: &[u8]) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            self.out.extend_from_slice(data).map_err(|_| ())
        }

        fn flush(&mut self) -> Result<(), ()> {
            Ok(())
        }
    }

    #[test]
    fn test_reads_lines_in_order() {
        let mut source = SerialLineSource::new(MockRx::new(b"R\nG\r\n"));
        assert_eq!(source.line_available(), Ok(true));
        assert_eq!(source.read_line().unwrap().as_bytes(), b"R");
        assert_eq!(source.read_line().unwrap().decode().unwrap().as_char(), 'G');
        assert_eq!(source.line_available(), Ok(false));
    }

    #[test]
    fn test_unterminated_line_not_available() {
        let mut source = SerialLineSource::new(MockRx::new(b"R"));
        assert_eq!(source.line_available(), Ok(false));
        assert_eq!(source.line_available(), Ok(false));

        source.rx.data.push(b'\n').unwrap();
        assert_eq!(source.line_available(), Ok(true));
        assert_eq!(source.read_line().unwrap().as_bytes(), b"R");
    }

    #[test]
    fn test_line_completes_across_polls() {
        let mut source = SerialLineSource::new(MockRx::new(b""));
        assert_eq!(source.line_available(), Ok(false));

        source.rx.data.push(b'R').unwrap();
        assert_eq!(source.line_available(), Ok(false));
        assert_eq!(source.rx.pos, 1);

        source.rx.data.extend_from_slice(b"\nG").unwrap();
        assert_eq!(source.line_available(), Ok(true));
        // Stops at the first complete line
        assert_eq!(source.rx.pos, 2);
        assert_eq!(source.read_line().unwrap().as_bytes(), b"R");
        assert_eq!(source.line_available(), Ok(false));
    }

    #[test]
    fn test_discard_drops_ready_line() {
        let mut source = SerialLineSource::new(MockRx::new(b"??\nB\n"));
        assert_eq!(source.line_available(), Ok(true));
        source.discard_pending().unwrap();
        assert_eq!(source.line_available(), Ok(false));
    }

    #[test]
    fn test_discard_drains_everything_buffered() {
        let mut source = SerialLineSource::new(MockRx::new(b"RG\nB\nY"));
        let line = source.read_line().unwrap();
        assert_eq!(line.decode(), Err(DecodeError::WrongLength { len: 2 }));
        source.discard_pending().unwrap();
        assert_eq!(source.line_available(), Ok(false));
        assert_eq!(source.release().pos, 6);
    }

    #[test]
    fn test_uart_error_mapped() {
        let mut rx = MockRx::new(b"RR\n");
        rx.error_at = Some(1);
        let mut source = SerialLineSource::new(rx);
        assert_eq!(source.read_line(), Err(TransportError::Framing));
        // The partial line is still buffered
        assert_eq!(source.line_available(), Ok(true));
        assert_eq!(source.read_line().unwrap().as_bytes(), b"RR");
    }

    #[test]
    fn test_diagnostic_line_written_with_crlf() {
        let mut sink = UartDiagnostics::new(MockTx {
            out: Vec::new(),
            fail: false,
        });
        sink.report(&Diagnostic::Received(Command::literal(b'B')));
        sink.report(&Diagnostic::Empty);
        assert_eq!(
            sink.release().out.as_slice(),
            b"Received: B\r\nEmpty data received.\r\n"
        );
    }

    #[test]
    fn test_long_diagnostic_truncated() {
        let raw = [b'A'; 120];
        let mut sink = UartDiagnostics::new(MockTx {
            out: Vec::new(),
            fail: false,
        });
        sink.report(&Diagnostic::Invalid {
            raw: &raw,
            code: b'A',
        });
        let out = sink.release().out;
        assert_eq!(out.len(), MAX_DIAGNOSTIC_LEN + 2);
        assert!(out.ends_with(b"\r\n"));
        assert!(out.starts_with(b"Invalid ASCII character received: [AAA"));
    }

    #[test]
    fn test_failed_write_counted() {
        let mut sink = UartDiagnostics::new(MockTx {
            out: Vec::new(),
            fail: true,
        });
        sink.report(&Diagnostic::Empty);
        assert_eq!(sink.dropped(), 1);
    }
}
