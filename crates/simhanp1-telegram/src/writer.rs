use std::io::{ErrorKind, Write};

use crate::error::{Result, TelegramError};
use crate::telegram::Telegram;

/// Writes complete telegram payloads to any `Write` sink.
///
/// Serial writes can be short or interrupted; `send` keeps pushing until
/// the whole payload is on the wire, then flushes.
pub struct TelegramWriter<T> {
    inner: T,
}

impl<T: Write> TelegramWriter<T> {
    /// Wrap a sink.
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Write a full telegram payload (blocking).
    pub fn send(&mut self, telegram: &Telegram) -> Result<()> {
        let payload = telegram.as_bytes();
        let mut offset = 0usize;
        while offset < payload.len() {
            match self.inner.write(&payload[offset..]) {
                Ok(0) => return Err(TelegramError::ChannelClosed),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(TelegramError::Io(err)),
            }
        }

        self.flush()
    }

    /// Flush the underlying sink.
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(TelegramError::Io(err)),
            }
        }
    }

    /// Borrow the underlying sink.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying sink.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the writer and return the inner sink.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use super::*;

    #[test]
    fn payload_arrives_verbatim() {
        let mut writer = TelegramWriter::new(Cursor::new(Vec::<u8>::new()));

        writer
            .send(&Telegram::new(&b"0-0:1.0.0(210511210508W)\r\n"[..]))
            .unwrap();

        assert_eq!(
            writer.into_inner().into_inner(),
            b"0-0:1.0.0(210511210508W)\r\n"
        );
    }

    #[test]
    fn consecutive_sends_concatenate() {
        let mut writer = TelegramWriter::new(Cursor::new(Vec::<u8>::new()));

        writer.send(&Telegram::new(&b"first"[..])).unwrap();
        writer.send(&Telegram::new(&b"second"[..])).unwrap();

        assert_eq!(writer.into_inner().into_inner(), b"firstsecond");
    }

    #[test]
    fn empty_payload_writes_nothing_but_flushes() {
        let sink = FlushTrackingWriter::default();
        let flag = Arc::clone(&sink.flushed);
        let mut writer = TelegramWriter::new(sink);

        writer.send(&Telegram::new(Vec::new())).unwrap();

        assert!(flag.load(Ordering::SeqCst));
        assert!(writer.into_inner().data.is_empty());
    }

    #[test]
    fn flush_propagates_after_send() {
        let sink = FlushTrackingWriter::default();
        let flag = Arc::clone(&sink.flushed);
        let mut writer = TelegramWriter::new(sink);

        writer.send(&Telegram::new(&b"x"[..])).unwrap();

        assert!(flag.load(Ordering::SeqCst));
    }

    #[test]
    fn retries_interrupted_write_and_flush() {
        let sink = InterruptedWriteThenFlush {
            wrote_once: false,
            flush_interrupted: false,
            data: Vec::new(),
        };

        let mut writer = TelegramWriter::new(sink);
        writer.send(&Telegram::new(&b"retry"[..])).unwrap();

        assert_eq!(writer.into_inner().data, b"retry");
    }

    #[test]
    fn retries_would_block_write() {
        let sink = WouldBlockThenWrite {
            blocked_once: false,
            data: Vec::new(),
        };

        let mut writer = TelegramWriter::new(sink);
        writer.send(&Telegram::new(&b"retry"[..])).unwrap();

        assert_eq!(writer.into_inner().data, b"retry");
    }

    #[test]
    fn short_writes_complete_the_payload() {
        let sink = OneBytePerWrite { data: Vec::new() };

        let mut writer = TelegramWriter::new(sink);
        writer.send(&Telegram::new(&b"chunked"[..])).unwrap();

        assert_eq!(writer.into_inner().data, b"chunked");
    }

    #[test]
    fn channel_closed_when_write_returns_zero() {
        let mut writer = TelegramWriter::new(ZeroWriter);
        let err = writer.send(&Telegram::new(&b"x"[..])).unwrap_err();
        assert!(matches!(err, TelegramError::ChannelClosed));
    }

    #[test]
    fn io_errors_propagate() {
        let mut writer = TelegramWriter::new(BrokenWriter);
        let err = writer.send(&Telegram::new(&b"x"[..])).unwrap_err();
        assert!(matches!(err, TelegramError::Io(_)));
    }

    #[derive(Default)]
    struct FlushTrackingWriter {
        flushed: Arc<AtomicBool>,
        data: Vec<u8>,
    }

    impl Write for FlushTrackingWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.data.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            self.flushed.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    struct InterruptedWriteThenFlush {
        wrote_once: bool,
        flush_interrupted: bool,
        data: Vec<u8>,
    }

    impl Write for InterruptedWriteThenFlush {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if !self.wrote_once {
                self.wrote_once = true;
                return Err(std::io::Error::from(ErrorKind::Interrupted));
            }
            self.data.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            if !self.flush_interrupted {
                self.flush_interrupted = true;
                return Err(std::io::Error::from(ErrorKind::Interrupted));
            }
            Ok(())
        }
    }

    struct WouldBlockThenWrite {
        blocked_once: bool,
        data: Vec<u8>,
    }

    impl Write for WouldBlockThenWrite {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if !self.blocked_once {
                self.blocked_once = true;
                return Err(std::io::Error::from(ErrorKind::WouldBlock));
            }
            self.data.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    struct OneBytePerWrite {
        data: Vec<u8>,
    }

    impl Write for OneBytePerWrite {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if buf.is_empty() {
                return Ok(0);
            }
            self.data.push(buf[0]);
            Ok(1)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    struct ZeroWriter;

    impl Write for ZeroWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Ok(0)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    struct BrokenWriter;

    impl Write for BrokenWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::from(ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }
}
