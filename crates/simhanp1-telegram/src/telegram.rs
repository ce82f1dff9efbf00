use bytes::Bytes;

/// One simulated P1 telegram payload.
///
/// The bytes are opaque and forwarded verbatim; a "telegram" may be a
/// whole meter message, half of one, or anything else the payload file
/// happens to contain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Telegram {
    payload: Bytes,
}

impl Telegram {
    /// Wrap a payload.
    pub fn new(payload: impl Into<Bytes>) -> Self {
        Self {
            payload: payload.into(),
        }
    }

    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    /// Whether the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// Borrow the payload bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.payload.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_bytes_verbatim() {
        let telegram = Telegram::new(&b"1-0:1.8.0(00001576.782*kWh)\r\n"[..]);
        assert_eq!(telegram.as_bytes(), b"1-0:1.8.0(00001576.782*kWh)\r\n");
        assert_eq!(telegram.len(), 29);
        assert!(!telegram.is_empty());
    }

    #[test]
    fn empty_payload_is_allowed() {
        let telegram = Telegram::new(Bytes::new());
        assert!(telegram.is_empty());
        assert_eq!(telegram.len(), 0);
    }
}
