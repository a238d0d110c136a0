use ironrdp_orders::{ControlFlags, FieldPresence, PrimaryOrderType};

/// Builds order streams byte by byte.
#[derive(Debug, Default, Clone)]
pub struct OrderStream {
    bytes: Vec<u8>,
}

impl OrderStream {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn u8(mut self, value: u8) -> Self {
        self.bytes.push(value);
        self
    }

    #[must_use]
    pub fn u16(mut self, value: u16) -> Self {
        self.bytes.extend_from_slice(&value.to_le_bytes());
        self
    }

    #[must_use]
    pub fn i16(mut self, value: i16) -> Self {
        self.bytes.extend_from_slice(&value.to_le_bytes());
        self
    }

    #[must_use]
    pub fn u16_be(mut self, value: u16) -> Self {
        self.bytes.extend_from_slice(&value.to_be_bytes());
        self
    }

    #[must_use]
    pub fn u32(mut self, value: u32) -> Self {
        self.bytes.extend_from_slice(&value.to_le_bytes());
        self
    }

    /// 24-bit colour, lowest byte first.
    #[must_use]
    pub fn color(mut self, value: u32) -> Self {
        self.bytes.extend_from_slice(&value.to_le_bytes()[..3]);
        self
    }

    #[must_use]
    pub fn bytes(mut self, value: &[u8]) -> Self {
        self.bytes.extend_from_slice(value);
        self
    }

    /// Primary order header: control byte, type byte when the type changes, and the presence mask.
    ///
    /// `order_type` is the type in effect for the order, transmitted or not. `STANDARD` is added
    /// to `flags`. Bounds and fields are appended by the caller.
    #[must_use]
    pub fn primary(mut self, flags: ControlFlags, order_type: PrimaryOrderType, presence: u32) -> Self {
        let flags = flags | ControlFlags::STANDARD;

        self.bytes.push(flags.bits());

        if flags.contains(ControlFlags::TYPE_CHANGE) {
            self.bytes.push(order_type.as_u8());
        }

        let width = FieldPresence::byte_width(PrimaryOrderType::presence_width(order_type.as_u8()), flags);
        self.bytes.extend_from_slice(&presence.to_le_bytes()[..width]);

        self
    }

    /// Secondary order whose announced length matches `body` exactly.
    #[must_use]
    pub fn secondary(self, order_type: u8, flags: u16, body: &[u8]) -> Self {
        let length = i16::try_from(body.len()).unwrap() - 7;
        self.secondary_with_length(order_type, flags, length, body)
    }

    #[must_use]
    pub fn secondary_with_length(mut self, order_type: u8, flags: u16, length: i16, body: &[u8]) -> Self {
        self.bytes.push((ControlFlags::STANDARD | ControlFlags::SECONDARY).bits());
        self.bytes.extend_from_slice(&length.to_le_bytes());
        self.bytes.extend_from_slice(&flags.to_le_bytes());
        self.bytes.push(order_type);
        self.bytes.extend_from_slice(body);
        self
    }

    /// Non-standard order; `order_type` lands in the upper six bits of the control byte.
    #[must_use]
    pub fn altsec(mut self, order_type: u8) -> Self {
        self.bytes.push((order_type << 2) | ControlFlags::SECONDARY.bits());
        self
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}
