//! The fixed-size, interpretation-free event payload.

use bytemuck::{Pod, Zeroable};

/// 16 bytes of payload attached to a fired event.
///
/// The bus never interprets the contents; the meaning of each slot is
/// convention per [`EventCode`](crate::EventCode) (documented on the reserved
/// codes). Accessors view the same 16 bytes as two `u64`s, four 32-bit
/// values, eight 16-bit values, or sixteen bytes, little-endian.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct EventContext {
    bytes: [u8; 16],
}

macro_rules! slot_accessors {
    ($get:ident, $set:ident, $ty:ty, $slots:expr) => {
        #[doc = concat!("Reads slot `index` (0..", stringify!($slots), ") as `", stringify!($ty), "`.")]
        #[must_use]
        pub fn $get(&self, index: usize) -> $ty {
            const SIZE: usize = size_of::<$ty>();
            assert!(index < $slots, "context slot out of range");
            let start = index * SIZE;
            <$ty>::from_le_bytes(self.bytes[start..start + SIZE].try_into().unwrap())
        }

        #[doc = concat!("Writes slot `index` (0..", stringify!($slots), ") as `", stringify!($ty), "`.")]
        pub fn $set(&mut self, index: usize, value: $ty) {
            const SIZE: usize = size_of::<$ty>();
            assert!(index < $slots, "context slot out of range");
            let start = index * SIZE;
            self.bytes[start..start + SIZE].copy_from_slice(&value.to_le_bytes());
        }
    };
}

impl EventContext {
    /// An all-zero payload, for codes that carry no data.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Payload with `u16` slots 0 and 1 set; the most common convention
    /// (key/button codes, x/y pairs, width/height).
    #[must_use]
    pub fn from_u16_pair(a: u16, b: u16) -> Self {
        let mut ctx = Self::default();
        ctx.set_u16(0, a);
        ctx.set_u16(1, b);
        ctx
    }

    /// Payload with `i16` slots 0 and 1 set (signed x/y pairs).
    #[must_use]
    pub fn from_i16_pair(a: i16, b: i16) -> Self {
        let mut ctx = Self::default();
        ctx.set_i16(0, a);
        ctx.set_i16(1, b);
        ctx
    }

    slot_accessors!(u64_at, set_u64, u64, 2);
    slot_accessors!(i64_at, set_i64, i64, 2);
    slot_accessors!(f64_at, set_f64, f64, 2);
    slot_accessors!(u32_at, set_u32, u32, 4);
    slot_accessors!(i32_at, set_i32, i32, 4);
    slot_accessors!(f32_at, set_f32, f32, 4);
    slot_accessors!(u16_at, set_u16, u16, 8);
    slot_accessors!(i16_at, set_i16, i16, 8);
    slot_accessors!(u8_at, set_u8, u8, 16);
    slot_accessors!(i8_at, set_i8, i8, 16);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_context_is_zeroed() {
        let ctx = EventContext::empty();
        for i in 0..16 {
            assert_eq!(ctx.u8_at(i), 0);
        }
    }

    #[test]
    fn test_u16_pair_round_trips() {
        let ctx = EventContext::from_u16_pair(0x1B, 720);
        assert_eq!(ctx.u16_at(0), 0x1B);
        assert_eq!(ctx.u16_at(1), 720);
        assert_eq!(ctx.u16_at(2), 0);
    }

    #[test]
    fn test_i16_pair_preserves_sign() {
        let ctx = EventContext::from_i16_pair(-320, 240);
        assert_eq!(ctx.i16_at(0), -320);
        assert_eq!(ctx.i16_at(1), 240);
    }

    #[test]
    fn test_views_alias_the_same_bytes() {
        let mut ctx = EventContext::empty();
        ctx.set_u64(0, 0x0102_0304_0506_0708);
        assert_eq!(ctx.u8_at(0), 0x08);
        assert_eq!(ctx.u16_at(0), 0x0708);
        assert_eq!(ctx.u32_at(1), 0x0102_0304);
    }

    #[test]
    fn test_f32_slot_round_trips() {
        let mut ctx = EventContext::empty();
        ctx.set_f32(3, 0.25);
        assert_eq!(ctx.f32_at(3), 0.25);
    }

    #[test]
    #[should_panic(expected = "context slot out of range")]
    fn test_out_of_range_slot_panics() {
        let ctx = EventContext::empty();
        let _ = ctx.u64_at(2);
    }
}
