/// Single-bit and octet access on fixed-width integers.
///
/// Bit 0 is the least significant bit; octet 0 is the least significant byte.
/// Positions outside the integer width read as zero and are ignored on write.
pub trait BitField: Copy {
    fn is_set(self, bit: u32) -> bool;
    fn set(self, bit: u32) -> Self;
    fn unset(self, bit: u32) -> Self;
    fn read_octet(self, octet: u32) -> u8;
}

macro_rules! impl_bit_field {
    ($($t:ty),*) => {
        $(
            impl BitField for $t {
                #[inline]
                fn is_set(self, bit: u32) -> bool {
                    (1 as $t).checked_shl(bit).is_some_and(|mask| self & mask != 0)
                }

                #[inline]
                fn set(self, bit: u32) -> Self {
                    (1 as $t).checked_shl(bit).map_or(self, |mask| self | mask)
                }

                #[inline]
                fn unset(self, bit: u32) -> Self {
                    (1 as $t).checked_shl(bit).map_or(self, |mask| self & !mask)
                }

                #[inline]
                fn read_octet(self, octet: u32) -> u8 {
                    octet
                        .checked_mul(8)
                        .and_then(|shift| self.checked_shr(shift))
                        .map_or(0, |v| (v & 0xFF) as u8)
                }
            }
        )*
    };
}

impl_bit_field!(u8, u16, u32, u64);

/// Four contiguous bits of `value` ending at `start_bit`, most significant
/// first. `read_nybble(0b1100_1111, 6)` is `0b0100`.
pub fn read_nybble(value: u8, start_bit: u32) -> u8 {
    (0..4u32).fold(0, |acc, i| {
        let set = start_bit
            .checked_sub(i)
            .is_some_and(|bit| value.is_set(bit));
        if set {
            acc | (0b1000 >> i)
        } else {
            acc
        }
    })
}
