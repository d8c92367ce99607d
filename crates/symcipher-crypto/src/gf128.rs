//! GF(2^128) arithmetic shared by GCM and CMAC.
//!
//! A 128-bit value is held canonically as a big-endian `[u8; 16]`: bit 0 is
//! the most significant bit of byte 0, as NIST SP 800-38D numbers the bits.
//! The word-wise operations step through the value `W::BYTES` bytes at a
//! time; the configured width changes only the stepping granularity, never
//! the result, and is property-tested as such below.
//!
//! The multiply is the table-less shift-and-reduce algorithm. It is slower
//! than a precomputed-table GHASH but carries no static tables, which keeps
//! the memory footprint at zero and removes table-lookup cache timing.

/// Size of a GF(2^128) element in bytes.
pub(crate) const GF128_SIZE: usize = 16;

/// A 128-bit value in canonical big-endian byte order.
pub(crate) type Block = [u8; GF128_SIZE];

/// Reduction constant of the GCM polynomial, positioned at the
/// most-significant byte (R = 0xE1 << 120).
const REDUCTION: u8 = 0xe1;

/// Internal word type used to step through a 128-bit value.
///
/// Words are loaded big-endian so that word boundaries fall on the canonical
/// bit order regardless of the host; host endianness never reaches the bit
/// level of the algorithms.
pub(crate) trait GfWord: Copy {
    const BYTES: usize;

    fn load(bytes: &[u8]) -> Self;
    fn store(self, bytes: &mut [u8]);
    fn xor(self, other: Self) -> Self;

    /// Shift right by one bit, taking `carry_in` into the MSB.
    /// Returns the shifted word and the bit shifted out of the LSB.
    fn shr1(self, carry_in: bool) -> (Self, bool);

    /// Shift left by one bit, taking `carry_in` into the LSB.
    /// Returns the shifted word and the bit shifted out of the MSB.
    fn shl1(self, carry_in: bool) -> (Self, bool);
}

macro_rules! impl_gf_word {
    ($($t:ty),*) => {
        $(
            impl GfWord for $t {
                const BYTES: usize = core::mem::size_of::<$t>();

                fn load(bytes: &[u8]) -> Self {
                    <$t>::from_be_bytes(bytes.try_into().unwrap())
                }

                fn store(self, bytes: &mut [u8]) {
                    bytes.copy_from_slice(&self.to_be_bytes());
                }

                fn xor(self, other: Self) -> Self {
                    self ^ other
                }

                fn shr1(self, carry_in: bool) -> (Self, bool) {
                    let out = self & 1 != 0;
                    let mut w = self >> 1;
                    if carry_in {
                        w |= (1 as $t) << (<$t>::BITS - 1);
                    }
                    (w, out)
                }

                fn shl1(self, carry_in: bool) -> (Self, bool) {
                    let out = self >> (<$t>::BITS - 1) != 0;
                    let w = (self << 1) | (carry_in as $t);
                    (w, out)
                }
            }
        )*
    };
}

impl_gf_word!(u8, u16, u32, u64);

/// Word width used by the modes; selectable via the `word-*` cargo features.
/// The widest enabled width wins so the features remain additive.
#[cfg(feature = "word-8")]
pub(crate) type NativeWord = u64;
#[cfg(all(feature = "word-4", not(feature = "word-8")))]
pub(crate) type NativeWord = u32;
#[cfg(all(feature = "word-2", not(any(feature = "word-4", feature = "word-8"))))]
pub(crate) type NativeWord = u16;
#[cfg(all(
    feature = "word-1",
    not(any(feature = "word-2", feature = "word-4", feature = "word-8"))
))]
pub(crate) type NativeWord = u8;
#[cfg(not(any(
    feature = "word-1",
    feature = "word-2",
    feature = "word-4",
    feature = "word-8"
)))]
pub(crate) type NativeWord = u64;

/// XOR `mask` into `acc`, one word at a time.
pub(crate) fn xor_block<W: GfWord>(acc: &mut Block, mask: &Block) {
    for (a, m) in acc
        .chunks_exact_mut(W::BYTES)
        .zip(mask.chunks_exact(W::BYTES))
    {
        W::load(a).xor(W::load(m)).store(a);
    }
}

/// Word-wise copy of a 128-bit value.
pub(crate) fn copy_block<W: GfWord>(to: &mut Block, from: &Block) {
    for (t, f) in to
        .chunks_exact_mut(W::BYTES)
        .zip(from.chunks_exact(W::BYTES))
    {
        W::load(f).store(t);
    }
}

/// Shift right by one bit; returns the bit shifted out of the LSB.
pub(crate) fn shr1<W: GfWord>(v: &mut Block) -> bool {
    let mut carry = false;
    for chunk in v.chunks_exact_mut(W::BYTES) {
        let (w, c) = W::load(chunk).shr1(carry);
        w.store(chunk);
        carry = c;
    }
    carry
}

/// Shift left by one bit; returns the bit shifted out of the MSB.
pub(crate) fn shl1<W: GfWord>(v: &mut Block) -> bool {
    let mut carry = false;
    for chunk in v.chunks_exact_mut(W::BYTES).rev() {
        let (w, c) = W::load(chunk).shl1(carry);
        w.store(chunk);
        carry = c;
    }
    carry
}

/// GF(2^128) multiplication with the GCM reduction polynomial: `x = x · y`.
///
/// Walks the 128 bits of `x` from most to least significant, accumulating
/// the shifted multiplicand `v` into `z` for each set bit; a bit falling
/// out of `v` folds the reduction constant back into its top byte
/// (NIST SP 800-38D, algorithm 1).
pub(crate) fn mul<W: GfWord>(x: &mut Block, y: &Block) {
    let mut z = Block::default();
    let mut v = Block::default();
    copy_block::<W>(&mut v, y);

    for i in 0..128 {
        if x[i / 8] & (0x80 >> (i % 8)) != 0 {
            xor_block::<W>(&mut z, &v);
        }
        if shr1::<W>(&mut v) {
            v[0] ^= REDUCTION;
        }
    }

    copy_block::<W>(x, &z);
}
