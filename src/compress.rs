//! The block compression function.
//!
//! One call advances the 128-bit running state by exactly one 64-byte block,
//! following the round schedule of RFC 1321 section 3.4.

use crate::BLOCK_LEN;

/// The creation-time state words `A`, `B`, `C` and `D`.
pub const INITIAL_STATE: [u32; 4] = [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476];

// Left-rotation widths, one row per round; step `i` of a round uses column `i % 4`.
#[rustfmt::skip]
const ROTATIONS: [[u32; 4]; 4] = [
    [7, 12, 17, 22],
    [5,  9, 14, 20],
    [4, 11, 16, 23],
    [6, 10, 15, 21],
];

// floor(2^32 * |sin(i + 1)|)
#[rustfmt::skip]
const SINES: [u32; 64] = [
    0xd76aa478, 0xe8c7b756, 0x242070db, 0xc1bdceee, 0xf57c0faf, 0x4787c62a, 0xa8304613, 0xfd469501,
    0x698098d8, 0x8b44f7af, 0xffff5bb1, 0x895cd7be, 0x6b901122, 0xfd987193, 0xa679438e, 0x49b40821,
    0xf61e2562, 0xc040b340, 0x265e5a51, 0xe9b6c7aa, 0xd62f105d, 0x02441453, 0xd8a1e681, 0xe7d3fbc8,
    0x21e1cde6, 0xc33707d6, 0xf4d50d87, 0x455a14ed, 0xa9e3e905, 0xfcefa3f8, 0x676f02d9, 0x8d2a4c8a,
    0xfffa3942, 0x8771f681, 0x6d9d6122, 0xfde5380c, 0xa4beea44, 0x4bdecfa9, 0xf6bb4b60, 0xbebfbc70,
    0x289b7ec6, 0xeaa127fa, 0xd4ef3085, 0x04881d05, 0xd9d4d039, 0xe6db99e5, 0x1fa27cf8, 0xc4ac5665,
    0xf4292244, 0x432aff97, 0xab9423a7, 0xfc93a039, 0x655b59c3, 0x8f0ccc92, 0xffeff47d, 0x85845dd1,
    0x6fa87e4f, 0xfe2ce6e0, 0xa3014314, 0x4e0811a1, 0xf7537e82, 0xbd3af235, 0x2ad7d2bb, 0xeb86d391,
];

#[inline(always)]
fn f(x: u32, y: u32, z: u32) -> u32 {
    (x & y) | (!x & z)
}

#[inline(always)]
fn g(x: u32, y: u32, z: u32) -> u32 {
    (x & z) | (y & !z)
}

#[inline(always)]
fn h(x: u32, y: u32, z: u32) -> u32 {
    x ^ y ^ z
}

#[inline(always)]
fn i(x: u32, y: u32, z: u32) -> u32 {
    y ^ (x | !z)
}

/// Word of the block consumed by global step `step` (0..64).
#[inline(always)]
const fn message_index(step: usize) -> usize {
    match step / 16 {
        0 => step,
        1 => (5 * step + 1) % 16,
        2 => (3 * step + 5) % 16,
        _ => (7 * step) % 16,
    }
}

#[inline(always)]
fn decode(block: &[u8; BLOCK_LEN]) -> [u32; 16] {
    let mut words = [0u32; 16];
    let (chunks, _) = block.as_chunks::<4>();
    for (word, chunk) in words.iter_mut().zip(chunks) {
        *word = u32::from_le_bytes(*chunk);
    }
    words
}

/// Compress one block into `state` and return the advanced state.
///
/// The function is pure: the same state and block always produce the same
/// output, and the input state is left as is.
///
/// ```
/// use md5_engine::{compress, INITIAL_STATE};
///
/// let mut block = [0u8; 64];
/// block[0] = 0x80;
/// let state = compress(INITIAL_STATE, &block);
/// assert_eq!(state[0].to_le_bytes(), [0xd4, 0x1d, 0x8c, 0xd9]);
/// ```
pub fn compress(state: [u32; 4], block: &[u8; BLOCK_LEN]) -> [u32; 4] {
    let words = decode(block);
    let [mut a, mut b, mut c, mut d] = state;

    for step in 0..64 {
        let mixed = match step / 16 {
            0 => f(b, c, d),
            1 => g(b, c, d),
            2 => h(b, c, d),
            _ => i(b, c, d),
        };
        let temp = a
            .wrapping_add(mixed)
            .wrapping_add(words[message_index(step)])
            .wrapping_add(SINES[step]);
        let next = b.wrapping_add(temp.rotate_left(ROTATIONS[step / 16][step % 4]));
        a = d;
        d = c;
        c = b;
        b = next;
    }

    [
        state[0].wrapping_add(a),
        state[1].wrapping_add(b),
        state[2].wrapping_add(c),
        state[3].wrapping_add(d),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(step: usize) -> u32 {
        let scaled = 4294967296.0 * ((step + 1) as f64).sin().abs();
        scaled.floor() as u32
    }

    #[test]
    fn sines_match_definition() {
        for (step, &value) in SINES.iter().enumerate() {
            assert_eq!(value, sine(step), "step {step}");
        }
    }

    #[test]
    fn message_schedule_is_a_permutation_per_round() {
        for round in 0..4 {
            let mut seen = [false; 16];
            for step in round * 16..(round + 1) * 16 {
                seen[message_index(step)] = true;
            }
            assert!(seen.iter().all(|&hit| hit), "round {round}");
        }
        assert_eq!(message_index(16), 1);
        assert_eq!(message_index(17), 6);
        assert_eq!(message_index(32), 5);
        assert_eq!(message_index(33), 8);
        assert_eq!(message_index(48), 0);
        assert_eq!(message_index(49), 7);
    }

    #[test]
    fn words_are_little_endian() {
        let mut block = [0u8; BLOCK_LEN];
        block[..8].copy_from_slice(&[0x01, 0x02, 0x03, 0x04, 0xaa, 0xbb, 0xcc, 0xdd]);
        let words = decode(&block);
        assert_eq!(words[0], 0x04030201);
        assert_eq!(words[1], 0xddccbbaa);
        assert!(words[2..].iter().all(|&word| word == 0));
    }

    #[test]
    fn padded_empty_block() {
        let mut block = [0u8; BLOCK_LEN];
        block[0] = 0x80;
        let state = compress(INITIAL_STATE, &block);
        let mut output = [0u8; 16];
        for (chunk, word) in output.chunks_mut(4).zip(state) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        assert_eq!(hex::encode(output), "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn deterministic_and_pure() {
        let block = [0x5a; BLOCK_LEN];
        let state = INITIAL_STATE;
        let first = compress(state, &block);
        let second = compress(state, &block);
        assert_eq!(first, second);
        assert_eq!(state, INITIAL_STATE);
        assert_ne!(first, INITIAL_STATE);
    }
}
