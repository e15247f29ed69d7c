//! An incremental [MD5] hash engine.
//!
//! A [`Context`] absorbs input in chunks of any size, compresses complete
//! 64-byte blocks as soon as they are available and keeps the remainder in a
//! fixed internal buffer. Finalization applies the padding and length
//! encoding of [RFC1321], yields a 16-byte [`Digest`] and leaves the context
//! ready for reuse.
//!
//! ## Example
//!
//! ```
//! let digest = md5_engine::compute(b"abcdefghijklmnopqrstuvwxyz");
//! assert_eq!(format!("{:x}", digest), "c3fcd3d76192e4007dfb496cca67e13b");
//!
//! let mut context = md5_engine::Context::new();
//! context.update("abcdefghijklm");
//! context.update("nopqrstuvwxyz");
//! assert_eq!(context.digest(), digest);
//! ```
//!
//! A shared prefix can be hashed once and branched with `clone`:
//!
//! ```
//! let mut prefix = md5_engine::Context::new();
//! prefix.update("message ");
//! let mut other = prefix.clone();
//! prefix.update("digest");
//! other.update("authentication code");
//! assert_eq!(format!("{:x}", prefix.digest()), "f96b697d7cb7938d525a2f31aaf161d0");
//! assert_ne!(other.digest(), md5_engine::compute("message digest"));
//! ```
//!
//! ## Security Warning
//!
//! The package is provided for the purposes of interoperability with protocols
//! and systems that mandate the use of MD5. However, MD5 should be considered
//! [cryptographically broken and unsuitable for further use][VU836068].
//! Collision attacks against MD5 are both practical and trivial, and
//! [theoretical attacks against MD5 have been found][ACM1724151].
//!
//! [RFC6151] advises no new protocols to be designed with any MD5-based
//! constructions, including HMAC-MD5.
//!
//! [MD5]: https://en.wikipedia.org/wiki/MD5
//!
//! [ACM1724151]: https://dl.acm.org/citation.cfm?id=1724151
//! [RFC1321]: https://tools.ietf.org/html/rfc1321
//! [RFC6151]: https://tools.ietf.org/html/rfc6151
//! [VU836068]: https://www.kb.cert.org/vuls/id/836068

#![cfg_attr(not(feature = "std"), no_std)]

mod compress;
mod context;
mod digest;
mod error;

pub use compress::{compress, INITIAL_STATE};
pub use context::Context;
pub use digest::Digest;
pub use error::{Error, Result};

/// Size of a digest in bytes.
pub const DIGEST_LEN: usize = 16;

/// Size of a block consumed by one compression in bytes.
pub const BLOCK_LEN: usize = 64;

/// Compute the digest of data.
#[inline]
pub fn compute<T: AsRef<[u8]>>(data: T) -> Digest {
    let mut context = Context::new();
    context.update(data);
    context.compute()
}
