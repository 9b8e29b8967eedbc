// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Hash related utils.

use crate::Error;
use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use blake2::Blake2b512;
use hmac::{Hmac, Mac, SimpleHmac};
use sha2::{Digest, Sha256};
use sha3::Sha3_256;
use std::fmt;
use std::str::FromStr;

/// Digest algorithm used for both the body content hash and the final HMAC.
///
/// The same algorithm is used for both, and its token appears verbatim in the
/// authorization header's scheme tag (`DC1-HMAC-SHA256 ...`), so the wire
/// tokens are case sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HmacAlgorithm {
    /// HMAC with SHA-256, the default.
    #[default]
    Sha256,
    /// HMAC with SHA3-256.
    Sha3_256,
    /// HMAC with BLAKE2b-512.
    Blake2b512,
}

impl HmacAlgorithm {
    /// The token used on the wire for this algorithm.
    pub fn as_str(&self) -> &'static str {
        match self {
            HmacAlgorithm::Sha256 => "SHA256",
            HmacAlgorithm::Sha3_256 => "SHA3-256",
            HmacAlgorithm::Blake2b512 => "BLAKE2b512",
        }
    }
}

impl fmt::Display for HmacAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HmacAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SHA256" => Ok(HmacAlgorithm::Sha256),
            "SHA3-256" => Ok(HmacAlgorithm::Sha3_256),
            "BLAKE2b512" => Ok(HmacAlgorithm::Blake2b512),
            _ => Err(Error::bad_request(format!(
                "unsupported hmac algorithm: {s}"
            ))),
        }
    }
}

/// Base64 encode
pub fn base64_encode(content: &[u8]) -> String {
    BASE64_STANDARD.encode(content)
}

/// Base64 decode
pub fn base64_decode(content: &str) -> crate::Result<Vec<u8>> {
    BASE64_STANDARD
        .decode(content)
        .map_err(|e| Error::unexpected("base64 decode failed").with_source(e))
}

/// Base64 encoded digest of content.
pub fn base64_digest(algorithm: HmacAlgorithm, content: &[u8]) -> String {
    match algorithm {
        HmacAlgorithm::Sha256 => base64_encode(Sha256::digest(content).as_slice()),
        HmacAlgorithm::Sha3_256 => base64_encode(Sha3_256::digest(content).as_slice()),
        HmacAlgorithm::Blake2b512 => base64_encode(Blake2b512::digest(content).as_slice()),
    }
}

/// Base64 encoded HMAC of content.
pub fn base64_hmac(algorithm: HmacAlgorithm, key: &[u8], content: &[u8]) -> String {
    match algorithm {
        HmacAlgorithm::Sha256 => {
            // SAFETY: HMAC's new_from_slice always returns Ok - it handles any key length
            let mut h = Hmac::<Sha256>::new_from_slice(key).unwrap();
            h.update(content);
            base64_encode(&h.finalize().into_bytes())
        }
        HmacAlgorithm::Sha3_256 => {
            // SAFETY: HMAC's new_from_slice always returns Ok - it handles any key length
            let mut h = Hmac::<Sha3_256>::new_from_slice(key).unwrap();
            h.update(content);
            base64_encode(&h.finalize().into_bytes())
        }
        HmacAlgorithm::Blake2b512 => {
            // BLAKE2 buffers lazily, so it goes through SimpleHmac instead of
            // the eager Hmac wrapper.
            // SAFETY: HMAC's new_from_slice always returns Ok - it handles any key length
            let mut h = SimpleHmac::<Blake2b512>::new_from_slice(key).unwrap();
            h.update(content);
            base64_encode(&h.finalize().into_bytes())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(HmacAlgorithm::Sha256, "SHA256")]
    #[test_case(HmacAlgorithm::Sha3_256, "SHA3-256")]
    #[test_case(HmacAlgorithm::Blake2b512, "BLAKE2b512")]
    fn test_algorithm_tokens(algorithm: HmacAlgorithm, token: &str) {
        assert_eq!(algorithm.as_str(), token);
        assert_eq!(token.parse::<HmacAlgorithm>().unwrap(), algorithm);
    }

    #[test]
    fn test_unknown_algorithm_is_rejected() {
        assert!("sha256".parse::<HmacAlgorithm>().is_err());
        assert!("MD5".parse::<HmacAlgorithm>().is_err());
    }

    #[test]
    fn test_base64_digest_of_empty_input() {
        assert_eq!(
            base64_digest(HmacAlgorithm::Sha256, b""),
            "47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU="
        );
        assert_eq!(
            base64_digest(HmacAlgorithm::Sha3_256, b""),
            "p//G+L8e12ZRwUdWoGHWYvWA/03kO0n6gtgKS4D4Q0o="
        );
        assert_eq!(
            base64_digest(HmacAlgorithm::Blake2b512, b""),
            "eGoC90IBWQPGxv2FJVLScpEvR0DhWEdhiobiF/cfVBnSXhAxr+5YUxOJZESTTrBLkDpoWxRIt1XVb3Aa/pvizg=="
        );
    }

    #[test_case(HmacAlgorithm::Sha256)]
    #[test_case(HmacAlgorithm::Sha3_256)]
    #[test_case(HmacAlgorithm::Blake2b512)]
    fn test_base64_hmac_is_deterministic(algorithm: HmacAlgorithm) {
        let a = base64_hmac(algorithm, b"key", b"message");
        let b = base64_hmac(algorithm, b"key", b"message");
        assert_eq!(a, b);
        assert_ne!(a, base64_hmac(algorithm, b"other", b"message"));
    }
}
