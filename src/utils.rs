//! Utility functions for gateway requests.
//!
//! This module provides the correlation-ID generator, the gateway timestamp
//! format, and the major-to-minor currency unit conversion used by every
//! order request.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Alphabet the gateway accepts for RqUID values: hex digits in both cases.
const RQUID_ALPHABET: &[u8] = b"0123456789abcdefABCDEF";

/// Length of an RqUID in characters.
const RQUID_LEN: usize = 32;

/// Per-request correlation identifier (RqUID).
///
/// A 32-character string drawn uniformly from `0123456789abcdefABCDEF`. One
/// RqUID is shared by a token request and its dependent order request so the
/// pair can be traced together in gateway logs.
///
/// # Examples
///
/// ```
/// use sber_qr::utils::RqUid;
///
/// let rq_uid = RqUid::generate();
/// assert_eq!(rq_uid.as_str().len(), 32);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RqUid(String);

impl RqUid {
    /// Generates a fresh RqUID.
    ///
    /// Backed by the thread-local RNG, so concurrent callers share no state.
    ///
    /// # Examples
    ///
    /// ```
    /// use sber_qr::utils::RqUid;
    ///
    /// let a = RqUid::generate();
    /// let b = RqUid::generate();
    /// assert_ne!(a, b);
    /// ```
    pub fn generate() -> Self {
        use rand::Rng;
        let mut rng = rand::thread_rng();
        let id = (0..RQUID_LEN)
            .map(|_| RQUID_ALPHABET[rng.gen_range(0..RQUID_ALPHABET.len())] as char)
            .collect();
        RqUid(id)
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RqUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Formats an instant the way the gateway expects `rq_tm`: ISO-8601 UTC,
/// truncated to whole seconds, with a literal `Z` suffix.
///
/// # Examples
///
/// ```
/// use chrono::{DateTime, Utc};
/// use sber_qr::utils::rq_timestamp;
///
/// let at: DateTime<Utc> = "2024-03-01T10:15:30.500Z".parse().unwrap();
/// assert_eq!(rq_timestamp(at), "2024-03-01T10:15:30Z");
/// ```
pub fn rq_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Formats the current instant as a gateway `rq_tm` timestamp.
pub fn rq_timestamp_now() -> String {
    rq_timestamp(Utc::now())
}

/// Converts a major-unit amount (e.g. rubles) to minor units (kopecks).
///
/// The gateway takes amounts in minor units; this multiply-by-100 is a hard
/// contract of the order API, not a configurable policy.
///
/// # Examples
///
/// ```
/// use sber_qr::utils::to_minor_units;
///
/// assert_eq!(to_minor_units(150.00), 15000);
/// assert_eq!(to_minor_units(1.15), 115);
/// ```
pub fn to_minor_units(major: f64) -> i64 {
    (major * 100.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_rquid_length_and_alphabet() {
        for _ in 0..100 {
            let rq_uid = RqUid::generate();
            assert_eq!(rq_uid.as_str().len(), 32);
            assert!(rq_uid
                .as_str()
                .bytes()
                .all(|b| RQUID_ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn test_rquid_uniqueness() {
        use std::collections::HashSet;

        let ids: HashSet<String> = (0..1000)
            .map(|_| RqUid::generate().as_str().to_string())
            .collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_rquid_serializes_as_plain_string() {
        let rq_uid = RqUid::generate();
        let json = serde_json::to_string(&rq_uid).unwrap();
        assert_eq!(json, format!("\"{}\"", rq_uid.as_str()));
    }

    #[test]
    fn test_rq_timestamp_truncates_to_seconds() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 10, 15, 30).unwrap()
            + chrono::Duration::milliseconds(500);
        assert_eq!(rq_timestamp(at), "2024-03-01T10:15:30Z");
    }

    #[test]
    fn test_rq_timestamp_now_shape() {
        let ts = rq_timestamp_now();
        assert_eq!(ts.len(), 20);
        assert!(ts.ends_with('Z'));
        assert!(!ts.contains('.'));
    }

    #[test]
    fn test_to_minor_units() {
        assert_eq!(to_minor_units(150.00), 15000);
        assert_eq!(to_minor_units(0.01), 1);
        assert_eq!(to_minor_units(1.15), 115);
        assert_eq!(to_minor_units(0.0), 0);
    }
}
