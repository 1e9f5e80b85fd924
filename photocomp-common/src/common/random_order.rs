use std::{fmt, sync::Arc};

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Error;

/// Width of the wall-clock bucket a fresh token's time is rounded down to.
pub const BUCKET_WIDTH_SECS: i64 = 300;

/// Number of distinct shuffles available per bucket.
pub const SEED_SLOTS: u32 = 64;

/// Tokens further than this from "now", in either direction, are discarded.
pub const MAX_TOKEN_AGE_SECS: i64 = 3600;

/// Upper bound on a client-supplied `numberEntries`.
/// The shuffle materializes a permutation of this size.
pub const MAX_TOKEN_ITEM_COUNT: u64 = 1 << 20;

/// Everything needed to regenerate the same shuffle on a later request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RandomOrderToken {
    time: i64,
    #[serde(rename = "numberEntries")]
    number_entries: u64,
    seed: u32,
}

impl RandomOrderToken {
    pub fn new(time: i64, number_entries: u64, seed: u32) -> Result<Self, Error> {
        if seed >= SEED_SLOTS {
            return Err(Error::InvalidInput(format!(
                "seed {seed} outside of [0, {SEED_SLOTS})"
            )));
        }

        Ok(Self {
            time,
            number_entries,
            seed,
        })
    }

    /// Bucketed creation time in epoch seconds.
    pub fn time(&self) -> i64 {
        self.time
    }

    /// Size of the permutation space this token addresses.
    pub fn item_count(&self) -> u64 {
        self.number_entries
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Compact JSON wire form, echoed to clients as `randomToken`.
    pub fn to_token_string(&self) -> String {
        // Three integer fields always serialize.
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl fmt::Display for RandomOrderToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_token_string())
    }
}

#[derive(Debug, Deserialize)]
struct RawToken {
    time: Option<i64>,
    #[serde(rename = "numberEntries")]
    number_entries: Option<u64>,
    seed: Option<i64>,
}

pub type Clock = Arc<dyn Fn() -> i64 + Send + Sync>;

/// Creates tokens and validates the ones clients send back.
#[derive(Clone)]
pub struct RandomOrderTokenFactory {
    clock: Clock,
}

impl fmt::Debug for RandomOrderTokenFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomOrderTokenFactory").finish_non_exhaustive()
    }
}

impl Default for RandomOrderTokenFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomOrderTokenFactory {
    pub fn new() -> Self {
        Self {
            clock: Arc::new(|| Utc::now().timestamp()),
        }
    }

    /// Factory reading "now" (epoch seconds) from `clock`.
    pub fn with_clock(clock: impl Fn() -> i64 + Send + Sync + 'static) -> Self {
        Self {
            clock: Arc::new(clock),
        }
    }

    pub fn now(&self) -> i64 {
        (self.clock)()
    }

    pub fn create_new(&self, item_count: u64) -> RandomOrderToken {
        let now = self.now();
        let bucketed = now - now.rem_euclid(BUCKET_WIDTH_SECS);

        RandomOrderToken {
            time: bucketed,
            number_entries: item_count,
            seed: rand::rng().random_range(0..SEED_SLOTS),
        }
    }

    /// Rebuilds a client token, or starts a fresh view if it can't be trusted.
    /// ---
    /// Never fails. An accepted token keeps the client's `numberEntries`
    /// rather than `item_count`, so a multi-page walk stays inside one
    /// permutation space.
    pub fn from_serialized(&self, raw: &str, item_count: u64) -> RandomOrderToken {
        match self.validate(raw) {
            Ok(token) => token,
            Err(reason) => {
                debug!(reason, "discarding random order token");
                self.create_new(item_count)
            }
        }
    }

    /// `None` or an empty string means the client has no token yet.
    pub fn resolve(&self, raw: Option<&str>, item_count: u64) -> RandomOrderToken {
        match raw.filter(|r| !r.is_empty()) {
            Some(raw) => self.from_serialized(raw, item_count),
            None => self.create_new(item_count),
        }
    }

    fn validate(&self, raw: &str) -> Result<RandomOrderToken, &'static str> {
        let decoded: RawToken =
            serde_json::from_str(raw).map_err(|_| "token is not a valid token object")?;

        let (Some(time), Some(number_entries), Some(seed)) =
            (decoded.time, decoded.number_entries, decoded.seed)
        else {
            return Err("token is missing a key");
        };

        if self.now().abs_diff(time) > MAX_TOKEN_AGE_SECS.unsigned_abs() {
            return Err("token is stale");
        }

        if !(0..i64::from(SEED_SLOTS)).contains(&seed) {
            return Err("token seed out of range");
        }

        if number_entries > MAX_TOKEN_ITEM_COUNT {
            return Err("token item count too large");
        }

        Ok(RandomOrderToken {
            time,
            number_entries,
            seed: seed as u32,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_123;

    fn factory() -> RandomOrderTokenFactory {
        RandomOrderTokenFactory::with_clock(|| NOW)
    }

    #[test]
    fn test_create_new_buckets_time() {
        let token = factory().create_new(50);
        assert_eq!(token.time(), NOW - NOW % BUCKET_WIDTH_SECS);
        assert_eq!(token.time() % BUCKET_WIDTH_SECS, 0);
        assert_eq!(token.item_count(), 50);
        assert!(token.seed() < SEED_SLOTS);
    }

    #[test]
    fn test_wire_format() {
        let token = RandomOrderToken::new(1_700_000_100, 4, 7).unwrap();
        assert_eq!(
            token.to_token_string(),
            r#"{"time":1700000100,"numberEntries":4,"seed":7}"#
        );
        assert_eq!(
            serde_json::to_string(&token).unwrap(),
            token.to_token_string()
        );
    }

    #[test]
    fn test_round_trip() {
        let f = factory();
        let token = f.create_new(12);
        let restored = f.from_serialized(&token.to_token_string(), token.item_count());
        assert_eq!(restored, token);
    }

    #[test]
    fn test_keeps_client_item_count() {
        let raw = format!(r#"{{"time":{NOW},"numberEntries":9,"seed":3}}"#);
        let token = factory().from_serialized(&raw, 100);
        assert_eq!(token.item_count(), 9);
        assert_eq!(token.seed(), 3);
        assert_eq!(token.time(), NOW);
    }

    #[test]
    fn test_fallback_on_garbage() {
        let token = factory().from_serialized("not json", 50);
        assert_eq!(token.item_count(), 50);
        assert!(token.seed() < SEED_SLOTS);
        assert_eq!(token.time() % BUCKET_WIDTH_SECS, 0);
    }

    #[test]
    fn test_fallback_on_missing_key() {
        let raw = format!(r#"{{"time":{NOW},"seed":3}}"#);
        let token = factory().from_serialized(&raw, 50);
        assert_eq!(token.item_count(), 50);
    }

    #[test]
    fn test_fallback_on_stale_time_either_direction() {
        for time in [NOW - MAX_TOKEN_AGE_SECS - 1, NOW + MAX_TOKEN_AGE_SECS + 1] {
            let raw = format!(r#"{{"time":{time},"numberEntries":9,"seed":3}}"#);
            let token = factory().from_serialized(&raw, 50);
            assert_eq!(token.item_count(), 50);
            assert_ne!(token.time(), time);
        }

        let edge = NOW - MAX_TOKEN_AGE_SECS;
        let raw = format!(r#"{{"time":{edge},"numberEntries":9,"seed":3}}"#);
        assert_eq!(factory().from_serialized(&raw, 50).item_count(), 9);
    }

    #[test]
    fn test_fallback_on_extreme_time() {
        for time in [i64::MIN, i64::MAX, i64::MIN + 1] {
            let raw = format!(r#"{{"time":{time},"numberEntries":9,"seed":3}}"#);
            let token = factory().from_serialized(&raw, 50);
            assert_eq!(token.item_count(), 50);
            assert_eq!(token.time(), NOW - NOW % BUCKET_WIDTH_SECS);
        }
    }

    #[test]
    fn test_fallback_on_seed_out_of_range() {
        for seed in [-1_i64, SEED_SLOTS as i64] {
            let raw = format!(r#"{{"time":{NOW},"numberEntries":9,"seed":{seed}}}"#);
            assert_eq!(factory().from_serialized(&raw, 50).item_count(), 50);
        }
    }

    #[test]
    fn test_resolve_treats_empty_as_absent() {
        let f = factory();
        assert_eq!(f.resolve(None, 5).item_count(), 5);
        assert_eq!(f.resolve(Some(""), 5).item_count(), 5);
    }

    #[test]
    fn test_new_rejects_seed_out_of_range() {
        assert!(RandomOrderToken::new(NOW, 1, SEED_SLOTS).is_err());
    }
}
