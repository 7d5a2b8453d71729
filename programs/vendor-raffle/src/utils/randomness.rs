use std::str::FromStr;

use anchor_lang::prelude::*;
use arrayref::array_ref;

use crate::error::RaffleError;

const SLOT_HASHES_SYSVAR: &str = "SysvarS1otHashes111111111111111111111111111";

/// Derives a random value for one draw step from on-chain entropy.
///
/// The SlotHashes sysvar is validated by address because Anchor refuses to
/// deserialize it. The most recent slot hash is mixed with the clock
/// timestamp and a per-step salt so that two prizes revealed within the
/// same slot still get independent values.
pub fn draw_entropy(slot_hashes: &AccountInfo, timestamp: i64, salt: u64) -> Result<u64> {
    let pubkey_matches = Pubkey::from_str(SLOT_HASHES_SYSVAR)
        .or(Err(RaffleError::InvalidSlotHashesAccount))?
        .eq(slot_hashes.key);
    require!(pubkey_matches, RaffleError::InvalidSlotHashesAccount);

    let data = slot_hashes.data.borrow();
    require!(data.len() >= 20, RaffleError::InvalidSlotHashesAccount);

    // Layout: 8 byte entry count, then (slot: u64, hash: [u8; 32]) entries
    let chunk1 = array_ref![data, 12, 8];
    let chunk2 = if data.len() >= 28 {
        array_ref![data, 20, 8]
    } else {
        chunk1
    };

    Ok(mix_entropy(
        u64::from_le_bytes(*chunk1),
        u64::from_le_bytes(*chunk2),
        timestamp as u64,
        salt,
    ))
}

pub fn mix_entropy(hash_value1: u64, hash_value2: u64, timestamp: u64, salt: u64) -> u64 {
    let mut mixed = mix(hash_value1, timestamp);
    mixed = mix(mixed, hash_value2);
    mix(mixed, salt)
}

/// splitmix64 finalizer; every output bit depends on every input bit.
pub fn mix(a: u64, b: u64) -> u64 {
    let mut z = a.wrapping_add(b);

    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

/// Maps a random value into `0..range` without modulo bias.
pub fn unbiased_range(x: u64, range: u64) -> Result<u64> {
    if range == 0 {
        return Err(RaffleError::Overflow.into());
    }

    if range.is_power_of_two() {
        return Ok(x & (range - 1));
    }

    // Bias below 2^-56 for ranges this small
    if range <= 256 {
        return Ok(x % range);
    }

    let threshold = u64::MAX - (u64::MAX % range);
    let mut value = x;

    // Cap iterations to bound compute units
    const MAX_ATTEMPTS: u8 = 3;

    for i in 0..MAX_ATTEMPTS {
        if value < threshold {
            return Ok(value % range);
        }
        value = mix(value, value.wrapping_add(i as u64 + 1));
    }

    Ok(value % range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_range_is_rejected() {
        assert!(unbiased_range(42, 0).is_err());
    }

    #[test]
    fn salt_changes_the_outcome() {
        let a = mix_entropy(1, 2, 1_700_000_000, 1);
        let b = mix_entropy(1, 2, 1_700_000_000, 2);
        assert_ne!(a, b);
    }

    proptest! {
        #[test]
        fn unbiased_range_stays_in_bounds(x in any::<u64>(), range in 1u64..=u64::MAX) {
            prop_assert!(unbiased_range(x, range).unwrap() < range);
        }

        #[test]
        fn mix_is_deterministic(a in any::<u64>(), b in any::<u64>()) {
            prop_assert_eq!(mix(a, b), mix(a, b));
        }
    }
}
