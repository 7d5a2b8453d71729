//! Winner selection over a raffle's sold numbers.
//!
//! The ticket pool is read straight from the raffle's sold bitmap, so no
//! per-draw allocation is needed regardless of how many numbers were sold.
//! Every sold number carries the same weight: a buyer holding more numbers
//! has a proportionally better chance.

use anchor_lang::prelude::*;

use crate::error::RaffleError;
use crate::state::is_bit_set;
use crate::utils::randomness::unbiased_range;

/// Every sold number, ascending.
pub fn sold_numbers(bitmap: &[u8]) -> impl Iterator<Item = u32> + '_ {
    bitmap.iter().enumerate().flat_map(|(byte_index, byte)| {
        (0..8u32)
            .filter(move |bit| byte & (1u8 << *bit) != 0)
            .map(move |bit| byte_index as u32 * 8 + bit + 1)
    })
}

/// Sold numbers that have not won a prize in this session yet.
pub fn eligible_numbers<'a>(bitmap: &'a [u8], won: &'a [u32]) -> impl Iterator<Item = u32> + 'a {
    sold_numbers(bitmap).filter(move |number| !won.contains(number))
}

pub fn eligible_count(bitmap: &[u8], won: &[u32]) -> u32 {
    // Winners are a subset of the sold numbers
    let sold = sold_numbers(bitmap).count() as u32;
    let still_sold = won.iter().filter(|n| is_bit_set(bitmap, **n)).count() as u32;
    sold.saturating_sub(still_sold)
}

/// Picks one eligible number uniformly using `random`.
pub fn select_winner(bitmap: &[u8], won: &[u32], random: u64) -> Result<u32> {
    let count = eligible_count(bitmap, won);
    require!(count > 0, RaffleError::NoEligibleNumbers);

    let index = unbiased_range(random, count as u64)? as usize;
    eligible_numbers(bitmap, won)
        .nth(index)
        .ok_or_else(|| RaffleError::NoEligibleNumbers.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::collection::{btree_set, vec};
    use proptest::prelude::*;

    fn bitmap_of(numbers: &[u32], total: u32) -> Vec<u8> {
        let mut bitmap = vec![0u8; ((total + 7) / 8) as usize];
        for n in numbers {
            let bit = (n - 1) as usize;
            bitmap[bit / 8] |= 1 << (bit % 8);
        }
        bitmap
    }

    #[test]
    fn pool_lists_sold_numbers_in_order() {
        let bitmap = bitmap_of(&[9, 3, 7, 16, 17], 24);
        assert_eq!(sold_numbers(&bitmap).collect::<Vec<_>>(), vec![3, 7, 9, 16, 17]);
        assert_eq!(sold_numbers(&[0, 0]).count(), 0);
    }

    #[test]
    fn eligibility_excludes_previous_winners() {
        let bitmap = bitmap_of(&[3, 7, 9], 10);
        assert_eq!(
            eligible_numbers(&bitmap, &[7]).collect::<Vec<_>>(),
            vec![3, 9]
        );
        assert_eq!(eligible_count(&bitmap, &[7]), 2);
        assert_eq!(eligible_count(&bitmap, &[3, 7, 9]), 0);
    }

    #[test]
    fn empty_pool_cannot_be_drawn() {
        let bitmap = bitmap_of(&[], 10);
        assert!(select_winner(&bitmap, &[], 12345).is_err());

        let bitmap = bitmap_of(&[4], 10);
        assert_eq!(select_winner(&bitmap, &[], 12345).unwrap(), 4);
        assert!(select_winner(&bitmap, &[4], 12345).is_err());
    }

    #[test]
    fn every_number_is_reachable() {
        let bitmap = bitmap_of(&[3, 7, 9], 10);
        let picks: Vec<u32> = (0..3).map(|r| select_winner(&bitmap, &[], r).unwrap()).collect();
        assert_eq!(picks, vec![3, 7, 9]);
    }

    proptest! {
        #[test]
        fn winner_is_sold_and_not_repeated(
            sold in btree_set(1u32..=512, 1..64),
            randoms in vec(any::<u64>(), 1..80),
        ) {
            let sold: Vec<u32> = sold.into_iter().collect();
            let bitmap = bitmap_of(&sold, 512);
            let mut won = Vec::new();

            for random in randoms {
                match select_winner(&bitmap, &won, random) {
                    Ok(winner) => {
                        prop_assert!(sold.contains(&winner));
                        prop_assert!(!won.contains(&winner));
                        won.push(winner);
                    }
                    Err(_) => {
                        prop_assert_eq!(won.len(), sold.len());
                        break;
                    }
                }
            }
        }
    }
}
