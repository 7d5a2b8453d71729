use anchor_lang::prelude::*;

use crate::error::RaffleError;

pub const MAX_RAFFLE_NAME_LEN: usize = 64;
pub const MAX_PRIZES: usize = 10;
pub const MAX_PRIZE_NAME_LEN: usize = 64;
pub const MAX_PRIZE_DESCRIPTION_LEN: usize = 200;
pub const MAX_PRIZE_IMAGE_LEN: usize = 200;
/// Upper bound of `vendor_count * numbers_per_vendor`.
pub const MAX_TICKET_NUMBERS: u32 = 4096;
pub const SOLD_BITMAP_LEN: usize = (MAX_TICKET_NUMBERS as usize) / 8;

// 4 + 64 name, 4 + 200 description, 4 + 200 image
pub const PRIZE_SIZE: usize =
    4 + MAX_PRIZE_NAME_LEN + 4 + MAX_PRIZE_DESCRIPTION_LEN + 4 + MAX_PRIZE_IMAGE_LEN;

// Space calculation:
// 8 (discriminator) +
// 32 (organizer) +
// 4 + 64 (name) +
// 8 (price_per_number) +
// 2 (vendor_count) +
// 2 (numbers_per_vendor) +
// 8 (draw_date) +
// 4 + 10 * PRIZE_SIZE (prizes) +
// 1 (status) +
// 2 (vendors_registered) +
// 4 (total_sold) +
// 8 (creation_time) +
// 33 (draw_session: Option<Pubkey>) +
// 4 + 512 (sold_bitmap) +
// 1 (bump)
pub const RAFFLE_ACCOUNT_SIZE: usize = 8
    + 32
    + 4
    + MAX_RAFFLE_NAME_LEN
    + 8
    + 2
    + 2
    + 8
    + 4
    + MAX_PRIZES * PRIZE_SIZE
    + 1
    + 2
    + 4
    + 8
    + 33
    + 4
    + SOLD_BITMAP_LEN
    + 1;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq)]
pub enum RaffleStatus {
    Active = 0,
    Completed = 1,
}

/// A prize tier. Its position in `Raffle::prizes` is its draw order.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub struct Prize {
    pub name: String,
    pub description: String,
    pub image_uri: String,
}

#[account]
pub struct Raffle {
    pub organizer: Pubkey,
    pub name: String,
    pub price_per_number: u64,
    pub vendor_count: u16,
    pub numbers_per_vendor: u16,
    pub draw_date: i64,
    pub prizes: Vec<Prize>,
    pub status: RaffleStatus,
    pub vendors_registered: u16,
    pub total_sold: u32,
    pub creation_time: i64,
    /// Set by `start_draw`; sales and edits are closed from then on.
    pub draw_session: Option<Pubkey>,
    /// Bit `n - 1` is set once number `n` has been sold.
    pub sold_bitmap: Vec<u8>,
    pub bump: u8,
}

impl Raffle {
    /// Size of the number space, `1..=total_numbers`.
    pub fn total_numbers(&self) -> u32 {
        self.vendor_count as u32 * self.numbers_per_vendor as u32
    }

    /// Inclusive number block handed to the vendor at `index`.
    pub fn vendor_block(&self, index: u16) -> Result<(u32, u32)> {
        require!(index < self.vendor_count, RaffleError::VendorLimitReached);
        let per_vendor = self.numbers_per_vendor as u32;
        let first = (index as u32)
            .checked_mul(per_vendor)
            .and_then(|n| n.checked_add(1))
            .ok_or(RaffleError::Overflow)?;
        let last = first
            .checked_add(per_vendor - 1)
            .ok_or(RaffleError::Overflow)?;
        Ok((first, last))
    }

    pub fn is_sold(&self, number: u32) -> bool {
        is_bit_set(&self.sold_bitmap, number)
    }

    pub fn mark_sold(&mut self, number: u32) -> Result<()> {
        require!(
            number >= 1 && number <= self.total_numbers(),
            RaffleError::NumberOutOfRange
        );
        require!(!self.is_sold(number), RaffleError::NumberAlreadySold);

        let bit = (number - 1) as usize;
        self.sold_bitmap[bit / 8] |= 1 << (bit % 8);
        self.total_sold = self
            .total_sold
            .checked_add(1)
            .ok_or(RaffleError::Overflow)?;
        Ok(())
    }

    /// Number of prizes a session may draw at most.
    pub fn prize_count(&self) -> u8 {
        self.prizes.len() as u8
    }

    /// Display name of the prize at the 1-based `position`.
    pub fn prize_name(&self, position: u8) -> String {
        (position as usize)
            .checked_sub(1)
            .and_then(|i| self.prizes.get(i))
            .map(|prize| prize.name.clone())
            .unwrap_or_else(|| format!("Prize {}", position))
    }
}

pub fn is_bit_set(bitmap: &[u8], number: u32) -> bool {
    if number == 0 {
        return false;
    }
    let bit = (number - 1) as usize;
    bitmap
        .get(bit / 8)
        .map_or(false, |byte| byte & (1 << (bit % 8)) != 0)
}
