use anchor_lang::prelude::*;

use crate::error::RaffleError;
use crate::state::{Contact, CONTACT_SIZE};

pub const MAX_NUMBERS_PER_SALE: usize = 20;

// 8 discriminator + 32 raffle + 32 vendor + CONTACT_SIZE contact + 4 + 20 * 4 numbers
// + 8 amount_due + 8 purchased_at + 8 seed
pub const BUYER_ACCOUNT_SIZE: usize =
    8 + 32 + 32 + CONTACT_SIZE + 4 + MAX_NUMBERS_PER_SALE * 4 + 8 + 8 + 8;

#[account]
pub struct Buyer {
    pub raffle: Pubkey,
    pub vendor: Pubkey,
    pub contact: Contact,
    pub numbers: Vec<u32>,
    pub amount_due: u64,
    pub purchased_at: i64,
    pub seed: [u8; 8],
}

impl Buyer {
    /// Checks that this sale includes `number` and was made by `vendor`.
    pub fn holds(&self, number: u32, vendor: Pubkey) -> Result<()> {
        require!(
            self.vendor == vendor && self.numbers.contains(&number),
            RaffleError::InvalidWinningBuyer
        );
        Ok(())
    }
}
