use anchor_lang::prelude::*;

use crate::error::RaffleError;
use crate::state::{Contact, CONTACT_SIZE};

// 8 discriminator + 32 raffle + 32 authority + 2 index + CONTACT_SIZE contact
// + 4 first_number + 4 last_number + 4 sold_count + 8 window_started_at + 2 sales_in_window + 1 bump
pub const VENDOR_ACCOUNT_SIZE: usize = 8 + 32 + 32 + 2 + CONTACT_SIZE + 4 + 4 + 4 + 8 + 2 + 1;

/// A seller assigned to one raffle. The account address doubles as the
/// shareable sales link handed out by the organizer.
#[account]
pub struct Vendor {
    pub raffle: Pubkey,
    pub authority: Pubkey,
    pub index: u16,
    pub contact: Contact,
    pub first_number: u32,
    pub last_number: u32,
    pub sold_count: u32,
    pub window_started_at: i64,
    pub sales_in_window: u16,
    pub bump: u8,
}

impl Vendor {
    pub fn owns_number(&self, number: u32) -> bool {
        (self.first_number..=self.last_number).contains(&number)
    }

    /// Applies the fixed-window sales limit, counting this sale when allowed.
    pub fn register_sale(&mut self, now: i64, window_secs: i64, max_per_window: u16) -> Result<()> {
        let window_ended = now
            .checked_sub(self.window_started_at)
            .ok_or(RaffleError::Overflow)?
            >= window_secs;

        if window_ended {
            self.window_started_at = now;
            self.sales_in_window = 0;
        }

        require!(
            self.sales_in_window < max_per_window,
            RaffleError::SalesRateLimited
        );
        self.sales_in_window += 1;
        Ok(())
    }

    /// Lamports owed to this vendor's raffle for everything sold so far.
    pub fn sales_amount(&self, price_per_number: u64) -> Result<u64> {
        price_per_number
            .checked_mul(self.sold_count as u64)
            .ok_or_else(|| RaffleError::Overflow.into())
    }
}
