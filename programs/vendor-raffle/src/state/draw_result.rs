use anchor_lang::prelude::*;

use crate::state::{RaffleResult, MAX_PRIZES, RAFFLE_RESULT_SIZE};

// 8 discriminator + 32 raffle + 8 drawn_at + 4 + 10 * RAFFLE_RESULT_SIZE winners + 1 total_prizes
pub const DRAW_RESULT_ACCOUNT_SIZE: usize = 8 + 32 + 8 + 4 + MAX_PRIZES * RAFFLE_RESULT_SIZE + 1;

/// Final, persisted outcome of a raffle's draw session.
/// `total_prizes` counts the prizes actually drawn, which may be fewer than
/// the raffle declared when sold numbers ran out.
#[account]
pub struct MultipleDrawResult {
    pub raffle: Pubkey,
    pub drawn_at: i64,
    pub winners: Vec<RaffleResult>,
    pub total_prizes: u8,
}
