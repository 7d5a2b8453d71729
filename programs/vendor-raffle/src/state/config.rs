use anchor_lang::prelude::*;

// 8 discriminator + 32 admin + 8 raffle_counter + 2 max_sales_per_window + 8 sale_window_secs + 1 bump
pub const CONFIG_ACCOUNT_SIZE: usize = 8 + 32 + 8 + 2 + 8 + 1;

#[account]
pub struct Config {
    pub admin: Pubkey,
    pub raffle_counter: u64,
    pub max_sales_per_window: u16,
    pub sale_window_secs: i64,
    pub bump: u8,
}
