use anchor_lang::prelude::*;

use crate::{error::RaffleError, instructions::init_config::validate_rate_limit, state::Config};

/// Event emitted when the sales rate limit is changed
#[event]
pub struct ConfigUpdated {
    pub max_sales_per_window: u16,
    pub sale_window_secs: i64,
}

/// Instruction to retune the per-vendor sales rate limit.
/// Only the admin recorded in the config may call it; the new window
/// applies from each vendor's next sale.
pub fn update_config(
    ctx: Context<UpdateConfig>,
    max_sales_per_window: u16,
    sale_window_secs: i64,
) -> Result<()> {
    validate_rate_limit(max_sales_per_window, sale_window_secs)?;

    ctx.accounts.config.max_sales_per_window = max_sales_per_window;
    ctx.accounts.config.sale_window_secs = sale_window_secs;

    emit!(ConfigUpdated {
        max_sales_per_window,
        sale_window_secs,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    #[account(
        mut,
        seeds = [b"config"],
        bump = config.bump,
        has_one = admin @ RaffleError::NotAdmin,
    )]
    pub config: Account<'info, Config>,

    pub admin: Signer<'info>,
}
