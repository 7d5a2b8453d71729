use crate::{
    error::RaffleError,
    state::{Config, CONFIG_ACCOUNT_SIZE},
};
use anchor_lang::prelude::*;

/// Longest sales rate-limit window an admin may configure.
pub const MAX_SALE_WINDOW_SECS: i64 = 24 * 60 * 60;

/// Instruction to initialize the program configuration
/// This should be called once during program deployment
///
/// # Arguments
/// * `max_sales_per_window` - Sales a single vendor may record per window
/// * `sale_window_secs` - Length of the sales rate-limit window in seconds
///
/// # Security Considerations
/// - Creates a PDA with seed "config"
/// - Only needs to be called once during deployment
/// - The caller becomes the admin allowed to tune the rate limit. Nothing
///   ties this to the upgrade authority, so the deployer must call it in the
///   same release step or another signer can claim the admin role first
/// - The admin cannot stretch the sales window beyond `MAX_SALE_WINDOW_SECS`,
///   which bounds how long a vendor can be locked out after a sale
pub fn init_config(
    ctx: Context<InitConfig>,
    max_sales_per_window: u16,
    sale_window_secs: i64,
) -> Result<()> {
    validate_rate_limit(max_sales_per_window, sale_window_secs)?;

    let config = &mut ctx.accounts.config;
    config.admin = ctx.accounts.admin.key();
    config.raffle_counter = 0;
    config.max_sales_per_window = max_sales_per_window;
    config.sale_window_secs = sale_window_secs;
    config.bump = ctx.bumps.config;
    Ok(())
}

pub(crate) fn validate_rate_limit(max_sales_per_window: u16, sale_window_secs: i64) -> Result<()> {
    require!(
        max_sales_per_window > 0
            && sale_window_secs > 0
            && sale_window_secs <= MAX_SALE_WINDOW_SECS,
        RaffleError::InvalidRateLimit
    );
    Ok(())
}

#[derive(Accounts)]
pub struct InitConfig<'info> {
    #[account(
        init,
        payer = admin,
        space = CONFIG_ACCOUNT_SIZE,
        seeds = [b"config"],
        bump
    )]
    pub config: Account<'info, Config>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_bounds() {
        assert!(validate_rate_limit(5, 60).is_ok());
        assert!(validate_rate_limit(1, MAX_SALE_WINDOW_SECS).is_ok());

        assert!(validate_rate_limit(0, 60).is_err());
        assert!(validate_rate_limit(5, 0).is_err());
        assert!(validate_rate_limit(5, -60).is_err());
        assert!(validate_rate_limit(5, MAX_SALE_WINDOW_SECS + 1).is_err());
        assert!(validate_rate_limit(5, i64::MAX).is_err());
    }
}
