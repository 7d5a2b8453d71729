use anchor_lang::prelude::*;

use crate::{
    error::RaffleError,
    state::{ContactInput, Raffle, RaffleStatus, Vendor, VENDOR_ACCOUNT_SIZE},
};

/// Event emitted when a vendor is assigned to a raffle
#[event]
pub struct VendorRegistered {
    pub raffle: Pubkey,
    /// The vendor account; its address is the shareable sales link
    pub vendor: Pubkey,
    pub authority: Pubkey,
    pub index: u16,
    pub first_number: u32,
    pub last_number: u32,
}

/// Assigns the next free vendor slot of a raffle.
///
/// The vendor receives the sequential block
/// `index * numbers_per_vendor + 1 ..= (index + 1) * numbers_per_vendor`
/// and `authority` becomes the wallet allowed to record its sales.
///
/// # Account Validations
/// * Raffle - Must be Active, signed for by its organizer, with a free vendor slot
/// * Vendor - New PDA with seeds ["vendor", raffle_key, index_le]
pub fn register_vendor(ctx: Context<RegisterVendor>, contact: ContactInput) -> Result<()> {
    let contact = contact.validate_with_email()?;

    let raffle = &mut ctx.accounts.raffle;
    let index = raffle.vendors_registered;
    let (first_number, last_number) = raffle.vendor_block(index)?;

    let vendor = &mut ctx.accounts.vendor;
    vendor.raffle = raffle.key();
    vendor.authority = ctx.accounts.authority.key();
    vendor.index = index;
    vendor.contact = contact;
    vendor.first_number = first_number;
    vendor.last_number = last_number;
    vendor.sold_count = 0;
    vendor.window_started_at = 0;
    vendor.sales_in_window = 0;
    vendor.bump = ctx.bumps.vendor;

    raffle.vendors_registered = index.checked_add(1).ok_or(RaffleError::Overflow)?;

    emit!(VendorRegistered {
        raffle: raffle.key(),
        vendor: vendor.key(),
        authority: vendor.authority,
        index,
        first_number,
        last_number,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct RegisterVendor<'info> {
    #[account(
        mut,
        has_one = organizer @ RaffleError::NotOrganizer,
        constraint = raffle.status == RaffleStatus::Active @ RaffleError::RaffleNotActive,
        constraint = raffle.draw_session.is_none() @ RaffleError::DrawAlreadyStarted,
        constraint = raffle.vendors_registered < raffle.vendor_count @ RaffleError::VendorLimitReached,
    )]
    pub raffle: Account<'info, Raffle>,

    #[account(
        init,
        payer = organizer,
        space = VENDOR_ACCOUNT_SIZE,
        seeds = [
            b"vendor",
            raffle.key().as_ref(),
            raffle.vendors_registered.to_le_bytes().as_ref(),
        ],
        bump,
    )]
    pub vendor: Account<'info, Vendor>,

    /// Wallet that will sign this vendor's sales
    pub authority: SystemAccount<'info>,

    #[account(mut)]
    pub organizer: Signer<'info>,

    pub system_program: Program<'info, System>,
}
