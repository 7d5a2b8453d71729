use anchor_lang::prelude::*;

use crate::{
    error::RaffleError,
    state::{ContactInput, Raffle, Vendor},
};

/// Event emitted when a vendor's contact details change
#[event]
pub struct VendorContactUpdated {
    pub raffle: Pubkey,
    pub vendor: Pubkey,
}

/// Replaces a vendor's contact details. Organizer only.
/// Results already drawn keep the vendor key, notifications use the new email.
pub fn update_vendor_contact(ctx: Context<UpdateVendorContact>, contact: ContactInput) -> Result<()> {
    ctx.accounts.vendor.contact = contact.validate_with_email()?;

    emit!(VendorContactUpdated {
        raffle: ctx.accounts.raffle.key(),
        vendor: ctx.accounts.vendor.key(),
    });

    Ok(())
}

#[derive(Accounts)]
pub struct UpdateVendorContact<'info> {
    #[account(has_one = organizer @ RaffleError::NotOrganizer)]
    pub raffle: Account<'info, Raffle>,

    #[account(
        mut,
        has_one = raffle @ RaffleError::VendorRaffleMismatch,
    )]
    pub vendor: Account<'info, Vendor>,

    pub organizer: Signer<'info>,
}
