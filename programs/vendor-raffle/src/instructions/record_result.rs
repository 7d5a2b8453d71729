use anchor_lang::prelude::*;

use crate::{
    error::RaffleError,
    state::{Buyer, DrawSession, DrawState, Raffle, RaffleResult, Vendor},
    utils::notification,
};

/// Event emitted when a prize result is recorded and shown
#[event]
pub struct ResultRecorded {
    pub raffle: Pubkey,
    pub prize_position: u8,
    pub prize_name: String,
    pub winning_number: u32,
    pub buyer: Pubkey,
    pub vendor: Pubkey,
    pub winner_notified: bool,
    pub vendor_notified: bool,
    /// True when no further prize can be drawn
    pub all_complete: bool,
}

/// Records the revealed winning number against the buyer that holds it.
///
/// The caller passes the buyer account containing the pending number and the
/// vendor that sold it. The result snapshots the buyer's contact and the
/// prize metadata of the current position, then the winner and vendor
/// notifications are dispatched without waiting on their delivery.
///
/// After execution the session shows the result, or completes when no
/// prize or eligible number remains. Nothing is persisted beyond the session
/// until `finalize_draw`.
pub fn record_result(ctx: Context<RecordResult>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let raffle = &ctx.accounts.raffle;
    let buyer = &ctx.accounts.buyer;
    let vendor = &ctx.accounts.vendor;
    let session = &mut ctx.accounts.draw_session;

    let winning_number = session.pending_number.ok_or(RaffleError::NoPendingWinner)?;
    buyer.holds(winning_number, vendor.key())?;

    let position = session.current_position();
    let mut result = RaffleResult {
        prize_position: position,
        prize_name: raffle.prize_name(position),
        winning_number,
        vendor: vendor.key(),
        buyer: buyer.key(),
        buyer_name: buyer.contact.name.clone(),
        buyer_email: buyer.contact.email.clone(),
        buyer_phone: buyer.contact.phone.clone(),
        drawn_at: now,
        winner_notified: false,
        vendor_notified: false,
    };

    notification::dispatch(
        raffle.key(),
        raffle,
        buyer.key(),
        buyer,
        vendor.key(),
        vendor,
        &mut result,
    );

    let event = ResultRecorded {
        raffle: raffle.key(),
        prize_position: position,
        prize_name: result.prize_name.clone(),
        winning_number,
        buyer: result.buyer,
        vendor: result.vendor,
        winner_notified: result.winner_notified,
        vendor_notified: result.vendor_notified,
        all_complete: false,
    };

    session.record(raffle, result)?;

    let all_complete = session.state == DrawState::AllComplete;
    if all_complete {
        msg!("No further prize can be drawn, the draw is ready to finalize");
    }

    emit!(ResultRecorded {
        all_complete,
        ..event
    });

    Ok(())
}

#[derive(Accounts)]
pub struct RecordResult<'info> {
    pub raffle: Account<'info, Raffle>,

    #[account(
        mut,
        seeds = [
            b"draw_session",
            raffle.key().as_ref(),
        ],
        bump = draw_session.bump,
        constraint = draw_session.pending_number.is_some() @ RaffleError::NoPendingWinner,
    )]
    pub draw_session: Account<'info, DrawSession>,

    /// The buyer holding the winning number
    #[account(
        has_one = raffle @ RaffleError::InvalidWinningBuyer,
        has_one = vendor @ RaffleError::InvalidWinningBuyer,
    )]
    pub buyer: Account<'info, Buyer>,

    /// The vendor who sold the winning number
    #[account(has_one = raffle @ RaffleError::VendorRaffleMismatch)]
    pub vendor: Account<'info, Vendor>,
}
