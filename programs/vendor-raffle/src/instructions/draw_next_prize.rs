use anchor_lang::prelude::*;

use crate::{
    error::RaffleError,
    state::{DrawSession, Raffle, RaffleStatus},
};

/// Event emitted when the organizer moves on to the next prize
#[event]
pub struct NextPrizeDrawing {
    pub raffle: Pubkey,
    pub prize_position: u8,
    pub reveal_slot: u64,
}

/// Starts drawing the next prize after a result has been shown.
///
/// Allowed only while the raffle declares more prizes than were drawn and
/// at least one sold number has not won yet; otherwise the organizer can
/// only finalize.
pub fn draw_next_prize(ctx: Context<DrawNextPrize>) -> Result<()> {
    let slot = Clock::get()?.slot;
    let session = &mut ctx.accounts.draw_session;
    session.advance(&ctx.accounts.raffle, slot)?;

    emit!(NextPrizeDrawing {
        raffle: ctx.accounts.raffle.key(),
        prize_position: session.current_position(),
        reveal_slot: session.reveal_slot,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct DrawNextPrize<'info> {
    #[account(
        has_one = organizer @ RaffleError::NotOrganizer,
        constraint = raffle.status == RaffleStatus::Active @ RaffleError::RaffleNotActive,
    )]
    pub raffle: Account<'info, Raffle>,

    #[account(
        mut,
        seeds = [
            b"draw_session",
            raffle.key().as_ref(),
        ],
        bump = draw_session.bump,
    )]
    pub draw_session: Account<'info, DrawSession>,

    pub organizer: Signer<'info>,
}
