use anchor_lang::prelude::*;

use crate::{
    error::RaffleError,
    state::{DrawSession, DrawState, Raffle, RaffleStatus, DRAW_SESSION_ACCOUNT_SIZE},
};

/// Event emitted when the organizer starts the draw
#[event]
pub struct DrawStarted {
    pub raffle: Pubkey,
    pub draw_session: Pubkey,
    pub total_sold: u32,
    pub planned_prizes: u8,
    /// First slot at which the first prize can be revealed
    pub reveal_slot: u64,
}

/// Opens the raffle's one and only draw session and starts drawing the first prize.
///
/// Fails with `NoSoldNumbers` when nothing was sold; the transaction then
/// aborts and neither the raffle nor any session account is written.
/// From here on sales and vendor registration are closed.
pub fn start_draw(ctx: Context<StartDraw>) -> Result<()> {
    let clock = Clock::get()?;
    let raffle = &mut ctx.accounts.raffle;
    let session = &mut ctx.accounts.draw_session;

    session.raffle = raffle.key();
    session.state = DrawState::NotStarted;
    session.winners = Vec::new();
    session.started_at = clock.unix_timestamp;
    session.bump = ctx.bumps.draw_session;
    session.begin(raffle, clock.slot)?;

    raffle.draw_session = Some(session.key());

    emit!(DrawStarted {
        raffle: raffle.key(),
        draw_session: session.key(),
        total_sold: raffle.total_sold,
        planned_prizes: session.planned_prizes,
        reveal_slot: session.reveal_slot,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct StartDraw<'info> {
    #[account(
        mut,
        has_one = organizer @ RaffleError::NotOrganizer,
        constraint = raffle.status == RaffleStatus::Active @ RaffleError::RaffleNotActive,
        constraint = raffle.total_sold > 0 @ RaffleError::NoSoldNumbers,
    )]
    pub raffle: Account<'info, Raffle>,

    /// Seeded by the raffle alone, so a raffle can only ever be drawn once
    #[account(
        init,
        payer = organizer,
        space = DRAW_SESSION_ACCOUNT_SIZE,
        seeds = [
            b"draw_session",
            raffle.key().as_ref(),
        ],
        bump,
    )]
    pub draw_session: Account<'info, DrawSession>,

    #[account(mut)]
    pub organizer: Signer<'info>,

    pub system_program: Program<'info, System>,
}
