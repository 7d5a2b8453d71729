use anchor_lang::prelude::*;

use crate::{
    error::RaffleError,
    state::{
        DrawSession, MultipleDrawResult, Raffle, RaffleStatus, DRAW_RESULT_ACCOUNT_SIZE,
    },
};

/// Event emitted when a raffle's draw is finalized
#[event]
pub struct DrawFinalized {
    pub raffle: Pubkey,
    pub draw_result: Pubkey,
    pub total_prizes: u8,
    pub winning_numbers: Vec<u32>,
    pub drawn_at: i64,
}

/// Persists every result of the session and completes the raffle.
///
/// Can be called once at least one prize has been shown. `total_prizes`
/// is the number of prizes actually drawn, which is smaller than the
/// raffle's prize list when sold numbers ran out first.
///
/// After execution:
/// - A MultipleDrawResult PDA ["draw_result", raffle_key] holds the winners
/// - The raffle status is Completed and the session AllComplete
///
/// This is one-way; there is no way to redraw a finalized raffle.
pub fn finalize_draw(ctx: Context<FinalizeDraw>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let winners = ctx.accounts.draw_session.finish()?;
    let total_prizes = winners.len() as u8;

    let draw_result = &mut ctx.accounts.draw_result;
    draw_result.raffle = ctx.accounts.raffle.key();
    draw_result.drawn_at = now;
    draw_result.winners = winners;
    draw_result.total_prizes = total_prizes;

    ctx.accounts.raffle.status = RaffleStatus::Completed;

    emit!(DrawFinalized {
        raffle: ctx.accounts.raffle.key(),
        draw_result: draw_result.key(),
        total_prizes,
        winning_numbers: draw_result
            .winners
            .iter()
            .map(|w| w.winning_number)
            .collect(),
        drawn_at: now,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct FinalizeDraw<'info> {
    #[account(
        mut,
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

    #[account(
        init,
        payer = organizer,
        space = DRAW_RESULT_ACCOUNT_SIZE,
        seeds = [
            b"draw_result",
            raffle.key().as_ref(),
        ],
        bump,
    )]
    pub draw_result: Account<'info, MultipleDrawResult>,

    #[account(mut)]
    pub organizer: Signer<'info>,

    pub system_program: Program<'info, System>,
}
