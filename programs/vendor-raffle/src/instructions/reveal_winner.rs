use anchor_lang::prelude::*;

use crate::{
    error::RaffleError,
    state::{DrawSession, DrawState, Raffle},
    utils::randomness,
};

/// Event emitted when the winning number of a prize is revealed
#[event]
pub struct WinnerRevealed {
    pub raffle: Pubkey,
    pub prize_position: u8,
    pub winning_number: u32,
}

/// Event emitted when a missed reveal window restarts the drawing delay
#[event]
pub struct RevealRearmed {
    pub raffle: Pubkey,
    pub prize_position: u8,
    pub reveal_slot: u64,
}

/// Reveals the winning number of the prize currently being drawn.
///
/// Anyone may crank this from `reveal_slot` up to `REVEAL_WINDOW_SLOTS`
/// later; the delay plays the drawing animation. A call after the window
/// closes only restarts the delay, so the reveal cannot be held back
/// indefinitely while waiting for a favourable slot.
///
/// The slot hash is unknown when the draw starts, but not during the window:
/// a caller can still simulate the draw and pick one of the window's slots.
/// Raffles that need stronger guarantees should use an oracle-backed VRF.
///
/// The randomness is generated with these steps:
/// 1. Extract entropy from the SlotHashes sysvar
/// 2. Mix it with the current timestamp and the prize position
/// 3. Map the result onto the eligible numbers without bias
///
/// Only sold numbers that have not won in this session are eligible, so a
/// number can never take two prizes.
///
/// # Errors
/// - `InvalidDrawState` if no prize is being drawn
/// - `WinnerAlreadyRevealed` if the revealed number still awaits `record_result`
/// - `RevealTooEarly` if the drawing delay has not elapsed
/// - `NoEligibleNumbers` if every sold number has already won
/// - `InvalidSlotHashesAccount` if the provided SlotHashes account is invalid
///
/// A call after the reveal window re-arms the delay and succeeds without drawing.
pub fn reveal_winner(ctx: Context<RevealWinner>) -> Result<()> {
    let clock = Clock::get()?;
    let session = &mut ctx.accounts.draw_session;
    let position = session.current_position();

    if session.rearm_if_expired(clock.slot)? {
        msg!(
            "Reveal window for prize #{} missed, next reveal at slot {}",
            position,
            session.reveal_slot
        );
        emit!(RevealRearmed {
            raffle: ctx.accounts.raffle.key(),
            prize_position: position,
            reveal_slot: session.reveal_slot,
        });
        return Ok(());
    }

    let random = randomness::draw_entropy(
        &ctx.accounts.recent_slothashes.to_account_info(),
        clock.unix_timestamp,
        position as u64,
    )?;
    let winning_number = session.reveal(&ctx.accounts.raffle, clock.slot, random)?;

    msg!("Prize #{} goes to number {}", position, winning_number);

    emit!(WinnerRevealed {
        raffle: ctx.accounts.raffle.key(),
        prize_position: position,
        winning_number,
    });

    Ok(())
}

/// Accounts required for the reveal_winner instruction
#[derive(Accounts)]
pub struct RevealWinner<'info> {
    pub raffle: Account<'info, Raffle>,

    #[account(
        mut,
        seeds = [
            b"draw_session",
            raffle.key().as_ref(),
        ],
        bump = draw_session.bump,
        constraint = draw_session.state == DrawState::Drawing @ RaffleError::InvalidDrawState,
    )]
    pub draw_session: Account<'info, DrawSession>,

    /// The SlotHashes sysvar contains the most recent block hashes
    /// This is used as a source of randomness
    /// CHECK: Using UncheckedAccount because we manually validate the correct sysvar.
    /// This is needed because Anchor will always throw an error on the SlotHashes sysvar.
    pub recent_slothashes: UncheckedAccount<'info>,
}
