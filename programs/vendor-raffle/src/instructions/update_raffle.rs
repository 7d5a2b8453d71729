use anchor_lang::prelude::*;

use crate::{
    error::RaffleError,
    instructions::create_raffle::{validate_prizes, validate_raffle_name},
    state::{Prize, Raffle, RaffleStatus},
};

/// Event emitted when an organizer edits a raffle
#[event]
pub struct RaffleUpdated {
    pub raffle: Pubkey,
    pub name: String,
    pub draw_date: i64,
    pub prize_count: u8,
}

/// Edits the name, draw date and prize list of a raffle.
///
/// Only allowed while the raffle is Active and before any number is sold,
/// so buyers never see the prize order change under them. Number space and
/// price are fixed at creation because vendor blocks derive from them.
pub fn update_raffle(
    ctx: Context<UpdateRaffle>,
    name: String,
    draw_date: i64,
    prizes: Vec<Prize>,
) -> Result<()> {
    validate_raffle_name(&name)?;
    validate_prizes(&prizes)?;
    require!(
        draw_date > Clock::get()?.unix_timestamp,
        RaffleError::DrawDateInPast
    );

    let raffle = &mut ctx.accounts.raffle;
    raffle.name = name;
    raffle.draw_date = draw_date;
    raffle.prizes = prizes;

    emit!(RaffleUpdated {
        raffle: raffle.key(),
        name: raffle.name.clone(),
        draw_date,
        prize_count: raffle.prizes.len() as u8,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct UpdateRaffle<'info> {
    #[account(
        mut,
        has_one = organizer @ RaffleError::NotOrganizer,
        constraint = raffle.status == RaffleStatus::Active @ RaffleError::RaffleNotActive,
        constraint = raffle.total_sold == 0 @ RaffleError::RaffleHasSales,
    )]
    pub raffle: Account<'info, Raffle>,

    pub organizer: Signer<'info>,
}
