use crate::{
    error::RaffleError,
    state::{
        Config, Prize, Raffle, RaffleStatus, MAX_PRIZES, MAX_PRIZE_DESCRIPTION_LEN,
        MAX_PRIZE_IMAGE_LEN, MAX_PRIZE_NAME_LEN, MAX_RAFFLE_NAME_LEN, MAX_TICKET_NUMBERS,
        RAFFLE_ACCOUNT_SIZE,
    },
};
use anchor_lang::prelude::*;

const MIN_RAFFLE_NAME_LEN: usize = 3;

// Valid prize image prefixes
const VALID_URI_PREFIXES: [&str; 2] = ["https://", "ipfs://"];

/// Event emitted when a raffle is created
#[event]
pub struct RaffleCreated {
    /// The pubkey of the created raffle
    pub raffle: Pubkey,
    /// The organizer who owns the raffle
    pub organizer: Pubkey,
    pub name: String,
    /// Price per number in lamports
    pub price_per_number: u64,
    pub vendor_count: u16,
    pub numbers_per_vendor: u16,
    pub prize_count: u8,
    /// When the winners will be drawn
    pub draw_date: i64,
}

/// Instruction to create a new raffle
///
/// # Arguments
/// * `ctx` - The context object containing all required accounts
/// * `name` - Display name, 3-64 bytes
/// * `price_per_number` - Price of one number in lamports (must be > 0)
/// * `vendor_count` - How many vendors will sell numbers
/// * `numbers_per_vendor` - Size of each vendor's sequential number block
/// * `draw_date` - Unix timestamp of the planned draw (must be in the future)
/// * `prizes` - Prize tiers in draw order, first prize first
///
/// # Validations
/// 1. Name and prizes are within their size limits
/// 2. The number space `vendor_count * numbers_per_vendor` fits the sold bitmap
/// 3. The draw date lies in the future
///
/// # Implementation Notes
/// - Any signer may organize a raffle; it is recorded as the organizer
/// - The raffle PDA is derived from the config's raffle counter
/// - Initializes the raffle in Active state with an empty sold bitmap
pub fn create_raffle(
    ctx: Context<CreateRaffle>,
    name: String,
    price_per_number: u64,
    vendor_count: u16,
    numbers_per_vendor: u16,
    draw_date: i64,
    prizes: Vec<Prize>,
) -> Result<()> {
    let current_time = Clock::get()?.unix_timestamp;

    validate_raffle_name(&name)?;
    validate_prizes(&prizes)?;
    require!(price_per_number > 0, RaffleError::PricePerNumberTooLow);
    require!(vendor_count > 0, RaffleError::VendorCountInvalid);
    require!(numbers_per_vendor > 0, RaffleError::NumbersPerVendorInvalid);

    let total_numbers = (vendor_count as u32)
        .checked_mul(numbers_per_vendor as u32)
        .ok_or(RaffleError::Overflow)?;
    require!(
        total_numbers <= MAX_TICKET_NUMBERS,
        RaffleError::NumberSpaceTooLarge
    );
    require!(draw_date > current_time, RaffleError::DrawDateInPast);

    let raffle = &mut ctx.accounts.raffle;
    raffle.organizer = ctx.accounts.organizer.key();
    raffle.name = name;
    raffle.price_per_number = price_per_number;
    raffle.vendor_count = vendor_count;
    raffle.numbers_per_vendor = numbers_per_vendor;
    raffle.draw_date = draw_date;
    raffle.prizes = prizes;

    // Set default values
    raffle.status = RaffleStatus::Active;
    raffle.vendors_registered = 0;
    raffle.total_sold = 0;
    raffle.creation_time = current_time;
    raffle.draw_session = None;
    raffle.sold_bitmap = vec![0; ((total_numbers + 7) / 8) as usize];
    raffle.bump = ctx.bumps.raffle;

    // Increment the raffle counter
    ctx.accounts.config.raffle_counter = ctx
        .accounts
        .config
        .raffle_counter
        .checked_add(1)
        .ok_or(RaffleError::Overflow)?;

    emit!(RaffleCreated {
        raffle: raffle.key(),
        organizer: raffle.organizer,
        name: raffle.name.clone(),
        price_per_number,
        vendor_count,
        numbers_per_vendor,
        prize_count: raffle.prizes.len() as u8,
        draw_date,
    });

    Ok(())
}

pub(crate) fn validate_raffle_name(name: &str) -> Result<()> {
    require!(
        name.trim().len() >= MIN_RAFFLE_NAME_LEN && name.len() <= MAX_RAFFLE_NAME_LEN,
        RaffleError::RaffleNameInvalid
    );
    Ok(())
}

pub(crate) fn validate_prizes(prizes: &[Prize]) -> Result<()> {
    require!(
        !prizes.is_empty() && prizes.len() <= MAX_PRIZES,
        RaffleError::PrizeCountInvalid
    );

    for prize in prizes {
        require!(
            !prize.name.trim().is_empty() && prize.name.len() <= MAX_PRIZE_NAME_LEN,
            RaffleError::PrizeNameInvalid
        );
        require!(
            prize.description.len() <= MAX_PRIZE_DESCRIPTION_LEN,
            RaffleError::PrizeDescriptionTooLong
        );
        require!(
            prize.image_uri.len() <= MAX_PRIZE_IMAGE_LEN
                && (prize.image_uri.is_empty()
                    || VALID_URI_PREFIXES
                        .iter()
                        .any(|prefix| prize.image_uri.starts_with(prefix))),
            RaffleError::PrizeImageInvalid
        );
    }

    Ok(())
}

#[derive(Accounts)]
pub struct CreateRaffle<'info> {
    #[account(
        init,
        payer = organizer,
        space = RAFFLE_ACCOUNT_SIZE,
        seeds = [
            b"raffle",
            config.raffle_counter.to_le_bytes().as_ref(),
        ],
        bump
    )]
    pub raffle: Account<'info, Raffle>,

    #[account(mut)]
    pub organizer: Signer<'info>,

    /// The config account holding the raffle counter
    #[account(
        mut,
        seeds = [b"config"],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    pub system_program: Program<'info, System>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prize(name: &str, image_uri: &str) -> Prize {
        Prize {
            name: name.to_string(),
            description: "Brand new".to_string(),
            image_uri: image_uri.to_string(),
        }
    }

    #[test]
    fn raffle_names() {
        assert!(validate_raffle_name("Rifa Navidad").is_ok());
        assert!(validate_raffle_name("  a ").is_err());
        assert!(validate_raffle_name(&"r".repeat(65)).is_err());
    }

    #[test]
    fn prize_lists() {
        assert!(validate_prizes(&[prize("Car", ""), prize("TV", "https://cdn.example/tv.png")]).is_ok());
        assert!(validate_prizes(&[prize("Bike", "ipfs://bafy")]).is_ok());
        assert!(validate_prizes(&[]).is_err());
        assert!(validate_prizes(&vec![prize("Car", ""); 11]).is_err());
        assert!(validate_prizes(&[prize("  ", "")]).is_err());
        assert!(validate_prizes(&[prize("Car", "http://insecure/car.png")]).is_err());

        let mut long = prize("Car", "");
        long.description = "d".repeat(201);
        assert!(validate_prizes(&[long]).is_err());
    }
}
