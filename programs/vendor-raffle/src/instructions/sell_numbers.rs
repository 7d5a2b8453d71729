use anchor_lang::prelude::*;

use crate::{
    error::RaffleError,
    state::{
        Buyer, Config, ContactInput, Raffle, RaffleStatus, Vendor, BUYER_ACCOUNT_SIZE,
        MAX_NUMBERS_PER_SALE,
    },
};

/// Event emitted when a vendor records a sale
#[event]
pub struct NumbersSold {
    /// The pubkey of the raffle
    pub raffle: Pubkey,
    pub vendor: Pubkey,
    pub buyer: Pubkey,
    pub numbers: Vec<u32>,
    /// Amount the buyer owes in lamports
    pub amount_due: u64,
    /// The seed that was used to create the buyer account
    pub buyer_seed: [u8; 8],
}

/// Instruction for a vendor to record the numbers a buyer purchased
///
/// # Arguments
/// * `ctx` - The context object containing all required accounts
/// * `buyer_seed` - Client chosen seed of the new buyer record
/// * `contact` - Buyer contact; the email is optional
/// * `numbers` - Numbers purchased, 1 to 20 of them
///
/// # Validations
/// 1. The raffle is Active and its draw has not started
/// 2. The signer is the vendor's authority
/// 3. Every number lies in the vendor's block, appears once, and is unsold
/// 4. The vendor is within its sales rate limit
///
/// # Implementation Notes
/// - Payment happens off-chain; only the amount due is recorded
/// - Sold numbers are marked in the raffle bitmap, which is the draw's ticket pool
pub fn sell_numbers(
    ctx: Context<SellNumbers>,
    buyer_seed: [u8; 8],
    contact: ContactInput,
    numbers: Vec<u32>,
) -> Result<()> {
    let contact = contact.validate()?;
    let now = Clock::get()?.unix_timestamp;

    let config = &ctx.accounts.config;
    let raffle = &mut ctx.accounts.raffle;
    let vendor = &mut ctx.accounts.vendor;

    vendor.register_sale(now, config.sale_window_secs, config.max_sales_per_window)?;
    apply_sale(raffle, vendor, &numbers)?;

    let amount_due = raffle
        .price_per_number
        .checked_mul(numbers.len() as u64)
        .ok_or(RaffleError::Overflow)?;

    let buyer = &mut ctx.accounts.buyer;
    buyer.raffle = raffle.key();
    buyer.vendor = vendor.key();
    buyer.contact = contact;
    buyer.numbers = numbers;
    buyer.amount_due = amount_due;
    buyer.purchased_at = now;
    buyer.seed = buyer_seed;

    emit!(NumbersSold {
        raffle: raffle.key(),
        vendor: vendor.key(),
        buyer: buyer.key(),
        numbers: buyer.numbers.clone(),
        amount_due,
        buyer_seed,
    });

    Ok(())
}

/// Checks `numbers` against the vendor's block and marks them sold.
/// Nothing is written unless every number is valid.
pub(crate) fn apply_sale(raffle: &mut Raffle, vendor: &mut Vendor, numbers: &[u32]) -> Result<()> {
    require!(
        !numbers.is_empty() && numbers.len() <= MAX_NUMBERS_PER_SALE,
        RaffleError::InvalidNumberCount
    );

    for (i, number) in numbers.iter().enumerate() {
        require!(vendor.owns_number(*number), RaffleError::NumberOutOfRange);
        require!(
            !numbers[..i].contains(number),
            RaffleError::DuplicateNumber
        );
        require!(!raffle.is_sold(*number), RaffleError::NumberAlreadySold);
    }

    for number in numbers {
        raffle.mark_sold(*number)?;
    }
    vendor.sold_count = vendor
        .sold_count
        .checked_add(numbers.len() as u32)
        .ok_or(RaffleError::Overflow)?;

    Ok(())
}

#[derive(Accounts)]
#[instruction(buyer_seed: [u8; 8])]
pub struct SellNumbers<'info> {
    /// Must be Active with no draw in progress
    #[account(
        mut,
        constraint = raffle.status == RaffleStatus::Active @ RaffleError::RaffleNotActive,
        constraint = raffle.draw_session.is_none() @ RaffleError::DrawAlreadyStarted,
    )]
    pub raffle: Account<'info, Raffle>,

    #[account(
        mut,
        has_one = raffle @ RaffleError::VendorRaffleMismatch,
        has_one = authority @ RaffleError::NotVendorAuthority,
    )]
    pub vendor: Account<'info, Vendor>,

    /// New buyer record created for this sale
    #[account(
        init,
        payer = authority,
        space = BUYER_ACCOUNT_SIZE,
        seeds = [
            b"buyer",
            raffle.key().as_ref(),
            buyer_seed.as_ref()
        ],
        bump,
    )]
    pub buyer: Account<'info, Buyer>,

    /// The vendor's wallet, paying for the buyer record
    #[account(mut)]
    pub authority: Signer<'info>,

    /// Holds the sales rate limit
    #[account(
        seeds = [b"config"],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    pub system_program: Program<'info, System>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::raffle::tests::raffle;
    use crate::state::vendor::tests::vendor;

    #[test]
    fn sale_marks_numbers_and_counts() {
        let mut raffle = raffle(2, 10, &["Car"]);
        let mut vendor = vendor(Pubkey::new_unique(), 11, 20);

        apply_sale(&mut raffle, &mut vendor, &[11, 15, 20]).unwrap();

        assert_eq!(vendor.sold_count, 3);
        assert_eq!(raffle.total_sold, 3);
        assert!(raffle.is_sold(15));
    }

    #[test]
    fn invalid_sales_write_nothing() {
        let mut raffle = raffle(2, 10, &["Car"]);
        let mut vendor = vendor(Pubkey::new_unique(), 11, 20);
        apply_sale(&mut raffle, &mut vendor, &[12]).unwrap();

        for numbers in [
            vec![],
            vec![13, 10],
            vec![13, 21],
            vec![13, 14, 13],
            vec![13, 12],
            (11..=20).chain(11..=21).collect::<Vec<_>>(),
        ] {
            assert!(apply_sale(&mut raffle, &mut vendor, &numbers).is_err());
        }

        assert_eq!(raffle.total_sold, 1);
        assert_eq!(vendor.sold_count, 1);
        assert!(!raffle.is_sold(13));
    }
}
