use anchor_lang::error_code;

#[error_code]
pub enum RaffleError {
    Overflow,
    RaffleNameInvalid,
    PricePerNumberTooLow,
    VendorCountInvalid,
    NumbersPerVendorInvalid,
    #[msg("Raffle number space exceeds the maximum allowed")]
    NumberSpaceTooLarge,
    #[msg("Draw date must be in the future")]
    DrawDateInPast,
    #[msg("A raffle needs between 1 and 10 prizes")]
    PrizeCountInvalid,
    #[msg("Prize name must be between 1 and 64 bytes")]
    PrizeNameInvalid,
    #[msg("Prize description exceeds 200 bytes")]
    PrizeDescriptionTooLong,
    #[msg("Prize image must be empty or an https:// or ipfs:// URI of at most 200 bytes")]
    PrizeImageInvalid,
    #[msg("Name must be 2-64 characters of letters, spaces, apostrophes, dots or dashes")]
    InvalidName,
    #[msg("Email address is not valid")]
    InvalidEmail,
    #[msg("Phone number must contain 7-15 digits")]
    InvalidPhone,
    #[msg("Vendors must provide an email address")]
    VendorEmailRequired,
    #[msg("Only the raffle organizer may perform this action")]
    NotOrganizer,
    #[msg("Only the config admin may perform this action")]
    NotAdmin,
    #[msg("Only the vendor's authority may sell its numbers")]
    NotVendorAuthority,
    #[msg("Rate limit must allow at least one sale per window of at most one day")]
    InvalidRateLimit,
    #[msg("Raffle is not active")]
    RaffleNotActive,
    #[msg("Raffle cannot be edited after numbers have been sold")]
    RaffleHasSales,
    #[msg("All vendor slots of this raffle are taken")]
    VendorLimitReached,
    #[msg("Vendor does not belong to this raffle")]
    VendorRaffleMismatch,
    #[msg("A sale must contain between 1 and 20 numbers")]
    InvalidNumberCount,
    #[msg("Number is outside the vendor's block")]
    NumberOutOfRange,
    #[msg("Number was listed twice in the same sale")]
    DuplicateNumber,
    #[msg("Number has already been sold")]
    NumberAlreadySold,
    #[msg("Too many sales for this vendor in the current window, try again later")]
    SalesRateLimited,
    #[msg("Sales are closed once a draw has started")]
    DrawAlreadyStarted,
    #[msg("No numbers have been sold for this raffle")]
    NoSoldNumbers,
    #[msg("No eligible numbers remain for another prize")]
    NoEligibleNumbers,
    #[msg("Every prize of this raffle has been drawn")]
    AllPrizesDrawn,
    #[msg("Draw session is not in the expected state")]
    InvalidDrawState,
    #[msg("The drawing delay has not elapsed yet")]
    RevealTooEarly,
    #[msg("The reveal window for this prize has passed")]
    RevealWindowMissed,
    #[msg("A winning number is already waiting to be recorded")]
    WinnerAlreadyRevealed,
    #[msg("No winning number has been revealed")]
    NoPendingWinner,
    #[msg("Buyer does not hold the winning number")]
    InvalidWinningBuyer,
    #[msg("Nothing has been drawn yet")]
    NothingDrawn,
    #[msg("Invalid SlotHashes account provided")]
    InvalidSlotHashesAccount,
}
