use anchor_lang::prelude::*;

use crate::error::RaffleError;
use crate::state::{Raffle, MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_PHONE_LEN, MAX_PRIZES, MAX_PRIZE_NAME_LEN};
use crate::utils::draw;

/// Slots between starting a prize draw and revealing its winner (~2s).
pub const REVEAL_DELAY_SLOTS: u64 = 5;
/// Slots after `reveal_slot` during which the reveal is accepted.
pub const REVEAL_WINDOW_SLOTS: u64 = 10;

// 1 prize_position + 4 + 64 prize_name + 4 winning_number + 32 vendor + 32 buyer
// + 4 + 64 buyer_name + 4 + 100 buyer_email + 4 + 20 buyer_phone + 8 drawn_at
// + 1 winner_notified + 1 vendor_notified
pub const RAFFLE_RESULT_SIZE: usize = 1
    + 4
    + MAX_PRIZE_NAME_LEN
    + 4
    + 32
    + 32
    + 4
    + MAX_NAME_LEN
    + 4
    + MAX_EMAIL_LEN
    + 4
    + MAX_PHONE_LEN
    + 8
    + 1
    + 1;

// 8 discriminator + 32 raffle + 1 state + 1 planned_prizes
// + 8 reveal_slot + 5 pending_number: Option<u32> + 4 + 10 * RAFFLE_RESULT_SIZE winners
// + 8 started_at + 1 bump
pub const DRAW_SESSION_ACCOUNT_SIZE: usize =
    8 + 32 + 1 + 1 + 8 + 5 + 4 + MAX_PRIZES * RAFFLE_RESULT_SIZE + 8 + 1;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq)]
pub enum DrawState {
    NotStarted = 0,
    Drawing = 1,
    ResultShown = 2,
    AllComplete = 3,
}

/// One resolved prize. The buyer contact is a snapshot taken at draw time.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub struct RaffleResult {
    pub prize_position: u8,
    pub prize_name: String,
    pub winning_number: u32,
    pub vendor: Pubkey,
    pub buyer: Pubkey,
    pub buyer_name: String,
    pub buyer_email: String,
    pub buyer_phone: String,
    pub drawn_at: i64,
    pub winner_notified: bool,
    pub vendor_notified: bool,
}

#[account]
pub struct DrawSession {
    pub raffle: Pubkey,
    pub state: DrawState,
    /// Prizes the raffle declared when the session started.
    pub planned_prizes: u8,
    pub reveal_slot: u64,
    /// Number picked by the last reveal, waiting for its buyer to be recorded.
    pub pending_number: Option<u32>,
    pub winners: Vec<RaffleResult>,
    pub started_at: i64,
    pub bump: u8,
}

impl DrawSession {
    /// 1-based position of the prize currently being drawn.
    pub fn current_position(&self) -> u8 {
        self.winners.len() as u8 + 1
    }

    pub fn won_numbers(&self) -> Vec<u32> {
        self.winners.iter().map(|w| w.winning_number).collect()
    }

    /// Moves a fresh session into `Drawing` for the first prize.
    pub fn begin(&mut self, raffle: &Raffle, slot: u64) -> Result<()> {
        require!(
            self.state == DrawState::NotStarted,
            RaffleError::InvalidDrawState
        );
        require!(raffle.total_sold > 0, RaffleError::NoSoldNumbers);
        require!(raffle.prize_count() > 0, RaffleError::PrizeCountInvalid);

        self.planned_prizes = raffle.prize_count();
        self.pending_number = None;
        self.reveal_slot = slot
            .checked_add(REVEAL_DELAY_SLOTS)
            .ok_or(RaffleError::Overflow)?;
        self.state = DrawState::Drawing;
        Ok(())
    }

    /// Last slot at which the current prize may be revealed.
    pub fn reveal_deadline(&self) -> u64 {
        self.reveal_slot.saturating_add(REVEAL_WINDOW_SLOTS)
    }

    /// Restarts the drawing delay when the reveal window was missed.
    /// Returns whether the session was re-armed.
    pub fn rearm_if_expired(&mut self, slot: u64) -> Result<bool> {
        if self.state != DrawState::Drawing
            || self.pending_number.is_some()
            || slot <= self.reveal_deadline()
        {
            return Ok(false);
        }
        self.reveal_slot = slot
            .checked_add(REVEAL_DELAY_SLOTS)
            .ok_or(RaffleError::Overflow)?;
        Ok(true)
    }

    /// Selects the winner of the current prize inside its reveal window.
    pub fn reveal(&mut self, raffle: &Raffle, slot: u64, random: u64) -> Result<u32> {
        require!(self.state == DrawState::Drawing, RaffleError::InvalidDrawState);
        require!(self.pending_number.is_none(), RaffleError::WinnerAlreadyRevealed);
        require!(slot >= self.reveal_slot, RaffleError::RevealTooEarly);
        require!(slot <= self.reveal_deadline(), RaffleError::RevealWindowMissed);

        let winner = draw::select_winner(&raffle.sold_bitmap, &self.won_numbers(), random)?;
        self.pending_number = Some(winner);
        Ok(winner)
    }

    /// Appends the result of the pending number and shows it. The session
    /// completes on its own when no prize or no eligible number is left.
    pub fn record(&mut self, raffle: &Raffle, result: RaffleResult) -> Result<()> {
        require!(self.state == DrawState::Drawing, RaffleError::InvalidDrawState);
        let pending = self.pending_number.ok_or(RaffleError::NoPendingWinner)?;
        require!(
            result.winning_number == pending && result.prize_position == self.current_position(),
            RaffleError::InvalidWinningBuyer
        );

        self.winners.push(result);
        self.pending_number = None;
        self.state = if self.can_draw_more(raffle) {
            DrawState::ResultShown
        } else {
            DrawState::AllComplete
        };
        Ok(())
    }

    pub fn can_draw_more(&self, raffle: &Raffle) -> bool {
        self.winners.len() < self.planned_prizes as usize
            && draw::eligible_count(&raffle.sold_bitmap, &self.won_numbers()) > 0
    }

    /// `ResultShown -> Drawing` for the next prize.
    pub fn advance(&mut self, raffle: &Raffle, slot: u64) -> Result<()> {
        require!(
            self.state == DrawState::ResultShown,
            RaffleError::InvalidDrawState
        );
        require!(
            self.winners.len() < self.planned_prizes as usize,
            RaffleError::AllPrizesDrawn
        );
        require!(
            draw::eligible_count(&raffle.sold_bitmap, &self.won_numbers()) > 0,
            RaffleError::NoEligibleNumbers
        );

        self.reveal_slot = slot
            .checked_add(REVEAL_DELAY_SLOTS)
            .ok_or(RaffleError::Overflow)?;
        self.state = DrawState::Drawing;
        Ok(())
    }

    /// Closes the session for good and returns the results to persist.
    pub fn finish(&mut self) -> Result<Vec<RaffleResult>> {
        require!(
            matches!(self.state, DrawState::ResultShown | DrawState::AllComplete),
            RaffleError::InvalidDrawState
        );
        require!(!self.winners.is_empty(), RaffleError::NothingDrawn);

        self.state = DrawState::AllComplete;
        Ok(self.winners.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RaffleError;
    use crate::state::raffle::tests::raffle;
    use anchor_lang::error::Error;
    use proptest::collection::{btree_set, vec};
    use proptest::prelude::*;

    fn error_code(err: Error) -> u32 {
        match err {
            Error::AnchorError(e) => e.error_code_number,
            Error::ProgramError(e) => panic!("unexpected program error {e:?}"),
        }
    }

    fn assert_fails(result: Result<impl std::fmt::Debug>, expected: RaffleError) {
        let err = result.expect_err("expected an error");
        assert_eq!(error_code(err), u32::from(expected));
    }

    fn session() -> DrawSession {
        DrawSession {
            raffle: Pubkey::new_unique(),
            state: DrawState::NotStarted,
            planned_prizes: 0,
            reveal_slot: 0,
            pending_number: None,
            winners: Vec::new(),
            started_at: 0,
            bump: 253,
        }
    }

    fn result_for(session: &DrawSession, raffle: &Raffle, number: u32) -> RaffleResult {
        let position = session.current_position();
        RaffleResult {
            prize_position: position,
            prize_name: raffle.prize_name(position),
            winning_number: number,
            vendor: Pubkey::new_unique(),
            buyer: Pubkey::new_unique(),
            buyer_name: "Luis Gomez".to_string(),
            buyer_email: String::new(),
            buyer_phone: "3001234567".to_string(),
            drawn_at: 1_700_000_000,
            winner_notified: false,
            vendor_notified: true,
        }
    }

    /// Reveals and records one prize, returning the winning number.
    fn draw_one(session: &mut DrawSession, raffle: &Raffle, slot: u64, random: u64) -> Result<u32> {
        let number = session.reveal(raffle, slot, random)?;
        let result = result_for(session, raffle, number);
        session.record(raffle, result)?;
        Ok(number)
    }

    #[test]
    fn empty_pool_cannot_start() {
        let raffle = raffle(1, 10, &["Car"]);
        let mut session = session();

        assert_fails(session.begin(&raffle, 100), RaffleError::NoSoldNumbers);
        assert_eq!(session.state, DrawState::NotStarted);
        assert!(session.winners.is_empty());
        assert_eq!(raffle.status, crate::state::RaffleStatus::Active);
    }

    #[test]
    fn full_session_fits_its_account() {
        let mut session = session();
        session.pending_number = Some(u32::MAX);
        session.winners = (1..=MAX_PRIZES as u8)
            .map(|position| RaffleResult {
                prize_position: position,
                prize_name: "p".repeat(MAX_PRIZE_NAME_LEN),
                winning_number: position as u32,
                vendor: Pubkey::new_unique(),
                buyer: Pubkey::new_unique(),
                buyer_name: "n".repeat(MAX_NAME_LEN),
                buyer_email: "e".repeat(MAX_EMAIL_LEN),
                buyer_phone: "1".repeat(MAX_PHONE_LEN),
                drawn_at: i64::MAX,
                winner_notified: true,
                vendor_notified: true,
            })
            .collect();

        let mut data = Vec::new();
        session.try_serialize(&mut data).unwrap();
        assert_eq!(data.len(), DRAW_SESSION_ACCOUNT_SIZE);
    }

    #[test]
    fn raffle_without_prizes_cannot_start() {
        let mut raffle = raffle(1, 10, &[]);
        raffle.mark_sold(4).unwrap();
        let mut session = session();

        assert_fails(session.begin(&raffle, 100), RaffleError::PrizeCountInvalid);
        assert_eq!(session.state, DrawState::NotStarted);
        assert_eq!(session.planned_prizes, 0);
    }

    #[test]
    fn reveal_waits_for_the_drawing_delay() {
        let mut raffle = raffle(1, 10, &["Car"]);
        raffle.mark_sold(4).unwrap();
        let mut session = session();
        session.begin(&raffle, 100).unwrap();

        assert_fails(session.reveal(&raffle, 104, 1), RaffleError::RevealTooEarly);
        assert_eq!(session.reveal(&raffle, 105, 1).unwrap(), 4);
        assert_fails(session.reveal(&raffle, 106, 1), RaffleError::WinnerAlreadyRevealed);
    }

    #[test]
    fn late_reveal_is_rejected_and_rearmed() {
        let mut raffle = raffle(1, 10, &["Car"]);
        raffle.mark_sold(4).unwrap();
        let mut session = session();
        session.begin(&raffle, 100).unwrap();
        assert_eq!(session.reveal_deadline(), 115);

        assert!(!session.rearm_if_expired(115).unwrap());
        assert_fails(session.reveal(&raffle, 116, 1), RaffleError::RevealWindowMissed);
        assert!(session.pending_number.is_none());

        assert!(session.rearm_if_expired(116).unwrap());
        assert_eq!(session.reveal_slot, 121);
        assert_fails(session.reveal(&raffle, 120, 1), RaffleError::RevealTooEarly);
        assert_eq!(session.reveal(&raffle, 121, 1).unwrap(), 4);

        // Nothing to re-arm once a number is waiting to be recorded
        assert!(!session.rearm_if_expired(500).unwrap());
    }

    #[test]
    fn record_requires_the_pending_number() {
        let mut raffle = raffle(1, 10, &["Car"]);
        raffle.mark_sold(4).unwrap();
        raffle.mark_sold(5).unwrap();
        let mut session = session();
        session.begin(&raffle, 0).unwrap();

        let early = result_for(&session, &raffle, 4);
        assert_fails(session.record(&raffle, early), RaffleError::NoPendingWinner);

        let number = session.reveal(&raffle, REVEAL_DELAY_SLOTS, 0).unwrap();
        let other = if number == 4 { 5 } else { 4 };
        let wrong = result_for(&session, &raffle, other);
        assert_fails(session.record(&raffle, wrong), RaffleError::InvalidWinningBuyer);
    }

    #[test]
    fn two_prizes_from_three_numbers() {
        let mut raffle = raffle(1, 10, &["P1", "P2"]);
        for n in [3, 7, 9] {
            raffle.mark_sold(n).unwrap();
        }
        let mut session = session();
        session.begin(&raffle, 0).unwrap();

        let first = draw_one(&mut session, &raffle, 10, 0xdead_beef).unwrap();
        assert!([3, 7, 9].contains(&first));
        assert_eq!(session.state, DrawState::ResultShown);

        session.advance(&raffle, 20).unwrap();
        let second = draw_one(&mut session, &raffle, 30, 0x1234_5678).unwrap();
        assert!([3, 7, 9].contains(&second));
        assert_ne!(first, second);
        assert_eq!(session.state, DrawState::AllComplete);
        assert_fails(session.advance(&raffle, 40), RaffleError::InvalidDrawState);

        let winners = session.finish().unwrap();
        assert_eq!(winners.len(), 2);
        assert_eq!(winners[0].prize_position, 1);
        assert_eq!(winners[0].prize_name, "P1");
        assert_eq!(winners[1].prize_position, 2);
        assert_eq!(winners[1].prize_name, "P2");
    }

    #[test]
    fn exhausted_pool_still_finalizes() {
        let mut raffle = raffle(1, 10, &["P1", "P2", "P3"]);
        raffle.mark_sold(6).unwrap();
        let mut session = session();
        session.begin(&raffle, 0).unwrap();

        assert_eq!(draw_one(&mut session, &raffle, 10, 99).unwrap(), 6);
        assert_eq!(session.state, DrawState::AllComplete);

        let winners = session.finish().unwrap();
        assert_eq!(winners.len(), 1);
    }

    #[test]
    fn advance_stops_when_numbers_run_out() {
        let mut raffle = raffle(1, 10, &["P1", "P2", "P3"]);
        raffle.mark_sold(6).unwrap();
        let mut session = session();
        session.begin(&raffle, 0).unwrap();
        draw_one(&mut session, &raffle, 10, 99).unwrap();

        // Force the organizer-facing state to check the guard itself
        session.state = DrawState::ResultShown;
        assert_fails(session.advance(&raffle, 20), RaffleError::NoEligibleNumbers);
    }

    #[test]
    fn advance_stops_after_the_last_prize() {
        let mut raffle = raffle(1, 10, &["P1"]);
        raffle.mark_sold(1).unwrap();
        raffle.mark_sold(2).unwrap();
        let mut session = session();
        session.begin(&raffle, 0).unwrap();
        draw_one(&mut session, &raffle, 10, 5).unwrap();

        session.state = DrawState::ResultShown;
        assert_fails(session.advance(&raffle, 20), RaffleError::AllPrizesDrawn);
    }

    #[test]
    fn finish_is_one_way() {
        let mut raffle = raffle(1, 10, &["P1", "P2"]);
        raffle.mark_sold(1).unwrap();
        raffle.mark_sold(2).unwrap();
        let mut session = session();

        assert_fails(session.finish(), RaffleError::InvalidDrawState);
        session.begin(&raffle, 0).unwrap();
        assert_fails(session.finish(), RaffleError::InvalidDrawState);

        draw_one(&mut session, &raffle, 10, 5).unwrap();
        assert_eq!(session.finish().unwrap().len(), 1);
        assert_fails(session.advance(&raffle, 20), RaffleError::InvalidDrawState);
        assert_fails(session.reveal(&raffle, 30, 1), RaffleError::InvalidDrawState);
    }

    proptest! {
        #[test]
        fn sessions_yield_unique_numbers_and_sequential_positions(
            sold in btree_set(1u32..=200, 1..30),
            prize_count in 1usize..=10,
            randoms in vec(any::<u64>(), 10),
        ) {
            let names: Vec<String> = (1..=prize_count).map(|i| format!("P{i}")).collect();
            let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
            let mut raffle = raffle(2, 100, &name_refs);
            for n in &sold {
                raffle.mark_sold(*n).unwrap();
            }

            let mut session = session();
            session.begin(&raffle, 0).unwrap();
            let mut slot = 0;
            for random in randoms {
                slot += REVEAL_DELAY_SLOTS;
                draw_one(&mut session, &raffle, slot, random).unwrap();
                if session.state == DrawState::AllComplete {
                    break;
                }
                session.advance(&raffle, slot).unwrap();
            }

            let winners = session.finish().unwrap();
            prop_assert_eq!(winners.len(), prize_count.min(sold.len()));

            let mut numbers: Vec<u32> = winners.iter().map(|w| w.winning_number).collect();
            prop_assert!(numbers.iter().all(|n| sold.contains(n)));
            numbers.sort_unstable();
            numbers.dedup();
            prop_assert_eq!(numbers.len(), winners.len());

            for (i, winner) in winners.iter().enumerate() {
                prop_assert_eq!(winner.prize_position as usize, i + 1);
            }
        }
    }
}
