//! Winner and vendor notifications.
//!
//! The program cannot send email. Each notification is emitted as an event
//! carrying the recipient, subject and rendered HTML body; an off-chain
//! mailer consumes the event log and delivers them.
//!
//! Delivery is best-effort and never blocks the draw: a notification that
//! cannot be built (the buyer left no email) is logged and reported through
//! the `winner_notified` / `vendor_notified` flags of the result. Nothing is
//! retried.

use anchor_lang::prelude::*;

use crate::state::{Buyer, Raffle, RaffleResult, Vendor};

/// Emitted for the buyer holding a winning number
#[event]
pub struct WinnerNotification {
    pub raffle: Pubkey,
    pub buyer: Pubkey,
    pub prize_position: u8,
    pub winning_number: u32,
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

/// Emitted for the vendor who sold a winning number
#[event]
pub struct VendorNotification {
    pub raffle: Pubkey,
    pub vendor: Pubkey,
    pub prize_position: u8,
    pub winning_number: u32,
    pub vendor_sold_count: u32,
    pub vendor_sales_amount: u64,
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

pub fn winner_subject(raffle_name: &str, position: u8) -> String {
    format!("{}: you won prize #{}!", raffle_name, position)
}

pub fn vendor_subject(raffle_name: &str, position: u8) -> String {
    format!("{}: a number you sold won prize #{}", raffle_name, position)
}

pub fn winner_body(raffle_name: &str, result: &RaffleResult) -> String {
    format!(
        "<h2>Congratulations, {}!</h2>\
         <p>Your number <strong>{}</strong> won prize #{} ({}) in the raffle <strong>{}</strong>.</p>\
         <p>The organizer will contact you to arrange delivery.</p>",
        result.buyer_name,
        result.winning_number,
        result.prize_position,
        result.prize_name,
        raffle_name,
    )
}

pub fn vendor_body(
    raffle_name: &str,
    result: &RaffleResult,
    vendor_name: &str,
    sold_count: u32,
    sales_amount: u64,
) -> String {
    format!(
        "<h2>Hello {},</h2>\
         <p>Number <strong>{}</strong>, sold by you to {}, won prize #{} ({}) in the raffle <strong>{}</strong>.</p>\
         <p>Your sales for this raffle: {} numbers, {} lamports.</p>",
        vendor_name,
        result.winning_number,
        result.buyer_name,
        result.prize_position,
        result.prize_name,
        raffle_name,
        sold_count,
        sales_amount,
    )
}

/// Emits the notifications for `result` and flags which ones went out.
pub fn dispatch(
    raffle_key: Pubkey,
    raffle: &Raffle,
    buyer_key: Pubkey,
    buyer: &Buyer,
    vendor_key: Pubkey,
    vendor: &Vendor,
    result: &mut RaffleResult,
) {
    match buyer.contact.email() {
        Some(email) => {
            emit!(WinnerNotification {
                raffle: raffle_key,
                buyer: buyer_key,
                prize_position: result.prize_position,
                winning_number: result.winning_number,
                to: email.to_string(),
                subject: winner_subject(&raffle.name, result.prize_position),
                html_body: winner_body(&raffle.name, result),
            });
            result.winner_notified = true;
        }
        None => {
            msg!(
                "Winner of prize #{} has no email on file, notification skipped",
                result.prize_position
            );
            result.winner_notified = false;
        }
    }

    // Totals are informational; a failure here must not stop the draw
    let sales_amount = match vendor.sales_amount(raffle.price_per_number) {
        Ok(amount) => amount,
        Err(_) => {
            msg!("Vendor sales total overflowed, vendor notification skipped");
            result.vendor_notified = false;
            return;
        }
    };

    match vendor.contact.email() {
        Some(email) => {
            emit!(VendorNotification {
                raffle: raffle_key,
                vendor: vendor_key,
                prize_position: result.prize_position,
                winning_number: result.winning_number,
                vendor_sold_count: vendor.sold_count,
                vendor_sales_amount: sales_amount,
                to: email.to_string(),
                subject: vendor_subject(&raffle.name, result.prize_position),
                html_body: vendor_body(
                    &raffle.name,
                    result,
                    &vendor.contact.name,
                    vendor.sold_count,
                    sales_amount,
                ),
            });
            result.vendor_notified = true;
        }
        None => {
            msg!("Vendor has no email on file, notification skipped");
            result.vendor_notified = false;
        }
    }
}
