use anchor_lang::prelude::*;
use instructions::*;
use state::{ContactInput, Prize};

pub mod error;
pub mod instructions;
pub mod state;
pub mod utils;

declare_id!("61mmZSoDa2TYTmimyr6Kddh6HboeY4tReajXRjCeRRJw");

#[program]
pub mod vendor_raffle {
    use super::*;

    pub fn init_config(
        ctx: Context<InitConfig>,
        max_sales_per_window: u16,
        sale_window_secs: i64,
    ) -> Result<()> {
        instructions::init_config::init_config(ctx, max_sales_per_window, sale_window_secs)
    }

    pub fn update_config(
        ctx: Context<UpdateConfig>,
        max_sales_per_window: u16,
        sale_window_secs: i64,
    ) -> Result<()> {
        instructions::update_config::update_config(ctx, max_sales_per_window, sale_window_secs)
    }

    pub fn create_raffle(
        ctx: Context<CreateRaffle>,
        name: String,
        price_per_number: u64,
        vendor_count: u16,
        numbers_per_vendor: u16,
        draw_date: i64,
        prizes: Vec<Prize>,
    ) -> Result<()> {
        instructions::create_raffle::create_raffle(
            ctx,
            name,
            price_per_number,
            vendor_count,
            numbers_per_vendor,
            draw_date,
            prizes,
        )
    }

    pub fn update_raffle(
        ctx: Context<UpdateRaffle>,
        name: String,
        draw_date: i64,
        prizes: Vec<Prize>,
    ) -> Result<()> {
        instructions::update_raffle::update_raffle(ctx, name, draw_date, prizes)
    }

    pub fn register_vendor(ctx: Context<RegisterVendor>, contact: ContactInput) -> Result<()> {
        instructions::register_vendor::register_vendor(ctx, contact)
    }

    pub fn update_vendor_contact(
        ctx: Context<UpdateVendorContact>,
        contact: ContactInput,
    ) -> Result<()> {
        instructions::update_vendor_contact::update_vendor_contact(ctx, contact)
    }

    pub fn sell_numbers(
        ctx: Context<SellNumbers>,
        buyer_seed: [u8; 8],
        contact: ContactInput,
        numbers: Vec<u32>,
    ) -> Result<()> {
        instructions::sell_numbers::sell_numbers(ctx, buyer_seed, contact, numbers)
    }

    pub fn start_draw(ctx: Context<StartDraw>) -> Result<()> {
        instructions::start_draw::start_draw(ctx)
    }

    pub fn reveal_winner(ctx: Context<RevealWinner>) -> Result<()> {
        instructions::reveal_winner::reveal_winner(ctx)
    }

    pub fn record_result(ctx: Context<RecordResult>) -> Result<()> {
        instructions::record_result::record_result(ctx)
    }

    pub fn draw_next_prize(ctx: Context<DrawNextPrize>) -> Result<()> {
        instructions::draw_next_prize::draw_next_prize(ctx)
    }

    pub fn finalize_draw(ctx: Context<FinalizeDraw>) -> Result<()> {
        instructions::finalize_draw::finalize_draw(ctx)
    }
}
