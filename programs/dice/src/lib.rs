use anchor_lang::prelude::*;

pub mod ed25519;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod logic;
pub mod pda;
pub mod state;
pub mod vault;

use instructions::*;
use logic::Resolution;

declare_id!("6E5FUiURAhQ2gs3Bf97cnPbKy77giQr4i1ruGtUGArHa");

#[program]
pub mod dice {
    use super::*;

    /// Creates the house vault and funds it with `amount` lamports.
    pub fn initialize(ctx: Context<Initialize>, amount: u64) -> Result<()> {
        instructions::initialize::handler(ctx, amount)
    }

    /// Player stakes `amount` lamports on a draw below `roll`.
    /// Returns the address of the new bet.
    pub fn place_bet(ctx: Context<PlaceBet>, seed: u128, roll: u8, amount: u64) -> Result<Pubkey> {
        instructions::place_bet::handler(ctx, seed, roll, amount)
    }

    /// Player reclaims the stake of a bet left unresolved past the timeout.
    pub fn refund_bet(ctx: Context<RefundBet>) -> Result<()> {
        instructions::refund_bet::handler(ctx)
    }

    /// House settles a bet with the player's Ed25519 signature over it.
    /// The transaction must carry the matching Ed25519 program instruction
    /// immediately before this one.
    pub fn resolve_bet(ctx: Context<ResolveBet>, sig: [u8; 64]) -> Result<Resolution> {
        instructions::resolve_bet::handler(ctx, sig)
    }
}
