use anchor_lang::prelude::*;
use anchor_lang::solana_program::sysvar::instructions::ID as INSTRUCTIONS_SYSVAR_ID;

use crate::ed25519::{self, SIGNATURE_SERIALIZED_SIZE};
use crate::errors::DiceError;
use crate::events::BetResolved;
use crate::logic::{self, Outcome, Resolution};
use crate::state::{Bet, HouseLedger};
use crate::vault::{self, VAULT_SEED};

#[derive(Accounts)]
pub struct ResolveBet<'info> {
    #[account(mut)]
    pub house: Signer<'info>,

    /// CHECK: Must be the bet's player; receives the payout and the bet rent.
    #[account(mut)]
    pub player: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED, house.key().as_ref()],
        bump,
    )]
    pub vault: SystemAccount<'info>,

    #[account(
        mut,
        seeds = [HouseLedger::SEED, vault.key().as_ref()],
        bump = ledger.bump,
        has_one = house @ DiceError::Unauthorized,
    )]
    pub ledger: Account<'info, HouseLedger>,

    /// CHECK: Loaded with `Bet::load_open` and checked against its seeds, so a
    /// bet that was already closed fails with `BetNotFound`.
    #[account(mut)]
    pub bet: UncheckedAccount<'info>,

    /// CHECK: Instructions sysvar, read to find the Ed25519 signature check.
    #[account(address = INSTRUCTIONS_SYSVAR_ID)]
    pub instructions: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<ResolveBet>,
    sig: [u8; SIGNATURE_SERIALIZED_SIZE],
) -> Result<Resolution> {
    let bet_info = ctx.accounts.bet.to_account_info();
    let bet = Bet::load_open(&bet_info)?;
    bet.check_address(bet_info.key, ctx.accounts.vault.key)?;
    require_keys_eq!(bet.player, ctx.accounts.player.key(), DiceError::Unauthorized);

    // The player's signature over the bet is both the proof and the dice.
    ed25519::verify_preceding_instruction(
        &ctx.accounts.instructions.to_account_info(),
        &bet.player,
        &bet.to_slice(),
        &sig,
    )?;

    let resolution = logic::resolve(&sig, bet.roll, bet.amount)?;
    let owed = ctx.accounts.ledger.settle(&resolution, bet.amount, bet.roll)?;

    if owed > 0 {
        vault::debit(
            ctx.accounts.system_program.to_account_info(),
            ctx.accounts.vault.to_account_info(),
            ctx.accounts.player.to_account_info(),
            ctx.accounts.house.key,
            ctx.accounts.ledger.vault_bump,
            owed,
        )?;
    }

    Bet::close(&bet_info, &ctx.accounts.player.to_account_info())?;

    emit!(BetResolved {
        bet: bet_info.key(),
        player: bet.player,
        draw: resolution.draw,
        roll: bet.roll,
        won: resolution.outcome == Outcome::Win,
        payout: resolution.payout,
    });

    Ok(resolution)
}
