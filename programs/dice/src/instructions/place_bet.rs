use anchor_lang::prelude::*;

use crate::errors::DiceError;
use crate::events::BetPlaced;
use crate::state::{Bet, HouseLedger};
use crate::vault::{self, VAULT_SEED};

#[derive(Accounts)]
#[instruction(seed: u128)]
pub struct PlaceBet<'info> {
    #[account(mut)]
    pub player: Signer<'info>,

    /// CHECK: Only used to derive the vault address.
    pub house: UncheckedAccount<'info>,

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

    /// Created on first use; an existing record means the seed is taken.
    #[account(
        init_if_needed,
        payer = player,
        space = 8 + Bet::INIT_SPACE,
        seeds = [Bet::SEED, vault.key().as_ref(), seed.to_le_bytes().as_ref()],
        bump,
    )]
    pub bet: Account<'info, Bet>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<PlaceBet>, seed: u128, roll: u8, amount: u64) -> Result<Pubkey> {
    ctx.accounts.bet.check_new(roll, amount)?;

    let vault_balance = ctx.accounts.vault.lamports();
    ctx.accounts
        .ledger
        .place(vault_balance, vault::rent_floor()?, amount, roll)?;

    vault::credit(
        ctx.accounts.system_program.to_account_info(),
        ctx.accounts.player.to_account_info(),
        ctx.accounts.vault.to_account_info(),
        amount,
    )?;

    let slot = Clock::get()?.slot;
    let bet = &mut ctx.accounts.bet;
    bet.set_inner(Bet {
        player: ctx.accounts.player.key(),
        seed,
        slot,
        amount,
        roll,
        bump: ctx.bumps.bet,
    });

    emit!(BetPlaced {
        bet: bet.key(),
        player: bet.player,
        seed,
        roll,
        amount,
        slot,
    });

    Ok(bet.key())
}
