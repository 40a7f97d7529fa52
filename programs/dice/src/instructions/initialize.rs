use anchor_lang::prelude::*;

use crate::events::VaultInitialized;
use crate::state::HouseLedger;
use crate::vault::{self, VAULT_SEED};

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub house: Signer<'info>,

    /// House vault holding the bankroll.
    #[account(
        mut,
        seeds = [VAULT_SEED, house.key().as_ref()],
        bump,
    )]
    pub vault: SystemAccount<'info>,

    #[account(
        init_if_needed,
        payer = house,
        space = 8 + HouseLedger::INIT_SPACE,
        seeds = [HouseLedger::SEED, vault.key().as_ref()],
        bump,
    )]
    pub ledger: Account<'info, HouseLedger>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Initialize>, amount: u64) -> Result<()> {
    vault::check_initial_deposit(ctx.accounts.vault.lamports(), amount, vault::rent_floor()?)?;

    let house = ctx.accounts.house.key();
    let vault_key = ctx.accounts.vault.key();
    ctx.accounts
        .ledger
        .open(house, vault_key, ctx.bumps.vault, ctx.bumps.ledger)?;

    vault::credit(
        ctx.accounts.system_program.to_account_info(),
        ctx.accounts.house.to_account_info(),
        ctx.accounts.vault.to_account_info(),
        amount,
    )?;

    emit!(VaultInitialized {
        house,
        vault: vault_key,
        amount,
    });

    Ok(())
}
