use anchor_lang::prelude::*;

use crate::errors::DiceError;
use crate::events::BetRefunded;
use crate::state::{Bet, HouseLedger};
use crate::vault::{self, VAULT_SEED};

#[derive(Accounts)]
pub struct RefundBet<'info> {
    /// Player reclaiming their own stake; also receives the bet rent.
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

    /// CHECK: Loaded with `Bet::load_open` and checked against its seeds, so a
    /// bet that was already closed fails with `BetNotFound`.
    #[account(mut)]
    pub bet: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<RefundBet>) -> Result<()> {
    let bet_info = ctx.accounts.bet.to_account_info();
    let bet = Bet::load_open(&bet_info)?;
    bet.check_address(bet_info.key, ctx.accounts.vault.key)?;
    require_keys_eq!(bet.player, ctx.accounts.player.key(), DiceError::Unauthorized);

    let slot = Clock::get()?.slot;
    require!(bet.is_refundable(slot), DiceError::TimeoutNotReached);

    let owed = ctx.accounts.ledger.refund(bet.amount, bet.roll)?;
    vault::debit(
        ctx.accounts.system_program.to_account_info(),
        ctx.accounts.vault.to_account_info(),
        ctx.accounts.player.to_account_info(),
        ctx.accounts.house.key,
        ctx.accounts.ledger.vault_bump,
        owed,
    )?;

    Bet::close(&bet_info, &ctx.accounts.player.to_account_info())?;

    emit!(BetRefunded {
        bet: bet_info.key(),
        player: bet.player,
        amount: owed,
    });

    Ok(())
}
