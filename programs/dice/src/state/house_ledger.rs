use anchor_lang::prelude::*;

use crate::errors::DiceError;
use crate::logic::{self, Outcome, Resolution};

/// Exposure book for one house vault. The vault itself is a system account
/// and only holds lamports, so open liabilities are tracked here.
#[account]
#[derive(InitSpace)]
pub struct HouseLedger {
    /// House that funded the vault and resolves its bets.
    pub house: Pubkey,
    /// Vault PDA this ledger books.
    pub vault: Pubkey,
    /// Sum of `logic::liability` over all open bets.
    pub outstanding_liability: u64,
    /// Number of bets placed and not yet refunded or resolved.
    pub open_bets: u64,
    /// Cumulative stakes received.
    pub total_wagered: u64,
    /// Cumulative winnings paid out.
    pub total_paid_out: u64,
    /// Vault PDA bump seed.
    pub vault_bump: u8,
    /// PDA bump seed.
    pub bump: u8,
}

impl HouseLedger {
    pub const SEED: &'static [u8] = b"ledger";

    pub fn is_initialized(&self) -> bool {
        self.house != Pubkey::default()
    }

    pub fn open(&mut self, house: Pubkey, vault: Pubkey, vault_bump: u8, bump: u8) -> Result<()> {
        require!(!self.is_initialized(), DiceError::AlreadyInitialized);

        self.house = house;
        self.vault = vault;
        self.outstanding_liability = 0;
        self.open_bets = 0;
        self.total_wagered = 0;
        self.total_paid_out = 0;
        self.vault_bump = vault_bump;
        self.bump = bump;
        Ok(())
    }

    /// The vault can still pay every open bet its largest possible outflow.
    pub fn is_solvent(&self, vault_balance: u64, rent_floor: u64) -> bool {
        vault_balance.saturating_sub(rent_floor) >= self.outstanding_liability
    }

    /// Books a new bet. `vault_balance` is the balance before the stake lands.
    pub fn place(&mut self, vault_balance: u64, rent_floor: u64, amount: u64, roll: u8) -> Result<()> {
        let liability = logic::liability(amount, roll)?;
        let funded = vault_balance
            .checked_add(amount)
            .ok_or(DiceError::MathOverflow)?;
        let total_wagered = self
            .total_wagered
            .checked_add(amount)
            .ok_or(DiceError::MathOverflow)?;

        self.reserve(funded, rent_floor, liability)?;
        self.total_wagered = total_wagered;
        Ok(())
    }

    /// Closes a bet by refund. Returns the lamports owed back to the player.
    pub fn refund(&mut self, amount: u64, roll: u8) -> Result<u64> {
        self.release(logic::liability(amount, roll)?)?;
        Ok(amount)
    }

    /// Closes a resolved bet. Returns the lamports owed to the player.
    pub fn settle(&mut self, resolution: &Resolution, amount: u64, roll: u8) -> Result<u64> {
        let total_paid_out = match resolution.outcome {
            Outcome::Win => self
                .total_paid_out
                .checked_add(resolution.payout)
                .ok_or(DiceError::MathOverflow)?,
            Outcome::Loss => self.total_paid_out,
        };

        self.release(logic::liability(amount, roll)?)?;
        self.total_paid_out = total_paid_out;
        Ok(resolution.payout)
    }

    /// Books `liability` against the vault. `vault_balance` must already
    /// include the stake of the bet being placed.
    fn reserve(&mut self, vault_balance: u64, rent_floor: u64, liability: u64) -> Result<()> {
        let available = vault_balance.saturating_sub(rent_floor);
        let required = self
            .outstanding_liability
            .checked_add(liability)
            .ok_or(DiceError::MathOverflow)?;
        require!(available >= required, DiceError::VaultUndercapitalized);

        self.outstanding_liability = required;
        self.open_bets = self
            .open_bets
            .checked_add(1)
            .ok_or(DiceError::MathOverflow)?;
        Ok(())
    }

    fn release(&mut self, liability: u64) -> Result<()> {
        require!(self.open_bets > 0, DiceError::BetNotFound);

        self.outstanding_liability = self
            .outstanding_liability
            .checked_sub(liability)
            .ok_or(DiceError::MathOverflow)?;
        self.open_bets -= 1;
        Ok(())
    }
}
