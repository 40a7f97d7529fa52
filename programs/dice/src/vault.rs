//! Lamport movements in and out of a house vault.
//!
//! The vault is a system-owned PDA at `["vault", house]`, so the program moves
//! its lamports through the system program, signing with the vault seeds.

use anchor_lang::prelude::*;
use anchor_lang::system_program::{transfer, Transfer};

use crate::errors::DiceError;

pub const VAULT_SEED: &[u8] = b"vault";

/// Lamports a zero-data vault must keep to stay rent exempt.
pub fn rent_floor() -> Result<u64> {
    Ok(Rent::get()?.minimum_balance(0))
}

/// The first deposit must leave the vault rent exempt.
pub fn check_initial_deposit(vault_balance: u64, amount: u64, rent_floor: u64) -> Result<()> {
    require!(amount > 0, DiceError::InvalidAmount);
    let funded = vault_balance
        .checked_add(amount)
        .ok_or(DiceError::MathOverflow)?;
    require!(funded >= rent_floor, DiceError::InvalidAmount);
    Ok(())
}

/// Balance left after taking `amount` out, if the vault can afford it.
pub fn balance_after_debit(balance: u64, rent_floor: u64, amount: u64) -> Result<u64> {
    let remaining = balance
        .checked_sub(amount)
        .ok_or(DiceError::InsufficientFunds)?;
    require!(remaining >= rent_floor, DiceError::InsufficientFunds);
    Ok(remaining)
}

pub fn credit<'info>(
    system_program: AccountInfo<'info>,
    from: AccountInfo<'info>,
    vault: AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    require!(amount > 0, DiceError::InvalidAmount);

    let cpi_context = CpiContext::new(system_program, Transfer { from, to: vault });
    transfer(cpi_context, amount)
}

pub fn debit<'info>(
    system_program: AccountInfo<'info>,
    vault: AccountInfo<'info>,
    to: AccountInfo<'info>,
    house: &Pubkey,
    vault_bump: u8,
    amount: u64,
) -> Result<()> {
    balance_after_debit(vault.lamports(), rent_floor()?, amount)?;

    let bump_bytes = [vault_bump];
    let signer_seeds: &[&[&[u8]]] = &[&[VAULT_SEED, house.as_ref(), &bump_bytes]];

    let cpi_context = CpiContext::new_with_signer(
        system_program,
        Transfer { from: vault, to },
        signer_seeds,
    );
    transfer(cpi_context, amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::tests::assert_dice_error;

    #[test]
    fn initial_deposit_must_reach_rent_floor() {
        assert_dice_error(
            check_initial_deposit(0, 0, 890_880).unwrap_err(),
            DiceError::InvalidAmount,
        );
        assert_dice_error(
            check_initial_deposit(0, 890_879, 890_880).unwrap_err(),
            DiceError::InvalidAmount,
        );
        check_initial_deposit(0, 890_880, 890_880).unwrap();
        // Lamports already sitting at the vault address count towards the floor.
        check_initial_deposit(890_000, 880, 890_880).unwrap();
    }

    #[test]
    fn debit_keeps_rent_floor() {
        assert_eq!(balance_after_debit(1_500, 500, 1_000).unwrap(), 500);
        assert_dice_error(
            balance_after_debit(1_500, 500, 1_001).unwrap_err(),
            DiceError::InsufficientFunds,
        );
    }

    #[test]
    fn debit_cannot_go_negative() {
        assert_dice_error(
            balance_after_debit(10, 0, 11).unwrap_err(),
            DiceError::InsufficientFunds,
        );
        assert_eq!(balance_after_debit(10, 0, 10).unwrap(), 0);
    }
}
