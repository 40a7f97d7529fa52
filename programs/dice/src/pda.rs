//! Address derivation shared with clients. The seed layouts here are the ones
//! the account constraints check on-chain.

use anchor_lang::prelude::*;

use crate::state::{Bet, HouseLedger};
use crate::vault::VAULT_SEED;

pub fn vault_address(house: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[VAULT_SEED, house.as_ref()], &crate::ID)
}

pub fn ledger_address(vault: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[HouseLedger::SEED, vault.as_ref()], &crate::ID)
}

pub fn bet_address(vault: &Pubkey, seed: u128) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[Bet::SEED, vault.as_ref(), seed.to_le_bytes().as_ref()],
        &crate::ID,
    )
}

/// Address of a bet whose bump is already known, `None` if the seeds land on
/// the curve.
pub fn bet_address_with_bump(vault: &Pubkey, seed: u128, bump: u8) -> Option<Pubkey> {
    Pubkey::create_program_address(
        &[Bet::SEED, vault.as_ref(), seed.to_le_bytes().as_ref(), &[bump]],
        &crate::ID,
    )
    .ok()
}
