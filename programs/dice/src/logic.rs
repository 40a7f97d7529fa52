//! Outcome and payout arithmetic, kept free of account handling so it can be
//! tested off-chain.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::hash::hash;

use crate::errors::DiceError;

/// House edge in basis points (150 = 1.5%).
pub const HOUSE_FEE_BPS: u64 = 150;
pub const BPS_DENOMINATOR: u64 = 10_000;
/// Outcomes are drawn from `0..ROLL_RANGE`.
pub const ROLL_RANGE: u8 = 100;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
}

/// Returned by `resolve_bet`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// Value drawn from the signature, in [0, 99].
    pub draw: u8,
    pub outcome: Outcome,
    /// Lamports sent from the vault to the player (0 on a loss).
    pub payout: u64,
}

pub fn validate_roll(roll: u8) -> Result<()> {
    require!(roll > 0 && roll < ROLL_RANGE, DiceError::InvalidRoll);
    Ok(())
}

/// Reduces a verified signature to a value in [0, 99].
///
/// The signature is hashed first so every byte contributes; the two halves of
/// the digest are summed as little-endian u128s before the modulo.
pub fn draw_from_signature(sig: &[u8]) -> u8 {
    let digest = hash(sig).to_bytes();

    let mut half = [0u8; 16];
    half.copy_from_slice(&digest[..16]);
    let lower = u128::from_le_bytes(half);
    half.copy_from_slice(&digest[16..]);
    let upper = u128::from_le_bytes(half);

    (lower.wrapping_add(upper) % ROLL_RANGE as u128) as u8
}

pub fn is_win(draw: u8, roll: u8) -> bool {
    draw < roll
}

/// Winning payout at odds of `100 / roll`, less the house fee.
pub fn win_payout(amount: u64, roll: u8) -> Result<u64> {
    validate_roll(roll)?;

    let gross = (amount as u128)
        .checked_mul(ROLL_RANGE as u128)
        .and_then(|v| v.checked_mul((BPS_DENOMINATOR - HOUSE_FEE_BPS) as u128))
        .ok_or(DiceError::MathOverflow)?;
    let payout = gross
        .checked_div(roll as u128 * BPS_DENOMINATOR as u128)
        .ok_or(DiceError::MathOverflow)?;

    u64::try_from(payout).map_err(|_| error!(DiceError::MathOverflow))
}

/// Lamports a bet books against the vault while it is open: whichever is
/// larger of its winning payout and the stake a refund hands back.
pub fn liability(amount: u64, roll: u8) -> Result<u64> {
    Ok(win_payout(amount, roll)?.max(amount))
}

pub fn resolve(sig: &[u8], roll: u8, amount: u64) -> Result<Resolution> {
    let draw = draw_from_signature(sig);

    if is_win(draw, roll) {
        Ok(Resolution {
            draw,
            outcome: Outcome::Win,
            payout: win_payout(amount, roll)?,
        })
    } else {
        Ok(Resolution {
            draw,
            outcome: Outcome::Loss,
            payout: 0,
        })
    }
}
