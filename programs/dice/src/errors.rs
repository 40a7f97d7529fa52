use anchor_lang::prelude::*;

#[error_code]
pub enum DiceError {
    #[msg("Amount must be greater than zero.")]
    InvalidAmount,
    #[msg("Roll must be between 1 and 99.")]
    InvalidRoll,
    #[msg("Vault has already been initialized for this house.")]
    AlreadyInitialized,
    #[msg("Vault balance cannot cover this transfer.")]
    InsufficientFunds,
    #[msg("Vault cannot cover the maximum payout of this bet.")]
    VaultUndercapitalized,
    #[msg("A bet with this seed already exists.")]
    DuplicateSeed,
    #[msg("Refund timeout has not elapsed yet.")]
    TimeoutNotReached,
    #[msg("Missing or invalid Ed25519 signature proof.")]
    MissingOrInvalidSignatureProof,
    #[msg("Bet not found or already closed.")]
    BetNotFound,
    #[msg("Signer is not allowed to perform this action.")]
    Unauthorized,
    #[msg("Arithmetic overflow.")]
    MathOverflow,
}
