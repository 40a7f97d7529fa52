use anchor_lang::prelude::*;

#[event]
pub struct VaultInitialized {
    pub house: Pubkey,
    pub vault: Pubkey,
    pub amount: u64,
}

#[event]
pub struct BetPlaced {
    pub bet: Pubkey,
    pub player: Pubkey,
    pub seed: u128,
    pub roll: u8,
    pub amount: u64,
    pub slot: u64,
}

#[event]
pub struct BetRefunded {
    pub bet: Pubkey,
    pub player: Pubkey,
    pub amount: u64,
}

#[event]
pub struct BetResolved {
    pub bet: Pubkey,
    pub player: Pubkey,
    /// Value drawn in [0, 99]; the bet wins when it is below `roll`.
    pub draw: u8,
    pub roll: u8,
    pub won: bool,
    pub payout: u64,
}
