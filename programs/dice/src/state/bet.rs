use anchor_lang::prelude::*;

use crate::errors::DiceError;
use crate::logic;
use crate::pda;

#[account]
#[derive(InitSpace, Debug)]
pub struct Bet {
    /// Wallet that placed the bet and signs its resolution message.
    pub player: Pubkey,
    /// Player-chosen seed, only used to derive the bet address.
    pub seed: u128,
    /// Slot at which the bet was placed.
    pub slot: u64,
    /// Stake in lamports.
    pub amount: u64,
    /// Winning threshold: the bet wins when the outcome is below it.
    pub roll: u8,
    /// PDA bump seed.
    pub bump: u8,
}

impl Bet {
    pub const SEED: &'static [u8] = b"bet";

    /// Slots a bet must stay unresolved before its player may reclaim the stake.
    pub const REFUND_TIMEOUT_SLOTS: u64 = 1_000;

    /// Canonical message the player signs: the account fields in declaration
    /// order without the 8-byte discriminator.
    pub fn to_slice(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(Self::INIT_SPACE);
        buf.extend_from_slice(self.player.as_ref());
        buf.extend_from_slice(&self.seed.to_le_bytes());
        buf.extend_from_slice(&self.slot.to_le_bytes());
        buf.extend_from_slice(&self.amount.to_le_bytes());
        buf.push(self.roll);
        buf.push(self.bump);
        buf
    }

    pub fn is_refundable(&self, current_slot: u64) -> bool {
        current_slot.saturating_sub(self.slot) >= Self::REFUND_TIMEOUT_SLOTS
    }

    /// Checks a freshly allocated (or reused) bet record before it is filled.
    /// Arguments are validated before the seed, so a bad roll on a taken
    /// seed reports the roll.
    pub fn check_new(&self, roll: u8, amount: u64) -> Result<()> {
        logic::validate_roll(roll)?;
        require!(amount > 0, DiceError::InvalidAmount);
        require_keys_eq!(self.player, Pubkey::default(), DiceError::DuplicateSeed);
        Ok(())
    }

    /// Reads an open bet. A closed bet is left system-owned with no data, so
    /// anything that does not deserialize as a program-owned bet is not found.
    pub fn load_open(info: &AccountInfo) -> Result<Self> {
        if info.owner != &crate::ID || info.data_is_empty() {
            return err!(DiceError::BetNotFound);
        }
        let data = info.try_borrow_data()?;
        let mut bytes: &[u8] = &data;
        Self::try_deserialize(&mut bytes).map_err(|_| error!(DiceError::BetNotFound))
    }

    /// Requires `key` to be this bet's address under `vault`.
    pub fn check_address(&self, key: &Pubkey, vault: &Pubkey) -> Result<()> {
        match pda::bet_address_with_bump(vault, self.seed, self.bump) {
            Some(expected) if expected == *key => Ok(()),
            _ => err!(DiceError::BetNotFound),
        }
    }

    /// Hands the bet rent to `destination` and returns the account to the
    /// system program.
    pub fn close<'info>(bet: &AccountInfo<'info>, destination: &AccountInfo<'info>) -> Result<()> {
        let rent = bet.lamports();
        let credited = destination
            .lamports()
            .checked_add(rent)
            .ok_or(DiceError::MathOverflow)?;

        **destination.try_borrow_mut_lamports()? = credited;
        **bet.try_borrow_mut_lamports()? = 0;

        bet.assign(&System::id());
        bet.realloc(0, false)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::tests::assert_dice_error;
    use crate::state::HouseLedger;

    fn sample_bet() -> Bet {
        Bet {
            player: Pubkey::new_unique(),
            seed: 0xdead_beef_0000_0000_0000_0000_cafe_f00d,
            slot: 4_242,
            amount: 100_000_000,
            roll: 50,
            bump: 254,
        }
    }

    fn empty_bet() -> Bet {
        Bet {
            player: Pubkey::default(),
            seed: 0,
            slot: 0,
            amount: 0,
            roll: 0,
            bump: 0,
        }
    }

    fn serialized(bet: &Bet) -> Vec<u8> {
        let mut data = Vec::new();
        bet.try_serialize(&mut data).unwrap();
        data
    }

    #[test]
    fn message_is_account_data_without_discriminator() {
        let bet = sample_bet();
        let data = serialized(&bet);

        assert_eq!(data.len(), 8 + Bet::INIT_SPACE);
        assert_eq!(&data[8..], bet.to_slice().as_slice());
        assert_eq!(bet.to_slice().len(), Bet::INIT_SPACE);
    }

    #[test]
    fn message_changes_with_amount_and_roll() {
        let bet = sample_bet();
        let base = bet.to_slice();

        let mut other = sample_bet();
        other.player = bet.player;
        other.amount += 1;
        assert_ne!(base, other.to_slice());

        let mut other = sample_bet();
        other.player = bet.player;
        other.roll = 49;
        assert_ne!(base, other.to_slice());
    }

    #[test]
    fn refund_unlocks_exactly_at_timeout() {
        let bet = sample_bet();
        assert!(!bet.is_refundable(bet.slot));
        assert!(!bet.is_refundable(bet.slot + Bet::REFUND_TIMEOUT_SLOTS - 1));
        assert!(bet.is_refundable(bet.slot + Bet::REFUND_TIMEOUT_SLOTS));
        assert!(bet.is_refundable(u64::MAX));
    }

    #[test]
    fn slot_behind_creation_is_not_refundable() {
        let bet = sample_bet();
        assert!(!bet.is_refundable(0));
    }

    #[test]
    fn new_bet_accepts_valid_arguments() {
        empty_bet().check_new(50, 1).unwrap();
    }

    #[test]
    fn new_bet_checks_arguments_before_seed() {
        let taken = sample_bet();

        assert_dice_error(taken.check_new(0, 1).unwrap_err(), DiceError::InvalidRoll);
        assert_dice_error(taken.check_new(100, 0).unwrap_err(), DiceError::InvalidRoll);
        assert_dice_error(taken.check_new(50, 0).unwrap_err(), DiceError::InvalidAmount);
        assert_dice_error(taken.check_new(50, 1).unwrap_err(), DiceError::DuplicateSeed);

        assert_dice_error(empty_bet().check_new(50, 0).unwrap_err(), DiceError::InvalidAmount);
    }

    #[test]
    fn loads_program_owned_bet() {
        let bet = sample_bet();
        let key = Pubkey::new_unique();
        let mut lamports = 1_000_000;
        let mut data = serialized(&bet);
        let info = AccountInfo::new(&key, false, true, &mut lamports, &mut data, &crate::ID, false, 0);

        let loaded = Bet::load_open(&info).unwrap();
        assert_eq!(loaded.to_slice(), bet.to_slice());
    }

    #[test]
    fn closed_bet_is_not_found() {
        let key = Pubkey::new_unique();
        let system = System::id();
        let mut lamports = 0;
        let mut data: Vec<u8> = Vec::new();
        let info = AccountInfo::new(&key, false, true, &mut lamports, &mut data, &system, false, 0);

        assert_dice_error(Bet::load_open(&info).unwrap_err(), DiceError::BetNotFound);
    }

    #[test]
    fn emptied_program_account_is_not_found() {
        let key = Pubkey::new_unique();
        let mut lamports = 0;
        let mut data: Vec<u8> = Vec::new();
        let info = AccountInfo::new(&key, false, true, &mut lamports, &mut data, &crate::ID, false, 0);

        assert_dice_error(Bet::load_open(&info).unwrap_err(), DiceError::BetNotFound);
    }

    #[test]
    fn other_owner_is_not_found() {
        let key = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let mut lamports = 1_000_000;
        let mut data = serialized(&sample_bet());
        let info = AccountInfo::new(&key, false, true, &mut lamports, &mut data, &owner, false, 0);

        assert_dice_error(Bet::load_open(&info).unwrap_err(), DiceError::BetNotFound);
    }

    #[test]
    fn ledger_account_is_not_a_bet() {
        let ledger = HouseLedger {
            house: Pubkey::new_unique(),
            vault: Pubkey::new_unique(),
            outstanding_liability: 0,
            open_bets: 0,
            total_wagered: 0,
            total_paid_out: 0,
            vault_bump: 255,
            bump: 255,
        };
        let mut data = Vec::new();
        ledger.try_serialize(&mut data).unwrap();

        let key = Pubkey::new_unique();
        let mut lamports = 1_000_000;
        let info = AccountInfo::new(&key, false, true, &mut lamports, &mut data, &crate::ID, false, 0);

        assert_dice_error(Bet::load_open(&info).unwrap_err(), DiceError::BetNotFound);
    }

    #[test]
    fn address_is_bound_to_vault_and_seed() {
        let (vault, _) = pda::vault_address(&Pubkey::new_unique());
        let mut bet = sample_bet();
        let (key, bump) = pda::bet_address(&vault, bet.seed);
        bet.bump = bump;

        bet.check_address(&key, &vault).unwrap();

        let err = bet.check_address(&Pubkey::new_unique(), &vault).unwrap_err();
        assert_dice_error(err, DiceError::BetNotFound);

        let (other_vault, _) = pda::vault_address(&Pubkey::new_unique());
        let err = bet.check_address(&key, &other_vault).unwrap_err();
        assert_dice_error(err, DiceError::BetNotFound);
    }
}
