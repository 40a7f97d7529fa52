//! Checks that a sibling Ed25519 program instruction attests a signature.
//!
//! The runtime's Ed25519 program fails the whole transaction when one of its
//! signatures does not verify, so the program only has to confirm that the
//! attested key, message and signature are the ones it expects.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::{
    ed25519_program,
    instruction::Instruction,
    sysvar::instructions::{load_current_index_checked, load_instruction_at_checked},
};
use bytemuck::{Pod, Zeroable};

use crate::errors::DiceError;

pub const PUBKEY_SERIALIZED_SIZE: usize = 32;
pub const SIGNATURE_SERIALIZED_SIZE: usize = 64;
pub const SIGNATURE_OFFSETS_SERIALIZED_SIZE: usize = 14;
/// `num_signatures` byte plus one byte of padding.
pub const SIGNATURE_OFFSETS_START: usize = 2;
pub const DATA_START: usize = SIGNATURE_OFFSETS_START + SIGNATURE_OFFSETS_SERIALIZED_SIZE;
/// Instruction index meaning "the Ed25519 instruction itself".
const CURRENT_INSTRUCTION: u16 = u16::MAX;

/// Offsets record of the native Ed25519 program, read straight from the
/// instruction data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
pub struct Ed25519SignatureOffsets {
    pub signature_offset: u16,
    pub signature_instruction_index: u16,
    pub public_key_offset: u16,
    pub public_key_instruction_index: u16,
    pub message_data_offset: u16,
    pub message_data_size: u16,
    pub message_instruction_index: u16,
}

impl Ed25519SignatureOffsets {
    /// Reads the first offsets record of an Ed25519 instruction.
    pub fn read_first(data: &[u8]) -> Option<Self> {
        let raw = data.get(SIGNATURE_OFFSETS_START..DATA_START)?;
        bytemuck::try_pod_read_unaligned(raw).ok()
    }

    fn is_self_contained(&self) -> bool {
        self.signature_instruction_index == CURRENT_INSTRUCTION
            && self.public_key_instruction_index == CURRENT_INSTRUCTION
            && self.message_instruction_index == CURRENT_INSTRUCTION
    }
}

/// Key, signature and message carried by a single-signature Ed25519 instruction.
#[derive(Debug, PartialEq, Eq)]
pub struct Attestation<'a> {
    pub public_key: &'a [u8],
    pub signature: &'a [u8],
    pub message: &'a [u8],
}

fn slice_at(data: &[u8], offset: u16, len: usize) -> Option<&[u8]> {
    let start = offset as usize;
    data.get(start..start.checked_add(len)?)
}

/// Parses an Ed25519 program instruction carrying exactly one signature whose
/// key, signature and message all live in the instruction's own data.
pub fn parse_attestation(ix: &Instruction) -> Option<Attestation<'_>> {
    if ix.program_id != ed25519_program::ID || !ix.accounts.is_empty() {
        return None;
    }
    let data = ix.data.as_slice();
    if data.first() != Some(&1) {
        return None;
    }

    let offsets = Ed25519SignatureOffsets::read_first(data)?;
    if !offsets.is_self_contained() {
        return None;
    }

    Some(Attestation {
        public_key: slice_at(data, offsets.public_key_offset, PUBKEY_SERIALIZED_SIZE)?,
        signature: slice_at(data, offsets.signature_offset, SIGNATURE_SERIALIZED_SIZE)?,
        message: slice_at(
            data,
            offsets.message_data_offset,
            offsets.message_data_size as usize,
        )?,
    })
}

/// Requires `ix` to attest that `signer` signed `message` with `signature`.
pub fn check_attestation(
    ix: &Instruction,
    signer: &Pubkey,
    message: &[u8],
    signature: &[u8; SIGNATURE_SERIALIZED_SIZE],
) -> Result<()> {
    let Some(attestation) = parse_attestation(ix) else {
        msg!("Preceding instruction is not a single Ed25519 signature check");
        return err!(DiceError::MissingOrInvalidSignatureProof);
    };

    if attestation.public_key != signer.as_ref() {
        msg!("Ed25519 public key does not match {}", signer);
        return err!(DiceError::MissingOrInvalidSignatureProof);
    }
    if attestation.signature != signature.as_slice() {
        msg!("Ed25519 signature does not match the submitted proof");
        return err!(DiceError::MissingOrInvalidSignatureProof);
    }
    if attestation.message != message {
        msg!("Ed25519 message does not match the bet");
        return err!(DiceError::MissingOrInvalidSignatureProof);
    }

    Ok(())
}

/// Loads the instruction right before the executing one from the instructions
/// sysvar and checks its attestation.
pub fn verify_preceding_instruction(
    instructions: &AccountInfo,
    signer: &Pubkey,
    message: &[u8],
    signature: &[u8; SIGNATURE_SERIALIZED_SIZE],
) -> Result<()> {
    let current = load_current_index_checked(instructions)?;
    require!(current > 0, DiceError::MissingOrInvalidSignatureProof);

    let ix = load_instruction_at_checked(current as usize - 1, instructions)
        .map_err(|_| error!(DiceError::MissingOrInvalidSignatureProof))?;

    check_attestation(&ix, signer, message, signature)
}
