use solana_instruction::AccountMeta;
use solana_pubkey::Pubkey;

use crate::constants::{
    ACCOUNT_COMPRESSION_AUTHORITY_PDA, ACCOUNT_COMPRESSION_PROGRAM_ID, CPI_AUTHORITY_PDA_SEED,
    LIGHT_SYSTEM_PROGRAM_ID, NOOP_PROGRAM_ID, REGISTERED_PROGRAM_PDA, SYSTEM_PROGRAM_ID,
};

/// Number of accounts returned by [`get_light_system_account_metas`].
pub const SYSTEM_ACCOUNTS_LEN: usize = 8;

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct SystemAccountMetaConfig {
    pub self_program: Pubkey,
}

impl SystemAccountMetaConfig {
    pub fn new(self_program: Pubkey) -> Self {
        Self { self_program }
    }
}

pub fn get_cpi_authority_pda(program_id: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[CPI_AUTHORITY_PDA_SEED], program_id).0
}

/// Accounts the light system program expects in front of the packed tree
/// accounts when it is invoked through `self_program`.
pub fn get_light_system_account_metas(config: SystemAccountMetaConfig) -> Vec<AccountMeta> {
    let cpi_signer = get_cpi_authority_pda(&config.self_program);
    vec![
        AccountMeta::new_readonly(LIGHT_SYSTEM_PROGRAM_ID, false),
        AccountMeta::new_readonly(cpi_signer, false),
        AccountMeta::new_readonly(REGISTERED_PROGRAM_PDA, false),
        AccountMeta::new_readonly(NOOP_PROGRAM_ID, false),
        AccountMeta::new_readonly(ACCOUNT_COMPRESSION_AUTHORITY_PDA, false),
        AccountMeta::new_readonly(ACCOUNT_COMPRESSION_PROGRAM_ID, false),
        AccountMeta::new_readonly(config.self_program, false),
        AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
    ]
}
