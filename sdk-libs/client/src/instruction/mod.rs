mod create;
mod layout;
mod merkle_context;
mod pack_accounts;
mod system_accounts;

pub use create::{
    create_account_instruction, instruction_discriminator, CreateInstructionData,
    CREATE_DISCRIMINATOR,
};
pub use layout::{AccountRole, PackedAccountsLayout};
pub use merkle_context::{AddressMerkleContext, PackedAddressMerkleContext};
pub use pack_accounts::PackedAccounts;
pub use system_accounts::{
    get_cpi_authority_pda, get_light_system_account_metas, SystemAccountMetaConfig,
    SYSTEM_ACCOUNTS_LEN,
};
