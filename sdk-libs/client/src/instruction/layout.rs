//! Positional contract between the instruction builder and the runtime.
//!
//! The runtime reads tree and queue accounts from the remaining accounts by
//! the indices carried in instruction data. [`PackedAccountsLayout`] names
//! which role sits at which packed index so that the builder can check its
//! own output before anything is sent.

use solana_pubkey::Pubkey;

use super::{
    merkle_context::{AddressMerkleContext, PackedAddressMerkleContext},
    pack_accounts::PackedAccounts,
};
use crate::error::PackingError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountRole {
    AddressQueue,
    AddressMerkleTree,
    OutputStateTree,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackedAccountsLayout {
    pub version: u8,
    pub roles: [(AccountRole, u8); 3],
}

impl Default for PackedAccountsLayout {
    fn default() -> Self {
        Self::V1
    }
}

impl PackedAccountsLayout {
    /// `[address queue, address tree, output state tree]`
    pub const V1: Self = Self {
        version: 1,
        roles: [
            (AccountRole::AddressQueue, 0),
            (AccountRole::AddressMerkleTree, 1),
            (AccountRole::OutputStateTree, 2),
        ],
    };

    pub fn position(&self, role: AccountRole) -> Option<u8> {
        self.roles
            .iter()
            .find(|(r, _)| *r == role)
            .map(|(_, position)| *position)
    }

    pub fn role_at(&self, index: u8) -> Option<AccountRole> {
        self.roles
            .iter()
            .find(|(_, position)| *position == index)
            .map(|(role, _)| *role)
    }

    /// Every role must appear once and positions must be `0..roles.len()`.
    pub fn validate(&self) -> Result<(), PackingError> {
        for (i, (role, position)) in self.roles.iter().enumerate() {
            if self.roles[..i].iter().any(|(r, _)| r == role) {
                return Err(PackingError::InvalidLayout(format!(
                    "role {:?} appears more than once",
                    role
                )));
            }
            if *position as usize >= self.roles.len() {
                return Err(PackingError::InvalidLayout(format!(
                    "position {} of {:?} is out of range",
                    position, role
                )));
            }
            if self.roles[..i].iter().any(|(_, p)| p == position) {
                return Err(PackingError::InvalidLayout(format!(
                    "position {} is assigned twice",
                    position
                )));
            }
        }
        Ok(())
    }

    /// Inserts the address queue, the address tree and the output state tree
    /// into `remaining_accounts` in layout order.
    ///
    /// Returns the packed address context and the output state tree index.
    /// Fails if an account does not land on the position the layout assigns
    /// to its role, e.g. because `remaining_accounts` already held packed
    /// accounts or two roles share a pubkey.
    pub fn pack(
        &self,
        address_merkle_context: &AddressMerkleContext,
        output_state_tree: Pubkey,
        root_index: u16,
        remaining_accounts: &mut PackedAccounts,
    ) -> Result<(PackedAddressMerkleContext, u8), PackingError> {
        self.validate()?;

        let mut roles = self.roles;
        roles.sort_by_key(|(_, position)| *position);

        for (role, expected) in roles {
            let pubkey = match role {
                AccountRole::AddressQueue => address_merkle_context.address_queue_pubkey,
                AccountRole::AddressMerkleTree => address_merkle_context.address_merkle_tree_pubkey,
                AccountRole::OutputStateTree => output_state_tree,
            };
            let actual = remaining_accounts.insert_or_get(pubkey);
            if actual != expected {
                return Err(PackingError::PositionMismatch {
                    role,
                    expected,
                    actual,
                });
            }
        }

        // validate() guarantees every role has a position.
        let position = |role| self.position(role).unwrap_or_default();
        Ok((
            PackedAddressMerkleContext {
                address_merkle_tree_pubkey_index: position(AccountRole::AddressMerkleTree),
                address_queue_pubkey_index: position(AccountRole::AddressQueue),
                root_index,
            },
            position(AccountRole::OutputStateTree),
        ))
    }
}
