use alloy_primitives::Address;

use crate::registry::{ChainId, KnownAddressRegistry, RegisteredAddress};

/// Decimals assumed for tokens the registry knows nothing about
pub const DEFAULT_DECIMALS: u8 = 18;

/// The transaction an address was seen in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionContext {
    pub chain_id: ChainId,
}

impl TransactionContext {
    pub fn new(chain_id: ChainId) -> Self {
        Self { chain_id }
    }
}

/// Number of decimals of the coin at `contract_address`, or `default`.
///
/// A registered coin reporting zero decimals is treated like an unknown one.
pub fn decimals_for<R: KnownAddressRegistry + ?Sized>(
    registry: &R,
    transaction: &TransactionContext,
    contract_address: Option<Address>,
    default: u8,
) -> u8 {
    let Some(address) = contract_address else {
        return default;
    };

    let RegisteredAddress { address_info, .. } = registry.register(transaction.chain_id, address);
    address_info
        .and_then(|info| info.coin)
        .map(|coin| coin.dec)
        .filter(|&dec| dec != 0)
        .unwrap_or(default)
}
