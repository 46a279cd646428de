use alloy_primitives::Address;
use serde::Serialize;
use std::collections::HashMap;

/// Type alias for chain ID to avoid depending on external chain types
pub type ChainId = u64;

/// Marker for a kind of contract the registry can hold
pub trait ContractType {
    /// Identifier stored in the registry, the marker's type name by default
    fn short_type_id() -> &'static str
    where
        Self: Sized,
    {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full)
    }
}

/// Coin metadata attached to a known address
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoinInfo {
    pub symbol: String,
    pub name: String,
    /// Decimal places; zero means the registry does not know them
    pub dec: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressInfo {
    pub label: String,
    pub coin: Option<CoinInfo>,
}

/// Answer of [`KnownAddressRegistry::register`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisteredAddress {
    pub known_address: bool,
    pub contract: Option<String>,
    pub address_info: Option<AddressInfo>,
}

/// Capability to resolve an address to what is known about it.
pub trait KnownAddressRegistry {
    fn register(&self, chain_id: ChainId, address: Address) -> RegisteredAddress;
}

/// Token metadata as stored per chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMetadata {
    pub symbol: String,
    pub decimals: u8,
    pub name: String,
}

/// Contract types and token metadata keyed by `(chain_id, address)`
pub struct ContractRegistry {
    address_to_type: HashMap<(ChainId, Address), String>,
    token_metadata: HashMap<(ChainId, Address), TokenMetadata>,
}

impl ContractRegistry {
    pub fn new() -> Self {
        Self {
            address_to_type: HashMap::new(),
            token_metadata: HashMap::new(),
        }
    }

    /// Registers `addresses` as deployments of `contract_type` on `chain_id`.
    /// A later registration of the same address replaces its type.
    pub fn register_contract(
        &mut self,
        chain_id: ChainId,
        contract_type: impl Into<String>,
        addresses: Vec<Address>,
    ) {
        let contract_type = contract_type.into();

        for address in addresses {
            self.address_to_type
                .insert((chain_id, address), contract_type.clone());
        }
    }

    pub fn register_contract_typed<T: ContractType>(
        &mut self,
        chain_id: ChainId,
        addresses: Vec<Address>,
    ) {
        self.register_contract(chain_id, T::short_type_id(), addresses);
    }

    pub fn register_token(
        &mut self,
        chain_id: ChainId,
        address: Address,
        symbol: impl Into<String>,
        decimals: u8,
        name: impl Into<String>,
    ) {
        let metadata = TokenMetadata {
            symbol: symbol.into(),
            decimals,
            name: name.into(),
        };

        self.token_metadata.insert((chain_id, address), metadata);
    }

    pub fn get_contract_type(&self, chain_id: ChainId, address: Address) -> Option<String> {
        self.address_to_type.get(&(chain_id, address)).cloned()
    }

    pub fn get_token_symbol(&self, chain_id: ChainId, token: Address) -> Option<String> {
        self.token_metadata
            .get(&(chain_id, token))
            .map(|m| m.symbol.clone())
    }

    pub fn get_token_decimals(&self, chain_id: ChainId, token: Address) -> Option<u8> {
        self.token_metadata.get(&(chain_id, token)).map(|m| m.decimals)
    }

    /// Registers every asset of `chain_metadata` on its network
    pub fn load_chain_metadata(&mut self, chain_metadata: &ChainMetadata) {
        let chain_id = chain_metadata.network_id;

        for (token_address, asset_info) in &chain_metadata.assets {
            self.register_token(
                chain_id,
                *token_address,
                asset_info.symbol.clone(),
                asset_info.decimals,
                asset_info.name.clone(),
            );
        }
    }
}

impl Default for ContractRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl KnownAddressRegistry for ContractRegistry {
    fn register(&self, chain_id: ChainId, address: Address) -> RegisteredAddress {
        let contract = self.get_contract_type(chain_id, address);
        let token = self.token_metadata.get(&(chain_id, address));

        let address_info = match (token, &contract) {
            (Some(token), _) => Some(AddressInfo {
                label: token.name.clone(),
                coin: Some(CoinInfo {
                    symbol: token.symbol.clone(),
                    name: token.name.clone(),
                    dec: token.decimals,
                }),
            }),
            (None, Some(contract_type)) => Some(AddressInfo {
                label: contract_type.clone(),
                coin: None,
            }),
            (None, None) => None,
        };

        RegisteredAddress {
            known_address: address_info.is_some(),
            contract,
            address_info,
        }
    }
}

/// Network and token information, typically loaded from wallet metadata
#[derive(Debug, Clone)]
pub struct ChainMetadata {
    /// Network ID corresponding to chain ID
    pub network_id: ChainId,
    pub assets: HashMap<Address, AssetInfo>,
}

#[derive(Debug, Clone)]
pub struct AssetInfo {
    pub symbol: String,
    pub decimals: u8,
    pub name: String,
}
