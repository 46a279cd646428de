//! dYdX SoloMargin deployment configuration
//!
//! SoloMargin is the single entry point of dYdX v1: every margin, spot and
//! liquidation operation goes through `operate(accounts, actions)`.
//!
//! Only the Ethereum mainnet deployment exists. Each market id maps to the
//! ERC-20 token it holds; the ids are assigned by the protocol in listing order.

use alloy_primitives::Address;

use crate::parsers::market::Market;
use crate::registry::{ChainId, ContractRegistry, ContractType};

/// Contract type marker for the SoloMargin core contract
#[derive(Debug, Clone, Copy)]
pub struct SoloMargin;

impl ContractType for SoloMargin {}

pub const MAINNET: ChainId = 1;

// Market id -> token address on mainnet
pub static MAINNET_MARKET_TOKENS: phf::Map<u8, &str> = phf::phf_map! {
    0u8 => "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2",  // WETH
    1u8 => "0x89d24a6b4ccb1b6faa2625fe562bdd9a23260359",  // SAI
    2u8 => "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",  // USDC
    3u8 => "0x6b175474e89094c44da98b954eedeac495271d0f",  // DAI
};

pub struct DydxConfig;

impl DydxConfig {
    pub fn solo_margin_address() -> Address {
        "0x1E0447b19BB6EcFdAe1e4AE1694b0C3659614e4e"
            .parse()
            .expect("Valid SoloMargin address")
    }

    pub fn solo_margin_chains() -> &'static [ChainId] {
        &[MAINNET]
    }

    /// Token held by `market` on `chain_id`, if deployed there
    pub fn market_token(chain_id: ChainId, market: Market) -> Option<Address> {
        if chain_id != MAINNET {
            return None;
        }
        MAINNET_MARKET_TOKENS
            .get(&market.id())
            .and_then(|addr| addr.parse().ok())
    }

    /// Full token name and decimals of each market's token
    pub fn market_token_details(market: Market) -> (&'static str, u8) {
        match market {
            Market::Weth => ("Wrapped Ether", 18),
            Market::Sai => ("Sai Stablecoin", 18),
            Market::Usdc => ("USD Coin", 6),
            Market::Dai => ("Dai Stablecoin", 18),
        }
    }

    pub fn register_contracts(registry: &mut ContractRegistry) {
        let solo = Self::solo_margin_address();
        for &chain_id in Self::solo_margin_chains() {
            registry.register_contract_typed::<SoloMargin>(chain_id, vec![solo]);
        }
    }

    pub fn register_market_tokens(registry: &mut ContractRegistry) {
        for &chain_id in Self::solo_margin_chains() {
            for market in Market::ALL {
                let Some(token) = Self::market_token(chain_id, market) else {
                    continue;
                };
                let (name, decimals) = Self::market_token_details(market);
                registry.register_token(chain_id, token, market.name(), decimals, name);
            }
        }
    }
}
