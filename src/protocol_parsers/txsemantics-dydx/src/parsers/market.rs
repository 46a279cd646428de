use alloy_primitives::{Address, U256};
use log::warn;
use txsemantics::{ArgumentNode, ArgumentValue};

use crate::config::DydxConfig;
use crate::registry::ChainId;

/// Markets listed on SoloMargin, by market id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Market {
    Weth = 0,
    Sai = 1,
    Usdc = 2,
    Dai = 3,
}

impl Market {
    pub const ALL: [Market; 4] = [Market::Weth, Market::Sai, Market::Usdc, Market::Dai];

    pub fn from_code(code: U256) -> Option<Self> {
        let id = u8::try_from(code).ok()?;
        Self::ALL.into_iter().find(|market| market.id() == id)
    }

    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Market::Weth => "WETH",
            Market::Sai => "SAI",
            Market::Usdc => "USDC",
            Market::Dai => "DAI",
        }
    }

    pub fn token_address(self, chain_id: ChainId) -> Option<Address> {
        DydxConfig::market_token(chain_id, self)
    }
}

/// Replaces a market id with the market's name.
///
/// Never fails: an unknown id, or a payload that is not an id at all, becomes
/// `"Unkown Market (<value>)"`. Downstream consumers match on that wording.
pub fn parse_market(market_argument: &mut ArgumentNode) {
    let resolved = market_argument.as_uint().and_then(Market::from_code);

    market_argument.payload = match resolved {
        Some(market) => ArgumentValue::Str(market.name().to_string()),
        None => {
            warn!("unknown dYdX market {}", market_argument.payload);
            ArgumentValue::Str(format!("Unkown Market ({})", market_argument.payload))
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use txsemantics::ArgumentKind;

    #[test]
    fn test_known_markets() {
        for (code, name) in [(0u64, "WETH"), (1, "SAI"), (2, "USDC"), (3, "DAI")] {
            let mut node = ArgumentNode::uint(code).with_label("primaryMarketId");
            parse_market(&mut node);
            assert_eq!(node.payload, ArgumentValue::Str(name.to_string()));
            assert_eq!(node.label.as_deref(), Some("primaryMarketId"));
            assert_eq!(node.kind, ArgumentKind::Number);
        }
    }

    #[test]
    fn test_unknown_market_placeholder() {
        let mut node = ArgumentNode::uint(7u64);
        parse_market(&mut node);
        assert_eq!(node.payload, ArgumentValue::Str("Unkown Market (7)".to_string()));
    }

    #[test]
    fn test_huge_market_id() {
        let mut node = ArgumentNode::uint(U256::from(256u64));
        parse_market(&mut node);
        assert_eq!(node.payload, ArgumentValue::Str("Unkown Market (256)".to_string()));
    }

    #[test]
    fn test_non_integer_market_never_fails() {
        let mut node = ArgumentNode::new(ArgumentKind::String, ArgumentValue::Str("USDC".into()));
        parse_market(&mut node);
        assert_eq!(node.payload, ArgumentValue::Str("Unkown Market (USDC)".to_string()));
    }

    #[test]
    fn test_market_token_address() {
        let dai: Address = "0x6b175474e89094c44da98b954eedeac495271d0f".parse().unwrap();
        assert_eq!(Market::Dai.token_address(1), Some(dai));
        assert_eq!(Market::Dai.token_address(5), None);
    }
}
