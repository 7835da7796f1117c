//! Conversion: DexScreener wire pairs → TokenPair / BoostedToken.
//!
//! Numbers that fail to parse become `None`; a pair is never rejected for a
//! missing price.

use super::wire::{BoostResponse, PairResponse, PairToken};
use super::{BoostedToken, TokenPair, TokenRef};
use crate::shared::serde_util::datetime_from_epoch;
use crate::shared::{decimal_from_f64, Address, NetworkId};
use rust_decimal::Decimal;
use std::str::FromStr;

fn decimal_str(raw: Option<&str>) -> Option<Decimal> {
    raw.and_then(|s| {
        let s = s.trim();
        Decimal::from_str(s)
            .or_else(|_| Decimal::from_scientific(s))
            .ok()
    })
}

fn decimal_f64(raw: Option<f64>) -> Option<Decimal> {
    raw.and_then(decimal_from_f64)
}

impl From<PairToken> for TokenRef {
    fn from(t: PairToken) -> Self {
        Self {
            address: Address::from(t.address),
            symbol: t.symbol,
            name: t.name,
        }
    }
}

impl From<PairResponse> for TokenPair {
    fn from(p: PairResponse) -> Self {
        Self {
            chain_id: NetworkId::from(p.chain_id),
            dex_id: p.dex_id,
            pair_address: Address::from(p.pair_address),
            base_token: p.base_token.into(),
            quote_token: p.quote_token.into(),
            url: p.url,
            price_usd: decimal_str(p.price_usd.as_deref()),
            price_native: decimal_str(p.price_native.as_deref()),
            market_cap: decimal_f64(p.market_cap),
            fdv: decimal_f64(p.fdv),
            volume_24h: decimal_f64(p.volume.and_then(|v| v.h24)),
            liquidity_usd: decimal_f64(p.liquidity.and_then(|l| l.usd)),
            price_change_24h: decimal_f64(p.price_change.and_then(|c| c.h24)),
            created_at: p.pair_created_at.and_then(datetime_from_epoch),
        }
    }
}

impl From<BoostResponse> for BoostedToken {
    fn from(b: BoostResponse) -> Self {
        Self {
            chain_id: NetworkId::from(b.chain_id),
            token_address: Address::from(b.token_address),
            amount: decimal_f64(b.amount),
            total_amount: decimal_f64(b.total_amount),
            url: b.url,
            description: b.description,
        }
    }
}
