use super::{rpc::EthCall, IPair};
use crate::{constants::contracts::FACTORY, Error};
use soku_sdk::{Pair, Token};
use tracing::{debug, warn};

/// Every token pair a route between `token_a` and `token_b` could go through.
///
/// That is the direct pair, each side against each base, and the bases against
/// each other. Identical tokens and duplicates are dropped.
pub fn all_currency_combinations(token_a: &Token, token_b: &Token, bases: &[Token]) -> Vec<(Token, Token)> {
    let mut candidates = vec![(token_a.clone(), token_b.clone())];
    for base in bases {
        candidates.push((token_a.clone(), base.clone()));
        candidates.push((token_b.clone(), base.clone()));
    }
    for (i, base_a) in bases.iter().enumerate() {
        for base_b in &bases[i + 1..] {
            candidates.push((base_a.clone(), base_b.clone()));
        }
    }

    let mut combinations: Vec<(Token, Token)> = Vec::with_capacity(candidates.len());
    for (a, b) in candidates {
        if a == b {
            continue;
        }
        let duplicate = combinations
            .iter()
            .any(|(x, y)| (x == &a && y == &b) || (x == &b && y == &a));
        if !duplicate {
            combinations.push((a, b));
        }
    }
    combinations
}

/// Loads a single pair with its reserves, or `None` if it doesn't exist.
pub async fn fetch_pair(
    client: &impl EthCall,
    token_a: &Token,
    token_b: &Token,
) -> Result<Option<Pair>, Error> {
    let Some(pair) = FACTORY
        .get_pair(client, &token_a.address, &token_b.address)
        .await?
    else {
        return Ok(None);
    };

    load_pair(client, &pair, token_a, token_b).await.map(Some)
}

async fn load_pair(
    client: &impl EthCall,
    pair: &IPair,
    token_a: &Token,
    token_b: &Token,
) -> Result<Pair, Error> {
    let (reserve0, reserve1) = pair.get_reserves(client).await?;
    let token0 = pair.token0(client).await?;

    // reserves come back in the pair's own token order
    let (reserve_a, reserve_b) = if token0.eq_ignore_ascii_case(&token_a.address) {
        (reserve0, reserve1)
    } else {
        (reserve1, reserve0)
    };

    Ok(Pair::new(
        pair.0.clone(),
        (token_a.clone(), reserve_a),
        (token_b.clone(), reserve_b),
    )?)
}

/// Loads every existing pair among `combinations`. Pairs that fail to load are
/// skipped.
pub async fn fetch_pairs(client: &impl EthCall, combinations: &[(Token, Token)]) -> Vec<Pair> {
    let mut pairs = Vec::new();
    for (token_a, token_b) in combinations {
        match fetch_pair(client, token_a, token_b).await {
            Ok(Some(pair)) => pairs.push(pair),
            Ok(None) => {}
            Err(error) => warn!("failed to load {}/{}: {error}", token_a.symbol, token_b.symbol),
        }
    }
    debug!("loaded {} of {} pairs", pairs.len(), combinations.len());
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        constants::contracts::FACTORY_ADDRESS, support::contracts::tests::MockChain,
    };
    use ethnum::U256;
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;
    use soku_sdk::ChainId;

    fn token(address: &str, symbol: &str) -> Token {
        Token::new(ChainId::Mainnet, address, 18, symbol, symbol)
    }

    #[test]
    fn test_combinations_skip_identical_and_duplicates() {
        let a = token("0x0000000000000000000000000000000000000001", "A");
        let b = token("0x0000000000000000000000000000000000000002", "B");
        let c = token("0x0000000000000000000000000000000000000003", "C");

        let combinations = all_currency_combinations(&a, &b, &[a.clone(), c.clone()]);

        assert_eq!(
            combinations,
            vec![(a.clone(), b.clone()), (a, c.clone()), (b, c)]
        );
    }

    #[test]
    fn test_fetch_pairs_orders_reserves_by_token0() {
        let a = token("0x0000000000000000000000000000000000000001", "A");
        let b = token("0x0000000000000000000000000000000000000002", "B");
        let pair_address = "0x00000000000000000000000000000000000000aa";

        let mut chain = MockChain::default();
        chain.respond(FACTORY_ADDRESS, "0xe6a43905", &[U256::new(0xaa)]);
        chain.respond(pair_address, "0x0902f1ac", &[U256::new(300), U256::new(100), U256::ONE]);
        // the pair reports B as token0
        chain.respond(pair_address, "0x0dfe1681", &[U256::new(2)]);

        let pairs = block_on(fetch_pairs(&chain, &[(a.clone(), b.clone())]));

        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].reserve_of(&a).unwrap().raw, U256::new(100));
        assert_eq!(pairs[0].reserve_of(&b).unwrap().raw, U256::new(300));
    }

    #[test]
    fn test_fetch_pairs_skips_failures() {
        let a = token("0x0000000000000000000000000000000000000001", "A");
        let b = token("0x0000000000000000000000000000000000000002", "B");

        let pairs = block_on(fetch_pairs(&MockChain::default(), &[(a, b)]));

        assert!(pairs.is_empty());
    }
}
