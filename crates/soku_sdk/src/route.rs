use crate::{
    constants::ChainId,
    currency::{Currency, Token},
    pair::Pair,
    price::Price,
    Error, Result,
};

/// An ordered path of pairs from `input` to `output`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub pairs: Vec<Pair>,
    pub path: Vec<Token>,
    pub input: Currency,
    pub output: Currency,
    pub mid_price: Price,
}

impl Route {
    pub fn new(pairs: Vec<Pair>, input: Currency, output: Currency) -> Result<Self> {
        let first = pairs.first().ok_or(Error::InvalidRoute("no pairs"))?;
        let chain_id = ChainId::try_from(first.chain_id())
            .map_err(|_| Error::InvalidRoute("unsupported chain"))?;

        if pairs.iter().any(|pair| pair.chain_id() != first.chain_id()) {
            return Err(Error::ChainMismatch);
        }

        let wrapped_input = input.wrapped(chain_id);
        if !first.involves_token(&wrapped_input) {
            return Err(Error::InvalidRoute("input not in first pair"));
        }

        let mut path = vec![wrapped_input];
        for pair in &pairs {
            let current = path.last().ok_or(Error::InvalidRoute("empty path"))?;
            let next = pair
                .other_token(current)
                .map_err(|_| Error::InvalidRoute("disconnected pairs"))?
                .clone();
            path.push(next);
        }

        let wrapped_output = output.wrapped(chain_id);
        if path.last() != Some(&wrapped_output) {
            return Err(Error::InvalidRoute("output not in last pair"));
        }

        let mut prices = pairs.iter().zip(&path).map(|(pair, token)| pair.price_of(token));
        let mut mid = prices.next().ok_or(Error::InvalidRoute("no pairs"))??;
        for price in prices {
            mid = mid.multiply(&price?)?;
        }
        let mid_price = Price::new(
            input.clone(),
            output.clone(),
            mid.raw.denominator,
            mid.raw.numerator,
        );

        Ok(Self {
            pairs,
            path,
            input,
            output,
            mid_price,
        })
    }

    pub fn chain_id(&self) -> u64 {
        self.path[0].chain_id
    }

    /// Token addresses along the route, as passed to the router.
    pub fn addresses(&self) -> Vec<String> {
        self.path.iter().map(|token| token.address.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethnum::U256;
    use pretty_assertions::assert_eq;

    fn token(address: &str, symbol: &str) -> Token {
        Token::new(ChainId::Mainnet, address, 18, symbol, symbol)
    }

    #[test]
    fn test_route_through_weth() {
        let weth = Token::wrapped_native(ChainId::Mainnet);
        let dai = token("0x6B175474E89094C44Da98b954EedeAC495271d0F", "DAI");
        let sushi = token("0x6B3595068778DD592e39A122f4f5a5cF09C90fE2", "SUSHI");

        let dai_weth = Pair::new(
            "0x01",
            (dai.clone(), U256::new(2000)),
            (weth.clone(), U256::new(1)),
        )
        .unwrap();
        let weth_sushi = Pair::new(
            "0x02",
            (weth.clone(), U256::new(1)),
            (sushi.clone(), U256::new(500)),
        )
        .unwrap();

        let route = Route::new(
            vec![dai_weth, weth_sushi],
            dai.clone().into(),
            sushi.clone().into(),
        )
        .unwrap();
        assert_eq!(route.path, vec![dai, weth, sushi]);
        // 1 DAI = 1/2000 WETH = 500/2000 SUSHI
        assert_eq!(route.mid_price.to_significant(4), "0.25");
    }

    #[test]
    fn test_native_input_uses_wrapped_token() {
        let weth = Token::wrapped_native(ChainId::Mainnet);
        let dai = token("0x6B175474E89094C44Da98b954EedeAC495271d0F", "DAI");
        let pair = Pair::new(
            "0x01",
            (dai.clone(), U256::new(2000)),
            (weth, U256::new(1)),
        )
        .unwrap();

        let route = Route::new(vec![pair.clone()], Currency::Native, dai.clone().into()).unwrap();
        assert_eq!(route.input, Currency::Native);
        assert_eq!(route.mid_price.to_significant(4), "2000");

        assert_eq!(
            Route::new(vec![pair], dai.clone().into(), dai.into()),
            Err(Error::InvalidRoute("output not in last pair"))
        );
    }
}
