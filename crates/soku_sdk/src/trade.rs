use crate::{
    amount::CurrencyAmount,
    constants::{ChainId, TradeType},
    currency::{Currency, Token},
    fraction::{Fraction, Percent},
    pair::Pair,
    price::Price,
    route::Route,
    Error, Result,
};
use ethnum::U256;
use std::cmp::Ordering;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestTradeOptions {
    /// How many trades to keep.
    pub max_num_results: usize,
    /// Longest route to consider, in pairs.
    pub max_hops: usize,
}

impl Default for BestTradeOptions {
    fn default() -> Self {
        Self {
            max_num_results: 3,
            max_hops: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trade {
    pub route: Route,
    pub trade_type: TradeType,
    pub input_amount: CurrencyAmount,
    pub output_amount: CurrencyAmount,
    pub execution_price: Price,
    pub next_mid_price: Price,
    pub price_impact: Percent,
}

impl Trade {
    pub fn exact_in(route: Route, amount_in: CurrencyAmount) -> Result<Self> {
        Self::new(route, amount_in, TradeType::ExactInput)
    }

    pub fn exact_out(route: Route, amount_out: CurrencyAmount) -> Result<Self> {
        Self::new(route, amount_out, TradeType::ExactOutput)
    }

    fn new(route: Route, amount: CurrencyAmount, trade_type: TradeType) -> Result<Self> {
        let chain_id = chain_of(&route)?;
        let hops = route.pairs.len();
        let mut next_pairs = route.pairs.clone();

        let (input_amount, output_amount) = match trade_type {
            TradeType::ExactInput => {
                if amount.currency != route.input {
                    return Err(Error::CurrencyMismatch);
                }
                let mut current = amount.wrapped(chain_id);
                for (i, pair) in route.pairs.iter().enumerate() {
                    let (output, next) = pair.get_output_amount(&current)?;
                    next_pairs[i] = next;
                    current = output;
                }
                let output = CurrencyAmount::new(route.output.clone(), current.raw);
                (amount, output)
            }
            TradeType::ExactOutput => {
                if amount.currency != route.output {
                    return Err(Error::CurrencyMismatch);
                }
                let mut current = amount.wrapped(chain_id);
                for i in (0..hops).rev() {
                    let (input, next) = route.pairs[i].get_input_amount(&current)?;
                    next_pairs[i] = next;
                    current = input;
                }
                let input = CurrencyAmount::new(route.input.clone(), current.raw);
                (input, amount)
            }
        };

        let execution_price = Price::from_amounts(&input_amount, &output_amount);
        let next_mid_price = Route::new(next_pairs, route.input.clone(), route.output.clone())?
            .mid_price;
        let price_impact = compute_price_impact(&route.mid_price, &input_amount, &output_amount);

        Ok(Self {
            route,
            trade_type,
            input_amount,
            output_amount,
            execution_price,
            next_mid_price,
            price_impact,
        })
    }

    /// Least output accepted under `slippage`.
    pub fn minimum_amount_out(&self, slippage: &Percent) -> CurrencyAmount {
        if self.trade_type == TradeType::ExactOutput {
            return self.output_amount.clone();
        }
        let factor = Fraction::from_integer(U256::ONE)
            .add(slippage.fraction())
            .invert();
        let raw = factor
            .multiply(&Fraction::from_integer(self.output_amount.raw))
            .quotient();
        CurrencyAmount::new(self.output_amount.currency.clone(), raw)
    }

    /// Most input spent under `slippage`.
    pub fn maximum_amount_in(&self, slippage: &Percent) -> CurrencyAmount {
        if self.trade_type == TradeType::ExactInput {
            return self.input_amount.clone();
        }
        let factor = Fraction::from_integer(U256::ONE).add(slippage.fraction());
        let raw = factor
            .multiply(&Fraction::from_integer(self.input_amount.raw))
            .quotient();
        CurrencyAmount::new(self.input_amount.currency.clone(), raw)
    }

    /// Best trades for spending exactly `amount_in`, best first.
    pub fn best_trade_exact_in(
        pairs: &[Pair],
        amount_in: &CurrencyAmount,
        currency_out: &Currency,
        options: BestTradeOptions,
    ) -> Vec<Trade> {
        let mut best = Vec::new();
        let Some(chain_id) = pairs.first().and_then(|pair| ChainId::try_from(pair.chain_id()).ok())
        else {
            return best;
        };
        if options.max_hops == 0 || options.max_num_results == 0 {
            return best;
        }

        let token_out = currency_out.wrapped(chain_id);
        let search = Search {
            original: amount_in,
            target_currency: currency_out,
            target_token: &token_out,
            options,
        };
        search.exact_in(
            pairs,
            &amount_in.wrapped(chain_id),
            &mut Vec::new(),
            options.max_hops,
            &mut best,
        );
        best
    }

    /// Best trades for receiving exactly `amount_out`, best first.
    pub fn best_trade_exact_out(
        pairs: &[Pair],
        currency_in: &Currency,
        amount_out: &CurrencyAmount,
        options: BestTradeOptions,
    ) -> Vec<Trade> {
        let mut best = Vec::new();
        let Some(chain_id) = pairs.first().and_then(|pair| ChainId::try_from(pair.chain_id()).ok())
        else {
            return best;
        };
        if options.max_hops == 0 || options.max_num_results == 0 {
            return best;
        }

        let token_in = currency_in.wrapped(chain_id);
        let search = Search {
            original: amount_out,
            target_currency: currency_in,
            target_token: &token_in,
            options,
        };
        search.exact_out(
            pairs,
            &amount_out.wrapped(chain_id),
            &mut Vec::new(),
            options.max_hops,
            &mut best,
        );
        best
    }
}

fn chain_of(route: &Route) -> Result<ChainId> {
    ChainId::try_from(route.chain_id()).map_err(|_| Error::InvalidRoute("unsupported chain"))
}

/// Difference between the mid price quote and the actual output, as a share of the quote.
fn compute_price_impact(
    mid_price: &Price,
    input_amount: &CurrencyAmount,
    output_amount: &CurrencyAmount,
) -> Percent {
    let exact_quote = mid_price
        .raw
        .multiply(&Fraction::from_integer(input_amount.raw));
    exact_quote
        .checked_sub(&Fraction::from_integer(output_amount.raw))
        .map(|slippage| Percent(slippage.divide(&exact_quote)))
        .unwrap_or(Percent::ZERO)
}

/// Orders trades best first: more output (or less input), then lower price impact, then fewer hops.
fn compare_trades(a: &Trade, b: &Trade) -> Ordering {
    let by_amounts = if a.output_amount.raw != b.output_amount.raw {
        b.output_amount.raw.cmp(&a.output_amount.raw)
    } else {
        a.input_amount.raw.cmp(&b.input_amount.raw)
    };

    by_amounts
        .then_with(|| a.price_impact.0.cmp_value(&b.price_impact.0))
        .then_with(|| a.route.path.len().cmp(&b.route.path.len()))
}

fn sorted_insert(best: &mut Vec<Trade>, trade: Trade, max_size: usize) {
    let index = best
        .iter()
        .position(|existing| compare_trades(&trade, existing) == Ordering::Less)
        .unwrap_or(best.len());
    if index >= max_size {
        return;
    }
    best.insert(index, trade);
    best.truncate(max_size);
}

struct Search<'a> {
    original: &'a CurrencyAmount,
    target_currency: &'a Currency,
    target_token: &'a Token,
    options: BestTradeOptions,
}

impl Search<'_> {
    fn exact_in(
        &self,
        pairs: &[Pair],
        amount_in: &CurrencyAmount,
        current_pairs: &mut Vec<Pair>,
        hops_left: usize,
        best: &mut Vec<Trade>,
    ) {
        let Some(token_in) = amount_in.token() else {
            return;
        };

        for (i, pair) in pairs.iter().enumerate() {
            if !pair.involves_token(token_in) {
                continue;
            }
            let amount_out = match pair.get_output_amount(amount_in) {
                Ok((amount_out, _)) => amount_out,
                Err(error) => {
                    debug!("skipping pair {}: {error}", pair.address);
                    continue;
                }
            };

            if amount_out.token() == Some(self.target_token) {
                current_pairs.push(pair.clone());
                let trade = Route::new(
                    current_pairs.clone(),
                    self.original.currency.clone(),
                    self.target_currency.clone(),
                )
                .and_then(|route| Trade::exact_in(route, self.original.clone()));
                current_pairs.pop();

                if let Ok(trade) = trade {
                    sorted_insert(best, trade, self.options.max_num_results);
                }
            } else if hops_left > 1 && pairs.len() > 1 {
                let remaining: Vec<Pair> =
                    pairs[..i].iter().chain(&pairs[i + 1..]).cloned().collect();
                current_pairs.push(pair.clone());
                self.exact_in(&remaining, &amount_out, current_pairs, hops_left - 1, best);
                current_pairs.pop();
            }
        }
    }

    fn exact_out(
        &self,
        pairs: &[Pair],
        amount_out: &CurrencyAmount,
        current_pairs: &mut Vec<Pair>,
        hops_left: usize,
        best: &mut Vec<Trade>,
    ) {
        let Some(token_out) = amount_out.token() else {
            return;
        };

        for (i, pair) in pairs.iter().enumerate() {
            if !pair.involves_token(token_out) {
                continue;
            }
            let amount_in = match pair.get_input_amount(amount_out) {
                Ok((amount_in, _)) => amount_in,
                Err(error) => {
                    debug!("skipping pair {}: {error}", pair.address);
                    continue;
                }
            };

            if amount_in.token() == Some(self.target_token) {
                // the search walks backwards, so the pair goes in front
                current_pairs.insert(0, pair.clone());
                let trade = Route::new(
                    current_pairs.clone(),
                    self.target_currency.clone(),
                    self.original.currency.clone(),
                )
                .and_then(|route| Trade::exact_out(route, self.original.clone()));
                current_pairs.remove(0);

                if let Ok(trade) = trade {
                    sorted_insert(best, trade, self.options.max_num_results);
                }
            } else if hops_left > 1 && pairs.len() > 1 {
                let remaining: Vec<Pair> =
                    pairs[..i].iter().chain(&pairs[i + 1..]).cloned().collect();
                current_pairs.insert(0, pair.clone());
                self.exact_out(&remaining, &amount_in, current_pairs, hops_left - 1, best);
                current_pairs.remove(0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn token(address: &str, symbol: &str) -> Token {
        Token::new(ChainId::Mainnet, address, 18, symbol, symbol)
    }

    fn dai() -> Token {
        token("0x6B175474E89094C44Da98b954EedeAC495271d0F", "DAI")
    }

    fn sushi() -> Token {
        token("0x6B3595068778DD592e39A122f4f5a5cF09C90fE2", "SUSHI")
    }

    fn usdc() -> Token {
        token("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48", "USDC")
    }

    fn pair(a: Token, reserve_a: u128, b: Token, reserve_b: u128, address: &str) -> Pair {
        Pair::new(address, (a, U256::new(reserve_a)), (b, U256::new(reserve_b))).unwrap()
    }

    fn pairs() -> Vec<Pair> {
        vec![
            pair(dai(), 1_000_000, sushi(), 1_000_000, "0x01"),
            pair(dai(), 1_000_000, usdc(), 1_000_000, "0x02"),
            pair(usdc(), 1_000_000, sushi(), 1_000_000, "0x03"),
        ]
    }

    #[test]
    fn test_exact_in_prefers_direct_route() {
        let amount_in = CurrencyAmount::from_token(dai(), 1_000u128);
        let trades = Trade::best_trade_exact_in(
            &pairs(),
            &amount_in,
            &sushi().into(),
            BestTradeOptions::default(),
        );

        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].route.pairs.len(), 1);
        assert_eq!(trades[1].route.pairs.len(), 2);
        assert!(trades[0].output_amount.raw > trades[1].output_amount.raw);
    }

    #[test]
    fn test_single_hop_limit() {
        let amount_in = CurrencyAmount::from_token(dai(), 1_000u128);
        let options = BestTradeOptions {
            max_hops: 1,
            ..Default::default()
        };
        let trades = Trade::best_trade_exact_in(&pairs(), &amount_in, &sushi().into(), options);
        assert_eq!(trades.len(), 1);
    }

    #[test]
    fn test_exact_out_finds_both_routes() {
        let amount_out = CurrencyAmount::from_token(sushi(), 1_000u128);
        let trades = Trade::best_trade_exact_out(
            &pairs(),
            &dai().into(),
            &amount_out,
            BestTradeOptions::default(),
        );

        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].route.path, vec![dai(), sushi()]);
        assert!(trades[0].input_amount.raw < trades[1].input_amount.raw);
        assert_eq!(trades[0].output_amount, amount_out);
    }

    #[test]
    fn test_price_impact_and_slippage_bounds() {
        let route = Route::new(
            vec![pair(dai(), 1_000_000, sushi(), 1_000_000, "0x01")],
            dai().into(),
            sushi().into(),
        )
        .unwrap();
        let trade = Trade::exact_in(route, CurrencyAmount::from_token(dai(), 100_000u128)).unwrap();

        // 100000 * 997 * 1000000 / (1000000 * 1000 + 100000 * 997) = 90661.08
        assert_eq!(trade.output_amount.raw, U256::new(90_661));
        assert_eq!(trade.price_impact.to_significant(4), "9.339");

        // 90661 / 1.005 = 90209.95
        let minimum = trade.minimum_amount_out(&Percent::from_bips(50));
        assert_eq!(minimum.raw, U256::new(90_209));
        assert_eq!(trade.maximum_amount_in(&Percent::from_bips(50)), trade.input_amount);
    }

    #[test]
    fn test_mismatched_amount_is_rejected() {
        let route = Route::new(
            vec![pair(dai(), 1_000, sushi(), 1_000, "0x01")],
            dai().into(),
            sushi().into(),
        )
        .unwrap();
        assert_eq!(
            Trade::exact_in(route, CurrencyAmount::from_token(sushi(), 10u128)),
            Err(Error::CurrencyMismatch)
        );
    }
}
