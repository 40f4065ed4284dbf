//! Share prices and shareholder bonuses.
//!
//! The price table is nine size buckets wide and shifted one bucket per tier:
//!
//! | size   | 2 | 3 | 4 | 5 | 6-10 | 11-20 | 21-30 | 31-40 | 41+ |
//! |--------|---|---|---|---|------|-------|-------|-------|-----|
//! | bucket | 0 | 1 | 2 | 3 | 4    | 5     | 6     | 7     | 8   |
//!
//! `price = (bucket + tier - 1 + 2) × $100`, so a two-tile cheap chain trades
//! at $200 and a 41-tile premium chain at $1200. A chain below two tiles has
//! no price.

use super::chain::ChainName;

fn size_bucket(size: usize) -> u32 {
    match size {
        0..=5 => (size as u32).saturating_sub(2),
        6..=10 => 4,
        11..=20 => 5,
        21..=30 => 6,
        31..=40 => 7,
        _ => 8,
    }
}

/// Price of one share of `chain` at `size` tiles.
#[must_use]
pub fn stock_price(chain: ChainName, size: usize) -> u32 {
    if size < 2 {
        return 0;
    }
    let tier_offset = chain.tier() as u32 - 1;
    (size_bucket(size) + tier_offset + 2) * 100
}

/// Bonus for the largest shareholder: ten times the share price.
#[must_use]
pub fn majority_bonus(chain: ChainName, size: usize) -> u32 {
    stock_price(chain, size) * 10
}

/// Bonus for the second-largest shareholder: five times the share price.
#[must_use]
pub fn minority_bonus(chain: ChainName, size: usize) -> u32 {
    stock_price(chain, size) * 5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unpriced_below_two_tiles() {
        for chain in ChainName::ALL {
            assert_eq!(stock_price(chain, 0), 0);
            assert_eq!(stock_price(chain, 1), 0);
        }
    }

    #[test]
    fn test_price_table_corners() {
        assert_eq!(stock_price(ChainName::Tower, 2), 200);
        assert_eq!(stock_price(ChainName::Luxor, 41), 1000);
        assert_eq!(stock_price(ChainName::American, 2), 300);
        assert_eq!(stock_price(ChainName::Festival, 5), 600);
        assert_eq!(stock_price(ChainName::Worldwide, 35), 1000);
        assert_eq!(stock_price(ChainName::Continental, 2), 400);
        assert_eq!(stock_price(ChainName::Imperial, 108), 1200);
    }

    #[test]
    fn test_bucket_edges() {
        let chain = ChainName::Tower;
        assert_eq!(stock_price(chain, 6), stock_price(chain, 10));
        assert_ne!(stock_price(chain, 10), stock_price(chain, 11));
        assert_eq!(stock_price(chain, 11), stock_price(chain, 20));
        assert_eq!(stock_price(chain, 21), stock_price(chain, 30));
        assert_eq!(stock_price(chain, 31), stock_price(chain, 40));
        assert_eq!(stock_price(chain, 41), 1000);
    }

    #[test]
    fn test_prices_never_decrease_with_size() {
        for chain in ChainName::ALL {
            for size in 2..108 {
                assert!(stock_price(chain, size) <= stock_price(chain, size + 1));
            }
        }
    }

    #[test]
    fn test_bonuses() {
        assert_eq!(majority_bonus(ChainName::Tower, 2), 2000);
        assert_eq!(minority_bonus(ChainName::Tower, 2), 1000);
        assert_eq!(majority_bonus(ChainName::Imperial, 11), 9000);
        assert_eq!(minority_bonus(ChainName::Imperial, 11), 4500);
    }
}
