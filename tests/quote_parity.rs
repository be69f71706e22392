//! # Quote Parity Tests
//!
//! Cross-module scenarios driven through the public API: traversal, fee
//! engine, and orchestrator composed the way settlement composes them.
//! These pin the economic invariants the rounding directions exist for.

#[cfg(test)]
mod tests {
    use virtual_curve_core::math::*;
    use virtual_curve_core::*;

    fn launch_config() -> PoolConfig {
        PoolConfig {
            curve: vec![CurveSegment {
                sqrt_price_bound: MAX_SQRT_PRICE,
                liquidity: 36_962_925_477_511_650_462_531_123_845_256_970_240,
            }],
            sqrt_start_price: sqrt_price_from_bin_id(-100, 80).unwrap(),
            migration_quote_threshold: 50_000_000_000,
            collect_fee_mode: CollectFeeMode::OutputToken as u8,
            activation_type: ActivationType::Slot as u8,
        }
    }

    fn no_fee_pool(config: &PoolConfig) -> PoolState {
        PoolState {
            sqrt_price: config.sqrt_start_price,
            ..Default::default()
        }
    }

    // Full fee machinery: exponential schedule five periods into decay, a
    // seeded volatility tracker, and a protocol/referral split.
    fn scheduled_pool(sqrt_price: u128) -> PoolState {
        PoolState {
            pool_fees: PoolFees {
                base_fee: BaseFeeParams {
                    cliff_fee_numerator: 100_000_000,
                    number_of_period: 10,
                    period_frequency: 100,
                    reduction_factor: 100,
                    fee_scheduler_mode: FeeSchedulerMode::Exponential as u8,
                },
                dynamic_fee: DynamicFeeParams {
                    initialized: 1,
                    bin_step: 80,
                    variable_fee_control: 5000,
                    volatility_accumulator: 10_000,
                },
                protocol_fee_percent: 20,
                referral_fee_percent: 25,
            },
            sqrt_price,
            activation_point: 1000,
            ..Default::default()
        }
    }

    fn two_segment_config() -> PoolConfig {
        let config = PoolConfig {
            curve: vec![
                CurveSegment {
                    sqrt_price_bound: 2 * ONE_Q64,
                    liquidity: 1000u128 << 64,
                },
                CurveSegment {
                    sqrt_price_bound: 4 * ONE_Q64,
                    liquidity: 500u128 << 64,
                },
            ],
            sqrt_start_price: ONE_Q64,
            migration_quote_threshold: 1_000_000,
            collect_fee_mode: CollectFeeMode::OutputToken as u8,
            activation_type: ActivationType::Slot as u8,
        };
        config.validate().unwrap();
        config
    }

    #[test]
    fn test_split_order_never_beats_combined() {
        let config = launch_config();
        let pool = no_fee_pool(&config);

        let combined = quote_exact_in(&pool, &config, false, 1_000_000_000, false, 0).unwrap();
        assert_eq!(combined.amount_out, 4921601219);

        // Same total input in two legs, re-quoting from the first landing
        let first = quote_exact_in(&pool, &config, false, 600_000_000, false, 0).unwrap();
        let mut mid_pool = pool;
        mid_pool.sqrt_price = first.next_sqrt_price;
        let second = quote_exact_in(&mid_pool, &config, false, 400_000_000, false, 0).unwrap();

        assert!(first.amount_out + second.amount_out <= combined.amount_out);
        assert!(second.next_sqrt_price <= combined.next_sqrt_price);
    }

    #[test]
    fn test_round_trip_never_profits() {
        let config = launch_config();
        let pool = no_fee_pool(&config);
        let spent = 1_000_000_000u64;

        let buy = quote_exact_in(&pool, &config, false, spent, false, 0).unwrap();

        // Sell everything back with no fee in the way
        let mut after_buy = pool;
        after_buy.sqrt_price = buy.next_sqrt_price;
        let sell = quote_exact_in(&after_buy, &config, true, buy.amount_out, false, 0).unwrap();

        assert_eq!(sell.amount_out, 999_999_999);
        assert!(sell.amount_out <= spent);
        assert!(sell.next_sqrt_price <= buy.next_sqrt_price);
    }

    #[test]
    fn test_fee_split_conserves_traversal_output() {
        let config = two_segment_config();
        let pool = scheduled_pool(ONE_Q64);

        // Five periods past activation the schedule has decayed the cliff
        // and the volatility tracker contributes on top
        let current_point = 1500;
        let gross = get_swap_amount_from_quote_to_base(&config, pool.sqrt_price, 1500).unwrap();
        assert_eq!(gross.output_amount, 583);

        let quote = quote_exact_in(&pool, &config, false, 1500, true, current_point).unwrap();
        assert_eq!(quote.amount_out, 528);
        assert_eq!(quote.fee.trading, 44);
        assert_eq!(quote.fee.protocol, 9);
        assert_eq!(quote.fee.referral, 2);
        assert_eq!(
            quote.amount_out + quote.fee.trading + quote.fee.protocol + quote.fee.referral,
            gross.output_amount
        );
        // Output-side fees leave the landing price alone
        assert_eq!(quote.next_sqrt_price, gross.next_sqrt_price);
    }

    #[test]
    fn test_pre_activation_quotes_fully_decayed_fee() {
        let config = two_segment_config();
        let pool = scheduled_pool(ONE_Q64);

        // Before activation the schedule clamps to its final period, so an
        // early quote must agree with one taken long after decay finished
        let before = quote_exact_in(&pool, &config, false, 1500, true, 500).unwrap();
        let long_after = quote_exact_in(&pool, &config, false, 1500, true, 999_999).unwrap();
        assert_eq!(before, long_after);
    }

    #[test]
    fn test_identical_snapshots_identical_quotes() {
        let config = launch_config();
        let pool = no_fee_pool(&config);

        let first = quote_exact_in(&pool, &config, false, 123_456_789, false, 42).unwrap();
        let second = quote_exact_in(&pool, &config, false, 123_456_789, false, 42).unwrap();
        assert_eq!(first, second);
    }
}
