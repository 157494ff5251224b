use impliedvol_rs::prelude::*;

#[test]
fn test_reference_implied_volatility() {
    // S=30, K=28, T=0.5, r=2.5%, market price 5 -> about 45.83%
    let contract = OptionContract::call(30.0, 28.0, 0.5, 0.025);
    let result = implied_volatility(5.0, &contract, 0.2, &SolverConfig::default()).unwrap();

    assert!((result.sigma_percent() - 45.83).abs() < 0.01);
    assert!(result.iterations <= 10);
    assert!(result.price_error.abs() < 1e-6);
}

#[test]
fn test_round_trip_over_vol_grid() {
    let contracts = [
        (100.0, 100.0, 1.0, 0.05),
        (100.0, 90.0, 0.5, 0.03),
        (100.0, 110.0, 0.5, 0.03),
        (30.0, 28.0, 0.5, 0.025),
        (50.0, 50.0, 2.0, 0.0),
    ];
    let config = SolverConfig::default();

    for (spot, strike, time, rate) in contracts {
        for option_type in [OptionType::Call, OptionType::Put] {
            let contract = OptionContract::new(spot, strike, time, rate, option_type);
            for sigma_true in [0.05, 0.1, 0.2, 0.3, 0.5, 0.75, 1.0, 1.5, 2.0] {
                let market_price = BlackScholes::price(&contract, sigma_true).unwrap();
                let result = implied_volatility(market_price, &contract, 0.2, &config)
                    .unwrap_or_else(|err| {
                        panic!("{option_type} S={spot} K={strike} sigma={sigma_true}: {err}")
                    });
                assert!(
                    (result.sigma - sigma_true).abs() < 1e-4,
                    "{option_type} S={spot} K={strike}: got {} expected {sigma_true}",
                    result.sigma
                );
            }
        }
    }
}

/// Price is flat in sigma at double precision: any sigma reproduces it.
fn is_ill_conditioned(result: &ImpliedVol) -> bool {
    result.price_error.abs() < 1e-10 && !result.is_well_conditioned(1e-8)
}

#[test]
fn test_round_trip_away_from_the_money() {
    // Undamped Newton from 0.2 overshoots below zero on many of these, and
    // that is reported as a failure. Bisection must then recover sigma.
    let contracts = [
        (100.0, 80.0, 0.25, 0.03),
        (100.0, 125.0, 0.5, 0.01),
        (100.0, 70.0, 0.5, 0.03),
        (100.0, 130.0, 0.5, 0.03),
        (50.0, 55.0, 2.0, -0.005),
    ];
    let config = SolverConfig::default();
    let mut fallbacks = 0;

    for (spot, strike, time, rate) in contracts {
        for option_type in [OptionType::Call, OptionType::Put] {
            let contract = OptionContract::new(spot, strike, time, rate, option_type);
            for sigma_true in [0.05, 0.1, 0.2, 0.3, 0.5, 0.75, 1.0, 1.5, 2.0] {
                let market_price = BlackScholes::price(&contract, sigma_true).unwrap();
                let label = format!("{option_type} S={spot} K={strike} T={time} sigma={sigma_true}");

                let result = match implied_volatility(market_price, &contract, 0.2, &config) {
                    Ok(result) => result,
                    Err(SolverError::NonConvergence { .. } | SolverError::Degenerate { .. }) => {
                        fallbacks += 1;
                        match solve_iv_bisection(market_price, &contract, &config) {
                            Ok(result) => result,
                            Err(SolverError::PriceOutOfBounds { .. }) => {
                                // Only acceptable when the price cannot see sigma at all.
                                let vega = BlackScholes::vega(&contract, sigma_true).unwrap();
                                assert!(vega < 1e-8, "{label}: bisection rejected, vega {vega}");
                                continue;
                            }
                            Err(err) => panic!("{label}: bisection failed: {err}"),
                        }
                    }
                    Err(err) => panic!("{label}: unexpected {err}"),
                };

                assert!(
                    (result.sigma - sigma_true).abs() < 1e-4 || is_ill_conditioned(&result),
                    "{label}: got {} (vega {}, price error {})",
                    result.sigma,
                    result.vega,
                    result.price_error
                );
            }
        }
    }

    assert!(fallbacks > 0);
}

#[test]
fn test_flat_price_reports_tiny_vega() {
    // Deep ITM call at 5% vol: the time value is below one ulp of the price.
    let contract = OptionContract::call(100.0, 80.0, 0.25, 0.03);
    let market_price = BlackScholes::price(&contract, 0.05).unwrap();

    let config = SolverConfig::default();
    let result = implied_volatility(market_price, &contract, 0.2, &config)
        .or_else(|_| solve_iv_bisection(market_price, &contract, &config))
        .unwrap();
    assert!(result.price_error.abs() < 1e-10);
    assert!(result.vega < 1e-8, "vega {}", result.vega);
    assert!(!result.is_well_conditioned(1e-8));

    // An at-the-money solve is well conditioned.
    let atm = OptionContract::call(100.0, 100.0, 1.0, 0.05);
    let atm_price = BlackScholes::price(&atm, 0.3).unwrap();
    let result = implied_volatility(atm_price, &atm, 0.2, &SolverConfig::default()).unwrap();
    assert!(result.is_well_conditioned(1e-8));
    assert!((result.vega - BlackScholes::vega(&atm, result.sigma).unwrap()).abs() < 1e-12);
}

#[test]
fn test_degenerate_vega_is_not_nan() {
    // Far out of the money with days to expiry: vega underflows below 1e-12.
    let contract = OptionContract::call(100.0, 400.0, 2.0 / 365.0, 0.01);
    assert!(BlackScholes::vega(&contract, 0.2).unwrap() < 1e-12);

    let result = implied_volatility(0.5, &contract, 0.2, &SolverConfig::default());
    match result {
        Err(SolverError::Degenerate { sigma, vega, .. }) => {
            assert!(sigma.is_finite());
            assert!(vega.is_finite());
        }
        other => panic!("expected Degenerate, got {other:?}"),
    }
}

#[test]
fn test_price_below_intrinsic_never_yields_sigma() {
    // Deep ITM call quoted far below intrinsic.
    let contract = OptionContract::call(100.0, 50.0, 1.0, 0.05);
    let result = implied_volatility(0.01, &contract, 0.2, &SolverConfig::default());

    assert!(
        matches!(
            result,
            Err(SolverError::NonConvergence { .. }) | Err(SolverError::Degenerate { .. })
        ),
        "unexpected {result:?}"
    );
}

#[test]
fn test_price_above_upper_bound_never_yields_sigma() {
    let contract = OptionContract::call(100.0, 100.0, 1.0, 0.05);
    let result = implied_volatility(150.0, &contract, 0.2, &SolverConfig::default());
    assert!(result.is_err(), "unexpected {result:?}");
}

#[test]
fn test_exhaustion_is_distinguishable() {
    let contract = OptionContract::call(100.0, 100.0, 1.0, 0.05);
    let market_price = BlackScholes::price(&contract, 0.9).unwrap();
    let config = SolverConfig::default().with_max_iterations(2);

    let outcome = newton_raphson(market_price, &contract, 0.2, &config).unwrap();
    assert!(!outcome.is_converged());
    match outcome {
        SolverOutcome::Exhausted {
            last_estimate,
            iterations,
        } => {
            assert_eq!(iterations, 2);
            assert!(last_estimate > 0.2);
        }
        other => panic!("expected Exhausted, got {other:?}"),
    }

    let result = implied_volatility(market_price, &contract, 0.2, &config);
    assert!(matches!(
        result,
        Err(SolverError::NonConvergence {
            cause: NonConvergenceCause::IterationLimit,
            ..
        })
    ));
}

#[test]
fn test_caller_fallback_to_bisection() {
    let contract = OptionContract::put(100.0, 100.0, 1.0, 0.05);
    let market_price = BlackScholes::price(&contract, 0.9).unwrap();
    let tight = SolverConfig::default().with_max_iterations(2);

    let result = implied_volatility(market_price, &contract, 0.2, &tight)
        .or_else(|_| solve_iv_bisection(market_price, &contract, &SolverConfig::default()))
        .unwrap();
    assert!((result.sigma - 0.9).abs() < 1e-4);
}

#[test]
fn test_caller_retry_with_brenner_guess() {
    let contract = OptionContract::call(100.0, 100.0, 0.25, 0.0);
    let market_price = BlackScholes::price(&contract, 0.6).unwrap();
    let guess = brenner_subrahmanyam_guess(&contract, market_price);

    let result =
        implied_volatility(market_price, &contract, guess, &SolverConfig::default()).unwrap();
    assert!((result.sigma - 0.6).abs() < 1e-4);
}

#[test]
fn test_error_serializes_through_outcome() {
    let contract = OptionContract::call(100.0, 50.0, 1.0, 0.05);
    let outcome = newton_raphson(0.01, &contract, 0.2, &SolverConfig::default()).unwrap();
    let json = serde_json::to_string(&outcome).unwrap();
    assert!(json.starts_with(r#"{"Diverged""#));
}
