use impliedvol_rs::prelude::*;

const CONTRACTS: [(f64, f64, f64, f64); 6] = [
    (100.0, 100.0, 1.0, 0.05),
    (100.0, 80.0, 0.25, 0.03),
    (100.0, 125.0, 0.5, 0.01),
    (30.0, 28.0, 0.5, 0.025),
    (2500.0, 2400.0, 30.0 / 365.0, 0.0),
    (50.0, 55.0, 2.0, -0.005),
];

const VOLS: [f64; 7] = [0.05, 0.1, 0.2, 0.35, 0.6, 1.0, 2.0];

#[test]
fn test_put_call_parity() {
    for (spot, strike, time, rate) in CONTRACTS {
        let call = OptionContract::call(spot, strike, time, rate);
        let put = OptionContract::put(spot, strike, time, rate);
        let forward_gap = spot - strike * (-rate * time).exp();

        for vol in VOLS {
            let call_price = BlackScholes::price(&call, vol).unwrap();
            let put_price = BlackScholes::price(&put, vol).unwrap();
            assert!(
                (call_price - put_price - forward_gap).abs() < 1e-8,
                "parity broken for S={spot} K={strike} T={time} r={rate} vol={vol}"
            );
        }
    }
}

#[test]
fn test_price_strictly_increasing_in_vol() {
    for (spot, strike, time, rate) in CONTRACTS {
        for option_type in [OptionType::Call, OptionType::Put] {
            let contract = OptionContract::new(spot, strike, time, rate, option_type);
            let mut previous = BlackScholes::price(&contract, 0.05).unwrap();
            let mut vol = 0.05;
            while vol < 2.0 {
                vol += 0.05;
                let price = BlackScholes::price(&contract, vol).unwrap();
                assert!(
                    price > previous,
                    "{option_type} S={spot} K={strike} not increasing at vol={vol}"
                );
                previous = price;
            }
        }
    }
}

#[test]
fn test_vega_matches_finite_difference() {
    let bump = 1e-5;
    for (spot, strike, time, rate) in CONTRACTS {
        for option_type in [OptionType::Call, OptionType::Put] {
            let contract = OptionContract::new(spot, strike, time, rate, option_type);
            for vol in [0.1, 0.2, 0.5, 1.0] {
                let up = BlackScholes::price(&contract, vol + bump).unwrap();
                let down = BlackScholes::price(&contract, vol - bump).unwrap();
                let numerical = (up - down) / (2.0 * bump);
                let analytic = BlackScholes::vega(&contract, vol).unwrap();
                assert!(
                    (numerical - analytic).abs() < 1e-4 * analytic.abs().max(1.0),
                    "vega mismatch {analytic} vs {numerical} for S={spot} K={strike} vol={vol}"
                );
            }
        }
    }
}

#[test]
fn test_delta_and_gamma_match_finite_difference() {
    let contract = OptionContract::put(100.0, 95.0, 0.75, 0.04);
    let vol = 0.3;
    let bump = 1e-3;

    let at = |spot: f64| {
        let bumped = OptionContract { spot, ..contract };
        BlackScholes::price(&bumped, vol).unwrap()
    };

    let greeks = BlackScholes::greeks(&contract, vol).unwrap();
    let delta = (at(100.0 + bump) - at(100.0 - bump)) / (2.0 * bump);
    let gamma = (at(100.0 + bump) - 2.0 * at(100.0) + at(100.0 - bump)) / (bump * bump);

    assert!((greeks.delta - delta).abs() < 1e-6);
    assert!((greeks.gamma - gamma).abs() < 1e-4);
}

#[test]
fn test_theta_and_rho_match_finite_difference() {
    for option_type in [OptionType::Call, OptionType::Put] {
        let contract = OptionContract::new(100.0, 105.0, 1.0, 0.05, option_type);
        let vol = 0.25;
        let greeks = BlackScholes::greeks(&contract, vol).unwrap();

        let bump = 1e-5;
        let with = |time: f64, rate: f64| {
            let bumped = OptionContract {
                time_to_expiry: time,
                risk_free_rate: rate,
                ..contract
            };
            BlackScholes::price(&bumped, vol).unwrap()
        };

        // Theta is the decay as calendar time passes, i.e. -∂V/∂T.
        let theta = -(with(1.0 + bump, 0.05) - with(1.0 - bump, 0.05)) / (2.0 * bump);
        let rho = (with(1.0, 0.05 + bump) - with(1.0, 0.05 - bump)) / (2.0 * bump);

        assert!((greeks.theta - theta).abs() < 1e-4, "{option_type} theta");
        assert!((greeks.rho - rho).abs() < 1e-4, "{option_type} rho");
    }
}

#[test]
fn test_reference_call_reported_greeks() {
    let contract = OptionContract::call(100.0, 100.0, 1.0, 0.05);
    let valuation = BlackScholes::valuation(&contract, 0.2).unwrap();
    let reported = valuation.greeks.reported(&GreekConventions::default());

    assert!((valuation.price - 10.451).abs() < 1e-3);
    assert!((reported.delta - 0.637).abs() < 1e-3);
    assert!((reported.gamma - 0.019).abs() < 1e-3);
    assert!((reported.vega - 0.375).abs() < 1e-3);
    assert!((reported.theta - (-0.018)).abs() < 1e-3);
    assert!((reported.rho - 0.532).abs() < 1e-3);
}

#[test]
fn test_invalid_option_type_flag() {
    let err = "x".parse::<OptionType>().unwrap_err();
    assert!(matches!(err, PricingError::InvalidOptionType { .. }));
}

#[test]
fn test_valuation_json() {
    let contract = OptionContract::call(100.0, 100.0, 1.0, 0.05);
    let valuation = BlackScholes::valuation(&contract, 0.2).unwrap();
    let json = serde_json::to_value(valuation).unwrap();
    assert!(json["price"].as_f64().unwrap() > 10.0);
    assert!(json["greeks"]["vega"].as_f64().unwrap() > 37.0);
}
