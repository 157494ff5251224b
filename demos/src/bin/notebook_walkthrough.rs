//! Walkthrough of Black-Scholes pricing and implied volatility
//!
//! This example shows how to:
//! 1. Price a European call and put and check put-call parity
//! 2. Report Greeks with per-1% vega/rho and per-day theta
//! 3. Back out implied volatility from a market price
//! 4. Tell a converged volatility apart from the solver's failure modes

use impliedvol_rs::prelude::{
    BlackScholes, GreekConventions, OptionContract, OptionType, ReportedGreeks, SolverConfig,
    SolverError, SolverOutcome, brenner_subrahmanyam_guess, implied_volatility, newton_raphson,
    solve_iv_bisection,
};
use serde::Serialize;
use tracing::{error, info, warn};

/// Summary of one priced contract, dumped as JSON at the end of the run
#[derive(Debug, Serialize)]
struct PricingReport {
    contract: OptionContract,
    volatility: f64,
    price: f64,
    greeks: ReportedGreeks,
}

/// Price a contract and log its reported Greeks
fn price_contract(
    contract: OptionContract,
    volatility: f64,
) -> Result<PricingReport, Box<dyn std::error::Error>> {
    let valuation = BlackScholes::valuation(&contract, volatility)?;
    let greeks = valuation.greeks.reported(&GreekConventions::default());

    info!(
        "{} S={} K={} T={} r={} vol={}: price {:.4}",
        contract.option_type,
        contract.spot,
        contract.strike,
        contract.time_to_expiry,
        contract.risk_free_rate,
        volatility,
        valuation.price
    );
    info!(
        "  delta {:.4}, gamma {:.4}, vega {:.4}, theta {:.4}, rho {:.4}",
        greeks.delta, greeks.gamma, greeks.vega, greeks.theta, greeks.rho
    );

    Ok(PricingReport {
        contract,
        volatility,
        price: valuation.price,
        greeks,
    })
}

/// Solve for implied volatility, falling back to bisection if Newton-Raphson fails
fn solve(contract: &OptionContract, market_price: f64, initial_sigma: f64) -> Option<f64> {
    let config = SolverConfig::default();

    match implied_volatility(market_price, contract, initial_sigma, &config) {
        Ok(result) => {
            info!(
                "Implied volatility for market price {}: {:.2}% ({} iterations)",
                market_price,
                result.sigma_percent(),
                result.iterations
            );
            Some(result.sigma)
        }
        Err(SolverError::Domain(e)) => {
            error!("Invalid contract: {}", e);
            None
        }
        Err(e) => {
            warn!("Newton-Raphson failed: {}", e);
            match solve_iv_bisection(market_price, contract, &config) {
                Ok(result) => {
                    info!("Bisection fallback: {:.2}%", result.sigma_percent());
                    Some(result.sigma)
                }
                Err(e) => {
                    warn!("No implied volatility for price {}: {}", market_price, e);
                    None
                }
            }
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("Starting Black-Scholes walkthrough");

    // Reference contract: S=100, K=100, one year, 5% rate, 20% vol
    let call = OptionContract::call(100.0, 100.0, 1.0, 0.05);
    let put = call.with_option_type(OptionType::Put);

    let reports = vec![price_contract(call, 0.2)?, price_contract(put, 0.2)?];

    let parity_gap = reports[0].price - reports[1].price;
    let forward_gap = call.spot - call.strike * call.discount_factor();
    info!(
        "Put-call parity: C - P = {:.8}, S - K·e^(-rT) = {:.8}",
        parity_gap, forward_gap
    );

    // Implied volatility from a quoted price
    let quoted = OptionContract::call(30.0, 28.0, 0.5, 0.025);
    let historical_vol = 0.2;
    solve(&quoted, 5.0, historical_vol);

    let guess = brenner_subrahmanyam_guess(&quoted, 5.0);
    info!("Brenner-Subrahmanyam starting guess: {:.4}", guess);
    solve(&quoted, 5.0, guess);

    // Failure modes are reported, never returned as a volatility
    let deep_itm = OptionContract::call(100.0, 50.0, 1.0, 0.05);
    match newton_raphson(0.01, &deep_itm, 0.2, &SolverConfig::default())? {
        SolverOutcome::Converged { sigma, .. } => info!("Unexpected convergence at {}", sigma),
        other => info!("Price below intrinsic: {:?}", other),
    }
    solve(&deep_itm, 0.01, 0.2);

    let far_otm = OptionContract::call(100.0, 400.0, 2.0 / 365.0, 0.01);
    solve(&far_otm, 0.5, 0.2);

    // The expiry boundary goes through intrinsic value, not the formulas
    let expired = OptionContract::call(110.0, 100.0, 0.0, 0.05);
    if let Err(e) = BlackScholes::price(&expired, 0.2) {
        info!(
            "Expired contract rejected ({}); intrinsic value is {}",
            e,
            expired.intrinsic_value()
        );
    }

    println!("{}", serde_json::to_string_pretty(&reports)?);

    info!("Walkthrough completed successfully");

    Ok(())
}
