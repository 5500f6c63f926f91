//! Derives the set of market gateways a set of strategies needs, connects
//! them, and routes each gateway's package to the strategies trading it.
//!
//! Run with `RUST_LOG=debug cargo run --example registry` to see shape
//! canonicalization events.

use sovran_typeset::{Container, Descriptor, RuleTable, Shape, ShapeError, ShapeOf, Slot, TypeInfo};
use std::any::TypeId;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct UsdRubFx;
#[derive(Debug, Default)]
struct UsdRubFutures;
#[derive(Debug, Default)]
struct AfltEquity;

#[derive(Debug, Default)]
struct MoexFxGateway;
#[derive(Debug, Default)]
struct MoexEquityGateway;
#[derive(Debug, Default)]
struct MoexFuturesGateway;

#[derive(Debug, Default)]
struct ArbitrageStrategy {
    packages: usize,
}

#[derive(Debug, Default)]
struct MarketMakingStrategy {
    packages: usize,
}

type ArbitrageInstruments = ShapeOf<(UsdRubFx, UsdRubFutures)>;
type MarketMakingInstruments = ShapeOf<(AfltEquity,)>;

fn package_of(gateway: &TypeInfo) -> Option<TypeId> {
    if gateway.is::<MoexFxGateway>() {
        Some(TypeId::of::<UsdRubFx>())
    } else if gateway.is::<MoexEquityGateway>() {
        Some(TypeId::of::<AfltEquity>())
    } else if gateway.is::<MoexFuturesGateway>() {
        Some(TypeId::of::<UsdRubFutures>())
    } else {
        None
    }
}

fn record(slot: &mut Slot) {
    if let Some(s) = slot.downcast_mut::<ArbitrageStrategy>() {
        s.packages += 1;
    } else if let Some(s) = slot.downcast_mut::<MarketMakingStrategy>() {
        s.packages += 1;
    }
}

fn run<L: sovran_typeset::TypeList>(label: &str) -> Result<(), ShapeError> {
    let to_instruments = RuleTable::new()
        .route::<ArbitrageStrategy, ArbitrageInstruments>()
        .route::<MarketMakingStrategy, MarketMakingInstruments>();
    let to_gateways = RuleTable::new()
        .route::<UsdRubFx, MoexFxGateway>()
        .route::<UsdRubFutures, MoexFuturesGateway>()
        .route::<AfltEquity, MoexEquityGateway>();

    let strategy_shape = Shape::of::<L>();
    let gateway_shape = strategy_shape.map(&to_instruments)?.map(&to_gateways)?;
    info!(%label, strategies = %strategy_shape, gateways = %gateway_shape, "derived registry");

    let mut strategies = Container::new(strategy_shape);
    let mut gateways = Container::new(gateway_shape);

    gateways.apply(|slot| info!(gateway = slot.type_info().name(), "connecting"));

    let packages: Vec<TypeId> = gateways.iter().filter_map(|slot| package_of(slot.type_info())).collect();
    for package in packages {
        let interested = |info: &TypeInfo| {
            Shape::from_descriptors([Descriptor::Type(*info)])
                .map(&to_instruments)
                .is_ok_and(|instruments| instruments.contains(package))
        };
        strategies.apply_if(interested, record);
    }

    info!(%label, ?strategies, "dispatched packages");
    Ok(())
}

fn main() -> Result<(), ShapeError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    run::<(ArbitrageStrategy,)>("arbitrage")?;
    run::<(MarketMakingStrategy,)>("market making")?;
    run::<(ArbitrageStrategy, MarketMakingStrategy)>("both strategies")?;
    Ok(())
}
