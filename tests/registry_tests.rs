//! A static registry built on shapes: strategies declare the instruments they
//! trade, instruments map onto the gateway serving their venue, and the
//! resulting gateway shape has one slot per venue.

use sovran_typeset::{
    Container, Descriptor, Member, RuleTable, Shape, ShapeError, ShapeOf, Slot, TypeInfo,
};
use std::any::TypeId;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Venue {
    MoexFx,
    MoexEquity,
    MoexFutures,
}

trait Instrument: Member {
    const SYMBOL: &'static str;
    const VENUE: Venue;
}

macro_rules! instrument {
    ($name:ident, $symbol:literal, $venue:expr) => {
        #[derive(Debug, Default)]
        struct $name;

        impl Instrument for $name {
            const SYMBOL: &'static str = $symbol;
            const VENUE: Venue = $venue;
        }
    };
}

instrument!(UsdRubFx, "USDRUB", Venue::MoexFx);
instrument!(UsdRubFutures, "USDRUB_F", Venue::MoexFutures);
instrument!(AfltEquity, "AFLT", Venue::MoexEquity);
instrument!(EurRubFx, "EURRUB", Venue::MoexFx);

trait Gateway {
    fn connect(&mut self);
    fn read_symbol(&self) -> &'static str;
}

macro_rules! gateway {
    ($name:ident, $symbol:literal) => {
        #[derive(Debug, Default)]
        struct $name {
            connected: bool,
        }

        impl Gateway for $name {
            fn connect(&mut self) {
                self.connected = true;
            }

            fn read_symbol(&self) -> &'static str {
                $symbol
            }
        }
    };
}

gateway!(MoexFxGateway, "USDRUB");
gateway!(MoexEquityGateway, "AFLT");
gateway!(MoexFuturesGateway, "USDRUB_F");

fn as_gateway(slot: &mut Slot) -> Option<&mut dyn Gateway> {
    if slot.is::<MoexFxGateway>() {
        return slot.downcast_mut::<MoexFxGateway>().map(|g| g as &mut dyn Gateway);
    }
    if slot.is::<MoexEquityGateway>() {
        return slot.downcast_mut::<MoexEquityGateway>().map(|g| g as &mut dyn Gateway);
    }
    slot.downcast_mut::<MoexFuturesGateway>().map(|g| g as &mut dyn Gateway)
}

trait Strategy: Member {
    type Instruments: Member;
}

#[derive(Debug, Default)]
struct ArbitrageStrategy {
    fills: Vec<&'static str>,
}

impl Strategy for ArbitrageStrategy {
    type Instruments = ShapeOf<(UsdRubFx, UsdRubFutures)>;
}

#[derive(Debug, Default)]
struct MarketMakingStrategy {
    fills: Vec<&'static str>,
}

impl Strategy for MarketMakingStrategy {
    type Instruments = ShapeOf<(AfltEquity,)>;
}

#[derive(Debug, Default)]
struct CarryStrategy;

impl Strategy for CarryStrategy {
    type Instruments = ShapeOf<(UsdRubFx, EurRubFx)>;
}

fn strategy_to_instruments() -> RuleTable {
    RuleTable::new()
        .route::<ArbitrageStrategy, <ArbitrageStrategy as Strategy>::Instruments>()
        .route::<MarketMakingStrategy, <MarketMakingStrategy as Strategy>::Instruments>()
        .route::<CarryStrategy, <CarryStrategy as Strategy>::Instruments>()
}

fn gateway_for<I: Instrument>() -> Descriptor {
    match I::VENUE {
        Venue::MoexFx => Descriptor::of::<MoexFxGateway>(),
        Venue::MoexEquity => Descriptor::of::<MoexEquityGateway>(),
        Venue::MoexFutures => Descriptor::of::<MoexFuturesGateway>(),
    }
}

fn instrument_to_gateway() -> RuleTable {
    RuleTable::new()
        .route_to(TypeId::of::<UsdRubFx>(), gateway_for::<UsdRubFx>())
        .route_to(TypeId::of::<UsdRubFutures>(), gateway_for::<UsdRubFutures>())
        .route_to(TypeId::of::<AfltEquity>(), gateway_for::<AfltEquity>())
        .route_to(TypeId::of::<EurRubFx>(), gateway_for::<EurRubFx>())
}

fn symbol_of(info: &TypeInfo) -> Option<&'static str> {
    [
        (TypeId::of::<UsdRubFx>(), UsdRubFx::SYMBOL),
        (TypeId::of::<UsdRubFutures>(), UsdRubFutures::SYMBOL),
        (TypeId::of::<AfltEquity>(), AfltEquity::SYMBOL),
        (TypeId::of::<EurRubFx>(), EurRubFx::SYMBOL),
    ]
    .into_iter()
    .find(|(id, _)| *id == info.id())
    .map(|(_, symbol)| symbol)
}

#[test]
fn test_strategies_map_to_instruments() -> Result<(), ShapeError> {
    let strategies = Shape::of::<(ArbitrageStrategy, MarketMakingStrategy)>();
    let instruments = strategies.map(&strategy_to_instruments())?;

    assert_eq!(instruments.len(), 3);
    assert!(instruments.has::<UsdRubFx>());
    assert!(instruments.has::<UsdRubFutures>());
    assert!(instruments.has::<AfltEquity>());

    let symbols: Vec<_> = instruments.iter().filter_map(symbol_of).collect();
    assert_eq!(symbols, vec!["USDRUB", "USDRUB_F", "AFLT"]);
    Ok(())
}

#[test]
fn test_instruments_map_to_one_gateway_per_venue() -> Result<(), ShapeError> {
    let gateways = Shape::of::<(ArbitrageStrategy, MarketMakingStrategy)>()
        .map(&strategy_to_instruments())?
        .map(&instrument_to_gateway())?;

    assert_eq!(gateways.len(), 3);
    assert_eq!(
        gateways,
        Shape::of::<(MoexFxGateway, MoexFuturesGateway, MoexEquityGateway)>()
    );
    Ok(())
}

#[test]
fn test_shared_venue_collapses_to_one_gateway() -> Result<(), ShapeError> {
    let gateways = Shape::of::<(CarryStrategy, ArbitrageStrategy)>()
        .map(&strategy_to_instruments())?
        .map(&instrument_to_gateway())?;

    // UsdRubFx and EurRubFx both trade on the FX venue
    assert_eq!(gateways.len(), 2);
    assert!(gateways.has::<MoexFxGateway>());
    assert!(gateways.has::<MoexFuturesGateway>());
    assert!(!gateways.has::<MoexEquityGateway>());
    Ok(())
}

#[test]
fn test_strategy_without_route_is_unmapped() {
    #[derive(Debug, Default)]
    struct Unregistered;

    let result = Shape::of::<(ArbitrageStrategy, Unregistered)>().map(&strategy_to_instruments());
    assert!(matches!(result, Err(ShapeError::Unmapped { .. })));
}

#[test]
fn test_dispatch_reaches_interested_strategies_only() -> Result<(), ShapeError> {
    let strategy_shape = Shape::of::<(ArbitrageStrategy, MarketMakingStrategy)>();
    let rule = strategy_to_instruments();
    let gateway_shape = strategy_shape.map(&rule)?.map(&instrument_to_gateway())?;

    let instruments_of: HashMap<TypeId, Shape> = strategy_shape
        .iter()
        .map(|info| {
            let single = Shape::from_descriptors([Descriptor::Type(*info)]);
            single.map(&rule).map(|instruments| (info.id(), instruments))
        })
        .collect::<Result<_, _>>()?;

    let mut strategies = Container::new(strategy_shape);
    let mut gateways = Container::new(gateway_shape);

    gateways.apply(|slot| {
        if let Some(gateway) = as_gateway(slot) {
            gateway.connect();
        }
    });
    assert!(gateways.get::<MoexFxGateway>()?.connected);
    assert!(gateways.get::<MoexEquityGateway>()?.connected);
    assert!(gateways.get::<MoexFuturesGateway>()?.connected);

    let mut packages = Vec::new();
    gateways.apply(|slot| {
        if let Some(gateway) = as_gateway(slot) {
            packages.push(gateway.read_symbol());
        }
    });

    for symbol in packages {
        let interested = |info: &TypeInfo| {
            instruments_of
                .get(&info.id())
                .is_some_and(|instruments| instruments.iter().any(|i| symbol_of(i) == Some(symbol)))
        };
        strategies.apply_if(interested, |slot| {
            if let Some(s) = slot.downcast_mut::<ArbitrageStrategy>() {
                s.fills.push(symbol);
            } else if let Some(s) = slot.downcast_mut::<MarketMakingStrategy>() {
                s.fills.push(symbol);
            }
        });
    }

    assert_eq!(
        strategies.get::<ArbitrageStrategy>()?.fills,
        vec!["USDRUB", "USDRUB_F"]
    );
    assert_eq!(strategies.get::<MarketMakingStrategy>()?.fills, vec!["AFLT"]);
    Ok(())
}
