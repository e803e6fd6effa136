//! Unit conversion calculators, one per [`Quantity`].

use crate::errors::CalcResult;
use crate::form::{ComputationRequest, FieldSpec};
use crate::presenter::format_number;
use crate::result::{FormatHints, Output};
use crate::units::{self, Quantity};

use super::{CalculatorDef, Category, Compute, PureFn};

/// (slug, quantity, formula text, default from, default to, compute)
const CONVERTERS: &[(&str, Quantity, &str, &str, &str, PureFn)] = &[
    ("length", Quantity::Length, "value × from/meter ÷ to/meter", "km", "mi", length),
    ("mass", Quantity::Mass, "value × from/kg ÷ to/kg", "kg", "lb", mass),
    ("volume", Quantity::Volume, "value × from/liter ÷ to/liter", "l", "gal", volume),
    (
        "temperature",
        Quantity::Temperature,
        "°F = °C × 9/5 + 32; K = °C + 273.15",
        "C",
        "F",
        temperature,
    ),
    ("speed", Quantity::Speed, "value × from/(m/s) ÷ to/(m/s)", "km_h", "mph", speed),
    ("area", Quantity::Area, "value × from/m² ÷ to/m²", "m2", "ft2", area),
    ("data-storage", Quantity::DataStorage, "value × from/byte ÷ to/byte", "GB", "MB", data_storage),
    ("time", Quantity::Time, "value × from/second ÷ to/second", "h", "min", time),
];

fn description(quantity: Quantity) -> &'static str {
    match quantity {
        Quantity::Length => "Convert between metric, imperial and nautical lengths.",
        Quantity::Mass => "Convert between metric and imperial masses.",
        Quantity::Volume => "Convert between metric, cooking and US liquid volumes.",
        Quantity::Temperature => "Convert between Celsius, Fahrenheit and Kelvin.",
        Quantity::Speed => "Convert between m/s, km/h, mph, ft/s and knots.",
        Quantity::Area => "Convert between metric and imperial areas.",
        Quantity::DataStorage => "Convert between bits, decimal bytes and binary bytes.",
        Quantity::Time => "Convert between milliseconds and years.",
    }
}

pub fn definitions() -> Vec<CalculatorDef> {
    CONVERTERS
        .iter()
        .map(|&(slug, quantity, formula, from, to, compute)| {
            let keys = quantity.keys();
            let mut value = FieldSpec::number("value", "Value").required().default_value("1");
            if !quantity.allows_negative() {
                value = value.min(0.0);
            }
            let mut def = CalculatorDef::new(
                slug,
                quantity.display_name(),
                Category::Conversion,
                description(quantity),
                formula,
                vec![
                    value,
                    FieldSpec::choice("from", "From", &keys).default_value(from),
                    FieldSpec::choice("to", "To", &keys).default_value(to),
                ],
                Compute::Pure(compute),
            );
            if quantity == Quantity::Temperature {
                def = def.note("Values below absolute zero (−273.15 °C) are rejected");
            }
            if quantity == Quantity::DataStorage {
                def = def.note("KB/MB/GB/TB are powers of 1000; KiB/MiB/GiB/TiB are powers of 1024");
            }
            def
        })
        .collect()
}

fn convert_with(quantity: Quantity, request: &ComputationRequest) -> CalcResult<Vec<Output>> {
    let value = request.number("value")?;
    let from = request.choice("from")?;
    let to = request.choice("to")?;

    let result = units::convert(quantity, value, from, to)?;

    // The same value in every unit of the quantity
    let mut table = Vec::with_capacity(quantity.units().len());
    for unit in quantity.units() {
        let converted = units::convert(quantity, value, from, unit.key)?;
        table.push(format!("{} {}", format_number(converted, None, true), unit.key));
    }

    Ok(vec![
        Output::number("result", "Result", result, FormatHints::default().with_suffix(to)),
        Output::list("all_units", "In every unit", table),
    ])
}

fn length(request: &ComputationRequest) -> CalcResult<Vec<Output>> {
    convert_with(Quantity::Length, request)
}

fn mass(request: &ComputationRequest) -> CalcResult<Vec<Output>> {
    convert_with(Quantity::Mass, request)
}

fn volume(request: &ComputationRequest) -> CalcResult<Vec<Output>> {
    convert_with(Quantity::Volume, request)
}

fn temperature(request: &ComputationRequest) -> CalcResult<Vec<Output>> {
    convert_with(Quantity::Temperature, request)
}

fn speed(request: &ComputationRequest) -> CalcResult<Vec<Output>> {
    convert_with(Quantity::Speed, request)
}

fn area(request: &ComputationRequest) -> CalcResult<Vec<Output>> {
    convert_with(Quantity::Area, request)
}

fn data_storage(request: &ComputationRequest) -> CalcResult<Vec<Output>> {
    convert_with(Quantity::DataStorage, request)
}

fn time(request: &ComputationRequest) -> CalcResult<Vec<Output>> {
    convert_with(Quantity::Time, request)
}
