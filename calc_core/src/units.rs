//! # Units
//!
//! Unit tables for the conversion calculators, plus a handful of newtype
//! wrappers the health formulas use to accept metric or imperial input.
//!
//! Every linear quantity is converted through a base unit (meter, kilogram,
//! liter, meter/second, square meter, byte, second). Temperature is affine
//! and converts through Celsius.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::units::{convert, Quantity, Pounds, Kilograms};
//!
//! let ft = convert(Quantity::Length, 1.0, "mi", "ft").unwrap();
//! assert!((ft - 5280.0).abs() < 1e-6);
//!
//! let kg: Kilograms = Pounds(220.462).into();
//! assert!((kg.0 - 100.0).abs() < 0.01);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// One unit in a conversion table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unit {
    /// Short key used in form fields (e.g. "km")
    pub key: &'static str,
    pub name: &'static str,
    /// Multiply by this to get the base unit
    pub to_base: f64,
}

const fn unit(key: &'static str, name: &'static str, to_base: f64) -> Unit {
    Unit { key, name, to_base }
}

// ============================================================================
// Tables
// ============================================================================

/// Base: meter
pub const LENGTH_UNITS: &[Unit] = &[
    unit("mm", "Millimeters", 0.001),
    unit("cm", "Centimeters", 0.01),
    unit("m", "Meters", 1.0),
    unit("km", "Kilometers", 1000.0),
    unit("in", "Inches", 0.0254),
    unit("ft", "Feet", 0.3048),
    unit("yd", "Yards", 0.9144),
    unit("mi", "Miles", 1609.344),
    unit("nmi", "Nautical miles", 1852.0),
];

/// Base: kilogram
pub const MASS_UNITS: &[Unit] = &[
    unit("mg", "Milligrams", 1e-6),
    unit("g", "Grams", 0.001),
    unit("kg", "Kilograms", 1.0),
    unit("t", "Metric tons", 1000.0),
    unit("oz", "Ounces", 0.028_349_523_125),
    unit("lb", "Pounds", 0.453_592_37),
    unit("st", "Stones", 6.350_293_18),
];

/// Base: liter
pub const VOLUME_UNITS: &[Unit] = &[
    unit("ml", "Milliliters", 0.001),
    unit("l", "Liters", 1.0),
    unit("m3", "Cubic meters", 1000.0),
    unit("tsp", "Teaspoons (US)", 0.004_928_921_593_75),
    unit("tbsp", "Tablespoons (US)", 0.014_786_764_781_25),
    unit("fl_oz", "Fluid ounces (US)", 0.029_573_529_562_5),
    unit("cup", "Cups (US)", 0.236_588_236_5),
    unit("pt", "Pints (US)", 0.473_176_473),
    unit("qt", "Quarts (US)", 0.946_352_946),
    unit("gal", "Gallons (US)", 3.785_411_784),
];

/// Base: meter per second
pub const SPEED_UNITS: &[Unit] = &[
    unit("m_s", "Meters/second", 1.0),
    unit("km_h", "Kilometers/hour", 1.0 / 3.6),
    unit("mph", "Miles/hour", 0.447_04),
    unit("ft_s", "Feet/second", 0.3048),
    unit("kn", "Knots", 1852.0 / 3600.0),
];

/// Base: square meter
pub const AREA_UNITS: &[Unit] = &[
    unit("cm2", "Square centimeters", 1e-4),
    unit("m2", "Square meters", 1.0),
    unit("km2", "Square kilometers", 1e6),
    unit("ha", "Hectares", 1e4),
    unit("in2", "Square inches", 0.000_645_16),
    unit("ft2", "Square feet", 0.092_903_04),
    unit("yd2", "Square yards", 0.836_127_36),
    unit("ac", "Acres", 4_046.856_422_4),
    unit("mi2", "Square miles", 2_589_988.110_336),
];

/// Base: byte
pub const DATA_UNITS: &[Unit] = &[
    unit("bit", "Bits", 0.125),
    unit("B", "Bytes", 1.0),
    unit("KB", "Kilobytes", 1e3),
    unit("MB", "Megabytes", 1e6),
    unit("GB", "Gigabytes", 1e9),
    unit("TB", "Terabytes", 1e12),
    unit("KiB", "Kibibytes", 1024.0),
    unit("MiB", "Mebibytes", 1_048_576.0),
    unit("GiB", "Gibibytes", 1_073_741_824.0),
    unit("TiB", "Tebibytes", 1_099_511_627_776.0),
];

/// Base: second
pub const TIME_UNITS: &[Unit] = &[
    unit("ms", "Milliseconds", 0.001),
    unit("s", "Seconds", 1.0),
    unit("min", "Minutes", 60.0),
    unit("h", "Hours", 3600.0),
    unit("d", "Days", 86_400.0),
    unit("wk", "Weeks", 604_800.0),
    unit("yr", "Years (365 d)", 31_536_000.0),
];

/// Temperature is affine; `to_base` is unused and conversion goes through
/// [`Celsius`].
pub const TEMPERATURE_UNITS: &[Unit] = &[
    unit("C", "Celsius", 1.0),
    unit("F", "Fahrenheit", 1.0),
    unit("K", "Kelvin", 1.0),
];

// ============================================================================
// Quantities
// ============================================================================

/// Physical quantity a conversion calculator works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quantity {
    Length,
    Mass,
    Volume,
    Temperature,
    Speed,
    Area,
    DataStorage,
    Time,
}

impl Quantity {
    pub fn units(&self) -> &'static [Unit] {
        match self {
            Quantity::Length => LENGTH_UNITS,
            Quantity::Mass => MASS_UNITS,
            Quantity::Volume => VOLUME_UNITS,
            Quantity::Temperature => TEMPERATURE_UNITS,
            Quantity::Speed => SPEED_UNITS,
            Quantity::Area => AREA_UNITS,
            Quantity::DataStorage => DATA_UNITS,
            Quantity::Time => TIME_UNITS,
        }
    }

    pub fn keys(&self) -> Vec<&'static str> {
        self.units().iter().map(|u| u.key).collect()
    }

    pub fn find(&self, key: &str) -> Option<&'static Unit> {
        self.units().iter().find(|u| u.key == key)
    }

    /// Negative amounts only make sense for temperature (and signed speed).
    pub fn allows_negative(&self) -> bool {
        matches!(self, Quantity::Temperature | Quantity::Speed)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Quantity::Length => "Length",
            Quantity::Mass => "Mass",
            Quantity::Volume => "Volume",
            Quantity::Temperature => "Temperature",
            Quantity::Speed => "Speed",
            Quantity::Area => "Area",
            Quantity::DataStorage => "Data storage",
            Quantity::Time => "Time",
        }
    }
}

/// Convert `value` between two unit keys of the same quantity.
pub fn convert(quantity: Quantity, value: f64, from: &str, to: &str) -> CalcResult<f64> {
    let from_unit = quantity
        .find(from)
        .ok_or_else(|| CalcError::invalid_input("from", from, "Unknown unit"))?;
    let to_unit = quantity
        .find(to)
        .ok_or_else(|| CalcError::invalid_input("to", to, "Unknown unit"))?;

    if quantity == Quantity::Temperature {
        let celsius = to_celsius(value, from_unit.key);
        if celsius.0 < ABSOLUTE_ZERO_C {
            return Err(CalcError::calculation_failed(
                "temperature conversion",
                "Temperature is below absolute zero",
            ));
        }
        return Ok(from_celsius(celsius, to_unit.key));
    }

    Ok(value * from_unit.to_base / to_unit.to_base)
}

// ============================================================================
// Temperature
// ============================================================================

pub const ABSOLUTE_ZERO_C: f64 = -273.15;

/// Temperature in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Celsius(pub f64);

/// Temperature in degrees Fahrenheit
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fahrenheit(pub f64);

/// Temperature in kelvin
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kelvin(pub f64);

impl From<Fahrenheit> for Celsius {
    fn from(f: Fahrenheit) -> Self {
        Celsius((f.0 - 32.0) * 5.0 / 9.0)
    }
}

impl From<Celsius> for Fahrenheit {
    fn from(c: Celsius) -> Self {
        Fahrenheit(c.0 * 9.0 / 5.0 + 32.0)
    }
}

impl From<Kelvin> for Celsius {
    fn from(k: Kelvin) -> Self {
        Celsius(k.0 + ABSOLUTE_ZERO_C)
    }
}

impl From<Celsius> for Kelvin {
    fn from(c: Celsius) -> Self {
        Kelvin(c.0 - ABSOLUTE_ZERO_C)
    }
}

fn to_celsius(value: f64, key: &str) -> Celsius {
    match key {
        "F" => Fahrenheit(value).into(),
        "K" => Kelvin(value).into(),
        _ => Celsius(value),
    }
}

fn from_celsius(c: Celsius, key: &str) -> f64 {
    match key {
        "F" => Fahrenheit::from(c).0,
        "K" => Kelvin::from(c).0,
        _ => c.0,
    }
}

// ============================================================================
// Body measurements
// ============================================================================

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

/// Mass in pounds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pounds(pub f64);

/// Length in centimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Centimeters(pub f64);

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

const KG_PER_LB: f64 = 0.453_592_37;
const CM_PER_IN: f64 = 2.54;

impl From<Pounds> for Kilograms {
    fn from(lb: Pounds) -> Self {
        Kilograms(lb.0 * KG_PER_LB)
    }
}

impl From<Kilograms> for Pounds {
    fn from(kg: Kilograms) -> Self {
        Pounds(kg.0 / KG_PER_LB)
    }
}

impl From<Inches> for Centimeters {
    fn from(inches: Inches) -> Self {
        Centimeters(inches.0 * CM_PER_IN)
    }
}

impl From<Centimeters> for Inches {
    fn from(cm: Centimeters) -> Self {
        Inches(cm.0 / CM_PER_IN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_conversion() {
        let cm = convert(Quantity::Length, 1.0, "in", "cm").unwrap();
        assert!((cm - 2.54).abs() < 1e-12);
        let km = convert(Quantity::Length, 26.2188, "mi", "km").unwrap();
        assert!((km - 42.195).abs() < 0.001);
    }

    #[test]
    fn test_identity_conversion() {
        for q in [Quantity::Mass, Quantity::Volume, Quantity::Area, Quantity::Time] {
            for key in q.keys() {
                let v = convert(q, 12.5, key, key).unwrap();
                assert!((v - 12.5).abs() < 1e-9, "{:?} {}", q, key);
            }
        }
    }

    #[test]
    fn test_temperature_conversion() {
        assert!((convert(Quantity::Temperature, 100.0, "C", "F").unwrap() - 212.0).abs() < 1e-9);
        assert!((convert(Quantity::Temperature, 32.0, "F", "C").unwrap()).abs() < 1e-9);
        assert!((convert(Quantity::Temperature, 0.0, "K", "C").unwrap() + 273.15).abs() < 1e-9);
        assert!((convert(Quantity::Temperature, -40.0, "C", "F").unwrap() + 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_below_absolute_zero() {
        let err = convert(Quantity::Temperature, -500.0, "F", "C").unwrap_err();
        assert_eq!(err.error_code(), "CALCULATION_FAILED");
    }

    #[test]
    fn test_unknown_unit() {
        let err = convert(Quantity::Mass, 1.0, "kg", "furlong").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_data_storage() {
        let mib = convert(Quantity::DataStorage, 1.0, "GiB", "MiB").unwrap();
        assert_eq!(mib, 1024.0);
        let bits = convert(Quantity::DataStorage, 1.0, "B", "bit").unwrap();
        assert_eq!(bits, 8.0);
    }

    #[test]
    fn test_body_unit_newtypes() {
        let cm: Centimeters = Inches(70.0).into();
        assert!((cm.0 - 177.8).abs() < 1e-9);
        let lb: Pounds = Kilograms(100.0).into();
        assert!((lb.0 - 220.462_26).abs() < 1e-4);
    }
}
