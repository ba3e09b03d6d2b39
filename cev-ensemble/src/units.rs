//! Conversion from raw model units to display units.
//!
//! Model output stores reference-height temperatures in Kelvin and
//! precipitation as a rate. The dashboard shows degrees Fahrenheit and
//! inches, so every matching column is converted once, when a
//! [`RawTable`] becomes a [`WideTable`].

use crate::table::{Column, RawTable, WideTable};
use crate::Result;

/// Column-name marker for temperature variables (`TREFHT`, `TREFHTMN`, ...).
pub const TEMPERATURE_MARKER: &str = "TREF";

/// Column-name marker for precipitation variables (`PRECT`, `PRECC`, ...).
pub const PRECIPITATION_MARKER: &str = "PREC";

pub const KELVIN_OFFSET: f64 = 273.15;

/// Rate-to-volume factor applied before dividing by the months in a year.
pub const PRECIPITATION_FACTOR: f64 = 1242399685.04;

pub const MONTHS_PER_YEAR: f64 = 12.0;

/// The conversion applied to one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitConversion {
    KelvinToFahrenheit,
    PrecipitationRate,
    Unchanged,
}

impl UnitConversion {
    /// Pick the conversion for a column name. Temperature wins if a name
    /// carries both markers, so a column is never converted twice.
    pub fn for_column(name: &str) -> UnitConversion {
        if name.contains(TEMPERATURE_MARKER) {
            UnitConversion::KelvinToFahrenheit
        } else if name.contains(PRECIPITATION_MARKER) {
            UnitConversion::PrecipitationRate
        } else {
            UnitConversion::Unchanged
        }
    }

    pub fn apply(self, value: f64) -> f64 {
        match self {
            UnitConversion::KelvinToFahrenheit => kelvin_to_fahrenheit(value),
            UnitConversion::PrecipitationRate => precipitation_to_inches(value),
            UnitConversion::Unchanged => value,
        }
    }
}

pub fn kelvin_to_fahrenheit(kelvin: f64) -> f64 {
    (kelvin - KELVIN_OFFSET) * 1.8 + 32.0
}

pub fn precipitation_to_inches(rate: f64) -> f64 {
    rate * PRECIPITATION_FACTOR / MONTHS_PER_YEAR
}

/// Convert every column of a freshly parsed table to display units.
///
/// Consumes the raw table, so a table cannot be normalized twice.
pub fn normalize_units(raw: RawTable) -> Result<WideTable> {
    let RawTable { times, columns } = raw;
    let columns = columns
        .into_iter()
        .map(|column| {
            let conversion = UnitConversion::for_column(&column.name);
            if conversion == UnitConversion::Unchanged {
                return column;
            }
            log::debug!(
                "[CEV Debug] units: converting {} with {:?}",
                column.name,
                conversion
            );
            Column {
                values: column.values.into_iter().map(|v| conversion.apply(v)).collect(),
                name: column.name,
            }
        })
        .collect::<Vec<_>>();
    WideTable::new(times, columns)
}

impl RawTable {
    /// Shorthand for [`normalize_units`].
    pub fn normalize(self) -> Result<WideTable> {
        normalize_units(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cev_utils::dates::parse_timestamp;

    #[test]
    fn freezing_point_is_32_fahrenheit() {
        assert_eq!(kelvin_to_fahrenheit(273.15), 32.0);
        assert!((kelvin_to_fahrenheit(373.15) - 212.0).abs() < 1e-9);
    }

    #[test]
    fn unit_precipitation_rate() {
        assert_eq!(precipitation_to_inches(1.0), 1242399685.04 / 12.0);
        assert_eq!(precipitation_to_inches(0.0), 0.0);
    }

    #[test]
    fn conversion_picked_by_column_name() {
        assert_eq!(
            UnitConversion::for_column("TREFHTMN_0"),
            UnitConversion::KelvinToFahrenheit
        );
        assert_eq!(
            UnitConversion::for_column("PRECT_12"),
            UnitConversion::PrecipitationRate
        );
        assert_eq!(
            UnitConversion::for_column("SOILWATER_10CM_3"),
            UnitConversion::Unchanged
        );
        // case-sensitive, like the column selection
        assert_eq!(UnitConversion::for_column("tref_0"), UnitConversion::Unchanged);
    }

    #[test]
    fn nan_stays_nan() {
        assert!(UnitConversion::KelvinToFahrenheit.apply(f64::NAN).is_nan());
    }

    #[test]
    fn normalize_converts_only_matching_columns() {
        let raw = RawTable {
            times: vec![
                parse_timestamp("2000-01-15").unwrap(),
                parse_timestamp("2000-02-15").unwrap(),
            ],
            columns: vec![
                Column::new("TREFHTMX_0", vec![273.15, 283.15]),
                Column::new("PRECT_0", vec![1.0, 0.0]),
                Column::new("SOILWATER_10CM_0", vec![21.5, 22.5]),
            ],
        };
        let table = raw.normalize().unwrap();
        assert_eq!(table.column("TREFHTMX_0").unwrap().values[0], 32.0);
        assert!((table.column("TREFHTMX_0").unwrap().values[1] - 50.0).abs() < 1e-9);
        assert_eq!(
            table.column("PRECT_0").unwrap().values[0],
            1242399685.04 / 12.0
        );
        assert_eq!(
            table.column("SOILWATER_10CM_0").unwrap().values,
            vec![21.5, 22.5]
        );
    }
}
