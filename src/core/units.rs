//! Unit of measure table.
//!
//! Units are pure lookup data: an abbreviation stored in the database, a display
//! name, and the physical dimension the unit measures. No conversion between
//! units is performed; a material's bulk amount is always in its own unit.

use sea_orm::{Iterable, entity::prelude::*};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// What a unit measures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// Weight units
    Mass,
    /// Liquid units
    Volume,
    /// Linear units
    Length,
    /// Discrete items
    Count,
}

/// Unit a material is bought and consumed in.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(8))")]
#[serde(try_from = "String", into = "String")]
pub enum UnitType {
    /// Kilogram
    #[sea_orm(string_value = "kg")]
    Kilogram,
    /// Gram
    #[sea_orm(string_value = "g")]
    Gram,
    /// Pound
    #[sea_orm(string_value = "lb")]
    Pound,
    /// Ounce
    #[sea_orm(string_value = "oz")]
    Ounce,
    /// Liter
    #[sea_orm(string_value = "l")]
    Liter,
    /// Milliliter
    #[sea_orm(string_value = "ml")]
    Milliliter,
    /// Gallon (US)
    #[sea_orm(string_value = "gal")]
    Gallon,
    /// Fluid ounce (US)
    #[sea_orm(string_value = "floz")]
    FluidOunce,
    /// Meter
    #[sea_orm(string_value = "m")]
    Meter,
    /// Centimeter
    #[sea_orm(string_value = "cm")]
    Centimeter,
    /// Inch
    #[sea_orm(string_value = "in")]
    Inch,
    /// Foot
    #[sea_orm(string_value = "ft")]
    Foot,
    /// Yard
    #[sea_orm(string_value = "yd")]
    Yard,
    /// Single piece
    #[sea_orm(string_value = "pc")]
    Piece,
    /// Twelve pieces
    #[sea_orm(string_value = "doz")]
    Dozen,
    /// Pack
    #[sea_orm(string_value = "pack")]
    Pack,
    /// Sheet
    #[sea_orm(string_value = "sheet")]
    Sheet,
    /// Roll
    #[sea_orm(string_value = "roll")]
    Roll,
}

impl UnitType {
    /// Short label shown next to quantities, e.g. `"kg"`.
    #[must_use]
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::Kilogram => "kg",
            Self::Gram => "g",
            Self::Pound => "lb",
            Self::Ounce => "oz",
            Self::Liter => "l",
            Self::Milliliter => "ml",
            Self::Gallon => "gal",
            Self::FluidOunce => "fl oz",
            Self::Meter => "m",
            Self::Centimeter => "cm",
            Self::Inch => "in",
            Self::Foot => "ft",
            Self::Yard => "yd",
            Self::Piece => "pc",
            Self::Dozen => "doz",
            Self::Pack => "pack",
            Self::Sheet => "sheet",
            Self::Roll => "roll",
        }
    }

    /// Full singular name, e.g. `"Kilogram"`.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Kilogram => "Kilogram",
            Self::Gram => "Gram",
            Self::Pound => "Pound",
            Self::Ounce => "Ounce",
            Self::Liter => "Liter",
            Self::Milliliter => "Milliliter",
            Self::Gallon => "Gallon",
            Self::FluidOunce => "Fluid Ounce",
            Self::Meter => "Meter",
            Self::Centimeter => "Centimeter",
            Self::Inch => "Inch",
            Self::Foot => "Foot",
            Self::Yard => "Yard",
            Self::Piece => "Piece",
            Self::Dozen => "Dozen",
            Self::Pack => "Pack",
            Self::Sheet => "Sheet",
            Self::Roll => "Roll",
        }
    }

    /// Physical dimension the unit measures
    #[must_use]
    pub const fn dimension(self) -> Dimension {
        match self {
            Self::Kilogram | Self::Gram | Self::Pound | Self::Ounce => Dimension::Mass,
            Self::Liter | Self::Milliliter | Self::Gallon | Self::FluidOunce => Dimension::Volume,
            Self::Meter | Self::Centimeter | Self::Inch | Self::Foot | Self::Yard => {
                Dimension::Length
            }
            Self::Piece | Self::Dozen | Self::Pack | Self::Sheet | Self::Roll => Dimension::Count,
        }
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

impl TryFrom<String> for UnitType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<UnitType> for String {
    fn from(unit: UnitType) -> Self {
        unit.to_value()
    }
}

impl FromStr for UnitType {
    type Err = String;

    /// Accepts the abbreviation, the stored code, or the display name (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Self::iter()
            .find(|unit| {
                unit.abbreviation() == needle
                    || unit.to_value() == needle
                    || unit.display_name().to_lowercase() == needle
            })
            .ok_or_else(|| format!("Unknown unit: {s}"))
    }
}
