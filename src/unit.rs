//! Physical units attached to evaluated values, and the small algebra the evaluator needs over
//! them: inference of a result unit from an operator, and conversion of a value between two
//! compatible units.
//!
//! A unit is a list of numerator atoms over a list of denominator atoms, written `kg.m/s.s`. The
//! atom `%` is special only to the operation evaluator; here it is simply a dimensionless atom
//! worth one hundredth.

use core::fmt;
use core::str::FromStr;

use num_traits::{One, Zero};
use rust_decimal::Decimal;

use crate::error::UnitError;
use crate::node::{evaluated::NodeValue, operator::OperationKind};
use crate::value::Value;

pub const PERCENT: &str = "%";

#[derive(PartialEq, Eq, Debug, Clone, Default, Hash)]
pub struct Unit {
    pub numerators: Vec<String>,
    pub denominators: Vec<String>,
}

impl Unit {
    pub fn new(numerators: Vec<String>, denominators: Vec<String>) -> Self {
        Self { numerators, denominators }
    }

    /// A unit made of a single numerator atom, such as `m`.
    pub fn atom(name: &str) -> Self {
        Self::new(vec![name.to_string()], vec![])
    }

    pub fn percent() -> Self {
        Self::atom(PERCENT)
    }

    /// Parses the `a.b/c.d` notation. Whitespace around atoms is ignored, and an empty string is
    /// the empty unit.
    pub fn parse(text: &str) -> Result<Unit, UnitError> {
        let mut parts = text.splitn(2, '/');
        let numerators = Self::parse_atoms(parts.next().unwrap_or(""), text)?;
        let denominators = match parts.next() {
            Some(d) => {
                let atoms = Self::parse_atoms(d, text)?;
                if atoms.is_empty() {
                    return Err(UnitError::Malformed(text.to_string()));
                }
                atoms
            }
            None => vec![],
        };

        Ok(Self::new(numerators, denominators))
    }

    fn parse_atoms(part: &str, whole: &str) -> Result<Vec<String>, UnitError> {
        if part.trim().is_empty() {
            return Ok(vec![]);
        }

        part.split('.')
            .map(|atom| {
                let atom = atom.trim();
                if atom.is_empty() || atom.contains('/') {
                    Err(UnitError::Malformed(whole.to_string()))
                } else {
                    Ok(atom.to_string())
                }
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.numerators.is_empty() && self.denominators.is_empty()
    }

    /// True only for the bare `%` unit.
    pub fn is_percent(&self) -> bool {
        self.denominators.is_empty() && self.numerators.len() == 1 && self.numerators[0] == PERCENT
    }

    pub fn has_percent_numerator(&self) -> bool {
        self.numerators.iter().any(|a| a == PERCENT)
    }

    pub fn inverse(&self) -> Unit {
        Self::new(self.denominators.clone(), self.numerators.clone())
    }

    /// Multiplies two units, cancelling atoms which appear on both sides of the fraction bar.
    pub fn multiply(&self, other: &Unit) -> Unit {
        let mut numerators = self.numerators.clone();
        numerators.extend(other.numerators.iter().cloned());
        let mut denominators = self.denominators.clone();
        denominators.extend(other.denominators.iter().cloned());

        Self::new(numerators, denominators).simplify()
    }

    fn simplify(self) -> Unit {
        let mut numerators = vec![];
        let mut denominators = self.denominators;

        for atom in self.numerators {
            if let Some(i) = denominators.iter().position(|d| *d == atom) {
                denominators.remove(i);
            } else {
                numerators.push(atom);
            }
        }

        Self::new(numerators, denominators)
    }

    /// Discards the empty unit, which callers treat the same as no unit at all.
    pub fn non_empty(self) -> Option<Unit> {
        if self.is_empty() { None } else { Some(self) }
    }

    /// Reduces this unit to base atoms, returning the base unit (sorted, so that equal dimensions
    /// compare equal) and the size of this unit in that base, as a numerator and a denominator.
    /// The two halves are kept apart so that ratios such as months to years stay exact. The sizes
    /// are `None` if they overflow.
    fn to_base(&self) -> (Unit, Option<(Decimal, Decimal)>) {
        let mut numerators = vec![];
        let mut denominators = vec![];
        let numerator_factor = Self::reduce_atoms(&self.numerators, &mut numerators);
        let denominator_factor = Self::reduce_atoms(&self.denominators, &mut denominators);

        let mut base = Self::new(numerators, denominators).simplify();
        base.numerators.sort();
        base.denominators.sort();
        (base, numerator_factor.zip(denominator_factor))
    }

    fn reduce_atoms(atoms: &[String], base: &mut Vec<String>) -> Option<Decimal> {
        let mut factor = Some(Decimal::one());
        for atom in atoms {
            let (atom_base, f) = base_atom(atom);
            factor = factor.and_then(|factor| factor.checked_mul(f));
            base.extend(atom_base);
        }
        factor
    }

    /// The factor by which a quantity in this unit is multiplied to express it in `target`.
    pub fn conversion_factor(&self, target: &Unit) -> Result<Decimal, UnitError> {
        if self == target {
            return Ok(Decimal::one());
        }

        let (from_base, from_factors) = self.to_base();
        let (to_base, to_factors) = target.to_base();
        if from_base != to_base {
            return Err(UnitError::incompatible(self, target));
        }

        let overflow = || UnitError::overflow(self, target);
        let (from_numerator, from_denominator) = from_factors.ok_or_else(overflow)?;
        let (to_numerator, to_denominator) = to_factors.ok_or_else(overflow)?;
        let divisor = from_denominator.checked_mul(to_numerator).ok_or_else(overflow)?;
        if divisor.is_zero() {
            return Err(UnitError::incompatible(self, target));
        }

        from_numerator
            .checked_mul(to_denominator)
            .and_then(|dividend| dividend.checked_div(divisor))
            .ok_or_else(overflow)
    }
}

/// Maps a unit atom onto its base atom and the size of one atom in that base. `None` as the base
/// means the atom is dimensionless. Atoms not listed are their own base.
fn base_atom(atom: &str) -> (Option<String>, Decimal) {
    let (base, factor) = match atom {
        "mm" => ("m", Decimal::new(1, 3)),
        "cm" => ("m", Decimal::new(1, 2)),
        "m" => ("m", Decimal::one()),
        "km" => ("m", Decimal::ONE_THOUSAND),

        "g" => ("g", Decimal::one()),
        "kg" => ("g", Decimal::ONE_THOUSAND),
        "t" => ("g", Decimal::new(1_000_000, 0)),

        // Months are the base so that months, quarters and years convert exactly
        "day" => ("month", Decimal::new(12, 0) / Decimal::new(365, 0)),
        "week" => ("month", Decimal::new(84, 0) / Decimal::new(365, 0)),
        "month" => ("month", Decimal::one()),
        "quarter" => ("month", Decimal::new(3, 0)),
        "year" => ("month", Decimal::new(12, 0)),

        PERCENT => return (None, Decimal::new(1, 2)),

        other => return (Some(other.to_string()), Decimal::one()),
    };

    (Some(base.to_string()), factor)
}

impl FromStr for Unit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Unit::parse(s)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.numerators.join("."))?;
        if !self.denominators.is_empty() {
            write!(f, "/{}", self.denominators.join("."))?;
        }
        Ok(())
    }
}

/// Renders an optional unit for messages, with `none` standing in for a missing unit.
pub fn serialize_unit(unit: Option<&Unit>) -> String {
    match unit {
        Some(u) if !u.is_empty() => u.to_string(),
        _ => "none".to_string(),
    }
}

/// Infers the unit of `left <kind> right`. Only the arithmetic operators have a unit; for
/// addition and subtraction both operands are expected to share a unit already, so the first
/// one present wins.
pub fn infer_unit(kind: OperationKind, units: [Option<&Unit>; 2]) -> Option<Unit> {
    let [left, right] = units;
    let empty = Unit::default();

    match kind {
        OperationKind::Mul => {
            left.unwrap_or(&empty).multiply(right.unwrap_or(&empty)).non_empty()
        }
        OperationKind::Div => {
            left.unwrap_or(&empty).multiply(&right.unwrap_or(&empty).inverse()).non_empty()
        }
        OperationKind::Add | OperationKind::Sub => {
            left.or(right).cloned().and_then(Unit::non_empty)
        }
        _ => None,
    }
}

/// Converts a value from unit `from` into unit `to`. A value without a unit simply adopts the
/// target unit, and anything other than a number is unaffected by the conversion.
pub fn convert_value(value: &NodeValue, from: Option<&Unit>, to: &Unit) -> Result<NodeValue, UnitError> {
    let from = match from {
        Some(f) if !f.is_empty() => f,
        _ => return Ok(value.clone()),
    };

    let factor = from.conversion_factor(to)?;
    Ok(match value {
        NodeValue::Value(Value::Number(n)) => {
            let converted = n.checked_mul(factor).ok_or_else(|| UnitError::overflow(from, to))?;
            NodeValue::Value(Value::Number(converted))
        }
        other => other.clone(),
    })
}
