use std::fmt;
use std::str::FromStr;

use galaxy_generator::{GalaxyColor, GalaxyParameters};
use thiserror::Error;

/// One change requested by the parameter editor.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterEdit {
    Count(u32),
    Size(f32),
    Radius(f32),
    Branches(u32),
    Spin(f32),
    Randomness(f32),
    RandomnessPower(f32),
    InsideColor(GalaxyColor),
    OutsideColor(GalaxyColor),
    Reset,
}

#[derive(Error, Debug, PartialEq)]
pub enum EditParseError {
    #[error("empty edit")]
    Empty,
    #[error("unknown parameter `{0}`")]
    UnknownParameter(String),
    #[error("`{0}` needs a value")]
    MissingValue(String),
    #[error("`{value}` is not a valid {parameter}")]
    InvalidValue { parameter: String, value: String },
    #[error("unexpected `{0}` after the value")]
    TrailingInput(String),
}

impl ParameterEdit {
    /// The edited parameter set, clamped and snapped to the editor ranges.
    pub fn apply(&self, params: &GalaxyParameters) -> GalaxyParameters {
        let mut next = params.clone();
        match *self {
            ParameterEdit::Count(count) => next.count = count,
            ParameterEdit::Size(size) => next.size = size,
            ParameterEdit::Radius(radius) => next.radius = radius,
            ParameterEdit::Branches(branches) => next.branches = branches,
            ParameterEdit::Spin(spin) => next.spin = spin,
            ParameterEdit::Randomness(randomness) => next.randomness = randomness,
            ParameterEdit::RandomnessPower(power) => next.randomness_power = power,
            ParameterEdit::InsideColor(color) => next.inside_color = color,
            ParameterEdit::OutsideColor(color) => next.outside_color = color,
            ParameterEdit::Reset => next = GalaxyParameters::default(),
        }
        next.clamped_to_editor()
    }
}

fn parse_value<T: FromStr>(parameter: &str, value: &str) -> Result<T, EditParseError> {
    value.parse().map_err(|_| EditParseError::InvalidValue {
        parameter: parameter.to_string(),
        value: value.to_string(),
    })
}

fn parse_color(parameter: &str, value: &str) -> Result<GalaxyColor, EditParseError> {
    GalaxyColor::from_hex(value).map_err(|_| EditParseError::InvalidValue {
        parameter: parameter.to_string(),
        value: value.to_string(),
    })
}

impl FromStr for ParameterEdit {
    type Err = EditParseError;

    /// `<parameter> <value>` or `reset`. Parameter names are accepted in snake_case or camelCase.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let parameter = words.next().ok_or(EditParseError::Empty)?;

        if parameter == "reset" {
            return match words.next() {
                Some(extra) => Err(EditParseError::TrailingInput(extra.to_string())),
                None => Ok(ParameterEdit::Reset),
            };
        }

        let value = words
            .next()
            .ok_or_else(|| EditParseError::MissingValue(parameter.to_string()))?;
        if let Some(extra) = words.next() {
            return Err(EditParseError::TrailingInput(extra.to_string()));
        }

        let edit = match parameter {
            "count" => ParameterEdit::Count(parse_value(parameter, value)?),
            "size" => ParameterEdit::Size(parse_value(parameter, value)?),
            "radius" => ParameterEdit::Radius(parse_value(parameter, value)?),
            "branches" => ParameterEdit::Branches(parse_value(parameter, value)?),
            "spin" => ParameterEdit::Spin(parse_value(parameter, value)?),
            "randomness" => ParameterEdit::Randomness(parse_value(parameter, value)?),
            "randomness_power" | "randomnessPower" => {
                ParameterEdit::RandomnessPower(parse_value(parameter, value)?)
            }
            "inside_color" | "insideColor" => {
                ParameterEdit::InsideColor(parse_color(parameter, value)?)
            }
            "outside_color" | "outsideColor" => {
                ParameterEdit::OutsideColor(parse_color(parameter, value)?)
            }
            other => return Err(EditParseError::UnknownParameter(other.to_string())),
        };
        Ok(edit)
    }
}

impl fmt::Display for ParameterEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterEdit::Count(v) => write!(f, "count = {v}"),
            ParameterEdit::Size(v) => write!(f, "size = {v}"),
            ParameterEdit::Radius(v) => write!(f, "radius = {v}"),
            ParameterEdit::Branches(v) => write!(f, "branches = {v}"),
            ParameterEdit::Spin(v) => write!(f, "spin = {v}"),
            ParameterEdit::Randomness(v) => write!(f, "randomness = {v}"),
            ParameterEdit::RandomnessPower(v) => write!(f, "randomness_power = {v}"),
            ParameterEdit::InsideColor(c) => write!(f, "inside_color = {}", c.to_hex()),
            ParameterEdit::OutsideColor(c) => write!(f, "outside_color = {}", c.to_hex()),
            ParameterEdit::Reset => write!(f, "reset"),
        }
    }
}
