use serde::{Deserialize, Serialize};

use crate::{GalaxyColor, GalaxyError};

/// Parameter snapshot for one generation call.
///
/// `size` and `randomness` are carried for the consumer of the point cloud; the
/// generation loop itself only reads `randomness_power` for the jitter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalaxyParameters {
    pub count: u32,
    pub size: f32,
    pub radius: f32,
    pub branches: u32,
    pub spin: f32,
    pub randomness: f32,
    pub randomness_power: f32,
    pub inside_color: GalaxyColor,
    pub outside_color: GalaxyColor,
}

impl Default for GalaxyParameters {
    fn default() -> Self {
        Self {
            count: 100_000,
            size: 0.01,
            radius: 5.0,
            branches: 3,
            spin: 1.0,
            randomness: 0.2,
            randomness_power: 3.0,
            // #ff6030
            inside_color: GalaxyColor::rgb(1.0, 96.0 / 255.0, 48.0 / 255.0),
            // #1b3984
            outside_color: GalaxyColor::rgb(27.0 / 255.0, 57.0 / 255.0, 132.0 / 255.0),
        }
    }
}

/// Which bounds `validate` checks against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParameterDomain {
    /// The ranges the parameter editor exposes.
    #[default]
    Editor,
    /// Only what the algorithm needs to stay well defined: finite values, at least one
    /// branch, non-negative radius. Allows empty clouds.
    Permissive,
}

impl GalaxyParameters {
    pub const MIN: Self = Self {
        count: 100,
        size: 0.001,
        radius: 0.01,
        branches: 2,
        spin: -10.0,
        randomness: 0.0,
        randomness_power: 1.0,
        inside_color: GalaxyColor::rgb(0.0, 0.0, 0.0),
        outside_color: GalaxyColor::rgb(0.0, 0.0, 0.0),
    };
    pub const MAX: Self = Self {
        count: 1_000_000,
        size: 0.1,
        radius: 20.0,
        branches: 20,
        spin: 10.0,
        randomness: 2.0,
        randomness_power: 10.0,
        inside_color: GalaxyColor::rgb(1.0, 1.0, 1.0),
        outside_color: GalaxyColor::rgb(1.0, 1.0, 1.0),
    };
    /// Editor step sizes. Colors have no step.
    pub const STEP: Self = Self {
        count: 100,
        size: 0.001,
        radius: 0.01,
        branches: 1,
        spin: 0.001,
        randomness: 0.001,
        randomness_power: 0.001,
        inside_color: GalaxyColor::rgb(0.0, 0.0, 0.0),
        outside_color: GalaxyColor::rgb(0.0, 0.0, 0.0),
    };

    /// Checks every field, reporting the first violation.
    pub fn validate(&self, domain: ParameterDomain) -> Result<(), GalaxyError> {
        // finite checks come first so a NaN never slips through a range comparison
        for (field, value) in self.float_fields() {
            if !value.is_finite() {
                return Err(GalaxyError::invalid(field, format!("{value} is not finite")));
            }
        }
        for (field, color) in [
            ("inside_color", &self.inside_color),
            ("outside_color", &self.outside_color),
        ] {
            if !color.is_finite() {
                return Err(GalaxyError::invalid(field, "color channel is not finite"));
            }
        }
        if self.branches == 0 {
            return Err(GalaxyError::invalid("branches", "must be at least 1"));
        }

        match domain {
            ParameterDomain::Editor => self.validate_editor_ranges(),
            ParameterDomain::Permissive => {
                for (field, value) in [
                    ("size", self.size),
                    ("radius", self.radius),
                    ("randomness_power", self.randomness_power),
                ] {
                    if value < 0.0 {
                        return Err(GalaxyError::invalid(field, format!("{value} is negative")));
                    }
                }
                Ok(())
            }
        }
    }

    fn validate_editor_ranges(&self) -> Result<(), GalaxyError> {
        let (min, max) = (&Self::MIN, &Self::MAX);

        if !(min.count..=max.count).contains(&self.count) {
            return Err(out_of_range("count", self.count, min.count, max.count));
        }
        if !(min.branches..=max.branches).contains(&self.branches) {
            return Err(out_of_range("branches", self.branches, min.branches, max.branches));
        }
        for ((field, value), ((_, lo), (_, hi))) in self
            .float_fields()
            .into_iter()
            .zip(min.float_fields().into_iter().zip(max.float_fields()))
        {
            if !(lo..=hi).contains(&value) {
                return Err(out_of_range(field, value, lo, hi));
            }
        }
        for (field, color) in [
            ("inside_color", &self.inside_color),
            ("outside_color", &self.outside_color),
        ] {
            if color.to_array().iter().any(|c| !(0.0..=1.0).contains(c)) {
                return Err(GalaxyError::invalid(field, "channels must lie in [0, 1]"));
            }
        }
        Ok(())
    }

    fn float_fields(&self) -> [(&'static str, f32); 5] {
        [
            ("size", self.size),
            ("radius", self.radius),
            ("spin", self.spin),
            ("randomness", self.randomness),
            ("randomness_power", self.randomness_power),
        ]
    }

    /// Clamps every field into the editor ranges and snaps it onto the editor step grid,
    /// the way the editing surface does before asking for a regeneration. Non-finite floats
    /// fall back to their default.
    pub fn clamped_to_editor(&self) -> Self {
        let (min, max, step) = (&Self::MIN, &Self::MAX, &Self::STEP);
        let fallback = Self::default();

        let snap_f32 = |value: f32, lo: f32, hi: f32, step: f32, default: f32| {
            if !value.is_finite() {
                return default;
            }
            let clamped = value.clamp(lo, hi);
            let steps = (clamped as f64 - lo as f64) / step as f64;
            // values already on the grid are kept bit for bit
            if (steps - steps.round()).abs() < 1e-2 {
                return clamped;
            }
            ((lo as f64 + steps.round() * step as f64) as f32).clamp(lo, hi)
        };
        let snap_u32 = |value: u32, lo: u32, hi: u32, step: u32| {
            let clamped = value.clamp(lo, hi);
            let snapped = lo + (clamped - lo + step / 2) / step * step;
            snapped.min(hi)
        };
        let clamp_color = |color: GalaxyColor, default: GalaxyColor| {
            if !color.is_finite() {
                return default;
            }
            GalaxyColor::rgb(
                color.r.clamp(0.0, 1.0),
                color.g.clamp(0.0, 1.0),
                color.b.clamp(0.0, 1.0),
            )
        };

        Self {
            count: snap_u32(self.count, min.count, max.count, step.count),
            size: snap_f32(self.size, min.size, max.size, step.size, fallback.size),
            radius: snap_f32(self.radius, min.radius, max.radius, step.radius, fallback.radius),
            branches: snap_u32(self.branches, min.branches, max.branches, step.branches),
            spin: snap_f32(self.spin, min.spin, max.spin, step.spin, fallback.spin),
            randomness: snap_f32(
                self.randomness,
                min.randomness,
                max.randomness,
                step.randomness,
                fallback.randomness,
            ),
            randomness_power: snap_f32(
                self.randomness_power,
                min.randomness_power,
                max.randomness_power,
                step.randomness_power,
                fallback.randomness_power,
            ),
            inside_color: clamp_color(self.inside_color, fallback.inside_color),
            outside_color: clamp_color(self.outside_color, fallback.outside_color),
        }
    }
}

fn out_of_range<T: std::fmt::Display>(field: &'static str, value: T, lo: T, hi: T) -> GalaxyError {
    GalaxyError::invalid(field, format!("{value} is outside [{lo}, {hi}]"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(err: GalaxyError) -> &'static str {
        match err {
            GalaxyError::InvalidParameter { field, .. } => field,
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn defaults_are_inside_editor_domain() {
        GalaxyParameters::default()
            .validate(ParameterDomain::Editor)
            .unwrap();
        GalaxyParameters::MIN.validate(ParameterDomain::Editor).unwrap();
        GalaxyParameters::MAX.validate(ParameterDomain::Editor).unwrap();
    }

    #[test]
    fn zero_branches_rejected_in_every_domain() {
        let params = GalaxyParameters {
            branches: 0,
            ..default_params()
        };
        for domain in [ParameterDomain::Editor, ParameterDomain::Permissive] {
            assert_eq!(field_of(params.validate(domain).unwrap_err()), "branches");
        }
    }

    #[test]
    fn non_finite_rejected() {
        let params = GalaxyParameters {
            spin: f32::NAN,
            ..default_params()
        };
        assert_eq!(
            field_of(params.validate(ParameterDomain::Permissive).unwrap_err()),
            "spin"
        );

        let params = GalaxyParameters {
            outside_color: GalaxyColor::rgb(0.0, f32::INFINITY, 0.0),
            ..default_params()
        };
        assert_eq!(
            field_of(params.validate(ParameterDomain::Permissive).unwrap_err()),
            "outside_color"
        );
    }

    #[test]
    fn editor_ranges_enforced() {
        let cases = [
            (GalaxyParameters { count: 99, ..default_params() }, "count"),
            (GalaxyParameters { count: 1_000_001, ..default_params() }, "count"),
            (GalaxyParameters { branches: 21, ..default_params() }, "branches"),
            (GalaxyParameters { radius: 0.0, ..default_params() }, "radius"),
            (GalaxyParameters { spin: 10.5, ..default_params() }, "spin"),
            (GalaxyParameters { randomness: -0.1, ..default_params() }, "randomness"),
            (GalaxyParameters { randomness_power: 0.5, ..default_params() }, "randomness_power"),
            (GalaxyParameters { size: 0.2, ..default_params() }, "size"),
        ];
        for (params, field) in cases {
            assert_eq!(field_of(params.validate(ParameterDomain::Editor).unwrap_err()), field);
        }
    }

    #[test]
    fn permissive_allows_empty_and_single_branch() {
        let params = GalaxyParameters {
            count: 0,
            branches: 1,
            radius: 0.0,
            ..default_params()
        };
        params.validate(ParameterDomain::Permissive).unwrap();
        assert!(params.validate(ParameterDomain::Editor).is_err());

        let negative = GalaxyParameters {
            radius: -1.0,
            ..default_params()
        };
        assert_eq!(
            field_of(negative.validate(ParameterDomain::Permissive).unwrap_err()),
            "radius"
        );
    }

    #[test]
    fn clamping_snaps_to_editor_grid() {
        let params = GalaxyParameters {
            count: 12_345,
            branches: 40,
            spin: -25.0,
            radius: 3.14159,
            randomness_power: f32::NAN,
            inside_color: GalaxyColor::rgb(1.5, -0.5, 0.5),
            ..default_params()
        }
        .clamped_to_editor();

        assert_eq!(params.count, 12_300);
        assert_eq!(params.branches, 20);
        assert_eq!(params.spin, -10.0);
        assert!((params.radius - 3.14).abs() < 1e-4);
        assert_eq!(params.randomness_power, 3.0);
        assert_eq!(params.inside_color, GalaxyColor::rgb(1.0, 0.0, 0.5));
        params.validate(ParameterDomain::Editor).unwrap();
    }

    #[test]
    fn clamping_keeps_on_grid_values() {
        let params = GalaxyParameters::default();
        assert_eq!(params.clamped_to_editor(), params);
        assert_eq!(GalaxyParameters::MAX.clamped_to_editor(), GalaxyParameters::MAX);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let params: GalaxyParameters =
            serde_json::from_str(r##"{ "count": 500, "outside_color": "#ffffff" }"##).unwrap();
        assert_eq!(params.count, 500);
        assert_eq!(params.outside_color, GalaxyColor::rgb(1.0, 1.0, 1.0));
        assert_eq!(params.branches, 3);
    }

    fn default_params() -> GalaxyParameters {
        GalaxyParameters::default()
    }
}
