use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    compute_parameters, CalibrationError, CardboardParams, DistortionResult, Eye, FieldOfView,
    ScreenParams, Vec2,
};

/// Uniform key names understood by the distortion technique.
pub mod keys {
    pub const COEFFICIENTS: &str = "coefficients";
    pub const EYE_OFFSET: &str = "eye_offset";
    pub const VIEWPORT_OFFSET: &str = "viewport_offset";
    pub const TEXTURE_SCALE: &str = "texture_scale";
    pub const VIGNETTE_X: &str = "vignette_x";
    pub const VIGNETTE_Y: &str = "vignette_y";
}

/// Value of a single shader uniform.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UniformValue {
    Float(f32),
    Vec2([f32; 2]),
}

/// Parameter bag of a GPU technique.
pub trait TechniqueParameters {
    fn set_value(&mut self, key: &str, value: UniformValue);
}

/// In-memory uniform bag, ordered by key.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UniformBag {
    values: BTreeMap<String, UniformValue>,
}

impl UniformBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<UniformValue> {
        self.values.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl TechniqueParameters for UniformBag {
    fn set_value(&mut self, key: &str, value: UniformValue) {
        self.values.insert(key.to_string(), value);
    }
}

impl DistortionResult {
    /// Uniforms in the order the technique declares them.
    ///
    /// `coefficients` carries `k1` and `k2`; a missing `k2` is sent as zero.
    pub fn uniforms(&self) -> [(&'static str, UniformValue); 6] {
        let k = |i: usize| self.coefficients.get(i).copied().unwrap_or(0.0) as f32;
        let v2 = |v: &Vec2| UniformValue::Vec2([v.x as f32, v.y as f32]);
        [
            (keys::COEFFICIENTS, UniformValue::Vec2([k(0), k(1)])),
            (keys::EYE_OFFSET, v2(&self.eye_offset)),
            (keys::VIEWPORT_OFFSET, v2(&self.viewport_offset)),
            (
                keys::TEXTURE_SCALE,
                UniformValue::Float(self.texture_scale as f32),
            ),
            (keys::VIGNETTE_X, UniformValue::Float(self.vignette_x as f32)),
            (keys::VIGNETTE_Y, UniformValue::Float(self.vignette_y as f32)),
        ]
    }

    /// Push every uniform into `technique`.
    pub fn apply_to<T: TechniqueParameters + ?Sized>(&self, technique: &mut T) {
        for (key, value) in self.uniforms() {
            technique.set_value(key, value);
        }
    }
}

/// A distortion technique bound to the parameters of one eye.
///
/// Recompute with [`set_parameters`](Self::set_parameters) whenever the
/// viewer, screen or eye changes. Updates must happen on the thread that
/// owns the render loop, before the next pass reads the technique.
#[derive(Debug)]
pub struct DistortionProgram<T: TechniqueParameters> {
    technique: T,
    result: DistortionResult,
}

impl<T: TechniqueParameters> DistortionProgram<T> {
    pub fn new(
        technique: T,
        params: &CardboardParams,
        screen: &ScreenParams,
        eye: Eye,
    ) -> Result<Self, CalibrationError> {
        let result = compute_parameters(params, screen, eye)?;
        let mut program = Self { technique, result };
        program.result.apply_to(&mut program.technique);
        Ok(program)
    }

    /// Recompute and push new parameters.
    ///
    /// On error the technique keeps its previous values.
    pub fn set_parameters(
        &mut self,
        params: &CardboardParams,
        screen: &ScreenParams,
        eye: Eye,
    ) -> Result<(), CalibrationError> {
        let result = compute_parameters(params, screen, eye)?;
        result.apply_to(&mut self.technique);
        self.result = result;
        Ok(())
    }

    pub fn fov(&self) -> &FieldOfView {
        &self.result.fov
    }

    pub fn result(&self) -> &DistortionResult {
        &self.result
    }

    pub fn technique(&self) -> &T {
        &self.technique
    }

    pub fn into_technique(self) -> T {
        self.technique
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> ScreenParams {
        ScreenParams::new(0.110, 0.068).unwrap()
    }

    #[test]
    fn apply_sets_all_keys() {
        let result = compute_parameters(&CardboardParams::default(), &screen(), Eye::Left).unwrap();
        let mut bag = UniformBag::new();
        result.apply_to(&mut bag);

        assert_eq!(bag.len(), 6);
        assert_eq!(
            bag.get(keys::COEFFICIENTS),
            Some(UniformValue::Vec2([0.441_f64 as f32, 0.156_f64 as f32]))
        );
        assert_eq!(bag.get(keys::VIGNETTE_X), Some(UniformValue::Float(0.05_f64 as f32)));
        assert_eq!(bag.get(keys::VIGNETTE_Y), Some(UniformValue::Float(0.02_f64 as f32)));
        assert_eq!(
            bag.get(keys::TEXTURE_SCALE),
            Some(UniformValue::Float(result.texture_scale as f32))
        );
        assert!(bag.get("unknown").is_none());
    }

    #[test]
    fn single_coefficient_pads_with_zero() {
        let params = CardboardParams {
            distortion_coefficients: vec![0.25],
            ..CardboardParams::default()
        };
        let result = compute_parameters(&params, &screen(), Eye::Right).unwrap();
        assert_eq!(result.uniforms()[0].1, UniformValue::Vec2([0.25, 0.0]));
    }

    #[test]
    fn program_tracks_eye_changes() {
        let params = CardboardParams::default();
        let mut program =
            DistortionProgram::new(UniformBag::new(), &params, &screen(), Eye::Left).unwrap();
        let left_top = program.fov().top;
        let Some(UniformValue::Vec2([_, left_y])) = program.technique().get(keys::EYE_OFFSET)
        else {
            panic!("eye_offset missing");
        };

        program
            .set_parameters(&params, &screen(), Eye::Right)
            .unwrap();
        assert_eq!(program.fov().bottom, left_top);
        let Some(UniformValue::Vec2([_, right_y])) = program.technique().get(keys::EYE_OFFSET)
        else {
            panic!("eye_offset missing");
        };
        assert_eq!(left_y, -right_y);
    }

    #[test]
    fn failed_update_keeps_previous_values() {
        let params = CardboardParams::default();
        let mut program =
            DistortionProgram::new(UniformBag::new(), &params, &screen(), Eye::Left).unwrap();
        let before = program.technique().clone();
        let fov_before = *program.fov();

        let bad = ScreenParams {
            height_meters: 0.0,
            ..screen()
        };
        assert!(program.set_parameters(&params, &bad, Eye::Right).is_err());
        assert_eq!(program.technique(), &before);
        assert_eq!(program.fov(), &fov_before);
        assert_eq!(program.into_technique(), before);
    }

    #[test]
    fn bag_serializes_by_key() {
        let mut bag = UniformBag::new();
        bag.set_value(keys::TEXTURE_SCALE, UniformValue::Float(0.5));
        bag.set_value(keys::EYE_OFFSET, UniformValue::Vec2([1.0, -2.0]));
        let json = serde_json::to_string(&bag).unwrap();
        assert_eq!(json, r#"{"eye_offset":[1.0,-2.0],"texture_scale":0.5}"#);
    }
}
