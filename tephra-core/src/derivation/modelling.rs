//! Output units and post-processing switches.
//!
//! The engine reads these verbatim, so the values are fixed rather than derived.

use crate::parameters::{ParameterSet, ParameterValue};

/// Hardwired output settings, in the order they appear in the engine input file.
pub const MODELLING_CONSTANTS: [(&str, ModellingConstant); 9] = [
    ("load_units", ModellingConstant::Text("kg/m2")),
    ("class_load_units", ModellingConstant::Text("kg/m2")),
    ("total_concentration_units", ModellingConstant::Text("kg/m3")),
    ("z_cummulative_concentration_units", ModellingConstant::Text("kg/m2")),
    ("z_maximum_concentration_units", ModellingConstant::Text("kg/m3")),
    // Hours
    ("Postprocess_time_interval", ModellingConstant::Integer(1)),
    ("Postprocess_3D_variables", ModellingConstant::Text("No")),
    ("Postprocess_classes", ModellingConstant::Text("No")),
    ("Track_points", ModellingConstant::Text("No")),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModellingConstant {
    Integer(i64),
    Text(&'static str),
}

impl From<ModellingConstant> for ParameterValue {
    fn from(value: ModellingConstant) -> Self {
        match value {
            ModellingConstant::Integer(v) => ParameterValue::Integer(v),
            ModellingConstant::Text(v) => ParameterValue::Text(v.to_string()),
        }
    }
}

/// Write the fixed output settings, replacing any values already present.
pub fn derive_modelling_parameters(params: &mut ParameterSet) {
    for (name, value) in MODELLING_CONSTANTS {
        params.insert(name, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units_and_switches() {
        let mut params = ParameterSet::new();
        params.insert("Track_points", "Yes");
        derive_modelling_parameters(&mut params);

        let rendered = params.engine_values();
        assert_eq!(rendered["load_units"], "kg/m2");
        assert_eq!(rendered["class_load_units"], "kg/m2");
        assert_eq!(rendered["total_concentration_units"], "kg/m3");
        assert_eq!(rendered["z_cummulative_concentration_units"], "kg/m2");
        assert_eq!(rendered["z_maximum_concentration_units"], "kg/m3");
        assert_eq!(rendered["Postprocess_time_interval"], "1");
        assert_eq!(rendered["Postprocess_3D_variables"], "No");
        assert_eq!(rendered["Postprocess_classes"], "No");
        assert_eq!(rendered["Track_points"], "No");
        assert_eq!(params.len(), MODELLING_CONSTANTS.len());
    }
}
