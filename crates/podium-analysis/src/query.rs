//! Request payloads accepted at the analysis boundary.

use podium_data::{Feature, Sex, SexFilter, gdp::GdpTable};
use serde::{Deserialize, Serialize};

use crate::{error::AnalysisError, level::AggregationLevel};

/// Common parameters of a grouped analysis request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub level: AggregationLevel,
    #[serde(default)]
    pub sex: SexFilter,
    pub features: Vec<Feature>,
    /// Group names to restrict the analysis to; empty means all groups.
    #[serde(default)]
    pub keys: Vec<String>,
}

/// An ad hoc athlete profile to rank groups against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserQuery {
    pub sex: Sex,
    pub age: f64,
    /// Height in centimeters.
    pub height: f64,
    /// Weight in kilograms.
    pub weight: f64,
    /// Country code, resolved to GDP when that feature is requested.
    pub noc: String,
}

impl UserQuery {
    /// Materializes the query as a feature vector in the given order.
    ///
    /// BMI is derived as `weight / (height_m)^2`; GDP is resolved through
    /// the lookup table.
    ///
    /// # Errors
    ///
    /// * [`AnalysisError::InvalidParameter`] - non-positive height or weight
    /// * [`AnalysisError::UnknownCountry`] - GDP requested for an unlisted
    ///   country code
    pub fn to_feature_values(
        &self,
        features: &[Feature],
        gdp: &GdpTable,
    ) -> Result<Vec<f64>, AnalysisError> {
        if self.height <= 0.0 || self.weight <= 0.0 {
            return Err(AnalysisError::invalid(format!(
                "height and weight must be positive, got {} cm / {} kg",
                self.height, self.weight
            )));
        }
        features
            .iter()
            .map(|&feature| {
                Ok(match feature {
                    Feature::Height => self.height,
                    Feature::Weight => self.weight,
                    Feature::Age => self.age,
                    Feature::Bmi => {
                        let height_m = self.height / 100.0;
                        self.weight / (height_m * height_m)
                    }
                    Feature::Gdp => gdp.lookup(&self.noc)?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserQuery {
        UserQuery {
            sex: Sex::M,
            age: 28.0,
            height: 180.0,
            weight: 81.0,
            noc: "SLO".to_owned(),
        }
    }

    #[test]
    fn test_bmi_is_derived_from_height_and_weight() {
        let gdp = GdpTable::from_pairs([("SLO".to_owned(), 28_000.0)]);
        let values = user()
            .to_feature_values(&[Feature::Bmi, Feature::Gdp], &gdp)
            .unwrap();
        assert!((values[0] - 25.0).abs() < 1e-12);
        assert_eq!(values[1], 28_000.0);
    }

    #[test]
    fn test_unknown_country_surfaces_as_its_own_error() {
        let gdp = GdpTable::default();
        let err = user()
            .to_feature_values(&[Feature::Gdp], &gdp)
            .unwrap_err();
        assert!(matches!(err, AnalysisError::UnknownCountry { .. }));
    }

    #[test]
    fn test_non_positive_measurements_are_rejected() {
        let gdp = GdpTable::default();
        let mut query = user();
        query.height = 0.0;
        let err = query.to_feature_values(&[Feature::Age], &gdp).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidParameter { .. }));
    }

    #[test]
    fn test_request_deserializes_with_defaults() {
        let request: AnalysisRequest =
            serde_json::from_str(r#"{"level":"Sport","features":["Height"]}"#).unwrap();
        assert_eq!(request.level, AggregationLevel::Sport);
        assert_eq!(request.sex, SexFilter::All);
        assert!(request.keys.is_empty());
    }

    #[test]
    fn test_request_features_spell_like_dataset_columns() {
        let request: AnalysisRequest =
            serde_json::from_str(r#"{"level":"Event","features":["BMI","GDP","Age"]}"#).unwrap();
        assert_eq!(
            request.features,
            vec![Feature::Bmi, Feature::Gdp, Feature::Age]
        );
        // Serialization uses the same column spellings.
        let json = serde_json::to_string(&request.features).unwrap();
        assert_eq!(json, r#"["BMI","GDP","Age"]"#);
    }
}
