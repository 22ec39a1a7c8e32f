//! Global reference distribution.
//!
//! The fairness comparison needs a "general population" baseline per feature
//! and sex. That baseline is a synthetic sample generated once from
//! documented world demographic statistics (age-bucket population counts,
//! per-sex height and BMI normal parameters) and cached as a CSV artifact.
//! Analysis calls only ever read it; [`synthesize`] exists so the artifact
//! can be regenerated as a batch step.

use std::{collections::HashMap, path::Path};

use rand::{
    Rng, SeedableRng,
    distr::{Distribution, weighted::WeightedIndex},
};
use rand_distr::Normal;
use rand_pcg::Pcg64Mcg;
use serde::{Deserialize, Serialize};

use crate::{
    feature::Feature,
    record::Sex,
    table::LoadError,
};

/// One row of the reference sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRow {
    #[serde(rename = "Age")]
    pub age: f64,
    #[serde(rename = "Height")]
    pub height: f64,
    #[serde(rename = "BMI")]
    pub bmi: f64,
    #[serde(rename = "Sex")]
    pub sex: Sex,
}

/// Per-feature, per-sex baseline samples.
#[derive(Debug, Clone, Default)]
pub struct ReferenceDistribution {
    samples: HashMap<(Feature, Sex), Vec<f64>>,
}

impl ReferenceDistribution {
    /// Builds the distribution from raw reference rows.
    #[must_use]
    pub fn from_rows(rows: &[ReferenceRow]) -> Self {
        let mut samples: HashMap<(Feature, Sex), Vec<f64>> = HashMap::new();
        for row in rows {
            samples.entry((Feature::Age, row.sex)).or_default().push(row.age);
            samples.entry((Feature::Height, row.sex)).or_default().push(row.height);
            samples.entry((Feature::Bmi, row.sex)).or_default().push(row.bmi);
        }
        Self { samples }
    }

    /// Loads the cached reference CSV (`Age,Height,BMI,Sex` columns).
    pub fn load<P>(path: P) -> Result<Self, LoadError>
    where
        P: AsRef<Path>,
    {
        let path_display = path.as_ref().display().to_string();
        let unavailable = |source| LoadError::Unavailable {
            path: path_display.clone(),
            source,
        };

        let mut reader = csv::Reader::from_path(path.as_ref()).map_err(&unavailable)?;
        let headers = reader.headers().map_err(&unavailable)?.clone();
        for required in ["Age", "Height", "BMI", "Sex"] {
            if !headers.iter().any(|h| h == required) {
                return Err(LoadError::MissingColumn {
                    path: path_display.clone(),
                    column: required,
                });
            }
        }

        let mut rows = Vec::new();
        for record in reader.deserialize::<ReferenceRow>() {
            let Ok(row) = record else {
                continue;
            };
            rows.push(row);
        }
        Ok(Self::from_rows(&rows))
    }

    /// The baseline sample for a feature and sex, if one was generated.
    ///
    /// Only `Age`, `Height` and `BMI` have reference samples; the remaining
    /// features have no population baseline.
    #[must_use]
    pub fn sample(&self, feature: Feature, sex: Sex) -> Option<&[f64]> {
        self.samples.get(&(feature, sex)).map(Vec::as_slice)
    }
}

/// World population count per five-year age bucket, by sex.
struct AgeBucket {
    count_m: u64,
    count_f: u64,
    age_min: u32,
    age_max: u32,
}

const AGE_BUCKETS: [AgeBucket; 21] = [
    AgeBucket { count_m: 331_889_289, count_f: 315_450_649, age_min: 0, age_max: 4 },
    AgeBucket { count_m: 351_991_008, count_f: 332_121_131, age_min: 5, age_max: 9 },
    AgeBucket { count_m: 353_666_705, count_f: 331_681_954, age_min: 10, age_max: 14 },
    AgeBucket { count_m: 335_882_343, count_f: 315_258_559, age_min: 15, age_max: 19 },
    AgeBucket { count_m: 318_912_554, count_f: 300_510_028, age_min: 20, age_max: 24 },
    AgeBucket { count_m: 308_889_349, count_f: 291_429_439, age_min: 25, age_max: 29 },
    AgeBucket { count_m: 310_384_416, count_f: 294_303_405, age_min: 30, age_max: 34 },
    AgeBucket { count_m: 301_744_799, count_f: 289_424_003, age_min: 35, age_max: 39 },
    AgeBucket { count_m: 270_991_534, count_f: 263_180_352, age_min: 40, age_max: 44 },
    AgeBucket { count_m: 240_153_677, count_f: 236_696_232, age_min: 45, age_max: 49 },
    AgeBucket { count_m: 231_342_779, count_f: 232_097_236, age_min: 50, age_max: 54 },
    AgeBucket { count_m: 206_686_596, count_f: 212_285_997, age_min: 55, age_max: 59 },
    AgeBucket { count_m: 170_525_048, count_f: 180_992_721, age_min: 60, age_max: 64 },
    AgeBucket { count_m: 138_182_244, count_f: 154_357_035, age_min: 65, age_max: 69 },
    AgeBucket { count_m: 103_998_992, count_f: 124_048_996, age_min: 70, age_max: 74 },
    AgeBucket { count_m: 65_570_812, count_f: 83_217_973, age_min: 75, age_max: 79 },
    AgeBucket { count_m: 37_166_893, count_f: 53_013_079, age_min: 80, age_max: 84 },
    AgeBucket { count_m: 18_342_182, count_f: 31_348_041, age_min: 85, age_max: 89 },
    AgeBucket { count_m: 6_038_458, count_f: 13_078_242, age_min: 90, age_max: 94 },
    AgeBucket { count_m: 1_141_691, count_f: 3_389_124, age_min: 95, age_max: 99 },
    AgeBucket { count_m: 110_838, count_f: 476_160, age_min: 100, age_max: 105 },
];

/// Per-sex normal parameters for height (cm) and BMI.
fn body_params(sex: Sex) -> (Normal<f64>, Normal<f64>) {
    let (height_mean, height_std, bmi_mean, bmi_std) = match sex {
        Sex::M => (173.0, 6.35, 24.2, 4.5),
        Sex::F => (159.0, 5.59, 24.4, 5.0),
    };
    (
        Normal::new(height_mean, height_std).unwrap(),
        Normal::new(bmi_mean, bmi_std).unwrap(),
    )
}

/// Draws from a normal distribution, redrawing until the value is positive.
fn positive_normal<R>(normal: &Normal<f64>, rng: &mut R) -> f64
where
    R: Rng,
{
    loop {
        let value = normal.sample(rng);
        if value > 0.0 {
            return value;
        }
    }
}

/// Generates the synthetic reference sample for both sexes.
///
/// Ages follow the world age-bucket proportions (uniform within a bucket),
/// heights and BMIs follow per-sex normal distributions truncated to
/// positive values. Deterministic for a fixed seed.
#[must_use]
pub fn synthesize(samples_per_sex: usize, seed: u64) -> Vec<ReferenceRow> {
    let mut rng = Pcg64Mcg::seed_from_u64(seed);
    let mut rows = Vec::with_capacity(samples_per_sex * 2);

    for sex in [Sex::M, Sex::F] {
        let weights = AGE_BUCKETS.iter().map(|bucket| match sex {
            Sex::M => bucket.count_m,
            Sex::F => bucket.count_f,
        });
        let bucket_index = WeightedIndex::new(weights).unwrap();
        let (height_normal, bmi_normal) = body_params(sex);

        for _ in 0..samples_per_sex {
            let bucket = &AGE_BUCKETS[bucket_index.sample(&mut rng)];
            let age = rng.random_range(bucket.age_min..=bucket.age_max);
            rows.push(ReferenceRow {
                age: f64::from(age),
                height: positive_normal(&height_normal, &mut rng),
                bmi: positive_normal(&bmi_normal, &mut rng),
                sex,
            });
        }
    }
    rows
}
