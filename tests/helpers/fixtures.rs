// ABOUTME: Forecasting fixtures shared by integration tests
// ABOUTME: Stub regression models, a fitted transform bundle, sample records, and server resources

#![allow(dead_code)]

use forecast_core::constants::forecast::HORIZON_DAYS;
use forecast_core::models::ExerciseRecord;
use forecast_intelligence::{
    EncodedWindow, FeatureEncoder, FeatureRange, FeatureTransformBundle, ModelOutput,
    OneHotEncoder, PipelineContext, RandomProvider, RegressionModel, SeededRandomProvider,
    WeightScaler,
};
use pierre_weight_forecast::config::ServerConfig;
use pierre_weight_forecast::resources::ServerResources;
use pierre_weight_forecast::storage::{InMemoryPredictionStore, PredictionStore};
use std::sync::{Arc, Mutex};

/// Model returning the same scaled value for every forecast day
pub struct ConstantModel(pub f64);

impl RegressionModel for ConstantModel {
    fn predict(&self, _input: &EncodedWindow) -> ModelOutput {
        Ok(vec![self.0; HORIZON_DAYS])
    }

    fn name(&self) -> &str {
        "constant-stub"
    }
}

/// Model that always fails inference
pub struct BrokenModel;

impl RegressionModel for BrokenModel {
    fn predict(&self, _input: &EncodedWindow) -> ModelOutput {
        Err("session closed".into())
    }

    fn name(&self) -> &str {
        "broken-stub"
    }
}

/// Constant-0.5 model that keeps every window it was asked to forecast
#[derive(Default)]
pub struct RecordingModel {
    seen: Mutex<Vec<EncodedWindow>>,
}

impl RecordingModel {
    /// Encoded calorie column of the most recent window
    pub fn last_calorie_column(&self) -> Vec<f64> {
        let seen = self.seen.lock().unwrap();
        let window = seen.last().expect("model was never called");
        window.rows().iter().map(|row| row[5]).collect()
    }
}

impl RegressionModel for RecordingModel {
    fn predict(&self, input: &EncodedWindow) -> ModelOutput {
        self.seen.lock().unwrap().push(input.clone());
        Ok(vec![0.5; HORIZON_DAYS])
    }

    fn name(&self) -> &str {
        "recording-stub"
    }
}

/// Bundle whose weight scaler spans `[50, 100]`
pub fn bundle() -> FeatureTransformBundle {
    FeatureTransformBundle {
        sex_encoder: OneHotEncoder::new(vec![0, 1]),
        bmi: FeatureRange::new(15.0, 40.0),
        weight: WeightScaler {
            age: FeatureRange::new(18.0, 80.0),
            bmi: FeatureRange::new(15.0, 40.0),
            weight: FeatureRange::new(50.0, 100.0),
            calories: FeatureRange::new(0.0, 1000.0),
        },
        calories: FeatureRange::new(0.0, 1000.0),
    }
}

/// `{sex: 0, age: 30, bmi: 25.0, weight: 75.0, calories: 300.0}`
pub fn record() -> ExerciseRecord {
    ExerciseRecord {
        sex: 0,
        age: 30,
        bmi: 25.0,
        weight: 75.0,
        calories: 300.0,
    }
}

/// Record with the given weight and calories at a fixed 3 m² height
pub fn record_with(weight: f64, calories: f64) -> ExerciseRecord {
    ExerciseRecord {
        weight,
        bmi: weight / 3.0,
        calories,
        ..record()
    }
}

/// Pipeline over the given model with a seeded random source
pub fn pipeline(model: Arc<dyn RegressionModel>, random: Arc<dyn RandomProvider>) -> PipelineContext {
    PipelineContext::new(model, Arc::new(bundle()), FeatureEncoder::default()).with_random(random)
}

/// Resources around a constant-0.5 model and an empty in-memory store
pub fn resources() -> Arc<ServerResources> {
    resources_with_model(Arc::new(ConstantModel(0.5)))
}

/// Resources around the given model and an empty in-memory store
pub fn resources_with_model(model: Arc<dyn RegressionModel>) -> Arc<ServerResources> {
    resources_with_pipeline(pipeline(model, Arc::new(SeededRandomProvider::new(42))))
}

/// Resources around an already-built pipeline and an empty in-memory store
pub fn resources_with_pipeline(pipeline: PipelineContext) -> Arc<ServerResources> {
    let store: Arc<dyn PredictionStore> = Arc::new(InMemoryPredictionStore::new());
    Arc::new(ServerResources::new(
        Arc::new(pipeline),
        store,
        Arc::new(ServerConfig::default()),
    ))
}
