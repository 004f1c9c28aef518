use super::astronomical::AstronomicalSnapshot;
use super::environment::EnvironmentReading;
use super::task::TaskSnapshot;
use super::vegetation::VegetationReading;
use serde::{Deserialize, Serialize};

/// Latest sample from each source for one field. `None` means the source
/// was unreachable, timed out or returned something unusable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldSnapshots {
    pub vegetation: Option<VegetationReading>,
    pub environment: Option<EnvironmentReading>,
    pub tasks: Option<TaskSnapshot>,
    pub astronomical: Option<AstronomicalSnapshot>,
}

impl FieldSnapshots {
    pub fn soil_moisture(&self) -> Option<f64> {
        self.environment
            .as_ref()
            .and_then(|e| e.soil_moisture_percent)
    }

    pub fn status(&self) -> SourceStatus {
        SourceStatus {
            vegetation: self.vegetation.is_some(),
            soil: self.soil_moisture().is_some(),
            weather: self
                .environment
                .as_ref()
                .is_some_and(|e| e.weather.is_some()),
            tasks: self.tasks.is_some(),
            astronomical: self.astronomical.is_some(),
        }
    }
}

/// Which inputs contributed to a score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceStatus {
    pub vegetation: bool,
    pub soil: bool,
    pub weather: bool,
    pub tasks: bool,
    pub astronomical: bool,
}

impl SourceStatus {
    pub fn all_available(&self) -> bool {
        self.vegetation && self.soil && self.weather && self.tasks && self.astronomical
    }

    pub fn any_available(&self) -> bool {
        self.vegetation || self.soil || self.weather || self.tasks || self.astronomical
    }

    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.vegetation {
            missing.push("vegetation");
        }
        if !self.soil {
            missing.push("soil");
        }
        if !self.weather {
            missing.push("weather");
        }
        if !self.tasks {
            missing.push("tasks");
        }
        if !self.astronomical {
            missing.push("astronomical");
        }
        missing
    }
}
