use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeatherSource {
    FarmApi,
    OpenWeatherMap,
    Demo,
}

impl WeatherSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherSource::FarmApi => "Farm API",
            WeatherSource::OpenWeatherMap => "OpenWeatherMap",
            WeatherSource::Demo => "Demo",
        }
    }
}

impl std::fmt::Display for WeatherSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Current weather at the field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherConditions {
    pub temperature_c: f64,
    pub humidity_percent: f64,
    pub source: WeatherSource,
    pub observed_at: Option<DateTime<Utc>>,
}

impl WeatherConditions {
    pub fn new(temperature_c: f64, humidity_percent: f64, source: WeatherSource) -> Self {
        Self {
            temperature_c,
            humidity_percent,
            source,
            observed_at: None,
        }
    }
}

/// One soil-moisture sensor sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilSensorReading {
    pub sensor_id: String,
    pub moisture_percent: f64,
    pub recorded_at: Option<DateTime<Utc>>,
}

/// Soil and weather telemetry for a field. Either half may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentReading {
    /// Average of all soil-moisture sensors on the field
    pub soil_moisture_percent: Option<f64>,
    pub weather: Option<WeatherConditions>,
}

impl EnvironmentReading {
    pub fn from_parts(sensors: &[SoilSensorReading], weather: Option<WeatherConditions>) -> Self {
        Self {
            soil_moisture_percent: average_soil_moisture(sensors),
            weather,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.soil_moisture_percent.is_none() && self.weather.is_none()
    }

    /// Hot and dry enough that crops draw water faster than usual
    pub fn heat_stress(&self, temp_above_c: f64, humidity_below: f64) -> bool {
        self.weather
            .as_ref()
            .is_some_and(|w| w.temperature_c > temp_above_c && w.humidity_percent < humidity_below)
    }
}

/// Mean moisture across sensors, ignoring samples outside 0..=100
pub fn average_soil_moisture(sensors: &[SoilSensorReading]) -> Option<f64> {
    let values: Vec<f64> = sensors
        .iter()
        .map(|s| s.moisture_percent)
        .filter(|m| m.is_finite() && (0.0..=100.0).contains(m))
        .collect();

    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
