//! Group and dataset data model
//!
//! These types are the parsed product of a project schema: a [`Group`] is a
//! named collection of [`Dataset`]s, and each dataset is a single data
//! channel within its group. The schema parser that builds them from device
//! text lives outside this crate; the widget resolver in
//! [`crate::dashboard`] consumes them.
//!
//! Widget requests are carried two ways, and both survive serialization:
//!
//! - an explicit widget identifier string (`widget_id`), matched against
//!   the catalog tables; unknown identifiers degrade to the "no widget"
//!   sentinels instead of failing a project load
//! - [`DatasetOptions`] bit-flags, which may request several dataset-level
//!   widgets at once

use serde::{Deserialize, Serialize};

use crate::types::DatasetOptions;

/// A single named data channel within a group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    /// Human-readable name
    pub title: String,
    /// Unit label for display (e.g. "V", "m/s", "°C")
    pub units: String,
    /// Explicit dataset widget identifier ("" = none requested)
    pub widget_id: String,
    /// Rendering intents declared on this dataset
    pub options: DatasetOptions,
    /// Position of this dataset's value within a decoded frame
    pub frame_index: usize,
    /// Lower display bound for bar/gauge widgets
    pub min: Option<f64>,
    /// Upper display bound for bar/gauge widgets
    pub max: Option<f64>,
    /// Alarm threshold
    pub alarm: Option<f64>,
    /// Number of samples fed to the FFT when the FFT option is set
    #[serde(default = "default_fft_samples")]
    pub fft_samples: usize,
}

fn default_fft_samples() -> usize {
    1024
}

impl Default for Dataset {
    fn default() -> Self {
        Self {
            title: String::from("Untitled"),
            units: String::new(),
            widget_id: String::new(),
            options: DatasetOptions::GENERIC,
            frame_index: 0,
            min: None,
            max: None,
            alarm: None,
            fft_samples: default_fft_samples(),
        }
    }
}

impl Dataset {
    /// Create a new dataset reading the given frame field
    pub fn new(title: impl Into<String>, frame_index: usize) -> Self {
        Self {
            title: title.into(),
            frame_index,
            ..Default::default()
        }
    }

    /// Set the unit label
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = units.into();
        self
    }

    /// Set the explicit widget identifier
    pub fn with_widget_id(mut self, id: impl Into<String>) -> Self {
        self.widget_id = id.into();
        self
    }

    /// Set the rendering options
    pub fn with_options(mut self, options: DatasetOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the display range
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    /// Set the alarm threshold
    pub fn with_alarm(mut self, alarm: f64) -> Self {
        self.alarm = Some(alarm);
        self
    }
}

/// A named collection of related datasets
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Group {
    /// Human-readable name
    pub title: String,
    /// Explicit group widget identifier ("" = none requested)
    pub widget_id: String,
    /// The datasets in this group, in declaration order
    pub datasets: Vec<Dataset>,
}

impl Group {
    /// Create a new empty group
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Set the explicit widget identifier
    pub fn with_widget_id(mut self, id: impl Into<String>) -> Self {
        self.widget_id = id.into();
        self
    }

    /// Append a dataset
    pub fn with_dataset(mut self, dataset: Dataset) -> Self {
        self.datasets.push(dataset);
        self
    }

    /// Number of datasets in this group
    pub fn dataset_count(&self) -> usize {
        self.datasets.len()
    }
}
