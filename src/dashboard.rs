//! Dashboard widget resolution and display catalog
//!
//! Maps parsed [`Group`]s and [`Dataset`]s onto the closed set of dashboard
//! widget types, and provides the static display metadata (icons, titles,
//! identifier strings, colors) the rendering layer looks up.
//!
//! # Resolution rules
//!
//! A group resolves to at most one widget, selected by its identifier
//! string. A dataset resolves to a *list*: one dashboard widget per option
//! bit set on it, in a fixed enumeration order so the dashboard layout is
//! deterministic across runs. Option flags take precedence over the
//! dataset's explicit widget identifier; the identifier drives only the
//! legacy single-widget path used for serialization round-trips.
//!
//! # Catalog tables
//!
//! All lookups are total: every widget value has an icon and a title, and
//! an unrecognized identifier string maps to the "no widget" sentinel
//! rather than failing, since project files may reference widgets from
//! newer or older schema versions. The tables are plain `match` arms over
//! closed enums, read-only for the life of the process and safe to consult
//! from any thread.

use serde::{Deserialize, Serialize};

use crate::model::{Dataset, Group};
use crate::types::DatasetOptions;

/// Widget types available for groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GroupWidget {
    /// Tabular view of every dataset in the group
    DataGrid,
    /// 3-axis accelerometer indicator
    Accelerometer,
    /// 3-axis gyroscope indicator
    Gyroscope,
    /// Map view fed by latitude/longitude datasets
    Gps,
    /// Several curves over one shared time base
    MultiPlot,
    /// No group-level widget applicable
    #[default]
    NoGroupWidget,
}

/// Widget types available for datasets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DatasetWidget {
    /// Vertical bar level
    Bar,
    /// Radial gauge
    Gauge,
    /// Compass heading
    Compass,
    /// No dataset-level widget applicable
    #[default]
    NoDatasetWidget,
}

/// Widget types available for the dashboard
///
/// The final, concrete widget assigned for rendering. Values with a group
/// counterpart classify as group-level, values with a dataset counterpart
/// or option bit classify as dataset-level, and [`DashboardWidget::NoWidget`]
/// classifies as neither and is never rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DashboardWidget {
    DataGrid,
    MultiPlot,
    Accelerometer,
    Gyroscope,
    Gps,
    Fft,
    Led,
    Plot,
    Bar,
    Gauge,
    Compass,
    #[default]
    NoWidget,
}

impl DashboardWidget {
    /// All dashboard widget values, in enumeration order
    pub fn all() -> &'static [DashboardWidget] {
        &[
            DashboardWidget::DataGrid,
            DashboardWidget::MultiPlot,
            DashboardWidget::Accelerometer,
            DashboardWidget::Gyroscope,
            DashboardWidget::Gps,
            DashboardWidget::Fft,
            DashboardWidget::Led,
            DashboardWidget::Plot,
            DashboardWidget::Bar,
            DashboardWidget::Gauge,
            DashboardWidget::Compass,
            DashboardWidget::NoWidget,
        ]
    }
}

/// Whether a dashboard widget belongs to the group-level family
pub fn is_group_widget(widget: DashboardWidget) -> bool {
    matches!(
        widget,
        DashboardWidget::DataGrid
            | DashboardWidget::MultiPlot
            | DashboardWidget::Accelerometer
            | DashboardWidget::Gyroscope
            | DashboardWidget::Gps
    )
}

/// Whether a dashboard widget belongs to the dataset-level family
pub fn is_dataset_widget(widget: DashboardWidget) -> bool {
    matches!(
        widget,
        DashboardWidget::Fft
            | DashboardWidget::Led
            | DashboardWidget::Plot
            | DashboardWidget::Bar
            | DashboardWidget::Gauge
            | DashboardWidget::Compass
    )
}

/// Icon identifier for a dashboard widget
pub fn dashboard_widget_icon(widget: DashboardWidget) -> &'static str {
    match widget {
        DashboardWidget::DataGrid => "table",
        DashboardWidget::MultiPlot => "multiplot",
        DashboardWidget::Accelerometer => "accelerometer",
        DashboardWidget::Gyroscope => "gyroscope",
        DashboardWidget::Gps => "map-marker",
        DashboardWidget::Fft => "spectrum",
        DashboardWidget::Led => "led",
        DashboardWidget::Plot => "plot",
        DashboardWidget::Bar => "bar-chart",
        DashboardWidget::Gauge => "gauge",
        DashboardWidget::Compass => "compass",
        DashboardWidget::NoWidget => "",
    }
}

/// Human-readable title for a dashboard widget
pub fn dashboard_widget_title(widget: DashboardWidget) -> &'static str {
    match widget {
        DashboardWidget::DataGrid => "Data Grid",
        DashboardWidget::MultiPlot => "Multiple Plots",
        DashboardWidget::Accelerometer => "Accelerometer",
        DashboardWidget::Gyroscope => "Gyroscope",
        DashboardWidget::Gps => "GPS Map",
        DashboardWidget::Fft => "FFT Plot",
        DashboardWidget::Led => "LED Panel",
        DashboardWidget::Plot => "Plot",
        DashboardWidget::Bar => "Bar",
        DashboardWidget::Gauge => "Gauge",
        DashboardWidget::Compass => "Compass",
        DashboardWidget::NoWidget => "None",
    }
}

/// Stable identifier string for a group widget, used in project files
pub fn group_widget_id(widget: GroupWidget) -> &'static str {
    match widget {
        GroupWidget::DataGrid => "datagrid",
        GroupWidget::Accelerometer => "accelerometer",
        GroupWidget::Gyroscope => "gyro",
        GroupWidget::Gps => "gps",
        GroupWidget::MultiPlot => "multiplot",
        GroupWidget::NoGroupWidget => "",
    }
}

/// Parse a group widget identifier; unknown strings map to the sentinel
pub fn group_widget_from_id(id: &str) -> GroupWidget {
    match id {
        "datagrid" => GroupWidget::DataGrid,
        "accelerometer" => GroupWidget::Accelerometer,
        "gyro" => GroupWidget::Gyroscope,
        "gps" => GroupWidget::Gps,
        "multiplot" => GroupWidget::MultiPlot,
        _ => GroupWidget::NoGroupWidget,
    }
}

/// Stable identifier string for a dataset widget, used in project files
pub fn dataset_widget_id(widget: DatasetWidget) -> &'static str {
    match widget {
        DatasetWidget::Bar => "bar",
        DatasetWidget::Gauge => "gauge",
        DatasetWidget::Compass => "compass",
        DatasetWidget::NoDatasetWidget => "",
    }
}

/// Parse a dataset widget identifier; unknown strings map to the sentinel
pub fn dataset_widget_from_id(id: &str) -> DatasetWidget {
    match id {
        "bar" => DatasetWidget::Bar,
        "gauge" => DatasetWidget::Gauge,
        "compass" => DatasetWidget::Compass,
        _ => DatasetWidget::NoDatasetWidget,
    }
}

/// Resolve the widget a group requests via its identifier string
pub fn resolve_group_widget(group: &Group) -> GroupWidget {
    group_widget_from_id(&group.widget_id)
}

/// Resolve the legacy single widget a dataset requests via its identifier
///
/// Option flags take precedence for dashboard composition; this path exists
/// for projects that declare a single widget by identifier string.
pub fn resolve_dataset_widget(dataset: &Dataset) -> DatasetWidget {
    dataset_widget_from_id(&dataset.widget_id)
}

/// The dashboard widget a group maps to, or the sentinel
pub fn get_dashboard_widget(group: &Group) -> DashboardWidget {
    match resolve_group_widget(group) {
        GroupWidget::DataGrid => DashboardWidget::DataGrid,
        GroupWidget::Accelerometer => DashboardWidget::Accelerometer,
        GroupWidget::Gyroscope => DashboardWidget::Gyroscope,
        GroupWidget::Gps => DashboardWidget::Gps,
        GroupWidget::MultiPlot => DashboardWidget::MultiPlot,
        GroupWidget::NoGroupWidget => DashboardWidget::NoWidget,
    }
}

/// The dashboard widgets a dataset maps to, one per option bit
///
/// The result follows a fixed enumeration order (Plot, FFT, Bar, Gauge,
/// Compass, LED) regardless of how the flags were combined, so dashboard
/// layout is deterministic for identical input. A dataset with no option
/// bits yields an empty list.
pub fn get_dashboard_widgets(dataset: &Dataset) -> Vec<DashboardWidget> {
    const ORDERED: [(DatasetOptions, DashboardWidget); 6] = [
        (DatasetOptions::PLOT, DashboardWidget::Plot),
        (DatasetOptions::FFT, DashboardWidget::Fft),
        (DatasetOptions::BAR, DashboardWidget::Bar),
        (DatasetOptions::GAUGE, DashboardWidget::Gauge),
        (DatasetOptions::COMPASS, DashboardWidget::Compass),
        (DatasetOptions::LED, DashboardWidget::Led),
    ];

    ORDERED
        .iter()
        .filter(|(option, _)| dataset.options.contains(*option))
        .map(|&(_, widget)| widget)
        .collect()
}

/// Fixed color palette for dataset curves
///
/// Colors are visually distinct up to the palette size; indexes beyond it
/// wrap around.
const DATASET_PALETTE: [&str; 10] = [
    "#007aff", // blue
    "#ff9500", // orange
    "#34c759", // green
    "#ff3b30", // red
    "#af52de", // purple
    "#5ac8fa", // teal
    "#ffcc00", // yellow
    "#ff2d55", // pink
    "#a2845e", // brown
    "#8e8e93", // gray
];

/// Display color for the dataset at `index`, wrapping past the palette size
pub fn dataset_color(index: usize) -> &'static str {
    DATASET_PALETTE[index % DATASET_PALETTE.len()]
}

/// Number of distinct colors before [`dataset_color`] wraps
pub fn dataset_palette_size() -> usize {
    DATASET_PALETTE.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_widget_id_round_trip() {
        for &widget in &[
            GroupWidget::DataGrid,
            GroupWidget::Accelerometer,
            GroupWidget::Gyroscope,
            GroupWidget::Gps,
            GroupWidget::MultiPlot,
            GroupWidget::NoGroupWidget,
        ] {
            assert_eq!(group_widget_from_id(group_widget_id(widget)), widget);
        }
    }

    #[test]
    fn test_dataset_widget_id_round_trip() {
        for &widget in &[
            DatasetWidget::Bar,
            DatasetWidget::Gauge,
            DatasetWidget::Compass,
            DatasetWidget::NoDatasetWidget,
        ] {
            assert_eq!(dataset_widget_from_id(dataset_widget_id(widget)), widget);
        }
    }

    #[test]
    fn test_unknown_ids_map_to_sentinels() {
        assert_eq!(group_widget_from_id("unknown-xyz"), GroupWidget::NoGroupWidget);
        assert_eq!(
            dataset_widget_from_id("unknown-xyz"),
            DatasetWidget::NoDatasetWidget
        );
    }

    #[test]
    fn test_group_resolution() {
        let group = Group::new("IMU").with_widget_id("gyro");
        assert_eq!(resolve_group_widget(&group), GroupWidget::Gyroscope);
        assert_eq!(get_dashboard_widget(&group), DashboardWidget::Gyroscope);

        let plain = Group::new("Telemetry");
        assert_eq!(get_dashboard_widget(&plain), DashboardWidget::NoWidget);
    }

    #[test]
    fn test_dataset_widgets_fixed_order() {
        // Flag combination order must not affect the result order
        let dataset = Dataset::new("ch0", 0)
            .with_options(DatasetOptions::FFT | DatasetOptions::PLOT);
        assert_eq!(
            get_dashboard_widgets(&dataset),
            vec![DashboardWidget::Plot, DashboardWidget::Fft]
        );

        let reversed = Dataset::new("ch0", 0)
            .with_options(DatasetOptions::PLOT | DatasetOptions::FFT);
        assert_eq!(get_dashboard_widgets(&dataset), get_dashboard_widgets(&reversed));
    }

    #[test]
    fn test_dataset_widgets_all_bits() {
        let dataset = Dataset::new("ch0", 0).with_options(DatasetOptions::ALL);
        assert_eq!(
            get_dashboard_widgets(&dataset),
            vec![
                DashboardWidget::Plot,
                DashboardWidget::Fft,
                DashboardWidget::Bar,
                DashboardWidget::Gauge,
                DashboardWidget::Compass,
                DashboardWidget::Led,
            ]
        );
    }

    #[test]
    fn test_generic_dataset_yields_no_widgets() {
        let dataset = Dataset::new("ch0", 0);
        assert!(get_dashboard_widgets(&dataset).is_empty());
        assert_eq!(resolve_dataset_widget(&dataset), DatasetWidget::NoDatasetWidget);
    }

    #[test]
    fn test_widget_families_are_disjoint_and_total() {
        for &widget in DashboardWidget::all() {
            let group = is_group_widget(widget);
            let dataset = is_dataset_widget(widget);
            assert!(
                !(group && dataset),
                "{widget:?} classifies as both group- and dataset-level"
            );
            if widget == DashboardWidget::NoWidget {
                assert!(!group && !dataset);
            } else {
                assert!(group || dataset, "{widget:?} classifies as neither family");
            }
        }
    }

    #[test]
    fn test_catalog_lookups_are_total() {
        for &widget in DashboardWidget::all() {
            // Every value has a title; every renderable value has an icon
            assert!(!dashboard_widget_title(widget).is_empty());
            if widget != DashboardWidget::NoWidget {
                assert!(!dashboard_widget_icon(widget).is_empty());
            }
        }
    }

    #[test]
    fn test_dataset_color_wraps() {
        for i in 0..32 {
            assert_eq!(dataset_color(i), dataset_color(i + dataset_palette_size()));
        }
        // Distinct up to the palette size
        for i in 0..dataset_palette_size() {
            for j in (i + 1)..dataset_palette_size() {
                assert_ne!(dataset_color(i), dataset_color(j));
            }
        }
    }
}
