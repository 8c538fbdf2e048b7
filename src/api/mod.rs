mod axis_ticks;
mod chart_instance;
mod engine;
mod engine_config;
mod engine_snapshot;
mod interaction_controller;
mod json_contract;
mod label_format;
mod lifecycle;
mod scene_builder;

pub use chart_instance::FocusMarker;
pub use engine::ChartEngine;
pub use engine_config::{ChartEngineConfig, ChartStyle};
pub use engine_snapshot::ChartSnapshot;
pub use interaction_controller::BrushOutcome;
pub use json_contract::{CHART_SNAPSHOT_JSON_SCHEMA_V1, ChartSnapshotJsonContractV1};
pub use label_format::{format_tooltip_date, format_tooltip_value};
