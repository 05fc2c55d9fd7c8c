//! KPI queries exposed as assistant tools

pub mod kpi;

pub use kpi::{KpiQuery, KpiTool, register_kpi_tools};
