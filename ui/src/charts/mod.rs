//! Chart descriptor renderer.
//!
//! Descriptors arrive as JSON from the analysis service; [`render_charts`]
//! resolves each one into positioned marks and [`ChartList`] draws them.

pub mod descriptor;
pub mod palette;
pub mod render;
pub mod scale;
pub mod scene;
pub mod view;

pub use descriptor::{ChartDescriptor, ChartKind};
pub use render::{render_chart, render_charts, ChartVisual, PiePanel, RenderedChart, TableVisual};
pub use scene::{Mark, Scene};
pub use view::{ChartCard, ChartList};
