pub mod chart;
pub mod content_table;
pub mod filters;
pub mod server_chart;
pub mod view;
pub mod visualizations;

pub use view::Dashboard;
