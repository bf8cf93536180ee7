pub mod bar_chart;
pub mod task_row;
