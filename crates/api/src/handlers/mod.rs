pub mod dashboard_layout;
