//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod auth;
pub mod chart;
pub mod health;
pub mod loading;
pub mod nav;
pub mod stat_card;
pub mod toast;
pub mod upload;

pub use auth::AuthPanel;
pub use chart::{DoughnutChart, LineChart};
pub use health::HealthPanel;
pub use loading::{CardSkeleton, ListSkeleton, Loading};
pub use nav::Nav;
pub use stat_card::StatCard;
pub use toast::Toast;
pub use upload::UploadPanel;
