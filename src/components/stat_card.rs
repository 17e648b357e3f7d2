//! Stat Card Component
//!
//! Displays a single dashboard statistic.

use leptos::*;

/// Stat card with a label, a headline value and an optional hint line
#[component]
pub fn StatCard(
    /// Short label above the value
    #[prop(into)]
    label: String,
    /// Headline value, already formatted
    #[prop(into)]
    value: String,
    /// Optional secondary line under the value
    #[prop(optional)]
    hint: Option<String>,
) -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-lg p-4 border border-gray-700 hover:border-gray-600 transition-colors">
            <span class="text-gray-400 text-sm">{label}</span>
            <div class="text-3xl font-bold mt-2">{value}</div>
            {hint.map(|h| view! {
                <div class="text-sm text-gray-500 mt-2">{h}</div>
            })}
        </div>
    }
}
