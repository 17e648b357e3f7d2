//! System Health Component
//!
//! Renders the backend health payload: an overall badge plus one line per
//! dependent service.

use leptos::*;

use crate::state::global::HealthSnapshot;

/// Overall status is binary: `healthy` or not
pub fn overall_ok(status: &str) -> bool {
    status == "healthy"
}

/// A service counts as up when it reports `connected` or `available`
pub fn service_ok(status: &str) -> bool {
    matches!(status, "connected" | "available")
}

/// Health panel fed by the dashboard's health fetch slot
#[component]
pub fn HealthPanel(
    #[prop(into)]
    health: Signal<Option<Result<HealthSnapshot, String>>>,
) -> impl IntoView {
    view! {
        {move || match health.get() {
            None => view! {
                <div class="flex items-center space-x-2 text-gray-400">
                    <div class="loading-spinner w-4 h-4" />
                    <span class="text-sm">"Checking..."</span>
                </div>
            }.into_view(),
            Some(Err(_)) => view! {
                <p class="text-gray-400 text-sm">"Health check failed"</p>
            }.into_view(),
            Some(Ok(snapshot)) => {
                let (badge_class, badge_label) = if overall_ok(&snapshot.status) {
                    ("bg-green-600", "Healthy")
                } else {
                    ("bg-red-600", "Unhealthy")
                };

                let mut services: Vec<_> = snapshot.services.into_iter().collect();
                services.sort();

                view! {
                    <div class="space-y-3">
                        <span class=format!(
                            "inline-block {} text-white text-xs font-medium px-2 py-1 rounded-full",
                            badge_class
                        )>
                            {badge_label}
                        </span>

                        <div class="space-y-1">
                            {services.into_iter().map(|(name, status)| {
                                let status_class = if service_ok(&status) {
                                    "text-green-400"
                                } else {
                                    "text-red-400"
                                };
                                view! {
                                    <div class="flex items-center justify-between text-sm">
                                        <span class="text-gray-300 capitalize">{name.replace('_', " ")}</span>
                                        <span class=status_class>{status}</span>
                                    </div>
                                }
                            }).collect_view()}
                        </div>
                    </div>
                }.into_view()
            }
        }}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overall_status_is_binary() {
        assert!(overall_ok("healthy"));
        assert!(!overall_ok("unhealthy"));
        assert!(!overall_ok("degraded"));
        assert!(!overall_ok(""));
    }

    #[test]
    fn test_service_status_classification() {
        let snapshot: HealthSnapshot = serde_json::from_str(
            r#"{"status": "healthy", "services": {"ocr": "available", "db": "down"}}"#,
        )
        .unwrap();

        assert!(overall_ok(&snapshot.status));
        assert!(service_ok(&snapshot.services["ocr"]));
        assert!(!service_ok(&snapshot.services["db"]));
    }

    #[test]
    fn test_connected_counts_as_up() {
        assert!(service_ok("connected"));
        assert!(!service_ok("connecting"));
        assert!(!service_ok("unavailable"));
    }
}
