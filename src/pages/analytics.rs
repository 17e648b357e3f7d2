//! Analytics Page
//!
//! Score analytics. Students get their own performance view with trend and
//! per-subject charts; teachers get class-wide aggregates.

use leptos::*;

use crate::api;
use crate::components::chart::{subject_series, trend_series};
use crate::components::{DoughnutChart, LineChart, Loading, StatCard};
use crate::state::global::{AppState, ClassAnalytics, StudentAnalytics};

/// Analytics page component
#[component]
pub fn Analytics() -> impl IntoView {
    let state = use_context::<AppState>().expect("AppState not found");

    let state_for_view = state;

    view! {
        <div class="space-y-8">
            // Header
            <div>
                <h1 class="text-3xl font-bold">"Analytics"</h1>
                <p class="text-gray-400 mt-1">"Score trends and breakdowns"</p>
            </div>

            {move || match state_for_view.current_user() {
                Some(user) if user.is_student() => view! {
                    <StudentView student_id=user.id />
                }.into_view(),
                Some(_) => view! { <ClassView /> }.into_view(),
                None => ().into_view(),
            }}
        </div>
    }
}

/// Per-student analytics: stat tiles plus trend and subject charts
#[component]
fn StudentView(student_id: String) -> impl IntoView {
    let state = use_context::<AppState>().expect("AppState not found");

    let (analytics, set_analytics) = create_signal(None::<Result<StudentAnalytics, String>>);

    let state_for_effect = state;
    create_effect(move |_| {
        let token = match state_for_effect.token() {
            Some(token) => token,
            None => return,
        };
        let student_id = student_id.clone();

        spawn_local(async move {
            let result = api::fetch_student_analytics(&token, &student_id).await;
            if let Err(e) = &result {
                web_sys::console::error_1(
                    &format!("Failed to fetch student analytics: {}", e).into(),
                );
            }
            set_analytics.set(Some(result));
        });
    });

    view! {
        {move || match analytics.get() {
            None => view! { <Loading /> }.into_view(),
            Some(Err(_)) => view! {
                <p class="text-gray-400">"Analytics are unavailable right now"</p>
            }.into_view(),
            Some(Ok(analytics)) => view! {
                <div class="space-y-8">
                    // Stat tiles
                    <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                        <StatCard
                            label="Evaluations"
                            value=analytics.total_evaluations.to_string()
                        />
                        <StatCard
                            label="Average Score"
                            value=format!("{:.1}", analytics.average_score)
                        />
                        <StatCard
                            label="Highest Score"
                            value=format!("{:.1}", analytics.highest_score)
                        />
                        <StatCard
                            label="Plagiarism Incidents"
                            value=analytics.plagiarism_incidents.to_string()
                        />
                    </div>

                    // Charts
                    <div class="grid md:grid-cols-2 gap-8">
                        <section class="bg-gray-800 rounded-xl p-6">
                            <h2 class="text-xl font-semibold mb-4">"Score Trend"</h2>
                            <LineChart series=trend_series(&analytics.recent_trend) />
                        </section>

                        <section class="bg-gray-800 rounded-xl p-6">
                            <h2 class="text-xl font-semibold mb-4">"Subject Averages"</h2>
                            <DoughnutChart series=subject_series(&analytics.performance_by_subject) />
                        </section>
                    </div>
                </div>
            }.into_view(),
        }}
    }
}

/// Class-wide analytics for teachers
#[component]
fn ClassView() -> impl IntoView {
    let state = use_context::<AppState>().expect("AppState not found");

    let (analytics, set_analytics) = create_signal(None::<Result<ClassAnalytics, String>>);

    let state_for_effect = state;
    create_effect(move |_| {
        let token = match state_for_effect.token() {
            Some(token) => token,
            None => return,
        };

        spawn_local(async move {
            let result = api::fetch_class_analytics(&token).await;
            if let Err(e) = &result {
                web_sys::console::error_1(
                    &format!("Failed to fetch class analytics: {}", e).into(),
                );
            }
            set_analytics.set(Some(result));
        });
    });

    view! {
        {move || match analytics.get() {
            None => view! { <Loading /> }.into_view(),
            Some(Err(_)) => view! {
                <p class="text-gray-400">"Analytics are unavailable right now"</p>
            }.into_view(),
            Some(Ok(analytics)) => view! {
                <div class="grid grid-cols-2 md:grid-cols-5 gap-4">
                    <StatCard
                        label="Evaluations"
                        value=analytics.total_evaluations.to_string()
                    />
                    <StatCard
                        label="Average Score"
                        value=format!("{:.1}", analytics.average_score)
                    />
                    <StatCard
                        label="Highest Score"
                        value=format!("{:.1}", analytics.max_score)
                    />
                    <StatCard
                        label="Lowest Score"
                        value=format!("{:.1}", analytics.min_score)
                    />
                    <StatCard
                        label="Average Percentage"
                        value=format!("{:.1}%", analytics.average_percentage)
                    />
                </div>
            }.into_view(),
        }}
    }
}
