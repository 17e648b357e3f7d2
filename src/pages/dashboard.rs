//! Dashboard Page
//!
//! Landing view: aggregate stats, answer-sheet upload, recent activity and
//! backend health. The three stat fetches run concurrently and each panel
//! degrades on its own if its fetch fails.

use futures_util::future::join3;
use leptos::*;

use crate::api;
use crate::components::upload::format_file_size;
use crate::components::{CardSkeleton, HealthPanel, StatCard, UploadPanel};
use crate::state::global::{
    average_percentage, format_date, score_band, truncate_text, AppState, Evaluation,
    HealthSnapshot, Submission,
};

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_context::<AppState>().expect("AppState not found");

    let (submissions, set_submissions) = create_signal(None::<Result<Vec<Submission>, String>>);
    let (evaluations, set_evaluations) = create_signal(None::<Result<Vec<Evaluation>, String>>);
    let (rubric_count, set_rubric_count) = create_signal(None::<Result<usize, String>>);
    let (recent, set_recent) = create_signal(None::<Result<Vec<Evaluation>, String>>);
    let (health, set_health) = create_signal(None::<Result<HealthSnapshot, String>>);

    // Bumped after a successful upload to refresh the page's data
    let (reload, set_reload) = create_signal(0_u32);

    let state_for_effect = state.clone();
    create_effect(move |_| {
        let _ = reload.get();

        let token = match state_for_effect.token() {
            Some(token) => token,
            None => return,
        };

        set_submissions.set(None);
        set_evaluations.set(None);
        set_rubric_count.set(None);
        set_recent.set(None);
        set_health.set(None);

        // Stats: three independent fetches, fired together and joined. Each
        // slot carries its own Result, so one failure leaves the others
        // intact.
        let stats_token = token.clone();
        spawn_local(async move {
            let (subs, evals, rubrics) = join3(
                api::fetch_submissions(&stats_token),
                api::fetch_evaluations(&stats_token, None),
                api::fetch_rubrics(&stats_token),
            )
            .await;

            if let Err(e) = &subs {
                web_sys::console::error_1(&format!("Failed to fetch submissions: {}", e).into());
            }
            if let Err(e) = &evals {
                web_sys::console::error_1(&format!("Failed to fetch evaluations: {}", e).into());
            }
            if let Err(e) = &rubrics {
                web_sys::console::error_1(&format!("Failed to fetch rubrics: {}", e).into());
            }

            set_submissions.set(Some(subs));
            set_evaluations.set(Some(evals));
            set_rubric_count.set(Some(rubrics.map(|r| r.len())));
        });

        // Activity feed: ten most recent evaluations
        let recent_token = token.clone();
        spawn_local(async move {
            set_recent.set(Some(api::fetch_evaluations(&recent_token, Some(10)).await));
        });

        // Backend health
        spawn_local(async move {
            set_health.set(Some(api::fetch_health().await));
        });
    });

    view! {
        <div class="space-y-8">
            // Page header
            <div>
                <h1 class="text-3xl font-bold">"Dashboard"</h1>
                <p class="text-gray-400 mt-1">"Grading activity at a glance"</p>
            </div>

            // Stats row
            <section class="grid grid-cols-2 md:grid-cols-4 gap-4">
                {move || match submissions.get() {
                    None => view! { <CardSkeleton /> }.into_view(),
                    Some(Ok(list)) => view! {
                        <StatCard label="Submissions" value=list.len().to_string() />
                    }.into_view(),
                    Some(Err(_)) => view! {
                        <StatCard label="Submissions" value="—" hint="unavailable".to_string() />
                    }.into_view(),
                }}
                {move || match evaluations.get() {
                    None => view! { <CardSkeleton /> }.into_view(),
                    Some(Ok(list)) => view! {
                        <StatCard label="Evaluations" value=list.len().to_string() />
                    }.into_view(),
                    Some(Err(_)) => view! {
                        <StatCard label="Evaluations" value="—" hint="unavailable".to_string() />
                    }.into_view(),
                }}
                {move || match evaluations.get() {
                    None => view! { <CardSkeleton /> }.into_view(),
                    Some(Ok(list)) => {
                        let value = average_percentage(&list)
                            .map(|avg| format!("{:.1}%", avg))
                            .unwrap_or_else(|| "N/A".to_string());
                        view! { <StatCard label="Average Score" value=value /> }.into_view()
                    }
                    Some(Err(_)) => view! {
                        <StatCard label="Average Score" value="—" hint="unavailable".to_string() />
                    }.into_view(),
                }}
                {move || match rubric_count.get() {
                    None => view! { <CardSkeleton /> }.into_view(),
                    Some(Ok(count)) => view! {
                        <StatCard label="Rubrics" value=count.to_string() />
                    }.into_view(),
                    Some(Err(_)) => view! {
                        <StatCard label="Rubrics" value="—" hint="unavailable".to_string() />
                    }.into_view(),
                }}
            </section>

            // Upload and submissions
            <div class="grid md:grid-cols-2 gap-8">
                <section class="bg-gray-800 rounded-xl p-6">
                    <h2 class="text-xl font-semibold mb-4">"Upload Answer Sheet"</h2>
                    <UploadPanel on_uploaded=move || set_reload.update(|v| *v += 1) />
                </section>

                <section class="bg-gray-800 rounded-xl p-6">
                    <h2 class="text-xl font-semibold mb-4">"Recent Submissions"</h2>
                    <SubmissionList submissions=submissions />
                </section>
            </div>

            // Activity feed and health
            <div class="grid md:grid-cols-2 gap-8">
                <section class="bg-gray-800 rounded-xl p-6">
                    <h2 class="text-xl font-semibold mb-4">"Recent Evaluations"</h2>
                    <ActivityFeed recent=recent />
                </section>

                <section class="bg-gray-800 rounded-xl p-6">
                    <h2 class="text-xl font-semibold mb-4">"System Health"</h2>
                    <HealthPanel health=health />
                </section>
            </div>
        </div>
    }
}

/// Latest submissions, newest first
#[component]
fn SubmissionList(submissions: ReadSignal<Option<Result<Vec<Submission>, String>>>) -> impl IntoView {
    view! {
        <div class="space-y-2">
            {move || match submissions.get() {
                None => view! {
                    <p class="text-gray-400 text-sm">"Loading..."</p>
                }.into_view(),
                Some(Err(_)) => view! {
                    <p class="text-gray-400 text-sm">"Could not load submissions"</p>
                }.into_view(),
                Some(Ok(list)) if list.is_empty() => view! {
                    <p class="text-gray-400 text-sm">"No submissions yet"</p>
                }.into_view(),
                Some(Ok(list)) => {
                    list.into_iter().take(5).map(|submission| {
                        let date = submission.created_at
                            .as_deref()
                            .map(format_date)
                            .unwrap_or_default();
                        view! {
                            <div class="flex items-center justify-between py-2 border-b border-gray-700 last:border-0">
                                <div class="min-w-0">
                                    <span class="block truncate">{submission.original_filename}</span>
                                    <span class="text-gray-400 text-sm">{date}</span>
                                </div>
                                <span class="text-gray-400 text-sm ml-3 whitespace-nowrap">
                                    {format_file_size(submission.file_size)}
                                </span>
                            </div>
                        }
                    }).collect_view()
                }
            }}
        </div>
    }
}

/// Ten most recent evaluations with their score band
#[component]
fn ActivityFeed(recent: ReadSignal<Option<Result<Vec<Evaluation>, String>>>) -> impl IntoView {
    view! {
        <div class="space-y-2">
            {move || match recent.get() {
                None => view! {
                    <p class="text-gray-400 text-sm">"Loading..."</p>
                }.into_view(),
                Some(Err(_)) => view! {
                    <p class="text-gray-400 text-sm">"Could not load recent evaluations"</p>
                }.into_view(),
                Some(Ok(list)) if list.is_empty() => view! {
                    <p class="text-gray-400 text-sm">"No evaluations yet"</p>
                }.into_view(),
                Some(Ok(list)) => {
                    list.into_iter().map(|evaluation| {
                        let band = score_band(evaluation.percentage);
                        let question = if evaluation.question.is_empty() {
                            "Untitled question".to_string()
                        } else {
                            truncate_text(&evaluation.question, 48)
                        };
                        let date = evaluation.created_at
                            .as_deref()
                            .map(format_date)
                            .unwrap_or_default();
                        view! {
                            <div class="flex items-center justify-between py-2 border-b border-gray-700 last:border-0">
                                <div class="min-w-0">
                                    <span class="block truncate">{question}</span>
                                    <span class="text-gray-400 text-sm">{date}</span>
                                </div>
                                <span class=format!("font-semibold ml-3 {}", band.text_class())>
                                    {format!("{:.1}%", evaluation.percentage)}
                                </span>
                            </div>
                        }
                    }).collect_view()
                }
            }}
        </div>
    }
}
