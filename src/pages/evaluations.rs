//! Evaluations Page
//!
//! Table of graded submissions: scores with color bands, plagiarism verdicts
//! and review flags.

use leptos::*;

use crate::api;
use crate::components::ListSkeleton;
use crate::state::global::{
    format_date, score_band, truncate_text, AppState, Evaluation,
};

/// Evaluations page component
#[component]
pub fn Evaluations() -> impl IntoView {
    let state = use_context::<AppState>().expect("AppState not found");

    let (evaluations, set_evaluations) = create_signal(None::<Result<Vec<Evaluation>, String>>);

    // Fetch on mount
    let state_for_effect = state.clone();
    create_effect(move |_| {
        let token = match state_for_effect.token() {
            Some(token) => token,
            None => return,
        };

        spawn_local(async move {
            let result = api::fetch_evaluations(&token, None).await;
            if let Err(e) = &result {
                web_sys::console::error_1(&format!("Failed to fetch evaluations: {}", e).into());
            }
            set_evaluations.set(Some(result));
        });
    });

    view! {
        <div class="space-y-8">
            // Header
            <div>
                <h1 class="text-3xl font-bold">"Evaluations"</h1>
                <p class="text-gray-400 mt-1">"Graded submissions, newest first"</p>
            </div>

            // Evaluation table
            <section class="bg-gray-800 rounded-xl p-6">
                {move || match evaluations.get() {
                    None => view! { <ListSkeleton count=5 /> }.into_view(),
                    Some(Err(_)) => view! {
                        <p class="text-gray-400">"Could not load evaluations"</p>
                    }.into_view(),
                    Some(Ok(list)) if list.is_empty() => view! {
                        <p class="text-gray-400">"No evaluations yet"</p>
                    }.into_view(),
                    Some(Ok(list)) => view! {
                        <div class="overflow-x-auto">
                            <table class="w-full text-left text-sm">
                                <thead>
                                    <tr class="text-gray-400 border-b border-gray-700">
                                        <th class="py-3 pr-4 font-medium">"Question"</th>
                                        <th class="py-3 pr-4 font-medium">"Score"</th>
                                        <th class="py-3 pr-4 font-medium">"Percentage"</th>
                                        <th class="py-3 pr-4 font-medium">"Plagiarism"</th>
                                        <th class="py-3 pr-4 font-medium">"Review"</th>
                                        <th class="py-3 font-medium">"Created"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {list.into_iter().map(|evaluation| {
                                        view! { <EvaluationRow evaluation=evaluation /> }
                                    }).collect_view()}
                                </tbody>
                            </table>
                        </div>
                    }.into_view(),
                }}
            </section>
        </div>
    }
}

/// Single evaluation table row
#[component]
fn EvaluationRow(evaluation: Evaluation) -> impl IntoView {
    let band = score_band(evaluation.percentage);

    let question = if evaluation.question.is_empty() {
        "Untitled question".to_string()
    } else {
        truncate_text(&evaluation.question, 60)
    };

    let plagiarism = match &evaluation.plagiarism_result {
        Some(result) if result.is_plagiarized => view! {
            <span class="bg-red-600 text-white text-xs px-2 py-0.5 rounded-full">"Flagged"</span>
        }.into_view(),
        Some(_) => view! {
            <span class="bg-green-600 text-white text-xs px-2 py-0.5 rounded-full">"Clear"</span>
        }.into_view(),
        None => view! {
            <span class="text-gray-500">"—"</span>
        }.into_view(),
    };

    let review = if evaluation.needs_review {
        view! {
            <span class="bg-yellow-600 text-white text-xs px-2 py-0.5 rounded-full">"Needs review"</span>
        }.into_view()
    } else {
        view! { <span class="text-gray-500">"—"</span> }.into_view()
    };

    let date = evaluation.created_at
        .as_deref()
        .map(format_date)
        .unwrap_or_default();

    view! {
        <tr class="border-b border-gray-700 last:border-0">
            <td class="py-3 pr-4">{question}</td>
            <td class="py-3 pr-4">
                {format!("{:.1} / {:.0}", evaluation.total_score, evaluation.max_possible_score)}
            </td>
            <td class="py-3 pr-4">
                <span class=format!(
                    "{} text-white text-xs px-2 py-0.5 rounded-full",
                    band.badge_class()
                )>
                    {format!("{:.1}%", evaluation.percentage)}
                </span>
            </td>
            <td class="py-3 pr-4">{plagiarism}</td>
            <td class="py-3 pr-4">{review}</td>
            <td class="py-3 text-gray-400">{date}</td>
        </tr>
    }
}
