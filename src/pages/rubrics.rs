//! Rubrics Page
//!
//! Table of grading rubrics with a subject filter. The filter options are
//! derived from whatever list is currently loaded, so a reload rebuilds them
//! from scratch.

use leptos::*;

use crate::api;
use crate::components::ListSkeleton;
use crate::state::global::{collect_subjects, format_date, AppState, Rubric};

/// Rubrics page component
#[component]
pub fn Rubrics() -> impl IntoView {
    let state = use_context::<AppState>().expect("AppState not found");

    let (rubrics, set_rubrics) = create_signal(None::<Result<Vec<Rubric>, String>>);
    let (subject_filter, set_subject_filter) = create_signal(String::new());

    // Fetch on mount
    let state_for_effect = state.clone();
    create_effect(move |_| {
        let token = match state_for_effect.token() {
            Some(token) => token,
            None => return,
        };

        spawn_local(async move {
            let result = api::fetch_rubrics(&token).await;
            if let Err(e) = &result {
                web_sys::console::error_1(&format!("Failed to fetch rubrics: {}", e).into());
            }
            set_rubrics.set(Some(result));
        });
    });

    // Filter options, rebuilt whenever the rubric list changes
    let subjects = create_memo(move |_| match rubrics.get() {
        Some(Ok(list)) => collect_subjects(&list),
        _ => Vec::new(),
    });

    let filtered = move || {
        rubrics.get().map(|result| {
            result.map(|list| {
                let filter = subject_filter.get();
                if filter.is_empty() {
                    list
                } else {
                    list.into_iter().filter(|r| r.subject == filter).collect()
                }
            })
        })
    };

    view! {
        <div class="space-y-8">
            // Header with subject filter
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Rubrics"</h1>
                    <p class="text-gray-400 mt-1">"Grading schemas available to your account"</p>
                </div>

                <select
                    on:change=move |ev| set_subject_filter.set(event_target_value(&ev))
                    prop:value=move || subject_filter.get()
                    class="bg-gray-700 rounded-lg px-4 py-2
                           border border-gray-600 focus:border-gray-400 focus:outline-none"
                >
                    <option value="">"All subjects"</option>
                    {move || {
                        subjects.get()
                            .into_iter()
                            .map(|subject| view! {
                                <option value=subject.clone()>{subject}</option>
                            })
                            .collect_view()
                    }}
                </select>
            </div>

            // Rubric table
            <section class="bg-gray-800 rounded-xl p-6">
                {move || match filtered() {
                    None => view! { <ListSkeleton count=4 /> }.into_view(),
                    Some(Err(_)) => view! {
                        <p class="text-gray-400">"Could not load rubrics"</p>
                    }.into_view(),
                    Some(Ok(list)) if list.is_empty() => view! {
                        <p class="text-gray-400">"No rubrics yet"</p>
                    }.into_view(),
                    Some(Ok(list)) => view! {
                        <div class="overflow-x-auto">
                            <table class="w-full text-left text-sm">
                                <thead>
                                    <tr class="text-gray-400 border-b border-gray-700">
                                        <th class="py-3 pr-4 font-medium">"Name"</th>
                                        <th class="py-3 pr-4 font-medium">"Subject"</th>
                                        <th class="py-3 pr-4 font-medium">"Question Type"</th>
                                        <th class="py-3 pr-4 font-medium">"Points"</th>
                                        <th class="py-3 font-medium">"Created"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {list.into_iter().map(|rubric| {
                                        let date = rubric.created_at
                                            .as_deref()
                                            .map(format_date)
                                            .unwrap_or_default();
                                        view! {
                                            <tr class="border-b border-gray-700 last:border-0">
                                                <td class="py-3 pr-4 font-medium">{rubric.name}</td>
                                                <td class="py-3 pr-4 capitalize">{rubric.subject}</td>
                                                <td class="py-3 pr-4 capitalize">{rubric.question_type}</td>
                                                <td class="py-3 pr-4">{format!("{:.0}", rubric.total_points)}</td>
                                                <td class="py-3 text-gray-400">{date}</td>
                                            </tr>
                                        }
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
