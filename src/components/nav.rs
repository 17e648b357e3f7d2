//! Navigation Component
//!
//! Header bar with brand, section switcher and session controls.

use leptos::*;

use crate::state::global::{AppState, Section};

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    let state = use_context::<AppState>().expect("AppState not found");

    let state_for_user = state.clone();
    let state_for_logout = state;

    view! {
        <nav class="bg-gray-800 border-b border-gray-700">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    // Logo and brand
                    <div class="flex items-center space-x-3">
                        <span class="text-2xl">"📝"</span>
                        <span class="text-xl font-bold text-white">"Gradeflow"</span>
                    </div>

                    // Section switcher
                    <div class="flex items-center space-x-1">
                        {Section::ALL
                            .into_iter()
                            .map(|section| view! { <NavButton section=section /> })
                            .collect_view()}
                    </div>

                    // Session controls
                    <div class="flex items-center space-x-4">
                        <span class="text-sm text-gray-400">
                            {move || {
                                state_for_user
                                    .current_user()
                                    .map(|u| format!("{} ({})", u.username, u.role))
                                    .unwrap_or_default()
                            }}
                        </span>
                        <button
                            on:click=move |_| state_for_logout.logout()
                            class="px-3 py-2 rounded-lg text-sm text-gray-300 hover:text-white
                                   hover:bg-gray-700 transition-colors"
                        >
                            "Log out"
                        </button>
                    </div>
                </div>
            </div>
        </nav>
    }
}

/// Button for one section; styled active when its section is current
#[component]
fn NavButton(section: Section) -> impl IntoView {
    let state = use_context::<AppState>().expect("AppState not found");
    let current = state.section;

    let state_for_click = state;
    let on_click = move |_| state_for_click.navigate(section);

    view! {
        <button
            on:click=on_click
            class=move || {
                let base = "px-4 py-2 rounded-lg transition-colors";
                if current.get() == section {
                    format!("{} bg-gray-700 text-white", base)
                } else {
                    format!("{} text-gray-300 hover:text-white hover:bg-gray-700", base)
                }
            }
        >
            {section.label()}
        </button>
    }
}
