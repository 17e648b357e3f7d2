//! App Root Component
//!
//! Root shell: provides global state, gates on the session, and renders
//! exactly one section at a time.

use leptos::*;

use crate::components::{AuthPanel, Nav, Toast};
use crate::pages::{Analytics, Dashboard, Evaluations, Rubrics};
use crate::state::global::{provide_app_state, AppState, Section};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Provide global state to all components
    provide_app_state();

    let state = use_context::<AppState>().expect("AppState not found");
    let section = state.section;

    let state_for_view = state;

    view! {
        <div class="min-h-screen bg-gray-900 text-white flex flex-col">
            {move || {
                if state_for_view.is_authenticated() {
                    view! {
                        // Navigation header
                        <Nav />

                        // Active section; switching unmounts every other one
                        <main class="flex-1 container mx-auto px-4 py-8">
                            {move || match section.get() {
                                Section::Dashboard => view! { <Dashboard /> }.into_view(),
                                Section::Rubrics => view! { <Rubrics /> }.into_view(),
                                Section::Evaluations => view! { <Evaluations /> }.into_view(),
                                Section::Analytics => view! { <Analytics /> }.into_view(),
                            }}
                        </main>
                    }.into_view()
                } else {
                    view! {
                        <main class="flex-1 flex items-center justify-center px-4 py-8">
                            <AuthPanel />
                        </main>
                    }.into_view()
                }
            }}

            // Toast notifications
            <Toast />
        </div>
    }
}
