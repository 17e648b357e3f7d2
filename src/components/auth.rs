//! Authentication Panel
//!
//! Login and registration forms shown while no session exists. Registration
//! does not auto-authenticate; it drops the user back on the login form.

use leptos::*;

use crate::api;
use crate::state::global::AppState;

#[derive(Clone, Copy, PartialEq)]
enum AuthMode {
    Login,
    Register,
}

/// Unauthenticated landing panel
#[component]
pub fn AuthPanel() -> impl IntoView {
    let (mode, set_mode) = create_signal(AuthMode::Login);

    view! {
        <div class="w-full max-w-md space-y-6">
            // Brand header
            <div class="text-center">
                <div class="text-5xl mb-2">"📝"</div>
                <h1 class="text-3xl font-bold">"Gradeflow"</h1>
                <p class="text-gray-400 mt-1">"AI-assisted grading for scanned answer sheets"</p>
            </div>

            <div class="bg-gray-800 rounded-xl p-6 space-y-4">
                // Mode toggle
                <div class="flex space-x-2">
                    <ModeButton
                        label="Log in"
                        current=mode
                        target=AuthMode::Login
                        on_click=move |_| set_mode.set(AuthMode::Login)
                    />
                    <ModeButton
                        label="Register"
                        current=mode
                        target=AuthMode::Register
                        on_click=move |_| set_mode.set(AuthMode::Register)
                    />
                </div>

                {move || match mode.get() {
                    AuthMode::Login => view! { <LoginForm /> }.into_view(),
                    AuthMode::Register => view! {
                        <RegisterForm on_registered=move || set_mode.set(AuthMode::Login) />
                    }.into_view(),
                }}
            </div>

            <ApiSettings />
        </div>
    }
}

#[component]
fn ModeButton(
    label: &'static str,
    current: ReadSignal<AuthMode>,
    target: AuthMode,
    on_click: impl Fn(web_sys::MouseEvent) + 'static,
) -> impl IntoView {
    view! {
        <button
            type="button"
            on:click=on_click
            class=move || {
                let base = "flex-1 px-4 py-2 rounded-lg text-sm font-medium transition-colors";
                if current.get() == target {
                    format!("{} bg-gray-600 text-white", base)
                } else {
                    format!("{} bg-gray-700 text-gray-400 hover:text-white", base)
                }
            }
        >
            {label}
        </button>
    }
}

#[component]
fn LoginForm() -> impl IntoView {
    let state = use_context::<AppState>().expect("AppState not found");

    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let e = email.get();
        let p = password.get();

        if e.is_empty() || p.is_empty() {
            state.show_error("Email and password are required");
            return;
        }

        set_submitting.set(true);

        let state_clone = state.clone();
        spawn_local(async move {
            match api::login(&e, &p).await {
                Ok(session) => {
                    let username = session.user.username.clone();
                    state_clone.start_session(session);
                    state_clone.show_success(&format!("Welcome back, {}", username));
                }
                Err(e) => {
                    state_clone.show_error(&e);
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        <form on:submit=on_submit class="space-y-4">
            <div>
                <label class="block text-sm text-gray-400 mb-2">"Email"</label>
                <input
                    type="email"
                    placeholder="you@school.edu"
                    prop:value=move || email.get()
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                    class="w-full bg-gray-700 rounded-lg px-4 py-3
                           border border-gray-600 focus:border-gray-400 focus:outline-none"
                />
            </div>

            <div>
                <label class="block text-sm text-gray-400 mb-2">"Password"</label>
                <input
                    type="password"
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                    class="w-full bg-gray-700 rounded-lg px-4 py-3
                           border border-gray-600 focus:border-gray-400 focus:outline-none"
                />
            </div>

            <button
                type="submit"
                disabled=move || submitting.get()
                class="w-full bg-amber-600 hover:bg-amber-700 disabled:bg-gray-600
                       rounded-lg py-3 font-semibold transition-colors"
            >
                {move || if submitting.get() { "Signing in..." } else { "Log in" }}
            </button>
        </form>
    }
}

#[component]
fn RegisterForm(on_registered: impl Fn() + 'static + Clone) -> impl IntoView {
    let state = use_context::<AppState>().expect("AppState not found");

    let (username, set_username) = create_signal(String::new());
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (role, set_role) = create_signal("teacher".to_string());
    let (first_name, set_first_name) = create_signal(String::new());
    let (last_name, set_last_name) = create_signal(String::new());
    let (institution, set_institution) = create_signal(String::new());
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let request = api::RegisterRequest {
            username: username.get(),
            email: email.get(),
            password: password.get(),
            role: role.get(),
            first_name: first_name.get(),
            last_name: last_name.get(),
            institution: institution.get(),
        };

        if request.username.is_empty() || request.email.is_empty() || request.password.is_empty() {
            state.show_error("Username, email and password are required");
            return;
        }

        set_submitting.set(true);

        let state_clone = state.clone();
        let on_registered = on_registered.clone();
        spawn_local(async move {
            match api::register(&request).await {
                Ok(_) => {
                    state_clone.show_success("Account created. Log in to continue.");
                    on_registered();
                }
                Err(e) => {
                    state_clone.show_error(&e);
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        <form on:submit=on_submit class="space-y-4">
            <div>
                <label class="block text-sm text-gray-400 mb-2">"Username"</label>
                <input
                    type="text"
                    prop:value=move || username.get()
                    on:input=move |ev| set_username.set(event_target_value(&ev))
                    class="w-full bg-gray-700 rounded-lg px-4 py-3
                           border border-gray-600 focus:border-gray-400 focus:outline-none"
                />
            </div>

            <div>
                <label class="block text-sm text-gray-400 mb-2">"Email"</label>
                <input
                    type="email"
                    prop:value=move || email.get()
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                    class="w-full bg-gray-700 rounded-lg px-4 py-3
                           border border-gray-600 focus:border-gray-400 focus:outline-none"
                />
            </div>

            <div>
                <label class="block text-sm text-gray-400 mb-2">"Password"</label>
                <input
                    type="password"
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                    class="w-full bg-gray-700 rounded-lg px-4 py-3
                           border border-gray-600 focus:border-gray-400 focus:outline-none"
                />
            </div>

            <div>
                <label class="block text-sm text-gray-400 mb-2">"Role"</label>
                <select
                    on:change=move |ev| set_role.set(event_target_value(&ev))
                    prop:value=move || role.get()
                    class="w-full bg-gray-700 rounded-lg px-4 py-3
                           border border-gray-600 focus:border-gray-400 focus:outline-none"
                >
                    <option value="teacher">"Teacher"</option>
                    <option value="student">"Student"</option>
                </select>
            </div>

            <div class="grid grid-cols-2 gap-3">
                <input
                    type="text"
                    placeholder="First name"
                    prop:value=move || first_name.get()
                    on:input=move |ev| set_first_name.set(event_target_value(&ev))
                    class="bg-gray-700 rounded-lg px-4 py-3
                           border border-gray-600 focus:border-gray-400 focus:outline-none"
                />
                <input
                    type="text"
                    placeholder="Last name"
                    prop:value=move || last_name.get()
                    on:input=move |ev| set_last_name.set(event_target_value(&ev))
                    class="bg-gray-700 rounded-lg px-4 py-3
                           border border-gray-600 focus:border-gray-400 focus:outline-none"
                />
            </div>

            <div>
                <input
                    type="text"
                    placeholder="Institution (optional)"
                    prop:value=move || institution.get()
                    on:input=move |ev| set_institution.set(event_target_value(&ev))
                    class="w-full bg-gray-700 rounded-lg px-4 py-3
                           border border-gray-600 focus:border-gray-400 focus:outline-none"
                />
            </div>

            <button
                type="submit"
                disabled=move || submitting.get()
                class="w-full bg-amber-600 hover:bg-amber-700 disabled:bg-gray-600
                       rounded-lg py-3 font-semibold transition-colors"
            >
                {move || if submitting.get() { "Creating account..." } else { "Register" }}
            </button>
        </form>
    }
}

/// Backend URL override, persisted to local storage
#[component]
fn ApiSettings() -> impl IntoView {
    let state = use_context::<AppState>().expect("AppState not found");

    let (api_url, set_api_url) = create_signal(api::get_api_base());

    let save_url = move |_| {
        let url = api_url.get();
        api::set_api_base(&url);
        state.show_success("API URL saved");
    };

    view! {
        <div class="flex items-center space-x-2 text-sm">
            <span class="text-gray-500 whitespace-nowrap">"API URL"</span>
            <input
                type="text"
                prop:value=move || api_url.get()
                on:input=move |ev| set_api_url.set(event_target_value(&ev))
                class="flex-1 bg-gray-800 rounded-lg px-3 py-2
                       border border-gray-700 focus:border-gray-500 focus:outline-none"
            />
            <button
                on:click=save_url
                class="px-3 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg transition-colors"
            >
                "Save"
            </button>
        </div>
    }
}
