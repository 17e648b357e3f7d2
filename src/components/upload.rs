//! Upload Panel
//!
//! Answer-sheet upload: client-side validation, a preview of the selected
//! file, and a simulated progress indicator while the backend runs OCR over
//! the sheet. The progress ticker is cosmetic; the real signal is the
//! response arriving.

use gloo_timers::callback::Interval;
use leptos::*;
use wasm_bindgen::JsCast;

use crate::api;
use crate::state::global::AppState;

/// Upload size ceiling, mirroring the backend's request limit
pub const MAX_UPLOAD_BYTES: u64 = 16 * 1024 * 1024;

/// MIME types the backend's OCR pipeline accepts
const ALLOWED_MIME_TYPES: [&str; 4] = [
    "image/png",
    "image/jpeg",
    "application/pdf",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// Interval between simulated progress ticks
const PROGRESS_TICK_MS: u32 = 500;

/// Rejections raised before any request is sent
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum UploadError {
    #[error("Unsupported file type {0:?}. Use PNG, JPEG, PDF or DOCX.")]
    UnsupportedType(String),
    #[error("File is too large ({0} bytes). The limit is 16 MB.")]
    TooLarge(u64),
}

/// Check a selected file against the MIME allow-list and size ceiling.
/// A file of exactly 16 MiB is accepted.
pub fn validate_upload(mime: &str, size: u64) -> Result<(), UploadError> {
    if !ALLOWED_MIME_TYPES.contains(&mime) {
        return Err(UploadError::UnsupportedType(mime.to_string()));
    }
    if size > MAX_UPLOAD_BYTES {
        return Err(UploadError::TooLarge(size));
    }
    Ok(())
}

/// Human-readable size with 1024-based units
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let exponent = (((bytes as f64).ln() / 1024_f64.ln()).floor() as usize).min(UNITS.len() - 1);
    let value = bytes as f64 / 1024_f64.powi(exponent as i32);

    let rounded = format!("{:.2}", value);
    let rounded = rounded.trim_end_matches('0').trim_end_matches('.');

    format!("{} {}", rounded, UNITS[exponent])
}

/// One simulated progress step: add up to 20 points, hold at 90 until the
/// response lands. `roll` is a random sample in [0, 1).
pub fn advance_progress(percent: f64, roll: f64) -> f64 {
    (percent + roll * 20.0).min(90.0)
}

/// Stage label for the current simulated percentage
pub fn progress_label(percent: f64) -> &'static str {
    if percent < 30.0 {
        "Uploading..."
    } else if percent <= 60.0 {
        "Processing with OCR..."
    } else {
        "Extracting text..."
    }
}

/// Upload form with validation, preview and simulated progress
#[component]
pub fn UploadPanel(on_uploaded: impl Fn() + 'static + Clone) -> impl IntoView {
    let state = use_context::<AppState>().expect("AppState not found");

    let (selected, set_selected) = create_signal(None::<web_sys::File>);
    let (question, set_question) = create_signal(String::new());
    let (assignment_id, set_assignment_id) = create_signal(String::new());
    let (uploading, set_uploading) = create_signal(false);
    let (progress, set_progress) = create_signal(0.0_f64);

    // Single slot for the live progress ticker. Writing the slot drops any
    // previous Interval, which cancels it.
    let simulation: StoredValue<Option<Interval>> = store_value(None);

    let start_simulation = move || {
        set_progress.set(0.0);
        let handle = Interval::new(PROGRESS_TICK_MS, move || {
            set_progress.update(|p| *p = advance_progress(*p, js_sys::Math::random()));
        });
        simulation.update_value(|slot| *slot = Some(handle));
    };
    let stop_simulation = move || {
        simulation.update_value(|slot| {
            slot.take();
        });
    };

    let file_input_ref = create_node_ref::<html::Input>();

    let state_for_select = state.clone();
    let on_file_change = move |ev: web_sys::Event| {
        let input: web_sys::HtmlInputElement = match ev.target().and_then(|t| t.dyn_into().ok()) {
            Some(input) => input,
            None => return,
        };

        let file = input.files().and_then(|files| files.get(0));
        let file = match file {
            Some(file) => file,
            None => {
                set_selected.set(None);
                return;
            }
        };

        match validate_upload(&file.type_(), file.size() as u64) {
            Ok(()) => set_selected.set(Some(file)),
            Err(e) => {
                state_for_select.show_error(&e.to_string());
                input.set_value("");
                set_selected.set(None);
            }
        }
    };

    let state_for_submit = state;
    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let token = match state_for_submit.token() {
            Some(token) => token,
            None => {
                state_for_submit.show_error("Please log in before uploading answer sheets");
                return;
            }
        };

        let file = match selected.get() {
            Some(file) => file,
            None => {
                state_for_submit.show_error("Choose a file to upload first");
                return;
            }
        };

        let form = match web_sys::FormData::new() {
            Ok(form) => form,
            Err(_) => {
                state_for_submit.show_error("Could not build the upload request");
                return;
            }
        };
        if form
            .append_with_blob_and_filename("file", &file, &file.name())
            .is_err()
        {
            state_for_submit.show_error("Could not attach the selected file");
            return;
        }

        let q = question.get();
        if !q.is_empty() {
            let _ = form.append_with_str("question", &q);
        }
        let a = assignment_id.get();
        if !a.is_empty() {
            let _ = form.append_with_str("assignment_id", &a);
        }

        set_uploading.set(true);
        start_simulation();

        let state_clone = state_for_submit.clone();
        let on_uploaded = on_uploaded.clone();
        spawn_local(async move {
            match api::upload_submission(&token, form).await {
                Ok(response) => {
                    stop_simulation();
                    set_progress.set(100.0);

                    let message = if response.message.is_empty() {
                        "File uploaded successfully".to_string()
                    } else {
                        response.message
                    };
                    state_clone.show_success(&message);

                    // Reset the form
                    set_selected.set(None);
                    set_question.set(String::new());
                    set_assignment_id.set(String::new());
                    if let Some(input) = file_input_ref.get_untracked() {
                        input.set_value("");
                    }

                    on_uploaded();
                }
                Err(e) => {
                    stop_simulation();
                    state_clone.show_error(&e);
                }
            }
            set_uploading.set(false);
        });
    };

    view! {
        <form on:submit=on_submit class="space-y-4">
            // File picker
            <label
                class="flex items-center justify-center px-4 py-6 bg-gray-700 hover:bg-gray-600
                       rounded-lg cursor-pointer transition-colors
                       border-2 border-dashed border-gray-500 hover:border-gray-400"
            >
                <input
                    type="file"
                    accept=".png,.jpg,.jpeg,.pdf,.docx"
                    class="hidden"
                    node_ref=file_input_ref
                    on:change=on_file_change
                    disabled=move || uploading.get()
                />
                <span class="flex items-center gap-2 text-gray-300">
                    <span>"📁"</span>
                    <span>"Choose a scanned answer sheet"</span>
                </span>
            </label>

            // Preview of the selected file
            {move || {
                selected.get().map(|file| view! {
                    <div class="flex items-center justify-between p-3 bg-gray-700 rounded-lg text-sm">
                        <span class="truncate">{file.name()}</span>
                        <span class="text-gray-400 ml-3 whitespace-nowrap">
                            {format_file_size(file.size() as u64)}
                        </span>
                    </div>
                })
            }}

            // Question text
            <div>
                <label class="block text-sm text-gray-400 mb-2">"Question (optional)"</label>
                <textarea
                    rows="2"
                    placeholder="The question this sheet answers"
                    prop:value=move || question.get()
                    on:input=move |ev| set_question.set(event_target_value(&ev))
                    class="w-full bg-gray-700 rounded-lg px-4 py-3
                           border border-gray-600 focus:border-gray-400 focus:outline-none"
                />
            </div>

            // Assignment id
            <div>
                <label class="block text-sm text-gray-400 mb-2">"Assignment ID (optional)"</label>
                <input
                    type="text"
                    placeholder="e.g., midterm-2"
                    prop:value=move || assignment_id.get()
                    on:input=move |ev| set_assignment_id.set(event_target_value(&ev))
                    class="w-full bg-gray-700 rounded-lg px-4 py-3
                           border border-gray-600 focus:border-gray-400 focus:outline-none"
                />
            </div>

            // Simulated progress
            {move || {
                if uploading.get() {
                    let percent = progress.get();
                    view! {
                        <div class="space-y-2">
                            <div class="w-full bg-gray-700 rounded-full h-2">
                                <div
                                    class="bg-amber-500 h-2 rounded-full transition-all"
                                    style=format!("width: {:.0}%", percent)
                                />
                            </div>
                            <p class="text-sm text-gray-400">{progress_label(percent)}</p>
                        </div>
                    }.into_view()
                } else {
                    view! {}.into_view()
                }
            }}

            // Submit
            <button
                type="submit"
                disabled=move || uploading.get() || selected.get().is_none()
                class="w-full bg-amber-600 hover:bg-amber-700 disabled:bg-gray-600
                       disabled:cursor-not-allowed rounded-lg py-3 font-semibold
                       transition-colors"
            >
                {move || if uploading.get() { "Uploading..." } else { "Upload for Grading" }}
            </button>
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_unsupported_mime_type() {
        let result = validate_upload("image/gif", 1024);
        assert_eq!(
            result,
            Err(UploadError::UnsupportedType("image/gif".to_string()))
        );
    }

    #[test]
    fn test_accepts_allowed_types() {
        for mime in ALLOWED_MIME_TYPES {
            assert_eq!(validate_upload(mime, 1024), Ok(()));
        }
    }

    #[test]
    fn test_size_ceiling_is_inclusive() {
        assert_eq!(validate_upload("image/png", MAX_UPLOAD_BYTES), Ok(()));
        assert_eq!(
            validate_upload("image/png", MAX_UPLOAD_BYTES + 1),
            Err(UploadError::TooLarge(MAX_UPLOAD_BYTES + 1))
        );
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1_048_576), "1 MB");
        assert_eq!(format_file_size(MAX_UPLOAD_BYTES), "16 MB");
    }

    #[test]
    fn test_progress_caps_at_ninety() {
        assert_eq!(advance_progress(85.0, 0.99), 90.0);
        assert_eq!(advance_progress(90.0, 0.5), 90.0);
        assert_eq!(advance_progress(10.0, 0.5), 20.0);
    }

    #[test]
    fn test_progress_never_exceeds_max_increment() {
        let next = advance_progress(0.0, 0.999);
        assert!(next < 20.0);
    }

    #[test]
    fn test_progress_labels_by_stage() {
        assert_eq!(progress_label(0.0), "Uploading...");
        assert_eq!(progress_label(29.9), "Uploading...");
        assert_eq!(progress_label(30.0), "Processing with OCR...");
        assert_eq!(progress_label(60.0), "Processing with OCR...");
        assert_eq!(progress_label(60.1), "Extracting text...");
        assert_eq!(progress_label(90.0), "Extracting text...");
    }
}
