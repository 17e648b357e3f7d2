//! Global Application State
//!
//! Reactive state management using Leptos signals, plus the record types
//! shared between the API client and the page renderers.

use leptos::*;
use std::collections::{BTreeSet, HashMap};

/// Local storage key for the auth token
pub const TOKEN_STORAGE_KEY: &str = "gradeflow_token";
/// Local storage key for the serialized current user
pub const USER_STORAGE_KEY: &str = "gradeflow_user";

/// Top-level UI sections
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Section {
    #[default]
    Dashboard,
    Rubrics,
    Evaluations,
    Analytics,
}

impl Section {
    /// All sections, in navigation order
    pub const ALL: [Section; 4] = [
        Section::Dashboard,
        Section::Rubrics,
        Section::Evaluations,
        Section::Analytics,
    ];

    /// Navigation label
    pub fn label(&self) -> &'static str {
        match self {
            Section::Dashboard => "Dashboard",
            Section::Rubrics => "Rubrics",
            Section::Evaluations => "Evaluations",
            Section::Analytics => "Analytics",
        }
    }
}

/// Authenticated user record from the API
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl User {
    pub fn is_student(&self) -> bool {
        self.role == "student"
    }
}

/// An authenticated session: opaque bearer token plus the user it belongs to
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

// ============ Domain Records ============

/// Plagiarism verdict attached to an evaluation
#[derive(Clone, Debug, Default, serde::Deserialize, serde::Serialize)]
pub struct PlagiarismResult {
    #[serde(default)]
    pub is_plagiarized: bool,
    #[serde(default)]
    pub confidence_score: f64,
    #[serde(default)]
    pub ai_generated_probability: f64,
    #[serde(default)]
    pub similarity_percentage: f64,
}

/// A graded submission
#[derive(Clone, Debug, Default, serde::Deserialize, serde::Serialize)]
pub struct Evaluation {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub total_score: f64,
    #[serde(default = "default_max_score")]
    pub max_possible_score: f64,
    #[serde(default)]
    pub percentage: f64,
    #[serde(default)]
    pub needs_review: bool,
    #[serde(default)]
    pub plagiarism_result: Option<PlagiarismResult>,
    #[serde(default)]
    pub created_at: Option<String>,
}

fn default_max_score() -> f64 {
    100.0
}

/// A grading rubric
#[derive(Clone, Debug, Default, serde::Deserialize, serde::Serialize)]
pub struct Rubric {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub question_type: String,
    #[serde(default)]
    pub total_points: f64,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// An uploaded answer sheet
#[derive(Clone, Debug, Default, serde::Deserialize, serde::Serialize)]
pub struct Submission {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub original_filename: String,
    #[serde(default)]
    pub file_size: u64,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Backend health payload: overall status plus per-service status strings
#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct HealthSnapshot {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub services: HashMap<String, String>,
}

/// Per-subject aggregate inside student analytics
#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct SubjectPerformance {
    #[serde(default)]
    pub average_score: f64,
    #[serde(default)]
    pub total_evaluations: u32,
}

/// Analytics payload for a single student
#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct StudentAnalytics {
    #[serde(default)]
    pub total_evaluations: u32,
    #[serde(default)]
    pub average_score: f64,
    #[serde(default)]
    pub highest_score: f64,
    #[serde(default)]
    pub lowest_score: f64,
    #[serde(default)]
    pub recent_trend: Vec<f64>,
    #[serde(default)]
    pub performance_by_subject: HashMap<String, SubjectPerformance>,
    #[serde(default)]
    pub needs_review_count: u32,
    #[serde(default)]
    pub plagiarism_incidents: u32,
}

/// Class-wide analytics payload
#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct ClassAnalytics {
    #[serde(default)]
    pub total_evaluations: u32,
    #[serde(default)]
    pub average_score: f64,
    #[serde(default)]
    pub max_score: f64,
    #[serde(default)]
    pub min_score: f64,
    #[serde(default)]
    pub average_percentage: f64,
}

// ============ Derived Values ============

/// Color band for a score percentage
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScoreBand {
    Positive,
    Caution,
    Negative,
}

impl ScoreBand {
    pub fn text_class(&self) -> &'static str {
        match self {
            ScoreBand::Positive => "text-green-400",
            ScoreBand::Caution => "text-yellow-400",
            ScoreBand::Negative => "text-red-400",
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            ScoreBand::Positive => "bg-green-600",
            ScoreBand::Caution => "bg-yellow-600",
            ScoreBand::Negative => "bg-red-600",
        }
    }
}

pub fn score_band(percentage: f64) -> ScoreBand {
    if percentage >= 70.0 {
        ScoreBand::Positive
    } else if percentage >= 50.0 {
        ScoreBand::Caution
    } else {
        ScoreBand::Negative
    }
}

/// Mean of the evaluations' percentage fields. A record with no percentage
/// counts as 0; an empty list has no average.
pub fn average_percentage(evaluations: &[Evaluation]) -> Option<f64> {
    if evaluations.is_empty() {
        return None;
    }
    let sum: f64 = evaluations.iter().map(|e| e.percentage).sum();
    Some(sum / evaluations.len() as f64)
}

/// De-duplicated, sorted subject names for the rubric filter control
pub fn collect_subjects(rubrics: &[Rubric]) -> Vec<String> {
    rubrics
        .iter()
        .filter(|r| !r.subject.is_empty())
        .map(|r| r.subject.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Render a backend timestamp for display. The API emits both RFC 3339 and
/// bare ISO strings depending on the collection; unparseable input is shown
/// as-is.
pub fn format_date(raw: &str) -> String {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return dt.format("%b %d, %Y %H:%M").to_string();
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc2822(raw) {
        return dt.format("%b %d, %Y %H:%M").to_string();
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format("%b %d, %Y %H:%M").to_string();
    }
    raw.to_string()
}

/// Clip long question text for table cells, char-boundary safe
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let clipped: String = text.chars().take(max_chars).collect();
    format!("{}…", clipped.trim_end())
}

// ============ Application State ============

/// Global application state provided to all components
#[derive(Clone)]
pub struct AppState {
    /// Current session, None when logged out
    pub session: RwSignal<Option<Session>>,
    /// Active UI section
    pub section: RwSignal<Section>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

/// Provide global state to the component tree, restoring any persisted
/// session from local storage.
pub fn provide_app_state() {
    let state = AppState {
        session: create_rw_signal(restore_session()),
        section: create_rw_signal(Section::default()),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    };

    provide_context(state);
}

impl AppState {
    /// Bearer token of the current session, if any
    pub fn token(&self) -> Option<String> {
        self.session.get().map(|s| s.token)
    }

    /// Current user record, if authenticated
    pub fn current_user(&self) -> Option<User> {
        self.session.get().map(|s| s.user)
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.get().is_some()
    }

    /// Store a fresh session and land on the dashboard
    pub fn start_session(&self, session: Session) {
        persist_session(&session);
        self.session.set(Some(session));
        self.section.set(Section::Dashboard);
    }

    /// Drop the session, wipe persisted credentials and reset the view
    pub fn logout(&self) {
        clear_persisted_session();
        self.session.set(None);
        self.section.set(Section::Dashboard);
    }

    pub fn navigate(&self, section: Section) {
        self.section.set(section);
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }
}

// ============ Session Persistence ============

fn persist_session(session: &Session) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item(TOKEN_STORAGE_KEY, &session.token);
            if let Ok(user_json) = serde_json::to_string(&session.user) {
                let _ = storage.set_item(USER_STORAGE_KEY, &user_json);
            }
        }
    }
}

fn restore_session() -> Option<Session> {
    let window = web_sys::window()?;
    let storage = window.local_storage().ok()??;
    let token = storage.get_item(TOKEN_STORAGE_KEY).ok()??;
    let user_json = storage.get_item(USER_STORAGE_KEY).ok()??;
    let user: User = serde_json::from_str(&user_json).ok()?;
    Some(Session { token, user })
}

fn clear_persisted_session() {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.remove_item(TOKEN_STORAGE_KEY);
            let _ = storage.remove_item(USER_STORAGE_KEY);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_section_is_dashboard() {
        assert_eq!(Section::default(), Section::Dashboard);
        assert_eq!(Section::ALL.len(), 4);
    }

    #[test]
    fn test_score_band_thresholds() {
        assert_eq!(score_band(100.0), ScoreBand::Positive);
        assert_eq!(score_band(70.0), ScoreBand::Positive);
        assert_eq!(score_band(69.9), ScoreBand::Caution);
        assert_eq!(score_band(50.0), ScoreBand::Caution);
        assert_eq!(score_band(49.9), ScoreBand::Negative);
        assert_eq!(score_band(0.0), ScoreBand::Negative);
    }

    #[test]
    fn test_average_percentage_treats_missing_as_zero() {
        let evaluations: Vec<Evaluation> =
            serde_json::from_str(r#"[{"percentage": 80.0}, {}]"#).unwrap();
        assert_eq!(average_percentage(&evaluations), Some(40.0));
    }

    #[test]
    fn test_average_percentage_empty_is_none() {
        assert_eq!(average_percentage(&[]), None);
    }

    #[test]
    fn test_collect_subjects_dedupes_and_sorts() {
        let rubrics = vec![
            Rubric {
                subject: "Physics".to_string(),
                ..Default::default()
            },
            Rubric {
                subject: "Biology".to_string(),
                ..Default::default()
            },
            Rubric {
                subject: "Physics".to_string(),
                ..Default::default()
            },
            Rubric::default(),
        ];
        assert_eq!(
            collect_subjects(&rubrics),
            vec!["Biology".to_string(), "Physics".to_string()]
        );
    }

    #[test]
    fn test_user_round_trips_through_storage_format() {
        let user = User {
            id: "u-1".to_string(),
            username: "ada".to_string(),
            email: "ada@example.edu".to_string(),
            role: "teacher".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
        };
        let json = serde_json::to_string(&user).unwrap();
        let restored: User = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, user);
    }

    #[test]
    fn test_format_date_accepts_bare_iso() {
        let formatted = format_date("2024-05-01T12:34:56.789123");
        assert_eq!(formatted, "May 01, 2024 12:34");
    }

    #[test]
    fn test_format_date_falls_back_to_raw() {
        assert_eq!(format_date("yesterday"), "yesterday");
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("a longer question", 8), "a longer…");
    }
}
