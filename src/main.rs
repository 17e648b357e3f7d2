//! Gradeflow Dashboard
//!
//! Web frontend for AI-assisted grading of scanned answer sheets, built with
//! Leptos (WASM).
//!
//! # Features
//!
//! - Answer-sheet upload with client-side validation and progress feedback
//! - Dashboard aggregating submissions, evaluations and rubrics
//! - Score analytics with per-student and class-wide views
//! - Token-based session handling persisted across reloads
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It communicates with the Gradeflow REST API over HTTP; OCR,
//! grading and plagiarism detection all happen server-side.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
