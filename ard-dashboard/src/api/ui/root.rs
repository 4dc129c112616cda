//! Dashboard page handler

use axum::{
    extract::State,
    response::{Html, IntoResponse},
};

use crate::AppState;

/// GET /
///
/// Single-page dashboard: upload, model selection, run, status and results.
/// Page behaviour lives in `/static/dashboard.js`.
pub async fn root_page(State(state): State<AppState>) -> impl IntoResponse {
    let build_timestamp = env!("BUILD_TIMESTAMP");
    let version = env!("CARGO_PKG_VERSION");
    let git_hash = env!("GIT_HASH");
    let build_profile = env!("BUILD_PROFILE");

    let intake = state.controller.intake();
    let accept = intake.accepted().to_accept_attribute();
    let max_bytes = intake.max_file_size_bytes();

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>AI Research Dashboard</title>
    <link rel="stylesheet" href="/static/dashboard.css">
</head>
<body data-max-bytes="{max_bytes}">
    <header>
        <div class="header-content">
            <div class="header-left">
                <h1>
                    AI Research Dashboard
                    <span class="connection-status status-connecting" id="connection-status">Connecting...</span>
                </h1>
                <p class="subtitle">Upload a file, pick a model, analyze</p>
            </div>
            <div class="header-right">
                <div class="build-info-line">ard-dashboard v{version}</div>
                <div class="build-info-line">{git_hash} ({build_profile})</div>
                <div class="build-info-line">{build_timestamp}</div>
            </div>
        </div>
    </header>
    <div class="content">
        <div class="grid">
            <section class="card">
                <h2>1. Upload</h2>
                <div class="drop-zone" id="drop-zone">
                    <p>Drop a file here or choose one</p>
                    <input type="file" id="file-input" accept="{accept}">
                </div>
                <p class="hint">Accepted: {accept}</p>
                <p class="hint" id="file-name">No file selected</p>
            </section>
            <section class="card">
                <h2>2. Model</h2>
                <select id="model-select">
                    <option value="">Select an AI model</option>
                </select>
                <div id="model-detail" class="hint"></div>
            </section>
            <section class="card">
                <h2>3. Analyze</h2>
                <button class="button" id="run-button" disabled>Analyze</button>
                <p class="status-message" id="status-message">Waiting to start</p>
                <div class="progress" id="progress" hidden>
                    <div class="progress-bar" id="progress-bar"></div>
                </div>
                <p class="hint" id="progress-text"></p>
            </section>
        </div>
        <section class="card" id="results" hidden>
            <h2>Results</h2>
            <div class="tabs">
                <button class="tab active" data-tab="visual">Visual</button>
                <button class="tab" data-tab="detailed">Detailed</button>
            </div>
            <div id="results-visual"></div>
            <div id="results-detailed" hidden></div>
        </section>
    </div>
    <div id="toasts"></div>
    <script src="/static/dashboard.js"></script>
</body>
</html>"#
    ))
}
