//! Template engine setup and the embedded page templates.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use chrono::Local;
use once_cell::sync::Lazy;
use tera::{Context, Tera};
use tracing::error;

use crate::config::Config;

/// Global template engine with the templates embedded in the binary.
static TEMPLATES: Lazy<Tera> = Lazy::new(|| {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("base.html", BASE_TEMPLATE),
        ("changes.html", CHANGES_TEMPLATE),
        ("device.html", DEVICE_TEMPLATE),
        ("error.html", ERROR_TEMPLATE),
    ])
    .expect("failed to load embedded templates");
    tera
});

/// Context shared by every page: wall-clock year, truncated version string
/// and the footer links.
pub fn base_context(config: &Config) -> Context {
    let mut ctx = Context::new();
    ctx.insert("year", &Local::now().format("%Y").to_string());
    ctx.insert("version", config.display_version());
    ctx.insert("status_url", &config.status_url);
    ctx.insert("gerrit_url", &config.gerrit_url);
    ctx
}

/// Render a template into an HTML response. Rendering failures are outside
/// the two-kind error taxonomy and collapse to a generic 500.
pub fn render_response(name: &str, context: &Context) -> Response {
    match TEMPLATES.render(name, context) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!(template = name, error = %e, "template rendering failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "template rendering failed").into_response()
        }
    }
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{% block title %}Downloads{% endblock %}</title>
    <style>
        * { box-sizing: border-box; margin: 0; padding: 0; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Helvetica, Arial, sans-serif;
            color: #212121;
            line-height: 1.6;
        }
        a { color: #167c80; text-decoration: none; }
        a:hover { text-decoration: underline; }
        header {
            background: #167c80;
            color: #fff;
            padding: 12px 24px;
            display: flex;
            align-items: baseline;
            gap: 24px;
        }
        header a.brand { color: #fff; font-size: 1.2em; font-weight: 600; }
        nav.oems { display: flex; flex-wrap: wrap; gap: 16px; font-size: 0.9em; }
        nav.oems details { position: relative; }
        nav.oems summary { cursor: pointer; color: #e0f2f1; }
        nav.oems ul {
            position: absolute;
            background: #fff;
            border: 1px solid #ddd;
            list-style: none;
            padding: 8px 12px;
            min-width: 180px;
            z-index: 10;
        }
        main { max-width: 960px; margin: 0 auto; padding: 24px; }
        h1 small { color: #757575; font-size: 0.6em; font-weight: normal; }
        p.links { margin: 12px 0 24px; display: flex; gap: 16px; }
        table { border-collapse: collapse; width: 100%; }
        th, td { text-align: left; padding: 8px 12px; border-bottom: 1px solid #e0e0e0; }
        th { color: #757575; font-weight: 600; font-size: 0.85em; text-transform: uppercase; }
        footer {
            max-width: 960px;
            margin: 24px auto;
            padding: 12px 24px;
            border-top: 1px solid #e0e0e0;
            color: #757575;
            font-size: 0.85em;
            display: flex;
            gap: 16px;
        }
    </style>
</head>
<body>
<header>
    <a class="brand" href="/">Downloads</a>
    <nav class="oems">
        {% for oem, devices in oems %}
        <details>
            <summary>{{ oem }}</summary>
            <ul>
                {% for device in devices %}
                <li><a href="/{{ device.model }}">{{ device.name }}</a></li>
                {% endfor %}
            </ul>
        </details>
        {% endfor %}
    </nav>
</header>
<main>
{% block content %}{% endblock %}
</main>
<footer>
    <a href="{{ status_url }}">Status</a>
    <a href="{{ gerrit_url }}">Gerrit</a>
    <span>&copy; {{ year }} &middot; {{ version }}</span>
</footer>
</body>
</html>
"##;

const CHANGES_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block title %}{% if active_device_data %}Changes for {{ active_device_data.name }}{% else %}Changelog{% endif %}{% endblock %}
{% block content %}
{% if active_device_data %}
<h1>{{ active_device_data.name }} <small>{{ active_device_data.oem }} &middot; {{ active_device_data.model }}</small></h1>
<p class="links"><a href="/{{ active_device_data.model }}">Downloads</a></p>
{% else %}
<h1>Changelog</h1>
{% endif %}
<div id="changes"
     data-before="{{ before }}"
     data-changelog="{{ changelog }}"
     {% if active_device_data %}data-device="{{ active_device_data.model }}"{% endif %}
     data-gerrit="{{ gerrit_url }}">
</div>
{% endblock %}
"##;

const DEVICE_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block title %}{{ active_device_data.name }} ({{ active_device_data.model }}){% endblock %}
{% block content %}
<h1>{{ active_device_data.name }} <small>{{ active_device_data.oem }} &middot; {{ active_device_data.model }}</small></h1>
<p class="links">
    <a href="{{ wiki_info }}">Device info</a>
    <a href="{{ wiki_install }}">Installation instructions</a>
    <a href="/{{ active_device_data.model }}/changes">Changelog</a>
</p>
{% if roms %}
<table>
    <thead>
        <tr>
            <th>Type</th>
            <th>Version</th>
            <th>File</th>
            <th>Size</th>
            <th>Date</th>
            {% if has_recovery %}<th>Recovery</th>{% endif %}
        </tr>
    </thead>
    <tbody>
        {% for rom in roms %}
        <tr>
            <td>{{ rom.romtype }}</td>
            <td>{{ rom.version }}</td>
            <td>{% if rom.filepath %}<a href="{{ download_base_url }}{{ rom.filepath }}">{{ rom.filename }}</a>{% endif %}</td>
            <td>{% if rom.size %}{{ rom.size | filesizeformat }}{% endif %}</td>
            <td>{{ rom.date }}</td>
            {% if has_recovery %}
            <td>{% if rom.recovery %}<a href="{{ download_base_url }}{{ rom.recovery.filepath }}">{{ rom.recovery.filename }}</a>{% endif %}</td>
            {% endif %}
        </tr>
        {% endfor %}
    </tbody>
</table>
{% else %}
<p>No builds are currently available for this device.</p>
{% endif %}
{% endblock %}
"##;

const ERROR_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block title %}{{ header }}{% endblock %}
{% block content %}
<h1>{{ header }}</h1>
<p>{{ message }}</p>
{% endblock %}
"##;
