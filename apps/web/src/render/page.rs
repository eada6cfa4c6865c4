use chrono::{Datelike, Utc};

use crate::render::html::escape;

pub const APP_TITLE: &str = "Матрица компетенций";
pub const MATRIX_PATH: &str = "/competency-matrix";

const HTMX_SRC: &str = "https://unpkg.com/htmx.org@2.0.4";

// htmx 2 refuses to swap 4xx/5xx bodies by default; error panels and the
// "not found" modal are meant to be shown.
const HTMX_CONFIG: &str = r#"{"responseHandling":[{"code":"204","swap":false},{"code":"[23]..","swap":true},{"code":"[45]..","swap":true,"error":true}]}"#;

const STYLES: &str = r#"
:root { --bg:#0f1419; --header:#1a2028; --border:#2b3440; --accent:#4fa3ff; --text:#e6e6e6; --muted:#9aa4b1; }
* { box-sizing:border-box; }
body { margin:0; min-height:100vh; display:flex; flex-direction:column; background:var(--bg); color:var(--text); font-family:system-ui,sans-serif; }
a { color:var(--accent); text-decoration:none; }
.top-menu { position:sticky; top:0; display:flex; gap:1.5rem; align-items:center; padding:1rem 1.5rem; background:var(--header); }
.top-menu .brand { font-weight:700; font-size:1.25rem; }
main { flex-grow:1; padding:2rem; }
.filters { display:flex; flex-wrap:wrap; gap:1rem; justify-content:space-between; padding:1rem; margin-bottom:1.5rem; background:var(--header); border:1px solid var(--border); border-radius:.5rem; }
.filters input[type=search] { background:var(--bg); color:var(--text); border:1px solid var(--border); padding:.5rem; }
.sheets { display:flex; flex-wrap:wrap; gap:.75rem; margin-top:2rem; padding-top:1rem; border-top:1px solid var(--border); }
.badge { padding:.25rem .75rem; border:1px solid var(--border); border-radius:999px; color:var(--muted); }
.badge.active { background:var(--accent); color:#fff; }
.matrix-section { margin-bottom:1.5rem; padding:1rem; background:var(--header); border:1px solid var(--border); border-radius:.5rem; }
.grade-columns { display:grid; grid-template-columns:repeat(auto-fit,minmax(12rem,1fr)); gap:1rem; }
.grade-label { color:var(--muted); font-size:.875rem; margin-bottom:.5rem; }
.question { display:block; margin-bottom:.5rem; overflow-wrap:anywhere; }
.matrix-table { width:100%; border-collapse:collapse; }
.matrix-table th, .matrix-table td { padding:1rem; border:1px solid var(--border); text-align:left; vertical-align:top; }
.matrix-empty, .notice { color:var(--muted); }
.modal { position:fixed; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,.6); }
.modal-content { width:90vw; max-width:800px; max-height:90vh; overflow-y:auto; padding:1.5rem; background:var(--bg); border:1px solid var(--border); border-radius:.5rem; }
.markdown p { margin:.5rem 0; }
.markdown pre, .markdown code { background:var(--header); border-radius:.25rem; }
.markdown pre { padding:.75rem; overflow-x:auto; }
.resource-context { color:var(--muted); font-size:.875rem; }
.error-panel { padding:1rem; border:1px solid #a33; border-radius:.5rem; background:#2a1414; }
.site-footer { padding:2rem 1rem; background:var(--header); color:var(--muted); font-size:.875rem; }
"#;

/// Wraps `body` in the full document: head, top menu, modal slot, footer.
pub fn render_page(title: &str, body: &str) -> String {
    let title = escape(title);
    format!(
        r##"<!DOCTYPE html>
<html lang="ru">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<meta name="htmx-config" content='{HTMX_CONFIG}'>
<title>{title}</title>
<script src="{HTMX_SRC}" defer></script>
<style>{STYLES}</style>
</head>
<body>
{menu}
<main>
{body}
</main>
<div id="modal"></div>
{footer}
</body>
</html>
"##,
        menu = top_menu(),
        footer = footer(Utc::now().year()),
    )
}

fn top_menu() -> String {
    format!(
        r#"<nav class="top-menu">
<a class="brand" href="/">МКИ</a>
<a href="{MATRIX_PATH}">{APP_TITLE}</a>
</nav>"#
    )
}

fn footer(year: i32) -> String {
    format!(
        r#"<footer class="site-footer">
<section>
<h3>О проекте</h3>
<p>Помогаем разработчикам расти через всесторонние матрицы компетенций и учебные ресурсы.</p>
</section>
<p class="copyright">© {year} Исследователь матрицы компетенций. Все права защищены.</p>
</footer>"#
    )
}

/// User-visible failure message. `detail` is shown under the headline.
pub fn render_error_panel(detail: &str) -> String {
    format!(
        r#"<div class="error-panel" role="alert">
<p>Не удалось загрузить данные. Попробуйте обновить страницу.</p>
<p class="error-detail">{}</p>
</div>"#,
        escape(detail)
    )
}
