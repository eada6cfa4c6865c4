//! Matrix rendering: list and grid layouts, the filter form and sheet badges.
//!
//! List layout shows only recognized grades that hold questions; grid layout
//! always has one column per grade in canonical order. Grade keys outside the
//! fixed set are never drawn.

use std::fmt::Write;

use crate::models::catalog::{Grade, Question, Section, Subsection};
use crate::render::html::{escape, url_with_query};
use crate::render::page::MATRIX_PATH;
use crate::render::{Layout, MatrixView};

pub const ITEMS_PATH: &str = "/competency-matrix/items";
pub const SHEETS_PATH: &str = "/competency-matrix/sheets";

/// Filter form, matrix container and sheet selector for one sheet.
pub fn render_workspace(sheets: &[String], view: &MatrixView<'_>) -> String {
    format!(
        r#"<div id="workspace">
<h1>{title}</h1>
{filters}
<div id="matrix-root">
{matrix}
</div>
{badges}
</div>"#,
        title = crate::render::page::APP_TITLE,
        filters = render_filters(view),
        matrix = render_matrix(view),
        badges = render_sheet_badges(sheets, view),
    )
}

/// Shown instead of the workspace when the catalog has no sheets at all.
pub fn render_no_catalogs() -> String {
    format!(
        r#"<div id="workspace">
<h1>{}</h1>
<p class="notice">Матрицы компетенций пока не опубликованы.</p>
</div>"#,
        crate::render::page::APP_TITLE
    )
}

/// Search box and layout toggle.
///
/// Every change re-requests the matrix fragment; `hx-sync` replace aborts the
/// request still in flight so an older response can't land after a newer one.
pub fn render_filters(view: &MatrixView<'_>) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        r##"<form id="filters" class="filters" action="{MATRIX_PATH}" method="get" hx-get="{ITEMS_PATH}" hx-target="#matrix-root" hx-swap="innerHTML" hx-trigger="input changed delay:300ms from:find input[name='q'], change, submit" hx-sync="this:replace">
<input type="hidden" name="sheet" value="{sheet}">
<div class="search">
<input type="search" name="q" value="{query}" placeholder="Поиск навыков, вопросов..." aria-label="Поиск">"##,
        sheet = escape(view.sheet),
        query = escape(view.query),
    );

    out.push('\n');
    out.push_str(&clear_search(view, false));
    out.push_str("\n</div>\n<fieldset class=\"layout-toggle\">");
    for (layout, label) in [(Layout::List, "Список"), (Layout::Grid, "Сетка")] {
        let checked = if layout == view.layout { " checked" } else { "" };
        let _ = write!(
            out,
            r#"
<label><input type="radio" name="layout" value="{}"{checked}> {label}</label>"#,
            layout.as_str()
        );
    }
    out.push_str("\n</fieldset>\n<noscript><button type=\"submit\">Найти</button></noscript>\n</form>");
    out
}

/// One badge per sheet; the active one is highlighted.
pub fn render_sheet_badges(sheets: &[String], view: &MatrixView<'_>) -> String {
    sheet_badges(sheets, view, false)
}

/// Matrix fragment for a filter change, plus out-of-band copies of the sheet
/// badges and the clear-search link so their URLs carry the new query and
/// layout.
pub fn render_matrix_update(sheets: &[String], view: &MatrixView<'_>) -> String {
    format!(
        "{}\n{}\n{}",
        render_matrix(view),
        sheet_badges(sheets, view, true),
        clear_search(view, true)
    )
}

fn sheet_badges(sheets: &[String], view: &MatrixView<'_>, oob: bool) -> String {
    let mut out = String::from(r#"<nav id="sheets" class="sheets""#);
    if oob {
        out.push_str(r#" hx-swap-oob="true""#);
    }
    out.push('>');
    for sheet in sheets {
        let href = escape(&url_with_query(
            MATRIX_PATH,
            &[
                ("sheet", sheet.as_str()),
                ("layout", view.layout.as_str()),
                ("q", view.query.trim()),
            ],
        ));
        let (class, current) = if sheet == view.sheet {
            ("badge active", r#" aria-current="page""#)
        } else {
            ("badge", "")
        };
        let _ = write!(
            out,
            r##"
<a class="{class}"{current} href="{href}" hx-get="{href}" hx-target="#workspace" hx-select="#workspace" hx-swap="outerHTML" hx-push-url="true" hx-sync="#sheets:replace">{name}</a>"##,
            name = escape(sheet),
        );
    }
    out.push_str("\n</nav>");
    out
}

/// Link back to the unfiltered sheet; an empty slot while there is no query.
fn clear_search(view: &MatrixView<'_>, oob: bool) -> String {
    let oob = if oob { r#" hx-swap-oob="true""# } else { "" };
    if view.query.trim().is_empty() {
        return format!(r#"<span id="clear-search"{oob}></span>"#);
    }
    let clear = url_with_query(
        MATRIX_PATH,
        &[("sheet", view.sheet), ("layout", view.layout.as_str())],
    );
    format!(
        r#"<span id="clear-search"{oob}><a class="clear-search" href="{}" aria-label="Очистить поиск">×</a></span>"#,
        escape(&clear)
    )
}

/// The matrix fragment. Carries the sheet and query it was rendered for.
pub fn render_matrix(view: &MatrixView<'_>) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<div id="matrix" class="matrix matrix-{layout}" data-sheet="{sheet}" data-query="{query}">"#,
        layout = view.layout.as_str(),
        sheet = escape(view.sheet),
        query = escape(view.query),
    );

    if view.sections.is_empty() {
        out.push_str("\n<p class=\"matrix-empty\">Ничего не найдено</p>");
    } else {
        match view.layout {
            Layout::List => render_list(&mut out, view.sections),
            Layout::Grid => render_grid(&mut out, view.sections),
        }
    }

    out.push_str("\n</div>");
    out
}

fn render_list(out: &mut String, sections: &[Section]) {
    for section in sections {
        let _ = write!(
            out,
            "\n<section class=\"matrix-section\">\n<h2>{}</h2>",
            escape(&section.title)
        );
        for sub in &section.subsections {
            let _ = write!(
                out,
                "\n<div class=\"matrix-subsection\">\n<h3>{}</h3>\n<div class=\"grade-columns\">",
                escape(&sub.name)
            );
            for grade in sub.present_grades() {
                let _ = write!(
                    out,
                    "\n<div class=\"grade-column\" data-grade=\"{label}\">\n<div class=\"grade-label\">{label}</div>",
                    label = escape(grade.label())
                );
                push_questions(out, sub, grade);
                out.push_str("\n</div>");
            }
            out.push_str("\n</div>\n</div>");
        }
        out.push_str("\n</section>");
    }
}

fn render_grid(out: &mut String, sections: &[Section]) {
    out.push_str("\n<table class=\"matrix-table\">\n<thead>\n<tr><th>Раздел</th><th>Подраздел</th>");
    for grade in Grade::ALL {
        let _ = write!(
            out,
            "<th data-grade=\"{label}\">{label}</th>",
            label = escape(grade.label())
        );
    }
    out.push_str("</tr>\n</thead>\n<tbody>");

    for section in sections {
        for (index, sub) in section.subsections.iter().enumerate() {
            out.push_str("\n<tr>");
            if index == 0 {
                let _ = write!(
                    out,
                    "<td class=\"section-cell\" rowspan=\"{}\">{}</td>",
                    section.subsections.len(),
                    escape(&section.title)
                );
            }
            let _ = write!(
                out,
                "<td class=\"subsection-cell\">{}</td>",
                escape(&sub.name)
            );
            for grade in Grade::ALL {
                let _ = write!(
                    out,
                    "<td class=\"grade-cell\" data-grade=\"{}\">",
                    escape(grade.label())
                );
                push_questions(out, sub, grade);
                out.push_str("</td>");
            }
            out.push_str("</tr>");
        }
    }
    out.push_str("\n</tbody>\n</table>");
}

fn push_questions(out: &mut String, sub: &Subsection, grade: Grade) {
    for q in sub.questions(grade) {
        out.push('\n');
        out.push_str(&question_link(q));
    }
}

/// Opens the detail modal via HTMX, or the detail page without JavaScript.
fn question_link(q: &Question) -> String {
    let text = escape(&q.question);
    match q.id {
        Some(id) => format!(
            r##"<a class="question" href="{ITEMS_PATH}/{id}" hx-get="{ITEMS_PATH}/{id}" hx-target="#modal" hx-swap="innerHTML">{text}</a>"##
        ),
        None => format!(r#"<span class="question">{text}</span>"#),
    }
}
