use std::fmt::Write;

use crate::models::catalog::ItemDetail;
use crate::render::html::{escape, is_safe_url};
use crate::render::markdown::markdown_to_html;

const CLOSE_BUTTON: &str = r#"<button class="modal-close" type="button" aria-label="Закрыть" onclick="this.closest('.modal').remove()">×</button>"#;

/// Question detail dialog: question, answers, resources and where it lives.
/// Answers and resource notes are Markdown.
pub fn render_item_detail(item: &ItemDetail) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<div class="modal" role="dialog" aria-modal="true" data-item-id="{id}">
<div class="modal-content">
<header><h2>Детали вопроса</h2>{CLOSE_BUTTON}</header>
<section class="detail-question">
<h3>Вопрос:</h3>
<p>{question}</p>
</section>"#,
        id = item.id,
        question = escape(&item.question),
    );

    if let Some(answer) = item.answer.as_deref() {
        let _ = write!(
            out,
            "\n<section class=\"detail-answer\">\n<h3>Ответ:</h3>\n<div class=\"markdown\">{}</div>\n</section>",
            markdown_to_html(answer)
        );
    }

    if let Some(expected) = item.interview_expected_answer.as_deref() {
        let _ = write!(
            out,
            "\n<section class=\"detail-expected\">\n<h3>Ожидаемый ответ:</h3>\n<div class=\"markdown\">{}</div>\n</section>",
            markdown_to_html(expected)
        );
    }

    if !item.resources.is_empty() {
        out.push_str("\n<section class=\"detail-resources\">\n<h3>Ресурсы:</h3>\n<ul>");
        for resource in &item.resources {
            let label = escape(resource.label());
            if is_safe_url(&resource.url) {
                let _ = write!(
                    out,
                    "\n<li><a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{label}</a>",
                    escape(&resource.url),
                );
            } else {
                let _ = write!(out, "\n<li><span class=\"resource-link\">{label}</span>");
            }
            if let Some(context) = resource.context.as_deref() {
                let _ = write!(
                    out,
                    "<div class=\"resource-context markdown\">{}</div>",
                    markdown_to_html(context)
                );
            }
            out.push_str("</li>");
        }
        out.push_str("\n</ul>\n</section>");
    }

    let location: Vec<&str> = [
        item.sheet.as_str(),
        item.section.as_str(),
        item.subsection.as_str(),
        item.grade.as_str(),
    ]
    .into_iter()
    .filter(|s| !s.is_empty())
    .collect();
    if !location.is_empty() {
        let _ = write!(
            out,
            "\n<footer class=\"modal-meta\">{}</footer>",
            escape(&location.join(" · "))
        );
    }

    out.push_str("\n</div>\n</div>");
    out
}

pub fn render_item_not_found() -> String {
    format!(
        r#"<div class="modal" role="dialog" aria-modal="true">
<div class="modal-content">
<header><h2>Вопрос не найден</h2>{CLOSE_BUTTON}</header>
<p class="notice">Этот вопрос не существует или ещё не опубликован.</p>
</div>
</div>"#
    )
}
