//! Askama templates for HTML responses.

use askama::Template;
use askama_web::WebTemplate;

use crate::config::PreviewConfig;
use crate::domain::entities::Link;

/// Link-preview document served to crawlers.
///
/// Renders `templates/preview.html` with Open Graph and Twitter card
/// metadata. Missing link fields fall back to [`PreviewConfig`] values.
#[derive(Template, WebTemplate)]
#[template(path = "preview.html")]
pub struct PreviewTemplate {
    pub title: String,
    pub description: String,
    pub image: String,
    /// Canonical URL of the short link.
    pub url: String,
    pub site_name: String,
}

impl PreviewTemplate {
    pub fn for_link(link: &Link, url: String, preview: &PreviewConfig) -> Self {
        fn pick(field: &Option<String>, fallback: &str) -> String {
            field
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .unwrap_or(fallback)
                .to_string()
        }

        Self {
            title: pick(&link.title, &preview.default_title),
            description: pick(&link.description, &preview.default_description),
            image: pick(&link.image, &preview.default_image),
            url,
            site_name: preview.site_name.clone(),
        }
    }
}

/// Client-side navigation document that sends no referrer.
///
/// Renders `templates/navigate.html`. `target_js` is emitted raw inside a
/// `<script>` element and must come from [`js_string_literal`].
#[derive(Template, WebTemplate)]
#[template(path = "navigate.html")]
pub struct NavigateTemplate {
    pub title: String,
    pub target: String,
    pub target_js: String,
}

impl NavigateTemplate {
    pub fn new(title: impl Into<String>, target: impl Into<String>) -> Self {
        let target = target.into();
        Self {
            title: title.into(),
            target_js: js_string_literal(&target),
            target,
        }
    }
}

/// Encodes `value` as a JavaScript string literal safe to inline in HTML.
///
/// `<`, `>` and `&` are escaped so the literal can never close the
/// surrounding `<script>` element.
pub fn js_string_literal(value: &str) -> String {
    serde_json::Value::String(value.to_string())
        .to_string()
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}
