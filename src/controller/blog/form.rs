use crate::entities::{Audience, BlogForm, GeneratedBlog};
use crate::error::{AppError, Result};
use crate::routes::AppState;
use actix_web::{get, http::header::ContentType, post, web, HttpResponse};
use minijinja::Environment;
use serde::Serialize;
use std::sync::OnceLock;

const PAGE_TEMPLATE: &str = "index.html";

fn templates() -> Result<&'static Environment<'static>> {
    static ENV: OnceLock<Environment<'static>> = OnceLock::new();
    if let Some(env) = ENV.get() {
        return Ok(env);
    }
    let mut env = Environment::new();
    env.add_template(PAGE_TEMPLATE, include_str!("../../../templates/index.html"))?;
    Ok(ENV.get_or_init(|| env))
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Warning,
    Error,
    Success,
}

#[derive(Debug, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

#[derive(Debug, Serialize)]
struct Labels {
    title: String,
    welcome: String,
    sidebar: String,
    topic: String,
    word_count: String,
    audience: String,
    generate: String,
    generate_help: String,
    generated: String,
    actual_word_count: String,
}

impl Labels {
    fn localized() -> Self {
        Self {
            title: t!("page.title").to_string(),
            welcome: t!("page.welcome").to_string(),
            sidebar: t!("form.sidebar").to_string(),
            topic: t!("form.topic").to_string(),
            word_count: t!("form.word_count").to_string(),
            audience: t!("form.audience").to_string(),
            generate: t!("form.generate").to_string(),
            generate_help: t!("form.generate_help").to_string(),
            generated: t!("form.generated").to_string(),
            actual_word_count: t!("form.actual_word_count").to_string(),
        }
    }
}

/// Everything the page template renders.
#[derive(Debug, Serialize)]
pub struct PageView {
    lang: String,
    labels: Labels,
    footer: String,
    background_css: Option<String>,
    audiences: Vec<String>,
    selected_audience: String,
    form: BlogForm,
    notice: Option<Notice>,
    content: Option<String>,
    word_count: Option<usize>,
}

impl PageView {
    pub fn new(state: &AppState, form: BlogForm) -> Self {
        let selected_audience = form
            .audience
            .parse::<Audience>()
            .unwrap_or_default()
            .label();
        Self {
            lang: rust_i18n::locale().to_string(),
            labels: Labels::localized(),
            footer: state.config.ui.footer.clone(),
            background_css: state.background.as_ref().map(|image| image.css()),
            audiences: Audience::ALL.iter().map(Audience::label).collect(),
            selected_audience,
            form,
            notice: None,
            content: None,
            word_count: None,
        }
    }

    pub fn with_notice(mut self, kind: NoticeKind, message: impl Into<String>) -> Self {
        self.notice = Some(Notice { kind, message: message.into() });
        self
    }

    pub fn with_blog(mut self, blog: GeneratedBlog) -> Self {
        self.content = Some(blog.content);
        self.word_count = Some(blog.word_count);
        self
    }

    pub fn render(&self) -> Result<String> {
        Ok(templates()?.get_template(PAGE_TEMPLATE)?.render(self)?)
    }
}

fn page(view: &PageView) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().content_type(ContentType::html()).body(view.render()?))
}

#[get("/")]
pub async fn index(state: web::Data<AppState>) -> Result<HttpResponse> {
    page(&PageView::new(&state, BlogForm::default()))
}

/// Form submission. Every failure is reported inside the page, including
/// bodies the form extractor rejects.
#[post("/generate")]
pub async fn generate(
    state: web::Data<AppState>,
    form: std::result::Result<web::Form<BlogForm>, actix_web::Error>,
) -> Result<HttpResponse> {
    let form = match form {
        Ok(form) => form.into_inner(),
        Err(e) => {
            log::warn!("Rejected form submission: {}", e);
            let view = PageView::new(&state, BlogForm::default());
            let message = t!("form.error", error = e.to_string());
            return page(&view.with_notice(NoticeKind::Error, message));
        }
    };
    let view = PageView::new(&state, form.clone());

    if form.is_incomplete() {
        log::warn!("Form submitted without topic or word count");
        return page(&view.with_notice(NoticeKind::Warning, t!("form.missing_fields")));
    }

    let view = match state.blog.generate_from_form(&form).await {
        Ok(blog) => view.with_notice(NoticeKind::Success, t!("form.success")).with_blog(blog),
        Err(e) => {
            log::error!("Blog generation failed: {}", e);
            view.with_notice(NoticeKind::Error, t!("form.error", error = display_error(&e)))
        }
    };
    page(&view)
}

fn display_error(error: &AppError) -> String {
    match error {
        AppError::Validation(details) => details.message.clone(),
        other => other.to_string(),
    }
}
