//! Page rendering with Tera.

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};
use serde::Serialize;
use tera::{Context, Tera};

use crate::interaction::{Answer, Interaction, InteractionState};
use crate::persona::Persona;

const INDEX_TEMPLATE: &str = "index.html";

/// Replacement target for links and images with a disallowed scheme.
const BLOCKED_URL: &str = "#";

/// Whether `url` is relative or uses `http`, `https` or `mailto`.
///
/// Whitespace and control characters are ignored when reading the scheme,
/// as browsers do.
fn is_safe_url(url: &str) -> bool {
    let cleaned: String = url
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect();
    let Some(colon) = cleaned.find(':') else {
        return true;
    };
    let scheme = &cleaned[..colon];
    // A colon after a path, query or fragment delimiter is not a scheme.
    if scheme.contains(&['/', '?', '#'][..]) {
        return true;
    }
    matches!(
        scheme.to_ascii_lowercase().as_str(),
        "http" | "https" | "mailto"
    )
}

/// Render model-written Markdown to HTML.
///
/// Raw HTML in the reply is shown as text rather than passed through, and
/// link or image targets with any other scheme than `http`, `https` or
/// `mailto` are replaced with `#`.
pub fn markdown_to_html(text: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
    let parser = Parser::new_ext(text, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link { link_type, dest_url, title, id }) if !is_safe_url(&dest_url) => {
            log::warn!("blocked link target in reply: {}", dest_url);
            Event::Start(Tag::Link {
                link_type,
                dest_url: CowStr::Borrowed(BLOCKED_URL),
                title,
                id,
            })
        }
        Event::Start(Tag::Image { link_type, dest_url, title, id }) if !is_safe_url(&dest_url) => {
            log::warn!("blocked image source in reply: {}", dest_url);
            Event::Start(Tag::Image {
                link_type,
                dest_url: CowStr::Borrowed(BLOCKED_URL),
                title,
                id,
            })
        }
        other => other,
    });

    let mut out = String::with_capacity(text.len() * 2);
    html::push_html(&mut out, parser);
    out
}

/// Answer block as the template sees it.
#[derive(Debug, Serialize)]
pub struct RenderedAnswer {
    pub heading: String,
    pub html: String,
}

impl From<&Answer> for RenderedAnswer {
    fn from(answer: &Answer) -> Self {
        Self {
            heading: answer.heading.clone(),
            html: markdown_to_html(&answer.answer),
        }
    }
}

/// Everything the page template needs.
#[derive(Debug, Serialize)]
pub struct PageView<'a> {
    pub personas: &'a [Persona],
    pub selected: &'a str,
    pub question: &'a str,
    pub warning: Option<String>,
    pub error: Option<String>,
    pub answer: Option<RenderedAnswer>,
}

impl<'a> PageView<'a> {
    /// View of `interaction` in its current state.
    pub fn from_interaction(personas: &'a [Persona], interaction: &'a Interaction) -> Self {
        let mut view = Self {
            personas,
            selected: interaction.selected_persona(),
            question: interaction.text(),
            warning: None,
            error: None,
            answer: None,
        };
        match interaction.state() {
            InteractionState::Rejected { warning } => view.warning = Some(warning.clone()),
            InteractionState::Displaying(answer) => view.answer = Some(answer.into()),
            _ => {}
        }
        view
    }

    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }
}

/// Compiled page templates, built once at startup.
#[derive(Debug)]
pub struct PageRenderer {
    tera: Tera,
}

impl PageRenderer {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_template(INDEX_TEMPLATE, include_str!("../../templates/index.html"))?;
        Ok(Self { tera })
    }

    pub fn render(&self, view: &PageView<'_>) -> Result<String, tera::Error> {
        let context = Context::from_serialize(view)?;
        self.tera.render(INDEX_TEMPLATE, &context)
    }
}
