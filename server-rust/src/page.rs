use crate::joke::JokeBody;
use tera::{Context, Tera};

const INDEX_TEMPLATE: &str = "index.html";

/// Page templates, compiled once at startup. Templates are named `*.html`
/// so Tera escapes every interpolated value.
pub struct Pages {
    tera: Tera,
}

impl Pages {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_template(INDEX_TEMPLATE, include_str!("../templates/index.html"))?;
        Ok(Self { tera })
    }

    /// The index page, with the joke and history sections when `body` is set.
    pub fn index(&self, body: Option<&JokeBody>) -> Result<String, tera::Error> {
        let mut context = Context::new();
        context.insert("has_joke", &body.is_some());
        context.insert("joke", body.map_or("", |body| body.joke.text()));

        let history = body.and_then(|body| body.history.as_ref());
        context.insert("show_history", &history.is_some());
        context.insert("history", history.map_or(&[][..], Vec::as_slice));

        self.tera.render(INDEX_TEMPLATE, &context)
    }
}
