// UI layer: runs each API call behind a spinner and prints the outcome in
// a human-readable form. Failures never propagate from here: a listing
// that fails is reported and comes back empty, a creation that fails is
// reported and comes back as `None`.
//
// Output goes through a `Console` wrapping any `Write`, so the flows can be
// checked in tests; the binary hands in stdout and colours only a terminal.

use crate::api::{json_text, ApiClient, ArticleRequest, ArticleResponse, Author, Category};
use crate::error::ApiError;
use crossterm::style::{Color, Stylize};
use crossterm::tty::IsTty;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::time::Duration;

const RULE_WIDTH: usize = 60;

/// Report sink. Status lines are coloured only when `colour` is set.
pub struct Console<W> {
    out: W,
    colour: bool,
}

impl<W: Write> Console<W> {
    pub fn new(out: W, colour: bool) -> Self {
        Console { out, colour }
    }

    /// A console that never emits escape codes.
    pub fn plain(out: W) -> Self {
        Console::new(out, false)
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, text: &str, colour: Color) -> String {
        if self.colour {
            text.with(colour).to_string()
        } else {
            text.to_string()
        }
    }
}

impl Console<io::StdoutLock<'static>> {
    /// Locked stdout, coloured when it is a terminal and `NO_COLOR` is unset.
    pub fn stdout() -> Self {
        let stdout = io::stdout();
        let colour = stdout.is_tty() && std::env::var_os("NO_COLOR").is_none();
        Console::new(stdout.lock(), colour)
    }
}

impl<W: Write> Write for Console<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.out.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// Show a spinner on stderr while `f` runs. The spinner is cleared before
/// returning so it never interleaves with the report.
fn with_spinner<T>(message: &str, f: impl FnOnce() -> T) -> T {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    let result = f();
    spinner.finish_and_clear();
    result
}

/// Fetch and print the categories as `[id] name (slug)`.
pub fn get_categories<W: Write>(api: &ApiClient, out: &mut Console<W>) -> io::Result<Vec<Category>> {
    writeln!(out, "📋 Fetching categories...")?;
    match with_spinner("Fetching categories...", || api.list_categories()) {
        Ok(categories) => {
            writeln!(out, "\nAvailable categories:")?;
            for cat in &categories {
                writeln!(out, "  - [{}] {} ({})", cat.id, cat.name, cat.slug)?;
            }
            Ok(categories)
        }
        Err(e) => {
            write_listing_error(out, &e)?;
            Ok(Vec::new())
        }
    }
}

/// Fetch and print the authors as `[id] name <email>`.
pub fn get_authors<W: Write>(api: &ApiClient, out: &mut Console<W>) -> io::Result<Vec<Author>> {
    writeln!(out, "👤 Fetching authors...")?;
    match with_spinner("Fetching authors...", || api.list_authors()) {
        Ok(authors) => {
            writeln!(out, "\nAvailable authors:")?;
            for author in &authors {
                let id = json_text(&author.id);
                match &author.email {
                    Some(email) => writeln!(out, "  - [{}] {} <{}>", id, author.name, email)?,
                    None => writeln!(out, "  - [{}] {}", id, author.name)?,
                }
            }
            Ok(authors)
        }
        Err(e) => {
            write_listing_error(out, &e)?;
            Ok(Vec::new())
        }
    }
}

fn write_listing_error<W: Write>(out: &mut Console<W>, err: &ApiError) -> io::Result<()> {
    let label = out.paint("❌ Error:", Color::Red);
    match err {
        ApiError::Status { status } => writeln!(out, "{} {}", label, status),
        other => writeln!(out, "{} {}", label, other),
    }
}

/// Submit `req` and print either the created article or the failure.
pub fn create_article<W: Write>(
    api: &ApiClient,
    req: &ArticleRequest,
    out: &mut Console<W>,
) -> io::Result<Option<ArticleResponse>> {
    writeln!(out, "\n✍️  Creating the article...")?;
    let result = with_spinner("Publishing...", || api.create_article(req));

    match result {
        Ok(article) => {
            writeln!(out, "\n📊 HTTP status: 201")?;
            write_article(out, &article, api.base_url())?;
            Ok(Some(article))
        }
        Err(e) => {
            if let Some(status) = e.status() {
                writeln!(out, "\n📊 HTTP status: {}", status)?;
            }
            write_creation_error(out, &e)?;
            Ok(None)
        }
    }
}

fn write_article<W: Write>(out: &mut Console<W>, article: &ArticleResponse, base_url: &str) -> io::Result<()> {
    let headline = out.paint("✅ Article created successfully!", Color::Green);
    writeln!(out, "\n{}", headline)?;
    writeln!(out, "   ID: {}", json_text(&article.id))?;
    writeln!(out, "   Title: {}", article.title)?;
    writeln!(out, "   Slug: {}", article.slug)?;
    writeln!(out, "   Status: {}", article.status.as_str())?;
    match article.reading_time {
        Some(minutes) => writeln!(out, "   Reading time: {} min", minutes)?,
        None => writeln!(out, "   Reading time: N/A min")?,
    }

    if article.article_categories.as_ref().is_some_and(|acs| !acs.is_empty()) {
        writeln!(out, "   Categories:")?;
        for name in article.category_names() {
            writeln!(out, "     - {}", name)?;
        }
    }

    if article.source_count() > 0 {
        writeln!(out, "   Sources: {} source(s)", article.source_count())?;
    }

    writeln!(out, "\n🌐 Article URL: {}", article.display_url(base_url))
}

fn write_creation_error<W: Write>(out: &mut Console<W>, err: &ApiError) -> io::Result<()> {
    if let ApiError::CreatedUnreadable { source } = err {
        let headline = out.paint("⚠️  Article created, but the response body is unreadable", Color::Yellow);
        writeln!(out, "\n{}", headline)?;
        return writeln!(out, "   Reason: {}", source);
    }

    let headline = out.paint("❌ Error while creating the article", Color::Red);
    writeln!(out, "\n{}", headline)?;
    match err {
        ApiError::Rejected { message, details, .. } => {
            writeln!(out, "   Message: {}", message)?;
            if let Some(details) = details {
                writeln!(out, "   Details: {}", json_text(details))?;
            }
            Ok(())
        }
        ApiError::RawBody { body, .. } => writeln!(out, "   Raw response: {}", body),
        other => writeln!(out, "   Message: {}", other),
    }
}

/// The demo: list categories, then publish the sample article. Returns
/// whether the article was created and read back.
pub fn run<W: Write>(api: &ApiClient, article: &ArticleRequest, out: &mut Console<W>) -> io::Result<bool> {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(out, "{}", rule)?;
    writeln!(out, "🚀 Creating an article through the GeeksPatrol API")?;
    writeln!(out, "{}", rule)?;

    let categories = get_categories(api, out)?;
    if categories.is_empty() {
        let line = out.paint("❌ Unable to fetch categories. Check your API.", Color::Red);
        writeln!(out, "\n{}", line)?;
        return Ok(false);
    }

    let created = create_article(api, article, out)?.is_some();
    let line = if created {
        out.paint("✨ Done, everything went fine!", Color::Green)
    } else {
        out.paint("❌ Article creation failed", Color::Red)
    };
    writeln!(out, "\n{}", line)?;
    writeln!(out, "{}", rule)?;
    Ok(created)
}
