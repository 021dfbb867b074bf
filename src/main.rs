use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use rainbow_parens::cli::CliArgs;
use rainbow_parens::config::HighlightConfig;
use rainbow_parens::liveness::{EditorHandle, ProjectHandle};
use rainbow_parens::markup::SharedMarkup;
use rainbow_parens::messages::Msg;
use rainbow_parens::model::{AppModel, Document, EditorSession};
use rainbow_parens::runtime::Runtime;
use rainbow_parens::view::render_ansi;

/// Upper bound on how long the initial full rescan may take
const HIGHLIGHT_TIMEOUT: Duration = Duration::from_secs(30);

fn main() -> Result<()> {
    rainbow_parens::tracing::init();

    let startup = CliArgs::parse()
        .into_config(HighlightConfig::load())
        .map_err(anyhow::Error::msg)?;

    let document = Document::from_file(startup.file.clone(), startup.config.brackets)
        .with_context(|| format!("Failed to read {}", startup.file.display()))?;

    let markup = SharedMarkup::new();
    let mut model = AppModel::new(startup.config);
    let id = model.next_session_id();
    model.insert_session(
        EditorSession::new(id, document, ProjectHandle::new(), EditorHandle::new())
            .with_markup(Box::new(markup.clone())),
    );

    let mut runtime = Runtime::new(model);
    runtime.dispatch(Msg::open(id));
    if !runtime.run_until_idle(HIGHLIGHT_TIMEOUT) {
        anyhow::bail!("Timed out highlighting {}", startup.file.display());
    }

    let text = runtime
        .model
        .session(id)
        .map(|session| session.document.buffer.to_string())
        .unwrap_or_default();
    let rendered = render_ansi(&text, &markup.lock().markers());

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    stdout.flush()?;

    runtime.dispatch(Msg::dispose(id));
    Ok(())
}
