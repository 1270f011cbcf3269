use std::io::{self, Write};

use concierge::client::{ConversationView, PresetConversation, SuggestedAction};
use concierge::orchestrator::TextStream;
use concierge::view::View;
use concierge::ConciergeError;

/// Prints the result of one turn. A failed turn is reported and the
/// session continues.
pub async fn print_turn(
    view: &ConversationView,
    result: Result<View, ConciergeError>,
) -> anyhow::Result<()> {
    match result {
        Ok(turn) => print_view(turn).await?,
        Err(err) => {
            log::warn!("turn failed: {err}");
            eprintln!("error: {err}");
        }
    }
    log::debug!("history holds {} items", view.history().len());
    Ok(())
}

pub async fn print_view(view: View) -> anyhow::Result<()> {
    match view {
        View::Text(stream) => print_stream(stream).await,
        other => {
            let mut out = io::stdout().lock();
            writeln!(out, "[{}]", other.kind())?;
            write!(out, "{}", other.render_text())?;
            out.flush()?;
            Ok(())
        }
    }
}

async fn print_stream(mut stream: TextStream) -> anyhow::Result<()> {
    let mut printed = 0;
    let initial = stream.current();
    printed += write_suffix(&initial, printed)?;
    while let Some(text) = stream.next_update().await {
        printed += write_suffix(&text, printed)?;
    }
    match stream.finished().await {
        Ok(text) => {
            write_suffix(&text, printed)?;
            println!();
        }
        Err(err) => {
            println!();
            eprintln!("error: {err}");
        }
    }
    Ok(())
}

fn write_suffix(text: &str, printed: usize) -> io::Result<usize> {
    let Some(suffix) = text.get(printed..) else {
        return Ok(0);
    };
    let mut out = io::stdout().lock();
    out.write_all(suffix.as_bytes())?;
    out.flush()?;
    Ok(suffix.len())
}

pub fn print_suggestions(out: &mut impl Write, suggestions: &[SuggestedAction]) -> io::Result<()> {
    if suggestions.is_empty() {
        return Ok(());
    }
    writeln!(out)?;
    for (i, suggestion) in suggestions.iter().enumerate() {
        writeln!(out, "  {}. {} {}", i + 1, suggestion.title, suggestion.label)?;
    }
    Ok(())
}

pub fn print_presets(out: &mut impl Write, presets: &[PresetConversation]) -> io::Result<()> {
    for (i, preset) in presets.iter().enumerate() {
        writeln!(out, "{}. {} {}", i + 1, preset.title, preset.label)?;
        writeln!(out, "   {}", preset.opening_message())?;
    }
    Ok(())
}
