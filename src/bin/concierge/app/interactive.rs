use std::io::{self, Write};

use tokio::io::{AsyncBufReadExt, BufReader};

use concierge::client::ConversationView;

use super::render;

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Quit,
    Presets,
    Suggestion(usize),
    Message(String),
    Empty,
}

fn parse_command(line: &str, suggestions: usize) -> Command {
    let line = line.trim();
    match line {
        "" => Command::Empty,
        "/quit" | "/exit" => Command::Quit,
        "/presets" => Command::Presets,
        _ => match line.parse::<usize>() {
            Ok(n) if (1..=suggestions).contains(&n) => Command::Suggestion(n - 1),
            _ => Command::Message(line.to_string()),
        },
    }
}

/// Line loop over stdin. Each turn is awaited before the next line is read.
pub async fn run(view: &mut ConversationView) -> anyhow::Result<()> {
    {
        let mut out = io::stdout().lock();
        writeln!(
            out,
            "Land Rover concierge. Type a message, a suggestion number, /presets or /quit."
        )?;
        render::print_suggestions(&mut out, view.suggestions())?;
    }
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let result = match parse_command(&line, view.suggestions().len()) {
            Command::Empty => continue,
            Command::Quit => break,
            Command::Presets => {
                let mut out = io::stdout().lock();
                render::print_presets(&mut out, view.presets())?;
                continue;
            }
            Command::Suggestion(index) => view.select_suggestion(index).await,
            Command::Message(text) => view.submit(&text).await,
        };
        render::print_turn(view, result).await?;
        render::print_suggestions(&mut io::stdout().lock(), view.suggestions())?;
    }
    log::info!("session ended after {} items", view.history().len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("", 4, Command::Empty)]
    #[case("  /quit ", 4, Command::Quit)]
    #[case("/presets", 0, Command::Presets)]
    #[case("2", 4, Command::Suggestion(1))]
    #[case("5", 4, Command::Message("5".to_string()))]
    #[case("0", 4, Command::Message("0".to_string()))]
    #[case("show me the Velar", 4, Command::Message("show me the Velar".to_string()))]
    fn parses_lines(#[case] line: &str, #[case] suggestions: usize, #[case] expected: Command) {
        assert_eq!(parse_command(line, suggestions), expected);
    }
}
