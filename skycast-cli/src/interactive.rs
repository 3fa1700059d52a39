//! The interactive widget loop: one search up front, then an action menu
//! until the user quits or cancels out.

use anyhow::Result;
use inquire::{InquireError, Select, Text};

use skycast_core::config::Config;

use crate::{cli, render};

const NEW_SEARCH: &str = "New search";
const USE_LOCATION: &str = "Use home position";
const SELECT_DAY: &str = "Inspect a forecast day";
const CLEAR_DAY: &str = "Clear day selection";
const TOGGLE_UNITS: &str = "Toggle units";
const SWITCH_CLOCK: &str = "Switch clock style";
const QUIT: &str = "Quit";

pub async fn run() -> Result<()> {
    let config = Config::load()?;
    let mut widget = cli::build_widget(&config)?;
    let mut clock = config.clock;

    match search_prompt(widget.recent_searches()) {
        Ok(query) => widget.search(&query).await,
        Err(err) if cancelled(&err) => return Ok(()),
        Err(err) => return Err(err.into()),
    }
    render::print_view(&widget.view(clock));

    loop {
        let options = vec![
            NEW_SEARCH,
            USE_LOCATION,
            SELECT_DAY,
            CLEAR_DAY,
            TOGGLE_UNITS,
            SWITCH_CLOCK,
            QUIT,
        ];
        let action = match Select::new("Action:", options).prompt() {
            Ok(action) => action,
            Err(err) if cancelled(&err) => break,
            Err(err) => return Err(err.into()),
        };

        match action {
            NEW_SEARCH => match search_prompt(widget.recent_searches()) {
                Ok(query) => widget.search(&query).await,
                Err(err) if cancelled(&err) => continue,
                Err(err) => return Err(err.into()),
            },
            USE_LOCATION => {
                let source = cli::home_source(&config);
                widget.locate(&source).await;
            }
            SELECT_DAY => {
                let labels: Vec<String> = widget
                    .view(clock)
                    .daily
                    .iter()
                    .map(|day| {
                        format!("{} {}  {}° / {}°", day.day_name, day.date, day.high, day.low)
                    })
                    .collect();
                if labels.is_empty() {
                    println!("No forecast days to inspect.");
                    continue;
                }
                match Select::new("Day:", labels).raw_prompt() {
                    Ok(choice) => widget.select_day(choice.index),
                    Err(err) if cancelled(&err) => continue,
                    Err(err) => return Err(err.into()),
                }
            }
            CLEAR_DAY => widget.clear_selection(),
            TOGGLE_UNITS => widget.toggle_units(),
            SWITCH_CLOCK => clock = clock.flipped(),
            QUIT => break,
            _ => unreachable!("unknown menu entry"),
        }
        render::print_view(&widget.view(clock));
    }

    Ok(())
}

fn search_prompt(recent: &[String]) -> Result<String, InquireError> {
    let help;
    let mut prompt = Text::new("Search city:");
    if !recent.is_empty() {
        help = format!("Recent: {}", recent.join(", "));
        prompt = prompt.with_help_message(&help);
    }
    prompt.prompt()
}

fn cancelled(err: &InquireError) -> bool {
    matches!(err, InquireError::OperationCanceled | InquireError::OperationInterrupted)
}
