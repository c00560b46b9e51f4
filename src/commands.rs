use crate::cli::Args;
use chrono::NaiveDate;
use matchday::config::Config;
use matchday::data_fetcher::api::{HomeData, ResultsSource, load_home_data};
use matchday::data_fetcher::models::{
    BracketRound, DataCategory, Match, PartialReconciliation, TableRow, Team,
};
use matchday::data_fetcher::processors::{KnockoutTie, format_kickoff};
use matchday::error::AppError;
use matchday::leagues::{
    LeagueOption, available_group_keys, build_league_options, normalize_league_entries,
};
use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::Path;
use tracing::info;

/// Handles the --list-config command.
pub fn handle_list_config_command(config: &Config, config_path: &Path) {
    println!("{}", config.describe(config_path));
}

/// Handles the --list-leagues command.
///
/// Prints every supported competition found in the league listing with its seasons.
pub async fn handle_list_leagues_command<S: ResultsSource>(
    source: &S,
    json: bool,
) -> Result<(), AppError> {
    let entries = source.fetch_available_leagues().await?;
    let grouped = normalize_league_entries(&entries);
    let available = available_group_keys(&grouped);
    let options = build_league_options(&available, &grouped, &HashMap::new());

    if json {
        println!("{}", serde_json::to_string_pretty(&options)?);
    } else {
        print!("{}", render_league_options(&options));
    }
    Ok(())
}

/// Loads and prints the home view.
///
/// When the current round is missing, whatever was gathered before the
/// failure is printed and the error is returned.
pub async fn handle_home_command<S: ResultsSource>(
    source: &S,
    args: &Args,
    today: NaiveDate,
) -> Result<(), AppError> {
    let result = load_home_data(
        source,
        args.league.as_deref(),
        args.season.as_deref(),
        today,
    )
    .await;

    match result {
        Ok(home) => {
            info!(
                "Showing {} with {} failed categories",
                home.label,
                home.reconciliation.visible_errors.len()
            );
            if args.json {
                println!("{}", serde_json::to_string_pretty(&home)?);
            } else {
                print!("{}", render_home(&home));
            }
            Ok(())
        }
        Err(AppError::CurrentRoundMissing { shortcut, partial }) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&partial)?);
            } else {
                print!("{}", render_partial(&partial));
            }
            Err(AppError::CurrentRoundMissing { shortcut, partial })
        }
        Err(e) => Err(e),
    }
}

fn team_name(team: Option<&Team>) -> &str {
    team.and_then(|t| t.team_name.as_deref()).unwrap_or("TBD")
}

fn render_match(out: &mut String, game: &Match) {
    let home = team_name(game.team1.as_ref());
    let away = team_name(game.team2.as_ref());
    let score = game
        .final_result()
        .map(|result| {
            format!(
                "{}-{}",
                result.points_team1.unwrap_or(0),
                result.points_team2.unwrap_or(0)
            )
        })
        .unwrap_or_else(|| format_kickoff(game.kickoff_raw()));
    let status = if game.is_finished() { "" } else { " *" };
    let _ = writeln!(out, "  {home:<28} {score:^19} {away}{status}");
}

fn render_table(out: &mut String, table: &[TableRow]) {
    if table.is_empty() {
        return;
    }
    let _ = writeln!(out, "\nTable");
    for (position, row) in table.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {:>2}. {:<28} {:>3} {:>4}",
            position + 1,
            row.team_name.as_deref().unwrap_or("?"),
            row.matches.unwrap_or(0),
            row.points.unwrap_or(0)
        );
    }
}

fn render_tie(out: &mut String, tie: &KnockoutTie) {
    let aggregate = tie
        .aggregate_score
        .as_ref()
        .map(|score| format!("{}-{}", score.team1, score.team2))
        .unwrap_or_else(|| "-".to_string());
    let _ = writeln!(
        out,
        "  {:<28} {:^7} {} ({} legs)",
        tie.team1.team_name,
        aggregate,
        tie.team2.team_name,
        tie.matches.len()
    );
}

fn render_bracket(out: &mut String, bracket: &[BracketRound]) {
    for round in bracket {
        let _ = writeln!(
            out,
            "\n{}",
            round.group.group_name.as_deref().unwrap_or("Knockout round")
        );
        if round.ties.is_empty() {
            let _ = writeln!(out, "  No matches");
        }
        for tie in &round.ties {
            render_tie(out, tie);
        }
    }
}

fn render_errors(out: &mut String, errors: &[DataCategory]) {
    if errors.is_empty() {
        return;
    }
    let labels: Vec<&str> = errors.iter().map(|category| category.label()).collect();
    let _ = writeln!(out, "\nCould not load: {}", labels.join(", "));
}

/// Plain-text rendering of the home view.
pub fn render_home(home: &HomeData) -> String {
    let view = &home.reconciliation;
    let mut out = String::new();

    let _ = writeln!(out, "{}", home.label);
    let _ = writeln!(out, "\n{}", view.current_round.name);
    if view.current_round.matches.is_empty() {
        let _ = writeln!(out, "  No matches");
    }
    for game in &view.current_round.matches {
        render_match(&mut out, game);
    }

    if let Some(next) = &view.next_round {
        let _ = writeln!(out, "\n{}", next.name);
        for game in &next.matches {
            render_match(&mut out, game);
        }
    }

    render_bracket(&mut out, &view.bracket);
    render_table(&mut out, &view.table);
    render_errors(&mut out, &view.visible_errors);
    out
}

/// Plain-text rendering of the data gathered before a fatal failure.
pub fn render_partial(partial: &PartialReconciliation) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "The current round is not available.");
    if !partial.playoff_matches.is_empty() {
        let _ = writeln!(out, "\nPlayoffs");
        for game in &partial.playoff_matches {
            render_match(&mut out, game);
        }
    }
    render_table(&mut out, &partial.table);
    render_errors(&mut out, &partial.visible_errors);
    out
}

pub fn render_league_options(options: &[LeagueOption]) -> String {
    let mut out = String::new();
    for option in options {
        let seasons: Vec<String> = option.seasons.iter().map(i32::to_string).collect();
        let _ = writeln!(
            out,
            "{:<6} {:<40} {}",
            option.shortcut,
            option.label,
            seasons.join(", ")
        );
    }
    out
}
