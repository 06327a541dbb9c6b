//! One-shot query: fetch, rank and print

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use typeahead_core::{CandidateId, CandidateSource, DisplayEntry, DisplayList, Outcome, Pipeline};

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Query text; leave empty for the popularity-ranked browse view
    #[arg(default_value = "")]
    pub text: String,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct JsonEntry<'a> {
    key: String,
    id: Option<&'a CandidateId>,
    name: &'a str,
    popularity: f64,
    annotation: Option<&'a str>,
    top: bool,
}

impl<'a> From<&'a DisplayEntry> for JsonEntry<'a> {
    fn from(entry: &'a DisplayEntry) -> Self {
        Self {
            key: entry.key.to_string(),
            id: entry.candidate.id.as_ref(),
            name: &entry.candidate.name,
            popularity: entry.candidate.popularity,
            annotation: entry.candidate.annotation(),
            top: entry.is_top,
        }
    }
}

pub fn execute<S: CandidateSource>(args: QueryArgs, source: S) -> Result<()> {
    let mut pipeline = Pipeline::new(source);
    pipeline.submit(&args.text);

    while let Some(outcome) = pipeline.wait() {
        if let Outcome::Failed { seq } = outcome {
            log::debug!("Query seq {} produced no results", seq);
        }
    }

    let display = pipeline.display();
    if args.json {
        println!("{}", render_json(display)?);
    } else {
        for line in render_lines(display) {
            println!("{}", line);
        }
    }
    Ok(())
}

pub fn render_json(display: &DisplayList) -> Result<String> {
    let entries: Vec<JsonEntry> = display.entries().iter().map(JsonEntry::from).collect();
    Ok(serde_json::to_string_pretty(&entries)?)
}

/// One line per entry in list-model order, top candidate last and starred
pub fn render_lines(display: &DisplayList) -> Vec<String> {
    display
        .entries()
        .iter()
        .map(|entry| {
            let marker = if entry.is_top {
                "★".yellow().to_string()
            } else {
                " ".to_string()
            };
            let annotation = entry
                .candidate
                .annotation()
                .map(|a| format!(" · {}", a).dimmed().to_string())
                .unwrap_or_default();
            format!("{} {}{}", marker, entry.candidate.name.bold(), annotation)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use typeahead_core::{Candidate, Session};

    fn display_for(candidates: Vec<Candidate>) -> DisplayList {
        let mut session = Session::new();
        let ticket = session.begin("");
        session.accept(ticket.seq, candidates).unwrap().clone()
    }

    #[test]
    fn test_render_lines() {
        colored::control::set_override(false);
        let display = display_for(vec![
            Candidate::new(1, "Chess", 5.0),
            Candidate::new(2, "art", 9.0),
            Candidate::new(3, "Music [genre]", 2.0),
        ]);
        let lines = render_lines(&display);
        assert_eq!(lines, ["  Chess", "  Music [genre] · genre", "★ art"]);
    }

    #[test]
    fn test_render_json() {
        let display = display_for(vec![
            Candidate::new(1, "Chess", 5.0),
            Candidate::new(2, "art [craft]", 9.0),
        ]);
        let value: serde_json::Value = serde_json::from_str(&render_json(&display).unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                {"key": "id:1", "id": 1, "name": "Chess", "popularity": 5.0, "annotation": null, "top": false},
                {"key": "id:2", "id": 2, "name": "art [craft]", "popularity": 9.0, "annotation": "craft", "top": true}
            ])
        );
    }

    #[test]
    fn test_render_empty() {
        let display = DisplayList::default();
        assert!(render_lines(&display).is_empty());
        assert_eq!(render_json(&display).unwrap(), "[]");
    }
}
