use anyhow::{Context, Result};
use log::debug;
use regex::Regex;
use std::collections::HashSet;

use super::format::TournamentFormat;
use super::templates::{Template, scan_templates};

const ID_PARAM: &str = "id";

/// Pulls bracket identifiers out of Matchlist/Bracket templates
pub struct BracketIdExtractor {
    format_section_regex: Regex,
    html_comment_regex: Regex,
}

impl BracketIdExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            format_section_regex: Self::compile_format_regex()?,
            html_comment_regex: Self::compile_comment_regex()?,
        })
    }

    /// Detect the stage format from the `== Format ==` section
    pub fn detect_format(&self, wikitext: &str) -> TournamentFormat {
        self.format_section_regex
            .captures(wikitext)
            .and_then(|captures| captures.get(1))
            .map(|section| TournamentFormat::from_section(section.as_str()))
            .unwrap_or(TournamentFormat::Unknown)
    }

    /// Bracket ids for the page's detected format, in page order, deduplicated
    pub fn extract_bracket_ids(&self, wikitext: &str) -> Vec<String> {
        let format = self.detect_format(wikitext);
        self.extract_for_format(wikitext, format)
    }

    pub fn extract_for_format(&self, wikitext: &str, format: TournamentFormat) -> Vec<String> {
        let text = self.strip_comments(wikitext);
        let wanted = format.template_names();

        let mut seen = HashSet::new();
        let mut ids = Vec::new();

        for template in scan_templates(&text) {
            if !Self::is_wanted(&template, wanted) {
                continue;
            }

            match Self::read_id(&template) {
                Some(id) => {
                    if seen.insert(id.clone()) {
                        ids.push(id);
                    }
                }
                None => debug!("{} template without an id parameter", template.name),
            }
        }

        ids
    }

    // --- Construction Helpers ---

    fn compile_format_regex() -> Result<Regex> {
        Regex::new(r"(?s)==\s*Format\s*==\s*(.*)").context("Failed to compile format section regex")
    }

    fn compile_comment_regex() -> Result<Regex> {
        Regex::new(r"(?s)<!--.*?-->").context("Failed to compile HTML comment regex")
    }

    // --- Template Helpers ---

    fn strip_comments(&self, text: &str) -> String {
        self.html_comment_regex.replace_all(text, "").into_owned()
    }

    fn is_wanted(template: &Template, wanted: &[&str]) -> bool {
        wanted.iter().any(|name| template.name_matches(name))
    }

    fn read_id(template: &Template) -> Option<String> {
        let id = template.get(ID_PARAM)?.trim();
        if id.is_empty() {
            None
        } else {
            Some(id.to_string())
        }
    }
}
