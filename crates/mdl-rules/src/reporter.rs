//! Report Generation
//!
//! Renders the enabled-rule listing and violation reports:
//! - plain text, one `path:line: id description` per violation
//! - JSON array for tooling

use mdl_domain::constants::LISTING_HEADER;
use mdl_domain::{ResolvedRuleSet, RuleCatalog};
use serde::Serialize;

use crate::checker::Violation;

/// JSON shape of one violation
#[derive(Debug, Serialize)]
struct ViolationRecord<'a> {
    filename: &'a str,
    line: usize,
    rule: &'a str,
    aliases: Vec<&'a str>,
    description: &'a str,
}

impl<'a> From<&'a Violation> for ViolationRecord<'a> {
    fn from(v: &'a Violation) -> Self {
        Self {
            filename: &v.path,
            line: v.line,
            rule: &v.rule_id,
            aliases: v.alias.as_deref().into_iter().collect(),
            description: &v.description,
        }
    }
}

fn display_name<'a>(id: &'a str, alias: Option<&'a str>, show_aliases: bool) -> &'a str {
    match alias {
        Some(alias) if show_aliases => alias,
        _ => id,
    }
}

/// Report generator
pub struct Reporter;

impl Reporter {
    /// `Enabled rules:` followed by one `<id> <description>` line per enabled rule
    pub fn listing(catalog: &RuleCatalog, resolved: &ResolvedRuleSet, show_aliases: bool) -> String {
        let mut output = format!("{LISTING_HEADER}\n");
        for rule in catalog.iter().filter(|r| resolved.is_enabled(&r.id)) {
            let name = display_name(&rule.id, rule.primary_alias(), show_aliases);
            output.push_str(&format!("{name} {}\n", rule.description));
        }
        output
    }

    /// Generate a plain-text violation report
    pub fn to_text(violations: &[Violation], show_aliases: bool) -> String {
        violations
            .iter()
            .map(|v| {
                let name = display_name(&v.rule_id, v.alias.as_deref(), show_aliases);
                format!("{}:{}: {name} {}\n", v.path, v.line, v.description)
            })
            .collect()
    }

    /// Generate a JSON violation report
    pub fn to_json(violations: &[Violation]) -> String {
        let records: Vec<ViolationRecord<'_>> = violations.iter().map(Into::into).collect();
        serde_json::to_string_pretty(&records).unwrap_or_else(|_| "[]".to_string())
    }
}
