use std::fmt;

use ahash::AHashMap;
use serde::Serialize;

use crate::config::{ArrayConfig, ArrayRecipe};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub total_nodes: usize,
    pub max_depth: usize,
    pub empty_names: usize,
    pub conflicting_names: usize,
    pub failed_verifications: usize,
    pub messages: Vec<String>,
}

impl ValidationReport {
    pub fn merge(&mut self, other: &ValidationReport) {
        self.total_nodes = self.total_nodes.max(other.total_nodes);
        self.max_depth = self.max_depth.max(other.max_depth);
        self.empty_names += other.empty_names;
        self.conflicting_names += other.conflicting_names;
        self.failed_verifications += other.failed_verifications;
        self.messages.extend(other.messages.iter().cloned());
    }

    pub fn has_issues(&self) -> bool {
        self.empty_names > 0 || self.conflicting_names > 0 || self.failed_verifications > 0
    }
}

#[derive(Debug)]
pub struct ValidationError {
    pub report: ValidationReport,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config validation failed")?;
        if let Some(first) = self.report.messages.first() {
            write!(f, ": {first}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Visits `config` and every nested source, depth first. The root has depth 1.
pub fn walk_configs<'a>(config: &'a ArrayConfig, visit: &mut impl FnMut(&'a ArrayConfig, usize)) {
    walk(config, 1, visit);
}

fn walk<'a>(
    config: &'a ArrayConfig,
    depth: usize,
    visit: &mut impl FnMut(&'a ArrayConfig, usize),
) {
    visit(config, depth);
    for source in config.source_configs() {
        walk(source, depth + 1, visit);
    }
}

fn base_report(config: &ArrayConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    walk_configs(config, &mut |_, depth| {
        report.total_nodes += 1;
        report.max_depth = report.max_depth.max(depth);
    });
    report
}

/// Names must be non-empty, and one name must not stand for two different configs.
pub fn validate_names(config: &ArrayConfig) -> ValidationReport {
    let mut report = base_report(config);
    let mut seen: AHashMap<&str, &ArrayConfig> = AHashMap::new();
    walk_configs(config, &mut |node, _| {
        let name = node.name();
        if name.trim().is_empty() {
            report.empty_names += 1;
            report
                .messages
                .push(format!("{} config has an empty name", node.kind().as_str()));
            return;
        }
        match seen.get(name) {
            Some(previous) if *previous != node => {
                report.conflicting_names += 1;
                report
                    .messages
                    .push(format!("name `{name}` is used by two different configs"));
            }
            Some(_) => {}
            None => {
                seen.insert(name, node);
            }
        }
    });
    report
}

pub fn validate_verifications(config: &ArrayConfig) -> ValidationReport {
    let mut report = base_report(config);
    walk_configs(config, &mut |node, _| {
        if let Err(err) = node.verify() {
            report.failed_verifications += 1;
            report.messages.push(err.to_string());
        }
    });
    report
}

pub fn run_config_checks(config: &ArrayConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    report.merge(&validate_names(config));
    report.merge(&validate_verifications(config));
    if report.has_issues() {
        log::warn!(
            "array config `{}` has {} validation message(s)",
            config.name(),
            report.messages.len()
        );
    }
    report
}

pub fn run_strict_config_checks(config: &ArrayConfig) -> Result<ValidationReport, ValidationError> {
    let report = run_config_checks(config);
    if report.has_issues() {
        return Err(ValidationError { report });
    }
    Ok(report)
}
