//! Naturalization statistics over parsed decrees.
//!
//! Counts follow the published reports: `EFF` entries (minor children
//! covered by a parent's acquisition) are left out unless configured
//! otherwise.

mod departments;

pub use departments::{department_label, department_name, UNKNOWN_DEPARTMENT};

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::config::StatsConfig;
use crate::models::decree::{Entry, ParsedDecree};

/// Ministry series: year and series code of a ministry number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MinistrySeries {
    pub year: String,
    pub series: String,
}

impl fmt::Display for MinistrySeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}X{}", self.year, self.series)
    }
}

/// Department code with its name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Department {
    pub code: String,
    pub name: String,
}

impl Department {
    pub fn from_code(code: &str) -> Self {
        Self {
            code: code.to_string(),
            name: department_label(code).to_string(),
        }
    }
}

/// Number of entries falling into a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCount<T> {
    pub group: T,
    pub count: usize,
}

/// Statistics of a single decree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecreeStats {
    pub reference_number: String,
    pub date: Option<NaiveDate>,
    pub naturalizations_count: usize,
    /// In order of first appearance.
    pub ministry_series: Vec<GroupCount<MinistrySeries>>,
    /// By descending count, then code.
    pub departments: Vec<GroupCount<Department>>,
}

/// Statistics summed over all decrees.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TotalStats {
    pub naturalizations_count: usize,
    pub ministry_series: Vec<GroupCount<MinistrySeries>>,
    pub departments: Vec<GroupCount<Department>>,
}

/// Per-decree and total statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DecreesStats {
    pub decrees: Vec<DecreeStats>,
    pub totals: TotalStats,
}

impl DecreeStats {
    pub fn from_decree(decree: &ParsedDecree, config: &StatsConfig) -> Self {
        let counted: Vec<&Entry> = decree
            .entries
            .iter()
            .filter(|e| config.count_collective_effect || e.parsed.entry_type.is_naturalization())
            .collect();

        let ministry_series = group_counts(counted.iter().map(|e| MinistrySeries {
            year: e.parsed.ministry_number.year.clone(),
            series: e.parsed.ministry_number.series.clone(),
        }));
        let departments = group_counts(counted.iter().map(|e| e.parsed.department.as_str()));

        Self {
            reference_number: decree.reference_number.clone(),
            date: decree.date,
            naturalizations_count: counted.len(),
            ministry_series,
            departments: sorted_departments(departments),
        }
    }
}

/// Compute statistics for a list of decrees.
pub fn decrees_stats(decrees: &[ParsedDecree], config: &StatsConfig) -> DecreesStats {
    let decrees: Vec<DecreeStats> = decrees
        .iter()
        .map(|d| DecreeStats::from_decree(d, config))
        .collect();

    let ministry_series = merge_counts(
        decrees
            .iter()
            .flat_map(|d| d.ministry_series.iter())
            .map(|g| (g.group.clone(), g.count)),
    );
    let departments = merge_counts(
        decrees
            .iter()
            .flat_map(|d| d.departments.iter())
            .map(|g| (g.group.code.as_str(), g.count)),
    );

    let totals = TotalStats {
        naturalizations_count: decrees.iter().map(|d| d.naturalizations_count).sum(),
        ministry_series,
        departments: sorted_departments(departments),
    };

    DecreesStats { decrees, totals }
}

/// Count items by key, keeping first-appearance order.
fn group_counts<K: Eq + Hash + Clone>(items: impl Iterator<Item = K>) -> Vec<GroupCount<K>> {
    merge_counts(items.map(|key| (key, 1)))
}

fn merge_counts<K: Eq + Hash + Clone>(counts: impl Iterator<Item = (K, usize)>) -> Vec<GroupCount<K>> {
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<GroupCount<K>> = Vec::new();
    for (key, count) in counts {
        match index.get(&key) {
            Some(&i) => groups[i].count += count,
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(GroupCount { group: key, count });
            }
        }
    }
    groups
}

fn sorted_departments(counts: Vec<GroupCount<&str>>) -> Vec<GroupCount<Department>> {
    let mut departments: Vec<GroupCount<Department>> = counts
        .into_iter()
        .map(|g| GroupCount {
            group: Department::from_code(g.group),
            count: g.count,
        })
        .collect();
    departments.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.group.code.cmp(&b.group.code))
    });
    departments
}
