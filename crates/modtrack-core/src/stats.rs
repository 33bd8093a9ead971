//! Profile statistics shown in the preamble of every export

use crate::record::{ModRecord, Version};
use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use std::collections::HashMap;

/// How many entries the ranked lists keep
pub const RANKED_LIMIT: usize = 5;

/// Format of the `Export Date:` line
pub const EXPORT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Aggregate summary of one profile's mods
#[derive(Debug, Clone, Serialize)]
pub struct ProfileStats {
    pub profile_name: String,
    pub export_date: NaiveDateTime,
    pub total_mods: usize,
    pub enabled_mods: usize,
    pub disabled_mods: usize,
    pub unique_authors: usize,
    /// (author, mod count), most prolific first
    pub top_authors: Vec<(String, usize)>,
    /// Highest versions first
    pub newest_mods: Vec<ModRecord>,
    /// Lowest versions first
    pub oldest_mods: Vec<ModRecord>,
}

impl ProfileStats {
    /// Export date rendered for the preamble
    pub fn export_date_text(&self) -> String {
        self.export_date.format(EXPORT_DATE_FORMAT).to_string()
    }
}

/// Compute statistics, stamping them with the current local time
pub fn compute_stats(records: &[ModRecord], profile_name: &str) -> ProfileStats {
    compute_stats_at(records, profile_name, Local::now().naive_local())
}

/// Compute statistics with an explicit export timestamp
pub fn compute_stats_at(
    records: &[ModRecord],
    profile_name: &str,
    export_date: NaiveDateTime,
) -> ProfileStats {
    let total_mods = records.len();
    let enabled_mods = records.iter().filter(|r| r.enabled).count();

    let author_counts = count_authors(records);
    let unique_authors = author_counts.len();

    // Stable sort keeps first-seen order among authors with equal counts
    let mut top_authors = author_counts;
    top_authors.sort_by(|a, b| b.1.cmp(&a.1));
    top_authors.truncate(RANKED_LIMIT);

    let mut by_version: Vec<(Version, &ModRecord)> =
        records.iter().map(|r| (r.parsed_version(), r)).collect();
    by_version.sort_by(|a, b| b.0.cmp(&a.0));

    let newest_mods = by_version
        .iter()
        .take(RANKED_LIMIT)
        .map(|(_, r)| (*r).clone())
        .collect();
    let oldest_mods = by_version
        .iter()
        .rev()
        .take(RANKED_LIMIT)
        .map(|(_, r)| (*r).clone())
        .collect();

    ProfileStats {
        profile_name: profile_name.to_string(),
        export_date,
        total_mods,
        enabled_mods,
        disabled_mods: total_mods - enabled_mods,
        unique_authors,
        top_authors,
        newest_mods,
        oldest_mods,
    }
}

/// Count mods per author, in order of first appearance
fn count_authors(records: &[ModRecord]) -> Vec<(String, usize)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for record in records {
        let i = *index.entry(record.author.as_str()).or_insert_with(|| {
            counts.push((record.author.clone(), 0));
            counts.len() - 1
        });
        counts[i].1 += 1;
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(author: &str, name: &str, version: &str, enabled: bool) -> ModRecord {
        ModRecord {
            name: name.to_string(),
            author: author.to_string(),
            version: version.to_string(),
            description: String::new(),
            enabled,
            website: String::new(),
        }
    }

    fn fixed_date() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(14, 5, 0)
            .unwrap()
    }

    #[test]
    fn test_counts() {
        let records = vec![
            record("A", "one", "1.0.0", true),
            record("A", "two", "1.0.0", false),
            record("B", "three", "1.0.0", true),
        ];
        let stats = compute_stats_at(&records, "Default", fixed_date());

        assert_eq!(stats.profile_name, "Default");
        assert_eq!(stats.total_mods, 3);
        assert_eq!(stats.enabled_mods, 2);
        assert_eq!(stats.disabled_mods, 1);
        assert_eq!(stats.unique_authors, 2);
        assert_eq!(stats.export_date_text(), "2024-03-09 14:05:00");
    }

    #[test]
    fn test_empty_collection() {
        let stats = compute_stats_at(&[], "Empty", fixed_date());

        assert_eq!(stats.total_mods, 0);
        assert_eq!(stats.enabled_mods + stats.disabled_mods, 0);
        assert!(stats.top_authors.is_empty());
        assert!(stats.newest_mods.is_empty());
        assert!(stats.oldest_mods.is_empty());
    }

    #[test]
    fn test_top_authors_ranked_with_stable_ties() {
        let mut records = Vec::new();
        for (author, n) in [("c", 1), ("a", 2), ("b", 2), ("d", 3), ("e", 1), ("f", 1)] {
            for i in 0..n {
                records.push(record(author, &format!("{author}{i}"), "1.0.0", true));
            }
        }
        let stats = compute_stats_at(&records, "p", fixed_date());

        assert_eq!(stats.unique_authors, 6);
        assert_eq!(
            stats.top_authors,
            vec![
                ("d".to_string(), 3),
                ("a".to_string(), 2),
                ("b".to_string(), 2),
                ("c".to_string(), 1),
                ("e".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_top_authors_fewer_than_limit() {
        let records = vec![record("x", "1", "1.0.0", true), record("y", "2", "1.0.0", true)];
        let stats = compute_stats_at(&records, "p", fixed_date());
        assert_eq!(stats.top_authors.len(), 2);
    }

    #[test]
    fn test_newest_and_oldest_compare_numerically() {
        let records = vec![
            record("a", "nine", "9.0.0", true),
            record("a", "ten", "10.0.0", true),
            record("a", "small", "0.1.0", true),
            record("a", "broken", "1.beta", true),
        ];
        let stats = compute_stats_at(&records, "p", fixed_date());

        let newest: Vec<&str> = stats.newest_mods.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(newest, vec!["ten", "nine", "small", "broken"]);

        let oldest: Vec<&str> = stats.oldest_mods.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(oldest, vec!["broken", "small", "nine", "ten"]);
    }

    #[test]
    fn test_ranked_lists_capped() {
        let records: Vec<ModRecord> = (0..8)
            .map(|i| record("a", &format!("m{i}"), &format!("{i}.0.0"), true))
            .collect();
        let stats = compute_stats_at(&records, "p", fixed_date());

        assert_eq!(stats.newest_mods.len(), RANKED_LIMIT);
        assert_eq!(stats.newest_mods[0].version, "7.0.0");
        assert_eq!(stats.oldest_mods.len(), RANKED_LIMIT);
        assert_eq!(stats.oldest_mods[0].version, "0.0.0");
        assert_eq!(stats.oldest_mods[4].version, "4.0.0");
    }
}
