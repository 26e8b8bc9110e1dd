use std::collections::HashMap;

use crate::RawRecord;

/// Collapses the archive's alternate-title form `[Title: release note]` to `Title`.
///
/// Anything else is returned trimmed.
pub fn normalize_title(raw: &str) -> String {
    let trimmed = raw.trim();
    let bracketed = trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'));
    if let Some(inner) = bracketed {
        if let Some((name, _note)) = inner.split_once(':') {
            let name = name.trim();
            if !name.is_empty() {
                return name.to_string();
            }
        }
    }
    trimmed.to_string()
}

/// Ordered multi-map from normalized title to the records sharing it.
///
/// Titles iterate in first-seen order; records within a title keep arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleGroups {
    index: HashMap<String, usize>,
    groups: Vec<(String, Vec<RawRecord>)>,
}

impl TitleGroups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: RawRecord) {
        let key = normalize_title(&record.title);
        match self.index.get(&key) {
            Some(&slot) => self.groups[slot].1.push(record),
            None => {
                self.index.insert(key.clone(), self.groups.len());
                self.groups.push((key, vec![record]));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, title: &str) -> Option<&[RawRecord]> {
        self.index
            .get(title)
            .map(|&slot| self.groups[slot].1.as_slice())
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(title, _)| title.as_str())
    }

    /// Each title with its most descriptive record: longest summary wins,
    /// ties go to the record seen first.
    pub fn representatives(&self) -> impl Iterator<Item = (&str, &RawRecord)> {
        self.groups.iter().filter_map(|(title, records)| {
            let mut best: Option<&RawRecord> = None;
            for record in records {
                match best {
                    Some(current) if current.summary_len() >= record.summary_len() => {}
                    _ => best = Some(record),
                }
            }
            best.map(|record| (title.as_str(), record))
        })
    }
}

impl FromIterator<RawRecord> for TitleGroups {
    fn from_iter<I: IntoIterator<Item = RawRecord>>(iter: I) -> Self {
        let mut groups = TitleGroups::new();
        for record in iter {
            groups.insert(record);
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(title: &str, summary: Option<&str>) -> RawRecord {
        RawRecord {
            title: title.into(),
            summary: summary.map(str::to_string),
            ..RawRecord::default()
        }
    }

    #[test]
    fn bracketed_alternate_title_is_collapsed() {
        assert_eq!(normalize_title("[Metropolis: German release]"), "Metropolis");
        assert_eq!(normalize_title("  [Sunrise : US title] "), "Sunrise");
    }

    #[test]
    fn plain_and_malformed_titles_are_only_trimmed() {
        assert_eq!(normalize_title(" The Kid "), "The Kid");
        assert_eq!(normalize_title("[No colon here]"), "[No colon here]");
        assert_eq!(normalize_title("[: empty name]"), "[: empty name]");
        assert_eq!(normalize_title("Nosferatu: A Symphony"), "Nosferatu: A Symphony");
    }

    #[test]
    fn groups_keep_first_seen_order() {
        let groups: TitleGroups = vec![
            rec("B", None),
            rec("[A: alt]", None),
            rec("B", None),
            rec("A", None),
        ]
        .into_iter()
        .collect();

        assert_eq!(groups.titles().collect::<Vec<_>>(), vec!["B", "A"]);
        assert_eq!(groups.get("A").map(<[_]>::len), Some(2));
        assert_eq!(groups.get("B").map(<[_]>::len), Some(2));
    }

    #[test]
    fn longest_summary_wins_and_ties_keep_first() {
        let groups: TitleGroups = vec![
            rec("A", Some("short")),
            rec("A", Some("much longer text")),
            rec("A", Some("equal length txt")),
            rec("B", Some("same")),
            rec("B", Some("same")),
            rec("C", None),
        ]
        .into_iter()
        .collect();

        let reps: Vec<_> = groups.representatives().collect();
        assert_eq!(reps.len(), 3);
        assert_eq!(reps[0].1.summary.as_deref(), Some("much longer text"));
        assert!(std::ptr::eq(reps[1].1, &groups.get("B").unwrap()[0]));
        assert_eq!(reps[2].1.summary, None);
    }
}
