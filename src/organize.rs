//! Topic categorization of the crawled corpus.
//!
//! Every record is matched against a fixed, ordered rule list; the first
//! rule whose keyword set has a case-insensitive substring match against the
//! record's URL or title wins, and records matching no rule land in the
//! catch-all bucket. Classification is a single pass with no backtracking: a
//! record is never reconsidered once assigned, so running it twice over the
//! same corpus yields identical buckets.
//!
//! First-match-wins means rule order is the priority order. A page about
//! both "webhooks" and "leads" is claimed by whichever rule appears first;
//! callers wanting different precedence pass a reordered slice to
//! [`categorize_with`].

use crate::models::{Corpus, PageRecord};

/// One categorization rule: a bucket and the keywords that claim a page
/// for it.
#[derive(Debug, Clone, Copy)]
pub struct CategoryRule {
    pub bucket: &'static str,
    pub keywords: &'static [&'static str],
}

/// Default rules, evaluated top to bottom.
pub const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        bucket: "API Overview",
        keywords: &["introduction", "getting-started", "authentication", "api-clients"],
    },
    CategoryRule {
        bucket: "Resources",
        keywords: &["leads", "contacts", "opportunities", "activities", "tasks"],
    },
    CategoryRule {
        bucket: "Advanced Features",
        keywords: &["webhooks", "custom-fields", "reporting", "bulk-actions"],
    },
    CategoryRule {
        bucket: "Integration Topics",
        keywords: &["rate-limits", "errors", "pagination", "filtering"],
    },
    CategoryRule {
        bucket: "Custom Objects",
        keywords: &["custom-activities", "custom-objects", "custom-fields"],
    },
];

/// Bucket that collects every record no rule claimed.
pub const CATCH_ALL_BUCKET: &str = "Additional";

/// A named topic group of records, in discovery order.
#[derive(Debug)]
pub struct Bucket<'a> {
    pub name: String,
    pub pages: Vec<&'a PageRecord>,
}

/// Assign every record in the corpus to exactly one bucket using the
/// default rules. Bucket order follows rule order, with the catch-all last;
/// empty buckets are kept so the result shape is independent of the corpus.
pub fn categorize(corpus: &Corpus) -> Vec<Bucket<'_>> {
    categorize_with(corpus, CATEGORY_RULES)
}

/// Same as [`categorize`] but with a caller-supplied rule list.
pub fn categorize_with<'a>(corpus: &'a Corpus, rules: &[CategoryRule]) -> Vec<Bucket<'a>> {
    let mut buckets: Vec<Bucket<'a>> = rules
        .iter()
        .map(|rule| Bucket {
            name: rule.bucket.to_string(),
            pages: Vec::new(),
        })
        .collect();
    buckets.push(Bucket {
        name: CATCH_ALL_BUCKET.to_string(),
        pages: Vec::new(),
    });

    for record in corpus.records() {
        let url = record.url.to_lowercase();
        let title = record.title.to_lowercase();
        let index = rules
            .iter()
            .position(|rule| {
                rule.keywords
                    .iter()
                    .any(|keyword| url.contains(keyword) || title.contains(keyword))
            })
            .unwrap_or(rules.len());
        buckets[index].pages.push(record);
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PageRecord;
    use chrono::Utc;

    fn record(url: &str, title: &str) -> PageRecord {
        PageRecord {
            url: url.to_string(),
            title: title.to_string(),
            body_text: String::new(),
            code_blocks: Vec::new(),
            fetched_at: Utc::now(),
        }
    }

    fn corpus_of(records: Vec<PageRecord>) -> Corpus {
        let mut corpus = Corpus::new();
        for r in records {
            corpus.insert(r);
        }
        corpus
    }

    fn bucket_urls<'a>(buckets: &'a [Bucket<'a>], name: &str) -> Vec<&'a str> {
        buckets
            .iter()
            .find(|b| b.name == name)
            .map(|b| b.pages.iter().map(|p| p.url.as_str()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_title_keyword_places_record_even_without_url_match() {
        let corpus = corpus_of(vec![record(
            "https://docs.example.com/page-17",
            "Configuring Webhooks",
        )]);
        let buckets = categorize(&corpus);
        assert_eq!(
            bucket_urls(&buckets, "Advanced Features"),
            vec!["https://docs.example.com/page-17"]
        );
    }

    #[test]
    fn test_url_keyword_match() {
        let corpus = corpus_of(vec![record(
            "https://docs.example.com/api/leads/list",
            "Listing",
        )]);
        let buckets = categorize(&corpus);
        assert_eq!(
            bucket_urls(&buckets, "Resources"),
            vec!["https://docs.example.com/api/leads/list"]
        );
    }

    #[test]
    fn test_first_matching_rule_wins() {
        // Matches both "webhooks" (Advanced Features) and "leads"
        // (Resources); Resources is earlier in the rule list and wins.
        let corpus = corpus_of(vec![record(
            "https://docs.example.com/webhooks",
            "Webhooks for Leads",
        )]);
        let buckets = categorize(&corpus);
        assert_eq!(bucket_urls(&buckets, "Resources").len(), 1);
        assert!(bucket_urls(&buckets, "Advanced Features").is_empty());
    }

    #[test]
    fn test_unmatched_record_goes_to_catch_all() {
        let corpus = corpus_of(vec![record(
            "https://docs.example.com/changelog",
            "Changelog",
        )]);
        let buckets = categorize(&corpus);
        assert_eq!(
            bucket_urls(&buckets, CATCH_ALL_BUCKET),
            vec!["https://docs.example.com/changelog"]
        );
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let corpus = corpus_of(vec![record(
            "https://docs.example.com/page",
            "GETTING-STARTED Guide",
        )]);
        let buckets = categorize(&corpus);
        assert_eq!(bucket_urls(&buckets, "API Overview").len(), 1);
    }

    #[test]
    fn test_bucket_membership_follows_discovery_order() {
        let corpus = corpus_of(vec![
            record("https://docs.example.com/leads", "Leads"),
            record("https://docs.example.com/contacts", "Contacts"),
            record("https://docs.example.com/tasks", "Tasks"),
        ]);
        let buckets = categorize(&corpus);
        assert_eq!(
            bucket_urls(&buckets, "Resources"),
            vec![
                "https://docs.example.com/leads",
                "https://docs.example.com/contacts",
                "https://docs.example.com/tasks",
            ]
        );
    }

    #[test]
    fn test_categorization_is_idempotent() {
        let corpus = corpus_of(vec![
            record("https://docs.example.com/authentication", "Auth"),
            record("https://docs.example.com/misc", "Misc"),
            record("https://docs.example.com/errors", "Errors"),
        ]);

        let first = categorize(&corpus);
        let second = categorize(&corpus);

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.name, b.name);
            let a_urls: Vec<&str> = a.pages.iter().map(|p| p.url.as_str()).collect();
            let b_urls: Vec<&str> = b.pages.iter().map(|p| p.url.as_str()).collect();
            assert_eq!(a_urls, b_urls);
        }
    }

    #[test]
    fn test_every_record_lands_in_exactly_one_bucket() {
        let corpus = corpus_of(vec![
            record("https://docs.example.com/webhooks", "Webhooks"),
            record("https://docs.example.com/misc", "Misc"),
            record("https://docs.example.com/pagination", "Pagination"),
        ]);
        let buckets = categorize(&corpus);
        let total: usize = buckets.iter().map(|b| b.pages.len()).sum();
        assert_eq!(total, corpus.len());
    }
}
