//! The example saved searches merged in on first run.
//!
//! Carried over from the original builder's bundled examples: fixed ids and
//! timestamps, deterministic `example-term-N` / `example-bucket-N` ids with
//! a single counter running across all six entries, and the query strings
//! exactly as they were snapshotted at authoring time.

use crate::model::{Bucket, Operator, OutputMode, QueryModel, Term, TermColor};
use crate::store::saved::SavedSearch;

const EXAMPLE_DATE: &str = "2025-01-01T00:00:00.000Z";

/// Deterministic factory: counters keep running across every example so the
/// ids and color assignments match the original data file.
struct SeedFactory {
    term_counter: usize,
    bucket_counter: usize,
}

impl SeedFactory {
    fn new() -> SeedFactory {
        SeedFactory {
            term_counter: 0,
            bucket_counter: 0,
        }
    }

    fn term(&mut self, value: &str) -> Term {
        let term = Term {
            id: format!("example-term-{}", self.term_counter),
            value: value.to_string(),
            color_key: TermColor::for_position(self.term_counter),
        };
        self.term_counter += 1;
        term
    }

    fn bucket(&mut self, name: &str, terms: &[&str]) -> Bucket {
        let bucket = Bucket {
            id: format!("example-bucket-{}", self.bucket_counter),
            name: name.to_string(),
            terms: terms.iter().map(|value| self.term(value)).collect(),
            is_enabled: true,
            operator_after: Operator::And,
        };
        self.bucket_counter += 1;
        bucket
    }

    fn state(&mut self, groups: &[(&str, &[&str])]) -> QueryModel {
        QueryModel {
            buckets: groups
                .iter()
                .map(|(name, terms)| self.bucket(name, terms))
                .collect(),
            output_mode: OutputMode::Pretty,
        }
    }

    fn search(
        &mut self,
        id: &str,
        name: &str,
        short_description: &str,
        groups: &[(&str, &[&str])],
        query_string: &str,
    ) -> SavedSearch {
        SavedSearch {
            id: id.to_string(),
            name: name.to_string(),
            is_example: Some(true),
            short_description: Some(short_description.to_string()),
            query_string: query_string.to_string(),
            state: self.state(groups),
            created_at: EXAMPLE_DATE.to_string(),
            updated_at: EXAMPLE_DATE.to_string(),
            last_used_at: EXAMPLE_DATE.to_string(),
        }
    }
}

pub fn example_searches() -> Vec<SavedSearch> {
    let mut f = SeedFactory::new();
    vec![
        f.search(
            "1f4f5f76-3f41-4cf0-bc2c-2b8c3289f001",
            "Senior Frontend Engineer (Example)",
            "Senior frontend engineer for SaaS products (React + TypeScript, complex UI).",
            &[
                (
                    "Titles",
                    &[
                        "frontend engineer",
                        "front end engineer",
                        "senior frontend developer",
                        "react engineer",
                    ][..],
                ),
                (
                    "Skills",
                    &["React", "TypeScript", "JavaScript", "component libraries"][..],
                ),
                (
                    "Industry / Domain",
                    &["SaaS", "B2B software", "cloud platform"][..],
                ),
                ("Exclusions", &["intern", "student", "bootcamp"][..]),
            ],
            "(\"frontend engineer\" OR \"front end engineer\" OR \"senior frontend developer\" OR \"react engineer\") AND (React OR TypeScript OR JavaScript OR \"component libraries\") AND (SaaS OR \"B2B software\" OR \"cloud platform\") NOT (intern OR student OR bootcamp)",
        ),
        f.search(
            "c7e34e2b-a8f7-4483-8cd5-5f53d8acb18d",
            "Senior Backend Engineer – Distributed Systems (Example)",
            "Backend engineer for distributed systems (Go/Java, Kafka, cloud).",
            &[
                (
                    "Titles",
                    &[
                        "backend engineer",
                        "backend developer",
                        "software engineer",
                        "distributed systems engineer",
                    ][..],
                ),
                (
                    "Skills",
                    &["Golang", "Go language", "Java", "Kafka", "Redis"][..],
                ),
                ("Cloud", &["AWS", "GCP", "cloud infrastructure"][..]),
                ("Exclusions", &["PHP", "Wordpress"][..]),
            ],
            "(\"backend engineer\" OR \"backend developer\" OR \"software engineer\" OR \"distributed systems engineer\") AND (Golang OR \"Go language\" OR Java OR Kafka OR Redis) AND (AWS OR GCP OR \"cloud infrastructure\") NOT (PHP OR Wordpress)",
        ),
        f.search(
            "9396f1d3-830d-4d3a-9603-b15f641a4e6f",
            "Enterprise Account Executive (Example)",
            "Enterprise SaaS AE closing mid-market and enterprise deals.",
            &[
                (
                    "Titles",
                    &[
                        "account executive",
                        "enterprise account executive",
                        "senior account executive",
                    ][..],
                ),
                (
                    "Sales Skills",
                    &["SaaS", "B2B sales", "enterprise sales", "solution selling"][..],
                ),
                (
                    "Targets",
                    &["mid market", "enterprise", "strategic accounts"][..],
                ),
                ("Exclusions", &["SDR", "BDR", "customer success"][..]),
            ],
            "(\"account executive\" OR \"enterprise account executive\" OR \"senior account executive\") AND (SaaS OR \"B2B sales\" OR \"enterprise sales\" OR \"solution selling\") AND (\"mid market\" OR enterprise OR \"strategic accounts\") NOT (\"SDR\" OR \"BDR\" OR \"customer success\")",
        ),
        f.search(
            "3c7ca8ea-3cc7-4793-bc55-9b140f9db8c4",
            "Sales Development Representative (Example)",
            "Outbound SDR / BDR for SaaS, focused on prospecting and cold outreach.",
            &[
                (
                    "Titles",
                    &[
                        "sales development representative",
                        "SDR",
                        "business development representative",
                        "BDR",
                    ][..],
                ),
                (
                    "Skills",
                    &["outbound", "prospecting", "cold outreach", "lead generation"][..],
                ),
                ("Industry", &["SaaS", "tech", "startup"][..]),
                ("Exclusions", &["customer support", "account manager"][..]),
            ],
            "(\"sales development representative\" OR SDR OR \"business development representative\" OR BDR) AND (outbound OR prospecting OR \"cold outreach\" OR \"lead generation\") AND (SaaS OR tech OR startup) NOT (\"customer support\" OR \"account manager\")",
        ),
        f.search(
            "f7d6a5aa-0d8c-4214-9e64-3a4732c38fa6",
            "Registered Nurse – Emergency Department (Example)",
            "Emergency department RN with triage, trauma, and critical care experience.",
            &[
                (
                    "Titles",
                    &[
                        "registered nurse",
                        "RN",
                        "emergency department nurse",
                        "ER nurse",
                    ][..],
                ),
                (
                    "Skills",
                    &["triage", "patient assessment", "emergency care", "trauma"][..],
                ),
                ("Certifications", &["BLS", "ACLS", "PALS"][..]),
            ],
            "(\"registered nurse\" OR RN OR \"emergency department nurse\" OR \"ER nurse\") AND (triage OR \"patient assessment\" OR \"emergency care\" OR trauma) AND (BLS OR ACLS OR PALS)",
        ),
        f.search(
            "1e32b948-e9a8-44b7-9b42-8b208365f11b",
            "Senior Accountant – Corporate / GL (Example)",
            "Senior corporate accountant with GL, GAAP, and month-end close experience.",
            &[
                (
                    "Titles",
                    &["accountant", "senior accountant", "general ledger accountant"][..],
                ),
                (
                    "Skills",
                    &[
                        "general ledger",
                        "financial reporting",
                        "month end close",
                        "GAAP",
                    ][..],
                ),
                ("Tools", &["NetSuite", "QuickBooks", "SAP"][..]),
            ],
            "(accountant OR \"senior accountant\" OR \"general ledger accountant\") AND (\"general ledger\" OR \"financial reporting\" OR \"month end close\" OR GAAP) AND (NetSuite OR QuickBooks OR SAP)",
        ),
    ]
}
