//! Property-based tests for bookcheck using proptest
//!
//! These tests generate random catalogs and per-entry failure plans to check
//! that the retry coordinator always produces a complete, correct partition.

use async_trait::async_trait;
use bookcheck::{CheckEntries, Entry, Outcome, Probe, RetryCoordinator};
use proptest::prelude::*;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Mutex;

/// Each entry carries its own plan: the attempt from which it answers 200.
#[derive(Default)]
struct PlannedProbe {
    attempts: Mutex<HashMap<u64, u64>>,
}

#[async_trait]
impl Probe for PlannedProbe {
    async fn probe(&self, entry: Entry) -> Outcome {
        let id = entry.fields()["id"].as_u64().unwrap_or_default();
        let succeeds_from = entry.fields().get("succeedsFrom").and_then(Value::as_u64);

        // Shuffle completion order a little
        for _ in 0..(id % 4) {
            tokio::task::yield_now().await;
        }

        let attempt = {
            let mut attempts = self.attempts.lock().expect("attempts lock poisoned");
            let counter = attempts.entry(id).or_insert(0);
            *counter += 1;
            *counter
        };

        match succeeds_from {
            Some(from) if attempt >= from => Outcome::from_status(entry, 200),
            _ => Outcome::from_status(entry, 503),
        }
    }
}

/// (host index, attempt from which the entry succeeds) per entry
fn plan_strategy() -> impl Strategy<Value = Vec<(u8, Option<u64>)>> {
    prop::collection::vec((0u8..6, prop::option::of(1u64..8)), 0..40)
}

fn build_entries(plan: &[(u8, Option<u64>)]) -> Vec<Entry> {
    plan.iter()
        .enumerate()
        .map(|(id, (host, succeeds_from))| {
            // Hosts repeat on purpose: duplicates must survive
            serde_json::from_value(json!({
                "id": id,
                "bookSourceUrl": format!("https://host-{host}.test"),
                "succeedsFrom": succeeds_from,
            }))
            .expect("entry should deserialize")
        })
        .collect()
}

fn ids(entries: &[Entry]) -> Vec<u64> {
    let mut ids: Vec<u64> = entries
        .iter()
        .map(|entry| entry.fields()["id"].as_u64().unwrap_or(u64::MAX))
        .collect();
    ids.sort_unstable();
    ids
}

fn run(
    entries: Vec<Entry>,
    concurrency: usize,
    max_attempts: u32,
) -> bookcheck::Partition {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .expect("runtime should build");
    let coordinator = RetryCoordinator::new(PlannedProbe::default(), concurrency, max_attempts);
    runtime.block_on(coordinator.check_all(entries, None))
}

proptest! {
    #[test]
    fn partition_is_complete(
        plan in plan_strategy(),
        concurrency in 1usize..10,
        max_attempts in 1u32..7,
    ) {
        let entries = build_entries(&plan);
        let expected_ids = ids(&entries);

        let partition = run(entries, concurrency, max_attempts);

        let mut all = partition.good.clone();
        all.extend(partition.error.iter().cloned());
        prop_assert_eq!(ids(&all), expected_ids);
        prop_assert_eq!(partition.total(), plan.len());
    }

    #[test]
    fn entries_land_where_their_plan_says(
        plan in plan_strategy(),
        concurrency in 1usize..10,
        max_attempts in 1u32..7,
    ) {
        let entries = build_entries(&plan);

        let partition = run(entries, concurrency, max_attempts);

        let expected_good: Vec<u64> = plan
            .iter()
            .enumerate()
            .filter(|(_, (_, from))| from.is_some_and(|k| k <= u64::from(max_attempts)))
            .map(|(id, _)| id as u64)
            .collect();
        let expected_error: Vec<u64> = (0..plan.len() as u64)
            .filter(|id| !expected_good.contains(id))
            .collect();

        prop_assert_eq!(ids(&partition.good), expected_good);
        prop_assert_eq!(ids(&partition.error), expected_error);
    }

    #[test]
    fn passes_stop_once_everything_is_good(
        plan in plan_strategy(),
        max_attempts in 1u32..7,
    ) {
        let entries = build_entries(&plan);

        let partition = run(entries, 4, max_attempts);

        let expected_passes = if plan.is_empty() {
            0
        } else {
            let slowest = plan
                .iter()
                .map(|(_, from)| from.unwrap_or(u64::MAX))
                .max()
                .unwrap_or(0);
            slowest.min(u64::from(max_attempts)) as u32
        };
        prop_assert_eq!(partition.passes, expected_passes);
    }

    #[test]
    fn records_pass_through_unchanged(plan in plan_strategy()) {
        let entries = build_entries(&plan);
        let mut originals: Vec<String> = entries
            .iter()
            .map(|entry| serde_json::to_string(entry).unwrap_or_default())
            .collect();

        let partition = run(entries, 3, 5);

        let mut returned: Vec<String> = partition
            .good
            .iter()
            .chain(partition.error.iter())
            .map(|entry| serde_json::to_string(entry).unwrap_or_default())
            .collect();
        originals.sort();
        returned.sort();
        prop_assert_eq!(returned, originals);
    }
}
