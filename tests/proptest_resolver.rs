//! Property-based tests using proptest
//!
//! These tests check link resolution and the table projection against
//! randomized paths and response bodies.

use dnd5e::resource::projection::{failure_body, project};
use dnd5e::resource::table::{STATUS_COLUMN, URL_COLUMN};
use dnd5e::resource::{resolve, Cell, Endpoint, ResourceKind};
use proptest::prelude::*;
use serde_json::{json, Value};

/// Pick any known endpoint
fn arb_endpoint() -> impl Strategy<Value = Endpoint> {
    let all: Vec<Endpoint> = Endpoint::all().collect();
    prop::sample::select(all)
}

/// Item index as the API spells them
fn arb_index() -> impl Strategy<Value = String> {
    "[a-z0-9][a-z0-9-]{0,30}"
}

/// A `{index, name, url}` reference into some collection
fn arb_reference() -> impl Strategy<Value = Value> {
    (arb_endpoint(), arb_index(), "[A-Z][a-z ]{0,20}").prop_map(|(endpoint, index, name)| {
        json!({
            "index": index,
            "name": name,
            "url": endpoint.item_path(&index)
        })
    })
}

/// A collection body whose count matches its results
fn arb_collection() -> impl Strategy<Value = Value> {
    prop::collection::vec(arb_reference(), 1..50)
        .prop_map(|results| json!({"count": results.len(), "results": results}))
}

mod resolver_props {
    use super::*;

    proptest! {
        /// Every item path resolves to its endpoint's item kind
        #[test]
        fn item_paths_resolve_to_items(endpoint in arb_endpoint(), index in arb_index()) {
            prop_assert_eq!(resolve(&endpoint.item_path(&index)), ResourceKind::Item(endpoint));
        }

        /// Trailing slashes do not change the kind
        #[test]
        fn trailing_slashes_are_ignored(
            endpoint in arb_endpoint(),
            index in arb_index(),
            slashes in 1usize..4
        ) {
            let path = format!("{}{}", endpoint.item_path(&index), "/".repeat(slashes));
            prop_assert_eq!(resolve(&path), ResourceKind::Item(endpoint));
            let path = format!("{}{}", endpoint.path(), "/".repeat(slashes));
            prop_assert_eq!(resolve(&path), ResourceKind::Collection(endpoint));
        }

        /// Links one level below an item fall back to the item kind
        #[test]
        fn sub_paths_fall_back_to_items(
            endpoint in arb_endpoint(),
            index in arb_index(),
            tail in "[a-z]{1,10}"
        ) {
            let path = format!("{}/{}", endpoint.item_path(&index), tail);
            prop_assert_eq!(resolve(&path), ResourceKind::Item(endpoint));
        }

        /// Paths outside the API never resolve to a registered kind
        #[test]
        fn foreign_paths_are_generic(segments in prop::collection::vec("[a-z]{1,8}", 1..3)) {
            prop_assume!(segments[0] != "api");
            let path = format!("/{}", segments.join("/"));
            prop_assert_eq!(resolve(&path), ResourceKind::Generic);
        }

        /// Resolving never panics on arbitrary input
        #[test]
        fn resolve_never_panics(path in ".{0,60}") {
            let _ = resolve(&path);
        }
    }
}

mod projection_props {
    use super::*;

    proptest! {
        /// A collection projects into exactly `count` rows
        #[test]
        fn collection_has_count_rows(body in arb_collection()) {
            let table = project(&body, false);
            prop_assert_eq!(table.len() as u64, body["count"].as_u64().unwrap());
        }

        /// Every collection row links to a non-generic kind
        #[test]
        fn collection_rows_resolve(body in arb_collection()) {
            let table = project(&body, false);
            for cell in table.column(URL_COLUMN).unwrap() {
                let url = cell.as_text().unwrap();
                prop_assert_ne!(resolve(url), ResourceKind::Generic);
            }
        }

        /// Rows are keyed by `index`, which is dropped as a column
        #[test]
        fn rows_keyed_by_index(body in arb_collection()) {
            let table = project(&body, false);
            prop_assert!(!table.has_column("index"));
            for (key, item) in table.keys().iter().zip(body["results"].as_array().unwrap()) {
                prop_assert_eq!(key.as_deref(), item["index"].as_str());
            }
        }

        /// Projecting the same body twice gives the same table
        #[test]
        fn projection_is_deterministic(body in arb_collection(), transpose in any::<bool>()) {
            prop_assert_eq!(project(&body, transpose), project(&body, transpose));
        }

        /// A failed fetch always projects to one status-code row
        #[test]
        fn failures_give_one_status_row(index in arb_index(), status in 300u16..600) {
            let path = format!("/api/{}", index);
            let table = project(&failure_body(&path, status), false);
            prop_assert_eq!(table.len(), 1);
            prop_assert_eq!(table.get(0, STATUS_COLUMN).and_then(Cell::as_int), Some(i64::from(status)));
        }
    }
}
