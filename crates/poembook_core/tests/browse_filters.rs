use poembook_core::source::decode_poems;
use poembook_core::{
    aggregate_tags, apply_filters, BrowseQuery, Catalog, Poem, PoemBody, SortMode,
    UNCATEGORIZED_TAG,
};

fn sample_catalog() -> Catalog {
    let poems = decode_poems(
        "data/poems.json",
        r#"[
            {"id": 1, "title": "Sky", "created_at": "2023-01-01", "tags": "nature,sky"},
            {"id": 2, "title": "Rain", "created_at": "2024-06-01", "tags": []}
        ]"#,
    )
    .unwrap();
    Catalog::new(poems, Vec::new())
}

fn titles(poems: &[&Poem]) -> Vec<String> {
    poems.iter().map(|poem| poem.title.clone()).collect()
}

#[test]
fn default_query_lists_newest_first_and_aggregates_tags() {
    let catalog = sample_catalog();

    let view = apply_filters(catalog.poems(), &BrowseQuery::default());
    assert_eq!(titles(&view), vec!["Rain", "Sky"]);

    let counts = aggregate_tags(catalog.poems());
    assert_eq!(counts.total(), 2);
    assert_eq!(counts.count("nature"), 1);
    assert_eq!(counts.count("sky"), 1);
    assert_eq!(counts.count(UNCATEGORIZED_TAG), 1);
    assert_eq!(counts.entries().len(), 3);
}

#[test]
fn active_tag_filters_by_exact_label() {
    let catalog = sample_catalog();

    let query = BrowseQuery {
        active_tag: Some("nature".to_string()),
        ..BrowseQuery::default()
    };
    assert_eq!(titles(&apply_filters(catalog.poems(), &query)), vec!["Sky"]);

    let wrong_case = BrowseQuery {
        active_tag: Some("Nature".to_string()),
        ..BrowseQuery::default()
    };
    assert!(apply_filters(catalog.poems(), &wrong_case).is_empty());
}

#[test]
fn text_query_matches_title_case_insensitively() {
    let catalog = sample_catalog();

    let query = BrowseQuery {
        text: "rain".to_string(),
        ..BrowseQuery::default()
    };
    assert_eq!(titles(&apply_filters(catalog.poems(), &query)), vec!["Rain"]);

    let upper = BrowseQuery {
        text: "RAIN".to_string(),
        ..BrowseQuery::default()
    };
    assert_eq!(titles(&apply_filters(catalog.poems(), &upper)), vec!["Rain"]);
}

#[test]
fn text_query_matches_body_lines_joined_with_spaces() {
    let poems = vec![
        Poem::new("1", "Untold").with_body(PoemBody::Lines(vec![
            "the river".to_string(),
            "sleeps".to_string(),
        ])),
        Poem::new("2", "Other").with_body(PoemBody::Text("river\nsleeps".to_string())),
    ];
    let catalog = Catalog::new(poems, Vec::new());

    let query = BrowseQuery {
        text: "River Sleeps".to_string(),
        ..BrowseQuery::default()
    };
    assert_eq!(titles(&apply_filters(catalog.poems(), &query)), vec!["Untold"]);
}

#[test]
fn title_sorts_follow_alphabetical_order() {
    let catalog = sample_catalog();

    let a_to_z = BrowseQuery {
        sort: SortMode::AToZ,
        ..BrowseQuery::default()
    };
    assert_eq!(titles(&apply_filters(catalog.poems(), &a_to_z)), vec!["Rain", "Sky"]);

    let z_to_a = BrowseQuery {
        sort: SortMode::ZToA,
        ..BrowseQuery::default()
    };
    assert_eq!(titles(&apply_filters(catalog.poems(), &z_to_a)), vec!["Sky", "Rain"]);
}

#[test]
fn title_sorts_use_collation_for_accents_and_tamil() {
    let poems = vec![
        Poem::new("1", "zebra"),
        Poem::new("2", "மழை"),
        Poem::new("3", "éclair"),
        Poem::new("4", "அன்பு"),
        Poem::new("5", "Apple"),
        Poem::new("6", "கடல்"),
    ];
    let catalog = Catalog::new(poems, Vec::new());

    let a_to_z = BrowseQuery {
        sort: SortMode::AToZ,
        ..BrowseQuery::default()
    };
    assert_eq!(
        titles(&apply_filters(catalog.poems(), &a_to_z)),
        vec!["Apple", "éclair", "zebra", "அன்பு", "கடல்", "மழை"]
    );

    let z_to_a = BrowseQuery {
        sort: SortMode::ZToA,
        ..BrowseQuery::default()
    };
    assert_eq!(
        titles(&apply_filters(catalog.poems(), &z_to_a)),
        vec!["மழை", "கடல்", "அன்பு", "zebra", "éclair", "Apple"]
    );
}

#[test]
fn missing_dates_sort_last_when_newest_and_first_when_oldest() {
    let poems = vec![
        Poem::new("1", "Dated").with_created_at("2022-03-04"),
        Poem::new("2", "Undated"),
        Poem::new("3", "Garbled").with_created_at("yesterday"),
    ];
    let catalog = Catalog::new(poems, Vec::new());

    let newest = apply_filters(catalog.poems(), &BrowseQuery::default());
    assert_eq!(titles(&newest), vec!["Dated", "Undated", "Garbled"]);

    let oldest = BrowseQuery {
        sort: SortMode::Oldest,
        ..BrowseQuery::default()
    };
    assert_eq!(
        titles(&apply_filters(catalog.poems(), &oldest)),
        vec!["Undated", "Garbled", "Dated"]
    );
}

#[test]
fn empty_titles_sort_first_and_equal_titles_keep_input_order() {
    let poems = vec![
        Poem::new("1", "Same").with_created_at("2024-01-03"),
        Poem::new("2", "").with_created_at("2024-01-02"),
        Poem::new("3", "Same").with_created_at("2024-01-01"),
    ];
    let catalog = Catalog::new(poems, Vec::new());

    let query = BrowseQuery {
        sort: SortMode::AToZ,
        ..BrowseQuery::default()
    };
    let view = apply_filters(catalog.poems(), &query);
    let ids: Vec<&str> = view.iter().map(|poem| poem.id.as_str()).collect();
    assert_eq!(ids, vec!["2", "1", "3"]);
}

#[test]
fn filtering_is_idempotent() {
    let catalog = sample_catalog();
    let query = BrowseQuery {
        active_tag: None,
        text: "a".to_string(),
        sort: SortMode::ZToA,
    };

    let first = apply_filters(catalog.poems(), &query);
    let second = apply_filters(catalog.poems(), &query);
    assert_eq!(first, second);
}

#[test]
fn tag_contributions_equal_per_poem_bucket_count() {
    let poems = decode_poems(
        "data/poems.json",
        r#"[
            {"id": 1, "tags": "a, b, c"},
            {"id": 2, "tags": ["a", " "]},
            {"id": 3},
            {"id": 4, "tags": 17},
            {"id": 5, "tags": ",,"}
        ]"#,
    )
    .unwrap();

    let expected: usize = poems.iter().map(|poem| poem.tags.len().max(1)).sum();
    let counts = aggregate_tags(&poems);
    assert_eq!(counts.contributions(), expected);
    assert_eq!(counts.count(UNCATEGORIZED_TAG), 3);
    assert_eq!(counts.count("a"), 2);
    assert_eq!(counts.entries()[0].tag, UNCATEGORIZED_TAG);
}
