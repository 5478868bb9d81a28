use indoc::indoc;
use marksift::{search, Document, Options};

fn doc(name: &str, tokens: &[&str]) -> Document {
    Document::new(name, tokens.iter().map(|t| t.to_string()).collect())
}

fn parse(name: &str, markdown: &str) -> Document {
    Document::parse(name, markdown, &Options::default())
}

#[test]
fn test_end_to_end_subheading_match() {
    // `#` maps to h2, `##` to h3: "Layout" is the section heading here.
    let article = parse(
        "flex",
        indoc! {"
            # Layout

            Flexbox basics

            ## Gap

            Use the gap property
        "},
    );

    let results = search(&[article], "gap");
    assert_eq!(results.total, 1);
    let record = &results.records[0];
    assert_eq!(record.title, "Gap");
    assert_eq!(record.breadcrumb, "Layout");
    assert_eq!(record.description, "Use the gap property");
    assert_eq!(record.anchor, "Gap");
    assert_eq!(record.source, "flex");
    assert_eq!(record.href(), "/flex/#Gap");
    assert_eq!(record.route(), "flex > Layout");
}

#[test]
fn test_no_matches_yields_empty_results() {
    let article = parse("flex", "# Layout\n\nFlexbox basics");
    let results = search(&[article], "grid-template");
    assert_eq!(results.total, 0);
    assert!(results.records.is_empty());
}

#[test]
fn test_section_heading_match_description_from_own_section() {
    let article = doc(
        "flex",
        &[
            "<h2 id=\"Alignment\">Alignment</h2>",
            "<p>How items align</p>",
        ],
    );
    let results = search(&[article], "alignment");
    assert_eq!(results.total, 1);
    let record = &results.records[0];
    assert_eq!(record.title, "Alignment");
    assert_eq!(record.breadcrumb, "Alignment");
    assert_eq!(record.description, "How items align");
}

#[test]
fn test_section_heading_description_empty_if_heading_intervenes() {
    let article = doc(
        "flex",
        &[
            "<h2 id=\"Alignment\">Alignment</h2>",
            "<h3 id=\"Sub\">Sub</h3>",
            "<p>text under sub</p>",
        ],
    );
    let results = search(&[article], "alignment");
    assert_eq!(results.total, 1);
    assert_eq!(results.records[0].description, "");
}

#[test]
fn test_paragraph_match_takes_nearest_heading_as_title() {
    let article = doc(
        "flex",
        &[
            "<h2 id=\"Layout\">Layout</h2>",
            "<h3 id=\"Gap\">Gap</h3>",
            "<p>row spacing</p>",
        ],
    );
    let results = search(&[article], "spacing");
    assert_eq!(results.total, 1);
    let record = &results.records[0];
    assert_eq!(record.title, "Gap");
    // the breadcrumb scan continues backward past the subheading title
    assert_eq!(record.breadcrumb, "Layout");
    assert_eq!(record.description, "row spacing");
}

#[test]
fn test_paragraph_match_without_preceding_heading() {
    let article = doc("flex", &["<p>orphan text</p>"]);
    let results = search(&[article], "orphan");
    assert_eq!(results.total, 1);
    assert_eq!(results.records[0].title, "");
    assert_eq!(results.records[0].breadcrumb, "");
    assert_eq!(results.records[0].description, "orphan text");
}

#[test]
fn test_consecutive_paragraphs_merge_into_one_description() {
    let article = parse(
        "flex",
        indoc! {"
            # Sizing
            The basis property sets size.

            It accepts lengths.

            # Order
            After the boundary.
        "},
    );
    let results = search(&[article], "basis");
    assert_eq!(results.total, 1);
    // every paragraph of the section joins the description; the next
    // section's paragraph does not
    let description = &results.records[0].description;
    assert!(description.contains("sets size."), "Got: {description}");
    assert!(description.contains("accepts lengths."), "Got: {description}");
    assert!(!description.contains("boundary"), "Got: {description}");
}

#[test]
fn test_adjacent_same_title_deduplicated() {
    let article = doc(
        "flex",
        &[
            "<h3 id=\"Gap\">Gap</h3>",
            "<p>the gap property</p>",
        ],
    );
    // both tokens match; the paragraph derives the same title "Gap"
    let results = search(&[article], "gap");
    assert_eq!(results.total, 1);
    assert_eq!(results.records[0].title, "Gap");
}

#[test]
fn test_same_title_separated_by_other_match_kept() {
    let documents = vec![
        doc("flex", &["<h2 id=\"Shared zip\">Shared zip</h2>"]),
        doc("grid", &["<h2 id=\"Other zip\">Other zip</h2>"]),
        doc("page", &["<h2 id=\"Shared zip\">Shared zip</h2>"]),
    ];
    let results = search(&documents, "zip");
    assert_eq!(results.total, 3);
    assert_eq!(results.records[0].title, "Shared zip");
    assert_eq!(results.records[1].title, "Other zip");
    assert_eq!(results.records[2].title, "Shared zip");
}

#[test]
fn test_dedup_carries_across_document_boundary() {
    let documents = vec![
        doc("flex", &["<h2 id=\"Shared zip\">Shared zip</h2>"]),
        doc("grid", &["<h2 id=\"Shared zip\">Shared zip</h2>"]),
    ];
    let results = search(&documents, "zip");
    assert_eq!(results.total, 1);
    assert_eq!(results.records[0].source, "flex");
}

#[test]
fn test_results_follow_document_order() {
    let documents = vec![
        doc("flex", &["<h2 id=\"B zip\">B zip</h2>"]),
        doc("grid", &["<h2 id=\"A zip\">A zip</h2>"]),
    ];
    let results = search(&documents, "zip");
    assert_eq!(results.total, 2);
    assert_eq!(results.records[0].source, "flex");
    assert_eq!(results.records[1].source, "grid");
}

#[test]
fn test_breadcrumb_ordinal_prefix_stripped() {
    let article = doc(
        "flex",
        &[
            "<h2 id=\"1. Layout\">1. Layout</h2>",
            "<h3 id=\"Gap\">Gap</h3>",
            "<p>gap text</p>",
        ],
    );
    let results = search(&[article], "gap text");
    assert_eq!(results.total, 1);
    let record = &results.records[0];
    assert_eq!(record.breadcrumb, "Layout");
    // only the breadcrumb is stripped; title and anchor keep their text
    assert_eq!(record.title, "Gap");
}

#[test]
fn test_inline_markup_stripped_from_record_text() {
    let article = parse(
        "flex",
        indoc! {"
            # Layout

            ## The `gap` shorthand

            Sets **row** and column gaps.
        "},
    );
    let results = search(&[article], "shorthand");
    assert_eq!(results.total, 1);
    let record = &results.records[0];
    assert_eq!(record.title, "The gap shorthand");
    assert_eq!(record.anchor, "The gap shorthand");
    assert_eq!(record.description, "Sets row and column gaps.");
}

#[test]
fn test_query_does_not_match_markup_attributes() {
    let article = parse("flex", "# Layout\n\nplain body");
    // tag and attribute text is invisible to the matcher
    assert_eq!(search(&[article.clone()], "h2").total, 0);
    assert_eq!(search(&[article], "id=").total, 0);
}

#[test]
fn test_code_blocks_and_lists_are_not_indexed() {
    let article = parse(
        "flex",
        indoc! {"
            ```
            secret zip code
            ```

            - zip in a list
        "},
    );
    assert_eq!(search(&[article], "zip").total, 0);
}

#[test]
fn test_results_serialize_for_presentation() {
    let article = parse("flex", "# Layout\n\nFlexbox basics");
    let results = search(&[article], "flexbox");
    let value = serde_json::to_value(&results).unwrap();
    assert_eq!(value["total"], 1);
    assert_eq!(value["records"][0]["source"], "flex");
    assert_eq!(value["records"][0]["title"], "Layout");
    assert_eq!(value["records"][0]["description"], "Flexbox basics");
}
