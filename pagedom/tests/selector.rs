use pagedom::{Combinator, Document, Node, Selector, SelectorError, SimpleSelector};

fn page() -> Document {
    let mut doc = Document::new();
    let root = doc.root();

    let slider = doc.append(root, Node::new("ul").id("header_image_slider"));
    doc.append(slider, Node::new("li"));
    doc.append(slider, Node::new("li"));

    let menu = doc.append(root, Node::new("ul").id("menu"));
    let item = doc.append(menu, Node::new("li").class("menu-item-has-children"));
    let sub = doc.append(item, Node::new("ul").class("sub-menu"));
    doc.append(sub, Node::new("li"));

    let title = doc.append(root, Node::new("h4").class("panel-title"));
    doc.append(title, Node::new("a").attr("href", "#p1"));
    let wrapper = doc.append(title, Node::new("span"));
    doc.append(wrapper, Node::new("a").attr("href", "#p2"));

    doc
}

// =============================================================================
// Parsing
// =============================================================================

#[test]
fn test_parse_class() {
    let sel: Selector = ".panel-collapse".parse().unwrap();
    assert_eq!(sel.first, SimpleSelector::class("panel-collapse"));
    assert!(sel.rest.is_empty());
}

#[test]
fn test_parse_id_and_tag() {
    let sel: Selector = "#menu_principal_container".parse().unwrap();
    assert_eq!(sel.first.element_id.as_deref(), Some("menu_principal_container"));

    let sel: Selector = "form".parse().unwrap();
    assert_eq!(sel.first.tag.as_deref(), Some("form"));
}

#[test]
fn test_parse_compound() {
    let sel: Selector = "a.collapsed".parse().unwrap();
    assert_eq!(sel.first.tag.as_deref(), Some("a"));
    assert_eq!(sel.first.classes, vec!["collapsed".to_string()]);
}

#[test]
fn test_parse_descendant_and_child() {
    let sel: Selector = "#header_image_slider li".parse().unwrap();
    assert_eq!(sel.rest.len(), 1);
    assert_eq!(sel.rest[0].0, Combinator::Descendant);

    let sel: Selector = ".panel-title > a".parse().unwrap();
    assert_eq!(sel.rest[0].0, Combinator::Child);

    // No whitespace around the combinator.
    let tight: Selector = ".panel-title>a".parse().unwrap();
    assert_eq!(tight, sel);
}

#[test]
fn test_parse_errors() {
    assert_eq!("".parse::<Selector>(), Err(SelectorError::Empty));
    assert_eq!("   ".parse::<Selector>(), Err(SelectorError::Empty));
    assert!(matches!(
        "> a".parse::<Selector>(),
        Err(SelectorError::DanglingCombinator(_))
    ));
    assert!(matches!(
        "a >".parse::<Selector>(),
        Err(SelectorError::DanglingCombinator(_))
    ));
    assert_eq!(".".parse::<Selector>(), Err(SelectorError::EmptyName('.')));
    assert_eq!(
        "a[href]".parse::<Selector>(),
        Err(SelectorError::UnexpectedChar('['))
    );
}

// =============================================================================
// Querying
// =============================================================================

#[test]
fn test_query_by_class() {
    let doc = page();
    let hits = doc.select(".sub-menu").unwrap();
    assert_eq!(hits.len(), 1);
    assert!(doc.has_class(hits[0], "sub-menu"));
}

#[test]
fn test_query_descendant_scopes_to_ancestor() {
    let doc = page();
    // Only the slider's items, not the menu's.
    let slides = doc.select("#header_image_slider li").unwrap();
    assert_eq!(slides.len(), 2);

    let all_items = doc.select("li").unwrap();
    assert_eq!(all_items.len(), 4);
}

#[test]
fn test_query_child_requires_direct_parent() {
    let doc = page();
    // Two links under the title, but only one is a direct child.
    let direct = doc.select(".panel-title > a").unwrap();
    assert_eq!(direct.len(), 1);
    assert_eq!(doc.attr(direct[0], "href"), Some("#p1"));

    let nested = doc.select(".panel-title a").unwrap();
    assert_eq!(nested.len(), 2);
}

#[test]
fn test_query_no_match_is_empty_not_error() {
    let doc = page();
    assert!(doc.select(".does-not-exist").unwrap().is_empty());
}

#[test]
fn test_query_results_in_tree_order() {
    let doc = page();
    let items = doc.select("li").unwrap();
    let mut sorted = items.clone();
    sorted.sort();
    assert_eq!(items, sorted);
}
