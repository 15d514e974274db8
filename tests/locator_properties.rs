use proptest::prelude::*;
use xpath_picker::{Document, ElementNode, LocatorCategory, NodeId, SelectorEngine, compute_locator};

fn page(children: Vec<ElementNode>) -> Document {
    Document::new(&ElementNode::new("html").with_child(ElementNode::new("body").with_children(children)))
}

fn select_one(doc: &Document, expression: &str) -> NodeId {
    let nodes = doc.evaluate(expression, doc.root()).unwrap();
    assert_eq!(nodes.len(), 1, "{} should select one node", expression);
    nodes[0]
}

fn elements(doc: &Document) -> Vec<NodeId> {
    doc.descendants(doc.root()).filter(|&n| doc.is_element(n)).collect()
}

/// `depth` nested plain divs inside `section#main`
fn nested_under_anchor(depth: usize) -> Document {
    let mut inner = ElementNode::new("div");
    for _ in 1..depth {
        inner = ElementNode::new("div").with_child(inner);
    }
    page(vec![
        ElementNode::new("section").with_attribute("id", "main").with_child(inner),
        ElementNode::new("section").with_child(ElementNode::new("div")),
    ])
}

fn innermost_div(doc: &Document) -> NodeId {
    let main = select_one(doc, r#"//section[@id="main"]"#);
    doc.descendants(main).filter(|&n| doc.is_element(n)).last().unwrap()
}

#[test]
fn test_hello_world_scenario() {
    let doc = Document::new(
        &ElementNode::new("div")
            .with_child(ElementNode::new("span").with_attribute("id", "x1").with_text("Hello"))
            .with_child(ElementNode::new("span").with_text("World")),
    );
    let world = select_one(&doc, "/div/span[2]");

    let locator = compute_locator(&doc, world).unwrap();
    assert_eq!(locator.expression, r#"//span[text()="World"]"#);
    assert_eq!(locator.category, LocatorCategory::Text);
    assert!(locator.unique);
}

#[test]
fn test_determinism() {
    let doc = page(vec![
        ElementNode::new("nav")
            .with_attribute("aria-label", "Main")
            .with_child(ElementNode::new("a").with_text("Home"))
            .with_child(ElementNode::new("a").with_text("Pricing")),
        ElementNode::new("div")
            .with_attribute("class", "css-1x2y3z")
            .with_child(ElementNode::new("input").with_attribute("name", "q"))
            .with_child(ElementNode::new("button").with_text("Search")),
    ]);
    let engine = SelectorEngine::new(&doc);

    for node in elements(&doc) {
        let first = engine.compute_locator(node).unwrap();
        let second = engine.compute_locator(node).unwrap();
        let fresh = compute_locator(&doc, node).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, fresh);
    }
}

#[test]
fn test_self_resolution_for_stable_ids() {
    let doc = page(vec![
        ElementNode::new("form")
            .with_child(ElementNode::new("input").with_attribute("id", "emailField"))
            .with_child(ElementNode::new("button").with_attribute("id", "submitBtn")),
        ElementNode::new("div").with_attribute("id", "sidebar"),
        ElementNode::new("button").with_attribute("id", "cancelBtn").with_text("Go"),
    ]);

    for id in ["emailField", "submitBtn", "sidebar", "cancelBtn"] {
        let target = select_one(&doc, &format!(r#"//*[@id="{}"]"#, id));
        let locator = compute_locator(&doc, target).unwrap();
        assert!(locator.unique);
        assert_eq!(doc.evaluate(&locator.expression, doc.root()).unwrap(), vec![target]);
    }
}

#[test]
fn test_text_outranks_direct() {
    let doc = page(vec![
        ElementNode::new("button").with_attribute("id", "submitBtn").with_text("Submit"),
        ElementNode::new("button").with_text("Reset"),
    ]);
    let submit = select_one(&doc, r#"//*[@id="submitBtn"]"#);

    let engine = SelectorEngine::new(&doc);
    let candidates = engine.generate_candidates(submit);
    assert!(candidates.iter().any(|c| c.category == LocatorCategory::Direct));

    let locator = engine.compute_locator(submit).unwrap();
    assert_eq!(locator.category, LocatorCategory::Text);
    assert_eq!(locator.expression, r#"//button[text()="Submit"]"#);
}

#[test]
fn test_generated_ids_are_never_used() {
    let doc = page(vec![
        ElementNode::new("div")
            .with_attribute("id", "row-482913")
            .with_child(ElementNode::new("span").with_text("Alice")),
        ElementNode::new("div")
            .with_attribute("id", "row-482914")
            .with_child(ElementNode::new("span").with_text("Bob")),
    ]);
    let engine = SelectorEngine::new(&doc);

    for node in elements(&doc) {
        let locator = engine.compute_locator(node).unwrap();
        assert!(!locator.expression.contains("row-4829"), "{}", locator.expression);
        assert!(locator.unique);
    }

    let row = select_one(&doc, r#"//div[@id="row-482913"]"#);
    let locator = engine.compute_locator(row).unwrap();
    assert_eq!(locator.expression, "/html/body/div[1]");
    assert_eq!(locator.category, LocatorCategory::FullPath);
}

#[test]
fn test_anchor_within_hop_bound() {
    let doc = nested_under_anchor(4);
    let target = innermost_div(&doc);
    let engine = SelectorEngine::new(&doc);

    assert_eq!(engine.find_anchor(target).hops, 4);
    let locator = engine.compute_locator(target).unwrap();
    assert_eq!(locator.category, LocatorCategory::Relative);
    assert_eq!(locator.expression, r#"//section[@id="main"]/div/div/div/div"#);
}

#[test]
fn test_anchor_beyond_hop_bound() {
    let doc = nested_under_anchor(5);
    let target = innermost_div(&doc);
    let engine = SelectorEngine::new(&doc);

    let anchor = engine.find_anchor(target);
    assert_eq!(anchor.node, target);
    assert_eq!(anchor.hops, 0);

    let locator = engine.compute_locator(target).unwrap();
    assert!(matches!(locator.category, LocatorCategory::Direct | LocatorCategory::FullPath));
    assert_eq!(locator.expression, r#"//section[@id="main"]/div/div/div/div/div"#);
    assert!(locator.unique);
}

#[test]
fn test_deep_target_degrades_to_non_unique() {
    let doc = nested_under_anchor(10);
    let target = innermost_div(&doc);

    let locator = compute_locator(&doc, target).unwrap();
    assert_eq!(locator.category, LocatorCategory::FullPath);
    assert_eq!(locator.expression, "//div/div/div/div/div/div/div/div");
    assert!(!locator.unique);
    assert!(doc.evaluate(&locator.expression, doc.root()).unwrap().contains(&target));
}

#[test]
fn test_full_path_on_featureless_document() {
    let row = |cells: usize| {
        ElementNode::new("div").with_children((0..cells).map(|_| ElementNode::new("span")).collect())
    };
    let doc = page(vec![row(2), row(3), ElementNode::new("ul").with_child(ElementNode::new("li")), row(1)]);
    let engine = SelectorEngine::new(&doc);

    for node in elements(&doc) {
        let path = engine.build_full_path(node);
        assert!(!path.is_empty());
        assert_eq!(doc.evaluate(&path, doc.root()).unwrap(), vec![node], "{}", path);
    }

    let cell = select_one(&doc, "/html/body/div[2]/span[3]");
    assert_eq!(engine.build_full_path(cell), "/html/body/div[2]/span[3]");
}

#[test]
fn test_quotes_in_text_and_attributes() {
    let doc = page(vec![
        ElementNode::new("p").with_text(r#"He said "hi""#),
        ElementNode::new("input").with_attribute("placeholder", r#"6" screen"#),
    ]);

    let quote = select_one(&doc, "//p");
    let locator = compute_locator(&doc, quote).unwrap();
    assert_eq!(locator.expression, r#"//p[text()=concat("He said ", '"', "hi", '"')]"#);
    assert_eq!(doc.evaluate(&locator.expression, doc.root()).unwrap(), vec![quote]);

    let input = select_one(&doc, "//input");
    let locator = compute_locator(&doc, input).unwrap();
    assert_eq!(locator.expression, r#"//input[@placeholder=concat("6", '"', " screen")]"#);
    assert!(locator.unique);
}

#[test]
fn test_split_text_is_never_matched_whole() {
    let doc = page(vec![
        ElementNode::new("li")
            .with_text("Home")
            .with_child(ElementNode::new("span"))
            .with_text("Page"),
        ElementNode::new("p")
            .with_text("Line one")
            .with_child(ElementNode::new("br"))
            .with_text("Line two"),
        ElementNode::new("p")
            .with_text("Total: ")
            .with_child(ElementNode::new("b").with_text("5"))
            .with_text(" items"),
    ]);

    for (expression, joined, path) in [
        ("//li", "HomePage", "/html/body/li"),
        ("/html/body/p[1]", "Line oneLine two", "/html/body/p[1]"),
        ("/html/body/p[2]", "Total: 5 items", "/html/body/p[2]"),
    ] {
        let target = select_one(&doc, expression);
        assert_eq!(doc.text_content(target), joined);

        let locator = compute_locator(&doc, target).unwrap();
        assert_eq!(locator.expression, path);
        assert_eq!(locator.category, LocatorCategory::FullPath);
        assert!(locator.unique);
    }
}

#[test]
fn test_long_text_uses_prefix() {
    let text = "Terms and conditions apply to every purchase made through the store";
    let doc = page(vec![ElementNode::new("p").with_text(text), ElementNode::new("p").with_text("Other")]);
    let paragraph = select_one(&doc, "/html/body/p[1]");

    let locator = compute_locator(&doc, paragraph).unwrap();
    assert_eq!(locator.category, LocatorCategory::Text);
    assert_eq!(
        locator.expression,
        r#"//p[contains(text(),"Terms and conditions apply to every purc")]"#
    );
}

const TAGS: &[&str] = &["span", "button", "div"];
const IDS: &[&str] = &["submitBtn", "row-482913", "nav", "item42", "cart", "ab"];
const TEXTS: &[&str] = &["Save", "Order 2024", "Hello", "Add to cart"];

fn cell() -> impl Strategy<Value = ElementNode> {
    (
        prop::sample::select(TAGS),
        prop::option::of(prop::sample::select(IDS)),
        prop::option::of(prop::sample::select(TEXTS)),
    )
        .prop_map(|(tag, id, text)| {
            let mut node = ElementNode::new(tag);
            if let Some(id) = id {
                node = node.with_attribute("id", id);
            }
            if let Some(text) = text {
                node = node.with_text(text);
            }
            node
        })
}

fn grid() -> impl Strategy<Value = Document> {
    prop::collection::vec(prop::collection::vec(cell(), 1..4), 1..4).prop_map(|rows| {
        page(
            rows.into_iter()
                .map(|cells| ElementNode::new("div").with_children(cells))
                .collect(),
        )
    })
}

proptest! {
    #[test]
    fn unique_locators_select_their_target(doc in grid()) {
        let engine = SelectorEngine::new(&doc);
        for node in elements(&doc) {
            let locator = engine.compute_locator(node).unwrap();
            prop_assert_eq!(&locator, &engine.compute_locator(node).unwrap());
            prop_assert!(!locator.expression.contains("row-482913"));
            prop_assert!(!locator.expression.contains("item42"));
            if locator.unique {
                prop_assert_eq!(doc.evaluate(&locator.expression, doc.root()).unwrap(), vec![node]);
            }
        }
    }
}
