use xpath_picker::{
    AddOutcome, Document, ElementAction, ElementNode, LocatorCategory, PickerEvent, PickerSession, PickerState,
    SelectionList,
};

fn login_page() -> Document {
    Document::new(
        &ElementNode::new("html").with_child(
            ElementNode::new("body")
                .with_child(ElementNode::new("h1").with_text("Sign in"))
                .with_child(
                    ElementNode::new("form")
                        .with_attribute("id", "login")
                        .with_child(
                            ElementNode::new("label")
                                .with_text("Email")
                                .with_child(ElementNode::new("input").with_attribute("type", "email")),
                        )
                        .with_child(ElementNode::new("input").with_attribute("type", "checkbox"))
                        .with_child(
                            ElementNode::new("select")
                                .with_attribute("name", "region")
                                .with_child(ElementNode::new("option").with_text("EU")),
                        )
                        .with_child(ElementNode::new("button").with_text("Continue")),
                )
                .with_child(ElementNode::new("div").with_child(ElementNode::new("div"))),
        ),
    )
}

fn pick(doc: &Document, session: PickerSession, expression: &str) -> (PickerSession, xpath_picker::Selection) {
    let target = doc.evaluate(expression, doc.root()).unwrap()[0];
    let session = session
        .handle(doc, PickerEvent::Start)
        .handle(doc, PickerEvent::Hover(target))
        .handle(doc, PickerEvent::Click(target));
    let (session, selection) = session.take_selection();
    (session, selection.expect("click should resolve"))
}

#[test]
fn test_picking_builds_a_selection_list() {
    let doc = login_page();
    let mut list = SelectionList::new();
    let session = PickerSession::new();

    let (session, email) = pick(&doc, session, "//label/input");
    assert_eq!(email.action, ElementAction::Fill);
    assert_eq!(email.locator.category, LocatorCategory::Relative);
    assert_eq!(email.selector(), r#"//label[text()="Email"]/input → fill()"#);
    assert_eq!(list.add(&email), AddOutcome::Added(0));

    let (session, remember) = pick(&doc, session, r#"//input[@type="checkbox"]"#);
    assert_eq!(remember.action, ElementAction::Check);
    assert_eq!(list.add(&remember), AddOutcome::Added(1));

    let (session, region) = pick(&doc, session, "//select");
    assert_eq!(region.action, ElementAction::SelectOption);
    assert_eq!(region.selector(), r#"//select[@name="region"] → selectOption()"#);
    assert_eq!(list.add(&region), AddOutcome::Added(2));

    let (session, submit) = pick(&doc, session, "//button");
    assert_eq!(submit.selector(), r#"//button[text()="Continue"] → click()"#);
    assert_eq!(list.add(&submit), AddOutcome::Added(3));

    // picking the same element again is a duplicate
    let (session, again) = pick(&doc, session, "//button");
    assert_eq!(list.add(&again), AddOutcome::Duplicate);

    // a featureless element only has an absolute path, which the list refuses
    let (session, inner) = pick(&doc, session, "/html/body/div/div");
    assert_eq!(inner.locator.expression, "/html/body/div/div");
    assert_eq!(list.add(&inner), AddOutcome::Absolute);

    assert_eq!(session.state(), &PickerState::Idle);
    assert_eq!(list.len(), 4);

    let restored = SelectionList::from_json(&list.to_json().unwrap()).unwrap();
    assert_eq!(restored.iter().collect::<Vec<_>>(), list.iter().collect::<Vec<_>>());
}

#[test]
fn test_hover_preview_follows_pointer() {
    let doc = login_page();
    let heading = doc.evaluate("//h1", doc.root()).unwrap()[0];
    let button = doc.evaluate("//button", doc.root()).unwrap()[0];

    let session = PickerSession::new()
        .handle(&doc, PickerEvent::Start)
        .handle(&doc, PickerEvent::Hover(heading));
    let first = match session.state() {
        PickerState::Highlighted(preview) => preview.clone(),
        other => panic!("expected highlight, got {:?}", other),
    };
    assert_eq!(first.node, heading);
    assert_eq!(first.candidate.expression, r#"//h1[text()="Sign in"]"#);

    let session = session.handle(&doc, PickerEvent::Hover(button));
    match session.state() {
        PickerState::Highlighted(preview) => {
            assert_eq!(preview.node, button);
            assert_eq!(preview.element, "<button>");
        }
        other => panic!("expected highlight, got {:?}", other),
    }

    // hovering the same element twice gives the same preview
    let session = session.handle(&doc, PickerEvent::Hover(heading));
    assert_eq!(session.state(), &PickerState::Highlighted(first));

    let session = session.handle(&doc, PickerEvent::Cancel);
    assert_eq!(session.state(), &PickerState::Idle);
}
