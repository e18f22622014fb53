use std::path::PathBuf;

use xml_compare_core::{
    compare_documents, parse, parse_file, DiffConfiguration, XmlDocument, XmlInput, XmlNode,
};

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("fixtures")
        .join(path)
}

#[test]
fn display_then_parse_preserves_tree_shape() {
    let first = parse_file(&fixture("order.xml")).expect("initial parse should succeed");
    let written = first.to_string();
    let second = parse(written.as_bytes()).expect("re-parse should succeed");
    assert_eq!(first, second);
}

#[test]
fn serialized_document_is_identical_to_its_tree() {
    let doc = parse_file(&fixture("order_compact.xml")).expect("parse");
    let text = XmlInput::from(doc.to_string());
    let tree = XmlInput::from_document(doc);

    let result = compare_documents(&text, &tree, &DiffConfiguration::default()).expect("compare");
    assert!(result.identical());
}

#[test]
fn built_tree_compares_against_text() {
    let built = XmlDocument::from(
        XmlNode::new("a")
            .with_attribute("x", "1")
            .with_child(XmlNode::new("b").with_text("t")),
    );
    let result = compare_documents(
        &XmlInput::from_document(built),
        &XmlInput::from("<a x=\"1\"><b>t</b></a>"),
        &DiffConfiguration::default(),
    )
    .expect("compare");
    assert!(result.identical());
}
