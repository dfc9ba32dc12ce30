//! Public API behaviour across both dialects

use vcmxml::{
    parse, parse_batch, parse_bytes, parse_vcm, stringify, stringify_element, Element, ErrorKind,
    Node, Vec3, Vec4, WriteOptions, TEXT_TAG,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn first_element(element: &Element) -> &Element {
    element.elements().next().expect("child element")
}

#[test]
fn empty_element() {
    init_tracing();
    let doc = parse("a.xml", "<a/>").unwrap();
    assert_eq!(doc.root().tag(), "a");
    assert!(doc.root().attributes().is_empty());
    assert_eq!(doc.root().size(), 0);
    assert_eq!(doc.version(), "1.0");
}

#[test]
fn mixed_children() {
    let doc = parse("a.xml", r#"<a x="1"><b/>text</a>"#).unwrap();
    let root = doc.root();
    assert_eq!(root.attr("x").unwrap().as_int().unwrap(), 1);
    let tags: Vec<_> = root.children().iter().map(Node::tag).collect();
    assert_eq!(tags, vec!["b", TEXT_TAG]);
    assert_eq!(root.sub(1).and_then(Node::as_text), Some("text"));
}

#[test]
fn tag_mismatch_is_syntax_error() {
    let err = parse("bad.xml", "<a><b></a>").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Syntax);
    assert_eq!(err.filename, "bad.xml");
    assert!(err.to_string().starts_with("bad.xml:1:"));
}

#[test]
fn non_utf8_declaration_is_encoding_error() {
    let err = parse(
        "latin.xml",
        r#"<?xml version="1.0" encoding="ISO-8859-1"?><a/>"#,
    )
    .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Encoding);
}

#[test]
fn doctype_is_unsupported() {
    let err = parse("d.xml", "<!DOCTYPE html>\n<html/>").unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnsupportedFeature);
    assert_eq!(err.line, 1);
}

#[test]
fn error_positions_are_one_based() {
    let err = parse("p.xml", "<a>\n  <b x=1/>\n</a>").unwrap_err();
    assert_eq!(err.message, "string literal expected");
    assert_eq!(err.line, 2);
}

#[test]
fn typed_attributes() {
    let doc = parse(
        "t.xml",
        r##"<t pos="1,2,3" scale="5" bad="1,2" tint="#FF8000" shade="#00000080" on="true"/>"##,
    )
    .unwrap();
    let t = doc.root();
    assert_eq!(t.attr("pos").unwrap().as_vec3().unwrap(), Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(t.attr("scale").unwrap().as_vec3().unwrap(), Vec3::new(5.0, 5.0, 5.0));
    let err = t.attr("bad").unwrap().as_vec3().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Attribute);

    let tint = t.attr("tint").unwrap().as_color().unwrap();
    assert_eq!(tint.x, 1.0);
    assert!((tint.y - 128.0 / 255.0).abs() < 1e-6);
    assert_eq!((tint.z, tint.w), (0.0, 1.0));
    assert_eq!(
        t.attr("shade").unwrap().as_color().unwrap(),
        Vec4::new(0.0, 0.0, 0.0, 128.0 / 255.0)
    );
    assert!(t.attr("on").unwrap().as_bool());
}

#[test]
fn missing_attribute() {
    let doc = parse("m.xml", "<a/>").unwrap();
    assert!(doc.root().attr("missing").is_err());
    assert_eq!(doc.root().attr_or("missing", "fallback").text(), "fallback");
}

#[test]
fn vcm_scope_nesting() {
    init_tracing();
    let doc = parse_vcm("l.vcm", r#"@child name "v" { @grandchild }"#, "root").unwrap();
    let root = doc.root();
    assert_eq!(root.tag(), "root");
    assert_eq!(root.size(), 1);
    let child = first_element(root);
    assert_eq!(child.tag(), "child");
    assert_eq!(child.attr("name").unwrap().text(), "v");
    assert_eq!(first_element(child).tag(), "grandchild");
}

#[test]
fn vcm_to_xml() {
    let src = "# layout\n@panel size \"400,300\" {\n    @label text 'Hi \"there\"'\n    @button\n}\n";
    let doc = parse_vcm("ui.vcm", src, "layout").unwrap();
    let xml = stringify(&doc, true, "  ");
    let expected = concat!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" ?>\n",
        "<layout>\n",
        "  <panel size=\"400,300\">\n",
        "    <label text=\"Hi \\\"there\\\"\"/>\n",
        "    <button/>\n",
        "  </panel>\n",
        "</layout>",
    );
    assert_eq!(xml, expected);

    let back = parse("ui.xml", &xml).unwrap();
    assert_eq!(back.root(), doc.root());
}

#[test]
fn comment_split_text_roundtrip() {
    let doc = parse("c.xml", "<a>x<!--c-->y</a>").unwrap();
    assert_eq!(doc.root().size(), 2);

    for options in [WriteOptions::compact(), WriteOptions::default()] {
        let xml = vcmxml::stringify_with(&doc, &options);
        let again = parse("c.xml", &xml).unwrap();
        assert_eq!(again.root().size(), 2, "{}", xml);
        assert_eq!(again.root().sub(0).and_then(Node::as_text), Some("x"));
    }
}

#[test]
fn subtree_serialization() {
    let doc = parse("s.xml", "<a><b k=\"v\"><c/></b></a>").unwrap();
    let b = first_element(doc.root());
    assert_eq!(
        stringify_element(b, &WriteOptions::compact()),
        "<b k=\"v\"><c/></b>"
    );
}

#[test]
fn bytes_and_batch() {
    let doc = parse_bytes("b.xml", "\u{FEFF}<a>é</a>".as_bytes()).unwrap();
    assert_eq!(doc.root().text_content(), "é");

    let err = parse_bytes("w.xml", &[0xFE, 0xFF, 0, b'<']).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Encoding);

    let results = parse_batch(&[("1.xml", "<one/>"), ("2.xml", "<two>")]);
    assert!(results[0].is_ok());
    assert_eq!(results[1].as_ref().unwrap_err().filename, "2.xml");
}
