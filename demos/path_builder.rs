//! An example of building paths with the [`path!`] macro and the mutating
//! builder methods, then resolving them against a document tree.
use json5kit::ast::{ArrayNode, Node, ObjectNode};
use json5kit::path;
use json5kit::path::{Path, Segment};
use json5kit::tokenizer::{Position, tokenize};

fn main() {
    // Construct the path "foo.bar[3]"
    let built: Path = path!["$", "foo", "bar", 3].expect("valid segments");
    assert_eq!("foo.bar[3]", built.to_string());

    // Extend it in place: "config.foo.bar[3].name"
    let mut extended = built.clone();
    extended
        .prepend([Segment::key("config")])
        .push(Segment::key("name"));
    assert_eq!("config.foo.bar[3].name", extended.to_string());

    // Digit-leading keys are rendered in brackets and still parse back
    let odd = path!["0", "x"].expect("valid segments");
    assert_eq!(r#"["0"].x"#, odd.to_string());
    assert_eq!(odd, odd.to_string().parse().expect("valid path"));

    // Resolve a path against a small hand-built tree: { "users": ["ada"] }
    let tokens = tokenize("'ada'");
    let mut users = ArrayNode::new(Position::default());
    users.push(Node::from_token(&tokens[0]).expect("value token"));
    let mut root = ObjectNode::new(Position::default());
    root.insert("users", Node::Array(users));
    let root = Node::Object(root);

    let first = root
        .get(&"users[0]".parse().expect("valid path"))
        .and_then(Node::as_string)
        .expect("users[0] is a string");
    assert_eq!("ada", first.value());
    println!("users[0] = {:?} (depth {})", first.value(), root.depth());
}
