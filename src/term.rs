//! Elixir Term Conversion Utilities
//!
//! Converts documents and parse errors to Elixir terms.

use rustler::{Encoder, Env, NewBinary, Term};

use crate::dom::{Element, Node};
use crate::error::{ErrorKind, ParseError};

// Pre-defined atoms for efficiency - created once at compile time
rustler::atoms! {
    element,
    syntax,
    unsupported_feature,
    encoding,
    attribute,
}

/// One element whose children are still being converted
struct Frame<'e, 'a> {
    element: &'e Element,
    next: usize,
    children: Vec<Term<'a>>,
}

/// Convert an element subtree to `{:element, tag, [{name, value}], children}`.
/// Text children become binaries. Built bottom-up with an explicit stack.
pub fn element_to_term<'a>(env: Env<'a>, root: &Element) -> Term<'a> {
    let mut stack = vec![Frame {
        element: root,
        next: 0,
        children: Vec::with_capacity(root.size()),
    }];

    loop {
        let Some(frame) = stack.last_mut() else {
            return rustler::types::atom::nil().encode(env);
        };

        if let Some(child) = frame.element.sub(frame.next) {
            frame.next += 1;
            match child {
                Node::Text(text) => frame.children.push(str_to_binary(env, text)),
                Node::Element(e) => stack.push(Frame {
                    element: e,
                    next: 0,
                    children: Vec::with_capacity(e.size()),
                }),
            }
            continue;
        }

        let Some(done) = stack.pop() else {
            return rustler::types::atom::nil().encode(env);
        };
        let term = finish_element(env, done);
        match stack.last_mut() {
            Some(parent) => parent.children.push(term),
            None => return term,
        }
    }
}

fn finish_element<'a>(env: Env<'a>, frame: Frame<'_, 'a>) -> Term<'a> {
    let element = frame.element;

    // Build lists in reverse with prepend
    let mut attrs = Term::list_new_empty(env);
    for attr in element.attributes().iter().rev() {
        let pair = (str_to_binary(env, attr.name()), str_to_binary(env, attr.text()));
        attrs = attrs.list_prepend(pair.encode(env));
    }

    let mut children = Term::list_new_empty(env);
    for child in frame.children.into_iter().rev() {
        children = children.list_prepend(child);
    }

    (element(), str_to_binary(env, element.tag()), attrs, children).encode(env)
}

/// `{kind, filename, line, column, message}`
pub fn error_to_term<'a>(env: Env<'a>, error: &ParseError) -> Term<'a> {
    let kind = match error.kind {
        ErrorKind::Syntax => syntax(),
        ErrorKind::UnsupportedFeature => unsupported_feature(),
        ErrorKind::Encoding => encoding(),
        ErrorKind::Attribute => attribute(),
    };
    (
        kind,
        str_to_binary(env, &error.filename),
        error.line,
        error.column,
        str_to_binary(env, &error.message),
    )
        .encode(env)
}

/// Convert a string to a binary term (more efficient than .encode())
#[inline]
pub fn str_to_binary<'a>(env: Env<'a>, s: &str) -> Term<'a> {
    let bytes = s.as_bytes();
    let mut binary = NewBinary::new(env, bytes.len());
    binary.as_mut_slice().copy_from_slice(bytes);
    binary.into()
}
