//! NIF entry points for `Elixir.VcmXml.Native`

use rustler::{Binary, Encoder, Env, NifResult, ResourceArc, Term};

use crate::dom::Document;
use crate::error::ParseError;
use crate::resource::{DocumentRef, DocumentResource};
use crate::term::{element_to_term, error_to_term, str_to_binary};

rustler::atoms! {
    ok,
    error,
}

fn document_result<'a>(env: Env<'a>, result: Result<Document, ParseError>) -> Term<'a> {
    match result {
        Ok(doc) => {
            let arc = ResourceArc::new(DocumentResource::new(doc));
            (ok(), arc).encode(env)
        }
        Err(e) => (error(), error_to_term(env, &e)).encode(env),
    }
}

/// Parse XML bytes (returns {:ok, doc} or {:error, {kind, file, line, column, message}})
#[rustler::nif(schedule = "DirtyCpu")]
fn parse<'a>(env: Env<'a>, filename: &str, input: Binary<'a>) -> NifResult<Term<'a>> {
    Ok(document_result(env, crate::parse_bytes(filename, input.as_slice())))
}

/// Parse VCM source under `root_tag`
#[rustler::nif(schedule = "DirtyCpu")]
fn parse_vcm<'a>(
    env: Env<'a>,
    filename: &str,
    input: &str,
    root_tag: &str,
) -> NifResult<Term<'a>> {
    Ok(document_result(env, crate::parse_vcm(filename, input, root_tag)))
}

/// Root element as `{:element, tag, attrs, children}`
#[rustler::nif]
fn get_root<'a>(env: Env<'a>, doc_ref: DocumentRef) -> NifResult<Term<'a>> {
    doc_ref
        .with_document(|doc| element_to_term(env, doc.root()))
        .map_err(rustler::Error::RaiseAtom)
}

/// Serialize a document back to XML
#[rustler::nif]
fn stringify<'a>(
    env: Env<'a>,
    doc_ref: DocumentRef,
    pretty: bool,
    indent: &str,
) -> NifResult<Term<'a>> {
    let xml = doc_ref
        .with_document(|doc| crate::stringify(doc, pretty, indent))
        .map_err(rustler::Error::RaiseAtom)?;
    Ok(str_to_binary(env, &xml))
}

rustler::init!("Elixir.VcmXml.Native");
