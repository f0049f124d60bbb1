use super::{BodyDecoder, Response};
use crate::error::RestError;
use crate::media::{self, MediaType};
use encoding_rs::WINDOWS_1252;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize, PartialEq)]
struct Item {
    id: u32,
    name: String,
}

fn response(status: u16, content_type: Option<&str>, body: &'static [u8]) -> Response {
    let response = Response::new(
        StatusCode::from_u16(status).expect("status"),
        HeaderMap::new(),
        body,
    );
    match content_type {
        Some(ct) => response.with_content_type(&ct.parse::<MediaType>().expect("mime")),
        None => response,
    }
}

#[test]
fn decoder_selection_follows_media_type() {
    assert_eq!(BodyDecoder::for_media_type(None), BodyDecoder::Json);
    assert_eq!(
        BodyDecoder::for_media_type(Some(&media::APPLICATION_JSON)),
        BodyDecoder::Json
    );
    assert_eq!(
        BodyDecoder::for_media_type(Some(&media::APPLICATION_WWW_FORM_URLENCODED)),
        BodyDecoder::Form
    );
    assert_eq!(
        BodyDecoder::for_media_type(Some(&media::application_xml())),
        BodyDecoder::Xml
    );
    assert_eq!(
        BodyDecoder::for_media_type(Some(&media::TEXT_PLAIN)),
        BodyDecoder::Text
    );
}

#[test]
fn read_entity_decodes_xml() {
    let res = response(
        200,
        Some("application/xml; charset=utf-8"),
        b"<item><id>3</id><name>gadget</name></item>",
    );
    let item: Item = res.read_entity().expect("xml body");
    assert_eq!(
        item,
        Item {
            id: 3,
            name: "gadget".to_string()
        }
    );
}

#[test]
fn broken_xml_is_a_deserialization_error() {
    let res = response(200, Some("text/xml"), b"<item><id>x</id></item>");
    match res.read_entity::<Item>() {
        Err(RestError::Deserialization { media_type, .. }) => assert_eq!(media_type, "text/xml"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn read_entity_decodes_json() {
    let res = response(
        200,
        Some("application/json"),
        br#"{"id":7,"name":"widget"}"#,
    );
    let item: Item = res.read_entity().expect("json body");
    assert_eq!(
        item,
        Item {
            id: 7,
            name: "widget".to_string()
        }
    );
}

#[test]
fn read_entity_decodes_vendor_json() {
    let res = response(
        200,
        Some("application/vnd.api+json"),
        br#"{"id":1,"name":"a"}"#,
    );
    let item: Item = res.read_entity().expect("json body");
    assert_eq!(item.id, 1);
}

#[test]
fn read_entity_decodes_form() {
    let res = response(
        200,
        Some("application/x-www-form-urlencoded"),
        b"token=abc&expires=60",
    );
    let map: HashMap<String, String> = res.read_entity().expect("form body");
    assert_eq!(map.get("token").map(String::as_str), Some("abc"));
    assert_eq!(map.get("expires").map(String::as_str), Some("60"));
}

#[test]
fn read_entity_reads_text_as_string() {
    let res = response(200, Some("text/plain"), b"hello");
    let text: String = res.read_entity().expect("text body");
    assert_eq!(text, "hello");
}

#[test]
fn non_success_bodies_are_still_decoded() {
    let res = response(
        404,
        Some("application/json"),
        br#"{"id":0,"name":"missing"}"#,
    );
    assert!(!res.is_success());
    let item: Item = res.read_entity().expect("decoded regardless of status");
    assert_eq!(item.name, "missing");
}

#[test]
fn malformed_json_is_a_deserialization_error() {
    let res = response(200, Some("application/json"), b"not json");
    let err = res.read_entity::<Item>().expect_err("bad json");
    match err {
        RestError::Deserialization { media_type, .. } => {
            assert_eq!(media_type, "application/json")
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn text_cannot_become_a_struct() {
    let res = response(200, Some("text/html"), b"<p>hi</p>");
    let err = res.read_entity::<Item>().expect_err("html is not an item");
    assert!(matches!(err, RestError::Deserialization { .. }));
}

#[test]
fn missing_content_type_is_reported_as_unspecified() {
    let res = response(200, None, b"<xml/>");
    match res.read_entity::<Item>() {
        Err(RestError::Deserialization { media_type, .. }) => {
            assert_eq!(media_type, "unspecified")
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn text_uses_declared_charset() {
    let (encoded, _, _) = WINDOWS_1252.encode("\u{00A3}5");
    let res = Response::new(StatusCode::OK, HeaderMap::new(), encoded.into_owned())
        .with_content_type(&"text/plain; charset=windows-1252".parse().expect("mime"));
    assert_eq!(res.text(), "\u{00A3}5");
}

#[test]
fn text_defaults_to_utf8() {
    let res = response(200, None, "caf\u{00E9}".as_bytes());
    assert_eq!(res.text(), "caf\u{00E9}");
}

#[test]
fn json_ignores_declared_type() {
    let res = response(200, Some("text/plain"), br#"{"id":3,"name":"c"}"#);
    let item: Item = res.json().expect("json body");
    assert_eq!(item.id, 3);
}
