//! Tests for the payload builder and text encoding.

use serde_json::json;
use token_core::encoding::{decode_text, encode_text};
use token_core::payload::{
    self, Argument, RoyaltyOptions, TokenMutability, TokenParams, TokenProperties,
};
use token_core::{Address, TokenDataId, TokenId};

fn alice() -> Address {
    Address::from_hex("0xa11ce").unwrap()
}

fn bob() -> Address {
    Address::from_hex("0xb0b").unwrap()
}

/// Tests that text survives encoding for non-ASCII input.
#[test]
fn test_encoding_roundtrip() {
    for text in ["", "Col", "Tok", "héllo wörld", "トークン", "emoji 🎨"] {
        let encoded = encode_text(text);
        assert!(!encoded.starts_with("0x"));
        assert_eq!(decode_text(&encoded).unwrap(), text);
        assert_eq!(decode_text(&format!("0x{}", encoded)).unwrap(), text);
    }

    assert_eq!(encode_text("Col"), "436f6c");
}

/// Tests that the royalty payee falls back to the creator.
#[test]
fn test_royalty_payee_defaults_to_creator() {
    let params = TokenParams::new("Col", "Tok", "a token", 1, "https://tok");
    let payload = payload::create_token(&alice(), &params);
    assert_eq!(payload.arguments()[6].as_address(), Some(alice()));
    assert_eq!(payload.arguments()[7].as_u64(), Some(0));
    assert_eq!(payload.arguments()[8].as_u64(), Some(0));

    let mut params = params;
    params.royalty = RoyaltyOptions {
        payee_address: Some(bob()),
        denominator: 100,
        numerator: 5,
    };
    let payload = payload::create_token(&alice(), &params);
    assert_eq!(payload.arguments()[6].as_address(), Some(bob()));
    assert_eq!(payload.arguments()[7].as_u64(), Some(100));
    assert_eq!(payload.arguments()[8].as_u64(), Some(5));
}

/// Tests the ordering of token mutability flags and property encoding.
#[test]
fn test_create_token_flags_and_properties() {
    let mut params = TokenParams::new("Col", "Tok", "a token", 10, "https://tok");
    params.maximum = Some(100);
    params.mutability = TokenMutability {
        royalty: true,
        properties: true,
        ..Default::default()
    };
    params.properties = TokenProperties {
        keys: vec!["color".to_string()],
        values: vec!["red".to_string()],
        types: vec!["0x1::string::String".to_string()],
    };

    let payload = payload::create_token(&alice(), &params);
    let args = payload.arguments();
    assert_eq!(args.len(), 13);
    assert_eq!(args[3].as_u64(), Some(10));
    assert_eq!(args[4].as_u64(), Some(100));

    let flags: Vec<_> = args[9].as_vector().unwrap().iter().map(|a| a.as_bool().unwrap()).collect();
    assert_eq!(flags, vec![false, false, true, false, true]);

    let keys = args[10].as_vector().unwrap();
    assert_eq!(keys, &[Argument::Bytes(encode_text("color"))]);
}

/// Tests the wire form of an offer payload.
#[test]
fn test_offer_wire_form() {
    let token_id = TokenId::new(TokenDataId::new(alice(), "Col", "Tok"), Some(0));
    let value = serde_json::to_value(payload::offer(&bob(), &token_id, 1)).unwrap();

    assert_eq!(value["type"], json!("script_function_payload"));
    assert_eq!(value["function"]["name"], json!("offer_script"));
    assert_eq!(value["function"]["module"]["name"], json!("token_transfers"));
    assert_eq!(value["type_arguments"], json!([]));
    assert_eq!(value["arguments"][0], json!(bob().to_hex_literal()));
    assert_eq!(value["arguments"][2], json!("436f6c"));
    assert_eq!(value["arguments"][4], json!("0"));
    assert_eq!(value["arguments"][5], json!("1"));
}
