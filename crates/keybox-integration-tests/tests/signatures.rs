//! Detached signatures across identities and instances.

mod common;

use common::{b64, to_b64};
use keybox_crypto::{DetachedSignature, ErrorKind, IdentityCrypto, SigningKeyPair};

const SEED7_SECRET: &str = "BwcHBwcHBwcHBwcHBwcHBwcHBwcHBwcHBwcHBwcHBwfqSmxj4pxSCr71UHsTLsX5lUd2rr6+e5JCHuppFEbSLA==";
const SEED7_PUBLIC: &str = "6kpsY+KcUgq+9VB7Ey7F+ZVHdq6+vnuSQh7qaRRG0iw=";

#[test]
fn signatures_verify_on_another_instance() {
    let signer = IdentityCrypto::new();
    let checker = IdentityCrypto::new();
    let pair = signer.generate();

    let signature = signer.sign("some data to sign", pair.secret_key()).unwrap();
    assert!(
        checker
            .verify("some data to sign", signature.as_str(), pair.public_key())
            .unwrap()
    );
}

#[test]
fn signing_is_deterministic() {
    let crypto = IdentityCrypto::new();
    let a = crypto.sign("msg", SEED7_SECRET).unwrap();
    let b = crypto.sign("msg", SEED7_SECRET).unwrap();
    assert_eq!(a, b);
    assert!(crypto.verify("msg", a.as_str(), SEED7_PUBLIC).unwrap());
}

#[test]
fn restored_key_signs_identically() {
    let crypto = IdentityCrypto::new();
    let pair = crypto.generate();
    let restored = crypto.restore(pair.secret_key()).unwrap();

    assert_eq!(
        crypto.sign("payload", pair.secret_key()).unwrap(),
        crypto.sign("payload", restored.secret_key()).unwrap()
    );
}

#[test]
fn stored_identity_json_is_checked_on_load() {
    let crypto = IdentityCrypto::new();
    let mine = crypto.generate();
    let theirs = crypto.generate();

    let stored = serde_json::to_string(&mine).unwrap();
    let loaded: SigningKeyPair = serde_json::from_str(&stored).unwrap();
    assert_eq!(loaded, mine);

    let swapped = serde_json::json!({
        "secretKey": mine.secret_key(),
        "publicKey": theirs.public_key(),
    });
    assert!(serde_json::from_value::<SigningKeyPair>(swapped).is_err());
}

#[test]
fn any_signature_bit_flip_fails() {
    let crypto = IdentityCrypto::new();
    let pair = crypto.generate();
    let signature = crypto.sign("payload", pair.secret_key()).unwrap();
    let bytes = b64(signature.as_str());

    for index in [0, 31, 32, 63] {
        let mut tampered = bytes.clone();
        tampered[index] ^= 0x01;
        let verified = crypto
            .verify("payload", &to_b64(&tampered), pair.public_key())
            .unwrap();
        assert!(!verified, "byte {index}");
    }
}

#[test]
fn message_changes_fail() {
    let crypto = IdentityCrypto::new();
    let pair = crypto.generate();
    let signature = crypto.sign("payload", pair.secret_key()).unwrap();

    for other in ["Payload", "payload ", "", "payloa"] {
        assert!(!crypto.verify(other, signature.as_str(), pair.public_key()).unwrap());
    }
}

#[test]
fn signature_text_from_elsewhere_is_accepted() {
    let crypto = IdentityCrypto::new();
    let pair = crypto.generate();
    let produced = crypto.sign("héllo", pair.secret_key()).unwrap();

    let received = DetachedSignature::new(produced.clone().into_string());
    assert_eq!(received, produced);
    assert!(crypto.verify("héllo", received.as_str(), pair.public_key()).unwrap());
}

#[test]
fn malformed_inputs_are_decode_errors() {
    let crypto = IdentityCrypto::new();

    assert_eq!(
        crypto.sign("x", "not base64").unwrap_err().kind(),
        ErrorKind::Decode
    );
    assert_eq!(
        crypto.sign("x", SEED7_PUBLIC).unwrap_err().kind(),
        ErrorKind::Decode
    );

    let signature = crypto.sign("x", SEED7_SECRET).unwrap();
    assert_eq!(
        crypto
            .verify("x", signature.as_str(), "AAAA")
            .unwrap_err()
            .kind(),
        ErrorKind::Decode
    );
}
