mod support;

use sealpost_crypto::{
    generate_keypair, generate_keypair_with, import_private, import_public, CryptoError,
    PostKeyPair, KEY_SIZE,
};
use support::{FailingEntropy, SeededEntropy};

// ── Generation ──

#[test]
fn generation_produces_valid_keys() {
    let kp = generate_keypair().unwrap();
    assert_eq!(kp.public_bytes().len(), KEY_SIZE);
    assert_eq!(kp.secret_bytes().len(), KEY_SIZE);
    // Public and secret keys must differ
    assert_ne!(kp.public_bytes(), kp.secret_bytes());
}

#[test]
fn generation_is_not_deterministic() {
    let kp1 = generate_keypair().unwrap();
    let kp2 = generate_keypair().unwrap();
    assert_ne!(kp1.public_bytes(), kp2.public_bytes());
}

#[test]
fn seeded_entropy_produces_identical_keypairs() {
    let kp1 = generate_keypair_with(&SeededEntropy::new(7)).unwrap();
    let kp2 = generate_keypair_with(&SeededEntropy::new(7)).unwrap();
    assert_eq!(kp1.public_bytes(), kp2.public_bytes());
    assert_eq!(kp1.secret_bytes(), kp2.secret_bytes());
}

#[test]
fn failed_entropy_surfaces_random_source_error() {
    let err = generate_keypair_with(&FailingEntropy).unwrap_err();
    assert!(matches!(err, CryptoError::RandomSource(_)));
}

#[test]
fn keypair_roundtrip_from_secret_bytes() {
    let kp1 = generate_keypair().unwrap();
    let kp2 = PostKeyPair::from_secret_bytes(kp1.secret_bytes());
    assert_eq!(kp1.public_bytes(), kp2.public_bytes());
}

// ── Export / import ──

#[test]
fn public_key_roundtrips_through_text() {
    let kp = generate_keypair().unwrap();
    let exported = kp.export_public();
    let imported = import_public(&exported).unwrap();
    assert_eq!(*imported.as_bytes(), kp.public_bytes());
}

#[test]
fn private_key_roundtrips_through_text() {
    let kp = generate_keypair().unwrap();
    let exported = kp.export_private();
    let imported = import_private(&exported).unwrap();
    assert_eq!(imported.to_bytes(), kp.secret_bytes());
}

#[test]
fn export_is_deterministic() {
    let kp = generate_keypair().unwrap();
    assert_eq!(kp.export_public(), kp.export_public());
    assert_eq!(kp.export_private(), kp.export_private());
}

// ── Malformed input ──

#[test]
fn import_rejects_invalid_base64() {
    let err = import_public("not base64 at all!!!").unwrap_err();
    assert!(matches!(err, CryptoError::KeyFormat(_)));

    let err = import_private("%%%").unwrap_err();
    assert!(matches!(err, CryptoError::KeyFormat(_)));
}

#[test]
fn import_rejects_wrong_length() {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;

    let short = STANDARD.encode([0x42u8; 31]);
    assert!(matches!(
        import_public(&short).unwrap_err(),
        CryptoError::KeyFormat(_)
    ));

    let long = STANDARD.encode([0x42u8; 33]);
    assert!(matches!(
        import_private(&long).unwrap_err(),
        CryptoError::KeyFormat(_)
    ));
}

#[test]
fn import_rejects_identity_public_key() {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;

    let identity = STANDARD.encode([0u8; KEY_SIZE]);
    let err = import_public(&identity).unwrap_err();
    assert!(matches!(err, CryptoError::KeyFormat(_)));
}

#[test]
fn import_rejects_empty_input() {
    assert!(matches!(
        import_public("").unwrap_err(),
        CryptoError::KeyFormat(_)
    ));
}
