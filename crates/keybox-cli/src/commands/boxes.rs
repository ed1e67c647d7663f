//! Box commands: authenticated encryption between two identities.

use anyhow::Context;
use keybox_crypto::IdentityCrypto;

use crate::output::Printer;

/// Seal `message` for `their_public_key`.
pub(crate) fn encrypt(
    crypto: &IdentityCrypto,
    printer: &Printer,
    message: &str,
    their_public_key: &str,
    my_secret_key: &str,
) -> anyhow::Result<()> {
    let envelope = crypto
        .encrypt(message, their_public_key, my_secret_key)
        .context("encryption failed")?;

    printer.record(
        &envelope,
        "Encrypted message",
        &[("Data", envelope.data()), ("Nonce", envelope.nonce())],
    )
}

/// Open a box sealed by `their_public_key` and print the plaintext.
pub(crate) fn decrypt(
    crypto: &IdentityCrypto,
    printer: &Printer,
    data: &str,
    nonce: &str,
    their_public_key: &str,
    my_secret_key: &str,
) -> anyhow::Result<()> {
    let plaintext = crypto
        .decrypt(data, nonce, their_public_key, my_secret_key)
        .context("decryption failed")?;
    printer.text("plaintext", &plaintext)
}
