//! Keys commands: create and restore signing identities.

use anyhow::Context;
use keybox_crypto::{IdentityCrypto, SigningKeyPair};
use tracing::info;

use crate::output::Printer;
use crate::theme::Theme;

/// Generate a fresh identity and print both halves.
pub(crate) fn keygen(crypto: &IdentityCrypto, printer: &Printer) -> anyhow::Result<()> {
    let pair = crypto.generate();
    info!(key_id = %pair.key_id_hex(), "generated identity");
    show(printer, &pair, "New signing identity")
}

/// Rebuild an identity from its secret key and print both halves.
pub(crate) fn restore(
    crypto: &IdentityCrypto,
    printer: &Printer,
    secret_key: &str,
) -> anyhow::Result<()> {
    let pair = crypto
        .restore(secret_key)
        .context("could not restore identity from secret key")?;
    show(printer, &pair, "Restored signing identity")
}

fn show(printer: &Printer, pair: &SigningKeyPair, header: &str) -> anyhow::Result<()> {
    let key_id = pair.key_id_hex();
    printer.record(
        pair,
        header,
        &[
            ("Key ID", key_id.as_str()),
            ("Public key", pair.public_key()),
            ("Secret key", pair.secret_key()),
        ],
    )?;
    eprintln!(
        "{}",
        Theme::warning("The secret key grants full control of this identity. Store it securely.")
    );
    Ok(())
}
