//! Signature commands.

use anyhow::Context;
use keybox_crypto::IdentityCrypto;
use tracing::warn;

use crate::output::Printer;

/// Print a detached signature over `message`.
pub(crate) fn sign(
    crypto: &IdentityCrypto,
    printer: &Printer,
    message: &str,
    my_secret_key: &str,
) -> anyhow::Result<()> {
    let signature = crypto
        .sign(message, my_secret_key)
        .context("signing failed")?;
    printer.text("signature", signature.as_str())
}

/// Check a detached signature and print the verdict.
///
/// Returns the verdict so the caller can set the exit code.
pub(crate) fn verify(
    crypto: &IdentityCrypto,
    printer: &Printer,
    message: &str,
    signature: &str,
    their_public_key: &str,
) -> anyhow::Result<bool> {
    let verified = crypto
        .verify(message, signature, their_public_key)
        .context("could not check signature")?;
    if !verified {
        warn!("signature did not verify");
    }
    printer.verdict(verified)?;
    Ok(verified)
}
