//! Print an OpenAPI document as JSON.
//!
//! `openapi-dump` prints the payment document; `openapi-dump mercado` prints
//! the market document.

use std::io::Write;

use ada_backend::{ApiDoc, MarketApiDoc};
use color_eyre::eyre::{Result, bail};
use utoipa::OpenApi;

fn main() -> Result<()> {
    color_eyre::install()?;
    let doc = match std::env::args().nth(1).as_deref() {
        None | Some("pagamento") => ApiDoc::openapi(),
        Some("mercado") => MarketApiDoc::openapi(),
        Some(other) => bail!("unknown service {other:?}; expected pagamento or mercado"),
    };
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", doc.to_pretty_json()?)?;
    Ok(())
}
