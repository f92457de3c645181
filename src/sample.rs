use anyhow::{Context, Result};
use rust_embed::Embed;
use serde::Deserialize;

use crate::engine::token::Token;

#[derive(Embed)]
#[folder = "assets/sample/"]
struct SampleAssets;

#[derive(Deserialize)]
struct SampleTokens {
    tokens: Vec<Token>,
}

/// Bundled pre-analyzed document so the reader works without an analyzer
/// deployment. The token file uses the analyzer's wire format verbatim.
pub fn load_sample() -> Result<(String, Vec<Token>)> {
    let text = asset_str("text.txt")?;
    let tokens_json = asset_str("tokens.json")?;
    let parsed: SampleTokens =
        serde_json::from_str(&tokens_json).context("bundled sample tokens are malformed")?;
    Ok((text, parsed.tokens))
}

fn asset_str(name: &str) -> Result<String> {
    let file =
        SampleAssets::get(name).with_context(|| format!("missing bundled asset {name}"))?;
    Ok(std::str::from_utf8(file.data.as_ref())?.to_string())
}
