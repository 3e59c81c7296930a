//! Wire shape of one quote from the quotes API.

use serde::Deserialize;

use crate::domain::CurrencyQuote;

#[derive(Debug, Deserialize)]
pub(super) struct MoedaDto {
    #[serde(default)]
    pub(super) code: String,
    #[serde(default)]
    pub(super) codein: String,
    #[serde(default)]
    pub(super) name: String,
    #[serde(default)]
    pub(super) high: String,
    #[serde(default)]
    pub(super) low: String,
    #[serde(default)]
    pub(super) bid: String,
    #[serde(default)]
    pub(super) ask: String,
    #[serde(default)]
    pub(super) create_date: String,
}

impl From<MoedaDto> for CurrencyQuote {
    fn from(dto: MoedaDto) -> Self {
        Self {
            code: dto.code,
            codein: dto.codein,
            name: dto.name,
            high: dto.high,
            low: dto.low,
            bid: dto.bid,
            ask: dto.ask,
            create_date: dto.create_date,
        }
    }
}
