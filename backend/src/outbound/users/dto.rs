//! Wire shapes of the users service.
//!
//! Field names follow the users service (`pagador`, `recebedor`, `valor`,
//! `data`) rather than the domain names.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{DirectoryUser, Receipt, TransactionDraft};

#[derive(Debug, Deserialize)]
pub(super) struct UsuarioDto {
    pub(super) username: String,
    pub(super) balance: Decimal,
}

impl From<UsuarioDto> for DirectoryUser {
    fn from(dto: UsuarioDto) -> Self {
        DirectoryUser::new(dto.username, dto.balance)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct ComprovanteDto {
    pub(super) id: Uuid,
    pub(super) pagador: String,
    pub(super) recebedor: String,
    pub(super) valor: Decimal,
    pub(super) data: DateTime<Utc>,
}

impl From<&Receipt> for ComprovanteDto {
    fn from(receipt: &Receipt) -> Self {
        Self {
            id: receipt.id(),
            pagador: receipt.payer().to_owned(),
            recebedor: receipt.payee().to_owned(),
            valor: receipt.amount(),
            data: receipt.created_at(),
        }
    }
}

impl ComprovanteDto {
    /// Rebuild the acknowledged receipt. Callers check the id first.
    pub(super) fn into_receipt(self) -> Receipt {
        let transaction = TransactionDraft::new(self.pagador, self.recebedor, self.valor, self.data)
            .into_transaction(self.id);
        Receipt::from(&transaction)
    }
}
