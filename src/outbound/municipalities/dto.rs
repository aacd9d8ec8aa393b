//! Wire DTOs for the municipality directory endpoint.

use serde::Deserialize;

use crate::domain::City;

/// One municipality record as served by the public lookup.
#[derive(Debug, Deserialize)]
pub(crate) struct MunicipalityDto {
    pub id: i64,
    pub nome: String,
}

impl From<MunicipalityDto> for City {
    fn from(dto: MunicipalityDto) -> Self {
        Self {
            id: dto.id,
            name: dto.nome,
        }
    }
}
